// Validation functions for uritemplate
// Opt-in checks layered in front of expansion for callers who want to fail fast

use crate::domain::template::Template;
use crate::error::{Result, TemplateError};

/// Configurable validation of parsed templates.
///
/// Parsing itself is lenient about braces; a validator rejects templates
/// whose `{` and `}` counts differ. The check is enforced by default.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Validator {
    enforcing_balanced_braces: bool,
}

impl Validator {
    pub fn new() -> Self {
        Self {
            enforcing_balanced_braces: true,
        }
    }

    /// Let templates with unbalanced braces through
    pub fn allow_unbalanced_braces(mut self) -> Self {
        self.enforcing_balanced_braces = false;
        self
    }

    /// Reject templates with unbalanced braces
    pub fn force_balanced_braces(mut self) -> Self {
        self.enforcing_balanced_braces = true;
        self
    }

    pub fn validate(&self, template: &Template) -> Result<()> {
        if self.enforcing_balanced_braces {
            enforce_balanced_braces(template.as_str())?;
        }
        Ok(())
    }
}

impl Default for Validator {
    fn default() -> Self {
        Self::new()
    }
}

/// Check that a template string has as many `{` as `}`
///
/// Returns Ok(()) if balanced, Err(TemplateError::UnbalancedBraces) if not
pub fn enforce_balanced_braces(uri: &str) -> Result<()> {
    let left = uri.matches('{').count();
    let right = uri.matches('}').count();

    if left != right {
        return Err(TemplateError::UnbalancedBraces {
            uri: uri.to_string(),
            left,
            right,
        });
    }

    Ok(())
}
