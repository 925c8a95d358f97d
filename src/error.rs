// Error handling for uritemplate

use thiserror::Error;

/// Errors raised while building or validating a URI template.
///
/// Every variant describes an invalid template; match on the enum itself to
/// catch all of them.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TemplateError {
    /// Raised by [`crate::Validator`] when `{` and `}` counts differ.
    #[error("The URI template ({uri}) has more {} braces than {} braces.", more_side(.left, .right), less_side(.left, .right))]
    UnbalancedBraces {
        uri: String,
        left: usize,
        right: usize,
    },

    /// A `:N` modifier whose length is not a non-negative integer.
    #[error("Invalid prefix length '{prefix}' in expression {{{expression}}}")]
    InvalidPrefix { expression: String, prefix: String },
}

impl TemplateError {
    /// The template text the error refers to, when it carries one
    pub fn uri(&self) -> Option<&str> {
        match self {
            TemplateError::UnbalancedBraces { uri, .. } => Some(uri),
            TemplateError::InvalidPrefix { .. } => None,
        }
    }
}

fn more_side(left: &usize, right: &usize) -> &'static str {
    if left < right {
        "right"
    } else {
        "left"
    }
}

fn less_side(left: &usize, right: &usize) -> &'static str {
    if left < right {
        "left"
    } else {
        "right"
    }
}

pub type Result<T> = std::result::Result<T, TemplateError>;
