// Template expansion against caller-supplied variables

use std::borrow::Cow;

use tracing::{debug, trace};

use super::ast::{ExpansionFamily, Member, Operator, Template, TemplatePart, VariableExpr};
use super::encoding::Encoding;
use crate::domain::value::{Shape, Value, Variables};

/// Layered variable lookup: overrides shadow the base bindings.
///
/// Neither map is copied or modified.
#[derive(Debug, Clone, Copy)]
pub struct Scope<'a> {
    base: &'a Variables,
    overrides: Option<&'a Variables>,
}

impl<'a> Scope<'a> {
    pub fn new(base: &'a Variables) -> Self {
        Self {
            base,
            overrides: None,
        }
    }

    pub fn with_overrides(base: &'a Variables, overrides: &'a Variables) -> Self {
        Self {
            base,
            overrides: Some(overrides),
        }
    }

    pub fn get(&self, name: &str) -> Option<&'a Value> {
        self.overrides
            .and_then(|overrides| overrides.get(name))
            .or_else(|| self.base.get(name))
    }

    pub fn contains(&self, name: &str) -> bool {
        self.get(name).is_some()
    }
}

impl Template {
    /// Expand the template with the given variables
    pub fn expand(&self, variables: &Variables) -> String {
        self.expand_scope(Scope::new(variables))
    }

    /// Expand with extra bindings that win over `variables` on collision
    pub fn expand_with(&self, variables: &Variables, overrides: &Variables) -> String {
        self.expand_scope(Scope::with_overrides(variables, overrides))
    }

    pub fn expand_scope(&self, scope: Scope<'_>) -> String {
        if self.expressions().next().is_none() {
            return self.as_str().to_string();
        }

        let mut result = String::with_capacity(self.as_str().len());
        for part in self.parts() {
            match part {
                TemplatePart::Literal(s) => result.push_str(s),
                TemplatePart::Expression(expr) => result.push_str(&expr.expand_scope(scope)),
            }
        }
        result
    }

    /// Pre-expand every expression whose variables are all bound in `known`.
    ///
    /// An expression with any unbound member is kept verbatim, braces and
    /// all, so it can be expanded later.
    pub fn partial(&self, known: &Variables) -> Template {
        let scope = Scope::new(known);
        let mut raw = String::with_capacity(self.as_str().len());
        let mut parts = Vec::new();
        let mut literal_buf = String::new();

        for part in self.parts() {
            match part {
                TemplatePart::Literal(s) => {
                    raw.push_str(s);
                    literal_buf.push_str(s);
                }
                TemplatePart::Expression(expr) if expr.variable_names().all(|n| scope.contains(n)) => {
                    let expanded = expr.expand_scope(scope);
                    debug!(expression = expr.original(), expanded = %expanded, "pre-expanded expression");
                    raw.push_str(&expanded);
                    literal_buf.push_str(&expanded);
                }
                TemplatePart::Expression(expr) => {
                    if !literal_buf.is_empty() {
                        parts.push(TemplatePart::Literal(std::mem::take(&mut literal_buf)));
                    }
                    raw.push('{');
                    raw.push_str(expr.original());
                    raw.push('}');
                    parts.push(TemplatePart::Expression(expr.clone()));
                }
            }
        }

        if !literal_buf.is_empty() {
            parts.push(TemplatePart::Literal(literal_buf));
        }

        Template::from_parts(raw, parts)
    }
}

impl VariableExpr {
    /// Expand this expression on its own
    pub fn expand(&self, variables: &Variables) -> String {
        self.expand_scope(Scope::new(variables))
    }

    pub fn expand_scope(&self, scope: Scope<'_>) -> String {
        let mut fragments = Vec::new();

        for member in &self.members {
            let value = match (scope.get(&member.name), self.defaults.get(&member.name)) {
                (Some(value), Some(default)) if value.yields_to_default() => {
                    Cow::Owned(Value::from(default))
                }
                (None, Some(default)) => Cow::Owned(Value::from(default)),
                (Some(value), _) => Cow::Borrowed(value),
                (None, None) => continue,
            };

            // Null, empty collections and all-null collections are undefined
            let Some(shape) = value.shape() else {
                continue;
            };

            let fragment = match self.family {
                ExpansionFamily::String => expand_string(self.operator, member, shape),
                ExpansionFamily::LabelPath => expand_label_path(self.operator, member, shape),
                ExpansionFamily::Semicolon => expand_semicolon(self.operator, member, shape),
                ExpansionFamily::Query => expand_query(self.operator, member, shape),
            };
            fragments.push(fragment);
        }

        let expanded = if fragments.is_empty() {
            String::new()
        } else {
            format!(
                "{}{}",
                self.operator.prefix(),
                fragments.join(self.operator.separator())
            )
        };

        trace!(expression = %self.original, expanded = %expanded, "expanded expression");
        expanded
    }
}

/// Simple, reserved and fragment expansion. Never writes `name=`.
fn expand_string(operator: Operator, member: &Member, shape: Shape<'_>) -> String {
    let encoding = operator.encoding();

    match shape {
        Shape::Scalar(value) => encoding.encode(truncate(&value, member.prefix)).into_owned(),
        Shape::List(items) => join_encoded(&items, encoding, ","),
        Shape::Assoc(entries) => {
            let pair_sep = if member.explode { "=" } else { "," };
            join_pairs(&entries, encoding, pair_sep, ",")
        }
    }
}

/// Label (`.`) and path segment (`/`) expansion
fn expand_label_path(operator: Operator, member: &Member, shape: Shape<'_>) -> String {
    let encoding = operator.encoding();
    let join_sep = if member.explode {
        operator.separator()
    } else {
        ","
    };

    match shape {
        Shape::Scalar(value) => encoding.encode(truncate(&value, member.prefix)).into_owned(),
        Shape::List(items) => join_encoded(&items, encoding, join_sep),
        Shape::Assoc(entries) => {
            let pair_sep = if member.explode { "=" } else { "," };
            join_pairs(&entries, encoding, pair_sep, join_sep)
        }
    }
}

/// Path-style parameter expansion: an empty scalar renders as a bare name
fn expand_semicolon(operator: Operator, member: &Member, shape: Shape<'_>) -> String {
    expand_named(operator, member, shape, "")
}

/// Form-style query expansion: an empty scalar still renders as `name=`
fn expand_query(operator: Operator, member: &Member, shape: Shape<'_>) -> String {
    expand_named(operator, member, shape, "=")
}

fn expand_named(operator: Operator, member: &Member, shape: Shape<'_>, empty_suffix: &str) -> String {
    let encoding = operator.encoding();
    let name = member.name.as_str();

    match shape {
        Shape::Scalar(value) => {
            let value = truncate(&value, member.prefix);
            if value.is_empty() {
                format!("{}{}", name, empty_suffix)
            } else {
                format!("{}={}", name, encoding.encode(value))
            }
        }
        Shape::List(items) if member.explode => items
            .iter()
            .map(|item| format!("{}={}", name, encoding.encode(item)))
            .collect::<Vec<_>>()
            .join(operator.separator()),
        Shape::List(items) => format!("{}={}", name, join_encoded(&items, encoding, ",")),
        Shape::Assoc(entries) if member.explode => {
            join_pairs(&entries, encoding, "=", operator.separator())
        }
        Shape::Assoc(entries) => format!("{}={}", name, join_pairs(&entries, encoding, ",", ",")),
    }
}

fn join_encoded(items: &[Cow<'_, str>], encoding: Encoding, sep: &str) -> String {
    items
        .iter()
        .map(|item| encoding.encode(item))
        .collect::<Vec<_>>()
        .join(sep)
}

fn join_pairs(
    entries: &[(&str, Cow<'_, str>)],
    encoding: Encoding,
    pair_sep: &str,
    sep: &str,
) -> String {
    entries
        .iter()
        .map(|(key, value)| format!("{}{}{}", encoding.encode(key), pair_sep, encoding.encode(value)))
        .collect::<Vec<_>>()
        .join(sep)
}

/// Keep the first `prefix` characters of an unencoded value
fn truncate(value: &str, prefix: Option<usize>) -> &str {
    match prefix.and_then(|n| value.char_indices().nth(n)) {
        Some((idx, _)) => &value[..idx],
        None => value,
    }
}
