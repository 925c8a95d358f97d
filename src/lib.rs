//! RFC 6570 URI Template expansion.
//!
//! ```
//! use uritemplate::{expand, Value, Variables};
//!
//! let mut vars = Variables::new();
//! vars.insert("user".to_string(), Value::from("sigmavirus24"));
//! vars.insert("list".to_string(), Value::from(vec!["red", "green", "blue"]));
//!
//! let uri = expand("https://api.github.com/users{/user}{?list*}", &vars).unwrap();
//! assert_eq!(uri, "https://api.github.com/users/sigmavirus24?list=red&list=green&list=blue");
//! ```

pub mod cli;
pub mod config;
pub mod domain;
pub mod error;
pub mod validation;

use std::collections::HashSet;

pub use domain::template::{
    Encoding, ExpansionFamily, Member, Operator, Scope, Template, TemplateParser, TemplatePart,
    VariableExpr,
};
pub use domain::value::{Value, Variables};
pub use error::{Result, TemplateError};
pub use validation::Validator;

/// Parse `template` and expand it with `variables`
pub fn expand(template: &str, variables: &Variables) -> Result<String> {
    Ok(Template::new(template)?.expand(variables))
}

/// Like [`expand`], with `overrides` taking precedence over `variables`
pub fn expand_with(template: &str, variables: &Variables, overrides: &Variables) -> Result<String> {
    Ok(Template::new(template)?.expand_with(variables, overrides))
}

/// Pre-expand the expressions of `template` that only use names in `known`
pub fn partial(template: &str, known: &Variables) -> Result<Template> {
    Ok(Template::new(template)?.partial(known))
}

/// Every variable name referenced by `template`
pub fn variables(template: &str) -> Result<HashSet<String>> {
    Ok(Template::new(template)?
        .variable_names()
        .into_iter()
        .map(str::to_string)
        .collect())
}
