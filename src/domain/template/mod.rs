// Template module for RFC 6570 URI Templates
//
// This module provides parsing of templates into expressions and their
// expansion with the eight RFC 6570 operators.

mod ast;
mod encoding;
mod parser;
mod resolver;

pub use ast::{ExpansionFamily, Member, Operator, Template, TemplatePart, VariableExpr};
pub use encoding::{Encoding, RESERVED};
pub use parser::TemplateParser;
pub use resolver::Scope;

use std::str::FromStr;

use crate::error::{Result, TemplateError};

impl Template {
    /// Parse `raw` into a template
    pub fn new(raw: &str) -> Result<Self> {
        TemplateParser::parse(raw)
    }
}

impl FromStr for Template {
    type Err = TemplateError;

    fn from_str(s: &str) -> Result<Self> {
        TemplateParser::parse(s)
    }
}

impl FromStr for VariableExpr {
    type Err = TemplateError;

    fn from_str(s: &str) -> Result<Self> {
        TemplateParser::parse_expression(s)
    }
}
