// Abstract Syntax Tree types for URI templates

use std::collections::{HashMap, HashSet};
use std::fmt;
use std::hash::{Hash, Hasher};

use super::encoding::Encoding;

/// A parsed URI template.
///
/// Equality and hashing only look at the source text, so two templates built
/// from the same string are interchangeable as map keys.
#[derive(Debug, Clone)]
pub struct Template {
    raw: String,
    parts: Vec<TemplatePart>,
}

impl Template {
    pub(crate) fn from_parts(raw: String, parts: Vec<TemplatePart>) -> Self {
        Self { raw, parts }
    }

    /// The source text this template was parsed from
    pub fn as_str(&self) -> &str {
        &self.raw
    }

    pub fn parts(&self) -> &[TemplatePart] {
        &self.parts
    }

    /// Get all expressions in this template, in order of appearance
    pub fn expressions(&self) -> impl Iterator<Item = &VariableExpr> {
        self.parts.iter().filter_map(|part| match part {
            TemplatePart::Expression(expr) => Some(expr),
            _ => None,
        })
    }

    /// Names of every variable referenced by the template
    pub fn variable_names(&self) -> HashSet<&str> {
        self.expressions()
            .flat_map(|expr| expr.variable_names())
            .collect()
    }
}

impl PartialEq for Template {
    fn eq(&self, other: &Self) -> bool {
        self.raw == other.raw
    }
}

impl Eq for Template {}

impl Hash for Template {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.raw.hash(state);
    }
}

impl fmt::Display for Template {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.raw)
    }
}

/// A template consists of literal strings and bracketed expressions
#[derive(Debug, Clone, PartialEq)]
pub enum TemplatePart {
    Literal(String),
    Expression(VariableExpr),
}

/// Expansion operator selected by the first character of an expression
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Operator {
    /// `{var}`
    Simple,
    /// `{+var}`
    Reserved,
    /// `{#var}`
    Fragment,
    /// `{.var}`
    Label,
    /// `{/var}`
    PathSegment,
    /// `{;var}`
    PathParameter,
    /// `{?var}`
    Query,
    /// `{&var}`
    QueryContinuation,
    /// One of the operators RFC 6570 sets aside for extensions (`|`, `!`, `@`).
    /// It prefixes and joins with its own character.
    Extension(char),
}

impl Operator {
    pub fn from_char(ch: char) -> Option<Self> {
        match ch {
            '+' => Some(Operator::Reserved),
            '#' => Some(Operator::Fragment),
            '.' => Some(Operator::Label),
            '/' => Some(Operator::PathSegment),
            ';' => Some(Operator::PathParameter),
            '?' => Some(Operator::Query),
            '&' => Some(Operator::QueryContinuation),
            '|' | '!' | '@' => Some(Operator::Extension(ch)),
            _ => None,
        }
    }

    /// The operator as written in the template (empty for simple expansion)
    pub fn symbol(&self) -> &'static str {
        match self {
            Operator::Simple => "",
            Operator::Reserved => "+",
            Operator::Fragment => "#",
            Operator::Label => ".",
            Operator::PathSegment => "/",
            Operator::PathParameter => ";",
            Operator::Query => "?",
            Operator::QueryContinuation => "&",
            Operator::Extension('|') => "|",
            Operator::Extension('!') => "!",
            Operator::Extension(_) => "@",
        }
    }

    /// Text written before the expansion when any member produced a fragment
    pub fn prefix(&self) -> &'static str {
        match self {
            Operator::Simple | Operator::Reserved => "",
            other => other.symbol(),
        }
    }

    /// Text written between member fragments
    pub fn separator(&self) -> &'static str {
        match self {
            Operator::Simple | Operator::Reserved | Operator::Fragment => ",",
            Operator::Query | Operator::QueryContinuation => "&",
            other => other.symbol(),
        }
    }

    pub fn encoding(&self) -> Encoding {
        match self {
            Operator::Reserved | Operator::Fragment => Encoding::Reserved,
            _ => Encoding::Unreserved,
        }
    }

    pub fn family(&self) -> ExpansionFamily {
        match self {
            Operator::Label | Operator::PathSegment => ExpansionFamily::LabelPath,
            Operator::PathParameter => ExpansionFamily::Semicolon,
            Operator::Query | Operator::QueryContinuation => ExpansionFamily::Query,
            _ => ExpansionFamily::String,
        }
    }
}

/// The expansion routine an operator uses for each member
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ExpansionFamily {
    /// Simple, reserved and fragment expansion
    String,
    /// Label and path-segment expansion
    LabelPath,
    /// Path-style parameters
    Semicolon,
    /// Form-style query and query continuation
    Query,
}

/// One comma-separated variable reference inside an expression
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Member {
    pub name: String,
    pub explode: bool,
    pub prefix: Option<usize>,
}

impl Member {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            explode: false,
            prefix: None,
        }
    }

    pub fn with_explode(mut self, explode: bool) -> Self {
        self.explode = explode;
        self
    }

    pub fn with_prefix(mut self, prefix: Option<usize>) -> Self {
        self.prefix = prefix;
        self
    }
}

/// A single `{...}` expression: operator, members and inline defaults
#[derive(Debug, Clone, PartialEq)]
pub struct VariableExpr {
    pub(crate) original: String,
    pub(crate) operator: Operator,
    pub(crate) family: ExpansionFamily,
    pub(crate) members: Vec<Member>,
    pub(crate) defaults: HashMap<String, String>,
}

impl VariableExpr {
    pub(crate) fn new(
        original: String,
        operator: Operator,
        members: Vec<Member>,
        defaults: HashMap<String, String>,
    ) -> Self {
        Self {
            original,
            family: operator.family(),
            operator,
            members,
            defaults,
        }
    }

    /// The text between the braces, operator included
    pub fn original(&self) -> &str {
        &self.original
    }

    pub fn operator(&self) -> Operator {
        self.operator
    }

    pub fn family(&self) -> ExpansionFamily {
        self.family
    }

    pub fn members(&self) -> &[Member] {
        &self.members
    }

    pub fn defaults(&self) -> &HashMap<String, String> {
        &self.defaults
    }

    pub fn variable_names(&self) -> impl Iterator<Item = &str> {
        self.members.iter().map(|member| member.name.as_str())
    }
}

impl fmt::Display for VariableExpr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.original)
    }
}
