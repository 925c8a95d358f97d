// Template parser: single-pass scan for `{...}` groups

use std::collections::HashMap;

use tracing::debug;

use super::ast::{Member, Operator, Template, TemplatePart, VariableExpr};
use crate::error::{Result, TemplateError};

pub struct TemplateParser<'a> {
    input: &'a str,
    pos: usize,
}

impl<'a> TemplateParser<'a> {
    /// Parse a template.
    ///
    /// Brace matching is lenient: a group that never closes, or that is
    /// interrupted by another `{`, stays literal text. Only a malformed
    /// `:N` prefix is rejected.
    pub fn parse(template: &str) -> Result<Template> {
        let mut parser = TemplateParser {
            input: template,
            pos: 0,
        };
        let parts = parser.parse_template()?;
        let template = Template::from_parts(template.to_string(), parts);

        debug!(
            template = template.as_str(),
            expressions = template.expressions().count(),
            "parsed URI template"
        );

        Ok(template)
    }

    /// Parse the text between a pair of braces, operator included
    pub fn parse_expression(original: &str) -> Result<VariableExpr> {
        let (operator, body) = match original.chars().next().and_then(Operator::from_char) {
            // operator characters are all ASCII
            Some(operator) => (operator, &original[1..]),
            None => (Operator::Simple, original),
        };

        let mut members = Vec::new();
        let mut defaults = HashMap::new();

        for token in body.split(',') {
            let (varspec, default) = match token.split_once('=') {
                Some((varspec, default)) => (varspec, Some(default)),
                None => (token, None),
            };

            let (varspec, explode) = match varspec.strip_suffix('*') {
                Some(varspec) => (varspec, true),
                None => (varspec, false),
            };

            let (name, prefix) = match varspec.split_once(':') {
                Some((name, length)) => (name, parse_prefix(original, length)?),
                None => (varspec, None),
            };

            if let Some(default) = default.filter(|d| !d.is_empty()) {
                defaults.insert(name.to_string(), default.to_string());
            }

            members.push(Member::new(name).with_explode(explode).with_prefix(prefix));
        }

        Ok(VariableExpr::new(
            original.to_string(),
            operator,
            members,
            defaults,
        ))
    }

    fn parse_template(&mut self) -> Result<Vec<TemplatePart>> {
        let mut parts = Vec::new();
        let mut literal_buf = String::new();

        while let Some(ch) = self.peek_char() {
            if ch == '{' {
                if let Some(inner) = self.scan_expression() {
                    // Start of expression - flush literal buffer first
                    if !literal_buf.is_empty() {
                        parts.push(TemplatePart::Literal(std::mem::take(&mut literal_buf)));
                    }
                    parts.push(TemplatePart::Expression(Self::parse_expression(inner)?));
                    continue;
                }
            }

            literal_buf.push(ch);
            self.pos += ch.len_utf8();
        }

        // Flush remaining literal
        if !literal_buf.is_empty() {
            parts.push(TemplatePart::Literal(literal_buf));
        }

        Ok(parts)
    }

    /// With `pos` on a `{`, consume a complete non-empty group and return
    /// its inner text. Leaves `pos` alone when there is no such group.
    fn scan_expression(&mut self) -> Option<&'a str> {
        let input = self.input;
        let rest = &input[self.pos + 1..];
        let end = rest.find(|ch: char| ch == '{' || ch == '}')?;

        if end == 0 || rest[end..].starts_with('{') {
            return None;
        }

        self.pos += end + 2;
        Some(&rest[..end])
    }

    fn peek_char(&self) -> Option<char> {
        self.input[self.pos..].chars().next()
    }
}

fn parse_prefix(expression: &str, length: &str) -> Result<Option<usize>> {
    let length: usize = length.parse().map_err(|_| TemplateError::InvalidPrefix {
        expression: expression.to_string(),
        prefix: length.to_string(),
    })?;

    // :0 truncates nothing
    Ok((length > 0).then_some(length))
}
