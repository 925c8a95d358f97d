use anyhow::{bail, Context, Result};
use serde::Deserialize;
use std::collections::BTreeMap;
use std::path::Path;

use crate::domain::value::{Value, Variables};

/// A YAML (or JSON) document mapping variable names to values
#[derive(Deserialize, Debug, PartialEq, Default)]
#[serde(transparent)]
pub struct VariablesFile {
    pub variables: BTreeMap<String, serde_yaml::Value>,
}

impl VariablesFile {
    pub fn parse(document: &str) -> Result<Self> {
        if document.trim().is_empty() {
            return Ok(Self::default());
        }
        serde_yaml::from_str(document).context("Invalid variables document")
    }

    pub fn load(path: &Path) -> Result<Self> {
        let document = std::fs::read_to_string(path)
            .with_context(|| format!("Could not read variables file {}", path.display()))?;
        Self::parse(&document)
            .with_context(|| format!("Could not parse variables file {}", path.display()))
    }

    pub fn into_variables(self) -> Result<Variables> {
        self.variables
            .into_iter()
            .map(|(name, value)| {
                let value = value_from_yaml(value)
                    .with_context(|| format!("Invalid value for variable '{}'", name))?;
                Ok((name, value))
            })
            .collect()
    }
}

/// Parse a `name=value` assignment given on the command line.
///
/// The value is always a string, so `--var list=a,b` binds the text `a,b`.
pub fn parse_assignment(assignment: &str) -> Result<(String, Value)> {
    match assignment.split_once('=') {
        Some((name, _)) if name.is_empty() => {
            bail!("Invalid assignment '{}': missing variable name", assignment)
        }
        Some((name, value)) => Ok((name.to_string(), Value::from(value))),
        None => bail!("Invalid assignment '{}': expected NAME=VALUE", assignment),
    }
}

fn value_from_yaml(value: serde_yaml::Value) -> Result<Value> {
    Ok(match value {
        serde_yaml::Value::Null => Value::Null,
        serde_yaml::Value::Bool(b) => Value::Bool(b),
        serde_yaml::Value::Number(n) => match n.as_i64() {
            Some(i) => Value::Integer(i),
            None => match n.as_f64() {
                Some(f) => Value::Float(f),
                None => Value::String(n.to_string()),
            },
        },
        serde_yaml::Value::String(s) => Value::String(s),
        serde_yaml::Value::Sequence(items) => Value::List(
            items
                .into_iter()
                .map(value_from_yaml)
                .collect::<Result<Vec<_>>>()?,
        ),
        serde_yaml::Value::Mapping(mapping) => {
            let mut map = BTreeMap::new();
            for (key, value) in mapping {
                map.insert(key_from_yaml(key)?, value_from_yaml(value)?);
            }
            Value::Map(map)
        }
        serde_yaml::Value::Tagged(tagged) => value_from_yaml(tagged.value)?,
    })
}

fn key_from_yaml(key: serde_yaml::Value) -> Result<String> {
    match key {
        serde_yaml::Value::String(s) => Ok(s),
        serde_yaml::Value::Number(n) => Ok(n.to_string()),
        serde_yaml::Value::Bool(b) => Ok(b.to_string()),
        other => bail!("Mapping keys must be scalars, got {:?}", other),
    }
}
