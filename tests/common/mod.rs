// Common test utilities shared across test files

use serde::Deserialize;
use std::collections::BTreeMap;
use uritemplate::{Value, Variables};

/// Build a variable map from name/value pairs
#[allow(dead_code)]
pub fn vars<V: Into<Value> + Clone>(pairs: &[(&str, V)]) -> Variables {
    pairs
        .iter()
        .map(|(name, value)| (name.to_string(), value.clone().into()))
        .collect()
}

/// The variables RFC 6570 section 3.2 uses throughout its examples
#[allow(dead_code)]
pub fn rfc_variables() -> Variables {
    let mut variables = vars(&[
        ("var", "value"),
        ("hello", "Hello World!"),
        ("half", "50%"),
        ("who", "fred"),
        ("base", "http://example.com/home/"),
        ("path", "/foo/bar"),
        ("v", "6"),
        ("x", "1024"),
        ("y", "768"),
        ("empty", ""),
        ("dub", "me/too"),
    ]);
    variables.insert("undef".to_string(), Value::Null);
    variables.insert("list".to_string(), Value::from(vec!["red", "green", "blue"]));
    variables.insert("count".to_string(), Value::from(vec!["one", "two", "three"]));
    variables.insert("dom".to_string(), Value::from(vec!["example", "com"]));
    variables.insert(
        "keys".to_string(),
        Value::pairs([("semi", ";"), ("dot", "."), ("comma", ",")]),
    );
    variables.insert("empty_keys".to_string(), Value::pairs(Vec::<(String, Value)>::new()));
    variables
}

/// One suite of a uritemplate-test style fixture file
#[derive(Debug, Deserialize)]
#[allow(dead_code)]
pub struct FixtureSuite {
    #[serde(default)]
    pub level: Option<u8>,
    pub variables: serde_json::Map<String, serde_json::Value>,
    pub testcases: Vec<(String, Expected)>,
}

/// A test case accepts either one expansion or any of several
#[derive(Debug, Deserialize)]
#[serde(untagged)]
pub enum Expected {
    One(String),
    AnyOf(Vec<String>),
}

impl Expected {
    #[allow(dead_code)]
    pub fn matches(&self, actual: &str) -> bool {
        match self {
            Expected::One(expected) => expected == actual,
            Expected::AnyOf(expected) => expected.iter().any(|e| e == actual),
        }
    }
}

impl FixtureSuite {
    #[allow(dead_code)]
    pub fn variables(&self) -> Variables {
        self.variables
            .iter()
            .map(|(name, value)| (name.clone(), Value::from(value.clone())))
            .collect()
    }
}

/// Load `tests/fixtures/<name>.json`
#[allow(dead_code)]
pub fn load_fixture(name: &str) -> BTreeMap<String, FixtureSuite> {
    let path = format!("{}/tests/fixtures/{}.json", env!("CARGO_MANIFEST_DIR"), name);
    let contents = std::fs::read_to_string(&path)
        .unwrap_or_else(|e| panic!("Failed to read fixture {}: {}", path, e));
    serde_json::from_str(&contents)
        .unwrap_or_else(|e| panic!("Failed to parse fixture {}: {}", path, e))
}

/// Expand every case of a suite, collecting failures instead of stopping at the first
#[allow(dead_code)]
pub fn run_suite(fixture: &str, suite_name: &str) {
    let suites = load_fixture(fixture);
    let suite = suites
        .get(suite_name)
        .unwrap_or_else(|| panic!("Suite '{}' missing from {}", suite_name, fixture));
    let variables = suite.variables();

    let failures: Vec<String> = suite
        .testcases
        .iter()
        .filter_map(|(template, expected)| {
            let actual = uritemplate::expand(template, &variables).unwrap();
            (!expected.matches(&actual))
                .then(|| format!("{} expanded to {:?}, expected {:?}", template, actual, expected))
        })
        .collect();

    assert!(
        failures.is_empty(),
        "{} failures in '{}':\n{}",
        failures.len(),
        suite_name,
        failures.join("\n")
    );
}
