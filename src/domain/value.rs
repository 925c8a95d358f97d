// Values bound to template variables

use std::borrow::Cow;
use std::collections::{BTreeMap, HashMap};
use std::fmt;

/// Variable bindings consulted during expansion
pub type Variables = HashMap<String, Value>;

/// A value bound to a template variable.
///
/// Scalars (`String`, `Integer`, `Float`, `Bool`) are stringified when they
/// are substituted, not before. Associative values come in two flavours:
/// [`Value::Map`] expands in sorted key order, while [`Value::Pairs`] keeps
/// the order the caller supplied. A sequence of pairs is always a `Pairs`
/// value and is never treated as a plain [`Value::List`].
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    Null,
    String(String),
    Integer(i64),
    Float(f64),
    Bool(bool),
    List(Vec<Value>),
    Map(BTreeMap<String, Value>),
    Pairs(Vec<(String, Value)>),
}

/// How a defined value expands, with undefined entries already removed
#[derive(Debug, Clone, PartialEq)]
pub(crate) enum Shape<'a> {
    Scalar(Cow<'a, str>),
    List(Vec<Cow<'a, str>>),
    Assoc(Vec<(&'a str, Cow<'a, str>)>),
}

impl Value {
    /// Build an ordered associative value from key/value pairs
    pub fn pairs<K, V, I>(pairs: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<Value>,
    {
        Value::Pairs(
            pairs
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        )
    }

    pub fn is_null(&self) -> bool {
        matches!(self, Value::Null)
    }

    /// Truthiness used when deciding whether an inline default applies
    pub fn is_falsy(&self) -> bool {
        match self {
            Value::Null => true,
            Value::String(s) => s.is_empty(),
            Value::Integer(i) => *i == 0,
            Value::Float(f) => *f == 0.0,
            Value::Bool(b) => !b,
            Value::List(items) => items.is_empty(),
            Value::Map(map) => map.is_empty(),
            Value::Pairs(pairs) => pairs.is_empty(),
        }
    }

    /// A falsy value gives way to an inline default, except the empty string
    pub(crate) fn yields_to_default(&self) -> bool {
        self.is_falsy() && !matches!(self, Value::String(_))
    }

    /// Stringified form of a scalar; `None` for null
    pub(crate) fn as_scalar(&self) -> Option<Cow<'_, str>> {
        match self {
            Value::Null => None,
            Value::String(s) => Some(Cow::Borrowed(s.as_str())),
            other => Some(Cow::Owned(other.to_string())),
        }
    }

    /// Classify the value for expansion.
    ///
    /// Returns `None` when the value counts as undefined: null, an empty
    /// collection, or a collection holding nothing but nulls.
    pub(crate) fn shape(&self) -> Option<Shape<'_>> {
        match self {
            Value::Null => None,
            Value::List(items) => {
                let items: Vec<_> = items.iter().filter_map(Value::as_scalar).collect();
                (!items.is_empty()).then_some(Shape::List(items))
            }
            Value::Map(map) => {
                assoc_shape(map.iter().map(|(k, v)| (k.as_str(), v)))
            }
            Value::Pairs(pairs) => {
                assoc_shape(pairs.iter().map(|(k, v)| (k.as_str(), v)))
            }
            scalar => scalar.as_scalar().map(Shape::Scalar),
        }
    }
}

fn assoc_shape<'a>(entries: impl Iterator<Item = (&'a str, &'a Value)>) -> Option<Shape<'a>> {
    let entries: Vec<_> = entries
        .filter_map(|(k, v)| v.as_scalar().map(|v| (k, v)))
        .collect();
    (!entries.is_empty()).then_some(Shape::Assoc(entries))
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Null => Ok(()),
            Value::String(s) => f.write_str(s),
            Value::Integer(i) => write!(f, "{}", i),
            Value::Float(x) => write!(f, "{}", x),
            Value::Bool(b) => write!(f, "{}", b),
            Value::List(items) => {
                let rendered: Vec<String> = items.iter().map(|v| v.to_string()).collect();
                f.write_str(&rendered.join(","))
            }
            Value::Map(map) => {
                let rendered: Vec<String> = map.iter().map(|(k, v)| format!("{},{}", k, v)).collect();
                f.write_str(&rendered.join(","))
            }
            Value::Pairs(pairs) => {
                let rendered: Vec<String> = pairs.iter().map(|(k, v)| format!("{},{}", k, v)).collect();
                f.write_str(&rendered.join(","))
            }
        }
    }
}

impl From<&str> for Value {
    fn from(value: &str) -> Self {
        Value::String(value.to_string())
    }
}

impl From<String> for Value {
    fn from(value: String) -> Self {
        Value::String(value)
    }
}

impl From<&String> for Value {
    fn from(value: &String) -> Self {
        Value::String(value.clone())
    }
}

macro_rules! integer_value {
    ($($ty:ty),*) => {
        $(
            impl From<$ty> for Value {
                fn from(value: $ty) -> Self {
                    Value::Integer(i64::from(value))
                }
            }
        )*
    };
}

integer_value!(i8, i16, i32, i64, u8, u16, u32);

impl From<f32> for Value {
    fn from(value: f32) -> Self {
        Value::Float(f64::from(value))
    }
}

impl From<f64> for Value {
    fn from(value: f64) -> Self {
        Value::Float(value)
    }
}

impl From<bool> for Value {
    fn from(value: bool) -> Self {
        Value::Bool(value)
    }
}

impl<T: Into<Value>> From<Option<T>> for Value {
    fn from(value: Option<T>) -> Self {
        value.map(Into::into).unwrap_or(Value::Null)
    }
}

impl<T: Into<Value>> From<Vec<T>> for Value {
    fn from(value: Vec<T>) -> Self {
        Value::List(value.into_iter().map(Into::into).collect())
    }
}

impl<K: Into<String>, V: Into<Value>> From<BTreeMap<K, V>> for Value {
    fn from(value: BTreeMap<K, V>) -> Self {
        Value::Map(value.into_iter().map(|(k, v)| (k.into(), v.into())).collect())
    }
}

impl<K: Into<String>, V: Into<Value>> From<HashMap<K, V>> for Value {
    fn from(value: HashMap<K, V>) -> Self {
        Value::Map(value.into_iter().map(|(k, v)| (k.into(), v.into())).collect())
    }
}

impl From<serde_json::Value> for Value {
    fn from(value: serde_json::Value) -> Self {
        match value {
            serde_json::Value::Null => Value::Null,
            serde_json::Value::Bool(b) => Value::Bool(b),
            serde_json::Value::Number(n) => match n.as_i64() {
                Some(i) => Value::Integer(i),
                None => n.as_f64().map(Value::Float).unwrap_or(Value::String(n.to_string())),
            },
            serde_json::Value::String(s) => Value::String(s),
            serde_json::Value::Array(items) => {
                Value::List(items.into_iter().map(Value::from).collect())
            }
            serde_json::Value::Object(map) => {
                Value::Map(map.into_iter().map(|(k, v)| (k, Value::from(v))).collect())
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_scalar_stringification() {
        assert_eq!(Value::from(0).to_string(), "0");
        assert_eq!(Value::from(3.1415).to_string(), "3.1415");
        assert_eq!(Value::from(-122.427).to_string(), "-122.427");
        assert_eq!(Value::from(true).to_string(), "true");
        assert_eq!(Value::Null.to_string(), "");
    }

    #[test]
    fn test_falsy_values() {
        assert!(Value::Null.is_falsy());
        assert!(Value::from(0).is_falsy());
        assert!(Value::from(0.0).is_falsy());
        assert!(Value::from(false).is_falsy());
        assert!(Value::List(vec![]).is_falsy());
        assert!(Value::from("").is_falsy());
        assert!(!Value::from("x").is_falsy());
        assert!(!Value::from(1).is_falsy());
    }

    #[test]
    fn test_empty_string_keeps_its_place() {
        assert!(!Value::from("").yields_to_default());
        assert!(Value::Null.yields_to_default());
        assert!(Value::from(0).yields_to_default());
    }

    #[test]
    fn test_shape_of_list_skips_nulls() {
        let value = Value::List(vec![Value::from("one"), Value::Null, Value::from("two")]);
        assert_eq!(
            value.shape(),
            Some(Shape::List(vec![Cow::Borrowed("one"), Cow::Borrowed("two")]))
        );
    }

    #[test]
    fn test_shape_of_empty_and_null_collections() {
        assert_eq!(Value::List(vec![]).shape(), None);
        assert_eq!(Value::List(vec![Value::Null, Value::Null]).shape(), None);
        assert_eq!(Value::Map(BTreeMap::new()).shape(), None);
        assert_eq!(Value::pairs([("one", Value::Null)]).shape(), None);
    }

    #[test]
    fn test_map_shape_is_sorted_and_pairs_keep_order() {
        let mut map = HashMap::new();
        map.insert("semi", ";");
        map.insert("dot", ".");
        map.insert("comma", ",");
        match Value::from(map).shape() {
            Some(Shape::Assoc(entries)) => {
                let keys: Vec<&str> = entries.iter().map(|(k, _)| *k).collect();
                assert_eq!(keys, vec!["comma", "dot", "semi"]);
            }
            other => panic!("Expected associative shape, got {:?}", other),
        }

        let pairs = Value::pairs([("semi", ";"), ("dot", "."), ("comma", ",")]);
        match pairs.shape() {
            Some(Shape::Assoc(entries)) => {
                let keys: Vec<&str> = entries.iter().map(|(k, _)| *k).collect();
                assert_eq!(keys, vec!["semi", "dot", "comma"]);
            }
            other => panic!("Expected associative shape, got {:?}", other),
        }
    }

    #[test]
    fn test_pairs_are_not_lists() {
        let pairs = Value::pairs([("a", "1"), ("b", "2")]);
        assert!(matches!(pairs, Value::Pairs(_)));
        assert!(!matches!(pairs.shape(), Some(Shape::List(_))));
    }

    #[test]
    fn test_from_json() {
        let json = serde_json::json!({
            "count": ["one", "two"],
            "number": 6,
            "long": 37.76,
            "undef": null,
            "keys": {"b": "2", "a": "1"}
        });
        match Value::from(json) {
            Value::Map(map) => {
                assert_eq!(map["count"], Value::from(vec!["one", "two"]));
                assert_eq!(map["number"], Value::Integer(6));
                assert_eq!(map["long"], Value::Float(37.76));
                assert_eq!(map["undef"], Value::Null);
                assert!(matches!(map["keys"], Value::Map(_)));
            }
            other => panic!("Expected map, got {:?}", other),
        }
    }
}
