// Nested repository layout as stored in the document database

use serde::{Serialize, Serializer};
use std::collections::BTreeMap;

/// A stored repository layout: strings, sequences and mappings nested to any depth.
#[derive(Debug, Clone, PartialEq)]
pub enum Structure {
    Text(String),
    Sequence(Vec<Structure>),
    Mapping(BTreeMap<String, Structure>),
    Scalar(Scalar),
}

/// Leaf values that never carry a URL.
#[derive(Debug, Clone, PartialEq)]
pub enum Scalar {
    Null,
    Bool(bool),
    Integer(i64),
    Number(f64),
    /// Anything the source database knows about that has no counterpart here
    /// (object ids, timestamps, binary blobs...).
    Opaque,
}

impl Structure {
    pub fn null() -> Self {
        Structure::Scalar(Scalar::Null)
    }
}

impl From<&str> for Structure {
    fn from(value: &str) -> Self {
        Structure::Text(value.to_string())
    }
}

impl From<String> for Structure {
    fn from(value: String) -> Self {
        Structure::Text(value)
    }
}

impl From<Vec<Structure>> for Structure {
    fn from(items: Vec<Structure>) -> Self {
        Structure::Sequence(items)
    }
}

impl From<BTreeMap<String, Structure>> for Structure {
    fn from(entries: BTreeMap<String, Structure>) -> Self {
        Structure::Mapping(entries)
    }
}

impl From<serde_json::Value> for Structure {
    fn from(value: serde_json::Value) -> Self {
        use serde_json::Value;

        match value {
            Value::String(s) => Structure::Text(s),
            Value::Array(items) => {
                Structure::Sequence(items.into_iter().map(Structure::from).collect())
            }
            Value::Object(entries) => Structure::Mapping(
                entries
                    .into_iter()
                    .map(|(key, value)| (key, Structure::from(value)))
                    .collect(),
            ),
            Value::Null => Structure::Scalar(Scalar::Null),
            Value::Bool(b) => Structure::Scalar(Scalar::Bool(b)),
            Value::Number(n) => match (n.as_i64(), n.as_f64()) {
                (Some(i), _) => Structure::Scalar(Scalar::Integer(i)),
                (None, Some(f)) => Structure::Scalar(Scalar::Number(f)),
                (None, None) => Structure::Scalar(Scalar::Opaque),
            },
        }
    }
}

impl From<&Structure> for serde_json::Value {
    fn from(structure: &Structure) -> Self {
        use serde_json::Value;

        match structure {
            Structure::Text(s) => Value::String(s.clone()),
            Structure::Sequence(items) => {
                Value::Array(items.iter().map(Value::from).collect())
            }
            Structure::Mapping(entries) => Value::Object(
                entries
                    .iter()
                    .map(|(key, value)| (key.clone(), Value::from(value)))
                    .collect(),
            ),
            Structure::Scalar(Scalar::Bool(b)) => Value::Bool(*b),
            Structure::Scalar(Scalar::Integer(i)) => Value::from(*i),
            Structure::Scalar(Scalar::Number(n)) => serde_json::Number::from_f64(*n)
                .map(Value::Number)
                .unwrap_or(Value::Null),
            // Opaque leaves have no JSON form
            Structure::Scalar(Scalar::Null) | Structure::Scalar(Scalar::Opaque) => Value::Null,
        }
    }
}

// Containers are emptied onto a worklist so dropping a deeply nested value
// never recurses.
impl Drop for Structure {
    fn drop(&mut self) {
        let mut pending = Vec::new();
        take_children(self, &mut pending);

        while let Some(mut node) = pending.pop() {
            take_children(&mut node, &mut pending);
        }
    }
}

fn take_children(node: &mut Structure, pending: &mut Vec<Structure>) {
    match node {
        Structure::Sequence(items) => pending.append(items),
        Structure::Mapping(entries) => pending.extend(std::mem::take(entries).into_values()),
        Structure::Text(_) | Structure::Scalar(_) => {}
    }
}

impl Serialize for Structure {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serde_json::Value::from(self).serialize(serializer)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_json_object_becomes_mapping() {
        let structure = Structure::from(json!({"docs": ["https://a.com", 3, null]}));

        let Structure::Mapping(entries) = &structure else {
            panic!("expected a mapping");
        };
        assert_eq!(
            entries.get("docs"),
            Some(&Structure::Sequence(vec![
                Structure::Text("https://a.com".to_string()),
                Structure::Scalar(Scalar::Integer(3)),
                Structure::null(),
            ]))
        );
    }

    #[test]
    fn test_json_round_trip_keeps_text_and_shape() {
        let value = json!({"a": {"b": ["https://x.com", true]}});
        let structure = Structure::from(value.clone());
        assert_eq!(serde_json::Value::from(&structure), value);
    }

    #[test]
    fn test_json_numbers_keep_integer_form() {
        let value = json!({"n": 3, "ratio": 0.5, "negative": -12});
        let structure = Structure::from(value.clone());

        assert_eq!(serde_json::to_string(&structure).unwrap(), value.to_string());
        assert_eq!(serde_json::Value::from(&structure), value);
    }

    #[test]
    fn test_drop_deeply_nested_value() {
        let mut structure = Structure::from("https://deep.com");
        for _ in 0..200_000 {
            structure = Structure::Sequence(vec![structure]);
        }
        for depth in 0..50_000 {
            let mut entries = BTreeMap::new();
            entries.insert(format!("level{}", depth), structure);
            structure = Structure::Mapping(entries);
        }
        drop(structure);
    }

    #[test]
    fn test_opaque_serializes_as_null() {
        let structure = Structure::Scalar(Scalar::Opaque);
        assert_eq!(serde_json::to_string(&structure).unwrap(), "null");
    }
}
