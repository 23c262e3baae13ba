use crate::models::Node;
use serde_json::Value;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum FormatError {
    #[error("JSON serialization error: {0}")]
    Json(#[from] serde_json::Error),
    #[error("unsupported JSON value: {0}")]
    Unsupported(&'static str),
}

/// Serialize a node to compact JSON
pub fn to_json(node: &Node) -> Result<String, FormatError> {
    serde_json::to_string(node).map_err(FormatError::from)
}

/// Parse JSON text back into the mapping representation.
///
/// Accepts only the value shapes the XML conversion produces; numbers and
/// booleans have no XML-side counterpart.
pub fn from_json(json: &str) -> Result<Node, FormatError> {
    let value: Value = serde_json::from_str(json)?;
    value_to_node(&value)
}

fn value_to_node(value: &Value) -> Result<Node, FormatError> {
    match value {
        Value::Null => Ok(Node::Null),
        Value::String(text) => Ok(Node::Text(text.clone())),
        Value::Object(map) => {
            let mut entries = Vec::with_capacity(map.len());
            for (key, value) in map {
                entries.push((key.clone(), value_to_node(value)?));
            }
            Ok(Node::Map(entries))
        }
        Value::Array(items) => {
            let mut nodes = Vec::with_capacity(items.len());
            for item in items {
                nodes.push(value_to_node(item)?);
            }
            Ok(Node::Seq(nodes))
        }
        Value::Number(_) => Err(FormatError::Unsupported("number")),
        Value::Bool(_) => Err(FormatError::Unsupported("boolean")),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::xml::parse_document;

    #[test]
    fn test_to_json_is_compact() {
        let node = parse_document("<r><x>1</x></r>").unwrap();
        assert_eq!(to_json(&node).unwrap(), r#"{"r":{"x":"1"}}"#);
    }

    #[test]
    fn test_null_and_sequence_shapes() {
        let node = parse_document("<r><a/><b>1</b><b>2</b></r>").unwrap();
        assert_eq!(
            to_json(&node).unwrap(),
            r#"{"r":{"a":null,"b":["1","2"]}}"#
        );
    }

    #[test]
    fn test_round_trip_preserves_structure() {
        let node = parse_document(
            r#"<level t="x"><num>1-101</num><text>a</text><text>b</text><empty/></level>"#,
        )
        .unwrap();

        let json = to_json(&node).unwrap();
        assert_eq!(from_json(&json).unwrap(), node);
    }

    #[test]
    fn test_from_json_rejects_foreign_scalars() {
        assert!(from_json(r#"{"r":1}"#).is_err());
        assert!(from_json(r#"{"r":true}"#).is_err());
    }
}
