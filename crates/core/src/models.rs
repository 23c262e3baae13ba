use serde::ser::{SerializeMap, SerializeSeq};
use serde::{Deserialize, Serialize, Serializer};
use std::path::PathBuf;

/// A parsed XML document fragment.
///
/// Elements map to this type under the usual XML-to-mapping convention:
/// attributes become `@name` keys, text content becomes a plain string or a
/// `#text` key, repeated sibling elements collapse into a sequence, and an
/// element with no attributes, children, or text is null.
#[derive(Debug, Clone, PartialEq)]
pub enum Node {
    /// Element with no attributes, child elements, or text
    Null,
    /// Text-only element content
    Text(String),
    /// Ordered mapping of attribute/child/`#text` keys to nodes
    Map(Vec<(String, Node)>),
    /// Repeated sibling elements with the same tag, in document order
    Seq(Vec<Node>),
}

impl Node {
    /// Look up a key in a map node.
    pub fn get(&self, key: &str) -> Option<&Node> {
        match self {
            Node::Map(entries) => entries
                .iter()
                .find(|(name, _)| name == key)
                .map(|(_, node)| node),
            _ => None,
        }
    }

    /// Text content of this node: the string itself for text nodes, the
    /// `#text` entry for map nodes.
    pub fn as_text(&self) -> Option<&str> {
        match self {
            Node::Text(text) => Some(text),
            Node::Map(_) => self.get("#text").and_then(Node::as_text),
            _ => None,
        }
    }

    pub fn is_null(&self) -> bool {
        matches!(self, Node::Null)
    }
}

// Maps serialize as JSON objects in entry order.
impl Serialize for Node {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Node::Null => serializer.serialize_unit(),
            Node::Text(text) => serializer.serialize_str(text),
            Node::Map(entries) => {
                let mut map = serializer.serialize_map(Some(entries.len()))?;
                for (key, node) in entries {
                    map.serialize_entry(key, node)?;
                }
                map.end()
            }
            Node::Seq(items) => {
                let mut seq = serializer.serialize_seq(Some(items.len()))?;
                for item in items {
                    seq.serialize_element(item)?;
                }
                seq.end()
            }
        }
    }
}

/// A single source-to-artifact conversion
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ConvertedFile {
    /// Source path, relative to the scanned root
    pub source: PathBuf,
    /// Written artifact path, relative to the scanned root
    pub artifact: PathBuf,
}

/// Statistics about one conversion pass
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ConvertStats {
    pub total_files: usize,
    pub converted: usize,
    pub skipped: usize,
}

/// Run metadata
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ConvertMetadata {
    pub duration_ms: u64,
    pub files_per_second: f64,
    pub timestamp: String,
    pub tool_version: String,
}

impl Default for ConvertMetadata {
    fn default() -> Self {
        Self {
            duration_ms: 0,
            files_per_second: 0.0,
            timestamp: chrono::Utc::now().to_rfc3339(),
            tool_version: env!("CARGO_PKG_VERSION").to_string(),
        }
    }
}

/// Result of a full conversion pass
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ConvertReport {
    /// Scanned root path
    pub root: PathBuf,
    /// All conversions performed, in traversal order
    pub files: Vec<ConvertedFile>,
    /// Conversion statistics
    pub stats: ConvertStats,
    /// Run metadata
    pub metadata: ConvertMetadata,
}
