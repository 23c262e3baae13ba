use crate::models::Node;
use thiserror::Error;
use xmltree::{Element, XMLNode};

#[derive(Error, Debug)]
pub enum XmlError {
    #[error("malformed XML: {0}")]
    Parse(#[from] xmltree::ParseError),
}

/// Parse an XML document into the mapping representation.
///
/// The document becomes a single-entry map from the root tag to the root
/// element's node.
pub fn parse_document(xml: &str) -> Result<Node, XmlError> {
    let root = Element::parse(xml.as_bytes())?;
    Ok(Node::Map(vec![(
        qualified_name(&root),
        element_to_node(&root),
    )]))
}

/// Tag name as written in the document, namespace prefix included.
fn qualified_name(element: &Element) -> String {
    match &element.prefix {
        Some(prefix) => format!("{}:{}", prefix, element.name),
        None => element.name.clone(),
    }
}

/// Convert one element. Attributes come first as `@name` keys (sorted by
/// name, since the parser does not keep attribute order), then child
/// elements in document order, then any accumulated `#text`.
fn element_to_node(element: &Element) -> Node {
    let mut entries: Vec<(String, Node)> = Vec::new();

    let mut attributes: Vec<(&String, &String)> = element.attributes.iter().collect();
    attributes.sort();
    for (name, value) in attributes {
        entries.push((format!("@{}", name), Node::Text(value.clone())));
    }

    let mut text = String::new();
    for child in &element.children {
        match child {
            XMLNode::Element(child) => {
                push_child(&mut entries, qualified_name(child), element_to_node(child));
            }
            XMLNode::Text(chunk) | XMLNode::CData(chunk) => text.push_str(chunk),
            _ => {}
        }
    }

    let text = text.trim();
    if !text.is_empty() {
        if entries.is_empty() {
            return Node::Text(text.to_string());
        }
        entries.push(("#text".to_string(), Node::Text(text.to_string())));
    }

    if entries.is_empty() {
        Node::Null
    } else {
        Node::Map(entries)
    }
}

/// Insert a child under its tag, collapsing repeated siblings into a sequence.
fn push_child(entries: &mut Vec<(String, Node)>, name: String, node: Node) {
    match entries.iter_mut().find(|(key, _)| *key == name) {
        Some((_, Node::Seq(items))) => items.push(node),
        Some((_, slot)) => {
            let first = std::mem::replace(slot, Node::Null);
            *slot = Node::Seq(vec![first, node]);
        }
        None => entries.push((name, node)),
    }
}
