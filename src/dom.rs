//! Thin adapter over the `dom_query` arena DOM.
//!
//! All document traversal in the crate goes through these helpers, which
//! normalize tag names and expose attribute access on raw node handles.
//! Element enumeration is always in document order.

pub use dom_query::{Document, NodeRef, Selection};

use crate::encoding;

/// Parse an HTML string into a document.
#[inline]
#[must_use]
pub fn parse(html: &str) -> Document {
    Document::from(html)
}

/// Decode serialized document bytes and parse them.
///
/// Used for payloads coming off the browser channel, which hands documents
/// over as raw bytes.
#[must_use]
pub fn parse_bytes(bytes: &[u8]) -> Document {
    Document::from(encoding::decode_document(bytes))
}

/// Get the element's tag name, uppercased for rule matching.
///
/// Returns `None` for non-element nodes.
#[must_use]
pub fn tag_name(node: &NodeRef) -> Option<String> {
    if !node.is_element() {
        return None;
    }
    node.node_name().map(|t| t.to_uppercase())
}

/// Get all attributes of a node as key-value pairs, in document order.
#[must_use]
pub fn attributes(node: &NodeRef) -> Vec<(String, String)> {
    node.attrs()
        .iter()
        .map(|attr| (attr.name.local.to_string(), attr.value.to_string()))
        .collect()
}

/// Get a single attribute value by (case-sensitive) name.
#[must_use]
pub fn attribute(node: &NodeRef, name: &str) -> Option<String> {
    node.attrs()
        .iter()
        .find(|attr| attr.name.local.as_ref() == name)
        .map(|attr| attr.value.to_string())
}

/// Enumerate every element in the document, in document order.
#[must_use]
pub fn all_elements(doc: &Document) -> Vec<NodeRef> {
    doc.select("*")
        .nodes()
        .iter()
        .copied()
        .filter(NodeRef::is_element)
        .collect()
}

/// Enumerate elements with the given tag name, in document order.
///
/// The tag is matched case-insensitively, so rule tags stored uppercase
/// match the lowercase names the parser produces.
#[must_use]
pub fn elements_by_tag<'a>(doc: &'a Document, tag: &str) -> Vec<NodeRef<'a>> {
    all_elements(doc)
        .into_iter()
        .filter(|node| {
            node.node_name()
                .is_some_and(|name| name.eq_ignore_ascii_case(tag))
        })
        .collect()
}

/// Enumerate elements whose tag is any of the given names, in document order.
#[must_use]
pub fn elements_by_tags<'a>(doc: &'a Document, tags: &[&str]) -> Vec<NodeRef<'a>> {
    all_elements(doc)
        .into_iter()
        .filter(|node| {
            node.node_name()
                .is_some_and(|name| tags.iter().any(|t| name.eq_ignore_ascii_case(t)))
        })
        .collect()
}
