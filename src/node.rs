use std::fmt;

use bytes::Bytes;
use indexmap::IndexMap;

/// Proprietary WA binary node: a tagged element with string attributes and
/// optional content.
///
/// Nodes are plain values. Encoding and decoding never share state with the
/// caller: decoded strings and payloads are copied out of the input buffer,
/// so a `Node` outlives the bytes it was parsed from.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Node {
    /// Element name.
    pub tag: String,
    /// Attribute map; iteration order is the encode-time order.
    pub attrs: IndexMap<String, String>,
    /// Element body.
    pub content: NodeContent,
}

/// Body content carried by a [`Node`].
#[derive(Debug, Clone, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum NodeContent {
    /// No body. Encodes identically to an empty child list.
    #[default]
    None,
    /// UTF-8 text body.
    Text(String),
    /// Opaque payload bytes, never dictionary-compressed.
    Bytes(Bytes),
    /// Nested child nodes.
    Nodes(Vec<Node>),
}

impl Node {
    /// A node with the given tag and no attributes or content.
    pub fn new(tag: impl Into<String>) -> Self {
        Self {
            tag: tag.into(),
            attrs: IndexMap::new(),
            content: NodeContent::None,
        }
    }

    pub fn with_attr(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.attrs.insert(key.into(), value.into());
        self
    }

    pub fn with_text(mut self, text: impl Into<String>) -> Self {
        self.content = NodeContent::Text(text.into());
        self
    }

    pub fn with_bytes(mut self, payload: impl Into<Bytes>) -> Self {
        self.content = NodeContent::Bytes(payload.into());
        self
    }

    pub fn with_children(mut self, children: Vec<Node>) -> Self {
        self.content = NodeContent::Nodes(children);
        self
    }

    /// Attribute value by key.
    pub fn attr(&self, key: &str) -> Option<&str> {
        self.attrs.get(key).map(String::as_str)
    }

    /// Child nodes, empty for non-node content.
    pub fn children(&self) -> &[Node] {
        match &self.content {
            NodeContent::Nodes(nodes) => nodes,
            _ => &[],
        }
    }

    /// First child with the given tag.
    pub fn child(&self, tag: &str) -> Option<&Node> {
        self.children().iter().find(|child| child.tag == tag)
    }

    /// Count of flat items following the tag on the wire: one for the tag
    /// itself, two per attribute, plus the content items.
    pub fn list_size(&self) -> usize {
        1 + 2 * self.attrs.len() + self.content_item_count()
    }

    fn content_item_count(&self) -> usize {
        match &self.content {
            NodeContent::None => 0,
            NodeContent::Text(_) | NodeContent::Bytes(_) => 1,
            NodeContent::Nodes(nodes) => nodes.len(),
        }
    }

    /// Structural well-formedness: non-empty tags throughout, attribute keys
    /// non-empty, and every list and payload small enough for its wire
    /// length prefix. Never panics, never allocates.
    pub fn is_well_formed(&self) -> bool {
        if self.tag.is_empty() || self.list_size() > usize::from(u16::MAX) {
            return false;
        }
        if self.attrs.keys().any(|key| key.is_empty()) {
            return false;
        }
        match &self.content {
            NodeContent::None | NodeContent::Text(_) => true,
            NodeContent::Bytes(payload) => u32::try_from(payload.len()).is_ok(),
            NodeContent::Nodes(nodes) => nodes.iter().all(Node::is_well_formed),
        }
    }
}

impl fmt::Display for Node {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&crate::render::render(self))
    }
}
