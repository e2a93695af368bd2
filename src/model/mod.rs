//! Document tree consumed by the renderers.
//!
//! The tree is a read-only input: a parser (or the docutils XML importer in
//! [`crate::import`]) builds it once, and renderers only walk it.
//!
//! - Nodes tagged with a [`NodeKind`]
//! - Sparse kind-specific attributes in a [`SemanticMap`]
//! - A single text buffer that text nodes reference by range
//! - A depth-first traversal driver ([`walk`])
//!
//! # Example
//!
//! ```
//! use docnb::model::{Document, Node, NodeId, NodeKind};
//!
//! let mut doc = Document::new();
//! let para = doc.add(NodeId::ROOT, Node::new(NodeKind::Paragraph));
//! doc.add_text(para, "Hello");
//! assert_eq!(doc.collect_text(NodeId::ROOT), "Hello");
//! ```

mod node;
mod semantic;
mod walk;

use std::path::Path;

pub use node::{Node, NodeId, NodeKind, TextRange};
pub use semantic::SemanticMap;
pub use walk::{Visit, Visitor, walk};

use crate::error::Result;

/// A parsed document in arena form.
///
/// The tree uses a parent-pointer / first-child / next-sibling representation.
/// Index 0 is always the [`NodeKind::Document`] root.
#[derive(Debug, Clone)]
pub struct Document {
    nodes: Vec<Node>,
    /// Sparse kind-specific attributes (refuri, classes, ...).
    pub semantics: SemanticMap,
    /// Text buffer that text nodes reference into.
    text: String,
}

impl Default for Document {
    fn default() -> Self {
        Self::new()
    }
}

impl Document {
    /// Create a new empty document with a root node.
    pub fn new() -> Self {
        Self {
            nodes: vec![Node::new(NodeKind::Document)],
            semantics: SemanticMap::new(),
            text: String::new(),
        }
    }

    /// Load a docutils XML file.
    pub fn open(path: impl AsRef<Path>) -> Result<Self> {
        let bytes = std::fs::read(path.as_ref())?;
        Self::from_bytes(&bytes)
    }

    /// Load docutils XML from raw bytes, honoring the declared encoding.
    pub fn from_bytes(bytes: &[u8]) -> Result<Self> {
        let hint = crate::util::extract_xml_encoding(bytes);
        let content = crate::util::decode_text(bytes, hint);
        crate::import::parse_docutils_xml(&content)
    }

    pub fn root(&self) -> NodeId {
        NodeId::ROOT
    }

    /// Get a node by ID.
    pub fn node(&self, id: NodeId) -> Option<&Node> {
        self.nodes.get(id.0 as usize)
    }

    /// Kind of a node, if it exists.
    pub fn kind(&self, id: NodeId) -> Option<NodeKind> {
        self.node(id).map(|n| n.kind)
    }

    /// Parent of a node (None for the root).
    pub fn parent(&self, id: NodeId) -> Option<NodeId> {
        self.node(id).and_then(|n| n.parent)
    }

    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    /// Allocate a new node and return its ID.
    pub fn alloc_node(&mut self, node: Node) -> NodeId {
        let id = NodeId(self.nodes.len() as u32);
        self.nodes.push(node);
        id
    }

    /// Append text to the buffer and return the range.
    pub fn append_text(&mut self, text: &str) -> TextRange {
        let start = self.text.len() as u32;
        self.text.push_str(text);
        TextRange::new(start, text.len() as u32)
    }

    /// Get text from a range.
    pub fn text(&self, range: TextRange) -> &str {
        let start = range.start as usize;
        let end = range.end() as usize;
        &self.text[start..end]
    }

    /// Append a child node to a parent.
    pub fn append_child(&mut self, parent: NodeId, child: NodeId) {
        if let Some(child_node) = self.nodes.get_mut(child.0 as usize) {
            child_node.parent = Some(parent);
        }

        let last_child = self.children(parent).last();
        match last_child {
            Some(last) => {
                if let Some(last_node) = self.nodes.get_mut(last.0 as usize) {
                    last_node.next_sibling = Some(child);
                }
            }
            None => {
                if let Some(parent_node) = self.nodes.get_mut(parent.0 as usize) {
                    parent_node.first_child = Some(child);
                }
            }
        }
    }

    /// Allocate `node` and append it to `parent`.
    pub fn add(&mut self, parent: NodeId, node: Node) -> NodeId {
        let id = self.alloc_node(node);
        self.append_child(parent, id);
        id
    }

    /// Append a text leaf holding `text` to `parent`.
    pub fn add_text(&mut self, parent: NodeId, text: &str) -> NodeId {
        let range = self.append_text(text);
        self.add(parent, Node::text(range))
    }

    /// Iterate over children of a node.
    pub fn children(&self, parent: NodeId) -> ChildIter<'_> {
        let first_child = self.node(parent).and_then(|n| n.first_child);
        ChildIter {
            doc: self,
            current: first_child,
        }
    }

    /// All text below a node, verbatim and in document order.
    pub fn collect_text(&self, id: NodeId) -> String {
        let mut result = String::new();
        self.collect_text_recursive(id, &mut result);
        result
    }

    fn collect_text_recursive(&self, id: NodeId, result: &mut String) {
        let Some(node) = self.node(id) else {
            return;
        };
        if node.kind == NodeKind::Text {
            result.push_str(self.text(node.text));
        }
        for child in self.children(id) {
            self.collect_text_recursive(child, result);
        }
    }

    /// Name used when reporting on a node: the docutils tag, or the original
    /// element name for [`NodeKind::Other`].
    pub fn kind_name(&self, id: NodeId) -> &str {
        match self.kind(id) {
            Some(NodeKind::Other) => self.semantics.tagname(id).unwrap_or("other"),
            Some(kind) => kind.name(),
            None => "",
        }
    }
}

/// Iterator over children of a node.
pub struct ChildIter<'a> {
    doc: &'a Document,
    current: Option<NodeId>,
}

impl Iterator for ChildIter<'_> {
    type Item = NodeId;

    fn next(&mut self) -> Option<Self::Item> {
        let current = self.current?;
        self.current = self.doc.node(current).and_then(|n| n.next_sibling);
        Some(current)
    }
}
