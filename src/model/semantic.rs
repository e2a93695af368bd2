//! Sparse attributes for document tree nodes.
//!
//! Most nodes carry no attributes at all, so values live in per-attribute
//! maps keyed by node rather than on every [`Node`](super::Node).
//!
//! String values are stored in a single contiguous buffer, with TextRange
//! references into that buffer.

use std::collections::HashMap;

use super::node::{NodeId, TextRange};

#[derive(Debug, Default, Clone)]
pub struct SemanticMap {
    /// Contiguous buffer for all string attribute values.
    buffer: String,
    /// Classification tags (`classes`), e.g. `["code", "python"]`.
    classes: HashMap<NodeId, Vec<TextRange>>,
    /// Target URI of a reference.
    refuri: HashMap<NodeId, TextRange>,
    /// System message category (`type`), e.g. `WARNING`.
    msg_type: HashMap<NodeId, TextRange>,
    /// System message severity.
    level: HashMap<NodeId, u32>,
    /// Source identifier of a system message.
    source: HashMap<NodeId, TextRange>,
    /// Source line of a system message.
    line: HashMap<NodeId, u32>,
    /// Target format expression of an `only` directive.
    expr: HashMap<NodeId, TextRange>,
    /// Original element name of an unrecognized node.
    tagname: HashMap<NodeId, TextRange>,
}

impl SemanticMap {
    /// Create a new empty semantic map.
    pub fn new() -> Self {
        Self::default()
    }

    fn append(&mut self, s: &str) -> TextRange {
        let start = self.buffer.len() as u32;
        self.buffer.push_str(s);
        TextRange::new(start, s.len() as u32)
    }

    fn get_str(&self, range: TextRange) -> &str {
        let start = range.start as usize;
        let end = range.end() as usize;
        &self.buffer[start..end]
    }

    // --- classes ---

    /// Add a class to a node.
    pub fn add_class(&mut self, node: NodeId, class: &str) {
        if !class.is_empty() {
            let range = self.append(class);
            self.classes.entry(node).or_default().push(range);
        }
    }

    /// Get the classes of a node, in order.
    pub fn classes(&self, node: NodeId) -> impl Iterator<Item = &str> + '_ {
        self.classes
            .get(&node)
            .into_iter()
            .flatten()
            .map(|r| self.get_str(*r))
    }

    /// Whether a node carries the given class.
    pub fn has_class(&self, node: NodeId, class: &str) -> bool {
        self.classes(node).any(|c| c == class)
    }

    /// Language tag of a code block: the class following `code`.
    pub fn language(&self, node: NodeId) -> Option<&str> {
        let mut classes = self.classes(node);
        classes.find(|c| *c == "code")?;
        classes.next()
    }

    // --- refuri ---

    /// Set the target URI of a reference.
    pub fn set_refuri(&mut self, node: NodeId, uri: &str) {
        if !uri.is_empty() {
            let range = self.append(uri);
            self.refuri.insert(node, range);
        }
    }

    /// Get the target URI of a reference.
    pub fn refuri(&self, node: NodeId) -> Option<&str> {
        self.refuri.get(&node).map(|r| self.get_str(*r))
    }

    // --- system message fields ---

    pub fn set_msg_type(&mut self, node: NodeId, msg_type: &str) {
        let range = self.append(msg_type);
        self.msg_type.insert(node, range);
    }

    pub fn msg_type(&self, node: NodeId) -> Option<&str> {
        self.msg_type.get(&node).map(|r| self.get_str(*r))
    }

    pub fn set_level(&mut self, node: NodeId, level: u32) {
        self.level.insert(node, level);
    }

    pub fn level(&self, node: NodeId) -> Option<u32> {
        self.level.get(&node).copied()
    }

    pub fn set_source(&mut self, node: NodeId, source: &str) {
        let range = self.append(source);
        self.source.insert(node, range);
    }

    pub fn source(&self, node: NodeId) -> Option<&str> {
        self.source.get(&node).map(|r| self.get_str(*r))
    }

    pub fn set_line(&mut self, node: NodeId, line: u32) {
        self.line.insert(node, line);
    }

    pub fn line(&self, node: NodeId) -> Option<u32> {
        self.line.get(&node).copied()
    }

    // --- expr ---

    /// Set the target format expression of an `only` node.
    pub fn set_expr(&mut self, node: NodeId, expr: &str) {
        let range = self.append(expr);
        self.expr.insert(node, range);
    }

    pub fn expr(&self, node: NodeId) -> Option<&str> {
        self.expr.get(&node).map(|r| self.get_str(*r))
    }

    // --- tagname ---

    /// Record the element name of a node imported as `NodeKind::Other`.
    pub fn set_tagname(&mut self, node: NodeId, name: &str) {
        let range = self.append(name);
        self.tagname.insert(node, range);
    }

    pub fn tagname(&self, node: NodeId) -> Option<&str> {
        self.tagname.get(&node).map(|r| self.get_str(*r))
    }

    /// Set an attribute by its docutils name.
    ///
    /// Returns `false` for attributes this map doesn't track, and for
    /// numeric attributes whose value doesn't parse.
    pub fn set_attr(&mut self, node: NodeId, name: &str, value: &str) -> bool {
        match name {
            "classes" => {
                for class in value.split_whitespace() {
                    self.add_class(node, class);
                }
            }
            "refuri" => self.set_refuri(node, value),
            "type" => self.set_msg_type(node, value),
            "source" => self.set_source(node, value),
            "expr" => self.set_expr(node, value),
            "level" => match value.trim().parse() {
                Ok(level) => self.set_level(node, level),
                Err(_) => return false,
            },
            "line" => match value.trim().parse() {
                Ok(line) => self.set_line(node, line),
                Err(_) => return false,
            },
            _ => return false,
        }
        true
    }
}
