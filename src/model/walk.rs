//! Depth-first traversal driver.

use super::{Document, NodeId};
use crate::error::Result;

/// What the walker should do after a node's `enter` callback.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Visit {
    /// Visit children, then call `leave`.
    #[default]
    Continue,
    /// Skip children but still call `leave`.
    SkipChildren,
    /// Skip children and `leave`.
    SkipNode,
}

/// Callbacks invoked by [`walk`].
pub trait Visitor {
    /// Called before a node's children.
    fn enter(&mut self, doc: &Document, id: NodeId) -> Result<Visit>;

    /// Called after a node's children, unless `enter` returned [`Visit::SkipNode`].
    fn leave(&mut self, doc: &Document, id: NodeId) -> Result<()>;
}

/// Walk the whole document in document order.
///
/// The first error returned by a callback stops the walk and is returned.
pub fn walk<V: Visitor + ?Sized>(doc: &Document, visitor: &mut V) -> Result<()> {
    walk_node(doc, doc.root(), visitor)
}

fn walk_node<V: Visitor + ?Sized>(doc: &Document, id: NodeId, visitor: &mut V) -> Result<()> {
    match visitor.enter(doc, id)? {
        Visit::SkipNode => return Ok(()),
        Visit::SkipChildren => {}
        Visit::Continue => {
            for child in doc.children(id) {
                walk_node(doc, child, visitor)?;
            }
        }
    }
    visitor.leave(doc, id)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{Node, NodeKind};

    /// Records enter/leave events and skips according to node kind.
    struct Recorder {
        events: Vec<String>,
    }

    impl Visitor for Recorder {
        fn enter(&mut self, doc: &Document, id: NodeId) -> Result<Visit> {
            let name = doc.kind_name(id).to_string();
            self.events.push(format!("+{name}"));
            Ok(match doc.kind(id) {
                Some(NodeKind::Comment) => Visit::SkipNode,
                Some(NodeKind::DoctestBlock) => Visit::SkipChildren,
                _ => Visit::Continue,
            })
        }

        fn leave(&mut self, doc: &Document, id: NodeId) -> Result<()> {
            self.events.push(format!("-{}", doc.kind_name(id)));
            Ok(())
        }
    }

    #[test]
    fn test_walk_order_and_skips() {
        let mut doc = Document::new();
        let para = doc.add(NodeId::ROOT, Node::new(NodeKind::Paragraph));
        doc.add_text(para, "a");
        let comment = doc.add(NodeId::ROOT, Node::new(NodeKind::Comment));
        doc.add_text(comment, "hidden");
        let doctest = doc.add(NodeId::ROOT, Node::new(NodeKind::DoctestBlock));
        doc.add_text(doctest, ">>> 1");

        let mut recorder = Recorder { events: Vec::new() };
        walk(&doc, &mut recorder).unwrap();

        assert_eq!(
            recorder.events,
            vec![
                "+document",
                "+paragraph",
                "+#text",
                "-#text",
                "-paragraph",
                "+comment",
                "+doctest_block",
                "-doctest_block",
                "-document",
            ]
        );
    }
}
