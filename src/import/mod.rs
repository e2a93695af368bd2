//! Loading document trees from disk.
//!
//! Trees arrive as docutils XML (`rst2xml`, `sphinx-build -b xml`). The
//! importer maps element names onto [`NodeKind`](crate::model::NodeKind)s
//! and keeps the attributes the renderers read in the document's
//! [`SemanticMap`](crate::model::SemanticMap).

mod docutils;

pub use docutils::parse_docutils_xml;
