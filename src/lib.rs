//! # docnb
//!
//! Render docutils document trees to Markdown and Jupyter notebooks.
//!
//! ## Features
//!
//! - Load trees from docutils XML (`rst2xml`, `sphinx-build -b xml`)
//! - Render to a single Markdown string
//! - Render to notebooks, turning `>>>` transcripts and plot code into code
//!   cells between Markdown cells
//! - Unsupported node kinds are skipped with one warning per kind
//!
//! ## Quick Start
//!
//! ```no_run
//! use docnb::{Document, MarkdownRenderer, NotebookRenderer};
//!
//! let doc = Document::open("guide.xml")?;
//!
//! let markdown = MarkdownRenderer::new()?.render(&doc)?;
//! let ipynb = NotebookRenderer::new()?.render_to_string(&doc)?;
//! # Ok::<(), docnb::Error>(())
//! ```
//!
//! ## Building Trees
//!
//! Trees can also be built directly:
//!
//! ```
//! use docnb::{Document, MarkdownRenderer, Node, NodeId, NodeKind};
//!
//! let mut doc = Document::new();
//! let para = doc.add(NodeId::ROOT, Node::new(NodeKind::Paragraph));
//! let strong = doc.add(para, Node::new(NodeKind::Strong));
//! doc.add_text(strong, "Hello");
//!
//! let text = MarkdownRenderer::new().unwrap().render(&doc).unwrap();
//! assert_eq!(text, "**Hello**\n");
//! ```

pub mod error;
pub mod export;
pub mod import;
pub mod markdown;
pub mod model;
pub mod notebook;
pub(crate) mod util;

#[cfg(feature = "wasm")]
pub mod wasm;

pub use error::{Error, Result};
pub use export::{Exporter, Format, MarkdownExporter, NotebookExporter};
pub use import::parse_docutils_xml;
pub use markdown::{MarkdownRenderer, RenderConfig};
pub use model::{Document, Node, NodeId, NodeKind};
pub use notebook::{Cell, Notebook, NotebookRenderer, parse_doctest};
