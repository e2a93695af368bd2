//! Export module for writing rendered documents.
//!
//! Provides the `Exporter` trait and one implementation per output format.
//!
//! # Architecture
//!
//! Exporters use a builder pattern:
//! - `new()` creates an exporter with default configuration
//! - `with_config()` allows customization
//! - `export()` renders a document and writes it to any `Write` destination
//!
//! # Example
//!
//! ```no_run
//! use docnb::Document;
//! use docnb::export::{Exporter, NotebookExporter};
//! use std::fs::File;
//!
//! let doc = Document::open("guide.xml")?;
//! let mut file = File::create("guide.ipynb")?;
//! NotebookExporter::new().export(&doc, &mut file)?;
//! # Ok::<(), docnb::Error>(())
//! ```

use std::io::Write;
use std::path::Path;

use crate::error::Result;
use crate::markdown::RenderConfig;
use crate::model::Document;

mod markdown;
mod notebook;

pub use markdown::MarkdownExporter;
pub use notebook::NotebookExporter;

/// Trait for exporting documents to specific formats.
pub trait Exporter {
    /// Render `doc` and write the result to `writer`.
    fn export<W: Write>(&self, doc: &Document, writer: &mut W) -> Result<()>;
}

/// Output formats.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Format {
    #[default]
    Markdown,
    /// Jupyter notebook (nbformat v4 JSON).
    Notebook,
}

impl Format {
    /// Guess the format from a file extension.
    pub fn from_path(path: impl AsRef<Path>) -> Option<Self> {
        let ext = path.as_ref().extension()?.to_str()?.to_ascii_lowercase();
        match ext.as_str() {
            "md" | "markdown" => Some(Format::Markdown),
            "ipynb" => Some(Format::Notebook),
            _ => None,
        }
    }

    /// Export `doc` in this format.
    pub fn export<W: Write>(self, doc: &Document, config: RenderConfig, writer: &mut W) -> Result<()> {
        match self {
            Format::Markdown => MarkdownExporter::with_config(config).export(doc, writer),
            Format::Notebook => NotebookExporter::with_config(config).export(doc, writer),
        }
    }
}
