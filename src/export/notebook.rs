//! Notebook Exporter - writes nbformat v4 JSON.

use std::io::Write;

use crate::error::Result;
use crate::markdown::RenderConfig;
use crate::model::Document;
use crate::notebook::{NbformatWriter, NotebookRenderer};

use super::Exporter;

/// Exporter for Jupyter notebook output.
#[derive(Debug, Clone, Default)]
pub struct NotebookExporter {
    config: RenderConfig,
}

impl NotebookExporter {
    /// Create a new NotebookExporter with default configuration.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a NotebookExporter with the specified configuration.
    pub fn with_config(config: RenderConfig) -> Self {
        Self { config }
    }
}

impl Exporter for NotebookExporter {
    fn export<W: Write>(&self, doc: &Document, writer: &mut W) -> Result<()> {
        let mut renderer = NotebookRenderer::with_config(self.config.clone())?;
        let json = renderer.render_with(doc, &NbformatWriter::new())?;
        writer.write_all(json.as_bytes())?;
        writer.write_all(b"\n")?;
        Ok(())
    }
}
