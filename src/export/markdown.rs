//! Markdown Exporter.

use std::io::Write;

use crate::error::Result;
use crate::markdown::{MarkdownRenderer, RenderConfig};
use crate::model::Document;

use super::Exporter;

/// Exporter for Markdown output.
#[derive(Debug, Clone, Default)]
pub struct MarkdownExporter {
    config: RenderConfig,
}

impl MarkdownExporter {
    /// Create a new MarkdownExporter with default configuration.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a MarkdownExporter with the specified configuration.
    pub fn with_config(config: RenderConfig) -> Self {
        Self { config }
    }
}

impl Exporter for MarkdownExporter {
    fn export<W: Write>(&self, doc: &Document, writer: &mut W) -> Result<()> {
        let mut renderer = MarkdownRenderer::with_config(self.config.clone())?;
        let text = renderer.render(doc)?;
        writer.write_all(text.as_bytes())?;
        Ok(())
    }
}
