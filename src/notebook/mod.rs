//! Notebook output.
//!
//! A [`Notebook`] is an ordered list of [`Cell`]s: rendered Markdown
//! narrative interleaved with code. The [`NotebookRenderer`] builds one from
//! a document tree by rendering Markdown as usual and cutting the output into
//! a new cell whenever a code block appears.
//!
//! - [`doctest`]: pulls source code out of `>>>` transcripts
//! - [`assemble`]: the renderer and its cell accumulation
//! - [`nbformat`]: Jupyter nbformat v4 JSON output

pub mod assemble;
pub mod doctest;
pub mod nbformat;

pub use assemble::{NotebookRenderer, NotebookState, notebook_dispatcher};
pub use doctest::{Example, parse_doctest, parse_examples};
pub use nbformat::{NbformatWriter, NotebookSerializer};

/// One unit of a notebook.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Cell {
    /// Rendered Markdown text.
    Markdown(String),
    /// Source code.
    Code(String),
}

impl Cell {
    pub fn source(&self) -> &str {
        match self {
            Cell::Markdown(text) | Cell::Code(text) => text,
        }
    }

    pub fn is_code(&self) -> bool {
        matches!(self, Cell::Code(_))
    }
}

/// An ordered sequence of cells.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Notebook {
    cells: Vec<Cell>,
}

impl Notebook {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push_markdown(&mut self, text: impl Into<String>) {
        self.cells.push(Cell::Markdown(text.into()));
    }

    pub fn push_code(&mut self, source: impl Into<String>) {
        self.cells.push(Cell::Code(source.into()));
    }

    pub fn cells(&self) -> &[Cell] {
        &self.cells
    }

    pub fn len(&self) -> usize {
        self.cells.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    pub fn into_cells(self) -> Vec<Cell> {
        self.cells
    }
}
