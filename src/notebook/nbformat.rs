//! Jupyter nbformat v4 serialization.

use serde::Serialize;
use serde_json::ser::{PrettyFormatter, Serializer};
use serde_json::{Map, Value};

use crate::error::Result;
use crate::util::split_lines_inclusive;

use super::{Cell, Notebook};

const NBFORMAT: u32 = 4;
const NBFORMAT_MINOR: u32 = 4;

/// Turns a finished notebook into its on-disk text.
pub trait NotebookSerializer {
    fn serialize(&self, notebook: &Notebook) -> Result<String>;
}

/// Writes nbformat v4 JSON, indented by one space like Jupyter does.
#[derive(Debug, Clone, Copy, Default)]
pub struct NbformatWriter;

impl NbformatWriter {
    pub fn new() -> Self {
        Self
    }
}

#[derive(Serialize)]
struct NbDocument<'a> {
    cells: Vec<NbCell<'a>>,
    metadata: Map<String, Value>,
    nbformat: u32,
    nbformat_minor: u32,
}

#[derive(Serialize)]
#[serde(tag = "cell_type", rename_all = "snake_case")]
enum NbCell<'a> {
    Markdown {
        metadata: Map<String, Value>,
        source: Vec<&'a str>,
    },
    Code {
        execution_count: Option<u32>,
        metadata: Map<String, Value>,
        outputs: Vec<Value>,
        source: Vec<&'a str>,
    },
}

impl<'a> From<&'a Cell> for NbCell<'a> {
    fn from(cell: &'a Cell) -> Self {
        // nbformat stores multi-line sources as a list of lines
        let source = split_lines_inclusive(cell.source());
        match cell {
            Cell::Markdown(_) => NbCell::Markdown {
                metadata: Map::new(),
                source,
            },
            Cell::Code(_) => NbCell::Code {
                execution_count: None,
                metadata: Map::new(),
                outputs: Vec::new(),
                source,
            },
        }
    }
}

impl NotebookSerializer for NbformatWriter {
    fn serialize(&self, notebook: &Notebook) -> Result<String> {
        let document = NbDocument {
            cells: notebook.cells().iter().map(NbCell::from).collect(),
            metadata: Map::new(),
            nbformat: NBFORMAT,
            nbformat_minor: NBFORMAT_MINOR,
        };

        let mut buf = Vec::new();
        let mut serializer = Serializer::with_formatter(&mut buf, PrettyFormatter::with_indent(b" "));
        document.serialize(&mut serializer)?;
        Ok(String::from_utf8(buf)?)
    }
}
