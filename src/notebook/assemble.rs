//! Notebook assembly on top of the Markdown renderer.
//!
//! The notebook renderer runs the Markdown action table unchanged except for
//! a handful of kinds that produce code: transcripts, literal blocks inside
//! plot output, and the matplotlib hint. Whenever code appears, the Markdown
//! rendered so far is flushed into its own cell so narrative and code stay
//! in document order.

use crate::error::{Error, Result};
use crate::markdown::dispatch::{Dispatcher, Translator};
use crate::markdown::render::{self, AsMarkdown, DocInfo, MarkdownState, markdown_dispatcher};
use crate::markdown::{BufferStack, RenderConfig};
use crate::model::{Document, NodeId, NodeKind, Visit};
use crate::util::trim_blank_lines;

use super::doctest::parse_doctest;
use super::nbformat::{NbformatWriter, NotebookSerializer};
use super::Notebook;

/// Code cell emitted for a matplotlib hint.
const MPL_INLINE: &str = "%matplotlib inline";

/// Markdown state plus the cells built so far.
#[derive(Debug, Clone)]
pub struct NotebookState {
    md: MarkdownState,
    notebook: Notebook,
    /// Inside a rendered plot region; literal blocks become code.
    in_plot: bool,
}

impl NotebookState {
    pub fn new(config: RenderConfig) -> Self {
        Self {
            md: MarkdownState::new(config),
            notebook: Notebook::new(),
            in_plot: false,
        }
    }

    fn begin_document(&mut self) {
        self.md.begin_document();
        self.notebook = Notebook::new();
        self.in_plot = false;
    }

    /// Move buffered Markdown into a new cell.
    ///
    /// Blank lines at either end are trimmed; nothing is added when no text
    /// remains. The buffers are emptied either way. Open indentation
    /// contexts, list and section nesting are kept, so the leave actions of
    /// enclosing nodes still balance.
    pub fn flush_text(&mut self) {
        let text = self.md.out.drain_text();
        let text = trim_blank_lines(&text);
        if !text.is_empty() {
            log::debug!("markdown cell: {} bytes", text.len());
            self.notebook.push_markdown(text);
        }
    }

    /// Flush buffered Markdown, then add a code cell.
    pub fn add_code_block(&mut self, source: impl Into<String>) {
        self.flush_text();
        let source = source.into();
        log::debug!("code cell: {} bytes", source.len());
        self.notebook.push_code(source);
    }

    pub fn notebook(&self) -> &Notebook {
        &self.notebook
    }

    /// Flush trailing Markdown and hand over the finished notebook.
    fn finish(&mut self) -> Result<Notebook> {
        self.flush_text();
        let open = self.md.out.depth();
        if open > 0 {
            return Err(Error::UnbalancedContext(open));
        }
        Ok(std::mem::take(&mut self.notebook))
    }
}

impl Translator for NotebookState {
    fn output(&mut self) -> &mut BufferStack {
        self.md.output()
    }

    fn warn_unsupported(&mut self, kind: &str) {
        self.md.warn_unsupported(kind);
    }
}

impl AsMarkdown for NotebookState {
    fn markdown(&mut self) -> &mut MarkdownState {
        &mut self.md
    }
}

/// The Markdown table with notebook overrides.
pub fn notebook_dispatcher() -> Result<Dispatcher<NotebookState>> {
    let mut d = markdown_dispatcher()?;
    d.on(NodeKind::DoctestBlock, enter_doctest_block, leave_doctest_block)?
        .on(NodeKind::NbplotRendered, enter_plot, leave_plot)?
        .on_enter_only(NodeKind::NbplotNotRendered, skip)?
        .on_enter_only(NodeKind::RunroleReference, skip)?
        .on_enter_only(NodeKind::MplHint, enter_mpl_hint)?;
    d.replace_enter(NodeKind::LiteralBlock, enter_literal_block);
    Ok(d)
}

fn skip(_: &mut NotebookState, _: &Document, _: NodeId) -> Result<Visit> {
    Ok(Visit::SkipNode)
}

fn enter_doctest_block(_: &mut NotebookState, _: &Document, _: NodeId) -> Result<Visit> {
    Ok(Visit::SkipChildren)
}

fn leave_doctest_block(t: &mut NotebookState, doc: &Document, id: NodeId) -> Result<()> {
    let source = parse_doctest(&doc.collect_text(id));
    if !source.is_empty() {
        t.add_code_block(source);
    }
    Ok(())
}

fn enter_plot(t: &mut NotebookState, _: &Document, _: NodeId) -> Result<Visit> {
    t.in_plot = true;
    Ok(Visit::Continue)
}

fn leave_plot(t: &mut NotebookState, _: &Document, _: NodeId) -> Result<()> {
    t.in_plot = false;
    Ok(())
}

fn enter_literal_block(t: &mut NotebookState, doc: &Document, id: NodeId) -> Result<Visit> {
    if !t.in_plot {
        return render::enter_literal_block(t, doc, id);
    }
    t.add_code_block(doc.collect_text(id));
    Ok(Visit::SkipNode)
}

fn enter_mpl_hint(t: &mut NotebookState, _: &Document, _: NodeId) -> Result<Visit> {
    t.add_code_block(MPL_INLINE);
    Ok(Visit::SkipNode)
}

/// Renders document trees to notebooks.
pub struct NotebookRenderer {
    dispatcher: Dispatcher<NotebookState>,
    state: NotebookState,
}

impl NotebookRenderer {
    pub fn new() -> Result<Self> {
        Self::with_config(RenderConfig::default())
    }

    pub fn with_config(config: RenderConfig) -> Result<Self> {
        Ok(Self {
            dispatcher: notebook_dispatcher()?,
            state: NotebookState::new(config),
        })
    }

    /// Render a document into cells.
    pub fn render(&mut self, doc: &Document) -> Result<Notebook> {
        self.state.begin_document();
        self.dispatcher.walk(doc, &mut self.state)?;
        self.state.finish()
    }

    /// Render and encode with `serializer`.
    pub fn render_with<S: NotebookSerializer>(
        &mut self,
        doc: &Document,
        serializer: &S,
    ) -> Result<String> {
        let notebook = self.render(doc)?;
        serializer.serialize(&notebook)
    }

    /// Render to nbformat v4 JSON.
    pub fn render_to_string(&mut self, doc: &Document) -> Result<String> {
        self.render_with(doc, &NbformatWriter::new())
    }

    pub fn docinfo(&self) -> &DocInfo {
        self.state.md.docinfo()
    }

    pub fn warnings(&self) -> &[String] {
        self.state.md.warnings()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::Node;
    use crate::notebook::Cell;

    fn paragraph(doc: &mut Document, parent: NodeId, text: &str) {
        let para = doc.add(parent, Node::new(NodeKind::Paragraph));
        doc.add_text(para, text);
    }

    fn cells(doc: &Document) -> Vec<Cell> {
        NotebookRenderer::new()
            .unwrap()
            .render(doc)
            .unwrap()
            .into_cells()
    }

    #[test]
    fn test_doctest_splits_markdown() {
        let mut doc = Document::new();
        paragraph(&mut doc, NodeId::ROOT, "Intro.");
        let block = doc.add(NodeId::ROOT, Node::new(NodeKind::DoctestBlock));
        doc.add_text(block, ">>> a = 1\n>>> a\n1");
        paragraph(&mut doc, NodeId::ROOT, "Outro.");

        assert_eq!(
            cells(&doc),
            vec![
                Cell::Markdown("Intro.".to_string()),
                Cell::Code("a = 1\na".to_string()),
                Cell::Markdown("Outro.".to_string()),
            ]
        );
    }

    #[test]
    fn test_doctest_without_prompts_adds_nothing() {
        let mut doc = Document::new();
        paragraph(&mut doc, NodeId::ROOT, "One.");
        let block = doc.add(NodeId::ROOT, Node::new(NodeKind::DoctestBlock));
        doc.add_text(block, "no prompts here");
        paragraph(&mut doc, NodeId::ROOT, "Two.");

        assert_eq!(cells(&doc), vec![Cell::Markdown("One.\n\nTwo.".to_string())]);
    }

    #[test]
    fn test_plot_literal_block_becomes_code() {
        let mut doc = Document::new();
        let plot = doc.add(NodeId::ROOT, Node::new(NodeKind::NbplotRendered));
        let code = doc.add(plot, Node::new(NodeKind::LiteralBlock));
        doc.add_text(code, "plt.plot(x)");
        let listing = doc.add(NodeId::ROOT, Node::new(NodeKind::LiteralBlock));
        doc.add_text(listing, "plain listing");

        assert_eq!(
            cells(&doc),
            vec![
                Cell::Code("plt.plot(x)".to_string()),
                Cell::Markdown("```\nplain listing\n```".to_string()),
            ]
        );
    }

    #[test]
    fn test_hint_and_skipped_regions() {
        let mut doc = Document::new();
        doc.add(NodeId::ROOT, Node::new(NodeKind::MplHint));
        let hidden = doc.add(NodeId::ROOT, Node::new(NodeKind::NbplotNotRendered));
        paragraph(&mut doc, hidden, "not in notebooks");
        let role = doc.add(NodeId::ROOT, Node::new(NodeKind::RunroleReference));
        doc.add_text(role, "Download this page");
        paragraph(&mut doc, NodeId::ROOT, "Shown.");

        let mut renderer = NotebookRenderer::new().unwrap();
        let notebook = renderer.render(&doc).unwrap();
        assert_eq!(
            notebook.cells(),
            [
                Cell::Code("%matplotlib inline".to_string()),
                Cell::Markdown("Shown.".to_string()),
            ]
        );
        assert!(renderer.warnings().is_empty());
    }

    #[test]
    fn test_flush_inside_list_item_stays_balanced() {
        let mut doc = Document::new();
        let list = doc.add(NodeId::ROOT, Node::new(NodeKind::BulletList));
        let item = doc.add(list, Node::new(NodeKind::ListItem));
        paragraph(&mut doc, item, "before");
        let block = doc.add(item, Node::new(NodeKind::DoctestBlock));
        doc.add_text(block, ">>> step()");
        paragraph(&mut doc, item, "after");

        assert_eq!(
            cells(&doc),
            vec![
                Cell::Markdown("* before".to_string()),
                Cell::Code("step()".to_string()),
                Cell::Markdown("  after".to_string()),
            ]
        );
    }

    #[test]
    fn test_title_lands_in_first_cell() {
        let mut doc = Document::new();
        let title = doc.add(NodeId::ROOT, Node::new(NodeKind::Title));
        doc.add_text(title, "Guide");
        let block = doc.add(NodeId::ROOT, Node::new(NodeKind::DoctestBlock));
        doc.add_text(block, ">>> 1 + 1\n2");

        let mut renderer = NotebookRenderer::new().unwrap();
        let notebook = renderer.render(&doc).unwrap();
        assert_eq!(
            notebook.cells(),
            [
                Cell::Markdown("# Guide".to_string()),
                Cell::Code("1 + 1".to_string()),
            ]
        );
        assert_eq!(renderer.docinfo().title, "Guide");
    }

    #[test]
    fn test_render_twice_starts_fresh() {
        let mut doc = Document::new();
        paragraph(&mut doc, NodeId::ROOT, "Same.");

        let mut renderer = NotebookRenderer::new().unwrap();
        let first = renderer.render(&doc).unwrap();
        let second = renderer.render(&doc).unwrap();
        assert_eq!(first, second);
        assert_eq!(first.len(), 1);
    }

    #[test]
    fn test_render_to_string() {
        let mut doc = Document::new();
        paragraph(&mut doc, NodeId::ROOT, "Text.");
        let json = NotebookRenderer::new()
            .unwrap()
            .render_to_string(&doc)
            .unwrap();
        assert!(json.contains("\"cell_type\": \"markdown\""));
        assert!(json.contains("\"source\": [\n    \"Text.\"\n   ]"));
    }
}
