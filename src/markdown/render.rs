//! Document tree → Markdown rendering.
//!
//! The renderer is a set of enter/leave actions registered on a
//! [`Dispatcher`]. Actions are generic over [`AsMarkdown`] so translators
//! that build on Markdown (the notebook assembler) reuse the same table and
//! override only the kinds they treat differently.

use std::collections::HashSet;

use percent_encoding::{AsciiSet, CONTROLS, utf8_percent_encode};

use crate::error::{Error, Result};
use crate::model::{Document, NodeId, NodeKind, Visit};
use crate::util::dedent;

use super::buffer::{BufferStack, Region};
use super::config::{RenderConfig, WarnScope};
use super::dispatch::{Dispatcher, Translator};

/// Name `only` directives use to target this output.
pub const FORMAT_NAME: &str = "markdown";

/// Characters that would end or break an inline link destination.
const LINK_DESTINATION: &AsciiSet = &CONTROLS.add(b' ').add(b'(').add(b')').add(b'<').add(b'>');

/// Bibliographic fields collected while rendering.
///
/// Single-valued fields keep the last value seen; authors accumulate.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DocInfo {
    pub title: String,
    pub subtitle: String,
    pub authors: Vec<String>,
    pub date: String,
    pub rights: String,
    pub version: String,
}

/// Renderer state: output buffers plus section/list nesting.
#[derive(Debug, Clone)]
pub struct MarkdownState {
    pub(crate) out: BufferStack,
    config: RenderConfig,
    /// Current section nesting; 0 is the document level.
    section_level: usize,
    /// One list marker per enclosing list, innermost last.
    list_prefixes: Vec<&'static str>,
    docinfo: DocInfo,
    warned: HashSet<String>,
    warnings: Vec<String>,
}

impl MarkdownState {
    pub fn new(config: RenderConfig) -> Self {
        Self {
            out: BufferStack::new(),
            config,
            section_level: 0,
            list_prefixes: Vec::new(),
            docinfo: DocInfo::default(),
            warned: HashSet::new(),
            warnings: Vec::new(),
        }
    }

    /// Clear buffers, nesting and bibliographic fields.
    pub fn reset(&mut self) {
        self.out.reset();
        self.section_level = 0;
        self.list_prefixes.clear();
        self.docinfo = DocInfo::default();
    }

    /// Prepare for a new document.
    pub fn begin_document(&mut self) {
        self.reset();
        if self.config.warn_scope == WarnScope::Render {
            self.warned.clear();
            self.warnings.clear();
        }
    }

    pub fn config(&self) -> &RenderConfig {
        &self.config
    }

    pub fn docinfo(&self) -> &DocInfo {
        &self.docinfo
    }

    pub fn section_level(&self) -> usize {
        self.section_level
    }

    /// Number of lists enclosing the current position.
    pub fn list_depth(&self) -> usize {
        self.list_prefixes.len()
    }

    /// Warning messages emitted so far, oldest first.
    pub fn warnings(&self) -> &[String] {
        &self.warnings
    }

    /// Join the output regions. Fails if an indentation level is still open.
    pub fn astext(&mut self) -> Result<String> {
        self.out.finalize()
    }

    fn warn_once(&mut self, kind: &str) {
        if self.warned.insert(kind.to_string()) {
            let message = format!("The {kind} element is not supported.");
            log::warn!("{message}");
            self.warnings.push(message);
        }
    }
}

impl Translator for MarkdownState {
    fn output(&mut self) -> &mut BufferStack {
        &mut self.out
    }

    fn warn_unsupported(&mut self, kind: &str) {
        self.warn_once(kind);
    }
}

/// Translators whose state includes a [`MarkdownState`].
pub trait AsMarkdown: Translator {
    fn markdown(&mut self) -> &mut MarkdownState;
}

impl AsMarkdown for MarkdownState {
    fn markdown(&mut self) -> &mut MarkdownState {
        self
    }
}

/// Kinds rendered as `<prefix>content<suffix>`.
const PREFIX_SUFFIX: &[(NodeKind, &str, &str)] = &[
    (NodeKind::Emphasis, "*", "*"),
    (NodeKind::Problematic, "\n\n", "\n\n"),
    (NodeKind::Strong, "**", "**"),
    (NodeKind::Literal, "`", "`"),
    (NodeKind::Math, "$", "$"),
    (NodeKind::Subscript, "<sub>", "</sub>"),
    (NodeKind::Superscript, "<sup>", "</sup>"),
];

/// Kinds whose content is rendered without markup of their own.
const PASS_THROUGH: &[NodeKind] = &[
    NodeKind::Document,
    NodeKind::Container,
    NodeKind::Target,
    NodeKind::Inline,
    NodeKind::Docinfo,
    NodeKind::Authors,
];

/// Build the Markdown handler table.
pub fn markdown_dispatcher<T: AsMarkdown>() -> Result<Dispatcher<T>> {
    let mut d = Dispatcher::new();
    for &(kind, prefix, suffix) in PREFIX_SUFFIX {
        d.prefix_suffix(kind, prefix, suffix)?;
    }
    d.pass_through(PASS_THROUGH)?;

    d.on_enter_only(NodeKind::Text, enter_text)?
        .on_enter_only(NodeKind::Comment, enter_comment)?
        .on_enter_only(NodeKind::Transition, enter_transition)?
        .on_enter_only(NodeKind::Reference, enter_reference)?
        .on_enter_only(NodeKind::SystemMessage, enter_system_message)?
        .on_enter_only(NodeKind::Only, enter_only)?
        .on(NodeKind::Paragraph, enter_noop, leave_block)?
        .on(NodeKind::Title, enter_title, leave_block)?
        .on(NodeKind::Subtitle, enter_subtitle, leave_block)?
        .on(NodeKind::Section, enter_section, leave_section)?
        .on(NodeKind::BlockQuote, enter_block_quote, leave_block_quote)?
        .on(NodeKind::BulletList, enter_bullet_list, leave_list)?
        .on(NodeKind::EnumeratedList, enter_enumerated_list, leave_list)?
        .on(NodeKind::ListItem, enter_list_item, leave_list_item)?
        .on(NodeKind::LiteralBlock, enter_literal_block, leave_literal_block)?
        .on(NodeKind::MathBlock, enter_math_block, leave_math_block)?;

    for kind in [
        NodeKind::Author,
        NodeKind::Date,
        NodeKind::Copyright,
        NodeKind::Version,
    ] {
        d.on_enter_only(kind, enter_docinfo_item)?;
    }
    Ok(d)
}

fn enter_noop<T: AsMarkdown>(_: &mut T, _: &Document, _: NodeId) -> Result<Visit> {
    Ok(Visit::Continue)
}

fn enter_text<T: AsMarkdown>(t: &mut T, doc: &Document, id: NodeId) -> Result<Visit> {
    if let Some(node) = doc.node(id) {
        t.output().write(doc.text(node.text));
    }
    Ok(Visit::Continue)
}

fn enter_comment<T: AsMarkdown>(t: &mut T, doc: &Document, id: NodeId) -> Result<Visit> {
    t.output()
        .write(format!("<!-- {} -->\n", doc.collect_text(id)));
    Ok(Visit::SkipNode)
}

/// End a block: terminate the line and leave one blank line after it.
fn leave_block<T: AsMarkdown>(t: &mut T, _: &Document, _: NodeId) -> Result<()> {
    let out = t.output();
    out.ensure_line_break();
    out.write("\n");
    Ok(())
}

fn enter_title<T: AsMarkdown>(t: &mut T, doc: &Document, id: NodeId) -> Result<Visit> {
    let md = t.markdown();
    if md.section_level == 0 {
        // Nodes ahead of the title (comments, targets) stay in the body.
        let title = doc.collect_text(id);
        md.out.write_to_region(format!("# {title}\n\n"), Region::Head);
        md.docinfo.title = title;
        return Ok(Visit::SkipNode);
    }
    let marker = md.config.heading_marker(md.section_level);
    md.out.write(format!("{marker} "));
    Ok(Visit::Continue)
}

fn enter_subtitle<T: AsMarkdown>(t: &mut T, doc: &Document, id: NodeId) -> Result<Visit> {
    let parent = doc.parent(id).and_then(|p| doc.kind(p));
    if parent == Some(NodeKind::Document) {
        t.markdown().docinfo.subtitle = doc.collect_text(id);
        return Ok(Visit::SkipNode);
    }
    Ok(Visit::Continue)
}

fn enter_docinfo_item<T: AsMarkdown>(t: &mut T, doc: &Document, id: NodeId) -> Result<Visit> {
    let text = doc.collect_text(id);
    let info = &mut t.markdown().docinfo;
    match doc.kind(id) {
        Some(NodeKind::Author) => info.authors.push(text),
        Some(NodeKind::Date) => info.date = text,
        Some(NodeKind::Copyright) => info.rights = text,
        Some(NodeKind::Version) => info.version = text,
        _ => {}
    }
    Ok(Visit::SkipNode)
}

fn enter_section<T: AsMarkdown>(t: &mut T, _: &Document, _: NodeId) -> Result<Visit> {
    t.markdown().section_level += 1;
    Ok(Visit::Continue)
}

fn leave_section<T: AsMarkdown>(t: &mut T, _: &Document, _: NodeId) -> Result<()> {
    let md = t.markdown();
    md.section_level = md.section_level.saturating_sub(1);
    Ok(())
}

fn enter_block_quote<T: AsMarkdown>(t: &mut T, _: &Document, _: NodeId) -> Result<Visit> {
    t.output().push_context("> ", None);
    Ok(Visit::Continue)
}

fn leave_block_quote<T: AsMarkdown>(t: &mut T, _: &Document, _: NodeId) -> Result<()> {
    let out = t.output();
    out.trim_trailing_blank_lines();
    out.pop_context()?;
    out.write("\n");
    Ok(())
}

fn enter_bullet_list<T: AsMarkdown>(t: &mut T, _: &Document, _: NodeId) -> Result<Visit> {
    let md = t.markdown();
    let marker = md.config.list_marker(false);
    md.list_prefixes.push(marker);
    Ok(Visit::Continue)
}

fn enter_enumerated_list<T: AsMarkdown>(t: &mut T, _: &Document, _: NodeId) -> Result<Visit> {
    let md = t.markdown();
    let marker = md.config.list_marker(true);
    md.list_prefixes.push(marker);
    Ok(Visit::Continue)
}

/// Pop the list marker and end the list like any other block.
fn leave_list<T: AsMarkdown>(t: &mut T, doc: &Document, id: NodeId) -> Result<()> {
    t.markdown()
        .list_prefixes
        .pop()
        .ok_or(Error::ListUnderflow)?;
    leave_block(t, doc, id)
}

fn enter_list_item<T: AsMarkdown>(t: &mut T, _: &Document, _: NodeId) -> Result<Visit> {
    let md = t.markdown();
    let first_prefix = *md.list_prefixes.last().ok_or(Error::ListUnderflow)?;
    let prefix = " ".repeat(first_prefix.len());
    md.out.push_context(&prefix, Some(first_prefix));
    Ok(Visit::Continue)
}

/// Items are kept tight: blank lines at the end of an item are dropped so
/// consecutive items sit on consecutive lines.
fn leave_list_item<T: AsMarkdown>(t: &mut T, _: &Document, _: NodeId) -> Result<()> {
    let out = t.output();
    out.trim_trailing_blank_lines();
    out.pop_context()
}

/// Fence opener for a literal block.
pub(crate) fn enter_literal_block<T: AsMarkdown>(
    t: &mut T,
    doc: &Document,
    id: NodeId,
) -> Result<Visit> {
    let md = t.markdown();
    let fence = md.config.fence_style.fence();
    let language = doc.semantics.language(id).unwrap_or("");
    md.out.write(format!("{fence}{language}\n"));
    Ok(Visit::Continue)
}

fn leave_literal_block<T: AsMarkdown>(t: &mut T, _: &Document, _: NodeId) -> Result<()> {
    let md = t.markdown();
    let fence = md.config.fence_style.fence();
    md.out.ensure_line_break();
    md.out.write(format!("{fence}\n"));
    md.out.write("\n");
    Ok(())
}

fn enter_math_block<T: AsMarkdown>(t: &mut T, _: &Document, _: NodeId) -> Result<Visit> {
    t.output().write("$$\n");
    Ok(Visit::Continue)
}

fn leave_math_block<T: AsMarkdown>(t: &mut T, _: &Document, _: NodeId) -> Result<()> {
    let out = t.output();
    out.ensure_line_break();
    out.write("$$\n");
    out.write("\n");
    Ok(())
}

fn enter_transition<T: AsMarkdown>(t: &mut T, _: &Document, _: NodeId) -> Result<Visit> {
    t.output().write("\n---\n\n");
    Ok(Visit::SkipNode)
}

fn enter_reference<T: AsMarkdown>(t: &mut T, doc: &Document, id: NodeId) -> Result<Visit> {
    let Some(uri) = doc.semantics.refuri(id) else {
        return Ok(Visit::Continue);
    };
    let text = escape_link_text(&doc.collect_text(id));
    let destination = encode_destination(uri);
    t.output().write(format!("[{text}]({destination})"));
    Ok(Visit::SkipNode)
}

/// Escape characters that would close or nest the link text.
fn escape_link_text(text: &str) -> String {
    let mut result = String::with_capacity(text.len());
    for c in text.chars() {
        if matches!(c, '\\' | '[' | ']') {
            result.push('\\');
        }
        result.push(c);
    }
    result
}

/// Percent-encode the ASCII characters in [`LINK_DESTINATION`]; non-ASCII
/// text passes through unchanged.
fn encode_destination(uri: &str) -> String {
    let mut result = String::with_capacity(uri.len());
    for (i, c) in uri.char_indices() {
        if c.is_ascii() {
            result.extend(utf8_percent_encode(&uri[i..i + 1], LINK_DESTINATION));
        } else {
            result.push(c);
        }
    }
    result
}

fn enter_system_message<T: AsMarkdown>(t: &mut T, doc: &Document, id: NodeId) -> Result<Visit> {
    let semantics = &doc.semantics;
    let msg_type = semantics.msg_type(id).unwrap_or("");
    let level = semantics.level(id).map(|l| l.to_string()).unwrap_or_default();
    let source = semantics.source(id).unwrap_or("");
    let line = semantics
        .line(id)
        .map(|l| format!(", line {l}"))
        .unwrap_or_default();
    t.output().write(format!(
        "\"System Message: {msg_type}/{level} ({source}{line})\"\n"
    ));
    Ok(Visit::Continue)
}

fn enter_only<T: AsMarkdown>(t: &mut T, doc: &Document, id: NodeId) -> Result<Visit> {
    if doc.semantics.expr(id).map(str::trim) == Some(FORMAT_NAME) {
        let text = dedent(&doc.collect_text(id));
        t.output().write(text + "\n");
    }
    Ok(Visit::SkipNode)
}

/// Renders document trees to a single Markdown string.
pub struct MarkdownRenderer {
    dispatcher: Dispatcher<MarkdownState>,
    state: MarkdownState,
}

impl MarkdownRenderer {
    /// Create a renderer with default configuration.
    pub fn new() -> Result<Self> {
        Self::with_config(RenderConfig::default())
    }

    pub fn with_config(config: RenderConfig) -> Result<Self> {
        Ok(Self {
            dispatcher: markdown_dispatcher()?,
            state: MarkdownState::new(config),
        })
    }

    /// Render a document. State from earlier renders is discarded first.
    pub fn render(&mut self, doc: &Document) -> Result<String> {
        self.state.begin_document();
        self.dispatcher.walk(doc, &mut self.state)?;
        self.state.astext()
    }

    /// Bibliographic fields of the last rendered document.
    pub fn docinfo(&self) -> &DocInfo {
        self.state.docinfo()
    }

    /// Unsupported-kind warnings emitted so far.
    pub fn warnings(&self) -> &[String] {
        self.state.warnings()
    }
}
