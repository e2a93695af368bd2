//! Document tree node types and kinds.

/// Unique identifier for a node within a [`Document`](super::Document).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct NodeId(pub u32);

impl NodeId {
    /// The root node ID (always 0).
    pub const ROOT: NodeId = NodeId(0);
}

/// Syntactic kind of a node, following the docutils node taxonomy.
///
/// The set is closed: element names the importer doesn't recognize become
/// [`NodeKind::Other`], with the original tag name kept in the
/// [`SemanticMap`](super::SemanticMap).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum NodeKind {
    /// Leaf text content node. References a range in the document's text buffer.
    #[default]
    Text,
    /// Root document node.
    Document,
    Section,
    /// Heading of a section (or of the document when outside any section).
    Title,
    Subtitle,
    Paragraph,

    // Inline markup
    Emphasis,
    Strong,
    /// Inline code.
    Literal,
    /// Inline math.
    Math,
    Subscript,
    Superscript,
    /// Markup the parser could not make sense of.
    Problematic,
    /// Hyperlink. Target URI is `refuri` in the SemanticMap.
    Reference,
    Inline,
    Target,

    // Structure
    Container,
    Comment,
    BlockQuote,
    BulletList,
    EnumeratedList,
    ListItem,
    /// Preformatted text. Language comes from the classes in the SemanticMap.
    LiteralBlock,
    MathBlock,
    /// Interactive session transcript (`>>>` prompts).
    DoctestBlock,
    /// Horizontal rule.
    Transition,
    /// Parser diagnostic embedded in the tree.
    SystemMessage,

    // Bibliographic fields
    Docinfo,
    Authors,
    Author,
    Date,
    Copyright,
    Version,

    // Directive and extension nodes
    /// Content restricted to one output format (`expr` in the SemanticMap).
    Only,
    /// Region holding code whose output was rendered as a plot.
    NbplotRendered,
    /// Region only meaningful for non-notebook builds.
    NbplotNotRendered,
    RunroleReference,
    /// Marker requesting inline plotting in a notebook.
    MplHint,

    // Known kinds without a Markdown rendering
    Table,
    Image,
    Figure,
    Footnote,
    FootnoteReference,
    Citation,
    CitationReference,
    DefinitionList,
    FieldList,
    OptionList,
    LineBlock,
    Admonition,
    Note,
    Warning,
    Topic,
    Sidebar,
    Rubric,
    Raw,

    /// Any element name not listed above.
    Other,
}

impl NodeKind {
    /// All kinds with a fixed tag name, used to map element names back to kinds.
    const NAMED: &'static [NodeKind] = &[
        NodeKind::Document,
        NodeKind::Section,
        NodeKind::Title,
        NodeKind::Subtitle,
        NodeKind::Paragraph,
        NodeKind::Emphasis,
        NodeKind::Strong,
        NodeKind::Literal,
        NodeKind::Math,
        NodeKind::Subscript,
        NodeKind::Superscript,
        NodeKind::Problematic,
        NodeKind::Reference,
        NodeKind::Inline,
        NodeKind::Target,
        NodeKind::Container,
        NodeKind::Comment,
        NodeKind::BlockQuote,
        NodeKind::BulletList,
        NodeKind::EnumeratedList,
        NodeKind::ListItem,
        NodeKind::LiteralBlock,
        NodeKind::MathBlock,
        NodeKind::DoctestBlock,
        NodeKind::Transition,
        NodeKind::SystemMessage,
        NodeKind::Docinfo,
        NodeKind::Authors,
        NodeKind::Author,
        NodeKind::Date,
        NodeKind::Copyright,
        NodeKind::Version,
        NodeKind::Only,
        NodeKind::NbplotRendered,
        NodeKind::NbplotNotRendered,
        NodeKind::RunroleReference,
        NodeKind::MplHint,
        NodeKind::Table,
        NodeKind::Image,
        NodeKind::Figure,
        NodeKind::Footnote,
        NodeKind::FootnoteReference,
        NodeKind::Citation,
        NodeKind::CitationReference,
        NodeKind::DefinitionList,
        NodeKind::FieldList,
        NodeKind::OptionList,
        NodeKind::LineBlock,
        NodeKind::Admonition,
        NodeKind::Note,
        NodeKind::Warning,
        NodeKind::Topic,
        NodeKind::Sidebar,
        NodeKind::Rubric,
        NodeKind::Raw,
    ];

    /// The docutils tag name for this kind.
    pub fn name(self) -> &'static str {
        match self {
            NodeKind::Text => "#text",
            NodeKind::Document => "document",
            NodeKind::Section => "section",
            NodeKind::Title => "title",
            NodeKind::Subtitle => "subtitle",
            NodeKind::Paragraph => "paragraph",
            NodeKind::Emphasis => "emphasis",
            NodeKind::Strong => "strong",
            NodeKind::Literal => "literal",
            NodeKind::Math => "math",
            NodeKind::Subscript => "subscript",
            NodeKind::Superscript => "superscript",
            NodeKind::Problematic => "problematic",
            NodeKind::Reference => "reference",
            NodeKind::Inline => "inline",
            NodeKind::Target => "target",
            NodeKind::Container => "container",
            NodeKind::Comment => "comment",
            NodeKind::BlockQuote => "block_quote",
            NodeKind::BulletList => "bullet_list",
            NodeKind::EnumeratedList => "enumerated_list",
            NodeKind::ListItem => "list_item",
            NodeKind::LiteralBlock => "literal_block",
            NodeKind::MathBlock => "math_block",
            NodeKind::DoctestBlock => "doctest_block",
            NodeKind::Transition => "transition",
            NodeKind::SystemMessage => "system_message",
            NodeKind::Docinfo => "docinfo",
            NodeKind::Authors => "authors",
            NodeKind::Author => "author",
            NodeKind::Date => "date",
            NodeKind::Copyright => "copyright",
            NodeKind::Version => "version",
            NodeKind::Only => "only",
            NodeKind::NbplotRendered => "nbplot_rendered",
            NodeKind::NbplotNotRendered => "nbplot_not_rendered",
            NodeKind::RunroleReference => "runrole_reference",
            NodeKind::MplHint => "mpl_hint",
            NodeKind::Table => "table",
            NodeKind::Image => "image",
            NodeKind::Figure => "figure",
            NodeKind::Footnote => "footnote",
            NodeKind::FootnoteReference => "footnote_reference",
            NodeKind::Citation => "citation",
            NodeKind::CitationReference => "citation_reference",
            NodeKind::DefinitionList => "definition_list",
            NodeKind::FieldList => "field_list",
            NodeKind::OptionList => "option_list",
            NodeKind::LineBlock => "line_block",
            NodeKind::Admonition => "admonition",
            NodeKind::Note => "note",
            NodeKind::Warning => "warning",
            NodeKind::Topic => "topic",
            NodeKind::Sidebar => "sidebar",
            NodeKind::Rubric => "rubric",
            NodeKind::Raw => "raw",
            NodeKind::Other => "other",
        }
    }

    /// Look up a kind by its docutils tag name.
    pub fn from_name(name: &str) -> Option<NodeKind> {
        Self::NAMED.iter().copied().find(|kind| kind.name() == name)
    }

    /// Whether text directly inside this kind is content rather than
    /// formatting whitespace between child elements.
    pub fn holds_text(self) -> bool {
        matches!(
            self,
            NodeKind::Title
                | NodeKind::Subtitle
                | NodeKind::Paragraph
                | NodeKind::Emphasis
                | NodeKind::Strong
                | NodeKind::Literal
                | NodeKind::Math
                | NodeKind::Subscript
                | NodeKind::Superscript
                | NodeKind::Problematic
                | NodeKind::Reference
                | NodeKind::Inline
                | NodeKind::Target
                | NodeKind::Comment
                | NodeKind::LiteralBlock
                | NodeKind::MathBlock
                | NodeKind::DoctestBlock
                | NodeKind::Author
                | NodeKind::Date
                | NodeKind::Copyright
                | NodeKind::Version
                | NodeKind::Rubric
                | NodeKind::Raw
                | NodeKind::FootnoteReference
                | NodeKind::CitationReference
                | NodeKind::Other
        )
    }
}

/// Range into the document's text buffer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct TextRange {
    /// Byte offset into the text buffer.
    pub start: u32,
    /// Length in bytes.
    pub len: u32,
}

impl TextRange {
    /// Create a new text range.
    pub fn new(start: u32, len: u32) -> Self {
        Self { start, len }
    }

    /// Check if the range is empty.
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Get the end offset.
    pub fn end(&self) -> u32 {
        self.start + self.len
    }
}

/// A node in the document tree.
#[derive(Debug, Clone)]
pub struct Node {
    pub kind: NodeKind,
    /// Parent node (None for root).
    pub parent: Option<NodeId>,
    pub first_child: Option<NodeId>,
    pub next_sibling: Option<NodeId>,
    /// Text content range (only for Text nodes).
    pub text: TextRange,
}

impl Node {
    /// Create a new node with default values.
    pub fn new(kind: NodeKind) -> Self {
        Self {
            kind,
            parent: None,
            first_child: None,
            next_sibling: None,
            text: TextRange::default(),
        }
    }

    /// Create a text node with the given range.
    pub fn text(range: TextRange) -> Self {
        Self {
            text: range,
            ..Self::new(NodeKind::Text)
        }
    }
}
