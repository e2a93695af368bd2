//! Markdown generation from document trees.
//!
//! The pieces stack on each other:
//!
//! - [`buffer`]: output regions plus a stack of indentation contexts whose
//!   prefixes are applied when the context closes
//! - [`dispatch`]: per-kind enter/leave action tables with a warn-once
//!   fallback for kinds nobody registered
//! - [`render`]: the Markdown action table and [`MarkdownRenderer`]
//! - [`config`]: [`RenderConfig`], shared with the notebook renderer
//!
//! ## Design Notes
//!
//! - **Deferred prefixing**: block quotes and list items don't know their
//!   final text until their children are rendered, so writes inside them are
//!   buffered and the `"> "` / list marker prefixes are applied on close
//! - **Blank line discipline**: every block ends by terminating its line and
//!   writing one blank line; the final blank line of the document is dropped
//! - **Totality**: unsupported kinds are skipped with a single warning per
//!   kind rather than failing the render

pub mod buffer;
pub mod config;
pub mod dispatch;
pub mod render;

pub use buffer::{BufferStack, Region};
pub use config::{FenceStyle, MarkerStyle, RenderConfig, WarnScope};
pub use dispatch::{Dispatcher, EnterFn, LeaveFn, Translator};
pub use render::{
    AsMarkdown, DocInfo, FORMAT_NAME, MarkdownRenderer, MarkdownState, markdown_dispatcher,
};
