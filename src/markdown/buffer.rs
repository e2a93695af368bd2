//! Output buffers with nested indentation contexts.
//!
//! Output goes to one of three [`Region`]s. Indented constructs (block
//! quotes, list items) open an [`IndentLevel`] on a stack; while any level is
//! open, writes land in the innermost level's content instead of a region.
//! Closing a level prefixes every line of its content and hands the result
//! to the level below (or to the region it was opened over), so prefixes
//! compose in nesting order.

use crate::error::{Error, Result};
use crate::util::{is_blank, split_lines_inclusive};

/// Top-level output regions, concatenated in declaration order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Region {
    Head,
    Body,
    Foot,
}

/// Buffered text for one indentation level.
#[derive(Debug, Clone)]
struct IndentLevel {
    /// Region receiving the text when no level lies below this one.
    base: Region,
    /// Prepended to every non-blank line after the first.
    prefix: String,
    /// Prepended to the first line.
    first_prefix: String,
    content: Vec<String>,
}

impl IndentLevel {
    /// Join the content and apply prefixes. `None` when there is nothing to write.
    fn materialize(&self) -> Option<String> {
        let joined = self.content.concat();
        let lines = split_lines_inclusive(&joined);
        let (first, rest) = lines.split_first()?;

        let mut out = String::with_capacity(joined.len() + self.prefix.len() * lines.len());
        out.push_str(&self.first_prefix);
        out.push_str(first);
        for line in rest {
            if is_blank(line) {
                out.push('\n');
            } else {
                out.push_str(&self.prefix);
                out.push_str(line);
            }
        }
        Some(out)
    }
}

/// The buffer stack engine behind every renderer.
#[derive(Debug, Clone, Default)]
pub struct BufferStack {
    head: Vec<String>,
    body: Vec<String>,
    foot: Vec<String>,
    levels: Vec<IndentLevel>,
}

impl BufferStack {
    pub fn new() -> Self {
        Self::default()
    }

    /// Clear all regions and drop every open level.
    pub fn reset(&mut self) {
        self.head.clear();
        self.body.clear();
        self.foot.clear();
        self.levels.clear();
    }

    fn region_mut(&mut self, region: Region) -> &mut Vec<String> {
        match region {
            Region::Head => &mut self.head,
            Region::Body => &mut self.body,
            Region::Foot => &mut self.foot,
        }
    }

    /// The fragment list writes currently go to.
    fn current_output(&mut self, region: Region) -> &mut Vec<String> {
        match self.levels.last_mut() {
            Some(level) => &mut level.content,
            None => match region {
                Region::Head => &mut self.head,
                Region::Body => &mut self.body,
                Region::Foot => &mut self.foot,
            },
        }
    }

    /// Write to the innermost level, or to the body when no level is open.
    pub fn write(&mut self, text: impl Into<String>) {
        self.write_in(text, Region::Body);
    }

    /// Write to the innermost level, or to `region` when no level is open.
    pub fn write_in(&mut self, text: impl Into<String>, region: Region) {
        self.current_output(region).push(text.into());
    }

    /// Write straight to `region`, ignoring open levels.
    pub fn write_to_region(&mut self, text: impl Into<String>, region: Region) {
        self.region_mut(region).push(text.into());
    }

    /// Open an indentation level over the body region.
    ///
    /// `first_prefix` defaults to `prefix`.
    pub fn push_context(&mut self, prefix: &str, first_prefix: Option<&str>) {
        self.push_context_in(prefix, first_prefix, Region::Body);
    }

    /// Open an indentation level; `region` is used only when no level is open.
    pub fn push_context_in(&mut self, prefix: &str, first_prefix: Option<&str>, region: Region) {
        self.levels.push(IndentLevel {
            base: region,
            prefix: prefix.to_string(),
            first_prefix: first_prefix.unwrap_or(prefix).to_string(),
            content: Vec::new(),
        });
    }

    /// Close the innermost level and write its prefixed content to its target.
    pub fn pop_context(&mut self) -> Result<()> {
        let level = self.levels.pop().ok_or(Error::ContextUnderflow)?;
        if let Some(text) = level.materialize() {
            self.current_output(level.base).push(text);
        }
        Ok(())
    }

    /// Number of open levels.
    pub fn depth(&self) -> usize {
        self.levels.len()
    }

    /// Make sure the current output ends with a line break.
    ///
    /// Nothing is written when the output is empty or its last fragment is empty.
    pub fn ensure_line_break(&mut self) {
        let out = self.current_output(Region::Body);
        if let Some(last) = out.last()
            && !last.is_empty()
            && !last.ends_with('\n')
        {
            out.push("\n".to_string());
        }
    }

    /// Drop blank lines at the end of the current output, leaving its last
    /// line terminated.
    pub fn trim_trailing_blank_lines(&mut self) {
        let out = self.current_output(Region::Body);
        while out.last().is_some_and(|fragment| is_blank(fragment)) {
            out.pop();
        }
        if let Some(last) = out.last_mut() {
            let keep = last.trim_end().len();
            if keep < last.len() {
                last.truncate(keep);
                last.push('\n');
            }
        }
        self.ensure_line_break();
    }

    /// Finish the render: all levels must be closed.
    ///
    /// Drops a single trailing bare line break from each region, then joins
    /// head, body and foot.
    pub fn finalize(&mut self) -> Result<String> {
        if !self.levels.is_empty() {
            return Err(Error::UnbalancedContext(self.levels.len()));
        }
        Ok(self.join_regions())
    }

    /// Take all buffered text, including text held by open levels.
    ///
    /// Open levels stay on the stack with empty content so later pops still
    /// balance. A level whose text was taken has used its first-line prefix;
    /// its later content continues under the continuation prefix.
    pub fn drain_text(&mut self) -> String {
        let mut carried: Option<String> = None;
        for level in self.levels.iter_mut().rev() {
            if let Some(text) = carried.take() {
                level.content.push(text);
            }
            carried = level.materialize();
            level.content.clear();
            if carried.is_some() {
                level.first_prefix = level.prefix.clone();
            }
        }
        if let (Some(text), Some(bottom)) = (carried, self.levels.first()) {
            let base = bottom.base;
            self.region_mut(base).push(text);
        }

        let text = self.join_regions();
        self.head.clear();
        self.body.clear();
        self.foot.clear();
        text
    }

    fn join_regions(&mut self) -> String {
        for region in [&mut self.head, &mut self.body, &mut self.foot] {
            if region.last().is_some_and(|last| last == "\n") {
                region.pop();
            }
        }
        let mut out = String::new();
        for fragment in self.head.iter().chain(&self.body).chain(&self.foot) {
            out.push_str(fragment);
        }
        out
    }
}
