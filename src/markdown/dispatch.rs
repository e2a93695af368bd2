//! Per-kind enter/leave dispatch.
//!
//! A [`Dispatcher`] maps each [`NodeKind`] to a pair of actions. Actions are
//! either literal text written to the current output, a no-op, or a plain
//! function over the translator state. Kinds without an enter action fall
//! back to a one-time warning and are skipped with their subtree, so
//! rendering always completes.
//!
//! Registration is checked: adding a second enter (or leave) action for a
//! kind fails with [`Error::DuplicateHandler`]. Translators that build on
//! another translator's table use the `replace_*` methods to override
//! entries on purpose.

use std::collections::HashMap;

use crate::error::{Error, Phase, Result};
use crate::model::{Document, NodeId, NodeKind, Visit, Visitor, walk};

use super::buffer::BufferStack;

/// Enter action: runs before a node's children.
pub type EnterFn<T> = fn(&mut T, &Document, NodeId) -> Result<Visit>;
/// Leave action: runs after a node's children.
pub type LeaveFn<T> = fn(&mut T, &Document, NodeId) -> Result<()>;

/// State a dispatcher drives.
pub trait Translator {
    /// Buffers that literal actions write to.
    fn output(&mut self) -> &mut BufferStack;

    /// Report a node kind without handlers.
    fn warn_unsupported(&mut self, kind: &str);
}

#[derive(Clone, Copy)]
enum Action<F> {
    Noop,
    Write(&'static str),
    Call(F),
}

struct Handlers<T> {
    enter: Option<Action<EnterFn<T>>>,
    leave: Option<Action<LeaveFn<T>>>,
}

impl<T> Default for Handlers<T> {
    fn default() -> Self {
        Self {
            enter: None,
            leave: None,
        }
    }
}

pub struct Dispatcher<T> {
    handlers: HashMap<NodeKind, Handlers<T>>,
}

impl<T> Default for Dispatcher<T> {
    fn default() -> Self {
        Self {
            handlers: HashMap::new(),
        }
    }
}

impl<T: Translator> Dispatcher<T> {
    pub fn new() -> Self {
        Self::default()
    }

    fn set_enter(&mut self, kind: NodeKind, action: Action<EnterFn<T>>) -> Result<&mut Self> {
        let slot = &mut self.handlers.entry(kind).or_default().enter;
        if slot.is_some() {
            return Err(Error::DuplicateHandler {
                kind: kind.name(),
                phase: Phase::Enter,
            });
        }
        *slot = Some(action);
        Ok(self)
    }

    fn set_leave(&mut self, kind: NodeKind, action: Action<LeaveFn<T>>) -> Result<&mut Self> {
        let slot = &mut self.handlers.entry(kind).or_default().leave;
        if slot.is_some() {
            return Err(Error::DuplicateHandler {
                kind: kind.name(),
                phase: Phase::Leave,
            });
        }
        *slot = Some(action);
        Ok(self)
    }

    /// Register an enter action.
    pub fn on_enter(&mut self, kind: NodeKind, f: EnterFn<T>) -> Result<&mut Self> {
        self.set_enter(kind, Action::Call(f))
    }

    /// Register a leave action.
    pub fn on_leave(&mut self, kind: NodeKind, f: LeaveFn<T>) -> Result<&mut Self> {
        self.set_leave(kind, Action::Call(f))
    }

    /// Register both actions at once.
    pub fn on(&mut self, kind: NodeKind, enter: EnterFn<T>, leave: LeaveFn<T>) -> Result<&mut Self> {
        self.on_enter(kind, enter)?.on_leave(kind, leave)
    }

    /// Register an enter-only action; leaving the node does nothing.
    pub fn on_enter_only(&mut self, kind: NodeKind, enter: EnterFn<T>) -> Result<&mut Self> {
        self.on_enter(kind, enter)?.set_leave(kind, Action::Noop)
    }

    /// Wrap a node's content in literal text.
    pub fn prefix_suffix(
        &mut self,
        kind: NodeKind,
        prefix: &'static str,
        suffix: &'static str,
    ) -> Result<&mut Self> {
        self.set_enter(kind, Action::Write(prefix))?
            .set_leave(kind, Action::Write(suffix))
    }

    /// Render the content of each kind with no markup of its own.
    pub fn pass_through(&mut self, kinds: &[NodeKind]) -> Result<&mut Self> {
        for &kind in kinds {
            self.set_enter(kind, Action::Noop)?
                .set_leave(kind, Action::Noop)?;
        }
        Ok(self)
    }

    /// Override the enter action of a kind, registered or not.
    pub fn replace_enter(&mut self, kind: NodeKind, f: EnterFn<T>) -> &mut Self {
        self.handlers.entry(kind).or_default().enter = Some(Action::Call(f));
        self
    }

    /// Override the leave action of a kind, registered or not.
    pub fn replace_leave(&mut self, kind: NodeKind, f: LeaveFn<T>) -> &mut Self {
        self.handlers.entry(kind).or_default().leave = Some(Action::Call(f));
        self
    }

    /// Whether a kind has an enter action.
    pub fn handles(&self, kind: NodeKind) -> bool {
        self.handlers.get(&kind).is_some_and(|h| h.enter.is_some())
    }

    /// Run the enter action for a node, or the unsupported-kind fallback.
    pub fn enter(&self, translator: &mut T, doc: &Document, id: NodeId) -> Result<Visit> {
        let action = doc
            .kind(id)
            .and_then(|kind| self.handlers.get(&kind))
            .and_then(|h| h.enter);

        match action {
            Some(Action::Noop) => Ok(Visit::Continue),
            Some(Action::Write(text)) => {
                translator.output().write(text);
                Ok(Visit::Continue)
            }
            Some(Action::Call(f)) => f(translator, doc, id),
            None => {
                translator.warn_unsupported(doc.kind_name(id));
                Ok(Visit::SkipNode)
            }
        }
    }

    /// Run the leave action for a node. Missing actions do nothing.
    pub fn leave(&self, translator: &mut T, doc: &Document, id: NodeId) -> Result<()> {
        let action = doc
            .kind(id)
            .and_then(|kind| self.handlers.get(&kind))
            .and_then(|h| h.leave);

        match action {
            Some(Action::Write(text)) => {
                translator.output().write(text);
                Ok(())
            }
            Some(Action::Call(f)) => f(translator, doc, id),
            Some(Action::Noop) | None => Ok(()),
        }
    }

    /// Walk `doc`, dispatching every node to `translator`.
    pub fn walk(&self, doc: &Document, translator: &mut T) -> Result<()> {
        let mut session = Session {
            dispatcher: self,
            translator,
        };
        walk(doc, &mut session)
    }
}

struct Session<'a, T> {
    dispatcher: &'a Dispatcher<T>,
    translator: &'a mut T,
}

impl<T: Translator> Visitor for Session<'_, T> {
    fn enter(&mut self, doc: &Document, id: NodeId) -> Result<Visit> {
        self.dispatcher.enter(self.translator, doc, id)
    }

    fn leave(&mut self, doc: &Document, id: NodeId) -> Result<()> {
        self.dispatcher.leave(self.translator, doc, id)
    }
}
