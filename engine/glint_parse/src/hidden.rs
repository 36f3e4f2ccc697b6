//! Scoped replacement of the ignorable-terminal set.

use std::ops::{Deref, DerefMut};

use glint_grammar::TerminalSet;

use crate::state::ParseState;
use crate::Engine;

/// Restore handle for a replaced hidden-terminal set. Strict stack
/// discipline: one per active rule invocation.
#[must_use]
pub(crate) struct HiddenTokenState {
    prev: TerminalSet,
}

impl ParseState {
    pub fn replace_hidden(&mut self, set: TerminalSet) -> HiddenTokenState {
        HiddenTokenState {
            prev: std::mem::replace(&mut self.hidden, set),
        }
    }
}

impl HiddenTokenState {
    pub fn restore(self, state: &mut ParseState) {
        state.hidden = self.prev;
    }
}

/// Guard that restores the prior hidden-terminal set on drop, so the
/// restore happens on every exit path, unwinding included.
pub(crate) struct HiddenScope<'a, 'g> {
    engine: &'a mut Engine<'g>,
    saved: Option<HiddenTokenState>,
}

impl<'g> Engine<'g> {
    /// Enter a rule scope. `set` is `None` when the rule inherits the
    /// caller's hidden terminals, in which case nothing is replaced.
    pub(crate) fn hidden_scope(&mut self, set: Option<TerminalSet>) -> HiddenScope<'_, 'g> {
        let saved = set.map(|set| self.state.replace_hidden(set));
        HiddenScope {
            engine: self,
            saved,
        }
    }
}

impl<'g> Deref for HiddenScope<'_, 'g> {
    type Target = Engine<'g>;

    fn deref(&self) -> &Self::Target {
        self.engine
    }
}

impl<'g> DerefMut for HiddenScope<'_, 'g> {
    fn deref_mut(&mut self) -> &mut Engine<'g> {
        self.engine
    }
}

impl Drop for HiddenScope<'_, '_> {
    fn drop(&mut self) {
        if let Some(saved) = self.saved.take() {
            saved.restore(&mut self.engine.state);
        }
    }
}
