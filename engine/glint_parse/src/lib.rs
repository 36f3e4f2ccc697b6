//! Backtracking consumption engine over a [`glint_grammar::Grammar`].
//!
//! The engine interprets a grammar's element structure directly against
//! input text, with unbounded lookahead via explicit state checkpoints
//! (markers), per-rule hidden-terminal scopes, and single-token
//! skip-recovery. It emits a typed event stream describing the structure it
//! actually traversed; downstream consumers ([`TreeBuilder`],
//! [`TraceAcceptor`], or anything else implementing [`TokenAcceptor`])
//! decide what to make of it.
//!
//! Events are buffered while the parse runs and replayed only after the
//! root rule finishes, so backtracked speculation is invisible downstream
//! and the replayed stream is always well nested, valid input or not.
//!
//! ```
//! use glint_grammar::GrammarBuilder;
//! use glint_parse::{Engine, EventLog};
//! use glint_text::Lexicon;
//!
//! let mut b = GrammarBuilder::new();
//! let rule = b.rule("Pair");
//! let a = b.keyword("a");
//! let kb = b.keyword("b");
//! let body = b.group([a, kb]);
//! b.define(rule, body);
//! let grammar = b.build(rule).unwrap();
//!
//! let lexicon = Lexicon::standard();
//! let mut engine = Engine::new(&grammar, &lexicon, "ab");
//! let mut log = EventLog::new();
//! assert!(engine.parse(&mut log).is_success());
//! ```

mod consume;
mod driver;
mod event;
mod hidden;
mod marker;
mod outcome;
mod recovery;
mod scan;
mod stack;
mod state;
mod tree;

#[cfg(test)]
mod tests;

pub use driver::{EngineFault, RootListener};
pub use event::{EventLog, ParseEvent, Tee, TokenAcceptor, ValueKind};
pub use outcome::ConsumeOutcome;
pub use tree::{Diagnostic, Node, TraceAcceptor, TreeBuilder};

use glint_grammar::Grammar;
use glint_text::Lexicon;

use crate::state::ParseState;

/// One parse of one input against one grammar.
///
/// The grammar and lexicon are shared read-only and may serve any number of
/// concurrent engines; everything mutable is private to this engine.
pub struct Engine<'g> {
    pub(crate) grammar: &'g Grammar,
    pub(crate) lexicon: &'g Lexicon,
    pub(crate) text: &'g str,
    pub(crate) state: ParseState,
}

impl<'g> Engine<'g> {
    pub fn new(grammar: &'g Grammar, lexicon: &'g Lexicon, text: &'g str) -> Self {
        Self {
            grammar,
            lexicon,
            text,
            state: ParseState::new(grammar.default_hidden()),
        }
    }

    /// Parse the entry rule and replay the surviving events to `acceptor`.
    pub fn parse(&mut self, acceptor: &mut dyn TokenAcceptor) -> ConsumeOutcome {
        self.parse_with(acceptor, &mut ())
    }

    /// Like [`Engine::parse`], with a [`RootListener`] observing the root
    /// bracketing and any contained fault.
    pub fn parse_with(
        &mut self,
        acceptor: &mut dyn TokenAcceptor,
        listener: &mut dyn RootListener,
    ) -> ConsumeOutcome {
        let outcome = self.consume_root(listener);
        self.replay(acceptor);
        outcome
    }

    /// Replay the surviving transcript, in emission order.
    pub fn replay(&self, acceptor: &mut dyn TokenAcceptor) {
        for event in &self.state.transcript {
            acceptor.dispatch(event);
        }
    }

    /// The surviving events so far.
    pub fn events(&self) -> &[ParseEvent] {
        &self.state.transcript
    }

    /// Current input offset.
    pub fn offset(&self) -> usize {
        self.state.offset
    }
}
