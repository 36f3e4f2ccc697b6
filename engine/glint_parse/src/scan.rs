//! Character-level primitives: hidden-token skipping and token acceptance.

use glint_grammar::ElementId;
use glint_text::TerminalMatcher;

use crate::consume::Assigned;
use crate::event::{ParseEvent, ValueKind};
use crate::state::AcceptedToken;
use crate::Engine;

impl Engine<'_> {
    /// Advance past skipped repair ranges and hidden terminals. Skipped
    /// spans produce no events.
    pub(crate) fn skip_transparent(&mut self) {
        loop {
            let start = self.state.offset;
            let mut offset = self.state.skip_jump(start);
            let hidden = self.state.hidden;
            for id in hidden.iter() {
                if let Some(len) = self.matcher(id.index()).match_at(self.text, offset) {
                    offset += len;
                    break;
                }
            }
            if offset == start {
                return;
            }
            self.state.offset = offset;
        }
    }

    /// Matcher for a lexicon slot. A grammar wired against a slot its
    /// lexicon does not provide is a setup fault, not a parse failure; the
    /// root driver contains the panic as an Exception outcome.
    pub(crate) fn matcher(&self, slot: usize) -> &dyn TerminalMatcher {
        match self.lexicon.get(slot) {
            Some(matcher) => matcher,
            None => panic!("no terminal matcher registered for lexicon slot {slot}"),
        }
    }

    /// Record an accepted value token and advance past it.
    pub(crate) fn accept(
        &mut self,
        element: ElementId,
        len: usize,
        kind: ValueKind,
        assign: Option<Assigned<'_>>,
    ) {
        debug_assert!(len > 0, "value tokens are never empty");
        let offset = self.state.offset;
        tracing::trace!(offset, len, ?kind, "token");
        self.state.emit(ParseEvent::Token {
            offset,
            len,
            element,
            feature: assign.map(|a| a.feature.into()),
            op: assign.map(|a| a.op),
            kind,
        });
        self.state.accepted.push(AcceptedToken { start: offset, len });
        self.state.offset = offset + len;
    }
}
