//! Mutable per-parse state: offset, transcript, accepted tokens, skips.

use std::ops::Range;

use glint_grammar::TerminalSet;

use crate::event::ParseEvent;

/// A value token the engine accepted, by byte range.
#[derive(Clone, Copy, Debug)]
pub(crate) struct AcceptedToken {
    pub start: usize,
    pub len: usize,
}

impl AcceptedToken {
    pub fn range(self) -> Range<usize> {
        self.start..self.start + self.len
    }
}

/// Exclusively owned by one parse; never shared across threads.
///
/// The transcript and the accepted-token log are the units the marker
/// subsystem truncates on rollback. The skipped ranges are deliberately NOT
/// under marker control: a skip is a permanent repair decision, and undoing
/// it on backtrack would let the retried attempt re-accept the very token it
/// just skipped.
pub(crate) struct ParseState {
    pub offset: usize,
    pub transcript: Vec<ParseEvent>,
    pub accepted: Vec<AcceptedToken>,
    pub skipped: Vec<Range<usize>>,
    /// Active ignorable-terminal set, swapped per rule scope.
    pub hidden: TerminalSet,
}

impl ParseState {
    pub fn new(hidden: TerminalSet) -> Self {
        Self {
            offset: 0,
            transcript: Vec::new(),
            accepted: Vec::new(),
            skipped: Vec::new(),
            hidden,
        }
    }

    pub fn emit(&mut self, event: ParseEvent) {
        self.transcript.push(event);
    }

    /// Byte range of the most recent token accepted at or after the given
    /// accepted-log index.
    pub fn last_accepted_since(&self, base: usize) -> Option<Range<usize>> {
        self.accepted
            .get(base..)
            .and_then(<[AcceptedToken]>::last)
            .map(|token| token.range())
    }

    /// Record a byte range as permanently skipped.
    ///
    /// Returns `false` if a skip already starts at the same offset. Each
    /// accepted skip has a distinct start, so the number of skips one parse
    /// can record is bounded by the input length; this is what terminates
    /// the retry loop even if a retried attempt keeps failing.
    pub fn mark_skipped(&mut self, range: Range<usize>) -> bool {
        debug_assert!(range.start < range.end);
        if self.skipped.iter().any(|r| r.start == range.start) {
            return false;
        }
        self.skipped.push(range);
        true
    }

    /// Resolve an offset past any skipped ranges starting at it.
    pub fn skip_jump(&self, mut offset: usize) -> usize {
        loop {
            match self.skipped.iter().find(|r| r.start == offset) {
                Some(range) => offset = range.end,
                None => return offset,
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn skip_start_must_be_distinct() {
        let mut state = ParseState::new(TerminalSet::new());
        assert!(state.mark_skipped(0..2));
        assert!(!state.mark_skipped(0..5));
        assert!(state.mark_skipped(2..3));
    }

    #[test]
    fn skip_jump_chains_adjacent_ranges() {
        let mut state = ParseState::new(TerminalSet::new());
        assert!(state.mark_skipped(1..3));
        assert!(state.mark_skipped(3..4));
        assert_eq!(state.skip_jump(0), 0);
        assert_eq!(state.skip_jump(1), 4);
        assert_eq!(state.skip_jump(3), 4);
    }

    #[test]
    fn last_accepted_respects_base() {
        let mut state = ParseState::new(TerminalSet::new());
        state.accepted.push(AcceptedToken { start: 0, len: 1 });
        state.accepted.push(AcceptedToken { start: 2, len: 3 });
        assert_eq!(state.last_accepted_since(0), Some(2..5));
        assert_eq!(state.last_accepted_since(1), Some(2..5));
        assert_eq!(state.last_accepted_since(2), None);
    }
}
