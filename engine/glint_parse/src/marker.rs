//! Checkpoints over the parse state, with fork/join for speculation.
//!
//! A marker is plain saved-length metadata over the append-only transcript
//! and accepted-token logs, so rollback is truncation and commit is free.
//! `fork` supports trying a second continuation from the same base: the
//! marker parks its own live tail (events, accepted tokens, end offset),
//! resets the shared state to the base, and hands out a sibling marker. A
//! later `join` decides which tail survives and discards the other.

use crate::state::{AcceptedToken, ParseState};
use crate::ParseEvent;

/// Tail of a forked-away attempt, held aside until `join` decides its fate.
struct Parked {
    end_offset: usize,
    events: Vec<ParseEvent>,
    accepted: Vec<AcceptedToken>,
}

/// A checkpoint of the parse state.
///
/// Every marker is closed by exactly one `commit`, `rollback`, or `join`;
/// nesting mirrors element-evaluation nesting.
#[must_use]
pub(crate) struct Marker {
    base_offset: usize,
    base_events: usize,
    base_accepted: usize,
    parked: Option<Parked>,
}

impl ParseState {
    pub fn mark(&self) -> Marker {
        Marker {
            base_offset: self.offset,
            base_events: self.transcript.len(),
            base_accepted: self.accepted.len(),
            parked: None,
        }
    }
}

impl Marker {
    /// Accepted-log length at the base; used to find what an attempt
    /// accepted since the marker was opened.
    pub fn base_accepted(&self) -> usize {
        self.base_accepted
    }

    /// Make the tail permanent. Effects were applied eagerly, so this only
    /// closes the checkpoint.
    pub fn commit(self, state: &mut ParseState) {
        debug_assert!(self.parked.is_none(), "committing a parked marker");
        debug_assert!(state.transcript.len() >= self.base_events);
    }

    /// Undo everything since the base: offset, events, accepted tokens.
    pub fn rollback(self, state: &mut ParseState) {
        debug_assert!(self.parked.is_none(), "rolling back a parked marker");
        state.transcript.truncate(self.base_events);
        state.accepted.truncate(self.base_accepted);
        state.offset = self.base_offset;
    }

    /// Advance the point of no return to the current state without closing
    /// the marker. Loops flush after each successful iteration so only the
    /// failed final iteration rolls back.
    pub fn flush(&mut self, state: &ParseState) {
        debug_assert!(self.parked.is_none(), "flushing a parked marker");
        self.base_offset = state.offset;
        self.base_events = state.transcript.len();
        self.base_accepted = state.accepted.len();
    }

    /// Park this marker's live tail and reset the state to the base,
    /// returning a sibling marker at the same base for the next attempt.
    pub fn fork(&mut self, state: &mut ParseState) -> Marker {
        debug_assert!(self.parked.is_none(), "forking a parked marker");
        self.parked = Some(Parked {
            end_offset: state.offset,
            events: state.transcript.split_off(self.base_events),
            accepted: state.accepted.split_off(self.base_accepted),
        });
        state.offset = self.base_offset;
        Marker {
            base_offset: self.base_offset,
            base_events: self.base_events,
            base_accepted: self.base_accepted,
            parked: None,
        }
    }

    /// Merge two sibling markers; the receiver's tail survives.
    ///
    /// If the receiver is parked, the loser is the live tail: it is removed
    /// from the state and the receiver's parked tail is spliced back in. If
    /// the loser is parked its tail is simply dropped. O(1) metadata plus
    /// O(k) over the discarded tail.
    pub fn join(mut self, loser: Marker, state: &mut ParseState) -> Marker {
        debug_assert_eq!(self.base_offset, loser.base_offset);
        debug_assert_eq!(self.base_events, loser.base_events);
        debug_assert_eq!(self.base_accepted, loser.base_accepted);
        if let Some(parked) = self.parked.take() {
            state.transcript.truncate(self.base_events);
            state.accepted.truncate(self.base_accepted);
            state.transcript.extend(parked.events);
            state.accepted.extend(parked.accepted);
            state.offset = parked.end_offset;
        }
        drop(loser);
        self
    }
}

#[cfg(test)]
mod tests {
    use glint_grammar::TerminalSet;

    use super::*;

    fn event(offset: usize) -> ParseEvent {
        ParseEvent::GroupEnd { offset }
    }

    fn state() -> ParseState {
        ParseState::new(TerminalSet::new())
    }

    #[test]
    fn rollback_restores_exactly() {
        let mut state = state();
        state.emit(event(0));
        state.offset = 2;

        let marker = state.mark();
        state.emit(event(2));
        state.emit(event(3));
        state.accepted.push(AcceptedToken { start: 2, len: 2 });
        state.offset = 4;

        marker.rollback(&mut state);
        assert_eq!(state.offset, 2);
        assert_eq!(state.transcript, vec![event(0)]);
        assert!(state.accepted.is_empty());
    }

    #[test]
    fn flush_moves_the_rollback_point() {
        let mut state = state();
        let mut marker = state.mark();

        state.emit(event(0));
        state.offset = 1;
        marker.flush(&state);

        state.emit(event(1));
        state.offset = 5;
        marker.rollback(&mut state);

        assert_eq!(state.offset, 1);
        assert_eq!(state.transcript, vec![event(0)]);
    }

    #[test]
    fn fork_isolates_the_parked_tail() {
        let mut state = state();
        let mut first = state.mark();
        state.emit(event(0));
        state.offset = 1;

        // Park the first attempt; the sibling starts clean at the base.
        let second = first.fork(&mut state);
        assert_eq!(state.offset, 0);
        assert!(state.transcript.is_empty());

        // Mutate and roll back the sibling; the parked tail is untouched.
        state.emit(event(9));
        state.offset = 9;
        second.rollback(&mut state);
        assert_eq!(state.offset, 0);

        // Restoring the parked winner brings back exactly its tail.
        let sibling = state.mark();
        let survivor = first.join(sibling, &mut state);
        assert_eq!(state.offset, 1);
        assert_eq!(state.transcript, vec![event(0)]);
        survivor.commit(&mut state);
    }

    #[test]
    fn join_keeps_the_live_winner() {
        let mut state = state();
        let mut first = state.mark();
        state.emit(event(0));
        state.offset = 1;

        let second = first.fork(&mut state);
        state.emit(event(7));
        state.offset = 7;

        // The live second attempt wins; the parked first tail is dropped.
        let survivor = second.join(first, &mut state);
        assert_eq!(state.offset, 7);
        assert_eq!(state.transcript, vec![event(7)]);
        survivor.commit(&mut state);
    }
}
