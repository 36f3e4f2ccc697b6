//! Skip-recovery: the engine's sole built-in error-repair policy.
//!
//! When an attempt fails, the most recent token it accepted is permanently
//! marked skipped and the attempt is rerun from its base. Rolling the whole
//! attempt back (rather than truncating at the token) keeps the transcript
//! well nested. The best-ranked attempt is what finally survives, so the
//! diagnostics of a good first attempt are not clobbered by worse retries.
//!
//! Termination does not rest on a collaborator saying "nothing left to
//! skip": every recorded skip has a distinct start offset
//! (`ParseState::mark_skipped` refuses duplicates), and distinct starts
//! within a finite input bound the number of retries by the input length.

use glint_grammar::ElementId;

use crate::consume::Assigned;
use crate::outcome::ConsumeOutcome;
use crate::Engine;

impl Engine<'_> {
    /// Retry `attempt` under skip-recovery until it stops failing or
    /// recovery is exhausted; the best-ranked attempt's effects survive.
    pub(crate) fn consume(
        &mut self,
        id: ElementId,
        assign: Option<Assigned<'_>>,
    ) -> ConsumeOutcome {
        let mut kept = self.state.mark();
        let mut best = self.attempt(id, assign);
        let mut candidate = self.state.last_accepted_since(kept.base_accepted());

        while best.is_failure() {
            // A failed attempt that accepted nothing offers nothing to skip.
            let Some(range) = candidate.take() else { break };
            if !self.state.mark_skipped(range.clone()) {
                break;
            }
            debug_assert!(self.state.skipped.len() <= self.text.len());
            tracing::debug!(element = ?id, skipped = ?range, "retrying after token skip");

            let trial = kept.fork(&mut self.state);
            let outcome = self.attempt(id, assign);
            candidate = self.state.last_accepted_since(trial.base_accepted());
            if outcome > best {
                best = outcome;
                kept = trial.join(kept, &mut self.state);
            } else {
                kept = kept.join(trial, &mut self.state);
            }
        }

        kept.commit(&mut self.state);
        best
    }
}
