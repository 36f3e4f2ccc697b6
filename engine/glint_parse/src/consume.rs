//! The element interpreter.
//!
//! Element kind and cardinality are orthogonal axes: `element` applies the
//! cardinality combinator, `attempt` performs one pure try dispatched on the
//! kind. Retry-with-skip lives in `consume` (see `recovery`).

use glint_grammar::{AssignOp, Cardinality, CharClass, Element, ElementId};

use crate::event::{ParseEvent, ValueKind};
use crate::outcome::ConsumeOutcome;
use crate::Engine;

/// Assignment context threaded down to the value producer of a feature.
#[derive(Clone, Copy)]
pub(crate) struct Assigned<'a> {
    pub feature: &'a str,
    pub op: AssignOp,
}

impl Engine<'_> {
    /// Interpret one element under its cardinality.
    pub(crate) fn element(
        &mut self,
        id: ElementId,
        assign: Option<Assigned<'_>>,
    ) -> ConsumeOutcome {
        match self.grammar.cardinality(id) {
            Cardinality::Once => self.consume(id, assign),
            Cardinality::Optional => self.optional(id, assign),
            Cardinality::Star => self.star(id, assign),
            Cardinality::Plus => self.plus(id, assign),
        }
    }

    /// One pure try of an element, dispatched on its kind.
    pub(crate) fn attempt(
        &mut self,
        id: ElementId,
        assign: Option<Assigned<'_>>,
    ) -> ConsumeOutcome {
        let grammar = self.grammar;
        match grammar.element(id) {
            Element::Group { children, message } => {
                self.attempt_group(id, children, message.as_deref())
            }
            Element::Alternatives { branches } => self.attempt_alternatives(id, branches),
            Element::Assignment { feature, op, value } => {
                self.state.emit(ParseEvent::AssignmentBegin {
                    offset: self.state.offset,
                    element: id,
                });
                let outcome = self.element(*value, Some(Assigned { feature, op: *op }));
                self.state.emit(ParseEvent::AssignmentEnd {
                    offset: self.state.offset,
                });
                outcome
            }
            Element::Keyword {
                text,
                not_followed_by,
            } => self.keyword(id, text, *not_followed_by, assign),
            Element::RuleCall { rule } => self.consume_rule(*rule, id, assign),
            Element::CrossRef { token, .. } => self.cross_ref(id, *token, assign),
            Element::Action {
                type_name,
                feature,
                op,
            } => {
                self.state.emit(ParseEvent::Action {
                    offset: self.state.offset,
                    type_name: type_name.clone(),
                    feature: feature.clone(),
                    op: *op,
                });
                ConsumeOutcome::Success
            }
        }
    }

    /// Sequence: children in order, abort at the first non-Success with one
    /// error event naming the offending child. Later children emit nothing.
    fn attempt_group(
        &mut self,
        id: ElementId,
        children: &[ElementId],
        message: Option<&str>,
    ) -> ConsumeOutcome {
        self.state.emit(ParseEvent::GroupBegin {
            offset: self.state.offset,
            element: id,
        });
        let mut result = if children.is_empty() {
            ConsumeOutcome::EmptyMatch
        } else {
            ConsumeOutcome::Success
        };
        for &child in children {
            let outcome = self.element(child, None);
            if !outcome.is_success() {
                let offset = match outcome {
                    ConsumeOutcome::Failure { offset } => offset,
                    _ => self.state.offset,
                };
                let message = message.map_or_else(
                    || format!("expected {}", self.grammar.describe(child)),
                    ToOwned::to_owned,
                );
                self.state.emit(ParseEvent::Error {
                    offset,
                    element: child,
                    message: message.into(),
                });
                result = outcome;
                break;
            }
        }
        self.state.emit(ParseEvent::GroupEnd {
            offset: self.state.offset,
        });
        result
    }

    /// Ordered choice: branches tried in declaration order on forks of the
    /// same base. The first Success short-circuits; otherwise the
    /// strictly-highest-ranked attempt survives (first seen wins ties) for
    /// diagnostic value. An error is emitted only when no branch progressed
    /// past EmptyMatch.
    fn attempt_alternatives(&mut self, id: ElementId, branches: &[ElementId]) -> ConsumeOutcome {
        self.state.emit(ParseEvent::AlternativesBegin {
            offset: self.state.offset,
            element: id,
        });
        let mut kept = self.state.mark();
        let mut best: Option<(usize, ConsumeOutcome)> = None;
        for (index, &branch) in branches.iter().enumerate() {
            let trial = kept.fork(&mut self.state);
            let outcome = self.element(branch, None);
            if best.map_or(true, |(_, top)| outcome > top) {
                tracing::trace!(index, ?outcome, "alternative leads");
                best = Some((index, outcome));
                kept = trial.join(kept, &mut self.state);
            } else {
                kept = kept.join(trial, &mut self.state);
            }
            if outcome.is_success() {
                break;
            }
        }
        kept.commit(&mut self.state);
        let (chosen, outcome) = match best {
            Some((index, outcome)) => (Some(index), outcome),
            None => (None, ConsumeOutcome::EmptyMatch),
        };
        if outcome <= ConsumeOutcome::EmptyMatch {
            self.state.emit(ParseEvent::Error {
                offset: self.state.offset,
                element: id,
                message: "no viable alternative".into(),
            });
        }
        self.state.emit(ParseEvent::AlternativesEnd {
            offset: self.state.offset,
            chosen,
        });
        outcome
    }

    /// Optional never fails: internal failure rolls back fully and leaves a
    /// single placeholder.
    fn optional(&mut self, id: ElementId, assign: Option<Assigned<'_>>) -> ConsumeOutcome {
        let marker = self.state.mark();
        let outcome = self.attempt(id, assign);
        if outcome.is_success() {
            marker.commit(&mut self.state);
        } else {
            marker.rollback(&mut self.state);
            self.state.emit(ParseEvent::Placeholder {
                offset: self.state.offset,
                element: id,
            });
        }
        ConsumeOutcome::Success
    }

    /// Zero or more: each successful iteration is flushed permanent; the
    /// failed final iteration rolls back. Always Success.
    fn star(&mut self, id: ElementId, assign: Option<Assigned<'_>>) -> ConsumeOutcome {
        let mut marker = self.state.mark();
        loop {
            let before = self.state.offset;
            let outcome = self.attempt(id, assign);
            // A zero-width success would repeat forever; end the loop there.
            if outcome.is_success() && self.state.offset > before {
                marker.flush(&self.state);
            } else {
                marker.rollback(&mut self.state);
                self.state.emit(ParseEvent::Placeholder {
                    offset: self.state.offset,
                    element: id,
                });
                return ConsumeOutcome::Success;
            }
        }
    }

    /// One or more: the first iteration is gated by skip-recovery and fails
    /// the whole element if it cannot succeed; the rest behave like star.
    fn plus(&mut self, id: ElementId, assign: Option<Assigned<'_>>) -> ConsumeOutcome {
        let marker = self.state.mark();
        let first = self.consume(id, assign);
        if first.is_success() {
            marker.commit(&mut self.state);
            return self.star(id, assign);
        }
        let offset = match first {
            ConsumeOutcome::Failure { offset } => offset,
            _ => self.state.offset,
        };
        marker.rollback(&mut self.state);
        self.state.emit(ParseEvent::Error {
            offset,
            element: id,
            message: format!("expected at least one {}", self.grammar.describe(id)).into(),
        });
        first
    }

    fn keyword(
        &mut self,
        element: ElementId,
        text: &str,
        not_followed_by: Option<CharClass>,
        assign: Option<Assigned<'_>>,
    ) -> ConsumeOutcome {
        self.skip_transparent();
        let offset = self.state.offset;
        match glint_text::keyword_at(self.text, offset, text, not_followed_by) {
            Some(len) => {
                self.accept(element, len, ValueKind::Keyword, assign);
                ConsumeOutcome::Success
            }
            None => ConsumeOutcome::Failure { offset },
        }
    }
}
