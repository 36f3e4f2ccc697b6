//! Rule invocation and the root driver with fault containment.

use std::any::Any;
use std::panic::{catch_unwind, AssertUnwindSafe};

use glint_grammar::{ElementId, RuleId, RuleKind};
use thiserror::Error;

use crate::consume::Assigned;
use crate::event::{ParseEvent, ValueKind};
use crate::outcome::ConsumeOutcome;
use crate::{stack, Engine};

/// Payload of the Exception outcome, surfaced to the root listener.
#[derive(Debug, Error)]
pub enum EngineFault {
    #[error("engine fault: {message}")]
    Panic { message: String },
}

impl EngineFault {
    fn from_panic(payload: &(dyn Any + Send)) -> Self {
        let message = if let Some(s) = payload.downcast_ref::<&str>() {
            (*s).to_owned()
        } else if let Some(s) = payload.downcast_ref::<String>() {
            s.clone()
        } else {
            "unidentified fault".to_owned()
        };
        Self::Panic { message }
    }
}

/// Observer of a root parse's bracketing and faults.
pub trait RootListener {
    /// The root rule's begin event has been emitted.
    fn after_begin(&mut self) {}
    /// A fault was contained; the parse will end with Exception.
    fn fault(&mut self, _fault: &EngineFault) {}
    /// The root rule is about to emit its end event.
    fn before_end(&mut self, _outcome: ConsumeOutcome) {}
}

impl RootListener for () {}

impl Engine<'_> {
    /// Invoke a rule from a call site. Parser rules bracket their body with
    /// rule events inside their own hidden-terminal scope; terminal rules
    /// consume one token through the lexicon.
    pub(crate) fn consume_rule(
        &mut self,
        id: RuleId,
        call: ElementId,
        assign: Option<Assigned<'_>>,
    ) -> ConsumeOutcome {
        let grammar = self.grammar;
        let rule = grammar.rule(id);
        match rule.kind {
            RuleKind::Terminal { token } => {
                self.skip_transparent();
                let offset = self.state.offset;
                match self.matcher(token.index()).match_at(self.text, offset) {
                    Some(len) => {
                        self.accept(call, len, ValueKind::Terminal, assign);
                        ConsumeOutcome::Success
                    }
                    None => ConsumeOutcome::Failure { offset },
                }
            }
            RuleKind::Parser { body, datatype } => {
                tracing::trace!(rule = %rule.name, offset = self.state.offset, "enter rule");
                let mut scope = self.hidden_scope(rule.hidden);
                let offset = scope.state.offset;
                scope.state.emit(ParseEvent::RuleBegin { offset, rule: id });
                let outcome = stack::ensure_sufficient_stack(|| scope.element(body, None));
                let offset = scope.state.offset;
                scope.state.emit(ParseEvent::RuleEnd {
                    offset,
                    rule: id,
                    feature: assign.map(|a| a.feature.into()),
                    op: assign.map(|a| a.op),
                    datatype,
                });
                drop(scope);
                tracing::trace!(rule = %rule.name, ?outcome, "exit rule");
                outcome
            }
        }
    }

    /// Cross-reference: consume the referenced rule's token and record it as
    /// a reference rather than a contained value.
    pub(crate) fn cross_ref(
        &mut self,
        element: ElementId,
        token: RuleId,
        assign: Option<Assigned<'_>>,
    ) -> ConsumeOutcome {
        let grammar = self.grammar;
        match grammar.rule(token).kind {
            RuleKind::Terminal { token: slot } => {
                self.skip_transparent();
                let offset = self.state.offset;
                match self.matcher(slot.index()).match_at(self.text, offset) {
                    Some(len) => {
                        self.accept(element, len, ValueKind::CrossRef, assign);
                        ConsumeOutcome::Success
                    }
                    None => ConsumeOutcome::Failure { offset },
                }
            }
            // Datatype-rule references read like a plain rule call.
            RuleKind::Parser { .. } => self.consume_rule(token, element, assign),
        }
    }

    /// Run one full parse of the grammar's entry rule.
    ///
    /// Faults inside the body are contained: the body's partial effects are
    /// rolled back, the fault is reported to `listener` and as an error
    /// event, and the outcome is Exception. The rule end event, the hidden
    /// scope restore, and the marker close happen on every path, so the
    /// transcript is complete and well nested even after a fault.
    pub fn consume_root(&mut self, listener: &mut dyn RootListener) -> ConsumeOutcome {
        let grammar = self.grammar;
        let entry = grammar.entry();
        let rule = grammar.rule(entry);
        let RuleKind::Parser { body, datatype } = rule.kind else {
            // The grammar builder rejects terminal entry rules.
            return ConsumeOutcome::Exception;
        };

        tracing::debug!(rule = %rule.name, "root parse begin");
        let mut scope = self.hidden_scope(rule.hidden);
        let offset = scope.state.offset;
        scope.state.emit(ParseEvent::RuleBegin {
            offset,
            rule: entry,
        });
        listener.after_begin();
        let begin_events = scope.state.transcript.len();

        let attempt = scope.state.mark();
        let outcome = match catch_unwind(AssertUnwindSafe(|| scope.element(body, None))) {
            Ok(outcome) => {
                attempt.commit(&mut scope.state);
                outcome
            }
            Err(payload) => {
                attempt.rollback(&mut scope.state);
                let fault = EngineFault::from_panic(payload.as_ref());
                tracing::error!(%fault, "contained engine fault");
                let offset = scope.state.offset;
                scope.state.emit(ParseEvent::Error {
                    offset,
                    element: body,
                    message: fault.to_string().into(),
                });
                listener.fault(&fault);
                ConsumeOutcome::Exception
            }
        };

        // Guarantee at least one diagnostic for a failed parse whose body
        // produced none (a bare leaf body, for instance).
        if !outcome.is_success()
            && !scope.state.transcript[begin_events..]
                .iter()
                .any(ParseEvent::is_error)
        {
            let offset = scope.state.offset;
            scope.state.emit(ParseEvent::Error {
                offset,
                element: body,
                message: format!("expected {}", grammar.rule(entry).name).into(),
            });
        }

        listener.before_end(outcome);
        let offset = scope.state.offset;
        scope.state.emit(ParseEvent::RuleEnd {
            offset,
            rule: entry,
            feature: None,
            op: None,
            datatype,
        });
        drop(scope);
        tracing::debug!(?outcome, offset = self.state.offset, "root parse end");
        outcome
    }
}
