//! The typed event protocol emitted by the engine.
//!
//! Events are buffered in the parse transcript while the engine runs (so
//! backtracking can truncate them) and replayed to a [`TokenAcceptor`] once
//! the root parse finishes. A rolled-back event is never observed
//! downstream. In replay order the stream is a linearization of the grammar
//! structure actually traversed: well nested, begins matching ends.

use glint_grammar::{AssignOp, ElementId, RuleId};

/// Classification of a value-bearing token event.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ValueKind {
    /// A literal keyword.
    Keyword,
    /// A terminal-rule match.
    Terminal,
    /// A cross-reference token naming another instance.
    CrossRef,
}

/// One immutable record of a parse step.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ParseEvent {
    RuleBegin {
        offset: usize,
        rule: RuleId,
    },
    RuleEnd {
        offset: usize,
        rule: RuleId,
        /// Feature of the enclosing assignment the rule's value feeds, if any.
        feature: Option<Box<str>>,
        /// Operator of the enclosing assignment: `Add` accumulates a list,
        /// `Bool` sets a flag by presence.
        op: Option<AssignOp>,
        /// True when the rule produces a single text value rather than a node.
        datatype: bool,
    },
    GroupBegin {
        offset: usize,
        element: ElementId,
    },
    GroupEnd {
        offset: usize,
    },
    AlternativesBegin {
        offset: usize,
        element: ElementId,
    },
    AlternativesEnd {
        offset: usize,
        /// Index of the branch whose effects survived, if any was attempted.
        chosen: Option<usize>,
    },
    AssignmentBegin {
        offset: usize,
        element: ElementId,
    },
    AssignmentEnd {
        offset: usize,
    },
    /// An accepted value token covering `text[offset..offset + len]`.
    Token {
        offset: usize,
        len: usize,
        element: ElementId,
        feature: Option<Box<str>>,
        /// Operator of the enclosing assignment, if any.
        op: Option<AssignOp>,
        kind: ValueKind,
    },
    /// A semantic action; consumes no input.
    Action {
        offset: usize,
        type_name: Box<str>,
        feature: Option<Box<str>>,
        op: AssignOp,
    },
    /// Stand-in for an optional or repeated element that matched nothing.
    Placeholder {
        offset: usize,
        element: ElementId,
    },
    /// A diagnosed mismatch. The stream stays complete and well nested even
    /// when errors are present.
    Error {
        offset: usize,
        element: ElementId,
        message: Box<str>,
    },
}

impl ParseEvent {
    /// Input offset the event was emitted at.
    pub fn offset(&self) -> usize {
        match self {
            Self::RuleBegin { offset, .. }
            | Self::RuleEnd { offset, .. }
            | Self::GroupBegin { offset, .. }
            | Self::GroupEnd { offset }
            | Self::AlternativesBegin { offset, .. }
            | Self::AlternativesEnd { offset, .. }
            | Self::AssignmentBegin { offset, .. }
            | Self::AssignmentEnd { offset }
            | Self::Token { offset, .. }
            | Self::Action { offset, .. }
            | Self::Placeholder { offset, .. }
            | Self::Error { offset, .. } => *offset,
        }
    }

    pub fn is_error(&self) -> bool {
        matches!(self, Self::Error { .. })
    }
}

/// Sink for the replayed event stream.
///
/// One method per event kind, all defaulted to no-ops, so a consumer only
/// overrides what it cares about. `dispatch` fans a [`ParseEvent`] out to the
/// matching method; collectors that want the raw events override `dispatch`
/// itself instead.
pub trait TokenAcceptor {
    fn rule_begin(&mut self, _offset: usize, _rule: RuleId) {}
    fn rule_end(
        &mut self,
        _offset: usize,
        _rule: RuleId,
        _feature: Option<&str>,
        _op: Option<AssignOp>,
        _datatype: bool,
    ) {
    }
    fn group_begin(&mut self, _offset: usize, _element: ElementId) {}
    fn group_end(&mut self, _offset: usize) {}
    fn alternatives_begin(&mut self, _offset: usize, _element: ElementId) {}
    fn alternatives_end(&mut self, _offset: usize, _chosen: Option<usize>) {}
    fn assignment_begin(&mut self, _offset: usize, _element: ElementId) {}
    fn assignment_end(&mut self, _offset: usize) {}
    fn token(
        &mut self,
        _offset: usize,
        _len: usize,
        _element: ElementId,
        _feature: Option<&str>,
        _op: Option<AssignOp>,
        _kind: ValueKind,
    ) {
    }
    fn action(&mut self, _offset: usize, _type_name: &str, _feature: Option<&str>, _op: AssignOp) {}
    fn placeholder(&mut self, _offset: usize, _element: ElementId) {}
    fn error(&mut self, _offset: usize, _element: ElementId, _message: &str) {}

    fn dispatch(&mut self, event: &ParseEvent) {
        match event {
            ParseEvent::RuleBegin { offset, rule } => self.rule_begin(*offset, *rule),
            ParseEvent::RuleEnd {
                offset,
                rule,
                feature,
                op,
                datatype,
            } => self.rule_end(*offset, *rule, feature.as_deref(), *op, *datatype),
            ParseEvent::GroupBegin { offset, element } => self.group_begin(*offset, *element),
            ParseEvent::GroupEnd { offset } => self.group_end(*offset),
            ParseEvent::AlternativesBegin { offset, element } => {
                self.alternatives_begin(*offset, *element);
            }
            ParseEvent::AlternativesEnd { offset, chosen } => {
                self.alternatives_end(*offset, *chosen);
            }
            ParseEvent::AssignmentBegin { offset, element } => {
                self.assignment_begin(*offset, *element);
            }
            ParseEvent::AssignmentEnd { offset } => self.assignment_end(*offset),
            ParseEvent::Token {
                offset,
                len,
                element,
                feature,
                op,
                kind,
            } => self.token(*offset, *len, *element, feature.as_deref(), *op, *kind),
            ParseEvent::Action {
                offset,
                type_name,
                feature,
                op,
            } => self.action(*offset, type_name, feature.as_deref(), *op),
            ParseEvent::Placeholder { offset, element } => self.placeholder(*offset, *element),
            ParseEvent::Error {
                offset,
                element,
                message,
            } => self.error(*offset, *element, message),
        }
    }
}

/// Collects the replayed events verbatim.
#[derive(Debug, Default)]
pub struct EventLog {
    events: Vec<ParseEvent>,
}

impl EventLog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn events(&self) -> &[ParseEvent] {
        &self.events
    }

    pub fn into_events(self) -> Vec<ParseEvent> {
        self.events
    }
}

impl TokenAcceptor for EventLog {
    fn dispatch(&mut self, event: &ParseEvent) {
        self.events.push(event.clone());
    }
}

/// Fans one event stream out to two acceptors, in order.
pub struct Tee<'a> {
    first: &'a mut dyn TokenAcceptor,
    second: &'a mut dyn TokenAcceptor,
}

impl<'a> Tee<'a> {
    pub fn new(first: &'a mut dyn TokenAcceptor, second: &'a mut dyn TokenAcceptor) -> Self {
        Self { first, second }
    }
}

impl TokenAcceptor for Tee<'_> {
    fn dispatch(&mut self, event: &ParseEvent) {
        self.first.dispatch(event);
        self.second.dispatch(event);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tee_forwards_to_both() {
        let mut left = EventLog::new();
        let mut right = EventLog::new();
        let event = ParseEvent::GroupEnd { offset: 3 };
        Tee::new(&mut left, &mut right).dispatch(&event);
        assert_eq!(left.events(), &[event.clone()]);
        assert_eq!(right.events(), &[event]);
    }

    #[test]
    fn dispatch_routes_by_kind() {
        struct Errors(Vec<usize>);
        impl TokenAcceptor for Errors {
            fn error(&mut self, offset: usize, _element: ElementId, _message: &str) {
                self.0.push(offset);
            }
        }

        let mut sink = Errors(Vec::new());
        sink.dispatch(&ParseEvent::GroupEnd { offset: 0 });
        sink.dispatch(&ParseEvent::Error {
            offset: 5,
            element: ElementId::new(0),
            message: "mismatch".into(),
        });
        assert_eq!(sink.0, vec![5]);
    }
}
