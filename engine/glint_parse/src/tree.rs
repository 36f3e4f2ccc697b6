//! The two expected consumers of the event stream: a concrete node tree
//! builder and a trace printer. Both are ordinary [`TokenAcceptor`]s; the
//! engine knows nothing about either.

use glint_grammar::{AssignOp, ElementId, Grammar, RuleId};

use crate::event::{TokenAcceptor, ValueKind};

/// One node of the concrete tree, by byte range into the parsed text.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Node {
    Rule {
        rule: RuleId,
        /// Feature of the enclosing assignment this node fills, if any.
        feature: Option<Box<str>>,
        /// Operator of that assignment; `Add` nodes accumulate into a list.
        op: Option<AssignOp>,
        datatype: bool,
        children: Vec<Node>,
    },
    Leaf {
        offset: usize,
        len: usize,
        kind: ValueKind,
        feature: Option<Box<str>>,
        /// Operator of the enclosing assignment; `Bool` leaves set a flag.
        op: Option<AssignOp>,
    },
}

impl Node {
    /// Slice of the input a leaf covers.
    pub fn text<'t>(&self, input: &'t str) -> Option<&'t str> {
        match self {
            Self::Leaf { offset, len, .. } => input.get(*offset..offset + len),
            Self::Rule { .. } => None,
        }
    }
}

/// A diagnosed mismatch, collected off the error events.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Diagnostic {
    pub offset: usize,
    pub message: Box<str>,
}

/// Builds the concrete node tree from the replayed event stream.
///
/// Group, alternatives and assignment brackets carry no tree structure of
/// their own; rules become nodes, tokens become leaves, errors become
/// diagnostics.
#[derive(Debug, Default)]
pub struct TreeBuilder {
    stack: Vec<Vec<Node>>,
    roots: Vec<Node>,
    errors: Vec<Diagnostic>,
}

impl TreeBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn root(&self) -> Option<&Node> {
        self.roots.first()
    }

    pub fn into_root(mut self) -> Option<Node> {
        if self.roots.is_empty() {
            None
        } else {
            Some(self.roots.remove(0))
        }
    }

    pub fn errors(&self) -> &[Diagnostic] {
        &self.errors
    }

    fn push_node(&mut self, node: Node) {
        match self.stack.last_mut() {
            Some(top) => top.push(node),
            None => self.roots.push(node),
        }
    }
}

impl TokenAcceptor for TreeBuilder {
    fn rule_begin(&mut self, _offset: usize, _rule: RuleId) {
        self.stack.push(Vec::new());
    }

    fn rule_end(
        &mut self,
        _offset: usize,
        rule: RuleId,
        feature: Option<&str>,
        op: Option<AssignOp>,
        datatype: bool,
    ) {
        let children = self.stack.pop().unwrap_or_default();
        self.push_node(Node::Rule {
            rule,
            feature: feature.map(Into::into),
            op,
            datatype,
            children,
        });
    }

    fn token(
        &mut self,
        offset: usize,
        len: usize,
        _element: ElementId,
        feature: Option<&str>,
        op: Option<AssignOp>,
        kind: ValueKind,
    ) {
        self.push_node(Node::Leaf {
            offset,
            len,
            kind,
            feature: feature.map(Into::into),
            op,
        });
    }

    fn error(&mut self, offset: usize, _element: ElementId, message: &str) {
        self.errors.push(Diagnostic {
            offset,
            message: message.into(),
        });
    }
}

/// Pretty-prints the event stream through `tracing` for debugging.
pub struct TraceAcceptor<'g> {
    grammar: &'g Grammar,
    depth: usize,
}

impl<'g> TraceAcceptor<'g> {
    pub fn new(grammar: &'g Grammar) -> Self {
        Self { grammar, depth: 0 }
    }

    fn enter(&mut self, offset: usize, what: &str, detail: &str) {
        tracing::debug!(depth = self.depth, offset, %detail, "{what} {{");
        self.depth += 1;
    }

    fn leave(&mut self, offset: usize, what: &str) {
        self.depth = self.depth.saturating_sub(1);
        tracing::debug!(depth = self.depth, offset, "}} {what}");
    }
}

impl TokenAcceptor for TraceAcceptor<'_> {
    fn rule_begin(&mut self, offset: usize, rule: RuleId) {
        let name = self.grammar.rule(rule).name.clone();
        self.enter(offset, "rule", &name);
    }

    fn rule_end(
        &mut self,
        offset: usize,
        _rule: RuleId,
        _feature: Option<&str>,
        _op: Option<AssignOp>,
        _datatype: bool,
    ) {
        self.leave(offset, "rule");
    }

    fn group_begin(&mut self, offset: usize, _element: ElementId) {
        self.enter(offset, "group", "");
    }

    fn group_end(&mut self, offset: usize) {
        self.leave(offset, "group");
    }

    fn alternatives_begin(&mut self, offset: usize, _element: ElementId) {
        self.enter(offset, "alternatives", "");
    }

    fn alternatives_end(&mut self, offset: usize, chosen: Option<usize>) {
        self.depth = self.depth.saturating_sub(1);
        tracing::debug!(depth = self.depth, offset, ?chosen, "}} alternatives");
    }

    fn assignment_begin(&mut self, offset: usize, element: ElementId) {
        let detail = self.grammar.describe(element);
        self.enter(offset, "assignment", &detail);
    }

    fn assignment_end(&mut self, offset: usize) {
        self.leave(offset, "assignment");
    }

    fn token(
        &mut self,
        offset: usize,
        len: usize,
        element: ElementId,
        feature: Option<&str>,
        op: Option<AssignOp>,
        kind: ValueKind,
    ) {
        let detail = self.grammar.describe(element);
        tracing::debug!(depth = self.depth, offset, len, ?kind, feature, ?op, %detail, "token");
    }

    fn placeholder(&mut self, offset: usize, element: ElementId) {
        let detail = self.grammar.describe(element);
        tracing::debug!(depth = self.depth, offset, %detail, "placeholder");
    }

    fn error(&mut self, offset: usize, element: ElementId, message: &str) {
        let detail = self.grammar.describe(element);
        tracing::debug!(depth = self.depth, offset, %detail, "error: {message}");
    }
}
