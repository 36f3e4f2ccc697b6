//! Builder producing an immutable [`Grammar`].
//!
//! Rules are declared first (so rule calls can reference rules whose bodies
//! do not exist yet, including recursive ones) and defined later. `build()`
//! checks the wiring and freezes the arena.

use thiserror::Error;

use crate::element::{AssignOp, Cardinality, CharClass, Children, Element, ElementId};
use crate::grammar::Grammar;
use crate::rule::{Rule, RuleId, RuleKind};
use crate::terminal::{TerminalId, TerminalSet};

/// Structural wiring errors caught at `build()` time.
///
/// This is not grammar validation (left-recursion, ambiguity and the like are
/// the producer's concern); it only rejects grammars the interpreter cannot
/// even walk.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum BuildError {
    #[error("parser rule `{name}` was declared but never defined")]
    UndefinedRule { name: Box<str> },
    #[error("terminal rule `{name}` cannot have a body")]
    TerminalWithBody { name: Box<str> },
    #[error("entry rule `{name}` must be a parser rule")]
    EntryNotParser { name: Box<str> },
}

enum PendingKind {
    Parser { datatype: bool },
    Terminal { token: TerminalId },
}

struct PendingRule {
    name: Box<str>,
    kind: PendingKind,
    hidden: Option<TerminalSet>,
    body: Option<ElementId>,
}

/// Accumulates elements and rules, then freezes them into a [`Grammar`].
#[derive(Default)]
pub struct GrammarBuilder {
    elements: Vec<Element>,
    cardinalities: Vec<Cardinality>,
    rules: Vec<PendingRule>,
    default_hidden: TerminalSet,
}

impl GrammarBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    fn add(&mut self, element: Element, cardinality: Cardinality) -> ElementId {
        let id = ElementId::new(self.elements.len());
        self.elements.push(element);
        self.cardinalities.push(cardinality);
        id
    }

    // === Rules ===

    /// Declare a parser rule; define its body later with [`Self::define`].
    pub fn rule(&mut self, name: &str) -> RuleId {
        self.declare(name, PendingKind::Parser { datatype: false })
    }

    /// Declare a datatype rule (produces a single text value).
    pub fn datatype_rule(&mut self, name: &str) -> RuleId {
        self.declare(name, PendingKind::Parser { datatype: true })
    }

    /// Declare a terminal rule bound to a lexicon slot.
    pub fn terminal_rule(&mut self, name: &str, token: TerminalId) -> RuleId {
        self.declare(name, PendingKind::Terminal { token })
    }

    fn declare(&mut self, name: &str, kind: PendingKind) -> RuleId {
        let id = RuleId::new(self.rules.len());
        self.rules.push(PendingRule {
            name: name.into(),
            kind,
            hidden: None,
            body: None,
        });
        id
    }

    /// Attach a body to a declared parser rule.
    pub fn define(&mut self, rule: RuleId, body: ElementId) {
        self.rules[rule.index()].body = Some(body);
    }

    /// Declare the ignorable terminals for a rule's scope.
    pub fn hidden(&mut self, rule: RuleId, set: TerminalSet) {
        self.rules[rule.index()].hidden = Some(set);
    }

    /// Ignorable terminals in effect where no rule overrides them.
    pub fn default_hidden(&mut self, set: TerminalSet) {
        self.default_hidden = set;
    }

    // === Elements ===

    pub fn keyword(&mut self, text: &str) -> ElementId {
        self.keyword_card(text, Cardinality::Once)
    }

    pub fn keyword_card(&mut self, text: &str, cardinality: Cardinality) -> ElementId {
        self.add(
            Element::Keyword {
                text: text.into(),
                not_followed_by: None,
            },
            cardinality,
        )
    }

    /// Keyword that must not be directly followed by a character of `class`
    /// (e.g. a keyword that is a prefix of valid identifiers).
    pub fn keyword_guarded(&mut self, text: &str, class: CharClass) -> ElementId {
        self.add(
            Element::Keyword {
                text: text.into(),
                not_followed_by: Some(class),
            },
            Cardinality::Once,
        )
    }

    pub fn group<I>(&mut self, children: I) -> ElementId
    where
        I: IntoIterator<Item = ElementId>,
    {
        self.group_card(children, Cardinality::Once)
    }

    pub fn group_card<I>(&mut self, children: I, cardinality: Cardinality) -> ElementId
    where
        I: IntoIterator<Item = ElementId>,
    {
        let children: Children = children.into_iter().collect();
        self.add(
            Element::Group {
                children,
                message: None,
            },
            cardinality,
        )
    }

    /// Override the error message a group reports when a child fails.
    pub fn group_message(&mut self, group: ElementId, message: &str) {
        if let Element::Group { message: slot, .. } = &mut self.elements[group.index()] {
            *slot = Some(message.into());
        }
    }

    pub fn alternatives<I>(&mut self, branches: I) -> ElementId
    where
        I: IntoIterator<Item = ElementId>,
    {
        self.alternatives_card(branches, Cardinality::Once)
    }

    pub fn alternatives_card<I>(&mut self, branches: I, cardinality: Cardinality) -> ElementId
    where
        I: IntoIterator<Item = ElementId>,
    {
        let branches: Children = branches.into_iter().collect();
        self.add(Element::Alternatives { branches }, cardinality)
    }

    pub fn assignment(&mut self, feature: &str, op: AssignOp, value: ElementId) -> ElementId {
        self.assignment_card(feature, op, value, Cardinality::Once)
    }

    pub fn assignment_card(
        &mut self,
        feature: &str,
        op: AssignOp,
        value: ElementId,
        cardinality: Cardinality,
    ) -> ElementId {
        self.add(
            Element::Assignment {
                feature: feature.into(),
                op,
                value,
            },
            cardinality,
        )
    }

    pub fn rule_call(&mut self, rule: RuleId) -> ElementId {
        self.rule_call_card(rule, Cardinality::Once)
    }

    pub fn rule_call_card(&mut self, rule: RuleId, cardinality: Cardinality) -> ElementId {
        self.add(Element::RuleCall { rule }, cardinality)
    }

    pub fn cross_ref(&mut self, type_name: &str, token: RuleId) -> ElementId {
        self.cross_ref_card(type_name, token, Cardinality::Once)
    }

    pub fn cross_ref_card(
        &mut self,
        type_name: &str,
        token: RuleId,
        cardinality: Cardinality,
    ) -> ElementId {
        self.add(
            Element::CrossRef {
                type_name: type_name.into(),
                token,
            },
            cardinality,
        )
    }

    pub fn action(&mut self, type_name: &str, feature: Option<&str>, op: AssignOp) -> ElementId {
        self.action_card(type_name, feature, op, Cardinality::Once)
    }

    pub fn action_card(
        &mut self,
        type_name: &str,
        feature: Option<&str>,
        op: AssignOp,
        cardinality: Cardinality,
    ) -> ElementId {
        self.add(
            Element::Action {
                type_name: type_name.into(),
                feature: feature.map(Into::into),
                op,
            },
            cardinality,
        )
    }

    // === Freeze ===

    /// Check the wiring and freeze the arena into an immutable [`Grammar`].
    pub fn build(self, entry: RuleId) -> Result<Grammar, BuildError> {
        let mut rules = Vec::with_capacity(self.rules.len());
        for pending in self.rules {
            let kind = match (pending.kind, pending.body) {
                (PendingKind::Parser { datatype }, Some(body)) => {
                    RuleKind::Parser { body, datatype }
                }
                (PendingKind::Parser { .. }, None) => {
                    return Err(BuildError::UndefinedRule { name: pending.name });
                }
                (PendingKind::Terminal { token }, None) => RuleKind::Terminal { token },
                (PendingKind::Terminal { .. }, Some(_)) => {
                    return Err(BuildError::TerminalWithBody { name: pending.name });
                }
            };
            rules.push(Rule {
                name: pending.name,
                kind,
                hidden: pending.hidden,
            });
        }

        if let RuleKind::Terminal { .. } = rules[entry.index()].kind {
            return Err(BuildError::EntryNotParser {
                name: rules[entry.index()].name.clone(),
            });
        }

        Ok(Grammar::new(
            self.elements,
            self.cardinalities,
            rules,
            entry,
            self.default_hidden,
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn build_minimal_grammar() {
        let mut b = GrammarBuilder::new();
        let rule = b.rule("Pair");
        let a = b.keyword("a");
        let kb = b.keyword("b");
        let body = b.group([a, kb]);
        b.define(rule, body);

        let grammar = b.build(rule).expect("wiring is complete");
        assert_eq!(grammar.rule_count(), 1);
        assert_eq!(grammar.element_count(), 3);
        assert_eq!(grammar.entry(), rule);
        assert_eq!(grammar.cardinality(body), Cardinality::Once);
        match grammar.element(body) {
            Element::Group { children, .. } => assert_eq!(children.as_slice(), &[a, kb]),
            other => panic!("expected group, got {other:?}"),
        }
    }

    #[test]
    fn undefined_rule_rejected() {
        let mut b = GrammarBuilder::new();
        let rule = b.rule("Dangling");
        let err = b.build(rule).expect_err("body missing");
        assert_eq!(
            err,
            BuildError::UndefinedRule {
                name: "Dangling".into()
            }
        );
    }

    #[test]
    fn terminal_entry_rejected() {
        let mut b = GrammarBuilder::new();
        let term = b.terminal_rule("ID", TerminalId::new(4));
        let err = b.build(term).expect_err("entry must be a parser rule");
        assert_eq!(err, BuildError::EntryNotParser { name: "ID".into() });
    }

    #[test]
    fn card_variants_record_cardinality() {
        let mut b = GrammarBuilder::new();
        let rule = b.rule("Refs");
        let id_rule = b.terminal_rule("ID", TerminalId::new(4));
        let refs = b.cross_ref_card("Var", id_rule, Cardinality::Star);
        let marker = b.action_card("Block", None, AssignOp::Set, Cardinality::Optional);
        let body = b.group([marker, refs]);
        b.define(rule, body);
        let grammar = b.build(rule).expect("wiring is complete");

        assert_eq!(grammar.cardinality(refs), Cardinality::Star);
        assert_eq!(grammar.cardinality(marker), Cardinality::Optional);
    }

    #[test]
    fn describe_elements() {
        let mut b = GrammarBuilder::new();
        let rule = b.rule("Thing");
        let kw = b.keyword("thing");
        let assigned = b.assignment("name", AssignOp::Set, kw);
        let body = b.group([assigned]);
        b.define(rule, body);
        let grammar = b.build(rule).expect("wiring is complete");

        assert_eq!(grammar.describe(kw), "keyword 'thing'");
        assert_eq!(grammar.describe(assigned), "assignment `name`");
        assert_eq!(grammar.describe(body), "group");
    }
}
