//! The built, immutable grammar arena.

use crate::element::{Cardinality, Element, ElementId};
use crate::rule::{Rule, RuleId};
use crate::terminal::TerminalSet;

/// An immutable grammar: rules plus the element arena they reference.
///
/// Built once by [`crate::GrammarBuilder`], then shared read-only. Multiple
/// parses may interpret the same grammar concurrently; nothing here is ever
/// mutated after `build()`.
#[derive(Debug)]
pub struct Grammar {
    elements: Vec<Element>,
    /// Parallel to `elements`; kept dense so cardinality lookups touch a
    /// single byte-sized enum instead of the full element.
    cardinalities: Vec<Cardinality>,
    rules: Vec<Rule>,
    entry: RuleId,
    default_hidden: TerminalSet,
}

impl Grammar {
    pub(crate) fn new(
        elements: Vec<Element>,
        cardinalities: Vec<Cardinality>,
        rules: Vec<Rule>,
        entry: RuleId,
        default_hidden: TerminalSet,
    ) -> Self {
        debug_assert_eq!(elements.len(), cardinalities.len());
        Self {
            elements,
            cardinalities,
            rules,
            entry,
            default_hidden,
        }
    }

    /// Element data for an id handed out by the builder.
    #[inline]
    pub fn element(&self, id: ElementId) -> &Element {
        &self.elements[id.index()]
    }

    /// Cardinality of an element.
    #[inline]
    pub fn cardinality(&self, id: ElementId) -> Cardinality {
        self.cardinalities[id.index()]
    }

    /// Rule data for an id handed out by the builder.
    #[inline]
    pub fn rule(&self, id: RuleId) -> &Rule {
        &self.rules[id.index()]
    }

    /// The rule a root parse starts from.
    #[inline]
    pub fn entry(&self) -> RuleId {
        self.entry
    }

    /// Ignorable terminals in effect before any rule overrides them.
    #[inline]
    pub fn default_hidden(&self) -> TerminalSet {
        self.default_hidden
    }

    /// Number of elements in the arena.
    pub fn element_count(&self) -> usize {
        self.elements.len()
    }

    /// Number of rules.
    pub fn rule_count(&self) -> usize {
        self.rules.len()
    }

    /// Short human-readable description of an element, for diagnostics and
    /// trace output.
    pub fn describe(&self, id: ElementId) -> String {
        match self.element(id) {
            Element::Group { .. } => "group".to_string(),
            Element::Alternatives { .. } => "alternatives".to_string(),
            Element::Assignment { feature, .. } => format!("assignment `{feature}`"),
            Element::Keyword { text, .. } => format!("keyword '{text}'"),
            Element::RuleCall { rule } => format!("rule call {}", self.rule(*rule).name),
            Element::CrossRef { type_name, .. } => format!("cross-reference [{type_name}]"),
            Element::Action { type_name, .. } => format!("action {{{type_name}}}"),
        }
    }
}
