//! Immutable grammar model for the Glint parse engine.
//!
//! A [`Grammar`] is an arena of rules and structural elements built once via
//! [`GrammarBuilder`] and never mutated afterwards. Elements are addressed by
//! dense [`ElementId`]s, rules by [`RuleId`]s, so the interpreter dispatches on
//! a tagged variant instead of a deep object graph.
//!
//! The model deliberately separates two orthogonal axes:
//!
//! - [`Element`]: *what* a position in the grammar is (group, alternatives,
//!   assignment, keyword, rule call, cross-reference, action)
//! - [`Cardinality`]: *how often* it may match (once, optional, star, plus)
//!
//! Grammars are assumed to be validated by their producer; the builder only
//! checks structural wiring (every parser rule has a body, the entry rule is
//! a parser rule).

mod builder;
mod element;
mod grammar;
mod rule;
mod terminal;

pub use builder::{BuildError, GrammarBuilder};
pub use element::{AssignOp, Cardinality, CharClass, Children, Element, ElementId};
pub use grammar::Grammar;
pub use rule::{Rule, RuleId, RuleKind};
pub use terminal::{TerminalId, TerminalSet};
