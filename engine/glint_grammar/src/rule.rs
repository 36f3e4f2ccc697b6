//! Rules: named entry points into the element arena.

use crate::element::ElementId;
use crate::terminal::{TerminalId, TerminalSet};

/// Dense index of a rule inside a [`crate::Grammar`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct RuleId(u32);

impl RuleId {
    #[expect(
        clippy::cast_possible_truncation,
        reason = "grammar arenas never approach u32 capacity"
    )]
    pub fn new(index: usize) -> Self {
        Self(index as u32)
    }

    /// Index into the owning grammar's rule arena.
    #[inline]
    pub fn index(self) -> usize {
        self.0 as usize
    }
}

/// What a rule produces when invoked.
#[derive(Clone, Copy, Debug)]
pub enum RuleKind {
    /// Structural rule interpreted over the element arena.
    Parser {
        body: ElementId,
        /// Datatype rules produce a single text value rather than a node;
        /// consumers fold their event range into one leaf.
        datatype: bool,
    },
    /// Rule matched by a single terminal matcher at the character level.
    Terminal { token: TerminalId },
}

/// A named grammar rule.
#[derive(Debug)]
pub struct Rule {
    pub name: Box<str>,
    pub kind: RuleKind,
    /// Ignorable terminals for this rule's scope; `None` inherits the
    /// caller's set.
    pub hidden: Option<TerminalSet>,
}
