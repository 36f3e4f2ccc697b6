//! Grammar element variants and their ids.

use smallvec::SmallVec;

use crate::rule::RuleId;

/// Dense index of an element inside a [`crate::Grammar`] arena.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct ElementId(u32);

impl ElementId {
    #[expect(
        clippy::cast_possible_truncation,
        reason = "grammar arenas never approach u32 capacity"
    )]
    pub fn new(index: usize) -> Self {
        Self(index as u32)
    }

    /// Index into the owning grammar's element arena.
    #[inline]
    pub fn index(self) -> usize {
        self.0 as usize
    }
}

/// How often an element may match.
///
/// Orthogonal to the element kind: any element can carry any cardinality, and
/// the interpreter combines the two axes at evaluation time.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Cardinality {
    /// Exactly once; failure propagates.
    #[default]
    Once,
    /// Zero or one; never fails.
    Optional,
    /// Zero or more; never fails.
    Star,
    /// One or more; fails only if the first iteration cannot match.
    Plus,
}

/// Assignment operator of an [`Element::Assignment`] or [`Element::Action`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum AssignOp {
    /// `=`: the feature holds a single value.
    Set,
    /// `+=`: the feature accumulates a list of values.
    Add,
    /// `?=`: the feature is a boolean set by the match itself.
    Bool,
}

/// Character predicate guarding a keyword match (`not followed by`).
///
/// A plain `fn` pointer so elements stay `Copy`-friendly and buildable in
/// const-ish contexts; closures are not needed for character classes.
pub type CharClass = fn(char) -> bool;

/// Inline child list. Most groups and alternatives have few children, so the
/// ids live inline in the arena slot.
pub type Children = SmallVec<[ElementId; 4]>;

/// One structural element of a grammar.
///
/// Shared read-only by every parse that interprets the owning grammar.
#[derive(Debug)]
pub enum Element {
    /// Ordered sequence; all children must match.
    Group {
        children: Children,
        /// Error message reported when a child fails; `None` uses the
        /// engine default.
        message: Option<Box<str>>,
    },
    /// Ordered choice; the first succeeding branch wins.
    Alternatives { branches: Children },
    /// Feature assignment wrapping a single value producer.
    Assignment {
        feature: Box<str>,
        op: AssignOp,
        value: ElementId,
    },
    /// Literal keyword, optionally guarded by a not-followed-by class.
    Keyword {
        text: Box<str>,
        not_followed_by: Option<CharClass>,
    },
    /// Invocation of another rule (parser or terminal).
    RuleCall { rule: RuleId },
    /// Cross-reference: matches the referenced rule's token and records it as
    /// a reference to an instance of `type_name`.
    CrossRef { type_name: Box<str>, token: RuleId },
    /// Semantic action; matches nothing, emits an action event.
    Action {
        type_name: Box<str>,
        feature: Option<Box<str>>,
        op: AssignOp,
    },
}
