//! Terminal matcher ids and bitset over them.

/// Index of a terminal matcher slot in the lexicon the engine is wired with.
///
/// Must be below 64 so it fits a [`TerminalSet`] bit.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct TerminalId(u32);

impl TerminalId {
    /// Create an id for the given lexicon slot.
    #[expect(
        clippy::cast_possible_truncation,
        reason = "lexicon slots stay below the bitset width"
    )]
    #[inline]
    pub const fn new(slot: usize) -> Self {
        Self(slot as u32)
    }

    /// Lexicon slot index.
    #[inline]
    pub const fn index(self) -> usize {
        self.0 as usize
    }
}

/// A set of terminal ids using bitset representation for O(1) membership.
///
/// Each bit of the `u64` corresponds to one terminal slot. Used for the
/// per-rule hidden-token sets, which rules declare and the engine swaps in
/// and out as it enters and leaves rule scopes.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct TerminalSet(u64);

impl TerminalSet {
    /// Create an empty terminal set.
    #[inline]
    pub const fn new() -> Self {
        Self(0)
    }

    /// Create a set containing a single terminal.
    #[inline]
    pub const fn single(id: TerminalId) -> Self {
        Self(1u64 << id.0)
    }

    /// Add a terminal to this set (builder pattern for const contexts).
    #[inline]
    #[must_use]
    pub const fn with(self, id: TerminalId) -> Self {
        Self(self.0 | (1u64 << id.0))
    }

    /// Union of two sets.
    #[inline]
    #[must_use]
    pub const fn union(self, other: Self) -> Self {
        Self(self.0 | other.0)
    }

    /// Check membership.
    #[inline]
    pub const fn contains(&self, id: TerminalId) -> bool {
        (self.0 & (1u64 << id.0)) != 0
    }

    /// Check if this set is empty.
    #[inline]
    pub const fn is_empty(&self) -> bool {
        self.0 == 0
    }

    /// Number of terminals in the set.
    #[inline]
    pub const fn count(&self) -> u32 {
        self.0.count_ones()
    }

    /// Iterate the member ids in ascending slot order.
    pub fn iter(self) -> impl Iterator<Item = TerminalId> {
        (0..u64::BITS).filter_map(move |bit| {
            if self.0 & (1u64 << bit) != 0 {
                Some(TerminalId(bit))
            } else {
                None
            }
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_set() {
        let set = TerminalSet::new();
        assert!(set.is_empty());
        assert_eq!(set.count(), 0);
        assert!(!set.contains(TerminalId::new(0)));
    }

    #[test]
    fn with_and_contains() {
        let set = TerminalSet::new()
            .with(TerminalId::new(0))
            .with(TerminalId::new(5));
        assert_eq!(set.count(), 2);
        assert!(set.contains(TerminalId::new(0)));
        assert!(set.contains(TerminalId::new(5)));
        assert!(!set.contains(TerminalId::new(1)));
    }

    #[test]
    fn union_merges() {
        let a = TerminalSet::single(TerminalId::new(1));
        let b = TerminalSet::single(TerminalId::new(2));
        let both = a.union(b);
        assert_eq!(both.count(), 2);
        assert!(both.contains(TerminalId::new(1)));
        assert!(both.contains(TerminalId::new(2)));
    }

    #[test]
    fn iter_ascending() {
        let set = TerminalSet::new()
            .with(TerminalId::new(7))
            .with(TerminalId::new(2));
        let slots: Vec<usize> = set.iter().map(TerminalId::index).collect();
        assert_eq!(slots, vec![2, 7]);
    }

    #[test]
    fn const_sets() {
        const HIDDEN: TerminalSet = TerminalSet::new()
            .with(TerminalId::new(0))
            .with(TerminalId::new(2));
        assert!(HIDDEN.contains(TerminalId::new(0)));
        assert!(!HIDDEN.contains(TerminalId::new(1)));
    }
}
