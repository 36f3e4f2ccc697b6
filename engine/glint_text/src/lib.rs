//! Character-level terminal matching.
//!
//! The engine never sees a token stream; it asks a [`TerminalMatcher`]
//! whether a terminal class matches at a byte offset and how many bytes it
//! covers. Matchers are registered in a [`Lexicon`] and addressed by dense
//! slot index, which is what grammar-side terminal ids refer to.

mod lexeme;

pub use lexeme::{Lexeme, LexemeMatcher};

/// A single terminal class matchable at a byte offset.
///
/// `match_at` returns the matched length in bytes, always greater than zero;
/// `None` means the class does not match at that position. Matchers are
/// shared read-only across concurrent parses.
pub trait TerminalMatcher: Send + Sync {
    /// Diagnostic name, used in error events and trace output.
    fn name(&self) -> &str;

    /// Length of the match starting exactly at `offset`, if any.
    fn match_at(&self, text: &str, offset: usize) -> Option<usize>;
}

/// Registry of terminal matchers, addressed by slot index.
///
/// Slots 0..=6 are conventional (see the associated constants) so grammars
/// and hidden-token sets can be written against stable indices; user
/// matchers append after them via [`Lexicon::register`].
#[derive(Default)]
pub struct Lexicon {
    matchers: Vec<Box<dyn TerminalMatcher>>,
}

impl Lexicon {
    pub const WHITESPACE: usize = 0;
    pub const NEWLINE: usize = 1;
    pub const LINE_COMMENT: usize = 2;
    pub const BLOCK_COMMENT: usize = 3;
    pub const IDENT: usize = 4;
    pub const INT: usize = 5;
    pub const STRING: usize = 6;

    /// An empty lexicon with no matchers.
    pub fn new() -> Self {
        Self::default()
    }

    /// The conventional lexicon: the seven standard slots, in order.
    pub fn standard() -> Self {
        let mut lexicon = Self::new();
        lexicon.register(Box::new(LexemeMatcher::new(Lexeme::Whitespace, "WS")));
        lexicon.register(Box::new(LexemeMatcher::new(Lexeme::Newline, "NL")));
        lexicon.register(Box::new(LexemeMatcher::new(
            Lexeme::LineComment,
            "SL_COMMENT",
        )));
        lexicon.register(Box::new(LexemeMatcher::new(
            Lexeme::BlockComment,
            "ML_COMMENT",
        )));
        lexicon.register(Box::new(LexemeMatcher::new(Lexeme::Ident, "ID")));
        lexicon.register(Box::new(LexemeMatcher::new(Lexeme::Int, "INT")));
        lexicon.register(Box::new(LexemeMatcher::new(Lexeme::Str, "STRING")));
        lexicon
    }

    /// Append a matcher; returns the slot index it was assigned.
    pub fn register(&mut self, matcher: Box<dyn TerminalMatcher>) -> usize {
        let slot = self.matchers.len();
        self.matchers.push(matcher);
        slot
    }

    /// Matcher at a slot, if one is registered there.
    pub fn get(&self, slot: usize) -> Option<&dyn TerminalMatcher> {
        self.matchers.get(slot).map(AsRef::as_ref)
    }

    /// Number of registered slots.
    pub fn len(&self) -> usize {
        self.matchers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.matchers.is_empty()
    }
}

/// Match a literal keyword at `offset`, with an optional guard rejecting the
/// match when the next character belongs to `not_followed_by` (so `in` does
/// not match the prefix of `inner`).
pub fn keyword_at(
    text: &str,
    offset: usize,
    keyword: &str,
    not_followed_by: Option<fn(char) -> bool>,
) -> Option<usize> {
    let rest = text.get(offset..)?;
    if !rest.starts_with(keyword) {
        return None;
    }
    if let Some(class) = not_followed_by {
        if let Some(next) = rest[keyword.len()..].chars().next() {
            if class(next) {
                return None;
            }
        }
    }
    Some(keyword.len())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn keyword_matches_at_offset() {
        assert_eq!(keyword_at("a in b", 2, "in", None), Some(2));
        assert_eq!(keyword_at("a in b", 0, "in", None), None);
    }

    #[test]
    fn keyword_guard_rejects_longer_word() {
        let alnum: fn(char) -> bool = char::is_alphanumeric;
        assert_eq!(keyword_at("inner", 0, "in", Some(alnum)), None);
        assert_eq!(keyword_at("in ner", 0, "in", Some(alnum)), Some(2));
        // End of input counts as "not followed by".
        assert_eq!(keyword_at("in", 0, "in", Some(alnum)), Some(2));
    }

    #[test]
    fn keyword_past_end_of_input() {
        assert_eq!(keyword_at("ab", 5, "ab", None), None);
    }

    #[test]
    fn standard_slots_line_up() {
        let lexicon = Lexicon::standard();
        assert_eq!(lexicon.len(), 7);
        let id = lexicon.get(Lexicon::IDENT).map(TerminalMatcher::name);
        assert_eq!(id, Some("ID"));
        let string = lexicon.get(Lexicon::STRING).map(TerminalMatcher::name);
        assert_eq!(string, Some("STRING"));
        assert!(lexicon.get(7).is_none());
    }

    #[test]
    fn registered_matchers_append() {
        struct Semi;
        impl TerminalMatcher for Semi {
            fn name(&self) -> &str {
                "SEMI"
            }
            fn match_at(&self, text: &str, offset: usize) -> Option<usize> {
                text[offset..].starts_with(';').then_some(1)
            }
        }

        let mut lexicon = Lexicon::standard();
        let slot = lexicon.register(Box::new(Semi));
        assert_eq!(slot, 7);
        let matched = lexicon.get(slot).and_then(|m| m.match_at("a;", 1));
        assert_eq!(matched, Some(1));
    }
}
