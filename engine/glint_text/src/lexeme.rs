//! The standard lexeme classes, derived with `logos`.

use logos::Logos;

use crate::TerminalMatcher;

/// Standard lexeme classes.
///
/// One logos machine covers all classes; a matcher for one class accepts a
/// position only when its class is what the machine recognizes there. This
/// keeps maximal munch consistent across classes (`123abc` never yields an
/// integer match inside an identifier position and vice versa).
#[derive(Logos, Clone, Copy, Debug, PartialEq, Eq)]
pub enum Lexeme {
    #[regex(r"[ \t]+")]
    Whitespace,

    #[regex(r"\r?\n")]
    Newline,

    #[regex(r"//[^\n]*")]
    LineComment,

    #[regex(r"/\*[^*]*\*+([^/*][^*]*\*+)*/")]
    BlockComment,

    #[regex(r"[A-Za-z_][A-Za-z0-9_]*")]
    Ident,

    #[regex(r"[0-9]+")]
    Int,

    #[regex(r#""([^"\\\n]|\\.)*""#)]
    Str,
}

/// [`TerminalMatcher`] accepting one [`Lexeme`] class.
pub struct LexemeMatcher {
    lexeme: Lexeme,
    name: &'static str,
}

impl LexemeMatcher {
    pub fn new(lexeme: Lexeme, name: &'static str) -> Self {
        Self { lexeme, name }
    }
}

impl TerminalMatcher for LexemeMatcher {
    fn name(&self) -> &str {
        self.name
    }

    fn match_at(&self, text: &str, offset: usize) -> Option<usize> {
        let rest = text.get(offset..)?;
        let mut lexer = Lexeme::lexer(rest);
        let token = lexer.next()?.ok()?;
        // The first token always starts at 0; the class must be ours.
        if token == self.lexeme && lexer.span().start == 0 {
            Some(lexer.span().end)
        } else {
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn matcher(lexeme: Lexeme) -> LexemeMatcher {
        LexemeMatcher::new(lexeme, "test")
    }

    #[test]
    fn ident_matches_maximally() {
        let m = matcher(Lexeme::Ident);
        assert_eq!(m.match_at("foo_1 bar", 0), Some(5));
        assert_eq!(m.match_at("foo_1 bar", 6), Some(3));
        assert_eq!(m.match_at("123", 0), None);
    }

    #[test]
    fn int_does_not_match_inside_ident() {
        let int = matcher(Lexeme::Int);
        assert_eq!(int.match_at("42;", 0), Some(2));
        // `a42` lexes as one identifier, so no integer at offset 0.
        assert_eq!(int.match_at("a42", 0), None);
    }

    #[test]
    fn whitespace_excludes_newline() {
        let ws = matcher(Lexeme::Whitespace);
        assert_eq!(ws.match_at("  \tx", 0), Some(3));
        assert_eq!(ws.match_at("\n", 0), None);
        let nl = matcher(Lexeme::Newline);
        assert_eq!(nl.match_at("\r\nx", 0), Some(2));
    }

    #[test]
    fn comments() {
        let sl = matcher(Lexeme::LineComment);
        assert_eq!(sl.match_at("// hi\nrest", 0), Some(5));
        let ml = matcher(Lexeme::BlockComment);
        assert_eq!(ml.match_at("/* a * b */x", 0), Some(11));
        assert_eq!(ml.match_at("/* open", 0), None);
    }

    #[test]
    fn strings_with_escapes() {
        let s = matcher(Lexeme::Str);
        assert_eq!(s.match_at(r#""plain" tail"#, 0), Some(7));
        assert_eq!(s.match_at(r#""es\"caped""#, 0), Some(11));
        assert_eq!(s.match_at(r#""unterminated"#, 0), None);
    }

    #[test]
    fn offset_slices_before_matching() {
        let m = matcher(Lexeme::Ident);
        assert_eq!(m.match_at("1 abc", 2), Some(3));
        assert_eq!(m.match_at("abc", 10), None);
    }
}
