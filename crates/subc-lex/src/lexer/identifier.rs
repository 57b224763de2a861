//! Reserved-word and identifier recognition.

use subc_util::{Span, Symbol};

use super::core::Lexer;
use crate::token::{Token, TokenKind};

const KEYWORDS: &[(&str, TokenKind)] = &[
    ("return", TokenKind::Return),
    ("if", TokenKind::If),
    ("else", TokenKind::Else),
    ("while", TokenKind::While),
    ("for", TokenKind::For),
    ("int", TokenKind::Int),
    ("sizeof", TokenKind::Sizeof),
];

pub fn is_ident_start(c: char) -> bool {
    c.is_ascii_alphabetic() || c == '_'
}

pub fn is_ident_continue(c: char) -> bool {
    c.is_ascii_alphanumeric() || c == '_'
}

/// Matches a keyword only when followed by a non-identifier character, so
/// that e.g. `returning` lexes as one identifier rather than `return` plus
/// `ing`.
pub(super) fn try_lex_keyword(lexer: &mut Lexer<'_>) -> Option<TokenKind> {
    let start = lexer.cursor_ref().position();
    let remaining = lexer.cursor_ref().remaining();

    for (word, kind) in KEYWORDS {
        if remaining.starts_with(word) {
            let after = remaining.as_bytes().get(word.len()).copied();
            let boundary = match after {
                Some(b) => !is_ident_continue(b as char),
                None => true,
            };
            if boundary {
                for _ in 0..word.len() {
                    lexer.cursor().advance();
                }
                let _ = start;
                return Some(*kind);
            }
        }
    }
    None
}

pub(super) fn lex_identifier(lexer: &mut Lexer<'_>) -> Token {
    let start = lexer.cursor_ref().position();
    while is_ident_continue(lexer.cursor_ref().current_char()) {
        lexer.cursor().advance();
    }
    let end = lexer.cursor_ref().position();
    let text = &lexer.cursor_ref().source()[start..end];
    Token::new(TokenKind::Ident(Symbol::intern(text)), Span::new(start, end))
}

#[cfg(test)]
mod tests {
    use super::super::core::Lexer;
    use crate::token::TokenKind;

    #[test]
    fn keyword_followed_by_ident_char_is_not_a_keyword() {
        let tokens = Lexer::tokenize("iffy").unwrap();
        assert!(matches!(tokens[0].kind, TokenKind::Ident(_)));
    }

    #[test]
    fn bare_keyword_matches() {
        let tokens = Lexer::tokenize("if(").unwrap();
        assert_eq!(tokens[0].kind, TokenKind::If);
    }

    #[test]
    fn identifiers_allow_digits_after_first_char() {
        let tokens = Lexer::tokenize("a1 b2c3").unwrap();
        assert!(matches!(tokens[0].kind, TokenKind::Ident(_)));
        assert!(matches!(tokens[1].kind, TokenKind::Ident(_)));
    }
}
