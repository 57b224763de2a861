//! Punctuator recognition: two-character operators are tried before their
//! one-character prefixes, per the grammar's priority order.

use super::core::Lexer;
use crate::token::TokenKind;

const TWO_CHAR: &[(&str, TokenKind)] = &[
    ("==", TokenKind::EqEq),
    ("!=", TokenKind::NotEq),
    ("<=", TokenKind::Le),
    (">=", TokenKind::Ge),
];

const ONE_CHAR: &[(char, TokenKind)] = &[
    ('+', TokenKind::Plus),
    ('-', TokenKind::Minus),
    ('*', TokenKind::Star),
    ('/', TokenKind::Slash),
    ('&', TokenKind::Amp),
    ('=', TokenKind::Assign),
    ('<', TokenKind::Lt),
    ('>', TokenKind::Gt),
    ('(', TokenKind::LParen),
    (')', TokenKind::RParen),
    ('{', TokenKind::LBrace),
    ('}', TokenKind::RBrace),
    ('[', TokenKind::LBracket),
    (']', TokenKind::RBracket),
    (',', TokenKind::Comma),
    (';', TokenKind::Semicolon),
];

pub(super) fn try_lex_operator(lexer: &mut Lexer<'_>) -> Option<TokenKind> {
    let remaining = lexer.cursor_ref().remaining();
    for (text, kind) in TWO_CHAR {
        if remaining.starts_with(text) {
            lexer.cursor().advance();
            lexer.cursor().advance();
            return Some(*kind);
        }
    }
    let c = lexer.cursor_ref().current_char();
    for (ch, kind) in ONE_CHAR {
        if *ch == c {
            lexer.cursor().advance();
            return Some(*kind);
        }
    }
    None
}

#[cfg(test)]
mod tests {
    use super::super::core::Lexer;
    use crate::token::TokenKind;

    #[test]
    fn not_equal_is_one_token() {
        let tokens = Lexer::tokenize("a!=b").unwrap();
        assert!(tokens.iter().any(|t| t.kind == TokenKind::NotEq));
    }

    #[test]
    fn single_char_operators_still_work_without_a_following_operand() {
        let tokens = Lexer::tokenize("a=b").unwrap();
        assert_eq!(tokens[1].kind, TokenKind::Assign);
    }
}
