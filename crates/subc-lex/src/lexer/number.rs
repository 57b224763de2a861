//! Integer literal recognition.

use subc_util::{CompileError, Span};

use super::core::Lexer;
use crate::token::{Token, TokenKind};

pub(super) fn lex_number(lexer: &mut Lexer<'_>) -> Result<Token, CompileError> {
    let start = lexer.cursor_ref().position();
    while lexer.cursor_ref().current_char().is_ascii_digit() {
        lexer.cursor().advance();
    }
    let end = lexer.cursor_ref().position();
    let text = &lexer.cursor_ref().source()[start..end];
    let span = Span::new(start, end);
    let value: i64 = text
        .parse()
        .map_err(|_| lexer.error_at(span, format!("integer literal '{}' out of range", text)))?;
    Ok(Token::new(TokenKind::Number(value), span))
}
