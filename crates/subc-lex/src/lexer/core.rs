use subc_util::{CompileError, DiagnosticBuilder, Span};

use crate::cursor::Cursor;
use crate::token::{Token, TokenKind};

/// Converts a source string into a stream of [`Token`]s.
///
/// Recognition is tried in the priority order the grammar depends on:
/// whitespace, reserved words, multi-character punctuators, identifiers,
/// single-character punctuators, integer literals; anything else is a
/// lexical error.
pub struct Lexer<'a> {
    cursor: Cursor<'a>,
    token_start: usize,
}

impl<'a> Lexer<'a> {
    pub fn new(source: &'a str) -> Self {
        Self {
            cursor: Cursor::new(source),
            token_start: 0,
        }
    }

    pub fn tokenize(source: &'a str) -> Result<Vec<Token>, CompileError> {
        let mut lexer = Self::new(source);
        let mut tokens = Vec::new();
        loop {
            let token = lexer.next_token()?;
            let is_eof = token.is_eof();
            tokens.push(token);
            if is_eof {
                break;
            }
        }
        Ok(tokens)
    }

    pub fn next_token(&mut self) -> Result<Token, CompileError> {
        self.cursor.skip_whitespace();
        self.token_start = self.cursor.position();

        if self.cursor.is_at_end() {
            return Ok(self.emit(TokenKind::Eof));
        }

        let c = self.cursor.current_char();
        if let Some(kind) = self.try_lex_keyword() {
            return Ok(self.emit(kind));
        }
        if let Some(kind) = self.try_lex_operator() {
            return Ok(self.emit(kind));
        }
        if super::identifier::is_ident_start(c) {
            return Ok(self.lex_identifier());
        }
        if c.is_ascii_digit() {
            return self.lex_number();
        }

        Err(self.error(format!("invalid token '{}'", c)))
    }

    fn emit(&self, kind: TokenKind) -> Token {
        Token::new(kind, Span::new(self.token_start, self.cursor.position()))
    }

    fn error(&self, message: String) -> CompileError {
        let span = Span::new(self.token_start, self.cursor.position().max(self.token_start + 1));
        self.error_at(span, message)
    }

    pub(crate) fn error_at(&self, span: Span, message: String) -> CompileError {
        CompileError::Lex(DiagnosticBuilder::error(message).span(span).build())
    }

    fn lex_identifier(&mut self) -> Token {
        super::identifier::lex_identifier(self)
    }

    fn lex_number(&mut self) -> Result<Token, CompileError> {
        super::number::lex_number(self)
    }

    fn try_lex_keyword(&mut self) -> Option<TokenKind> {
        super::identifier::try_lex_keyword(self)
    }

    fn try_lex_operator(&mut self) -> Option<TokenKind> {
        super::operator::try_lex_operator(self)
    }

    pub(crate) fn cursor(&mut self) -> &mut Cursor<'a> {
        &mut self.cursor
    }

    pub(crate) fn cursor_ref(&self) -> &Cursor<'a> {
        &self.cursor
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn kinds(source: &str) -> Vec<TokenKind> {
        Lexer::tokenize(source)
            .unwrap()
            .into_iter()
            .map(|t| t.kind)
            .collect()
    }

    #[test]
    fn tokenizes_return_statement() {
        let ks = kinds("return 0;");
        assert_eq!(
            ks,
            vec![
                TokenKind::Return,
                TokenKind::Number(0),
                TokenKind::Semicolon,
                TokenKind::Eof,
            ]
        );
    }

    #[test]
    fn reserved_word_requires_identifier_boundary() {
        // "returning" must lex as one identifier, not "return" + "ing".
        let ks = kinds("returning;");
        match ks[0] {
            TokenKind::Ident(_) => {},
            other => panic!("expected identifier, got {:?}", other),
        }
    }

    #[test]
    fn multi_char_punctuators_win_over_single_char() {
        let ks = kinds("a<=b");
        assert!(ks.contains(&TokenKind::Le));
        assert!(!ks.contains(&TokenKind::Lt));
    }

    #[test]
    fn invalid_character_is_lex_error() {
        let err = Lexer::tokenize("int x = @;").unwrap_err();
        assert!(matches!(err, subc_util::CompileError::Lex(_)));
    }
}
