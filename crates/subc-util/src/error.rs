//! Crate-wide error type.
//!
//! Every pipeline stage (tokenizer, parser, code generator) returns
//! `Result<T, CompileError>` and propagates the first failure with `?`.
//! There is exactly one diagnostic per compilation: the compiler exits on
//! the first error it encounters.

use thiserror::Error;

use crate::diagnostic::Diagnostic;

#[derive(Error, Debug, PartialEq, Eq)]
pub enum CompileError {
    #[error("{0}")]
    Lex(Diagnostic),

    #[error("{0}")]
    Parse(Diagnostic),

    #[error("{0}")]
    Semantic(Diagnostic),
}

impl CompileError {
    pub fn diagnostic(&self) -> &Diagnostic {
        match self {
            CompileError::Lex(d) | CompileError::Parse(d) | CompileError::Semantic(d) => d,
        }
    }
}

pub type Result<T> = std::result::Result<T, CompileError>;

#[cfg(test)]
mod tests {
    use super::*;
    use crate::diagnostic::DiagnosticBuilder;

    #[test]
    fn lex_error_display_is_message() {
        let diag = DiagnosticBuilder::error("invalid token").build();
        let err = CompileError::Lex(diag);
        assert_eq!(err.to_string(), "invalid token");
    }

    #[test]
    fn diagnostic_accessor_round_trips() {
        let diag = DiagnosticBuilder::error("undefined variable").build();
        let err = CompileError::Semantic(diag.clone());
        assert_eq!(err.diagnostic(), &diag);
    }
}
