//! subc-drv - the compiler driver.
//!
//! Wires the three pipeline stages together (`subc-lex` -> `subc-par` ->
//! `subc-gen`) behind a single [`compile`] entry point, and exposes the
//! `subcc` CLI surface in [`cli`].

pub mod cli;

use subc_gen::AsmGenerator;
use subc_lex::Lexer;
use subc_par::Parser;
use subc_util::Result;

/// Runs the full pipeline over one source string and returns the emitted
/// assembly listing, or the first diagnostic any stage raised.
pub fn compile(source: &str) -> Result<String> {
    let tokens = {
        let _span = tracing::debug_span!("tokenize").entered();
        Lexer::tokenize(source)?
    };
    let program = {
        let _span = tracing::debug_span!("parse").entered();
        Parser::parse(tokens)?
    };
    let asm = {
        let _span = tracing::debug_span!("codegen").entered();
        AsmGenerator::generate(&program)
    };
    tracing::debug!(bytes = asm.len(), "assembly emitted");
    Ok(asm)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn compiles_return_zero() {
        let asm = compile("int main(){ return 0; }").unwrap();
        assert!(asm.contains(".global main"));
    }

    #[test]
    fn surfaces_the_first_diagnostic_on_failure() {
        let err = compile("int main(){ return x; }").unwrap_err();
        assert!(matches!(err, subc_util::CompileError::Semantic(_)));
    }

    #[test]
    fn lexical_error_is_surfaced() {
        let err = compile("int main(){ return @; }").unwrap_err();
        assert!(matches!(err, subc_util::CompileError::Lex(_)));
    }
}
