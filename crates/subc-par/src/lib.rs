//! subc-par - recursive-descent parser with interleaved type attribution.
//!
//! Consumes the token stream produced by `subc-lex` through a small cursor
//! interface and builds a typed [`ast::Program`]: an ordered list of
//! functions plus an ordered list of globals. There is no separate
//! type-checking pass — every expression node is attributed with its
//! [`ast::Type`] as it's constructed (see `expr.rs`), which is what lets
//! `+`/`-` be rewritten into pointer-aware forms at parse time.

pub mod ast;
mod expr;
mod stmt;
mod types;

use std::rc::Rc;

use subc_lex::{Token, TokenKind};
use subc_util::{CompileError, DiagnosticBuilder, Result, Span, Symbol};

use ast::{Function, Program, Variable};

pub struct Parser {
    tokens: Vec<Token>,
    pos: usize,
    /// All stack-resident variables of the function currently being parsed,
    /// params included, in insertion order. Cleared at the start of each
    /// function and drained into `Function::locals` at its end.
    locals: Vec<Rc<Variable>>,
    globals: Vec<Rc<Variable>>,
}

impl Parser {
    pub fn new(tokens: Vec<Token>) -> Self {
        Self {
            tokens,
            pos: 0,
            locals: Vec::new(),
            globals: Vec::new(),
        }
    }

    /// Tokenizes are assumed complete (ending in `Eof`); parses the whole
    /// program in one pass.
    pub fn parse(tokens: Vec<Token>) -> Result<Program> {
        let mut parser = Self::new(tokens);
        parser.parse_program()
    }

    // --- cursor primitives -------------------------------------------------

    fn current(&self) -> &Token {
        &self.tokens[self.pos]
    }

    fn current_span(&self) -> Span {
        self.current().span
    }

    fn peek(&self, kind: TokenKind) -> bool {
        self.current().kind == kind
    }

    fn consume(&mut self, kind: TokenKind) -> bool {
        if self.peek(kind) {
            self.pos += 1;
            true
        } else {
            false
        }
    }

    fn expect(&mut self, kind: TokenKind) -> Result<()> {
        if self.consume(kind) {
            Ok(())
        } else {
            Err(self.error_here(format!("expected {:?}", kind)))
        }
    }

    fn consume_ident(&mut self) -> Option<(Symbol, Span)> {
        if let TokenKind::Ident(sym) = self.current().kind {
            let span = self.current().span;
            self.pos += 1;
            Some((sym, span))
        } else {
            None
        }
    }

    fn expect_ident(&mut self) -> Result<(Symbol, Span)> {
        self.consume_ident()
            .ok_or_else(|| self.error_here("expected an identifier".to_string()))
    }

    fn expect_number(&mut self) -> Result<i64> {
        if let TokenKind::Number(value) = self.current().kind {
            self.pos += 1;
            Ok(value)
        } else {
            Err(self.error_here("expected a number".to_string()))
        }
    }

    fn at_eof(&self) -> bool {
        matches!(self.current().kind, TokenKind::Eof)
    }

    fn error_here(&self, message: String) -> CompileError {
        CompileError::Parse(DiagnosticBuilder::error(message).span(self.current_span()).build())
    }

    fn semantic_error(&self, span: Span, message: String) -> CompileError {
        CompileError::Semantic(DiagnosticBuilder::error(message).span(span).build())
    }

    // --- identifier resolution ----------------------------------------------

    /// Innermost local/parameter first, then globals; no block scoping.
    fn find_var(&self, name: Symbol) -> Option<Rc<Variable>> {
        self.locals
            .iter()
            .rev()
            .find(|v| v.name == name)
            .cloned()
            .or_else(|| self.globals.iter().find(|v| v.name == name).cloned())
    }

    // --- grammar: program, function, globals --------------------------------

    /// `program = (global-var | function)*`
    fn parse_program(&mut self) -> Result<Program> {
        let mut functions = Vec::new();
        while !self.at_eof() {
            let base = self.basetype()?;
            let (name, _) = self.expect_ident()?;
            if self.peek(TokenKind::LParen) {
                functions.push(self.function(name)?);
            } else {
                let ty = self.type_suffix(base)?;
                self.expect(TokenKind::Semicolon)?;
                self.globals.push(Variable::new_global(name, ty));
            }
        }
        Ok(Program {
            functions,
            globals: std::mem::take(&mut self.globals),
        })
    }

    /// `function = basetype ident "(" params? ")" "{" stmt* "}"`
    fn function(&mut self, name: Symbol) -> Result<Function> {
        self.locals.clear();
        self.expect(TokenKind::LParen)?;
        let params = self.read_func_params()?;
        self.expect(TokenKind::LBrace)?;

        let mut body = Vec::new();
        while !self.consume(TokenKind::RBrace) {
            body.push(self.stmt()?);
        }

        let locals = std::mem::take(&mut self.locals);
        let stack_size = assign_offsets(&locals);
        Ok(Function {
            name,
            params,
            locals,
            body,
            stack_size,
        })
    }

    /// `params = param ("," param)*`
    fn read_func_params(&mut self) -> Result<Vec<Rc<Variable>>> {
        if self.consume(TokenKind::RParen) {
            return Ok(Vec::new());
        }
        let mut params = vec![self.read_func_param()?];
        while !self.consume(TokenKind::RParen) {
            self.expect(TokenKind::Comma)?;
            params.push(self.read_func_param()?);
        }
        Ok(params)
    }

    /// `param = basetype ident`
    fn read_func_param(&mut self) -> Result<Rc<Variable>> {
        let ty = self.basetype()?;
        let (name, _) = self.expect_ident()?;
        let var = Variable::new_local(name, ty);
        self.locals.push(var.clone());
        Ok(var)
    }
}

/// Assigns each local/param a frame offset in insertion order and returns the
/// total stack size. Every `Type::size()` is already a multiple of 8, so the
/// running total needs no extra alignment, but the rounding is kept explicit
/// to make the invariant visible rather than relied upon implicitly.
fn assign_offsets(locals: &[Rc<Variable>]) -> i64 {
    let mut offset = 0i64;
    for var in locals {
        offset += var.ty.size();
        var.offset.set(offset);
    }
    let remainder = offset % 8;
    if remainder != 0 {
        offset += 8 - remainder;
    }
    offset
}

#[cfg(test)]
mod tests {
    use subc_lex::Lexer;

    use super::*;
    use crate::ast::{ExprKind, Stmt};

    fn parse(src: &str) -> Program {
        let tokens = Lexer::tokenize(src).unwrap();
        Parser::parse(tokens).unwrap()
    }

    #[test]
    fn parses_empty_main() {
        let program = parse("int main(){ return 0; }");
        assert_eq!(program.functions.len(), 1);
        assert_eq!(program.functions[0].name.as_str(), "main");
    }

    #[test]
    fn disambiguates_global_from_function() {
        let program = parse("int g; int main(){ return g; }");
        assert_eq!(program.globals.len(), 1);
        assert_eq!(program.globals[0].name.as_str(), "g");
        assert_eq!(program.functions.len(), 1);
    }

    #[test]
    fn function_params_are_locals_too() {
        let program = parse("int add(int a, int b){ return a+b; }");
        let f = &program.functions[0];
        assert_eq!(f.params.len(), 2);
        assert_eq!(f.locals.len(), 2);
    }

    #[test]
    fn stack_size_is_sum_of_local_sizes_and_multiple_of_eight() {
        let program = parse("int main(){ int a; int b; int c[3]; return 0; }");
        let f = &program.functions[0];
        // a (8) + b (8) + c (24) = 40
        assert_eq!(f.stack_size, 40);
        assert_eq!(f.stack_size % 8, 0);
    }

    #[test]
    fn offsets_assigned_are_nonzero_and_increasing() {
        let program = parse("int main(){ int a; int b; return 0; }");
        let f = &program.functions[0];
        let off_a = f.locals[0].offset.get();
        let off_b = f.locals[1].offset.get();
        assert!(off_a > 0 && off_b > off_a);
    }

    #[test]
    fn undefined_variable_is_a_semantic_error() {
        let tokens = Lexer::tokenize("int main(){ return x; }").unwrap();
        let err = Parser::parse(tokens).unwrap_err();
        assert!(matches!(err, CompileError::Semantic(_)));
    }

    #[test]
    fn recursive_call_parses_to_call_node() {
        let program = parse("int sum(int n){ return sum(n); } int main(){ return sum(1); }");
        let f = &program.functions[0];
        match &f.body[0] {
            Stmt::Return(e) => assert!(matches!(e.kind, ExprKind::Call(..))),
            other => panic!("expected Return, got {:?}", other),
        }
    }

    #[test]
    fn array_index_desugars_to_deref_of_ptradd() {
        let program = parse("int main(){ int a[3]; return a[1]; }");
        let f = &program.functions[0];
        match &f.body[1] {
            Stmt::Return(e) => assert!(matches!(e.kind, ExprKind::Deref(_))),
            other => panic!("expected Return, got {:?}", other),
        }
    }
}
