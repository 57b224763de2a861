//! `stmt` and `declaration`.

use subc_lex::TokenKind;
use subc_util::Result;

use crate::ast::{Stmt, Variable};
use crate::Parser;

impl Parser {
    /// ```text
    /// stmt = "return" expr ";"
    ///      | "if" "(" expr ")" stmt ("else" stmt)?
    ///      | "while" "(" expr ")" stmt
    ///      | "for" "(" expr? ";" expr? ";" expr? ")" stmt
    ///      | "{" stmt* "}"
    ///      | declaration
    ///      | expr ";"
    /// ```
    pub(crate) fn stmt(&mut self) -> Result<Stmt> {
        if self.consume(TokenKind::Return) {
            let value = self.expr()?;
            self.expect(TokenKind::Semicolon)?;
            return Ok(Stmt::Return(value));
        }

        if self.consume(TokenKind::If) {
            self.expect(TokenKind::LParen)?;
            let cond = self.expr()?;
            self.expect(TokenKind::RParen)?;
            let then_branch = Box::new(self.stmt()?);
            let else_branch = if self.consume(TokenKind::Else) {
                Some(Box::new(self.stmt()?))
            } else {
                None
            };
            return Ok(Stmt::If {
                cond,
                then_branch,
                else_branch,
            });
        }

        if self.consume(TokenKind::While) {
            self.expect(TokenKind::LParen)?;
            let cond = self.expr()?;
            self.expect(TokenKind::RParen)?;
            let body = Box::new(self.stmt()?);
            return Ok(Stmt::While { cond, body });
        }

        if self.consume(TokenKind::For) {
            self.expect(TokenKind::LParen)?;
            let init = if !self.peek(TokenKind::Semicolon) {
                Some(self.expr()?)
            } else {
                None
            };
            self.expect(TokenKind::Semicolon)?;
            let cond = if !self.peek(TokenKind::Semicolon) {
                Some(self.expr()?)
            } else {
                None
            };
            self.expect(TokenKind::Semicolon)?;
            let inc = if !self.peek(TokenKind::RParen) {
                Some(self.expr()?)
            } else {
                None
            };
            self.expect(TokenKind::RParen)?;
            let body = Box::new(self.stmt()?);
            return Ok(Stmt::For { init, cond, inc, body });
        }

        if self.consume(TokenKind::LBrace) {
            let mut stmts = Vec::new();
            while !self.consume(TokenKind::RBrace) {
                stmts.push(self.stmt()?);
            }
            return Ok(Stmt::Block(stmts));
        }

        if self.peek(TokenKind::Int) {
            return self.declaration();
        }

        let value = self.expr()?;
        self.expect(TokenKind::Semicolon)?;
        Ok(Stmt::ExprStmt(value))
    }

    /// `declaration = basetype ident type-suffix ("=" expr)? ";"`
    ///
    /// A declaration with no initializer still registers the variable (its
    /// frame slot is reserved by the offset-assignment pass) but emits no
    /// assignment code.
    fn declaration(&mut self) -> Result<Stmt> {
        let base = self.basetype()?;
        let (name, _) = self.expect_ident()?;
        let ty = self.type_suffix(base)?;
        let var = Variable::new_local(name, ty);
        self.locals.push(var.clone());

        if self.consume(TokenKind::Semicolon) {
            return Ok(Stmt::Declaration { var, init: None });
        }
        self.expect(TokenKind::Assign)?;
        let init = self.expr()?;
        self.expect(TokenKind::Semicolon)?;
        Ok(Stmt::Declaration {
            var,
            init: Some(init),
        })
    }
}

#[cfg(test)]
mod tests {
    use subc_lex::Lexer;

    use super::*;
    use crate::Parser as P;

    fn parse_stmt(src: &str) -> Stmt {
        let tokens = Lexer::tokenize(src).unwrap();
        let mut parser = P::new(tokens);
        parser.stmt().unwrap()
    }

    #[test]
    fn return_statement() {
        assert!(matches!(parse_stmt("return 1;"), Stmt::Return(_)));
    }

    #[test]
    fn if_without_else() {
        let s = parse_stmt("if (1) return 1;");
        match s {
            Stmt::If { else_branch, .. } => assert!(else_branch.is_none()),
            other => panic!("expected If, got {:?}", other),
        }
    }

    #[test]
    fn if_with_else() {
        let s = parse_stmt("if (1) return 1; else return 2;");
        match s {
            Stmt::If { else_branch, .. } => assert!(else_branch.is_some()),
            other => panic!("expected If, got {:?}", other),
        }
    }

    #[test]
    fn for_with_all_clauses_empty() {
        let s = parse_stmt("for (;;) return 1;");
        match s {
            Stmt::For { init, cond, inc, .. } => {
                assert!(init.is_none());
                assert!(cond.is_none());
                assert!(inc.is_none());
            }
            other => panic!("expected For, got {:?}", other),
        }
    }

    #[test]
    fn declaration_without_initializer_registers_variable() {
        let tokens = Lexer::tokenize("int x; return 0;").unwrap();
        let mut parser = P::new(tokens);
        let s = parser.stmt().unwrap();
        assert!(matches!(
            s,
            Stmt::Declaration { init: None, .. }
        ));
        assert_eq!(parser.locals.len(), 1);
    }

    #[test]
    fn declaration_with_array_suffix() {
        let tokens = Lexer::tokenize("int a[3]; return 0;").unwrap();
        let mut parser = P::new(tokens);
        let s = parser.stmt().unwrap();
        match s {
            Stmt::Declaration { var, .. } => assert_eq!(var.ty, crate::ast::Type::Int.array_of(3)),
            other => panic!("expected Declaration, got {:?}", other),
        }
    }
}
