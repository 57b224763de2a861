//! `expr` through `primary`, with type attribution interleaved into
//! construction: every node built here already carries its [`Type`], and
//! `+`/`-` are rewritten into pointer-aware forms as they're built (see
//! `new_add`/`new_sub`).

use subc_lex::TokenKind;
use subc_util::{Result, Span};

use crate::ast::{BinOp, Expr, ExprKind, Type};
use crate::Parser;

impl Parser {
    /// `expr = assign`
    pub(crate) fn expr(&mut self) -> Result<Expr> {
        self.assign()
    }

    /// `assign = equality ("=" assign)?` (right-associative)
    fn assign(&mut self) -> Result<Expr> {
        let node = self.equality()?;
        if self.consume(TokenKind::Assign) {
            if node.ty.is_array() {
                return Err(self.semantic_error(node.span, "cannot assign to an array".to_string()));
            }
            let rhs = self.assign()?;
            let ty = node.ty.clone();
            let span = node.span.merge(rhs.span);
            return Ok(Expr::new(
                ExprKind::Assign(Box::new(node), Box::new(rhs)),
                ty,
                span,
            ));
        }
        Ok(node)
    }

    /// `equality = relational (("==" | "!=") relational)*`
    fn equality(&mut self) -> Result<Expr> {
        let mut node = self.relational()?;
        loop {
            if self.consume(TokenKind::EqEq) {
                let rhs = self.relational()?;
                node = self.new_binary(BinOp::Eq, node, rhs);
            } else if self.consume(TokenKind::NotEq) {
                let rhs = self.relational()?;
                node = self.new_binary(BinOp::Ne, node, rhs);
            } else {
                return Ok(node);
            }
        }
    }

    /// `relational = add (("<" | "<=" | ">" | ">=") add)*`
    ///
    /// `>` and `>=` are rewritten by swapping operands, so the generator
    /// only ever has to emit `<` and `<=`.
    fn relational(&mut self) -> Result<Expr> {
        let mut node = self.add()?;
        loop {
            if self.consume(TokenKind::Lt) {
                let rhs = self.add()?;
                node = self.new_binary(BinOp::Lt, node, rhs);
            } else if self.consume(TokenKind::Le) {
                let rhs = self.add()?;
                node = self.new_binary(BinOp::Le, node, rhs);
            } else if self.consume(TokenKind::Gt) {
                let rhs = self.add()?;
                node = self.new_binary(BinOp::Lt, rhs, node);
            } else if self.consume(TokenKind::Ge) {
                let rhs = self.add()?;
                node = self.new_binary(BinOp::Le, rhs, node);
            } else {
                return Ok(node);
            }
        }
    }

    /// All-Int-typed binary node: equality, relational, and (post-dispatch)
    /// plain integer `*`/`/`/`+`/`-`.
    fn new_binary(&self, op: BinOp, lhs: Expr, rhs: Expr) -> Expr {
        let span = lhs.span.merge(rhs.span);
        Expr::new(ExprKind::Binary(op, Box::new(lhs), Box::new(rhs)), Type::Int, span)
    }

    /// `add = mul (("+" | "-") mul)*`, with pointer-arithmetic rewriting.
    fn add(&mut self) -> Result<Expr> {
        let mut node = self.mul()?;
        loop {
            if self.consume(TokenKind::Plus) {
                let rhs = self.mul()?;
                node = self.new_add(node, rhs)?;
            } else if self.consume(TokenKind::Minus) {
                let rhs = self.mul()?;
                node = self.new_sub(node, rhs)?;
            } else {
                return Ok(node);
            }
        }
    }

    /// Dispatches `+` to `Add`, `PtrAdd` (scaled by the pointee's size at
    /// codegen time), or an error, following the lhs/rhs type table.
    fn new_add(&self, lhs: Expr, rhs: Expr) -> Result<Expr> {
        let span = lhs.span.merge(rhs.span);
        if lhs.ty.is_integer() && rhs.ty.is_integer() {
            return Ok(self.new_binary(BinOp::Add, lhs, rhs));
        }
        if lhs.ty.base().is_some() && rhs.ty.is_integer() {
            let ty = lhs.ty.clone();
            return Ok(Expr::new(
                ExprKind::Binary(BinOp::PtrAdd, Box::new(lhs), Box::new(rhs)),
                ty,
                span,
            ));
        }
        if lhs.ty.is_integer() && rhs.ty.base().is_some() {
            let ty = rhs.ty.clone();
            return Ok(Expr::new(
                ExprKind::Binary(BinOp::PtrAdd, Box::new(rhs), Box::new(lhs)),
                ty,
                span,
            ));
        }
        Err(self.semantic_error(span, "invalid operands to +".to_string()))
    }

    /// Dispatches `-` to `Sub`, `PtrSub`, `PtrDiff`, or an error.
    fn new_sub(&self, lhs: Expr, rhs: Expr) -> Result<Expr> {
        let span = lhs.span.merge(rhs.span);
        if lhs.ty.is_integer() && rhs.ty.is_integer() {
            return Ok(self.new_binary(BinOp::Sub, lhs, rhs));
        }
        if lhs.ty.base().is_some() && rhs.ty.is_integer() {
            let ty = lhs.ty.clone();
            return Ok(Expr::new(
                ExprKind::Binary(BinOp::PtrSub, Box::new(lhs), Box::new(rhs)),
                ty,
                span,
            ));
        }
        if lhs.ty.base().is_some() && rhs.ty.base().is_some() {
            return Ok(Expr::new(
                ExprKind::Binary(BinOp::PtrDiff, Box::new(lhs), Box::new(rhs)),
                Type::Int,
                span,
            ));
        }
        Err(self.semantic_error(span, "invalid operands to -".to_string()))
    }

    /// `mul = unary (("*" | "/") unary)*`
    fn mul(&mut self) -> Result<Expr> {
        let mut node = self.unary()?;
        loop {
            if self.consume(TokenKind::Star) {
                let rhs = self.unary()?;
                node = self.new_binary(BinOp::Mul, node, rhs);
            } else if self.consume(TokenKind::Slash) {
                let rhs = self.unary()?;
                node = self.new_binary(BinOp::Div, node, rhs);
            } else {
                return Ok(node);
            }
        }
    }

    /// `unary = ("+" | "-" | "*" | "&" | "sizeof") unary | postfix`
    fn unary(&mut self) -> Result<Expr> {
        if self.consume(TokenKind::Plus) {
            return self.unary();
        }
        if self.consume(TokenKind::Minus) {
            let rhs = self.unary()?;
            let zero = Expr::new(ExprKind::Number(0), Type::Int, rhs.span);
            return self.new_sub(zero, rhs);
        }
        if self.consume(TokenKind::Amp) {
            let operand = self.unary()?;
            let span = operand.span;
            let ty = match &operand.ty {
                // &array collapses to a pointer to the element type, not a
                // pointer to the array.
                Type::Array(base, _) => (**base).clone().pointer_to(),
                other => other.clone().pointer_to(),
            };
            return Ok(Expr::new(ExprKind::Addr(Box::new(operand)), ty, span));
        }
        if self.consume(TokenKind::Star) {
            let operand = self.unary()?;
            let span = operand.span;
            let ty = operand
                .ty
                .base()
                .cloned()
                .ok_or_else(|| self.semantic_error(span, "dereference of a non-pointer".to_string()))?;
            return Ok(Expr::new(ExprKind::Deref(Box::new(operand)), ty, span));
        }
        if self.consume(TokenKind::Sizeof) {
            let start = self.current_span();
            let operand = self.unary()?;
            let span = start.merge(operand.span);
            return Ok(Expr::new(ExprKind::Number(operand.ty.size()), Type::Int, span));
        }
        self.postfix()
    }

    /// `postfix = primary ("[" expr "]")*`, desugaring `e[i]` to `*(e + i)`.
    fn postfix(&mut self) -> Result<Expr> {
        let mut node = self.primary()?;
        while self.consume(TokenKind::LBracket) {
            let index = self.expr()?;
            self.expect(TokenKind::RBracket)?;
            let span: Span = node.span.merge(index.span);
            let added = self.new_add(node, index)?;
            let ty = added
                .ty
                .base()
                .cloned()
                .ok_or_else(|| self.semantic_error(span, "subscript of a non-pointer".to_string()))?;
            node = Expr::new(ExprKind::Deref(Box::new(added)), ty, span);
        }
        Ok(node)
    }

    /// `primary = "(" expr ")" | ident ("(" args? ")")? | num`
    fn primary(&mut self) -> Result<Expr> {
        if self.consume(TokenKind::LParen) {
            let node = self.expr()?;
            self.expect(TokenKind::RParen)?;
            return Ok(node);
        }

        if let Some((name, span)) = self.consume_ident() {
            if self.consume(TokenKind::LParen) {
                let args = self.func_args()?;
                return Ok(Expr::new(ExprKind::Call(name, args), Type::Int, span));
            }
            let var = self
                .find_var(name)
                .ok_or_else(|| self.semantic_error(span, format!("undefined variable '{}'", name)))?;
            let ty = var.ty.clone();
            return Ok(Expr::new(ExprKind::Var(var), ty, span));
        }

        let span = self.current_span();
        let value = self.expect_number()?;
        Ok(Expr::new(ExprKind::Number(value), Type::Int, span))
    }

    /// `args = assign ("," assign)*`
    fn func_args(&mut self) -> Result<Vec<Expr>> {
        if self.consume(TokenKind::RParen) {
            return Ok(Vec::new());
        }
        let mut args = vec![self.assign()?];
        while self.consume(TokenKind::Comma) {
            args.push(self.assign()?);
        }
        self.expect(TokenKind::RParen)?;
        Ok(args)
    }
}

#[cfg(test)]
mod tests {
    use subc_lex::Lexer;

    use super::*;
    use crate::Parser as P;

    fn parse_expr(src: &str) -> Expr {
        let tokens = Lexer::tokenize(src).unwrap();
        let mut parser = P::new(tokens);
        parser.expr().unwrap()
    }

    #[test]
    fn integer_addition_is_add() {
        let e = parse_expr("1+2");
        assert!(matches!(e.kind, ExprKind::Binary(BinOp::Add, ..)));
        assert_eq!(e.ty, Type::Int);
    }

    #[test]
    fn greater_than_is_rewritten_to_less_than() {
        let e = parse_expr("1>2");
        match e.kind {
            ExprKind::Binary(BinOp::Lt, lhs, rhs) => {
                assert!(matches!(lhs.kind, ExprKind::Number(2)));
                assert!(matches!(rhs.kind, ExprKind::Number(1)));
            }
            other => panic!("expected rewritten Lt, got {:?}", other),
        }
    }

    #[test]
    fn unary_plus_is_a_no_op() {
        let e = parse_expr("+5");
        assert!(matches!(e.kind, ExprKind::Number(5)));
    }

    #[test]
    fn unary_minus_becomes_zero_minus_operand() {
        let e = parse_expr("-5");
        match e.kind {
            ExprKind::Binary(BinOp::Sub, lhs, rhs) => {
                assert!(matches!(lhs.kind, ExprKind::Number(0)));
                assert!(matches!(rhs.kind, ExprKind::Number(5)));
            }
            other => panic!("expected Sub, got {:?}", other),
        }
    }

    #[test]
    fn sizeof_int_is_eight() {
        let e = parse_expr("sizeof(1)");
        assert!(matches!(e.kind, ExprKind::Number(8)));
    }

    #[test]
    fn sizeof_of_address_of_expr_is_eight() {
        let e = parse_expr("sizeof(1+1)");
        assert!(matches!(e.kind, ExprKind::Number(8)));
    }
}
