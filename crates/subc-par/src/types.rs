//! `basetype` and `type-suffix` grammar.

use subc_lex::TokenKind;
use subc_util::Result;

use crate::ast::Type;
use crate::Parser;

impl Parser {
    /// `basetype = "int" "*"*`
    pub(crate) fn basetype(&mut self) -> Result<Type> {
        self.expect(TokenKind::Int)?;
        let mut ty = Type::Int;
        while self.consume(TokenKind::Star) {
            ty = ty.pointer_to();
        }
        Ok(ty)
    }

    /// `type-suffix = ("[" num "]" type-suffix)?`
    ///
    /// Recurses before wrapping, so `int x[2][3]` parses the inner `[3]`
    /// first and yields `Array(Array(Int, 3), 2)`: two elements, each an
    /// array of three ints.
    pub(crate) fn type_suffix(&mut self, base: Type) -> Result<Type> {
        if self.consume(TokenKind::LBracket) {
            let len = self.expect_number()?;
            self.expect(TokenKind::RBracket)?;
            let inner = self.type_suffix(base)?;
            Ok(inner.array_of(len as usize))
        } else {
            Ok(base)
        }
    }
}
