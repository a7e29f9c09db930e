//! Expression parsing and typing
//!
//! # Grammar
//!
//! ```text
//! expression        ::= simple_expression [ relop simple_expression ]
//! simple_expression ::= [ + | - ] term { addop term }
//! term              ::= factor { mulop factor }
//! factor            ::= id [ [ expression ] ] | num | ( expression ) | NOT factor
//! ```
//!
//! Each method returns the [`ValueType`] of what it recognized. Operator
//! diagnostics are stamped on the operator token; reference diagnostics on
//! the identifier.

use super::parse::Parser;
use super::terminals::*;
use super::token::{Attribute, Token};
use crate::semantic::types::{self, Access, ValueType};

impl Parser {
    pub(crate) fn expression(&mut self) -> ValueType {
        self.rule(EXPRESSION_FOLLOW, ValueType::Error, |p| {
            if !p.at_any(EXPRESSION_FIRST) {
                return Err(p.expected(EXPRESSION_FIRST));
            }
            let left = p.simple_expression();
            if !p.at(RELOP) {
                return Ok(left);
            }

            let op = p.match_token(RELOP)?;
            let right = p.simple_expression();
            let Some(Attribute::Relop(relop)) = op.attribute else {
                return Ok(ValueType::Error);
            };
            Ok(p.check(types::relational(left, relop, right), &op))
        })
    }

    fn simple_expression(&mut self) -> ValueType {
        self.rule(SIMPLE_EXPRESSION_FOLLOW, ValueType::Error, |p| {
            let mut acc = if p.at_any(&[PLUS, MINUS]) {
                let sign = p.match_token(ADDOP)?;
                let term = p.term();
                p.check(types::signed(term), &sign)
            } else {
                p.term()
            };

            while p.at(ADDOP) {
                let op = p.match_token(ADDOP)?;
                let right = p.term();
                acc = match op.attribute {
                    Some(Attribute::Addop(addop)) => p.check(types::additive(acc, addop, right), &op),
                    _ => ValueType::Error,
                };
            }
            Ok(acc)
        })
    }

    fn term(&mut self) -> ValueType {
        self.rule(TERM_FOLLOW, ValueType::Error, |p| {
            let mut acc = p.factor();
            while p.at(MULOP) {
                let op = p.match_token(MULOP)?;
                let right = p.factor();
                acc = match op.attribute {
                    Some(Attribute::Mulop(mulop)) => {
                        p.check(types::multiplicative(acc, mulop, right), &op)
                    }
                    _ => ValueType::Error,
                };
            }
            Ok(acc)
        })
    }

    fn factor(&mut self) -> ValueType {
        self.rule(FACTOR_FOLLOW, ValueType::Error, |p| {
            if p.at(ID) {
                let id = p.match_token(ID)?;
                let declared = p.resolve(&id);
                let index = if p.at(OPEN_BRACKET) {
                    p.match_token(OPEN_BRACKET)?;
                    let index = p.expression();
                    p.match_token(CLOSE_BRACKET)?;
                    index
                } else {
                    ValueType::None
                };
                return Ok(p.check(
                    types::reference(&id.lexeme, declared, index, Access::Load),
                    &id,
                ));
            }

            if p.at(NUM) {
                let num = p.match_token(NUM)?;
                return Ok(number_type(&num));
            }

            if p.at(OPEN_PAREN) {
                p.match_token(OPEN_PAREN)?;
                let inner = p.expression();
                p.match_token(CLOSE_PAREN)?;
                return Ok(inner);
            }

            if p.at(NOT) {
                let not = p.match_token(NOT)?;
                let operand = p.factor();
                return Ok(p.check(types::negation(operand), &not));
            }

            Err(p.expected(FACTOR_FIRST))
        })
    }
}

/// Literals with a fraction are real; everything else is an integer.
fn number_type(num: &Token) -> ValueType {
    if num.lexeme.contains('.') {
        ValueType::Real
    } else {
        ValueType::Int
    }
}
