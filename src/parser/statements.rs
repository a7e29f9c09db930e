//! Statement parsing
//!
//! # Grammar
//!
//! ```text
//! compound_statement ::= BEGIN [ statement_list ] END
//! statement_list     ::= statement { ; statement }
//! statement          ::= variable := expression
//!                      | compound_statement
//!                      | IF expression THEN statement [ ELSE statement ]
//!                      | WHILE expression DO statement
//!                      | CALL id [ ( expression_list ) ]
//! variable           ::= id [ [ expression ] ]
//! expression_list    ::= expression { , expression }
//! ```
//!
//! The dangling `else` binds to the nearest `if`.

use super::parse::Parser;
use super::terminals::*;
use crate::semantic::types::{self, Access, ValueType};

impl Parser {
    pub(crate) fn compound_statement(&mut self) {
        self.rule(&[DOT, SEMICOLON, END, ELSE], (), |p| {
            p.match_token(BEGIN)?;
            if p.at_any(STATEMENT_FIRST) {
                p.statement_list();
            } else if !p.at(END) {
                let mut wanted = vec![END];
                wanted.extend_from_slice(STATEMENT_FIRST);
                return Err(p.expected(&wanted));
            }
            p.match_token(END)?;
            Ok(())
        })
    }

    fn statement_list(&mut self) {
        self.rule(&[END], (), |p| {
            p.statement();
            while p.at(SEMICOLON) {
                p.match_token(SEMICOLON)?;
                p.statement();
            }
            if !p.at(END) {
                return Err(p.expected(&[SEMICOLON, END]));
            }
            Ok(())
        })
    }

    /// Parse one statement. Returns the checked type of an assignment and
    /// [`ValueType::None`] for every other statement.
    pub(crate) fn statement(&mut self) -> ValueType {
        self.rule(STATEMENT_FOLLOW, ValueType::Error, |p| {
            if p.at(ID) {
                let target = p.variable();
                let assign = p.match_token(ASSIGN)?;
                let value = p.expression();
                return Ok(p.check(types::assignment(target, value), &assign));
            }

            if p.at(BEGIN) {
                p.compound_statement();
            } else if p.at(IF) {
                let keyword = p.match_token(IF)?;
                let condition = p.expression();
                p.check(types::condition(condition), &keyword);
                p.match_token(THEN)?;
                p.statement();
                if p.at(ELSE) {
                    p.match_token(ELSE)?;
                    p.statement();
                }
            } else if p.at(WHILE) {
                let keyword = p.match_token(WHILE)?;
                let condition = p.expression();
                p.check(types::condition(condition), &keyword);
                p.match_token(DO)?;
                p.statement();
            } else if p.at(CALL) {
                p.procedure_statement();
            } else {
                return Err(p.expected(STATEMENT_FIRST));
            }
            Ok(ValueType::None)
        })
    }

    /// Assignment target: a scalar variable or an indexed array element.
    fn variable(&mut self) -> ValueType {
        self.rule(&[ASSIGN], ValueType::Error, |p| {
            let id = p.match_token(ID)?;
            let declared = p.resolve(&id);

            let index = if p.at(OPEN_BRACKET) {
                p.match_token(OPEN_BRACKET)?;
                let index = p.expression();
                p.match_token(CLOSE_BRACKET)?;
                index
            } else if p.at(ASSIGN) {
                ValueType::None
            } else {
                return Err(p.expected(&[OPEN_BRACKET, ASSIGN]));
            };

            Ok(p.check(
                types::reference(&id.lexeme, declared, index, Access::Store),
                &id,
            ))
        })
    }

    /// procedure_statement ::= CALL id [ ( expression_list ) ]
    fn procedure_statement(&mut self) {
        self.rule(STATEMENT_FOLLOW, (), |p| {
            p.match_token(CALL)?;
            let id = p.match_token(ID)?;

            let known = match p.scopes.resolve_scope_name(&id.lexeme) {
                Ok(_) => true,
                Err(message) => {
                    p.semantic_error(message, &id);
                    false
                }
            };
            let formals: Vec<ValueType> = p
                .scopes
                .formal_parameters_of(&id.lexeme)
                .into_iter()
                .map(|symbol| symbol.value_type)
                .collect();
            let checked = if known { Some(formals.as_slice()) } else { None };

            let seen = if p.at(OPEN_PAREN) {
                p.match_token(OPEN_PAREN)?;
                let seen = p.expression_list(checked);
                p.match_token(CLOSE_PAREN)?;
                seen
            } else if p.at_any(STATEMENT_FOLLOW) {
                Some(0)
            } else {
                let mut wanted = vec![OPEN_PAREN];
                wanted.extend_from_slice(STATEMENT_FOLLOW);
                return Err(p.expected(&wanted));
            };

            if let (true, Some(seen)) = (known, seen) {
                if seen != formals.len() {
                    p.semantic_error(
                        format!(
                            "procedure {} called with {} arguments but expects {}",
                            id.lexeme,
                            seen,
                            formals.len()
                        ),
                        &id,
                    );
                }
            }
            Ok(())
        })
    }

    /// Parse call arguments, checking each against `formals` by position.
    /// Returns the argument count, or `None` if the list was abandoned.
    fn expression_list(&mut self, formals: Option<&[ValueType]>) -> Option<usize> {
        self.rule(&[CLOSE_PAREN], None, |p| {
            let mut seen = 0;
            loop {
                let start = p.lookahead.clone();
                let actual = p.expression();
                seen += 1;

                if let Some(&formal) = formals.and_then(|formals| formals.get(seen - 1)) {
                    if let Err(message) = types::argument(seen, formal, actual) {
                        p.semantic_error(message, &start);
                    }
                }

                if p.at(COMMA) {
                    p.match_token(COMMA)?;
                    continue;
                }
                if p.at(CLOSE_PAREN) {
                    return Ok(Some(seen));
                }
                return Err(p.expected(&[COMMA, CLOSE_PAREN]));
            }
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parser::parse::parser_for;
    use crate::parser::token::{Token, TokenKind};

    fn messages(tokens: &[Token], kind: TokenKind) -> Vec<String> {
        tokens
            .iter()
            .filter(|t| t.kind == kind)
            .filter_map(|t| t.message.clone())
            .collect()
    }

    #[test]
    fn test_assignment_type_is_reported() {
        let mut parser = parser_for(" x := 1 ;");
        parser.scopes.push_scope("p").unwrap();
        parser.scopes.declare_symbol("x", ValueType::Int, 4).unwrap();
        assert_eq!(parser.statement(), ValueType::Int);
        assert!(parser.at(SEMICOLON));
    }

    #[test]
    fn test_undeclared_target_checks_as_error() {
        let mut parser = parser_for(" x := 1 ;");
        parser.scopes.push_scope("p").unwrap();
        assert_eq!(parser.statement(), ValueType::Error);
        let errors = messages(&parser.tokens, TokenKind::SemanticError);
        assert_eq!(errors.len(), 1);
        assert!(errors[0].starts_with("no variable named x"));
    }

    #[test]
    fn test_condition_must_be_boolean() {
        let mut parser = parser_for(" while x do x := x - 1 ;");
        parser.scopes.push_scope("p").unwrap();
        parser.scopes.declare_symbol("x", ValueType::Int, 4).unwrap();
        parser.statement();
        let errors = messages(&parser.tokens, TokenKind::SemanticError);
        assert_eq!(errors, vec!["condition must be boolean, found integer"]);
    }

    #[test]
    fn test_dangling_else_binds_inner() {
        let mut parser = parser_for(
            " if a > 0 then if a > 1 then a := 1 else a := 2 ;",
        );
        parser.scopes.push_scope("p").unwrap();
        parser.scopes.declare_symbol("a", ValueType::Int, 4).unwrap();
        parser.statement();
        assert!(!parser.tokens.iter().any(|t| t.is_diagnostic()));
        assert!(parser.at(SEMICOLON));
    }

    #[test]
    fn test_missing_then_recovers_at_statement_follow() {
        let mut parser = parser_for(" if a > 0 a := 1 ; a := 2 ;");
        parser.scopes.push_scope("p").unwrap();
        parser.scopes.declare_symbol("a", ValueType::Int, 4).unwrap();
        parser.statement();
        assert_eq!(messages(&parser.tokens, TokenKind::SyntaxError).len(), 1);
        assert!(parser.at(SEMICOLON));
        parser.match_token(SEMICOLON).unwrap();
        assert_eq!(parser.statement(), ValueType::Int);
    }

    #[test]
    fn test_call_arity_mismatch() {
        let mut parser = parser_for(" call foo ( 1 , 2 ) ; x := 3 ;");
        parser.scopes.push_scope("p").unwrap();
        parser.scopes.declare_symbol("x", ValueType::Int, 4).unwrap();
        parser.scopes.push_scope("foo").unwrap();
        parser.scopes.declare_symbol("a", ValueType::ParamInt, 0).unwrap();
        parser.scopes.pop_scope();

        parser.statement();
        let errors = messages(&parser.tokens, TokenKind::SemanticError);
        assert_eq!(errors, vec!["procedure foo called with 2 arguments but expects 1"]);

        parser.match_token(SEMICOLON).unwrap();
        assert_eq!(parser.statement(), ValueType::Int);
    }

    #[test]
    fn test_call_argument_types_checked_by_position() {
        let mut parser = parser_for(" call f ( 1.5 , v ) ;");
        parser.scopes.push_scope("p").unwrap();
        parser
            .scopes
            .declare_symbol("v", ValueType::ArrayOfInt, 40)
            .unwrap();
        parser.scopes.push_scope("f").unwrap();
        parser.scopes.declare_symbol("a", ValueType::ParamInt, 0).unwrap();
        parser
            .scopes
            .declare_symbol("b", ValueType::ParamArrayInt, 0)
            .unwrap();
        parser.scopes.pop_scope();

        parser.statement();
        let errors = messages(&parser.tokens, TokenKind::SemanticError);
        assert_eq!(errors, vec!["argument 1 has type real, expected integer"]);
    }

    #[test]
    fn test_unknown_procedure_reported_once() {
        let mut parser = parser_for(" call g ( 1 ) ;");
        parser.scopes.push_scope("p").unwrap();
        parser.statement();
        let errors = messages(&parser.tokens, TokenKind::SemanticError);
        assert_eq!(errors.len(), 1);
        assert!(errors[0].contains("no program or procedure named g"));
    }

    #[test]
    fn test_whole_array_is_not_assignable() {
        let mut parser = parser_for(" v := 1 ;");
        parser.scopes.push_scope("p").unwrap();
        parser
            .scopes
            .declare_symbol("v", ValueType::ArrayOfInt, 40)
            .unwrap();
        assert_eq!(parser.statement(), ValueType::Error);
    }
}
