//! Program header, variable, type and procedure declarations
//!
//! # Grammar
//!
//! ```text
//! program            ::= PROGRAM id ( [ identifier_list ] ) ; program_tail
//! program_tail       ::= declarations program_tail_tail | program_tail_tail
//! program_tail_tail  ::= [ subprogram_decls ] compound_statement .
//! identifier_list    ::= id { , id }
//! declarations       ::= VAR id : type ; { VAR id : type ; }
//! type               ::= standard_type | ARRAY [ num .. num ] OF standard_type
//! standard_type      ::= INTEGER | REAL
//! subprogram_decls   ::= subprogram_decl ; { subprogram_decl ; }
//! subprogram_decl    ::= subprogram_head [ declarations ] [ subprogram_decls ]
//!                        compound_statement
//! subprogram_head    ::= PROCEDURE id [ arguments ] ;
//! arguments          ::= ( parameter_list )
//! parameter_list     ::= id : type { ; id : type }
//! ```
//!
//! Headers open scopes; variable and parameter declarations add symbols to
//! the innermost one and advance its activation-record offset.

use super::parse::Parser;
use super::terminals::*;
use super::token::Token;
use crate::semantic::types::{self, ValueType};

/// A declared type together with the storage it occupies.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct Declared {
    pub value_type: ValueType,
    pub width: usize,
}

impl Declared {
    const ERROR: Declared = Declared {
        value_type: ValueType::Error,
        width: 0,
    };

    fn scalar(value_type: ValueType) -> Self {
        Self {
            value_type,
            width: value_type.scalar_width(),
        }
    }
}

impl Parser {
    /// program ::= PROGRAM id ( [ identifier_list ] ) ; program_tail
    pub(crate) fn program(&mut self) {
        self.rule(&[], (), |p| {
            if !p.at(PROGRAM) {
                return Err(p.expected(&[PROGRAM]));
            }
            p.match_token(PROGRAM)?;
            let id = p.match_token(ID)?;
            p.open_scope(&id);
            p.match_token(OPEN_PAREN)?;
            if !p.at(CLOSE_PAREN) {
                p.identifier_list();
            }
            p.match_token(CLOSE_PAREN)?;
            p.match_token(SEMICOLON)?;
            p.program_tail();
            Ok(())
        })
    }

    fn program_tail(&mut self) {
        self.rule(&[], (), |p| {
            if p.at(VAR) {
                p.declarations();
            } else if !p.at_any(&[PROCEDURE, BEGIN]) {
                return Err(p.expected(&[VAR, PROCEDURE, BEGIN]));
            }
            p.program_tail_tail();
            Ok(())
        })
    }

    fn program_tail_tail(&mut self) {
        self.rule(&[], (), |p| {
            if p.at(PROCEDURE) {
                p.subprogram_declarations();
            } else if !p.at(BEGIN) {
                return Err(p.expected(&[PROCEDURE, BEGIN]));
            }
            p.compound_statement();
            p.match_token(DOT)?;
            Ok(())
        })
    }

    /// Program parameters: listed in the header, typed but not storable.
    fn identifier_list(&mut self) {
        self.rule(&[CLOSE_PAREN], (), |p| {
            let id = p.match_token(ID)?;
            p.declare(&id, ValueType::ProgramParam, 0);
            while p.at(COMMA) {
                p.match_token(COMMA)?;
                let id = p.match_token(ID)?;
                p.declare(&id, ValueType::ProgramParam, 0);
            }
            if !p.at(CLOSE_PAREN) {
                return Err(p.expected(&[COMMA, CLOSE_PAREN]));
            }
            Ok(())
        })
    }

    pub(crate) fn declarations(&mut self) {
        self.rule(&[PROCEDURE, BEGIN], (), |p| {
            if !p.at(VAR) {
                return Err(p.expected(&[VAR]));
            }
            loop {
                p.match_token(VAR)?;
                let id = p.match_token(ID)?;
                p.match_token(COLON)?;
                let declared = p.type_spec();
                p.match_token(SEMICOLON)?;
                p.declare(&id, declared.value_type, declared.width);

                if p.at(VAR) {
                    continue;
                }
                if p.at_any(&[PROCEDURE, BEGIN]) {
                    return Ok(());
                }
                return Err(p.expected(&[VAR, PROCEDURE, BEGIN]));
            }
        })
    }

    /// type ::= standard_type | ARRAY [ num .. num ] OF standard_type
    pub(crate) fn type_spec(&mut self) -> Declared {
        self.rule(&[SEMICOLON, CLOSE_PAREN], Declared::ERROR, |p| {
            if p.at_any(&[INTEGER, REAL]) {
                return Ok(Declared::scalar(p.standard_type()));
            }
            if !p.at(ARRAY) {
                return Err(p.expected(&[ARRAY, INTEGER, REAL]));
            }

            p.match_token(ARRAY)?;
            p.match_token(OPEN_BRACKET)?;
            let lower = p.match_token(NUM)?;
            p.match_token(DOT_DOT)?;
            let upper = p.match_token(NUM)?;
            p.match_token(CLOSE_BRACKET)?;
            p.match_token(OF)?;
            let element = p.standard_type();

            let Some((lb, ub)) = array_bounds(&lower, &upper) else {
                p.semantic_error(
                    format!(
                        "array bounds must be integers with lower <= upper, found {}..{}",
                        lower.lexeme, upper.lexeme
                    ),
                    &lower,
                );
                return Ok(Declared::ERROR);
            };
            if element == ValueType::Error {
                return Ok(Declared::ERROR);
            }
            Ok(Declared {
                value_type: ValueType::array_of(element),
                width: types::array_width(element, lb, ub),
            })
        })
    }

    fn standard_type(&mut self) -> ValueType {
        self.rule(&[SEMICOLON, CLOSE_PAREN], ValueType::Error, |p| {
            if p.at(INTEGER) {
                p.match_token(INTEGER)?;
                Ok(ValueType::Int)
            } else if p.at(REAL) {
                p.match_token(REAL)?;
                Ok(ValueType::Real)
            } else {
                Err(p.expected(&[INTEGER, REAL]))
            }
        })
    }

    pub(crate) fn subprogram_declarations(&mut self) {
        self.rule(&[BEGIN], (), |p| {
            if !p.at(PROCEDURE) {
                return Err(p.expected(&[PROCEDURE]));
            }
            loop {
                p.subprogram_declaration();
                p.match_token(SEMICOLON)?;

                if p.at(PROCEDURE) {
                    continue;
                }
                if p.at(BEGIN) {
                    return Ok(());
                }
                return Err(p.expected(&[PROCEDURE, BEGIN]));
            }
        })
    }

    fn subprogram_declaration(&mut self) {
        let depth = self.scopes.depth();
        self.rule(&[SEMICOLON], (), |p| {
            if !p.at(PROCEDURE) {
                return Err(p.expected(&[PROCEDURE]));
            }
            p.subprogram_head();
            p.subprogram_body();
            Ok(())
        });
        self.close_scopes_to(depth);
    }

    fn subprogram_body(&mut self) {
        self.rule(&[SEMICOLON], (), |p| {
            if p.at(VAR) {
                p.declarations();
            } else if !p.at_any(&[PROCEDURE, BEGIN]) {
                return Err(p.expected(&[VAR, PROCEDURE, BEGIN]));
            }
            p.subprogram_body_tail();
            Ok(())
        })
    }

    fn subprogram_body_tail(&mut self) {
        self.rule(&[SEMICOLON], (), |p| {
            if p.at(PROCEDURE) {
                p.subprogram_declarations();
            } else if !p.at(BEGIN) {
                return Err(p.expected(&[PROCEDURE, BEGIN]));
            }
            p.compound_statement();
            Ok(())
        })
    }

    /// subprogram_head ::= PROCEDURE id [ arguments ] ;
    fn subprogram_head(&mut self) {
        self.rule(&[VAR, PROCEDURE, BEGIN], (), |p| {
            p.match_token(PROCEDURE)?;
            let id = match p.match_token(ID) {
                Ok(id) => id,
                Err(unwound) => {
                    // The body still needs a scope of its own.
                    p.open_unnamed_scope();
                    return Err(unwound);
                }
            };
            p.open_scope(&id);

            if p.at(OPEN_PAREN) {
                p.arguments();
            } else if !p.at(SEMICOLON) {
                return Err(p.expected(&[OPEN_PAREN, SEMICOLON]));
            }
            p.match_token(SEMICOLON)?;
            Ok(())
        })
    }

    fn arguments(&mut self) {
        self.rule(&[SEMICOLON], (), |p| {
            p.match_token(OPEN_PAREN)?;
            p.parameter_list();
            p.match_token(CLOSE_PAREN)?;
            Ok(())
        })
    }

    /// Formal parameters are references and take no local storage.
    fn parameter_list(&mut self) {
        self.rule(&[CLOSE_PAREN], (), |p| loop {
            let id = p.match_token(ID)?;
            p.match_token(COLON)?;
            let declared = p.type_spec();
            p.declare(&id, declared.value_type.as_param(), 0);

            if p.at(SEMICOLON) {
                p.match_token(SEMICOLON)?;
                continue;
            }
            if p.at(CLOSE_PAREN) {
                return Ok(());
            }
            return Err(p.expected(&[SEMICOLON, CLOSE_PAREN]));
        })
    }

    fn declare(&mut self, id: &Token, value_type: ValueType, width: usize) {
        if let Err(message) = self.scopes.declare_symbol(&id.lexeme, value_type, width) {
            self.semantic_error(message, id);
        }
    }
}

/// Integer bounds of an array type, when both are integer literals in order.
fn array_bounds(lower: &Token, upper: &Token) -> Option<(i64, i64)> {
    let lb = lower.lexeme.parse::<i64>().ok()?;
    let ub = upper.lexeme.parse::<i64>().ok()?;
    (lb <= ub).then_some((lb, ub))
}
