//! Value types and the typing rules applied during the parse
//!
//! The parser computes a [`ValueType`] for every expression it recognizes and
//! hands operand types to the checks in this module. Each check returns a
//! [`TypeCheck`]: `Ok(ty)` with the result type, or `Err(message)` describing
//! a semantic error that the parser records before continuing with
//! [`ValueType::Error`].
//!
//! # Error propagation
//!
//! An operand that is already [`ValueType::Error`] has been reported once.
//! Every check short-circuits to `Ok(ValueType::Error)` in that case so a
//! single root cause produces a single diagnostic.

use crate::parser::token::{AddOp, MulOp, RelOp};
use std::fmt;

/// Storage width of an integer cell in the activation record.
pub const INT_WIDTH: usize = 4;
/// Storage width of a real cell in the activation record.
pub const REAL_WIDTH: usize = 8;

/// Type of a declared symbol or a checked expression.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ValueType {
    Int,
    Real,
    Bool,
    ArrayOfInt,
    ArrayOfReal,
    /// Pass-by-reference formal parameters.
    ParamInt,
    ParamReal,
    ParamArrayInt,
    ParamArrayReal,
    /// An identifier listed in the program header.
    ProgramParam,
    /// No index or argument present.
    None,
    /// Already reported; suppress further complaints.
    Error,
}

impl ValueType {
    /// The type a value of this type reads as (parameter references are
    /// read through to their plain counterpart).
    pub fn read(self) -> ValueType {
        match self {
            ValueType::ParamInt => ValueType::Int,
            ValueType::ParamReal => ValueType::Real,
            ValueType::ParamArrayInt => ValueType::ArrayOfInt,
            ValueType::ParamArrayReal => ValueType::ArrayOfReal,
            other => other,
        }
    }

    /// The formal-parameter variant of a declared type.
    pub fn as_param(self) -> ValueType {
        match self {
            ValueType::Int => ValueType::ParamInt,
            ValueType::Real => ValueType::ParamReal,
            ValueType::ArrayOfInt => ValueType::ParamArrayInt,
            ValueType::ArrayOfReal => ValueType::ParamArrayReal,
            _ => ValueType::Error,
        }
    }

    pub fn is_param(self) -> bool {
        matches!(
            self,
            ValueType::ParamInt
                | ValueType::ParamReal
                | ValueType::ParamArrayInt
                | ValueType::ParamArrayReal
        )
    }

    pub fn is_numeric(self) -> bool {
        matches!(self, ValueType::Int | ValueType::Real)
    }

    /// Array type holding elements of `element`.
    pub fn array_of(element: ValueType) -> ValueType {
        match element {
            ValueType::Int => ValueType::ArrayOfInt,
            ValueType::Real => ValueType::ArrayOfReal,
            _ => ValueType::Error,
        }
    }

    /// Element type of an array (or array parameter).
    pub fn element(self) -> Option<ValueType> {
        match self.read() {
            ValueType::ArrayOfInt => Some(ValueType::Int),
            ValueType::ArrayOfReal => Some(ValueType::Real),
            _ => None,
        }
    }

    /// Width of one scalar cell of this type.
    pub fn scalar_width(self) -> usize {
        match self.read() {
            ValueType::Int => INT_WIDTH,
            ValueType::Real => REAL_WIDTH,
            _ => 0,
        }
    }

    /// Short upper-case tag used by the memory-layout report.
    pub fn tag(self) -> &'static str {
        match self {
            ValueType::Int => "INT",
            ValueType::Real => "REAL",
            ValueType::Bool => "BOOL",
            ValueType::ArrayOfInt => "AINT",
            ValueType::ArrayOfReal => "AREAL",
            ValueType::ParamInt => "PPINT",
            ValueType::ParamReal => "PPREAL",
            ValueType::ParamArrayInt => "PPAINT",
            ValueType::ParamArrayReal => "PPAREAL",
            ValueType::ProgramParam => "PGPP",
            ValueType::None => "NULL",
            ValueType::Error => "ERR",
        }
    }
}

impl fmt::Display for ValueType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let text = match self {
            ValueType::Int => "integer",
            ValueType::Real => "real",
            ValueType::Bool => "boolean",
            ValueType::ArrayOfInt => "array of integer",
            ValueType::ArrayOfReal => "array of real",
            ValueType::ParamInt => "integer parameter",
            ValueType::ParamReal => "real parameter",
            ValueType::ParamArrayInt => "array of integer parameter",
            ValueType::ParamArrayReal => "array of real parameter",
            ValueType::ProgramParam => "program parameter",
            ValueType::None => "nothing",
            ValueType::Error => "error",
        };
        f.write_str(text)
    }
}

/// Result of a typing rule: the result type, or a diagnostic message.
pub type TypeCheck = Result<ValueType, String>;

/// Storage occupied by `array [lower..upper] of element`.
pub fn array_width(element: ValueType, lower: i64, upper: i64) -> usize {
    let count = (upper - lower + 1).max(0) as usize;
    element.scalar_width() * count
}

/// `target := value`
pub fn assignment(target: ValueType, value: ValueType) -> TypeCheck {
    if target == ValueType::Error || value == ValueType::Error {
        return Ok(ValueType::Error);
    }
    match (target.read(), value.read()) {
        (ValueType::Int, ValueType::Int) => Ok(ValueType::Int),
        (ValueType::Real, ValueType::Real) => Ok(ValueType::Real),
        (t, v) => Err(format!("cannot assign {v} to a variable of type {t}")),
    }
}

/// `left relop right`
pub fn relational(left: ValueType, op: RelOp, right: ValueType) -> TypeCheck {
    if left == ValueType::Error || right == ValueType::Error {
        return Ok(ValueType::Error);
    }
    match (left.read(), op, right.read()) {
        (ValueType::Bool, RelOp::Eq | RelOp::Neq, ValueType::Bool) => Ok(ValueType::Bool),
        (ValueType::Int, _, ValueType::Int) | (ValueType::Real, _, ValueType::Real) => {
            Ok(ValueType::Bool)
        }
        (l, op, r) => Err(format!(
            "operator {} cannot compare {l} and {r}",
            op.symbol()
        )),
    }
}

/// `left addop right`
pub fn additive(left: ValueType, op: AddOp, right: ValueType) -> TypeCheck {
    if left == ValueType::Error || right == ValueType::Error {
        return Ok(ValueType::Error);
    }
    match (left.read(), op, right.read()) {
        (ValueType::Bool, AddOp::Or, ValueType::Bool) => Ok(ValueType::Bool),
        (ValueType::Int, AddOp::Plus | AddOp::Minus, ValueType::Int) => Ok(ValueType::Int),
        (ValueType::Real, AddOp::Plus | AddOp::Minus, ValueType::Real) => Ok(ValueType::Real),
        (l, op, r) => Err(format!(
            "operator {} cannot combine {l} and {r}",
            op.symbol()
        )),
    }
}

/// `left mulop right`
pub fn multiplicative(left: ValueType, op: MulOp, right: ValueType) -> TypeCheck {
    if left == ValueType::Error || right == ValueType::Error {
        return Ok(ValueType::Error);
    }
    match (left.read(), op, right.read()) {
        (ValueType::Bool, MulOp::And, ValueType::Bool) => Ok(ValueType::Bool),
        (ValueType::Int, op, ValueType::Int) if op != MulOp::And => Ok(ValueType::Int),
        (ValueType::Real, op, ValueType::Real) if op != MulOp::And => Ok(ValueType::Real),
        (l, op, r) => Err(format!(
            "operator {} cannot combine {l} and {r}",
            op.symbol()
        )),
    }
}

/// `not operand`
pub fn negation(operand: ValueType) -> TypeCheck {
    match operand.read() {
        ValueType::Bool => Ok(ValueType::Bool),
        ValueType::Error => Ok(ValueType::Error),
        other => Err(format!("not requires a boolean operand, found {other}")),
    }
}

/// `+term` or `-term`
pub fn signed(term: ValueType) -> TypeCheck {
    match term.read() {
        ValueType::Int | ValueType::Real | ValueType::Error => Ok(term.read()),
        other => Err(format!("unary sign requires a numeric operand, found {other}")),
    }
}

/// Condition of an `if` or `while`.
pub fn condition(ty: ValueType) -> TypeCheck {
    match ty {
        ValueType::Bool | ValueType::Error => Ok(ty),
        other => Err(format!("condition must be boolean, found {other}")),
    }
}

/// Where an identifier reference appears; decides whether a whole array is
/// an acceptable value.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Access {
    /// Target of an assignment: must name a scalar cell.
    Store,
    /// Operand inside an expression: whole arrays may be passed along.
    Load,
}

/// `name` or `name[index]`, where `index` is [`ValueType::None`] when no
/// bracket is present.
pub fn reference(name: &str, declared: ValueType, index: ValueType, access: Access) -> TypeCheck {
    if declared == ValueType::Error || index == ValueType::Error {
        return Ok(ValueType::Error);
    }

    if index != ValueType::None {
        if index.read() != ValueType::Int {
            return Err(format!("index of {name} must be an integer, found {index}"));
        }
        return declared
            .element()
            .ok_or_else(|| format!("{name} is not an array, found {declared}"));
    }

    match (declared.read(), access) {
        (ValueType::Int | ValueType::Real, _) => Ok(declared.read()),
        (ValueType::ArrayOfInt | ValueType::ArrayOfReal, Access::Load) => Ok(declared.read()),
        (other, _) => Err(format!(
            "{name} cannot be used as a value here, found {other}"
        )),
    }
}

/// Actual argument `actual` passed for a formal parameter `formal`.
pub fn argument(position: usize, formal: ValueType, actual: ValueType) -> Result<(), String> {
    if formal == ValueType::Error || actual == ValueType::Error {
        return Ok(());
    }
    if formal.read() == actual.read() {
        Ok(())
    } else {
        Err(format!(
            "argument {position} has type {actual}, expected {}",
            formal.read()
        ))
    }
}
