//! Calculation errors
//!
//! Errors never crash the calculator. They are returned as values so the
//! caller can print them and decide whether anything gets recorded.

use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

/// Standard error codes (machine-readable)
pub mod codes {
    pub const INVALID_OPERATION: &str = "INVALID_OPERATION";
    pub const DIV_ZERO: &str = "DIV_ZERO";
    pub const MOD_ZERO: &str = "MOD_ZERO";
    pub const INVALID_OPERAND: &str = "INVALID_OPERAND";
    pub const DOMAIN_ERROR: &str = "DOMAIN_ERROR";
    pub const UNDEFINED: &str = "UNDEFINED";
    pub const OVERFLOW: &str = "OVERFLOW";
}

/// Which operand slot a malformed value was supplied in
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OperandPosition {
    First,
    Second,
}

impl fmt::Display for OperandPosition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            OperandPosition::First => f.write_str("first"),
            OperandPosition::Second => f.write_str("second"),
        }
    }
}

/// Error produced by a calculation
///
/// The `Display` output is the user-facing message and is part of the
/// contract: callers and tests compare against it verbatim.
#[derive(Debug, Clone, PartialEq, Error, Serialize, Deserialize)]
#[serde(tag = "code", content = "detail", rename_all = "snake_case")]
pub enum CalcError {
    #[error("Invalid operation.")]
    InvalidOperation,

    #[error("Cannot divide by zero.")]
    DivisionByZero,

    #[error("Cannot modulo by zero.")]
    ModuloByZero,

    #[error("Invalid operand: expected a number for the {position} operand, got {got}.")]
    InvalidOperand {
        position: OperandPosition,
        got: String,
    },

    /// Argument outside the domain of a plugin operation
    #[error("{0}")]
    Domain(String),

    #[error("Result is undefined.")]
    Undefined,

    #[error("Result is too large.")]
    Overflow,
}

impl CalcError {
    pub fn invalid_operand(position: OperandPosition, got: impl Into<String>) -> Self {
        CalcError::InvalidOperand {
            position,
            got: got.into(),
        }
    }

    pub fn domain(message: impl Into<String>) -> Self {
        CalcError::Domain(message.into())
    }

    /// Machine-readable code, used in log lines
    pub fn code(&self) -> &'static str {
        match self {
            CalcError::InvalidOperation => codes::INVALID_OPERATION,
            CalcError::DivisionByZero => codes::DIV_ZERO,
            CalcError::ModuloByZero => codes::MOD_ZERO,
            CalcError::InvalidOperand { .. } => codes::INVALID_OPERAND,
            CalcError::Domain(_) => codes::DOMAIN_ERROR,
            CalcError::Undefined => codes::UNDEFINED,
            CalcError::Overflow => codes::OVERFLOW,
        }
    }
}
