//! Calculation results
//!
//! A result is either a number or an error. Only numbers are ever
//! recorded in history, so callers branch on `is_number()`.

use crate::CalcError;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", content = "value")]
pub enum Value {
    Number(f64),
    Error(CalcError),
}

impl Value {
    /// Build a value from an operation outcome, rejecting non-finite numbers
    pub fn from_outcome(outcome: Result<f64, CalcError>) -> Self {
        match outcome.and_then(ensure_finite) {
            Ok(n) => Value::Number(n),
            Err(e) => Value::Error(e),
        }
    }

    // ========== Safe Accessors (never panic) ==========

    pub fn as_number(&self) -> Option<f64> {
        match self {
            Value::Number(n) => Some(*n),
            Value::Error(_) => None,
        }
    }

    pub fn as_error(&self) -> Option<&CalcError> {
        match self {
            Value::Error(e) => Some(e),
            Value::Number(_) => None,
        }
    }

    pub fn is_number(&self) -> bool {
        matches!(self, Value::Number(_))
    }

    pub fn is_error(&self) -> bool {
        matches!(self, Value::Error(_))
    }
}

/// NaN and infinities are not results
pub fn ensure_finite(n: f64) -> Result<f64, CalcError> {
    if n.is_nan() {
        Err(CalcError::Undefined)
    } else if n.is_infinite() {
        Err(CalcError::Overflow)
    } else {
        Ok(n)
    }
}

impl std::fmt::Display for Value {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Value::Number(n) => write!(f, "{}", n),
            Value::Error(e) => write!(f, "{}", e),
        }
    }
}

impl From<f64> for Value {
    fn from(n: f64) -> Self {
        Value::Number(n)
    }
}

impl From<CalcError> for Value {
    fn from(e: CalcError) -> Self {
        Value::Error(e)
    }
}
