//! Operands supplied by callers
//!
//! Callers do not always hand over clean numbers: the REPL forwards raw
//! tokens and unary calls leave the second slot empty. `Operand` keeps
//! those cases representable so the evaluator can reject them as values.

use crate::{CalcError, OperandPosition};
use serde::{Deserialize, Serialize};
use std::fmt;

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", content = "value")]
pub enum Operand {
    Number(f64),
    Text(String),
    #[default]
    Missing,
}

impl Operand {
    /// Parse a user token, keeping it as text when it is not a number
    pub fn parse(token: &str) -> Self {
        let token = token.trim();
        match token.parse::<f64>() {
            Ok(n) => Operand::Number(n),
            Err(_) => Operand::Text(token.to_string()),
        }
    }

    pub fn as_number(&self) -> Option<f64> {
        match self {
            Operand::Number(n) => Some(*n),
            _ => None,
        }
    }

    /// Require a number in the given slot
    pub fn to_number(&self, position: OperandPosition) -> Result<f64, CalcError> {
        match self {
            Operand::Number(n) => Ok(*n),
            Operand::Text(s) => Err(CalcError::invalid_operand(position, format!("text '{}'", s))),
            Operand::Missing => Err(CalcError::invalid_operand(position, "nothing")),
        }
    }
}

impl fmt::Display for Operand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Operand::Number(n) => write!(f, "{}", n),
            Operand::Text(s) => f.write_str(s),
            Operand::Missing => f.write_str("None"),
        }
    }
}

// From implementations for convenience
impl From<f64> for Operand {
    fn from(n: f64) -> Self {
        Operand::Number(n)
    }
}

impl From<i32> for Operand {
    fn from(n: i32) -> Self {
        Operand::Number(f64::from(n))
    }
}

impl From<i64> for Operand {
    fn from(n: i64) -> Self {
        Operand::Number(n as f64)
    }
}

impl From<&str> for Operand {
    fn from(s: &str) -> Self {
        Operand::Text(s.to_string())
    }
}

impl From<String> for Operand {
    fn from(s: String) -> Self {
        Operand::Text(s)
    }
}

impl<T: Into<Operand>> From<Option<T>> for Operand {
    fn from(opt: Option<T>) -> Self {
        opt.map_or(Operand::Missing, Into::into)
    }
}
