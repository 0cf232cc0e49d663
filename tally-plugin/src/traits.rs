//! Operation and plugin traits

use serde::Serialize;
use std::fmt;
use std::sync::Arc;
use tally_core::{CalcError, Operand, OperandPosition, Value};

pub type UnaryFn = Arc<dyn Fn(f64) -> Result<f64, CalcError> + Send + Sync>;
pub type BinaryFn = Arc<dyn Fn(f64, f64) -> Result<f64, CalcError> + Send + Sync>;

/// Number of operands an operation consumes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Arity {
    Unary,
    Binary,
}

impl fmt::Display for Arity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Arity::Unary => f.write_str("unary"),
            Arity::Binary => f.write_str("binary"),
        }
    }
}

/// A callable tagged with its arity
///
/// Dispatch is chosen by the tag, never by counting the operands a caller
/// happened to supply.
#[derive(Clone)]
pub enum Operation {
    Unary(UnaryFn),
    Binary(BinaryFn),
}

impl Operation {
    pub fn unary<F>(f: F) -> Self
    where
        F: Fn(f64) -> Result<f64, CalcError> + Send + Sync + 'static,
    {
        Operation::Unary(Arc::new(f))
    }

    pub fn binary<F>(f: F) -> Self
    where
        F: Fn(f64, f64) -> Result<f64, CalcError> + Send + Sync + 'static,
    {
        Operation::Binary(Arc::new(f))
    }

    pub fn arity(&self) -> Arity {
        match self {
            Operation::Unary(_) => Arity::Unary,
            Operation::Binary(_) => Arity::Binary,
        }
    }

    /// Invoke with whatever operands the caller has.
    ///
    /// Unary operations ignore `b`. Operand problems come back as
    /// `Value::Error`, as do non-finite results.
    pub fn apply(&self, a: &Operand, b: &Operand) -> Value {
        let outcome = match self {
            Operation::Unary(f) => a.to_number(OperandPosition::First).and_then(|x| f(x)),
            Operation::Binary(f) => a
                .to_number(OperandPosition::First)
                .and_then(|x| b.to_number(OperandPosition::Second).map(|y| (x, y)))
                .and_then(|(x, y)| f(x, y)),
        };
        Value::from_outcome(outcome)
    }
}

impl fmt::Debug for Operation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Operation::{:?}", self.arity())
    }
}

/// Metadata for an operation
#[derive(Debug, Clone, Serialize)]
pub struct OperationMeta {
    pub name: &'static str,
    pub description: &'static str,
    pub usage: &'static str,
}

/// An operation as contributed by a plugin
#[derive(Debug, Clone)]
pub struct OperationDef {
    pub meta: OperationMeta,
    pub operation: Operation,
}

impl OperationDef {
    pub fn new(meta: OperationMeta, operation: Operation) -> Self {
        Self { meta, operation }
    }

    pub fn arity(&self) -> Arity {
        self.operation.arity()
    }
}

/// Metadata for a plugin unit
#[derive(Debug, Clone, Serialize)]
pub struct PluginMeta {
    pub name: &'static str,
    pub description: &'static str,
}

/// A unit contributing operations to the registry
pub trait Plugin: Send + Sync {
    fn meta(&self) -> PluginMeta;
    fn operations(&self) -> Vec<OperationDef>;
}
