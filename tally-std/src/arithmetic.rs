//! Built-in binary arithmetic

use tally_plugin::prelude::*;

pub type BinaryOp = fn(f64, f64) -> Result<f64, CalcError>;

pub fn add(a: f64, b: f64) -> Result<f64, CalcError> {
    Ok(a + b)
}

pub fn subtract(a: f64, b: f64) -> Result<f64, CalcError> {
    Ok(a - b)
}

pub fn multiply(a: f64, b: f64) -> Result<f64, CalcError> {
    Ok(a * b)
}

pub fn divide(a: f64, b: f64) -> Result<f64, CalcError> {
    if b == 0.0 {
        return Err(CalcError::DivisionByZero);
    }
    Ok(a / b)
}

/// Remainder with the sign of the dividend (`f64` `%`)
pub fn modulo(a: f64, b: f64) -> Result<f64, CalcError> {
    if b == 0.0 {
        return Err(CalcError::ModuloByZero);
    }
    Ok(a % b)
}

/// Real power; negative and fractional exponents allowed
pub fn power(a: f64, b: f64) -> Result<f64, CalcError> {
    Ok(a.powf(b))
}

static BUILTINS: [(OperationMeta, BinaryOp); 6] = [
    (OperationMeta { name: "add", description: "Sum of two numbers", usage: "a b add" }, add),
    (OperationMeta { name: "subtract", description: "Difference a - b", usage: "a b subtract" }, subtract),
    (OperationMeta { name: "multiply", description: "Product of two numbers", usage: "a b multiply" }, multiply),
    (OperationMeta { name: "divide", description: "Quotient a / b (b must be non-zero)", usage: "a b divide" }, divide),
    (OperationMeta { name: "modulo", description: "Remainder of a / b (b must be non-zero)", usage: "a b modulo" }, modulo),
    (OperationMeta { name: "power", description: "a raised to the power b", usage: "a b power" }, power),
];

/// Find a built-in by name (case-insensitive)
pub fn lookup(name: &str) -> Option<BinaryOp> {
    BUILTINS
        .iter()
        .find(|(meta, _)| meta.name.eq_ignore_ascii_case(name))
        .map(|(_, f)| *f)
}

pub fn definitions() -> Vec<OperationDef> {
    BUILTINS
        .iter()
        .map(|(meta, f)| OperationDef::new(meta.clone(), Operation::binary(*f)))
        .collect()
}
