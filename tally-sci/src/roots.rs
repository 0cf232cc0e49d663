//! Roots and sign operations

use tally_plugin::prelude::*;

pub fn sqrt(x: f64) -> Result<f64, CalcError> {
    if x < 0.0 {
        return Err(CalcError::domain("Cannot take the square root of a negative number."));
    }
    Ok(x.sqrt())
}

pub fn cbrt(x: f64) -> Result<f64, CalcError> {
    Ok(x.cbrt())
}

pub fn abs(x: f64) -> Result<f64, CalcError> {
    Ok(x.abs())
}

pub fn negate(x: f64) -> Result<f64, CalcError> {
    Ok(-x)
}

pub(crate) fn definitions() -> Vec<OperationDef> {
    vec![
        OperationDef::new(
            OperationMeta { name: "sqrt", description: "Square root (x must be non-negative)", usage: "x sqrt" },
            Operation::unary(sqrt),
        ),
        OperationDef::new(
            OperationMeta { name: "cbrt", description: "Cube root", usage: "x cbrt" },
            Operation::unary(cbrt),
        ),
        OperationDef::new(
            OperationMeta { name: "abs", description: "Absolute value", usage: "x abs" },
            Operation::unary(abs),
        ),
        OperationDef::new(
            OperationMeta { name: "negate", description: "Flip the sign", usage: "x negate" },
            Operation::unary(negate),
        ),
    ]
}
