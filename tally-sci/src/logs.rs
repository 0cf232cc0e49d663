//! Logarithms

use tally_plugin::prelude::*;

fn require_positive(x: f64, name: &str) -> Result<f64, CalcError> {
    if x <= 0.0 {
        return Err(CalcError::domain(format!(
            "Cannot take the {} of a non-positive number.",
            name
        )));
    }
    Ok(x)
}

pub fn ln(x: f64) -> Result<f64, CalcError> {
    require_positive(x, "natural logarithm").map(f64::ln)
}

pub fn log10(x: f64) -> Result<f64, CalcError> {
    require_positive(x, "logarithm").map(f64::log10)
}

pub(crate) fn definitions() -> Vec<OperationDef> {
    vec![
        OperationDef::new(
            OperationMeta { name: "ln", description: "Natural logarithm (x must be positive)", usage: "x ln" },
            Operation::unary(ln),
        ),
        OperationDef::new(
            OperationMeta { name: "log10", description: "Base-10 logarithm (x must be positive)", usage: "x log10" },
            Operation::unary(log10),
        ),
    ]
}
