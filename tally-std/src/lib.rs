//! Tally Standard Library
//!
//! The six built-in binary operations and the evaluator that runs them
//! without going through a registry.

pub mod arithmetic;

use tally_core::{CalcError, Operand, Value};
use tally_plugin::{Operation, OperationRegistry, BUILTIN_ORIGIN};

/// Evaluate a built-in operation.
///
/// The name is checked before the operands, so an unknown name always
/// yields "Invalid operation." whatever was passed in. Never panics.
pub fn calculate(a: impl Into<Operand>, b: impl Into<Operand>, operation: &str) -> Value {
    match arithmetic::lookup(operation) {
        Some(f) => Operation::binary(f).apply(&a.into(), &b.into()),
        None => Value::Error(CalcError::InvalidOperation),
    }
}

/// Load built-in operations into registry
pub fn load_builtins(registry: OperationRegistry) -> OperationRegistry {
    arithmetic::definitions()
        .into_iter()
        .fold(registry, |registry, def| registry.with_operation(BUILTIN_ORIGIN, def))
}

/// Create registry with only the built-ins
pub fn builtin_registry() -> OperationRegistry {
    load_builtins(OperationRegistry::new())
}
