//! Operation Registry

use crate::{Arity, Operation, OperationDef, OperationMeta};
use std::collections::HashMap;
use tally_core::{CalcError, Operand, Value};
use tracing::{debug, warn};

/// Origin recorded for operations that ship with the calculator
pub const BUILTIN_ORIGIN: &str = "builtin";

/// An operation together with where it came from
#[derive(Debug, Clone)]
pub struct RegisteredOperation {
    pub meta: OperationMeta,
    pub operation: Operation,
    pub origin: String,
}

impl RegisteredOperation {
    pub fn name(&self) -> &'static str {
        self.meta.name
    }

    pub fn arity(&self) -> Arity {
        self.operation.arity()
    }
}

/// Name to operation map
///
/// Names are case-insensitive. Registering a name that already exists
/// replaces the earlier definition: the last one loaded wins.
#[derive(Debug, Default)]
pub struct OperationRegistry {
    operations: HashMap<String, RegisteredOperation>,
}

impl OperationRegistry {
    pub fn new() -> Self {
        Self {
            operations: HashMap::new(),
        }
    }

    pub fn with_operation(mut self, origin: &str, def: OperationDef) -> Self {
        self.register(origin, def);
        self
    }

    /// Insert an operation, returning the origin of the one it replaced.
    pub fn register(&mut self, origin: &str, def: OperationDef) -> Option<String> {
        let key = def.meta.name.to_lowercase();
        let entry = RegisteredOperation {
            meta: def.meta,
            operation: def.operation,
            origin: origin.to_string(),
        };
        let previous = self.operations.insert(key.clone(), entry)?;
        warn!(
            operation = %key,
            previous = %previous.origin,
            replacement = %origin,
            "operation overridden"
        );
        Some(previous.origin)
    }

    pub fn get(&self, name: &str) -> Option<&RegisteredOperation> {
        self.operations.get(&name.to_lowercase())
    }

    pub fn contains(&self, name: &str) -> bool {
        self.operations.contains_key(&name.to_lowercase())
    }

    pub fn len(&self) -> usize {
        self.operations.len()
    }

    pub fn is_empty(&self) -> bool {
        self.operations.is_empty()
    }

    /// Registered names, sorted
    pub fn names(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self.operations.keys().map(String::as_str).collect();
        names.sort_unstable();
        names
    }

    /// Registered operations, sorted by name
    pub fn list(&self) -> Vec<&RegisteredOperation> {
        let mut ops: Vec<&RegisteredOperation> = self.operations.values().collect();
        ops.sort_by_key(|op| op.meta.name.to_lowercase());
        ops
    }

    pub fn call(&self, name: &str, a: &Operand, b: &Operand) -> Value {
        match self.get(name) {
            Some(op) => {
                let value = op.operation.apply(a, b);
                debug!(operation = %name, origin = %op.origin, result = %value, "operation dispatched");
                value
            }
            None => {
                debug!(operation = %name, "unknown operation");
                Value::Error(CalcError::InvalidOperation)
            }
        }
    }
}
