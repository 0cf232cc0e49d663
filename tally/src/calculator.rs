//! Calculator facade

use crate::CalculatorBuilder;
use std::sync::Arc;
use tally_core::{Operand, Value};
use tally_history::{HistoryConfig, HistoryEntry, HistoryError, HistoryLedger};
use tally_plugin::{Arity, LoadReport, OperationRegistry, RegisteredOperation};
use tracing::debug;

/// Registry, evaluator and history behind one surface
pub struct Calculator {
    registry: Arc<OperationRegistry>,
    history: HistoryLedger,
}

impl Calculator {
    pub fn new(registry: OperationRegistry, history: HistoryConfig) -> Self {
        Self {
            registry: Arc::new(registry),
            history: HistoryLedger::new(history),
        }
    }

    pub fn builder() -> CalculatorBuilder {
        CalculatorBuilder::new()
    }

    /// Built-ins plus every bundled plugin, with the report of how each
    /// plugin loaded
    pub fn with_standard_library(history: HistoryConfig) -> (Self, LoadReport) {
        CalculatorBuilder::new().with_history(history).build_bundled()
    }

    pub fn registry(&self) -> &OperationRegistry {
        &self.registry
    }

    /// Operation names, sorted
    pub fn operations(&self) -> Vec<&str> {
        self.registry.names()
    }

    pub fn describe_operations(&self) -> Vec<&RegisteredOperation> {
        self.registry.list()
    }

    /// Compute without touching history
    pub fn calculate(&self, a: impl Into<Operand>, b: impl Into<Operand>, operation: &str) -> Value {
        self.registry.call(operation, &a.into(), &b.into())
    }

    /// Compute and record the calculation when the result is a number.
    ///
    /// The result is returned as-is either way.
    pub fn calculate_and_log(
        &mut self,
        a: impl Into<Operand>,
        b: impl Into<Operand>,
        operation: &str,
    ) -> Value {
        let (a, b) = (a.into(), b.into());
        let op = match self.registry.get(operation) {
            Some(op) => op,
            None => return self.registry.call(operation, &a, &b),
        };
        let value = op.operation.apply(&a, &b);
        if let Value::Number(result) = value {
            let entry = format_entry(op, &a, &b, result);
            self.history.add_to_history(entry);
        } else {
            debug!(operation = %operation, result = %value, "calculation not recorded");
        }
        value
    }

    // ========== History ==========

    pub fn history(&self) -> &HistoryLedger {
        &self.history
    }

    pub fn get_history(&self) -> Vec<String> {
        self.history.get_history()
    }

    pub fn undo_last(&mut self) -> Option<HistoryEntry> {
        self.history.undo_last()
    }

    pub fn save_history(&self) -> Result<(), HistoryError> {
        self.history.save_history()
    }

    pub fn load_history(&mut self) -> Result<(), HistoryError> {
        self.history.load_history()
    }

    pub fn clear_history(&mut self) -> Result<(), HistoryError> {
        self.history.clear_history()
    }
}

/// `"1 add 2 = 3"` for binary operations, `"sqrt(4) = 2"` for unary ones
fn format_entry(op: &RegisteredOperation, a: &Operand, b: &Operand, result: f64) -> HistoryEntry {
    let name = op.name();
    match op.arity() {
        Arity::Binary => HistoryEntry::new(format!("{} {} {} = {}", a, name, b, result)),
        Arity::Unary => HistoryEntry::new(format!("{}({}) = {}", name, a, result)),
    }
}
