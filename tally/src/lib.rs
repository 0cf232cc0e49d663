//! Tally - a calculator with plugins and undoable history
//!
//! `Calculator` resolves operation names through a registry seeded with the
//! built-in arithmetic and extended by plugins, records every numeric
//! result in a history ledger, and persists that ledger as CSV.
//!
//! ```no_run
//! use tally::{Calculator, HistoryConfig};
//!
//! let (mut calc, _report) = Calculator::with_standard_library(HistoryConfig::default());
//! let result = calc.calculate_and_log(4, None::<f64>, "sqrt");
//! assert_eq!(result.as_number(), Some(2.0));
//! ```

mod builder;
mod calculator;

pub use builder::{bundled_catalog, CalculatorBuilder};
pub use calculator::Calculator;

pub use tally_core::{CalcError, Operand, Value};
pub use tally_history::{
    HistoryConfig, HistoryEntry, HistoryError, HistoryLedger, DEFAULT_HISTORY_FILE,
};
pub use tally_plugin::{
    Arity, LoadReport, OperationRegistry, PluginCatalog, PluginError, PluginOutcome,
    RegisteredOperation,
};
