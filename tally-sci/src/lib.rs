//! Tally Scientific Plugin
//!
//! Unary operations: square and cube roots, absolute value, negation and
//! logarithms. Arguments outside an operation's domain come back as
//! `CalcError::Domain` values.

mod logs;
mod roots;

pub use logs::{ln, log10};
pub use roots::{abs, cbrt, negate, sqrt};

use tally_plugin::{OperationDef, Plugin, PluginMeta};

/// Name the plugin is registered and enabled under
pub const PLUGIN_NAME: &str = "sci";

pub struct SciPlugin;

impl Plugin for SciPlugin {
    fn meta(&self) -> PluginMeta {
        PluginMeta {
            name: PLUGIN_NAME,
            description: "Roots, absolute value, negation and logarithms",
        }
    }

    fn operations(&self) -> Vec<OperationDef> {
        let mut defs = roots::definitions();
        defs.extend(logs::definitions());
        defs
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tally_core::{CalcError, Operand, Value};
    use tally_plugin::{Arity, OperationRegistry, PluginCatalog, PluginLoader};

    fn registry() -> OperationRegistry {
        let catalog = PluginCatalog::new().with_plugin(SciPlugin);
        let mut registry = OperationRegistry::new();
        let report = PluginLoader::new(&catalog).load_all(&mut registry);
        assert!(report.is_clean());
        registry
    }

    #[test]
    fn test_all_operations_unary() {
        let defs = SciPlugin.operations();
        assert_eq!(defs.len(), 6);
        assert!(defs.iter().all(|d| d.arity() == Arity::Unary));
    }

    #[test]
    fn test_sqrt() {
        let registry = registry();
        assert_eq!(registry.call("sqrt", &Operand::from(4), &Operand::Missing).as_number(), Some(2.0));
        assert_eq!(registry.call("sqrt", &Operand::from(16), &Operand::Missing).as_number(), Some(4.0));
    }

    #[test]
    fn test_sqrt_negative_is_domain_error() {
        let v = registry().call("sqrt", &Operand::from(-4), &Operand::Missing);
        assert!(matches!(v, Value::Error(CalcError::Domain(_))));
        assert_eq!(v.to_string(), "Cannot take the square root of a negative number.");
    }

    #[test]
    fn test_sqrt_ignores_second_operand() {
        let v = registry().call("sqrt", &Operand::from(9), &Operand::from(100));
        assert_eq!(v.as_number(), Some(3.0));
    }

    #[test]
    fn test_cbrt_of_negative() {
        assert_eq!(cbrt(-27.0), Ok(-3.0));
    }

    #[test]
    fn test_abs_and_negate() {
        assert_eq!(abs(-2.5), Ok(2.5));
        assert_eq!(negate(2.5), Ok(-2.5));
    }

    #[test]
    fn test_logs() {
        assert_eq!(log10(100.0), Ok(2.0));
        assert_eq!(ln(1.0), Ok(0.0));
        assert!(ln(0.0).is_err());
        assert!(log10(-1.0).is_err());
    }
}
