//! Tally Core - Fundamental types
//!
//! This crate provides the core types used throughout Tally:
//! - `Operand`: what a caller hands in (number, raw text, or nothing)
//! - `Value`: what a calculation hands back (number or error)
//! - `CalcError`: user-facing calculation errors

mod error;
mod operand;
mod value;

pub use error::{codes, CalcError, OperandPosition};
pub use operand::Operand;
pub use value::{ensure_finite, Value};

/// Prelude for convenient imports
pub mod prelude {
    pub use crate::error::codes;
    pub use crate::{CalcError, Operand, OperandPosition, Value};
}

#[cfg(test)]
mod tests {
    use super::*;

    mod operand_tests {
        use super::*;

        #[test]
        fn test_parse_number() {
            assert_eq!(Operand::parse("3.5"), Operand::Number(3.5));
            assert_eq!(Operand::parse(" -2 "), Operand::Number(-2.0));
        }

        #[test]
        fn test_parse_text() {
            assert_eq!(Operand::parse("abc"), Operand::Text("abc".to_string()));
        }

        #[test]
        fn test_from_option() {
            assert_eq!(Operand::from(None::<f64>), Operand::Missing);
            assert_eq!(Operand::from(Some(4.0)), Operand::Number(4.0));
        }

        #[test]
        fn test_to_number_rejects_text() {
            let err = Operand::from("string").to_number(OperandPosition::Second).unwrap_err();
            assert_eq!(err.code(), codes::INVALID_OPERAND);
            assert_eq!(
                err.to_string(),
                "Invalid operand: expected a number for the second operand, got text 'string'."
            );
        }

        #[test]
        fn test_to_number_rejects_missing() {
            let err = Operand::Missing.to_number(OperandPosition::First).unwrap_err();
            assert!(err.to_string().contains("got nothing"));
        }
    }

    mod value_tests {
        use super::*;

        #[test]
        fn test_from_outcome_number() {
            let v = Value::from_outcome(Ok(2.0));
            assert!(v.is_number());
            assert_eq!(v.as_number(), Some(2.0));
            assert_eq!(v.to_string(), "2");
        }

        #[test]
        fn test_from_outcome_error_passes_through() {
            let v = Value::from_outcome(Err(CalcError::DivisionByZero));
            assert_eq!(v.as_error(), Some(&CalcError::DivisionByZero));
            assert_eq!(v.to_string(), "Cannot divide by zero.");
        }

        #[test]
        fn test_non_finite_rejected() {
            assert_eq!(Value::from_outcome(Ok(f64::NAN)), Value::Error(CalcError::Undefined));
            assert_eq!(Value::from_outcome(Ok(f64::INFINITY)), Value::Error(CalcError::Overflow));
        }

        #[test]
        fn test_fractional_display() {
            assert_eq!(Value::Number(0.125).to_string(), "0.125");
        }
    }

    mod error_tests {
        use super::*;

        #[test]
        fn test_messages_are_distinct() {
            assert_eq!(CalcError::DivisionByZero.to_string(), "Cannot divide by zero.");
            assert_eq!(CalcError::ModuloByZero.to_string(), "Cannot modulo by zero.");
            assert_eq!(CalcError::InvalidOperation.to_string(), "Invalid operation.");
        }

        #[test]
        fn test_serialize_code() {
            let json = serde_json::to_string(&CalcError::ModuloByZero).unwrap();
            assert_eq!(json, r#"{"code":"modulo_by_zero"}"#);
        }
    }
}
