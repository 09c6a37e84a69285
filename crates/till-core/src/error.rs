//! # Error Types
//!
//! Domain-specific error types for till-core.
//!
//! ## Error Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────┐
//! │                         Error Types                                 │
//! │                                                                     │
//! │  till-core errors (this file)                                      │
//! │  ├── CoreError        - Checkout and domain failures               │
//! │  └── ValidationError  - Input validation failures                  │
//! │                                                                     │
//! │  Flow: ValidationError → CoreError → caller-facing message         │
//! └─────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Design Principles
//! 1. Use `thiserror` for derive macros (not manual impl)
//! 2. Include context in error messages (amounts, field names)
//! 3. Errors are enum variants, never String
//! 4. Each error variant maps to a user-facing message

use thiserror::Error;

use crate::money::Money;

// =============================================================================
// Core Error
// =============================================================================

/// Core business logic errors.
///
/// These errors represent business rule violations or domain logic failures.
/// They should be caught and translated to user-friendly messages.
#[derive(Debug, Error)]
pub enum CoreError {
    /// Customer balance cannot cover the cart.
    ///
    /// ## When This Occurs
    /// The balance is compared against the cart total before any discount
    /// is taken off. Carries both amounts for caller-facing diagnostics.
    ///
    /// ## Retry Semantics
    /// None. The condition is deterministic for the same inputs; it will
    /// not succeed on retry without a balance or cart change.
    ///
    /// ## User Workflow
    /// ```text
    /// Checkout (cart total £6.00)
    ///      │
    ///      ▼
    /// Check balance: available £5.00
    ///      │
    ///      ▼
    /// InsufficientFunds { required: £6.00, available: £5.00 }
    ///      │
    ///      ▼
    /// UI shows: "Insufficient balance £5.00 < £6.00"
    /// ```
    #[error("insufficient balance {available} < {required}")]
    InsufficientFunds { required: Money, available: Money },

    /// Validation error (wraps ValidationError).
    #[error("validation error: {0}")]
    Validation(#[from] ValidationError),
}

// =============================================================================
// Validation Error
// =============================================================================

/// Input validation errors.
///
/// These errors occur when constructed values don't meet requirements.
/// Used for early validation before business logic runs.
#[derive(Debug, Error)]
pub enum ValidationError {
    /// A required field is missing or empty.
    #[error("{field} is required")]
    Required { field: String },

    /// Field value is too long.
    #[error("{field} must be at most {max} characters")]
    TooLong { field: String, max: usize },

    /// Numeric value is out of range.
    #[error("{field} must be between {min} and {max}")]
    OutOfRange { field: String, min: i64, max: i64 },

    /// Invalid format (e.g., malformed email address).
    #[error("{field} has invalid format: {reason}")]
    InvalidFormat { field: String, reason: String },
}

// =============================================================================
// Result Type Alias
// =============================================================================

/// Convenience type alias for Results with CoreError.
pub type CoreResult<T> = Result<T, CoreError>;

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_messages() {
        let err = CoreError::InsufficientFunds {
            required: Money::from_pence(600),
            available: Money::from_pence(500),
        };
        assert_eq!(err.to_string(), "insufficient balance £5.00 < £6.00");
    }

    #[test]
    fn test_validation_error_messages() {
        let err = ValidationError::Required {
            field: "name".to_string(),
        };
        assert_eq!(err.to_string(), "name is required");

        let err = ValidationError::TooLong {
            field: "name".to_string(),
            max: 200,
        };
        assert_eq!(err.to_string(), "name must be at most 200 characters");
    }

    #[test]
    fn test_validation_converts_to_core_error() {
        let validation_err = ValidationError::Required {
            field: "email".to_string(),
        };
        let core_err: CoreError = validation_err.into();
        assert!(matches!(core_err, CoreError::Validation(_)));
    }
}
