//! # Validation Module
//!
//! Input validation utilities for Till.
//!
//! ## Validation Strategy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────┐
//! │                      Validation Layers                              │
//! │                                                                     │
//! │  Layer 1: Type system                                              │
//! │  ├── Money is integer pence, Category is a closed enum             │
//! │  └── Whole classes of bad input cannot be expressed                │
//! │           │                                                         │
//! │           ▼                                                         │
//! │  Layer 2: THIS MODULE - construction-time checks                   │
//! │  ├── Names non-empty and bounded                                   │
//! │  ├── Prices non-negative                                           │
//! │  └── Email addresses well-formed                                   │
//! │                                                                     │
//! │  A Product or Customer that exists has already passed both.        │
//! └─────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//! ```rust
//! use till_core::validation::{validate_name, validate_email};
//!
//! validate_name("name", "Laptop").unwrap();
//! assert!(validate_email("alice@example.com").is_ok());
//! assert!(validate_email("not-an-email").is_err());
//! ```

use crate::error::ValidationError;
use crate::money::Money;
use crate::{MAX_NAME_LEN, MAX_RATE_BPS};

/// Result type for validation operations.
pub type ValidationResult<T> = Result<T, ValidationError>;

// =============================================================================
// String Validators
// =============================================================================

/// Validates a display name (product or customer).
///
/// ## Rules
/// - Must not be empty after trimming
/// - Must be at most [`MAX_NAME_LEN`] characters
///
/// ## Example
/// ```rust
/// use till_core::validation::validate_name;
///
/// assert!(validate_name("name", "Orange Juice").is_ok());
/// assert!(validate_name("name", "").is_err());
/// assert!(validate_name("name", &"A".repeat(300)).is_err());
/// ```
pub fn validate_name(field: &str, name: &str) -> ValidationResult<()> {
    let name = name.trim();

    if name.is_empty() {
        return Err(ValidationError::Required {
            field: field.to_string(),
        });
    }

    if name.len() > MAX_NAME_LEN {
        return Err(ValidationError::TooLong {
            field: field.to_string(),
            max: MAX_NAME_LEN,
        });
    }

    Ok(())
}

/// Validates an email address.
///
/// ## Rules
/// - Must not be empty
/// - Must contain exactly one `@` with non-empty local part
/// - Domain must contain a dot that is neither first nor last
///
/// Deliberately shallow: real mailbox verification is delivery's
/// problem, this only rejects obvious garbage.
pub fn validate_email(email: &str) -> ValidationResult<()> {
    let email = email.trim();

    if email.is_empty() {
        return Err(ValidationError::Required {
            field: "email".to_string(),
        });
    }

    let mut parts = email.splitn(2, '@');
    let local = parts.next().unwrap_or("");
    let domain = parts.next().unwrap_or("");

    let domain_ok = domain.contains('.')
        && !domain.starts_with('.')
        && !domain.ends_with('.')
        && !domain.contains('@');

    if local.is_empty() || !domain_ok {
        return Err(ValidationError::InvalidFormat {
            field: "email".to_string(),
            reason: "must look like local@domain.tld".to_string(),
        });
    }

    Ok(())
}

// =============================================================================
// Numeric Validators
// =============================================================================

/// Validates a price.
///
/// ## Rules
/// - Must be non-negative
/// - Zero is allowed (free items)
///
/// ## Example
/// ```rust
/// use till_core::money::Money;
/// use till_core::validation::validate_price;
///
/// assert!(validate_price(Money::from_pence(1099)).is_ok());
/// assert!(validate_price(Money::zero()).is_ok());      // Free item
/// assert!(validate_price(Money::from_pence(-100)).is_err());
/// ```
pub fn validate_price(price: Money) -> ValidationResult<()> {
    if price.is_negative() {
        return Err(ValidationError::OutOfRange {
            field: "price".to_string(),
            min: 0,
            max: i64::MAX,
        });
    }

    Ok(())
}

/// Validates a discount rate in basis points.
///
/// ## Rules
/// - Must be between 0 and 10000 (0% to 100%)
pub fn validate_rate_bps(bps: u32) -> ValidationResult<()> {
    if bps > MAX_RATE_BPS {
        return Err(ValidationError::OutOfRange {
            field: "rate".to_string(),
            min: 0,
            max: MAX_RATE_BPS as i64,
        });
    }

    Ok(())
}

// =============================================================================
// Unit Tests
// =============================================================================
