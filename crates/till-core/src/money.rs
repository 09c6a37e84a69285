//! # Money Module
//!
//! Provides the `Money` type for handling monetary values safely.
//!
//! ## Why Integer Money?
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────┐
//! │  THE FLOATING POINT PROBLEM                                         │
//! │                                                                     │
//! │  In floating point:                                                 │
//! │    0.1 + 0.2 = 0.30000000000000004  ❌ WRONG!                       │
//! │                                                                     │
//! │  In many retail systems:                                            │
//! │    £10.00 / 3 = £3.33 (×3 = £9.99)  → Lost £0.01!                  │
//! │                                                                     │
//! │  OUR SOLUTION: Integer Pence                                        │
//! │    1000 pence / 3 = 333 pence (×3 = 999 pence)                     │
//! │    We KNOW we lost a penny, and handle it explicitly               │
//! │                                                                     │
//! └─────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//! ```rust
//! use till_core::money::Money;
//!
//! // Create from pence (preferred)
//! let price = Money::from_pence(1099); // £10.99
//!
//! // Arithmetic operations
//! let doubled = price * 2;                     // £21.98
//! let total = price + Money::from_pence(500);  // £15.99
//!
//! // NEVER do this:
//! // let bad = Money::from_float(10.99); // NO SUCH METHOD EXISTS!
//! ```

use serde::{Deserialize, Serialize};
use std::fmt;
use std::iter::Sum;
use std::ops::{Add, AddAssign, Mul, Sub, SubAssign};

use crate::types::DiscountRate;

// =============================================================================
// Money Type
// =============================================================================

/// Represents a monetary value in the smallest currency unit (pence for GBP).
///
/// ## Design Decisions
/// - **i64 (signed)**: Allows negative values for refunds and corrections
/// - **Single field tuple struct**: Zero-cost abstraction over i64
/// - **Derives**: Full serde support for JSON serialization
///
/// ## Where Money Flows
/// ```text
/// Product.price ──► Cart.total() ──► DiscountEngine ──► Checkout
///                                                            │
///                                        Customer.balance ◄──┘
/// ```
/// Every monetary value in the system goes through this type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct Money(i64);

impl Money {
    /// Creates a Money value from pence (the smallest currency unit).
    ///
    /// ## Example
    /// ```rust
    /// use till_core::money::Money;
    ///
    /// let price = Money::from_pence(1099); // Represents £10.99
    /// assert_eq!(price.pence(), 1099);
    /// ```
    ///
    /// ## Why Pence?
    /// Using the smallest unit eliminates all floating-point concerns.
    /// Calculations and records all use pence. Only display code
    /// converts to pounds.
    #[inline]
    pub const fn from_pence(pence: i64) -> Self {
        Money(pence)
    }

    /// Creates a Money value from whole pounds.
    ///
    /// ## Example
    /// ```rust
    /// use till_core::money::Money;
    ///
    /// let price = Money::from_pounds(6);
    /// assert_eq!(price.pence(), 600);
    /// ```
    #[inline]
    pub const fn from_pounds(pounds: i64) -> Self {
        Money(pounds * 100)
    }

    /// Returns the value in pence (smallest currency unit).
    #[inline]
    pub const fn pence(&self) -> i64 {
        self.0
    }

    /// Returns the whole pounds portion.
    ///
    /// ## Example
    /// ```rust
    /// use till_core::money::Money;
    ///
    /// assert_eq!(Money::from_pence(1099).pounds(), 10);
    /// assert_eq!(Money::from_pence(-550).pounds(), -5);
    /// ```
    #[inline]
    pub const fn pounds(&self) -> i64 {
        self.0 / 100
    }

    /// Returns the pence portion (always 0-99).
    #[inline]
    pub const fn pence_part(&self) -> i64 {
        (self.0 % 100).abs()
    }

    /// Returns zero money value.
    #[inline]
    pub const fn zero() -> Self {
        Money(0)
    }

    /// Checks if the value is zero.
    #[inline]
    pub const fn is_zero(&self) -> bool {
        self.0 == 0
    }

    /// Checks if the value is negative (less than zero).
    #[inline]
    pub const fn is_negative(&self) -> bool {
        self.0 < 0
    }

    /// Computes a fraction of this amount given a rate in basis points.
    ///
    /// ## Rounding
    /// Uses integer math with half-up rounding:
    /// `(amount * bps + 5000) / 10000`. The +5000 provides rounding
    /// (5000/10000 = 0.5). i128 intermediates prevent overflow on large
    /// amounts.
    ///
    /// ## Example
    /// ```rust
    /// use till_core::money::Money;
    /// use till_core::types::DiscountRate;
    ///
    /// let total = Money::from_pence(600);       // £6.00
    /// let rate = DiscountRate::from_bps(1000);  // 10%
    ///
    /// // 10% of £6.00 = £0.60
    /// assert_eq!(total.percent_of(rate), Money::from_pence(60));
    /// ```
    ///
    /// ## Where This Is Used
    /// ```text
    /// Cart Total: £6.00
    ///      │
    ///      ▼
    /// percent_of(10%) ← THIS FUNCTION
    ///      │
    ///      ▼
    /// Discount Amount: £0.60
    /// ```
    pub fn percent_of(&self, rate: DiscountRate) -> Money {
        let part = (self.0 as i128 * rate.bps() as i128 + 5000) / 10000;
        Money::from_pence(part as i64)
    }

    /// Subtracts `amount`, clamping the result at zero.
    ///
    /// ## Example
    /// ```rust
    /// use till_core::money::Money;
    ///
    /// let total = Money::from_pence(400);
    /// assert_eq!(total.saturating_deduct(Money::from_pence(60)), Money::from_pence(340));
    /// assert_eq!(total.saturating_deduct(Money::from_pence(9999)), Money::zero());
    /// ```
    ///
    /// ## Why Clamp?
    /// A running discounted total can never go below zero no matter how
    /// large the cumulative discounts are.
    #[inline]
    pub fn saturating_deduct(&self, amount: Money) -> Money {
        Money(self.0 - amount.0).max(Money::zero())
    }
}

// =============================================================================
// Trait Implementations
// =============================================================================

/// Display implementation shows money in a human-readable format.
///
/// ## Note
/// This is the format used on receipts and in log events: `£10.99`.
impl fmt::Display for Money {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let sign = if self.0 < 0 { "-" } else { "" };
        write!(f, "{}£{}.{:02}", sign, self.pounds().abs(), self.pence_part())
    }
}

/// Default money is zero.
impl Default for Money {
    fn default() -> Self {
        Money::zero()
    }
}

/// Addition of two Money values.
impl Add for Money {
    type Output = Self;

    #[inline]
    fn add(self, other: Self) -> Self {
        Money(self.0 + other.0)
    }
}

/// Addition assignment (+=).
impl AddAssign for Money {
    #[inline]
    fn add_assign(&mut self, other: Self) {
        self.0 += other.0;
    }
}

/// Subtraction of two Money values.
impl Sub for Money {
    type Output = Self;

    #[inline]
    fn sub(self, other: Self) -> Self {
        Money(self.0 - other.0)
    }
}

/// Subtraction assignment (-=).
impl SubAssign for Money {
    #[inline]
    fn sub_assign(&mut self, other: Self) {
        self.0 -= other.0;
    }
}

/// Multiplication by an integer count (for "N free units" calculations).
impl Mul<i64> for Money {
    type Output = Self;

    #[inline]
    fn mul(self, count: i64) -> Self {
        Money(self.0 * count)
    }
}

/// Summing an iterator of Money values (cart totals).
impl Sum for Money {
    fn sum<I: Iterator<Item = Money>>(iter: I) -> Self {
        iter.fold(Money::zero(), Add::add)
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
