//! # Domain Types
//!
//! Core domain types used throughout Till.
//!
//! ## Type Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────┐
//! │                         Domain Types                                │
//! │                                                                     │
//! │  ┌─────────────────┐   ┌─────────────────┐   ┌─────────────────┐   │
//! │  │    Product      │   │    Customer     │   │     Order       │   │
//! │  │  ─────────────  │   │  ─────────────  │   │  ─────────────  │   │
//! │  │  id (UUID)      │   │  id (UUID)      │   │  id (UUID)      │   │
//! │  │  name           │   │  name           │   │  customer_id    │   │
//! │  │  price_pence    │   │  email          │   │  cart           │   │
//! │  │  category       │   │  balance_pence  │   │  total_pence    │   │
//! │  └─────────────────┘   └─────────────────┘   └─────────────────┘   │
//! │                                                                     │
//! │  ┌─────────────────┐   ┌─────────────────┐                         │
//! │  │    Category     │   │  DiscountRate   │                         │
//! │  │  ─────────────  │   │  ─────────────  │                         │
//! │  │  Electronics    │   │  bps (u32)      │                         │
//! │  │  Clothing       │   │  1000 = 10%     │                         │
//! │  │  Groceries      │   └─────────────────┘                         │
//! │  └─────────────────┘                                               │
//! └─────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Immutability
//! Products and orders never change after construction; fields are private
//! and exposed through accessors. The one sanctioned mutation in the whole
//! domain is a customer balance debit during checkout, and that is
//! `pub(crate)` so nothing outside this crate can reach it.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

use crate::cart::Cart;
use crate::discount::DiscountSummary;
use crate::error::CoreResult;
use crate::money::Money;
use crate::validation::{validate_email, validate_name, validate_price};

// =============================================================================
// Discount Rate
// =============================================================================

/// Discount rate represented in basis points (bps).
///
/// ## Why Basis Points?
/// 1 basis point = 0.01% = 1/10000
/// 1000 bps = 10% (the classic storewide offer)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DiscountRate(u32);

impl DiscountRate {
    /// Creates a discount rate from basis points.
    #[inline]
    pub const fn from_bps(bps: u32) -> Self {
        DiscountRate(bps)
    }

    /// Creates a discount rate from a percentage (for convenience).
    pub fn from_percentage(pct: f64) -> Self {
        DiscountRate((pct * 100.0).round() as u32)
    }

    /// Returns the rate in basis points.
    #[inline]
    pub const fn bps(&self) -> u32 {
        self.0
    }

    /// Returns the rate as a percentage (for display only).
    #[inline]
    pub fn percentage(&self) -> f64 {
        self.0 as f64 / 100.0
    }
}

// =============================================================================
// Category
// =============================================================================

/// The product category.
///
/// A closed set: matching on it is exhaustive, so forgetting to handle a
/// new category anywhere is a compile error.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Category {
    Electronics,
    Clothing,
    Groceries,
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Category::Electronics => "electronics",
            Category::Clothing => "clothing",
            Category::Groceries => "groceries",
        };
        write!(f, "{}", label)
    }
}

// =============================================================================
// Product
// =============================================================================

/// A product available for sale.
///
/// Immutable once created: construction validates the name and price,
/// and there are no setters. Cloning a product into a cart therefore
/// freezes exactly the data that was validated.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Product {
    /// Unique identifier (UUID v4).
    id: String,

    /// Display name shown on the receipt.
    name: String,

    /// Price in pence (smallest currency unit).
    price_pence: i64,

    /// Product category.
    category: Category,
}

impl Product {
    /// Creates a new product with a generated id.
    ///
    /// ## Errors
    /// Returns a validation error when the name is empty or too long, or
    /// the price is negative. A zero price is valid (free items).
    ///
    /// ## Example
    /// ```rust
    /// use till_core::{Category, Product};
    /// use till_core::money::Money;
    ///
    /// let milk = Product::new("Milk", Money::from_pence(200), Category::Groceries)?;
    /// assert_eq!(milk.price(), Money::from_pence(200));
    /// # Ok::<(), till_core::CoreError>(())
    /// ```
    pub fn new(
        name: impl Into<String>,
        price: Money,
        category: Category,
    ) -> CoreResult<Self> {
        let name = name.into();
        validate_name("name", &name)?;
        validate_price(price)?;

        Ok(Product {
            id: Uuid::new_v4().to_string(),
            name,
            price_pence: price.pence(),
            category,
        })
    }

    /// Returns the product id.
    #[inline]
    pub fn id(&self) -> &str {
        &self.id
    }

    /// Returns the product name.
    #[inline]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Returns the price as a Money type.
    #[inline]
    pub fn price(&self) -> Money {
        Money::from_pence(self.price_pence)
    }

    /// Returns the product category.
    #[inline]
    pub fn category(&self) -> Category {
        self.category
    }
}

// =============================================================================
// Customer
// =============================================================================

/// A customer with a spendable balance.
///
/// ## Balance Discipline
/// ```text
/// ┌─────────────────────────────────────────────────────────────────────┐
/// │  The balance is mutated in exactly one place: the checkout flow.    │
/// │                                                                     │
/// │  Customer::balance()      ── read access for anyone                 │
/// │  Customer::debit()        ── pub(crate), called once per order      │
/// │                                                                     │
/// │  Checkout takes &mut Customer, so the borrow checker guarantees     │
/// │  no other code observes the balance mid-deduction.                  │
/// └─────────────────────────────────────────────────────────────────────┘
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Customer {
    /// Unique identifier (UUID v4).
    id: String,

    /// Display name.
    name: String,

    /// Contact email address.
    email: String,

    /// Spendable balance in pence.
    balance_pence: i64,
}

impl Customer {
    /// Creates a new customer with a generated id.
    ///
    /// ## Errors
    /// Returns a validation error when the name is empty or too long, or
    /// the email is malformed.
    pub fn new(
        name: impl Into<String>,
        email: impl Into<String>,
        balance: Money,
    ) -> CoreResult<Self> {
        let name = name.into();
        let email = email.into();
        validate_name("name", &name)?;
        validate_email(&email)?;

        Ok(Customer {
            id: Uuid::new_v4().to_string(),
            name,
            email,
            balance_pence: balance.pence(),
        })
    }

    /// Returns the customer id.
    #[inline]
    pub fn id(&self) -> &str {
        &self.id
    }

    /// Returns the customer name.
    #[inline]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Returns the email address.
    #[inline]
    pub fn email(&self) -> &str {
        &self.email
    }

    /// Returns the current balance.
    #[inline]
    pub fn balance(&self) -> Money {
        Money::from_pence(self.balance_pence)
    }

    /// Deducts an amount from the balance.
    ///
    /// Crate-private: only the checkout flow calls this, exactly once
    /// per successful order, after the funds check has passed.
    pub(crate) fn debit(&mut self, amount: Money) {
        self.balance_pence -= amount.pence();
    }
}

// =============================================================================
// Order
// =============================================================================

/// An immutable record of a completed checkout.
///
/// Uses the snapshot pattern: the order owns the cart it was settled
/// against and freezes the totals at checkout time. Later catalog or
/// price changes cannot rewrite history.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Order {
    /// Unique identifier (UUID v4).
    id: String,

    /// Customer the order belongs to.
    customer_id: String,

    /// The settled cart (frozen).
    cart: Cart,

    /// Cart total before discounts, in pence (frozen).
    subtotal_pence: i64,

    /// Combined discount taken off, in pence (frozen).
    discount_pence: i64,

    /// Amount actually deducted from the balance, in pence (frozen).
    total_pence: i64,

    /// When the checkout committed.
    created_at: DateTime<Utc>,
}

impl Order {
    /// Creates an order from a settled checkout.
    ///
    /// Crate-private: orders only come out of a successful checkout.
    pub(crate) fn new(customer: &Customer, cart: Cart, summary: &DiscountSummary) -> Self {
        Order {
            id: Uuid::new_v4().to_string(),
            customer_id: customer.id().to_string(),
            cart,
            subtotal_pence: summary.subtotal.pence(),
            discount_pence: (summary.subtotal - summary.total).pence(),
            total_pence: summary.total.pence(),
            created_at: Utc::now(),
        }
    }

    /// Returns the order id.
    #[inline]
    pub fn id(&self) -> &str {
        &self.id
    }

    /// Returns the id of the customer who placed the order.
    #[inline]
    pub fn customer_id(&self) -> &str {
        &self.customer_id
    }

    /// Returns the settled cart.
    #[inline]
    pub fn cart(&self) -> &Cart {
        &self.cart
    }

    /// Returns the cart total before discounts.
    #[inline]
    pub fn subtotal(&self) -> Money {
        Money::from_pence(self.subtotal_pence)
    }

    /// Returns the combined discount taken off.
    #[inline]
    pub fn discount(&self) -> Money {
        Money::from_pence(self.discount_pence)
    }

    /// Returns the amount deducted from the customer balance.
    #[inline]
    pub fn total(&self) -> Money {
        Money::from_pence(self.total_pence)
    }

    /// Returns when the checkout committed.
    #[inline]
    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_discount_rate_from_bps() {
        let rate = DiscountRate::from_bps(1000);
        assert_eq!(rate.bps(), 1000);
        assert!((rate.percentage() - 10.0).abs() < 0.001);
    }

    #[test]
    fn test_discount_rate_from_percentage() {
        let rate = DiscountRate::from_percentage(10.0);
        assert_eq!(rate.bps(), 1000);
    }

    #[test]
    fn test_category_display() {
        assert_eq!(Category::Electronics.to_string(), "electronics");
        assert_eq!(Category::Clothing.to_string(), "clothing");
        assert_eq!(Category::Groceries.to_string(), "groceries");
    }

    #[test]
    fn test_product_new_generates_distinct_ids() {
        let a = Product::new("Apple", Money::from_pence(100), Category::Groceries).unwrap();
        let b = Product::new("Apple", Money::from_pence(100), Category::Groceries).unwrap();
        assert_ne!(a.id(), b.id());
    }

    #[test]
    fn test_product_new_rejects_bad_input() {
        assert!(Product::new("", Money::from_pence(100), Category::Groceries).is_err());
        assert!(Product::new("Apple", Money::from_pence(-1), Category::Groceries).is_err());

        // Zero price is a valid free item
        assert!(Product::new("Sample", Money::zero(), Category::Groceries).is_ok());
    }

    #[test]
    fn test_customer_new_validates_email() {
        assert!(Customer::new("Alice", "alice.dj@gmail.com", Money::zero()).is_ok());
        assert!(Customer::new("Alice", "nonsense", Money::zero()).is_err());
        assert!(Customer::new("", "alice.dj@gmail.com", Money::zero()).is_err());
    }

    #[test]
    fn test_customer_debit() {
        let mut customer =
            Customer::new("Alice", "alice.dj@gmail.com", Money::from_pence(1000)).unwrap();
        customer.debit(Money::from_pence(340));
        assert_eq!(customer.balance(), Money::from_pence(660));
    }

    #[test]
    fn test_product_serialization_round_trip() {
        let product = Product::new("Laptop", Money::from_pence(60000), Category::Electronics)
            .unwrap();
        let json = serde_json::to_string(&product).unwrap();
        assert!(json.contains("\"electronics\""));

        let back: Product = serde_json::from_str(&json).unwrap();
        assert_eq!(back, product);
    }
}
