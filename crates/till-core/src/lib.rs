//! # till-core: Pure Business Logic for Till
//!
//! This crate is the **heart** of Till. It contains all business logic
//! as pure functions with zero I/O dependencies.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────┐
//! │                         Till Architecture                           │
//! │                                                                     │
//! │  ┌─────────────────────────────────────────────────────────────┐   │
//! │  │                  apps/register (binary)                     │   │
//! │  │    Seed Catalog ──► Fill Cart ──► Checkout ──► Receipt      │   │
//! │  └─────────────────────────────┬───────────────────────────────┘   │
//! │                                │                                    │
//! │  ┌─────────────────────────────▼───────────────────────────────┐   │
//! │  │               ★ till-core (THIS CRATE) ★                    │   │
//! │  │                                                             │   │
//! │  │  ┌─────────┐ ┌─────────┐ ┌─────────┐ ┌──────────┐          │   │
//! │  │  │  types  │ │  money  │ │  cart   │ │ discount │          │   │
//! │  │  │ Product │ │  Money  │ │  Cart   │ │  rules   │          │   │
//! │  │  │Customer │ │  Rate   │ │  total  │ │  engine  │          │   │
//! │  │  └─────────┘ └─────────┘ └─────────┘ └──────────┘          │   │
//! │  │                                                             │   │
//! │  │  ┌──────────┐ ┌───────────┐                                 │   │
//! │  │  │ checkout │ │ validation│                                 │   │
//! │  │  └──────────┘ └───────────┘                                 │   │
//! │  │                                                             │   │
//! │  │  NO I/O • NO DATABASE • NO NETWORK • PURE FUNCTIONS         │   │
//! │  └─────────────────────────────────────────────────────────────┘   │
//! └─────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Modules
//!
//! - [`types`] - Domain types (Product, Category, Customer, Order)
//! - [`money`] - Money type with integer arithmetic (no floating point!)
//! - [`cart`] - The shopping cart: ordered product entries and totals
//! - [`discount`] - Discount rules and the discount engine
//! - [`checkout`] - The checkout flow: funds check, debit, order creation
//! - [`error`] - Domain error types
//! - [`validation`] - Business rule validation
//!
//! ## Design Principles
//!
//! 1. **Pure Functions**: Every function is deterministic - same input = same output
//! 2. **No I/O**: Database, network, file system access is FORBIDDEN here
//! 3. **Integer Money**: All monetary values are in pence (i64) to avoid float errors
//! 4. **Explicit Errors**: All errors are typed, never strings or panics
//! 5. **Exclusive Mutation**: Only checkout touches a customer balance, and it
//!    holds the only mutable borrow while it does
//!
//! ## Example Usage
//!
//! ```rust
//! use till_core::{Cart, Category, DiscountEngine, Product, process_checkout};
//! use till_core::money::Money;
//! use till_core::types::Customer;
//!
//! let milk = Product::new("Milk", Money::from_pence(200), Category::Groceries)?;
//! let mut cart = Cart::new();
//! cart.add(milk);
//!
//! let mut customer = Customer::new("Alice", "alice@example.com", Money::from_pence(1000))?;
//! let order = process_checkout(&mut customer, &cart, &DiscountEngine::new())?;
//!
//! // No discount rules: the full cart total is deducted
//! assert_eq!(order.total(), Money::from_pence(200));
//! assert_eq!(customer.balance(), Money::from_pence(800));
//! # Ok::<(), till_core::CoreError>(())
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod cart;
pub mod checkout;
pub mod discount;
pub mod error;
pub mod money;
pub mod types;
pub mod validation;

// =============================================================================
// Re-exports for Convenience
// =============================================================================
// These allow users to do `use till_core::Money` instead of
// `use till_core::money::Money`

pub use cart::Cart;
pub use checkout::process_checkout;
pub use discount::{
    BuyOneGetOneFree, DiscountEngine, DiscountResult, DiscountRule, DiscountSummary, PercentOff,
};
pub use error::{CoreError, CoreResult, ValidationError};
pub use money::Money;
pub use types::*;

// =============================================================================
// Crate-Level Constants
// =============================================================================

/// Maximum length of a product or customer name.
///
/// ## Business Reason
/// Keeps receipt lines and exported records bounded. Long enough for any
/// real product name, short enough to catch pasted garbage.
pub const MAX_NAME_LEN: usize = 200;

/// Maximum discount rate in basis points (10000 = 100%).
///
/// ## Business Reason
/// A discount can wipe out a price entirely but never exceed it. Rates
/// above 100% are always a data entry mistake.
pub const MAX_RATE_BPS: u32 = 10_000;
