//! # Checkout Module
//!
//! The checkout flow: funds check, balance debit, order creation.
//!
//! ## Checkout State Machine
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────┐
//! │                     Checkout States                                 │
//! │                                                                     │
//! │                    ┌───────────┐                                    │
//! │                    │  Pending  │                                    │
//! │                    └─────┬─────┘                                    │
//! │                          │                                          │
//! │           balance ≥ raw? │                                          │
//! │              ┌───────────┴───────────┐                              │
//! │              ▼                       ▼                              │
//! │        ┌───────────┐          ┌───────────┐                         │
//! │        │ Committed │          │ Rejected  │                         │
//! │        │ Ok(Order) │          │ Err(...)  │                         │
//! │        └───────────┘          └───────────┘                         │
//! │                                                                     │
//! │  No intermediate or retryable states. Committed means the balance   │
//! │  was debited AND the order exists; Rejected means NOTHING changed.  │
//! └─────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! The two terminal states are encoded directly in the `Result`: there
//! is no status field to observe half-way.
//!
//! ## Funds Check Ordering
//! The funds check compares the balance against the PRE-discount total,
//! while the amount actually debited is the POST-discount total. A
//! customer who can only afford the discounted price is still rejected.

use tracing::info;

use crate::cart::Cart;
use crate::discount::DiscountEngine;
use crate::error::{CoreError, CoreResult};
use crate::types::{Customer, Order};

/// Settles a cart against a customer balance.
///
/// ## Contract
/// - Computes the raw cart total, then runs the discount engine over the
///   cart snapshot for the discounted total
/// - Rejects with [`CoreError::InsufficientFunds`] when the balance is
///   below the RAW total; in that case neither the customer nor the
///   cart is touched
/// - On success, debits the DISCOUNTED total from the balance (exactly
///   once) and returns an [`Order`] snapshotting the cart and totals
///
/// Single-threaded and synchronous: the exclusive `&mut Customer`
/// borrow means no partial-failure window exists. Either both the debit
/// and the order happen, or neither does.
///
/// ## Example
/// ```rust
/// use till_core::{Cart, Category, DiscountEngine, Product, process_checkout};
/// use till_core::money::Money;
/// use till_core::types::Customer;
///
/// let mut customer = Customer::new("Alice", "alice@example.com", Money::from_pence(1000))?;
/// let mut cart = Cart::new();
/// cart.add(Product::new("Milk", Money::from_pence(200), Category::Groceries)?);
///
/// let order = process_checkout(&mut customer, &cart, &DiscountEngine::new())?;
/// assert_eq!(order.total(), Money::from_pence(200));
/// assert_eq!(customer.balance(), Money::from_pence(800));
/// # Ok::<(), till_core::CoreError>(())
/// ```
pub fn process_checkout(
    customer: &mut Customer,
    cart: &Cart,
    engine: &DiscountEngine,
) -> CoreResult<Order> {
    let subtotal = cart.total();
    info!(customer = %customer.name(), subtotal = %subtotal, "price before discount");

    let summary = engine.apply(cart);
    info!(total = %summary.total, "price after discount");

    // Funds are checked against the pre-discount total; the debit below
    // uses the post-discount total.
    if customer.balance() < subtotal {
        info!(
            required = %subtotal,
            available = %customer.balance(),
            "insufficient balance, checkout rejected"
        );
        return Err(CoreError::InsufficientFunds {
            required: subtotal,
            available: customer.balance(),
        });
    }

    customer.debit(summary.total);
    let order = Order::new(customer, cart.clone(), &summary);
    info!(
        order_id = %order.id(),
        customer = %customer.name(),
        total = %order.total(),
        "order created"
    );

    Ok(order)
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::discount::{BuyOneGetOneFree, PercentOff};
    use crate::money::Money;
    use crate::types::{Category, DiscountRate, Product};

    fn product(name: &str, pence: i64) -> Product {
        Product::new(name, Money::from_pence(pence), Category::Groceries).unwrap()
    }

    fn customer(balance_pence: i64) -> Customer {
        Customer::new("Bob", "bob.builder@gmail.com", Money::from_pence(balance_pence)).unwrap()
    }

    fn ten_percent() -> PercentOff {
        PercentOff::new(DiscountRate::from_bps(1000)).unwrap()
    }

    #[test]
    fn test_checkout_without_rules_deducts_full_total() {
        let mut cart = Cart::new();
        cart.add(product("Laptop", 60000));
        cart.add(product("T-shirt", 2000));
        cart.add(product("Milk", 200));
        cart.add(product("Orange Juice", 300));

        let mut customer = customer(100_000);
        let order = process_checkout(&mut customer, &cart, &DiscountEngine::new()).unwrap();

        assert_eq!(order.subtotal(), Money::from_pence(62500));
        assert_eq!(order.total(), Money::from_pence(62500));
        assert!(order.discount().is_zero());
        assert_eq!(customer.balance(), Money::from_pence(37500));
    }

    #[test]
    fn test_checkout_with_exact_balance_succeeds() {
        let mut cart = Cart::new();
        cart.add(product("Laptop", 600));

        // Balance exactly equals the raw total
        let mut customer = customer(600);
        let engine = DiscountEngine::new().with_rule(ten_percent());
        let order = process_checkout(&mut customer, &cart, &engine).unwrap();

        // Only the discounted amount is deducted
        assert_eq!(order.total(), Money::from_pence(540));
        assert_eq!(customer.balance(), Money::from_pence(60));
    }

    #[test]
    fn test_checkout_rejects_insufficient_balance() {
        let mut cart = Cart::new();
        cart.add(product("Laptop", 600));

        let mut customer = customer(599);
        let cart_before = cart.clone();
        let balance_before = customer.balance();

        let err = process_checkout(&mut customer, &cart, &DiscountEngine::new()).unwrap_err();
        match err {
            CoreError::InsufficientFunds {
                required,
                available,
            } => {
                assert_eq!(required, Money::from_pence(600));
                assert_eq!(available, Money::from_pence(599));
            }
            other => panic!("unexpected error: {other}"),
        }

        // Rejected means nothing changed
        assert_eq!(customer.balance(), balance_before);
        assert_eq!(cart, cart_before);
    }

    #[test]
    fn test_funds_checked_against_raw_total_not_discounted() {
        let mut cart = Cart::new();
        cart.add(product("Laptop", 600));

        // Half off brings the discounted total to £3.00, which £5.00
        // covers easily. The funds check still uses the raw £6.00, so
        // the checkout is rejected.
        let mut customer = customer(500);
        let half_off = PercentOff::new(DiscountRate::from_bps(5000)).unwrap();
        let engine = DiscountEngine::new().with_rule(half_off);

        let err = process_checkout(&mut customer, &cart, &engine).unwrap_err();
        assert!(matches!(err, CoreError::InsufficientFunds { .. }));
        assert_eq!(customer.balance(), Money::from_pence(500));
    }

    #[test]
    fn test_checkout_reference_trace() {
        // Cart: [Apple £1 ×4, Orange £2], rules: [BOGO(Apple), 10% off]
        let apple = product("Apple", 100);
        let orange = product("Orange", 200);

        let mut cart = Cart::new();
        for _ in 0..4 {
            cart.add(apple.clone());
        }
        cart.add(orange);

        let engine = DiscountEngine::new()
            .with_rule(BuyOneGetOneFree::new(apple))
            .with_rule(ten_percent());

        let mut customer = customer(1000);
        let order = process_checkout(&mut customer, &cart, &engine).unwrap();

        // Raw £6.00; BOGO takes £2.00; 10% of the £6.00 snapshot takes
        // £0.60; discounted total £3.40; balance £10.00 → £6.60
        assert_eq!(order.subtotal(), Money::from_pence(600));
        assert_eq!(order.discount(), Money::from_pence(260));
        assert_eq!(order.total(), Money::from_pence(340));
        assert_eq!(customer.balance(), Money::from_pence(660));

        // The order snapshots the settled cart
        assert_eq!(order.cart().len(), 5);
        assert_eq!(order.customer_id(), customer.id());
    }

    #[test]
    fn test_empty_cart_checkout_is_zero_cost() {
        let cart = Cart::new();
        let mut customer = customer(1000);

        let order = process_checkout(&mut customer, &cart, &DiscountEngine::new()).unwrap();
        assert!(order.total().is_zero());
        assert_eq!(customer.balance(), Money::from_pence(1000));
    }

    #[test]
    fn test_balance_never_goes_negative() {
        let mut cart = Cart::new();
        cart.add(product("Milk", 200));

        // Over-discounting clamps the total at zero; the balance can
        // only ever decrease by the cart total or less.
        let full_off = PercentOff::new(DiscountRate::from_bps(10000)).unwrap();
        let engine = DiscountEngine::new()
            .with_rule(full_off)
            .with_rule(full_off);

        let mut customer = customer(200);
        let order = process_checkout(&mut customer, &cart, &engine).unwrap();

        assert!(order.total().is_zero());
        assert_eq!(customer.balance(), Money::from_pence(200));
        assert!(!customer.balance().is_negative());
    }
}
