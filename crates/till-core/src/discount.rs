//! # Discount Module
//!
//! Discount rules and the engine that applies them to a cart.
//!
//! ## How Discounts Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────┐
//! │                     Discount Evaluation                             │
//! │                                                                     │
//! │  Cart (read-only snapshot)                                          │
//! │       │                                                             │
//! │       ▼                                                             │
//! │  Rule 1 ──► Some(result)? ──► log it, deduct amount (clamp at 0)    │
//! │  Rule 2 ──► None?         ──► skip                                  │
//! │  Rule 3 ──► Some(result)? ──► log it, deduct amount (clamp at 0)    │
//! │       │                                                             │
//! │       ▼                                                             │
//! │  DiscountSummary { subtotal, total, applied }                       │
//! │                                                                     │
//! │  RULES NEVER MUTATE THE CART. Each rule sees the same snapshot,     │
//! │  so a percentage rule reads the raw total, not the running one.     │
//! └─────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Rule Ordering
//! Rules run strictly in the order the caller supplied them. There is no
//! priority system and no reordering; the only order-sensitive effect is
//! the clamp at zero.

use serde::{Deserialize, Serialize};
use std::fmt;
use tracing::{debug, info};

use crate::cart::Cart;
use crate::error::CoreResult;
use crate::money::Money;
use crate::types::{DiscountRate, Product};
use crate::validation::validate_rate_bps;

// =============================================================================
// Discount Result
// =============================================================================

/// The outcome of a single rule that applied: what it was and how much
/// it takes off.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DiscountResult {
    /// Human-readable description, shown on receipts and in logs.
    pub description: String,

    /// Amount taken off the running total (non-negative).
    pub amount: Money,
}

impl DiscountResult {
    /// Creates a discount result.
    pub fn new(description: impl Into<String>, amount: Money) -> Self {
        DiscountResult {
            description: description.into(),
            amount,
        }
    }
}

// =============================================================================
// Discount Rule Trait
// =============================================================================

/// A discount rule: a pure function of a cart snapshot.
///
/// Returning `None` means "this rule does not apply to this cart". A
/// rule must not mutate anything; it only reads the cart.
///
/// ## Implementors
/// - [`PercentOff`] - a flat percentage of the cart total
/// - [`BuyOneGetOneFree`] - every second unit of one product is free
/// - Any closure `Fn(&Cart) -> Option<DiscountResult>` (the blanket impl
///   below), for one-off promotional rules
pub trait DiscountRule {
    /// Evaluates this rule against a cart snapshot.
    fn evaluate(&self, cart: &Cart) -> Option<DiscountResult>;
}

/// Plain closures are rules too.
///
/// ## Example
/// ```rust
/// use till_core::{Cart, DiscountEngine, DiscountResult};
/// use till_core::money::Money;
///
/// let flat_voucher = |_cart: &Cart| {
///     Some(DiscountResult::new("50p voucher", Money::from_pence(50)))
/// };
/// let engine = DiscountEngine::new().with_rule(flat_voucher);
/// assert_eq!(engine.len(), 1);
/// ```
impl<F> DiscountRule for F
where
    F: Fn(&Cart) -> Option<DiscountResult>,
{
    fn evaluate(&self, cart: &Cart) -> Option<DiscountResult> {
        self(cart)
    }
}

// =============================================================================
// Percentage Discount
// =============================================================================

/// Takes a fixed percentage off the cart total.
///
/// Always applies: ten percent of an empty cart is a zero-amount
/// discount, not an absent one.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PercentOff {
    rate: DiscountRate,
}

impl PercentOff {
    /// Creates a percentage discount.
    ///
    /// ## Errors
    /// Returns a validation error when the rate exceeds 100%.
    pub fn new(rate: DiscountRate) -> CoreResult<Self> {
        validate_rate_bps(rate.bps())?;
        Ok(PercentOff { rate })
    }

    /// Returns the rate.
    #[inline]
    pub fn rate(&self) -> DiscountRate {
        self.rate
    }
}

impl DiscountRule for PercentOff {
    fn evaluate(&self, cart: &Cart) -> Option<DiscountResult> {
        let amount = cart.total().percent_of(self.rate);
        Some(DiscountResult::new(
            format!("{}% discount", self.rate.percentage()),
            amount,
        ))
    }
}

// =============================================================================
// Buy One Get One Free
// =============================================================================

/// Every second unit of one specific product is free.
///
/// ## Counting
/// ```text
/// Cart: [Apple, Apple, Orange, Apple, Apple]
///                    │
///                    ▼
/// count_of(Apple) = 4 ──► 4 / 2 = 2 free units ──► discount = 2 × price
/// ```
/// Counts cart entries by product id (integer division by 2), so an
/// unpaired unit earns nothing. When the computed discount is zero the
/// rule does not apply at all (`None`, not a zero-amount result).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BuyOneGetOneFree {
    product: Product,
}

impl BuyOneGetOneFree {
    /// Creates a buy-one-get-one-free rule for a product.
    pub fn new(product: Product) -> Self {
        BuyOneGetOneFree { product }
    }

    /// Returns the product the rule targets.
    #[inline]
    pub fn product(&self) -> &Product {
        &self.product
    }
}

impl DiscountRule for BuyOneGetOneFree {
    fn evaluate(&self, cart: &Cart) -> Option<DiscountResult> {
        let count = cart.count_of(self.product.id()) as i64;
        let amount = self.product.price() * (count / 2);

        if amount.is_zero() {
            return None;
        }

        Some(DiscountResult::new(
            format!("Buy one get one free {}", self.product.name()),
            amount,
        ))
    }
}

// =============================================================================
// Discount Engine
// =============================================================================

/// Applies an ordered list of discount rules to a cart snapshot.
///
/// The engine owns its rules and runs them in insertion order. Rules are
/// independent of each other; the engine is what strings their amounts
/// into one clamped running total.
#[derive(Default)]
pub struct DiscountEngine {
    rules: Vec<Box<dyn DiscountRule>>,
}

impl DiscountEngine {
    /// Creates an engine with no rules.
    pub fn new() -> Self {
        DiscountEngine { rules: Vec::new() }
    }

    /// Adds a rule, builder-style.
    ///
    /// ## Example
    /// ```rust
    /// use till_core::{DiscountEngine, PercentOff};
    /// use till_core::types::DiscountRate;
    ///
    /// let engine = DiscountEngine::new()
    ///     .with_rule(PercentOff::new(DiscountRate::from_bps(1000))?);
    /// assert_eq!(engine.len(), 1);
    /// # Ok::<(), till_core::CoreError>(())
    /// ```
    #[must_use]
    pub fn with_rule(mut self, rule: impl DiscountRule + 'static) -> Self {
        self.rules.push(Box::new(rule));
        self
    }

    /// Appends a rule.
    pub fn push(&mut self, rule: impl DiscountRule + 'static) {
        self.rules.push(Box::new(rule));
    }

    /// Returns the number of rules.
    #[inline]
    pub fn len(&self) -> usize {
        self.rules.len()
    }

    /// Checks if the engine has no rules.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }

    /// Evaluates all rules against a cart snapshot.
    ///
    /// ## Behavior
    /// - Rules run strictly in insertion order
    /// - Each applied rule is logged with its description and amount
    /// - The running total is clamped at zero AFTER EVERY deduction, so
    ///   no intermediate value is ever negative
    /// - An empty rule list returns `total == subtotal`
    ///
    /// The cart is only read; evaluating discounts never mutates it.
    pub fn apply(&self, cart: &Cart) -> DiscountSummary {
        let subtotal = cart.total();
        debug!(subtotal = %subtotal, rules = self.rules.len(), "evaluating discount rules");

        let mut total = subtotal;
        let mut applied = Vec::new();

        for rule in &self.rules {
            if let Some(result) = rule.evaluate(cart) {
                info!(
                    description = %result.description,
                    amount = %result.amount,
                    "applying discount"
                );
                total = total.saturating_deduct(result.amount);
                applied.push(result);
            }
        }

        DiscountSummary {
            subtotal,
            total,
            applied,
        }
    }
}

/// Rule closures aren't Debug; report the rule count instead.
impl fmt::Debug for DiscountEngine {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DiscountEngine")
            .field("rules", &self.rules.len())
            .finish()
    }
}

// =============================================================================
// Discount Summary
// =============================================================================

/// The itemized outcome of a discount evaluation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DiscountSummary {
    /// Cart total before any discount.
    pub subtotal: Money,

    /// Cart total after all applied discounts, clamped at zero.
    pub total: Money,

    /// The rules that applied, in evaluation order.
    pub applied: Vec<DiscountResult>,
}

impl DiscountSummary {
    /// Returns the combined amount taken off.
    ///
    /// Derived from the clamped totals, so it never exceeds the
    /// subtotal even when the nominal discounts would.
    #[inline]
    pub fn discount(&self) -> Money {
        self.subtotal - self.total
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::Category;

    fn product(name: &str, pence: i64) -> Product {
        Product::new(name, Money::from_pence(pence), Category::Groceries).unwrap()
    }

    fn ten_percent() -> PercentOff {
        PercentOff::new(DiscountRate::from_bps(1000)).unwrap()
    }

    #[test]
    fn test_empty_rule_list_keeps_raw_total() {
        let mut cart = Cart::new();
        cart.add(product("Milk", 200));

        let summary = DiscountEngine::new().apply(&cart);
        assert_eq!(summary.subtotal, Money::from_pence(200));
        assert_eq!(summary.total, Money::from_pence(200));
        assert!(summary.applied.is_empty());
        assert!(summary.discount().is_zero());
    }

    #[test]
    fn test_percent_off_alone() {
        let mut cart = Cart::new();
        cart.add(product("Laptop", 60000));

        let engine = DiscountEngine::new().with_rule(ten_percent());
        let summary = engine.apply(&cart);

        // £600.00 × (1 − 0.10) = £540.00
        assert_eq!(summary.total, Money::from_pence(54000));
        assert_eq!(summary.applied.len(), 1);
        assert_eq!(summary.applied[0].description, "10% discount");
        assert_eq!(summary.applied[0].amount, Money::from_pence(6000));
    }

    #[test]
    fn test_percent_off_applies_to_empty_cart() {
        let cart = Cart::new();
        let summary = DiscountEngine::new().with_rule(ten_percent()).apply(&cart);

        // Zero-amount result, not an absent one
        assert_eq!(summary.applied.len(), 1);
        assert!(summary.applied[0].amount.is_zero());
        assert!(summary.total.is_zero());
    }

    #[test]
    fn test_percent_off_rejects_rates_over_100() {
        assert!(PercentOff::new(DiscountRate::from_bps(10001)).is_err());
        assert!(PercentOff::new(DiscountRate::from_bps(10000)).is_ok());
    }

    #[test]
    fn test_cumulative_discounts_clamp_at_zero() {
        let mut cart = Cart::new();
        cart.add(product("Milk", 200));

        // Each rule reads the cart snapshot: 60% of £2.00 = £1.20 twice.
        // £2.00 − £1.20 = £0.80, then £0.80 − £1.20 clamps to £0.00.
        let sixty = PercentOff::new(DiscountRate::from_bps(6000)).unwrap();
        let engine = DiscountEngine::new().with_rule(sixty).with_rule(sixty);
        let summary = engine.apply(&cart);

        assert!(summary.total.is_zero());
        assert_eq!(summary.discount(), Money::from_pence(200));
    }

    #[test]
    fn test_bogo_counts_pairs() {
        let apple = product("Apple", 100);

        let cases = [(1usize, None), (2, Some(100)), (3, Some(100)), (4, Some(200))];
        for (units, expected_pence) in cases {
            let mut cart = Cart::new();
            for _ in 0..units {
                cart.add(apple.clone());
            }

            let rule = BuyOneGetOneFree::new(apple.clone());
            let result = rule.evaluate(&cart);
            match expected_pence {
                None => assert!(result.is_none(), "{} unit(s) should earn nothing", units),
                Some(pence) => {
                    let result = result.expect("discount should apply");
                    assert_eq!(result.amount, Money::from_pence(pence));
                    assert_eq!(result.description, "Buy one get one free Apple");
                }
            }
        }
    }

    #[test]
    fn test_bogo_ignores_other_products() {
        let apple = product("Apple", 100);
        let orange = product("Orange", 200);

        let mut cart = Cart::new();
        cart.add(orange.clone());
        cart.add(orange);

        assert!(BuyOneGetOneFree::new(apple).evaluate(&cart).is_none());
    }

    #[test]
    fn test_bogo_on_free_product_does_not_apply() {
        let sample = product("Free Sample", 0);
        let mut cart = Cart::new();
        cart.add(sample.clone());
        cart.add(sample.clone());

        // Two units but a zero discount: rule reports "does not apply"
        assert!(BuyOneGetOneFree::new(sample).evaluate(&cart).is_none());
    }

    #[test]
    fn test_rules_run_in_supplied_order() {
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
        let summary = engine.apply(&cart);

        let order: Vec<&str> = summary
            .applied
            .iter()
            .map(|d| d.description.as_str())
            .collect();
        assert_eq!(order, ["Buy one get one free Apple", "10% discount"]);

        // £6.00 − £2.00 (BOGO) − £0.60 (10% of the £6.00 snapshot) = £3.40
        assert_eq!(summary.total, Money::from_pence(340));
    }

    #[test]
    fn test_closure_rules() {
        let mut cart = Cart::new();
        cart.add(product("Milk", 200));

        let voucher = |_: &Cart| Some(DiscountResult::new("50p voucher", Money::from_pence(50)));
        let never = |_: &Cart| None;

        let engine = DiscountEngine::new().with_rule(voucher).with_rule(never);
        let summary = engine.apply(&cart);

        assert_eq!(summary.applied.len(), 1);
        assert_eq!(summary.total, Money::from_pence(150));
    }

    #[test]
    fn test_apply_does_not_mutate_cart() {
        let mut cart = Cart::new();
        cart.add(product("Milk", 200));
        let before = cart.clone();

        DiscountEngine::new().with_rule(ten_percent()).apply(&cart);
        assert_eq!(cart, before);
    }
}
