//! # Cart Module
//!
//! The shopping cart: an ordered, mutable collection of product entries
//! for one customer session.
//!
//! ## Cart Semantics
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────┐
//! │                       Cart Semantics                                │
//! │                                                                     │
//! │  • Entries keep INSERTION ORDER                                     │
//! │  • Duplicates are allowed: adding the same product twice means      │
//! │    two units (quantity rules count entries, not a qty field)        │
//! │  • total() is RECOMPUTED on every call: there is no cached total    │
//! │    to go stale                                                      │
//! │  • One cart belongs to one checkout flow; it is never shared        │
//! │    across customers                                                 │
//! └─────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Concurrent access to the same cart from multiple threads is
//! unsupported: take `&mut Cart` and let the borrow checker arbitrate.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::ops::Index;

use crate::money::Money;
use crate::types::Product;

/// An ordered multiset of products for one checkout.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Cart {
    /// Product entries in insertion order.
    items: Vec<Product>,
}

impl Cart {
    /// Creates a new empty cart.
    pub fn new() -> Self {
        Cart { items: Vec::new() }
    }

    /// Appends a product entry to the cart.
    ///
    /// ## Behavior
    /// Always appends: adding a product already in the cart adds another
    /// unit of it. No side effects beyond the cart's own mutation.
    pub fn add(&mut self, product: Product) {
        self.items.push(product);
    }

    /// Returns the number of entries in the cart.
    ///
    /// Duplicates count individually: two apples are two entries.
    #[inline]
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Checks if the cart is empty.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Returns the entries as a slice, in insertion order.
    #[inline]
    pub fn items(&self) -> &[Product] {
        &self.items
    }

    /// Iterates over the entries in insertion order.
    pub fn iter(&self) -> std::slice::Iter<'_, Product> {
        self.items.iter()
    }

    /// Calculates the cart total.
    ///
    /// ## No Caching
    /// Recomputed from the current entries on every call, so the result
    /// always reflects the cart as it is right now.
    ///
    /// ## Example
    /// ```rust
    /// use till_core::{Cart, Category, Product};
    /// use till_core::money::Money;
    ///
    /// let apple = Product::new("Apple", Money::from_pence(100), Category::Groceries)?;
    /// let mut cart = Cart::new();
    /// cart.add(apple.clone());
    /// cart.add(apple);
    ///
    /// assert_eq!(cart.total(), Money::from_pence(200));
    /// # Ok::<(), till_core::CoreError>(())
    /// ```
    pub fn total(&self) -> Money {
        self.items.iter().map(Product::price).sum()
    }

    /// Counts the entries matching a product id.
    ///
    /// Quantity-based rules (buy one get one free) count occurrences of
    /// a specific product with this.
    pub fn count_of(&self, product_id: &str) -> usize {
        self.items.iter().filter(|p| p.id() == product_id).count()
    }
}

/// Position access into the cart, in insertion order.
impl Index<usize> for Cart {
    type Output = Product;

    fn index(&self, index: usize) -> &Product {
        &self.items[index]
    }
}

/// Iteration over `&Cart` (for loops without calling `.iter()`).
impl<'a> IntoIterator for &'a Cart {
    type Item = &'a Product;
    type IntoIter = std::slice::Iter<'a, Product>;

    fn into_iter(self) -> Self::IntoIter {
        self.items.iter()
    }
}

/// Receipt-style rendering: one line per entry.
impl fmt::Display for Cart {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Cart")?;
        for product in &self.items {
            writeln!(f, "  - {} - {}", product.name(), product.price())?;
        }
        Ok(())
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
