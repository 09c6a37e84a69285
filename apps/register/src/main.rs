//! # Till Register
//!
//! Demo register binary: seeds a catalog, runs scripted checkout
//! sessions against till-core, and prints receipts.
//!
//! ## Session Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────┐
//! │                        Register Sessions                            │
//! │                                                                     │
//! │  1. Plain basket ──► no discount rules ──► full total deducted      │
//! │                                                                     │
//! │  2. Offer basket ──► BOGO apples + 10% off ──► discounted total     │
//! │                                                                     │
//! │  3. Short balance ──► funds check fails ──► rejected, no mutation   │
//! └─────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Run with `RUST_LOG=debug` to see every discount evaluation step.

use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

use till_core::money::Money;
use till_core::types::{Category, Customer, DiscountRate, Product};
use till_core::{BuyOneGetOneFree, Cart, DiscountEngine, Order, PercentOff, process_checkout};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    init_tracing();

    info!("Starting Till register demo");

    plain_session()?;
    offer_session()?;
    short_balance_session()?;

    Ok(())
}

/// Initializes tracing (logging).
///
/// Default level is INFO; override with `RUST_LOG`.
fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    tracing_subscriber::fmt().with_env_filter(filter).init();
}

/// A straightforward basket with no offers running.
fn plain_session() -> Result<(), Box<dyn std::error::Error>> {
    let mut customer = Customer::new("Alice", "alice.dj@gmail.com", Money::from_pounds(1000))?;

    let laptop = Product::new("Laptop", Money::from_pounds(600), Category::Electronics)?;
    let t_shirt = Product::new("T-shirt", Money::from_pounds(20), Category::Clothing)?;
    let milk = Product::new("Milk", Money::from_pounds(2), Category::Groceries)?;
    let orange_juice = Product::new("Orange Juice", Money::from_pounds(3), Category::Groceries)?;

    let mut cart = Cart::new();
    cart.add(laptop);
    cart.add(t_shirt);
    cart.add(milk);
    cart.add(orange_juice);

    print!("{cart}");

    let order = process_checkout(&mut customer, &cart, &DiscountEngine::new())?;
    print_receipt(&customer, &order);

    Ok(())
}

/// A basket with the apple BOGO offer and the storewide 10% discount.
fn offer_session() -> Result<(), Box<dyn std::error::Error>> {
    let apple = Product::new("Apple", Money::from_pounds(1), Category::Groceries)?;
    let orange = Product::new("Orange", Money::from_pounds(2), Category::Groceries)?;

    let mut customer = Customer::new("Bob", "bob.builder@gmail.com", Money::from_pounds(1000))?;

    let engine = DiscountEngine::new()
        .with_rule(BuyOneGetOneFree::new(apple.clone()))
        .with_rule(PercentOff::new(DiscountRate::from_bps(1000))?);

    let mut cart = Cart::new();
    cart.add(apple.clone());
    cart.add(apple.clone());
    cart.add(apple.clone());
    cart.add(apple);
    cart.add(orange);

    print!("{cart}");

    let order = process_checkout(&mut customer, &cart, &engine)?;
    print_receipt(&customer, &order);

    Ok(())
}

/// A basket the customer cannot afford: the checkout is rejected and
/// nothing changes.
fn short_balance_session() -> Result<(), Box<dyn std::error::Error>> {
    let mut customer = Customer::new("Carol", "carol@example.com", Money::from_pounds(5))?;

    let laptop = Product::new("Laptop", Money::from_pounds(600), Category::Electronics)?;
    let mut cart = Cart::new();
    cart.add(laptop);

    match process_checkout(&mut customer, &cart, &DiscountEngine::new()) {
        Ok(order) => print_receipt(&customer, &order),
        Err(err) => {
            warn!(customer = %customer.name(), error = %err, "checkout rejected");
            println!("Checkout rejected for {}: {}", customer.name(), err);
        }
    }

    Ok(())
}

/// Prints a settled order as a receipt.
fn print_receipt(customer: &Customer, order: &Order) {
    println!("──────────────────────────────");
    println!("Receipt {}", order.id());
    print!("{}", order.cart());
    println!("  Subtotal: {}", order.subtotal());
    if !order.discount().is_zero() {
        println!("  Discount: -{}", order.discount());
    }
    println!("  Total:    {}", order.total());
    println!("  Remaining balance for {}: {}", customer.name(), customer.balance());
    println!("──────────────────────────────");
}
