//! # checkout-core: Pure Business Logic for the Electro World Checkout
//!
//! This crate is the **heart** of the checkout form. It contains the order
//! state rules and all pricing math as pure functions with zero I/O.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                     Electro World Checkout                              │
//! │                                                                         │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │                 checkout-cli (terminal form)                    │   │
//! │  │    Catalog Loader ──► Product Table ──► Order Summary           │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │ add / remove                           │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │               ★ checkout-core (THIS CRATE) ★                    │   │
//! │  │                                                                 │   │
//! │  │   ┌───────────┐  ┌───────────┐  ┌───────────┐  ┌───────────┐  │   │
//! │  │   │   types   │  │   money   │  │   order   │  │  pricing  │  │   │
//! │  │   │  Product  │  │   Money   │  │OrderState │  │ discounts │  │   │
//! │  │   │ LineItem  │  │           │  │           │  │  totals   │  │   │
//! │  │   └───────────┘  └───────────┘  └───────────┘  └───────────┘  │   │
//! │  │                                                                 │   │
//! │  │   NO I/O • NO NETWORK • PURE FUNCTIONS                          │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Modules
//!
//! - [`types`] - Domain types (ProductId, Product, LineItem)
//! - [`catalog`] - The validated, ordered product list
//! - [`money`] - Money type with integer arithmetic (no floating point!)
//! - [`order`] - The order state manager (add/remove with stock bounds)
//! - [`pricing`] - Line totals, discount and order summary
//! - [`error`] - Domain error types
//! - [`validation`] - Business rule validation
//!
//! ## Example Usage
//!
//! ```rust
//! use checkout_core::{Money, OrderState, Product, ProductId};
//! use checkout_core::pricing::{OrderSummary, TotalPolicy};
//!
//! let tv = Product::new(ProductId::new(1), "Television", 15, Money::from_cents(100_00)).unwrap();
//!
//! let mut order = OrderState::new();
//! for _ in 0..11 {
//!     order.add(&tv).unwrap();
//! }
//!
//! let summary = OrderSummary::compute(order.items(), TotalPolicy::Undiscounted);
//! assert_eq!(summary.subtotal.cents(), 1100_00);
//! assert_eq!(summary.discount.cents(), 110_00);
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod catalog;
pub mod error;
pub mod money;
pub mod order;
pub mod pricing;
pub mod types;
pub mod validation;

// =============================================================================
// Re-exports for Convenience
// =============================================================================

pub use catalog::Catalog;
pub use error::{CoreError, CoreResult, ValidationError};
pub use money::Money;
pub use order::OrderState;
pub use types::*;

// =============================================================================
// Crate-Level Constants
// =============================================================================

/// Subtotal an order must strictly exceed before the discount applies.
///
/// ## Business Reason
/// Orders over $1000.00 get 10% off. An order of exactly $1000.00 does not.
pub const DISCOUNT_THRESHOLD: Money = Money::from_cents(1000_00);

/// Discount rate in basis points (1000 bps = 10%).
pub const DISCOUNT_BPS: u32 = 1000;

/// Maximum number of products accepted from a catalog provider.
pub const MAX_CATALOG_SIZE: usize = 10_000;

/// Upper bound for `price × available_count` of a single product.
///
/// Together with [`MAX_CATALOG_SIZE`] this keeps every line total and the
/// order subtotal inside `i64` cents.
pub const MAX_LINE_TOTAL: Money = Money::from_cents(100_000_000_000_000);

/// Maximum length of a product name.
pub const MAX_PRODUCT_NAME_LEN: usize = 200;
