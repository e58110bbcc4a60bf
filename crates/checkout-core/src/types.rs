//! # Domain Types
//!
//! Core domain types used throughout the checkout.
//!
//! ## Type Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Domain Types                                    │
//! │                                                                         │
//! │  ┌─────────────────────┐            ┌─────────────────────┐            │
//! │  │      Product        │            │      LineItem       │            │
//! │  │  ─────────────────  │  add(p) ─► │  ─────────────────  │            │
//! │  │  id (ProductId)     │            │  product_id         │            │
//! │  │  name               │            │  unit_price         │            │
//! │  │  available_count    │            │  quantity (1..=avail│            │
//! │  │  price (Money)      │            │                     │            │
//! │  └─────────────────────┘            └─────────────────────┘            │
//! │                                                                         │
//! │  Products are immutable once loaded. Line items are owned by the       │
//! │  order state manager and never outlive a quantity of zero.             │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use ts_rs::TS;

use crate::error::{CoreResult, ValidationError};
use crate::money::Money;
use crate::validation::{validate_price, validate_product_name, validate_stock_value};

// =============================================================================
// Product Id
// =============================================================================

/// Identifier assigned to a product by the catalog provider.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, TS)]
#[serde(transparent)]
#[ts(export)]
pub struct ProductId(u64);

impl ProductId {
    #[inline]
    pub const fn new(id: u64) -> Self {
        ProductId(id)
    }

    #[inline]
    pub const fn get(&self) -> u64 {
        self.0
    }
}

impl fmt::Display for ProductId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for ProductId {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        s.trim()
            .parse::<u64>()
            .map(ProductId)
            .map_err(|_| ValidationError::InvalidFormat {
                field: "product id".to_string(),
                reason: format!("'{}' is not a number", s.trim()),
            })
    }
}

// =============================================================================
// Product
// =============================================================================

/// A product available for ordering.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct Product {
    /// Unique identifier within the catalog.
    pub id: ProductId,

    /// Display name shown in the product table.
    pub name: String,

    /// How many units can be ordered.
    pub available_count: u32,

    /// Unit price.
    pub price: Money,
}

impl Product {
    /// Creates a validated product.
    ///
    /// ## Rules
    /// - Name must be non-empty after trimming
    /// - Price must not be negative
    /// - `price × available_count` must not exceed [`crate::MAX_LINE_TOTAL`]
    pub fn new(
        id: ProductId,
        name: impl Into<String>,
        available_count: u32,
        price: Money,
    ) -> CoreResult<Self> {
        let name = name.into();
        validate_product_name(&name)?;
        validate_price(price)?;
        validate_stock_value(price, available_count)?;

        Ok(Product {
            id,
            name: name.trim().to_string(),
            available_count,
            price,
        })
    }

    /// Checks whether `quantity` units fit in the available stock.
    #[inline]
    pub fn can_order(&self, quantity: u32) -> bool {
        quantity <= self.available_count
    }
}

// =============================================================================
// Line Item
// =============================================================================

/// One product's selected quantity in the order.
///
/// ## Invariant
/// `0 < quantity <= available_count` of the referenced product. The order
/// state manager is the only thing that creates or changes line items.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct LineItem {
    pub product_id: ProductId,

    /// Price captured from the product when the item was created.
    pub unit_price: Money,

    pub quantity: u32,
}

impl LineItem {
    /// Starts a line item for a product with quantity 1.
    pub fn first_unit(product: &Product) -> Self {
        LineItem {
            product_id: product.id,
            unit_price: product.price,
            quantity: 1,
        }
    }

    /// Line total before any discount (unit price × quantity).
    #[inline]
    pub fn line_total(&self) -> Money {
        self.unit_price.multiply_quantity(self.quantity)
    }
}
