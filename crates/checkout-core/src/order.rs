//! # Order State Manager
//!
//! Owns the selected line items and enforces the stock bounds.
//!
//! ## Operations
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Order State Operations                               │
//! │                                                                         │
//! │  User Action        Operation          Line Items                       │
//! │  ───────────        ─────────          ──────────                       │
//! │                                                                         │
//! │  "+" (no item) ───► add(p) ──────────► push { qty: 1 }                 │
//! │  "+" (qty < max) ─► add(p) ──────────► qty += 1                        │
//! │  "+" (qty = max) ─► add(p) ──────────► Err(OutOfStock), unchanged      │
//! │                                                                         │
//! │  "-" (qty > 1) ───► remove(p) ───────► qty -= 1                        │
//! │  "-" (qty = 1) ───► remove(p) ───────► item deleted                    │
//! │  "-" (no item) ───► remove(p) ───────► Err(NotInOrder), unchanged      │
//! │                                                                         │
//! │  Every successful call publishes a NEW snapshot. Snapshots already     │
//! │  handed out are never mutated.                                         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use std::sync::Arc;

use crate::error::{CoreError, CoreResult};
use crate::types::{LineItem, Product, ProductId};

/// The order state manager.
///
/// ## Invariants
/// - At most one line item per product id
/// - Every item has `0 < quantity <= available_count`
/// - Items keep the order in which products were first added
#[derive(Debug, Clone)]
pub struct OrderState {
    items: Arc<[LineItem]>,
}

impl OrderState {
    /// Creates an empty order.
    pub fn new() -> Self {
        OrderState {
            items: Arc::from(Vec::new()),
        }
    }

    /// Adds one unit of `product`.
    ///
    /// ## Returns
    /// The new quantity for the product.
    ///
    /// ## Errors
    /// `OutOfStock` when the new quantity would exceed `available_count`
    /// (including products with nothing available). State is unchanged.
    pub fn add(&mut self, product: &Product) -> CoreResult<u32> {
        let current = self.quantity_of(product.id);
        if current >= product.available_count {
            return Err(CoreError::OutOfStock {
                product_id: product.id,
                available: product.available_count,
            });
        }
        let next = current + 1;

        let mut items = self.items.to_vec();
        match items.iter_mut().find(|i| i.product_id == product.id) {
            Some(item) => item.quantity = next,
            None => items.push(LineItem::first_unit(product)),
        }

        self.publish(items);
        Ok(next)
    }

    /// Removes one unit of `product`.
    ///
    /// ## Returns
    /// The new quantity; 0 means the line item was deleted.
    ///
    /// ## Errors
    /// `NotInOrder` when the product has no line item. State is unchanged.
    pub fn remove(&mut self, product: &Product) -> CoreResult<u32> {
        let current = self.quantity_of(product.id);
        if current == 0 {
            return Err(CoreError::NotInOrder(product.id));
        }

        let next = current - 1;
        let items: Vec<LineItem> = if next == 0 {
            self.items
                .iter()
                .filter(|i| i.product_id != product.id)
                .cloned()
                .collect()
        } else {
            self.items
                .iter()
                .map(|i| {
                    if i.product_id == product.id {
                        LineItem {
                            quantity: next,
                            ..i.clone()
                        }
                    } else {
                        i.clone()
                    }
                })
                .collect()
        };

        self.publish(items);
        Ok(next)
    }

    /// Current line items.
    pub fn items(&self) -> &[LineItem] {
        &self.items
    }

    /// A shared handle to the current snapshot.
    pub fn snapshot(&self) -> Arc<[LineItem]> {
        Arc::clone(&self.items)
    }

    pub fn find(&self, id: ProductId) -> Option<&LineItem> {
        self.items.iter().find(|i| i.product_id == id)
    }

    /// Ordered quantity of a product (0 if it has no line item).
    pub fn quantity_of(&self, id: ProductId) -> u32 {
        self.find(id).map_or(0, |i| i.quantity)
    }

    /// Whether the "+" control is enabled for a product.
    pub fn can_add(&self, product: &Product) -> bool {
        self.quantity_of(product.id) < product.available_count
    }

    /// Whether the "-" control is enabled for a product.
    pub fn can_remove(&self, product: &Product) -> bool {
        self.quantity_of(product.id) > 0
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    fn publish(&mut self, items: Vec<LineItem>) {
        self.items = Arc::from(items);
    }
}

impl Default for OrderState {
    fn default() -> Self {
        Self::new()
    }
}
