//! # Order Commands
//!
//! The "+" and "-" buttons of a product row.
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  #  Product          In stock   Price     Qty   Total                   │
//! │  1  Headphones             15   $100.00    11   $990.00   [+] [-]       │
//! │                                                             │    │      │
//! │                                          add_to_order ◄─────┘    │      │
//! │                                     remove_from_order ◄──────────┘      │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! A rejected press leaves the order untouched.

use checkout_core::ProductId;
use tracing::debug;

use crate::error::AppError;
use crate::state::CheckoutState;

/// Orders one more unit of `product_id`.
///
/// ## Returns
/// The new quantity for the product
///
/// ## Errors
/// - `CatalogNotReady` while the catalog is loading or unavailable
/// - `NotFound` for an id outside the catalog
/// - `OutOfStock` when the quantity already equals the available count
pub fn add_to_order(state: &mut CheckoutState, product_id: ProductId) -> Result<u32, AppError> {
    debug!(product_id = %product_id, "add_to_order command");

    let quantity = state.add(product_id)?;

    debug!(product_id = %product_id, quantity, "Order quantity increased");
    Ok(quantity)
}

/// Orders one less unit of `product_id`. The line item disappears at zero.
///
/// ## Errors
/// - `CatalogNotReady` while the catalog is loading or unavailable
/// - `NotFound` for an id outside the catalog
/// - `NotInOrder` when nothing of the product is ordered
pub fn remove_from_order(
    state: &mut CheckoutState,
    product_id: ProductId,
) -> Result<u32, AppError> {
    debug!(product_id = %product_id, "remove_from_order command");

    let quantity = state.remove(product_id)?;

    debug!(product_id = %product_id, quantity, "Order quantity decreased");
    Ok(quantity)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorCode;
    use checkout_core::pricing::TotalPolicy;
    use checkout_core::{Catalog, Money, Product};

    fn ready_state() -> CheckoutState {
        let mut state = CheckoutState::new(TotalPolicy::Undiscounted);
        state.begin_load().unwrap();
        state.load_complete(
            Catalog::new(vec![Product::new(
                ProductId::new(1),
                "Television",
                15,
                Money::from_cents(100_00),
            )
            .unwrap()])
            .unwrap(),
        );
        state
    }

    #[test]
    fn test_eleven_televisions() {
        let mut state = ready_state();
        let id = ProductId::new(1);

        for expected in 1..=11 {
            assert_eq!(add_to_order(&mut state, id).unwrap(), expected);
        }

        let summary = state.summary();
        assert_eq!(summary.subtotal.cents(), 1100_00);
        assert_eq!(summary.discount.cents(), 110_00);
        assert_eq!(summary.total.cents(), 1100_00);
    }

    #[test]
    fn test_rejected_remove_keeps_order() {
        let mut state = ready_state();
        let before = state.order().snapshot();

        let err = remove_from_order(&mut state, ProductId::new(1)).unwrap_err();
        assert_eq!(err.code, ErrorCode::NotInOrder);
        assert!(std::sync::Arc::ptr_eq(&before, &state.order().snapshot()));
    }
}
