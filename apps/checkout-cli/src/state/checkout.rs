//! # Checkout State
//!
//! The single state container behind the form: catalog status, the loaded
//! catalog and the order. All changes go through the transition methods.
//!
//! ## Transitions
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                                                                         │
//! │   Idle ──begin_load──► Loading ──load_complete──► Ready                 │
//! │                          │                          │                   │
//! │                     load_failed                 add / remove            │
//! │                          ▼                          │                   │
//! │   Loading ◄─begin_load─ Failed                      ▼                   │
//! │                                                  Ready (new snapshot)   │
//! │                                                                         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! The session loop owns this value outright; nothing here is shared
//! across tasks.

use chrono::{DateTime, Utc};
use checkout_core::pricing::{OrderSummary, TotalPolicy};
use checkout_core::{Catalog, OrderState, Product, ProductId};

use crate::error::AppError;

/// Where the catalog load stands.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CatalogStatus {
    /// Nothing requested yet.
    Idle,
    /// Fetch in flight; the table and summary must not render.
    Loading,
    /// Catalog stored.
    Ready { loaded_at: DateTime<Utc> },
    /// Every fetch attempt failed.
    Failed { reason: String },
}

/// State container owned by the session loop.
#[derive(Debug)]
pub struct CheckoutState {
    status: CatalogStatus,
    catalog: Catalog,
    order: OrderState,
    total_policy: TotalPolicy,
}

impl CheckoutState {
    pub fn new(total_policy: TotalPolicy) -> Self {
        CheckoutState {
            status: CatalogStatus::Idle,
            catalog: Catalog::empty(),
            order: OrderState::new(),
            total_policy,
        }
    }

    // =========================================================================
    // Catalog transitions
    // =========================================================================

    /// Marks the catalog as loading.
    ///
    /// Allowed from `Idle` and `Failed`. The catalog loads once, so a
    /// `Ready` state refuses a second load; a load already in flight is
    /// refused as well.
    pub fn begin_load(&mut self) -> Result<(), AppError> {
        match self.status {
            CatalogStatus::Idle | CatalogStatus::Failed { .. } => {
                self.status = CatalogStatus::Loading;
                Ok(())
            }
            CatalogStatus::Loading => Err(AppError::not_ready("Catalog is already loading")),
            CatalogStatus::Ready { .. } => {
                Err(AppError::invalid_command("Catalog is already loaded"))
            }
        }
    }

    /// Stores the fetched catalog and clears the loading flag.
    pub fn load_complete(&mut self, catalog: Catalog) {
        self.catalog = catalog;
        self.order = OrderState::new();
        self.status = CatalogStatus::Ready {
            loaded_at: Utc::now(),
        };
    }

    /// Records a failed load and clears the loading flag.
    pub fn load_failed(&mut self, reason: impl Into<String>) {
        self.status = CatalogStatus::Failed {
            reason: reason.into(),
        };
    }

    // =========================================================================
    // Order transitions
    // =========================================================================

    /// Adds one unit of a product; returns the new quantity.
    pub fn add(&mut self, id: ProductId) -> Result<u32, AppError> {
        self.ensure_ready()?;
        let product = self.catalog.get(id)?;
        Ok(self.order.add(product)?)
    }

    /// Removes one unit of a product; returns the new quantity.
    pub fn remove(&mut self, id: ProductId) -> Result<u32, AppError> {
        self.ensure_ready()?;
        let product = self.catalog.get(id)?;
        Ok(self.order.remove(product)?)
    }

    fn ensure_ready(&self) -> Result<(), AppError> {
        match &self.status {
            CatalogStatus::Ready { .. } => Ok(()),
            CatalogStatus::Idle | CatalogStatus::Loading => {
                Err(AppError::not_ready("Catalog is still loading"))
            }
            CatalogStatus::Failed { .. } => Err(AppError::not_ready(
                "Catalog is unavailable; use `reload` to try again",
            )),
        }
    }

    // =========================================================================
    // Read access
    // =========================================================================

    pub fn status(&self) -> &CatalogStatus {
        &self.status
    }

    /// When the current catalog was stored; `None` unless `Ready`.
    pub fn loaded_at(&self) -> Option<DateTime<Utc>> {
        match self.status {
            CatalogStatus::Ready { loaded_at } => Some(loaded_at),
            _ => None,
        }
    }

    pub fn is_loading(&self) -> bool {
        matches!(self.status, CatalogStatus::Loading)
    }

    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    pub fn order(&self) -> &OrderState {
        &self.order
    }

    pub fn product(&self, id: ProductId) -> Option<&Product> {
        self.catalog.find(id)
    }

    /// Order summary, recomputed from the current line items.
    pub fn summary(&self) -> OrderSummary {
        OrderSummary::compute(self.order.items(), self.total_policy)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorCode;
    use checkout_core::Money;

    fn catalog() -> Catalog {
        Catalog::new(vec![
            Product::new(ProductId::new(1), "Headphones", 2, Money::from_cents(50_00)).unwrap(),
            Product::new(ProductId::new(2), "Charger", 10, Money::from_cents(30_00)).unwrap(),
        ])
        .unwrap()
    }

    fn ready_state() -> CheckoutState {
        let mut state = CheckoutState::new(TotalPolicy::Undiscounted);
        state.begin_load().unwrap();
        state.load_complete(catalog());
        state
    }

    #[test]
    fn test_load_lifecycle() {
        let mut state = CheckoutState::new(TotalPolicy::Undiscounted);
        assert_eq!(state.status(), &CatalogStatus::Idle);

        state.begin_load().unwrap();
        assert!(state.is_loading());
        assert!(state.begin_load().is_err());

        let before = Utc::now();
        state.load_complete(catalog());
        assert!(!state.is_loading());
        assert!(matches!(state.status(), CatalogStatus::Ready { .. }));
        assert!(state.loaded_at().is_some_and(|at| at >= before));
        assert_eq!(state.catalog().len(), 2);

        // Loaded once
        assert!(state.begin_load().is_err());
    }

    #[test]
    fn test_failed_load_can_be_retried() {
        let mut state = CheckoutState::new(TotalPolicy::Undiscounted);
        state.begin_load().unwrap();
        state.load_failed("provider offline");

        assert!(!state.is_loading());
        assert_eq!(state.loaded_at(), None);
        let err = state.add(ProductId::new(1)).unwrap_err();
        assert_eq!(err.code, ErrorCode::CatalogNotReady);

        state.begin_load().unwrap();
        assert!(state.is_loading());
    }

    #[test]
    fn test_order_commands_rejected_while_loading() {
        let mut state = CheckoutState::new(TotalPolicy::Undiscounted);
        state.begin_load().unwrap();

        assert_eq!(
            state.add(ProductId::new(1)).unwrap_err().code,
            ErrorCode::CatalogNotReady
        );
        assert_eq!(
            state.remove(ProductId::new(1)).unwrap_err().code,
            ErrorCode::CatalogNotReady
        );
    }

    #[test]
    fn test_add_and_remove_through_state() {
        let mut state = ready_state();

        assert_eq!(state.add(ProductId::new(1)).unwrap(), 1);
        assert_eq!(state.add(ProductId::new(1)).unwrap(), 2);
        assert_eq!(
            state.add(ProductId::new(1)).unwrap_err().code,
            ErrorCode::OutOfStock
        );

        assert_eq!(state.remove(ProductId::new(1)).unwrap(), 1);
        assert_eq!(state.remove(ProductId::new(1)).unwrap(), 0);
        assert_eq!(
            state.remove(ProductId::new(1)).unwrap_err().code,
            ErrorCode::NotInOrder
        );
    }

    #[test]
    fn test_unknown_product() {
        let mut state = ready_state();
        assert_eq!(
            state.add(ProductId::new(99)).unwrap_err().code,
            ErrorCode::NotFound
        );
    }

    #[test]
    fn test_summary_is_derived() {
        let mut state = ready_state();
        state.add(ProductId::new(1)).unwrap();
        state.add(ProductId::new(1)).unwrap();
        for _ in 0..3 {
            state.add(ProductId::new(2)).unwrap();
        }

        let summary = state.summary();
        assert_eq!(summary.subtotal.cents(), 190_00);
        assert_eq!(summary.total.cents(), 190_00);
        assert!(!summary.has_discount());
    }
}
