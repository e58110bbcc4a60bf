//! # Catalog Commands
//!
//! Runs a catalog fetch and applies the outcome to the checkout state.
//! The caller marks the state as loading first so the form can show the
//! loading indicator while the fetch is in flight.

use tracing::{info, warn};

use crate::catalog::{CatalogLoader, CatalogProvider};
use crate::state::{CatalogStatus, CheckoutState};

/// Awaits the fetch and stores its result; returns true when the catalog
/// is ready.
///
/// Either branch clears the loading flag. A failed fetch is recorded in
/// the state rather than returned, so the session keeps running.
pub async fn complete_load<P: CatalogProvider>(
    state: &mut CheckoutState,
    loader: &CatalogLoader<P>,
) -> bool {
    match loader.fetch().await {
        Ok(catalog) => {
            let products = catalog.len();
            state.load_complete(catalog);
            if let Some(loaded_at) = state.loaded_at() {
                info!(products, loaded_at = %loaded_at.to_rfc3339(), "Catalog ready");
            }
        }
        Err(e) => {
            warn!(error = %e, "Catalog unavailable");
            state.load_failed(e.to_string());
        }
    }

    matches!(state.status(), CatalogStatus::Ready { .. })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::{RetryPolicy, StaticProvider};
    use checkout_core::pricing::TotalPolicy;
    use std::time::Duration;

    fn no_retry() -> RetryPolicy {
        RetryPolicy {
            max_retries: 0,
            initial_backoff: Duration::from_millis(10),
            max_backoff: Duration::from_millis(10),
        }
    }

    #[tokio::test]
    async fn test_successful_load_clears_loading() {
        let loader = CatalogLoader::new(StaticProvider::demo().unwrap(), no_retry());
        let mut state = CheckoutState::new(TotalPolicy::Undiscounted);
        state.begin_load().unwrap();

        assert!(complete_load(&mut state, &loader).await);
        assert!(!state.is_loading());
        assert_eq!(state.catalog().len(), 8);
    }

    #[tokio::test]
    async fn test_failed_load_then_reload() {
        let provider = StaticProvider::demo().unwrap().failing_first(1);
        let loader = CatalogLoader::new(provider, no_retry());
        let mut state = CheckoutState::new(TotalPolicy::Undiscounted);

        state.begin_load().unwrap();
        assert!(!complete_load(&mut state, &loader).await);
        assert!(matches!(state.status(), CatalogStatus::Failed { .. }));
        assert!(!state.is_loading());
        assert!(state.catalog().is_empty());

        state.begin_load().unwrap();
        assert!(complete_load(&mut state, &loader).await);
    }
}
