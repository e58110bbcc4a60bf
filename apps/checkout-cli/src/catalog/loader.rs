//! # Catalog Loader
//!
//! Fetches and validates the catalog, retrying transient failures with
//! exponential backoff.
//!
//! ```text
//! attempt 1 ──fail──► wait initial_backoff ──► attempt 2 ──fail──► wait ×2 ...
//!     │                                            │
//!     └── ok ──► Catalog                           └── after max_retries ──► Err
//! ```

use std::time::Duration;

use backoff::backoff::Backoff;
use backoff::ExponentialBackoff;
use checkout_core::Catalog;
use tracing::{debug, error, info, warn};

use super::{CatalogProvider, CatalogResult, ProductRecord};
use crate::state::CatalogSettings;

/// Retry limits for the catalog fetch.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RetryPolicy {
    /// Extra attempts after the first failure (0 = try once).
    pub max_retries: u32,
    pub initial_backoff: Duration,
    pub max_backoff: Duration,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        RetryPolicy::from(&CatalogSettings::default())
    }
}

impl From<&CatalogSettings> for RetryPolicy {
    fn from(settings: &CatalogSettings) -> Self {
        RetryPolicy {
            max_retries: settings.max_retries,
            initial_backoff: Duration::from_millis(settings.initial_backoff_ms),
            max_backoff: Duration::from_millis(settings.max_backoff_ms),
        }
    }
}

/// Loads the catalog from a provider.
#[derive(Debug)]
pub struct CatalogLoader<P> {
    provider: P,
    retry: RetryPolicy,
}

impl<P: CatalogProvider> CatalogLoader<P> {
    pub fn new(provider: P, retry: RetryPolicy) -> Self {
        CatalogLoader { provider, retry }
    }

    pub fn provider(&self) -> &P {
        &self.provider
    }

    /// Fetches, converts and validates the catalog.
    ///
    /// ## Errors
    /// - The last error once `max_retries` retries are used up
    /// - Immediately for data errors (malformed JSON, invalid products)
    pub async fn fetch(&self) -> CatalogResult<Catalog> {
        info!(provider = %self.provider.describe(), "Loading catalog");

        let mut backoff = self.create_backoff();
        let mut attempt = 0u32;

        loop {
            attempt += 1;

            let err = match self.fetch_once().await {
                Ok(catalog) => {
                    info!(products = catalog.len(), attempt, "Catalog loaded");
                    return Ok(catalog);
                }
                Err(e) => e,
            };

            if !err.is_retryable() {
                error!(error = %err, "Catalog rejected");
                return Err(err);
            }

            if attempt > self.retry.max_retries {
                error!(attempts = attempt, error = %err, "Catalog fetch failed");
                return Err(err);
            }

            let delay = backoff.next_backoff().unwrap_or(self.retry.max_backoff);
            warn!(attempt, ?delay, error = %err, "Catalog fetch failed, retrying");
            tokio::time::sleep(delay).await;
        }
    }

    async fn fetch_once(&self) -> CatalogResult<Catalog> {
        let records = self.provider.get_products().await?;
        debug!(records = records.len(), "Catalog records received");

        let products = records
            .into_iter()
            .map(ProductRecord::into_product)
            .collect::<CatalogResult<Vec<_>>>()?;

        Ok(Catalog::new(products)?)
    }

    fn create_backoff(&self) -> ExponentialBackoff {
        ExponentialBackoff {
            initial_interval: self.retry.initial_backoff,
            max_interval: self.retry.max_backoff,
            multiplier: 2.0,
            // No jitter: max_backoff is a hard cap
            randomization_factor: 0.0,
            max_elapsed_time: None,
            ..Default::default()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::{CatalogError, StaticProvider};

    fn policy(max_retries: u32) -> RetryPolicy {
        RetryPolicy {
            max_retries,
            initial_backoff: Duration::from_millis(100),
            max_backoff: Duration::from_millis(400),
        }
    }

    #[tokio::test(start_paused = true)]
    async fn test_recovers_within_retry_budget() {
        let provider = StaticProvider::demo().unwrap().failing_first(2);
        let loader = CatalogLoader::new(provider, policy(2));

        let catalog = loader.fetch().await.unwrap();
        assert_eq!(catalog.len(), 8);
    }

    #[tokio::test(start_paused = true)]
    async fn test_gives_up_after_retry_budget() {
        let provider = StaticProvider::demo().unwrap().failing_first(3);
        let loader = CatalogLoader::new(provider, policy(2));

        let err = loader.fetch().await.unwrap_err();
        assert!(matches!(err, CatalogError::Unavailable(_)));

        // The provider has one failure left; the loader stopped after 3 tries
        assert!(loader.provider().get_products().await.is_err());
        assert!(loader.provider().get_products().await.is_ok());
    }

    #[tokio::test(start_paused = true)]
    async fn test_backoff_doubles_up_to_cap() {
        let provider = StaticProvider::demo().unwrap().failing_first(4);
        let loader = CatalogLoader::new(provider, policy(4));

        let started = tokio::time::Instant::now();
        loader.fetch().await.unwrap();

        // 100 + 200 + 400 + 400 (capped)
        let elapsed = started.elapsed();
        assert!(elapsed >= Duration::from_millis(1100), "{elapsed:?}");
        assert!(elapsed < Duration::from_millis(1150), "{elapsed:?}");
    }

    #[tokio::test]
    async fn test_zero_retries_tries_once() {
        let provider = StaticProvider::demo().unwrap().failing_first(1);
        let loader = CatalogLoader::new(provider, policy(0));

        assert!(loader.fetch().await.is_err());
        assert!(loader.provider().get_products().await.is_ok());
    }

    #[tokio::test]
    async fn test_invalid_catalog_is_not_retried() {
        let provider = StaticProvider::from_json(
            r#"[
                {"id": 1, "name": "A", "availableCount": 1, "price": 1},
                {"id": 1, "name": "B", "availableCount": 1, "price": 2}
            ]"#,
        )
        .unwrap();
        let loader = CatalogLoader::new(provider, policy(5));

        let err = loader.fetch().await.unwrap_err();
        assert!(matches!(err, CatalogError::Invalid(_)));
    }

    #[test]
    fn test_policy_from_settings() {
        let settings = CatalogSettings {
            max_retries: 4,
            initial_backoff_ms: 50,
            max_backoff_ms: 800,
            ..CatalogSettings::default()
        };
        let policy = RetryPolicy::from(&settings);
        assert_eq!(policy.max_retries, 4);
        assert_eq!(policy.initial_backoff, Duration::from_millis(50));
        assert_eq!(policy.max_backoff, Duration::from_millis(800));
    }
}
