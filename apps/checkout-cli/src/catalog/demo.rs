//! In-memory provider with simulated latency. Serves the built-in Electro
//! World catalog when no catalog file is configured.

use std::sync::atomic::{AtomicU32, Ordering};
use std::time::Duration;

use tracing::debug;

use super::{CatalogError, CatalogProvider, CatalogResult, ProductRecord};

const DEMO_CATALOG: &str = include_str!("../../data/catalog.json");

#[derive(Debug)]
pub struct StaticProvider {
    records: Vec<ProductRecord>,
    latency: Duration,
    failures_left: AtomicU32,
}

impl StaticProvider {
    pub fn new(records: Vec<ProductRecord>) -> Self {
        StaticProvider {
            records,
            latency: Duration::ZERO,
            failures_left: AtomicU32::new(0),
        }
    }

    /// Parses a JSON array of product records.
    pub fn from_json(json: &str) -> CatalogResult<Self> {
        Ok(Self::new(serde_json::from_str(json)?))
    }

    /// The built-in Electro World catalog.
    pub fn demo() -> CatalogResult<Self> {
        Self::from_json(DEMO_CATALOG)
    }

    /// Delays every response by `latency`.
    pub fn with_latency(mut self, latency: Duration) -> Self {
        self.latency = latency;
        self
    }

    /// Fails the first `n` requests with `Unavailable`.
    pub fn failing_first(self, n: u32) -> Self {
        self.failures_left.store(n, Ordering::SeqCst);
        self
    }
}

impl CatalogProvider for StaticProvider {
    async fn get_products(&self) -> CatalogResult<Vec<ProductRecord>> {
        if !self.latency.is_zero() {
            tokio::time::sleep(self.latency).await;
        }

        let failing = self
            .failures_left
            .fetch_update(Ordering::SeqCst, Ordering::SeqCst, |n| n.checked_sub(1))
            .is_ok();
        if failing {
            debug!("Static provider simulating an outage");
            return Err(CatalogError::Unavailable("simulated outage".to_string()));
        }

        Ok(self.records.clone())
    }

    fn describe(&self) -> String {
        format!("static catalog ({} products)", self.records.len())
    }
}
