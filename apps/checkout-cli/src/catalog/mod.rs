//! # Catalog Providers
//!
//! The external data provider behind the form's product table, plus the
//! loader that fetches from it once at startup.
//!
//! ## Provider Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Catalog Loading                                      │
//! │                                                                         │
//! │  CatalogProvider::get_products()        (async, ordered, no paging)     │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  Vec<ProductRecord>  { id, name, availableCount, price: 12.99 }         │
//! │       │                                                                 │
//! │       ▼  ProductRecord::into_product  (decimal → cents, validation)     │
//! │  Vec<Product>                                                           │
//! │       │                                                                 │
//! │       ▼  Catalog::new                 (unique ids)                      │
//! │  Catalog ──► CheckoutState::load_complete                               │
//! │                                                                         │
//! │  Transient failures (I/O, provider down) are retried with backoff;      │
//! │  bad data is not.                                                       │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

mod demo;
mod file;
mod loader;

pub use demo::StaticProvider;
pub use file::JsonFileProvider;
pub use loader::{CatalogLoader, RetryPolicy};

use std::future::Future;
use std::path::PathBuf;

use checkout_core::{CoreError, Money, Product, ProductId};
use serde::{Deserialize, Serialize};
use thiserror::Error;

// =============================================================================
// Errors
// =============================================================================

/// Catalog provider failures.
#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("Failed to read catalog {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Malformed catalog: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("Invalid product {id}: {source}")]
    InvalidProduct { id: u64, source: CoreError },

    #[error("Invalid catalog: {0}")]
    Invalid(#[from] CoreError),

    #[error("Catalog provider unavailable: {0}")]
    Unavailable(String),
}

impl CatalogError {
    /// Whether another attempt could succeed.
    pub fn is_retryable(&self) -> bool {
        matches!(self, CatalogError::Io { .. } | CatalogError::Unavailable(_))
    }
}

pub type CatalogResult<T> = Result<T, CatalogError>;

// =============================================================================
// Wire Record
// =============================================================================

/// A product as the provider delivers it.
///
/// `price` keeps the number's source text (serde_json `arbitrary_precision`)
/// until it is parsed into cents, so a value like `12.99` never passes
/// through `f64`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductRecord {
    pub id: u64,
    pub name: String,
    pub available_count: u32,
    pub price: serde_json::Number,
}

impl ProductRecord {
    /// Validates the record and converts it to a domain product.
    pub fn into_product(self) -> CatalogResult<Product> {
        let id = self.id;
        let invalid = |source: CoreError| CatalogError::InvalidProduct { id, source };

        let price = Money::parse_decimal(&self.price.to_string()).map_err(|e| invalid(e.into()))?;

        Product::new(ProductId::new(id), self.name, self.available_count, price).map_err(invalid)
    }
}

// =============================================================================
// Provider Trait
// =============================================================================

/// Source of the product list.
pub trait CatalogProvider {
    /// Fetches the full product list in display order.
    fn get_products(&self) -> impl Future<Output = CatalogResult<Vec<ProductRecord>>> + Send;

    /// Short description for logs.
    fn describe(&self) -> String;
}

/// The providers the CLI can be started with.
#[derive(Debug)]
pub enum AnyProvider {
    File(JsonFileProvider),
    Static(StaticProvider),
}

impl CatalogProvider for AnyProvider {
    async fn get_products(&self) -> CatalogResult<Vec<ProductRecord>> {
        match self {
            AnyProvider::File(provider) => provider.get_products().await,
            AnyProvider::Static(provider) => provider.get_products().await,
        }
    }

    fn describe(&self) -> String {
        match self {
            AnyProvider::File(provider) => provider.describe(),
            AnyProvider::Static(provider) => provider.describe(),
        }
    }
}
