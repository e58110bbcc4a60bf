//! # Catalog
//!
//! The ordered product list delivered by the catalog provider. Rows in the
//! form are rendered one per product, in this order.

use serde::Serialize;

use crate::error::{CoreError, CoreResult};
use crate::types::{Product, ProductId};
use crate::validation::validate_unique_ids;
use crate::MAX_CATALOG_SIZE;

/// A validated, immutable product list.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Catalog {
    products: Vec<Product>,
}

impl Catalog {
    /// Builds a catalog, keeping provider order.
    ///
    /// ## Errors
    /// - `CatalogTooLarge` above [`MAX_CATALOG_SIZE`] products
    /// - `Validation(Duplicate)` when two products share an id
    pub fn new(products: Vec<Product>) -> CoreResult<Self> {
        if products.len() > MAX_CATALOG_SIZE {
            return Err(CoreError::CatalogTooLarge {
                max: MAX_CATALOG_SIZE,
            });
        }

        validate_unique_ids(&products)?;

        Ok(Catalog { products })
    }

    /// An empty catalog (before the first successful load).
    pub fn empty() -> Self {
        Catalog::default()
    }

    pub fn find(&self, id: ProductId) -> Option<&Product> {
        self.products.iter().find(|product| product.id == id)
    }

    /// Looks up a product, failing with `ProductNotFound`.
    pub fn get(&self, id: ProductId) -> CoreResult<&Product> {
        self.find(id).ok_or(CoreError::ProductNotFound(id))
    }

    pub fn products(&self) -> &[Product] {
        &self.products
    }

    pub fn len(&self) -> usize {
        self.products.len()
    }

    pub fn is_empty(&self) -> bool {
        self.products.is_empty()
    }
}
