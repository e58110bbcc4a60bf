//! # Error Types
//!
//! Domain-specific error types for checkout-core.
//!
//! ## Error Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Error Types                                     │
//! │                                                                         │
//! │  checkout-core errors (this file)                                      │
//! │  ├── CoreError        - Order and catalog rule violations              │
//! │  └── ValidationError  - Input validation failures                      │
//! │                                                                         │
//! │  checkout-cli errors (app crate)                                       │
//! │  ├── CatalogError     - Provider / fetch failures                      │
//! │  └── AppError         - What the user sees                             │
//! │                                                                         │
//! │  Flow: ValidationError → CoreError → AppError → terminal notice        │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Rejections Are Not Failures
//! `OutOfStock` and `NotInOrder` are returned when the form's +/- controls
//! would be disabled. The order state is left untouched; callers report the
//! rejection and carry on.

use thiserror::Error;

use crate::money::Money;
use crate::types::ProductId;

// =============================================================================
// Core Error
// =============================================================================

/// Core business logic errors.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CoreError {
    /// Product id is not part of the loaded catalog.
    #[error("Product not found: {0}")]
    ProductNotFound(ProductId),

    /// Adding one more unit would exceed the available count.
    ///
    /// ## User Workflow
    /// ```text
    /// Row: Television  available=15  qty=15
    ///      │
    ///      ▼
    /// add(Television)
    ///      │
    ///      ▼
    /// OutOfStock { product_id: 1, available: 15 }
    ///      │
    ///      ▼
    /// Order unchanged, "+" stays disabled
    /// ```
    #[error("Product {product_id} is out of stock: only {available} available")]
    OutOfStock { product_id: ProductId, available: u32 },

    /// Removing a product that has no line item.
    #[error("Product {0} is not in the order")]
    NotInOrder(ProductId),

    /// Catalog has more products than allowed.
    #[error("Catalog cannot have more than {max} products")]
    CatalogTooLarge { max: usize },

    /// Validation error (wraps ValidationError).
    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),
}

impl CoreError {
    /// Returns true for errors that mean "the control was disabled".
    pub fn is_rejection(&self) -> bool {
        matches!(self, CoreError::OutOfStock { .. } | CoreError::NotInOrder(_))
    }
}

// =============================================================================
// Validation Error
// =============================================================================

/// Input validation errors.
///
/// These occur when provider data doesn't meet requirements.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    /// A required field is missing or empty.
    #[error("{field} is required")]
    Required { field: String },

    /// Field value is too long.
    #[error("{field} must be at most {max} characters")]
    TooLong { field: String, max: usize },

    /// Value must not be negative.
    #[error("{field} must not be negative")]
    MustBeNonNegative { field: String },

    /// Invalid format (e.g., a price with three decimals).
    #[error("{field} has invalid format: {reason}")]
    InvalidFormat { field: String, reason: String },

    /// Value above an upper bound.
    #[error("{field} must not exceed {max}")]
    TooLarge { field: String, max: Money },

    /// Duplicate value (e.g., two products with the same id).
    #[error("{field} '{value}' already exists")]
    Duplicate { field: String, value: String },
}

// =============================================================================
// Result Type Alias
// =============================================================================

/// Convenience type alias for Results with CoreError.
pub type CoreResult<T> = Result<T, CoreError>;
