//! # Validation Module
//!
//! Business rule checks applied to catalog data before it reaches the form.
//!
//! ## Validation Strategy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                      Validation Layers                                  │
//! │                                                                         │
//! │  Layer 1: Provider record (checkout-cli)                               │
//! │  ├── JSON shape (serde)                                                │
//! │  └── Decimal price parsing (Money::parse_decimal)                      │
//! │           │                                                             │
//! │           ▼                                                             │
//! │  Layer 2: Product::new (THIS MODULE)                                   │
//! │  ├── Name present and bounded                                          │
//! │  ├── Price not negative                                                │
//! │  └── Price × available count bounded                                   │
//! │           │                                                             │
//! │           ▼                                                             │
//! │  Layer 3: Catalog::new (THIS MODULE)                                   │
//! │  ├── Ids unique                                                        │
//! │  └── Size bounded                                                      │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use std::collections::HashSet;

use crate::error::ValidationError;
use crate::money::Money;
use crate::types::Product;
use crate::{MAX_LINE_TOTAL, MAX_PRODUCT_NAME_LEN};

/// Result type for validation operations.
pub type ValidationResult<T> = Result<T, ValidationError>;

/// Validates a product name.
///
/// ## Rules
/// - Must not be empty
/// - At most 200 characters
///
/// ```rust
/// use checkout_core::validation::validate_product_name;
///
/// assert!(validate_product_name("Television").is_ok());
/// assert!(validate_product_name("").is_err());
/// ```
pub fn validate_product_name(name: &str) -> ValidationResult<()> {
    let name = name.trim();

    if name.is_empty() {
        return Err(ValidationError::Required {
            field: "name".to_string(),
        });
    }

    if name.chars().count() > MAX_PRODUCT_NAME_LEN {
        return Err(ValidationError::TooLong {
            field: "name".to_string(),
            max: MAX_PRODUCT_NAME_LEN,
        });
    }

    Ok(())
}

/// Validates a unit price. Zero is allowed (free items).
pub fn validate_price(price: Money) -> ValidationResult<()> {
    if price.is_negative() {
        return Err(ValidationError::MustBeNonNegative {
            field: "price".to_string(),
        });
    }

    Ok(())
}

/// Validates that ordering the whole stock of a product stays within
/// [`MAX_LINE_TOTAL`].
///
/// ```rust
/// use checkout_core::Money;
/// use checkout_core::validation::validate_stock_value;
///
/// assert!(validate_stock_value(Money::from_cents(100_00), 15).is_ok());
/// assert!(validate_stock_value(Money::from_cents(i64::MAX / 100), 2).is_err());
/// ```
pub fn validate_stock_value(price: Money, available_count: u32) -> ValidationResult<()> {
    let within_limit = price
        .cents()
        .checked_mul(i64::from(available_count))
        .is_some_and(|cents| cents <= MAX_LINE_TOTAL.cents());

    if !within_limit {
        return Err(ValidationError::TooLarge {
            field: "price × available count".to_string(),
            max: MAX_LINE_TOTAL,
        });
    }

    Ok(())
}

/// Validates that no two products share an id.
///
/// The order keeps at most one line item per product id, so a catalog with
/// duplicate ids could not be rendered one row per product.
pub fn validate_unique_ids(products: &[Product]) -> ValidationResult<()> {
    let mut seen = HashSet::with_capacity(products.len());

    for product in products {
        if !seen.insert(product.id) {
            return Err(ValidationError::Duplicate {
                field: "product id".to_string(),
                value: product.id.to_string(),
            });
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::ProductId;

    fn product(id: u64) -> Product {
        Product {
            id: ProductId::new(id),
            name: format!("Product {id}"),
            available_count: 1,
            price: Money::from_cents(100),
        }
    }

    #[test]
    fn test_name_too_long() {
        let name = "x".repeat(MAX_PRODUCT_NAME_LEN + 1);
        assert!(matches!(
            validate_product_name(&name),
            Err(ValidationError::TooLong { .. })
        ));
        assert!(validate_product_name(&"x".repeat(MAX_PRODUCT_NAME_LEN)).is_ok());
    }

    #[test]
    fn test_price_zero_allowed() {
        assert!(validate_price(Money::zero()).is_ok());
        assert!(validate_price(Money::from_cents(-5)).is_err());
    }

    #[test]
    fn test_stock_value_bounded() {
        assert!(validate_stock_value(MAX_LINE_TOTAL, 1).is_ok());
        assert!(validate_stock_value(Money::from_cents(MAX_LINE_TOTAL.cents() + 1), 1).is_err());
        assert!(validate_stock_value(Money::from_cents(MAX_LINE_TOTAL.cents() / 4), 5).is_err());

        // Any price is fine with nothing in stock
        assert!(validate_stock_value(Money::from_cents(i64::MAX / 100), 0).is_ok());

        // Product of price and count overflows i64
        let err = validate_stock_value(Money::from_cents(i64::MAX / 2 + 1), 2).unwrap_err();
        assert!(matches!(err, ValidationError::TooLarge { .. }));
    }

    #[test]
    fn test_worst_case_subtotal_fits() {
        let max_subtotal = MAX_LINE_TOTAL
            .cents()
            .checked_mul(crate::MAX_CATALOG_SIZE as i64);
        assert!(max_subtotal.is_some());
    }

    #[test]
    fn test_unique_ids() {
        assert!(validate_unique_ids(&[product(1), product(2)]).is_ok());

        let err = validate_unique_ids(&[product(1), product(2), product(1)]).unwrap_err();
        assert_eq!(err.to_string(), "product id '1' already exists");
    }
}
