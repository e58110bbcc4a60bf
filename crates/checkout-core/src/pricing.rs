//! # Pricing
//!
//! Pure functions deriving every monetary value the form displays.
//!
//! ## Derivation
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  line_total(item)  = qty × unit_price                                  │
//! │                                                                         │
//! │  discount_for(x)   = Some(x − 10%)  if x > $1000.00                    │
//! │                    = None           otherwise                          │
//! │                                                                         │
//! │  effective_line_total(item) = discount_for(line) or line               │
//! │                                (per-row display value)                  │
//! │                                                                         │
//! │  subtotal = Σ line_total          (never Σ effective_line_total)       │
//! │  discount = subtotal − discount_for(subtotal), or 0                    │
//! │  total    = subtotal              (TotalPolicy::Undiscounted)          │
//! │           = subtotal − discount   (TotalPolicy::Discounted)            │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! The per-row value tests the threshold against that row alone, while the
//! order discount tests it against the subtotal. A row can therefore show a
//! discounted value while the order discount is computed independently.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use ts_rs::TS;

use crate::money::Money;
use crate::types::LineItem;
use crate::{DISCOUNT_BPS, DISCOUNT_THRESHOLD};

// =============================================================================
// Line Pricing
// =============================================================================

/// Undiscounted line total; zero when the product has no line item.
pub fn line_total(item: Option<&LineItem>) -> Money {
    item.map_or(Money::zero(), LineItem::line_total)
}

/// Discounted value of `total`, or `None` when no discount applies.
///
/// ```rust
/// use checkout_core::Money;
/// use checkout_core::pricing::discount_for;
///
/// assert_eq!(discount_for(Money::from_cents(1100_00)), Some(Money::from_cents(990_00)));
/// assert_eq!(discount_for(Money::from_cents(1000_00)), None);
/// ```
pub fn discount_for(total: Money) -> Option<Money> {
    (total > DISCOUNT_THRESHOLD).then(|| total.apply_percentage_discount(DISCOUNT_BPS))
}

/// The value a product row shows in its "Total" column.
pub fn effective_line_total(item: Option<&LineItem>) -> Money {
    let total = line_total(item);
    discount_for(total).unwrap_or(total)
}

// =============================================================================
// Order Pricing
// =============================================================================

/// Sum of undiscounted line totals.
pub fn subtotal(items: &[LineItem]) -> Money {
    items.iter().map(LineItem::line_total).sum()
}

/// Amount taken off the order; zero unless the subtotal exceeds the threshold.
pub fn order_discount(subtotal: Money) -> Money {
    discount_for(subtotal).map_or(Money::zero(), |discounted| subtotal - discounted)
}

/// Whether the displayed order total subtracts the discount.
///
/// `Undiscounted` reproduces the form's historical behavior: the discount
/// is shown on its own line but the total stays at the subtotal.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(rename_all = "lowercase")]
#[ts(export)]
pub enum TotalPolicy {
    #[default]
    Undiscounted,
    Discounted,
}

impl fmt::Display for TotalPolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TotalPolicy::Undiscounted => write!(f, "undiscounted"),
            TotalPolicy::Discounted => write!(f, "discounted"),
        }
    }
}

impl FromStr for TotalPolicy {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "undiscounted" | "raw" => Ok(TotalPolicy::Undiscounted),
            "discounted" | "net" => Ok(TotalPolicy::Discounted),
            other => Err(format!("unknown total policy: {other}")),
        }
    }
}

/// Order-level values, derived on demand.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct OrderSummary {
    pub subtotal: Money,
    pub discount: Money,
    pub total: Money,
}

impl OrderSummary {
    pub fn compute(items: &[LineItem], policy: TotalPolicy) -> Self {
        let subtotal = subtotal(items);
        let discount = order_discount(subtotal);
        let total = match policy {
            TotalPolicy::Undiscounted => subtotal,
            TotalPolicy::Discounted => subtotal - discount,
        };

        OrderSummary {
            subtotal,
            discount,
            total,
        }
    }

    pub fn has_discount(&self) -> bool {
        !self.discount.is_zero()
    }
}
