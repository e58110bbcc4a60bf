//! # Checkout View
//!
//! The view model of the checkout form and its text rendering.
//!
//! ## Layout
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  Electro World                                                          │
//! │                                                                         │
//! │    #  Product                 In stock      Price  Qty        Total     │
//! │    1  Wireless Headphones           12    $149.99    2      $299.98  [+] [-]
//! │    7  Tablet                         0    $329.00    0        $0.00  [ ] [ ]
//! │                                                                         │
//! │  Order summary                                                          │
//! │    Discount: $110.00        (only when a discount applies)              │
//! │    Total: $1100.00                                                      │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! While the catalog loads, neither the table nor the summary renders.
//! The view model serializes to JSON (camelCase) for a web front end.

use std::io::{self, Write};

use checkout_core::pricing::{self, OrderSummary};
use checkout_core::{Money, Product, ProductId};
use serde::Serialize;
use ts_rs::TS;

use crate::state::{CatalogStatus, CheckoutState, ConfigState};

const NAME_WIDTH: usize = 24;

// =============================================================================
// View Model
// =============================================================================

/// Everything the form shows, derived from the checkout state.
#[derive(Debug, Clone, PartialEq, Serialize, TS)]
#[serde(tag = "state", rename_all = "camelCase")]
#[ts(export)]
pub enum CheckoutView {
    /// Loading indicator only.
    Loading,
    /// Catalog could not be fetched.
    Failed { reason: String },
    /// Product table plus order summary.
    Ready(FormView),
}

/// The loaded form.
#[derive(Debug, Clone, PartialEq, Serialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct FormView {
    /// RFC 3339 time the catalog was stored
    pub loaded_at: String,
    pub rows: Vec<ProductRow>,
    pub summary: SummaryView,
}

/// One row of the product table.
#[derive(Debug, Clone, PartialEq, Serialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct ProductRow {
    pub id: ProductId,
    pub name: String,
    pub available_count: u32,
    pub unit_price: Money,
    pub quantity: u32,
    /// Effective line total (discounted when the line alone exceeds the threshold)
    pub line_total: Money,
    /// "+" enabled
    pub can_add: bool,
    /// "-" enabled
    pub can_remove: bool,
}

/// The order summary block.
#[derive(Debug, Clone, PartialEq, Serialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct SummaryView {
    pub subtotal: Money,
    /// `None` hides the discount line.
    pub discount: Option<Money>,
    pub total: Money,
}

impl CheckoutView {
    pub fn build(state: &CheckoutState, config: &ConfigState) -> Self {
        match state.status() {
            CatalogStatus::Idle | CatalogStatus::Loading => CheckoutView::Loading,
            CatalogStatus::Failed { reason } => CheckoutView::Failed {
                reason: reason.clone(),
            },
            CatalogStatus::Ready { loaded_at } => CheckoutView::Ready(FormView {
                loaded_at: loaded_at.to_rfc3339(),
                rows: state
                    .catalog()
                    .products()
                    .iter()
                    .map(|product| ProductRow::build(state, product))
                    .collect(),
                summary: SummaryView::build(&state.summary(), config),
            }),
        }
    }
}

impl ProductRow {
    fn build(state: &CheckoutState, product: &Product) -> Self {
        let order = state.order();
        let item = order.find(product.id);

        ProductRow {
            id: product.id,
            name: product.name.clone(),
            available_count: product.available_count,
            unit_price: product.price,
            quantity: order.quantity_of(product.id),
            line_total: pricing::effective_line_total(item),
            can_add: order.can_add(product),
            can_remove: order.can_remove(product),
        }
    }
}

impl SummaryView {
    fn build(summary: &OrderSummary, config: &ConfigState) -> Self {
        let show_discount = summary.has_discount() || config.show_zero_discount;

        SummaryView {
            subtotal: summary.subtotal,
            discount: show_discount.then_some(summary.discount),
            total: summary.total,
        }
    }
}

// =============================================================================
// Text Rendering
// =============================================================================

/// Writes the form as plain text.
pub fn render_text(
    view: &CheckoutView,
    config: &ConfigState,
    out: &mut impl Write,
) -> io::Result<()> {
    writeln!(out, "{}", config.store_name)?;
    writeln!(out)?;

    match view {
        CheckoutView::Loading => writeln!(out, "  Loading catalog...")?,
        CheckoutView::Failed { reason } => writeln!(
            out,
            "  Catalog unavailable: {reason} (type `reload` to retry)"
        )?,
        CheckoutView::Ready(form) => {
            render_table(&form.rows, config, out)?;
            writeln!(out)?;
            render_summary(&form.summary, config, out)?;
        }
    }

    out.flush()
}

fn render_table(rows: &[ProductRow], config: &ConfigState, out: &mut impl Write) -> io::Result<()> {
    if rows.is_empty() {
        return writeln!(out, "  No products available.");
    }

    writeln!(
        out,
        "  {:>3}  {:<width$}  {:>8}  {:>9}  {:>3}  {:>11}",
        "#",
        "Product",
        "In stock",
        "Price",
        "Qty",
        "Total",
        width = NAME_WIDTH,
    )?;

    for row in rows {
        writeln!(
            out,
            "  {:>3}  {:<width$}  {:>8}  {:>9}  {:>3}  {:>11}  {} {}",
            row.id.get(),
            truncate(&row.name, NAME_WIDTH),
            row.available_count,
            config.format_currency(row.unit_price),
            row.quantity,
            config.format_currency(row.line_total),
            if row.can_add { "[+]" } else { "[ ]" },
            if row.can_remove { "[-]" } else { "[ ]" },
            width = NAME_WIDTH,
        )?;
    }

    Ok(())
}

fn render_summary(
    summary: &SummaryView,
    config: &ConfigState,
    out: &mut impl Write,
) -> io::Result<()> {
    writeln!(out, "Order summary")?;
    if let Some(discount) = summary.discount {
        writeln!(out, "  Discount: {}", config.format_currency(discount))?;
    }
    writeln!(out, "  Total: {}", config.format_currency(summary.total))
}

fn truncate(name: &str, width: usize) -> String {
    if name.chars().count() <= width {
        return name.to_string();
    }
    let mut short: String = name.chars().take(width.saturating_sub(1)).collect();
    short.push('…');
    short
}
