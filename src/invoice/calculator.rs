//! Invoice totals.
//!
//! Totals are always recomputed from scratch from the valid items and the
//! discount. Nothing here rounds; rounding happens only in `format`.

use rust_decimal::Decimal;
use serde::Serialize;
use utoipa::ToSchema;

use super::model::{ItemRow, LineItem, RowStatus};
use super::money::DiscountPercent;
use super::validation::ValidationError;

/// Gross, discount and final price of an invoice.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, ToSchema)]
pub struct InvoiceTotals {
    pub gross: Decimal,
    pub discount_percent: Decimal,
    pub discount_amount: Decimal,
    #[serde(rename = "final")]
    pub final_price: Decimal,
}

/// Compute totals over validated items.
///
/// `discount_amount = gross * percent / 100` and `final = gross - discount_amount`.
/// `DiscountPercent` never exceeds 100, so `final` is never negative.
pub fn compute_totals(items: &[LineItem], discount: DiscountPercent) -> InvoiceTotals {
    let gross: Decimal = items.iter().map(LineItem::line_total).sum();
    let discount_amount = gross * discount.value() / Decimal::ONE_HUNDRED;

    InvoiceTotals {
        gross,
        discount_percent: discount.value(),
        discount_amount,
        final_price: gross - discount_amount,
    }
}

/// A row left out of the invoice because it failed to parse.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, ToSchema)]
pub struct SkippedRow {
    /// 1-based position in the item list
    pub row: usize,
    pub errors: Vec<ValidationError>,
}

/// Valid items, skipped rows and the totals over the valid items.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RowTotals {
    pub items: Vec<LineItem>,
    pub skipped: Vec<SkippedRow>,
    pub totals: InvoiceTotals,
}

/// Split rows into the items that count and the rows that were skipped.
/// Blank rows are dropped silently.
pub fn partition_rows(rows: &[ItemRow]) -> (Vec<LineItem>, Vec<SkippedRow>) {
    let mut items = Vec::new();
    let mut skipped = Vec::new();

    for (position, row) in rows.iter().enumerate() {
        match &row.status {
            RowStatus::Valid { item } => items.push(item.clone()),
            RowStatus::Invalid { errors } => skipped.push(SkippedRow {
                row: position + 1,
                errors: errors.clone(),
            }),
            RowStatus::Blank => {}
        }
    }

    (items, skipped)
}

/// Totals over an in-progress item list. Invalid rows contribute zero.
pub fn compute_row_totals(rows: &[ItemRow], discount: DiscountPercent) -> RowTotals {
    let (items, skipped) = partition_rows(rows);
    let totals = compute_totals(&items, discount);
    RowTotals {
        items,
        skipped,
        totals,
    }
}
