use serde::Serialize;
use utoipa::ToSchema;

use super::calculator::{compute_row_totals, InvoiceTotals, RowTotals, SkippedRow};
use super::format::{format_lines, format_totals};
use super::model::{ItemRow, LineItem};
use super::money::DiscountPercent;

/// What the form shows when the user finishes: the listed items, the skipped
/// rows with their hints, and the totals both raw and formatted.
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct InvoiceSummary {
    pub items: Vec<LineItem>,
    #[schema(example = json!(["1 - Pen  [Price: 2.50 AED * Count: 4] = 10.00 AED"]))]
    pub lines: Vec<String>,
    pub skipped: Vec<SkippedRow>,
    pub totals: InvoiceTotals,
    #[schema(example = json!(["Gross Price : 10.00 AED", "Discount Amount : (0.00%): -0.00 AED", "Final Price : 10.00 AED"]))]
    pub totals_lines: Vec<String>,
}

impl From<RowTotals> for InvoiceSummary {
    fn from(row_totals: RowTotals) -> Self {
        let lines = format_lines(&row_totals.items);
        let totals_lines = format_totals(&row_totals.totals);
        Self {
            items: row_totals.items,
            lines,
            skipped: row_totals.skipped,
            totals: row_totals.totals,
            totals_lines,
        }
    }
}

pub fn summarize(rows: &[ItemRow], discount: DiscountPercent) -> InvoiceSummary {
    InvoiceSummary::from(compute_row_totals(rows, discount))
}
