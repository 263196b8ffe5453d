//! Invoice domain: validated row values, totals, and the text printed for them.

pub mod calculator;
pub mod format;
pub mod model;
pub mod money;
pub mod routes;
pub mod summary;
pub mod validation;


pub use calculator::{compute_row_totals, compute_totals, InvoiceTotals, RowTotals, SkippedRow};
pub use format::{format_amount, format_line, CURRENCY};
pub use model::{CustomerInfo, ItemRow, LineItem, RowInput, RowStatus};
pub use money::{AmountError, DiscountPercent, Money, Quantity};
pub use summary::{summarize, InvoiceSummary};
pub use validation::{ValidationError, ValidationErrors};
