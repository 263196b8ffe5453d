//! Document rendering - lays a computed invoice out as a paginated PDF.
//!
//! Rendering happens entirely in memory; the caller receives the bytes and
//! nothing is left behind on disk.

pub mod layout;
pub mod pdf;

pub use layout::{compose_lines, paginate, DocumentLine, LineStyle, PlacedLine};
pub use pdf::PdfInvoiceRenderer;

use thiserror::Error;

use crate::invoice::{CustomerInfo, InvoiceTotals, LineItem, RowTotals};

/// Errors that can occur during document rendering.
#[derive(Debug, Error)]
pub enum RenderError {
    #[error("failed to load builtin font: {0}")]
    Font(String),
    #[error("failed to serialize PDF: {0}")]
    Serialize(String),
    #[error("render task failed: {0}")]
    Task(String),
}

/// Everything the renderer needs, with totals already computed.
#[derive(Debug, Clone)]
pub struct InvoiceDocument {
    pub customer: CustomerInfo,
    pub items: Vec<LineItem>,
    pub totals: InvoiceTotals,
}

impl InvoiceDocument {
    pub fn new(customer: CustomerInfo, row_totals: RowTotals) -> Self {
        Self {
            customer,
            items: row_totals.items,
            totals: row_totals.totals,
        }
    }
}

/// Result of a successful render.
#[derive(Debug)]
pub struct GeneratedDocument {
    pub filename: String,
    pub pdf: Vec<u8>,
}

/// Turns an invoice into a downloadable document.
pub trait DocumentRenderer {
    fn render(&self, document: &InvoiceDocument) -> Result<GeneratedDocument, RenderError>;
}
