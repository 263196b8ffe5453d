//! PDF writer for the invoice layout.

use printpdf::{BuiltinFont, IndirectFontRef, Mm, PdfDocument, PdfLayerReference};
use std::io::BufWriter;

use super::layout::{
    compose_lines, header_lines, paginate, PlacedLine, LEFT_MARGIN_MM, PAGE_HEIGHT_MM,
    PAGE_WIDTH_MM,
};
use super::{DocumentRenderer, GeneratedDocument, InvoiceDocument, RenderError};

/// Renders invoices onto A4 pages with the builtin Helvetica fonts.
#[derive(Debug, Clone)]
pub struct PdfInvoiceRenderer {
    title: String,
    filename: String,
}

impl PdfInvoiceRenderer {
    pub fn new(title: impl Into<String>, filename: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            filename: filename.into(),
        }
    }
}

/// Builtin PDF fonts only cover Latin-1; anything else is printed as '?'.
fn printable(text: &str) -> String {
    text.chars()
        .map(|c| if (c as u32) < 0x100 && !c.is_control() { c } else { '?' })
        .collect()
}

fn draw_page(
    layer: &PdfLayerReference,
    lines: &[PlacedLine],
    regular: &IndirectFontRef,
    bold: &IndirectFontRef,
) {
    for placed in lines {
        if placed.line.text.is_empty() {
            continue;
        }
        let font = if placed.line.style.is_bold() { bold } else { regular };
        layer.use_text(
            printable(&placed.line.text),
            placed.line.style.font_size(),
            Mm(LEFT_MARGIN_MM),
            Mm(placed.y_mm),
            font,
        );
    }
}

impl DocumentRenderer for PdfInvoiceRenderer {
    fn render(&self, document: &InvoiceDocument) -> Result<GeneratedDocument, RenderError> {
        let pages = paginate(&header_lines(&self.title), &compose_lines(document));

        let (doc, first_page, first_layer) = PdfDocument::new(
            printable(&self.title),
            Mm(PAGE_WIDTH_MM),
            Mm(PAGE_HEIGHT_MM),
            "Layer 1",
        );
        let regular = doc
            .add_builtin_font(BuiltinFont::Helvetica)
            .map_err(|e| RenderError::Font(e.to_string()))?;
        let bold = doc
            .add_builtin_font(BuiltinFont::HelveticaBold)
            .map_err(|e| RenderError::Font(e.to_string()))?;

        for (number, lines) in pages.iter().enumerate() {
            let layer = if number == 0 {
                doc.get_page(first_page).get_layer(first_layer)
            } else {
                let (page, layer) = doc.add_page(
                    Mm(PAGE_WIDTH_MM),
                    Mm(PAGE_HEIGHT_MM),
                    format!("Layer {}", number + 1),
                );
                doc.get_page(page).get_layer(layer)
            };
            draw_page(&layer, lines, &regular, &bold);
        }

        let mut writer = BufWriter::new(Vec::<u8>::new());
        doc.save(&mut writer)
            .map_err(|e| RenderError::Serialize(e.to_string()))?;
        let pdf = writer
            .into_inner()
            .map_err(|e| RenderError::Serialize(e.to_string()))?;

        log::debug!(
            "Rendered invoice with {} items on {} page(s), {} bytes",
            document.items.len(),
            pages.len(),
            pdf.len()
        );

        Ok(GeneratedDocument {
            filename: self.filename.clone(),
            pdf,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::invoice::{compute_totals, CustomerInfo, DiscountPercent, LineItem, Money, Quantity};

    fn document() -> InvoiceDocument {
        let items = vec![LineItem::new(
            "Pen",
            Money::parse("2.50").unwrap(),
            Quantity::parse_or_default("4").unwrap(),
        )];
        let totals = compute_totals(&items, DiscountPercent::NONE);
        InvoiceDocument {
            customer: CustomerInfo::today(),
            items,
            totals,
        }
    }

    #[test]
    fn test_render_produces_pdf_bytes() {
        let renderer = PdfInvoiceRenderer::new("testApp \"electronic bill\"", "items.pdf");
        let generated = renderer.render(&document()).unwrap();

        assert_eq!(generated.filename, "items.pdf");
        assert!(generated.pdf.starts_with(b"%PDF"));
    }

    fn count(haystack: &[u8], needle: &[u8]) -> usize {
        haystack.windows(needle.len()).filter(|w| *w == needle).count()
    }

    #[test]
    fn test_render_long_invoice_adds_pages() {
        let renderer = PdfInvoiceRenderer::new("Bill", "items.pdf");
        let single = renderer.render(&document()).unwrap();

        let mut long = document();
        long.items = (0..60)
            .map(|i| {
                LineItem::new(
                    format!("Item {}", i + 1),
                    Money::parse("1.00").unwrap(),
                    Quantity::ONE,
                )
            })
            .collect();
        long.totals = compute_totals(&long.items, DiscountPercent::NONE);

        let pages = paginate(&header_lines("Bill"), &compose_lines(&long)).len();
        assert!(pages > 1);

        let generated = renderer.render(&long).unwrap();
        assert!(generated.pdf.starts_with(b"%PDF"));
        // One media box per page
        assert_eq!(
            count(&generated.pdf, b"/MediaBox") - count(&single.pdf, b"/MediaBox"),
            pages - 1
        );
    }

    #[test]
    fn test_render_handles_non_latin_text() {
        let mut doc = document();
        doc.customer.name = "محمد".to_string();
        let renderer = PdfInvoiceRenderer::new("Bill", "items.pdf");
        assert!(renderer.render(&doc).is_ok());
    }

    #[test]
    fn test_printable_replaces_unsupported_chars() {
        assert_eq!(printable("Café"), "Café");
        assert_eq!(printable("محمد"), "????");
        assert_eq!(printable("a\tb"), "a?b");
    }
}
