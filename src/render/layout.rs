//! Layout plan for the invoice page.
//!
//! `compose_lines` decides what is printed and in which order;
//! `paginate` decides where. Both are pure so the PDF writer only draws.

use crate::invoice::format::{format_lines, format_totals};

use super::InvoiceDocument;

pub const PAGE_WIDTH_MM: f32 = 210.0;
pub const PAGE_HEIGHT_MM: f32 = 297.0;
pub const LEFT_MARGIN_MM: f32 = 15.0;
pub const TOP_MARGIN_MM: f32 = 10.0;
pub const BOTTOM_MARGIN_MM: f32 = 15.0;

const SEPARATOR: &str = "---------------------------------------------------------------";
const DATE_FORMAT: &str = "%Y-%m-%d";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LineStyle {
    Title,
    Heading,
    Body,
    Separator,
    Spacer,
}

impl LineStyle {
    /// Vertical space the line takes, in millimetres.
    pub fn advance_mm(&self) -> f32 {
        match self {
            LineStyle::Title | LineStyle::Heading | LineStyle::Spacer => 10.0,
            LineStyle::Body | LineStyle::Separator => 8.0,
        }
    }

    pub fn font_size(&self) -> f32 {
        match self {
            LineStyle::Heading => 14.0,
            _ => 12.0,
        }
    }

    pub fn is_bold(&self) -> bool {
        matches!(self, LineStyle::Title | LineStyle::Heading)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DocumentLine {
    pub text: String,
    pub style: LineStyle,
}

impl DocumentLine {
    fn new(style: LineStyle, text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            style,
        }
    }

    fn separator() -> Self {
        Self::new(LineStyle::Separator, SEPARATOR)
    }

    fn spacer() -> Self {
        Self::new(LineStyle::Spacer, "")
    }
}

/// A line with its baseline position on the page.
#[derive(Debug, Clone, PartialEq)]
pub struct PlacedLine {
    pub line: DocumentLine,
    pub y_mm: f32,
}

/// Lines repeated at the top of every page.
pub fn header_lines(title: &str) -> Vec<DocumentLine> {
    vec![
        DocumentLine::new(LineStyle::Title, title),
        DocumentLine::separator(),
    ]
}

/// Body of the invoice in print order: customer block, items, totals.
pub fn compose_lines(document: &InvoiceDocument) -> Vec<DocumentLine> {
    let customer = &document.customer;
    let mut lines = vec![
        DocumentLine::new(LineStyle::Heading, "Customer Information"),
        DocumentLine::new(LineStyle::Body, format!("Name: {}", customer.name)),
        DocumentLine::new(LineStyle::Body, format!("Mobile Number: {}", customer.mobile)),
    ];

    // Addresses come from a text area and may span several lines.
    let mut address_lines = customer.address.lines();
    lines.push(DocumentLine::new(
        LineStyle::Body,
        format!("Address: {}", address_lines.next().unwrap_or_default()),
    ));
    lines.extend(address_lines.map(|l| DocumentLine::new(LineStyle::Body, l)));

    lines.push(DocumentLine::new(
        LineStyle::Body,
        format!("Order Date: {}", customer.order_date.format(DATE_FORMAT)),
    ));
    lines.push(DocumentLine::new(
        LineStyle::Body,
        format!("Delivery Date: {}", customer.delivery_date.format(DATE_FORMAT)),
    ));
    lines.push(DocumentLine::spacer());
    lines.push(DocumentLine::separator());

    lines.push(DocumentLine::new(LineStyle::Heading, "Order Information"));
    lines.extend(
        format_lines(&document.items)
            .into_iter()
            .map(|text| DocumentLine::new(LineStyle::Body, text)),
    );
    lines.push(DocumentLine::spacer());
    lines.push(DocumentLine::separator());

    lines.extend(
        format_totals(&document.totals)
            .into_iter()
            .map(|text| DocumentLine::new(LineStyle::Body, text)),
    );

    lines
}

/// Place lines top to bottom, starting a new page (with the header repeated)
/// whenever the next line would cross the bottom margin.
pub fn paginate(header: &[DocumentLine], body: &[DocumentLine]) -> Vec<Vec<PlacedLine>> {
    let top = PAGE_HEIGHT_MM - TOP_MARGIN_MM;
    let mut pages = Vec::new();
    let mut page = Vec::new();
    let mut y = top;

    let place = |page: &mut Vec<PlacedLine>, y: &mut f32, line: &DocumentLine| {
        *y -= line.style.advance_mm();
        page.push(PlacedLine {
            line: line.clone(),
            y_mm: *y,
        });
    };

    for line in header {
        place(&mut page, &mut y, line);
    }

    for line in body {
        if y - line.style.advance_mm() < BOTTOM_MARGIN_MM {
            pages.push(std::mem::take(&mut page));
            y = top;
            for header_line in header {
                place(&mut page, &mut y, header_line);
            }
        }
        place(&mut page, &mut y, line);
    }

    pages.push(page);
    pages
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::invoice::{compute_totals, CustomerInfo, DiscountPercent, LineItem, Money, Quantity};
    use chrono::NaiveDate;

    fn document(item_count: usize) -> InvoiceDocument {
        let items: Vec<LineItem> = (0..item_count)
            .map(|i| {
                LineItem::new(
                    format!("Item {}", i + 1),
                    Money::parse("2.50").unwrap(),
                    Quantity::ONE,
                )
            })
            .collect();
        let totals = compute_totals(&items, DiscountPercent::NONE);
        InvoiceDocument {
            customer: CustomerInfo {
                name: "Jane Doe".to_string(),
                mobile: "0501234567".to_string(),
                address: "Building 4\nDubai Marina".to_string(),
                order_date: NaiveDate::from_ymd_opt(2026, 10, 19).unwrap(),
                delivery_date: NaiveDate::from_ymd_opt(2026, 10, 21).unwrap(),
            },
            items,
            totals,
        }
    }

    fn texts(lines: &[DocumentLine]) -> Vec<&str> {
        lines.iter().map(|l| l.text.as_str()).collect()
    }

    #[test]
    fn test_compose_order() {
        let lines = compose_lines(&document(1));
        let texts = texts(&lines);

        assert_eq!(
            texts,
            vec![
                "Customer Information",
                "Name: Jane Doe",
                "Mobile Number: 0501234567",
                "Address: Building 4",
                "Dubai Marina",
                "Order Date: 2026-10-19",
                "Delivery Date: 2026-10-21",
                "",
                SEPARATOR,
                "Order Information",
                "1 - Item 1  [Price: 2.50 AED * Count: 1] = 2.50 AED",
                "",
                SEPARATOR,
                "Gross Price : 2.50 AED",
                "Discount Amount : (0.00%): -0.00 AED",
                "Final Price : 2.50 AED",
            ]
        );
    }

    #[test]
    fn test_empty_address_still_prints_label() {
        let mut doc = document(0);
        doc.customer.address = String::new();
        let lines = compose_lines(&doc);
        assert!(lines.iter().any(|l| l.text == "Address: "));
    }

    #[test]
    fn test_short_invoice_fits_one_page() {
        let pages = paginate(&header_lines("Bill"), &compose_lines(&document(3)));
        assert_eq!(pages.len(), 1);
        assert_eq!(pages[0][0].line.text, "Bill");
    }

    #[test]
    fn test_long_invoice_spans_pages_with_header() {
        let body = compose_lines(&document(60));
        let pages = paginate(&header_lines("Bill"), &body);

        assert!(pages.len() > 1);
        for page in &pages {
            assert_eq!(page[0].line.style, LineStyle::Title);
            assert_eq!(page[1].line.style, LineStyle::Separator);
            assert!(page.iter().all(|placed| placed.y_mm >= BOTTOM_MARGIN_MM));
        }

        let placed_body: usize = pages.iter().map(|page| page.len() - 2).sum();
        assert_eq!(placed_body, body.len());
    }
}
