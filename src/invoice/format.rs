//! Text shapes shown to the user and printed on the invoice.

use rust_decimal::{Decimal, RoundingStrategy};

use super::calculator::InvoiceTotals;
use super::model::LineItem;

/// Currency suffix used for every amount.
pub const CURRENCY: &str = "AED";

/// Round half away from zero to exactly two decimals.
pub fn format_amount(value: Decimal) -> String {
    let rounded = value.round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero);
    format!("{:.2}", rounded)
}

/// `<index> - <name>  [Price: <unit_price> AED * Count: <count>] = <total> AED`
pub fn format_line(index: usize, item: &LineItem) -> String {
    format!(
        "{} - {}  [Price: {} {} * Count: {}] = {} {}",
        index,
        item.name,
        item.unit_price,
        CURRENCY,
        item.count,
        format_amount(item.line_total()),
        CURRENCY
    )
}

/// Item lines numbered from 1.
pub fn format_lines(items: &[LineItem]) -> Vec<String> {
    items
        .iter()
        .enumerate()
        .map(|(i, item)| format_line(i + 1, item))
        .collect()
}

pub fn format_gross(totals: &InvoiceTotals) -> String {
    format!("Gross Price : {} {}", format_amount(totals.gross), CURRENCY)
}

pub fn format_discount(totals: &InvoiceTotals) -> String {
    format!(
        "Discount Amount : ({}%): -{} {}",
        format_amount(totals.discount_percent),
        format_amount(totals.discount_amount),
        CURRENCY
    )
}

pub fn format_final(totals: &InvoiceTotals) -> String {
    format!("Final Price : {} {}", format_amount(totals.final_price), CURRENCY)
}

/// Gross, discount and final lines, in print order.
pub fn format_totals(totals: &InvoiceTotals) -> Vec<String> {
    vec![
        format_gross(totals),
        format_discount(totals),
        format_final(totals),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::invoice::{compute_totals, DiscountPercent, Money, Quantity};

    fn pen() -> LineItem {
        LineItem::new(
            "Pen",
            Money::parse("2.50").unwrap(),
            Quantity::parse_or_default("4").unwrap(),
        )
    }

    #[test]
    fn test_format_line_shape() {
        assert_eq!(
            format_line(1, &pen()),
            "1 - Pen  [Price: 2.50 AED * Count: 4] = 10.00 AED"
        );
    }

    #[test]
    fn test_format_amount_rounds_half_away_from_zero() {
        assert_eq!(format_amount(Decimal::new(1005, 3)), "1.01");
        assert_eq!(format_amount(Decimal::new(1004, 3)), "1.00");
        assert_eq!(format_amount(Decimal::ZERO), "0.00");
        assert_eq!(format_amount(Decimal::from(7)), "7.00");
    }

    #[test]
    fn test_format_lines_numbers_from_one() {
        let lines = format_lines(&[pen(), pen()]);
        assert!(lines[0].starts_with("1 - Pen"));
        assert!(lines[1].starts_with("2 - Pen"));
    }

    #[test]
    fn test_format_totals() {
        let totals = compute_totals(&[pen()], DiscountPercent::new(Decimal::from(10)).unwrap());
        assert_eq!(
            format_totals(&totals),
            vec![
                "Gross Price : 10.00 AED".to_string(),
                "Discount Amount : (10.00%): -1.00 AED".to_string(),
                "Final Price : 9.00 AED".to_string(),
            ]
        );
    }
}
