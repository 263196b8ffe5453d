use chrono::{Local, NaiveDate};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use super::money::{Money, Quantity};
use super::validation::{ValidationError, ValidationErrors};

/// A validated invoice row.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, ToSchema)]
pub struct LineItem {
    pub name: String,
    pub unit_price: Money,
    pub count: Quantity,
}

impl LineItem {
    pub fn new(name: impl Into<String>, unit_price: Money, count: Quantity) -> Self {
        Self {
            name: name.into(),
            unit_price,
            count,
        }
    }

    /// `unit_price * count`, exact.
    pub fn line_total(&self) -> Decimal {
        self.unit_price.amount() * self.count.as_decimal()
    }
}

fn default_count() -> String {
    "1".to_string()
}

/// A row exactly as the form sends it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct RowInput {
    #[serde(default)]
    #[schema(example = "Pen")]
    pub name: String,
    #[serde(default)]
    #[schema(example = "2.50")]
    pub price: String,
    #[serde(default = "default_count")]
    #[schema(example = "4")]
    pub count: String,
}

impl Default for RowInput {
    fn default() -> Self {
        Self {
            name: String::new(),
            price: String::new(),
            count: default_count(),
        }
    }
}

impl RowInput {
    pub fn new(name: &str, price: &str, count: &str) -> Self {
        Self {
            name: name.to_string(),
            price: price.to_string(),
            count: count.to_string(),
        }
    }

    /// A row with neither a name nor a price.
    pub fn is_blank(&self) -> bool {
        self.name.trim().is_empty() && self.price.trim().is_empty()
    }

    /// Parse the raw fields into a row status.
    pub fn parse(&self) -> RowStatus {
        if self.is_blank() {
            return RowStatus::Blank;
        }

        let mut errors = ValidationErrors::new();

        let unit_price = match Money::parse(&self.price) {
            Ok(price) => Some(price),
            Err(e) => {
                errors.add(ValidationError::invalid_price("price", &e));
                None
            }
        };

        let count = match Quantity::parse_or_default(&self.count) {
            Ok(count) => Some(count),
            Err(e) => {
                errors.add(ValidationError::invalid_count("count", &e));
                None
            }
        };

        match (unit_price, count) {
            (Some(unit_price), Some(count)) => RowStatus::Valid {
                item: LineItem::new(self.name.trim(), unit_price, count),
            },
            _ => RowStatus::Invalid {
                errors: errors.into_vec(),
            },
        }
    }
}

/// Outcome of parsing a row.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, ToSchema)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum RowStatus {
    Blank,
    Valid { item: LineItem },
    Invalid { errors: Vec<ValidationError> },
}

impl RowStatus {
    pub fn item(&self) -> Option<&LineItem> {
        match self {
            RowStatus::Valid { item } => Some(item),
            _ => None,
        }
    }
}

/// A row in the item list: raw input plus the status parsed from it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, ToSchema)]
pub struct ItemRow {
    pub input: RowInput,
    pub status: RowStatus,
}

impl ItemRow {
    pub fn new(input: RowInput) -> Self {
        let status = input.parse();
        Self { input, status }
    }

    pub fn blank() -> Self {
        Self::new(RowInput::default())
    }

    pub fn is_blank(&self) -> bool {
        self.input.is_blank()
    }
}

impl From<RowInput> for ItemRow {
    fn from(input: RowInput) -> Self {
        Self::new(input)
    }
}

/// Customer block printed at the top of the invoice. Passed through unchanged.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct CustomerInfo {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub mobile: String,
    #[serde(default)]
    pub address: String,
    #[schema(value_type = String, format = Date, example = "2026-10-19")]
    pub order_date: NaiveDate,
    #[schema(value_type = String, format = Date, example = "2026-10-21")]
    pub delivery_date: NaiveDate,
}

impl CustomerInfo {
    /// Empty customer with both dates set to today.
    pub fn today() -> Self {
        let today = Local::now().date_naive();
        Self {
            name: String::new(),
            mobile: String::new(),
            address: String::new(),
            order_date: today,
            delivery_date: today,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_valid_row() {
        let status = RowInput::new(" Pen ", "2.50", "4").parse();
        let item = status.item().expect("row should be valid");
        assert_eq!(item.name, "Pen");
        assert_eq!(item.line_total(), Decimal::new(1000, 2));
    }

    #[test]
    fn test_blank_row() {
        assert_eq!(RowInput::default().parse(), RowStatus::Blank);
        assert_eq!(RowInput::new("  ", "", "7").parse(), RowStatus::Blank);
    }

    #[test]
    fn test_invalid_price_and_count_are_both_reported() {
        match RowInput::new("Book", "bad", "zero").parse() {
            RowStatus::Invalid { errors } => {
                let fields: Vec<_> = errors.iter().map(|e| e.field.as_str()).collect();
                assert_eq!(fields, vec!["price", "count"]);
            }
            other => panic!("expected invalid row, got {:?}", other),
        }
    }

    #[test]
    fn test_name_without_price_is_invalid() {
        match RowInput::new("Book", "", "1").parse() {
            RowStatus::Invalid { errors } => assert_eq!(errors[0].message, "Price must not be empty"),
            other => panic!("expected invalid row, got {:?}", other),
        }
    }

    #[test]
    fn test_row_input_count_defaults_to_one() {
        let input: RowInput = serde_json::from_str(r#"{"name": "Pen", "price": "3"}"#).unwrap();
        assert_eq!(input.count, "1");
        assert!(ItemRow::new(input).status.item().is_some());
    }

    #[test]
    fn test_row_status_serialization() {
        let row = ItemRow::new(RowInput::new("Pen", "2.50", "4"));
        let json = serde_json::to_value(&row).unwrap();
        assert_eq!(json["status"]["status"], "valid");
        assert_eq!(json["status"]["item"]["unit_price"], "2.50");
        assert_eq!(json["status"]["item"]["count"], 4);
    }

    #[test]
    fn test_customer_info_deserialization() {
        let json = r#"{
            "name": "Jane Doe",
            "mobile": "0501234567",
            "address": "Dubai Marina",
            "order_date": "2026-10-19",
            "delivery_date": "2026-10-21"
        }"#;

        let customer: CustomerInfo = serde_json::from_str(json).unwrap();
        assert_eq!(customer.name, "Jane Doe");
        assert_eq!(customer.delivery_date.to_string(), "2026-10-21");
    }
}
