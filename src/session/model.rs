use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

use crate::invoice::{CustomerInfo, DiscountPercent, ItemRow, LineItem};

/// The "apply discount" toggle and its percentage.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, ToSchema)]
pub struct DiscountSetting {
    pub enabled: bool,
    pub percent: DiscountPercent,
}

impl DiscountSetting {
    /// Percentage actually applied: zero while the toggle is off.
    pub fn effective(&self) -> DiscountPercent {
        if self.enabled {
            self.percent
        } else {
            DiscountPercent::NONE
        }
    }
}

/// One user's in-progress invoice form.
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct InvoiceSession {
    pub id: Uuid,
    pub customer: CustomerInfo,
    pub rows: Vec<ItemRow>,
    pub discount: DiscountSetting,
    pub created_at: DateTime<Utc>,
}

impl InvoiceSession {
    /// A fresh form: today's dates, one blank row, no discount.
    pub fn new() -> Self {
        Self {
            id: Uuid::new_v4(),
            customer: CustomerInfo::today(),
            rows: vec![ItemRow::blank()],
            discount: DiscountSetting::default(),
            created_at: Utc::now(),
        }
    }

    /// Items that currently parse; invalid and blank rows are left out.
    pub fn valid_items(&self) -> Vec<LineItem> {
        self.rows
            .iter()
            .filter_map(|row| row.status.item().cloned())
            .collect()
    }
}

impl Default for InvoiceSession {
    fn default() -> Self {
        Self::new()
    }
}

#[derive(Debug, Deserialize, ToSchema)]
pub struct UpdateDiscountRequest {
    pub enabled: bool,
    #[serde(default)]
    #[schema(value_type = String, example = "10")]
    pub percent: Decimal,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct AddRowResponse {
    /// False when the last row was still blank and nothing was added
    pub appended: bool,
    pub rows: Vec<ItemRow>,
}
