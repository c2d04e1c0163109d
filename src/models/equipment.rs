//! Equipment model

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use validator::Validate;

use super::enums::{EquipmentCategory, EquipmentStatus};

/// Equipment record
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EquipmentItem {
    pub id: i64,
    /// Equipment name / description
    pub name: String,
    /// Storage location (aisle, shelf, cage...)
    pub location: Option<String>,
    pub category: EquipmentCategory,
    pub serial_number: Option<String>,
    /// Replacement value
    pub value: Option<Decimal>,
    /// Number of units in the pool
    pub total_quantity: i32,
    /// Units currently out with teams
    pub quantity_on_loan: i32,
    /// Manual override, independent of the loan count
    pub status: EquipmentStatus,
    pub notes: Option<String>,
    /// Soft-delete marker; a retired item refuses new reservations
    pub retired_at: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
    pub updated_at: Option<DateTime<Utc>>,
}

impl EquipmentItem {
    /// Units that can still be reserved
    pub fn available(&self) -> i32 {
        self.total_quantity - self.quantity_on_loan
    }

    /// Whether new reservations are accepted at all
    pub fn is_borrowable(&self) -> bool {
        self.status == EquipmentStatus::Available && self.retired_at.is_none()
    }
}

/// Create equipment request
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct CreateEquipment {
    #[validate(length(min = 1, max = 255))]
    pub name: String,
    pub location: Option<String>,
    pub category: Option<EquipmentCategory>,
    pub serial_number: Option<String>,
    pub value: Option<Decimal>,
    #[validate(range(min = 0))]
    pub total_quantity: i32,
    pub notes: Option<String>,
}

/// Update equipment request
#[derive(Debug, Clone, Default, Deserialize, Validate)]
pub struct UpdateEquipment {
    #[validate(length(min = 1, max = 255))]
    pub name: Option<String>,
    pub location: Option<String>,
    pub category: Option<EquipmentCategory>,
    pub serial_number: Option<String>,
    pub value: Option<Decimal>,
    #[validate(range(min = 0))]
    pub total_quantity: Option<i32>,
    pub status: Option<EquipmentStatus>,
    pub notes: Option<String>,
}
