//! Shared domain enums
//!
//! Statuses are closed enums validated at the boundary; the numeric codes
//! are the stable wire/storage representation.

use serde::{Deserialize, Serialize};

// ---------------------------------------------------------------------------
// CheckoutStatus
// ---------------------------------------------------------------------------

/// Lifecycle of a checkout record: `Open` → `Returned`, terminal
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[repr(i16)]
pub enum CheckoutStatus {
    Open = 0,
    Returned = 1,
}

impl From<i16> for CheckoutStatus {
    fn from(v: i16) -> Self {
        match v {
            1 => CheckoutStatus::Returned,
            _ => CheckoutStatus::Open,
        }
    }
}

impl From<CheckoutStatus> for i16 {
    fn from(s: CheckoutStatus) -> Self {
        s as i16
    }
}

impl std::fmt::Display for CheckoutStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let label = match self {
            CheckoutStatus::Open => "Open",
            CheckoutStatus::Returned => "Returned",
        };
        write!(f, "{}", label)
    }
}

// ---------------------------------------------------------------------------
// EquipmentStatus
// ---------------------------------------------------------------------------

/// Manual availability override, independent of the loan count
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[repr(i16)]
pub enum EquipmentStatus {
    Available = 0,
    Unavailable = 1,
}

impl From<i16> for EquipmentStatus {
    fn from(v: i16) -> Self {
        match v {
            1 => EquipmentStatus::Unavailable,
            _ => EquipmentStatus::Available,
        }
    }
}

impl From<EquipmentStatus> for i16 {
    fn from(s: EquipmentStatus) -> Self {
        s as i16
    }
}

impl std::fmt::Display for EquipmentStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let label = match self {
            EquipmentStatus::Available => "Available",
            EquipmentStatus::Unavailable => "Unavailable",
        };
        write!(f, "{}", label)
    }
}

// ---------------------------------------------------------------------------
// EquipmentCategory
// ---------------------------------------------------------------------------

/// Equipment category codes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[repr(i16)]
pub enum EquipmentCategory {
    PowerTool = 0,
    HandTool = 1,
    Lifting = 2,
    Safety = 3,
    Electronics = 4,
    Other = 5,
}

impl From<i16> for EquipmentCategory {
    fn from(v: i16) -> Self {
        match v {
            0 => EquipmentCategory::PowerTool,
            1 => EquipmentCategory::HandTool,
            2 => EquipmentCategory::Lifting,
            3 => EquipmentCategory::Safety,
            4 => EquipmentCategory::Electronics,
            _ => EquipmentCategory::Other,
        }
    }
}

impl From<EquipmentCategory> for i16 {
    fn from(c: EquipmentCategory) -> Self {
        c as i16
    }
}

impl std::fmt::Display for EquipmentCategory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let label = match self {
            EquipmentCategory::PowerTool => "Power Tool",
            EquipmentCategory::HandTool => "Hand Tool",
            EquipmentCategory::Lifting => "Lifting",
            EquipmentCategory::Safety => "Safety",
            EquipmentCategory::Electronics => "Electronics",
            EquipmentCategory::Other => "Other",
        };
        write!(f, "{}", label)
    }
}
