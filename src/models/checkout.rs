//! Checkout record model and related request types

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

use super::enums::CheckoutStatus;

/// One unit-loan of a quantity of equipment to a team.
///
/// Records mutate exactly once, on return; they are never deleted
/// (audit trail).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CheckoutRecord {
    pub id: i64,
    pub equipment_id: i64,
    pub team_id: i64,
    /// User who issued the equipment
    pub issued_by: i64,
    /// Units borrowed under this record
    pub quantity: i32,
    pub checked_out_at: DateTime<Utc>,
    pub expected_return_at: DateTime<Utc>,
    pub returned_at: Option<DateTime<Utc>>,
    pub status: CheckoutStatus,
    /// Condition noted at return time
    pub condition: Option<String>,
    pub notes: Option<String>,
}

impl CheckoutRecord {
    pub fn is_open(&self) -> bool {
        self.status == CheckoutStatus::Open
    }

    /// Whether the record was overdue at `as_of`, given a grace window
    pub fn is_overdue(&self, as_of: DateTime<Utc>, grace: chrono::Duration) -> bool {
        self.is_open() && self.expected_return_at + grace < as_of
    }
}

/// Checkout request
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct CheckoutRequest {
    pub equipment_id: i64,
    pub team_id: i64,
    pub issued_by: i64,
    #[validate(range(min = 1))]
    pub quantity: i32,
    /// Due date; defaults to now + `checkout.default_loan_days`
    pub expected_return_at: Option<DateTime<Utc>>,
    /// Stable token making retries of timed-out calls idempotent
    pub request_token: Option<Uuid>,
}

/// Return request
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct ReturnRequest {
    pub checkout_id: i64,
    /// Must match the record's quantity; partial returns are not supported
    #[validate(range(min = 1))]
    pub quantity: i32,
    pub condition: Option<String>,
    pub notes: Option<String>,
}

/// Result of a successful return
#[derive(Debug, Clone, Serialize)]
pub struct ReturnOutcome {
    pub record: CheckoutRecord,
    /// True when the team is blacklisted and now has zero open checkouts,
    /// i.e. an operator unblacklist would succeed. Removal stays explicit.
    pub eligible_for_unblacklist: bool,
}
