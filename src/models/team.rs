//! Team model

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use validator::Validate;

/// Borrowing team
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Team {
    pub id: i64,
    pub name: String,
    /// Inactive teams may not check equipment out
    pub active: bool,
    /// Mirror of "has an active blacklist entry"; the entry is authoritative
    pub blacklisted: bool,
    pub created_at: DateTime<Utc>,
}

/// Create team request
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct CreateTeam {
    #[validate(length(min = 1, max = 255))]
    pub name: String,
}
