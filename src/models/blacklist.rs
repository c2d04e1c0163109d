//! Blacklist entry model and related request types

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use validator::Validate;

/// One blacklisting episode for a team.
///
/// At most one entry per team has `removed_at = None` at any time.
/// Entries are never deleted; removal closes them.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BlacklistEntry {
    pub id: i64,
    pub team_id: i64,
    /// User (or 0 for the sweep) who imposed the blacklist
    pub blacklisted_by: i64,
    pub reason: String,
    pub blacklisted_at: DateTime<Utc>,
    pub removed_at: Option<DateTime<Utc>>,
    pub removed_by: Option<i64>,
    pub notes: Option<String>,
}

impl BlacklistEntry {
    pub fn is_active(&self) -> bool {
        self.removed_at.is_none()
    }
}

/// Operator-initiated blacklist request
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct ManualBlacklist {
    pub team_id: i64,
    pub blacklisted_by: i64,
    #[validate(length(min = 1, max = 500))]
    pub reason: String,
}

/// Blacklist removal request
#[derive(Debug, Clone, Deserialize)]
pub struct RemoveBlacklist {
    pub team_id: i64,
    pub removed_by: i64,
    pub notes: Option<String>,
}
