//! Blacklist entry store
//!
//! Entries are an audit trail: removal closes them, nothing deletes them.
//! The single-active-entry-per-team invariant is enforced at insert.

use std::collections::HashMap;
use std::sync::{Arc, RwLock};

use chrono::{DateTime, Utc};

use crate::{
    error::{AppError, AppResult},
    models::blacklist::BlacklistEntry,
};

use super::ids::IdGenerator;

#[derive(Clone)]
pub struct BlacklistStore {
    entries: Arc<RwLock<HashMap<i64, BlacklistEntry>>>,
    ids: IdGenerator,
}

impl BlacklistStore {
    pub fn new(ids: IdGenerator) -> Self {
        Self {
            entries: Arc::new(RwLock::new(HashMap::new())),
            ids,
        }
    }

    fn read(&self) -> AppResult<std::sync::RwLockReadGuard<'_, HashMap<i64, BlacklistEntry>>> {
        self.entries
            .read()
            .map_err(|_| AppError::Unavailable("blacklist store poisoned".into()))
    }

    fn write(&self) -> AppResult<std::sync::RwLockWriteGuard<'_, HashMap<i64, BlacklistEntry>>> {
        self.entries
            .write()
            .map_err(|_| AppError::Unavailable("blacklist store poisoned".into()))
    }

    /// Insert a new active entry; fails `AlreadyBlacklisted` if one exists
    pub fn insert_active(
        &self,
        team_id: i64,
        blacklisted_by: i64,
        reason: String,
        at: DateTime<Utc>,
    ) -> AppResult<BlacklistEntry> {
        let mut map = self.write()?;
        if map.values().any(|e| e.team_id == team_id && e.is_active()) {
            return Err(AppError::AlreadyBlacklisted(team_id));
        }

        let entry = BlacklistEntry {
            id: self.ids.next(),
            team_id,
            blacklisted_by,
            reason,
            blacklisted_at: at,
            removed_at: None,
            removed_by: None,
            notes: None,
        };
        map.insert(entry.id, entry.clone());
        Ok(entry)
    }

    /// Close the team's active entry; fails `NotBlacklisted` if none exists
    pub fn close_active(
        &self,
        team_id: i64,
        removed_by: i64,
        notes: Option<String>,
        at: DateTime<Utc>,
    ) -> AppResult<BlacklistEntry> {
        let mut map = self.write()?;
        let entry = map
            .values_mut()
            .find(|e| e.team_id == team_id && e.is_active())
            .ok_or(AppError::NotBlacklisted(team_id))?;

        entry.removed_at = Some(at);
        entry.removed_by = Some(removed_by);
        entry.notes = notes;
        Ok(entry.clone())
    }

    /// The team's active entry, if any
    pub fn active_entry(&self, team_id: i64) -> AppResult<Option<BlacklistEntry>> {
        Ok(self
            .read()?
            .values()
            .find(|e| e.team_id == team_id && e.is_active())
            .cloned())
    }

    /// All currently active entries, oldest first
    pub fn list_active(&self) -> AppResult<Vec<BlacklistEntry>> {
        let map = self.read()?;
        let mut active: Vec<_> = map.values().filter(|e| e.is_active()).cloned().collect();
        active.sort_by_key(|e| (e.blacklisted_at, e.id));
        Ok(active)
    }

    /// Full audit history for a team, oldest first
    pub fn history(&self, team_id: i64) -> AppResult<Vec<BlacklistEntry>> {
        let map = self.read()?;
        let mut entries: Vec<_> = map
            .values()
            .filter(|e| e.team_id == team_id)
            .cloned()
            .collect();
        entries.sort_by_key(|e| (e.blacklisted_at, e.id));
        Ok(entries)
    }
}
