//! Checkout record store
//!
//! Records transition `Open` → `Returned` exactly once and are never
//! deleted. All reads return snapshots.

use std::collections::HashMap;
use std::sync::{Arc, RwLock};

use chrono::{DateTime, Duration, Utc};

use crate::{
    error::{AppError, AppResult},
    models::{checkout::CheckoutRecord, enums::CheckoutStatus},
};

use super::ids::IdGenerator;

#[derive(Clone)]
pub struct CheckoutStore {
    records: Arc<RwLock<HashMap<i64, CheckoutRecord>>>,
    ids: IdGenerator,
}

impl CheckoutStore {
    pub fn new(ids: IdGenerator) -> Self {
        Self {
            records: Arc::new(RwLock::new(HashMap::new())),
            ids,
        }
    }

    fn read(&self) -> AppResult<std::sync::RwLockReadGuard<'_, HashMap<i64, CheckoutRecord>>> {
        self.records
            .read()
            .map_err(|_| AppError::Unavailable("checkout store poisoned".into()))
    }

    fn write(&self) -> AppResult<std::sync::RwLockWriteGuard<'_, HashMap<i64, CheckoutRecord>>> {
        self.records
            .write()
            .map_err(|_| AppError::Unavailable("checkout store poisoned".into()))
    }

    /// Open a new record. Stock must already be reserved by the caller;
    /// this never touches the ledger.
    pub fn open(
        &self,
        equipment_id: i64,
        team_id: i64,
        issued_by: i64,
        quantity: i32,
        expected_return_at: DateTime<Utc>,
    ) -> AppResult<CheckoutRecord> {
        let now = Utc::now();
        if expected_return_at <= now {
            return Err(AppError::Validation(
                "expected return must be after the checkout time".into(),
            ));
        }

        let record = CheckoutRecord {
            id: self.ids.next(),
            equipment_id,
            team_id,
            issued_by,
            quantity,
            checked_out_at: now,
            expected_return_at,
            returned_at: None,
            status: CheckoutStatus::Open,
            condition: None,
            notes: None,
        };

        self.write()?.insert(record.id, record.clone());
        Ok(record)
    }

    /// Get a record by ID
    pub fn get(&self, id: i64) -> AppResult<CheckoutRecord> {
        self.read()?
            .get(&id)
            .cloned()
            .ok_or_else(|| AppError::NotFound(format!("checkout {} not found", id)))
    }

    /// Close a record exactly once; double returns fail `AlreadyReturned`
    pub fn close(
        &self,
        id: i64,
        returned_at: DateTime<Utc>,
        condition: Option<String>,
        notes: Option<String>,
    ) -> AppResult<CheckoutRecord> {
        let mut map = self.write()?;
        let record = map
            .get_mut(&id)
            .ok_or_else(|| AppError::NotFound(format!("checkout {} not found", id)))?;

        if record.returned_at.is_some() {
            return Err(AppError::AlreadyReturned(id));
        }

        record.returned_at = Some(returned_at);
        record.status = CheckoutStatus::Returned;
        record.condition = condition;
        if notes.is_some() {
            record.notes = notes;
        }
        Ok(record.clone())
    }

    /// Put a pre-close snapshot back after a failed release, so the
    /// return can be retried instead of leaking reserved stock behind a
    /// `Returned` record.
    pub(crate) fn restore(&self, snapshot: CheckoutRecord) -> AppResult<()> {
        let mut map = self.write()?;
        match map.get_mut(&snapshot.id) {
            Some(record) => {
                *record = snapshot;
                Ok(())
            }
            None => Err(AppError::NotFound(format!(
                "checkout {} not found",
                snapshot.id
            ))),
        }
    }

    /// All open records overdue at `as_of` given `grace`. Pure read.
    pub fn find_overdue(
        &self,
        as_of: DateTime<Utc>,
        grace: Duration,
    ) -> AppResult<Vec<CheckoutRecord>> {
        let map = self.read()?;
        let mut overdue: Vec<_> = map
            .values()
            .filter(|r| r.is_overdue(as_of, grace))
            .cloned()
            .collect();
        overdue.sort_by_key(|r| (r.team_id, r.expected_return_at, r.id));
        Ok(overdue)
    }

    /// Whether the team has any open record
    pub fn has_open_by_team(&self, team_id: i64) -> AppResult<bool> {
        Ok(self
            .read()?
            .values()
            .any(|r| r.team_id == team_id && r.is_open()))
    }

    /// Open records for a team, oldest first
    pub fn open_by_team(&self, team_id: i64) -> AppResult<Vec<CheckoutRecord>> {
        let map = self.read()?;
        let mut open: Vec<_> = map
            .values()
            .filter(|r| r.team_id == team_id && r.is_open())
            .cloned()
            .collect();
        open.sort_by_key(|r| (r.checked_out_at, r.id));
        Ok(open)
    }

    /// All records for a team, open and returned, oldest first
    pub fn list_by_team(&self, team_id: i64) -> AppResult<Vec<CheckoutRecord>> {
        let map = self.read()?;
        let mut records: Vec<_> = map
            .values()
            .filter(|r| r.team_id == team_id)
            .cloned()
            .collect();
        records.sort_by_key(|r| (r.checked_out_at, r.id));
        Ok(records)
    }

    /// Count open records
    pub fn count_open(&self) -> AppResult<usize> {
        Ok(self.read()?.values().filter(|r| r.is_open()).count())
    }

    /// Count records overdue at `as_of` given `grace`
    pub fn count_overdue(&self, as_of: DateTime<Utc>, grace: Duration) -> AppResult<usize> {
        Ok(self
            .read()?
            .values()
            .filter(|r| r.is_overdue(as_of, grace))
            .count())
    }
}
