//! Checkout registry service
//!
//! Owns the lifecycle of individual checkout records. Opening assumes the
//! caller already reserved stock; closing never touches the ledger either,
//! the coordinator sequences both.

use chrono::{DateTime, Duration, Utc};

use crate::{
    error::AppResult,
    models::checkout::CheckoutRecord,
    store::Store,
};

#[derive(Clone)]
pub struct CheckoutService {
    store: Store,
}

impl CheckoutService {
    pub fn new(store: Store) -> Self {
        Self { store }
    }

    /// Open a record for already-reserved stock
    pub fn open(
        &self,
        equipment_id: i64,
        team_id: i64,
        issued_by: i64,
        quantity: i32,
        expected_return_at: DateTime<Utc>,
    ) -> AppResult<CheckoutRecord> {
        let record = self
            .store
            .checkouts
            .open(equipment_id, team_id, issued_by, quantity, expected_return_at)?;
        tracing::info!(
            checkout_id = record.id,
            equipment_id,
            team_id,
            quantity,
            due = %expected_return_at,
            "checkout opened"
        );
        Ok(record)
    }

    /// Close a record exactly once
    pub fn close(
        &self,
        checkout_id: i64,
        returned_at: DateTime<Utc>,
        condition: Option<String>,
        notes: Option<String>,
    ) -> AppResult<CheckoutRecord> {
        let record = self
            .store
            .checkouts
            .close(checkout_id, returned_at, condition, notes)?;
        tracing::info!(checkout_id, team_id = record.team_id, "checkout closed");
        Ok(record)
    }

    /// Get a record by ID
    pub fn get(&self, checkout_id: i64) -> AppResult<CheckoutRecord> {
        self.store.checkouts.get(checkout_id)
    }

    /// Compensation for the coordinator: revert a close whose stock
    /// release failed
    pub(crate) fn restore(&self, snapshot: CheckoutRecord) -> AppResult<()> {
        self.store.checkouts.restore(snapshot)
    }

    /// Open records overdue at `as_of` given `grace`. Pure read, safe to
    /// call repeatedly.
    pub fn find_overdue(
        &self,
        as_of: DateTime<Utc>,
        grace: Duration,
    ) -> AppResult<Vec<CheckoutRecord>> {
        self.store.checkouts.find_overdue(as_of, grace)
    }

    /// Whether any equipment is still out with the team
    pub fn has_open_by_team(&self, team_id: i64) -> AppResult<bool> {
        self.store.checkouts.has_open_by_team(team_id)
    }

    /// Open records for a team
    pub fn open_by_team(&self, team_id: i64) -> AppResult<Vec<CheckoutRecord>> {
        self.store.checkouts.open_by_team(team_id)
    }

    /// Full history for a team
    pub fn list_by_team(&self, team_id: i64) -> AppResult<Vec<CheckoutRecord>> {
        self.store.checkouts.list_by_team(team_id)
    }

    /// Count open records
    pub fn count_open(&self) -> AppResult<usize> {
        self.store.checkouts.count_open()
    }

    /// Count overdue records
    pub fn count_overdue(&self, as_of: DateTime<Utc>, grace: Duration) -> AppResult<usize> {
        self.store.checkouts.count_overdue(as_of, grace)
    }
}
