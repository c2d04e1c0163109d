//! Reservation coordinator
//!
//! The façade used by API handlers. Sequences the eligibility gate, the
//! stock reservation and the record creation as one logical operation,
//! with a compensating release when the record cannot be created after
//! stock was reserved.

use std::collections::HashMap;
use std::sync::{Arc, RwLock};

use chrono::{Duration, Utc};
use uuid::Uuid;
use validator::Validate;

use crate::{
    config::CoreConfig,
    error::{AppError, AppResult},
    models::checkout::{CheckoutRecord, CheckoutRequest, ReturnOutcome, ReturnRequest},
};

use super::{
    blacklist::{BlacklistService, Eligibility},
    checkouts::CheckoutService,
    inventory::InventoryService,
};

#[derive(Clone)]
pub struct CoordinatorService {
    inventory: InventoryService,
    checkouts: CheckoutService,
    blacklist: BlacklistService,
    config: Arc<CoreConfig>,
    /// request token → checkout id, so retries of timed-out calls cannot
    /// double-decrement stock
    tokens: Arc<RwLock<HashMap<Uuid, i64>>>,
}

impl CoordinatorService {
    pub fn new(
        inventory: InventoryService,
        checkouts: CheckoutService,
        blacklist: BlacklistService,
        config: Arc<CoreConfig>,
    ) -> Self {
        Self {
            inventory,
            checkouts,
            blacklist,
            config,
            tokens: Arc::new(RwLock::new(HashMap::new())),
        }
    }

    fn replay_token(&self, token: Uuid) -> AppResult<Option<CheckoutRecord>> {
        let map = self
            .tokens
            .read()
            .map_err(|_| AppError::Unavailable("token table poisoned".into()))?;
        match map.get(&token) {
            Some(id) => Ok(Some(self.checkouts.get(*id)?)),
            None => Ok(None),
        }
    }

    fn remember_token(&self, token: Uuid, checkout_id: i64) -> AppResult<()> {
        self.tokens
            .write()
            .map_err(|_| AppError::Unavailable("token table poisoned".into()))?
            .insert(token, checkout_id);
        Ok(())
    }

    /// Tokens only need to outlive their checkout: once the record is
    /// closed a retry has nothing left to replay, so the entry is dropped
    /// to keep the table bounded by open checkouts.
    fn forget_tokens_for(&self, checkout_id: i64) -> AppResult<()> {
        self.tokens
            .write()
            .map_err(|_| AppError::Unavailable("token table poisoned".into()))?
            .retain(|_, id| *id != checkout_id);
        Ok(())
    }

    /// Check equipment out to a team.
    ///
    /// Eligibility → reserve → open. A failed reserve leaves no trace; a
    /// failed open releases the reservation before reporting.
    pub async fn check_out(&self, request: CheckoutRequest) -> AppResult<CheckoutRecord> {
        request.validate()?;

        if request.quantity > self.config.checkout.max_quantity {
            return Err(AppError::Validation(format!(
                "quantity exceeds the per-checkout maximum of {}",
                self.config.checkout.max_quantity
            )));
        }

        if let Some(token) = request.request_token {
            if let Some(existing) = self.replay_token(token)? {
                tracing::debug!(checkout_id = existing.id, %token, "checkout replayed from request token");
                return Ok(existing);
            }
        }

        let now = Utc::now();
        let expected_return_at = request
            .expected_return_at
            .unwrap_or(now + Duration::days(self.config.checkout.default_loan_days));
        if expected_return_at <= now {
            return Err(AppError::Validation(
                "expected return must be in the future".into(),
            ));
        }

        match self.blacklist.eligibility(request.team_id)? {
            Eligibility::Eligible => {}
            Eligibility::Blacklisted(entry) => {
                return Err(AppError::TeamBlacklisted {
                    team_id: request.team_id,
                    reason: entry.reason,
                });
            }
        }

        self.inventory
            .reserve(request.equipment_id, request.quantity)
            .await?;

        match self.checkouts.open(
            request.equipment_id,
            request.team_id,
            request.issued_by,
            request.quantity,
            expected_return_at,
        ) {
            Ok(record) => {
                if let Some(token) = request.request_token {
                    self.remember_token(token, record.id)?;
                }
                Ok(record)
            }
            Err(e) => {
                // Compensate: reserved stock must not leak without a record
                if let Err(release_err) = self
                    .inventory
                    .release(request.equipment_id, request.quantity)
                    .await
                {
                    tracing::error!(
                        equipment_id = request.equipment_id,
                        quantity = request.quantity,
                        error = %release_err,
                        "failed to release reservation after open failure"
                    );
                }
                Err(e)
            }
        }
    }

    /// Return equipment.
    ///
    /// Close → release. Blacklist removal stays an explicit operator
    /// action; the outcome only signals when the team became removable.
    pub async fn return_equipment(&self, request: ReturnRequest) -> AppResult<ReturnOutcome> {
        request.validate()?;

        let existing = self.checkouts.get(request.checkout_id)?;
        if request.quantity != existing.quantity {
            return Err(AppError::Validation(format!(
                "partial returns are not supported: checkout {} covers {} unit(s)",
                request.checkout_id, existing.quantity
            )));
        }

        let record = self.checkouts.close(
            request.checkout_id,
            Utc::now(),
            request.condition,
            request.notes,
        )?;

        if let Err(e) = self
            .inventory
            .release(record.equipment_id, record.quantity)
            .await
        {
            // Compensate: the record must not stay Returned while the
            // stock is still counted out, or no retry could ever restore
            // the ledger
            tracing::warn!(
                checkout_id = record.id,
                equipment_id = record.equipment_id,
                error = %e,
                "release failed after close, reverting the record"
            );
            if let Err(restore_err) = self.checkouts.restore(existing) {
                tracing::error!(
                    checkout_id = record.id,
                    error = %restore_err,
                    "failed to revert checkout after release failure"
                );
            }
            return Err(e);
        }

        self.forget_tokens_for(record.id)?;

        let team = self.blacklist.team(record.team_id)?;
        let eligible_for_unblacklist =
            team.blacklisted && !self.checkouts.has_open_by_team(record.team_id)?;

        Ok(ReturnOutcome {
            record,
            eligible_for_unblacklist,
        })
    }
}
