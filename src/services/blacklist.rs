//! Blacklist guard service
//!
//! Decides whether a team may check equipment out and owns the transition
//! to and from blacklisted status. All transitions for one team run under
//! that team's keyed lock; the entry store additionally enforces the
//! single-active-entry invariant.

use std::collections::BTreeMap;
use std::sync::Arc;
use std::time::Duration as StdDuration;

use chrono::{DateTime, Duration, Utc};
use validator::Validate;

use crate::{
    config::CoreConfig,
    error::{AppError, AppResult},
    models::{
        blacklist::{BlacklistEntry, ManualBlacklist, RemoveBlacklist},
        team::Team,
    },
    store::Store,
};

use super::notifier::BlacklistNotifier;

/// Outcome of the eligibility gate
#[derive(Debug, Clone)]
pub enum Eligibility {
    Eligible,
    Blacklisted(BlacklistEntry),
}

#[derive(Clone)]
pub struct BlacklistService {
    store: Store,
    config: Arc<CoreConfig>,
    notifier: Arc<dyn BlacklistNotifier>,
}

impl BlacklistService {
    pub fn new(store: Store, config: Arc<CoreConfig>, notifier: Arc<dyn BlacklistNotifier>) -> Self {
        Self {
            store,
            config,
            notifier,
        }
    }

    fn lock_timeout(&self) -> StdDuration {
        StdDuration::from_millis(self.config.locks.acquire_timeout_ms)
    }

    /// Grace window from configuration
    pub fn grace_window(&self) -> Duration {
        Duration::seconds(self.config.blacklist.grace_window_seconds)
    }

    /// Consulted before every reservation. A blacklisted team is refused
    /// regardless of stock; an inactive or unknown team is refused too.
    pub fn eligibility(&self, team_id: i64) -> AppResult<Eligibility> {
        let team = self.store.teams.get(team_id)?;
        if !team.active {
            return Err(AppError::TeamInactive(team_id));
        }
        match self.store.blacklist.active_entry(team_id)? {
            Some(entry) => Ok(Eligibility::Blacklisted(entry)),
            None => Ok(Eligibility::Eligible),
        }
    }

    /// Read-only convenience over the eligibility state
    pub fn is_team_blacklisted(&self, team_id: i64) -> AppResult<bool> {
        self.store.teams.get(team_id)?;
        Ok(self.store.blacklist.active_entry(team_id)?.is_some())
    }

    /// All active blacklist entries. Pure read; never triggers the sweep.
    pub fn active_blacklists(&self) -> AppResult<Vec<BlacklistEntry>> {
        self.store.blacklist.list_active()
    }

    /// Audit history for one team
    pub fn history(&self, team_id: i64) -> AppResult<Vec<BlacklistEntry>> {
        self.store.teams.get(team_id)?;
        self.store.blacklist.history(team_id)
    }

    /// Blacklist every team with at least one overdue open record and no
    /// active entry. One entry per team, whatever the overdue count; teams
    /// already blacklisted are skipped, so the call is idempotent.
    pub async fn evaluate_and_blacklist_overdue(
        &self,
        now: DateTime<Utc>,
        grace: Duration,
    ) -> AppResult<Vec<BlacklistEntry>> {
        let overdue = self.store.checkouts.find_overdue(now, grace)?;

        // One pass per team, deterministic order
        let mut per_team: BTreeMap<i64, usize> = BTreeMap::new();
        for record in &overdue {
            *per_team.entry(record.team_id).or_insert(0) += 1;
        }

        let mut created = Vec::new();
        for (team_id, count) in per_team {
            let _guard = self
                .store
                .team_locks
                .acquire(team_id, self.lock_timeout(), "team")
                .await?;

            if self.store.blacklist.active_entry(team_id)?.is_some() {
                continue;
            }

            let reason = format!(
                "{} item(s) overdue past the {}s grace window",
                count,
                grace.num_seconds()
            );
            let entry = self.store.blacklist.insert_active(team_id, 0, reason, now)?;
            let team = self.store.teams.set_blacklisted(team_id, true)?;
            tracing::warn!(team_id, overdue = count, "team blacklisted by overdue sweep");
            self.notifier.team_blacklisted(&team, &entry).await;
            created.push(entry);
        }

        Ok(created)
    }

    /// Operator-initiated blacklist
    pub async fn manual_blacklist(&self, request: ManualBlacklist) -> AppResult<BlacklistEntry> {
        request.validate()?;
        if request.reason.len() > self.config.blacklist.reason_max_length {
            return Err(AppError::Validation(format!(
                "reason exceeds {} characters",
                self.config.blacklist.reason_max_length
            )));
        }

        let _guard = self
            .store
            .team_locks
            .acquire(request.team_id, self.lock_timeout(), "team")
            .await?;

        self.store.teams.get(request.team_id)?;
        let entry = self.store.blacklist.insert_active(
            request.team_id,
            request.blacklisted_by,
            request.reason,
            Utc::now(),
        )?;
        let team = self.store.teams.set_blacklisted(request.team_id, true)?;
        tracing::warn!(team_id = request.team_id, by = request.blacklisted_by, "team blacklisted manually");
        self.notifier.team_blacklisted(&team, &entry).await;
        Ok(entry)
    }

    /// Restore a team's privilege. Refused while any equipment is still
    /// out with the team, overdue or not.
    pub async fn remove_from_blacklist(&self, request: RemoveBlacklist) -> AppResult<BlacklistEntry> {
        let _guard = self
            .store
            .team_locks
            .acquire(request.team_id, self.lock_timeout(), "team")
            .await?;

        self.store.teams.get(request.team_id)?;

        let open = self.store.checkouts.open_by_team(request.team_id)?;
        if !open.is_empty() {
            return Err(AppError::StillHasOpenItems {
                team_id: request.team_id,
                open: open.len(),
            });
        }

        let entry = self.store.blacklist.close_active(
            request.team_id,
            request.removed_by,
            request.notes,
            Utc::now(),
        )?;
        let team = self.store.teams.set_blacklisted(request.team_id, false)?;
        tracing::info!(team_id = request.team_id, by = request.removed_by, "team removed from blacklist");
        self.notifier.team_unblacklisted(&team, &entry).await;
        Ok(entry)
    }

    pub(crate) fn team(&self, team_id: i64) -> AppResult<Team> {
        self.store.teams.get(team_id)
    }
}

#[cfg(test)]
mod tests {
    use super::super::notifier::MockBlacklistNotifier;
    use super::*;
    use crate::models::team::CreateTeam;

    fn service_with(notifier: MockBlacklistNotifier) -> (BlacklistService, Store) {
        let store = Store::default();
        let config = Arc::new(CoreConfig::default());
        let service = BlacklistService::new(store.clone(), config, Arc::new(notifier));
        (service, store)
    }

    #[tokio::test]
    async fn manual_blacklist_notifies_once() {
        let mut notifier = MockBlacklistNotifier::new();
        notifier
            .expect_team_blacklisted()
            .times(1)
            .returning(|_, _| ());
        notifier.expect_team_unblacklisted().never();

        let (service, store) = service_with(notifier);
        let team = store.teams.create(&CreateTeam { name: "night shift".into() }).unwrap();

        let entry = service
            .manual_blacklist(ManualBlacklist {
                team_id: team.id,
                blacklisted_by: 42,
                reason: "damaged returns".into(),
            })
            .await
            .unwrap();

        assert!(entry.is_active());
        assert!(store.teams.get(team.id).unwrap().blacklisted);
    }

    #[tokio::test]
    async fn removal_notifies_and_clears_flag() {
        let mut notifier = MockBlacklistNotifier::new();
        notifier
            .expect_team_blacklisted()
            .times(1)
            .returning(|_, _| ());
        notifier
            .expect_team_unblacklisted()
            .times(1)
            .returning(|_, _| ());

        let (service, store) = service_with(notifier);
        let team = store.teams.create(&CreateTeam { name: "day shift".into() }).unwrap();

        service
            .manual_blacklist(ManualBlacklist {
                team_id: team.id,
                blacklisted_by: 42,
                reason: "lost a ladder".into(),
            })
            .await
            .unwrap();

        let closed = service
            .remove_from_blacklist(RemoveBlacklist {
                team_id: team.id,
                removed_by: 7,
                notes: Some("debt settled".into()),
            })
            .await
            .unwrap();

        assert!(!closed.is_active());
        assert_eq!(closed.removed_by, Some(7));
        assert!(!store.teams.get(team.id).unwrap().blacklisted);
    }

    #[tokio::test]
    async fn empty_reason_is_rejected() {
        let mut notifier = MockBlacklistNotifier::new();
        notifier.expect_team_blacklisted().never();

        let (service, store) = service_with(notifier);
        let team = store.teams.create(&CreateTeam { name: "crew".into() }).unwrap();

        let err = service
            .manual_blacklist(ManualBlacklist {
                team_id: team.id,
                blacklisted_by: 1,
                reason: String::new(),
            })
            .await
            .unwrap_err();

        assert!(matches!(err, AppError::Validation(_)));
    }
}
