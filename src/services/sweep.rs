//! Overdue sweep
//!
//! Explicitly schedulable: run once from an admin action, or spawn the
//! interval task. Never runs as a side effect of a read path.

use chrono::{DateTime, Utc};
use tokio::task::JoinHandle;
use tokio::time::MissedTickBehavior;

use crate::{config::SweepConfig, error::AppResult, models::blacklist::BlacklistEntry};

use super::blacklist::BlacklistService;

#[derive(Clone)]
pub struct SweepService {
    blacklist: BlacklistService,
    config: SweepConfig,
}

impl SweepService {
    pub fn new(blacklist: BlacklistService, config: SweepConfig) -> Self {
        Self { blacklist, config }
    }

    /// One sweep pass with the configured grace window
    pub async fn run_once(&self, now: DateTime<Utc>) -> AppResult<Vec<BlacklistEntry>> {
        let grace = self.blacklist.grace_window();
        self.blacklist.evaluate_and_blacklist_overdue(now, grace).await
    }

    /// Spawn the periodic sweep on the current runtime. Returns `None`
    /// when `sweep.enabled` is off; `run_once` stays available either way.
    pub fn spawn(self) -> Option<JoinHandle<()>> {
        if !self.config.enabled {
            tracing::info!("overdue sweep disabled by configuration");
            return None;
        }
        let period = std::time::Duration::from_secs(self.config.interval_seconds.max(1));
        Some(tokio::spawn(async move {
            let mut ticker = tokio::time::interval(period);
            ticker.set_missed_tick_behavior(MissedTickBehavior::Skip);
            loop {
                ticker.tick().await;
                match self.run_once(Utc::now()).await {
                    Ok(entries) if !entries.is_empty() => {
                        tracing::info!(count = entries.len(), "overdue sweep blacklisted teams");
                    }
                    Ok(_) => {
                        tracing::debug!("overdue sweep found no new offenders");
                    }
                    Err(e) => {
                        tracing::error!(error = %e, "overdue sweep failed");
                    }
                }
            }
        }))
    }
}
