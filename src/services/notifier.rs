//! Blacklist notification contract
//!
//! The engine must notify on every blacklist transition; how the
//! notification is delivered (email, webhook...) belongs to the caller.

use async_trait::async_trait;

use crate::models::{blacklist::BlacklistEntry, team::Team};

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait BlacklistNotifier: Send + Sync {
    /// A team lost its borrowing privilege
    async fn team_blacklisted(&self, team: &Team, entry: &BlacklistEntry);

    /// A team's borrowing privilege was restored
    async fn team_unblacklisted(&self, team: &Team, entry: &BlacklistEntry);
}

/// Notifier that drops every notification. Useful for tests and for
/// deployments wiring their own delivery at the calling layer.
#[derive(Debug, Clone, Default)]
pub struct NoopNotifier;

#[async_trait]
impl BlacklistNotifier for NoopNotifier {
    async fn team_blacklisted(&self, _team: &Team, _entry: &BlacklistEntry) {}

    async fn team_unblacklisted(&self, _team: &Team, _entry: &BlacklistEntry) {}
}
