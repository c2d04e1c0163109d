//! Toolcrib — equipment reservation, checkout and team-blacklist engine
//!
//! Keeps a shared, finite pool of physical equipment units consistent under
//! concurrent checkout and return requests, detects overdue loans, revokes
//! a team's borrowing privilege when loans go overdue, and gates privilege
//! restoration on outstanding equipment. Transport, persistence and
//! identity are the caller's concern; this crate exposes typed async
//! operations over an in-process keyed store.

use std::sync::Arc;

pub mod config;
pub mod error;
pub mod models;
pub mod services;
pub mod store;

pub use config::CoreConfig;
pub use error::{AppError, AppResult, ErrorCode};
pub use services::{BlacklistNotifier, NoopNotifier, Services};

/// Engine state shared across all request handlers
#[derive(Clone)]
pub struct CoreState {
    pub config: Arc<CoreConfig>,
    pub services: Arc<Services>,
}

impl CoreState {
    /// Build the engine with a fresh store. The caller decides when to
    /// spawn the sweep's interval task; `spawn` itself honors
    /// `sweep.enabled`.
    pub fn new(config: CoreConfig, notifier: Arc<dyn BlacklistNotifier>) -> Self {
        let config = Arc::new(config);
        let store = store::Store::default();
        let services = Arc::new(Services::new(store, config.clone(), notifier));
        Self { config, services }
    }
}
