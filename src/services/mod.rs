//! Business logic services

pub mod blacklist;
pub mod checkouts;
pub mod coordinator;
pub mod inventory;
pub mod notifier;
pub mod sweep;
pub mod teams;

use std::sync::Arc;

use crate::{config::CoreConfig, store::Store};

pub use blacklist::Eligibility;
pub use notifier::{BlacklistNotifier, NoopNotifier};

/// Container for all services
#[derive(Clone)]
pub struct Services {
    pub inventory: inventory::InventoryService,
    pub checkouts: checkouts::CheckoutService,
    pub teams: teams::TeamService,
    pub blacklist: blacklist::BlacklistService,
    pub coordinator: coordinator::CoordinatorService,
    pub sweep: sweep::SweepService,
}

impl Services {
    /// Create all services over the given store
    pub fn new(
        store: Store,
        config: Arc<CoreConfig>,
        notifier: Arc<dyn BlacklistNotifier>,
    ) -> Self {
        let inventory = inventory::InventoryService::new(store.clone(), config.clone());
        let checkouts = checkouts::CheckoutService::new(store.clone());
        let teams = teams::TeamService::new(store.clone());
        let blacklist = blacklist::BlacklistService::new(store, config.clone(), notifier);
        let coordinator = coordinator::CoordinatorService::new(
            inventory.clone(),
            checkouts.clone(),
            blacklist.clone(),
            config.clone(),
        );
        let sweep = sweep::SweepService::new(blacklist.clone(), config.sweep.clone());

        Self {
            inventory,
            checkouts,
            teams,
            blacklist,
            coordinator,
            sweep,
        }
    }
}
