//! In-memory keyed store layer
//!
//! The storage collaborator behind the engine. Each sub-store owns one
//! entity family; a shared snowflake generator issues ids and a keyed lock
//! table serializes blacklist transitions per team.

pub mod blacklist;
pub mod checkouts;
pub mod equipment;
pub mod ids;
pub mod locks;
pub mod teams;

use std::sync::Arc;

use ids::IdGenerator;
use locks::KeyedLocks;

/// Main store struct holding all sub-stores
#[derive(Clone)]
pub struct Store {
    pub equipment: equipment::EquipmentStore,
    pub checkouts: checkouts::CheckoutStore,
    pub teams: teams::TeamStore,
    pub blacklist: blacklist::BlacklistStore,
    /// Serializes blacklist state transitions per team
    pub team_locks: Arc<KeyedLocks>,
}

impl Store {
    /// Create a new store with the given generator instance id
    pub fn new(instance: u16) -> Self {
        let ids = IdGenerator::new(instance);
        Self {
            equipment: equipment::EquipmentStore::new(ids.clone()),
            checkouts: checkouts::CheckoutStore::new(ids.clone()),
            teams: teams::TeamStore::new(ids.clone()),
            blacklist: blacklist::BlacklistStore::new(ids),
            team_locks: Arc::new(KeyedLocks::new()),
        }
    }
}

impl Default for Store {
    fn default() -> Self {
        Self::new(0)
    }
}
