//! Inventory ledger service
//!
//! Tracks, per equipment item, the total quantity and the quantity on
//! loan, and exposes the atomic reserve/release pair used by the
//! coordinator. Also carries the inventory-management CRUD surface.

use std::sync::Arc;
use std::time::Duration;

use validator::Validate;

use crate::{
    config::CoreConfig,
    error::AppResult,
    models::equipment::{CreateEquipment, EquipmentItem, UpdateEquipment},
    store::Store,
};

#[derive(Clone)]
pub struct InventoryService {
    store: Store,
    config: Arc<CoreConfig>,
}

impl InventoryService {
    pub fn new(store: Store, config: Arc<CoreConfig>) -> Self {
        Self { store, config }
    }

    fn lock_timeout(&self) -> Duration {
        Duration::from_millis(self.config.locks.acquire_timeout_ms)
    }

    /// Create equipment
    pub async fn create_item(&self, data: CreateEquipment) -> AppResult<EquipmentItem> {
        data.validate()?;
        let item = self.store.equipment.create(&data)?;
        tracing::info!(item_id = item.id, name = %item.name, total = item.total_quantity, "equipment created");
        Ok(item)
    }

    /// Get equipment by ID
    pub async fn get_item(&self, id: i64) -> AppResult<EquipmentItem> {
        self.store.equipment.get(id, self.lock_timeout()).await
    }

    /// List all equipment
    pub async fn list_items(&self) -> AppResult<Vec<EquipmentItem>> {
        self.store.equipment.list(self.lock_timeout()).await
    }

    /// Update equipment, including the manual status override
    pub async fn update_item(&self, id: i64, data: UpdateEquipment) -> AppResult<EquipmentItem> {
        data.validate()?;
        self.store.equipment.update(id, &data, self.lock_timeout()).await
    }

    /// Soft-delete equipment; the row survives for open checkouts
    pub async fn retire_item(&self, id: i64) -> AppResult<EquipmentItem> {
        let item = self.store.equipment.retire(id, self.lock_timeout()).await?;
        tracing::info!(item_id = id, "equipment retired");
        Ok(item)
    }

    /// Atomically reserve stock for a checkout
    pub async fn reserve(&self, item_id: i64, quantity: i32) -> AppResult<()> {
        self.store
            .equipment
            .reserve(item_id, quantity, self.lock_timeout())
            .await
    }

    /// Release previously reserved stock
    pub async fn release(&self, item_id: i64, quantity: i32) -> AppResult<()> {
        self.store
            .equipment
            .release(item_id, quantity, self.lock_timeout())
            .await
    }

    /// Units still reservable. Display-grade read; reservation itself
    /// never trusts this value.
    pub async fn available_quantity(&self, item_id: i64) -> AppResult<i32> {
        self.store
            .equipment
            .available(item_id, self.lock_timeout())
            .await
    }
}
