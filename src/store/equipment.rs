//! Equipment store
//!
//! Each item's stock counters live behind their own async mutex, so all
//! reservation decisions for one item are serialized while distinct items
//! proceed in parallel. The outer map is only locked to fetch the handle.

use std::collections::HashMap;
use std::sync::{Arc, RwLock};
use std::time::Duration;

use chrono::Utc;
use tokio::sync::Mutex;

use crate::{
    error::{AppError, AppResult},
    models::{
        enums::{EquipmentCategory, EquipmentStatus},
        equipment::{CreateEquipment, EquipmentItem, UpdateEquipment},
    },
};

use super::ids::IdGenerator;

#[derive(Clone)]
pub struct EquipmentStore {
    items: Arc<RwLock<HashMap<i64, Arc<Mutex<EquipmentItem>>>>>,
    ids: IdGenerator,
}

impl EquipmentStore {
    pub fn new(ids: IdGenerator) -> Self {
        Self {
            items: Arc::new(RwLock::new(HashMap::new())),
            ids,
        }
    }

    fn handle(&self, id: i64) -> AppResult<Arc<Mutex<EquipmentItem>>> {
        let map = self
            .items
            .read()
            .map_err(|_| AppError::Unavailable("equipment store poisoned".into()))?;
        map.get(&id)
            .cloned()
            .ok_or_else(|| AppError::NotFound(format!("equipment {} not found", id)))
    }

    async fn lock_item(
        &self,
        id: i64,
        timeout: Duration,
    ) -> AppResult<tokio::sync::OwnedMutexGuard<EquipmentItem>> {
        let handle = self.handle(id)?;
        tokio::time::timeout(timeout, handle.lock_owned())
            .await
            .map_err(|_| AppError::Timeout(format!("equipment {}", id)))
    }

    /// Create equipment
    pub fn create(&self, data: &CreateEquipment) -> AppResult<EquipmentItem> {
        let item = EquipmentItem {
            id: self.ids.next(),
            name: data.name.clone(),
            location: data.location.clone(),
            category: data.category.unwrap_or(EquipmentCategory::Other),
            serial_number: data.serial_number.clone(),
            value: data.value,
            total_quantity: data.total_quantity,
            quantity_on_loan: 0,
            status: EquipmentStatus::Available,
            notes: data.notes.clone(),
            retired_at: None,
            created_at: Utc::now(),
            updated_at: None,
        };

        let mut map = self
            .items
            .write()
            .map_err(|_| AppError::Unavailable("equipment store poisoned".into()))?;
        map.insert(item.id, Arc::new(Mutex::new(item.clone())));
        Ok(item)
    }

    /// Get equipment by ID (snapshot)
    pub async fn get(&self, id: i64, timeout: Duration) -> AppResult<EquipmentItem> {
        Ok(self.lock_item(id, timeout).await?.clone())
    }

    /// List all equipment, retired included (snapshots, eventually consistent)
    pub async fn list(&self, timeout: Duration) -> AppResult<Vec<EquipmentItem>> {
        let handles: Vec<_> = {
            let map = self
                .items
                .read()
                .map_err(|_| AppError::Unavailable("equipment store poisoned".into()))?;
            map.values().cloned().collect()
        };

        let mut items = Vec::with_capacity(handles.len());
        for handle in handles {
            let guard = tokio::time::timeout(timeout, handle.lock())
                .await
                .map_err(|_| AppError::Timeout("equipment listing".into()))?;
            items.push(guard.clone());
        }
        items.sort_by(|a, b| a.name.cmp(&b.name));
        Ok(items)
    }

    /// Update equipment fields; fails `Conflict` when lowering the total
    /// below the outstanding loan count
    pub async fn update(
        &self,
        id: i64,
        data: &UpdateEquipment,
        timeout: Duration,
    ) -> AppResult<EquipmentItem> {
        let mut item = self.lock_item(id, timeout).await?;

        if let Some(total) = data.total_quantity {
            if total < item.quantity_on_loan {
                return Err(AppError::Conflict(format!(
                    "cannot set total_quantity {} below {} unit(s) on loan",
                    total, item.quantity_on_loan
                )));
            }
            item.total_quantity = total;
        }
        if let Some(ref name) = data.name {
            item.name = name.clone();
        }
        if let Some(ref location) = data.location {
            item.location = Some(location.clone());
        }
        if let Some(category) = data.category {
            item.category = category;
        }
        if let Some(ref serial) = data.serial_number {
            item.serial_number = Some(serial.clone());
        }
        if let Some(value) = data.value {
            item.value = Some(value);
        }
        if let Some(status) = data.status {
            item.status = status;
        }
        if let Some(ref notes) = data.notes {
            item.notes = Some(notes.clone());
        }
        item.updated_at = Some(Utc::now());

        Ok(item.clone())
    }

    /// Soft-delete: marks the item retired so new reservations are refused.
    /// Open checkouts against it still close normally; the row is kept.
    pub async fn retire(&self, id: i64, timeout: Duration) -> AppResult<EquipmentItem> {
        let mut item = self.lock_item(id, timeout).await?;
        if item.retired_at.is_none() {
            item.retired_at = Some(Utc::now());
            item.updated_at = item.retired_at;
        }
        Ok(item.clone())
    }

    /// Atomically reserve `quantity` units, or fail without side effects
    pub async fn reserve(&self, id: i64, quantity: i32, timeout: Duration) -> AppResult<()> {
        let mut item = self.lock_item(id, timeout).await?;

        if !item.is_borrowable() {
            return Err(AppError::NotBorrowable(id));
        }
        if item.available() < quantity {
            return Err(AppError::InsufficientStock {
                item_id: id,
                requested: quantity,
                available: item.available(),
            });
        }
        item.quantity_on_loan += quantity;
        Ok(())
    }

    /// Release `quantity` previously reserved units.
    ///
    /// Releasing more than is outstanding is a caller bug and fails
    /// `InvariantViolation` with no mutation.
    pub async fn release(&self, id: i64, quantity: i32, timeout: Duration) -> AppResult<()> {
        let mut item = self.lock_item(id, timeout).await?;

        if quantity > item.quantity_on_loan {
            return Err(AppError::InvariantViolation(format!(
                "release of {} unit(s) of equipment {} exceeds {} on loan",
                quantity, id, item.quantity_on_loan
            )));
        }
        item.quantity_on_loan -= quantity;
        Ok(())
    }

    /// Units still reservable (read-only snapshot)
    pub async fn available(&self, id: i64, timeout: Duration) -> AppResult<i32> {
        Ok(self.lock_item(id, timeout).await?.available())
    }
}
