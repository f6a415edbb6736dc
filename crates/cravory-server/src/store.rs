//! In-memory restaurant store, newest first.

use std::sync::RwLock;

use chrono::Utc;
use cravory_core::{merge_dish_lists, NewRestaurant, RestaurantRecord, SubmitOutcome};
use thiserror::Error;
use uuid::Uuid;

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("restaurant store lock poisoned")]
    Poisoned,
}

/// Records ordered newest first. Updates keep a record's position.
#[derive(Debug, Default)]
pub struct RestaurantStore {
    records: RwLock<Vec<RestaurantRecord>>,
}

impl RestaurantStore {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    pub fn list(&self) -> Result<Vec<RestaurantRecord>, StoreError> {
        let records = self.records.read().map_err(|_| StoreError::Poisoned)?;
        Ok(records.clone())
    }

    /// Insert `new`, or update the record with exactly the same name.
    ///
    /// On update the dish lists are merged and every other field is replaced.
    /// The caller is expected to have validated `new`.
    pub fn upsert(&self, new: NewRestaurant) -> Result<SubmitOutcome, StoreError> {
        let mut records = self.records.write().map_err(|_| StoreError::Poisoned)?;
        let now = Utc::now();

        if let Some(existing) = records.iter_mut().find(|r| r.name == new.name) {
            existing.dishes = merge_dish_lists(&existing.dishes, &new.dishes);
            existing.map_link = new.map_link;
            existing.restaurant_image = new.restaurant_image;
            existing.dish_image = new.dish_image;
            existing.updated_at = Some(now);
            return Ok(SubmitOutcome {
                id: existing.id.clone(),
                updated: true,
            });
        }

        let id = Uuid::new_v4().simple().to_string();
        records.insert(
            0,
            RestaurantRecord {
                id: id.clone(),
                name: new.name,
                map_link: new.map_link,
                dishes: new.dishes,
                restaurant_image: new.restaurant_image,
                dish_image: new.dish_image,
                created_at: Some(now),
                updated_at: Some(now),
            },
        );
        Ok(SubmitOutcome { id, updated: false })
    }
}
