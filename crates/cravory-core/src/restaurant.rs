//! Restaurant records as stored by the backend and read by the feed.

use std::collections::HashMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::ValidationError;

/// A stored restaurant as served by `GET /api/restaurants`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RestaurantRecord {
    /// Opaque store identifier. Document stores emit it as `_id`.
    #[serde(alias = "_id")]
    pub id: String,
    pub name: String,
    /// Map URL as entered by the submitter; not guaranteed canonical.
    pub map_link: String,
    /// Comma-joined dish names. Use [`RestaurantRecord::dish_list`] to split.
    pub dishes: String,
    /// Data-URI image blob, never interpreted here.
    pub restaurant_image: String,
    pub dish_image: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<DateTime<Utc>>,
}

impl RestaurantRecord {
    #[must_use]
    pub fn dish_list(&self) -> Vec<String> {
        parse_dish_list(&self.dishes)
    }
}

/// Body of `POST /api/restaurants`.
///
/// Missing JSON fields deserialize as empty strings so that the caller gets a
/// validation error rather than a decoding error.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewRestaurant {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub map_link: String,
    #[serde(default)]
    pub dishes: String,
    #[serde(default)]
    pub restaurant_image: String,
    #[serde(default)]
    pub dish_image: String,
}

impl NewRestaurant {
    /// Checks that every field carries non-blank text.
    ///
    /// # Errors
    ///
    /// Returns [`ValidationError::MissingFields`] naming each blank field in
    /// wire (camelCase) form.
    pub fn validate(&self) -> Result<(), ValidationError> {
        let fields = [
            ("name", &self.name),
            ("mapLink", &self.map_link),
            ("dishes", &self.dishes),
            ("restaurantImage", &self.restaurant_image),
            ("dishImage", &self.dish_image),
        ];
        let missing: Vec<&'static str> = fields
            .iter()
            .filter(|(_, value)| value.trim().is_empty())
            .map(|(field, _)| *field)
            .collect();

        if missing.is_empty() {
            Ok(())
        } else {
            Err(ValidationError::MissingFields { fields: missing })
        }
    }
}

/// Response of `POST /api/restaurants`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SubmitOutcome {
    pub id: String,
    /// `true` when an existing record with the same name was updated.
    pub updated: bool,
}

/// Split a comma-joined dish list into trimmed, non-empty names.
#[must_use]
pub fn parse_dish_list(dishes: &str) -> Vec<String> {
    dishes
        .split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(ToOwned::to_owned)
        .collect()
}

/// Merge two comma-joined dish lists, deduplicating case-insensitively.
///
/// Existing dishes keep their position; a case-insensitive repeat in
/// `incoming` replaces the spelling in place, and new dishes are appended in
/// the order they arrive. The result is joined with `", "`.
#[must_use]
pub fn merge_dish_lists(existing: &str, incoming: &str) -> String {
    let mut merged: Vec<String> = Vec::new();
    let mut index_by_key: HashMap<String, usize> = HashMap::new();

    for dish in parse_dish_list(existing)
        .into_iter()
        .chain(parse_dish_list(incoming))
    {
        let key = dish.to_lowercase();
        if let Some(&idx) = index_by_key.get(&key) {
            merged[idx] = dish;
        } else {
            index_by_key.insert(key, merged.len());
            merged.push(dish);
        }
    }

    merged.join(", ")
}

#[cfg(test)]
#[path = "restaurant_test.rs"]
mod tests;
