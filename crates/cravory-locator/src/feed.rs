//! Feed composition: filtering plus derived distance, ETA and rating.

use std::sync::LazyLock;

use cravory_core::{Coordinate, RestaurantRecord};
use regex::Regex;
use serde::Serialize;

use crate::cache::ResolutionCache;
use crate::distance::{eta_minutes, format_distance, format_eta, haversine_km, rating_for};
use crate::extract::extract_coordinate;

/// Category value that disables category filtering.
pub const ALL_CATEGORIES: &str = "All";

static VEG_KEYWORD_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)\b(?:veg|paneer|aloo|gobi|mushroom)").expect("valid regex")
});

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum FeedSort {
    /// Keep the order the records arrived in (newest first from the backend).
    #[default]
    Feed,
    /// Ascending distance; records without a distance go last.
    Nearest,
}

/// User-selected filters. All active filters must match.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FeedFilter {
    /// Case-insensitive substring of the name or the dish list. Blank matches all.
    pub query: String,
    /// Case-insensitive substring of the dish list, or [`ALL_CATEGORIES`].
    pub category: String,
    pub veg_only: bool,
    pub sort: FeedSort,
}

impl Default for FeedFilter {
    fn default() -> Self {
        Self {
            query: String::new(),
            category: ALL_CATEGORIES.to_string(),
            veg_only: false,
            sort: FeedSort::Feed,
        }
    }
}

impl FeedFilter {
    #[must_use]
    pub fn matches(&self, record: &RestaurantRecord) -> bool {
        let dishes = record.dishes.to_lowercase();

        let query = self.query.trim().to_lowercase();
        if !query.is_empty() && !record.name.to_lowercase().contains(&query) && !dishes.contains(&query)
        {
            return false;
        }

        let category = self.category.trim();
        if !category.is_empty()
            && !category.eq_ignore_ascii_case(ALL_CATEGORIES)
            && !dishes.contains(&category.to_lowercase())
        {
            return false;
        }

        if self.veg_only && !has_veg_dish(&record.dishes) {
            return false;
        }

        true
    }
}

/// Whether any word in a dish list starts with a vegetarian keyword.
///
/// "Vegetable Pulao" and "Mushrooms" count; "Nonveg Thali" does not.
#[must_use]
pub fn has_veg_dish(dishes: &str) -> bool {
    VEG_KEYWORD_RE.is_match(dishes)
}

/// A record as shown in the feed, with fields derived for this pass only.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DerivedViewRecord {
    #[serde(flatten)]
    pub record: RestaurantRecord,
    pub distance_km: Option<f64>,
    pub eta_minutes: Option<u32>,
    pub rating: f64,
}

impl DerivedViewRecord {
    #[must_use]
    pub fn distance_label(&self) -> Option<String> {
        self.distance_km.map(format_distance)
    }

    #[must_use]
    pub fn eta_label(&self) -> Option<String> {
        self.eta_minutes.map(format_eta)
    }
}

/// Coordinate for a record: direct extraction from its link, else the cache.
#[must_use]
pub fn record_coordinate(record: &RestaurantRecord, cache: &ResolutionCache) -> Option<Coordinate> {
    extract_coordinate(&record.map_link).or_else(|| cache.get(&record.map_link))
}

/// Filter `records` and attach derived fields.
///
/// Distance and ETA are present only when both the user location and the
/// record's coordinate are known.
#[must_use]
pub fn compose_feed(
    records: &[RestaurantRecord],
    cache: &ResolutionCache,
    user: Option<Coordinate>,
    filter: &FeedFilter,
) -> Vec<DerivedViewRecord> {
    let mut feed: Vec<DerivedViewRecord> = records
        .iter()
        .filter(|record| filter.matches(record))
        .map(|record| {
            let distance_km = user
                .zip(record_coordinate(record, cache))
                .map(|(from, to)| haversine_km(from, to))
                .filter(|km| km.is_finite());
            DerivedViewRecord {
                record: record.clone(),
                distance_km,
                eta_minutes: distance_km.map(eta_minutes),
                rating: rating_for(&record.name),
            }
        })
        .collect();

    if filter.sort == FeedSort::Nearest {
        feed.sort_by(|a, b| match (a.distance_km, b.distance_km) {
            (Some(x), Some(y)) => x.total_cmp(&y),
            (Some(_), None) => std::cmp::Ordering::Less,
            (None, Some(_)) => std::cmp::Ordering::Greater,
            (None, None) => std::cmp::Ordering::Equal,
        });
    }

    feed
}

#[cfg(test)]
#[path = "feed_test.rs"]
mod tests;
