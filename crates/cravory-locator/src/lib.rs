//! Map-link geolocation and feed ranking for restaurant records.
//!
//! Pipeline: [`extract`] pulls coordinates out of link text, [`resolve`]
//! follows shortened links over HTTP, [`cache`] batches resolutions and keeps
//! their results, [`distance`] derives distance/ETA/rating, and [`feed`]
//! filters and decorates records for display. [`client`] talks to the
//! restaurants backend.

pub mod cache;
pub mod client;
pub mod distance;
pub mod error;
pub mod extract;
pub mod feed;
pub mod resolve;

pub use cache::{pending_links, ResolutionCache, ResolutionManager, RunReport, DEFAULT_BATCH_LIMIT};
pub use client::RestaurantsClient;
pub use distance::{eta_minutes, eta_window, format_distance, format_eta, haversine_km, rating_for};
pub use error::ClientError;
pub use extract::{extract_coordinate, extract_coordinate_with_rule, ExtractionRule};
pub use feed::{compose_feed, DerivedViewRecord, FeedFilter, FeedSort, ALL_CATEGORIES};
pub use resolve::{LinkResolver, ResolveLink};
