pub mod app_config;
pub mod config;
pub mod geo;
pub mod restaurant;

pub use app_config::{AppConfig, Environment};
pub use config::{load_app_config, load_app_config_from_env};
pub use geo::Coordinate;
pub use restaurant::{
    merge_dish_lists, parse_dish_list, NewRestaurant, RestaurantRecord, SubmitOutcome,
};

use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid value for {var}: {reason}")]
    InvalidEnvVar { var: String, reason: String },
}

/// Rejection of a restaurant submission before it reaches the network or store.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("All fields are required.")]
    MissingFields { fields: Vec<&'static str> },
}
