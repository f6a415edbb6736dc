use crate::app_config::{AppConfig, Environment};
use crate::ConfigError;

/// Load application configuration from environment variables.
///
/// Calls `dotenvy::dotenv().ok()` to load `.env` files before reading env vars.
///
/// # Errors
///
/// Returns `ConfigError` if a variable is set to a value that cannot be parsed.
pub fn load_app_config() -> Result<AppConfig, ConfigError> {
    dotenvy::dotenv().ok();
    load_app_config_from_env()
}

/// Load application configuration from environment variables already in the process.
///
/// Unlike [`load_app_config`], this does NOT load `.env` files.
///
/// # Errors
///
/// Returns `ConfigError` if a variable is set to a value that cannot be parsed.
pub fn load_app_config_from_env() -> Result<AppConfig, ConfigError> {
    build_app_config(|key| std::env::var(key))
}

/// Build application configuration using the provided env-var lookup function.
///
/// Every variable has a default, so an empty environment yields a usable
/// development configuration.
fn build_app_config<F>(lookup: F) -> Result<AppConfig, ConfigError>
where
    F: Fn(&str) -> Result<String, std::env::VarError>,
{
    use std::net::SocketAddr;

    let or_default = |var: &str, default: &str| -> String {
        lookup(var).unwrap_or_else(|_| default.to_string())
    };

    let invalid = |var: &str, reason: String| ConfigError::InvalidEnvVar {
        var: var.to_string(),
        reason,
    };

    let parse_addr = |var: &str, default: &str| -> Result<SocketAddr, ConfigError> {
        or_default(var, default)
            .parse::<SocketAddr>()
            .map_err(|e| invalid(var, e.to_string()))
    };

    let parse_u64 = |var: &str, default: &str| -> Result<u64, ConfigError> {
        or_default(var, default)
            .parse::<u64>()
            .map_err(|e| invalid(var, e.to_string()))
    };

    let parse_usize = |var: &str, default: &str| -> Result<usize, ConfigError> {
        or_default(var, default)
            .parse::<usize>()
            .map_err(|e| invalid(var, e.to_string()))
    };

    let env = parse_environment(&or_default("CRAVORY_ENV", "development"))?;
    let bind_addr = parse_addr("CRAVORY_BIND_ADDR", "0.0.0.0:4000")?;
    let log_level = or_default("CRAVORY_LOG_LEVEL", "info");

    let api_base_url = or_default("CRAVORY_API_BASE_URL", "http://localhost:4000");
    if !(api_base_url.starts_with("http://") || api_base_url.starts_with("https://")) {
        return Err(invalid(
            "CRAVORY_API_BASE_URL",
            format!("expected an http(s) URL, got '{api_base_url}'"),
        ));
    }

    let user_agent = or_default("CRAVORY_USER_AGENT", "cravory/0.1 (restaurant-feed)");
    let api_timeout_secs = parse_u64("CRAVORY_API_TIMEOUT_SECS", "10")?;
    let resolve_timeout_secs = parse_u64("CRAVORY_RESOLVE_TIMEOUT_SECS", "10")?;
    let submit_timeout_secs = parse_u64("CRAVORY_SUBMIT_TIMEOUT_SECS", "15")?;

    let resolve_batch_limit = parse_usize("CRAVORY_RESOLVE_BATCH_LIMIT", "5")?;
    if resolve_batch_limit == 0 {
        return Err(invalid(
            "CRAVORY_RESOLVE_BATCH_LIMIT",
            "must be at least 1".to_string(),
        ));
    }

    let max_body_bytes = parse_usize("CRAVORY_MAX_BODY_BYTES", "26214400")?;

    Ok(AppConfig {
        env,
        bind_addr,
        log_level,
        api_base_url,
        user_agent,
        api_timeout_secs,
        resolve_timeout_secs,
        submit_timeout_secs,
        resolve_batch_limit,
        max_body_bytes,
    })
}

/// Parse a string into an `Environment` variant.
///
/// # Errors
///
/// Returns `ConfigError::InvalidEnvVar` for anything other than
/// `development`, `test` or `production`.
fn parse_environment(s: &str) -> Result<Environment, ConfigError> {
    match s {
        "development" => Ok(Environment::Development),
        "test" => Ok(Environment::Test),
        "production" => Ok(Environment::Production),
        other => Err(ConfigError::InvalidEnvVar {
            var: "CRAVORY_ENV".to_string(),
            reason: format!("unknown environment '{other}'"),
        }),
    }
}

#[cfg(test)]
#[path = "config_test.rs"]
mod tests;
