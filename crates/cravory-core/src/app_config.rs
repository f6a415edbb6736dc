use std::net::SocketAddr;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Environment {
    Development,
    Test,
    Production,
}

impl std::fmt::Display for Environment {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Environment::Development => write!(f, "development"),
            Environment::Test => write!(f, "test"),
            Environment::Production => write!(f, "production"),
        }
    }
}

/// Runtime settings shared by the server, the CLI and the locator clients.
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub env: Environment,
    pub bind_addr: SocketAddr,
    pub log_level: String,
    /// Base URL of the restaurants backend, e.g. `http://localhost:4000`.
    pub api_base_url: String,
    pub user_agent: String,
    /// Request timeout for backend calls other than submission.
    pub api_timeout_secs: u64,
    /// Request timeout for following a map link.
    pub resolve_timeout_secs: u64,
    pub submit_timeout_secs: u64,
    /// Maximum number of map links resolved per cache run.
    pub resolve_batch_limit: usize,
    /// Request body ceiling for `POST /api/restaurants` (images travel inline).
    pub max_body_bytes: usize,
}
