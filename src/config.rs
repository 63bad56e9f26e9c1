use std::net::SocketAddr;

// =============================================================================
// Time-related constants
// =============================================================================

/// Default lifetime of a computed report in the cache (10 minutes)
pub const DEFAULT_CACHE_AGING_SECS: u64 = 600;

/// Timeout for outbound HTTP requests (30 seconds)
pub const FETCH_TIMEOUT_SECS: u64 = 30;

/// Cache-Control value for successful responses (7 days)
pub const RESPONSE_CACHE_CONTROL: &str = "public, max-age=604800";

// =============================================================================
// Endpoint constants
// =============================================================================

/// Default address the HTTP server binds to
pub const DEFAULT_BIND_ADDR: &str = "127.0.0.1:8000";

/// Default base URL of the module graph API
pub const DEFAULT_GRAPH_API: &str = "https://graph.deno.dev";

/// User agent sent with every outbound request
pub const USER_AGENT: &str = concat!("deps-score/", env!("CARGO_PKG_VERSION"));

/// Server configuration assembled from CLI flags
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// Address to bind the HTTP server to
    pub addr: SocketAddr,
    /// Seconds a computed report stays fresh in the cache
    pub cache_aging_secs: u64,
    /// Base URL of the module graph API
    pub graph_api: String,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            addr: DEFAULT_BIND_ADDR.parse().expect("default bind address"),
            cache_aging_secs: DEFAULT_CACHE_AGING_SECS,
            graph_api: DEFAULT_GRAPH_API.to_string(),
        }
    }
}

/// Builds the reqwest client used by all outbound callers.
///
/// Every client carries the service user agent and an explicit timeout.
pub fn http_client() -> reqwest::Client {
    reqwest::Client::builder()
        .user_agent(USER_AGENT)
        .timeout(std::time::Duration::from_secs(FETCH_TIMEOUT_SECS))
        .build()
        .expect("Failed to create HTTP client")
}
