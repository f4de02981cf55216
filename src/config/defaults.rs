/// Default configuration constants for the average window server.
use indexmap::IndexMap;

// Server defaults
pub const DEFAULT_PORT: u16 = 9876;

// Window defaults
pub const DEFAULT_WINDOW_CAPACITY: usize = 10;

// Upstream defaults
pub const DEFAULT_UPSTREAM_BASE_URL: &str = "http://20.244.56.144/evaluation-service";
pub const DEFAULT_FETCH_TIMEOUT_MS: u64 = 500;

/// Category code to upstream resource name, in presentation order.
pub const DEFAULT_RESOURCES: &[(&str, &str)] = &[
    ("p", "primes"),
    ("f", "fibo"),
    ("e", "even"),
    ("r", "rand"),
];

pub fn default_resources() -> IndexMap<String, String> {
    DEFAULT_RESOURCES
        .iter()
        .map(|&(code, resource)| (code.to_string(), resource.to_string()))
        .collect()
}
