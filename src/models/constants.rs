/// Default number of emails submitted per remote task.
pub const DEFAULT_BATCH_SIZE: usize = 100;

/// Largest batch the service accepts in a single task.
pub const MAX_BATCH_SIZE: usize = 10_000;

/// Default delay between result polls, in seconds.
pub const DEFAULT_POLL_INTERVAL_SECS: u64 = 10;

/// Default budget for waiting on a freshly submitted batch (1 hour).
pub const DEFAULT_POLL_TIMEOUT_SECS: u64 = 3600;

/// Default budget for the liveness probe of a checkpointed task on startup.
pub const DEFAULT_PROBE_TIMEOUT_SECS: u64 = 30;

/// Default base URL of the bulk verification API.
pub const DEFAULT_API_BASE_URL: &str = "https://emailverifier.reoon.com/api/v1";

/// Environment variable holding the API credential.
pub const API_KEY_ENV: &str = "LEADSIFT_API_KEY";

/// File names inside the output directory.
pub mod files {
    pub const VALID_STORE: &str = "valid.json";
    pub const INVALID_STORE: &str = "invalid.json";
    pub const CHECKPOINT: &str = "checkpoint.json";
}

/// HTTP client timeouts.
pub mod http {
    /// Maximum time to establish a TCP connection.
    pub const CONNECT_TIMEOUT_SECS: u64 = 10;

    /// Maximum time for a whole request, connection included.
    pub const REQUEST_TIMEOUT_SECS: u64 = 120;
}
