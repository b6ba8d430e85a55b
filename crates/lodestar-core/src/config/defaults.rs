// Single source of truth for all default values.

// --- Chunking ---
pub const DEFAULT_MAX_PARENT_SIZE: usize = 2_000;
pub const DEFAULT_MAX_CHILD_SIZE: usize = 800;
pub const DEFAULT_OVERLAP_SIZE: usize = 100;
pub const DEFAULT_SUMMARY_CHARS: usize = 120;

// --- Query understanding ---
pub const DEFAULT_CONFIDENCE_FLOOR: f64 = 0.5;
pub const DEFAULT_HISTORY_TURNS: usize = 2;

// --- Retrieval ---
pub const DEFAULT_RRF_K: u32 = 60;
pub const DEFAULT_CANDIDATE_MULTIPLIER: usize = 3;
pub const DEFAULT_CHANNEL_TIMEOUT_MS: u64 = 2_000;
pub const DEFAULT_MAX_RETRIES: u32 = 1;
pub const DEFAULT_RETRY_BACKOFF_MS: u64 = 50;
pub const DEFAULT_MIN_SCORE: f64 = 0.01;
/// Configuration-style intents tolerate rare vocabulary that ranks low in one channel.
pub const DEFAULT_CONFIGURATION_MIN_SCORE: f64 = 0.005;
pub const DEFAULT_CACHE_DEGRADED: bool = false;

// --- Cache ---
pub const DEFAULT_CACHE_MAX_ENTRIES: u64 = 1_024;
pub const DEFAULT_CACHE_TTL_SECS: u64 = 300; // 5 minutes

// --- Rerank ---
pub const DEFAULT_RERANK_ENABLED: bool = true;
pub const DEFAULT_RERANK_TIMEOUT_MS: u64 = 3_000;

// --- Observability ---
pub const DEFAULT_LOG_LEVEL: &str = "info";
pub const DEFAULT_JSON_LOGS: bool = false;
