// Configuration errors.
//
// Only session setup can fail. Game states the player can reach (blocked
// tilts, trapped positions) are ordinary values, not errors.

use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid config JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error("a random maze needs at least 3 pieces (start, one intermediate, finish), got {0}")]
    TooFewPieces(u32),

    #[error("tick_duration_ms must be positive")]
    ZeroTickDuration,
}
