// Data-driven session configuration.
//
// `MazeConfig` holds every tunable the engine reads: the base dwell time,
// the tick and poll rates the host loop runs at, the hint threshold, and
// which map to build. It is loaded from JSON (see `from_json` / `load`) and
// validated once before any map is built, so the builders can assume sane
// inputs.
//
// The defaults match the reference board: 1 ms ticks, a 3000-tick base
// dwell, the fixed seven-piece maze, and a hint once the player has lost more
// than ten gold per piece.
//
// See also: `map_gen.rs` for what `MapChoice` builds, `session.rs` which
// consumes the config, `error.rs` for `ConfigError`.

use crate::error::ConfigError;
use crate::map_gen::{self, BuiltMap, RandomMapParams};
use crate::types::Tick;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Which maze to play.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum MapChoice {
    /// The hand-authored seven-piece maze.
    Fixed,
    /// A seeded random maze.
    Random {
        piece_count: u32,
        duration_deviation: Tick,
        finish_gold: i32,
        seed: u64,
    },
}

/// Top-level configuration. Never mutated once a session starts.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct MazeConfig {
    /// Dwell time of the start, finish and every fixed-map piece, and the
    /// floor for random intermediates.
    pub base_duration: Tick,

    /// Real-time length of one tick in milliseconds.
    pub tick_duration_ms: u32,

    /// Delay between sensor polls in the host loop, in milliseconds.
    pub poll_interval_ms: u32,

    /// A hint fires when `|gold_total| > hint_deficit_factor * total_pieces`.
    /// Zero disables automatic hints.
    pub hint_deficit_factor: i64,

    pub map: MapChoice,
}

impl Default for MazeConfig {
    fn default() -> Self {
        Self {
            base_duration: 3000,
            tick_duration_ms: 1,
            poll_interval_ms: 10,
            hint_deficit_factor: 10,
            map: MapChoice::Fixed,
        }
    }
}

impl MazeConfig {
    /// Parse and validate a JSON config. Missing fields take their defaults.
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let config: MazeConfig = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Read, parse and validate a JSON config file.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let json = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_json(&json)
    }

    /// Check the invariants the builders and host loop rely on.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.tick_duration_ms == 0 {
            return Err(ConfigError::ZeroTickDuration);
        }
        match self.map {
            MapChoice::Random { piece_count, .. } if piece_count < 3 => {
                Err(ConfigError::TooFewPieces(piece_count))
            }
            _ => Ok(()),
        }
    }

    /// Build the configured map. Call `validate` first.
    pub fn build_map(&self) -> BuiltMap {
        match self.map {
            MapChoice::Fixed => map_gen::build_fixed_map(self.base_duration),
            MapChoice::Random {
                piece_count,
                duration_deviation,
                finish_gold,
                seed,
            } => map_gen::build_random_map(&RandomMapParams {
                seed,
                piece_count,
                duration_deviation,
                finish_gold,
                base_duration: self.base_duration,
            }),
        }
    }
}
