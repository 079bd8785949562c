//! Session configuration.

use std::env;

use tracing::warn;

use crate::types::{Difficulty, Timings, FRAME_MS};

/// Session configuration
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionConfig {
    pub difficulty: Difficulty,
    /// Deck seed; `None` draws one from OS entropy.
    pub seed: Option<u64>,
    pub timings: Timings,
    /// Frame interval driving deferred tasks and the clock.
    pub frame_ms: u32,
    /// Trace log file for the terminal front end.
    pub log_path: Option<String>,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            difficulty: Difficulty::Easy,
            seed: None,
            timings: Timings::default(),
            frame_ms: FRAME_MS,
            log_path: None,
        }
    }
}

impl SessionConfig {
    /// Create from `MEMORY_MATCH_*` environment variables.
    ///
    /// Unparseable values fall back to the default with a warning.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Same as [`from_env`](Self::from_env) with a custom variable source.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let defaults = Self::default();
        let var = |key: &str| {
            lookup(key)
                .map(|s| s.trim().to_string())
                .filter(|s| !s.is_empty())
        };

        let difficulty = match var("MEMORY_MATCH_DIFFICULTY") {
            Some(raw) => Difficulty::from_str(&raw).unwrap_or_else(|| {
                warn!(value = %raw, "unknown MEMORY_MATCH_DIFFICULTY, using easy");
                defaults.difficulty
            }),
            None => defaults.difficulty,
        };

        let number = |key: &str, default: u64| -> u64 {
            match var(key) {
                Some(raw) => raw.parse().unwrap_or_else(|_| {
                    warn!(key, value = %raw, default, "not a number, using default");
                    default
                }),
                None => default,
            }
        };
        let ms = |key: &str, default: u32| -> u32 {
            u32::try_from(number(key, u64::from(default))).unwrap_or(default)
        };

        let seed = var("MEMORY_MATCH_SEED").and_then(|raw| match raw.parse() {
            Ok(seed) => Some(seed),
            Err(_) => {
                warn!(value = %raw, "invalid MEMORY_MATCH_SEED, using a random seed");
                None
            }
        });

        let timings = Timings {
            match_delay_ms: ms("MEMORY_MATCH_MATCH_DELAY_MS", defaults.timings.match_delay_ms),
            mismatch_delay_ms: ms(
                "MEMORY_MATCH_MISMATCH_DELAY_MS",
                defaults.timings.mismatch_delay_ms,
            ),
            win_delay_ms: ms("MEMORY_MATCH_WIN_DELAY_MS", defaults.timings.win_delay_ms),
            clock_unit_ms: defaults.timings.clock_unit_ms,
        }
        .normalized();

        Self {
            difficulty,
            seed,
            timings,
            frame_ms: ms("MEMORY_MATCH_FRAME_MS", defaults.frame_ms).max(1),
            log_path: var("MEMORY_MATCH_LOG_PATH"),
        }
    }
}
