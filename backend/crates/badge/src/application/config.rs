//! Application Configuration
//!
//! Configuration for the badge application layer.

use crate::domain::value_objects::Rarity;
use crate::error::BadgeResult;
use platform::config::{ProcessEnv, VarSource, parse_or};

/// Attempt ceiling of a single mining search
pub const MAX_MINING_ATTEMPTS: u64 = 10_000_000;
/// Progress callback cadence, in attempts
pub const PROGRESS_INTERVAL: u64 = 10_000;
/// Default result cap for queries
pub const DEFAULT_QUERY_LIMIT: usize = 50;

/// Badge application configuration
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BadgeConfig {
    /// Attempts before a search fails; independent of the target difficulty
    pub max_attempts: u64,
    /// Report progress whenever `nonce % progress_interval == 0`
    pub progress_interval: u64,
    /// Rarity used when a caller does not choose one
    pub default_rarity: Rarity,
    /// Result cap for list queries
    pub query_limit: usize,
}

impl Default for BadgeConfig {
    fn default() -> Self {
        Self {
            max_attempts: MAX_MINING_ATTEMPTS,
            progress_interval: PROGRESS_INTERVAL,
            default_rarity: Rarity::Common,
            query_limit: DEFAULT_QUERY_LIMIT,
        }
    }
}

impl BadgeConfig {
    pub const ENV_MAX_ATTEMPTS: &'static str = "BADGE_MAX_ATTEMPTS";
    pub const ENV_PROGRESS_INTERVAL: &'static str = "BADGE_PROGRESS_INTERVAL";
    pub const ENV_DEFAULT_RARITY: &'static str = "BADGE_DEFAULT_RARITY";
    pub const ENV_QUERY_LIMIT: &'static str = "BADGE_QUERY_LIMIT";

    /// Load from the process environment, defaulting unset variables
    pub fn from_env() -> BadgeResult<Self> {
        Self::from_source(&ProcessEnv)
    }

    pub fn from_source<S: VarSource + ?Sized>(source: &S) -> BadgeResult<Self> {
        let defaults = Self::default();
        let config = Self {
            max_attempts: parse_or(source, Self::ENV_MAX_ATTEMPTS, defaults.max_attempts)?
                .max(1),
            progress_interval: parse_or(
                source,
                Self::ENV_PROGRESS_INTERVAL,
                defaults.progress_interval,
            )?
            .max(1),
            default_rarity: parse_or(source, Self::ENV_DEFAULT_RARITY, defaults.default_rarity)?,
            query_limit: parse_or(source, Self::ENV_QUERY_LIMIT, defaults.query_limit)?,
        };

        tracing::debug!(
            max_attempts = config.max_attempts,
            progress_interval = config.progress_interval,
            default_rarity = %config.default_rarity,
            "Loaded badge config"
        );

        Ok(config)
    }
}
