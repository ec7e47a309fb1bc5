//! Environment Configuration Helpers
//!
//! Thin layer over process environment variables. Lookups go through a
//! [`VarSource`] so callers (and tests) can substitute a fixed map.

use std::collections::HashMap;
use std::fmt::Display;
use std::str::FromStr;
use thiserror::Error;

/// Configuration loading error
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid value for {name}: {value:?} ({reason})")]
    Invalid {
        name: String,
        value: String,
        reason: String,
    },
}

/// Source of configuration variables
pub trait VarSource {
    fn var(&self, name: &str) -> Option<String>;
}

/// Reads from the process environment
#[derive(Debug, Clone, Copy, Default)]
pub struct ProcessEnv;

impl VarSource for ProcessEnv {
    fn var(&self, name: &str) -> Option<String> {
        std::env::var(name).ok()
    }
}

impl VarSource for HashMap<String, String> {
    fn var(&self, name: &str) -> Option<String> {
        self.get(name).cloned()
    }
}

/// Parse `name` from `source`, falling back to `default` when unset or blank
pub fn parse_or<T, S>(source: &S, name: &str, default: T) -> Result<T, ConfigError>
where
    T: FromStr,
    T::Err: Display,
    S: VarSource + ?Sized,
{
    match source.var(name) {
        Some(raw) if !raw.trim().is_empty() => {
            let value = raw.trim();
            value.parse::<T>().map_err(|e| ConfigError::Invalid {
                name: name.to_string(),
                value: value.to_string(),
                reason: e.to_string(),
            })
        }
        _ => {
            tracing::debug!(name, "Config variable not set, using default");
            Ok(default)
        }
    }
}
