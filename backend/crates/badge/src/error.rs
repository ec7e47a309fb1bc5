//! Badge Error Types
//!
//! This module provides badge-specific error variants that integrate
//! with the unified `kernel::error::AppError` system.

use kernel::error::{app_error::AppError, kind::ErrorKind};
use thiserror::Error;

/// Badge-specific result type alias
pub type BadgeResult<T> = Result<T, BadgeError>;

/// Badge-specific error variants
///
/// Tag decoding never produces an error: malformed or missing tags degrade to
/// empty fields. Errors come from mining, configuration and collaborators.
#[derive(Debug, Error)]
pub enum BadgeError {
    /// Attempt ceiling reached before the target difficulty was met
    #[error("Mining exceeded {attempts} attempts without reaching {target} bits")]
    MiningExceededAttempts { attempts: u64, target: u32 },

    /// Background search was cancelled by its owner
    #[error("Mining cancelled after {attempts} attempts")]
    MiningCancelled { attempts: u64 },

    /// Address string is not `kind:pubkey:slug`
    #[error("Invalid badge address: {0}")]
    InvalidAddress(String),

    /// Award without any recipient
    #[error("Badge award has no recipients")]
    NoRecipients,

    #[error("Configuration error: {0}")]
    Config(#[from] platform::config::ConfigError),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// Background mining task panicked or was aborted
    #[error("Mining task failed: {0}")]
    Task(String),

    /// Publish/query collaborator failure
    #[error("Transport error: {0}")]
    Transport(String),

    #[error("Internal error: {0}")]
    Internal(String),
}

impl BadgeError {
    /// Get the ErrorKind for this error
    pub fn kind(&self) -> ErrorKind {
        match self {
            BadgeError::MiningExceededAttempts { .. } => ErrorKind::ResourceExhausted,
            BadgeError::MiningCancelled { .. } => ErrorKind::Cancelled,
            BadgeError::InvalidAddress(_) | BadgeError::NoRecipients => ErrorKind::InvalidInput,
            BadgeError::Config(_) => ErrorKind::Config,
            BadgeError::Transport(_) => ErrorKind::Unavailable,
            BadgeError::Serialization(_) | BadgeError::Task(_) | BadgeError::Internal(_) => {
                ErrorKind::Internal
            }
        }
    }

    /// Suggested follow-up for the caller, if any
    pub fn action(&self) -> Option<&'static str> {
        match self {
            BadgeError::MiningExceededAttempts { .. } => {
                Some("Choose a lower rarity or try mining again")
            }
            BadgeError::InvalidAddress(_) => Some("Use the form <kind>:<pubkey>:<slug>"),
            BadgeError::NoRecipients => Some("Pass at least one recipient public key"),
            BadgeError::Transport(_) => Some("Check relay connectivity and retry"),
            _ => None,
        }
    }

    /// Log the error with appropriate level
    pub(crate) fn log(&self) {
        match self {
            BadgeError::Serialization(e) => {
                tracing::error!(error = %e, "Badge serialization error");
            }
            BadgeError::Task(msg) | BadgeError::Internal(msg) => {
                tracing::error!(message = %msg, "Badge internal error");
            }
            BadgeError::MiningExceededAttempts { attempts, target } => {
                tracing::warn!(attempts, target, "Mining gave up");
            }
            BadgeError::Transport(msg) => {
                tracing::warn!(message = %msg, "Badge transport error");
            }
            _ => {
                tracing::debug!(error = %self, "Badge error");
            }
        }
    }
}

impl From<BadgeError> for AppError {
    fn from(err: BadgeError) -> Self {
        err.log();
        let kind = err.kind();
        let action = err.action();
        let app = AppError::new(kind, err.to_string());
        let app = match action {
            Some(action) => app.with_action(action),
            None => app,
        };
        app.with_source(err)
    }
}

impl From<tokio::task::JoinError> for BadgeError {
    fn from(err: tokio::task::JoinError) -> Self {
        BadgeError::Task(err.to_string())
    }
}
