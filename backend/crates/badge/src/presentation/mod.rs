//! Presentation Layer
//!
//! Serializable views for CLI output and API consumers.

pub mod dto;
