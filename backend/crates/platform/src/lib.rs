//! Platform Crate - Technical Infrastructure
//!
//! This crate provides shared technical foundations:
//! - Cryptographic utilities (SHA-256, hex encoding)
//! - Environment-driven configuration helpers

pub mod config;
pub mod crypto;
