//! Application Layer - Use Cases
//!
//! This layer orchestrates domain logic and the publish/query collaborators.
//! Contains the proof-of-work miner and use case implementations.

pub mod award_badge;
pub mod config;
pub mod delete_badge;
pub mod mine_event;
pub mod publish_definition;
pub mod queries;
pub mod update_profile_badges;
