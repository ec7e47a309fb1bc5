//! Infrastructure Layer
//!
//! Event id hashing and an in-process event store.

pub mod memory;
pub mod nip01;
