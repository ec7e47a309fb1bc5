//! Domain Layer - Business logic and entities
//!
//! This layer contains:
//! - Records (`Event`, `UnsignedEvent`) and badge entities
//! - Typed tags over the raw wire form
//! - Value objects (Difficulty, Rarity, BadgeAddress, ImageSize)
//! - Domain services (leading-zero-bit difficulty, mining estimates)
//! - Tag codecs between records and entities
//! - Collaborator traits (hasher, publisher, query)

pub mod codec;
pub mod entities;
pub mod repository;
pub mod services;
pub mod tag;
pub mod value_objects;
