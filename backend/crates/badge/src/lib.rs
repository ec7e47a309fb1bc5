//! Badge Module - mined badge records on Nostr
//!
//! Clean Architecture structure:
//! - `domain/` - Entities, typed tags, difficulty/rarity services, tag codecs, collaborator traits
//! - `application/` - Proof-of-work miner and use cases
//! - `infra/` - NIP-01 event hasher, in-memory event store
//! - `presentation/` - Serializable views
//!
//! ## Record Model
//! - Badge definitions (kind 30009) are addressable by `30009:<pubkey>:<slug>`
//! - Awards (kind 8) reference a definition address and list recipients
//! - Profile badges (kind 30008) pair `a`/`e` tags; adjacency is the pairing
//! - Rarity is never stored: it is derived from the leading zero bits of the event id

pub mod application;
pub mod domain;
pub mod error;
pub mod infra;
pub mod presentation;

// Re-exports for convenience
pub use application::award_badge::{AwardBadgeInput, AwardBadgeUseCase};
pub use application::config::BadgeConfig;
pub use application::delete_badge::DeleteBadgeUseCase;
pub use application::mine_event::{
    CancellationFlag, MinedEvent, MiningProgress, MiningTask, ProofOfWorkMiner,
};
pub use application::publish_definition::{PublishDefinitionInput, PublishDefinitionUseCase};
pub use application::queries::{AwardQuery, BadgeQueries};
pub use application::update_profile_badges::{
    UpdateProfileBadgesInput, UpdateProfileBadgesUseCase,
};
pub use domain::codec::{
    BadgeAwardCodec, BadgeDefinitionCodec, DeletionRequestCodec, ProfileBadgeListCodec, TagCodec,
};
pub use domain::entities::{
    BadgeAward, BadgeDefinition, DeletionRequest, Event, ImageRef, ProfileBadgeEntry,
    ProfileBadges, Recipient, UnsignedEvent,
};
pub use domain::repository::{EventFilter, EventHasher, EventPublisher, EventQuery};
pub use domain::services::{count_leading_zero_bits, estimate_mining_time, format_mining_time};
pub use domain::tag::{RawTag, Tag};
pub use domain::value_objects::{BadgeAddress, Difficulty, ImageSize, Rarity};
pub use error::{BadgeError, BadgeResult};
pub use infra::memory::InMemoryEventStore;
pub use infra::nip01::Nip01Hasher;

// Re-export kernel error types for unified error handling
pub use kernel::error::{
    app_error::{AppError, AppResult, ResultExt},
    kind::ErrorKind,
};
