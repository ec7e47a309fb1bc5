//! Tag Codecs
//!
//! Bidirectional mappings between records and typed badge entities.
//! Decoding is total: missing or malformed tags reduce fidelity but never fail.

mod award;
mod definition;
mod deletion;
mod profile_badges;

pub use award::BadgeAwardCodec;
pub use definition::BadgeDefinitionCodec;
pub use deletion::DeletionRequestCodec;
pub use profile_badges::ProfileBadgeListCodec;

use crate::domain::entities::{Event, UnsignedEvent};
use crate::domain::tag::RawTag;

/// Mapping between one event kind and its entity
pub trait TagCodec {
    type Entity;

    /// Event kind this codec reads and writes
    const KIND: u32;

    fn decode(event: &Event) -> Self::Entity;

    fn encode(entity: &Self::Entity) -> Vec<RawTag>;

    /// Event content for `entity`; empty for every badge kind but deletions
    fn content(_entity: &Self::Entity) -> String {
        String::new()
    }

    /// Unsigned draft authored by `pubkey`, stamped with the current time
    fn to_draft(pubkey: &str, entity: &Self::Entity) -> UnsignedEvent {
        UnsignedEvent::new(Self::KIND, pubkey, Self::encode(entity))
            .with_content(Self::content(entity))
    }
}

/// `Some` only for non-empty strings
pub(crate) fn non_empty(value: Option<&str>) -> Option<&str> {
    value.filter(|v| !v.is_empty())
}
