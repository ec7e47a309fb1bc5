//! Collaborator Traits
//!
//! Interfaces for hashing, publishing and querying records. Implementations
//! live in the infrastructure layer or outside this crate (relay clients,
//! signers).

use crate::domain::entities::{Event, UnsignedEvent};
use crate::error::BadgeResult;

/// Content-hash primitive that derives an event id from a draft
pub trait EventHasher: Send + Sync {
    /// Lowercase hex id of `event`
    fn event_id(&self, event: &UnsignedEvent) -> BadgeResult<String>;
}

/// Signs and submits records
///
/// Implementations must keep `created_at` and `tags` exactly as given:
/// the id of a mined draft is only valid for those values.
#[trait_variant::make(EventPublisher: Send)]
pub trait LocalEventPublisher {
    async fn publish(&self, draft: UnsignedEvent) -> BadgeResult<Event>;
}

/// Fetches records matching a filter, newest first
#[trait_variant::make(EventQuery: Send)]
pub trait LocalEventQuery {
    async fn query(&self, filter: &EventFilter) -> BadgeResult<Vec<Event>>;
}

/// Subscription filter; empty lists match everything
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EventFilter {
    pub kinds: Vec<u32>,
    pub authors: Vec<String>,
    /// `#d`
    pub identifiers: Vec<String>,
    /// `#a`
    pub addresses: Vec<String>,
    /// `#p`
    pub pubkeys: Vec<String>,
    pub limit: Option<usize>,
}

impl EventFilter {
    pub fn kind(kind: u32) -> Self {
        Self {
            kinds: vec![kind],
            ..Default::default()
        }
    }

    pub fn author(mut self, pubkey: impl Into<String>) -> Self {
        self.authors.push(pubkey.into());
        self
    }

    pub fn identifier(mut self, d: impl Into<String>) -> Self {
        self.identifiers.push(d.into());
        self
    }

    pub fn address(mut self, address: impl Into<String>) -> Self {
        self.addresses.push(address.into());
        self
    }

    pub fn pubkey(mut self, pubkey: impl Into<String>) -> Self {
        self.pubkeys.push(pubkey.into());
        self
    }

    pub fn limit(mut self, limit: usize) -> Self {
        self.limit = Some(limit);
        self
    }

    pub fn matches(&self, event: &Event) -> bool {
        fn any_tag(event: &Event, name: &str, wanted: &[String]) -> bool {
            wanted.is_empty() || event.tag_values(name).any(|v| wanted.iter().any(|w| w == v))
        }

        (self.kinds.is_empty() || self.kinds.contains(&event.kind))
            && (self.authors.is_empty() || self.authors.contains(&event.pubkey))
            && any_tag(event, "d", &self.identifiers)
            && any_tag(event, "a", &self.addresses)
            && any_tag(event, "p", &self.pubkeys)
    }
}
