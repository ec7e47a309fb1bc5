//! In-Memory Event Store
//!
//! Relay stand-in for the CLI and tests. Computes ids with the configured
//! hasher, leaves signatures empty, and applies relay storage rules:
//! - addressable kinds keep only the newest record per address
//!   (ties go to the lowest id)
//! - kind 5 requests remove the author's addressed records created at or
//!   before the request

use crate::domain::entities::{Event, UnsignedEvent};
use crate::domain::repository::{EventFilter, EventHasher, EventPublisher, EventQuery};
use crate::domain::value_objects::kinds;
use crate::error::BadgeResult;
use tokio::sync::RwLock;

pub struct InMemoryEventStore<H> {
    hasher: H,
    events: RwLock<Vec<Event>>,
}

impl<H: EventHasher> InMemoryEventStore<H> {
    pub fn new(hasher: H) -> Self {
        Self {
            hasher,
            events: RwLock::new(Vec::new()),
        }
    }

    /// Number of stored records
    pub async fn len(&self) -> usize {
        self.events.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.events.read().await.is_empty()
    }
}

/// `a` values a deletion request retracts
fn deleted_addresses(request: &Event) -> Vec<&str> {
    request.tag_values("a").collect()
}

fn is_deleted_by(event: &Event, request: &Event) -> bool {
    let Some(address) = event.address() else {
        return false;
    };
    let address = address.to_string();
    event.pubkey == request.pubkey
        && event.created_at <= request.created_at
        && deleted_addresses(request).contains(&address.as_str())
}

/// `true` if `a` should replace `b` at the same address
fn supersedes(a: &Event, b: &Event) -> bool {
    a.created_at > b.created_at || (a.created_at == b.created_at && a.id < b.id)
}

impl<H: EventHasher> EventPublisher for InMemoryEventStore<H> {
    async fn publish(&self, draft: UnsignedEvent) -> BadgeResult<Event> {
        let id = self.hasher.event_id(&draft)?;
        let event = Event::from_draft(draft, id, String::new());

        let mut events = self.events.write().await;

        if event.kind == kinds::DELETION {
            let before = events.len();
            events.retain(|stored| !is_deleted_by(stored, &event));
            tracing::debug!(
                deletion_id = %event.id,
                removed = before - events.len(),
                "Applied deletion request"
            );
            events.push(event.clone());
            return Ok(event);
        }

        if let Some(address) = event.address() {
            let address = address.to_string();

            let retracted = events
                .iter()
                .filter(|stored| stored.kind == kinds::DELETION)
                .any(|request| is_deleted_by(&event, request));
            if retracted {
                tracing::debug!(id = %event.id, address = %address, "Dropped deleted record");
                return Ok(event);
            }

            let current = events
                .iter()
                .position(|stored| stored.address().is_some_and(|a| a.to_string() == address));
            match current {
                Some(index) if supersedes(&event, &events[index]) => {
                    events[index] = event.clone();
                    tracing::debug!(id = %event.id, address = %address, "Replaced record");
                }
                Some(_) => {
                    tracing::debug!(id = %event.id, address = %address, "Kept newer record");
                }
                None => events.push(event.clone()),
            }
            return Ok(event);
        }

        if !events.iter().any(|stored| stored.id == event.id) {
            events.push(event.clone());
        }
        Ok(event)
    }
}

impl<H: EventHasher> EventQuery for InMemoryEventStore<H> {
    async fn query(&self, filter: &EventFilter) -> BadgeResult<Vec<Event>> {
        let events = self.events.read().await;
        let mut matched: Vec<Event> = events
            .iter()
            .filter(|event| filter.matches(event))
            .cloned()
            .collect();
        matched.sort_by(|a, b| b.created_at.cmp(&a.created_at).then_with(|| a.id.cmp(&b.id)));
        if let Some(limit) = filter.limit {
            matched.truncate(limit);
        }
        Ok(matched)
    }
}
