//! Domain Entities
//!
//! Core records and the typed badge entities decoded from them.

use crate::domain::tag::RawTag;
use crate::domain::value_objects::{BadgeAddress, ImageSize, Rarity, kinds};
use chrono::Utc;
use serde::{Deserialize, Serialize};

/// Current Unix time in seconds
pub fn unix_now() -> u64 {
    u64::try_from(Utc::now().timestamp()).unwrap_or(0)
}

/// Draft record: everything that goes into the id, nothing that comes out of it
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UnsignedEvent {
    pub pubkey: String,
    pub created_at: u64,
    pub kind: u32,
    pub tags: Vec<RawTag>,
    #[serde(default)]
    pub content: String,
}

impl UnsignedEvent {
    /// New draft stamped with the current time and empty content
    pub fn new(kind: u32, pubkey: impl Into<String>, tags: Vec<RawTag>) -> Self {
        Self {
            pubkey: pubkey.into(),
            created_at: unix_now(),
            kind,
            tags,
            content: String::new(),
        }
    }

    pub fn with_content(mut self, content: impl Into<String>) -> Self {
        self.content = content.into();
        self
    }

    pub fn with_created_at(mut self, created_at: u64) -> Self {
        self.created_at = created_at;
        self
    }
}

/// Signed record as stored and served by relays
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Event {
    pub id: String,
    pub pubkey: String,
    pub created_at: u64,
    pub kind: u32,
    pub tags: Vec<RawTag>,
    #[serde(default)]
    pub content: String,
    #[serde(default)]
    pub sig: String,
}

impl Event {
    /// Attach id and signature to a draft
    pub fn from_draft(draft: UnsignedEvent, id: String, sig: String) -> Self {
        Self {
            id,
            pubkey: draft.pubkey,
            created_at: draft.created_at,
            kind: draft.kind,
            tags: draft.tags,
            content: draft.content,
            sig,
        }
    }

    /// Value of the first `d` tag
    pub fn identifier(&self) -> Option<&str> {
        self.tags
            .iter()
            .find(|t| t.is_named("d"))
            .map(|t| t.value(1))
    }

    /// `kind:pubkey:d` for addressable kinds
    pub fn address(&self) -> Option<BadgeAddress> {
        kinds::is_addressable(self.kind).then(|| {
            BadgeAddress::new(
                self.kind,
                self.pubkey.clone(),
                self.identifier().unwrap_or(""),
            )
        })
    }

    /// Values (`field(1)`) of every tag named `name`
    pub fn tag_values<'a>(&'a self, name: &'a str) -> impl Iterator<Item = &'a str> + 'a {
        self.tags
            .iter()
            .filter(move |t| t.is_named(name))
            .map(|t| t.value(1))
    }
}

/// Image URL with an optional `WxH` dimension string
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ImageRef {
    pub url: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub dimensions: Option<String>,
}

impl ImageRef {
    pub fn new<D: Into<String>>(url: impl Into<String>, dimensions: Option<D>) -> Self {
        Self {
            url: url.into(),
            dimensions: dimensions.map(Into::into),
        }
    }
}

/// Badge definition (kind 30009)
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct BadgeDefinition {
    /// Event id; empty until mined or published
    pub id: String,
    pub pubkey: String,
    pub slug: String,
    pub name: Option<String>,
    pub description: Option<String>,
    pub image: Option<ImageRef>,
    pub thumbs: Vec<ImageRef>,
    /// Leading zero bits of `id`
    pub difficulty: u32,
    pub rarity: Rarity,
}

impl BadgeDefinition {
    pub fn new(pubkey: impl Into<String>, slug: impl Into<String>) -> Self {
        Self {
            pubkey: pubkey.into(),
            slug: slug.into(),
            ..Default::default()
        }
    }

    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    pub fn with_image(mut self, image: ImageRef) -> Self {
        self.image = Some(image);
        self
    }

    pub fn with_thumb(mut self, thumb: ImageRef) -> Self {
        self.thumbs.push(thumb);
        self
    }

    pub fn address(&self) -> BadgeAddress {
        BadgeAddress::definition(self.pubkey.clone(), self.slug.clone())
    }

    /// URL to render at `size`
    ///
    /// `Full` prefers the primary image. Otherwise: thumbnail with exactly
    /// matching dimensions, then the first thumbnail, then the primary image.
    pub fn image_url(&self, size: ImageSize) -> Option<&str> {
        let primary = self.image.as_ref().map(|image| image.url.as_str());
        if size == ImageSize::Full && primary.is_some() {
            return primary;
        }
        self.thumbs
            .iter()
            .find(|thumb| thumb.dimensions.as_deref() == Some(size.dimensions()))
            .or_else(|| self.thumbs.first())
            .map(|thumb| thumb.url.as_str())
            .or(primary)
    }
}

/// Award recipient
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Recipient {
    pub pubkey: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub relay: Option<String>,
}

impl Recipient {
    pub fn new(pubkey: impl Into<String>) -> Self {
        Self {
            pubkey: pubkey.into(),
            relay: None,
        }
    }

    pub fn with_relay(mut self, relay: impl Into<String>) -> Self {
        self.relay = Some(relay.into());
        self
    }
}

/// Badge award (kind 8)
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct BadgeAward {
    pub id: String,
    /// Awarder
    pub pubkey: String,
    /// `30009:<issuer>:<slug>`, passed through unvalidated
    pub badge_address: String,
    /// In tag order, duplicates kept
    pub recipients: Vec<Recipient>,
}

/// One displayed badge in a profile list
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ProfileBadgeEntry {
    pub badge_address: String,
    pub award_id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub relay: Option<String>,
}

impl ProfileBadgeEntry {
    pub fn new(badge_address: impl Into<String>, award_id: impl Into<String>) -> Self {
        Self {
            badge_address: badge_address.into(),
            award_id: award_id.into(),
            relay: None,
        }
    }
}

/// Per-user ordered badge list (kind 30008, `d` = `profile_badges`)
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ProfileBadges {
    pub pubkey: String,
    /// Display order
    pub entries: Vec<ProfileBadgeEntry>,
}

/// Deletion request (kind 5) retracting badge definitions by address
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct DeletionRequest {
    pub id: String,
    pub pubkey: String,
    pub addresses: Vec<String>,
    pub reason: String,
}
