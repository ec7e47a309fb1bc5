//! Tags
//!
//! [`RawTag`] is the wire form: an ordered list of strings whose first element
//! names the tag. It is what gets hashed and published, so it is never
//! normalized. [`Tag`] is the typed read view used by the codecs.

use crate::domain::entities::ImageRef;
use serde::{Deserialize, Serialize};

/// Wire-level tag, serialized as a JSON array of strings
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RawTag(Vec<String>);

impl RawTag {
    pub fn new(fields: Vec<String>) -> Self {
        Self(fields)
    }

    /// First element, if any
    pub fn name(&self) -> Option<&str> {
        self.field(0)
    }

    /// Positional field; `field(1)` is the first value
    pub fn field(&self, index: usize) -> Option<&str> {
        self.0.get(index).map(String::as_str)
    }

    /// Positional value, empty string when absent
    pub fn value(&self, index: usize) -> &str {
        self.field(index).unwrap_or("")
    }

    pub fn is_named(&self, name: &str) -> bool {
        self.name() == Some(name)
    }

    pub fn fields(&self) -> &[String] {
        &self.0
    }

    pub fn into_inner(self) -> Vec<String> {
        self.0
    }
}

impl<const N: usize> From<[&str; N]> for RawTag {
    fn from(fields: [&str; N]) -> Self {
        Self(fields.iter().map(|f| f.to_string()).collect())
    }
}

impl From<Vec<String>> for RawTag {
    fn from(fields: Vec<String>) -> Self {
        Self(fields)
    }
}

/// Typed view of a tag, discriminated by tag name
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Tag {
    /// `d`: slug of an addressable record
    Identifier(String),
    Name(String),
    Description(String),
    Image(ImageRef),
    Thumb(ImageRef),
    /// `nonce`: proof-of-work counter and committed target
    Nonce { nonce: u64, target: Option<u32> },
    /// `a`: address reference
    Address {
        address: String,
        relay: Option<String>,
    },
    /// `p`: public key reference
    Pubkey {
        pubkey: String,
        relay: Option<String>,
    },
    /// `e`: event reference
    Event { id: String, relay: Option<String> },
    /// Anything else, including a `nonce` tag with a non-numeric counter
    Other(RawTag),
}

impl Tag {
    pub const IDENTIFIER: &'static str = "d";
    pub const NAME: &'static str = "name";
    pub const DESCRIPTION: &'static str = "description";
    pub const IMAGE: &'static str = "image";
    pub const THUMB: &'static str = "thumb";
    pub const NONCE: &'static str = "nonce";
    pub const ADDRESS: &'static str = "a";
    pub const PUBKEY: &'static str = "p";
    pub const EVENT: &'static str = "e";

    pub fn nonce(nonce: u64, target: u32) -> Self {
        Tag::Nonce {
            nonce,
            target: Some(target),
        }
    }

    pub fn is_nonce(&self) -> bool {
        matches!(self, Tag::Nonce { .. })
    }
}

fn optional(raw: &RawTag, index: usize) -> Option<String> {
    raw.field(index)
        .filter(|value| !value.is_empty())
        .map(str::to_string)
}

fn image_ref(raw: &RawTag) -> ImageRef {
    ImageRef {
        url: raw.value(1).to_string(),
        dimensions: optional(raw, 2),
    }
}

impl From<&RawTag> for Tag {
    fn from(raw: &RawTag) -> Self {
        match raw.name() {
            Some(Tag::IDENTIFIER) => Tag::Identifier(raw.value(1).to_string()),
            Some(Tag::NAME) => Tag::Name(raw.value(1).to_string()),
            Some(Tag::DESCRIPTION) => Tag::Description(raw.value(1).to_string()),
            Some(Tag::IMAGE) => Tag::Image(image_ref(raw)),
            Some(Tag::THUMB) => Tag::Thumb(image_ref(raw)),
            Some(Tag::NONCE) => match raw.value(1).parse::<u64>() {
                Ok(nonce) => Tag::Nonce {
                    nonce,
                    target: raw.field(2).and_then(|t| t.parse().ok()),
                },
                Err(_) => Tag::Other(raw.clone()),
            },
            Some(Tag::ADDRESS) => Tag::Address {
                address: raw.value(1).to_string(),
                relay: optional(raw, 2),
            },
            Some(Tag::PUBKEY) => Tag::Pubkey {
                pubkey: raw.value(1).to_string(),
                relay: optional(raw, 2),
            },
            Some(Tag::EVENT) => Tag::Event {
                id: raw.value(1).to_string(),
                relay: optional(raw, 2),
            },
            _ => Tag::Other(raw.clone()),
        }
    }
}

fn with_optional(mut fields: Vec<String>, extra: Option<String>) -> RawTag {
    if let Some(extra) = extra.filter(|value| !value.is_empty()) {
        fields.push(extra);
    }
    RawTag(fields)
}

impl From<Tag> for RawTag {
    fn from(tag: Tag) -> Self {
        match tag {
            Tag::Identifier(slug) => RawTag(vec![Tag::IDENTIFIER.into(), slug]),
            Tag::Name(name) => RawTag(vec![Tag::NAME.into(), name]),
            Tag::Description(text) => RawTag(vec![Tag::DESCRIPTION.into(), text]),
            Tag::Image(image) => with_optional(vec![Tag::IMAGE.into(), image.url], image.dimensions),
            Tag::Thumb(image) => with_optional(vec![Tag::THUMB.into(), image.url], image.dimensions),
            Tag::Nonce { nonce, target } => with_optional(
                vec![Tag::NONCE.into(), nonce.to_string()],
                target.map(|t| t.to_string()),
            ),
            Tag::Address { address, relay } => {
                with_optional(vec![Tag::ADDRESS.into(), address], relay)
            }
            Tag::Pubkey { pubkey, relay } => with_optional(vec![Tag::PUBKEY.into(), pubkey], relay),
            Tag::Event { id, relay } => with_optional(vec![Tag::EVENT.into(), id], relay),
            Tag::Other(raw) => raw,
        }
    }
}
