//! Badge definition codec (kind 30009)

use super::{TagCodec, non_empty};
use crate::domain::entities::{BadgeDefinition, Event, ImageRef};
use crate::domain::services::count_leading_zero_bits;
use crate::domain::tag::{RawTag, Tag};
use crate::domain::value_objects::{ImageSize, Rarity, kinds};

pub struct BadgeDefinitionCodec;

impl TagCodec for BadgeDefinitionCodec {
    type Entity = BadgeDefinition;

    const KIND: u32 = kinds::BADGE_DEFINITION;

    /// First `d`, `name`, `description` and `image` win; every `thumb` is kept
    /// in order. Difficulty and rarity come from the event id.
    fn decode(event: &Event) -> BadgeDefinition {
        let mut slug = None;
        let mut name = None;
        let mut description = None;
        let mut image = None;
        let mut thumbs = Vec::new();

        for raw in &event.tags {
            match Tag::from(raw) {
                Tag::Identifier(d) => {
                    slug.get_or_insert(d);
                }
                Tag::Name(value) => {
                    name.get_or_insert(value);
                }
                Tag::Description(value) => {
                    description.get_or_insert(value);
                }
                Tag::Image(value) => {
                    image.get_or_insert(value);
                }
                Tag::Thumb(thumb) => thumbs.push(thumb),
                _ => {}
            }
        }

        let difficulty = count_leading_zero_bits(&event.id);

        BadgeDefinition {
            id: event.id.clone(),
            pubkey: event.pubkey.clone(),
            slug: slug.unwrap_or_default(),
            name: name.filter(|v| !v.is_empty()),
            description: description.filter(|v| !v.is_empty()),
            image: image.filter(|img| !img.url.is_empty()),
            thumbs,
            difficulty,
            rarity: Rarity::from_difficulty(difficulty),
        }
    }

    /// `d` always, then non-empty `name`/`description`/`image`, then thumbnails
    /// in slot order 512, 256, 64, 32, 16. Thumbnails whose dimensions match
    /// no slot follow in input order; a second thumbnail for a slot is dropped.
    fn encode(definition: &BadgeDefinition) -> Vec<RawTag> {
        let mut tags: Vec<RawTag> = vec![Tag::Identifier(definition.slug.clone()).into()];

        if let Some(name) = non_empty(definition.name.as_deref()) {
            tags.push(Tag::Name(name.to_string()).into());
        }
        if let Some(description) = non_empty(definition.description.as_deref()) {
            tags.push(Tag::Description(description.to_string()).into());
        }
        if let Some(image) = definition.image.as_ref().filter(|img| !img.url.is_empty()) {
            tags.push(Tag::Image(image.clone()).into());
        }

        let populated: Vec<&ImageRef> = definition
            .thumbs
            .iter()
            .filter(|thumb| !thumb.url.is_empty())
            .collect();

        for slot in ImageSize::THUMBNAIL_SLOTS {
            if let Some(thumb) = populated
                .iter()
                .find(|thumb| thumb.dimensions.as_deref() == Some(slot.dimensions()))
            {
                tags.push(Tag::Thumb((*thumb).clone()).into());
            }
        }
        for thumb in populated {
            let in_slot = thumb
                .dimensions
                .as_deref()
                .and_then(ImageSize::slot_for)
                .is_some();
            if !in_slot {
                tags.push(Tag::Thumb(thumb.clone()).into());
            }
        }

        tags
    }
}
