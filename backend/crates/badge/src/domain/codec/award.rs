//! Badge award codec (kind 8)

use super::TagCodec;
use crate::domain::entities::{BadgeAward, Event, Recipient};
use crate::domain::tag::{RawTag, Tag};
use crate::domain::value_objects::kinds;

pub struct BadgeAwardCodec;

impl TagCodec for BadgeAwardCodec {
    type Entity = BadgeAward;

    const KIND: u32 = kinds::BADGE_AWARD;

    fn decode(event: &Event) -> BadgeAward {
        let mut badge_address = None;
        let mut recipients = Vec::new();

        for raw in &event.tags {
            match Tag::from(raw) {
                Tag::Address { address, .. } => {
                    badge_address.get_or_insert(address);
                }
                Tag::Pubkey { pubkey, relay } => recipients.push(Recipient { pubkey, relay }),
                _ => {}
            }
        }

        BadgeAward {
            id: event.id.clone(),
            pubkey: event.pubkey.clone(),
            badge_address: badge_address.unwrap_or_default(),
            recipients,
        }
    }

    fn encode(award: &BadgeAward) -> Vec<RawTag> {
        std::iter::once(Tag::Address {
            address: award.badge_address.clone(),
            relay: None,
        })
        .chain(award.recipients.iter().map(|recipient| Tag::Pubkey {
            pubkey: recipient.pubkey.clone(),
            relay: recipient.relay.clone(),
        }))
        .map(RawTag::from)
        .collect()
    }
}
