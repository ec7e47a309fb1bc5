//! Profile badge list codec (kind 30008)
//!
//! Entries are adjacent `a`, `e` tag pairs. Pairing is greedy from the left;
//! a tag that does not start a pair is skipped, so reordered or partial
//! streams decode to a shorter list instead of failing.

use super::TagCodec;
use crate::domain::entities::{Event, ProfileBadgeEntry, ProfileBadges};
use crate::domain::tag::{RawTag, Tag};
use crate::domain::value_objects::{PROFILE_BADGES_SLUG, kinds};

pub struct ProfileBadgeListCodec;

impl TagCodec for ProfileBadgeListCodec {
    type Entity = ProfileBadges;

    const KIND: u32 = kinds::PROFILE_BADGES;

    fn decode(event: &Event) -> ProfileBadges {
        let tags = &event.tags;
        let mut entries = Vec::new();
        let mut i = 0;

        while i + 1 < tags.len() {
            if tags[i].is_named(Tag::ADDRESS) && tags[i + 1].is_named(Tag::EVENT) {
                if let (Tag::Address { address, .. }, Tag::Event { id, relay }) =
                    (Tag::from(&tags[i]), Tag::from(&tags[i + 1]))
                {
                    entries.push(ProfileBadgeEntry {
                        badge_address: address,
                        award_id: id,
                        relay,
                    });
                }
                i += 2;
            } else {
                i += 1;
            }
        }

        ProfileBadges {
            pubkey: event.pubkey.clone(),
            entries,
        }
    }

    fn encode(profile: &ProfileBadges) -> Vec<RawTag> {
        let mut tags = Vec::with_capacity(1 + profile.entries.len() * 2);
        tags.push(RawTag::from(Tag::Identifier(PROFILE_BADGES_SLUG.to_string())));
        for entry in &profile.entries {
            tags.push(
                Tag::Address {
                    address: entry.badge_address.clone(),
                    relay: None,
                }
                .into(),
            );
            tags.push(
                Tag::Event {
                    id: entry.award_id.clone(),
                    relay: entry.relay.clone(),
                }
                .into(),
            );
        }
        tags
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::entities::UnsignedEvent;

    fn event(tags: Vec<RawTag>) -> Event {
        Event::from_draft(
            UnsignedEvent::new(kinds::PROFILE_BADGES, "owner", tags),
            "listid".into(),
            String::new(),
        )
    }

    fn addresses(profile: &ProfileBadges) -> Vec<&str> {
        profile
            .entries
            .iter()
            .map(|e| e.badge_address.as_str())
            .collect()
    }

    #[test]
    fn test_decode_pairs_in_order() {
        let profile = ProfileBadgeListCodec::decode(&event(vec![
            RawTag::from(["d", "profile_badges"]),
            RawTag::from(["a", "30009:i:one"]),
            RawTag::from(["e", "award1", "wss://relay"]),
            RawTag::from(["a", "30009:i:two"]),
            RawTag::from(["e", "award2"]),
        ]));

        assert_eq!(profile.pubkey, "owner");
        assert_eq!(
            profile.entries,
            vec![
                ProfileBadgeEntry {
                    badge_address: "30009:i:one".into(),
                    award_id: "award1".into(),
                    relay: Some("wss://relay".into()),
                },
                ProfileBadgeEntry::new("30009:i:two", "award2"),
            ]
        );
    }

    #[test]
    fn test_decode_drops_non_adjacent_pair() {
        let profile = ProfileBadgeListCodec::decode(&event(vec![
            RawTag::from(["d", "profile_badges"]),
            RawTag::from(["a", "30009:i:one"]),
            RawTag::from(["e", "award1"]),
            RawTag::from(["a", "30009:i:two"]),
            RawTag::from(["x", "noise"]),
            RawTag::from(["e", "award2"]),
        ]));
        assert_eq!(addresses(&profile), vec!["30009:i:one"]);
    }

    #[test]
    fn test_decode_orphans_and_reversed_order() {
        let profile = ProfileBadgeListCodec::decode(&event(vec![
            RawTag::from(["e", "stray"]),
            RawTag::from(["a", "30009:i:one"]),
            RawTag::from(["a", "30009:i:two"]),
            RawTag::from(["e", "award2"]),
            RawTag::from(["a", "30009:i:three"]),
        ]));
        // `one` is followed by another `a`, `three` by nothing
        assert_eq!(addresses(&profile), vec!["30009:i:two"]);
        assert_eq!(profile.entries[0].award_id, "award2");
    }

    #[test]
    fn test_decode_greedy_pairing() {
        // a1 e1 e2: the second `e` has no preceding unpaired `a`
        let profile = ProfileBadgeListCodec::decode(&event(vec![
            RawTag::from(["a", "30009:i:one"]),
            RawTag::from(["e", "award1"]),
            RawTag::from(["e", "award2"]),
        ]));
        assert_eq!(profile.entries.len(), 1);
        assert_eq!(profile.entries[0].award_id, "award1");
    }

    #[test]
    fn test_decode_empty() {
        assert!(ProfileBadgeListCodec::decode(&event(vec![])).entries.is_empty());
        assert!(
            ProfileBadgeListCodec::decode(&event(vec![RawTag::from(["a", "x"])]))
                .entries
                .is_empty()
        );
    }

    #[test]
    fn test_encode_interleaves() {
        let profile = ProfileBadges {
            pubkey: "owner".into(),
            entries: vec![
                ProfileBadgeEntry::new("30009:i:one", "award1"),
                ProfileBadgeEntry {
                    badge_address: "30009:i:two".into(),
                    award_id: "award2".into(),
                    relay: Some("wss://relay".into()),
                },
            ],
        };
        assert_eq!(
            ProfileBadgeListCodec::encode(&profile),
            vec![
                RawTag::from(["d", "profile_badges"]),
                RawTag::from(["a", "30009:i:one"]),
                RawTag::from(["e", "award1"]),
                RawTag::from(["a", "30009:i:two"]),
                RawTag::from(["e", "award2", "wss://relay"]),
            ]
        );
    }

    #[test]
    fn test_encode_then_decode_preserves_order() {
        let profile = ProfileBadges {
            pubkey: "owner".into(),
            entries: (0..5)
                .map(|i| ProfileBadgeEntry::new(format!("30009:i:{}", i), format!("award{}", i)))
                .collect(),
        };
        let decoded = ProfileBadgeListCodec::decode(&event(ProfileBadgeListCodec::encode(&profile)));
        assert_eq!(decoded, profile);
    }
}
