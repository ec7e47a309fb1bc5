//! NIP-01 Event Hasher
//!
//! The id is the SHA-256 of the compact JSON array
//! `[0, pubkey, created_at, kind, tags, content]`.

use crate::domain::entities::UnsignedEvent;
use crate::domain::repository::EventHasher;
use crate::error::BadgeResult;
use platform::crypto::sha256_hex;

#[derive(Debug, Clone, Copy, Default)]
pub struct Nip01Hasher;

impl Nip01Hasher {
    /// Canonical serialization that gets hashed
    pub fn serialize(event: &UnsignedEvent) -> BadgeResult<String> {
        let canonical = (
            0u8,
            &event.pubkey,
            event.created_at,
            event.kind,
            &event.tags,
            &event.content,
        );
        Ok(serde_json::to_string(&canonical)?)
    }
}

impl EventHasher for Nip01Hasher {
    fn event_id(&self, event: &UnsignedEvent) -> BadgeResult<String> {
        let serialized = Self::serialize(event)?;
        Ok(sha256_hex(serialized.as_bytes()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::tag::RawTag;

    fn definition_draft() -> UnsignedEvent {
        UnsignedEvent::new(
            30009,
            "79be667ef9dcbbac55a06295ce870b07029bfcdb2dce28d959f2815b16f81798",
            vec![
                RawTag::from(["d", "bravery"]),
                RawTag::from(["name", "Bravery"]),
                RawTag::from(["nonce", "7", "8"]),
            ],
        )
        .with_created_at(1_700_000_000)
    }

    #[test]
    fn test_serialize_compact_array() {
        assert_eq!(
            Nip01Hasher::serialize(&definition_draft()).unwrap(),
            r#"[0,"79be667ef9dcbbac55a06295ce870b07029bfcdb2dce28d959f2815b16f81798",1700000000,30009,[["d","bravery"],["name","Bravery"],["nonce","7","8"]],""]"#
        );
    }

    #[test]
    fn test_event_id_known_value() {
        assert_eq!(
            Nip01Hasher.event_id(&definition_draft()).unwrap(),
            "0b716ee6fdd4bc5f2b1352fb32d0bf3e4f3748cf017cdfe892d008f3fd46af5b"
        );
    }

    #[test]
    fn test_content_escaping() {
        let draft = UnsignedEvent::new(1, "pk", vec![])
            .with_created_at(1)
            .with_content("line\nbreak \"quoted\" é");
        assert_eq!(
            Nip01Hasher::serialize(&draft).unwrap(),
            "[0,\"pk\",1,1,[],\"line\\nbreak \\\"quoted\\\" é\"]"
        );
        assert_eq!(
            Nip01Hasher.event_id(&draft).unwrap(),
            "a125ab95951327de978f9e052453b687401de1b9bfc262d47a2ccd2e058c5eef"
        );
    }

    #[test]
    fn test_id_changes_with_created_at() {
        let a = definition_draft();
        let b = definition_draft().with_created_at(1_700_000_001);
        assert_ne!(
            Nip01Hasher.event_id(&a).unwrap(),
            Nip01Hasher.event_id(&b).unwrap()
        );
    }
}
