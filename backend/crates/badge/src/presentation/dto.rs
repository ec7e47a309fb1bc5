//! Output DTOs (Data Transfer Objects)

use crate::application::mine_event::MinedEvent;
use crate::domain::entities::{
    BadgeAward, BadgeDefinition, DeletionRequest, ImageRef, ProfileBadgeEntry, ProfileBadges,
    Recipient, UnsignedEvent,
};
use crate::domain::services::{count_leading_zero_bits, estimate_mining_time, format_mining_time};
use crate::domain::value_objects::{ImageSize, Rarity};
use serde::Serialize;

/// Rarity tier with its display attributes
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RarityView {
    pub code: Rarity,
    pub name: &'static str,
    pub color: &'static str,
    pub min_difficulty: u32,
}

impl From<Rarity> for RarityView {
    fn from(rarity: Rarity) -> Self {
        Self {
            code: rarity,
            name: rarity.name(),
            color: rarity.color(),
            min_difficulty: rarity.min_difficulty(),
        }
    }
}

/// Output of `difficulty <id>`
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DifficultyReport {
    pub id: String,
    pub difficulty: u32,
    pub rarity: RarityView,
}

impl DifficultyReport {
    pub fn for_id(id: impl Into<String>) -> Self {
        let id = id.into();
        let difficulty = count_leading_zero_bits(&id);
        Self {
            id,
            difficulty,
            rarity: Rarity::from_difficulty(difficulty).into(),
        }
    }
}

/// Output of `estimate <bits>`
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MiningEstimateView {
    pub bits: u32,
    pub rarity: RarityView,
    pub estimated_seconds: f64,
    pub display: String,
}

impl MiningEstimateView {
    pub fn for_bits(bits: u32) -> Self {
        let estimate = estimate_mining_time(bits);
        Self {
            bits,
            rarity: Rarity::from_difficulty(bits).into(),
            estimated_seconds: estimate.as_secs_f64(),
            display: format_mining_time(estimate),
        }
    }
}

/// Successful mining result with the finished draft
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MinedEventView {
    pub id: String,
    pub nonce: u64,
    pub difficulty: u32,
    pub rarity: RarityView,
    pub event: UnsignedEvent,
}

impl From<MinedEvent> for MinedEventView {
    fn from(mined: MinedEvent) -> Self {
        Self {
            rarity: Rarity::from_difficulty(mined.difficulty).into(),
            id: mined.id,
            nonce: mined.nonce,
            difficulty: mined.difficulty,
            event: mined.event,
        }
    }
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BadgeDefinitionView {
    pub id: String,
    pub pubkey: String,
    pub address: String,
    pub slug: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub image: Option<ImageRef>,
    pub thumbs: Vec<ImageRef>,
    /// Best URL for a card-sized render
    #[serde(skip_serializing_if = "Option::is_none")]
    pub preview_url: Option<String>,
    pub difficulty: u32,
    pub rarity: RarityView,
}

impl From<BadgeDefinition> for BadgeDefinitionView {
    fn from(definition: BadgeDefinition) -> Self {
        Self {
            address: definition.address().to_string(),
            preview_url: definition.image_url(ImageSize::L).map(str::to_string),
            rarity: definition.rarity.into(),
            id: definition.id,
            pubkey: definition.pubkey,
            slug: definition.slug,
            name: definition.name,
            description: definition.description,
            image: definition.image,
            thumbs: definition.thumbs,
            difficulty: definition.difficulty,
        }
    }
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AwardView {
    pub id: String,
    pub awarded_by: String,
    pub badge_address: String,
    pub awarded_to: Vec<Recipient>,
}

impl From<BadgeAward> for AwardView {
    fn from(award: BadgeAward) -> Self {
        Self {
            id: award.id,
            awarded_by: award.pubkey,
            badge_address: award.badge_address,
            awarded_to: award.recipients,
        }
    }
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProfileBadgesView {
    pub pubkey: String,
    pub badges: Vec<ProfileBadgeEntry>,
}

impl From<ProfileBadges> for ProfileBadgesView {
    fn from(profile: ProfileBadges) -> Self {
        Self {
            pubkey: profile.pubkey,
            badges: profile.entries,
        }
    }
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DeletionView {
    pub id: String,
    pub pubkey: String,
    pub addresses: Vec<String>,
    pub reason: String,
}

impl From<DeletionRequest> for DeletionView {
    fn from(request: DeletionRequest) -> Self {
        Self {
            id: request.id,
            pubkey: request.pubkey,
            addresses: request.addresses,
            reason: request.reason,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_difficulty_report_json() {
        let report = DifficultyReport::for_id("0000ffff");
        assert_eq!(
            serde_json::to_value(&report).unwrap(),
            json!({
                "id": "0000ffff",
                "difficulty": 16,
                "rarity": {
                    "code": "UNCOMMON",
                    "name": "Uncommon",
                    "color": "#10B981",
                    "minDifficulty": 16
                }
            })
        );
    }

    #[test]
    fn test_estimate_view() {
        let view = MiningEstimateView::for_bits(21);
        assert_eq!(view.rarity.code, Rarity::Rare);
        assert_eq!(view.display, "~21 seconds");
    }

    #[test]
    fn test_definition_view() {
        let definition = BadgeDefinition::new("pk", "bravery")
            .with_name("Bravery")
            .with_thumb(ImageRef::new("https://img/256.png", Some("256x256")));
        let value = serde_json::to_value(BadgeDefinitionView::from(definition)).unwrap();

        assert_eq!(value["address"], "30009:pk:bravery");
        assert_eq!(value["previewUrl"], "https://img/256.png");
        assert_eq!(value["rarity"]["code"], "COMMON");
        assert!(value.get("description").is_none());
    }
}
