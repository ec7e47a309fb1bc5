//! Update Profile Badges Use Case
//!
//! Replaces the owner's kind 30008 list. Selection order is display order.

use crate::domain::codec::{ProfileBadgeListCodec, TagCodec};
use crate::domain::entities::{BadgeAward, ProfileBadgeEntry, ProfileBadges};
use crate::domain::repository::EventPublisher;
use crate::error::BadgeResult;
use std::sync::Arc;

/// Input DTO for update profile badges
#[derive(Debug, Clone)]
pub struct UpdateProfileBadgesInput {
    pub owner: String,
    pub entries: Vec<ProfileBadgeEntry>,
}

impl UpdateProfileBadgesInput {
    /// One entry per award, in the order given
    pub fn from_awards<'a>(
        owner: impl Into<String>,
        awards: impl IntoIterator<Item = &'a BadgeAward>,
    ) -> Self {
        Self {
            owner: owner.into(),
            entries: awards
                .into_iter()
                .map(|award| ProfileBadgeEntry::new(award.badge_address.clone(), award.id.clone()))
                .collect(),
        }
    }
}

/// Update Profile Badges Use Case
pub struct UpdateProfileBadgesUseCase<P>
where
    P: EventPublisher,
{
    publisher: Arc<P>,
}

impl<P> UpdateProfileBadgesUseCase<P>
where
    P: EventPublisher,
{
    pub fn new(publisher: Arc<P>) -> Self {
        Self { publisher }
    }

    pub async fn execute(&self, input: UpdateProfileBadgesInput) -> BadgeResult<ProfileBadges> {
        let profile = ProfileBadges {
            pubkey: input.owner,
            entries: input.entries,
        };

        let draft = ProfileBadgeListCodec::to_draft(&profile.pubkey, &profile);
        let event = self.publisher.publish(draft).await?;
        let profile = ProfileBadgeListCodec::decode(&event);

        tracing::info!(
            owner = %profile.pubkey,
            badges = profile.entries.len(),
            "Updated profile badges"
        );

        Ok(profile)
    }
}
