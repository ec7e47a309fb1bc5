//! Award Badge Use Case

use crate::domain::codec::{BadgeAwardCodec, TagCodec};
use crate::domain::entities::{BadgeAward, Recipient};
use crate::domain::repository::EventPublisher;
use crate::domain::value_objects::BadgeAddress;
use crate::error::{BadgeError, BadgeResult};
use kernel::id::PublicKey;
use std::sync::Arc;

/// Input DTO for award badge
#[derive(Debug, Clone)]
pub struct AwardBadgeInput {
    pub awarder: PublicKey,
    pub badge: BadgeAddress,
    /// In tag order; duplicates are kept
    pub recipients: Vec<PublicKey>,
}

/// Award Badge Use Case
pub struct AwardBadgeUseCase<P>
where
    P: EventPublisher,
{
    publisher: Arc<P>,
}

impl<P> AwardBadgeUseCase<P>
where
    P: EventPublisher,
{
    pub fn new(publisher: Arc<P>) -> Self {
        Self { publisher }
    }

    pub async fn execute(&self, input: AwardBadgeInput) -> BadgeResult<BadgeAward> {
        if input.recipients.is_empty() {
            return Err(BadgeError::NoRecipients);
        }

        let award = BadgeAward {
            badge_address: input.badge.to_string(),
            recipients: input
                .recipients
                .iter()
                .map(|pk| Recipient::new(pk.to_hex()))
                .collect(),
            ..Default::default()
        };

        let draft = BadgeAwardCodec::to_draft(&input.awarder.to_hex(), &award);
        let event = self.publisher.publish(draft).await?;
        let award = BadgeAwardCodec::decode(&event);

        tracing::info!(
            award_id = %award.id,
            badge = %award.badge_address,
            recipients = award.recipients.len(),
            "Awarded badge"
        );

        Ok(award)
    }
}
