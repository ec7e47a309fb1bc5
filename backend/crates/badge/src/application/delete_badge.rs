//! Delete Badge Use Case
//!
//! Publishes a kind 5 request retracting a definition by address. Awards
//! already issued for the badge are left alone.

use crate::domain::codec::{DeletionRequestCodec, TagCodec};
use crate::domain::entities::DeletionRequest;
use crate::domain::repository::EventPublisher;
use crate::domain::value_objects::{BadgeAddress, kinds};
use crate::error::{BadgeError, BadgeResult};
use std::sync::Arc;

pub const DEFAULT_DELETION_REASON: &str = "Badge deleted";

/// Delete Badge Use Case
pub struct DeleteBadgeUseCase<P>
where
    P: EventPublisher,
{
    publisher: Arc<P>,
}

impl<P> DeleteBadgeUseCase<P>
where
    P: EventPublisher,
{
    pub fn new(publisher: Arc<P>) -> Self {
        Self { publisher }
    }

    /// Retract `badge`; the request is authored by the badge issuer
    pub async fn execute(
        &self,
        badge: &BadgeAddress,
        reason: Option<String>,
    ) -> BadgeResult<DeletionRequest> {
        if badge.kind != kinds::BADGE_DEFINITION {
            return Err(BadgeError::InvalidAddress(badge.to_string()));
        }

        let request = DeletionRequest {
            addresses: vec![badge.to_string()],
            reason: reason.unwrap_or_else(|| DEFAULT_DELETION_REASON.to_string()),
            ..Default::default()
        };

        let draft = DeletionRequestCodec::to_draft(&badge.pubkey, &request);
        let event = self.publisher.publish(draft).await?;

        tracing::info!(address = %badge, deletion_id = %event.id, "Deleted badge");

        Ok(DeletionRequestCodec::decode(&event))
    }
}
