//! Publish Badge Definition Use Case
//!
//! Creates or edits a kind 30009 definition. When the requested difficulty is
//! above zero the draft is mined on the blocking pool before it is published.

use crate::application::config::BadgeConfig;
use crate::application::mine_event::{
    CancellationFlag, MiningProgress, MiningTask, ProofOfWorkMiner,
};
use crate::domain::codec::{BadgeDefinitionCodec, TagCodec};
use crate::domain::entities::BadgeDefinition;
use crate::domain::repository::{EventHasher, EventPublisher};
use crate::domain::value_objects::Rarity;
use crate::error::BadgeResult;
use std::sync::Arc;

/// Input DTO for publish definition
#[derive(Debug, Clone)]
pub struct PublishDefinitionInput {
    /// Author (`pubkey`) and slug form the address; `id` is ignored
    pub definition: BadgeDefinition,
    /// Leading zero bits the published id must carry
    pub target_bits: u32,
}

impl PublishDefinitionInput {
    /// New definition mined for the entry threshold of `rarity`
    pub fn with_rarity(definition: BadgeDefinition, rarity: Rarity) -> Self {
        Self {
            definition,
            target_bits: rarity.min_difficulty(),
        }
    }

    /// Edit of `existing` that keeps its current difficulty
    pub fn preserving(definition: BadgeDefinition, existing: &BadgeDefinition) -> Self {
        Self {
            definition,
            target_bits: existing.difficulty,
        }
    }
}

/// Output DTO for publish definition
#[derive(Debug, Clone)]
pub struct PublishDefinitionOutput {
    /// Decoded from the published record
    pub definition: BadgeDefinition,
    /// Winning nonce, if the draft was mined
    pub nonce: Option<u64>,
}

/// Publish Badge Definition Use Case
pub struct PublishDefinitionUseCase<H, P>
where
    H: EventHasher,
    P: EventPublisher,
{
    miner: ProofOfWorkMiner<H>,
    publisher: Arc<P>,
}

impl<H, P> PublishDefinitionUseCase<H, P>
where
    H: EventHasher + 'static,
    P: EventPublisher,
{
    pub fn new(hasher: Arc<H>, publisher: Arc<P>, config: Arc<BadgeConfig>) -> Self {
        Self {
            miner: ProofOfWorkMiner::new(hasher, &config),
            publisher,
        }
    }

    /// Use a preconfigured miner
    pub fn with_miner(miner: ProofOfWorkMiner<H>, publisher: Arc<P>) -> Self {
        Self { miner, publisher }
    }

    pub async fn execute<F>(
        &self,
        input: PublishDefinitionInput,
        on_progress: F,
        cancel: CancellationFlag,
    ) -> BadgeResult<PublishDefinitionOutput>
    where
        F: FnMut(MiningProgress) + Send + 'static,
    {
        let author = input.definition.pubkey.clone();
        let draft = BadgeDefinitionCodec::to_draft(&author, &input.definition);

        let (draft, nonce) = if input.target_bits > 0 {
            let task = MiningTask::spawn_with_cancel(
                self.miner.clone(),
                draft,
                input.target_bits,
                on_progress,
                cancel,
            );
            let mined = task.join().await?;
            (mined.event, Some(mined.nonce))
        } else {
            (draft, None)
        };

        let event = self.publisher.publish(draft).await?;
        let definition = BadgeDefinitionCodec::decode(&event);

        if definition.difficulty < input.target_bits {
            tracing::warn!(
                id = %event.id,
                difficulty = definition.difficulty,
                target = input.target_bits,
                "Published definition lost its proof of work"
            );
        }

        tracing::info!(
            address = %definition.address(),
            difficulty = definition.difficulty,
            rarity = %definition.rarity,
            "Published badge definition"
        );

        Ok(PublishDefinitionOutput { definition, nonce })
    }
}
