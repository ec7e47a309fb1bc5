//! Badge Queries
//!
//! Read side: builds relay filters and decodes the returned records.

use crate::application::config::BadgeConfig;
use crate::domain::codec::{
    BadgeAwardCodec, BadgeDefinitionCodec, ProfileBadgeListCodec, TagCodec,
};
use crate::domain::entities::{BadgeAward, BadgeDefinition, ProfileBadges};
use crate::domain::repository::{EventFilter, EventQuery};
use crate::domain::value_objects::{PROFILE_BADGES_SLUG, kinds};
use crate::error::BadgeResult;
use std::sync::Arc;

/// Award filter; unset fields do not narrow the result
#[derive(Debug, Clone, Default)]
pub struct AwardQuery {
    /// `30009:<issuer>:<slug>`
    pub badge_address: Option<String>,
    pub awarded_to: Option<String>,
    pub awarded_by: Option<String>,
    pub limit: Option<usize>,
}

/// Badge Queries
pub struct BadgeQueries<Q>
where
    Q: EventQuery,
{
    query: Arc<Q>,
    config: Arc<BadgeConfig>,
}

impl<Q> BadgeQueries<Q>
where
    Q: EventQuery,
{
    pub fn new(query: Arc<Q>, config: Arc<BadgeConfig>) -> Self {
        Self { query, config }
    }

    /// Latest definition at `30009:<pubkey>:<slug>`
    pub async fn definition(&self, pubkey: &str, slug: &str) -> BadgeResult<Option<BadgeDefinition>> {
        if pubkey.is_empty() || slug.is_empty() {
            return Ok(None);
        }

        let filter = EventFilter::kind(kinds::BADGE_DEFINITION)
            .author(pubkey)
            .identifier(slug)
            .limit(1);
        let events = self.query.query(&filter).await?;

        Ok(events.first().map(BadgeDefinitionCodec::decode))
    }

    /// Definitions, optionally restricted to one issuer
    pub async fn definitions(
        &self,
        author: Option<&str>,
        limit: Option<usize>,
    ) -> BadgeResult<Vec<BadgeDefinition>> {
        let mut filter = EventFilter::kind(kinds::BADGE_DEFINITION)
            .limit(limit.unwrap_or(self.config.query_limit));
        if let Some(author) = author.filter(|a| !a.is_empty()) {
            filter = filter.author(author);
        }

        let events = self.query.query(&filter).await?;
        tracing::debug!(count = events.len(), "Fetched badge definitions");

        Ok(events.iter().map(BadgeDefinitionCodec::decode).collect())
    }

    pub async fn awards(&self, query: &AwardQuery) -> BadgeResult<Vec<BadgeAward>> {
        let mut filter = EventFilter::kind(kinds::BADGE_AWARD)
            .limit(query.limit.unwrap_or(self.config.query_limit));
        if let Some(address) = query.badge_address.as_deref().filter(|a| !a.is_empty()) {
            filter = filter.address(address);
        }
        if let Some(recipient) = query.awarded_to.as_deref().filter(|p| !p.is_empty()) {
            filter = filter.pubkey(recipient);
        }
        if let Some(issuer) = query.awarded_by.as_deref().filter(|p| !p.is_empty()) {
            filter = filter.author(issuer);
        }

        let events = self.query.query(&filter).await?;
        tracing::debug!(count = events.len(), "Fetched badge awards");

        Ok(events.iter().map(BadgeAwardCodec::decode).collect())
    }

    /// Latest profile badge list of `pubkey`
    pub async fn profile_badges(&self, pubkey: &str) -> BadgeResult<Option<ProfileBadges>> {
        if pubkey.is_empty() {
            return Ok(None);
        }

        let filter = EventFilter::kind(kinds::PROFILE_BADGES)
            .author(pubkey)
            .identifier(PROFILE_BADGES_SLUG)
            .limit(1);
        let events = self.query.query(&filter).await?;

        Ok(events.first().map(ProfileBadgeListCodec::decode))
    }
}
