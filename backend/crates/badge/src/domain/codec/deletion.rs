//! Deletion request codec (kind 5)

use super::TagCodec;
use crate::domain::entities::{DeletionRequest, Event};
use crate::domain::tag::{RawTag, Tag};
use crate::domain::value_objects::kinds;

pub struct DeletionRequestCodec;

impl TagCodec for DeletionRequestCodec {
    type Entity = DeletionRequest;

    const KIND: u32 = kinds::DELETION;

    fn decode(event: &Event) -> DeletionRequest {
        let addresses = event
            .tags
            .iter()
            .filter_map(|raw| match Tag::from(raw) {
                Tag::Address { address, .. } => Some(address),
                _ => None,
            })
            .collect();

        DeletionRequest {
            id: event.id.clone(),
            pubkey: event.pubkey.clone(),
            addresses,
            reason: event.content.clone(),
        }
    }

    fn encode(request: &DeletionRequest) -> Vec<RawTag> {
        request
            .addresses
            .iter()
            .map(|address| {
                RawTag::from(Tag::Address {
                    address: address.clone(),
                    relay: None,
                })
            })
            .collect()
    }

    fn content(request: &DeletionRequest) -> String {
        request.reason.clone()
    }
}
