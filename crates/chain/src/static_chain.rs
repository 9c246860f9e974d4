//! A frozen chain history that can be loaded from JSON and replayed.
//!
//! Profile state is stored as a list of snapshots, each effective from its
//! activation block until the next one. Simulation applies the same rules the
//! hub enforces for `*WithSig` calls.

use std::path::Path;

use alloy_primitives::{Address, U256};
use async_trait::async_trait;
use momoka_primitives::serde_helpers::u256_lenient;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::*;

use crate::{
    hub, BlockInfo, ChainGateway, GatewayError, OnChainPublication, ProfileSnapshot,
    SimulatedEffects, SimulationOutcome, SimulatorBackend, SimulatorError, TxPayload,
};

#[derive(Debug, Error)]
pub enum StaticChainError {
    #[error("io: {0}")]
    Io(#[from] std::io::Error),

    #[error("invalid chain file: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("blocks are not strictly increasing at block {0}")]
    UnorderedBlocks(u64),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BlockRecord {
    pub number: u64,
    pub timestamp: u64,
}

/// Profile state effective from `from_block` onwards.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProfileState {
    #[serde(with = "u256_lenient")]
    pub profile_id: U256,
    pub from_block: u64,
    pub owner: Address,
    #[serde(with = "u256_lenient")]
    pub nonce: U256,
    #[serde(with = "u256_lenient")]
    pub pub_count: U256,
    #[serde(default)]
    pub delegates: Vec<Address>,
}

/// A publication made natively on chain.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PublicationEntry {
    #[serde(with = "u256_lenient")]
    pub profile_id: U256,
    #[serde(with = "u256_lenient")]
    pub pub_id: U256,
    pub block_number: u64,
}

/// In-memory chain history serving both [`ChainGateway`] and
/// [`SimulatorBackend`].
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StaticChain {
    #[serde(default)]
    blocks: Vec<BlockRecord>,
    #[serde(default)]
    profiles: Vec<ProfileState>,
    #[serde(default)]
    publications: Vec<PublicationEntry>,
}

impl StaticChain {
    pub fn new(
        mut blocks: Vec<BlockRecord>,
        mut profiles: Vec<ProfileState>,
        publications: Vec<PublicationEntry>,
    ) -> Result<Self, StaticChainError> {
        blocks.sort_by_key(|b| b.number);
        if let Some(w) = blocks.windows(2).find(|w| w[0].number == w[1].number) {
            return Err(StaticChainError::UnorderedBlocks(w[1].number));
        }
        profiles.sort_by_key(|p| (p.profile_id, p.from_block));
        Ok(Self {
            blocks,
            profiles,
            publications,
        })
    }

    pub fn from_json_str(s: &str) -> Result<Self, StaticChainError> {
        let raw: Self = serde_json::from_str(s)?;
        Self::new(raw.blocks, raw.profiles, raw.publications)
    }

    pub async fn load(path: impl AsRef<Path>) -> Result<Self, StaticChainError> {
        let contents = tokio::fs::read_to_string(path).await?;
        Self::from_json_str(&contents)
    }

    pub fn block(&self, number: u64) -> Option<BlockInfo> {
        self.blocks
            .binary_search_by_key(&number, |b| b.number)
            .ok()
            .map(|i| BlockInfo {
                number,
                timestamp: self.blocks[i].timestamp,
            })
    }

    /// Latest profile state at or before `block`.
    fn profile_at(&self, block: u64, profile_id: U256) -> Option<&ProfileState> {
        self.profiles
            .iter()
            .rfind(|p| p.profile_id == profile_id && p.from_block <= block)
    }

    fn snapshot(&self, block: u64, profile_id: U256, candidate: Address) -> ProfileSnapshot {
        match self.profile_at(block, profile_id) {
            Some(state) => ProfileSnapshot {
                nonce: state.nonce,
                owner: state.owner,
                is_signer_approved_executor: state.delegates.contains(&candidate),
                current_publication_id: state.pub_count,
            },
            // Unknown profiles read as zeroed storage.
            None => ProfileSnapshot {
                nonce: U256::ZERO,
                owner: Address::ZERO,
                is_signer_approved_executor: false,
                current_publication_id: U256::ZERO,
            },
        }
    }

    fn replay(&self, block: u64, payload: &TxPayload) -> SimulationOutcome {
        let req = &payload.request;

        let Some(header) = self.block(block) else {
            debug!(%block, "simulating against unknown block");
            return SimulationOutcome::reverted();
        };

        let selector = hub::selector(req.kind, req.version);
        if selector.as_ref().map(|s| s.as_slice()) != payload.data.get(..4) {
            debug!(kind = %req.kind, version = %req.version, "unexpected hub entry point");
            return SimulationOutcome::reverted();
        }

        let snapshot = self.snapshot(block, req.profile_id, req.signer);
        if snapshot.owner == Address::ZERO {
            debug!(profile_id = %req.profile_id, "profile does not exist");
            return SimulationOutcome::reverted();
        }
        if snapshot.owner != req.signer && !snapshot.is_signer_approved_executor {
            debug!(signer = %req.signer, owner = %snapshot.owner, "signer may not act for profile");
            return SimulationOutcome::reverted();
        }
        if snapshot.nonce != req.nonce {
            debug!(expected = %snapshot.nonce, got = %req.nonce, "nonce mismatch");
            return SimulationOutcome::reverted();
        }
        if req.deadline < U256::from(header.timestamp) {
            debug!(deadline = %req.deadline, "signature expired");
            return SimulationOutcome::reverted();
        }

        SimulationOutcome::succeeded(SimulatedEffects {
            profile_id: req.profile_id,
            pub_id: snapshot.current_publication_id.saturating_add(U256::from(1)),
        })
    }
}

#[async_trait]
impl ChainGateway for StaticChain {
    async fn get_block(&self, number: u64) -> Result<Option<BlockInfo>, GatewayError> {
        Ok(self.block(number))
    }

    async fn get_profile_snapshot(
        &self,
        block: u64,
        profile_id: U256,
        candidate: Address,
    ) -> Result<ProfileSnapshot, GatewayError> {
        Ok(self.snapshot(block, profile_id, candidate))
    }

    async fn get_publication_counter(
        &self,
        block: u64,
        profile_id: U256,
    ) -> Result<U256, GatewayError> {
        Ok(self
            .profile_at(block, profile_id)
            .map(|p| p.pub_count)
            .unwrap_or_default())
    }

    async fn get_publication(
        &self,
        block: u64,
        profile_id: U256,
        pub_id: U256,
    ) -> Result<Option<OnChainPublication>, GatewayError> {
        Ok(self
            .publications
            .iter()
            .find(|p| p.profile_id == profile_id && p.pub_id == pub_id && p.block_number <= block)
            .map(|p| OnChainPublication {
                profile_id: p.profile_id,
                pub_id: p.pub_id,
                block_number: p.block_number,
            }))
    }
}

#[async_trait]
impl SimulatorBackend for StaticChain {
    async fn simulate(
        &self,
        block: u64,
        payload: &TxPayload,
    ) -> Result<SimulationOutcome, SimulatorError> {
        Ok(self.replay(block, payload))
    }
}

#[cfg(test)]
mod tests {
    use alloy_primitives::{Bytes, Signature};
    use momoka_primitives::{typed_values::v2::PostValue, LensVersion, PublicationKind};

    use super::*;
    use crate::SimulationRequest;

    const OWNER: Address = Address::repeat_byte(0x11);
    const DELEGATE: Address = Address::repeat_byte(0x22);
    const STRANGER: Address = Address::repeat_byte(0x33);

    fn chain() -> StaticChain {
        StaticChain::from_json_str(
            r#"{
                "blocks": [
                    {"number": 12, "timestamp": 1200},
                    {"number": 10, "timestamp": 1000},
                    {"number": 11, "timestamp": 1100}
                ],
                "profiles": [
                    {"profileId": "0x01", "fromBlock": 11, "owner": "0x1111111111111111111111111111111111111111",
                     "nonce": 4, "pubCount": "0x06", "delegates": ["0x2222222222222222222222222222222222222222"]},
                    {"profileId": "0x01", "fromBlock": 0, "owner": "0x1111111111111111111111111111111111111111",
                     "nonce": 3, "pubCount": 5}
                ],
                "publications": [
                    {"profileId": "0x01", "pubId": "0x05", "blockNumber": 10}
                ]
            }"#,
        )
        .unwrap()
    }

    fn payload(signer: Address, nonce: u64, deadline: u64) -> TxPayload {
        let value = PostValue {
            profile_id: U256::from(1),
            content_uri: "ar://x".to_owned(),
            action_modules: vec![],
            action_modules_init_datas: vec![],
            reference_module: Address::ZERO,
            reference_module_init_data: Bytes::new(),
            nonce: U256::from(nonce),
            deadline: U256::from(deadline),
        };
        let sig = Signature::new(U256::from(1), U256::from(1), false);
        TxPayload {
            to: Address::repeat_byte(0xaa),
            from: signer,
            data: hub::v2::post_with_sig(&value, signer, &sig),
            request: SimulationRequest {
                kind: PublicationKind::Post,
                version: LensVersion::V2,
                profile_id: U256::from(1),
                signer,
                nonce: U256::from(nonce),
                deadline: U256::from(deadline),
            },
        }
    }

    #[tokio::test]
    async fn test_profile_state_is_pinned_to_block() {
        let chain = chain();
        let at_10 = chain
            .get_profile_snapshot(10, U256::from(1), DELEGATE)
            .await
            .unwrap();
        assert_eq!(at_10.nonce, U256::from(3));
        assert!(!at_10.is_signer_approved_executor);

        let at_12 = chain
            .get_profile_snapshot(12, U256::from(1), DELEGATE)
            .await
            .unwrap();
        assert_eq!(at_12.nonce, U256::from(4));
        assert!(at_12.is_signer_approved_executor);
        assert_eq!(at_12.current_publication_id, U256::from(6));
    }

    #[tokio::test]
    async fn test_blocks_are_sorted_on_load() {
        let chain = chain();
        assert_eq!(chain.get_block(11).await.unwrap().unwrap().timestamp, 1100);
        assert!(chain.get_block(13).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_publication_visible_only_after_inclusion() {
        let chain = chain();
        let id = (U256::from(1), U256::from(5));
        assert!(chain.get_publication(9, id.0, id.1).await.unwrap().is_none());
        assert!(chain.get_publication(10, id.0, id.1).await.unwrap().is_some());
    }

    #[tokio::test]
    async fn test_simulation_rules() {
        let chain = chain();

        let ok = chain.simulate(10, &payload(OWNER, 3, 5000)).await.unwrap();
        assert_eq!(
            ok.effects,
            Some(SimulatedEffects {
                profile_id: U256::from(1),
                pub_id: U256::from(6)
            })
        );

        let delegate = chain.simulate(11, &payload(DELEGATE, 4, 5000)).await.unwrap();
        assert!(!delegate.reverted);

        let stranger = chain.simulate(11, &payload(STRANGER, 4, 5000)).await.unwrap();
        assert!(stranger.reverted);

        let stale_nonce = chain.simulate(11, &payload(OWNER, 3, 5000)).await.unwrap();
        assert!(stale_nonce.reverted);

        let expired = chain.simulate(10, &payload(OWNER, 3, 999)).await.unwrap();
        assert!(expired.reverted);
    }

    #[test]
    fn test_duplicate_blocks_rejected() {
        let err = StaticChain::from_json_str(
            r#"{"blocks": [{"number": 1, "timestamp": 1}, {"number": 1, "timestamp": 2}]}"#,
        )
        .unwrap_err();
        assert!(matches!(err, StaticChainError::UnorderedBlocks(1)));
    }
}
