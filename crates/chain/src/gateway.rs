use alloy_primitives::{Address, U256};
use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::GatewayError;

/// Header data of a block.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct BlockInfo {
    pub number: u64,
    /// Seconds since the epoch.
    pub timestamp: u64,
}

/// Profile state as of one historical block.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProfileSnapshot {
    /// Signature nonce of the profile owner.
    pub nonce: U256,
    pub owner: Address,
    /// Whether the queried candidate may act for the owner.
    pub is_signer_approved_executor: bool,
    /// Number of publications the profile had made.
    pub current_publication_id: U256,
}

/// A publication that lives natively on chain.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct OnChainPublication {
    pub profile_id: U256,
    pub pub_id: U256,
    pub block_number: u64,
}

/// Read-only access to hub state at a given block.
///
/// Implementations must be safe to share between concurrently running
/// verifications. Every query takes the block explicitly; there is no notion
/// of "latest" here.
#[cfg_attr(feature = "test-utils", mockall::automock)]
#[async_trait]
pub trait ChainGateway: Send + Sync {
    /// Returns the block with this number, or `None` if it does not exist yet.
    async fn get_block(&self, number: u64) -> Result<Option<BlockInfo>, GatewayError>;

    /// Reads the profile state, evaluating delegate approval for `candidate`.
    async fn get_profile_snapshot(
        &self,
        block: u64,
        profile_id: U256,
        candidate: Address,
    ) -> Result<ProfileSnapshot, GatewayError>;

    /// Reads the publication counter of the profile.
    async fn get_publication_counter(
        &self,
        block: u64,
        profile_id: U256,
    ) -> Result<U256, GatewayError>;

    /// Looks up an on-chain publication, `None` if the hub does not know it.
    async fn get_publication(
        &self,
        block: u64,
        profile_id: U256,
        pub_id: U256,
    ) -> Result<Option<OnChainPublication>, GatewayError>;
}
