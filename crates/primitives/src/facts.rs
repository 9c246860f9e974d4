use alloy_primitives::Address;
use serde::{Deserialize, Serialize};

use crate::{LensVersion, ProofError, PublicationKind};

/// Facts established by a successful verification.
///
/// Callers may rely on these without re-verifying them.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VerifiedFacts {
    pub publication_id: String,
    pub data_availability_id: String,
    #[serde(rename = "type")]
    pub kind: PublicationKind,
    pub version: LensVersion,
    /// Address recovered from the typed data signature.
    pub signer: Address,
    /// Owner of the profile at the proof block.
    pub profile_owner: Address,
    /// Signer acted as an approved executor rather than the owner.
    pub signed_by_delegate: bool,
    /// Address that uploaded the bundle.
    pub submitter: Address,
    pub block_number: u64,
    pub event_timestamp: u64,
    /// Data availability id of the verified pointed publication, if any.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pointer: Option<String>,
}

/// Terminal outcome of verifying one publication.
pub type ProofOutcome = Result<VerifiedFacts, ProofError>;
