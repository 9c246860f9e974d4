//! The publication record as fetched from the off-chain store.

use std::collections::BTreeMap;

use alloy_primitives::{Address, Bytes, B256, U256};
use serde::{Deserialize, Serialize};

use crate::{serde_helpers::u256_lenient, LensVersion, PublicationKind};

/// An immutable claim that a DA publication happened.
///
/// The record is read-only for the whole pipeline run. `event` is kept as raw
/// JSON here and decoded per publication type by
/// [`PublicationEvent::decode`](crate::PublicationEvent::decode).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PublicationRecord {
    /// Content address of the bundle in the off-chain store.
    pub data_availability_id: String,

    #[serde(rename = "type")]
    pub kind: PublicationKind,

    pub version: LensVersion,

    /// Claimed `<profileId>-<pubId>-DA-<short>` identifier.
    pub publication_id: String,

    /// EIP-191 signature of the submitter over the bundle attestation.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub signature: Option<Bytes>,

    /// Event-shaped payload the publisher claims for this submission.
    pub event: serde_json::Value,

    pub chain_proofs: ChainProofs,

    pub timestamp_proofs: TimestampProof,
}

impl PublicationRecord {
    /// Block every chain query of this record is pinned to.
    pub fn block_number(&self) -> u64 {
        self.chain_proofs.this_publication.block_number
    }

    /// Location of the pointed bundle, if a pointer proof was supplied.
    pub fn pointer_location(&self) -> Option<&str> {
        self.chain_proofs
            .pointer
            .as_ref()
            .map(|p| p.location.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChainProofs {
    pub this_publication: PublicationChainProof,

    /// Present only when the pointed publication is itself a DA publication.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pointer: Option<PointerProof>,
}

/// Proof that the profile signed the action.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PublicationChainProof {
    pub typed_data: TypedDataEnvelope,

    /// 65 byte `r ++ s ++ v` signature over the typed data.
    pub signature: Bytes,

    pub signed_by_delegate: bool,

    pub block_number: u64,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub block_hash: Option<B256>,
}

/// EIP-712 payload exactly as the user signed it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TypedDataEnvelope {
    pub domain: TypedDataDomain,

    /// Struct definitions, keyed by type name.
    pub types: BTreeMap<String, Vec<TypedDataField>>,

    pub value: serde_json::Value,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TypedDataDomain {
    pub name: String,

    pub version: String,

    #[serde(with = "u256_lenient")]
    pub chain_id: U256,

    pub verifying_contract: Address,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TypedDataField {
    pub name: String,

    #[serde(rename = "type")]
    pub ty: String,
}

impl TypedDataField {
    pub fn new(name: impl Into<String>, ty: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ty: ty.into(),
        }
    }
}

/// Where the pointed publication lives.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum PointerKind {
    OnDa,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PointerProof {
    /// Data availability id of the pointed bundle.
    pub location: String,

    #[serde(rename = "type")]
    pub kind: PointerKind,
}

/// Third-party attestation of when, and for whom, the bundle was uploaded.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TimestampProof {
    #[serde(rename = "type")]
    pub kind: PublicationKind,

    pub version: LensVersion,

    pub data_availability_id: String,

    /// Uploader of the bundle as seen by the timestamp authority.
    pub submitter: Address,

    /// Attested upload time in milliseconds since the epoch.
    pub timestamp: u64,

    /// Authority signature, see the crypto crate for the signed layout.
    pub signature: Bytes,
}

impl TimestampProof {
    /// Attested time truncated to whole seconds.
    pub fn timestamp_secs(&self) -> u64 {
        self.timestamp / 1000
    }
}
