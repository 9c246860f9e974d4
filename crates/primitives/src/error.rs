//! The closed taxonomy of verification failures.

use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Every reason a publication proof can be rejected.
///
/// Identifiers are stable across processes: [`ProofError::code`] and the serde
/// representation both use the SCREAMING_SNAKE_CASE form, so two verifiers can
/// compare outcomes byte for byte.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Error, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ProofError {
    /// The bundle carries no submitter signature.
    #[error("bundle has no submitter signature")]
    NoSignatureSubmitter,

    /// The submitter signature does not recover to a whitelisted submitter.
    #[error("submitter signature is invalid or not from a known submitter")]
    InvalidSignatureSubmitter,

    /// The timestamp attestation signature is not valid for a trusted authority.
    #[error("timestamp proof signature is invalid")]
    TimestampProofInvalidSignature,

    /// The timestamp attestation is for a different publication type.
    #[error("timestamp proof type does not match the publication")]
    TimestampProofInvalidType,

    /// The timestamp attestation is for a different bundle.
    #[error("timestamp proof data availability id does not match")]
    TimestampProofInvalidDaId,

    /// The attested uploader is not the submitter of the bundle.
    #[error("timestamp proof was not produced for the bundle submitter")]
    TimestampProofNotSubmitter,

    /// The event timestamp is inconsistent with the block or the attestation.
    #[error("event timestamp is inconsistent with the attested time")]
    InvalidEventTimestamp,

    /// The typed data deadline expired before the claimed block.
    #[error("typed data deadline is before the block timestamp")]
    InvalidTypedDataDeadlineTimestamp,

    /// The claimed block is not the latest block at the attested time.
    #[error("claimed block is not the closest block to the attested time")]
    NotClosestBlock,

    /// A pointer proof was supplied for an on-chain native publication.
    #[error("pointer proof supplied where none is needed")]
    InvalidPointerSetNotNeeded,

    /// The pointed publication lives off-chain but no pointer proof was supplied.
    #[error("pointer proof required but missing")]
    PublicationNoPointer,

    /// The pointer proof does not describe the pointed publication.
    #[error("pointer proof does not match the pointed publication")]
    PointerFailedVerification,

    /// The replayed transaction reverted or had different effects.
    #[error("transaction simulation failed")]
    SimulationFailed,

    /// The simulation backend could not run the transaction.
    #[error("simulation node could not run the transaction")]
    SimulationNodeCouldNotRun,

    /// The typed data cannot be hashed or the signature cannot be recovered.
    #[error("typed data is not correctly formatted")]
    InvalidFormattedTypedData,

    /// The on-chain event fields disagree with the signed typed data.
    #[error("event does not match the signed typed data")]
    EventMismatch,

    /// The derived publication id differs from the claimed one.
    #[error("generated publication id does not match the claimed one")]
    GeneratedPublicationIdMismatch,

    /// The signed nonce differs from the profile nonce at the claimed block.
    #[error("publication nonce is invalid")]
    PublicationNonceInvalid,

    /// The signer is neither the owner nor an approved delegated executor.
    #[error("publication signer is not allowed to act for the profile")]
    PublicationSignerNotAllowed,

    /// The store holds no record for the requested id.
    #[error("no publication found for the transaction id")]
    InvalidTxId,

    /// The chain node could not return the claimed block.
    #[error("block could not be read from the node")]
    BlockCantBeReadFromNode,

    /// The chain node could not answer a state query.
    #[error("data could not be read from the node")]
    DataCantBeReadFromNode,

    /// The publication store could not be reached.
    #[error("cannot connect to the publication store")]
    CannotConnectToStore,

    /// Defensive fallback, including pointer cycles.
    #[error("unknown verification failure")]
    Unknown,
}

/// Every [`ProofError`], in declaration order.
pub const ALL_PROOF_ERRORS: [ProofError; 24] = [
    ProofError::NoSignatureSubmitter,
    ProofError::InvalidSignatureSubmitter,
    ProofError::TimestampProofInvalidSignature,
    ProofError::TimestampProofInvalidType,
    ProofError::TimestampProofInvalidDaId,
    ProofError::TimestampProofNotSubmitter,
    ProofError::InvalidEventTimestamp,
    ProofError::InvalidTypedDataDeadlineTimestamp,
    ProofError::NotClosestBlock,
    ProofError::InvalidPointerSetNotNeeded,
    ProofError::PublicationNoPointer,
    ProofError::PointerFailedVerification,
    ProofError::SimulationFailed,
    ProofError::SimulationNodeCouldNotRun,
    ProofError::InvalidFormattedTypedData,
    ProofError::EventMismatch,
    ProofError::GeneratedPublicationIdMismatch,
    ProofError::PublicationNonceInvalid,
    ProofError::PublicationSignerNotAllowed,
    ProofError::InvalidTxId,
    ProofError::BlockCantBeReadFromNode,
    ProofError::DataCantBeReadFromNode,
    ProofError::CannotConnectToStore,
    ProofError::Unknown,
];

impl ProofError {
    /// Stable identifier used for cross-system agreement.
    pub const fn code(&self) -> &'static str {
        match self {
            Self::NoSignatureSubmitter => "NO_SIGNATURE_SUBMITTER",
            Self::InvalidSignatureSubmitter => "INVALID_SIGNATURE_SUBMITTER",
            Self::TimestampProofInvalidSignature => "TIMESTAMP_PROOF_INVALID_SIGNATURE",
            Self::TimestampProofInvalidType => "TIMESTAMP_PROOF_INVALID_TYPE",
            Self::TimestampProofInvalidDaId => "TIMESTAMP_PROOF_INVALID_DA_ID",
            Self::TimestampProofNotSubmitter => "TIMESTAMP_PROOF_NOT_SUBMITTER",
            Self::InvalidEventTimestamp => "INVALID_EVENT_TIMESTAMP",
            Self::InvalidTypedDataDeadlineTimestamp => "INVALID_TYPED_DATA_DEADLINE_TIMESTAMP",
            Self::NotClosestBlock => "NOT_CLOSEST_BLOCK",
            Self::InvalidPointerSetNotNeeded => "INVALID_POINTER_SET_NOT_NEEDED",
            Self::PublicationNoPointer => "PUBLICATION_NO_POINTER",
            Self::PointerFailedVerification => "POINTER_FAILED_VERIFICATION",
            Self::SimulationFailed => "SIMULATION_FAILED",
            Self::SimulationNodeCouldNotRun => "SIMULATION_NODE_COULD_NOT_RUN",
            Self::InvalidFormattedTypedData => "INVALID_FORMATTED_TYPED_DATA",
            Self::EventMismatch => "EVENT_MISMATCH",
            Self::GeneratedPublicationIdMismatch => "GENERATED_PUBLICATION_ID_MISMATCH",
            Self::PublicationNonceInvalid => "PUBLICATION_NONCE_INVALID",
            Self::PublicationSignerNotAllowed => "PUBLICATION_SIGNER_NOT_ALLOWED",
            Self::InvalidTxId => "INVALID_TX_ID",
            Self::BlockCantBeReadFromNode => "BLOCK_CANT_BE_READ_FROM_NODE",
            Self::DataCantBeReadFromNode => "DATA_CANT_BE_READ_FROM_NODE",
            Self::CannotConnectToStore => "CANNOT_CONNECT_TO_STORE",
            Self::Unknown => "UNKNOWN",
        }
    }

    /// Returns `true` for infrastructure failures.
    ///
    /// Transient outcomes say nothing about the publication itself; they must be
    /// retried and are never persisted as terminal results.
    pub const fn is_transient(&self) -> bool {
        matches!(
            self,
            Self::SimulationNodeCouldNotRun
                | Self::BlockCantBeReadFromNode
                | Self::DataCantBeReadFromNode
                | Self::CannotConnectToStore
        )
    }
}

/// Error returned when parsing an unrecognised error code.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown proof error code: {0}")]
pub struct UnknownErrorCode(pub String);

impl FromStr for ProofError {
    type Err = UnknownErrorCode;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        ALL_PROOF_ERRORS
            .iter()
            .find(|e| e.code() == s)
            .copied()
            .ok_or_else(|| UnknownErrorCode(s.to_owned()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_codes_round_trip_through_from_str() {
        for err in ALL_PROOF_ERRORS {
            assert_eq!(err.code().parse::<ProofError>().unwrap(), err);
        }
    }

    #[test]
    fn test_serde_uses_code() {
        for err in ALL_PROOF_ERRORS {
            let json = serde_json::to_string(&err).unwrap();
            assert_eq!(json, format!("\"{}\"", err.code()));
        }
    }

    #[test]
    fn test_only_infrastructure_errors_are_transient() {
        let transient: Vec<_> = ALL_PROOF_ERRORS
            .iter()
            .filter(|e| e.is_transient())
            .copied()
            .collect();
        assert_eq!(
            transient,
            vec![
                ProofError::SimulationNodeCouldNotRun,
                ProofError::BlockCantBeReadFromNode,
                ProofError::DataCantBeReadFromNode,
                ProofError::CannotConnectToStore,
            ]
        );
    }

    #[test]
    fn test_unknown_code_is_rejected() {
        assert!("NOT_A_CODE".parse::<ProofError>().is_err());
    }
}
