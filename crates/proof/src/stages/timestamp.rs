use alloy_primitives::{Address, U256};
use momoka_chain::{BlockInfo, ChainGateway};
use momoka_crypto::{recover_submitter, recover_timestamp_authority, AttestationError};
use momoka_primitives::{ProofError, PublicationRecord};
use tracing::*;

use crate::{PublicationVerifier, VerifierParams};

/// Checks who uploaded the bundle, that a trusted authority saw the upload,
/// and that the claimed block is the one the upload time points at.
///
/// Returns the whitelisted submitter.
pub async fn check_timestamp(
    verifier: &dyn PublicationVerifier,
    record: &PublicationRecord,
    params: &VerifierParams,
    gateway: &dyn ChainGateway,
) -> Result<Address, ProofError> {
    let submitter = check_submitter(record, params)?;
    let proof = &record.timestamp_proofs;

    let authority = recover_timestamp_authority(proof).map_err(|e| {
        debug!(error = %e, "timestamp proof signature does not recover");
        ProofError::TimestampProofInvalidSignature
    })?;
    if !params.is_timestamp_authority(&authority) {
        debug!(%authority, "timestamp proof not signed by a trusted authority");
        return Err(ProofError::TimestampProofInvalidSignature);
    }

    if proof.kind != record.kind || proof.version != record.version {
        debug!(proof_type = %proof.kind, proof_version = %proof.version, "timestamp proof is for another type");
        return Err(ProofError::TimestampProofInvalidType);
    }
    if proof.data_availability_id != record.data_availability_id {
        debug!(proof_da_id = %proof.data_availability_id, "timestamp proof is for another bundle");
        return Err(ProofError::TimestampProofInvalidDaId);
    }
    if proof.submitter != submitter {
        debug!(attested = %proof.submitter, %submitter, "timestamp proof is for another submitter");
        return Err(ProofError::TimestampProofNotSubmitter);
    }

    let number = record.block_number();
    let block = read_block(gateway, number)
        .await?
        .ok_or(ProofError::BlockCantBeReadFromNode)?;

    let attested = proof.timestamp_secs();
    let event_ts = verifier.event_timestamp();
    if event_ts != block.timestamp {
        debug!(%event_ts, block_ts = block.timestamp, "event timestamp is not the block timestamp");
        return Err(ProofError::InvalidEventTimestamp);
    }
    let latest = block
        .timestamp
        .saturating_add(params.timestamp.max_event_drift_secs);
    if attested < block.timestamp || attested > latest {
        debug!(%attested, block_ts = block.timestamp, "attested time outside tolerance");
        return Err(ProofError::InvalidEventTimestamp);
    }

    if params.timestamp.enforce_closest_block {
        let next = read_block(gateway, number.saturating_add(1)).await?;
        if let Some(next) = next.filter(|next| next.timestamp <= attested) {
            debug!(next = next.number, next_ts = next.timestamp, %attested, "a later block is closer");
            return Err(ProofError::NotClosestBlock);
        }
    }

    if verifier.deadline() < U256::from(block.timestamp) {
        debug!(deadline = %verifier.deadline(), block_ts = block.timestamp, "typed data expired");
        return Err(ProofError::InvalidTypedDataDeadlineTimestamp);
    }

    Ok(submitter)
}

/// Recovers the bundle submitter and checks it is whitelisted.
fn check_submitter(
    record: &PublicationRecord,
    params: &VerifierParams,
) -> Result<Address, ProofError> {
    let submitter = recover_submitter(record).map_err(|e| match e {
        AttestationError::Missing => ProofError::NoSignatureSubmitter,
        AttestationError::InvalidSignature(e) => {
            debug!(error = %e, "submitter signature does not recover");
            ProofError::InvalidSignatureSubmitter
        }
    })?;

    if !params.is_submitter(&submitter) {
        debug!(%submitter, "bundle not uploaded by a known submitter");
        return Err(ProofError::InvalidSignatureSubmitter);
    }
    Ok(submitter)
}

async fn read_block(
    gateway: &dyn ChainGateway,
    number: u64,
) -> Result<Option<BlockInfo>, ProofError> {
    gateway.get_block(number).await.map_err(|e| {
        warn!(block = number, error = %e, "failed to read block");
        ProofError::BlockCantBeReadFromNode
    })
}
