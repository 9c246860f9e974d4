use alloy_primitives::Address;
use momoka_chain::ChainGateway;
use momoka_primitives::{ProofError, PublicationRecord};
use tracing::*;

use crate::PublicationVerifier;

/// Who the signer acted as.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Authorization {
    pub profile_owner: Address,
    /// Signer is an approved executor rather than the owner.
    pub via_delegate: bool,
}

/// Checks the signed nonce and the signer's authority over the profile.
///
/// Both conditions are evaluated against the same snapshot; a stale nonce is
/// reported before a missing authority.
pub async fn check_authorization(
    verifier: &dyn PublicationVerifier,
    record: &PublicationRecord,
    signer: Address,
    gateway: &dyn ChainGateway,
) -> Result<Authorization, ProofError> {
    let block = record.block_number();
    let profile_id = verifier.signed_profile_id();
    let snapshot = gateway
        .get_profile_snapshot(block, profile_id, signer)
        .await
        .map_err(|e| {
            warn!(%block, %profile_id, error = %e, "failed to read profile");
            ProofError::DataCantBeReadFromNode
        })?;

    let nonce_ok = snapshot.nonce == verifier.nonce();
    let is_owner = snapshot.owner == signer;
    let authority_ok = is_owner || snapshot.is_signer_approved_executor;

    if !nonce_ok {
        debug!(expected = %snapshot.nonce, signed = %verifier.nonce(), authority_ok, "nonce mismatch");
        return Err(ProofError::PublicationNonceInvalid);
    }
    if !authority_ok {
        debug!(%signer, owner = %snapshot.owner, "signer may not act for profile");
        return Err(ProofError::PublicationSignerNotAllowed);
    }

    Ok(Authorization {
        profile_owner: snapshot.owner,
        via_delegate: !is_owner,
    })
}
