use alloy_primitives::Address;
use momoka_primitives::{ProofError, PublicationRecord, HUB_DOMAIN_NAME};
use tracing::*;

use crate::{PublicationVerifier, VerifierParams};

/// Recovers the typed data signer after checking the signing domain is the
/// hub's, on the configured chain and for the publication's version.
pub fn recover_signer(
    verifier: &dyn PublicationVerifier,
    record: &PublicationRecord,
    params: &VerifierParams,
) -> Result<Address, ProofError> {
    let proof = &record.chain_proofs.this_publication;
    let domain = &proof.typed_data.domain;

    let version = verifier.version();
    if domain.name != HUB_DOMAIN_NAME || domain.version != version.domain_version() {
        debug!(name = %domain.name, version = %domain.version, "typed data signed for another domain");
        return Err(ProofError::InvalidFormattedTypedData);
    }
    if domain.chain_id != params.chain_id_u256() {
        debug!(chain_id = %domain.chain_id, "typed data signed for another chain");
        return Err(ProofError::InvalidFormattedTypedData);
    }
    let hub = params.hub(version);
    if domain.verifying_contract != hub {
        debug!(contract = %domain.verifying_contract, %hub, "typed data signed for another contract");
        return Err(ProofError::InvalidFormattedTypedData);
    }

    verifier.verify_signer(proof)
}
