use alloy_primitives::U256;
use momoka_chain::ChainGateway;
use momoka_primitives::{
    publication_id_matches, ProofError, PublicationRecord, VerifiedFacts,
};
use tracing::*;

use crate::{PointerVerifier, PublicationVerifier};

/// Validates the pointer proof against where the pointed publication lives.
///
/// Returns the facts of the pointed DA publication when one had to be
/// verified. Failures of the pointed publication are returned unchanged,
/// except a pointed bundle missing from the store, which fails the pointer
/// rather than the id being checked.
pub async fn check_pointer(
    verifier: &dyn PublicationVerifier,
    record: &PublicationRecord,
    gateway: &dyn ChainGateway,
    pointers: &dyn PointerVerifier,
) -> Result<Option<VerifiedFacts>, ProofError> {
    let proof = record.chain_proofs.pointer.as_ref();

    let Some((profile_id, pub_id)) = verifier.signed_pointer() else {
        if proof.is_some() {
            debug!("pointer proof attached to a publication without pointer");
            return Err(ProofError::InvalidPointerSetNotNeeded);
        }
        return Ok(None);
    };

    let block = record.block_number();
    let on_chain = gateway
        .get_publication(block, profile_id, pub_id)
        .await
        .map_err(|e| {
            warn!(%block, error = %e, "failed to look up pointed publication");
            ProofError::DataCantBeReadFromNode
        })?;

    match (on_chain, proof) {
        (Some(_), None) => Ok(None),
        (Some(_), Some(_)) => {
            debug!(%profile_id, %pub_id, "pointed publication is on chain, proof not needed");
            Err(ProofError::InvalidPointerSetNotNeeded)
        }
        (None, None) => {
            debug!(%profile_id, %pub_id, "pointed publication is off chain, proof missing");
            Err(ProofError::PublicationNoPointer)
        }
        (None, Some(proof)) => {
            let facts = pointers
                .verify_pointer(&proof.location)
                .await
                .map_err(|e| match e {
                    ProofError::InvalidTxId => {
                        debug!(location = %proof.location, "pointed bundle not in store");
                        ProofError::PointerFailedVerification
                    }
                    e => e,
                })?;
            check_pointed_facts(&facts, profile_id, pub_id, block)?;
            Ok(Some(facts))
        }
    }
}

/// The verified pointer must be the pointed publication and must not be newer
/// than the publication pointing at it.
fn check_pointed_facts(
    facts: &VerifiedFacts,
    profile_id: U256,
    pub_id: U256,
    block: u64,
) -> Result<(), ProofError> {
    if !publication_id_matches(
        &facts.publication_id,
        profile_id,
        pub_id,
        &facts.data_availability_id,
    ) {
        debug!(pointer = %facts.publication_id, %profile_id, %pub_id, "pointer is another publication");
        return Err(ProofError::PointerFailedVerification);
    }
    if facts.block_number > block {
        debug!(pointer_block = facts.block_number, %block, "pointer is newer than publication");
        return Err(ProofError::PointerFailedVerification);
    }
    Ok(())
}
