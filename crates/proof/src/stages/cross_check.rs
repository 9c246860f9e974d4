use alloy_primitives::Address;
use momoka_chain::ChainGateway;
use momoka_primitives::{ProofError, PublicationRecord};
use tracing::*;

use crate::PublicationVerifier;

/// Checks the event against the signed typed data and the profile's
/// publication counter, then the claimed publication id against the event.
pub async fn check_event(
    verifier: &dyn PublicationVerifier,
    record: &PublicationRecord,
    signer: Address,
    gateway: &dyn ChainGateway,
) -> Result<(), ProofError> {
    let block = record.block_number();
    let profile_id = verifier.signed_profile_id();
    let counter = gateway
        .get_publication_counter(block, profile_id)
        .await
        .map_err(|e| {
            warn!(%block, %profile_id, error = %e, "failed to read publication counter");
            ProofError::DataCantBeReadFromNode
        })?;

    verifier.verify_event_with_typed_data(signer, counter)?;
    verifier.verify_publication_id_matches(record)
}
