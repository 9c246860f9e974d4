use alloy_primitives::{Address, Signature};
use momoka_chain::{SimulationRequest, SimulatorBackend, SimulatorError, TxPayload};
use momoka_primitives::{ProofError, PublicationRecord};
use tracing::*;

use crate::{PublicationVerifier, VerifierParams};

/// Builds the hub transaction the publication stands for.
pub fn build_payload(
    verifier: &dyn PublicationVerifier,
    record: &PublicationRecord,
    signer: Address,
    params: &VerifierParams,
) -> Result<TxPayload, ProofError> {
    let proof = &record.chain_proofs.this_publication;
    let signature =
        Signature::from_raw(&proof.signature).map_err(|_| ProofError::InvalidFormattedTypedData)?;

    Ok(TxPayload {
        to: params.hub(verifier.version()),
        from: signer,
        data: verifier.hub_calldata(signer, &signature),
        request: SimulationRequest {
            kind: verifier.kind(),
            version: verifier.version(),
            profile_id: verifier.signed_profile_id(),
            signer,
            nonce: verifier.nonce(),
            deadline: verifier.deadline(),
        },
    })
}

/// Replays the publication and checks it has the claimed effects.
///
/// Backend failures are retried up to the configured number of attempts and
/// then reported as [`ProofError::SimulationNodeCouldNotRun`].
pub async fn simulate_with_retry(
    verifier: &dyn PublicationVerifier,
    record: &PublicationRecord,
    signer: Address,
    params: &VerifierParams,
    simulator: &dyn SimulatorBackend,
) -> Result<(), ProofError> {
    let payload = build_payload(verifier, record, signer, params)?;
    let block = record.block_number();
    let policy = params.retry;
    let attempts = policy.max_attempts.max(1);

    let mut attempt = 0;
    let outcome = loop {
        attempt += 1;
        let res = tokio::time::timeout(policy.call_timeout, simulator.simulate(block, &payload))
            .await
            .unwrap_or(Err(SimulatorError::Timeout));

        match res {
            Ok(outcome) => break outcome,
            Err(e) if attempt < attempts => {
                warn!(%attempt, error = %e, "simulation could not run, retrying");
                tokio::time::sleep(policy.backoff).await;
            }
            Err(e) => {
                warn!(%attempt, error = %e, "simulation could not run, giving up");
                return Err(ProofError::SimulationNodeCouldNotRun);
            }
        }
    };

    if outcome.reverted {
        debug!(%block, "simulation reverted");
        return Err(ProofError::SimulationFailed);
    }

    let (profile_id, pub_id) = verifier.event_ids();
    match outcome.effects {
        Some(effects) if effects.profile_id == profile_id && effects.pub_id == pub_id => Ok(()),
        effects => {
            debug!(?effects, %profile_id, %pub_id, "simulation effects differ from event");
            Err(ProofError::SimulationFailed)
        }
    }
}
