use momoka_chain::{ChainGateway, SimulatorBackend};
use momoka_primitives::{ProofError, ProofOutcome, PublicationRecord, VerifiedFacts};
use tracing::*;

use crate::{stages, DaPublication, PointerVerifier, VerificationState, VerifierParams};

/// Drives one record through the verification stages.
pub(crate) struct Pipeline<'a> {
    record: &'a PublicationRecord,
    params: &'a VerifierParams,
    gateway: &'a dyn ChainGateway,
    simulator: &'a dyn SimulatorBackend,
    pointers: &'a dyn PointerVerifier,
    state: VerificationState,
}

impl<'a> Pipeline<'a> {
    pub(crate) fn new(
        record: &'a PublicationRecord,
        params: &'a VerifierParams,
        gateway: &'a dyn ChainGateway,
        simulator: &'a dyn SimulatorBackend,
        pointers: &'a dyn PointerVerifier,
    ) -> Self {
        Self {
            record,
            params,
            gateway,
            simulator,
            pointers,
            state: VerificationState::Pending,
        }
    }

    pub(crate) fn state(&self) -> VerificationState {
        self.state
    }

    fn advance(&mut self, to: VerificationState) {
        debug_assert!(self.state.can_transition_to(&to), "{} -> {to}", self.state);
        trace!(from = %self.state, %to, "stage transition");
        self.state = to;
    }

    /// Runs to a terminal state and returns the outcome.
    pub(crate) async fn run(&mut self) -> ProofOutcome {
        let res = self.run_stages().await;
        match &res {
            Ok(facts) => {
                self.advance(VerificationState::Accepted);
                info!(publication_id = %facts.publication_id, "publication accepted");
            }
            Err(e) => {
                let stage = self.state;
                self.advance(VerificationState::Rejected(*e));
                warn!(%stage, reason = %e.code(), "publication rejected");
            }
        }
        res
    }

    async fn run_stages(&mut self) -> Result<VerifiedFacts, ProofError> {
        let (record, params) = (self.record, self.params);
        let publication = DaPublication::load(record)?;
        let verifier = publication.verifier();

        let pointer = stages::check_pointer(verifier, record, self.gateway, self.pointers).await?;
        self.advance(VerificationState::PointerChecked);

        let submitter = stages::check_timestamp(verifier, record, params, self.gateway).await?;
        self.advance(VerificationState::TimestampChecked);

        let signer = stages::recover_signer(verifier, record, params)?;
        self.advance(VerificationState::SignatureRecovered);
        debug!(%signer, "recovered typed data signer");

        let auth = stages::check_authorization(verifier, record, signer, self.gateway).await?;
        self.advance(VerificationState::Authorized);
        let claimed_delegate = record.chain_proofs.this_publication.signed_by_delegate;
        if claimed_delegate != auth.via_delegate {
            debug!(
                claimed_delegate,
                via_delegate = auth.via_delegate,
                "delegate flag does not match signer"
            );
        }

        stages::check_event(verifier, record, signer, self.gateway).await?;
        self.advance(VerificationState::EventCrossChecked);

        stages::simulate_with_retry(verifier, record, signer, params, self.simulator).await?;
        self.advance(VerificationState::Simulated);

        Ok(VerifiedFacts {
            publication_id: record.publication_id.clone(),
            data_availability_id: record.data_availability_id.clone(),
            kind: verifier.kind(),
            version: verifier.version(),
            signer,
            profile_owner: auth.profile_owner,
            signed_by_delegate: auth.via_delegate,
            submitter,
            block_number: record.block_number(),
            event_timestamp: verifier.event_timestamp(),
            pointer: pointer.map(|p| p.data_availability_id),
        })
    }
}
