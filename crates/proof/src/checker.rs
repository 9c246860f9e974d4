use std::sync::Arc;

use async_trait::async_trait;
use futures::{
    future::BoxFuture,
    stream::{self, StreamExt},
    FutureExt,
};
use momoka_chain::{ChainGateway, SimulatorBackend};
use momoka_primitives::{ProofError, ProofOutcome, PublicationRecord};
use tracing::*;

use crate::{
    pipeline::Pipeline, PointerVerifier, PublicationStore, ResultCache, StoreError,
    VerifierParams,
};

/// Entry point of the verification pipeline.
///
/// Collaborators are constructed once and shared by every verification.
/// Independent publications can be checked concurrently on the same checker.
#[derive(Clone)]
pub struct DaProofChecker {
    store: Arc<dyn PublicationStore>,
    cache: Arc<dyn ResultCache>,
    gateway: Arc<dyn ChainGateway>,
    simulator: Arc<dyn SimulatorBackend>,
    params: Arc<VerifierParams>,
}

impl std::fmt::Debug for DaProofChecker {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DaProofChecker")
            .field("params", &self.params)
            .finish_non_exhaustive()
    }
}

impl DaProofChecker {
    pub fn new(
        store: Arc<dyn PublicationStore>,
        cache: Arc<dyn ResultCache>,
        gateway: Arc<dyn ChainGateway>,
        simulator: Arc<dyn SimulatorBackend>,
        params: VerifierParams,
    ) -> Self {
        Self {
            store,
            cache,
            gateway,
            simulator,
            params: Arc::new(params),
        }
    }

    pub fn params(&self) -> &VerifierParams {
        &self.params
    }

    /// Verifies the publication stored under `tx_id`.
    ///
    /// A terminal outcome already in the cache is returned as is, without
    /// touching the chain. Fresh permanent outcomes are written back to the
    /// cache; transient ones never are.
    pub async fn check_da_proof(&self, tx_id: &str) -> ProofOutcome {
        self.check_with_trail(tx_id, Vec::new()).await
    }

    /// Verifies many publications, at most `concurrency` at a time.
    ///
    /// Outcomes are returned in completion order, paired with their id.
    pub async fn check_da_proofs<I>(&self, tx_ids: I) -> Vec<(String, ProofOutcome)>
    where
        I: IntoIterator<Item = String>,
    {
        let limit = self.params.concurrency.max(1);
        stream::iter(tx_ids)
            .map(|tx_id| async move {
                let outcome = self.check_da_proof(&tx_id).await;
                (tx_id, outcome)
            })
            .buffer_unordered(limit)
            .collect()
            .await
    }

    /// Verifies a record directly, bypassing the store and the cache for it.
    ///
    /// Pointed publications are still resolved through the store.
    pub async fn verify_record(&self, record: &PublicationRecord) -> ProofOutcome {
        let trail = vec![record.data_availability_id.clone()];
        self.run_pipeline(record, trail).await
    }

    fn check_with_trail<'a>(
        &'a self,
        tx_id: &'a str,
        trail: Vec<String>,
    ) -> BoxFuture<'a, ProofOutcome> {
        let span = info_span!("check_da_proof", %tx_id, depth = trail.len());
        async move {
            if trail.iter().any(|seen| seen == tx_id) {
                error!(?trail, "pointer cycle detected");
                return Err(ProofError::Unknown);
            }

            match self.cache.get(tx_id).await {
                Ok(Some(outcome)) => {
                    debug!("returning cached outcome");
                    return outcome;
                }
                Ok(None) => {}
                Err(e) => warn!(error = %e, "result cache lookup failed"),
            }

            let outcome = match self.load_record(tx_id).await {
                Ok(record) => {
                    let mut trail = trail;
                    trail.push(tx_id.to_owned());
                    self.run_pipeline(&record, trail).await
                }
                Err(e) => Err(e),
            };

            match &outcome {
                Err(e) if e.is_transient() => {
                    debug!(reason = %e.code(), "not caching transient outcome");
                }
                _ => {
                    if let Err(e) = self.cache.put(tx_id, outcome.clone()).await {
                        warn!(error = %e, "failed to cache outcome");
                    }
                }
            }
            outcome
        }
        .instrument(span)
        .boxed()
    }

    async fn load_record(&self, tx_id: &str) -> Result<PublicationRecord, ProofError> {
        let record = self
            .store
            .get_publication_by_id(tx_id)
            .await
            .map_err(|e| {
                warn!(error = %e, "failed to fetch publication");
                match e {
                    StoreError::Unavailable(_) | StoreError::Io(_) => {
                        ProofError::CannotConnectToStore
                    }
                    StoreError::Malformed { .. } => ProofError::Unknown,
                }
            })?
            .ok_or(ProofError::InvalidTxId)?;

        if record.data_availability_id != tx_id {
            warn!(found = %record.data_availability_id, "store returned another bundle");
            return Err(ProofError::InvalidTxId);
        }
        Ok(record)
    }

    async fn run_pipeline(&self, record: &PublicationRecord, trail: Vec<String>) -> ProofOutcome {
        let pointers = TrailResolver {
            checker: self,
            trail,
        };
        let mut pipeline = Pipeline::new(
            record,
            &self.params,
            self.gateway.as_ref(),
            self.simulator.as_ref(),
            &pointers,
        );
        let outcome = pipeline.run().await;
        debug!(state = %pipeline.state(), "pipeline finished");
        outcome
    }
}

/// Resolves pointers through the checker, remembering the chain of
/// publications that led here.
struct TrailResolver<'a> {
    checker: &'a DaProofChecker,
    trail: Vec<String>,
}

#[async_trait]
impl PointerVerifier for TrailResolver<'_> {
    async fn verify_pointer(&self, location: &str) -> ProofOutcome {
        self.checker
            .check_with_trail(location, self.trail.clone())
            .await
    }
}
