//! Shared wiring for the pipeline integration tests.

use std::sync::Arc;

use momoka_chain::{ChainGateway, SimulatorBackend, StaticChain};
use momoka_primitives::PublicationRecord;
use momoka_proof::{DaProofChecker, InMemoryPublicationStore, LruResultCache, VerifierParams};
use momoka_test_utils::{authority_key, hubs, submitter_key, CHAIN_ID};

pub(crate) fn params() -> VerifierParams {
    VerifierParams::new(CHAIN_ID, hubs())
        .with_submitter(submitter_key().address())
        .with_timestamp_authority(authority_key().address())
}

/// A checker plus handles on the parts tests inspect afterwards.
pub(crate) struct Harness {
    pub(crate) checker: DaProofChecker,
    pub(crate) cache: Arc<LruResultCache>,
    pub(crate) store: Arc<InMemoryPublicationStore>,
}

pub(crate) fn harness(
    records: impl IntoIterator<Item = PublicationRecord>,
    chain: StaticChain,
) -> Harness {
    let chain = Arc::new(chain);
    harness_with(records, chain.clone(), chain, params())
}

pub(crate) fn harness_with(
    records: impl IntoIterator<Item = PublicationRecord>,
    gateway: Arc<dyn ChainGateway>,
    simulator: Arc<dyn SimulatorBackend>,
    params: VerifierParams,
) -> Harness {
    let store = Arc::new(InMemoryPublicationStore::from_iter(records));
    let cache = Arc::new(LruResultCache::new(64));
    let checker = DaProofChecker::new(store.clone(), cache.clone(), gateway, simulator, params);
    Harness {
        checker,
        cache,
        store,
    }
}
