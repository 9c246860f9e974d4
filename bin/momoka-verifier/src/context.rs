//! Wiring of the checker from configuration.

use std::sync::Arc;

use momoka_chain::StaticChain;
use momoka_config::Config;
use momoka_proof::{DaProofChecker, DirectoryPublicationStore, LruResultCache};
use tracing::*;

use crate::{args::Args, errors::InitError};

pub(crate) fn load_config(args: &Args) -> Result<Config, InitError> {
    Ok(Config::load(&args.config, &args.get_all_overrides())?)
}

/// Builds a checker reading bundles from the store directory and chain state
/// from the recorded chain file.
pub(crate) async fn init_checker(args: &Args, config: &Config) -> Result<DaProofChecker, InitError> {
    let chain = Arc::new(StaticChain::load(&args.chain).await?);
    info!(chain = %args.chain.display(), "loaded recorded chain");

    let store = Arc::new(DirectoryPublicationStore::new(&args.store));
    let cache = Arc::new(LruResultCache::new(config.verifier.cache_capacity));

    Ok(DaProofChecker::new(
        store,
        cache,
        chain.clone(),
        chain,
        config.verifier_params(),
    ))
}
