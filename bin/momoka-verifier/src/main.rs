//! Offline verifier of Momoka DA publications.

use anyhow::{anyhow, Result};
use argh::from_env;
use momoka_common::logging;
use momoka_primitives::{ProofError, ProofOutcome, VerifiedFacts};
use serde::Serialize;
use tokio::runtime;
use tracing::*;

use crate::{args::Args, errors::InitError};

mod args;
mod context;
mod errors;

/// One line of output per verified transaction.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct Report<'a> {
    tx_id: &'a str,
    valid: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    facts: Option<&'a VerifiedFacts>,
    #[serde(skip_serializing_if = "Option::is_none")]
    error: Option<ProofError>,
}

impl<'a> Report<'a> {
    fn new(tx_id: &'a str, outcome: &'a ProofOutcome) -> Self {
        Self {
            tx_id,
            valid: outcome.is_ok(),
            facts: outcome.as_ref().ok(),
            error: outcome.as_ref().err().copied(),
        }
    }
}

fn main() -> Result<()> {
    let args: Args = from_env();

    let config =
        context::load_config(&args).map_err(|e| anyhow!("failed to load configuration: {e}"))?;
    init_logging(&config);

    let rt = runtime::Builder::new_multi_thread()
        .enable_all()
        .thread_name("momoka-rt")
        .build()
        .map_err(InitError::RuntimeBuild)?;

    let tx_ids = args.resolve_tx_ids()?;
    let checker = rt.block_on(context::init_checker(&args, &config))?;
    info!(count = tx_ids.len(), "verifying publications");

    let outcomes = rt.block_on(checker.check_da_proofs(tx_ids));

    let mut rejected = 0usize;
    let mut transient = 0usize;
    for (tx_id, outcome) in &outcomes {
        if let Err(e) = outcome {
            rejected += 1;
            transient += usize::from(e.is_transient());
        }
        println!("{}", serde_json::to_string(&Report::new(tx_id, outcome))?);
    }

    info!(total = outcomes.len(), %rejected, %transient, "verification finished");
    if rejected > 0 {
        return Err(anyhow!("{rejected} of {} publications rejected", outcomes.len()));
    }
    Ok(())
}

fn init_logging(config: &momoka_config::Config) {
    logging::init_logging_from_config(logging::LoggingInitConfig {
        service_base_name: "momoka-verifier",
        service_label: config.logging.service_label.as_deref(),
        log_dir: config.logging.log_dir.as_ref(),
        log_file_prefix: config.logging.log_file_prefix.as_deref(),
        json_format: config.logging.json_format,
        default_log_prefix: "momoka",
    });
}
