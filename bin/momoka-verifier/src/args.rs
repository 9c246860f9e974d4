//! CLI argument parsing.

use std::{fs, path::PathBuf};

use argh::FromArgs;

use crate::errors::*;

#[derive(Clone, Debug, FromArgs)]
#[argh(description = "Verifies Momoka DA publications against a recorded chain")]
pub(crate) struct Args {
    #[argh(option, short = 'c', description = "path to configuration")]
    pub config: PathBuf,

    /// Directory holding one `<tx_id>.json` bundle per publication.
    #[argh(option, short = 's', description = "publication store directory")]
    pub store: PathBuf,

    /// JSON file with the block, profile and publication history to verify against.
    #[argh(option, description = "recorded chain file")]
    pub chain: PathBuf,

    /// Log as JSON regardless of the config file.
    #[argh(switch, description = "json logs")]
    pub json_logs: bool,

    /// Other generic overrides to the config toml.
    /// Will be used, for example, as `-o verifier.concurrency=4 -o simulation.max_attempts=5`
    #[argh(option, short = 'o', description = "generic config overrides")]
    pub overrides: Vec<String>,

    /// Transaction ids to verify; every bundle in the store when empty.
    #[argh(positional, description = "transaction ids")]
    pub tx_ids: Vec<String>,
}

impl Args {
    /// Get strings of overrides gathered from user and internal attributes.
    pub(crate) fn get_all_overrides(&self) -> Vec<String> {
        let mut overrides = self.overrides.clone();
        if self.json_logs {
            overrides.push("logging.json_format=true".to_owned());
        }
        overrides
    }

    /// Ids named on the command line, or every bundle found in the store.
    pub(crate) fn resolve_tx_ids(&self) -> Result<Vec<String>, InitError> {
        if !self.tx_ids.is_empty() {
            return Ok(self.tx_ids.clone());
        }

        let mut ids = Vec::new();
        for entry in fs::read_dir(&self.store)? {
            let path = entry?.path();
            if path.extension().is_some_and(|ext| ext == "json") {
                if let Some(stem) = path.file_stem().and_then(|s| s.to_str()) {
                    ids.push(stem.to_owned());
                }
            }
        }
        ids.sort();
        Ok(ids)
    }
}
