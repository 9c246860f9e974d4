//! Error types for initialization.

use std::io;

use momoka_chain::StaticChainError;
use momoka_config::ConfigError;
use thiserror::Error;

#[derive(Debug, Error)]
pub(crate) enum InitError {
    #[error("io: {0}")]
    Io(#[from] io::Error),

    #[error("config: {0}")]
    MalformedConfig(#[from] ConfigError),

    #[error("chain file: {0}")]
    MalformedChain(#[from] StaticChainError),

    #[error("failed to build runtime: {0}")]
    RuntimeBuild(io::Error),
}
