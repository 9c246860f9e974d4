//! TOML configuration of the verifier.

mod config;
mod errors;
mod overrides;

pub use config::{
    ChainConfig, Config, LoggingConfig, SimulationConfig, SubmittersConfig, TimestampConfig,
    VerifierConfig,
};
pub use errors::ConfigError;
pub use overrides::{apply_override, parse_override};
