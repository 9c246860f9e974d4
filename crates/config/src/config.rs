use std::{
    collections::HashSet,
    fs,
    path::{Path, PathBuf},
    time::Duration,
};

use alloy_primitives::Address;
use momoka_chain::HubAddresses;
use momoka_proof::{RetryPolicy, TimestampPolicy, VerifierParams};
use serde::{Deserialize, Serialize};
use toml::value::Table;

use crate::{apply_override, parse_override, ConfigError};

/// Default value for `max_event_drift_secs` in [`TimestampConfig`].
const DEFAULT_MAX_EVENT_DRIFT_SECS: u64 = 180;

const DEFAULT_MAX_ATTEMPTS: u32 = 3;
const DEFAULT_RETRY_BACKOFF_MS: u64 = 250;
const DEFAULT_SIMULATION_TIMEOUT_MS: u64 = 10_000;

const DEFAULT_CONCURRENCY: usize = 8;
const DEFAULT_CACHE_CAPACITY: usize = 10_000;

/// Sections that may be omitted from the file but still be overridden.
const OPTIONAL_SECTIONS: [&str; 4] = ["timestamp", "simulation", "verifier", "logging"];

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChainConfig {
    pub chain_id: u64,

    /// Hub contract signing V1 typed data and receiving V1 calls.
    pub lens_hub_v1: Address,

    /// Hub contract signing V2 typed data and receiving V2 calls.
    pub lens_hub_v2: Address,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SubmittersConfig {
    /// Addresses allowed to upload bundles.
    #[serde(default)]
    pub submitters: Vec<Address>,

    /// Addresses whose timestamp attestations are trusted.
    #[serde(default)]
    pub timestamp_authorities: Vec<Address>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TimestampConfig {
    #[serde(default = "default_max_event_drift_secs")]
    pub max_event_drift_secs: u64,

    #[serde(default = "default_true")]
    pub enforce_closest_block: bool,
}

impl Default for TimestampConfig {
    fn default() -> Self {
        Self {
            max_event_drift_secs: DEFAULT_MAX_EVENT_DRIFT_SECS,
            enforce_closest_block: true,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SimulationConfig {
    #[serde(default = "default_max_attempts")]
    pub max_attempts: u32,

    #[serde(default = "default_retry_backoff_ms")]
    pub retry_backoff_ms: u64,

    /// Deadline of a single simulation attempt.
    #[serde(default = "default_simulation_timeout_ms")]
    pub timeout_ms: u64,
}

impl Default for SimulationConfig {
    fn default() -> Self {
        Self {
            max_attempts: DEFAULT_MAX_ATTEMPTS,
            retry_backoff_ms: DEFAULT_RETRY_BACKOFF_MS,
            timeout_ms: DEFAULT_SIMULATION_TIMEOUT_MS,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VerifierConfig {
    /// Publications verified at once in batch mode.
    #[serde(default = "default_concurrency")]
    pub concurrency: usize,

    /// Outcomes kept in the in-process result cache.
    #[serde(default = "default_cache_capacity")]
    pub cache_capacity: usize,
}

impl Default for VerifierConfig {
    fn default() -> Self {
        Self {
            concurrency: DEFAULT_CONCURRENCY,
            cache_capacity: DEFAULT_CACHE_CAPACITY,
        }
    }
}

/// Logging configuration
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct LoggingConfig {
    /// Service label to append to the service name (e.g., "prod", "dev").
    #[serde(skip_serializing_if = "Option::is_none")]
    pub service_label: Option<String>,

    /// Directory path for file-based logging.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub log_dir: Option<PathBuf>,

    /// Prefix for log file names.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub log_file_prefix: Option<String>,

    /// Use JSON format for logs instead of compact format.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub json_format: Option<bool>,
}

fn default_max_event_drift_secs() -> u64 {
    DEFAULT_MAX_EVENT_DRIFT_SECS
}

fn default_true() -> bool {
    true
}

fn default_max_attempts() -> u32 {
    DEFAULT_MAX_ATTEMPTS
}

fn default_retry_backoff_ms() -> u64 {
    DEFAULT_RETRY_BACKOFF_MS
}

fn default_simulation_timeout_ms() -> u64 {
    DEFAULT_SIMULATION_TIMEOUT_MS
}

fn default_concurrency() -> usize {
    DEFAULT_CONCURRENCY
}

fn default_cache_capacity() -> usize {
    DEFAULT_CACHE_CAPACITY
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    pub chain: ChainConfig,

    #[serde(default)]
    pub submitters: SubmittersConfig,

    #[serde(default)]
    pub timestamp: TimestampConfig,

    #[serde(default)]
    pub simulation: SimulationConfig,

    #[serde(default)]
    pub verifier: VerifierConfig,

    /// Logging configuration (optional section in TOML).
    #[serde(default)]
    pub logging: LoggingConfig,
}

impl Config {
    /// Reads the file at `path` and applies `overrides` on top of it.
    pub fn load(path: &Path, overrides: &[String]) -> Result<Self, ConfigError> {
        let config_str = fs::read_to_string(path)?;
        Self::from_toml_str(&config_str, overrides)
    }

    pub fn from_toml_str(s: &str, overrides: &[String]) -> Result<Self, ConfigError> {
        let mut table: Table = toml::from_str(s)?;
        for section in OPTIONAL_SECTIONS {
            table
                .entry(section.to_owned())
                .or_insert_with(|| toml::Value::Table(Table::new()));
        }

        for o in overrides {
            let (path, val) = parse_override(o)?;
            apply_override(&path, val, &mut table)?;
        }

        let config: Self = toml::Value::Table(table).try_into()?;
        config.validate()
    }

    fn validate(self) -> Result<Self, ConfigError> {
        if self.chain.chain_id == 0 {
            return Err(ConfigError::InvalidValue {
                key: "chain.chain_id",
                reason: "must be non-zero".to_owned(),
            });
        }
        if self.simulation.max_attempts == 0 {
            return Err(ConfigError::InvalidValue {
                key: "simulation.max_attempts",
                reason: "at least one attempt is required".to_owned(),
            });
        }
        if self.verifier.concurrency == 0 {
            return Err(ConfigError::InvalidValue {
                key: "verifier.concurrency",
                reason: "must be non-zero".to_owned(),
            });
        }
        Ok(self)
    }

    /// Parameters the proof pipeline runs with.
    pub fn verifier_params(&self) -> VerifierParams {
        let hubs = HubAddresses {
            v1: self.chain.lens_hub_v1,
            v2: self.chain.lens_hub_v2,
        };
        VerifierParams {
            submitters: self.submitters.submitters.iter().copied().collect::<HashSet<_>>(),
            timestamp_authorities: self
                .submitters
                .timestamp_authorities
                .iter()
                .copied()
                .collect(),
            timestamp: TimestampPolicy {
                max_event_drift_secs: self.timestamp.max_event_drift_secs,
                enforce_closest_block: self.timestamp.enforce_closest_block,
            },
            retry: RetryPolicy {
                max_attempts: self.simulation.max_attempts,
                backoff: Duration::from_millis(self.simulation.retry_backoff_ms),
                call_timeout: Duration::from_millis(self.simulation.timeout_ms),
            },
            concurrency: self.verifier.concurrency,
            ..VerifierParams::new(self.chain.chain_id, hubs)
        }
    }
}

#[cfg(test)]
mod test {
    use super::*;

    const SUBMITTER: &str = "0x4444444444444444444444444444444444444444";
    const AUTHORITY: &str = "0x5555555555555555555555555555555555555555";

    fn minimal() -> String {
        format!(
            r#"
            [chain]
            chain_id = 137
            lens_hub_v1 = "0xdb46d1dc155634fbc732f92e853b10b288ad5a1d"
            lens_hub_v2 = "0xc0ffee254729296a45a3885639ac7e10f9d54979"

            [submitters]
            submitters = ["{SUBMITTER}"]
            timestamp_authorities = ["{AUTHORITY}"]
            "#
        )
    }

    #[test]
    fn test_config_load_with_defaults() {
        let config = Config::from_toml_str(&minimal(), &[]).unwrap();
        assert_eq!(config.chain.chain_id, 137);
        assert_eq!(config.timestamp.max_event_drift_secs, 180);
        assert!(config.timestamp.enforce_closest_block);
        assert_eq!(config.simulation.max_attempts, 3);
        assert_eq!(config.simulation.timeout_ms, 10_000);
        assert_eq!(config.verifier.concurrency, 8);
        assert!(config.logging.log_dir.is_none());
    }

    #[test]
    fn test_overrides_reach_omitted_sections() {
        let overrides = [
            "verifier.concurrency=2".to_owned(),
            "simulation.retry_backoff_ms=10".to_owned(),
            "logging.log_dir=/tmp/momoka".to_owned(),
            "chain.chain_id=80001".to_owned(),
        ];
        let config = Config::from_toml_str(&minimal(), &overrides).unwrap();
        assert_eq!(config.verifier.concurrency, 2);
        assert_eq!(config.simulation.retry_backoff_ms, 10);
        assert_eq!(config.logging.log_dir, Some(PathBuf::from("/tmp/momoka")));
        assert_eq!(config.chain.chain_id, 80001);
    }

    #[test]
    fn test_missing_chain_section_fails() {
        let res = Config::from_toml_str("[verifier]\nconcurrency = 1\n", &[]);
        assert!(matches!(res, Err(ConfigError::TomlParse(_))));
    }

    #[test]
    fn test_zero_concurrency_is_rejected() {
        let res = Config::from_toml_str(&minimal(), &["verifier.concurrency=0".to_owned()]);
        assert!(matches!(
            res,
            Err(ConfigError::InvalidValue {
                key: "verifier.concurrency",
                ..
            })
        ));
    }

    #[test]
    fn test_verifier_params_conversion() {
        let overrides = ["simulation.timeout_ms=500".to_owned()];
        let params = Config::from_toml_str(&minimal(), &overrides)
            .unwrap()
            .verifier_params();

        assert_eq!(params.chain_id, 137);
        assert!(params.is_submitter(&SUBMITTER.parse().unwrap()));
        assert!(params.is_timestamp_authority(&AUTHORITY.parse().unwrap()));
        assert!(!params.is_submitter(&AUTHORITY.parse().unwrap()));
        assert_eq!(params.retry.call_timeout, Duration::from_millis(500));
        assert_eq!(params.retry.backoff, Duration::from_millis(250));
        assert_eq!(params.concurrency, 8);
    }
}
