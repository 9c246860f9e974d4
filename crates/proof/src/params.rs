use std::{collections::HashSet, time::Duration};

use alloy_primitives::{Address, U256};
use momoka_chain::HubAddresses;
use momoka_primitives::LensVersion;

/// Tolerances applied by the timestamp stage.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TimestampPolicy {
    /// How far past the block timestamp the attested upload time may be.
    pub max_event_drift_secs: u64,

    /// Require that no later block exists at or before the attested time.
    pub enforce_closest_block: bool,
}

impl Default for TimestampPolicy {
    fn default() -> Self {
        Self {
            max_event_drift_secs: 180,
            enforce_closest_block: true,
        }
    }
}

/// Bounded retry of the simulation stage on infrastructure failure.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RetryPolicy {
    pub max_attempts: u32,
    pub backoff: Duration,
    /// Per-attempt deadline for the simulation backend.
    pub call_timeout: Duration,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            max_attempts: 3,
            backoff: Duration::from_millis(250),
            call_timeout: Duration::from_secs(10),
        }
    }
}

/// Everything the pipeline needs to know about the deployment it verifies.
#[derive(Debug, Clone)]
pub struct VerifierParams {
    pub chain_id: u64,
    pub hubs: HubAddresses,
    pub submitters: HashSet<Address>,
    pub timestamp_authorities: HashSet<Address>,
    pub timestamp: TimestampPolicy,
    pub retry: RetryPolicy,
    /// Upper bound of concurrently verified publications in a batch.
    pub concurrency: usize,
}

impl VerifierParams {
    /// Default policies with empty trust sets.
    pub fn new(chain_id: u64, hubs: HubAddresses) -> Self {
        Self {
            chain_id,
            hubs,
            submitters: HashSet::new(),
            timestamp_authorities: HashSet::new(),
            timestamp: TimestampPolicy::default(),
            retry: RetryPolicy::default(),
            concurrency: 8,
        }
    }

    pub fn with_submitter(mut self, address: Address) -> Self {
        self.submitters.insert(address);
        self
    }

    pub fn with_timestamp_authority(mut self, address: Address) -> Self {
        self.timestamp_authorities.insert(address);
        self
    }

    pub fn is_submitter(&self, address: &Address) -> bool {
        self.submitters.contains(address)
    }

    pub fn is_timestamp_authority(&self, address: &Address) -> bool {
        self.timestamp_authorities.contains(address)
    }

    pub fn chain_id_u256(&self) -> U256 {
        U256::from(self.chain_id)
    }

    pub fn hub(&self, version: LensVersion) -> Address {
        self.hubs.for_version(version)
    }
}
