use alloy_primitives::U256;
use async_trait::async_trait;

use crate::{SimulatorError, TxPayload};

/// Observable effects of a simulated publication call.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SimulatedEffects {
    pub profile_id: U256,
    pub pub_id: U256,
}

/// Result of a dry-run call that the backend managed to execute.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SimulationOutcome {
    pub reverted: bool,
    /// Absent when the call reverted.
    pub effects: Option<SimulatedEffects>,
}

impl SimulationOutcome {
    pub fn reverted() -> Self {
        Self {
            reverted: true,
            effects: None,
        }
    }

    pub fn succeeded(effects: SimulatedEffects) -> Self {
        Self {
            reverted: false,
            effects: Some(effects),
        }
    }
}

/// Executes a transaction against historical state without committing it.
#[cfg_attr(feature = "test-utils", mockall::automock)]
#[async_trait]
pub trait SimulatorBackend: Send + Sync {
    async fn simulate(
        &self,
        block: u64,
        payload: &TxPayload,
    ) -> Result<SimulationOutcome, SimulatorError>;
}
