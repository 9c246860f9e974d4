//! Read-only view of the hub contracts at historical blocks.
//!
//! The verifier never talks to a node directly. It goes through
//! [`ChainGateway`] for state reads and [`SimulatorBackend`] for dry-run
//! execution, both pinned to the block named in the proof.

mod errors;
mod gateway;
pub mod hub;
mod simulator;
mod static_chain;

#[cfg(feature = "test-utils")]
pub use gateway::MockChainGateway;
pub use errors::{GatewayError, SimulatorError};
pub use gateway::{BlockInfo, ChainGateway, OnChainPublication, ProfileSnapshot};
pub use hub::{HubAddresses, SimulationRequest, TxPayload};
#[cfg(feature = "test-utils")]
pub use simulator::MockSimulatorBackend;
pub use simulator::{SimulatedEffects, SimulationOutcome, SimulatorBackend};
pub use static_chain::{BlockRecord, ProfileState, PublicationEntry, StaticChain, StaticChainError};
