//! Stage functions shared by every publication variant.
//!
//! Each stage takes what earlier stages established and either returns the
//! facts it adds or the single [`ProofError`](momoka_primitives::ProofError)
//! that rejects the publication. Chain reads are always pinned to the proof
//! block.

pub mod authorization;
pub mod cross_check;
pub mod pointer;
pub mod signature;
pub mod simulation;
pub mod timestamp;

pub use authorization::{check_authorization, Authorization};
pub use cross_check::check_event;
pub use pointer::check_pointer;
pub use signature::recover_signer;
pub use simulation::{build_payload, simulate_with_retry};
pub use timestamp::check_timestamp;
