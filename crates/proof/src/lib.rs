//! DA proof verification pipeline.
//!
//! [`DaProofChecker`] is the entry point. For each transaction id it consults
//! the [`ResultCache`], loads the [`PublicationRecord`] from the
//! [`PublicationStore`], dispatches it to the verifier for its type and
//! version, and drives it through the stages of [`VerificationState`] until it
//! is accepted or rejected.
//!
//! [`PublicationRecord`]: momoka_primitives::PublicationRecord

mod checker;
mod errors;
mod params;
mod pipeline;
mod pointer;
pub mod stages;
mod state;
mod store;
pub mod verifiers;

pub use checker::DaProofChecker;
pub use errors::{CacheError, StoreError};
pub use params::{RetryPolicy, TimestampPolicy, VerifierParams};
#[cfg(any(test, feature = "test-utils"))]
pub use pointer::MockPointerVerifier;
pub use pointer::PointerVerifier;
pub use state::VerificationState;
#[cfg(any(test, feature = "test-utils"))]
pub use store::{MockPublicationStore, MockResultCache};
pub use store::{
    DirectoryPublicationStore, InMemoryPublicationStore, LruResultCache, PublicationStore,
    ResultCache,
};
pub use verifiers::{DaPublication, PublicationVerifier};
