use async_trait::async_trait;
use momoka_primitives::ProofOutcome;

/// Verifies the DA publication a pointer proof refers to.
///
/// The pipeline calls back into this for comments, mirrors and quotes whose
/// pointed publication lives off-chain. The checker implements it by running
/// the full pipeline (cache included) on the pointed bundle.
#[cfg_attr(any(test, feature = "test-utils"), mockall::automock)]
#[async_trait]
pub trait PointerVerifier: Send + Sync {
    async fn verify_pointer(&self, location: &str) -> ProofOutcome;
}
