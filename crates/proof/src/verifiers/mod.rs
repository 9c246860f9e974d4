//! One verifier per publication type and protocol version.
//!
//! Variants are picked once, when the record is loaded, and share the stage
//! logic in [`crate::stages`]. What differs between them is captured by
//! [`PublicationVerifier`]: which EIP-712 struct was signed, how the event
//! fields line up with it, and which hub entry point replays it.

use std::fmt;

use alloy_primitives::{Address, Bytes, Signature, U256};
use alloy_sol_types::SolStruct;
use momoka_primitives::{
    publication_id_matches,
    typed_values::decode_value,
    LensVersion, ProofError, PublicationChainProof, PublicationEvent, PublicationKind,
    PublicationRecord,
};
use tracing::*;

mod comment;
mod mirror;
mod post;
mod quote;

pub use comment::{CommentV1, CommentV2};
pub use mirror::{MirrorV1, MirrorV2};
pub use post::{PostV1, PostV2};
pub use quote::QuoteV2;

/// Capabilities that differ per publication type and version.
pub trait PublicationVerifier: Send + Sync + fmt::Debug {
    fn kind(&self) -> PublicationKind;

    fn version(&self) -> LensVersion;

    /// Profile named in the signed typed data.
    fn signed_profile_id(&self) -> U256;

    /// Signature nonce embedded in the typed data.
    fn nonce(&self) -> U256;

    fn deadline(&self) -> U256;

    /// `(profileId, pubId)` the signer pointed at, `None` for posts.
    fn signed_pointer(&self) -> Option<(U256, U256)>;

    /// `(profileId, pubId)` claimed by the event.
    fn event_ids(&self) -> (U256, U256);

    /// Event timestamp in seconds.
    fn event_timestamp(&self) -> u64;

    /// Recovers the address that signed the typed data.
    fn verify_signer(&self, proof: &PublicationChainProof) -> Result<Address, ProofError>;

    /// Checks every signed field against the event.
    ///
    /// `counter` is the publication counter of the profile at the proof block.
    fn verify_event_with_typed_data(&self, signer: Address, counter: U256)
        -> Result<(), ProofError>;

    /// Calldata of the hub call that would have published this.
    fn hub_calldata(&self, signer: Address, signature: &Signature) -> Bytes;

    /// Checks the claimed publication id against the one derived from the event.
    fn verify_publication_id_matches(&self, record: &PublicationRecord) -> Result<(), ProofError> {
        let (profile_id, pub_id) = self.event_ids();
        ensure(
            publication_id_matches(
                &record.publication_id,
                profile_id,
                pub_id,
                &record.data_availability_id,
            ),
            ProofError::GeneratedPublicationIdMismatch,
        )
    }
}

/// A loaded publication, tagged by type and version.
#[derive(Debug, Clone)]
pub enum DaPublication {
    PostV1(PostV1),
    CommentV1(CommentV1),
    MirrorV1(MirrorV1),
    PostV2(PostV2),
    CommentV2(CommentV2),
    MirrorV2(MirrorV2),
    QuoteV2(QuoteV2),
}

impl DaPublication {
    /// Decodes the event and typed data of a record into the matching variant.
    ///
    /// Event shape errors are [`ProofError::EventMismatch`], typed data shape
    /// errors are [`ProofError::InvalidFormattedTypedData`].
    pub fn load(record: &PublicationRecord) -> Result<Self, ProofError> {
        let event = PublicationEvent::decode(record.kind, record.version, &record.event)?;
        let raw = &record.chain_proofs.this_publication.typed_data.value;

        Ok(match event {
            PublicationEvent::PostV1(event) => Self::PostV1(PostV1::new(event, decode_value(raw)?)),
            PublicationEvent::CommentV1(event) => {
                Self::CommentV1(CommentV1::new(event, decode_value(raw)?))
            }
            PublicationEvent::MirrorV1(event) => {
                Self::MirrorV1(MirrorV1::new(event, decode_value(raw)?))
            }
            PublicationEvent::PostV2(event) => Self::PostV2(PostV2::new(event, decode_value(raw)?)),
            PublicationEvent::CommentV2(event) => {
                Self::CommentV2(CommentV2::new(event, decode_value(raw)?))
            }
            PublicationEvent::MirrorV2(event) => {
                Self::MirrorV2(MirrorV2::new(event, decode_value(raw)?))
            }
            PublicationEvent::QuoteV2(event) => {
                Self::QuoteV2(QuoteV2::new(event, decode_value(raw)?))
            }
        })
    }

    pub fn verifier(&self) -> &dyn PublicationVerifier {
        match self {
            Self::PostV1(v) => v,
            Self::CommentV1(v) => v,
            Self::MirrorV1(v) => v,
            Self::PostV2(v) => v,
            Self::CommentV2(v) => v,
            Self::MirrorV2(v) => v,
            Self::QuoteV2(v) => v,
        }
    }
}

fn ensure(cond: bool, err: ProofError) -> Result<(), ProofError> {
    if cond {
        Ok(())
    } else {
        Err(err)
    }
}

/// Fails with [`ProofError::EventMismatch`] unless `signed == emitted`.
fn ensure_field<T: PartialEq + fmt::Debug>(
    field: &'static str,
    signed: &T,
    emitted: &T,
) -> Result<(), ProofError> {
    if signed != emitted {
        debug!(%field, ?signed, ?emitted, "event does not match typed data");
        return Err(ProofError::EventMismatch);
    }
    Ok(())
}

/// DA publications only support modules that return nothing on init.
fn ensure_no_return_data(field: &'static str, data: &Bytes) -> Result<(), ProofError> {
    if !data.is_empty() {
        debug!(%field, len = data.len(), "unexpected module return data");
        return Err(ProofError::EventMismatch);
    }
    Ok(())
}

fn ensure_no_return_datas(field: &'static str, datas: &[Bytes]) -> Result<(), ProofError> {
    datas
        .iter()
        .try_for_each(|data| ensure_no_return_data(field, data))
}

/// The event must claim the publication right after the counter.
fn ensure_next_pub_id(pub_id: U256, counter: U256) -> Result<(), ProofError> {
    ensure_field("pubId", &counter.saturating_add(U256::from(1)), &pub_id)
}

fn recover_signer<T: SolStruct>(
    proof: &PublicationChainProof,
    value: &T,
) -> Result<Address, ProofError> {
    momoka_crypto::recover_typed_data_signer(&proof.typed_data, value, &proof.signature).map_err(
        |e| {
            debug!(error = %e, "typed data signature rejected");
            ProofError::InvalidFormattedTypedData
        },
    )
}

#[cfg(test)]
mod tests {
    use momoka_test_utils::PublicationFixture;

    use super::*;

    #[test]
    fn test_load_dispatches_on_type_and_version() {
        let cases = [
            (PublicationFixture::post_v1(), PublicationKind::Post, LensVersion::V1),
            (PublicationFixture::comment_v1(), PublicationKind::Comment, LensVersion::V1),
            (PublicationFixture::mirror_v1(), PublicationKind::Mirror, LensVersion::V1),
            (PublicationFixture::post_v2(), PublicationKind::Post, LensVersion::V2),
            (PublicationFixture::comment_v2(), PublicationKind::Comment, LensVersion::V2),
            (PublicationFixture::mirror_v2(), PublicationKind::Mirror, LensVersion::V2),
            (PublicationFixture::quote_v2(), PublicationKind::Quote, LensVersion::V2),
        ];

        for (fixture, kind, version) in cases {
            let built = fixture.build();
            let publication = DaPublication::load(&built.record).unwrap();
            let verifier = publication.verifier();
            assert_eq!(verifier.kind(), kind);
            assert_eq!(verifier.version(), version);
            assert_eq!(verifier.signed_pointer().is_some(), kind.has_pointer());
            verifier.verify_publication_id_matches(&built.record).unwrap();
        }
    }

    #[test]
    fn test_recovers_fixture_signer_for_every_variant() {
        for fixture in PublicationFixture::all() {
            let built = fixture.build();
            let publication = DaPublication::load(&built.record).unwrap();
            let signer = publication
                .verifier()
                .verify_signer(&built.record.chain_proofs.this_publication)
                .unwrap();
            assert_eq!(signer, built.signer);
        }
    }

    #[test]
    fn test_malformed_typed_value() {
        let mut record = PublicationFixture::post_v2().build().record;
        record.chain_proofs.this_publication.typed_data.value = serde_json::json!({});
        assert_eq!(
            DaPublication::load(&record).unwrap_err(),
            ProofError::InvalidFormattedTypedData
        );
    }

    #[test]
    fn test_claimed_id_must_match_event() {
        let mut record = PublicationFixture::mirror_v2().build().record;
        record.publication_id = record.publication_id.replace("-DA-", "-DA-ff");
        let publication = DaPublication::load(&record).unwrap();
        assert_eq!(
            publication
                .verifier()
                .verify_publication_id_matches(&record)
                .unwrap_err(),
            ProofError::GeneratedPublicationIdMismatch
        );
    }

    #[test]
    fn test_counter_must_precede_pub_id() {
        assert!(ensure_next_pub_id(U256::from(6), U256::from(5)).is_ok());
        assert_eq!(
            ensure_next_pub_id(U256::from(5), U256::from(5)).unwrap_err(),
            ProofError::EventMismatch
        );
    }
}
