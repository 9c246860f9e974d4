//! Data model shared by every stage of the DA proof pipeline.
//!
//! A [`PublicationRecord`] is the claim fetched from the off-chain store. It is
//! decoded once into per-type event and typed-data payloads (see [`events`] and
//! [`typed_values`]) and verified into either [`VerifiedFacts`] or a
//! [`ProofError`].

mod error;
pub mod events;
mod facts;
mod publication;
pub mod publication_id;
mod record;
pub mod serde_helpers;
pub mod typed_values;

pub use error::{ProofError, UnknownErrorCode, ALL_PROOF_ERRORS};
pub use events::PublicationEvent;
pub use facts::{ProofOutcome, VerifiedFacts};
pub use publication::{LensVersion, PublicationKind, HUB_DOMAIN_NAME};
pub use publication_id::{
    derive_publication_id, format_hex_id, publication_id_matches, short_data_availability_id,
};
pub use record::{
    ChainProofs, PointerKind, PointerProof, PublicationChainProof, PublicationRecord,
    TimestampProof, TypedDataDomain, TypedDataEnvelope, TypedDataField,
};
