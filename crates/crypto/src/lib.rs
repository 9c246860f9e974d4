//! Signature recovery for DA publications.
//!
//! Two schemes are involved:
//! - EIP-712 typed data signed by the profile (or its delegate), see [`typed_data`].
//! - EIP-191 personal messages signed by bundle submitters and timestamp
//!   authorities, see [`attestation`].

pub mod attestation;
mod errors;
pub mod typed_data;

pub use attestation::{
    recover_submitter, recover_timestamp_authority, submitter_message, timestamp_message,
};
pub use errors::{AttestationError, TypedDataError};
pub use typed_data::{
    eip712_domain, encode_type_from_schema, recover_typed_data_signer, typed_data_signing_hash,
};
