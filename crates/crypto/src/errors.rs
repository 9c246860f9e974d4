use alloy_primitives::SignatureError;
use thiserror::Error;

/// Errors raised while hashing typed data or recovering its signer.
#[derive(Debug, Error)]
pub enum TypedDataError {
    /// The schema does not define the expected primary type.
    #[error("primary type {0} is not defined in the schema")]
    MissingPrimaryType(String),

    /// The schema references a struct type it does not define.
    #[error("type {0} is referenced but not defined")]
    UndefinedType(String),

    /// The schema encodes differently from the expected struct.
    #[error("schema mismatch: expected {expected}, found {found}")]
    SchemaMismatch { expected: String, found: String },

    /// The signature bytes are malformed or do not recover to a point.
    #[error("invalid signature: {0}")]
    InvalidSignature(#[from] SignatureError),
}

/// Errors raised while recovering an attestation signer.
#[derive(Debug, Error)]
pub enum AttestationError {
    /// No signature was attached.
    #[error("attestation is not signed")]
    Missing,

    /// The signature bytes are malformed or do not recover to a point.
    #[error("invalid attestation signature: {0}")]
    InvalidSignature(#[from] SignatureError),
}
