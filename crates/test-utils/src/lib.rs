//! Signed fixtures for exercising the verification pipeline.
//!
//! Keys are deterministic so that fixtures are stable across runs. Every
//! fixture is internally consistent: typed data, event, attestations and the
//! chain state produced by [`ChainBuilder`] all agree, so a test only has to
//! break the one thing it is about.

mod chain;
mod fixture;
mod keys;
mod schema;

pub use chain::ChainBuilder;
pub use fixture::{
    sign_submitter, sign_timestamp_proof, BuiltPublication, PublicationFixture,
    DEFAULT_BLOCK_NUMBER, DEFAULT_BLOCK_TIMESTAMP, DEFAULT_NONCE, DEFAULT_PUB_ID, NEXT_BLOCK_GAP,
};
pub use keys::{
    authority_key, delegate_key, hubs, owner_key, stranger_key, submitter_key, CHAIN_ID,
};
pub use schema::schema_for;
