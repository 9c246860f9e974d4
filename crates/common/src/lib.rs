//! Facilities shared by the verifier binaries.

pub mod logging;
