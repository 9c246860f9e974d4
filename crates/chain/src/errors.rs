use thiserror::Error;

/// Failure to read chain state. Always an infrastructure problem, never a
/// statement about the publication itself.
#[derive(Debug, Error)]
pub enum GatewayError {
    #[error("node unavailable: {0}")]
    Unavailable(String),

    #[error("node request timed out")]
    Timeout,

    /// The node answered with something that does not decode.
    #[error("malformed node response: {0}")]
    Malformed(String),
}

/// The simulation backend could not execute the request.
#[derive(Debug, Error)]
pub enum SimulatorError {
    #[error("simulation node unavailable: {0}")]
    Unavailable(String),

    #[error("simulation timed out")]
    Timeout,
}
