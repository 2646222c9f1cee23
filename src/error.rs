use thiserror::Error;

/// Errors surfaced at the generation boundary.
///
/// Extraction itself is total and never produces an error; everything that
/// can go wrong is either a bad request (caught before any model call) or a
/// failure inside the model gateway.
#[derive(Debug, Error)]
pub enum Error {
    /// Missing/empty required field, or a kind the target generator does not
    /// recognize. No gateway call is attempted.
    #[error("invalid request: {0}")]
    InvalidRequest(String),

    /// The external model call failed.
    #[error("gateway failure: {0}")]
    Gateway(String),
}

pub type Result<T> = std::result::Result<T, Error>;
