use thiserror::Error;

/// Canonical result for the engine.
pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, Error)]
pub enum Error {
    #[error("invalid configuration: {0}")]
    Config(String),

    #[error("backing store unreachable: {0}")]
    Connection(String),

    #[error("fetch failed: {0}")]
    Fetch(String),

    // Pulling from an explicitly closed stream. Exhaustion is not an error;
    // a drained stream keeps returning `Ok(None)`.
    #[error("stream closed")]
    Closed,
}
