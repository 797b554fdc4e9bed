use thiserror::Error;

/// Failure of an external collaborator call, as seen across a trait boundary.
///
/// Service clients map their own error types into one of these tags so the
/// pipeline can branch on the kind of failure without knowing the transport.
#[derive(Debug, Error)]
pub enum ServiceError {
    #[error("transport error: {0}")]
    Transport(String),

    #[error("service returned status {0}")]
    Status(u16),

    #[error("malformed response: {0}")]
    Parse(String),
}

/// Terminal outcomes of the discussion pipeline.
///
/// Everything recoverable is resolved inside the pipeline (best-effort guesses,
/// fallback queries); only these two definitive negatives reach the caller.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum PipelineError {
    /// The catalog returned no results at all for the title.
    #[error("anime not found")]
    AnimeNotFound,

    /// No discussion thread could be located for the requested episode.
    #[error("no discussion thread for this episode")]
    ThreadNotFound,
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("config error: {0}")]
    Invalid(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}
