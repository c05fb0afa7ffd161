use std::path::PathBuf;
use std::time::Duration;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum EngineError {
    /// Startup precondition: the reference voice sample must exist.
    #[error("voice sample not found at {0}; add a reference WAV file before starting")]
    MissingVoiceSample(PathBuf),
    #[error("failed to launch engine process: {0}")]
    Spawn(#[from] std::io::Error),
    #[error("engine did not become ready within {0:?}")]
    NotReady(Duration),
    #[error(transparent)]
    Http(#[from] reqwest::Error),
    #[error("engine returned {status}: {detail}")]
    Synthesis {
        status: reqwest::StatusCode,
        detail: String,
    },
}

/// Convenience result type used throughout this crate.
pub type Result<T> = std::result::Result<T, EngineError>;
