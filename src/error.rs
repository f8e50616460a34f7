//! Error types for the workshop CLI.

use std::path::PathBuf;
use thiserror::Error;

/// Top-level error type for workshop operations.
///
/// Expected verification failures are never represented here; they are
/// reported as failing [`crate::exercise::TaskResult`]s. This type covers
/// infrastructure failures only.
#[derive(Error, Debug)]
pub enum Error {
    /// Git invocation failed or reported a fatal error.
    #[error("git operation failed: {0}")]
    Git(String),

    /// IO error during sandbox operations.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// The sandbox store file exists but cannot be parsed.
    #[error("corrupt sandbox store at {path}: {source}")]
    StoreCorrupt {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    /// Failed to serialize the sandbox store.
    #[error("failed to serialize sandbox store: {0}")]
    StoreSerialize(String),

    /// The interactive prompt could not be read.
    #[error("prompt failed: {0}")]
    Prompt(String),

    /// An exercise id outside the registry range was requested.
    #[error("unknown exercise #{id} - valid ids are 1..={max}")]
    UnknownExercise { id: usize, max: usize },
}

/// Result type alias for workshop operations.
pub type Result<T> = std::result::Result<T, Error>;
