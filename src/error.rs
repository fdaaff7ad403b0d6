use std::path::PathBuf;

use thiserror::Error;

#[derive(Error, Debug)]
pub enum AssistantError {
    #[error("reply candidate list is empty")]
    EmptyCandidates,

    #[error("invalid reply delay range: min {min_ms}ms > max {max_ms}ms")]
    InvalidDelayRange { min_ms: u64, max_ms: u64 },

    #[error("failed to read {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("{path} is not a valid config: {source}")]
    ConfigFormat {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("failed to write {path}: {source}")]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to serialize: {0}")]
    Serialize(#[from] serde_json::Error),
}

impl AssistantError {
    /// The file simply isn't there, as opposed to unreadable or malformed.
    pub fn is_missing_file(&self) -> bool {
        matches!(
            self,
            AssistantError::Read { source, .. } if source.kind() == std::io::ErrorKind::NotFound
        )
    }
}

/// Speech failures stay inside the speech controls: they are logged and
/// turned into "no transcript" or a silent reply, never returned to callers
/// of the conversation.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SpeechError {
    #[error("failed to run `{program}`: {reason}")]
    Command { program: String, reason: String },

    #[error("no speech was recognized")]
    NoTranscript,
}

pub type Result<T> = std::result::Result<T, AssistantError>;
