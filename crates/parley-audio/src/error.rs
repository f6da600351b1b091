use std::path::PathBuf;

use parley_core::AudioFormat;
use thiserror::Error;

/// Errors while merging audio files
#[derive(Debug, Error)]
pub enum AudioError {
    /// An input file could not be read
    #[error("failed to read audio file {}: {source}", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// An input file is not valid audio of the expected format
    #[error("malformed {format} audio in {}: {reason}", path.display())]
    Malformed {
        path: PathBuf,
        format: AudioFormat,
        reason: String,
    },

    /// An input file cannot be joined to the audio before it
    #[error("{} does not match the preceding audio: {reason}", path.display())]
    Incompatible { path: PathBuf, reason: String },

    /// The merged audio could not be encoded
    #[error("failed to encode merged {format} audio: {reason}")]
    Encode { format: AudioFormat, reason: String },

    /// The merged file could not be written
    #[error("failed to write merged audio to {}: {source}", path.display())]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// Format-level failure, given file context by the merge
#[derive(Debug, Error)]
#[error("{0}")]
pub(crate) struct CodecError(pub(crate) String);

impl CodecError {
    pub(crate) fn new(reason: impl Into<String>) -> Self {
        Self(reason.into())
    }
}
