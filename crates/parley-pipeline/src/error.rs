use std::path::PathBuf;

use parley_audio::AudioError;
use thiserror::Error;
use tts::TtsError;

use crate::stage::Stage;

/// Fatal pipeline errors
///
/// Underlying errors are kept as the `source`, unchanged.
#[derive(Debug, Error)]
pub enum PipelineError {
    /// The configured provider could not be set up
    #[error("failed to set up TTS provider: {0}")]
    Setup(#[source] TtsError),

    /// The chunk directory could not be created
    #[error("failed to create temp audio directory {}: {source}", path.display())]
    TempDir {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Line synthesis failed after every retry
    #[error("failed to synthesize line {index}: {source}")]
    Synthesis {
        index: usize,
        #[source]
        source: TtsError,
    },

    /// A synthesized chunk could not be flushed to disk
    #[error("failed to write audio chunk for line {index} to {}: {source}", path.display())]
    WriteChunk {
        index: usize,
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Chunks could not be merged into the output file
    #[error(transparent)]
    Merge(#[from] AudioError),

    /// Merge task panicked or was cancelled
    #[error("audio merge task failed: {0}")]
    Join(#[from] tokio::task::JoinError),

    /// A chunk could not be deleted after a successful merge
    #[error("failed to remove temp audio file {}: {source}", path.display())]
    Cleanup {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

impl PipelineError {
    /// Stage the run was in when this error stopped it
    pub const fn stage(&self) -> Stage {
        match self {
            Self::Setup(_) => Stage::Idle,
            Self::TempDir { .. } => Stage::Sanitizing,
            Self::Synthesis { index, .. } | Self::WriteChunk { index, .. } => Stage::SynthesizingLine(*index),
            Self::Merge(_) | Self::Join(_) => Stage::Merging,
            Self::Cleanup { .. } => Stage::CleaningUp,
        }
    }
}
