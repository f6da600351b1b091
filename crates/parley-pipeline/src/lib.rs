//! Conversation script to merged audio
//!
//! `Idle -> Sanitizing -> SynthesizingLine(i) -> Merging -> CleaningUp -> Done`,
//! with `Failed` reachable from every stage after `Idle`.

#![allow(clippy::must_use_candidate, clippy::missing_errors_doc)]

mod error;
mod pipeline;
mod stage;

use std::path::{Path, PathBuf};

pub use error::PipelineError;
use parley_config::Config;
use parley_core::Conversation;
pub use pipeline::Pipeline;
pub use stage::Stage;

/// Synthesize `conversation` with the configured provider into `output_path`
pub async fn generate(config: &Config, conversation: &Conversation, output_path: &Path) -> Result<PathBuf, PipelineError> {
    let synthesizer = tts::build_synthesizer(config).map_err(PipelineError::Setup)?;

    Pipeline::new(
        Box::new(synthesizer),
        &config.output.temp_audio_dir,
        config.output.format,
    )
    .run(conversation, output_path)
    .await
}
