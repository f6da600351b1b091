use std::path::PathBuf;

use parley_core::AudioFormat;
use serde::Deserialize;

/// Where audio is written and in which format
#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct OutputConfig {
    /// Format of every chunk and of the merged file
    #[serde(default)]
    pub format: AudioFormat,
    /// Directory holding per-line chunks during a run
    #[serde(default = "default_temp_audio_dir")]
    pub temp_audio_dir: PathBuf,
    /// Directory for merged files when no explicit output path is given
    #[serde(default = "default_output_dir")]
    pub dir: PathBuf,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            format: AudioFormat::default(),
            temp_audio_dir: default_temp_audio_dir(),
            dir: default_output_dir(),
        }
    }
}

fn default_temp_audio_dir() -> PathBuf {
    PathBuf::from("./.temp_audio")
}

fn default_output_dir() -> PathBuf {
    PathBuf::from("./output")
}
