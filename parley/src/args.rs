use std::path::PathBuf;

use clap::Parser;
use parley_config::OutputConfig;

/// Parley conversation renderer
#[derive(Debug, Parser)]
#[command(name = "parley", about = "Render a two-voice conversation script into one audio file")]
pub struct Args {
    /// Path to configuration file
    #[arg(short, long, default_value = "parley.toml", env = "PARLEY_CONFIG")]
    pub config: PathBuf,

    /// JSON conversation script
    #[arg(short, long)]
    pub script: PathBuf,

    /// Merged audio path, defaults to `<output.dir>/<script name>.<format>`
    #[arg(short, long)]
    pub output: Option<PathBuf>,
}

impl Args {
    pub fn output_path(&self, output: &OutputConfig) -> PathBuf {
        if let Some(path) = &self.output {
            return path.clone();
        }

        let stem = self
            .script
            .file_stem()
            .map_or_else(|| "conversation".into(), |stem| stem.to_string_lossy());

        output.dir.join(format!("{stem}.{}", output.format.extension()))
    }
}
