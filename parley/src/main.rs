#![allow(clippy::must_use_candidate, clippy::missing_errors_doc)]

mod args;

use anyhow::Context;
use args::Args;
use clap::Parser;
use parley_config::Config;
use parley_core::Conversation;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    // Load configuration
    let config = Config::load(&args.config)?;

    // Initialize logging
    parley_telemetry::init(&config.logging)?;

    tracing::info!(
        config_path = %args.config.display(),
        script = %args.script.display(),
        provider = %config.tts.provider,
        "starting parley"
    );

    let script = tokio::fs::read_to_string(&args.script)
        .await
        .with_context(|| format!("failed to read script {}", args.script.display()))?;
    let conversation = Conversation::from_json(&script)
        .with_context(|| format!("failed to parse script {}", args.script.display()))?;

    let output = args.output_path(&config.output);
    if let Some(dir) = output.parent().filter(|dir| !dir.as_os_str().is_empty()) {
        tokio::fs::create_dir_all(dir)
            .await
            .with_context(|| format!("failed to create output directory {}", dir.display()))?;
    }

    // No pipeline-level cancellation; Ctrl+C abandons the run where it is
    let path = tokio::select! {
        result = parley_pipeline::generate(&config, &conversation, &output) => result?,
        signal = tokio::signal::ctrl_c() => {
            signal.context("failed to listen for Ctrl+C")?;
            anyhow::bail!("interrupted before {} was written", output.display());
        }
    };

    tracing::info!(output = %path.display(), lines = conversation.len(), "conversation audio written");
    println!("{}", path.display());

    Ok(())
}
