use std::path::{Path, PathBuf};

use parley_core::{AudioFormat, Conversation};
use tokio::io::AsyncWriteExt;
use tts::LineSynthesizer;

use crate::{error::PipelineError, stage::Stage};

/// Drives one conversation from script to merged audio file
///
/// Lines are synthesized strictly in order; each chunk is flushed to disk
/// before the next line starts. Chunk files are named `{index:03}.{ext}`
/// inside `temp_dir`, so concurrent runs need distinct directories.
pub struct Pipeline {
    synthesizer: Box<dyn LineSynthesizer>,
    temp_dir: PathBuf,
    format: AudioFormat,
}

impl Pipeline {
    pub fn new(synthesizer: Box<dyn LineSynthesizer>, temp_dir: impl Into<PathBuf>, format: AudioFormat) -> Self {
        Self {
            synthesizer,
            temp_dir: temp_dir.into(),
            format,
        }
    }

    /// Path of the temp chunk for the line at `index`
    pub fn chunk_path(&self, index: usize) -> PathBuf {
        self.temp_dir.join(format!("{index:03}.{}", self.format.extension()))
    }

    /// Run the whole conversation and return the merged file's path
    ///
    /// On failure the chunks written so far stay in the temp directory.
    pub async fn run(&self, conversation: &Conversation, output: &Path) -> Result<PathBuf, PipelineError> {
        let mut stage = Stage::Idle;

        match self.drive(conversation, output, &mut stage).await {
            Ok(path) => {
                advance(&mut stage, Stage::Done);
                Ok(path)
            }
            Err(e) => {
                tracing::error!(stage = %stage, "Pipeline failed: {e}");
                advance(&mut stage, Stage::Failed);
                Err(e)
            }
        }
    }

    async fn drive(
        &self,
        conversation: &Conversation,
        output: &Path,
        stage: &mut Stage,
    ) -> Result<PathBuf, PipelineError> {
        advance(stage, Stage::Sanitizing);

        if conversation.is_empty() {
            tracing::warn!("Conversation has no lines, output will hold no audio");
        }
        let sanitized = parley_core::sanitize(conversation);

        tokio::fs::create_dir_all(&self.temp_dir)
            .await
            .map_err(|source| PipelineError::TempDir {
                path: self.temp_dir.clone(),
                source,
            })?;

        tracing::info!(
            provider = self.synthesizer.name(),
            lines = sanitized.len(),
            format = %self.format,
            "Synthesizing conversation"
        );

        let mut chunks = Vec::with_capacity(sanitized.len());

        for (index, line) in sanitized.iter().enumerate() {
            advance(stage, Stage::SynthesizingLine(index));

            let audio = self
                .synthesizer
                .synthesize(line)
                .await
                .map_err(|source| PipelineError::Synthesis { index, source })?;

            let path = self.chunk_path(index);
            write_chunk(&path, &audio)
                .await
                .map_err(|source| PipelineError::WriteChunk {
                    index,
                    path: path.clone(),
                    source,
                })?;

            tracing::debug!(
                index,
                speaker = %line.speaker(),
                bytes = audio.len(),
                "Wrote {}",
                path.display()
            );
            chunks.push(path);
        }

        advance(stage, Stage::Merging);

        let format = self.format;
        let merge_inputs = chunks.clone();
        let merge_output = output.to_path_buf();
        tokio::task::spawn_blocking(move || parley_audio::merge(&merge_inputs, &merge_output, format)).await??;

        advance(stage, Stage::CleaningUp);

        for path in chunks {
            tokio::fs::remove_file(&path)
                .await
                .map_err(|source| PipelineError::Cleanup { path, source })?;
        }

        Ok(output.to_path_buf())
    }
}

async fn write_chunk(path: &Path, audio: &[u8]) -> std::io::Result<()> {
    let mut file = tokio::fs::File::create(path).await?;
    file.write_all(audio).await?;
    file.sync_all().await
}

fn advance(stage: &mut Stage, next: Stage) {
    tracing::debug!("Pipeline stage: {stage} -> {next}");
    *stage = next;
}

#[cfg(test)]
mod tests {
    use std::sync::{Arc, Mutex};

    use async_trait::async_trait;
    use parley_core::{ScriptLine, Speaker};
    use tempfile::TempDir;
    use tts::TtsError;

    use super::*;

    /// MPEG-1 layer III frame, 128 kbps at 44.1 kHz, payload filled with `fill`
    fn mp3_frame(fill: u8) -> Vec<u8> {
        let mut frame = vec![0xFF, 0xFB, 0x90, 0x00];
        frame.resize(417, fill);
        frame
    }

    /// Returns one frame per line and records what it saw on each call
    struct Recorder {
        temp_dir: PathBuf,
        fail_at: Option<usize>,
        corrupt_at: Option<usize>,
        texts: Mutex<Vec<String>>,
        chunks_on_disk: Mutex<Vec<Vec<String>>>,
    }

    impl Recorder {
        fn new(temp_dir: &Path) -> Self {
            Self {
                temp_dir: temp_dir.to_path_buf(),
                fail_at: None,
                corrupt_at: None,
                texts: Mutex::new(Vec::new()),
                chunks_on_disk: Mutex::new(Vec::new()),
            }
        }

        fn texts(&self) -> Vec<String> {
            self.texts.lock().unwrap().clone()
        }
    }

    fn list(dir: &Path) -> Vec<String> {
        let Ok(entries) = std::fs::read_dir(dir) else {
            return Vec::new();
        };
        let mut names: Vec<String> = entries
            .map(|entry| entry.unwrap().file_name().to_string_lossy().into_owned())
            .collect();
        names.sort();
        names
    }

    #[async_trait]
    impl LineSynthesizer for Recorder {
        async fn synthesize(&self, line: &ScriptLine) -> tts::Result<Vec<u8>> {
            let mut texts = self.texts.lock().unwrap();
            let index = texts.len();
            texts.push(line.text().to_owned());
            self.chunks_on_disk.lock().unwrap().push(list(&self.temp_dir));

            if self.fail_at == Some(index) {
                return Err(TtsError::RateLimited("quota exhausted".to_owned()));
            }
            if self.corrupt_at == Some(index) {
                return Ok(b"garbage".to_vec());
            }

            #[allow(clippy::cast_possible_truncation)]
            let fill = index as u8 + 1;
            Ok(mp3_frame(fill))
        }

        fn name(&self) -> &str {
            "recorder"
        }
    }

    fn interview() -> Conversation {
        Conversation::new(vec![
            ScriptLine::new(Speaker::Interviewer, "Hello *world*"),
            ScriptLine::new(Speaker::Interviewee, "Hi—there"),
        ])
    }

    fn pipeline(recorder: &Arc<Recorder>, temp_dir: &Path) -> Pipeline {
        Pipeline::new(Box::new(Arc::clone(recorder)), temp_dir, AudioFormat::Mp3)
    }

    #[tokio::test]
    async fn merges_sanitized_lines_in_order_and_cleans_up() {
        let dir = TempDir::new().unwrap();
        let temp = dir.path().join("chunks");
        let output = dir.path().join("output.mp3");
        let recorder = Arc::new(Recorder::new(&temp));

        let path = pipeline(&recorder, &temp).run(&interview(), &output).await.unwrap();

        assert_eq!(path, output);
        assert_eq!(recorder.texts(), vec!["Hello world", "Hithere"]);
        assert_eq!(
            *recorder.chunks_on_disk.lock().unwrap(),
            vec![Vec::<String>::new(), vec!["000.mp3".to_owned()]]
        );

        let mut expected = mp3_frame(1);
        expected.extend(mp3_frame(2));
        assert_eq!(std::fs::read(&output).unwrap(), expected);
        assert!(list(&temp).is_empty());
    }

    #[tokio::test]
    async fn synthesis_failure_stops_before_merge_and_keeps_written_chunks() {
        let dir = TempDir::new().unwrap();
        let temp = dir.path().join("chunks");
        let output = dir.path().join("output.mp3");
        let recorder = Arc::new(Recorder {
            fail_at: Some(1),
            ..Recorder::new(&temp)
        });

        let err = pipeline(&recorder, &temp).run(&interview(), &output).await.unwrap_err();

        match &err {
            PipelineError::Synthesis { index, source } => {
                assert_eq!(*index, 1);
                assert_eq!(*source, TtsError::RateLimited("quota exhausted".to_owned()));
            }
            other => panic!("unexpected error: {other}"),
        }
        assert_eq!(err.stage(), Stage::SynthesizingLine(1));
        assert!(!output.exists());
        assert_eq!(list(&temp), vec!["000.mp3"]);
    }

    #[tokio::test]
    async fn malformed_chunk_fails_the_merge() {
        let dir = TempDir::new().unwrap();
        let temp = dir.path().join("chunks");
        let output = dir.path().join("output.mp3");
        let recorder = Arc::new(Recorder {
            corrupt_at: Some(1),
            ..Recorder::new(&temp)
        });

        let err = pipeline(&recorder, &temp).run(&interview(), &output).await.unwrap_err();

        assert!(matches!(err, PipelineError::Merge(parley_audio::AudioError::Malformed { .. })));
        assert_eq!(err.stage(), Stage::Merging);
        assert!(!output.exists());
        assert_eq!(list(&temp), vec!["000.mp3", "001.mp3"]);
    }

    #[tokio::test]
    async fn empty_conversation_writes_empty_audio() {
        let dir = TempDir::new().unwrap();
        let temp = dir.path().join("chunks");
        let output = dir.path().join("output.mp3");
        let recorder = Arc::new(Recorder::new(&temp));

        let path = pipeline(&recorder, &temp)
            .run(&Conversation::default(), &output)
            .await
            .unwrap();

        assert_eq!(path, output);
        assert!(recorder.texts().is_empty());
        assert!(std::fs::read(&output).unwrap().is_empty());
        assert!(list(&temp).is_empty());
    }

    #[tokio::test]
    async fn existing_nested_temp_dir_is_reused() {
        let dir = TempDir::new().unwrap();
        let temp = dir.path().join("a").join("b");
        std::fs::create_dir_all(&temp).unwrap();
        let recorder = Arc::new(Recorder::new(&temp));

        pipeline(&recorder, &temp)
            .run(&interview(), &dir.path().join("output.mp3"))
            .await
            .unwrap();

        assert!(temp.is_dir());
    }

    #[test]
    fn chunk_names_are_zero_padded() {
        let recorder = Arc::new(Recorder::new(Path::new("/tmp/x")));
        let pipeline = Pipeline::new(Box::new(recorder), "/tmp/x", AudioFormat::Wav);

        assert_eq!(pipeline.chunk_path(7), PathBuf::from("/tmp/x/007.wav"));
        assert_eq!(pipeline.chunk_path(123), PathBuf::from("/tmp/x/123.wav"));
    }
}
