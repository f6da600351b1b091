//! MPEG audio frame stream
//!
//! Chunks are demuxed with `symphonia` and joined at the frame level: each
//! packet the reader returns is one complete MPEG frame, header included, so
//! appending packets in order merges the audio without a lossy re-encode.

use std::{
    io::{Cursor, ErrorKind},
    time::Duration,
};

use symphonia::core::{
    codecs::CodecType,
    errors::Error as SymphoniaError,
    formats::FormatOptions,
    io::{MediaSourceStream, MediaSourceStreamOptions},
    meta::MetadataOptions,
    probe::Hint,
};

use crate::{error::CodecError, segment::Segment};

/// Properties every frame of a merged stream must share
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct StreamParams {
    codec: CodecType,
    sample_rate: u32,
}

/// Audio frames of one or more joined MP3 chunks
#[derive(Debug, Default)]
pub(crate) struct Mp3Segment {
    /// `None` until the first frames are appended
    params: Option<StreamParams>,
    frames: usize,
    samples: u64,
    data: Vec<u8>,
}

impl Segment for Mp3Segment {
    /// A zero-frame stream, which encodes to an empty file
    fn empty() -> Self {
        Self::default()
    }

    fn decode(bytes: &[u8]) -> Result<Self, CodecError> {
        let source = MediaSourceStream::new(
            Box::new(Cursor::new(bytes.to_vec())),
            MediaSourceStreamOptions::default(),
        );

        let mut hint = Hint::new();
        hint.with_extension("mp3");

        let detected = symphonia::default::get_probe()
            .format(&hint, source, &FormatOptions::default(), &MetadataOptions::default())
            .map_err(|e| CodecError::new(format!("not an MPEG audio stream: {e}")))?;
        let mut reader = detected.format;

        let track = reader
            .default_track()
            .ok_or_else(|| CodecError::new("no audio track found"))?;
        let track_id = track.id;
        let params = StreamParams {
            codec: track.codec_params.codec,
            sample_rate: track
                .codec_params
                .sample_rate
                .ok_or_else(|| CodecError::new("audio track has no sample rate"))?,
        };

        let mut frames = 0;
        let mut samples = 0u64;
        let mut data = Vec::with_capacity(bytes.len());

        loop {
            let packet = match reader.next_packet() {
                Ok(packet) => packet,
                // End of stream, including padding or a final frame cut short
                Err(SymphoniaError::IoError(e)) if e.kind() == ErrorKind::UnexpectedEof => break,
                Err(e) => return Err(CodecError::new(format!("unreadable MPEG frame after {frames} frame(s): {e}"))),
            };

            if packet.track_id() != track_id {
                continue;
            }

            data.extend_from_slice(packet.buf());
            frames += 1;
            samples += packet.dur;
        }

        if frames == 0 {
            return Err(CodecError::new("no MPEG audio frames found"));
        }

        Ok(Self {
            params: Some(params),
            frames,
            samples,
            data,
        })
    }

    fn append(&mut self, other: Self) -> Result<(), CodecError> {
        match (self.params, other.params) {
            (Some(ours), Some(theirs)) if ours.sample_rate != theirs.sample_rate => {
                return Err(CodecError::new(format!(
                    "expected {} Hz, found {} Hz",
                    ours.sample_rate, theirs.sample_rate
                )));
            }
            (Some(ours), Some(theirs)) if ours.codec != theirs.codec => {
                return Err(CodecError::new("MPEG layers differ"));
            }
            (None, theirs) => self.params = theirs,
            _ => {}
        }

        self.frames += other.frames;
        self.samples += other.samples;
        self.data.extend_from_slice(&other.data);
        Ok(())
    }

    fn encode(&self) -> Result<Vec<u8>, CodecError> {
        Ok(self.data.clone())
    }

    fn duration(&self) -> Duration {
        let Some(params) = self.params else {
            return Duration::ZERO;
        };
        #[allow(clippy::cast_precision_loss)]
        let samples = self.samples as f64;
        Duration::from_secs_f64(samples / f64::from(params.sample_rate))
    }
}
