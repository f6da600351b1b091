//! PCM WAV via `hound`

use std::{io::Cursor, time::Duration};

use hound::{SampleFormat, WavReader, WavSpec, WavWriter};

use crate::{error::CodecError, segment::Segment};

#[derive(Debug, Clone, PartialEq)]
enum Samples {
    Int(Vec<i32>),
    Float(Vec<f32>),
}

impl Samples {
    fn len(&self) -> usize {
        match self {
            Self::Int(samples) => samples.len(),
            Self::Float(samples) => samples.len(),
        }
    }
}

/// Interleaved samples of one or more joined WAV chunks
#[derive(Debug)]
pub(crate) struct WavSegment {
    spec: WavSpec,
    samples: Samples,
}

fn codec_error(e: &hound::Error) -> CodecError {
    CodecError::new(e.to_string())
}

fn describe(spec: &WavSpec) -> String {
    format!(
        "{} ch, {} Hz, {}-bit {:?}",
        spec.channels, spec.sample_rate, spec.bits_per_sample, spec.sample_format
    )
}

/// Layout used when nothing was merged: 16-bit mono at 24 kHz, as LINEAR16 synthesis returns
const EMPTY_SPEC: WavSpec = WavSpec {
    channels: 1,
    sample_rate: 24_000,
    bits_per_sample: 16,
    sample_format: SampleFormat::Int,
};

impl Segment for WavSegment {
    fn empty() -> Self {
        Self {
            spec: EMPTY_SPEC,
            samples: Samples::Int(Vec::new()),
        }
    }

    fn decode(bytes: &[u8]) -> Result<Self, CodecError> {
        let reader = WavReader::new(Cursor::new(bytes)).map_err(|e| codec_error(&e))?;
        let spec = reader.spec();

        let samples = match spec.sample_format {
            SampleFormat::Int => Samples::Int(
                reader
                    .into_samples::<i32>()
                    .collect::<Result<_, _>>()
                    .map_err(|e| codec_error(&e))?,
            ),
            SampleFormat::Float => Samples::Float(
                reader
                    .into_samples::<f32>()
                    .collect::<Result<_, _>>()
                    .map_err(|e| codec_error(&e))?,
            ),
        };

        Ok(Self { spec, samples })
    }

    fn append(&mut self, other: Self) -> Result<(), CodecError> {
        if self.spec != other.spec {
            return Err(CodecError::new(format!(
                "expected {}, found {}",
                describe(&self.spec),
                describe(&other.spec)
            )));
        }

        match (&mut self.samples, other.samples) {
            (Samples::Int(ours), Samples::Int(theirs)) => ours.extend(theirs),
            (Samples::Float(ours), Samples::Float(theirs)) => ours.extend(theirs),
            _ => return Err(CodecError::new("sample formats differ")),
        }
        Ok(())
    }

    fn encode(&self) -> Result<Vec<u8>, CodecError> {
        let mut buf = Vec::new();
        let mut writer = WavWriter::new(Cursor::new(&mut buf), self.spec).map_err(|e| codec_error(&e))?;

        match &self.samples {
            Samples::Int(samples) => {
                for sample in samples {
                    writer.write_sample(*sample).map_err(|e| codec_error(&e))?;
                }
            }
            Samples::Float(samples) => {
                for sample in samples {
                    writer.write_sample(*sample).map_err(|e| codec_error(&e))?;
                }
            }
        }

        writer.finalize().map_err(|e| codec_error(&e))?;
        Ok(buf)
    }

    fn duration(&self) -> Duration {
        let frames = self.samples.len() / usize::from(self.spec.channels.max(1));
        #[allow(clippy::cast_precision_loss)]
        let frames = frames as f64;
        Duration::from_secs_f64(frames / f64::from(self.spec.sample_rate.max(1)))
    }
}
