//! Ordered merge of per-line audio chunks
//!
//! Each input is decoded per its format, appended to the audio before it, and
//! the result is encoded into one output file of the same format.

#![allow(clippy::must_use_candidate, clippy::missing_errors_doc)]

mod error;
mod mp3;
mod segment;
mod wav;

use std::{
    ffi::OsString,
    path::{Path, PathBuf},
    time::Duration,
};

pub use error::AudioError;
use parley_core::AudioFormat;

use crate::{mp3::Mp3Segment, segment::Segment, wav::WavSegment};

/// Merge `files` in order into a single file at `output`
///
/// The merged audio is written to a sibling `.part` file and renamed into
/// place, so `output` only ever holds a complete merge. Returns the playback
/// length of the merged audio.
///
/// With no inputs the output is a valid file holding no audio.
pub fn merge<P: AsRef<Path>>(files: &[P], output: &Path, format: AudioFormat) -> Result<Duration, AudioError> {
    let encoded = match format {
        AudioFormat::Mp3 => merge_as::<Mp3Segment, _>(files, format)?,
        AudioFormat::Wav => merge_as::<WavSegment, _>(files, format)?,
    };

    write_atomically(output, &encoded.bytes)?;

    tracing::info!(
        "Merged {} {format} file(s) into {} ({:.1}s)",
        files.len(),
        output.display(),
        encoded.duration.as_secs_f64()
    );

    Ok(encoded.duration)
}

struct Encoded {
    bytes: Vec<u8>,
    duration: Duration,
}

fn merge_as<S: Segment, P: AsRef<Path>>(files: &[P], format: AudioFormat) -> Result<Encoded, AudioError> {
    if files.is_empty() {
        tracing::debug!("No {format} inputs, writing empty audio");
    }

    let mut merged: Option<S> = None;

    for path in files {
        let path = path.as_ref();
        let bytes = std::fs::read(path).map_err(|source| AudioError::Read {
            path: path.to_path_buf(),
            source,
        })?;

        let segment = S::decode(&bytes).map_err(|e| AudioError::Malformed {
            path: path.to_path_buf(),
            format,
            reason: e.0,
        })?;

        tracing::debug!("Decoded {} ({:.2}s)", path.display(), segment.duration().as_secs_f64());

        merged = Some(match merged.take() {
            None => segment,
            Some(mut merged) => {
                merged.append(segment).map_err(|e| AudioError::Incompatible {
                    path: path.to_path_buf(),
                    reason: e.0,
                })?;
                merged
            }
        });
    }

    let merged = merged.unwrap_or_else(S::empty);
    let bytes = merged
        .encode()
        .map_err(|e| AudioError::Encode { format, reason: e.0 })?;

    Ok(Encoded {
        bytes,
        duration: merged.duration(),
    })
}

fn part_path(output: &Path) -> PathBuf {
    let mut name = output.file_name().map_or_else(OsString::new, ToOwned::to_owned);
    name.push(".part");
    output.with_file_name(name)
}

fn write_atomically(output: &Path, bytes: &[u8]) -> Result<(), AudioError> {
    let part = part_path(output);

    let result = std::fs::write(&part, bytes).and_then(|()| std::fs::rename(&part, output));

    result.map_err(|source| {
        match std::fs::remove_file(&part) {
            Ok(()) => {}
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {}
            Err(e) => tracing::warn!("Failed to remove partial output {}: {e}", part.display()),
        }
        AudioError::Write {
            path: output.to_path_buf(),
            source,
        }
    })
}
