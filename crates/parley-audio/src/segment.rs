use std::time::Duration;

use crate::error::CodecError;

/// Decoded audio that can be extended in place and written back out
pub(crate) trait Segment: Sized {
    /// Segment holding no audio, the result of merging nothing
    fn empty() -> Self;

    fn decode(bytes: &[u8]) -> Result<Self, CodecError>;

    /// Append `other` after the audio already held
    ///
    /// Fails when the two segments cannot share one output stream.
    fn append(&mut self, other: Self) -> Result<(), CodecError>;

    fn encode(&self) -> Result<Vec<u8>, CodecError>;

    fn duration(&self) -> Duration;
}
