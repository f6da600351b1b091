use serde::Deserialize;

/// Encoded audio format for chunks and the merged output
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Deserialize, strum::Display, strum::EnumString)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum AudioFormat {
    /// MPEG-1/2 audio layer III
    #[default]
    Mp3,
    /// RIFF WAVE with PCM samples
    Wav,
}

impl AudioFormat {
    /// File extension used for files of this format, without the dot
    pub const fn extension(self) -> &'static str {
        match self {
            Self::Mp3 => "mp3",
            Self::Wav => "wav",
        }
    }

    /// MIME type reported by providers for this format
    pub const fn mime_type(self) -> &'static str {
        match self {
            Self::Mp3 => "audio/mpeg",
            Self::Wav => "audio/wav",
        }
    }
}
