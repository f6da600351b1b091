use parley_core::Speaker;
use secrecy::SecretString;
use serde::Deserialize;
use url::Url;

/// Top-level TTS configuration
#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct TtsConfig {
    /// Provider used for every line of a run
    #[serde(default)]
    pub provider: TtsProviderType,
    /// Google Cloud Text-to-Speech settings
    #[serde(default)]
    pub google: GoogleTtsConfig,
    /// `ElevenLabs` settings
    #[serde(default)]
    pub elevenlabs: ElevenLabsConfig,
}

/// Supported TTS providers
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize, strum::Display)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum TtsProviderType {
    /// Google Cloud Text-to-Speech
    #[default]
    Google,
    /// `ElevenLabs`
    Elevenlabs,
}

/// Google Cloud Text-to-Speech settings
#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct GoogleTtsConfig {
    /// API key
    #[serde(default)]
    pub api_key: Option<SecretString>,
    /// Base URL override
    #[serde(default)]
    pub base_url: Option<Url>,
    /// BCP-47 language code (e.g. "en-US")
    #[serde(default = "default_language_code")]
    pub language_code: String,
    /// Audio effects profile applied to the output
    #[serde(default = "default_effects_profile")]
    pub effects_profile_id: Option<String>,
    /// Voice per speaker role
    #[serde(default)]
    pub voices: GoogleVoices,
}

impl Default for GoogleTtsConfig {
    fn default() -> Self {
        Self {
            api_key: None,
            base_url: None,
            language_code: default_language_code(),
            effects_profile_id: default_effects_profile(),
            voices: GoogleVoices::default(),
        }
    }
}

/// Google voices for each speaker role
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct GoogleVoices {
    pub interviewer: GoogleVoice,
    pub interviewee: GoogleVoice,
}

impl GoogleVoices {
    pub const fn for_speaker(&self, speaker: Speaker) -> &GoogleVoice {
        match speaker {
            Speaker::Interviewer => &self.interviewer,
            Speaker::Interviewee => &self.interviewee,
        }
    }
}

impl Default for GoogleVoices {
    fn default() -> Self {
        Self {
            interviewer: GoogleVoice {
                name: "en-US-Journey-F".to_owned(),
                ssml_gender: SsmlGender::Female,
            },
            interviewee: GoogleVoice {
                name: "en-US-Journey-D".to_owned(),
                ssml_gender: SsmlGender::Male,
            },
        }
    }
}

/// A named Google voice
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct GoogleVoice {
    /// Voice name (e.g. "en-US-Journey-F")
    pub name: String,
    /// Gender hint sent alongside the voice name
    #[serde(default)]
    pub ssml_gender: SsmlGender,
}

/// SSML voice gender understood by Google
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize, strum::Display, strum::IntoStaticStr)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "SCREAMING_SNAKE_CASE")]
pub enum SsmlGender {
    #[default]
    Unspecified,
    Male,
    Female,
    Neutral,
}

/// `ElevenLabs` settings
#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ElevenLabsConfig {
    /// API key
    #[serde(default)]
    pub api_key: Option<SecretString>,
    /// Base URL override
    #[serde(default)]
    pub base_url: Option<Url>,
    /// Model identifier (e.g. "`eleven_multilingual_v2`")
    #[serde(default = "default_elevenlabs_model")]
    pub model: String,
    /// Voice id per speaker role
    #[serde(default)]
    pub voices: VoiceMapping,
}

impl Default for ElevenLabsConfig {
    fn default() -> Self {
        Self {
            api_key: None,
            base_url: None,
            model: default_elevenlabs_model(),
            voices: VoiceMapping::default(),
        }
    }
}

/// Provider voice identifier per speaker role
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct VoiceMapping {
    pub interviewer: String,
    pub interviewee: String,
}

impl VoiceMapping {
    pub fn for_speaker(&self, speaker: Speaker) -> &str {
        match speaker {
            Speaker::Interviewer => &self.interviewer,
            Speaker::Interviewee => &self.interviewee,
        }
    }
}

impl Default for VoiceMapping {
    fn default() -> Self {
        // Premade "Chris" and "Charlie" voices
        Self {
            interviewer: "iP95p4xoKVk53GoZ742B".to_owned(),
            interviewee: "IKne3meq5aSn9XLyUdCD".to_owned(),
        }
    }
}

fn default_language_code() -> String {
    "en-US".to_owned()
}

#[allow(clippy::unnecessary_wraps)]
fn default_effects_profile() -> Option<String> {
    Some("small-bluetooth-speaker-class-device".to_owned())
}

fn default_elevenlabs_model() -> String {
    "eleven_multilingual_v2".to_owned()
}
