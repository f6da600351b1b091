use serde::{Deserialize, Serialize};

/// Role of the voice speaking a line
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, strum::Display)]
pub enum Speaker {
    /// Host asking the questions
    Interviewer,
    /// Guest answering them
    Interviewee,
}

/// A single speaker turn in a conversation script
///
/// Lines are immutable; rewriting the text produces a new line.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScriptLine {
    speaker: Speaker,
    text: String,
}

impl ScriptLine {
    pub fn new(speaker: Speaker, text: impl Into<String>) -> Self {
        Self {
            speaker,
            text: text.into(),
        }
    }

    pub const fn speaker(&self) -> Speaker {
        self.speaker
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    /// Copy of this line with the same speaker and new text
    #[must_use]
    pub fn with_text(&self, text: impl Into<String>) -> Self {
        Self::new(self.speaker, text)
    }
}

/// Ordered script lines in playback order
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Conversation {
    lines: Vec<ScriptLine>,
}

impl Conversation {
    pub const fn new(lines: Vec<ScriptLine>) -> Self {
        Self { lines }
    }

    /// Parse a conversation from a JSON array of `{speaker, text}` objects
    ///
    /// # Errors
    ///
    /// Returns an error if the input is not a valid JSON conversation
    pub fn from_json(input: &str) -> serde_json::Result<Self> {
        serde_json::from_str(input)
    }

    pub fn lines(&self) -> &[ScriptLine] {
        &self.lines
    }

    pub fn iter(&self) -> std::slice::Iter<'_, ScriptLine> {
        self.lines.iter()
    }

    pub fn len(&self) -> usize {
        self.lines.len()
    }

    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    /// Speakers in playback order
    pub fn speakers(&self) -> impl Iterator<Item = Speaker> + '_ {
        self.lines.iter().map(ScriptLine::speaker)
    }
}

impl From<Vec<ScriptLine>> for Conversation {
    fn from(lines: Vec<ScriptLine>) -> Self {
        Self::new(lines)
    }
}

impl FromIterator<ScriptLine> for Conversation {
    fn from_iter<I: IntoIterator<Item = ScriptLine>>(iter: I) -> Self {
        Self::new(iter.into_iter().collect())
    }
}

impl<'a> IntoIterator for &'a Conversation {
    type Item = &'a ScriptLine;
    type IntoIter = std::slice::Iter<'a, ScriptLine>;

    fn into_iter(self) -> Self::IntoIter {
        self.lines.iter()
    }
}
