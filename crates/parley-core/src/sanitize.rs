use crate::script::Conversation;

/// Characters removed from script text before synthesis
///
/// Markdown emphasis markers and em dashes are read aloud or mangled by
/// most TTS engines.
pub const STRIPPED_CHARS: [char; 3] = ['*', '_', '—'];

/// Strip TTS-hostile characters from every line of a conversation
///
/// Returns a new conversation with the same length and speaker order.
/// Nothing else about the text is normalized.
pub fn sanitize(conversation: &Conversation) -> Conversation {
    conversation
        .iter()
        .map(|line| line.with_text(strip(line.text())))
        .collect()
}

fn strip(text: &str) -> String {
    text.chars().filter(|c| !STRIPPED_CHARS.contains(c)).collect()
}
