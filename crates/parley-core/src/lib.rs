#![allow(clippy::must_use_candidate)]

mod format;
mod sanitize;
mod script;

pub use format::AudioFormat;
pub use sanitize::{STRIPPED_CHARS, sanitize};
pub use script::{Conversation, ScriptLine, Speaker};
