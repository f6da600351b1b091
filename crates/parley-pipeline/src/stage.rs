use std::fmt;

/// Position of a run in the pipeline state machine
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Stage {
    Idle,
    Sanitizing,
    /// Synthesizing and writing the chunk for the line at this index
    SynthesizingLine(usize),
    Merging,
    CleaningUp,
    Done,
    Failed,
}

impl Stage {
    pub const fn is_terminal(self) -> bool {
        matches!(self, Self::Done | Self::Failed)
    }
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Idle => f.write_str("idle"),
            Self::Sanitizing => f.write_str("sanitizing"),
            Self::SynthesizingLine(index) => write!(f, "synthesizing line {index}"),
            Self::Merging => f.write_str("merging"),
            Self::CleaningUp => f.write_str("cleaning up"),
            Self::Done => f.write_str("done"),
            Self::Failed => f.write_str("failed"),
        }
    }
}
