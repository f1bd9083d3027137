//! The haiku artifact served by `/api/haiku`.

use serde::{Deserialize, Serialize};

/// Number of lines in every artifact.
pub const POEM_LINES: usize = 3;

/// One structured haiku: three lines of verse encoding one real fact.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PoemArtifact {
    /// Short lowercase slug (e.g. "planes")
    pub id: String,
    /// Exactly three lines, 5-7-5 syllables
    pub lines: Vec<String>,
    /// One sentence stating the fact the verse encodes
    pub fact: String,
    /// A single emoji tag
    pub emoji: String,
}

impl PoemArtifact {
    pub fn new(id: &str, lines: [&str; POEM_LINES], fact: &str, emoji: &str) -> Self {
        Self {
            id: id.to_string(),
            lines: lines.iter().map(|l| l.to_string()).collect(),
            fact: fact.to_string(),
            emoji: emoji.to_string(),
        }
    }

    /// Whether every field is present and non-empty and `lines` has exactly
    /// three entries.
    pub fn is_complete(&self) -> bool {
        let filled = |s: &str| !s.trim().is_empty();
        filled(&self.id)
            && filled(&self.fact)
            && filled(&self.emoji)
            && self.lines.len() == POEM_LINES
            && self.lines.iter().all(|l| filled(l))
    }
}
