//! The content unit for one slide pair.

use serde::{Deserialize, Serialize};

/// Option labels, in display order.
pub const OPTION_LABELS: [char; 4] = ['A', 'B', 'C', 'D'];

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Difficulty {
    #[default]
    Easy,
    Medium,
    Hard,
}

impl Difficulty {
    /// Lenient parse: anything that is not "medium" or "hard" is `Easy`.
    pub fn from_label(label: &str) -> Self {
        match label.trim().to_ascii_lowercase().as_str() {
            "medium" => Difficulty::Medium,
            "hard" => Difficulty::Hard,
            _ => Difficulty::Easy,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Difficulty::Easy => "easy",
            Difficulty::Medium => "medium",
            Difficulty::Hard => "hard",
        }
    }
}

/// A multiple-choice question as it will be rendered.
///
/// `options` holds exactly four entries, each starting with its label
/// (`"A) ..."`, `"B. ..."`). The provider enforces that before a record
/// is built, so the composer never sees a malformed option list.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QuestionRecord {
    #[serde(default)]
    pub difficulty: Difficulty,
    pub question: String,
    pub options: [String; 4],
    pub answer: String,
    pub explanation: String,
}

impl QuestionRecord {
    /// The option whose text starts with the answer label.
    ///
    /// Falls back to the raw label when nothing matches, so a bad label
    /// degrades the slide instead of failing the run.
    pub fn resolved_answer(&self) -> &str {
        let label = self.answer.trim();
        if label.is_empty() {
            return &self.answer;
        }
        self.options
            .iter()
            .find(|opt| opt.starts_with(label))
            .map(String::as_str)
            .unwrap_or(label)
    }
}
