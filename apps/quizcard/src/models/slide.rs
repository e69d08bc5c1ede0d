use std::fmt;

use serde::{Deserialize, Serialize};

/// Names one question/answer slide pair.
///
/// `post` is `None` for single-post-per-day runs and `Some(1 | 2)` when two
/// posts share a day.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct SequenceId {
    pub day: u32,
    pub post: Option<u8>,
}

impl SequenceId {
    pub fn daily(day: u32) -> Self {
        Self { day, post: None }
    }

    pub fn with_post(day: u32, post: u8) -> Self {
        Self {
            day,
            post: Some(post),
        }
    }

    /// Text drawn centered at the top of the card.
    pub fn label(&self) -> String {
        match self.post {
            Some(post) => format!("Day {} - Post {}", self.day, post),
            None => format!("Day {}", self.day),
        }
    }

    /// File stem shared by both slides of the pair.
    pub fn file_stem(&self) -> String {
        match self.post {
            Some(post) => format!("day_{}_post_{}", self.day, post),
            None => format!("day_{}", self.day),
        }
    }
}

impl fmt::Display for SequenceId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.label())
    }
}

/// Which slide of the pair is being rendered.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SlideKind {
    Question,
    Answer,
}

impl SlideKind {
    pub const ALL: [SlideKind; 2] = [SlideKind::Question, SlideKind::Answer];

    /// Output subdirectory, relative to the output root.
    pub fn directory(&self) -> &'static str {
        match self {
            SlideKind::Question => "slides",
            SlideKind::Answer => "answers",
        }
    }

    pub fn file_name(&self, sequence: &SequenceId) -> String {
        match self {
            SlideKind::Question => format!("{}.png", sequence.file_stem()),
            SlideKind::Answer => format!("{}_answer.png", sequence.file_stem()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_label_without_post() {
        assert_eq!(SequenceId::daily(4).label(), "Day 4");
    }

    #[test]
    fn test_label_with_post() {
        assert_eq!(SequenceId::with_post(4, 2).label(), "Day 4 - Post 2");
    }

    #[test]
    fn test_file_names_per_kind() {
        let seq = SequenceId::with_post(3, 1);
        assert_eq!(SlideKind::Question.file_name(&seq), "day_3_post_1.png");
        assert_eq!(SlideKind::Answer.file_name(&seq), "day_3_post_1_answer.png");

        let seq = SequenceId::daily(7);
        assert_eq!(SlideKind::Question.file_name(&seq), "day_7.png");
        assert_eq!(SlideKind::Answer.file_name(&seq), "day_7_answer.png");
    }
}
