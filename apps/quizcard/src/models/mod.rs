pub mod question;
pub mod slide;

pub use question::{Difficulty, QuestionRecord, OPTION_LABELS};
pub use slide::{SequenceId, SlideKind};
