//! Parses the model's labelled plain-text reply into a `QuestionRecord`.
//!
//! Expected shape (labels case-insensitive, order mostly free):
//!
//! ```text
//! Difficulty: medium
//! Question: What does this print?
//! x = [1, 2]
//! Options:
//! A) 1
//! B) 2
//! C) [1, 2]
//! D) Error
//! Answer: B
//! Explanation: len() counts the elements.
//! ```

use thiserror::Error;

use crate::llm_client::strip_code_fences;
use crate::models::{Difficulty, QuestionRecord, OPTION_LABELS};

#[derive(Debug, Error, PartialEq)]
pub enum ParseError {
    #[error("response has no question text")]
    MissingQuestion,

    #[error("expected 4 options, got {0}")]
    OptionCount(usize),

    #[error("options must be labelled A-D in order, got {0:?}")]
    OptionLabels(Vec<String>),

    #[error("response has no answer label")]
    MissingAnswer,

    #[error("response has no explanation")]
    MissingExplanation,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Mode {
    Question,
    Options,
    Answer,
    Explanation,
}

pub fn parse_question(raw: &str) -> Result<QuestionRecord, ParseError> {
    let cleaned = strip_code_fences(raw);
    let lines: Vec<&str> = cleaned.lines().map(str::trim_end).collect();

    let mut mode = Mode::Question;
    let mut difficulty = Difficulty::default();
    let mut question_lines: Vec<&str> = Vec::new();
    let mut options: Vec<String> = Vec::new();
    let mut answer: Option<char> = None;
    let mut explanation = String::new();

    for (i, raw_line) in lines.iter().enumerate() {
        let line = raw_line.trim();
        if line.is_empty() {
            if mode == Mode::Question {
                question_lines.push("");
            }
            continue;
        }

        if let Some(rest) = strip_label(line, "difficulty") {
            difficulty = Difficulty::from_label(rest.rsplit(':').next().unwrap_or(rest));
            mode = Mode::Question;
        } else if let Some(rest) = strip_label(line, "question") {
            if !rest.is_empty() {
                question_lines.push(rest);
            }
            mode = Mode::Question;
        } else if strip_label(line, "options").is_some() {
            mode = Mode::Options;
        } else if matches!(mode, Mode::Question | Mode::Options) && is_option_line(line) {
            options.push(line.to_string());
            mode = Mode::Options;
        } else if let Some(rest) = strip_label(line, "answer") {
            answer = answer_label(rest).or_else(|| {
                lines[i + 1..]
                    .iter()
                    .map(|l| l.trim())
                    .find(|l| !l.is_empty())
                    .and_then(answer_label)
            });
            mode = Mode::Answer;
        } else if let Some(rest) = strip_label(line, "explanation") {
            explanation = rest.to_string();
            mode = Mode::Explanation;
        } else if mode == Mode::Explanation {
            if !explanation.is_empty() {
                explanation.push(' ');
            }
            explanation.push_str(line);
        } else if mode == Mode::Question {
            question_lines.push(*raw_line);
        }
    }

    let question = join_trimmed(&question_lines);
    if question.trim().is_empty() {
        return Err(ParseError::MissingQuestion);
    }

    let labels_ok = options.len() == OPTION_LABELS.len()
        && options
            .iter()
            .zip(OPTION_LABELS)
            .all(|(opt, label)| opt.starts_with(label));
    let options: [String; 4] = match options.try_into() {
        Ok(options) if labels_ok => options,
        Ok(options) => return Err(ParseError::OptionLabels(options.to_vec())),
        Err(options) => return Err(ParseError::OptionCount(options.len())),
    };

    let answer = answer.ok_or(ParseError::MissingAnswer)?;
    let explanation = explanation.trim().to_string();
    if explanation.is_empty() {
        return Err(ParseError::MissingExplanation);
    }

    Ok(QuestionRecord {
        difficulty,
        question,
        options,
        answer: answer.to_string(),
        explanation,
    })
}

/// If `line` starts with `label:` (any case, optional markdown emphasis),
/// returns the trimmed text after the colon.
fn strip_label<'a>(line: &'a str, label: &str) -> Option<&'a str> {
    let line = line.trim_start_matches(['*', '#', ' ']);
    let head = line.get(..label.len())?;
    if !head.eq_ignore_ascii_case(label) {
        return None;
    }
    let rest = line[label.len()..].trim_start_matches('*').trim_start();
    let rest = rest.strip_prefix(':')?;
    Some(rest.trim_start_matches('*').trim())
}

/// `A) text`, `B. text`, `C)text`
fn is_option_line(line: &str) -> bool {
    let mut chars = line.chars();
    let label = chars.next();
    let marker = chars.next();
    let rest = chars.as_str();
    matches!(label, Some('A'..='D')) && matches!(marker, Some('.') | Some(')')) && !rest.trim().is_empty()
}

/// First A–D after dropping `)` and `.`.
fn answer_label(text: &str) -> Option<char> {
    let cleaned: String = text.chars().filter(|c| !matches!(c, ')' | '.')).collect();
    cleaned
        .trim()
        .chars()
        .next()
        .filter(|c| OPTION_LABELS.contains(c))
}

/// Joins lines, dropping leading and trailing blank ones.
fn join_trimmed(lines: &[&str]) -> String {
    let start = lines.iter().position(|l| !l.trim().is_empty());
    let end = lines.iter().rposition(|l| !l.trim().is_empty());
    match (start, end) {
        (Some(start), Some(end)) => lines[start..=end].join("\n"),
        _ => String::new(),
    }
}
