//! Greedy pixel-budget word wrap.
//!
//! Same algorithm the old line simulator used for bullet fill, but it now
//! returns the wrapped strings instead of fill fractions, and it measures
//! through a caller-supplied closure so any face (TrueType or table) works.

/// Wraps each logical line so that no emitted line is wider than `max_width`.
///
/// - Words are whitespace-delimited and never split. A word wider than the
///   budget gets a line of its own and overflows.
/// - Blank logical lines come out as empty strings, which keeps intentional
///   spacing inside code blocks.
/// - A logical line's leading whitespace is repeated on every line it wraps
///   to, and counts toward the width.
pub fn wrap_lines<S, F>(lines: &[S], max_width: f32, measure: F) -> Vec<String>
where
    S: AsRef<str>,
    F: Fn(&str) -> f32,
{
    let mut wrapped = Vec::new();

    for line in lines {
        let line = line.as_ref();
        let body = line.trim_start();
        if body.is_empty() {
            wrapped.push(String::new());
            continue;
        }
        let indent = &line[..line.len() - body.len()];

        let mut current = String::new();
        for word in body.split_whitespace() {
            let trial = if current.is_empty() {
                format!("{indent}{word}")
            } else {
                format!("{current} {word}")
            };

            if measure(&trial) <= max_width {
                current = trial;
            } else {
                if !current.is_empty() {
                    wrapped.push(current);
                }
                current = format!("{indent}{word}");
            }
        }
        if !current.is_empty() {
            wrapped.push(current);
        }
    }

    wrapped
}

/// Wraps a single free-text block, honouring its embedded line breaks.
pub fn wrap_text<F>(text: &str, max_width: f32, measure: F) -> Vec<String>
where
    F: Fn(&str) -> f32,
{
    let lines: Vec<&str> = text.lines().collect();
    wrap_lines(&lines, max_width, measure)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::layout::font_metrics::{get_metrics, MetricFamily};

    /// 10 px per character, so budgets read as character counts.
    fn per_char(s: &str) -> f32 {
        s.chars().count() as f32 * 10.0
    }

    fn words_of(lines: &[String]) -> Vec<String> {
        lines
            .iter()
            .flat_map(|l| l.split_whitespace().map(str::to_string))
            .collect()
    }

    const SAMPLES: [&str; 4] = [
        "What is the output of the following Python code?",
        "The `upper()` method converts all characters to uppercase and returns a new string.",
        "dict.values() returns a dict_values view object, not a list or set, so printing it shows the wrapper type.",
        "a bb ccc dddd eeeee ffffff ggggggg hhhhhhhh iiiiiiiii jjjjjjjjjj",
    ];

    #[test]
    fn test_short_line_is_unchanged() {
        let out = wrap_lines(&["print(x)"], 900.0, per_char);
        assert_eq!(out, vec!["print(x)".to_string()]);
    }

    #[test]
    fn test_wraps_at_budget() {
        // 11 chars = 110 px fits, 17 chars does not.
        let out = wrap_lines(&["hello world again"], 110.0, per_char);
        assert_eq!(out, vec!["hello world".to_string(), "again".to_string()]);
    }

    #[test]
    fn test_every_line_within_budget_unless_single_word() {
        for budget in [60.0, 150.0, 300.0, 900.0] {
            for sample in SAMPLES {
                for line in wrap_lines(&[sample], budget, per_char) {
                    let single_word = line.split_whitespace().count() == 1;
                    assert!(
                        per_char(&line) <= budget || single_word,
                        "line {line:?} is {} px at budget {budget}",
                        per_char(&line)
                    );
                }
            }
        }
    }

    #[test]
    fn test_word_sequence_is_preserved() {
        let metrics = get_metrics(MetricFamily::Mono);
        let measure = |s: &str| metrics.measure_str(s) * 44.0;
        for budget in [100.0, 420.0, 900.0] {
            let out = wrap_lines(&SAMPLES, budget, measure);
            let expected: Vec<String> = SAMPLES
                .iter()
                .flat_map(|s| s.split_whitespace().map(str::to_string))
                .collect();
            assert_eq!(words_of(&out), expected, "budget {budget}");
        }
    }

    #[test]
    fn test_oversized_word_gets_its_own_line() {
        let out = wrap_lines(&["a supercalifragilistic b"], 50.0, per_char);
        assert_eq!(
            out,
            vec![
                "a".to_string(),
                "supercalifragilistic".to_string(),
                "b".to_string()
            ]
        );
    }

    #[test]
    fn test_empty_logical_lines_pass_through() {
        let out = wrap_lines(&["x = 1", "", "   ", "print(x)"], 900.0, per_char);
        assert_eq!(out, vec!["x = 1", "", "", "print(x)"]);
    }

    #[test]
    fn test_indentation_repeats_on_continuation_lines() {
        let out = wrap_lines(&["    return text.upper() + suffix"], 240.0, per_char);
        assert_eq!(out[0], "    return text.upper()");
        assert!(out[1..].iter().all(|l| l.starts_with("    ")), "{out:?}");
        assert_eq!(words_of(&out), vec!["return", "text.upper()", "+", "suffix"]);
    }

    #[test]
    fn test_wrap_text_splits_on_newlines() {
        let out = wrap_text("first\nsecond", 900.0, per_char);
        assert_eq!(out, vec!["first", "second"]);
    }

    #[test]
    fn test_no_input_no_output() {
        let empty: [&str; 0] = [];
        assert!(wrap_lines(&empty, 900.0, per_char).is_empty());
    }
}
