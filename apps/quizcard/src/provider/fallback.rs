//! Built-in question bank used whenever the model cannot supply a usable
//! question. Every entry satisfies the record invariants.

use rand::seq::SliceRandom;
use rand::Rng;

use crate::models::{Difficulty, QuestionRecord};

fn record(
    difficulty: Difficulty,
    question: &str,
    options: [&str; 4],
    answer: &str,
    explanation: &str,
) -> QuestionRecord {
    QuestionRecord {
        difficulty,
        question: question.to_string(),
        options: options.map(str::to_string),
        answer: answer.to_string(),
        explanation: explanation.to_string(),
    }
}

pub fn fallback_questions() -> Vec<QuestionRecord> {
    vec![
        record(
            Difficulty::Easy,
            "What is the output of the following Python code?\n\n\
             my_dict = {'a': 1, 'b': 2, 'c': 3}\n\
             result = my_dict.values()\n\
             print(result)",
            [
                "A) {1, 2, 3}",
                "B) [1, 2, 3]",
                "C) {'a': 1, 'b': 2, 'c': 3}",
                "D) dict_values([1, 2, 3])",
            ],
            "D",
            "`dict.values()` returns a dict_values object, not a list or set.",
        ),
        record(
            Difficulty::Easy,
            "What is the output of the following Python code?\n\n\
             def uppercase_text(text):\n    return text.upper()\n\n\
             result = uppercase_text(\"Hello, world!\")\n\
             print(result)",
            [
                "A) \"Hello, world!\"",
                "B) \"HELLO, WORLD!\"",
                "C) \"hello, world!\"",
                "D) Error",
            ],
            "B",
            "The `upper()` method converts all characters to uppercase.",
        ),
        record(
            Difficulty::Medium,
            "What is the output of the following Python code?\n\n\
             x = [1, 2, 3]\n\
             y = x\n\
             y.append(4)\n\
             print(len(x))",
            ["A) 3", "B) 4", "C) Error", "D) None"],
            "B",
            "`y = x` binds a second name to the same list, so appending through `y` changes `x` too.",
        ),
        record(
            Difficulty::Hard,
            "What is the output of the following Python code?\n\n\
             def add(item, items=[]):\n    items.append(item)\n    return items\n\n\
             add(1)\n\
             print(add(2))",
            ["A) [2]", "B) [1, 2]", "C) [1]", "D) Error"],
            "B",
            "Default arguments are evaluated once, so both calls share the same list.",
        ),
    ]
}

/// Uniformly random bank entry.
pub fn pick_fallback<R: Rng + ?Sized>(rng: &mut R) -> QuestionRecord {
    let bank = fallback_questions();
    // The bank is a non-empty literal.
    bank.choose(rng).cloned().unwrap_or_else(|| bank[0].clone())
}

pub fn random_fallback() -> QuestionRecord {
    pick_fallback(&mut rand::thread_rng())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::OPTION_LABELS;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn test_every_fallback_satisfies_invariants() {
        for record in fallback_questions() {
            for (opt, label) in record.options.iter().zip(OPTION_LABELS) {
                assert!(opt.starts_with(label), "{opt:?} should start with {label}");
            }
            assert!(
                record.options.iter().any(|o| o.starts_with(record.answer.as_str())),
                "answer {} must match an option",
                record.answer
            );
            assert!(!record.explanation.trim().is_empty());
            assert!(!record.question.trim().is_empty());
        }
    }

    #[test]
    fn test_pick_covers_whole_bank() {
        let bank = fallback_questions();
        let mut rng = StdRng::seed_from_u64(7);
        let mut seen = vec![false; bank.len()];
        for _ in 0..200 {
            let picked = pick_fallback(&mut rng);
            let idx = bank.iter().position(|r| *r == picked).unwrap();
            seen[idx] = true;
        }
        assert!(seen.iter().all(|s| *s), "every entry should be reachable: {seen:?}");
    }
}
