//! Tab normalisation and best-effort indentation recovery for code snippets.
//!
//! Model output often loses leading whitespace once it has been through line
//! trimming. When a snippet has no indentation at all, it is rebuilt from
//! block-opening colons. Ambiguous input can come out misindented; text that
//! already carries indentation is left alone.

const INDENT: &str = "    ";

/// Statements after which the enclosing block is closed.
const BLOCK_CLOSERS: [&str; 5] = ["return", "pass", "raise", "break", "continue"];

/// Statements that may follow inside the current block without closing it.
const BLOCK_CONTINUERS: [&str; 9] = [
    "return", "pass", "raise", "break", "continue", "print", "if", "else", "elif",
];

pub fn expand_tabs(line: &str) -> String {
    line.replace('\t', INDENT)
}

/// Splits `text` into display lines, expanding tabs and restoring
/// indentation when the source carries none.
pub fn prepare_code(text: &str) -> Vec<String> {
    let lines: Vec<String> = text
        .lines()
        .map(|l| expand_tabs(l.trim_end()))
        .collect();

    let already_indented = lines
        .iter()
        .any(|l| !l.trim().is_empty() && l.starts_with(' '));
    if already_indented {
        return lines;
    }

    reindent(&lines)
}

fn reindent(lines: &[String]) -> Vec<String> {
    let mut processed = Vec::with_capacity(lines.len());
    let mut level = 0usize;

    for (i, line) in lines.iter().enumerate() {
        let stripped = line.trim();
        if stripped.is_empty() {
            processed.push(String::new());
            continue;
        }

        processed.push(format!("{}{}", INDENT.repeat(level), stripped));

        if stripped.ends_with(':') {
            level += 1;
        } else if level > 0 {
            if starts_with_keyword(stripped, &BLOCK_CLOSERS) {
                level -= 1;
            } else {
                let next = lines.get(i + 1).map(|l| l.trim()).unwrap_or("");
                if !next.is_empty() && !starts_with_keyword(next, &BLOCK_CONTINUERS) {
                    level = 0;
                }
            }
        }
    }

    processed
}

/// True when the first identifier of `line` is one of `keywords`
/// (`print(x)` matches `print`, `printer = 1` does not).
fn starts_with_keyword(line: &str, keywords: &[&str]) -> bool {
    let head = line
        .split(|c: char| !(c.is_alphanumeric() || c == '_'))
        .next()
        .unwrap_or("");
    keywords.contains(&head)
}
