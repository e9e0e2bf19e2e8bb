//! Line normalization: turn a config file into logical lines.
//!
//! A physical line goes through these steps:
//!
//! 1. Note whether it is indented, then trim it. Blank lines and lines
//!    starting with `#` are dropped.
//! 2. Split it into words. An unescaped `#` ends the line; runs of
//!    whitespace separate words. A backslash escapes the next character:
//!    `\#`, `\\` and `\<whitespace>` produce the literal character, and the
//!    escaped whitespace stays inside its word.
//! 3. Indented lines are appended to the previous logical line.
//! 4. `source <path>` splices in the logical lines of another file, which is
//!    normalized recursively with the same rules.
//!
//! Everything is materialized before dispatch starts, so a read failure in a
//! sourced file aborts the parse before any field is touched.

use std::path::{Path, PathBuf};

use crate::error::ParseError;

const SOURCE_DIRECTIVE: &str = "source";

/// One assembled option statement.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LogicalLine {
    /// File the statement was read from (the sourced file for spliced lines).
    pub path: PathBuf,
    /// 1-based physical line number where the statement starts.
    pub line: usize,
    /// The option key followed by its value tokens.
    pub words: Vec<String>,
}

impl LogicalLine {
    /// The option key.
    pub fn key(&self) -> &str {
        self.words.first().map(String::as_str).unwrap_or_default()
    }

    /// Value tokens following the key.
    pub fn values(&self) -> &[String] {
        self.words.get(1..).unwrap_or_default()
    }

    /// The normalized text: all words joined by a single space.
    pub fn text(&self) -> String {
        self.words.join(" ")
    }
}

/// Read and normalize the file at `path`.
pub fn normalize(path: impl AsRef<Path>) -> Result<Vec<LogicalLine>, ParseError> {
    let path = path.as_ref();
    let mut stack = Vec::new();
    normalize_file(path, &mut stack)
}

/// Normalize in-memory `content` as if it had been read from `origin`.
///
/// `source` directives are still resolved against the filesystem.
pub fn normalize_str(content: &str, origin: impl AsRef<Path>) -> Result<Vec<LogicalLine>, ParseError> {
    let origin = origin.as_ref();
    let mut stack = vec![canonical(origin)];
    normalize_content(content, origin, &mut stack)
}

fn normalize_file(path: &Path, stack: &mut Vec<PathBuf>) -> Result<Vec<LogicalLine>, ParseError> {
    let content = std::fs::read_to_string(path).map_err(|e| ParseError::Io {
        path: path.to_path_buf(),
        source: e,
    })?;
    tracing::debug!(path = %path.display(), "normalizing config file");

    stack.push(canonical(path));
    let lines = normalize_content(&content, path, stack);
    stack.pop();
    lines
}

fn normalize_content(
    content: &str,
    path: &Path,
    stack: &mut Vec<PathBuf>,
) -> Result<Vec<LogicalLine>, ParseError> {
    let mut lines: Vec<LogicalLine> = Vec::new();
    let mut seen_statement = false;

    for (i, raw) in content.lines().enumerate() {
        let no = i + 1;
        let indented = raw.starts_with(char::is_whitespace);
        let trimmed = raw.trim();
        if trimmed.is_empty() || trimmed.starts_with('#') {
            continue;
        }

        let words = split_words(trimmed);
        if words.is_empty() {
            continue;
        }

        if indented {
            let Some(prev) = lines.last_mut() else {
                let path = path.to_path_buf();
                return Err(if seen_statement {
                    ParseError::NothingToContinue { path, line: no }
                } else {
                    ParseError::IndentedFirstLine { path, line: no }
                });
            };
            prev.words.extend(words);
            continue;
        }
        seen_statement = true;

        if words[0] == SOURCE_DIRECTIVE && words.len() > 1 {
            let target = PathBuf::from(words[1..].join(" "));
            if stack.contains(&canonical(&target)) {
                return Err(ParseError::SourceCycle {
                    path: path.to_path_buf(),
                    line: no,
                    target,
                });
            }
            tracing::debug!(from = %path.display(), line = no, target = %target.display(), "sourcing file");
            lines.extend(normalize_file(&target, stack)?);
            continue;
        }

        lines.push(LogicalLine {
            path: path.to_path_buf(),
            line: no,
            words,
        });
    }

    Ok(lines)
}

/// Files on the include stack are compared by canonical path when they exist.
fn canonical(path: &Path) -> PathBuf {
    path.canonicalize().unwrap_or_else(|_| path.to_path_buf())
}

/// Split one trimmed line into words, applying comment and escape rules.
fn split_words(line: &str) -> Vec<String> {
    let mut words = Vec::new();
    let mut word = String::new();
    let mut escaped = false;

    for c in line.chars() {
        if escaped {
            // `\#`, `\\`, `\ ` and `\x` all yield the character itself.
            word.push(c);
            escaped = false;
            continue;
        }
        match c {
            '\\' => escaped = true,
            '#' => break,
            c if c.is_whitespace() => {
                if !word.is_empty() {
                    words.push(std::mem::take(&mut word));
                }
            }
            c => word.push(c),
        }
    }

    if !word.is_empty() {
        words.push(word);
    }
    words
}
