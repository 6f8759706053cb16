//! Directive classifier.
//!
//! Decides whether one file needs the `"use client"` directive using
//! lexical heuristics only:
//!
//! 1. both quote styles of the directive are rewritten to [`DIRECTIVE`];
//! 2. line and block comments are removed;
//! 3. a file that still contains the directive is never flagged;
//! 4. a file mentioning a server-only data-fetching function is never flagged;
//! 5. otherwise string literals are removed as well and the four client
//!    signals are tested. Any match flags the file.
//!
//! A directive written only inside a comment does not count. Neither does
//! a client signal named only inside a string literal. Code inside a
//! template literal's `${...}` is kept, and an apostrophe that follows a
//! letter (JSX text such as `Don't`) never opens a literal.

use std::borrow::Cow;
use std::path::{Path, PathBuf};
use std::sync::LazyLock;

use regex::Regex;
use serde::Serialize;
use tracing::debug;

use crate::error::ClassifyError;

use super::signals::{self, DIRECTIVE, SignalMatch};

static DIRECTIVE_QUOTES: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r#"['"]use client['"]"#).unwrap());

static LINE_COMMENT: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"(?m)//.*$").unwrap());

// Non-nested, closes at the first `*/`.
static BLOCK_COMMENT: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"(?s)/\*.*?\*/").unwrap());

/// Outcome of classifying one file's content.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "verdict", rename_all = "snake_case")]
pub enum Verdict {
    /// The directive is present outside comments.
    HasDirective,
    /// The file uses a server-only data-fetching function.
    ServerOnly {
        /// The server function that was found.
        function: &'static str,
    },
    /// The file uses client-only APIs without the directive.
    NeedsDirective {
        /// Every client signal that matched.
        signals: Vec<SignalMatch>,
    },
    /// Nothing client-specific was found.
    NoClientUsage,
}

impl Verdict {
    /// Returns true when the file must be reported.
    pub fn is_flagged(&self) -> bool {
        matches!(self, Self::NeedsDirective { .. })
    }

    /// Returns the matched signals for a flagged file, empty otherwise.
    pub fn signals(&self) -> &[SignalMatch] {
        match self {
            Self::NeedsDirective { signals } => signals,
            _ => &[],
        }
    }
}

/// Rewrites `"use client"` (either quote style) to the canonical form.
pub fn normalize_directive(content: &str) -> Cow<'_, str> {
    DIRECTIVE_QUOTES.replace_all(content, DIRECTIVE)
}

/// Removes `//` line comments, then `/* */` block comments.
pub fn strip_comments(content: &str) -> String {
    let without_lines = LINE_COMMENT.replace_all(content, "");
    BLOCK_COMMENT.replace_all(&without_lines, "").into_owned()
}

/// Removes string and template literals.
///
/// Quoted strings end at the first unescaped matching quote on the same
/// line. Template literals may span lines; the code of each `${...}` is
/// kept (with its own literals removed) and the rest is dropped. A quote
/// with no closing partner is left in place.
pub fn strip_literals(content: &str) -> String {
    let mut out = String::with_capacity(content.len());
    let mut rest = content;
    let mut prev: Option<char> = None;

    while let Some(c) = rest.chars().next() {
        let after = &rest[c.len_utf8()..];
        match c {
            '"' | '\'' if !prev.is_some_and(char::is_alphanumeric) => {
                if let Some(end) = quoted_end(after, c) {
                    rest = &after[end + c.len_utf8()..];
                    prev = Some(c);
                    continue;
                }
            }
            '`' => {
                if let Some((end, code)) = template_end(after) {
                    out.push_str(&code);
                    rest = &after[end + 1..];
                    prev = Some(c);
                    continue;
                }
            }
            _ => {}
        }
        out.push(c);
        prev = Some(c);
        rest = after;
    }
    out
}

/// Byte offset of the quote closing a single-line string.
fn quoted_end(text: &str, quote: char) -> Option<usize> {
    let mut escaped = false;
    for (i, c) in text.char_indices() {
        match c {
            '\n' => return None,
            _ if escaped => escaped = false,
            '\\' => escaped = true,
            c if c == quote => return Some(i),
            _ => {}
        }
    }
    None
}

/// Byte offset of the closing backtick, plus the interpolated code.
fn template_end(text: &str) -> Option<(usize, String)> {
    let mut code = String::new();
    let mut chars = text.char_indices().peekable();
    let mut escaped = false;

    while let Some((i, c)) = chars.next() {
        if escaped {
            escaped = false;
            continue;
        }
        match c {
            '\\' => escaped = true,
            '`' => return Some((i, code)),
            '$' if chars.peek().is_some_and(|&(_, next)| next == '{') => {
                let (open, _) = chars.next()?;
                let mut depth = 1usize;
                let mut close = None;
                for (j, c) in chars.by_ref() {
                    match c {
                        '{' => depth += 1,
                        '}' => {
                            depth -= 1;
                            if depth == 0 {
                                close = Some(j);
                                break;
                            }
                        }
                        _ => {}
                    }
                }
                code.push(' ');
                code.push_str(&strip_literals(&text[open + 1..close?]));
                code.push(' ');
            }
            _ => {}
        }
    }
    None
}

/// Classifies a file from its full text content.
pub fn classify_source(content: &str) -> Verdict {
    let normalized = normalize_directive(content);
    let stripped = strip_comments(&normalized);

    // Placement is not checked: anywhere outside a comment is enough.
    if stripped.contains(DIRECTIVE) {
        return Verdict::HasDirective;
    }

    if let Some(function) = signals::server_function(&stripped) {
        return Verdict::ServerOnly { function };
    }

    let code = strip_literals(&stripped);
    let signals = signals::detect(&code);
    if signals.is_empty() {
        Verdict::NoClientUsage
    } else {
        Verdict::NeedsDirective { signals }
    }
}

/// Reads a file as UTF-8 and classifies it.
///
/// Returns the absolute form of `path` alongside the verdict.
///
/// # Errors
///
/// Returns [`ClassifyError::FileRead`] if the file cannot be read and
/// [`ClassifyError::Encoding`] if it is not valid UTF-8.
pub fn classify_file(path: &Path) -> Result<(PathBuf, Verdict), ClassifyError> {
    let bytes = std::fs::read(path).map_err(|source| ClassifyError::FileRead {
        path: path.to_path_buf(),
        source,
    })?;
    let content = String::from_utf8(bytes).map_err(|_| ClassifyError::Encoding {
        path: path.to_path_buf(),
    })?;
    let absolute = std::path::absolute(path).map_err(|source| ClassifyError::FileRead {
        path: path.to_path_buf(),
        source,
    })?;

    let verdict = classify_source(&content);
    debug!(path = %absolute.display(), ?verdict, "classified file");
    Ok((absolute, verdict))
}

/// Returns the absolute path of `path` if it needs the directive.
///
/// # Errors
///
/// See [`classify_file`].
pub fn classify(path: &Path) -> Result<Option<PathBuf>, ClassifyError> {
    let (absolute, verdict) = classify_file(path)?;
    Ok(verdict.is_flagged().then_some(absolute))
}
