//! Line classification for CI logs.
//!
//! Two ordered pattern sets are evaluated per line: noise first, then error
//! signals. A line that matches any noise pattern is never an error, whatever
//! else it contains.

use std::{borrow::Cow, sync::OnceLock};

use regex::{Regex, RegexBuilder};

/// Runner metadata that looks like an error but never is one.
const NOISE_PATTERNS: &[(&str, &str)] = &[
    ("exit-code", "Process completed with exit code"),
    ("job-definition", "Job defined at:"),
];

const ERROR_PATTERNS: &[(&str, &str)] = &[
    ("error-annotation", "##[error]"),
    ("error", "ERROR"),
    ("exception", "Exception"),
    ("zero-division", "ZeroDivisionError"),
    ("module-not-found", "ModuleNotFoundError"),
    ("missing-file", "No such file"),
];

#[derive(Debug)]
pub struct LinePattern {
    pub name: &'static str,
    regex: Regex,
}

impl LinePattern {
    fn literal(name: &'static str, text: &str) -> Self {
        let regex = RegexBuilder::new(&regex::escape(text)).case_insensitive(true).build().unwrap();
        Self { name, regex }
    }

    pub fn is_match(&self, line: &str) -> bool { self.regex.is_match(line) }
}

struct PatternSets {
    noise: Vec<LinePattern>,
    error: Vec<LinePattern>,
}

fn pattern_sets() -> &'static PatternSets {
    static SETS: OnceLock<PatternSets> = OnceLock::new();
    SETS.get_or_init(|| PatternSets {
        noise: compile(NOISE_PATTERNS),
        error: compile(ERROR_PATTERNS),
    })
}

fn compile(patterns: &[(&'static str, &str)]) -> Vec<LinePattern> {
    patterns.iter().map(|&(name, text)| LinePattern::literal(name, text)).collect()
}

#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub enum LineClass {
    /// Matched the named noise pattern.
    Noise(&'static str),
    /// Matched the named error pattern.
    Error(&'static str),
    Plain,
}

pub fn classify_line(line: &str) -> LineClass {
    let sets = pattern_sets();
    if let Some(pattern) = sets.noise.iter().find(|p| p.is_match(line)) {
        return LineClass::Noise(pattern.name);
    }
    if let Some(pattern) = sets.error.iter().find(|p| p.is_match(line)) {
        return LineClass::Error(pattern.name);
    }
    LineClass::Plain
}

/// Strips a leading `<timestamp>Z ##[error]` prefix, then surrounding whitespace.
pub fn normalize_error_line(line: &str) -> Cow<'_, str> {
    static REGEX: OnceLock<Regex> = OnceLock::new();
    let regex =
        REGEX.get_or_init(|| Regex::new(r"^\d{4}-\d{2}-\d{2}T.*?Z\s*##\[error\]\s*").unwrap());
    match regex.replace(line, "") {
        Cow::Borrowed(s) => Cow::Borrowed(s.trim()),
        Cow::Owned(s) => Cow::Owned(s.trim().to_string()),
    }
}
