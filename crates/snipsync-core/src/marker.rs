//! Recognition of include marker lines.
//!
//! A start marker is a whole line `<!-- include origin::name -->`, an end
//! marker is a whole line `<!-- endinclude -->`. Lines are matched without
//! their terminator, so both LF and CRLF files are recognized.

use std::sync::LazyLock;

use regex::Regex;

static START_MARKER: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^<!-- include (.*::.*) -->$").unwrap());

static END_MARKER: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^<!-- endinclude -->$").unwrap());

/// Classification of a single document line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MarkerLine<'a> {
    /// Start marker carrying a trimmed snippet identifier.
    Start(&'a str),
    /// End marker.
    End,
    /// Any other line.
    Text,
}

/// Classify `line`, which may still carry its `\n` or `\r\n` terminator.
#[must_use]
pub fn classify(line: &str) -> MarkerLine<'_> {
    let content = strip_terminator(line);
    if END_MARKER.is_match(content) {
        return MarkerLine::End;
    }
    match START_MARKER.captures(content) {
        Some(caps) => MarkerLine::Start(caps.get(1).map_or("", |m| m.as_str()).trim()),
        None => MarkerLine::Text,
    }
}

fn strip_terminator(line: &str) -> &str {
    let line = line.strip_suffix('\n').unwrap_or(line);
    line.strip_suffix('\r').unwrap_or(line)
}
