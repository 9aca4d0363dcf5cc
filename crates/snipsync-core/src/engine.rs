//! Include-marker substitution engine.
//!
//! The engine is a single forward scan over the lines of a document driven by
//! a two-state machine ([`Section`]). Outside a marked region lines are kept
//! as they are. A start marker switches to [`Section::Inside`] and, when the
//! referenced snippet is known, is re-emitted followed by the snippet text.
//! Inside a region every line is dropped until an end marker switches back to
//! [`Section::Outside`].
//!
//! A start marker is honored in both states. A region that was never closed
//! is therefore terminated by the next start marker, which keeps repeated
//! runs stable even on malformed documents.

use crate::marker::{self, MarkerLine};
use crate::registry::SnippetRegistry;

/// Scanner state relative to marked regions.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Section {
    /// Not inside a marked region.
    #[default]
    Outside,
    /// Between a start marker and its end marker.
    Inside,
}

/// What the scanner does with the line that caused a transition.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action<'a> {
    /// Emit the line unchanged.
    Keep,
    /// Omit the line.
    Drop,
    /// Start marker for the given identifier: emit it with the snippet text,
    /// or omit it if the identifier is unknown.
    Include(&'a str),
}

impl Section {
    /// Transition for one classified line.
    #[must_use]
    pub fn step<'a>(self, line: MarkerLine<'a>) -> (Self, Action<'a>) {
        match (self, line) {
            (Self::Inside, MarkerLine::End) => (Self::Outside, Action::Keep),
            (_, MarkerLine::Start(id)) => (Self::Inside, Action::Include(id)),
            (Self::Outside, _) => (Self::Outside, Action::Keep),
            (Self::Inside, _) => (Self::Inside, Action::Drop),
        }
    }
}

/// Result of transforming one document.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Transformed {
    /// Rewritten document.
    pub text: String,
    /// True if at least one region was populated from the registry.
    pub changed: bool,
    /// Identifiers referenced by start markers but missing from the registry,
    /// in document order.
    pub unresolved: Vec<String>,
}

/// Transform a whole document.
///
/// Lines are split after each `\n`, keeping terminators.
#[must_use]
pub fn transform(document: &str, registry: &SnippetRegistry) -> Transformed {
    transform_lines(document.split_inclusive('\n'), registry)
}

/// Transform a document given as lines that still carry their terminators.
///
/// Unknown identifiers never fail the transform: the start marker line and
/// the stale body are dropped while the end marker is kept.
pub fn transform_lines<'a, I>(lines: I, registry: &SnippetRegistry) -> Transformed
where
    I: IntoIterator<Item = &'a str>,
{
    let mut result = Transformed::default();
    let mut section = Section::Outside;

    for line in lines {
        let (next, action) = section.step(marker::classify(line));
        section = next;

        match action {
            Action::Keep => result.text.push_str(line),
            Action::Drop => {}
            Action::Include(id) => match registry.get(id) {
                Some(content) => {
                    push_terminated(&mut result.text, line);
                    push_terminated(&mut result.text, content);
                    result.changed = true;
                }
                None => {
                    tracing::debug!(id, "Dropping include of unknown snippet");
                    result.unresolved.push(id.to_owned());
                }
            },
        }
    }

    result
}

/// Append `block`, adding a newline if it does not end with one.
///
/// Applied to a known start marker and to the snippet text: an unterminated
/// start marker on the last line gets a `\n`, and so does snippet text
/// without a trailing newline, so the following line always starts on its
/// own line and a second transform leaves the output unchanged. Empty blocks
/// add nothing.
fn push_terminated(out: &mut String, block: &str) {
    out.push_str(block);
    if !block.is_empty() && !block.ends_with('\n') {
        out.push('\n');
    }
}
