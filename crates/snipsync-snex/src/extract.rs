//! Extraction of snippet bodies from annotated source files.
//!
//! A snippet is delimited by two comment lines:
//!
//! ```text
//! // snippet: connect
//! let conn = Client::connect(addr)?;
//! // endsnippet
//! ```
//!
//! The comment opener and closer come from the configuration, so the same
//! scanner handles `#`, `//`, `--` or `<!-- -->` style comments.

use std::path::Path;

use crate::error::DiscoveryError;

const START_KEYWORD: &str = "snippet:";
const END_KEYWORD: &str = "endsnippet";

/// Comment syntax surrounding snippet markers.
#[derive(Debug, Clone, Copy)]
pub(crate) struct MarkerSyntax<'a> {
    prefix: &'a str,
    suffix: &'a str,
}

impl<'a> MarkerSyntax<'a> {
    pub fn new(prefix: &'a str, suffix: &'a str) -> Self {
        Self {
            prefix: prefix.trim(),
            suffix: suffix.trim(),
        }
    }

    fn parse<'l>(&self, line: &'l str) -> Option<Marker<'l>> {
        let inner = line
            .trim()
            .strip_prefix(self.prefix)?
            .strip_suffix(self.suffix)?
            .trim();
        if inner == END_KEYWORD {
            return Some(Marker::End);
        }
        inner
            .strip_prefix(START_KEYWORD)
            .map(|name| Marker::Start(name.trim()))
    }
}

#[derive(Debug, PartialEq, Eq)]
enum Marker<'l> {
    Start(&'l str),
    End,
}

/// Snippet body as found in a source file, before rendering.
#[derive(Debug, PartialEq, Eq)]
pub(crate) struct RawSnippet<'c> {
    pub name: String,
    /// 1-based line of the start marker.
    pub line: usize,
    /// Body lines without terminators.
    pub lines: Vec<&'c str>,
}

/// Extract all snippets of `content`, in file order.
///
/// `path` is only used in error reports.
pub(crate) fn extract<'c>(
    content: &'c str,
    syntax: MarkerSyntax<'_>,
    path: &Path,
) -> Result<Vec<RawSnippet<'c>>, DiscoveryError> {
    let mut snippets = Vec::new();
    let mut open: Option<RawSnippet<'c>> = None;

    for (idx, line) in content.lines().enumerate() {
        let line_no = idx + 1;
        match syntax.parse(line) {
            Some(Marker::Start(name)) => {
                if let Some(current) = &open {
                    return Err(DiscoveryError::NestedSnippet {
                        path: path.to_path_buf(),
                        line: line_no,
                        name: name.to_owned(),
                        open: current.name.clone(),
                    });
                }
                if name.is_empty() {
                    return Err(DiscoveryError::EmptyName {
                        path: path.to_path_buf(),
                        line: line_no,
                    });
                }
                open = Some(RawSnippet {
                    name: name.to_owned(),
                    line: line_no,
                    lines: Vec::new(),
                });
            }
            Some(Marker::End) => match open.take() {
                Some(snippet) => snippets.push(snippet),
                None => {
                    return Err(DiscoveryError::UnmatchedEnd {
                        path: path.to_path_buf(),
                        line: line_no,
                    });
                }
            },
            None => {
                if let Some(current) = open.as_mut() {
                    current.lines.push(line);
                }
            }
        }
    }

    match open {
        Some(snippet) => Err(DiscoveryError::Unterminated {
            path: path.to_path_buf(),
            line: snippet.line,
            name: snippet.name,
        }),
        None => Ok(snippets),
    }
}
