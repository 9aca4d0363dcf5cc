//! Snippet identifiers and the discovery capability.

use std::fmt;
use std::path::Path;

/// Identifier of a snippet, rendered as `origin::name`.
///
/// `origin` names where the snippet was extracted from (a module or a file),
/// `name` tells apart several snippets of the same origin.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct SnippetId {
    /// Logical source location.
    pub origin: String,
    /// Name of the snippet within its origin.
    pub name: String,
}

impl SnippetId {
    /// Create a new identifier.
    #[must_use]
    pub fn new(origin: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            origin: origin.into(),
            name: name.into(),
        }
    }
}

impl fmt::Display for SnippetId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}::{}", self.origin, self.name)
    }
}

/// A snippet produced by a [`SnippetSource`] together with its rendered text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DiscoveredSnippet {
    /// Snippet identifier.
    pub id: SnippetId,
    /// Text inserted into documents, already newline-terminated.
    pub rendered: String,
}

/// Capability for discovering snippets in a source tree.
///
/// Implementations walk `root` according to the discovery configuration file
/// named `config_name` and return the snippets in discovery order.
pub trait SnippetSource {
    /// Error returned when discovery fails.
    type Error: std::error::Error + Send + Sync + 'static;

    /// Discover all snippets below `root`.
    fn discover(
        &self,
        root: &Path,
        config_name: &str,
    ) -> Result<Vec<DiscoveredSnippet>, Self::Error>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_joins_origin_and_name() {
        let id = SnippetId::new("net/client", "connect");
        assert_eq!(id.to_string(), "net/client::connect");
    }

    #[test]
    fn test_display_keeps_colons_in_parts() {
        let id = SnippetId::new("crate::net", "connect");
        assert_eq!(id.to_string(), "crate::net::connect");
    }
}
