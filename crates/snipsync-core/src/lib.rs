//! Core of snipsync: snippet registry and include-marker substitution.
//!
//! Markdown files reference snippets with a pair of HTML comments:
//!
//! ```text
//! <!-- include origin::name -->
//! ...managed body...
//! <!-- endinclude -->
//! ```
//!
//! [`transform`] rewrites a document so that every managed body holds the
//! current rendered snippet from a [`SnippetRegistry`]. Everything outside the
//! managed regions is left byte-for-byte untouched, and running the transform
//! again with the same registry produces the same text.
//!
//! # Architecture
//!
//! - [`snippet`]: snippet identifiers and the [`SnippetSource`] discovery trait
//! - [`registry`]: read-only identifier to rendered text mapping
//! - [`marker`]: recognition of start and end marker lines
//! - [`engine`]: the two-state line scanner performing the substitution
//!
//! # Example
//!
//! ```
//! use snipsync_core::{SnippetRegistry, transform};
//!
//! let registry: SnippetRegistry = [("mod::fn", "new body\n")].into_iter().collect();
//! let doc = "A\n<!-- include mod::fn -->\nold body\n<!-- endinclude -->\nB\n";
//!
//! let result = transform(doc, &registry);
//! assert!(result.changed);
//! assert_eq!(
//!     result.text,
//!     "A\n<!-- include mod::fn -->\nnew body\n<!-- endinclude -->\nB\n"
//! );
//! ```

pub mod engine;
pub mod marker;
pub mod registry;
pub mod snippet;

pub use engine::{Action, Section, Transformed, transform, transform_lines};
pub use marker::MarkerLine;
pub use registry::SnippetRegistry;
pub use snippet::{DiscoveredSnippet, SnippetId, SnippetSource};
