//! Documentation synchronization for snipsync.
//!
//! This crate connects the pieces around the substitution engine:
//! - [`FileSelector`] picks the Markdown files to process (gitignore-style
//!   patterns, every `*.md` outside `/snippets/` by default)
//! - [`Syncer`] builds the snippet registry from a [`SnippetSource`] and
//!   rewrites each selected document in place when one of its marked regions
//!   was populated
//!
//! # Example
//!
//! ```ignore
//! use snipsync_docs::Syncer;
//! use snipsync_snex::{DEFAULT_CONFIG_NAME, SnexSource};
//!
//! let syncer = Syncer::new(SnexSource);
//! let registry = syncer.load_registry(root, DEFAULT_CONFIG_NAME)?;
//! let report = syncer.sync(root, &registry)?;
//! for path in &report.updated {
//!     println!("updated {}", path.display());
//! }
//! ```
//!
//! [`SnippetSource`]: snipsync_core::SnippetSource

mod error;
mod select;
mod sync;

pub use error::SyncError;
pub use select::{DEFAULT_PATTERNS, FileSelector};
pub use sync::{FileOutcome, SyncReport, Syncer, Unresolved, sync_file};
