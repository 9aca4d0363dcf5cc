//! Selection of the documents to synchronize.
//!
//! Patterns use gitignore syntax relative to the root: plain patterns select
//! files, `!`-prefixed patterns exclude files and whole directories.

use std::path::{Path, PathBuf};

use ignore::WalkBuilder;
use ignore::overrides::{Override, OverrideBuilder};

use crate::error::SyncError;

/// Default selection: every Markdown file except those under `/snippets/`.
pub const DEFAULT_PATTERNS: &[&str] = &["*.md", "!/snippets/"];

/// Walks a documentation root and returns the selected files.
#[derive(Debug)]
pub struct FileSelector {
    root: PathBuf,
    overrides: Override,
}

impl FileSelector {
    /// Selector with [`DEFAULT_PATTERNS`].
    pub fn new(root: &Path) -> Result<Self, SyncError> {
        Self::with_patterns(root, DEFAULT_PATTERNS)
    }

    /// Selector with custom patterns.
    pub fn with_patterns<S: AsRef<str>>(root: &Path, patterns: &[S]) -> Result<Self, SyncError> {
        let mut builder = OverrideBuilder::new(root);
        for pattern in patterns {
            let pattern = pattern.as_ref();
            builder
                .add(pattern)
                .map_err(|source| SyncError::Pattern {
                    pattern: pattern.to_owned(),
                    source,
                })?;
        }
        let overrides = builder.build().map_err(|source| SyncError::Pattern {
            pattern: patterns
                .iter()
                .map(AsRef::as_ref)
                .collect::<Vec<_>>()
                .join(", "),
            source,
        })?;

        Ok(Self {
            root: root.to_path_buf(),
            overrides,
        })
    }

    /// Selected files as sorted paths relative to the root.
    ///
    /// Ignore files (`.gitignore` and friends) are not honored; only the
    /// selector's patterns decide.
    pub fn select(&self) -> Result<Vec<PathBuf>, SyncError> {
        let mut builder = WalkBuilder::new(&self.root);
        builder
            .standard_filters(false)
            .overrides(self.overrides.clone());

        let mut files = Vec::new();
        for entry in builder.build() {
            let entry = entry.map_err(|source| SyncError::Walk {
                root: self.root.clone(),
                source,
            })?;
            if !entry.file_type().is_some_and(|t| t.is_file()) {
                continue;
            }
            if let Ok(rel) = entry.path().strip_prefix(&self.root) {
                files.push(rel.to_path_buf());
            }
        }
        files.sort();
        Ok(files)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use std::fs;

    fn touch(root: &Path, rel: &str) {
        let path = root.join(rel);
        fs::create_dir_all(path.parent().unwrap()).unwrap();
        fs::write(path, "").unwrap();
    }

    fn select(root: &Path) -> Vec<PathBuf> {
        FileSelector::new(root).unwrap().select().unwrap()
    }

    #[test]
    fn test_selects_markdown_at_any_depth() {
        let dir = tempfile::tempdir().unwrap();
        touch(dir.path(), "README.md");
        touch(dir.path(), "docs/guide.md");
        touch(dir.path(), "docs/deep/nested/page.md");
        touch(dir.path(), "src/lib.rs");
        touch(dir.path(), "notes.txt");

        assert_eq!(
            select(dir.path()),
            vec![
                PathBuf::from("README.md"),
                PathBuf::from("docs/deep/nested/page.md"),
                PathBuf::from("docs/guide.md"),
            ]
        );
    }

    #[test]
    fn test_excludes_top_level_snippets_dir() {
        let dir = tempfile::tempdir().unwrap();
        touch(dir.path(), "index.md");
        touch(dir.path(), "snippets/generated.md");
        touch(dir.path(), "snippets/sub/more.md");
        touch(dir.path(), "docs/snippets/kept.md");

        assert_eq!(
            select(dir.path()),
            vec![
                PathBuf::from("docs/snippets/kept.md"),
                PathBuf::from("index.md"),
            ]
        );
    }

    #[test]
    fn test_ignore_files_are_not_honored() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join(".gitignore"), "*.md\n").unwrap();
        touch(dir.path(), "page.md");

        assert_eq!(select(dir.path()), vec![PathBuf::from("page.md")]);
    }

    #[test]
    fn test_custom_patterns() {
        let dir = tempfile::tempdir().unwrap();
        touch(dir.path(), "a.md");
        touch(dir.path(), "b.mdx");
        touch(dir.path(), "drafts/c.mdx");

        let selector = FileSelector::with_patterns(dir.path(), &["*.mdx", "!drafts/"]).unwrap();
        assert_eq!(selector.select().unwrap(), vec![PathBuf::from("b.mdx")]);
    }

    #[test]
    fn test_invalid_pattern() {
        let dir = tempfile::tempdir().unwrap();
        let err = FileSelector::with_patterns(dir.path(), &["a[.md"]).unwrap_err();

        assert!(matches!(err, SyncError::Pattern { ref pattern, .. } if pattern == "a[.md"));
    }

    #[test]
    fn test_empty_root() {
        let dir = tempfile::tempdir().unwrap();
        assert!(select(dir.path()).is_empty());
    }
}
