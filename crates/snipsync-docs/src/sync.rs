//! Synchronization driver.
//!
//! Builds the snippet registry from a [`SnippetSource`], then rewrites every
//! selected document whose marked regions reference known snippets. Files
//! are processed one at a time; a file is written only when at least one of
//! its regions was populated, so untouched files keep their modification
//! time.

use std::path::{Path, PathBuf};

use snipsync_core::{SnippetRegistry, SnippetSource, transform};

use crate::error::SyncError;
use crate::select::{DEFAULT_PATTERNS, FileSelector};

/// Reference to a snippet missing from the registry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Unresolved {
    /// Document path relative to the root.
    pub path: PathBuf,
    /// Referenced identifier.
    pub id: String,
}

/// Summary of a synchronization run.
#[derive(Debug, Default, PartialEq, Eq)]
pub struct SyncReport {
    /// Number of documents examined.
    pub scanned: usize,
    /// Documents rewritten, relative to the root.
    pub updated: Vec<PathBuf>,
    /// References to unknown snippets, in processing order.
    pub unresolved: Vec<Unresolved>,
}

/// Drives discovery, selection and substitution for one documentation root.
pub struct Syncer<S> {
    source: S,
    patterns: Vec<String>,
}

impl<S: SnippetSource> Syncer<S> {
    /// Create a syncer selecting documents with [`DEFAULT_PATTERNS`].
    pub fn new(source: S) -> Self {
        Self {
            source,
            patterns: DEFAULT_PATTERNS.iter().map(|&p| p.to_owned()).collect(),
        }
    }

    /// Replace the document selection patterns.
    #[must_use]
    pub fn with_patterns<I, P>(mut self, patterns: I) -> Self
    where
        I: IntoIterator<Item = P>,
        P: Into<String>,
    {
        self.patterns = patterns.into_iter().map(Into::into).collect();
        self
    }

    /// Discover snippets below `root` and build the registry.
    pub fn load_registry(
        &self,
        root: &Path,
        config_name: &str,
    ) -> Result<SnippetRegistry, SyncError> {
        let snippets = self
            .source
            .discover(root, config_name)
            .map_err(|e| SyncError::Discovery(Box::new(e)))?;

        let registry: SnippetRegistry = snippets.into_iter().collect();
        for id in registry.ids() {
            tracing::debug!(id, "Registered snippet");
        }
        Ok(registry)
    }

    /// Rewrite every selected document below `root`.
    ///
    /// Stops at the first I/O error; documents already written stay written.
    pub fn sync(&self, root: &Path, registry: &SnippetRegistry) -> Result<SyncReport, SyncError> {
        let files = FileSelector::with_patterns(root, self.patterns.as_slice())?.select()?;
        tracing::info!(documents = files.len(), snippets = registry.len(), "Synchronizing");

        let mut report = SyncReport::default();
        for rel in files {
            let path = root.join(&rel);
            let outcome = sync_file(&path, registry)?;
            report.scanned += 1;

            for id in outcome.unresolved {
                tracing::warn!(path = %rel.display(), id, "Include references unknown snippet");
                report.unresolved.push(Unresolved {
                    path: rel.clone(),
                    id,
                });
            }
            if outcome.written {
                report.updated.push(rel);
            }
        }
        Ok(report)
    }
}

/// Result of synchronizing a single document.
#[derive(Debug, PartialEq, Eq)]
pub struct FileOutcome {
    /// Whether the document was rewritten.
    pub written: bool,
    /// Identifiers referenced but unknown.
    pub unresolved: Vec<String>,
}

/// Read, transform and, if any region was populated, write back `path`.
pub fn sync_file(path: &Path, registry: &SnippetRegistry) -> Result<FileOutcome, SyncError> {
    let content = std::fs::read_to_string(path).map_err(|source| SyncError::Read {
        path: path.to_path_buf(),
        source,
    })?;

    let result = transform(&content, registry);
    if result.changed {
        std::fs::write(path, &result.text).map_err(|source| SyncError::Write {
            path: path.to_path_buf(),
            source,
        })?;
        tracing::debug!(path = %path.display(), "Updated document");
    }

    Ok(FileOutcome {
        written: result.changed,
        unresolved: result.unresolved,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use snipsync_core::{DiscoveredSnippet, SnippetId};
    use std::fs;
    use std::time::{Duration, SystemTime};

    struct FakeSource(Vec<(&'static str, &'static str, &'static str)>);

    impl SnippetSource for FakeSource {
        type Error = std::io::Error;

        fn discover(
            &self,
            _root: &Path,
            _config_name: &str,
        ) -> Result<Vec<DiscoveredSnippet>, Self::Error> {
            Ok(self
                .0
                .iter()
                .map(|&(origin, name, rendered)| DiscoveredSnippet {
                    id: SnippetId::new(origin, name),
                    rendered: rendered.to_owned(),
                })
                .collect())
        }
    }

    struct FailingSource;

    impl SnippetSource for FailingSource {
        type Error = std::io::Error;

        fn discover(
            &self,
            _root: &Path,
            _config_name: &str,
        ) -> Result<Vec<DiscoveredSnippet>, Self::Error> {
            Err(std::io::Error::other("bad config"))
        }
    }

    fn write(root: &Path, rel: &str, content: &str) {
        let path = root.join(rel);
        fs::create_dir_all(path.parent().unwrap()).unwrap();
        fs::write(path, content).unwrap();
    }

    fn read(root: &Path, rel: &str) -> String {
        fs::read_to_string(root.join(rel)).unwrap()
    }

    fn backdate(root: &Path, rel: &str) -> SystemTime {
        let time = SystemTime::now() - Duration::from_secs(3600);
        let file = fs::File::options().write(true).open(root.join(rel)).unwrap();
        file.set_modified(time).unwrap();
        fs::metadata(root.join(rel)).unwrap().modified().unwrap()
    }

    fn mtime(root: &Path, rel: &str) -> SystemTime {
        fs::metadata(root.join(rel)).unwrap().modified().unwrap()
    }

    fn syncer() -> Syncer<FakeSource> {
        Syncer::new(FakeSource(vec![
            ("mod", "fn", "new body\n"),
            ("net", "connect", "```rust\nconnect();\n```\n"),
        ]))
    }

    const STALE: &str = "A\n<!-- include mod::fn -->\nold body\n<!-- endinclude -->\nB\n";

    #[test]
    fn test_load_registry_keeps_discovery_order() {
        let dir = tempfile::tempdir().unwrap();
        let registry = syncer().load_registry(dir.path(), "snex.conf.yaml").unwrap();

        assert_eq!(registry.ids().collect::<Vec<_>>(), vec!["mod::fn", "net::connect"]);
        assert_eq!(registry.get("mod::fn"), Some("new body\n"));
    }

    #[test]
    fn test_load_registry_propagates_discovery_error() {
        let dir = tempfile::tempdir().unwrap();
        let err = Syncer::new(FailingSource)
            .load_registry(dir.path(), "snex.conf.yaml")
            .unwrap_err();

        assert!(matches!(err, SyncError::Discovery(_)));
        assert_eq!(err.to_string(), "snippet discovery failed: bad config");
    }

    #[test]
    fn test_sync_rewrites_stale_documents() {
        let dir = tempfile::tempdir().unwrap();
        write(dir.path(), "docs/guide.md", STALE);
        write(
            dir.path(),
            "README.md",
            "# Readme\n<!-- include net::connect -->\n<!-- endinclude -->\n",
        );

        let syncer = syncer();
        let registry = syncer.load_registry(dir.path(), "snex.conf.yaml").unwrap();
        let report = syncer.sync(dir.path(), &registry).unwrap();

        assert_eq!(
            read(dir.path(), "docs/guide.md"),
            "A\n<!-- include mod::fn -->\nnew body\n<!-- endinclude -->\nB\n"
        );
        assert_eq!(
            read(dir.path(), "README.md"),
            "# Readme\n<!-- include net::connect -->\n```rust\nconnect();\n```\n<!-- endinclude -->\n"
        );
        assert_eq!(
            report,
            SyncReport {
                scanned: 2,
                updated: vec![PathBuf::from("README.md"), PathBuf::from("docs/guide.md")],
                unresolved: vec![],
            }
        );
    }

    #[test]
    fn test_sync_leaves_documents_without_known_snippets_untouched() {
        let dir = tempfile::tempdir().unwrap();
        write(dir.path(), "plain.md", "# Nothing to include\n");
        write(
            dir.path(),
            "missing.md",
            "A\n<!-- include gone::away -->\nstale\n<!-- endinclude -->\n",
        );
        let plain_before = backdate(dir.path(), "plain.md");
        let missing_before = backdate(dir.path(), "missing.md");

        let syncer = syncer();
        let registry = syncer.load_registry(dir.path(), "snex.conf.yaml").unwrap();
        let report = syncer.sync(dir.path(), &registry).unwrap();

        assert_eq!(read(dir.path(), "plain.md"), "# Nothing to include\n");
        assert_eq!(
            read(dir.path(), "missing.md"),
            "A\n<!-- include gone::away -->\nstale\n<!-- endinclude -->\n"
        );
        assert_eq!(mtime(dir.path(), "plain.md"), plain_before);
        assert_eq!(mtime(dir.path(), "missing.md"), missing_before);
        assert_eq!(report.scanned, 2);
        assert!(report.updated.is_empty());
        assert_eq!(
            report.unresolved,
            vec![Unresolved {
                path: PathBuf::from("missing.md"),
                id: "gone::away".to_owned(),
            }]
        );
    }

    #[test]
    fn test_sync_collapses_unknown_region_when_file_is_rewritten() {
        let dir = tempfile::tempdir().unwrap();
        write(
            dir.path(),
            "mixed.md",
            "<!-- include mod::fn -->\n<!-- endinclude -->\n<!-- include gone::away -->\nstale\n<!-- endinclude -->\n",
        );

        let syncer = syncer();
        let registry = syncer.load_registry(dir.path(), "snex.conf.yaml").unwrap();
        let report = syncer.sync(dir.path(), &registry).unwrap();

        assert_eq!(
            read(dir.path(), "mixed.md"),
            "<!-- include mod::fn -->\nnew body\n<!-- endinclude -->\n<!-- endinclude -->\n"
        );
        assert_eq!(report.updated, vec![PathBuf::from("mixed.md")]);
        assert_eq!(report.unresolved.len(), 1);
    }

    #[test]
    fn test_sync_skips_snippets_dir_and_other_files() {
        let dir = tempfile::tempdir().unwrap();
        write(dir.path(), "snippets/out.md", STALE);
        write(dir.path(), "notes.txt", STALE);

        let syncer = syncer();
        let registry = syncer.load_registry(dir.path(), "snex.conf.yaml").unwrap();
        let report = syncer.sync(dir.path(), &registry).unwrap();

        assert_eq!(read(dir.path(), "snippets/out.md"), STALE);
        assert_eq!(read(dir.path(), "notes.txt"), STALE);
        assert_eq!(report, SyncReport::default());
    }

    #[test]
    fn test_sync_is_idempotent_on_disk() {
        let dir = tempfile::tempdir().unwrap();
        write(dir.path(), "guide.md", STALE);

        let syncer = syncer();
        let registry = syncer.load_registry(dir.path(), "snex.conf.yaml").unwrap();
        syncer.sync(dir.path(), &registry).unwrap();
        let first = read(dir.path(), "guide.md");
        syncer.sync(dir.path(), &registry).unwrap();

        assert_eq!(read(dir.path(), "guide.md"), first);
    }

    #[test]
    fn test_sync_with_custom_patterns() {
        let dir = tempfile::tempdir().unwrap();
        write(dir.path(), "page.mdx", STALE);
        write(dir.path(), "page.md", STALE);

        let syncer = syncer().with_patterns(["*.mdx"]);
        let registry = syncer.load_registry(dir.path(), "snex.conf.yaml").unwrap();
        let report = syncer.sync(dir.path(), &registry).unwrap();

        assert_eq!(report.updated, vec![PathBuf::from("page.mdx")]);
        assert_eq!(read(dir.path(), "page.md"), STALE);
    }

    #[test]
    fn test_sync_file_reports_read_error() {
        let dir = tempfile::tempdir().unwrap();
        let err = sync_file(&dir.path().join("absent.md"), &SnippetRegistry::new()).unwrap_err();

        assert!(matches!(err, SyncError::Read { .. }));
        assert!(err.to_string().contains("absent.md"));
    }
}
