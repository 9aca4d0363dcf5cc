//! Snippet discovery for snipsync.
//!
//! [`SnexSource`] implements [`SnippetSource`] by reading a YAML
//! configuration (see [`config`]) from the project root, walking the
//! configured source directories and extracting the snippets delimited by
//! `snippet: <name>` / `endsnippet` comment lines.
//!
//! Each snippet is rendered through the entry's template before it is
//! returned, so the registry built from the result holds text that can be
//! inserted into Markdown as is.
//!
//! # Example
//!
//! ```ignore
//! use snipsync_core::{SnippetRegistry, SnippetSource};
//! use snipsync_snex::{DEFAULT_CONFIG_NAME, SnexSource};
//!
//! let snippets = SnexSource.discover(Path::new("."), DEFAULT_CONFIG_NAME)?;
//! let registry: SnippetRegistry = snippets.into_iter().collect();
//! ```

pub mod config;
mod error;
mod extract;
mod render;

use std::path::{Component, Path, PathBuf};

use ignore::WalkBuilder;
use snipsync_core::{DiscoveredSnippet, SnippetId, SnippetSource};

pub use config::{DEFAULT_CONFIG_NAME, SnexConfig};
pub use error::DiscoveryError;

use config::ResolvedEntry;
use extract::MarkerSyntax;
use render::TemplateVars;

/// Snippet source backed by a `snex.conf.yaml`-style configuration.
#[derive(Debug, Clone, Copy, Default)]
pub struct SnexSource;

impl SnippetSource for SnexSource {
    type Error = DiscoveryError;

    fn discover(
        &self,
        root: &Path,
        config_name: &str,
    ) -> Result<Vec<DiscoveredSnippet>, Self::Error> {
        let config = SnexConfig::load(root, config_name)?;
        discover_with(root, &config)
    }
}

/// Discover snippets below `root` with an already loaded configuration.
pub fn discover_with(
    root: &Path,
    config: &SnexConfig,
) -> Result<Vec<DiscoveredSnippet>, DiscoveryError> {
    let mut snippets = Vec::new();
    for entry in config.resolve()? {
        scan_entry(root, &entry, &mut snippets)?;
    }
    tracing::info!(count = snippets.len(), "Discovered snippets");
    Ok(snippets)
}

fn scan_entry(
    root: &Path,
    entry: &ResolvedEntry,
    snippets: &mut Vec<DiscoveredSnippet>,
) -> Result<(), DiscoveryError> {
    let base = root.join(&entry.path);
    if !base.is_dir() {
        return Err(DiscoveryError::SourceDirMissing {
            entry: entry.name.clone(),
            path: base,
        });
    }

    let syntax = MarkerSyntax::new(&entry.comment_prefix, &entry.comment_suffix);

    for file in source_files(&base)? {
        let Ok(rel) = file.strip_prefix(&base) else {
            continue;
        };
        if !entry.matches(&slash_path(rel)) {
            continue;
        }

        let content = match std::fs::read_to_string(&file) {
            Ok(content) => content,
            Err(err) if err.kind() == std::io::ErrorKind::InvalidData => {
                tracing::warn!(path = %file.display(), "Skipping non UTF-8 source file");
                continue;
            }
            Err(source) => {
                return Err(DiscoveryError::SourceRead {
                    path: file.clone(),
                    source,
                });
            }
        };

        let origin = entry
            .origin
            .clone()
            .unwrap_or_else(|| slash_path(&rel.with_extension("")));
        let lang = entry.lang.clone().unwrap_or_else(|| {
            rel.extension()
                .map(|ext| ext.to_string_lossy().into_owned())
                .unwrap_or_default()
        });
        let display_path = file
            .strip_prefix(root)
            .map_or_else(|_| slash_path(&file), slash_path);

        for raw in extract::extract(&content, syntax, &file)? {
            let body = render::dedent(&raw.lines);
            let rendered = render::expand(
                &entry.template,
                &TemplateVars {
                    lang: &lang,
                    origin: &origin,
                    name: &raw.name,
                    path: &display_path,
                    content: &body,
                },
            );
            tracing::debug!(
                path = %display_path,
                line = raw.line,
                origin = %origin,
                name = %raw.name,
                "Extracted snippet"
            );
            snippets.push(DiscoveredSnippet {
                id: SnippetId::new(origin.clone(), raw.name),
                rendered,
            });
        }
    }

    Ok(())
}

/// Regular files below `base`, sorted by path. Ignore files are not honored.
fn source_files(base: &Path) -> Result<Vec<PathBuf>, DiscoveryError> {
    let mut builder = WalkBuilder::new(base);
    builder
        .standard_filters(false)
        .sort_by_file_name(|a, b| a.cmp(b));

    let mut files = Vec::new();
    for entry in builder.build() {
        let entry = entry?;
        if entry.file_type().is_some_and(|t| t.is_file()) {
            files.push(entry.into_path());
        }
    }
    Ok(files)
}

/// Render a relative path with `/` separators on every platform.
fn slash_path(path: &Path) -> String {
    path.components()
        .filter_map(|c| match c {
            Component::Normal(part) => Some(part.to_string_lossy()),
            _ => None,
        })
        .collect::<Vec<_>>()
        .join("/")
}
