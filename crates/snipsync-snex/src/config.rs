//! Discovery configuration (`snex.conf.yaml`).
//!
//! ```yaml
//! default:
//!   comment_prefix: "// "
//!   lang: rust
//! configs:
//!   core:
//!     path: src
//!     glob: "**/*.rs"
//!   scripts:
//!     path: scripts
//!     glob: ["*.py", "*.sh"]
//!     comment_prefix: "# "
//! ```
//!
//! Every option of `default` can be overridden per entry. Entries keep the
//! order in which they appear in the file.

use std::path::{Path, PathBuf};

use glob::{MatchOptions, Pattern};
use serde::Deserialize;

use crate::error::DiscoveryError;

/// Default configuration file name, looked up in the project root.
pub const DEFAULT_CONFIG_NAME: &str = "snex.conf.yaml";

const DEFAULT_GLOB: &str = "**/*";
const DEFAULT_COMMENT_PREFIX: &str = "# ";
const DEFAULT_TEMPLATE: &str = "```{lang}\n{content}```\n";

const MATCH_OPTIONS: MatchOptions = MatchOptions {
    case_sensitive: true,
    require_literal_separator: true,
    require_literal_leading_dot: false,
};

/// Snippet options shared by `default` and the config entries.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct SnippetOptions {
    /// Language tag passed to the template (default: file extension).
    pub lang: Option<String>,
    /// Comment opener in front of snippet markers (default: `"# "`).
    pub comment_prefix: Option<String>,
    /// Comment closer after snippet markers (default: none).
    pub comment_suffix: Option<String>,
    /// Rendering template.
    pub template: Option<String>,
    /// Fixed origin for every snippet of the entry.
    pub origin: Option<String>,
}

impl SnippetOptions {
    /// Fill unset options from `fallback`.
    #[must_use]
    pub fn merged(&self, fallback: &Self) -> Self {
        Self {
            lang: self.lang.clone().or_else(|| fallback.lang.clone()),
            comment_prefix: self
                .comment_prefix
                .clone()
                .or_else(|| fallback.comment_prefix.clone()),
            comment_suffix: self
                .comment_suffix
                .clone()
                .or_else(|| fallback.comment_suffix.clone()),
            template: self.template.clone().or_else(|| fallback.template.clone()),
            origin: self.origin.clone().or_else(|| fallback.origin.clone()),
        }
    }
}

/// One named entry of the `configs` section.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConfigEntry {
    /// Entry name (the key under `configs`).
    pub name: String,
    /// Directory to scan, relative to the project root.
    pub path: PathBuf,
    /// Glob patterns matched against paths relative to `path`.
    pub globs: Vec<String>,
    /// Options set on this entry.
    pub options: SnippetOptions,
}

/// Parsed discovery configuration.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SnexConfig {
    /// Options applied to every entry.
    pub default: SnippetOptions,
    /// Entries in file order.
    pub entries: Vec<ConfigEntry>,
}

#[derive(Deserialize)]
struct RawConfig {
    #[serde(default)]
    default: Option<SnippetOptions>,
    #[serde(default)]
    configs: Option<serde_yaml::Mapping>,
}

#[derive(Deserialize)]
struct RawEntry {
    path: String,
    #[serde(default)]
    glob: Option<Globs>,
    #[serde(flatten)]
    options: SnippetOptions,
}

#[derive(Deserialize)]
#[serde(untagged)]
enum Globs {
    One(String),
    Many(Vec<String>),
}

impl Globs {
    fn into_vec(self) -> Vec<String> {
        match self {
            Self::One(glob) => vec![glob],
            Self::Many(globs) => globs,
        }
    }
}

impl SnexConfig {
    /// Load `config_name` from `root`.
    pub fn load(root: &Path, config_name: &str) -> Result<Self, DiscoveryError> {
        let path = root.join(config_name);
        let content = std::fs::read_to_string(&path).map_err(|source| {
            DiscoveryError::ConfigRead {
                path: path.clone(),
                source,
            }
        })?;
        Self::parse(&content).map_err(|source| DiscoveryError::ConfigParse { path, source })
    }

    /// Parse configuration from YAML text. Empty text yields no entries.
    pub fn parse(content: &str) -> Result<Self, serde_yaml::Error> {
        if content.trim().is_empty() {
            return Ok(Self::default());
        }

        let raw: RawConfig = serde_yaml::from_str(content)?;
        let mut entries = Vec::new();
        for (key, value) in raw.configs.unwrap_or_default() {
            let name = key
                .as_str()
                .map_or_else(|| format!("{key:?}"), str::to_owned);
            let entry: RawEntry = serde_yaml::from_value(value)?;
            entries.push(ConfigEntry {
                name,
                path: PathBuf::from(entry.path),
                globs: entry
                    .glob
                    .map_or_else(|| vec![DEFAULT_GLOB.to_owned()], Globs::into_vec),
                options: entry.options,
            });
        }

        Ok(Self {
            default: raw.default.unwrap_or_default(),
            entries,
        })
    }

    /// Entries with defaults applied and globs compiled.
    pub(crate) fn resolve(&self) -> Result<Vec<ResolvedEntry>, DiscoveryError> {
        self.entries
            .iter()
            .map(|entry| ResolvedEntry::new(entry, &self.default))
            .collect()
    }
}

/// Config entry ready for scanning.
#[derive(Debug)]
pub(crate) struct ResolvedEntry {
    pub name: String,
    pub path: PathBuf,
    pub patterns: Vec<Pattern>,
    pub lang: Option<String>,
    pub comment_prefix: String,
    pub comment_suffix: String,
    pub template: String,
    pub origin: Option<String>,
}

impl ResolvedEntry {
    fn new(entry: &ConfigEntry, default: &SnippetOptions) -> Result<Self, DiscoveryError> {
        let patterns = entry
            .globs
            .iter()
            .map(|glob| {
                Pattern::new(glob).map_err(|source| DiscoveryError::Glob {
                    entry: entry.name.clone(),
                    pattern: glob.clone(),
                    source,
                })
            })
            .collect::<Result<Vec<_>, _>>()?;

        let options = entry.options.merged(default);
        Ok(Self {
            name: entry.name.clone(),
            path: entry.path.clone(),
            patterns,
            lang: options.lang,
            comment_prefix: options
                .comment_prefix
                .unwrap_or_else(|| DEFAULT_COMMENT_PREFIX.to_owned()),
            comment_suffix: options.comment_suffix.unwrap_or_default(),
            template: options
                .template
                .unwrap_or_else(|| DEFAULT_TEMPLATE.to_owned()),
            origin: options.origin,
        })
    }

    /// Whether `rel_path` (relative to the entry path, `/`-separated) is selected.
    ///
    /// `*` stays within one directory, `**` spans directories.
    pub fn matches(&self, rel_path: &str) -> bool {
        self.patterns
            .iter()
            .any(|p| p.matches_with(rel_path, MATCH_OPTIONS))
    }
}
