//! Generator configuration.
//!
//! Handles loading, validating, and merging `sidebar.toml`. The file lives in
//! the content root, is optional, and only needs the keys it overrides:
//!
//! ```toml
//! root = "."                         # Sidebar root, relative to the content root
//! collapsed = true                   # Default for every category
//! collapsible = true                 # Default for every category
//! number_prefixes = true             # Strip and order by `NN-` prefixes
//! index_convention = "index-or-readme"   # or "folder-name"
//! tie_break = "input-order"          # or "name"
//! ```
//!
//! Per-category overrides do not belong here; they live in `_category_.json`
//! or `_category_.yml` next to the documents (see [`crate::metadata`]).
//!
//! Unknown keys are rejected to catch typos early.
//!
//! This module also owns [`ConfigError`], the error every configuration
//! problem surfaces as, including malformed category metadata discovered
//! while the tree is built.

use crate::index::{CategoryIndexDetector, DefaultIndexDetector, FolderNameIndexDetector};
use crate::naming::{DefaultNumberPrefixParser, DisabledNumberPrefixParser, NumberPrefixParser};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;
use thiserror::Error;

pub const CONFIG_FILE: &str = "sidebar.toml";

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("TOML parse error: {0}")]
    Toml(#[from] toml::de::Error),
    #[error("Config validation error: {0}")]
    Validation(String),
    #[error("Malformed category metadata {path}: {message}")]
    MalformedMetadata { path: String, message: String },
    #[error("Category '{directory}' links to unknown document '{id}'")]
    UnresolvedDocLink { directory: String, id: String },
}

/// How siblings that tie on every ordering key are arranged.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum TieBreak {
    /// Keep the order documents were supplied in.
    #[default]
    InputOrder,
    /// Compare clean names (case-sensitive), then keep input order.
    Name,
}

/// Which file names mark a directory's landing page.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum IndexConvention {
    /// `index` or `readme`.
    #[default]
    IndexOrReadme,
    /// `index`, `readme`, or a file named like its directory.
    FolderName,
}

/// Settings loaded from `sidebar.toml`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SidebarConfig {
    /// Directory to generate the sidebar for, relative to the content root.
    pub root: String,
    /// Whether categories start collapsed unless their metadata says otherwise.
    pub collapsed: bool,
    /// Whether categories can be collapsed unless their metadata says otherwise.
    pub collapsible: bool,
    /// Parse `NN-` ordering prefixes off file and directory names.
    pub number_prefixes: bool,
    pub index_convention: IndexConvention,
    pub tie_break: TieBreak,
}

impl Default for SidebarConfig {
    fn default() -> Self {
        Self {
            root: ".".to_string(),
            collapsed: true,
            collapsible: true,
            number_prefixes: true,
            index_convention: IndexConvention::default(),
            tie_break: TieBreak::default(),
        }
    }
}

impl SidebarConfig {
    /// Validate config values are usable.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.root.trim().is_empty() {
            return Err(ConfigError::Validation("root must not be empty".into()));
        }
        let root = Path::new(&self.root);
        if root.is_absolute() {
            return Err(ConfigError::Validation(
                "root must be relative to the content directory".into(),
            ));
        }
        if root.components().any(|c| c == std::path::Component::ParentDir) {
            return Err(ConfigError::Validation(
                "root must not leave the content directory".into(),
            ));
        }
        Ok(())
    }

    /// Defaults applied to every category during generation.
    pub fn generator_options(&self) -> GeneratorOptions {
        GeneratorOptions {
            collapsed: self.collapsed,
            collapsible: self.collapsible,
            tie_break: self.tie_break,
        }
    }

    pub fn number_prefix_parser(&self) -> Box<dyn NumberPrefixParser + Sync> {
        if self.number_prefixes {
            Box::new(DefaultNumberPrefixParser)
        } else {
            Box::new(DisabledNumberPrefixParser)
        }
    }

    pub fn index_detector(&self) -> Box<dyn CategoryIndexDetector> {
        match self.index_convention {
            IndexConvention::IndexOrReadme => Box::new(DefaultIndexDetector),
            IndexConvention::FolderName => Box::new(FolderNameIndexDetector),
        }
    }
}

/// Global options threaded unchanged through the whole tree build.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GeneratorOptions {
    pub collapsed: bool,
    pub collapsible: bool,
    pub tie_break: TieBreak,
}

impl Default for GeneratorOptions {
    fn default() -> Self {
        SidebarConfig::default().generator_options()
    }
}

// =============================================================================
// Config loading, merging, and validation
// =============================================================================

/// Returns the stock default config as a `toml::Value::Table`.
///
/// This is the base layer user overrides are merged on top of.
pub fn stock_defaults_value() -> toml::Value {
    toml::Value::try_from(SidebarConfig::default()).expect("default config must serialize")
}

/// Merge `overlay` on top of `base`.
///
/// - Tables are merged key-by-key (overlay keys override base keys).
/// - Non-table values in overlay replace base values entirely.
/// - Keys in base that are not in overlay are preserved.
///
/// `sidebar.toml` is flat today, so only the top-level table is merged in
/// practice. Nested tables still merge recursively if sections are added.
pub fn merge_toml(base: toml::Value, overlay: toml::Value) -> toml::Value {
    match (base, overlay) {
        (toml::Value::Table(mut base_table), toml::Value::Table(overlay_table)) => {
            for (key, overlay_val) in overlay_table {
                let merged = match base_table.remove(&key) {
                    Some(base_val) => merge_toml(base_val, overlay_val),
                    None => overlay_val,
                };
                base_table.insert(key, merged);
            }
            toml::Value::Table(base_table)
        }
        (_, overlay) => overlay,
    }
}

/// Load `sidebar.toml` from a directory as a raw TOML value.
///
/// Returns `Ok(None)` if the directory has no `sidebar.toml`.
pub fn load_raw_config(path: &Path) -> Result<Option<toml::Value>, ConfigError> {
    let config_path = path.join(CONFIG_FILE);
    if !config_path.exists() {
        return Ok(None);
    }
    let content = fs::read_to_string(&config_path)?;
    let value: toml::Value = toml::from_str(&content)?;
    Ok(Some(value))
}

/// Merge an optional overlay onto a base value, then deserialize and validate.
pub fn resolve_config(
    base: toml::Value,
    overlay: Option<toml::Value>,
) -> Result<SidebarConfig, ConfigError> {
    let merged = match overlay {
        Some(ov) => merge_toml(base, ov),
        None => base,
    };
    let config: SidebarConfig = merged.try_into()?;
    config.validate()?;
    Ok(config)
}

/// Load config from `sidebar.toml` in the content root, on top of the stock
/// defaults.
pub fn load_config(root: &Path) -> Result<SidebarConfig, ConfigError> {
    let base = stock_defaults_value();
    let overlay = load_raw_config(root)?;
    resolve_config(base, overlay)
}

/// Returns a fully-commented stock `sidebar.toml`.
///
/// Used by the `gen-config` CLI command.
pub fn stock_config_toml() -> &'static str {
    r##"# docnav configuration
# ====================
# All settings are optional. Values shown below are the defaults.
# Place this file in the content root as sidebar.toml.
# Unknown keys will cause an error.

# Directory to build the sidebar for, relative to the content root.
root = "."

# Default collapse state of every category. A category's _category_.json
# (or _category_.yml) can override both per directory.
collapsed = true
collapsible = true

# Order entries by numeric name prefixes ("01-intro.md", "02-guides/") and
# strip the prefix from labels. Set to false to use names verbatim.
number_prefixes = true

# Which documents become the landing page of their directory:
#   "index-or-readme"  index.md or README.md
#   "folder-name"      the above, or a file named like its directory
index_convention = "index-or-readme"

# Order of siblings that tie on sidebar_position and number prefix:
#   "input-order"  keep file order
#   "name"         compare names (prefix stripped), then file order
tie_break = "input-order"
"##
}
