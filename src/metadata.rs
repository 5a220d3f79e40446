//! Category metadata resolution.
//!
//! Each directory may carry an out-of-band metadata file that overrides how
//! its category is presented:
//!
//! ```text
//! docs/
//! └── 03-reference/
//!     ├── _category_.json     ← tried first
//!     ├── _category_.yml      ← tried when there is no JSON file
//!     └── cli.md
//! ```
//!
//! ```json
//! {
//!   "label": "API Reference",
//!   "position": 2.5,
//!   "collapsed": false,
//!   "className": "reference",
//!   "customProps": {"badge": "new"},
//!   "link": {"type": "generated-index", "slug": "/reference"}
//! }
//! ```
//!
//! Every field is optional and a missing file is the same as an empty one.
//! `"link": null` disables the category link, including an auto-detected
//! index document.
//!
//! ## Resolution priority
//!
//! Explicit metadata always wins over values derived from the filesystem. The
//! merge itself happens in [`crate::tree`]; [`resolve`] is the shared
//! first-non-empty helper it uses for text fields.

use crate::config::ConfigError;
use crate::types::{CategoryLink, CustomProps};
use log::debug;
use serde::{Deserialize, Deserializer};
use std::io;
use std::path::{Path, PathBuf};

/// Metadata file names, in preference order. First match wins.
pub const CATEGORY_METADATA_FILES: &[&str] =
    &["_category_.json", "_category_.yml", "_category_.yaml"];

/// Typed contents of a `_category_` file.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields, rename_all = "camelCase")]
pub struct CategoryMetadata {
    pub label: Option<String>,
    pub class_name: Option<String>,
    pub custom_props: Option<CustomProps>,
    /// Position of the category among its siblings.
    pub position: Option<f64>,
    pub collapsed: Option<bool>,
    pub collapsible: Option<bool>,
    #[serde(deserialize_with = "deserialize_link")]
    pub link: LinkSetting,
}

/// The three states of the `link` key.
#[derive(Debug, Clone, Default, PartialEq)]
pub enum LinkSetting {
    /// Key absent: use the auto-detected index document, if any.
    #[default]
    Unset,
    /// `link: null`: no category link at all.
    Disabled,
    Explicit(CategoryLink),
}

fn deserialize_link<'de, D>(deserializer: D) -> Result<LinkSetting, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match Option::<CategoryLink>::deserialize(deserializer)? {
        Some(link) => LinkSetting::Explicit(link),
        None => LinkSetting::Disabled,
    })
}

/// Access to metadata files, relative to the content root.
///
/// `directory` uses the same notation as [`crate::types::Document::source_dir_name`]
/// (`.` for the root).
pub trait MetadataSource {
    /// Read `directory/file_name`. `Ok(None)` when the file does not exist.
    fn read(&self, directory: &str, file_name: &str) -> io::Result<Option<String>>;
}

/// Reads metadata files from a content directory on disk.
#[derive(Debug, Clone)]
pub struct FsMetadataSource {
    root: PathBuf,
}

impl FsMetadataSource {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    fn path_of(&self, directory: &str, file_name: &str) -> PathBuf {
        if directory == "." {
            self.root.join(file_name)
        } else {
            self.root.join(directory).join(file_name)
        }
    }
}

impl MetadataSource for FsMetadataSource {
    fn read(&self, directory: &str, file_name: &str) -> io::Result<Option<String>> {
        let path = self.path_of(directory, file_name);
        if !path.is_file() {
            return Ok(None);
        }
        std::fs::read_to_string(path).map(Some)
    }
}

/// Look up and parse the metadata of one directory.
///
/// Candidates are tried in [`CATEGORY_METADATA_FILES`] order. No file yields
/// the default (empty) metadata.
pub fn resolve_category_metadata(
    source: &dyn MetadataSource,
    directory: &str,
) -> Result<CategoryMetadata, ConfigError> {
    for file_name in CATEGORY_METADATA_FILES {
        let Some(content) = source.read(directory, file_name)? else {
            continue;
        };
        let path = display_path(directory, file_name);
        debug!("Category metadata for '{directory}' from {path}");
        return parse_category_metadata(&path, &content);
    }
    Ok(CategoryMetadata::default())
}

/// Parse metadata text; the format follows the file extension.
pub fn parse_category_metadata(path: &str, content: &str) -> Result<CategoryMetadata, ConfigError> {
    let is_json = Path::new(path)
        .extension()
        .is_some_and(|ext| ext.eq_ignore_ascii_case("json"));

    let parsed = if is_json {
        serde_json::from_str(content).map_err(|e| e.to_string())
    } else if content.trim().is_empty() {
        // An empty YAML document is an empty mapping, not an error
        Ok(CategoryMetadata::default())
    } else {
        serde_yaml::from_str(content).map_err(|e| e.to_string())
    };

    parsed.map_err(|message| ConfigError::MalformedMetadata {
        path: path.to_string(),
        message,
    })
}

fn display_path(directory: &str, file_name: &str) -> String {
    if directory == "." {
        file_name.to_string()
    } else {
        format!("{directory}/{file_name}")
    }
}

/// Resolve a field from multiple sources.
///
/// Takes optional values in priority order and returns the first non-None,
/// non-blank one.
///
/// ```text
/// label: resolve(&[metadata.label, derived_from_directory_name])
/// ```
pub fn resolve(sources: &[Option<&str>]) -> Option<String> {
    sources
        .iter()
        .filter_map(|opt| {
            opt.map(str::trim)
                .filter(|s| !s.is_empty())
                .map(String::from)
        })
        .next()
}
