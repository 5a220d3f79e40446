//! Content directory scanning.
//!
//! Walks a documentation tree and loads every Markdown file into a
//! [`Document`], the input of sidebar generation.
//!
//! ## Directory Structure
//!
//! ```text
//! docs/                            # Content root
//! ├── sidebar.toml                 # Generator settings (optional)
//! ├── 01-intro.md                  # id "intro"
//! ├── 02-guides/
//! │   ├── _category_.json          # Category metadata (not a document)
//! │   ├── index.md                 # id "guides/index"
//! │   └── 01-setup.mdx             # id "guides/setup"
//! ├── _drafts/                     # Skipped: leading underscore
//! └── .cache/                      # Skipped: hidden
//! ```
//!
//! ## Ids
//!
//! A document's id is its directory path plus file stem, with number prefixes
//! stripped from every segment. A front matter `id` replaces the file stem
//! part only, so `02-guides/01-setup.md` with `id: install` becomes
//! `guides/install`.
//!
//! ## Front Matter
//!
//! A `---` fenced YAML block at the top of the file. Only the `sidebar_*`
//! keys and `id` are read; other keys are ignored.
//!
//! ```yaml
//! ---
//! id: install
//! sidebar_position: 2
//! sidebar_label: Installing
//! sidebar_class_name: highlight
//! sidebar_custom_props:
//!   badge: new
//! ---
//! ```
//!
//! Documents come back in walk order: depth-first, names sorted within each
//! directory. That order is the encounter order the sidebar falls back to.

use crate::config::ConfigError;
use crate::naming::NumberPrefixParser;
use crate::types::{CustomProps, Document};
use log::debug;
use rayon::prelude::*;
use serde::Deserialize;
use std::collections::HashMap;
use std::ffi::OsStr;
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;
use walkdir::WalkDir;

#[derive(Error, Debug)]
pub enum ScanError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Walk error: {0}")]
    Walk(#[from] walkdir::Error),
    #[error("Invalid front matter in {path}: {message}")]
    FrontMatter { path: String, message: String },
    #[error("Duplicate document id '{id}' ({first} and {second})")]
    DuplicateId {
        id: String,
        first: String,
        second: String,
    },
    #[error("Config error: {0}")]
    Config(#[from] ConfigError),
}

const DOCUMENT_EXTENSIONS: &[&str] = &["md", "mdx"];

/// The front matter keys the sidebar uses.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct FrontMatter {
    id: Option<String>,
    sidebar_position: Option<f64>,
    sidebar_label: Option<String>,
    sidebar_class_name: Option<String>,
    sidebar_custom_props: Option<CustomProps>,
}

/// Load every document under `root`.
///
/// `parser` strips number prefixes when deriving ids; pass the same parser
/// the sidebar will be generated with.
pub fn scan(
    root: &Path,
    parser: &(dyn NumberPrefixParser + Sync),
) -> Result<Vec<Document>, ScanError> {
    let files = collect_files(root)?;

    let documents = files
        .par_iter()
        .map(|rel| load_document(root, rel, parser))
        .collect::<Result<Vec<_>, _>>()?;

    check_unique_ids(&documents)?;
    debug!("Scanned {} documents under {}", documents.len(), root.display());
    Ok(documents)
}

/// Document paths relative to `root`, in walk order.
fn collect_files(root: &Path) -> Result<Vec<PathBuf>, ScanError> {
    let walker = WalkDir::new(root)
        .sort_by_file_name()
        .into_iter()
        .filter_entry(|entry| entry.depth() == 0 || !is_skipped(entry.file_name()));

    let mut files = Vec::new();
    for entry in walker {
        let entry = entry?;
        if entry.file_type().is_file() && is_document(entry.path()) {
            let rel = entry.path().strip_prefix(root).unwrap_or(entry.path());
            files.push(rel.to_path_buf());
        }
    }
    Ok(files)
}

fn is_skipped(name: &OsStr) -> bool {
    let name = name.to_string_lossy();
    name.starts_with('.') || name.starts_with('_')
}

fn is_document(path: &Path) -> bool {
    let ext = path
        .extension()
        .map(|e| e.to_string_lossy().to_lowercase())
        .unwrap_or_default();
    DOCUMENT_EXTENSIONS.contains(&ext.as_str())
}

fn load_document(
    root: &Path,
    rel: &Path,
    parser: &(dyn NumberPrefixParser + Sync),
) -> Result<Document, ScanError> {
    let segments: Vec<String> = rel
        .components()
        .map(|c| c.as_os_str().to_string_lossy().to_string())
        .collect();
    let source = segments.join("/");
    let dirs = &segments[..segments.len().saturating_sub(1)];

    let content = fs::read_to_string(root.join(rel))?;
    let front_matter = parse_front_matter(&source, &content)?;

    let stem = rel
        .file_stem()
        .map(|s| s.to_string_lossy().to_string())
        .unwrap_or_default();
    let local_id = front_matter
        .id
        .unwrap_or_else(|| parser.parse(&stem).name);

    let mut id_segments: Vec<String> = dirs.iter().map(|d| parser.parse(d).name).collect();
    id_segments.push(local_id);

    Ok(Document {
        id: id_segments.join("/"),
        source_dir_name: if dirs.is_empty() {
            ".".to_string()
        } else {
            dirs.join("/")
        },
        source,
        sidebar_position: front_matter.sidebar_position,
        label: front_matter.sidebar_label,
        class_name: front_matter.sidebar_class_name,
        custom_props: front_matter.sidebar_custom_props,
    })
}

fn parse_front_matter(path: &str, content: &str) -> Result<FrontMatter, ScanError> {
    let Some(block) = front_matter_block(content) else {
        return Ok(FrontMatter::default());
    };
    if block.trim().is_empty() {
        return Ok(FrontMatter::default());
    }
    serde_yaml::from_str(block).map_err(|e| ScanError::FrontMatter {
        path: path.to_string(),
        message: e.to_string(),
    })
}

/// The text between a leading `---` line and the next `---` line.
/// An unterminated block is not front matter.
fn front_matter_block(content: &str) -> Option<&str> {
    let content = content.strip_prefix('\u{feff}').unwrap_or(content);
    let mut lines = content.split_inclusive('\n');
    let first = lines.next()?;
    if first.trim_end() != "---" {
        return None;
    }

    let start = first.len();
    let mut end = start;
    for line in lines {
        if line.trim_end() == "---" {
            return Some(&content[start..end]);
        }
        end += line.len();
    }
    None
}

fn check_unique_ids(documents: &[Document]) -> Result<(), ScanError> {
    let mut seen: HashMap<&str, &str> = HashMap::with_capacity(documents.len());
    for doc in documents {
        if let Some(first) = seen.insert(&doc.id, &doc.source) {
            return Err(ScanError::DuplicateId {
                id: doc.id.clone(),
                first: first.to_string(),
                second: doc.source.clone(),
            });
        }
    }
    Ok(())
}
