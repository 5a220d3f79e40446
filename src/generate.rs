//! Sidebar slice assembly: the top-level entry point.
//!
//! [`generate_sidebar`] takes the full document list, the directory to build
//! the sidebar for, global options, and the three collaborators (number-prefix
//! parser, index detector, metadata source), and returns the root's children
//! in order.
//!
//! ```text
//! documents ──┐
//! root ───────┼─→ generate_sidebar ─→ TreeBuilder (recursive) ─→ Vec<SidebarItem>
//! options ────┤                          │
//! strategies ─┘                          ├─ NumberPrefixParser
//!                                        ├─ CategoryIndexDetector
//!                                        └─ MetadataSource
//! ```
//!
//! The build is all-or-nothing: one malformed metadata file or unresolvable
//! category link fails the whole invocation with a [`ConfigError`].
//!
//! [`SidebarGenerator`] bundles the strategies a [`SidebarConfig`] selects
//! with a metadata source reading from the content directory.

use crate::config::{ConfigError, GeneratorOptions, SidebarConfig};
use crate::index::CategoryIndexDetector;
use crate::metadata::FsMetadataSource;
use crate::naming::NumberPrefixParser;
use crate::tree::{TreeBuilder, is_within, split_dir};
use crate::types::{Document, SidebarItem};
use log::{debug, warn};
use std::path::Path;

pub use crate::tree::Collaborators;

/// Build the sidebar slice for `root`.
///
/// `documents` should already be limited to the content under `root`;
/// documents elsewhere are ignored. No documents under `root` is not an
/// error: a warning is logged and the slice is empty.
pub fn generate_sidebar(
    documents: &[Document],
    root: &str,
    options: &GeneratorOptions,
    collaborators: &Collaborators<'_>,
) -> Result<Vec<SidebarItem>, ConfigError> {
    let root_segments = split_dir(root);

    let in_scope = documents
        .iter()
        .filter(|doc| is_within(&doc.source_dir_name, &root_segments))
        .count();
    if in_scope == 0 {
        warn!("No documents found under '{root}'; the sidebar is empty");
        return Ok(Vec::new());
    }
    if in_scope < documents.len() {
        debug!(
            "Ignoring {} documents outside '{root}'",
            documents.len() - in_scope
        );
    }

    TreeBuilder::new(collaborators, *options, documents).build(&root_segments)
}

/// Generator wired from a [`SidebarConfig`] and a content directory.
pub struct SidebarGenerator {
    config: SidebarConfig,
    number_prefix_parser: Box<dyn NumberPrefixParser + Sync>,
    index_detector: Box<dyn CategoryIndexDetector>,
    metadata: FsMetadataSource,
}

impl SidebarGenerator {
    pub fn new(config: SidebarConfig, content_root: &Path) -> Self {
        Self {
            number_prefix_parser: config.number_prefix_parser(),
            index_detector: config.index_detector(),
            metadata: FsMetadataSource::new(content_root),
            config,
        }
    }

    pub fn config(&self) -> &SidebarConfig {
        &self.config
    }

    pub fn generate(&self, documents: &[Document]) -> Result<Vec<SidebarItem>, ConfigError> {
        let collaborators = Collaborators {
            number_prefix_parser: self.number_prefix_parser.as_ref(),
            index_detector: self.index_detector.as_ref(),
            metadata: &self.metadata,
        };
        generate_sidebar(
            documents,
            &self.config.root,
            &self.config.generator_options(),
            &collaborators,
        )
    }
}
