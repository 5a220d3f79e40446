//! # docnav
//!
//! Builds the navigation sidebar of a documentation site from its directory
//! tree. Your filesystem is the data source: directories become categories,
//! documents are ordered by front matter position or numeric prefix, and
//! optional `_category_` files override how each category is shown.
//!
//! # Architecture: Flat Documents In, Tree Out
//!
//! ```text
//! 1. Scan      docs/      →  Vec<Document>     (filesystem → structured data)
//! 2. Generate  documents  →  Vec<SidebarItem>  (grouping, metadata, ordering)
//! 3. Output    sidebar    →  JSON / tree view
//! ```
//!
//! Generation never touches the filesystem directly. Number-prefix parsing,
//! index detection, and metadata access are collaborators handed to the
//! builder, so unit tests run the whole algorithm against in-memory
//! documents and metadata.
//!
//! # Module Map
//!
//! | Module | Role |
//! |--------|------|
//! | [`scan`] | Walks the content directory and loads documents with their front matter |
//! | [`generate`] | Entry point: builds the sidebar slice for one root directory |
//! | [`tree`] | Recursive grouping, category assembly, and the sibling sort policy |
//! | [`naming`] | `NN-name` prefix parsing and title formatting |
//! | [`index`] | Which document is a category's landing page |
//! | [`metadata`] | `_category_.json` / `.yml` lookup and parsing |
//! | [`config`] | `sidebar.toml` loading, validation, and merging |
//! | [`types`] | Documents in, sidebar items out |
//! | [`output`] | CLI tree display of a generated sidebar |
//!
//! # Design Decisions
//!
//! ## No Materialized Directory Tree
//!
//! The builder never constructs a directory tree. Each level groups its
//! documents by the next path segment and recurses into each group. The only
//! tree that exists is the output.
//!
//! ## Strategies, Not Flags
//!
//! Numbering conventions and landing-page conventions differ between sites.
//! Both are traits ([`naming::NumberPrefixParser`],
//! [`index::CategoryIndexDetector`]) with default implementations, and any
//! closure with the right signature implements them.
//!
//! ## All-or-Nothing Generation
//!
//! A malformed `_category_` file or a category link to an unknown document
//! fails the whole build with a [`config::ConfigError`]. A partial sidebar
//! is never returned.
//!
//! ## Deterministic Output
//!
//! The same documents and metadata always yield the same sidebar. Ties that
//! survive explicit positions and number prefixes fall back to the order
//! documents were supplied in.

pub mod config;
pub mod generate;
pub mod index;
pub mod metadata;
pub mod naming;
pub mod output;
pub mod scan;
pub mod tree;
pub mod types;

#[cfg(test)]
pub(crate) mod test_helpers;
