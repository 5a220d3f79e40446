//! Shared test utilities for the docnav test suite.
//!
//! Provides document builders, an in-memory metadata source, lookup helpers
//! over generated sidebars, and a log capture for asserting warnings.
//!
//! # Usage
//!
//! ```rust
//! use crate::test_helpers::*;
//!
//! let docs = [doc("intro", "intro.md"), doc("guides/setup", "02-guides/setup.md").at(1.0)];
//! let metadata = MemoryMetadataSource::default()
//!     .with("02-guides/_category_.json", r#"{"label": "How-to"}"#);
//! let sidebar = generate(&docs, &metadata).unwrap();
//!
//! assert_eq!(shape(&sidebar), "intro, How-to(guides/setup)");
//! ```

use std::cell::RefCell;
use std::collections::HashMap;
use std::io;
use std::path::Path;
use std::sync::Once;

use log::{Level, LevelFilter, Log, Metadata, Record};

use crate::config::{ConfigError, GeneratorOptions};
use crate::generate::generate_sidebar;
use crate::index::DefaultIndexDetector;
use crate::metadata::MetadataSource;
use crate::naming::DefaultNumberPrefixParser;
use crate::tree::Collaborators;
use crate::types::{CategoryItem, CustomProps, Document, SidebarItem};

// =========================================================================
// Document builders
// =========================================================================

/// A document with the given id and source path. The directory is derived
/// from the source (`.` for files at the root).
pub fn doc(id: &str, source: &str) -> Document {
    let source_dir_name = Path::new(source)
        .parent()
        .map(|p| p.to_string_lossy().to_string())
        .filter(|p| !p.is_empty())
        .unwrap_or_else(|| ".".to_string());
    Document {
        id: id.to_string(),
        source: source.to_string(),
        source_dir_name,
        sidebar_position: None,
        label: None,
        class_name: None,
        custom_props: None,
    }
}

impl Document {
    pub fn at(mut self, position: f64) -> Self {
        self.sidebar_position = Some(position);
        self
    }

    pub fn labeled(mut self, label: &str) -> Self {
        self.label = Some(label.to_string());
        self
    }

    pub fn styled(mut self, class_name: &str, custom_props: serde_json::Value) -> Self {
        self.class_name = Some(class_name.to_string());
        self.custom_props = match custom_props {
            serde_json::Value::Object(map) => Some(map),
            other => panic!("custom props must be an object, got {other}"),
        };
        self
    }
}

/// Custom props from a JSON object literal.
pub fn props(value: serde_json::Value) -> CustomProps {
    match value {
        serde_json::Value::Object(map) => map,
        other => panic!("custom props must be an object, got {other}"),
    }
}

// =========================================================================
// In-memory metadata source
// =========================================================================

/// Metadata files keyed by their path relative to the content root
/// (`guides/_category_.json`, or `_category_.yml` for the root).
#[derive(Debug, Default)]
pub struct MemoryMetadataSource {
    files: HashMap<String, String>,
}

impl MemoryMetadataSource {
    pub fn with(mut self, path: &str, content: &str) -> Self {
        self.files.insert(path.to_string(), content.to_string());
        self
    }
}

impl MetadataSource for MemoryMetadataSource {
    fn read(&self, directory: &str, file_name: &str) -> io::Result<Option<String>> {
        let key = if directory == "." {
            file_name.to_string()
        } else {
            format!("{directory}/{file_name}")
        };
        Ok(self.files.get(&key).cloned())
    }
}

// =========================================================================
// Generation shortcuts
// =========================================================================

/// Generate the root sidebar with default strategies and options.
pub fn generate(
    docs: &[Document],
    metadata: &MemoryMetadataSource,
) -> Result<Vec<SidebarItem>, ConfigError> {
    generate_with(docs, ".", GeneratorOptions::default(), metadata)
}

/// Generate with default strategies and explicit root and options.
pub fn generate_with(
    docs: &[Document],
    root: &str,
    options: GeneratorOptions,
    metadata: &MemoryMetadataSource,
) -> Result<Vec<SidebarItem>, ConfigError> {
    let collaborators = Collaborators {
        number_prefix_parser: &DefaultNumberPrefixParser,
        index_detector: &DefaultIndexDetector,
        metadata,
    };
    generate_sidebar(docs, root, &options, &collaborators)
}

// =========================================================================
// Sidebar lookups, panicking with a clear message on miss
// =========================================================================

/// Doc ids and category labels of one level, in order.
pub fn item_ids(items: &[SidebarItem]) -> Vec<&str> {
    items
        .iter()
        .map(|item| match item {
            SidebarItem::Doc(doc) => doc.id.as_str(),
            SidebarItem::Category(category) => category.label.as_str(),
        })
        .collect()
}

/// Find a category by label among one level. Panics if not found.
pub fn find_category<'a>(items: &'a [SidebarItem], label: &str) -> &'a CategoryItem {
    items
        .iter()
        .find_map(|item| match item {
            SidebarItem::Category(category) if category.label == label => Some(category),
            _ => None,
        })
        .unwrap_or_else(|| panic!("category '{label}' not found. Available: {:?}", item_ids(items)))
}

/// Compact rendering of a whole tree: doc ids, and categories as
/// `Label(children)`.
///
/// ```text
/// intro, Guides(guides/setup, Advanced(guides/advanced/tuning))
/// ```
pub fn shape(items: &[SidebarItem]) -> String {
    items
        .iter()
        .map(|item| match item {
            SidebarItem::Doc(doc) => doc.id.clone(),
            SidebarItem::Category(category) => {
                format!("{}({})", category.label, shape(&category.items))
            }
        })
        .collect::<Vec<_>>()
        .join(", ")
}

// =========================================================================
// Log capture
// =========================================================================

thread_local! {
    static CAPTURED: RefCell<Vec<(Level, String)>> = const { RefCell::new(Vec::new()) };
}

/// Global logger that files every record under the thread that emitted it,
/// so parallel tests only see their own output.
struct CaptureLogger;

impl Log for CaptureLogger {
    fn enabled(&self, _metadata: &Metadata<'_>) -> bool {
        true
    }

    fn log(&self, record: &Record<'_>) {
        CAPTURED.with(|records| {
            records
                .borrow_mut()
                .push((record.level(), record.args().to_string()))
        });
    }

    fn flush(&self) {}
}

static LOGGER: CaptureLogger = CaptureLogger;
static INIT: Once = Once::new();

/// Run `f` and return its result with every record it logged.
pub fn capture_logs<T>(f: impl FnOnce() -> T) -> (T, Vec<(Level, String)>) {
    INIT.call_once(|| {
        log::set_logger(&LOGGER).expect("test logger installed once");
        log::set_max_level(LevelFilter::Trace);
    });
    CAPTURED.with(|records| records.borrow_mut().clear());
    let result = f();
    (result, CAPTURED.with(RefCell::take))
}

/// Messages of the `Warn` records.
pub fn warnings(records: &[(Level, String)]) -> Vec<&str> {
    records
        .iter()
        .filter(|(level, _)| *level == Level::Warn)
        .map(|(_, message)| message.as_str())
        .collect()
}
