//! Sidebar tree construction.
//!
//! Turns a flat document list into nested [`SidebarItem`]s. No directory tree
//! is materialized: every level groups its documents by the next path segment
//! and recurses into each group.
//!
//! ```text
//! source_dir_name        level "."        level "02-guides"
//! ─────────────────      ─────────        ─────────────────
//! .                  →   direct doc
//! 02-guides          →   group A      →   direct doc
//! 02-guides/03-cli   →   group A      →   group B
//! ```
//!
//! ## Per category
//!
//! 1. Split the documents into direct docs and one group per subdirectory.
//! 2. Auto-detect at most one index document among the direct docs.
//! 3. Read the directory's metadata. An explicit `link` replaces the
//!    auto-detected index, `link: null` removes it.
//! 4. Position: metadata `position`, else the directory's number prefix.
//! 5. Label: metadata `label`, else the title-cased clean directory name.
//! 6. `collapsed`/`collapsible`: metadata, else the global options.
//! 7. Children: direct docs (minus the linked doc) and subcategories, sorted.
//!
//! The invocation root is not wrapped in a category. Its children are the
//! sidebar slice, and neither index detection nor metadata apply to it.
//!
//! ## Sibling order
//!
//! 1. Explicit position (`sidebar_position`, or a category's position from
//!    step 4), ascending. Items without one come after all items with one.
//! 2. Number prefix of the file or directory name, ascending. Unprefixed last.
//! 3. Clean name, only with [`TieBreak::Name`].
//! 4. Input order. A category takes the input position of its first document.

use crate::config::{ConfigError, GeneratorOptions, TieBreak};
use crate::index::{CategoryIndexDetector, IndexCandidate};
use crate::metadata::{LinkSetting, MetadataSource, resolve, resolve_category_metadata};
use crate::naming::{NumberPrefixParser, ParsedName, title_case};
use crate::types::{CategoryItem, CategoryLink, DocItem, Document, SidebarItem};
use log::{debug, warn};
use std::cmp::Ordering;
use std::collections::HashSet;

/// The pluggable strategies the builder calls into.
#[derive(Clone, Copy)]
pub struct Collaborators<'a> {
    pub number_prefix_parser: &'a dyn NumberPrefixParser,
    pub index_detector: &'a dyn CategoryIndexDetector,
    pub metadata: &'a dyn MetadataSource,
}

/// Split a directory path into segments. `.`, empty, and `./x/` forms
/// normalize the same way as their plain equivalents.
pub(crate) fn split_dir(path: &str) -> Vec<&str> {
    path.split(['/', '\\'])
        .filter(|segment| !segment.is_empty() && *segment != ".")
        .collect()
}

/// Whether a `source_dir_name` lies at or below `root`.
pub(crate) fn is_within(source_dir_name: &str, root: &[&str]) -> bool {
    has_prefix(&split_dir(source_dir_name), root)
}

fn has_prefix(segments: &[&str], root: &[&str]) -> bool {
    segments.len() >= root.len() && segments.iter().zip(root).all(|(a, b)| a == b)
}

/// A document together with its pre-split directory and input position.
struct Entry<'a> {
    doc: &'a Document,
    segments: Vec<&'a str>,
    order: usize,
}

/// An item plus everything its parent needs to sort it.
struct Ranked {
    item: SidebarItem,
    position: Option<f64>,
    prefix: Option<f64>,
    name: String,
    order: usize,
}

/// Direct docs of one level and its subdirectory groups in encounter order.
type Partition<'e, 'a> = (Vec<&'e Entry<'a>>, Vec<(&'a str, Vec<&'e Entry<'a>>)>);

pub(crate) struct TreeBuilder<'a> {
    collaborators: &'a Collaborators<'a>,
    options: GeneratorOptions,
    documents: &'a [Document],
    known_ids: HashSet<&'a str>,
}

impl<'a> TreeBuilder<'a> {
    pub(crate) fn new(
        collaborators: &'a Collaborators<'a>,
        options: GeneratorOptions,
        documents: &'a [Document],
    ) -> Self {
        Self {
            collaborators,
            options,
            documents,
            known_ids: documents.iter().map(|d| d.id.as_str()).collect(),
        }
    }

    /// Build the children of `root` from every document at or below it.
    pub(crate) fn build(&self, root: &[&str]) -> Result<Vec<SidebarItem>, ConfigError> {
        let entries: Vec<Entry<'a>> = self
            .documents
            .iter()
            .enumerate()
            .filter_map(|(order, doc)| {
                let segments = split_dir(&doc.source_dir_name);
                has_prefix(&segments, root).then_some(Entry {
                    doc,
                    segments,
                    order,
                })
            })
            .collect();
        let refs: Vec<&Entry<'a>> = entries.iter().collect();

        let (direct, groups) = partition(&refs, root.len());
        self.build_level(root, direct, groups, None)
    }

    fn parse(&self, name: &str) -> ParsedName {
        self.collaborators.number_prefix_parser.parse(name)
    }

    /// Rank and sort the items of one directory level.
    fn build_level(
        &self,
        dir: &[&str],
        direct: Vec<&Entry<'a>>,
        groups: Vec<(&'a str, Vec<&Entry<'a>>)>,
        linked_id: Option<&str>,
    ) -> Result<Vec<SidebarItem>, ConfigError> {
        let mut ranked = Vec::with_capacity(direct.len() + groups.len());

        for entry in direct {
            if linked_id == Some(entry.doc.id.as_str()) {
                continue;
            }
            ranked.push(self.rank_doc(entry));
        }

        for (segment, members) in groups {
            let mut path = dir.to_vec();
            path.push(segment);
            ranked.push(self.build_category(&path, &members)?);
        }

        sort_ranked(&mut ranked, self.options.tie_break);
        Ok(ranked.into_iter().map(|r| r.item).collect())
    }

    fn rank_doc(&self, entry: &Entry<'a>) -> Ranked {
        let parsed = self.parse(entry.doc.file_stem());
        Ranked {
            item: SidebarItem::Doc(DocItem::from(entry.doc)),
            position: entry.doc.sidebar_position,
            prefix: parsed.number,
            name: parsed.name,
            order: entry.order,
        }
    }

    fn build_category(
        &self,
        path: &[&str],
        entries: &[&Entry<'a>],
    ) -> Result<Ranked, ConfigError> {
        let directory = path.join("/");
        let segment = path.last().copied().unwrap_or(".");
        let parsed = self.parse(segment);

        let (direct, groups) = partition(entries, path.len());
        let auto_index = self.detect_index(path, &direct);
        let metadata = resolve_category_metadata(self.collaborators.metadata, &directory)?;

        let link = match metadata.link {
            LinkSetting::Unset => auto_index.map(|id| CategoryLink::Doc { id }),
            LinkSetting::Disabled => None,
            LinkSetting::Explicit(CategoryLink::Doc { id }) => Some(CategoryLink::Doc {
                id: self.resolve_doc_link(path, &direct, &id)?,
            }),
            LinkSetting::Explicit(link) => Some(link),
        };
        if let Some(link) = &link {
            debug!("Category '{directory}' links to {link:?}");
        }

        let linked_id = match &link {
            Some(CategoryLink::Doc { id }) => Some(id.as_str()),
            _ => None,
        };
        let items = self.build_level(path, direct, groups, linked_id)?;

        let derived_label = title_case(&parsed.name);
        let label = resolve(&[metadata.label.as_deref(), Some(derived_label.as_str())])
            .unwrap_or_else(|| segment.to_string());

        let category = CategoryItem {
            label,
            collapsed: metadata.collapsed.unwrap_or(self.options.collapsed),
            collapsible: metadata.collapsible.unwrap_or(self.options.collapsible),
            class_name: metadata.class_name,
            custom_props: metadata.custom_props,
            link,
            items,
        };

        Ok(Ranked {
            item: SidebarItem::Category(category),
            position: metadata.position.or(parsed.number),
            prefix: parsed.number,
            name: parsed.name,
            order: entries.first().map_or(usize::MAX, |e| e.order),
        })
    }

    /// The single direct doc the index detector accepts, if exactly one does.
    fn detect_index(&self, path: &[&str], direct: &[&Entry<'a>]) -> Option<String> {
        let directories: Vec<String> = path.iter().rev().map(|s| self.parse(s).name).collect();

        let candidates: Vec<&Document> = direct
            .iter()
            .map(|entry| entry.doc)
            .filter(|doc| {
                let parsed = self.parse(doc.file_stem());
                let candidate = IndexCandidate {
                    file_name: &parsed.name,
                    directories: &directories,
                };
                self.collaborators.index_detector.is_category_index(&candidate)
            })
            .collect();

        match candidates.as_slice() {
            [] => None,
            [doc] => Some(doc.id.clone()),
            many => {
                let ids: Vec<&str> = many.iter().map(|d| d.id.as_str()).collect();
                warn!(
                    "Several index documents in '{}': {ids:?}; category gets no automatic link",
                    path.join("/")
                );
                None
            }
        }
    }

    /// Find the document an explicit `link: {type: doc}` refers to.
    ///
    /// Tried in order: the id qualified by this directory (raw, then with
    /// number prefixes stripped), the id as given, a direct doc with that
    /// local id, and finally a unique document with that local id anywhere.
    fn resolve_doc_link(
        &self,
        path: &[&str],
        direct: &[&Entry<'a>],
        id: &str,
    ) -> Result<String, ConfigError> {
        let raw_dir = path.join("/");
        let clean_dir = path
            .iter()
            .map(|s| self.parse(s).name)
            .collect::<Vec<_>>()
            .join("/");

        let qualified = [format!("{raw_dir}/{id}"), format!("{clean_dir}/{id}"), id.to_string()];
        if let Some(found) = qualified
            .into_iter()
            .find(|candidate| self.known_ids.contains(candidate.as_str()))
        {
            return Ok(found);
        }

        if let Some(entry) = direct.iter().find(|e| e.doc.local_id() == id) {
            return Ok(entry.doc.id.clone());
        }

        let mut by_local_id = self.documents.iter().filter(|d| d.local_id() == id);
        if let (Some(doc), None) = (by_local_id.next(), by_local_id.next()) {
            return Ok(doc.id.clone());
        }

        Err(ConfigError::UnresolvedDocLink {
            directory: raw_dir,
            id: id.to_string(),
        })
    }
}

fn partition<'e, 'a>(entries: &[&'e Entry<'a>], depth: usize) -> Partition<'e, 'a> {
    let mut direct = Vec::new();
    let mut groups: Vec<(&'a str, Vec<&'e Entry<'a>>)> = Vec::new();

    for &entry in entries {
        match entry.segments.get(depth) {
            None => direct.push(entry),
            Some(&segment) => match groups.iter_mut().find(|(name, _)| *name == segment) {
                Some((_, members)) => members.push(entry),
                None => groups.push((segment, vec![entry])),
            },
        }
    }

    (direct, groups)
}

fn sort_ranked(ranked: &mut [Ranked], tie_break: TieBreak) {
    ranked.sort_by(|a, b| {
        compare_present_first(a.position, b.position, f64::total_cmp)
            .then_with(|| compare_present_first(a.prefix, b.prefix, f64::total_cmp))
            .then_with(|| match tie_break {
                TieBreak::Name => a.name.cmp(&b.name),
                TieBreak::InputOrder => Ordering::Equal,
            })
            .then(a.order.cmp(&b.order))
    });
}

/// Values ascending, `None` after every `Some`.
fn compare_present_first<T>(
    a: Option<T>,
    b: Option<T>,
    cmp: impl Fn(&T, &T) -> Ordering,
) -> Ordering {
    match (a, b) {
        (Some(a), Some(b)) => cmp(&a, &b),
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => Ordering::Equal,
    }
}
