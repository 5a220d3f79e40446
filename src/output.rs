//! CLI output formatting for generated sidebars.
//!
//! # Information-First Display
//!
//! Every item leads with its positional index and display label. Ids, links,
//! and non-default collapse state are indented context lines underneath, so
//! the output reads as the sidebar a visitor will see while still tracing
//! back to documents.
//!
//! ```text
//! 001 Guides (3 items)
//!     Link: doc guides/index
//!     001 Installing
//!         Id: guides/setup
//!     002 guides/deploy
//!     003 Advanced (1 item)
//!         Link: generated index /guides/advanced
//!         Expanded
//!         001 guides/advanced/tuning
//! 002 intro
//!
//! 5 docs in 2 categories
//! ```
//!
//! Doc items without a `sidebar_label` show their id as the label and get no
//! `Id:` line.
//!
//! [`format_sidebar`] returns `Vec<String>` for testability and
//! [`print_sidebar`] writes it to stdout. Format functions are pure.

use crate::types::{CategoryItem, CategoryLink, DocItem, SidebarItem};

// ============================================================================
// Shared display helpers
// ============================================================================

/// Format a 1-based positional index as 3-digit zero-padded.
fn format_index(pos: usize) -> String {
    format!("{:0>3}", pos)
}

/// Return indentation string: 4 spaces per depth level.
fn indent(depth: usize) -> String {
    "    ".repeat(depth)
}

/// Category header: index, label, and child count.
///
/// ```text
/// 001 Guides (3 items)
/// 002 Empty (0 items)
/// ```
fn category_header(index: usize, label: &str, count: usize) -> String {
    let noun = if count == 1 { "item" } else { "items" };
    format!("{} {} ({} {})", format_index(index), label, count, noun)
}

/// Truncate text to `max` characters, appending `...` if truncated.
fn truncate_desc(text: &str, max: usize) -> String {
    match text.char_indices().nth(max) {
        Some((cut, _)) => format!("{}...", &text[..cut]),
        None => text.to_string(),
    }
}

fn link_line(link: &CategoryLink) -> String {
    match link {
        CategoryLink::Doc { id } => format!("Link: doc {id}"),
        CategoryLink::GeneratedIndex { slug: Some(slug), .. } => {
            format!("Link: generated index {slug}")
        }
        CategoryLink::GeneratedIndex { slug: None, .. } => "Link: generated index".to_string(),
    }
}

// ============================================================================
// Tree walker
// ============================================================================

#[derive(Default)]
struct Totals {
    docs: usize,
    categories: usize,
}

fn walk(items: &[SidebarItem], depth: usize, lines: &mut Vec<String>, totals: &mut Totals) {
    for (i, item) in items.iter().enumerate() {
        match item {
            SidebarItem::Doc(doc) => {
                totals.docs += 1;
                doc_lines(doc, i + 1, depth, lines);
            }
            SidebarItem::Category(category) => {
                totals.categories += 1;
                if let Some(CategoryLink::Doc { .. }) = category.link {
                    totals.docs += 1;
                }
                category_lines(category, i + 1, depth, lines);
                walk(&category.items, depth + 1, lines, totals);
            }
        }
    }
}

fn doc_lines(doc: &DocItem, index: usize, depth: usize, lines: &mut Vec<String>) {
    let base = indent(depth);
    match doc.label.as_deref() {
        Some(label) => {
            lines.push(format!("{}{} {}", base, format_index(index), label));
            lines.push(format!("{}    Id: {}", base, doc.id));
        }
        None => lines.push(format!("{}{} {}", base, format_index(index), doc.id)),
    }
}

fn category_lines(category: &CategoryItem, index: usize, depth: usize, lines: &mut Vec<String>) {
    let base = indent(depth);
    lines.push(format!(
        "{}{}",
        base,
        category_header(index, &category.label, category.items.len())
    ));

    if let Some(link) = &category.link {
        lines.push(format!("{}    {}", base, link_line(link)));
        if let CategoryLink::GeneratedIndex {
            description: Some(desc),
            ..
        } = link
        {
            lines.push(format!("{}    Description: {}", base, truncate_desc(desc, 40)));
        }
    }
    if !category.collapsible {
        lines.push(format!("{}    Not collapsible", base));
    } else if !category.collapsed {
        lines.push(format!("{}    Expanded", base));
    }
}

// ============================================================================
// Sidebar output
// ============================================================================

/// Format a generated sidebar as an indented tree plus a summary line.
pub fn format_sidebar(items: &[SidebarItem]) -> Vec<String> {
    let mut lines = Vec::new();
    let mut totals = Totals::default();
    walk(items, 0, &mut lines, &mut totals);

    if !lines.is_empty() {
        lines.push(String::new());
    }
    lines.push(format!(
        "{} docs in {} categories",
        totals.docs, totals.categories
    ));
    lines
}

/// Print sidebar output to stdout.
pub fn print_sidebar(items: &[SidebarItem]) {
    for line in format_sidebar(items) {
        println!("{}", line);
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn doc(id: &str, label: Option<&str>) -> SidebarItem {
        SidebarItem::Doc(DocItem {
            id: id.to_string(),
            label: label.map(String::from),
            class_name: None,
            custom_props: None,
        })
    }

    fn category(label: &str, link: Option<CategoryLink>, items: Vec<SidebarItem>) -> SidebarItem {
        SidebarItem::Category(CategoryItem {
            label: label.to_string(),
            collapsed: true,
            collapsible: true,
            class_name: None,
            custom_props: None,
            link,
            items,
        })
    }

    // =========================================================================
    // Helper tests
    // =========================================================================

    #[test]
    fn format_index_pads_to_three_digits() {
        assert_eq!(format_index(1), "001");
        assert_eq!(format_index(42), "042");
        assert_eq!(format_index(100), "100");
    }

    #[test]
    fn category_header_pluralizes() {
        assert_eq!(category_header(1, "Guides", 3), "001 Guides (3 items)");
        assert_eq!(category_header(2, "Api", 1), "002 Api (1 item)");
    }

    #[test]
    fn truncate_desc_short() {
        assert_eq!(truncate_desc("Short text", 40), "Short text");
    }

    #[test]
    fn truncate_desc_exact() {
        let text = "a".repeat(40);
        assert_eq!(truncate_desc(&text, 40), text);
    }

    #[test]
    fn truncate_desc_long() {
        let text = "a".repeat(50);
        assert_eq!(truncate_desc(&text, 40), format!("{}...", "a".repeat(40)));
    }

    #[test]
    fn truncate_desc_counts_chars_not_bytes() {
        assert_eq!(truncate_desc("ééééé", 3), "ééé...");
    }

    #[test]
    fn link_lines() {
        assert_eq!(
            link_line(&CategoryLink::Doc {
                id: "guides/index".into()
            }),
            "Link: doc guides/index"
        );
        assert_eq!(
            link_line(&CategoryLink::GeneratedIndex {
                slug: Some("/all".into()),
                title: None,
                description: None
            }),
            "Link: generated index /all"
        );
        assert_eq!(
            link_line(&CategoryLink::GeneratedIndex {
                slug: None,
                title: Some("All".into()),
                description: None
            }),
            "Link: generated index"
        );
    }

    // =========================================================================
    // format_sidebar()
    // =========================================================================

    #[test]
    fn empty_sidebar_is_just_the_summary() {
        assert_eq!(format_sidebar(&[]), vec!["0 docs in 0 categories"]);
    }

    #[test]
    fn nested_tree() {
        let items = vec![
            category(
                "Guides",
                Some(CategoryLink::Doc {
                    id: "guides/index".into(),
                }),
                vec![
                    doc("guides/setup", Some("Installing")),
                    doc("guides/deploy", None),
                ],
            ),
            doc("intro", None),
        ];

        assert_eq!(
            format_sidebar(&items),
            vec![
                "001 Guides (2 items)",
                "    Link: doc guides/index",
                "    001 Installing",
                "        Id: guides/setup",
                "    002 guides/deploy",
                "002 intro",
                "",
                "4 docs in 1 categories",
            ]
        );
    }

    #[test]
    fn collapse_state_and_description_context() {
        let mut expanded = CategoryItem {
            label: "Advanced".into(),
            collapsed: false,
            collapsible: true,
            class_name: None,
            custom_props: None,
            link: Some(CategoryLink::GeneratedIndex {
                slug: Some("/advanced".into()),
                title: None,
                description: Some("Tuning and scaling".into()),
            }),
            items: vec![doc("tuning", None)],
        };
        let lines = format_sidebar(&[SidebarItem::Category(expanded.clone())]);
        assert_eq!(
            lines[..4],
            [
                "001 Advanced (1 item)",
                "    Link: generated index /advanced",
                "    Description: Tuning and scaling",
                "    Expanded",
            ]
        );

        expanded.collapsible = false;
        let lines = format_sidebar(&[SidebarItem::Category(expanded)]);
        assert_eq!(lines[3], "    Not collapsible");
    }
}
