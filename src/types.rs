//! Shared types: input documents and the generated sidebar tree.
//!
//! Both ends serialize to JSON. Output items use the wire shape renderers
//! expect: a `type` tag (`doc` | `category`) and camelCase field names.

use serde::{Deserialize, Serialize};
use std::path::Path;

/// Free-form properties passed through to the renderer untouched.
pub type CustomProps = serde_json::Map<String, serde_json::Value>;

/// One content document, already loaded and front-matter parsed.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Document {
    /// Unique across the content set. May be qualified (`guides/setup`) or
    /// local (`setup`).
    pub id: String,
    /// Physical file path. Several ids may share one source.
    pub source: String,
    /// Containing directory relative to the content root, `.` for the root.
    pub source_dir_name: String,
    /// Explicit ordering from front matter (`sidebar_position`).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sidebar_position: Option<f64>,
    /// Front matter `sidebar_label`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub label: Option<String>,
    /// Front matter `sidebar_class_name`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub class_name: Option<String>,
    /// Front matter `sidebar_custom_props`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub custom_props: Option<CustomProps>,
}

impl Document {
    /// File name of the source without its extension (`01-intro` for
    /// `guides/01-intro.md`).
    pub fn file_stem(&self) -> &str {
        Path::new(&self.source)
            .file_stem()
            .and_then(|s| s.to_str())
            .unwrap_or(&self.source)
    }

    /// Last `/`-separated segment of the id.
    pub fn local_id(&self) -> &str {
        self.id.rsplit('/').next().unwrap_or(&self.id)
    }
}

/// Landing page of a category.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "kebab-case", deny_unknown_fields)]
pub enum CategoryLink {
    /// An existing document acts as the category page.
    Doc { id: String },
    /// The renderer generates a page listing the category's items.
    GeneratedIndex {
        #[serde(default, skip_serializing_if = "Option::is_none")]
        slug: Option<String>,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        title: Option<String>,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        description: Option<String>,
    },
}

/// A node of the generated sidebar.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum SidebarItem {
    Doc(DocItem),
    Category(CategoryItem),
}

impl SidebarItem {
    /// Display label when one is known. Doc items without a
    /// `sidebar_label` fall back to their id.
    pub fn label(&self) -> &str {
        match self {
            Self::Doc(doc) => doc.label.as_deref().unwrap_or(&doc.id),
            Self::Category(category) => &category.label,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DocItem {
    pub id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub label: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub class_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub custom_props: Option<CustomProps>,
}

impl From<&Document> for DocItem {
    fn from(doc: &Document) -> Self {
        Self {
            id: doc.id.clone(),
            label: doc.label.clone(),
            class_name: doc.class_name.clone(),
            custom_props: doc.custom_props.clone(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CategoryItem {
    pub label: String,
    pub collapsed: bool,
    pub collapsible: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub class_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub custom_props: Option<CustomProps>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub link: Option<CategoryLink>,
    pub items: Vec<SidebarItem>,
}
