//! Category index detection.
//!
//! A category (directory) may have a landing page: a document that represents
//! the directory itself instead of appearing as one of its children. By
//! convention that is `index.md` or `README.md`:
//!
//! ```text
//! docs/
//! └── 02-guides/
//!     ├── README.md        ← becomes the "Guides" category link
//!     ├── 01-install.md
//!     └── 02-deploy.md
//! ```
//!
//! Detection is a strategy ([`CategoryIndexDetector`]) so sites with other
//! conventions can plug in their own predicate. Every name handed to a detector
//! has already been through the number-prefix parser.

/// The inputs a detector sees for one candidate document.
#[derive(Debug, Clone, Copy)]
pub struct IndexCandidate<'a> {
    /// File stem with its number prefix stripped (`README`, `index`, `setup`).
    pub file_name: &'a str,
    /// Clean names of the enclosing directories, closest first.
    /// Empty for documents at the content root.
    pub directories: &'a [String],
}

impl IndexCandidate<'_> {
    /// Clean name of the directory that directly contains the candidate.
    pub fn parent_directory(&self) -> Option<&str> {
        self.directories.first().map(String::as_str)
    }
}

/// Decides whether a document is the index of the directory that contains it.
pub trait CategoryIndexDetector {
    fn is_category_index(&self, candidate: &IndexCandidate<'_>) -> bool;
}

impl<F> CategoryIndexDetector for F
where
    F: Fn(&IndexCandidate<'_>) -> bool,
{
    fn is_category_index(&self, candidate: &IndexCandidate<'_>) -> bool {
        self(candidate)
    }
}

/// `index` or `readme`, case-insensitive.
#[derive(Debug, Clone, Copy, Default)]
pub struct DefaultIndexDetector;

impl CategoryIndexDetector for DefaultIndexDetector {
    fn is_category_index(&self, candidate: &IndexCandidate<'_>) -> bool {
        is_conventional_index(candidate.file_name)
    }
}

/// Like [`DefaultIndexDetector`], plus a file named after its own directory
/// (`guides/guides.md`).
#[derive(Debug, Clone, Copy, Default)]
pub struct FolderNameIndexDetector;

impl CategoryIndexDetector for FolderNameIndexDetector {
    fn is_category_index(&self, candidate: &IndexCandidate<'_>) -> bool {
        is_conventional_index(candidate.file_name)
            || candidate
                .parent_directory()
                .is_some_and(|dir| dir.eq_ignore_ascii_case(candidate.file_name))
    }
}

fn is_conventional_index(file_name: &str) -> bool {
    file_name.eq_ignore_ascii_case("index") || file_name.eq_ignore_ascii_case("readme")
}

#[cfg(test)]
mod tests {
    use super::*;

    fn candidate<'a>(file_name: &'a str, directories: &'a [String]) -> IndexCandidate<'a> {
        IndexCandidate {
            file_name,
            directories,
        }
    }

    #[test]
    fn default_matches_index_and_readme_any_case() {
        for name in ["index", "INDEX", "Index", "readme", "README", "ReadMe"] {
            assert!(
                DefaultIndexDetector.is_category_index(&candidate(name, &[])),
                "{name} should be an index"
            );
        }
    }

    #[test]
    fn default_rejects_other_names() {
        for name in ["indexes", "readme-old", "intro", "guides"] {
            assert!(!DefaultIndexDetector.is_category_index(&candidate(name, &[])));
        }
    }

    #[test]
    fn default_ignores_directory_name() {
        let dirs = vec!["guides".to_string()];
        assert!(!DefaultIndexDetector.is_category_index(&candidate("guides", &dirs)));
    }

    #[test]
    fn folder_name_matches_parent_directory() {
        let dirs = vec!["Guides".to_string(), "docs".to_string()];
        assert!(FolderNameIndexDetector.is_category_index(&candidate("guides", &dirs)));
        assert!(FolderNameIndexDetector.is_category_index(&candidate("README", &dirs)));
        // Only the immediate parent counts
        assert!(!FolderNameIndexDetector.is_category_index(&candidate("docs", &dirs)));
    }

    #[test]
    fn folder_name_at_root_has_no_parent() {
        assert!(!FolderNameIndexDetector.is_category_index(&candidate("docs", &[])));
    }

    #[test]
    fn closure_strips_parent_name_before_comparing() {
        // `guides-index` in `guides/` is the index of that directory
        let detector = |c: &IndexCandidate<'_>| {
            let name = match c.parent_directory() {
                Some(dir) => c
                    .file_name
                    .strip_prefix(dir)
                    .map(|rest| rest.trim_start_matches('-'))
                    .unwrap_or(c.file_name),
                None => c.file_name,
            };
            name.eq_ignore_ascii_case("index")
        };
        let dirs = vec!["guides".to_string()];
        assert!(detector.is_category_index(&candidate("guides-index", &dirs)));
        assert!(detector.is_category_index(&candidate("index", &dirs)));
        assert!(!detector.is_category_index(&candidate("guides-setup", &dirs)));
    }
}
