//! Target resolution: classifies a workspace entry as a single document or a
//! folder batch.

use hwp_export_core::traits::WorkspaceEntry;

use crate::models::ExportTarget;

/// Classifies workspace entries into export targets.
///
/// Classification is total: containers become `Batch`, everything else
/// becomes `Single`. Eligibility by extension is decided earlier, when the
/// context menu is built.
#[derive(Debug, Clone)]
pub struct ExportTargetResolver {
    /// Extension of eligible source documents, without the dot.
    source_extension: String,
}

impl ExportTargetResolver {
    /// Create a resolver for documents with `source_extension`.
    pub fn new(source_extension: impl Into<String>) -> Self {
        Self {
            source_extension: source_extension.into(),
        }
    }

    /// Classify `entry`.
    pub fn resolve(&self, entry: &WorkspaceEntry) -> ExportTarget {
        if entry.is_container {
            ExportTarget::Batch {
                root_path: entry.path.clone(),
                display_name: entry.name.clone(),
            }
        } else {
            ExportTarget::Single {
                path: entry.path.clone(),
                display_name: entry.basename().to_string(),
            }
        }
    }

    /// Whether `entry` is a document of the supported source type.
    pub fn is_eligible_document(&self, entry: &WorkspaceEntry) -> bool {
        !entry.is_container
            && entry
                .extension()
                .is_some_and(|ext| ext.eq_ignore_ascii_case(&self.source_extension))
    }

    /// The supported source extension.
    pub fn source_extension(&self) -> &str {
        &self.source_extension
    }
}

impl Default for ExportTargetResolver {
    fn default() -> Self {
        Self::new("md")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::ExportMode;

    #[test]
    fn test_container_is_batch() {
        let resolver = ExportTargetResolver::default();
        for path in ["projects", "a/b/c", "notes.md"] {
            let target = resolver.resolve(&WorkspaceEntry::folder(path));
            assert_eq!(target.mode(), ExportMode::Batch, "{path}");
            assert_eq!(target.default_output_name(), None);
        }
    }

    #[test]
    fn test_leaf_is_single_regardless_of_extension() {
        let resolver = ExportTargetResolver::default();
        for path in ["notes/todo.md", "readme", "img.png"] {
            let target = resolver.resolve(&WorkspaceEntry::file(path));
            assert_eq!(target.mode(), ExportMode::Single, "{path}");
        }
    }

    #[test]
    fn test_single_default_name_strips_extension() {
        let resolver = ExportTargetResolver::default();
        let target = resolver.resolve(&WorkspaceEntry::file("notes/todo.md"));
        assert_eq!(
            target,
            ExportTarget::Single {
                path: "notes/todo.md".to_string(),
                display_name: "todo".to_string(),
            }
        );
        assert_eq!(target.default_output_name(), Some("todo"));
    }

    #[test]
    fn test_batch_keeps_folder_name() {
        let resolver = ExportTargetResolver::default();
        let target = resolver.resolve(&WorkspaceEntry::folder("work/projects"));
        assert_eq!(target.display_name(), "projects");
        assert_eq!(target.path(), "work/projects");
    }

    #[test]
    fn test_eligibility() {
        let resolver = ExportTargetResolver::default();
        assert!(resolver.is_eligible_document(&WorkspaceEntry::file("a/b.md")));
        assert!(resolver.is_eligible_document(&WorkspaceEntry::file("a/B.MD")));
        assert!(!resolver.is_eligible_document(&WorkspaceEntry::file("a/b.pdf")));
        assert!(!resolver.is_eligible_document(&WorkspaceEntry::folder("a")));
    }
}
