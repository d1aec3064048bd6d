use std::collections::HashMap;

use camino::Utf8Path;
use tracing::debug;
use trellis_project_graph::{ProjectName, WorkspaceLayout};

use crate::manifest::{PackageManifest, MANIFEST_FILENAME};

/// Per-pass lookup table from a manifest-declared package name (or the
/// derived import path when the manifest declares none) to the owning
/// project. Immutable once built; absent entries mean "not an internal
/// project".
#[derive(Debug, Default)]
pub struct PackageNameIndex {
    names: HashMap<String, ProjectName>,
}

impl PackageNameIndex {
    /// Reads the manifest at every project root and registers its declared
    /// name. A project whose manifest is missing, unreadable, or malformed
    /// is simply absent from the index; nothing fails globally.
    pub fn from_workspace(repo_root: &Utf8Path, workspace: &WorkspaceLayout) -> Self {
        let mut names = HashMap::new();
        for (project, root) in &workspace.project_roots {
            let manifest_path = repo_root.join(root).join(MANIFEST_FILENAME);
            let manifest = match PackageManifest::load(&manifest_path) {
                Ok(manifest) => manifest,
                Err(err) => {
                    debug!("not indexing {project}: {err}");
                    continue;
                }
            };
            let name = manifest
                .name
                .unwrap_or_else(|| workspace.derived_import_path(project));
            // Names are unique per index; on a clash the project later in
            // root order wins.
            names.insert(name, project.clone());
        }
        Self { names }
    }

    pub fn project_for(&self, name: &str) -> Option<&ProjectName> {
        self.names.get(name)
    }

    pub fn len(&self) -> usize {
        self.names.len()
    }

    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }
}

impl FromIterator<(String, ProjectName)> for PackageNameIndex {
    fn from_iter<I: IntoIterator<Item = (String, ProjectName)>>(iter: I) -> Self {
        Self {
            names: iter.into_iter().collect(),
        }
    }
}
