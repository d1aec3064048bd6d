use std::collections::BTreeMap;

use camino::Utf8PathBuf;

use crate::ProjectName;

/// The workspace descriptor handed to dependency-detection strategies:
/// project roots plus the configured npm scope used to derive import paths
/// for projects whose manifest does not declare a name.
#[derive(Debug, Clone, Default)]
pub struct WorkspaceLayout {
    pub npm_scope: Option<String>,
    /// Project roots, repo-root-relative.
    pub project_roots: BTreeMap<ProjectName, Utf8PathBuf>,
}

impl WorkspaceLayout {
    /// The import path a project is reachable under when its manifest does
    /// not declare a name: `@<scope>/<project>`, or the bare project name
    /// when no scope is configured. A scope already carrying a leading `@`
    /// is used as-is.
    pub fn derived_import_path(&self, project: &ProjectName) -> String {
        match self.npm_scope.as_deref() {
            Some(scope) if !scope.is_empty() => {
                let scope = scope.strip_prefix('@').unwrap_or(scope);
                format!("@{scope}/{project}")
            }
            _ => project.to_string(),
        }
    }
}
