use std::collections::BTreeMap;

use camino::Utf8PathBuf;

use crate::ProjectName;

/// A file considered in the current build pass.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileData {
    /// Repo-root-relative path.
    pub path: Utf8PathBuf,
    /// Content hash supplied by the file watcher. Carried on the record for
    /// downstream caching; detection strategies do not interpret it.
    pub hash: Option<String>,
}

impl FileData {
    pub fn new(path: impl Into<Utf8PathBuf>) -> Self {
        Self {
            path: path.into(),
            hash: None,
        }
    }
}

/// Files to process per project for the current pass, as supplied by the
/// build orchestrator. Ordered so that identical inputs produce identically
/// ordered detection results.
pub type ProjectFileMap = BTreeMap<ProjectName, Vec<FileData>>;
