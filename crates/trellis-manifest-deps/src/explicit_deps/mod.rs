//! Explicit manifest-based dependency detection.
//!
//! Walks the per-pass file map, picks out files that are exactly the root
//! manifest of an application or library project, and resolves every
//! dependency name those manifests declare to either an internal project
//! edge or an external-package edge. Names that match neither produce no
//! edge. The strategy never fails the surrounding build: a manifest that
//! cannot be read or parsed only removes its project from resolution for
//! the pass.

mod name_index;
mod resolver;

use std::{collections::HashMap, env};

use camino::Utf8Path;
use tracing::{debug, warn};
use trellis_project_graph::{
    ExplicitDependencyEdge, ProjectFileMap, ProjectGraph, ProjectKind, ProjectName, ProjectNode,
    WorkspaceLayout,
};

pub use self::{name_index::PackageNameIndex, resolver::DependencyResolver};
use crate::manifest::{PackageManifest, MANIFEST_FILENAME};

/// Environment toggle surfacing otherwise-swallowed manifest failures at
/// warn level. Any value other than `"true"` leaves them at debug level.
pub const VERBOSE_ENV_VAR: &str = "TRELLIS_VERBOSE_LOGGING";

fn verbose_logging() -> bool {
    env::var(VERBOSE_ENV_VAR).map_or(false, |value| value == "true")
}

/// Runs the strategy over one pass's file map and returns the accumulated
/// edges, ready to be merged with the output of other detection strategies.
pub fn explicit_manifest_dependencies(
    repo_root: &Utf8Path,
    workspace: &WorkspaceLayout,
    graph: &ProjectGraph,
    files: &ProjectFileMap,
) -> Vec<ExplicitDependencyEdge> {
    DependencyCollector::new(repo_root, workspace, graph).collect(files)
}

/// True iff `path` is exactly the root manifest of a project that builds
/// from workspace source (application or library). Linear in the number of
/// nodes, which is fine since it only runs per changed file.
pub fn is_manifest_at_project_root(
    nodes: &HashMap<ProjectName, ProjectNode>,
    path: &Utf8Path,
) -> bool {
    nodes.values().any(|node| {
        matches!(node.kind, ProjectKind::Application | ProjectKind::Library)
            && node.root.join(MANIFEST_FILENAME).as_path() == path
    })
}

/// Accumulates the edges the root manifests of one build pass resolve to.
///
/// One collector serves exactly one pass: the package-name index is built on
/// the first manifest hit, reused for the rest of the pass, and dropped with
/// the collector. `collect` consumes the collector so the index cache cannot
/// leak into a later pass.
pub struct DependencyCollector<'a> {
    repo_root: &'a Utf8Path,
    workspace: &'a WorkspaceLayout,
    graph: &'a ProjectGraph,
    verbose: bool,
    name_index: Option<PackageNameIndex>,
    index_builds: usize,
}

impl<'a> DependencyCollector<'a> {
    pub fn new(
        repo_root: &'a Utf8Path,
        workspace: &'a WorkspaceLayout,
        graph: &'a ProjectGraph,
    ) -> Self {
        Self {
            repo_root,
            workspace,
            graph,
            verbose: verbose_logging(),
            name_index: None,
            index_builds: 0,
        }
    }

    pub fn with_verbose_logging(mut self, verbose: bool) -> Self {
        self.verbose = verbose;
        self
    }

    /// How many times the package-name index has been built: 0 until a root
    /// manifest shows up in the pass, at most 1 thereafter.
    pub fn index_builds(&self) -> usize {
        self.index_builds
    }

    /// Resolution is a pure function of the index snapshot, the external
    /// node set, and manifest contents; no edge depends on iteration order
    /// across projects.
    pub fn collect(mut self, files: &ProjectFileMap) -> Vec<ExplicitDependencyEdge> {
        self.collect_edges(files)
    }

    fn collect_edges(&mut self, files: &ProjectFileMap) -> Vec<ExplicitDependencyEdge> {
        let mut edges = Vec::new();
        for (source, project_files) in files {
            for file in project_files {
                if !is_manifest_at_project_root(&self.graph.nodes, &file.path) {
                    continue;
                }
                // The index is only worth building once a root manifest
                // actually shows up in the pass. It covers the whole
                // workspace, not just the projects in the file map.
                self.ensure_name_index();
                self.process_manifest(source, &file.path, &mut edges);
            }
        }
        edges
    }

    fn ensure_name_index(&mut self) {
        if self.name_index.is_none() {
            self.name_index = Some(PackageNameIndex::from_workspace(
                self.repo_root,
                self.workspace,
            ));
            self.index_builds += 1;
        }
    }

    fn process_manifest(
        &self,
        source: &ProjectName,
        manifest_path: &Utf8Path,
        edges: &mut Vec<ExplicitDependencyEdge>,
    ) {
        let manifest = match PackageManifest::load(&self.repo_root.join(manifest_path)) {
            Ok(manifest) => manifest,
            Err(err) => {
                // A broken manifest drops this project from resolution for
                // the pass; every other project is unaffected.
                if self.verbose {
                    warn!("skipping manifest {manifest_path}: {err}");
                } else {
                    debug!("skipping manifest {manifest_path}: {err}");
                }
                return;
            }
        };
        let name_index = self
            .name_index
            .as_ref()
            .expect("name index is built before any manifest is processed");
        let resolver = DependencyResolver::new(name_index, &self.graph.external_nodes);
        for name in manifest.declared_dependencies() {
            if let Some(target) = resolver.resolve(name) {
                edges.push(ExplicitDependencyEdge {
                    source: source.clone(),
                    target,
                    source_file: manifest_path.to_owned(),
                });
            }
        }
    }
}
