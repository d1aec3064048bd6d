//! Shared data model for project-graph dependency detection.
//!
//! Detection strategies (manifest-based, source-import-based, ...) consume a
//! read-only view of the graph under construction and the per-pass file map,
//! and produce explicit dependency edges. The graph assembler owns node
//! discovery and the final merge; this crate only defines the records that
//! cross those boundaries.

pub mod files;
pub mod graph;
pub mod workspace;

pub use files::{FileData, ProjectFileMap};
pub use graph::{
    DependencyTarget, ExplicitDependencyEdge, ExternalName, ProjectGraph, ProjectKind,
    ProjectName, ProjectNode, NPM_REGISTRY_PREFIX,
};
pub use workspace::WorkspaceLayout;
