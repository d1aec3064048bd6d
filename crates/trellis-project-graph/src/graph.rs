use std::{
    collections::{HashMap, HashSet},
    fmt,
};

use camino::Utf8PathBuf;
use serde::Serialize;

/// Namespace prefix for nodes that represent packages installed from the
/// registry rather than built from workspace source.
pub const NPM_REGISTRY_PREFIX: &str = "npm:";

/// The identifier of a project native to the workspace.
#[derive(Debug, Clone, Hash, Eq, PartialEq, Ord, PartialOrd)]
pub struct ProjectName(String);

impl Serialize for ProjectName {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.0)
    }
}

impl fmt::Display for ProjectName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<String> for ProjectName {
    fn from(value: String) -> Self {
        Self(value)
    }
}

impl<'a> From<&'a str> for ProjectName {
    fn from(value: &'a str) -> Self {
        Self(value.to_string())
    }
}

impl AsRef<str> for ProjectName {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

#[derive(Debug, Clone, Copy, Hash, Eq, PartialEq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ProjectKind {
    Application,
    Library,
    /// Anything else the discovery stage models, e.g. e2e suites. Projects of
    /// this kind never own a root manifest as far as detection is concerned.
    Other,
}

/// A vertex representing a buildable unit native to the workspace. Owned by
/// the graph-construction stage; detection strategies only read it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ProjectNode {
    pub name: ProjectName,
    pub kind: ProjectKind,
    /// Repo-root-relative, normalized (no leading `./`).
    pub root: Utf8PathBuf,
}

/// The graph identifier of a third-party package: the registry namespace
/// prefix followed by the bare package name, e.g. `npm:left-pad`.
#[derive(Debug, Clone, Hash, Eq, PartialEq, Ord, PartialOrd)]
pub struct ExternalName(String);

impl ExternalName {
    /// Composes the identifier for a registry package. This is the single
    /// point where the prefix is applied; call sites never concatenate it
    /// themselves.
    pub fn from_package_name(name: &str) -> Self {
        Self(format!("{NPM_REGISTRY_PREFIX}{name}"))
    }

    /// The bare package name, without the registry prefix.
    pub fn package_name(&self) -> &str {
        self.0.strip_prefix(NPM_REGISTRY_PREFIX).unwrap_or(&self.0)
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Serialize for ExternalName {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.0)
    }
}

impl fmt::Display for ExternalName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Read-only view of the graph under construction: project nodes from the
/// discovery stage plus the external packages recorded from the lockfile.
#[derive(Debug, Clone, Default)]
pub struct ProjectGraph {
    pub nodes: HashMap<ProjectName, ProjectNode>,
    pub external_nodes: HashSet<ExternalName>,
}

/// What a resolved dependency points at.
#[derive(Debug, Clone, Hash, Eq, PartialEq)]
pub enum DependencyTarget {
    Project(ProjectName),
    External(ExternalName),
}

impl DependencyTarget {
    pub fn as_str(&self) -> &str {
        match self {
            DependencyTarget::Project(name) => name.as_ref(),
            DependencyTarget::External(name) => name.as_str(),
        }
    }
}

impl Serialize for DependencyTarget {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

impl fmt::Display for DependencyTarget {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A dependency edge inferred directly from manifest contents, as distinct
/// from edges inferred from source import statements. The target is
/// guaranteed by construction to exist among known project or external
/// nodes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ExplicitDependencyEdge {
    pub source: ProjectName,
    pub target: DependencyTarget,
    /// The manifest the dependency was declared in, repo-root-relative.
    pub source_file: Utf8PathBuf,
}
