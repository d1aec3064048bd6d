use std::collections::HashSet;

use trellis_project_graph::{DependencyTarget, ExternalName};

use super::name_index::PackageNameIndex;

/// Classifies one declared dependency name against the current index
/// snapshot and the known external nodes.
pub struct DependencyResolver<'a> {
    name_index: &'a PackageNameIndex,
    external_nodes: &'a HashSet<ExternalName>,
}

impl<'a> DependencyResolver<'a> {
    pub fn new(
        name_index: &'a PackageNameIndex,
        external_nodes: &'a HashSet<ExternalName>,
    ) -> Self {
        Self {
            name_index,
            external_nodes,
        }
    }

    /// Resolution order: an internal project first, then a known external
    /// package, otherwise no edge. A name that resolves to neither is
    /// expected and common (e.g. a tool with no modeled node) and is not an
    /// error.
    pub fn resolve(&self, name: &str) -> Option<DependencyTarget> {
        if let Some(project) = self.name_index.project_for(name) {
            return Some(DependencyTarget::Project(project.clone()));
        }
        let external = ExternalName::from_package_name(name);
        self.external_nodes
            .contains(&external)
            .then_some(DependencyTarget::External(external))
    }
}

#[cfg(test)]
mod test {
    use pretty_assertions::assert_eq;
    use trellis_project_graph::ProjectName;

    use super::*;

    fn name_index() -> PackageNameIndex {
        [
            ("package-b".to_string(), ProjectName::from("package-b")),
            ("@acme/ui".to_string(), ProjectName::from("ui")),
        ]
        .into_iter()
        .collect()
    }

    fn external_nodes() -> HashSet<ExternalName> {
        ["left-pad", "react"]
            .into_iter()
            .map(ExternalName::from_package_name)
            .collect()
    }

    #[test]
    fn test_indexed_name_resolves_to_project() {
        let index = name_index();
        let externals = external_nodes();
        let resolver = DependencyResolver::new(&index, &externals);

        assert_eq!(
            resolver.resolve("package-b"),
            Some(DependencyTarget::Project("package-b".into()))
        );
        // the manifest name wins over the project identifier
        assert_eq!(
            resolver.resolve("@acme/ui"),
            Some(DependencyTarget::Project("ui".into()))
        );
        assert_eq!(resolver.resolve("ui"), None);
    }

    #[test]
    fn test_known_package_resolves_to_external_node() {
        let index = name_index();
        let externals = external_nodes();
        let resolver = DependencyResolver::new(&index, &externals);

        assert_eq!(
            resolver.resolve("left-pad"),
            Some(DependencyTarget::External(ExternalName::from_package_name(
                "left-pad"
            )))
        );
    }

    #[test]
    fn test_unknown_name_yields_no_edge() {
        let index = name_index();
        let externals = external_nodes();
        let resolver = DependencyResolver::new(&index, &externals);

        assert_eq!(resolver.resolve("some-internal-tool-no-node"), None);
    }

    #[test]
    fn test_internal_project_shadows_external_package() {
        let index = name_index();
        let externals = ["package-b"]
            .into_iter()
            .map(ExternalName::from_package_name)
            .collect();
        let resolver = DependencyResolver::new(&index, &externals);

        assert_eq!(
            resolver.resolve("package-b"),
            Some(DependencyTarget::Project("package-b".into()))
        );
    }
}
