use std::collections::BTreeMap;

use camino::Utf8Path;
use miette::Diagnostic;
use serde::{Deserialize, Serialize};

/// File name of the per-project manifest, relative to the project root.
pub const MANIFEST_FILENAME: &str = "package.json";

/// The subset of a `package.json` document this crate reads. Each dependency
/// section maps a dependency name to an opaque version specifier; the
/// specifiers are never interpreted here.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PackageManifest {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub version: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub dependencies: Option<BTreeMap<String, String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub dev_dependencies: Option<BTreeMap<String, String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub peer_dependencies: Option<BTreeMap<String, String>>,
    // Unstructured fields kept for round trip capabilities
    #[serde(flatten)]
    pub other: BTreeMap<String, serde_json::Value>,
}

#[derive(Debug, thiserror::Error, Diagnostic)]
pub enum Error {
    #[error("unable to read manifest: {0}")]
    Io(#[from] std::io::Error),
    #[error("unable to parse manifest: {0}")]
    #[diagnostic(code(manifest_parse_error))]
    Json(#[from] serde_json::Error),
}

impl PackageManifest {
    pub fn load(path: &Utf8Path) -> Result<PackageManifest, Error> {
        tracing::trace!("loading manifest from {}", path);
        let contents = std::fs::read_to_string(path)?;
        Self::load_from_str(&contents)
    }

    pub fn load_from_str(contents: &str) -> Result<PackageManifest, Error> {
        Ok(serde_json::from_str(contents)?)
    }

    // Utility method for easy construction of manifests during testing
    pub fn from_value(value: serde_json::Value) -> Result<PackageManifest, Error> {
        Ok(serde_json::from_value(value)?)
    }

    /// Declared dependency names across the runtime, development, and peer
    /// sections, in that order. Missing sections contribute nothing and
    /// version specifiers are discarded. A name declared in more than one
    /// section is yielded once per section; callers resolve each occurrence
    /// independently.
    pub fn declared_dependencies(&self) -> impl Iterator<Item = &str> + '_ {
        self.dependencies
            .iter()
            .flatten()
            .chain(self.dev_dependencies.iter().flatten())
            .chain(self.peer_dependencies.iter().flatten())
            .map(|(name, _version)| name.as_str())
    }
}

#[cfg(test)]
mod test {
    use pretty_assertions::assert_eq;
    use serde_json::json;
    use test_case::test_case;

    use super::*;

    #[test_case(json!({}), &[] ; "no sections")]
    #[test_case(json!({"dependencies": {"a": "1"}}), &["a"] ; "runtime only")]
    #[test_case(json!({"devDependencies": {"b": "1"}}), &["b"] ; "development only")]
    #[test_case(json!({"peerDependencies": {"c": "1"}}), &["c"] ; "peer only")]
    #[test_case(json!({"optionalDependencies": {"d": "1"}}), &[] ; "optional is not read")]
    fn test_sections_feed_extraction(value: serde_json::Value, expected: &[&str]) {
        let manifest = PackageManifest::from_value(value).unwrap();
        assert_eq!(manifest.declared_dependencies().collect::<Vec<_>>(), expected);
    }

    #[test]
    fn test_all_sections_are_extracted_in_order() {
        let manifest = PackageManifest::from_value(json!({
            "name": "package-a",
            "dependencies": { "package-b": "workspace:*", "left-pad": "^1.3.0" },
            "devDependencies": { "vitest": "^1.0.0" },
            "peerDependencies": { "package-b": ">=1" },
        }))
        .unwrap();
        let deps: Vec<_> = manifest.declared_dependencies().collect();
        // within a section names are sorted; across sections a repeated name
        // shows up once per section
        assert_eq!(deps, vec!["left-pad", "package-b", "vitest", "package-b"]);
    }

    #[test]
    fn test_camel_case_section_names() {
        let manifest = PackageManifest::load_from_str(
            r#"{ "devDependencies": { "typescript": "5" }, "peerDependencies": { "react": "18" } }"#,
        )
        .unwrap();
        assert!(manifest.dev_dependencies.is_some());
        assert!(manifest.peer_dependencies.is_some());
        assert_eq!(manifest.name, None);
    }

    #[test]
    fn test_unknown_fields_are_retained() {
        let manifest = PackageManifest::from_value(json!({
            "name": "package-a",
            "scripts": { "build": "tsc" },
        }))
        .unwrap();
        assert_eq!(manifest.other["scripts"], json!({ "build": "tsc" }));
    }

    #[test]
    fn test_malformed_document_is_a_parse_error() {
        let result = PackageManifest::load_from_str("{ not json");
        assert!(matches!(result, Err(Error::Json(_))));
    }
}
