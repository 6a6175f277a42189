use std::{
    fs,
    path::{Path, PathBuf},
};

use indexmap::IndexMap;
use log::{debug, trace};
use miette::{Context, IntoDiagnostic, Result};
use serde::{Deserialize, Serialize};

use crate::BuildTarget;

/// An Okteto manifest.
///
/// Only the parts needed to resolve image references are
/// modeled. `deploy` and `dev` are carried as raw yaml so
/// that a rendered manifest can be written back out untouched.
#[derive(Serialize, Deserialize, Debug, Clone, Default, PartialEq, Eq)]
pub struct Manifest {
    /// The name of the development environment.
    ///
    /// This is used as the owner segment of inferred references.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,

    /// The namespace the manifest is deployed to.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub namespace: Option<String>,

    /// The Okteto context the manifest is deployed with.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub context: Option<String>,

    /// The images to build, keyed by service name.
    ///
    /// Keeps the order of the document.
    #[serde(default, skip_serializing_if = "IndexMap::is_empty")]
    pub build: IndexMap<String, BuildTarget>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub deploy: Option<serde_yaml::Value>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub dev: Option<serde_yaml::Value>,
}

impl Manifest {
    /// Parse a manifest file.
    ///
    /// # Errors
    /// Errors when the file cannot be read or
    /// the yaml cannot be deserialized.
    pub fn parse<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        trace!("Manifest::parse({})", path.display());

        let file_path = if path.is_absolute() {
            path.to_path_buf()
        } else {
            std::env::current_dir().into_diagnostic()?.join(path)
        };

        let file = fs::read_to_string(&file_path)
            .into_diagnostic()
            .with_context(|| format!("Failed to read {}", file_path.display()))?;

        Self::from_yaml(&file)
            .into_diagnostic()
            .with_context(|| format!("Failed to parse manifest {}", file_path.display()))
    }

    /// Deserialize a manifest from a yaml string.
    ///
    /// # Errors
    /// Errors when the yaml cannot be deserialized into a manifest.
    pub fn from_yaml(contents: &str) -> std::result::Result<Self, serde_yaml::Error> {
        trace!("Manifest::from_yaml()");
        debug!("Manifest contents: {contents}");

        serde_yaml::from_str(contents)
    }

    /// Returns the build targets whose service name is in `services`,
    /// or all of them when `services` is empty.
    ///
    /// The order of the manifest is kept.
    #[must_use]
    pub fn build_targets<'a>(&'a self, services: &[String]) -> Vec<(&'a str, &'a BuildTarget)> {
        self.build
            .iter()
            .filter(|(service, _)| services.is_empty() || services.contains(service))
            .map(|(service, target)| (service.as_str(), target))
            .collect()
    }

    /// The default location of a manifest inside `workdir`.
    #[must_use]
    pub fn default_path(workdir: &Path) -> PathBuf {
        workdir.join(okteto_tagger_utils::constants::DEFAULT_MANIFEST)
    }
}

#[cfg(test)]
mod test {
    use std::io::Write;

    use indexmap::IndexMap;
    use pretty_assertions::assert_eq;
    use rstest::rstest;

    use crate::BuildTarget;

    use super::Manifest;

    const MANIFEST: &str = r"
name: movies
namespace: cindy
build:
  frontend:
    context: frontend
  api:
    image: okteto.dev/movies-api:custom
    context: api
    dockerfile: api/Dockerfile.prod
  worker: {}
deploy:
  - helm upgrade --install movies chart
";

    #[test]
    fn from_yaml() {
        let manifest = Manifest::from_yaml(MANIFEST).unwrap();

        assert_eq!(manifest.name.as_deref(), Some("movies"));
        assert_eq!(manifest.namespace.as_deref(), Some("cindy"));
        assert_eq!(manifest.context, None);
        assert!(manifest.deploy.is_some());
        assert!(manifest.dev.is_none());
        assert_eq!(
            manifest.build.keys().collect::<Vec<_>>(),
            vec!["frontend", "api", "worker"]
        );
        assert_eq!(
            manifest.build["frontend"],
            BuildTarget::builder().context("frontend").build()
        );
        assert_eq!(
            manifest.build["api"],
            BuildTarget::builder()
                .image("okteto.dev/movies-api:custom".to_string())
                .context("api")
                .dockerfile("api/Dockerfile.prod")
                .build()
        );
        assert_eq!(manifest.build["worker"], BuildTarget::default());
    }

    #[test]
    fn from_yaml_matches_literal() {
        let manifest = Manifest::from_yaml("name: movies\nbuild:\n  api:\n    context: api\n").unwrap();

        assert_eq!(
            manifest,
            Manifest {
                name: Some("movies".into()),
                build: IndexMap::from([(
                    "api".to_string(),
                    BuildTarget::builder().context("api").build(),
                )]),
                ..Manifest::default()
            }
        );
    }

    #[test]
    fn from_yaml_without_build() {
        let manifest = Manifest::from_yaml("name: empty\n").unwrap();

        assert!(manifest.build.is_empty());
    }

    #[test]
    fn from_yaml_invalid() {
        assert!(Manifest::from_yaml("build: [not, a, map]").is_err());
    }

    #[rstest]
    #[case::all(&[], &["frontend", "api", "worker"])]
    #[case::filtered(&["worker", "frontend"], &["frontend", "worker"])]
    #[case::unknown(&["db"], &[])]
    fn build_targets(#[case] services: &[&str], #[case] expected: &[&str]) {
        let manifest = Manifest::from_yaml(MANIFEST).unwrap();
        let services = services.iter().map(ToString::to_string).collect::<Vec<_>>();

        let found = manifest
            .build_targets(&services)
            .into_iter()
            .map(|(service, _)| service)
            .collect::<Vec<_>>();

        assert_eq!(found, expected);
    }

    #[test]
    fn parse_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(MANIFEST.as_bytes()).unwrap();

        let manifest = Manifest::parse(file.path()).unwrap();

        assert_eq!(manifest, Manifest::from_yaml(MANIFEST).unwrap());
    }

    #[test]
    fn parse_missing_file() {
        let dir = tempfile::tempdir().unwrap();

        let err = Manifest::parse(dir.path().join("okteto.yml")).unwrap_err();

        assert!(err.to_string().contains("Failed to read"));
    }
}
