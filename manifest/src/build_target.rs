use bon::Builder;
use okteto_tagger_utils::constants::{DEFAULT_BUILD_CONTEXT, DEFAULT_DOCKERFILE};
use serde::{Deserialize, Serialize};

/// A single entry of the `build` section of a manifest.
///
/// When `image` is set the caller owns the reference the
/// image is pushed to. Otherwise the reference is inferred
/// from the manifest name, the service name and the
/// state of the repository.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq, Builder)]
#[builder(on(String, into))]
pub struct BuildTarget {
    /// The explicit reference to push the image to.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,

    /// Path to the Dockerfile relative to the context.
    #[serde(default = "default_dockerfile")]
    #[builder(default = default_dockerfile())]
    pub dockerfile: String,

    /// The build context directory.
    #[serde(default = "default_context")]
    #[builder(default = default_context())]
    pub context: String,
}

impl BuildTarget {
    /// The explicit image of this target, if one was given.
    ///
    /// An empty string counts as not set.
    #[must_use]
    pub fn explicit_image(&self) -> Option<&str> {
        self.image.as_deref().filter(|image| !image.is_empty())
    }
}

impl Default for BuildTarget {
    fn default() -> Self {
        Self {
            image: None,
            dockerfile: default_dockerfile(),
            context: default_context(),
        }
    }
}

fn default_dockerfile() -> String {
    DEFAULT_DOCKERFILE.into()
}

fn default_context() -> String {
    DEFAULT_BUILD_CONTEXT.into()
}
