use clap::ValueEnum;
use okteto_tagger_utils::constants::{DEFAULT_TAG, DEV_REGISTRY, GLOBAL_REGISTRY, VOLUME_MOUNTS_TAG};

/// The kind of image being built.
///
/// Images built with extra volume mounts baked in are
/// tagged apart from standard builds so the two never
/// share a reference.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Hash, ValueEnum)]
pub enum Variant {
    #[default]
    Standard,

    #[value(alias = "with-volume-mounts")]
    WithExtraVolumeMounts,
}

impl Variant {
    /// The tag used when no content hash is involved.
    #[must_use]
    pub const fn base_tag(self) -> &'static str {
        match self {
            Self::Standard => DEFAULT_TAG,
            Self::WithExtraVolumeMounts => VOLUME_MOUNTS_TAG,
        }
    }

    /// The tag keyed by a content hash.
    ///
    /// Standard builds use the bare hash, volume mount
    /// builds prefix it with their base tag.
    #[must_use]
    pub fn hash_tag(self, content_hash: &str) -> String {
        match self {
            Self::Standard => content_hash.to_string(),
            Self::WithExtraVolumeMounts => format!("{}-{content_hash}", self.base_tag()),
        }
    }
}

impl std::fmt::Display for Variant {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(match self {
            Self::Standard => "standard",
            Self::WithExtraVolumeMounts => "with-extra-volume-mounts",
        })
    }
}

/// The registries an inferred image can live in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Registry {
    /// Per-developer registry, always writable.
    Dev,

    /// Registry shared across the whole Okteto instance.
    /// Pushing to it requires access.
    Global,
}

impl Registry {
    /// The order registries are probed in when looking for
    /// an existing image. Shared images are the most likely
    /// to already exist.
    pub const PROBE_ORDER: [Self; 2] = [Self::Global, Self::Dev];

    #[must_use]
    pub const fn prefix(self) -> &'static str {
        match self {
            Self::Dev => DEV_REGISTRY,
            Self::Global => GLOBAL_REGISTRY,
        }
    }

    /// Formats the reference `<registry>/<owner>-<service>:<tag>`.
    ///
    /// Names are used verbatim.
    #[must_use]
    pub fn reference(self, owner: &str, service: &str, tag: &str) -> String {
        format!("{}/{owner}-{service}:{tag}", self.prefix())
    }
}
