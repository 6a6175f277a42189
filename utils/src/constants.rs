// Registries
pub const DEV_REGISTRY: &str = "okteto.dev";
pub const GLOBAL_REGISTRY: &str = "okteto.global";

// Tags
pub const DEFAULT_TAG: &str = "okteto";
pub const VOLUME_MOUNTS_TAG: &str = "okteto-with-volume-mounts";

// Paths
pub const DEFAULT_MANIFEST: &str = "okteto.yml";
pub const DEFAULT_DOCKERFILE: &str = "Dockerfile";
pub const DEFAULT_BUILD_CONTEXT: &str = ".";

// Template args
pub const NAMESPACE_ARG: &str = "namespace";
pub const CONTEXT_ARG: &str = "context";

// Tagger vars
pub const OKTETO_TAGGER_CLEAN: &str = "OKTETO_TAGGER_CLEAN";
pub const OKTETO_TAGGER_GLOBAL_ACCESS: &str = "OKTETO_TAGGER_GLOBAL_ACCESS";
pub const OKTETO_TAGGER_CONTENT_HASH: &str = "OKTETO_TAGGER_CONTENT_HASH";
pub const OKTETO_TAGGER_MANIFEST: &str = "OKTETO_TAGGER_MANIFEST";
pub const OKTETO_TAGGER_VARIANT: &str = "OKTETO_TAGGER_VARIANT";

// Okteto context vars
pub const OKTETO_NAMESPACE: &str = "OKTETO_NAMESPACE";
pub const OKTETO_CONTEXT: &str = "OKTETO_CONTEXT";
