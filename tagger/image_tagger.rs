use log::{debug, trace, warn};
use okteto_tagger_manifest::BuildTarget;

use crate::{Registry, RuntimeContext, Variant};

/// Resolves image references for one build variant.
///
/// Orchestrators build one tagger per variant they need
/// and share it across every build target.
#[derive(Debug, Clone)]
pub struct Tagger {
    variant: Variant,
    context: RuntimeContext,
}

impl Tagger {
    #[must_use]
    pub const fn new(variant: Variant, context: RuntimeContext) -> Self {
        Self { variant, context }
    }

    /// Tagger for standard builds.
    #[must_use]
    pub const fn standard(context: RuntimeContext) -> Self {
        Self::new(Variant::Standard, context)
    }

    /// Tagger for builds that include extra volume mounts.
    #[must_use]
    pub const fn with_volume_mounts(context: RuntimeContext) -> Self {
        Self::new(Variant::WithExtraVolumeMounts, context)
    }

    #[must_use]
    pub const fn context(&self) -> &RuntimeContext {
        &self.context
    }

    /// The reference the image of `target` is pushed to.
    ///
    /// An explicit image on the target is returned untouched.
    /// Otherwise the image goes to the global registry keyed by
    /// the content hash when the repository is clean and the
    /// caller has access, and to the dev registry under the
    /// variant's base tag in every other case.
    #[must_use]
    pub fn tag(&self, owner: &str, service: &str, target: &BuildTarget) -> String {
        trace!("Tagger::tag({owner}, {service}, {target:?})");

        if let Some(image) = target.explicit_image() {
            debug!("Using explicit image {image} for {service}");
            return image.to_string();
        }

        let (registry, tag) = if self.context.pushes_to_global() {
            if !self.context.has_content_hash() {
                warn!(
                    "No content hash available for {owner}-{service}, the global tag will be incomplete"
                );
            }
            (Registry::Global, self.variant.hash_tag(&self.context.content_hash))
        } else {
            (Registry::Dev, self.variant.base_tag().to_string())
        };

        let reference = registry.reference(owner, service, &tag);
        debug!("Inferred image {reference} for {service}");
        reference
    }

    /// The content addressed references an image with
    /// `content_hash` could already exist under, global first.
    ///
    /// Empty when there is no hash.
    #[must_use]
    pub fn possible_hash_images(
        &self,
        owner: &str,
        service: &str,
        content_hash: &str,
    ) -> Vec<String> {
        trace!("Tagger::possible_hash_images({owner}, {service}, {content_hash})");

        if content_hash.is_empty() {
            return Vec::new();
        }

        let tag = self.variant.hash_tag(content_hash);
        Registry::PROBE_ORDER
            .iter()
            .map(|registry| registry.reference(owner, service, &tag))
            .collect()
    }

    /// Every reference this tagger could have pushed an equivalent
    /// image to, most specific first.
    ///
    /// This is the content addressed references followed by the
    /// variant's base tag in each registry.
    #[must_use]
    pub fn possible_tags(&self, owner: &str, service: &str, content_hash: &str) -> Vec<String> {
        trace!("Tagger::possible_tags({owner}, {service}, {content_hash})");

        let base_tag = self.variant.base_tag();
        let tags: Vec<String> = self
            .possible_hash_images(owner, service, content_hash)
            .into_iter()
            .chain(
                Registry::PROBE_ORDER
                    .iter()
                    .map(|registry| registry.reference(owner, service, base_tag)),
            )
            .collect();
        trace!("{tags:?}");

        tags
    }
}
