use bon::Builder;
use log::{debug, trace};
use okteto_tagger_utils::{
    constants::{OKTETO_TAGGER_CLEAN, OKTETO_TAGGER_CONTENT_HASH, OKTETO_TAGGER_GLOBAL_ACCESS},
    parse_boolish,
};

#[cfg(not(test))]
use okteto_tagger_utils::get_env_var;

#[cfg(test)]
use okteto_tagger_utils::test_utils::get_env_var;

/// Facts about the environment a build runs in.
///
/// These are resolved once, before any tagging happens,
/// and never change for the lifetime of a [`Tagger`](crate::Tagger).
/// Callers that need different facts build a new tagger.
#[derive(Debug, Clone, Default, PartialEq, Eq, Builder)]
pub struct RuntimeContext {
    /// The source tree has no uncommitted changes
    /// relevant to the build.
    #[builder(default)]
    pub is_clean: bool,

    /// The caller may push to the global registry.
    #[builder(default)]
    pub has_access: bool,

    /// Opaque cache key for the build context.
    /// Empty when no hash is available.
    #[builder(default, into)]
    pub content_hash: String,
}

impl RuntimeContext {
    /// Reads the context from the environment.
    ///
    /// Missing variables count as `false` for the flags
    /// and as no hash for the content hash.
    #[must_use]
    pub fn from_env() -> Self {
        trace!("RuntimeContext::from_env()");

        let flag = |key: &str| {
            get_env_var(key)
                .map(|value| parse_boolish(key, &value))
                .unwrap_or_default()
        };

        let context = Self {
            is_clean: flag(OKTETO_TAGGER_CLEAN),
            has_access: flag(OKTETO_TAGGER_GLOBAL_ACCESS),
            content_hash: get_env_var(OKTETO_TAGGER_CONTENT_HASH).unwrap_or_default(),
        };
        debug!("Runtime context from env: {context:?}");

        context
    }

    /// Whether images can be keyed by content hash
    /// and pushed to the global registry.
    #[must_use]
    pub const fn pushes_to_global(&self) -> bool {
        self.is_clean && self.has_access
    }

    #[must_use]
    pub fn has_content_hash(&self) -> bool {
        !self.content_hash.is_empty()
    }
}

#[cfg(test)]
mod test {
    use okteto_tagger_utils::{
        constants::{OKTETO_TAGGER_CLEAN, OKTETO_TAGGER_CONTENT_HASH, OKTETO_TAGGER_GLOBAL_ACCESS},
        test_utils::{set_env_var, unset_env_var},
    };
    use pretty_assertions::assert_eq;
    use rstest::rstest;

    use super::RuntimeContext;

    fn clear() {
        unset_env_var(OKTETO_TAGGER_CLEAN);
        unset_env_var(OKTETO_TAGGER_GLOBAL_ACCESS);
        unset_env_var(OKTETO_TAGGER_CONTENT_HASH);
    }

    #[test]
    fn from_env_unset() {
        clear();

        assert_eq!(RuntimeContext::from_env(), RuntimeContext::default());
    }

    #[rstest]
    #[case::clean_with_access("true", "1", "abc123", true, true)]
    #[case::dirty("false", "yes", "abc123", false, true)]
    #[case::no_access("on", "0", "", true, false)]
    #[case::garbage("sure", "nope", "abc123", false, false)]
    fn from_env(
        #[case] clean: &str,
        #[case] access: &str,
        #[case] hash: &str,
        #[case] is_clean: bool,
        #[case] has_access: bool,
    ) {
        clear();
        set_env_var(OKTETO_TAGGER_CLEAN, clean);
        set_env_var(OKTETO_TAGGER_GLOBAL_ACCESS, access);
        set_env_var(OKTETO_TAGGER_CONTENT_HASH, hash);

        let context = RuntimeContext::from_env();

        assert_eq!(
            context,
            RuntimeContext::builder()
                .is_clean(is_clean)
                .has_access(has_access)
                .content_hash(hash)
                .build()
        );
    }

    #[rstest]
    #[case(true, true, true)]
    #[case(true, false, false)]
    #[case(false, true, false)]
    #[case(false, false, false)]
    fn pushes_to_global(#[case] is_clean: bool, #[case] has_access: bool, #[case] expected: bool) {
        let context = RuntimeContext::builder()
            .is_clean(is_clean)
            .has_access(has_access)
            .build();

        assert_eq!(context.pushes_to_global(), expected);
        assert!(!context.has_content_hash());
    }
}
