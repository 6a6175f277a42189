//! Resolves the image references Okteto builds are pushed to,
//! and the references a build cache should probe for an image
//! that was already built.
//!
//! Everything in this crate is pure. The facts about the
//! environment are collected up front into a [`RuntimeContext`]
//! and handed to a [`Tagger`] on construction.

pub mod context;
pub mod image_tagger;
pub mod types;

pub use context::*;
pub use image_tagger::*;
pub use types::*;

pub use okteto_tagger_manifest::BuildTarget;

#[cfg(test)]
pub(crate) mod test {
    pub const OWNER: &str = "test";
    pub const SERVICE: &str = "test";
    pub const SHA: &str = "sha";
}
