pub mod build_target;
pub mod manifest;

pub use build_target::*;
pub use manifest::*;
