//! The `okteto-tagger` CLI.
//!
//! Resolves the references Okteto images are pushed to and
//! the candidates a build cache probes before building.

pub mod commands;
