//! Staleness-aware asset bundling.
//!
//! Groups of script or stylesheet sources are filtered file by file, cached
//! under a mirror of the source tree, and concatenated into one artifact per
//! group. Markup generation references either the artifact (production) or
//! every source file (development).

pub mod cli;
pub mod core;
pub mod infrastructure;
pub mod utils;

pub use crate::core::{AssetCompressor, AssetKind, BuildOptions, BuildSummary, Group, GroupReport, KindConfig};
pub use crate::utils::{CompressError, ConfigLoader, Result, Settings};
