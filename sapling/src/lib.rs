//! Sapling property-based testing generators.
//!
//! This is the main entry point for the Sapling library, re-exporting the
//! generator engine from `sapling-core`.

pub use sapling_core::*;
