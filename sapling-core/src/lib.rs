//! Core functionality for Sapling property-based testing.
//!
//! This crate provides the generator engine: seed-and-size-driven
//! generators that produce values together with lazy shrink trees, plus
//! the combinator library built on them.

pub mod data;
pub mod error;
pub mod gen;
pub mod range;
pub mod sample;
pub mod shrink;
pub mod tree;

// Re-export the main types
pub use data::*;
pub use error::*;
pub use gen::*;
pub use range::*;
pub use tree::*;
