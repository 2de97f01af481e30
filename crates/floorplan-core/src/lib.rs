//! Core types for slicing floorplans.
//!
//! This crate provides the foundational types used across all other floorplan crates:
//! - The arena-backed slicing tree and its node variants
//! - Geometry value types (sizes, points, rectangles)
//! - The explicit stack every traversal is driven by
//! - Error types

pub mod errors;
pub mod stack;
pub mod tree;
pub mod types;

pub use errors::*;
pub use stack::Stack;
pub use tree::*;
pub use types::*;
