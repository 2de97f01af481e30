//! Error types for the floorplan pipeline.

use std::io;
use std::path::PathBuf;

use thiserror::Error;

use crate::tree::{NodeId, Stage};
use crate::types::BlockId;

/// Top-level error type for the floorplan pipeline.
#[derive(Debug, Error)]
pub enum FloorplanError {
    #[error("Can't open input file {}: {source}", .path.display())]
    InputOpen { path: PathBuf, source: io::Error },

    #[error(transparent)]
    Parse(#[from] ParseError),

    #[error(transparent)]
    Layout(#[from] LayoutError),

    #[error(transparent)]
    Export(#[from] ExportError),
}

/// Errors while reading the pre-order token stream and building the tree.
#[derive(Debug, Error)]
pub enum ParseError {
    #[error("Error parsing leaf node at token {position}: {token}")]
    MalformedLeaf { token: String, position: usize },

    #[error("Invalid tree: token {position} ({token}) has no parent awaiting a child")]
    InvalidTree { token: String, position: usize },

    #[error("Incomplete tree: {pending} internal node(s) never received both children")]
    IncompleteTree { pending: usize },

    #[error("Duplicate block id {id} at token {position}")]
    DuplicateBlockId { id: BlockId, position: usize },

    #[error("Input contains no tokens")]
    EmptyInput,

    #[error("Input has more nodes than a tree can address")]
    TooManyNodes,

    #[error(transparent)]
    Structure(#[from] TreeError),
}

/// Structural violations found when assembling a tree from raw nodes.
#[derive(Debug, Error)]
pub enum TreeError {
    #[error("Tree has no nodes")]
    Empty,

    #[error("Node {node:?} does not belong to this tree")]
    UnknownNode { node: NodeId },

    #[error("Cut {parent:?} references missing child {child:?}")]
    DanglingChild { parent: NodeId, child: NodeId },

    #[error("Node {child:?} has more than one parent")]
    SharedChild { child: NodeId },

    #[error("Node {node:?} is not reachable from the root")]
    Unreachable { node: NodeId },

    #[error(transparent)]
    Stack(#[from] StackError),
}

/// Errors in the dimension and coordinate passes.
#[derive(Debug, Error)]
pub enum LayoutError {
    #[error("Node {node:?} does not belong to this tree")]
    UnknownNode { node: NodeId },

    #[error("Dimensions of node {node:?} overflow")]
    DimensionOverflow { node: NodeId },

    #[error("Coordinates require computed dimensions (tree is at stage {actual:?})")]
    DimensionsNotComputed { actual: Stage },

    #[error(transparent)]
    Stack(#[from] StackError),
}

/// Errors while serializing a tree.
#[derive(Debug, Error)]
pub enum ExportError {
    #[error("Can't open output file {}: {source}", .path.display())]
    Open { path: PathBuf, source: io::Error },

    #[error("I/O error writing {}: {source}", .path.display())]
    Io { path: PathBuf, source: io::Error },

    #[error("I/O error during export: {0}")]
    Write(#[from] io::Error),

    #[error("Tree must reach stage {required:?} before export (currently {actual:?})")]
    NotSolved { required: Stage, actual: Stage },

    #[error("Export format not supported in this build: {format}")]
    UnsupportedFormat { format: String },

    #[error("Serialization failed: {reason}")]
    Serialize { reason: String },
}

/// Errors from the traversal stack.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum StackError {
    #[error("Pop from empty stack")]
    Empty,
}
