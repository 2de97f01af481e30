//! Layout computation for slicing floorplans.
//!
//! Layout runs in two passes over the tree, both driven by an explicit stack:
//!
//! 1. **Dimensions**: post-order, each cut takes its size from its children
//! 2. **Coordinates**: pre-order, each cut hands origins down to its children
//!
//! # Example
//!
//! ```ignore
//! use floorplan_parser::{parse_str, BuildOptions};
//!
//! let mut tree = parse_str("V 1(2,3) H 2(4,5) 3(6,7)", &BuildOptions::default())?;
//! let bounds = floorplan_layout::solve(&mut tree)?;
//! assert_eq!((bounds.size.width, bounds.size.height), (8, 12));
//! ```

mod coordinates;
mod dimensions;

pub use coordinates::{child_origins, compute_coordinates};
pub use dimensions::{combine, compute_dimensions};

use floorplan_core::{FloorplanTree, LayoutError, Rect};

/// Run both layout passes and return the bounding box of the whole floorplan.
pub fn solve(tree: &mut FloorplanTree) -> Result<Rect, LayoutError> {
    compute_dimensions(tree)?;
    compute_coordinates(tree)?;
    let root = tree.root();
    tree.bounds(root).ok_or(LayoutError::UnknownNode { node: root })
}
