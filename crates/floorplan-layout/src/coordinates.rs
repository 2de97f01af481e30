//! Top-down origin assignment.

use log::debug;

use floorplan_core::{CutType, FloorplanTree, LayoutError, Node, NodeId, Point, Size, Stack, Stage};

/// Origins of the `(left, right)` children of a cut placed at `origin`.
///
/// Under a horizontal cut the right child is the bottom piece and sits at
/// the parent's origin, with the left child directly above it. Under a
/// vertical cut the left child sits at the origin and the right child to its
/// right. Returns `None` on overflow.
pub fn child_origins(
    cut_type: CutType,
    origin: Point,
    left: Size,
    right: Size,
) -> Option<(Point, Point)> {
    match cut_type {
        CutType::Horizontal => Some((
            Point::new(origin.x, origin.y.checked_add(right.height)?),
            origin,
        )),
        CutType::Vertical => Some((
            origin,
            Point::new(origin.x.checked_add(left.width)?, origin.y),
        )),
    }
}

/// Compute the origin of every node in pre-order, with the root at (0,0).
///
/// Requires dimensions to have been computed.
pub fn compute_coordinates(tree: &mut FloorplanTree) -> Result<(), LayoutError> {
    if tree.stage() < Stage::Sized {
        return Err(LayoutError::DimensionsNotComputed {
            actual: tree.stage(),
        });
    }

    let root = tree.root();
    node_mut(tree, root)?.set_origin(Point::ORIGIN);

    let mut stack = Stack::with_capacity(16);
    stack.push(root);

    while !stack.is_empty() {
        let id = stack.pop()?;
        let current = node(tree, id)?;
        let Some(cut) = current.as_cut() else {
            continue;
        };
        let (cut_type, left, right) = (cut.cut_type(), cut.left(), cut.right());
        let origin = current.origin();

        let left_size = node(tree, left)?.size();
        let right_size = node(tree, right)?.size();
        let (left_origin, right_origin) = child_origins(cut_type, origin, left_size, right_size)
            .ok_or(LayoutError::DimensionOverflow { node: id })?;

        node_mut(tree, right)?.set_origin(right_origin);
        node_mut(tree, left)?.set_origin(left_origin);

        stack.push(right);
        stack.push(left);
    }

    tree.set_stage(Stage::Placed);
    debug!("coordinates computed for {} nodes", tree.len());
    Ok(())
}

fn node(tree: &FloorplanTree, id: NodeId) -> Result<&Node, LayoutError> {
    tree.get(id).ok_or(LayoutError::UnknownNode { node: id })
}

fn node_mut(tree: &mut FloorplanTree, id: NodeId) -> Result<&mut Node, LayoutError> {
    tree.get_mut(id).ok_or(LayoutError::UnknownNode { node: id })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::compute_dimensions;
    use floorplan_core::BlockId;

    fn example() -> FloorplanTree {
        let nodes = vec![
            Node::cut(CutType::Vertical, NodeId(1), NodeId(2)),
            Node::leaf(BlockId(1), Size::new(2, 3)),
            Node::cut(CutType::Horizontal, NodeId(3), NodeId(4)),
            Node::leaf(BlockId(2), Size::new(4, 5)),
            Node::leaf(BlockId(3), Size::new(6, 7)),
        ];
        FloorplanTree::from_nodes(nodes, NodeId(0)).unwrap()
    }

    fn origin_of(tree: &FloorplanTree, id: u32) -> Point {
        tree.get(NodeId(id)).unwrap().origin()
    }

    #[test]
    fn test_child_origins() {
        let origin = Point::new(2, 0);
        let (top, bottom) =
            child_origins(CutType::Horizontal, origin, Size::new(4, 5), Size::new(6, 7)).unwrap();
        assert_eq!(bottom, Point::new(2, 0));
        assert_eq!(top, Point::new(2, 7));

        let (left, right) =
            child_origins(CutType::Vertical, Point::ORIGIN, Size::new(2, 3), Size::new(6, 12))
                .unwrap();
        assert_eq!(left, Point::ORIGIN);
        assert_eq!(right, Point::new(2, 0));
    }

    #[test]
    fn test_example_coordinates() {
        let mut tree = example();
        compute_dimensions(&mut tree).unwrap();
        compute_coordinates(&mut tree).unwrap();

        assert_eq!(tree.stage(), Stage::Placed);
        assert_eq!(origin_of(&tree, 0), Point::new(0, 0));
        assert_eq!(origin_of(&tree, 1), Point::new(0, 0));
        assert_eq!(origin_of(&tree, 2), Point::new(2, 0));
        assert_eq!(origin_of(&tree, 4), Point::new(2, 0));
        assert_eq!(origin_of(&tree, 3), Point::new(2, 7));
    }

    #[test]
    fn test_requires_dimensions() {
        let mut tree = example();
        assert!(matches!(
            compute_coordinates(&mut tree),
            Err(LayoutError::DimensionsNotComputed { actual: Stage::Built })
        ));
    }

    #[test]
    fn test_rerun_is_stable() {
        let mut tree = example();
        compute_dimensions(&mut tree).unwrap();
        compute_coordinates(&mut tree).unwrap();
        let first: Vec<Point> =
            tree.pre_order().map(|id| tree.get(id).unwrap().origin()).collect();
        compute_coordinates(&mut tree).unwrap();
        let second: Vec<Point> =
            tree.pre_order().map(|id| tree.get(id).unwrap().origin()).collect();
        assert_eq!(first, second);
    }
}
