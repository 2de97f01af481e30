//! Bottom-up size propagation.

use log::{debug, trace};

use floorplan_core::{CutType, FloorplanTree, LayoutError, Node, NodeId, Size, Stack, Stage, Visit};

/// Size of a cut given the final sizes of its two children.
///
/// A horizontal cut stacks its children, a vertical cut places them side by
/// side. Returns `None` on overflow.
pub fn combine(cut_type: CutType, left: Size, right: Size) -> Option<Size> {
    match cut_type {
        CutType::Horizontal => Some(Size::new(
            left.width.max(right.width),
            left.height.checked_add(right.height)?,
        )),
        CutType::Vertical => Some(Size::new(
            left.width.checked_add(right.width)?,
            left.height.max(right.height),
        )),
    }
}

/// Compute width and height of every cut in post-order.
///
/// Leaf sizes are never touched.
pub fn compute_dimensions(tree: &mut FloorplanTree) -> Result<(), LayoutError> {
    let mut stack = Stack::with_capacity(16);
    stack.push(Visit::Enter(tree.root()));

    while !stack.is_empty() {
        match stack.pop()? {
            Visit::Enter(id) => {
                if let Some((left, right)) = node(tree, id)?.children() {
                    stack.push(Visit::Exit(id));
                    stack.push(Visit::Enter(right));
                    stack.push(Visit::Enter(left));
                }
            }
            Visit::Exit(id) => {
                let cut = node(tree, id)?
                    .as_cut()
                    .ok_or(LayoutError::UnknownNode { node: id })?;
                let (cut_type, left, right) = (cut.cut_type(), cut.left(), cut.right());
                let size = combine(cut_type, node(tree, left)?.size(), node(tree, right)?.size())
                    .ok_or(LayoutError::DimensionOverflow { node: id })?;
                trace!("{:?} {} -> {}", id, cut_type, size);

                if let Some(cut) = tree.get_mut(id).and_then(Node::as_cut_mut) {
                    cut.set_size(size);
                }
            }
        }
    }

    tree.set_stage(Stage::Sized);
    debug!("dimensions computed: floorplan is {}", tree.size());
    Ok(())
}

fn node(tree: &FloorplanTree, id: NodeId) -> Result<&Node, LayoutError> {
    tree.get(id).ok_or(LayoutError::UnknownNode { node: id })
}
