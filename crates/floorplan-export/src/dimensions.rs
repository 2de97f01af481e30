//! Post-order listing of every node with its computed size.

use std::io::Write;

use floorplan_core::{ExportError, FloorplanTree, NodeKind, Stage};

use crate::{render, require_stage};

/// Write `<id>(<w>,<h>)` for blocks and `<cut>(<w>,<h>)` for cuts, in post-order.
pub fn write_dimensions<W: Write>(tree: &FloorplanTree, out: &mut W) -> Result<(), ExportError> {
    require_stage(tree, Stage::Sized)?;
    for id in tree.post_order() {
        let Some(node) = tree.get(id) else { continue };
        match node.kind() {
            NodeKind::Leaf(block) => writeln!(out, "{}{}", block.id(), block.size())?,
            NodeKind::Cut(cut) => writeln!(out, "{}{}", cut.cut_type(), cut.size())?,
        }
    }
    Ok(())
}

pub fn dimensions_string(tree: &FloorplanTree) -> Result<String, ExportError> {
    render(|buf| write_dimensions(tree, buf))
}
