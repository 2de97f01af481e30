//! Post-order tree shape, re-readable by the parser.

use std::io::Write;

use floorplan_core::{ExportError, FloorplanTree, NodeKind};

use crate::render;

/// Write one token per line in post-order: `<id>(<w>,<h>)` or `H`/`V`.
pub fn write_postorder<W: Write>(tree: &FloorplanTree, out: &mut W) -> Result<(), ExportError> {
    for id in tree.post_order() {
        let Some(node) = tree.get(id) else { continue };
        match node.kind() {
            NodeKind::Leaf(block) => writeln!(out, "{}{}", block.id(), block.size())?,
            NodeKind::Cut(cut) => writeln!(out, "{}", cut.cut_type())?,
        }
    }
    Ok(())
}

pub fn postorder_string(tree: &FloorplanTree) -> Result<String, ExportError> {
    render(|buf| write_postorder(tree, buf))
}
