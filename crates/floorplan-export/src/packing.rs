//! The packing solution: every block with its size and origin.

use std::io::Write;

use floorplan_core::{ExportError, FloorplanTree, Stage};

use crate::{render, require_stage};

/// Write `<id>((<w>,<h>)(<x>,<y>))` per block, in input order.
pub fn write_packing<W: Write>(tree: &FloorplanTree, out: &mut W) -> Result<(), ExportError> {
    require_stage(tree, Stage::Placed)?;
    for (id, block) in tree.blocks() {
        let origin = tree.get(id).map(|n| n.origin()).unwrap_or_default();
        writeln!(out, "{}({}{})", block.id(), block.size(), origin)?;
    }
    Ok(())
}

pub fn packing_string(tree: &FloorplanTree) -> Result<String, ExportError> {
    render(|buf| write_packing(tree, buf))
}

#[cfg(test)]
mod tests {
    use super::*;
    use floorplan_parser::{parse_str, BuildOptions};

    #[test]
    fn test_packing_output() {
        let mut tree = parse_str("V 1(2,3) H 2(4,5) 3(6,7)", &BuildOptions::default()).unwrap();
        floorplan_layout::solve(&mut tree).unwrap();
        let out = packing_string(&tree).unwrap();
        assert_eq!(out, "1((2,3)(0,0))\n2((4,5)(2,7))\n3((6,7)(2,0))\n");
    }

    #[test]
    fn test_packing_requires_coordinates() {
        let mut tree = parse_str("V 1(2,3) 2(4,5)", &BuildOptions::default()).unwrap();
        floorplan_layout::compute_dimensions(&mut tree).unwrap();
        assert!(matches!(
            packing_string(&tree),
            Err(ExportError::NotSolved { required: Stage::Placed, actual: Stage::Sized })
        ));
    }
}
