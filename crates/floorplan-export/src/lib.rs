//! Export formats for slicing floorplans.
//!
//! Supported formats:
//! - Post-order shape (same token shapes as the input, one per line)
//! - Post-order dimensions (every node with its computed size)
//! - Packing (pre-order blocks with size and origin)
//! - JSON packing report (behind the `json` feature)

mod dimensions;
mod packing;
mod shape;
mod writer;

#[cfg(feature = "json")]
pub mod json;

pub use dimensions::{dimensions_string, write_dimensions};
pub use packing::{packing_string, write_packing};
pub use shape::{postorder_string, write_postorder};
pub use writer::{
    write_outputs, ExportOptions, ExportReport, OutputFormat, OutputPolicy, OutputTarget,
};

#[cfg(feature = "json")]
pub use json::{packing_report, write_packing_json, PackedBlock, PackingReport};

use floorplan_core::{ExportError, FloorplanTree, Stage};

/// Fail unless the tree has reached `required`.
pub(crate) fn require_stage(tree: &FloorplanTree, required: Stage) -> Result<(), ExportError> {
    if tree.stage() < required {
        return Err(ExportError::NotSolved {
            required,
            actual: tree.stage(),
        });
    }
    Ok(())
}

/// Run a writer into memory and return the text.
pub(crate) fn render<F>(write: F) -> Result<String, ExportError>
where
    F: FnOnce(&mut Vec<u8>) -> Result<(), ExportError>,
{
    let mut buffer = Vec::new();
    write(&mut buffer)?;
    String::from_utf8(buffer).map_err(|e| ExportError::Serialize {
        reason: e.to_string(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use floorplan_parser::{parse_str, BuildOptions};

    /// `H` spine of `cuts` cuts: every left child is a block, the right
    /// child is the next cut, ending in one last block.
    fn right_spine(cuts: usize) -> String {
        let mut input = String::new();
        for i in 0..cuts {
            input.push_str(&format!("H {i}(1,1) "));
        }
        input.push_str(&format!("{cuts}(1,1)"));
        input
    }

    #[test]
    fn test_deep_right_spine_serializes() {
        let cuts = 100_000;
        let mut tree = parse_str(&right_spine(cuts), &BuildOptions::default()).unwrap();
        floorplan_layout::solve(&mut tree).unwrap();

        let shape = postorder_string(&tree).unwrap();
        assert_eq!(shape.lines().count(), 2 * cuts + 1);
        assert_eq!(shape.lines().next(), Some("0(1,1)"));

        let dimensions = dimensions_string(&tree).unwrap();
        assert_eq!(dimensions.lines().count(), 2 * cuts + 1);
        assert_eq!(dimensions.lines().last(), Some(format!("H(1,{})", cuts + 1).as_str()));

        let packing = packing_string(&tree).unwrap();
        let lines: Vec<&str> = packing.lines().collect();
        assert_eq!(lines.len(), cuts + 1);
        assert_eq!(lines[0], format!("0((1,1)(0,{cuts}))"));
        assert_eq!(lines[cuts], format!("{cuts}((1,1)(0,0))"));
    }
}
