//! JSON packing report.

use std::io::Write;

use serde::Serialize;

use floorplan_core::{BlockId, ExportError, FloorplanTree, Point, Size, Stage};

use crate::require_stage;

/// The whole packing solution as a serializable document.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PackingReport {
    pub size: Size,
    pub blocks: Vec<PackedBlock>,
}

/// One placed block.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PackedBlock {
    pub id: BlockId,
    pub size: Size,
    pub origin: Point,
}

/// Collect the packing of a placed tree, blocks in input order.
pub fn packing_report(tree: &FloorplanTree) -> Result<PackingReport, ExportError> {
    require_stage(tree, Stage::Placed)?;
    let blocks = tree
        .blocks()
        .map(|(id, block)| PackedBlock {
            id: block.id(),
            size: block.size(),
            origin: tree.get(id).map(|n| n.origin()).unwrap_or_default(),
        })
        .collect();

    Ok(PackingReport {
        size: tree.size(),
        blocks,
    })
}

/// Write the packing report as pretty-printed JSON.
pub fn write_packing_json<W: Write>(tree: &FloorplanTree, out: &mut W) -> Result<(), ExportError> {
    let report = packing_report(tree)?;
    serde_json::to_writer_pretty(&mut *out, &report).map_err(|e| ExportError::Serialize {
        reason: e.to_string(),
    })?;
    writeln!(out)?;
    Ok(())
}
