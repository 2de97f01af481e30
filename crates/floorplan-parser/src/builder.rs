//! Reconstruct a strictly binary slicing tree from its pre-order encoding.

use std::collections::HashSet;
use std::fs;
use std::path::Path;

use log::debug;

use floorplan_core::{
    BlockId, CutType, FloorplanError, FloorplanTree, Node, NodeId, ParseError, Size, Stack,
};

use crate::lexer::{lex_token, Token};

/// Options for tree construction.
#[derive(Debug, Clone, Default)]
pub struct BuildOptions {
    /// Fail when two blocks share an id instead of accepting both.
    pub reject_duplicate_ids: bool,
}

/// An arena slot whose children may still be missing.
enum Slot {
    Leaf(BlockId, Size),
    Cut {
        cut_type: CutType,
        left: Option<NodeId>,
        right: Option<NodeId>,
    },
}

/// Build a tree from a sequence of pre-order tokens.
///
/// The first token becomes the root. Each later node is attached to the cut
/// on top of the pending stack, filling its left slot first; a cut is popped
/// once its right slot is filled. Cuts are pushed after being attached so
/// they receive the following nodes as children.
pub fn build_tree<I, S>(tokens: I, options: &BuildOptions) -> Result<FloorplanTree, ParseError>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let mut slots: Vec<Slot> = Vec::new();
    let mut pending: Stack<NodeId> = Stack::new();
    let mut seen_ids = HashSet::new();

    for (index, raw) in tokens.into_iter().enumerate() {
        let raw = raw.as_ref();
        let position = index + 1;

        let token = lex_token(raw).ok_or_else(|| ParseError::MalformedLeaf {
            token: raw.to_string(),
            position,
        })?;

        let id = NodeId(u32::try_from(slots.len()).map_err(|_| ParseError::TooManyNodes)?);

        let slot = match token {
            Token::Cut(cut_type) => Slot::Cut {
                cut_type,
                left: None,
                right: None,
            },
            Token::Leaf { id: block, size } => {
                if options.reject_duplicate_ids && !seen_ids.insert(block) {
                    return Err(ParseError::DuplicateBlockId { id: block, position });
                }
                Slot::Leaf(block, size)
            }
        };
        let is_cut = matches!(slot, Slot::Cut { .. });
        slots.push(slot);

        if id.index() > 0 {
            attach(&mut slots, &mut pending, id).ok_or_else(|| ParseError::InvalidTree {
                token: raw.to_string(),
                position,
            })?;
        }

        if is_cut {
            pending.push(id);
        }
    }

    if slots.is_empty() {
        return Err(ParseError::EmptyInput);
    }
    if !pending.is_empty() {
        return Err(ParseError::IncompleteTree {
            pending: pending.len(),
        });
    }

    let nodes = slots
        .into_iter()
        .map(|slot| match slot {
            Slot::Leaf(block, size) => Ok(Node::leaf(block, size)),
            Slot::Cut {
                cut_type,
                left: Some(left),
                right: Some(right),
            } => Ok(Node::cut(cut_type, left, right)),
            Slot::Cut { .. } => Err(ParseError::IncompleteTree { pending: 1 }),
        })
        .collect::<Result<Vec<_>, _>>()?;

    let tree = FloorplanTree::from_nodes(nodes, NodeId(0))?;
    debug!(
        "built floorplan tree: {} nodes, {} blocks, depth {}",
        tree.len(),
        tree.leaf_count(),
        tree.depth()
    );
    Ok(tree)
}

/// Hang `child` under the cut on top of `pending`.
///
/// Returns `None` when no cut is waiting for a child.
fn attach(slots: &mut [Slot], pending: &mut Stack<NodeId>, child: NodeId) -> Option<()> {
    let parent = *pending.peek()?;
    match slots.get_mut(parent.index()) {
        Some(Slot::Cut { left, right, .. }) => {
            if left.is_none() {
                *left = Some(child);
            } else {
                *right = Some(child);
                pending.pop().ok()?;
            }
            Some(())
        }
        _ => None,
    }
}

/// Build a tree from whitespace-separated text.
pub fn parse_str(input: &str, options: &BuildOptions) -> Result<FloorplanTree, ParseError> {
    build_tree(input.split_whitespace(), options)
}

/// Read and build a tree from a file.
///
/// The file is split into tokens on whitespace bytes. A token that is not
/// valid UTF-8 is reported as a malformed leaf.
pub fn load_tree(
    path: impl AsRef<Path>,
    options: &BuildOptions,
) -> Result<FloorplanTree, FloorplanError> {
    let path = path.as_ref();
    let bytes = fs::read(path).map_err(|source| FloorplanError::InputOpen {
        path: path.to_path_buf(),
        source,
    })?;
    debug!("loaded {} bytes from {}", bytes.len(), path.display());

    let tokens = bytes
        .split(|byte| byte.is_ascii_whitespace() || *byte == b'\x0b')
        .filter(|token| !token.is_empty())
        .map(String::from_utf8_lossy);
    Ok(build_tree(tokens, options)?)
}
