//! Slicing tree data structures.
//!
//! The tree is an arena of nodes addressed by [`NodeId`]. Leaves are blocks
//! with a fixed size; internal nodes are cuts that always own exactly two
//! children. Sizes of cuts and origins of every node are filled in later by
//! the layout passes.

use crate::errors::TreeError;
use crate::stack::Stack;
use crate::types::{BlockId, CutType, Point, Rect, Size};

/// Handle of a node inside a [`FloorplanTree`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct NodeId(pub u32);

impl NodeId {
    pub fn index(self) -> usize {
        self.0 as usize
    }
}

/// How far the layout passes have progressed on a tree.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Stage {
    /// Structure only; cut sizes and all origins are still zero.
    Built,
    /// Every cut has its width and height computed.
    Sized,
    /// Every node has its origin computed.
    Placed,
}

/// A leaf block with caller-supplied id and fixed size.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Block {
    id: BlockId,
    size: Size,
}

impl Block {
    pub fn id(&self) -> BlockId {
        self.id
    }

    pub fn size(&self) -> Size {
        self.size
    }
}

/// An internal node splitting its box into two children.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Cut {
    cut_type: CutType,
    left: NodeId,
    right: NodeId,
    size: Size,
}

impl Cut {
    pub fn cut_type(&self) -> CutType {
        self.cut_type
    }

    pub fn left(&self) -> NodeId {
        self.left
    }

    pub fn right(&self) -> NodeId {
        self.right
    }

    /// Derived size; zero until dimensions are computed.
    pub fn size(&self) -> Size {
        self.size
    }

    pub fn set_size(&mut self, size: Size) {
        self.size = size;
    }
}

/// The two node variants.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NodeKind {
    Leaf(Block),
    Cut(Cut),
}

/// A node of the slicing tree.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Node {
    kind: NodeKind,
    origin: Point,
}

impl Node {
    /// Create a leaf block.
    pub fn leaf(id: BlockId, size: Size) -> Self {
        Self {
            kind: NodeKind::Leaf(Block { id, size }),
            origin: Point::ORIGIN,
        }
    }

    /// Create a cut owning `left` and `right`.
    pub fn cut(cut_type: CutType, left: NodeId, right: NodeId) -> Self {
        Self {
            kind: NodeKind::Cut(Cut {
                cut_type,
                left,
                right,
                size: Size::default(),
            }),
            origin: Point::ORIGIN,
        }
    }

    pub fn kind(&self) -> &NodeKind {
        &self.kind
    }

    pub fn is_leaf(&self) -> bool {
        matches!(self.kind, NodeKind::Leaf(_))
    }

    pub fn as_block(&self) -> Option<&Block> {
        match &self.kind {
            NodeKind::Leaf(block) => Some(block),
            NodeKind::Cut(_) => None,
        }
    }

    pub fn as_cut(&self) -> Option<&Cut> {
        match &self.kind {
            NodeKind::Cut(cut) => Some(cut),
            NodeKind::Leaf(_) => None,
        }
    }

    /// Mutable access to the cut; leaves expose nothing mutable but their origin.
    pub fn as_cut_mut(&mut self) -> Option<&mut Cut> {
        match &mut self.kind {
            NodeKind::Cut(cut) => Some(cut),
            NodeKind::Leaf(_) => None,
        }
    }

    /// `(left, right)` for cuts, `None` for leaves.
    pub fn children(&self) -> Option<(NodeId, NodeId)> {
        self.as_cut().map(|cut| (cut.left, cut.right))
    }

    pub fn size(&self) -> Size {
        match &self.kind {
            NodeKind::Leaf(block) => block.size,
            NodeKind::Cut(cut) => cut.size,
        }
    }

    pub fn origin(&self) -> Point {
        self.origin
    }

    pub fn set_origin(&mut self, origin: Point) {
        self.origin = origin;
    }

    pub fn bounds(&self) -> Rect {
        Rect::new(self.origin, self.size())
    }
}

/// A strictly binary slicing tree.
#[derive(Debug, Clone)]
pub struct FloorplanTree {
    nodes: Vec<Node>,
    root: NodeId,
    stage: Stage,
}

impl FloorplanTree {
    /// Assemble a tree from an arena of nodes and a root handle.
    ///
    /// Every cut must reference two in-bounds children, every node other than
    /// the root must have exactly one parent, and every node must be reachable
    /// from the root.
    pub fn from_nodes(nodes: Vec<Node>, root: NodeId) -> Result<Self, TreeError> {
        if nodes.is_empty() {
            return Err(TreeError::Empty);
        }
        if root.index() >= nodes.len() {
            return Err(TreeError::UnknownNode { node: root });
        }

        let mut parent_count = vec![0u8; nodes.len()];
        for (index, node) in nodes.iter().enumerate() {
            if let Some((left, right)) = node.children() {
                for child in [left, right] {
                    let slot = parent_count
                        .get_mut(child.index())
                        .ok_or(TreeError::DanglingChild {
                            parent: NodeId(index as u32),
                            child,
                        })?;
                    if *slot > 0 || child == root {
                        return Err(TreeError::SharedChild { child });
                    }
                    *slot = 1;
                }
            }
        }

        let mut visited = vec![false; nodes.len()];
        let mut stack = Stack::with_capacity(16);
        stack.push(root);
        while !stack.is_empty() {
            let id = stack.pop()?;
            visited[id.index()] = true;
            if let Some((left, right)) = nodes[id.index()].children() {
                stack.push(right);
                stack.push(left);
            }
        }
        if let Some(index) = visited.iter().position(|seen| !seen) {
            return Err(TreeError::Unreachable {
                node: NodeId(index as u32),
            });
        }

        Ok(Self {
            nodes,
            root,
            stage: Stage::Built,
        })
    }

    pub fn root(&self) -> NodeId {
        self.root
    }

    pub fn stage(&self) -> Stage {
        self.stage
    }

    /// Record that a layout pass has completed.
    pub fn set_stage(&mut self, stage: Stage) {
        self.stage = stage;
    }

    pub fn get(&self, id: NodeId) -> Option<&Node> {
        self.nodes.get(id.index())
    }

    pub fn get_mut(&mut self, id: NodeId) -> Option<&mut Node> {
        self.nodes.get_mut(id.index())
    }

    /// Total number of nodes.
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// Always false; a tree holds at least its root.
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    pub fn leaf_count(&self) -> usize {
        self.nodes.iter().filter(|n| n.is_leaf()).count()
    }

    /// Bounding rectangle of a node (origin plus size).
    pub fn bounds(&self, id: NodeId) -> Option<Rect> {
        self.get(id).map(Node::bounds)
    }

    /// Size of the whole floorplan.
    pub fn size(&self) -> Size {
        self.nodes[self.root.index()].size()
    }

    /// Iterate node ids in pre-order (node, left, right).
    pub fn pre_order(&self) -> PreOrder<'_> {
        let mut stack = Stack::with_capacity(16);
        stack.push(self.root);
        PreOrder { tree: self, stack }
    }

    /// Iterate node ids in post-order (left, right, node).
    pub fn post_order(&self) -> PostOrder<'_> {
        let mut stack = Stack::with_capacity(16);
        stack.push(Visit::Enter(self.root));
        PostOrder { tree: self, stack }
    }

    /// Leaf blocks in pre-order, which is the order they appear in the input.
    pub fn blocks(&self) -> impl Iterator<Item = (NodeId, &Block)> + '_ {
        self.pre_order()
            .filter_map(move |id| self.get(id).and_then(Node::as_block).map(|b| (id, b)))
    }

    /// Number of nodes on the longest root-to-leaf path.
    pub fn depth(&self) -> usize {
        let mut deepest = 0;
        let mut stack = Stack::with_capacity(16);
        stack.push((self.root, 1usize));
        while let Ok((id, depth)) = stack.pop() {
            deepest = deepest.max(depth);
            if let Some((left, right)) = self.get(id).and_then(Node::children) {
                stack.push((left, depth + 1));
                stack.push((right, depth + 1));
            }
        }
        deepest
    }
}

/// Pre-order iterator over a [`FloorplanTree`].
pub struct PreOrder<'a> {
    tree: &'a FloorplanTree,
    stack: Stack<NodeId>,
}

impl Iterator for PreOrder<'_> {
    type Item = NodeId;

    fn next(&mut self) -> Option<NodeId> {
        let id = self.stack.pop().ok()?;
        if let Some((left, right)) = self.tree.get(id).and_then(Node::children) {
            self.stack.push(right);
            self.stack.push(left);
        }
        Some(id)
    }
}

/// Pending step of a post-order walk.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Visit {
    /// Children of this node have not been scheduled yet.
    Enter(NodeId),
    /// Both children are done; the node itself is next.
    Exit(NodeId),
}

/// Post-order iterator over a [`FloorplanTree`].
pub struct PostOrder<'a> {
    tree: &'a FloorplanTree,
    stack: Stack<Visit>,
}

impl Iterator for PostOrder<'_> {
    type Item = NodeId;

    fn next(&mut self) -> Option<NodeId> {
        loop {
            match self.stack.pop().ok()? {
                Visit::Exit(id) => return Some(id),
                Visit::Enter(id) => match self.tree.get(id).and_then(Node::children) {
                    Some((left, right)) => {
                        self.stack.push(Visit::Exit(id));
                        self.stack.push(Visit::Enter(right));
                        self.stack.push(Visit::Enter(left));
                    }
                    None => return Some(id),
                },
            }
        }
    }
}
