//! Geometry and identifier types for slicing floorplans.

use std::fmt;

/// Caller-supplied identifier of a leaf block.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct BlockId(pub u64);

impl fmt::Display for BlockId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Direction of a slicing cut.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum CutType {
    /// Children are stacked: the left child on top, the right child below.
    Horizontal,
    /// Children sit side by side: the left child left, the right child right.
    Vertical,
}

impl CutType {
    /// The single-character marker used in the token format.
    pub fn symbol(self) -> char {
        match self {
            CutType::Horizontal => 'H',
            CutType::Vertical => 'V',
        }
    }

    /// Parse a marker character.
    pub fn from_symbol(c: char) -> Option<Self> {
        match c {
            'H' => Some(CutType::Horizontal),
            'V' => Some(CutType::Vertical),
            _ => None,
        }
    }
}

impl fmt::Display for CutType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.symbol())
    }
}

/// Width and height of a block or of a sub-floorplan.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Size {
    pub width: u64,
    pub height: u64,
}

impl Size {
    pub fn new(width: u64, height: u64) -> Self {
        Self { width, height }
    }

    pub fn area(&self) -> u128 {
        u128::from(self.width) * u128::from(self.height)
    }
}

impl fmt::Display for Size {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({},{})", self.width, self.height)
    }
}

/// Lower-left corner of a placed block.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Point {
    pub x: u64,
    pub y: u64,
}

impl Point {
    pub const ORIGIN: Point = Point { x: 0, y: 0 };

    pub fn new(x: u64, y: u64) -> Self {
        Self { x, y }
    }
}

impl fmt::Display for Point {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({},{})", self.x, self.y)
    }
}

/// Axis-aligned rectangle anchored at its lower-left corner.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Rect {
    pub origin: Point,
    pub size: Size,
}

impl Rect {
    pub fn new(origin: Point, size: Size) -> Self {
        Self { origin, size }
    }

    /// Right edge (x + width).
    pub fn right(&self) -> u64 {
        self.origin.x.saturating_add(self.size.width)
    }

    /// Top edge (y + height).
    pub fn top(&self) -> u64 {
        self.origin.y.saturating_add(self.size.height)
    }

    pub fn area(&self) -> u128 {
        self.size.area()
    }

    /// Check whether `other` lies entirely inside this rectangle.
    pub fn contains_rect(&self, other: &Rect) -> bool {
        other.origin.x >= self.origin.x
            && other.origin.y >= self.origin.y
            && other.right() <= self.right()
            && other.top() <= self.top()
    }

    /// Check whether the interiors of two rectangles intersect.
    ///
    /// Rectangles that only share an edge do not overlap.
    pub fn overlaps(&self, other: &Rect) -> bool {
        self.origin.x < other.right()
            && other.origin.x < self.right()
            && self.origin.y < other.top()
            && other.origin.y < self.top()
    }
}
