use fixedbitset::FixedBitSet;
use smallvec::SmallVec;

use super::Node;

/// Snapshot of one cell as returned by [`Occupancy::get_cell`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct GridCell {
    pub node: Node,
    pub walkable: bool,
}

/// Walkability of a fixed `width × height` grid.
///
/// Blocked cells are stored as set bits (row-major).
#[derive(Clone, Debug, Default)]
pub struct Occupancy {
    width: usize,
    height: usize,
    blocked: FixedBitSet,
}

impl Occupancy {
    pub fn new(width: usize, height: usize) -> Self {
        Self {
            width,
            height,
            blocked: FixedBitSet::with_capacity(width * height),
        }
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    /// Number of cells.
    pub fn len(&self) -> usize {
        self.width * self.height
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn in_bounds(&self, x: i32, y: i32) -> bool {
        x >= 0 && y >= 0 && (x as usize) < self.width && (y as usize) < self.height
    }

    /// Row-major index of `node`, `None` out of bounds.
    #[inline]
    pub fn index_of(&self, node: Node) -> Option<usize> {
        if self.in_bounds(node.x, node.y) {
            Some(node.y as usize * self.width + node.x as usize)
        } else {
            None
        }
    }

    #[inline]
    pub fn node_at(&self, index: usize) -> Node {
        Node::new((index % self.width) as i32, (index / self.width) as i32)
    }

    pub fn set_obstacle(&mut self, x: i32, y: i32, is_obstacle: bool) {
        let Some(idx) = self.index_of(Node::new(x, y)) else {
            return;
        };
        self.blocked.set(idx, is_obstacle);
    }

    pub fn get_cell(&self, x: i32, y: i32) -> Option<GridCell> {
        let node = Node::new(x, y);
        self.index_of(node).map(|idx| GridCell {
            node,
            walkable: !self.blocked.contains(idx),
        })
    }

    /// Out-of-bounds cells are never walkable.
    #[inline]
    pub fn is_walkable(&self, x: i32, y: i32) -> bool {
        match self.index_of(Node::new(x, y)) {
            Some(idx) => !self.blocked.contains(idx),
            None => false,
        }
    }

    #[inline]
    pub fn is_obstacle(&self, x: i32, y: i32) -> bool {
        !self.is_walkable(x, y)
    }

    /// In-bounds 8-neighborhood of `node`.
    ///
    /// A diagonal neighbor is dropped when either orthogonal corner cell is
    /// blocked, so moves never squeeze between two diagonal obstacles. The
    /// neighbors themselves are returned regardless of walkability.
    pub fn neighbors(&self, node: Node) -> SmallVec<[Node; 8]> {
        let mut out = SmallVec::new();
        if !self.in_bounds(node.x, node.y) {
            return out;
        }

        for dy in -1..=1 {
            for dx in -1..=1 {
                if dx == 0 && dy == 0 {
                    continue;
                }
                let candidate = node.offset(dx, dy);
                if !self.in_bounds(candidate.x, candidate.y) {
                    continue;
                }
                if dx != 0 && dy != 0
                    && (!self.is_walkable(node.x, node.y + dy) || !self.is_walkable(node.x + dx, node.y))
                {
                    continue;
                }
                out.push(candidate);
            }
        }
        out
    }

    pub fn clear(&mut self) {
        self.blocked.clear();
    }

    pub fn blocked_count(&self) -> usize {
        self.blocked.count_ones(..)
    }

    /// Blocked cells in row-major order (read-only view for debug overlays).
    pub fn iter_blocked(&self) -> impl Iterator<Item = Node> + '_ {
        self.blocked.ones().map(|idx| self.node_at(idx))
    }
}
