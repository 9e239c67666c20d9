use serde::{Deserialize, Serialize};

use crate::game::grid::{NavGrid, Node};

/// Square obstacle measured in visual squares.
///
/// A visual square is `cells_per_square` path-grid cells on a side. Agents
/// are anchored at their top-left corner, so an obstacle blocks its own cells
/// plus `cells_per_square - 1` cells above and to its left: an agent standing
/// in that band would already have its body inside the obstacle.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ObstacleRect {
    pub square_x: i32,
    pub square_y: i32,
    pub size: i32,
}

impl ObstacleRect {
    pub fn new(square_x: i32, square_y: i32, size: i32) -> Self {
        Self { square_x, square_y, size }
    }

    /// Overlap in square space. Obstacles that only share an edge are fine.
    pub fn overlaps(&self, other: &ObstacleRect) -> bool {
        self.overlaps_squares(other.square_x, other.square_y, other.size, other.size)
    }

    /// Overlap with the square-space box `[x, x+w) × [y, y+h)`.
    pub fn overlaps_squares(&self, x: i32, y: i32, w: i32, h: i32) -> bool {
        self.square_x < x + w
            && x < self.square_x + self.size
            && self.square_y < y + h
            && y < self.square_y + self.size
    }

    /// Inclusive path-grid cell bounds this obstacle blocks.
    pub fn blocked_cells(&self, cells_per_square: i32) -> (Node, Node) {
        let inflate = cells_per_square - 1;
        let min = Node::new(
            self.square_x * cells_per_square - inflate,
            self.square_y * cells_per_square - inflate,
        );
        let max = Node::new(
            (self.square_x + self.size) * cells_per_square - 1,
            (self.square_y + self.size) * cells_per_square - 1,
        );
        (min, max)
    }

    /// Mark the blocked cells on `grid`. Cells off the grid are skipped.
    pub fn rasterize(&self, grid: &mut NavGrid, cells_per_square: i32) {
        let (min, max) = self.blocked_cells(cells_per_square);
        for y in min.y..=max.y {
            for x in min.x..=max.x {
                grid.set_obstacle(x, y, true);
            }
        }
    }
}

/// Everything needed to build one field: obstacles and spawn cells.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldLayout {
    pub obstacles: Vec<ObstacleRect>,
    pub player: Node,
    pub goal: Node,
    pub enemies: Vec<Node>,
}

impl FieldLayout {
    pub fn rasterize(&self, grid: &mut NavGrid, cells_per_square: i32) {
        for obstacle in &self.obstacles {
            obstacle.rasterize(grid, cells_per_square);
        }
    }
}
