//! Navigation grid: occupancy, neighbor enumeration, visibility and the
//! per-search scratch table used by the planner.
//!
//! The grid is a single Bevy resource ([`NavGrid`]). Systems borrow it through
//! `Res`/`ResMut`, so the scheduler guarantees there is never more than one
//! writer to occupancy or scratch at a time.

mod line_of_sight;
mod occupancy;
mod scratch;


use bevy::prelude::*;
use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

pub use occupancy::{GridCell, Occupancy};
pub use scratch::{ScratchEntry, SearchScratch};

/// Coordinate of one planning cell. Identity is the coordinate pair only.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug, Default, Serialize, Deserialize, PartialOrd, Ord)]
pub struct Node {
    pub x: i32,
    pub y: i32,
}

impl Node {
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    #[inline]
    pub fn offset(self, dx: i32, dy: i32) -> Self {
        Self { x: self.x + dx, y: self.y + dy }
    }

    /// True when `other` is one diagonal step away.
    #[inline]
    pub fn is_diagonal_step(self, other: Node) -> bool {
        (self.x - other.x).abs() == 1 && (self.y - other.y).abs() == 1
    }
}

/// The simulation's occupancy grid plus planner scratch state.
#[derive(Resource, Clone, Debug, Default)]
pub struct NavGrid {
    occupancy: Occupancy,
    scratch: SearchScratch,
}

impl NavGrid {
    pub fn new(width: usize, height: usize) -> Self {
        Self {
            occupancy: Occupancy::new(width, height),
            scratch: SearchScratch::default(),
        }
    }

    pub fn width(&self) -> usize {
        self.occupancy.width()
    }

    pub fn height(&self) -> usize {
        self.occupancy.height()
    }

    /// Mark or unmark a cell as an obstacle. Out-of-bounds coordinates are ignored.
    pub fn set_obstacle(&mut self, x: i32, y: i32, is_obstacle: bool) {
        self.occupancy.set_obstacle(x, y, is_obstacle);
    }

    /// `None` when `(x, y)` is outside the grid.
    pub fn get_cell(&self, x: i32, y: i32) -> Option<GridCell> {
        self.occupancy.get_cell(x, y)
    }

    pub fn is_walkable(&self, x: i32, y: i32) -> bool {
        self.occupancy.is_walkable(x, y)
    }

    pub fn neighbors(&self, node: Node) -> SmallVec<[Node; 8]> {
        self.occupancy.neighbors(node)
    }

    pub fn line_of_sight(&self, from: Node, to: Node) -> bool {
        self.occupancy.line_of_sight(from, to)
    }

    /// Every cell walkable again and all scratch state discarded.
    pub fn clear(&mut self) {
        self.occupancy.clear();
        self.scratch.reset();
    }

    pub fn occupancy(&self) -> &Occupancy {
        &self.occupancy
    }

    pub fn scratch(&self) -> &SearchScratch {
        &self.scratch
    }

    /// Borrow occupancy read-only and scratch mutably for one planning call.
    pub fn split_for_search(&mut self) -> (&Occupancy, &mut SearchScratch) {
        (&self.occupancy, &mut self.scratch)
    }
}
