use bevy::prelude::*;
use serde::{Deserialize, Serialize};
use std::collections::VecDeque;

use crate::game::fixed_math::FixedNum;
use crate::game::grid::Node;

/// Cost of one orthogonal step.
#[inline]
pub fn orthogonal_cost() -> FixedNum {
    FixedNum::ONE
}

/// Cost of one diagonal step: the 1.4 approximation of √2.
#[inline]
pub fn diagonal_cost() -> FixedNum {
    FixedNum::from_num(1.4)
}

/// Edge cost between two adjacent cells.
#[inline]
pub fn step_cost(from: Node, to: Node) -> FixedNum {
    if from.is_diagonal_step(to) {
        diagonal_cost()
    } else {
        orthogonal_cost()
    }
}

/// Goal-distance estimate used for `h_cost`.
///
/// `Octile` prices the remaining distance with the same 1.0 / 1.4 step costs
/// the search accumulates, which makes it the exact cost across open ground.
/// `Euclidean` is the straight-line distance; it slightly overestimates
/// diagonal runs (√2 > 1.4) and is kept as an explicit opt-in.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum Heuristic {
    #[default]
    Octile,
    Euclidean,
}

impl Heuristic {
    pub fn estimate(self, from: Node, to: Node) -> FixedNum {
        let dx = (from.x - to.x).abs();
        let dy = (from.y - to.y).abs();
        match self {
            Heuristic::Octile => {
                let diagonal = dx.min(dy);
                let straight = dx.max(dy) - diagonal;
                diagonal_cost() * FixedNum::from_num(diagonal) + orthogonal_cost() * FixedNum::from_num(straight)
            }
            Heuristic::Euclidean => {
                let sq = FixedNum::from_num(dx) * FixedNum::from_num(dx) + FixedNum::from_num(dy) * FixedNum::from_num(dy);
                if sq == FixedNum::ZERO {
                    FixedNum::ZERO
                } else {
                    sq.sqrt()
                }
            }
        }
    }
}

/// Waypoints an agent is following, stamped with the field epoch they were
/// planned against.
///
/// Replaced wholesale on every replan. Dropping the head once it is reached is
/// the only in-place edit.
#[derive(Component, Debug, Clone, Default, PartialEq, Eq)]
pub struct Path {
    waypoints: VecDeque<Node>,
    epoch: u64,
}

impl Path {
    pub fn new(waypoints: Vec<Node>, epoch: u64) -> Self {
        Self {
            waypoints: waypoints.into(),
            epoch,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.waypoints.is_empty()
    }

    pub fn len(&self) -> usize {
        self.waypoints.len()
    }

    pub fn epoch(&self) -> u64 {
        self.epoch
    }

    /// Next waypoint to steer toward.
    pub fn head(&self) -> Option<Node> {
        self.waypoints.front().copied()
    }

    /// Waypoint after the head.
    pub fn second(&self) -> Option<Node> {
        self.waypoints.get(1).copied()
    }

    pub fn drop_head(&mut self) -> Option<Node> {
        self.waypoints.pop_front()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Node> {
        self.waypoints.iter()
    }

    /// Owned copy for readers that must not hold a borrow (render/debug).
    pub fn snapshot(&self) -> Vec<Node> {
        self.waypoints.iter().copied().collect()
    }
}

/// Why an agent's path is being recomputed.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ReplanReason {
    FieldInitialized,
    RoundRobin,
    WaypointReached,
    RefreshDistance,
}

/// Request to recompute one enemy's path toward the player.
///
/// Written by the fixed-rate round robin and by the steering systems, consumed
/// by [`process_replan_requests`](super::process_replan_requests). Requests
/// carry the field epoch they were issued under; anything older than the
/// current field is discarded.
#[derive(Message, Debug, Clone, Copy)]
pub struct ReplanRequest {
    pub entity: Entity,
    pub reason: ReplanReason,
    pub epoch: u64,
}
