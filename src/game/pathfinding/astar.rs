use bevy::prelude::*;
use std::cmp::Ordering;
use std::collections::BinaryHeap;

use crate::game::fixed_math::FixedNum;
use crate::game::grid::{NavGrid, Node, Occupancy, SearchScratch};
use super::smoothing::smooth_path;
use super::types::{step_cost, Heuristic};

/// Open-set entry. Lowest `f` first, then lowest `h` (closer to the goal),
/// then coordinates so equal-cost expansions are deterministic.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
struct OpenEntry {
    f: FixedNum,
    h: FixedNum,
    node: Node,
}

impl Ord for OpenEntry {
    fn cmp(&self, other: &Self) -> Ordering {
        other.f.cmp(&self.f)
            .then_with(|| other.h.cmp(&self.h))
            .then_with(|| other.node.cmp(&self.node))
    }
}

impl PartialOrd for OpenEntry {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

/// Plan a smoothed path from `start` to `goal`.
///
/// Returns the waypoints in start→goal order, `[start]` when both are the same
/// cell, and an empty vector when no path exists (goal blocked, out of bounds or
/// unreachable). An empty result is a normal outcome, not an error.
///
/// The start cell itself is not required to be walkable: an agent whose cell
/// was just covered by new geometry can still plan its way out.
pub fn find_path(grid: &mut NavGrid, start: Node, goal: Node, heuristic: Heuristic) -> Vec<Node> {
    let (occupancy, scratch) = grid.split_for_search();

    let (Some(start_idx), Some(goal_idx)) = (occupancy.index_of(start), occupancy.index_of(goal)) else {
        debug!("[PATHFINDING] Endpoint out of bounds: {:?} -> {:?}", start, goal);
        return Vec::new();
    };

    if start == goal {
        return vec![start];
    }

    if !occupancy.is_walkable(goal.x, goal.y) {
        debug!("[PATHFINDING] Goal {:?} is blocked", goal);
        return Vec::new();
    }

    scratch.begin_search(occupancy.len());

    let h_start = heuristic.estimate(start, goal);
    {
        let entry = scratch.entry_mut(start_idx);
        entry.g_cost = FixedNum::ZERO;
        entry.h_cost = h_start;
        entry.f_cost = h_start;
    }

    let mut open_set = BinaryHeap::new();
    open_set.push(OpenEntry { f: h_start, h: h_start, node: start });

    // Each cell is expanded at most once; anything beyond that is a bug.
    let max_expansions = occupancy.len();
    let mut expansions = 0usize;

    while let Some(OpenEntry { node: current, .. }) = open_set.pop() {
        let Some(current_idx) = occupancy.index_of(current) else {
            continue;
        };
        if scratch.get(current_idx).closed {
            // Superseded by a cheaper entry that was already expanded.
            continue;
        }

        if current == goal {
            if expansions > occupancy.len() / 2 {
                debug!("[PATHFINDING] A* expanded {} of {} cells", expansions, occupancy.len());
            }
            let raw = reconstruct_path(occupancy, scratch, goal_idx);
            return smooth_path(occupancy, raw);
        }

        expansions += 1;
        if expansions > max_expansions {
            error!(
                "[PATHFINDING] A* exceeded {} expansions from {:?} to {:?}",
                max_expansions, start, goal
            );
            return Vec::new();
        }

        let current_g = {
            let entry = scratch.entry_mut(current_idx);
            entry.closed = true;
            entry.g_cost
        };

        for neighbor in occupancy.neighbors(current) {
            if !occupancy.is_walkable(neighbor.x, neighbor.y) {
                continue;
            }
            let Some(neighbor_idx) = occupancy.index_of(neighbor) else {
                continue;
            };
            let seen = scratch.get(neighbor_idx);
            if seen.closed {
                continue;
            }

            let tentative_g = current_g + step_cost(current, neighbor);
            // Unseen cells carry an infinite g, so this also covers first visits.
            if tentative_g < seen.g_cost {
                let h = heuristic.estimate(neighbor, goal);
                let entry = scratch.entry_mut(neighbor_idx);
                entry.g_cost = tentative_g;
                entry.h_cost = h;
                entry.f_cost = tentative_g + h;
                entry.parent = Some(current_idx as u32);
                open_set.push(OpenEntry { f: entry.f_cost, h, node: neighbor });
            }
        }
    }

    Vec::new()
}

fn reconstruct_path(occupancy: &Occupancy, scratch: &SearchScratch, goal_idx: usize) -> Vec<Node> {
    let mut path = vec![occupancy.node_at(goal_idx)];
    let mut current = goal_idx;

    while let Some(parent) = scratch.get(current).parent {
        current = parent as usize;
        path.push(occupancy.node_at(current));
    }

    path.reverse();
    path
}
