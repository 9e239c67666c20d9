use bevy::prelude::*;
use rustc_hash::FxHashMap;
use std::collections::hash_map::Entry;
use pursuit_macros::profile;

use crate::game::grid::NavGrid;
use crate::game::fixed_math::FixedNum;
use crate::game::simulation::{Enemy, FieldEpoch, Kinematics, Player, SimConfig};
use super::astar::find_path;
use super::types::{Path, ReplanReason, ReplanRequest};

/// Serve pending replan requests: one A* search per enemy per frame, from the
/// enemy's grid cell to the player's.
///
/// Requests from an older field are dropped and duplicates per entity are
/// merged. The fresh path replaces the old one and the enemy's odometer starts
/// over. Its first waypoint is the enemy's grid cell, which is dropped unless a
/// reached waypoint already moved that cell ahead to the next target.
#[profile(2)]
pub fn process_replan_requests(
    mut requests: MessageReader<ReplanRequest>,
    mut grid: ResMut<NavGrid>,
    config: Res<SimConfig>,
    epoch: Res<FieldEpoch>,
    player: Query<&Kinematics, With<Player>>,
    mut enemies: Query<(&mut Kinematics, &mut Path), (With<Enemy>, Without<Player>)>,
) {
    if requests.is_empty() {
        return;
    }

    let start_time = std::time::Instant::now();
    let request_count = requests.len();

    let Ok(player_kinematics) = player.single() else {
        // No player means no field yet (or a reset in flight); nothing to chase.
        requests.clear();
        return;
    };
    let goal = player_kinematics.grid_pos;

    // Entity -> keep the head, in first-request order.
    let mut batch: Vec<Entity> = Vec::with_capacity(request_count);
    let mut keep_head: FxHashMap<Entity, bool> = FxHashMap::default();
    let mut stale = 0usize;

    for request in requests.read() {
        if request.epoch != epoch.0 {
            stale += 1;
            continue;
        }
        let reached = request.reason == ReplanReason::WaypointReached;
        match keep_head.entry(request.entity) {
            Entry::Occupied(mut entry) => *entry.get_mut() |= reached,
            Entry::Vacant(entry) => {
                entry.insert(reached);
                batch.push(request.entity);
            }
        }
    }

    for entity in batch {
        let Ok((mut kinematics, mut path)) = enemies.get_mut(entity) else {
            continue;
        };

        if !config.pathfinding_active {
            *path = Path::new(Vec::new(), epoch.0);
            continue;
        }

        let waypoints = find_path(&mut grid, kinematics.grid_pos, goal, config.heuristic);
        let mut fresh = Path::new(waypoints, epoch.0);
        if !keep_head.get(&entity).copied().unwrap_or(false) {
            fresh.drop_head();
        }

        if fresh.is_empty() && kinematics.grid_pos != goal {
            debug!(
                "[PATHFINDING] No path for {:?} from {:?} to {:?}",
                entity, kinematics.grid_pos, goal
            );
        }

        *path = fresh;
        kinematics.odometer = FixedNum::ZERO;
    }

    if stale > 0 {
        debug!("[PATHFINDING] Dropped {} stale replan requests", stale);
    }

    let total_duration = start_time.elapsed();
    if total_duration.as_millis() > 50 {
        warn!("[PATHFINDING] Slow batch processing: {:?} for {} requests", total_duration, request_count);
    }
}
