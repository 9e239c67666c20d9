use bevy::prelude::*;
use pursuit_macros::profile;

use crate::game::fixed_math::FixedNum;
use crate::game::grid::NavGrid;
use crate::game::input::PlayerIntent;
use crate::game::pathfinding::{Path, ReplanReason, ReplanRequest};
use super::components::{Enemy, Kinematics, Player};
use super::resources::{FieldEpoch, MotionStep, SimConfig, SimTick};
use super::steering::{steer_by_intent, steer_towards_waypoint, AxisIntent, SteeringOutcome};

// ============================================================================
// Timing
// ============================================================================

/// Increment the low-frequency tick counter.
pub fn increment_sim_tick(mut tick: ResMut<SimTick>) {
    tick.0 += 1;
}

/// Turn this frame's wall-clock delta into the motion timestep.
pub fn update_motion_step(time: Res<Time>, config: Res<SimConfig>, mut step: ResMut<MotionStep>) {
    let dt = FixedNum::from_num(time.delta_secs_f64());
    step.0 = config.clamp_timestep(dt);
}

// ============================================================================
// Steering
// ============================================================================

pub fn steer_player(
    intent: Res<PlayerIntent>,
    grid: Res<NavGrid>,
    config: Res<SimConfig>,
    step: Res<MotionStep>,
    mut players: Query<&mut Kinematics, With<Player>>,
) {
    let horizontal = AxisIntent::from_keys(intent.left, intent.right);
    let vertical = AxisIntent::from_keys(intent.up, intent.down);

    for mut kinematics in players.iter_mut() {
        steer_by_intent(&mut kinematics, horizontal, vertical, &grid, &config, step.0);
    }
}

/// Advance every enemy along its path and raise replan requests when a
/// waypoint is reached or the refresh distance runs out.
#[profile(2)]
pub fn steer_enemies(
    grid: Res<NavGrid>,
    config: Res<SimConfig>,
    step: Res<MotionStep>,
    epoch: Res<FieldEpoch>,
    mut enemies: Query<(Entity, &mut Kinematics, &Path), (With<Enemy>, Without<Player>)>,
    mut replans: MessageWriter<ReplanRequest>,
) {
    for (entity, mut kinematics, path) in enemies.iter_mut() {
        let waypoint = if path.epoch() == epoch.0 { path.head() } else { None };

        match steer_towards_waypoint(&mut kinematics, waypoint, &grid, &config, step.0) {
            SteeringOutcome::WaypointReached => {
                if let Some(next) = path.second() {
                    kinematics.grid_pos = next;
                }
                replans.write(ReplanRequest {
                    entity,
                    reason: ReplanReason::WaypointReached,
                    epoch: epoch.0,
                });
            }
            SteeringOutcome::RefreshDistanceExceeded => {
                kinematics.odometer = FixedNum::ZERO;
                replans.write(ReplanRequest {
                    entity,
                    reason: ReplanReason::RefreshDistance,
                    epoch: epoch.0,
                });
            }
            SteeringOutcome::Progressing | SteeringOutcome::NoPath => {}
        }
    }
}
