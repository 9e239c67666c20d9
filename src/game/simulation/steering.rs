/// Momentum steering shared by enemies (waypoint following) and the player
/// (keyboard intent).
///
/// Everything here is a pure function over [`Kinematics`] so it can be driven
/// by the ECS systems or directly from tests.

use crate::game::fixed_math::{FixedNum, FixedVec2, cell_index, decay_toward_zero};
use crate::game::grid::{NavGrid, Node};
use super::components::Kinematics;
use super::resources::SimConfig;

/// Result of one enemy steering step.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SteeringOutcome {
    /// Nothing to follow: empty or stale path, or pathfinding switched off.
    NoPath,
    Progressing,
    WaypointReached,
    /// Travelled at least the refresh distance without reaching the waypoint.
    RefreshDistanceExceeded,
}

/// Signed direction on one axis, as requested by the player.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AxisIntent {
    Idle,
    Negative,
    Positive,
}

impl AxisIntent {
    /// Opposing keys cancel out.
    pub fn from_keys(negative: bool, positive: bool) -> Self {
        match (negative, positive) {
            (true, false) => AxisIntent::Negative,
            (false, true) => AxisIntent::Positive,
            _ => AxisIntent::Idle,
        }
    }

    fn sign(self) -> FixedNum {
        match self {
            AxisIntent::Idle => FixedNum::ZERO,
            AxisIntent::Negative => -FixedNum::ONE,
            AxisIntent::Positive => FixedNum::ONE,
        }
    }
}

// ============================================================================
// Primitives
// ============================================================================

/// Step `momentum` by one acceleration step toward the sign of `direction`,
/// clamped to ±max_speed. A zero direction decays momentum toward zero.
pub fn accelerate_toward(momentum: FixedNum, direction: FixedNum, config: &SimConfig) -> FixedNum {
    if direction > FixedNum::ZERO {
        (momentum + config.acceleration).min(config.max_speed)
    } else if direction < FixedNum::ZERO {
        (momentum - config.acceleration).max(-config.max_speed)
    } else {
        decay_toward_zero(momentum, config.acceleration)
    }
}

/// Cap a displacement so it does not carry past `remaining` on the same axis.
fn cap_displacement(proposed: FixedNum, remaining: FixedNum) -> FixedNum {
    if remaining == FixedNum::ZERO {
        return FixedNum::ZERO;
    }
    let same_direction = (proposed > FixedNum::ZERO) == (remaining > FixedNum::ZERO);
    if same_direction && proposed.abs() > remaining.abs() {
        remaining
    } else {
        proposed
    }
}

/// Apply `displacement` axis by axis, each only if the cell reached by that
/// axis's move alone is walkable. Returns what was actually applied.
pub fn gated_move(
    kinematics: &mut Kinematics,
    displacement: FixedVec2,
    grid: &NavGrid,
    cell_size: FixedNum,
) -> FixedVec2 {
    let position = kinematics.position();
    let mut applied = FixedVec2::ZERO;

    if displacement.x != FixedNum::ZERO {
        let cx = cell_index(position.x + displacement.x, cell_size);
        let cy = cell_index(position.y, cell_size);
        if grid.is_walkable(cx, cy) {
            applied.x = displacement.x;
        }
    }
    if displacement.y != FixedNum::ZERO {
        let cx = cell_index(position.x, cell_size);
        let cy = cell_index(position.y + displacement.y, cell_size);
        if grid.is_walkable(cx, cy) {
            applied.y = displacement.y;
        }
    }

    kinematics.translation += applied;
    applied
}

// ============================================================================
// Enemy Steering
// ============================================================================

/// Steer toward the center of `waypoint` for one motion tick.
///
/// `waypoint` is the head of a current-epoch path, or `None`. The caller reacts
/// to the outcome (adopting the next waypoint, requesting a replan).
pub fn steer_towards_waypoint(
    kinematics: &mut Kinematics,
    waypoint: Option<Node>,
    grid: &NavGrid,
    config: &SimConfig,
    dt: FixedNum,
) -> SteeringOutcome {
    let Some(waypoint) = waypoint.filter(|_| config.pathfinding_active) else {
        return SteeringOutcome::NoPath;
    };

    let target = config.cell_center(waypoint);
    let delta = target - kinematics.position();
    let reached = delta.within_per_axis(config.waypoint_tolerance);

    if !reached {
        move_towards(kinematics, delta, grid, config, dt);
    }
    kinematics.refresh_grid_pos(config.cell_size);

    if reached {
        SteeringOutcome::WaypointReached
    } else if kinematics.odometer >= config.refresh_distance {
        SteeringOutcome::RefreshDistanceExceeded
    } else {
        SteeringOutcome::Progressing
    }
}

fn move_towards(kinematics: &mut Kinematics, delta: FixedVec2, grid: &NavGrid, config: &SimConfig, dt: FixedNum) {
    let distance = delta.length();

    // Close enough to land this tick: snap without touching momentum.
    if distance <= config.max_speed * dt {
        kinematics.translation += delta;
        kinematics.odometer += distance;
        return;
    }

    let momentum = &mut kinematics.momentum;
    momentum.horizontal = accelerate_toward(momentum.horizontal, delta.x, config);
    momentum.vertical = accelerate_toward(momentum.vertical, delta.y, config);

    let proposed = FixedVec2::new(
        cap_displacement(momentum.horizontal * dt, delta.x),
        cap_displacement(momentum.vertical * dt, delta.y),
    );
    let applied = gated_move(kinematics, proposed, grid, config.cell_size);
    kinematics.odometer += applied.length();
}

// ============================================================================
// Player Steering
// ============================================================================

/// Move the player for one motion tick from the held direction keys.
///
/// An idle axis stops dead; a blocked axis loses its momentum.
pub fn steer_by_intent(
    kinematics: &mut Kinematics,
    horizontal: AxisIntent,
    vertical: AxisIntent,
    grid: &NavGrid,
    config: &SimConfig,
    dt: FixedNum,
) {
    let momentum = &mut kinematics.momentum;
    momentum.horizontal = match horizontal {
        AxisIntent::Idle => FixedNum::ZERO,
        intent => accelerate_toward(momentum.horizontal, intent.sign(), config),
    };
    momentum.vertical = match vertical {
        AxisIntent::Idle => FixedNum::ZERO,
        intent => accelerate_toward(momentum.vertical, intent.sign(), config),
    };

    let proposed = FixedVec2::new(momentum.horizontal * dt, momentum.vertical * dt);
    let applied = gated_move(kinematics, proposed, grid, config.cell_size);

    if applied.x != proposed.x {
        kinematics.momentum.horizontal = FixedNum::ZERO;
    }
    if applied.y != proposed.y {
        kinematics.momentum.vertical = FixedNum::ZERO;
    }
    kinematics.refresh_grid_pos(config.cell_size);
}
