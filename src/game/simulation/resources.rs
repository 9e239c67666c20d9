/// Resource definitions for the simulation.
///
/// This module contains the fixed-point simulation configuration, the tick and
/// field-epoch counters, and the per-frame motion timestep.

use bevy::prelude::*;
use crate::game::config::InitialConfig;
use crate::game::fixed_math::{FixedNum, FixedVec2};
use crate::game::grid::Node;
use crate::game::pathfinding::Heuristic;

// ============================================================================
// Counters
// ============================================================================

/// Number of low-frequency (fixed) ticks since startup.
#[derive(Resource, Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SimTick(pub u64);

/// Generation of the current field. Bumped on every reset; paths and replan
/// requests stamped with an older value are ignored.
#[derive(Resource, Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct FieldEpoch(pub u64);

/// Timestep used by this frame's steering, already clamped.
#[derive(Resource, Debug, Clone, Copy, PartialEq, Eq)]
pub struct MotionStep(pub FixedNum);

impl Default for MotionStep {
    fn default() -> Self {
        Self(FixedNum::from_num(0.001))
    }
}

// ============================================================================
// Simulation Configuration
// ============================================================================

/// Runtime simulation configuration with fixed-point values.
///
/// Converted once from [`InitialConfig`] (f32/f64, user facing) at startup.
/// `pathfinding_active` is the only field the runtime [`GameConfig`] asset
/// overrides afterwards.
///
/// [`GameConfig`]: crate::game::config::GameConfig
#[derive(Resource, Debug, Clone, PartialEq)]
pub struct SimConfig {
    pub tick_rate_hz: f64,
    /// Path-grid cell edge, in pixels.
    pub cell_size: FixedNum,
    /// Path-grid cells per visual square edge.
    pub cells_per_square: i32,
    pub squares_x: i32,
    pub squares_y: i32,
    pub max_speed: FixedNum,
    /// Momentum change per tick, in px/s.
    pub acceleration: FixedNum,
    pub waypoint_tolerance: FixedNum,
    pub refresh_distance: FixedNum,
    pub max_timestep: FixedNum,
    pub fallback_timestep: FixedNum,
    pub enemy_count: usize,
    pub min_obstacles: usize,
    pub max_obstacles: usize,
    pub min_obstacle_size: i32,
    pub max_obstacle_size: i32,
    pub attempt_limit: usize,
    pub agent_size: FixedNum,
    pub goal_size: FixedNum,
    pub heuristic: Heuristic,
    pub pathfinding_active: bool,
    pub seed: Option<u64>,
}

impl Default for SimConfig {
    fn default() -> Self {
        Self::from_initial(&InitialConfig::default())
    }
}

impl SimConfig {
    pub fn from_initial(config: &InitialConfig) -> Self {
        Self {
            tick_rate_hz: config.tick_rate_hz,
            cell_size: FixedNum::from_num(config.cell_size),
            cells_per_square: config.cells_per_square,
            squares_x: config.squares_x,
            squares_y: config.squares_y,
            max_speed: FixedNum::from_num(config.max_speed),
            acceleration: FixedNum::from_num(config.acceleration),
            waypoint_tolerance: FixedNum::from_num(config.waypoint_tolerance),
            refresh_distance: FixedNum::from_num(config.refresh_distance),
            max_timestep: FixedNum::from_num(config.max_timestep),
            fallback_timestep: FixedNum::from_num(config.fallback_timestep),
            enemy_count: config.enemy_count,
            min_obstacles: config.min_obstacles,
            max_obstacles: config.max_obstacles,
            min_obstacle_size: config.min_obstacle_size,
            max_obstacle_size: config.max_obstacle_size,
            attempt_limit: config.attempt_limit,
            agent_size: FixedNum::from_num(config.agent_size),
            goal_size: FixedNum::from_num(config.goal_size),
            heuristic: config.heuristic,
            pathfinding_active: true,
            seed: config.seed,
        }
    }

    /// Path-grid width in cells.
    pub fn grid_width(&self) -> usize {
        (self.squares_x.max(0) * self.cells_per_square.max(0)) as usize
    }

    /// Path-grid height in cells.
    pub fn grid_height(&self) -> usize {
        (self.squares_y.max(0) * self.cells_per_square.max(0)) as usize
    }

    /// Pixel-space center of a path-grid cell.
    pub fn cell_center(&self, node: Node) -> FixedVec2 {
        let half = FixedNum::from_num(0.5);
        FixedVec2::new(
            (FixedNum::from_num(node.x) + half) * self.cell_size,
            (FixedNum::from_num(node.y) + half) * self.cell_size,
        )
    }

    /// Replace an unusable frame delta with the fallback step.
    pub fn clamp_timestep(&self, dt: FixedNum) -> FixedNum {
        if dt <= FixedNum::ZERO || dt > self.max_timestep {
            self.fallback_timestep
        } else {
            dt
        }
    }
}

// ============================================================================
// Debug
// ============================================================================

/// Debug output toggles, fed from the runtime config.
#[derive(Resource, Debug, Clone)]
pub struct DebugConfig {
    pub show_paths: bool,
    /// Fixed ticks between path dumps.
    pub path_log_interval: u64,
}

impl Default for DebugConfig {
    fn default() -> Self {
        Self {
            show_paths: false,
            path_log_interval: 100,
        }
    }
}
