/// Simulation layer: agent state and motion.
///
/// This module is organized into:
/// - **components**: agent markers, kinematics and hitboxes
/// - **resources**: fixed-point config, tick/epoch counters, motion timestep
/// - **events**: field reset and round outcome messages
/// - **steering**: pure momentum steering shared by player and enemies
/// - **systems**: ECS glue for timing and steering
/// - **debug**: headless path dumps

use bevy::prelude::*;
use crate::game::grid::NavGrid;
use crate::game::input::PlayerIntent;

pub mod components;
pub mod resources;
pub mod events;
pub mod steering;
pub mod systems;
pub mod debug;

#[cfg(test)]
mod tests;

pub use components::*;
pub use resources::*;
pub use events::*;
pub use steering::{steer_towards_waypoint, steer_by_intent, SteeringOutcome, AxisIntent};

/// Ordering of the per-frame (motion tick) work.
#[derive(SystemSet, Debug, Hash, PartialEq, Eq, Clone)]
pub enum SimSet {
    Input,          // Keyboard intent, timestep
    PlayerMotion,   // Player steering
    Steering,       // Enemy steering, replan triggers
    Planning,       // Serving replan requests
    Outcome,        // Win/lose checks
}

/// Low-frequency (fixed tick) work.
#[derive(SystemSet, Debug, Hash, PartialEq, Eq, Clone)]
pub enum FixedSet {
    Tick,
    Schedule,
    Debug,
}

pub struct SimulationPlugin;

impl Plugin for SimulationPlugin {
    fn build(&self, app: &mut App) {
        let config = SimConfig::default();
        app.insert_resource(Time::<Fixed>::from_hz(config.tick_rate_hz));
        app.insert_resource(NavGrid::new(config.grid_width(), config.grid_height()));
        app.insert_resource(config);

        app.init_resource::<SimTick>();
        app.init_resource::<FieldEpoch>();
        app.init_resource::<MotionStep>();
        app.init_resource::<DebugConfig>();
        app.init_resource::<PlayerIntent>();

        app.add_message::<FieldReset>();
        app.add_message::<RoundOutcome>();

        app.configure_sets(Update, (
            SimSet::Input,
            SimSet::PlayerMotion,
            SimSet::Steering,
            SimSet::Planning,
            SimSet::Outcome,
        ).chain());

        app.configure_sets(FixedUpdate, (
            FixedSet::Tick,
            FixedSet::Schedule,
            FixedSet::Debug,
        ).chain());

        app.add_systems(Update, (
            systems::update_motion_step.in_set(SimSet::Input),
            systems::steer_player.in_set(SimSet::PlayerMotion),
            systems::steer_enemies.in_set(SimSet::Steering),
        ));

        app.add_systems(FixedUpdate, (
            systems::increment_sim_tick.in_set(FixedSet::Tick),
            (debug::log_agent_paths, debug::log_sim_status).in_set(FixedSet::Debug),
        ));
    }
}
