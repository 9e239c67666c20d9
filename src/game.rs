use bevy::prelude::*;

pub mod config;
pub mod field;
pub mod fixed_math;
pub mod grid;
pub mod input;
pub mod pathfinding;
pub mod scheduler;
pub mod simulation;

use config::GameConfigPlugin;
use field::FieldPlugin;
use input::PlayerInputPlugin;
use pathfinding::PathfindingPlugin;
use scheduler::SchedulerPlugin;
use simulation::{FieldReset, ResetReason, SimulationPlugin};

/// Everything needed to run the pursuit simulation.
///
/// Expects an asset server and (optionally) keyboard input from the host app.
/// Headless hosts and tests that want full control over config and layout add
/// the individual plugins instead and skip [`GameConfigPlugin`].
pub struct GamePlugin;

impl Plugin for GamePlugin {
    fn build(&self, app: &mut App) {
        app.add_plugins((
            SimulationPlugin,
            PathfindingPlugin,
            SchedulerPlugin,
            FieldPlugin,
            PlayerInputPlugin,
            GameConfigPlugin,
        ))
        .add_systems(Startup, request_first_field);
    }
}

fn request_first_field(mut resets: MessageWriter<FieldReset>) {
    info!("Game setup started");
    resets.write(FieldReset::random(ResetReason::Startup));
}
