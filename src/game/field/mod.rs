/// Field lifecycle: layout generation, the reset transaction and the
/// win/lose controller.
///
/// A reset runs in `PreUpdate`, so it completes before either the motion tick
/// (`Update`) or the low-frequency tick (`FixedUpdate`) of the same frame
/// starts. Nothing steers or plans against a half-built field.

use bevy::prelude::*;
use rand::rngs::StdRng;
use rand::SeedableRng;

use crate::game::grid::NavGrid;
use crate::game::pathfinding::{Path, ReplanReason, ReplanRequest};
use crate::game::scheduler::AgentScheduler;
use crate::game::simulation::{
    Enemy, FieldEntity, FieldEpoch, FieldReset, Goal, Hitbox, Kinematics, Player, SimConfig, SimSet,
};

mod layout;
mod generation;
mod outcome;

#[cfg(test)]
mod tests;

pub use layout::{FieldLayout, ObstacleRect};
pub use generation::{generate_layout, FieldError};
pub use outcome::{detect_round_outcome, Scoreboard};

/// RNG behind random layouts.
#[derive(Resource)]
pub struct FieldRng(pub StdRng);

impl FieldRng {
    pub fn from_seed(seed: Option<u64>) -> Self {
        match seed {
            Some(seed) => Self(StdRng::seed_from_u64(seed)),
            None => Self(StdRng::from_os_rng()),
        }
    }
}

impl Default for FieldRng {
    fn default() -> Self {
        Self::from_seed(None)
    }
}

pub struct FieldPlugin;

impl Plugin for FieldPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<FieldRng>();
        app.init_resource::<Scoreboard>();
        app.add_systems(PreUpdate, apply_field_resets);
        app.add_systems(Update, detect_round_outcome.in_set(SimSet::Outcome));
    }
}

/// Tear down the current field and build the requested one.
///
/// Despawns every agent and the goal, clears the grid, rasterises the new
/// obstacles, bumps the field epoch, spawns the new agents, rebuilds the
/// scheduler roster and queues an initial replan for each enemy. Several
/// requests in one frame collapse into the last.
pub fn apply_field_resets(
    mut commands: Commands,
    mut resets: MessageReader<FieldReset>,
    mut grid: ResMut<NavGrid>,
    config: Res<SimConfig>,
    mut rng: ResMut<FieldRng>,
    mut epoch: ResMut<FieldEpoch>,
    mut scheduler: ResMut<AgentScheduler>,
    mut replans: MessageWriter<ReplanRequest>,
    field_entities: Query<Entity, With<FieldEntity>>,
) {
    let Some(request) = resets.read().last().cloned() else {
        return;
    };
    let start_time = std::time::Instant::now();

    for entity in field_entities.iter() {
        commands.entity(entity).despawn();
    }
    scheduler.clear();

    if grid.width() != config.grid_width() || grid.height() != config.grid_height() {
        *grid = NavGrid::new(config.grid_width(), config.grid_height());
    } else {
        grid.clear();
    }
    epoch.0 += 1;

    let layout = match request.layout {
        Some(layout) => layout,
        None => match generate_layout(&config, &mut rng.0) {
            Ok(layout) => layout,
            Err(err) => {
                error!("[FIELD] Reset #{} ({:?}) failed: {}. Field left empty.", epoch.0, request.reason, err);
                return;
            }
        },
    };

    layout.rasterize(&mut grid, config.cells_per_square);

    let agent_box = Hitbox { size: config.agent_size };
    commands.spawn((
        FieldEntity,
        Player,
        Kinematics::at_rest(config.cell_center(layout.player), config.cell_size),
        agent_box,
    ));
    commands.spawn((
        FieldEntity,
        Goal,
        Kinematics::at_rest(config.cell_center(layout.goal), config.cell_size),
        Hitbox { size: config.goal_size },
    ));

    for &cell in &layout.enemies {
        let entity = commands
            .spawn((
                FieldEntity,
                Enemy,
                Kinematics::at_rest(config.cell_center(cell), config.cell_size),
                agent_box,
                Path::default(),
            ))
            .id();
        scheduler.register(entity);
        replans.write(ReplanRequest {
            entity,
            reason: ReplanReason::FieldInitialized,
            epoch: epoch.0,
        });
    }

    info!(
        "[FIELD] Reset #{} ({:?}): {} obstacles, {} blocked cells, {} enemies in {:?}",
        epoch.0,
        request.reason,
        layout.obstacles.len(),
        grid.occupancy().blocked_count(),
        layout.enemies.len(),
        start_time.elapsed()
    );
}
