/// Headless path dump: the text stand-in for path visualization.

use bevy::prelude::*;
use crate::game::pathfinding::Path;
use super::components::{Enemy, Kinematics};
use super::resources::{DebugConfig, FieldEpoch, SimTick};

/// Log every enemy's waypoints each `path_log_interval` fixed ticks while
/// `show_paths` is on.
pub fn log_agent_paths(
    debug_config: Res<DebugConfig>,
    tick: Res<SimTick>,
    enemies: Query<(Entity, &Kinematics, &Path), With<Enemy>>,
) {
    if !debug_config.show_paths || debug_config.path_log_interval == 0 {
        return;
    }
    if tick.0 % debug_config.path_log_interval != 0 {
        return;
    }

    for (entity, kinematics, path) in enemies.iter() {
        debug!(
            "[PATHS] {:?} at {:?} (odometer {:.1}): {} waypoints {:?}",
            entity,
            kinematics.grid_pos,
            kinematics.odometer.to_num::<f32>(),
            path.len(),
            path.snapshot()
        );
    }
}

/// Periodic one-line status (perf builds only).
pub fn log_sim_status(
    #[allow(unused_variables)] tick: Res<SimTick>,
    #[allow(unused_variables)] epoch: Res<FieldEpoch>,
    #[allow(unused_variables)] enemies: Query<&Path, With<Enemy>>,
) {
    use crate::profile_log;

    profile_log!(tick, "[SIM STATUS] Tick: {} | Field: {} | Enemies: {} | Pathless: {}",
          tick.0, epoch.0, enemies.iter().len(), enemies.iter().filter(|p| p.is_empty()).count());
}
