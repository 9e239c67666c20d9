mod types;
mod astar;
mod smoothing;
mod systems;


// ============================================================================
// PUBLIC API
// ============================================================================

pub use types::{step_cost, orthogonal_cost, diagonal_cost, Heuristic, Path, ReplanReason, ReplanRequest};
pub use astar::find_path;
pub use smoothing::smooth_path;
pub use systems::process_replan_requests;

use bevy::prelude::*;
use crate::game::simulation::SimSet;

pub struct PathfindingPlugin;

impl Plugin for PathfindingPlugin {
    fn build(&self, app: &mut App) {
        app.add_message::<ReplanRequest>();
        // Runs after steering so requests raised this frame are served this frame.
        app.add_systems(Update, systems::process_replan_requests.in_set(SimSet::Planning));
    }
}
