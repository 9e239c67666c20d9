/// Round-robin replanning.
///
/// Each low-frequency tick replans exactly one enemy, cycling through them in
/// spawn order, so the cost of pathfinding stays flat no matter how many
/// enemies are on the field.

use bevy::prelude::*;
use crate::game::pathfinding::{ReplanReason, ReplanRequest};
use crate::game::simulation::{FieldEpoch, FixedSet};


/// Enemies in a stable order plus the index of the one due next.
#[derive(Resource, Debug, Clone, Default)]
pub struct AgentScheduler {
    roster: Vec<Entity>,
    cursor: usize,
}

impl AgentScheduler {
    pub fn register(&mut self, entity: Entity) {
        self.roster.push(entity);
    }

    /// Forget every enemy and rewind the cursor.
    pub fn clear(&mut self) {
        self.roster.clear();
        self.cursor = 0;
    }

    pub fn len(&self) -> usize {
        self.roster.len()
    }

    pub fn is_empty(&self) -> bool {
        self.roster.is_empty()
    }

    pub fn cursor(&self) -> usize {
        self.cursor
    }

    pub fn roster(&self) -> &[Entity] {
        &self.roster
    }

    /// The enemy whose turn it is; advances the cursor, wrapping to zero.
    pub fn next_due(&mut self) -> Option<Entity> {
        if self.roster.is_empty() {
            return None;
        }
        // The roster can shrink under the cursor on reset.
        if self.cursor >= self.roster.len() {
            self.cursor = 0;
        }
        let entity = self.roster[self.cursor];
        self.cursor = (self.cursor + 1) % self.roster.len();
        Some(entity)
    }
}

/// Ask for one replan per fixed tick.
pub fn round_robin_replan(
    mut scheduler: ResMut<AgentScheduler>,
    epoch: Res<FieldEpoch>,
    mut replans: MessageWriter<ReplanRequest>,
) {
    let Some(entity) = scheduler.next_due() else {
        return;
    };
    trace!("[SCHEDULER] Replanning {:?} (next cursor {})", entity, scheduler.cursor());
    replans.write(ReplanRequest {
        entity,
        reason: ReplanReason::RoundRobin,
        epoch: epoch.0,
    });
}

pub struct SchedulerPlugin;

impl Plugin for SchedulerPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<AgentScheduler>();
        app.add_systems(FixedUpdate, round_robin_replan.in_set(FixedSet::Schedule));
    }
}
