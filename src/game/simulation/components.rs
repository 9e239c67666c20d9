/// Component definitions for the simulation layer.
///
/// Agents carry [`Kinematics`] (continuous position, momentum, odometer and the
/// derived grid cell) plus a [`Hitbox`]. Role markers decide which steering
/// system drives them.

use bevy::prelude::*;
use crate::game::fixed_math::{FixedNum, FixedVec2, cell_index};
use crate::game::grid::Node;

// ============================================================================
// Role Markers
// ============================================================================

/// Everything a field reset despawns.
#[derive(Component, Debug, Clone, Copy, Default)]
pub struct FieldEntity;

/// The keyboard-driven agent the enemies chase.
#[derive(Component, Debug, Clone, Copy, Default)]
pub struct Player;

/// Path-following pursuer.
#[derive(Component, Debug, Clone, Copy, Default)]
pub struct Enemy;

/// Static target the player is trying to reach.
#[derive(Component, Debug, Clone, Copy, Default)]
pub struct Goal;

// ============================================================================
// Motion
// ============================================================================

/// Signed speed along each axis, in px/s.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Momentum {
    pub horizontal: FixedNum,
    pub vertical: FixedNum,
}

/// Continuous motion state of an agent.
///
/// The pixel position is `anchor + translation`: the anchor is where the agent
/// was spawned and never moves, all motion accumulates in `translation`.
/// `grid_pos` is derived from the position every tick, except right after a
/// waypoint is reached, when the steering system adopts the next waypoint.
#[derive(Component, Debug, Clone, PartialEq, Eq)]
pub struct Kinematics {
    pub anchor: FixedVec2,
    pub translation: FixedVec2,
    pub momentum: Momentum,
    /// Distance travelled since the last replan.
    pub odometer: FixedNum,
    pub grid_pos: Node,
}

impl Kinematics {
    pub fn at_rest(anchor: FixedVec2, cell_size: FixedNum) -> Self {
        let mut kinematics = Self {
            anchor,
            translation: FixedVec2::ZERO,
            momentum: Momentum::default(),
            odometer: FixedNum::ZERO,
            grid_pos: Node::default(),
        };
        kinematics.refresh_grid_pos(cell_size);
        kinematics
    }

    #[inline]
    pub fn position(&self) -> FixedVec2 {
        self.anchor + self.translation
    }

    pub fn refresh_grid_pos(&mut self, cell_size: FixedNum) {
        let position = self.position();
        self.grid_pos = Node::new(cell_index(position.x, cell_size), cell_index(position.y, cell_size));
    }
}

/// Square collision box whose top-left corner sits on the agent's position.
#[derive(Component, Debug, Clone, Copy, PartialEq, Eq)]
pub struct Hitbox {
    pub size: FixedNum,
}

impl Hitbox {
    /// Strict axis-aligned overlap: boxes that only touch do not collide.
    pub fn overlaps(&self, at: FixedVec2, other: &Hitbox, other_at: FixedVec2) -> bool {
        at.x < other_at.x + other.size
            && other_at.x < at.x + self.size
            && at.y < other_at.y + other.size
            && other_at.y < at.y + self.size
    }
}
