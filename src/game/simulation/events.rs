/// Messages exchanged between input, simulation and the field controller.

use bevy::prelude::*;
use crate::game::field::FieldLayout;

// ============================================================================
// Field Lifecycle
// ============================================================================

/// Why a field is being rebuilt.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResetReason {
    Startup,
    Won,
    Lost,
    Manual,
}

/// Request to tear down the current field and build a new one.
///
/// An explicit `layout` is used verbatim; `None` generates one at random.
/// Several requests in the same frame collapse into the last one.
#[derive(Message, Debug, Clone)]
pub struct FieldReset {
    pub layout: Option<FieldLayout>,
    pub reason: ResetReason,
}

impl FieldReset {
    pub fn random(reason: ResetReason) -> Self {
        Self { layout: None, reason }
    }

    pub fn with_layout(layout: FieldLayout, reason: ResetReason) -> Self {
        Self { layout: Some(layout), reason }
    }
}

/// End of a round, as decided by the overlap checks.
#[derive(Message, Debug, Clone, Copy, PartialEq, Eq)]
pub enum RoundOutcome {
    Won,
    Lost,
}
