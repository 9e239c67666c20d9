/// Keyboard → player intent.

use bevy::prelude::*;
use crate::game::simulation::{FieldReset, ResetReason, SimSet};

/// Direction keys held this frame. Consumed by the player steering system.
#[derive(Resource, Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PlayerIntent {
    pub up: bool,
    pub down: bool,
    pub left: bool,
    pub right: bool,
}

/// Keys the input system listens to, overridable from the runtime config.
#[derive(Resource, Debug, Clone, PartialEq, Eq)]
pub struct KeyBindings {
    pub up: KeyCode,
    pub down: KeyCode,
    pub left: KeyCode,
    pub right: KeyCode,
    pub reset: KeyCode,
}

impl Default for KeyBindings {
    fn default() -> Self {
        Self {
            up: KeyCode::ArrowUp,
            down: KeyCode::ArrowDown,
            left: KeyCode::ArrowLeft,
            right: KeyCode::ArrowRight,
            reset: KeyCode::Space,
        }
    }
}

/// Sample the keyboard once per motion tick. Without a keyboard resource
/// (headless runs, tests) the intent is left as it is.
pub fn read_keyboard_intent(
    keyboard: Option<Res<ButtonInput<KeyCode>>>,
    bindings: Res<KeyBindings>,
    mut intent: ResMut<PlayerIntent>,
    mut resets: MessageWriter<FieldReset>,
) {
    let Some(keyboard) = keyboard else {
        return;
    };

    *intent = PlayerIntent {
        up: keyboard.pressed(bindings.up),
        down: keyboard.pressed(bindings.down),
        left: keyboard.pressed(bindings.left),
        right: keyboard.pressed(bindings.right),
    };

    if keyboard.just_pressed(bindings.reset) {
        info!("[FIELD] Manual reset requested");
        resets.write(FieldReset::random(ResetReason::Manual));
    }
}

pub struct PlayerInputPlugin;

impl Plugin for PlayerInputPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<PlayerIntent>();
        app.init_resource::<KeyBindings>();
        app.add_systems(Update, read_keyboard_intent.in_set(SimSet::Input));
    }
}
