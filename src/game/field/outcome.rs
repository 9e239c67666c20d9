use bevy::prelude::*;

use crate::game::simulation::{
    Enemy, FieldReset, Goal, Hitbox, Kinematics, Player, ResetReason, RoundOutcome,
};

/// Rounds won and lost since startup.
#[derive(Resource, Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Scoreboard {
    pub wins: u32,
    pub losses: u32,
}

/// Decide the round from hitbox overlaps: touching an enemy loses, reaching
/// the goal wins. Being caught takes precedence.
pub fn detect_round_outcome(
    players: Query<(&Kinematics, &Hitbox), With<Player>>,
    enemies: Query<(&Kinematics, &Hitbox), With<Enemy>>,
    goals: Query<(&Kinematics, &Hitbox), With<Goal>>,
    mut scoreboard: ResMut<Scoreboard>,
    mut outcomes: MessageWriter<RoundOutcome>,
    mut resets: MessageWriter<FieldReset>,
) {
    let Ok((player, player_box)) = players.single() else {
        return;
    };
    let at = player.position();
    let touches = |kinematics: &Kinematics, hitbox: &Hitbox| {
        player_box.overlaps(at, hitbox, kinematics.position())
    };

    let outcome = if enemies.iter().any(|(k, h)| touches(k, h)) {
        RoundOutcome::Lost
    } else if goals.iter().any(|(k, h)| touches(k, h)) {
        RoundOutcome::Won
    } else {
        return;
    };

    let reason = match outcome {
        RoundOutcome::Won => {
            scoreboard.wins += 1;
            ResetReason::Won
        }
        RoundOutcome::Lost => {
            scoreboard.losses += 1;
            ResetReason::Lost
        }
    };
    info!(
        "[FIELD] Round {:?}: {} wins / {} losses",
        outcome, scoreboard.wins, scoreboard.losses
    );

    outcomes.write(outcome);
    resets.write(FieldReset::random(reason));
}
