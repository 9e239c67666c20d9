use bevy::prelude::*;
use rand::Rng;
use thiserror::Error;

use crate::game::grid::Node;
use crate::game::simulation::SimConfig;
use super::layout::{FieldLayout, ObstacleRect};

/// Field generation failures. The only fatal conditions in the simulation;
/// the reset system logs them and leaves the field empty.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FieldError {
    #[error("a {squares_x}x{squares_y} square field has no room for {what}")]
    FieldTooSmall {
        squares_x: i32,
        squares_y: i32,
        what: &'static str,
    },
    #[error("placed only {placed} of {wanted} obstacles")]
    ObstaclePlacement { wanted: usize, placed: usize },
    #[error("no free spot for the {role} after {attempts} attempts")]
    SpawnPlacement { role: &'static str, attempts: usize },
}

/// Which band of the field a spawn lands in.
#[derive(Clone, Copy, Debug)]
enum Band {
    /// Near the bottom edge: the player.
    Lower,
    /// Near the top edge: the goal and the enemies.
    Upper,
}

/// Margin (in squares) kept between spawns and the side walls.
const SIDE_MARGIN: i32 = 5;
/// Depth (in squares) of the spawn bands.
const BAND_DEPTH: i32 = 10;
/// Gap (in squares) between a band and its edge.
const BAND_INSET: i32 = 2;

/// Generate a random layout, retrying the whole field up to `attempt_limit`
/// times.
pub fn generate_layout<R: Rng>(config: &SimConfig, rng: &mut R) -> Result<FieldLayout, FieldError> {
    validate_dimensions(config)?;

    let attempts = config.attempt_limit.max(1);
    let mut last_error = None;
    for attempt in 1..=attempts {
        match try_generate(config, rng) {
            Ok(layout) => {
                if attempt > 1 {
                    debug!("[FIELD] Layout generated on attempt {}", attempt);
                }
                return Ok(layout);
            }
            Err(err) => {
                debug!("[FIELD] Attempt {}/{} failed: {}", attempt, attempts, err);
                last_error = Some(err);
            }
        }
    }

    Err(last_error.unwrap_or(FieldError::ObstaclePlacement {
        wanted: config.max_obstacles,
        placed: 0,
    }))
}

fn validate_dimensions(config: &SimConfig) -> Result<(), FieldError> {
    let too_small = |what| FieldError::FieldTooSmall {
        squares_x: config.squares_x,
        squares_y: config.squares_y,
        what,
    };

    if config.cells_per_square < 1 {
        return Err(too_small("any cells"));
    }
    if config.squares_x - 2 * SIDE_MARGIN < 1 || config.squares_y < 2 * (BAND_DEPTH + BAND_INSET) {
        return Err(too_small("the spawn bands"));
    }
    if config.min_obstacle_size < 1 || config.min_obstacle_size > config.max_obstacle_size {
        return Err(too_small("obstacles of the configured size"));
    }
    let largest = config.max_obstacle_size;
    if config.squares_x - largest - 1 <= 1 || config.squares_y - largest - 1 <= 1 {
        return Err(too_small("the largest obstacle"));
    }
    Ok(())
}

fn try_generate<R: Rng>(config: &SimConfig, rng: &mut R) -> Result<FieldLayout, FieldError> {
    let (lo, hi) = (config.min_obstacles.min(config.max_obstacles), config.max_obstacles);
    let wanted = rng.random_range(lo..=hi);
    let obstacles = place_obstacles(config, wanted, rng)?;

    let player = place_spawn(config, &obstacles, Band::Lower, "player", rng)?;
    let goal = place_spawn(config, &obstacles, Band::Upper, "goal", rng)?;
    let enemies = (0..config.enemy_count)
        .map(|_| place_spawn(config, &obstacles, Band::Upper, "enemy", rng))
        .collect::<Result<Vec<_>, _>>()?;

    Ok(FieldLayout { obstacles, player, goal, enemies })
}

fn place_obstacles<R: Rng>(
    config: &SimConfig,
    wanted: usize,
    rng: &mut R,
) -> Result<Vec<ObstacleRect>, FieldError> {
    let mut obstacles: Vec<ObstacleRect> = Vec::with_capacity(wanted);

    while obstacles.len() < wanted {
        let placed = (0..config.attempt_limit.max(1)).find_map(|_| {
            let size = rng.random_range(config.min_obstacle_size..=config.max_obstacle_size);
            // One free square stays between an obstacle and every wall.
            let candidate = ObstacleRect::new(
                rng.random_range(1..config.squares_x - size - 1),
                rng.random_range(1..config.squares_y - size - 1),
                size,
            );
            (!obstacles.iter().any(|o| o.overlaps(&candidate))).then_some(candidate)
        });

        match placed {
            Some(obstacle) => obstacles.push(obstacle),
            None => {
                return Err(FieldError::ObstaclePlacement {
                    wanted,
                    placed: obstacles.len(),
                })
            }
        }
    }

    Ok(obstacles)
}

fn place_spawn<R: Rng>(
    config: &SimConfig,
    obstacles: &[ObstacleRect],
    band: Band,
    role: &'static str,
    rng: &mut R,
) -> Result<Node, FieldError> {
    let rows = match band {
        Band::Lower => (config.squares_y - BAND_DEPTH - BAND_INSET)..(config.squares_y - BAND_INSET),
        Band::Upper => BAND_INSET..(BAND_INSET + BAND_DEPTH),
    };
    let attempts = config.attempt_limit.max(1);

    for _ in 0..attempts {
        let sx = rng.random_range(SIDE_MARGIN..config.squares_x - SIDE_MARGIN);
        let sy = rng.random_range(rows.clone());
        // Reject if a 3×3-square neighborhood around the spawn touches an obstacle.
        if obstacles.iter().any(|o| o.overlaps_squares(sx - 1, sy - 1, 3, 3)) {
            continue;
        }
        return Ok(Node::new(sx * config.cells_per_square, sy * config.cells_per_square));
    }

    Err(FieldError::SpawnPlacement { role, attempts })
}
