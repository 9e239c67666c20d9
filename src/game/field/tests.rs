use super::*;
use crate::game::grid::Node;
use rand::rngs::StdRng;
use rand::SeedableRng;

#[test]
fn test_obstacle_blocks_inflated_cells() {
    let mut grid = NavGrid::new(40, 40);
    let obstacle = ObstacleRect::new(2, 3, 2);
    assert_eq!(obstacle.blocked_cells(5), (Node::new(6, 11), Node::new(19, 24)));

    obstacle.rasterize(&mut grid, 5);
    assert_eq!(grid.occupancy().blocked_count(), 14 * 14);
    assert!(!grid.is_walkable(6, 11));
    assert!(!grid.is_walkable(19, 24));
    assert!(grid.is_walkable(5, 11));
    assert!(grid.is_walkable(20, 24));
    assert!(grid.is_walkable(6, 25));
}

#[test]
fn test_rasterize_clips_to_grid() {
    let mut grid = NavGrid::new(20, 20);
    ObstacleRect::new(0, 0, 1).rasterize(&mut grid, 5);
    // Cells -4..=4 on each axis, of which 0..=4 exist.
    assert_eq!(grid.occupancy().blocked_count(), 25);
}

#[test]
fn test_obstacle_overlap_is_strict() {
    let a = ObstacleRect::new(5, 5, 3);
    assert!(a.overlaps(&ObstacleRect::new(7, 7, 2)));
    assert!(!a.overlaps(&ObstacleRect::new(8, 5, 2)), "sharing an edge is allowed");
    assert!(!a.overlaps(&ObstacleRect::new(1, 1, 2)));
}

fn assert_valid_layout(config: &SimConfig, layout: &FieldLayout) {
    assert!(layout.obstacles.len() >= config.min_obstacles);
    assert!(layout.obstacles.len() <= config.max_obstacles);
    for (i, a) in layout.obstacles.iter().enumerate() {
        assert!(a.size >= config.min_obstacle_size && a.size <= config.max_obstacle_size);
        assert!(a.square_x >= 1 && a.square_x + a.size < config.squares_x);
        assert!(a.square_y >= 1 && a.square_y + a.size < config.squares_y);
        for b in &layout.obstacles[i + 1..] {
            assert!(!a.overlaps(b), "{:?} overlaps {:?}", a, b);
        }
    }

    let mut grid = NavGrid::new(config.grid_width(), config.grid_height());
    layout.rasterize(&mut grid, config.cells_per_square);
    let spawns = std::iter::once(layout.player)
        .chain(std::iter::once(layout.goal))
        .chain(layout.enemies.iter().copied());
    for spawn in spawns {
        assert!(grid.is_walkable(spawn.x, spawn.y), "spawn {:?} is blocked", spawn);
    }

    let cps = config.cells_per_square;
    assert!(layout.player.y >= (config.squares_y - 12) * cps, "player spawns in the lower band");
    assert!(layout.goal.y < 12 * cps, "goal spawns in the upper band");
    assert!(layout.enemies.iter().all(|e| e.y < 12 * cps));
    assert_eq!(layout.enemies.len(), config.enemy_count);
}

#[test]
fn test_generated_layouts_are_valid() {
    let mut config = SimConfig::default();
    config.enemy_count = 3;
    let mut rng = StdRng::seed_from_u64(42);

    for _ in 0..20 {
        let layout = generate_layout(&config, &mut rng).expect("default field is generable");
        assert_valid_layout(&config, &layout);
    }
}

#[test]
fn test_same_seed_same_layout() {
    let config = SimConfig::default();
    let a = generate_layout(&config, &mut StdRng::seed_from_u64(7)).expect("layout");
    let b = generate_layout(&config, &mut StdRng::seed_from_u64(7)).expect("layout");
    assert_eq!(a, b);
}

#[test]
fn test_tiny_field_is_rejected() {
    let mut config = SimConfig::default();
    config.squares_x = 8;
    let err = generate_layout(&config, &mut StdRng::seed_from_u64(1)).unwrap_err();
    assert!(matches!(err, FieldError::FieldTooSmall { .. }), "got {err}");
}

#[test]
fn test_overfull_field_reports_obstacle_placement() {
    let mut config = SimConfig::default();
    config.min_obstacles = 400;
    config.max_obstacles = 400;
    config.min_obstacle_size = 4;
    config.max_obstacle_size = 4;
    config.attempt_limit = 3;

    let err = generate_layout(&config, &mut StdRng::seed_from_u64(3)).unwrap_err();
    assert!(matches!(err, FieldError::ObstaclePlacement { wanted: 400, .. }), "got {err}");
}

#[test]
fn test_field_rng_seeding_is_reproducible() {
    use rand::Rng;
    let mut a = FieldRng::from_seed(Some(99));
    let mut b = FieldRng::from_seed(Some(99));
    assert_eq!(a.0.random::<u64>(), b.0.random::<u64>());
}
