use super::*;
use crate::game::fixed_math::{FixedNum, FixedVec2};
use crate::game::grid::{NavGrid, Node};

fn config() -> SimConfig {
    SimConfig::default()
}

fn fx(value: f64) -> FixedNum {
    FixedNum::from_num(value)
}

fn agent_at(config: &SimConfig, node: Node) -> Kinematics {
    Kinematics::at_rest(config.cell_center(node), config.cell_size)
}

#[test]
fn test_waypoint_exactly_at_tolerance_is_reached() {
    let config = config();
    let grid = NavGrid::new(40, 40);
    let waypoint = Node::new(10, 10);
    let target = config.cell_center(waypoint);
    let tol = config.waypoint_tolerance;

    let mut kinematics = Kinematics::at_rest(target - FixedVec2::new(tol, -tol), config.cell_size);
    let before = kinematics.clone();

    let outcome = steer_towards_waypoint(&mut kinematics, Some(waypoint), &grid, &config, fx(0.016));
    assert_eq!(outcome, SteeringOutcome::WaypointReached);
    assert_eq!(kinematics.translation, before.translation, "a reached waypoint causes no motion");
}

#[test]
fn test_waypoint_just_outside_tolerance_is_not_reached() {
    let config = config();
    let grid = NavGrid::new(40, 40);
    let waypoint = Node::new(10, 10);
    let target = config.cell_center(waypoint);
    let off = config.waypoint_tolerance + FixedNum::DELTA;

    let mut kinematics = Kinematics::at_rest(target - FixedVec2::new(off, FixedNum::ZERO), config.cell_size);
    let outcome = steer_towards_waypoint(&mut kinematics, Some(waypoint), &grid, &config, fx(0.016));
    assert_eq!(outcome, SteeringOutcome::Progressing);
    // Well within one step, so the agent snapped onto the center.
    assert_eq!(kinematics.position(), target);

    let outcome = steer_towards_waypoint(&mut kinematics, Some(waypoint), &grid, &config, fx(0.016));
    assert_eq!(outcome, SteeringOutcome::WaypointReached);
}

#[test]
fn test_no_waypoint_or_disabled_reports_no_path() {
    let mut config = config();
    let grid = NavGrid::new(40, 40);
    let mut kinematics = agent_at(&config, Node::new(5, 5));
    let before = kinematics.clone();

    assert_eq!(
        steer_towards_waypoint(&mut kinematics, None, &grid, &config, fx(0.016)),
        SteeringOutcome::NoPath
    );

    config.pathfinding_active = false;
    assert_eq!(
        steer_towards_waypoint(&mut kinematics, Some(Node::new(30, 30)), &grid, &config, fx(0.016)),
        SteeringOutcome::NoPath
    );
    assert_eq!(kinematics, before);
}

#[test]
fn test_snap_keeps_momentum_and_counts_distance() {
    let config = config();
    let grid = NavGrid::new(40, 40);
    let waypoint = Node::new(10, 10);
    let target = config.cell_center(waypoint);

    let mut kinematics = Kinematics::at_rest(target - FixedVec2::new(fx(2.0), FixedNum::ZERO), config.cell_size);
    steer_towards_waypoint(&mut kinematics, Some(waypoint), &grid, &config, fx(0.016));

    assert_eq!(kinematics.position(), target);
    assert_eq!(kinematics.momentum, Momentum::default());
    assert_eq!(kinematics.odometer, fx(2.0));
    assert_eq!(kinematics.grid_pos, waypoint);
}

#[test]
fn test_momentum_accelerates_then_clamps() {
    let config = config();
    let grid = NavGrid::new(200, 40);
    let mut kinematics = agent_at(&config, Node::new(1, 10));
    let waypoint = Node::new(190, 10);

    steer_towards_waypoint(&mut kinematics, Some(waypoint), &grid, &config, fx(0.01));
    assert_eq!(kinematics.momentum.horizontal, config.acceleration);
    assert_eq!(kinematics.momentum.vertical, FixedNum::ZERO, "no vertical error, no vertical momentum");
    assert!(kinematics.translation.x > FixedNum::ZERO);
    assert_eq!(kinematics.translation.y, FixedNum::ZERO);

    for _ in 0..20 {
        steer_towards_waypoint(&mut kinematics, Some(waypoint), &grid, &config, fx(0.01));
    }
    assert_eq!(kinematics.momentum.horizontal, config.max_speed);
}

#[test]
fn test_momentum_decays_on_aligned_axis() {
    let config = config();
    let grid = NavGrid::new(200, 40);
    let mut kinematics = agent_at(&config, Node::new(1, 10));
    kinematics.momentum.vertical = fx(60.0);

    steer_towards_waypoint(&mut kinematics, Some(Node::new(190, 10)), &grid, &config, fx(0.01));
    assert_eq!(kinematics.momentum.vertical, fx(35.0));
}

#[test]
fn test_collision_gate_is_per_axis() {
    let config = config();
    let mut grid = NavGrid::new(40, 40);
    grid.set_obstacle(11, 10, true);

    let mut kinematics = agent_at(&config, Node::new(10, 10));
    kinematics.momentum.horizontal = config.max_speed;
    kinematics.momentum.vertical = config.max_speed;

    // 200 px/s * 0.025 s = 5 px: exactly one cell on each axis.
    let outcome = steer_towards_waypoint(&mut kinematics, Some(Node::new(20, 15)), &grid, &config, fx(0.025));
    assert_eq!(outcome, SteeringOutcome::Progressing);
    assert_eq!(kinematics.translation.x, FixedNum::ZERO, "x move into (11,10) is gated");
    assert!(kinematics.translation.y > FixedNum::ZERO, "y move into (10,11) is free");
    assert!(
        (kinematics.odometer - kinematics.translation.y).abs() <= fx(0.01),
        "only the applied displacement counts"
    );
    assert_eq!(kinematics.grid_pos, Node::new(10, 11));
}

#[test]
fn test_refresh_distance_exceeded() {
    let config = config();
    let grid = NavGrid::new(200, 40);
    let mut kinematics = agent_at(&config, Node::new(1, 10));
    kinematics.odometer = config.refresh_distance - fx(0.1);

    let outcome = steer_towards_waypoint(&mut kinematics, Some(Node::new(190, 10)), &grid, &config, fx(0.1));
    assert_eq!(outcome, SteeringOutcome::RefreshDistanceExceeded);
}

#[test]
fn test_displacement_never_overshoots_on_an_axis() {
    let config = config();
    let grid = NavGrid::new(200, 200);
    let waypoint = Node::new(100, 11);
    let mut kinematics = agent_at(&config, Node::new(10, 10));
    kinematics.momentum.vertical = config.max_speed;

    steer_towards_waypoint(&mut kinematics, Some(waypoint), &grid, &config, fx(0.05));
    // Vertical error was one cell (5 px); momentum alone would have carried 10 px.
    assert_eq!(kinematics.position().y, config.cell_center(waypoint).y);
}

#[test]
fn test_player_opposing_or_idle_keys_stop() {
    let config = config();
    let grid = NavGrid::new(40, 40);
    let mut kinematics = agent_at(&config, Node::new(10, 10));
    kinematics.momentum.horizontal = fx(100.0);
    kinematics.momentum.vertical = fx(-100.0);

    steer_by_intent(
        &mut kinematics,
        AxisIntent::from_keys(true, true),
        AxisIntent::Idle,
        &grid,
        &config,
        fx(0.016),
    );
    assert_eq!(kinematics.momentum, Momentum::default());
    assert_eq!(kinematics.translation, FixedVec2::ZERO);
}

#[test]
fn test_player_accelerates_with_intent() {
    let config = config();
    let grid = NavGrid::new(40, 40);
    let mut kinematics = agent_at(&config, Node::new(10, 10));

    steer_by_intent(&mut kinematics, AxisIntent::Positive, AxisIntent::Negative, &grid, &config, fx(0.01));
    assert_eq!(kinematics.momentum.horizontal, config.acceleration);
    assert_eq!(kinematics.momentum.vertical, -config.acceleration);
    assert!(kinematics.translation.x > FixedNum::ZERO);
    assert!(kinematics.translation.y < FixedNum::ZERO);
}

#[test]
fn test_player_blocked_axis_loses_momentum() {
    let config = config();
    let mut grid = NavGrid::new(40, 40);
    grid.set_obstacle(9, 10, true);
    let mut kinematics = agent_at(&config, Node::new(10, 10));
    kinematics.momentum.horizontal = -config.max_speed;

    steer_by_intent(&mut kinematics, AxisIntent::Negative, AxisIntent::Idle, &grid, &config, fx(0.025));
    assert_eq!(kinematics.translation.x, FixedNum::ZERO);
    assert_eq!(kinematics.momentum.horizontal, FixedNum::ZERO);
}

#[test]
fn test_player_cannot_leave_the_grid() {
    let config = config();
    let grid = NavGrid::new(40, 40);
    let mut kinematics = agent_at(&config, Node::new(0, 0));
    kinematics.momentum.vertical = -config.max_speed;

    steer_by_intent(&mut kinematics, AxisIntent::Idle, AxisIntent::Negative, &grid, &config, fx(0.025));
    assert_eq!(kinematics.grid_pos, Node::new(0, 0));
}

#[test]
fn test_axis_intent_from_keys() {
    assert_eq!(AxisIntent::from_keys(false, false), AxisIntent::Idle);
    assert_eq!(AxisIntent::from_keys(true, true), AxisIntent::Idle);
    assert_eq!(AxisIntent::from_keys(true, false), AxisIntent::Negative);
    assert_eq!(AxisIntent::from_keys(false, true), AxisIntent::Positive);
}

#[test]
fn test_clamp_timestep() {
    let config = config();
    assert_eq!(config.clamp_timestep(FixedNum::ZERO), config.fallback_timestep);
    assert_eq!(config.clamp_timestep(fx(-0.5)), config.fallback_timestep);
    assert_eq!(config.clamp_timestep(fx(2.0)), config.fallback_timestep);
    assert_eq!(config.clamp_timestep(fx(0.016)), fx(0.016));
    assert_eq!(config.clamp_timestep(config.max_timestep), config.max_timestep);
}

#[test]
fn test_grid_pos_floors_negative_positions() {
    let config = config();
    let kinematics = Kinematics::at_rest(FixedVec2::new(fx(-0.1), fx(7.0)), config.cell_size);
    assert_eq!(kinematics.grid_pos, Node::new(-1, 1));
}

#[test]
fn test_hitbox_overlap_is_strict() {
    let a = Hitbox { size: fx(19.0) };
    let b = Hitbox { size: fx(19.0) };
    let origin = FixedVec2::ZERO;
    assert!(a.overlaps(origin, &b, FixedVec2::new(fx(18.0), fx(18.0))));
    assert!(!a.overlaps(origin, &b, FixedVec2::new(fx(19.0), FixedNum::ZERO)), "touching edges");
    assert!(!a.overlaps(origin, &b, FixedVec2::new(fx(5.0), fx(-30.0))));
}

#[test]
fn test_default_config_grid_dimensions() {
    let config = config();
    assert_eq!(config.grid_width(), 200);
    assert_eq!(config.grid_height(), 200);
    assert_eq!(config.cell_center(Node::new(0, 0)), FixedVec2::new(fx(2.5), fx(2.5)));
}
