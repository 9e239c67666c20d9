use bevy::prelude::*;
use bevy::time::TimeUpdateStrategy;
use pursuit::game::field::{FieldLayout, FieldPlugin, ObstacleRect, Scoreboard};
use pursuit::game::fixed_math::FixedNum;
use pursuit::game::grid::Node;
use pursuit::game::input::PlayerIntent;
use pursuit::game::pathfinding::{Path, PathfindingPlugin};
use pursuit::game::scheduler::SchedulerPlugin;
use pursuit::game::simulation::{
    Enemy, FieldEpoch, FieldReset, Kinematics, Player, ResetReason, SimConfig, SimulationPlugin,
};
use std::time::Duration;

/// 12×12 visual squares: a 60×60 cell grid. Too small for random generation,
/// so every field in these tests comes from an explicit layout.
fn small_config() -> SimConfig {
    let mut config = SimConfig::default();
    config.squares_x = 12;
    config.squares_y = 12;
    config
}

fn build_app() -> App {
    let mut app = App::new();
    app.add_plugins(MinimalPlugins);
    app.insert_resource(TimeUpdateStrategy::ManualDuration(Duration::from_millis(10)));
    app.add_plugins((SimulationPlugin, PathfindingPlugin, SchedulerPlugin, FieldPlugin));
    app.insert_resource(small_config());
    app
}

fn start_field(app: &mut App, layout: FieldLayout) {
    app.world_mut().write_message(FieldReset::with_layout(layout, ResetReason::Startup));
    app.update();
}

fn enemies(app: &mut App) -> Vec<(Entity, Kinematics, Path)> {
    let mut query = app.world_mut().query_filtered::<(Entity, &Kinematics, &Path), With<Enemy>>();
    query.iter(app.world()).map(|(e, k, p)| (e, k.clone(), p.clone())).collect()
}

fn player(app: &mut App) -> Kinematics {
    let mut query = app.world_mut().query_filtered::<&Kinematics, With<Player>>();
    query.single(app.world()).expect("one player").clone()
}

#[test]
fn test_enemy_catches_player_on_open_field() {
    let mut app = build_app();
    start_field(&mut app, FieldLayout {
        obstacles: Vec::new(),
        player: Node::new(40, 30),
        goal: Node::new(55, 5),
        enemies: vec![Node::new(5, 30)],
    });

    let (_, start, path) = enemies(&mut app).remove(0);
    assert_eq!(path.epoch(), 1);
    assert_eq!(path.head(), Some(Node::new(40, 30)), "open field plans straight at the player");

    let mut frames = 0;
    while app.world().resource::<Scoreboard>().losses == 0 && frames < 600 {
        app.update();
        frames += 1;
        if frames == 20 {
            let (_, now, _) = enemies(&mut app).remove(0);
            assert!(now.position().x > start.position().x, "enemy should be closing in");
            assert_eq!(now.position().y, start.position().y, "no reason to leave the row");
        }
    }

    assert_eq!(app.world().resource::<Scoreboard>().losses, 1, "caught within {} frames", frames);
    assert_eq!(app.world().resource::<Scoreboard>().wins, 0);
}

#[test]
fn test_walled_off_enemy_stays_put() {
    let mut app = build_app();
    // A column of squares from edge to edge: cells 26..=39 blocked on every row.
    let wall = (0..6).map(|i| ObstacleRect::new(6, i * 2, 2)).collect();
    start_field(&mut app, FieldLayout {
        obstacles: wall,
        player: Node::new(50, 30),
        goal: Node::new(55, 5),
        enemies: vec![Node::new(5, 30)],
    });

    let (_, start, path) = enemies(&mut app).remove(0);
    assert!(path.is_empty(), "no path through a full wall");

    for _ in 0..50 {
        app.update();
    }

    let (_, now, path) = enemies(&mut app).remove(0);
    assert!(path.is_empty());
    assert_eq!(now.position(), start.position());
    assert_eq!(app.world().resource::<Scoreboard>().losses, 0);
}

#[test]
fn test_enemy_routes_around_obstacle() {
    let mut app = build_app();
    start_field(&mut app, FieldLayout {
        obstacles: vec![ObstacleRect::new(5, 4, 3)],
        player: Node::new(50, 30),
        goal: Node::new(55, 5),
        enemies: vec![Node::new(10, 30)],
    });

    let (_, _, path) = enemies(&mut app).remove(0);
    assert!(path.len() >= 2, "detour needs a corner waypoint: {:?}", path.snapshot());
    assert_eq!(path.snapshot().last(), Some(&Node::new(50, 30)));

    let grid = app.world().resource::<pursuit::game::grid::NavGrid>();
    for node in path.iter() {
        assert!(grid.is_walkable(node.x, node.y));
    }
}

#[test]
fn test_player_reaching_goal_wins() {
    let mut app = build_app();
    start_field(&mut app, FieldLayout {
        obstacles: Vec::new(),
        player: Node::new(30, 30),
        goal: Node::new(31, 30),
        enemies: vec![Node::new(2, 2)],
    });
    app.update();

    assert_eq!(app.world().resource::<Scoreboard>().wins, 1);
}

#[test]
fn test_player_follows_intent_and_stops() {
    let mut app = build_app();
    start_field(&mut app, FieldLayout {
        obstacles: Vec::new(),
        player: Node::new(20, 50),
        goal: Node::new(55, 5),
        enemies: Vec::new(),
    });
    let start = player(&mut app);

    app.world_mut().resource_mut::<PlayerIntent>().right = true;
    for _ in 0..10 {
        app.update();
    }
    let moved = player(&mut app);
    assert!(moved.position().x > start.position().x);
    assert_eq!(moved.position().y, start.position().y);

    app.world_mut().resource_mut::<PlayerIntent>().right = false;
    app.update();
    let stopped = player(&mut app);
    assert_eq!(stopped.momentum.horizontal, FixedNum::ZERO);
    app.update();
    assert_eq!(player(&mut app).position(), stopped.position());
}

#[test]
fn test_disabled_pathfinding_clears_paths() {
    let mut app = build_app();
    app.world_mut().resource_mut::<SimConfig>().pathfinding_active = false;
    start_field(&mut app, FieldLayout {
        obstacles: Vec::new(),
        player: Node::new(40, 30),
        goal: Node::new(55, 5),
        enemies: vec![Node::new(5, 30)],
    });

    let (_, start, path) = enemies(&mut app).remove(0);
    assert!(path.is_empty());
    for _ in 0..10 {
        app.update();
    }
    let (_, now, _) = enemies(&mut app).remove(0);
    assert_eq!(now.position(), start.position());
    assert_eq!(app.world().resource::<FieldEpoch>().0, 1);
}
