use bevy::prelude::*;
use bevy_common_assets::ron::RonAssetPlugin;
use serde::{Deserialize, Serialize};

use crate::game::field::FieldRng;
use crate::game::grid::NavGrid;
use crate::game::input::KeyBindings;
use crate::game::pathfinding::Heuristic;
use crate::game::simulation::{DebugConfig, SimConfig};

/// Static configuration loaded once at startup. These values size the field
/// and tune the steering model; changing them mid-round would invalidate the
/// grid and every planned path.
#[derive(Resource, Deserialize, Serialize, Clone, Debug, PartialEq)]
#[serde(default)]
pub struct InitialConfig {
    // Timing
    pub tick_rate_hz: f64,
    pub max_timestep: f64,
    pub fallback_timestep: f64,

    // Field geometry
    pub cell_size: f64,
    pub cells_per_square: i32,
    pub squares_x: i32,
    pub squares_y: i32,

    // Steering
    pub max_speed: f64,
    pub acceleration: f64,
    pub waypoint_tolerance: f64,
    pub refresh_distance: f64,

    // Field generation
    pub enemy_count: usize,
    pub min_obstacles: usize,
    pub max_obstacles: usize,
    pub min_obstacle_size: i32,
    pub max_obstacle_size: i32,
    pub attempt_limit: usize,
    pub agent_size: f64,
    pub goal_size: f64,
    pub seed: Option<u64>,

    // Pathfinding
    pub heuristic: Heuristic,
}

impl Default for InitialConfig {
    fn default() -> Self {
        Self {
            tick_rate_hz: 100.0,
            max_timestep: 1.0,
            fallback_timestep: 0.001,
            cell_size: 5.0,
            cells_per_square: 5,
            squares_x: 40,
            squares_y: 40,
            max_speed: 200.0,
            acceleration: 25.0,
            waypoint_tolerance: 0.9,
            refresh_distance: 25.0,
            enemy_count: 1,
            min_obstacles: 15,
            max_obstacles: 25,
            min_obstacle_size: 2,
            max_obstacle_size: 4,
            attempt_limit: 10,
            agent_size: 19.0,
            goal_size: 19.0,
            seed: None,
            heuristic: Heuristic::Octile,
        }
    }
}

/// Runtime configuration that can be hot-reloaded during play: key bindings,
/// the pathfinding switch and debug output.
#[derive(Deserialize, Serialize, Asset, TypePath, Clone, Debug)]
pub struct GameConfig {
    // Controls
    pub key_up: KeyCode,
    pub key_down: KeyCode,
    pub key_left: KeyCode,
    pub key_right: KeyCode,
    pub key_reset: KeyCode,

    // Simulation
    pub pathfinding_active: bool,

    // Debug
    pub show_paths: bool,
    pub path_log_interval: u64,
}

#[derive(Resource)]
pub struct GameConfigHandle(pub Handle<GameConfig>);

pub struct GameConfigPlugin;

impl Plugin for GameConfigPlugin {
    fn build(&self, app: &mut App) {
        app.add_plugins(RonAssetPlugin::<GameConfig>::new(&["game_config.ron"]))
           .add_systems(Startup, (load_initial_config, apply_initial_config, setup_runtime_config).chain())
           .add_systems(Update, apply_runtime_config);
    }
}

const INITIAL_CONFIG_PATH: &str = "assets/initial_config.ron";

/// Read and parse the initial config; any failure is logged and defaulted.
pub fn read_initial_config(path: &str) -> InitialConfig {
    match std::fs::read_to_string(path) {
        Ok(contents) => match ron::from_str::<InitialConfig>(&contents) {
            Ok(config) => {
                info!("Loaded initial config from {}", path);
                config
            }
            Err(e) => {
                error!("Failed to parse initial config: {}", e);
                error!("Using default InitialConfig");
                InitialConfig::default()
            }
        },
        Err(e) => {
            error!("Failed to read {}: {}", path, e);
            error!("Using default InitialConfig");
            InitialConfig::default()
        }
    }
}

/// Load static initial configuration synchronously at startup.
/// This must complete before the first field is built.
fn load_initial_config(mut commands: Commands) {
    commands.insert_resource(read_initial_config(INITIAL_CONFIG_PATH));
}

/// Convert the initial config into the fixed-point [`SimConfig`] and size
/// everything that depends on it.
pub fn apply_initial_config(
    mut commands: Commands,
    mut fixed_time: ResMut<Time<Fixed>>,
    mut sim_config: ResMut<SimConfig>,
    mut grid: ResMut<NavGrid>,
    initial_config: Option<Res<InitialConfig>>,
) {
    let config = match initial_config {
        Some(cfg) => cfg.clone(),
        None => {
            warn!("InitialConfig not found, using defaults");
            InitialConfig::default()
        }
    };

    let pathfinding_active = sim_config.pathfinding_active;
    *sim_config = SimConfig::from_initial(&config);
    sim_config.pathfinding_active = pathfinding_active;

    if config.tick_rate_hz > 0.0 {
        fixed_time.set_timestep_hz(config.tick_rate_hz);
    } else {
        warn!("Ignoring non-positive tick_rate_hz {}", config.tick_rate_hz);
    }

    *grid = NavGrid::new(sim_config.grid_width(), sim_config.grid_height());
    commands.insert_resource(FieldRng::from_seed(config.seed));

    info!(
        "SimConfig ready: {}x{} cells of {} px, {} Hz fixed tick, {} enemies, {:?} heuristic",
        sim_config.grid_width(),
        sim_config.grid_height(),
        config.cell_size,
        config.tick_rate_hz,
        config.enemy_count,
        config.heuristic
    );
}

/// Load runtime configuration asynchronously (can be hot-reloaded).
fn setup_runtime_config(mut commands: Commands, asset_server: Res<AssetServer>) {
    let handle = asset_server.load("game_config.ron");
    commands.insert_resource(GameConfigHandle(handle));
}

/// Copy hot-reloadable settings into the resources the systems read.
pub fn apply_runtime_config(
    config_handle: Option<Res<GameConfigHandle>>,
    game_configs: Res<Assets<GameConfig>>,
    mut events: MessageReader<AssetEvent<GameConfig>>,
    mut sim_config: ResMut<SimConfig>,
    mut debug_config: ResMut<DebugConfig>,
    mut bindings: ResMut<KeyBindings>,
) {
    let Some(config_handle) = config_handle else {
        events.clear();
        return;
    };

    for event in events.read() {
        if !(event.is_modified(config_handle.0.id()) || event.is_loaded_with_dependencies(config_handle.0.id())) {
            continue;
        }
        let Some(config) = game_configs.get(&config_handle.0) else {
            continue;
        };

        sim_config.pathfinding_active = config.pathfinding_active;
        debug_config.show_paths = config.show_paths;
        debug_config.path_log_interval = config.path_log_interval;
        *bindings = KeyBindings {
            up: config.key_up,
            down: config.key_down,
            left: config.key_left,
            right: config.key_right,
            reset: config.key_reset,
        };
        info!(
            "Runtime config loaded/updated (pathfinding {}, path dump {})",
            if config.pathfinding_active { "on" } else { "off" },
            if config.show_paths { "on" } else { "off" }
        );
    }
}
