use serde::{Deserialize, Serialize};

use crate::enemies::EnemyKind;
use crate::obstacles::ObstacleKind;

/// Failure to load or validate a [`GameConfig`].
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("failed to parse config: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("viewport must be positive, got {width}x{height}")]
    Viewport { width: f64, height: f64 },
    #[error("`{0}` must be positive")]
    NonPositive(&'static str),
    #[error("`{field}` range is inverted ({min} > {max})")]
    InvertedRange { field: &'static str, min: f64, max: f64 },
    #[error("`{0}` spawn table has no positive weight")]
    EmptySpawnTable(&'static str),
}

/// Tunables for one play session.
/// Loaded from JSON at startup; every field falls back to the shipped default.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    pub viewport_width: f64,
    pub viewport_height: f64,
    /// Longest simulated step; longer frames are clamped.
    pub max_frame_dt: f64,
    pub seed: u64,
    pub max_health: f64,
    pub player: PlayerConfig,
    pub weapon: WeaponConfig,
    pub world: WorldConfig,
    pub obstacles: ObstacleSpawnConfig,
    pub enemies: EnemySpawnConfig,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            viewport_width: 1280.0,
            viewport_height: 720.0,
            max_frame_dt: 0.05,
            seed: 0x5EED,
            max_health: 100.0,
            player: PlayerConfig::default(),
            weapon: WeaponConfig::default(),
            world: WorldConfig::default(),
            obstacles: ObstacleSpawnConfig::default(),
            enemies: EnemySpawnConfig::default(),
        }
    }
}

impl GameConfig {
    /// Parse and validate a config from a JSON string.
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let config: GameConfig = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    pub fn with_viewport(mut self, width: f64, height: f64) -> Self {
        self.viewport_width = width;
        self.viewport_height = height;
        self
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if !(self.viewport_width > 0.0 && self.viewport_height > 0.0) {
            return Err(ConfigError::Viewport {
                width: self.viewport_width,
                height: self.viewport_height,
            });
        }
        positive("max_frame_dt", self.max_frame_dt)?;
        positive("max_health", self.max_health)?;
        positive("player.gravity", self.player.gravity)?;
        positive("player.base_speed", self.player.base_speed)?;
        positive("player.dash_power_max", self.player.dash_power_max)?;
        positive("player.dash_duration", self.player.dash_duration)?;
        positive("player.flip_duration", self.player.flip_duration)?;
        positive("player.shoot_draw_duration", self.player.shoot_draw_duration)?;
        positive(
            "player.shoot_fire_frame_duration",
            self.player.shoot_fire_frame_duration,
        )?;
        positive("weapon.max_ammo", self.weapon.max_ammo as f64)?;
        positive("weapon.fire_rate", self.weapon.fire_rate)?;
        positive("weapon.reload_time", self.weapon.reload_time)?;
        positive("world.base_scroll_speed", self.world.base_scroll_speed)?;
        positive("world.speed_step_distance", self.world.speed_step_distance)?;
        positive(
            "world.difficulty_step_distance",
            self.world.difficulty_step_distance,
        )?;
        positive(
            "enemies.reference_scroll_speed",
            self.enemies.reference_scroll_speed,
        )?;
        ordered(
            "obstacles.spacing",
            self.obstacles.min_spacing,
            self.obstacles.max_spacing,
        )?;
        ordered(
            "enemies.spacing",
            self.enemies.min_spacing,
            self.enemies.max_spacing,
        )?;
        if !self.obstacles.weights.iter().any(|&(_, w)| w > 0.0) {
            return Err(ConfigError::EmptySpawnTable("obstacles.weights"));
        }
        if !self.enemies.weights.iter().any(|&(_, w)| w > 0.0) {
            return Err(ConfigError::EmptySpawnTable("enemies.weights"));
        }
        Ok(())
    }
}

fn positive(field: &'static str, value: f64) -> Result<(), ConfigError> {
    if value > 0.0 {
        Ok(())
    } else {
        Err(ConfigError::NonPositive(field))
    }
}

fn ordered(field: &'static str, min: f64, max: f64) -> Result<(), ConfigError> {
    if min <= max {
        Ok(())
    } else {
        Err(ConfigError::InvertedRange { field, min, max })
    }
}

/// Player movement and ability tuning.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PlayerConfig {
    pub width: f64,
    pub height: f64,
    pub base_speed: f64,
    pub jump_power: f64,
    pub gravity: f64,
    pub coyote_time: f64,
    pub jump_buffer_time: f64,
    pub wall_jump_duration: f64,
    pub dash_speed: f64,
    pub dash_duration: f64,
    pub dash_power_max: f64,
    pub dash_max_charges: u32,
    pub invincibility_duration: f64,
    pub flip_duration: f64,
    pub double_jump_window: f64,
    pub shoot_draw_duration: f64,
    pub shoot_fire_frame_duration: f64,
    pub edge_margin: f64,
    pub ground_tolerance: f64,
}

impl Default for PlayerConfig {
    fn default() -> Self {
        Self {
            width: 90.0,
            height: 150.0,
            base_speed: 250.0,
            jump_power: 450.0,
            gravity: 980.0,
            coyote_time: 0.1,
            jump_buffer_time: 0.1,
            wall_jump_duration: 0.2,
            dash_speed: 400.0,
            dash_duration: 0.2,
            dash_power_max: 100.0,
            dash_max_charges: 99,
            invincibility_duration: 1.0,
            flip_duration: 0.6,
            double_jump_window: 0.3,
            shoot_draw_duration: 0.15,
            shoot_fire_frame_duration: 0.08,
            edge_margin: 10.0,
            ground_tolerance: 2.0,
        }
    }
}

/// Gun handling, bullets, and shell casings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct WeaponConfig {
    pub max_ammo: u32,
    pub reload_time: f64,
    /// Seconds between shots.
    pub fire_rate: f64,
    pub bullet_speed: f64,
    pub bullet_damage: u32,
    /// Radians either side of horizontal.
    pub max_aim_angle: f64,
    pub mouse_aim_sensitivity: f64,
    pub stick_aim_sensitivity: f64,
    pub recoil_amount: f64,
    pub recoil_decay: f64,
    pub muzzle_flash_duration: f64,
    pub shooting_visible_duration: f64,
    pub max_shell_casings: usize,
    pub trail_length: usize,
}

impl Default for WeaponConfig {
    fn default() -> Self {
        Self {
            max_ammo: 30,
            reload_time: 2.0,
            fire_rate: 0.15,
            bullet_speed: 800.0,
            bullet_damage: 1,
            max_aim_angle: std::f64::consts::FRAC_PI_3,
            mouse_aim_sensitivity: 0.002,
            stick_aim_sensitivity: 2.0,
            recoil_amount: 0.3,
            recoil_decay: 8.0,
            muzzle_flash_duration: 0.05,
            shooting_visible_duration: 0.5,
            max_shell_casings: 10,
            trail_length: 15,
        }
    }
}

/// Camera scrolling and procedural pickups.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct WorldConfig {
    pub base_scroll_speed: f64,
    /// Scroll distance per speed step.
    pub speed_step_distance: f64,
    pub speed_step: f64,
    pub max_speed_bonus: f64,
    /// Scroll distance per difficulty step.
    pub difficulty_step_distance: f64,
    pub difficulty_step: f64,
    /// Dead zone width as a fraction of the viewport.
    pub dead_zone_fraction: f64,
    pub direction_lerp_rate: f64,
    pub dash_scroll_multiplier: f64,
    /// Backward scroll allowed past the frontier while recentring.
    pub frontier_slack: f64,
    /// Distance below the viewport bottom where the ground line sits.
    pub ground_offset: f64,
    pub coin_spawn_distance: f64,
    pub coin_spacing: f64,
    /// Roll per spawn check once the pack frontier is close.
    pub health_pack_chance: f64,
    pub initial_coins: usize,
    /// Slots rolled for opening health packs.
    pub initial_pack_slots: usize,
    pub initial_pack_chance: f64,
}

impl Default for WorldConfig {
    fn default() -> Self {
        Self {
            base_scroll_speed: 250.0,
            speed_step_distance: 5000.0,
            speed_step: 25.0,
            max_speed_bonus: 200.0,
            difficulty_step_distance: 10_000.0,
            difficulty_step: 0.2,
            dead_zone_fraction: 0.15,
            direction_lerp_rate: 10.0,
            dash_scroll_multiplier: 2.0,
            frontier_slack: 50.0,
            ground_offset: 100.0,
            coin_spawn_distance: 400.0,
            coin_spacing: 200.0,
            health_pack_chance: 0.03,
            initial_coins: 20,
            initial_pack_slots: 20,
            initial_pack_chance: 0.05,
        }
    }
}

/// Obstacle spawner tuning.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ObstacleSpawnConfig {
    pub spawn_distance: f64,
    pub min_spacing: f64,
    pub max_spacing: f64,
    pub spawn_chance: f64,
    pub check_interval: f64,
    pub initial_count: usize,
    pub initial_offset: f64,
    pub initial_spacing: f64,
    pub weights: Vec<(ObstacleKind, f64)>,
}

impl Default for ObstacleSpawnConfig {
    fn default() -> Self {
        Self {
            spawn_distance: 1200.0,
            min_spacing: 350.0,
            max_spacing: 700.0,
            spawn_chance: 0.12,
            check_interval: 0.3,
            initial_count: 3,
            initial_offset: 800.0,
            initial_spacing: 500.0,
            weights: vec![
                (ObstacleKind::Block, 40.0),
                (ObstacleKind::Fence, 25.0),
                (ObstacleKind::Platform, 15.0),
                (ObstacleKind::PoliceCar, 15.0),
                (ObstacleKind::TallBlock, 5.0),
            ],
        }
    }
}

/// Enemy spawner tuning.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EnemySpawnConfig {
    pub spawn_distance: f64,
    pub min_spacing: f64,
    pub max_spacing: f64,
    pub spawn_chance: f64,
    pub check_interval: f64,
    pub max_alive: usize,
    /// Scroll speed at which enemies move at their base speed.
    pub reference_scroll_speed: f64,
    pub weights: Vec<(EnemyKind, f64)>,
}

impl Default for EnemySpawnConfig {
    fn default() -> Self {
        Self {
            spawn_distance: 800.0,
            min_spacing: 200.0,
            max_spacing: 400.0,
            spawn_chance: 0.25,
            check_interval: 0.8,
            max_alive: 6,
            reference_scroll_speed: 250.0,
            weights: vec![
                (EnemyKind::Basic, 60.0),
                (EnemyKind::Fast, 25.0),
                (EnemyKind::Tank, 15.0),
            ],
        }
    }
}
