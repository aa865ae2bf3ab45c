//! The scrolling world: camera, progressive speed, pickups, parallax, and
//! the obstacle field.
//!
//! Everything here lives in screen space. Scrolling forward moves content
//! left; the returned scroll distance tells the caller how far to shift the
//! actors the world does not own.

pub mod camera;
pub mod parallax;
pub mod pickup;

pub use camera::ScrollCamera;
pub use parallax::ParallaxLayer;
pub use pickup::{Pickup, PickupKind};

use glam::DVec2;

use crate::config::{GameConfig, WorldConfig};
use crate::core::{Rect, Rng};
use crate::obstacles::ObstacleManager;
use crate::player::PlayerMotion;

/// Scroll direction above which content spawns at the leading edge.
const SPAWN_DIRECTION_THRESHOLD: f64 = 0.05;
const COIN_JITTER: f64 = 100.0;
const PACK_SPACING: f64 = 600.0;
const PACK_JITTER: f64 = 400.0;
const INITIAL_PACK_SPACING: f64 = 500.0;
const INITIAL_PACK_JITTER: f64 = 200.0;

pub struct World {
    width: f64,
    height: f64,
    config: WorldConfig,
    pub camera: ScrollCamera,
    pub total_scroll_distance: f64,
    scroll_speed: f64,
    difficulty: f64,
    coins: Vec<Pickup>,
    health_packs: Vec<Pickup>,
    layers: Vec<ParallaxLayer>,
    obstacles: ObstacleManager,
    rng: Rng,
    seed: u64,
}

impl World {
    pub fn new(config: &GameConfig) -> Self {
        let mut world = Self {
            width: config.viewport_width,
            height: config.viewport_height,
            camera: ScrollCamera::new(config.viewport_width, &config.world),
            total_scroll_distance: 0.0,
            scroll_speed: config.world.base_scroll_speed,
            difficulty: 1.0,
            coins: Vec::new(),
            health_packs: Vec::new(),
            layers: parallax::default_layers(),
            obstacles: ObstacleManager::new(config.obstacles.clone(), config.seed.wrapping_add(1)),
            rng: Rng::new(config.seed),
            seed: config.seed,
            config: config.world.clone(),
        };
        world.generate_content();
        world
    }

    fn generate_content(&mut self) {
        let ground_y = self.ground_y();

        self.coins.clear();
        for i in 0..self.config.initial_coins {
            let x = i as f64 * self.config.coin_spacing + self.rng.next_f64() * COIN_JITTER;
            self.coins.push(Pickup::new(PickupKind::Coin, x, ground_y));
        }

        self.health_packs.clear();
        for i in 0..self.config.initial_pack_slots {
            if self.rng.chance(self.config.initial_pack_chance) {
                let x = i as f64 * INITIAL_PACK_SPACING + self.rng.next_f64() * INITIAL_PACK_JITTER;
                self.health_packs
                    .push(Pickup::new(PickupKind::HealthPack, x, ground_y));
            }
        }

        self.obstacles.spawn_initial(ground_y);
        log::info!(
            "world ready: {} coins, {} health packs, {} obstacles",
            self.coins.len(),
            self.health_packs.len(),
            self.obstacles.len()
        );
    }

    /// Restore the opening state with the same seed.
    pub fn reset(&mut self) {
        self.camera.reset();
        self.total_scroll_distance = 0.0;
        self.scroll_speed = self.config.base_scroll_speed;
        self.difficulty = 1.0;
        for layer in &mut self.layers {
            layer.scroll_x = 0.0;
        }
        self.rng = Rng::new(self.seed);
        self.obstacles.clear();
        self.generate_content();
    }

    pub fn width(&self) -> f64 {
        self.width
    }

    pub fn height(&self) -> f64 {
        self.height
    }

    /// Top edge of the sidewalk. Derived from the viewport height on every call.
    pub fn ground_y(&self) -> f64 {
        self.height - self.config.ground_offset
    }

    /// Viewport change. Ground-standing content follows the new ground line.
    pub fn resize(&mut self, width: f64, height: f64) {
        let shift = height - self.height;
        self.width = width;
        self.height = height;
        self.camera.set_viewport_width(width);
        for item in self.coins.iter_mut().chain(self.health_packs.iter_mut()) {
            item.pos.y += shift;
        }
        self.obstacles.shift_vertical(shift);
    }

    pub fn scroll_speed(&self) -> f64 {
        self.scroll_speed
    }

    pub fn difficulty(&self) -> f64 {
        self.difficulty
    }

    pub fn direction(&self) -> f64 {
        self.camera.direction
    }

    /// Speed and difficulty both step up with distance travelled.
    fn update_progression(&mut self) {
        let c = &self.config;
        let speed_steps = (self.total_scroll_distance / c.speed_step_distance).floor();
        self.scroll_speed = c.base_scroll_speed + (speed_steps * c.speed_step).min(c.max_speed_bonus);
        let difficulty_steps = (self.total_scroll_distance / c.difficulty_step_distance).floor();
        self.difficulty = 1.0 + difficulty_steps * c.difficulty_step;
    }

    /// Advance one frame. Returns the distance scrolled; positive is forward.
    pub fn update(&mut self, dt: f64, motion: &PlayerMotion, player_x: f64) -> f64 {
        self.update_progression();
        self.camera.steer(motion, player_x, dt);

        let mut distance = 0.0;
        if self.camera.is_scrolling() {
            let multiplier = if motion.is_dashing {
                self.config.dash_scroll_multiplier
            } else {
                1.0
            };
            let speed = self.scroll_speed * multiplier;
            let proposed = speed * dt * self.camera.direction;
            distance = self.camera.advance(proposed, player_x);
            self.total_scroll_distance += distance.abs();

            let direction = self.camera.direction;
            for layer in &mut self.layers {
                layer.advance(speed, dt, direction);
            }

            let width = self.width;
            for item in self.coins.iter_mut().chain(self.health_packs.iter_mut()) {
                item.scroll(distance, width);
            }
            self.coins.retain(|c| !c.scrolled && !c.collected);
            self.health_packs.retain(|h| !h.scrolled && !h.collected);

            self.spawn_content(direction);
        }

        let ground_y = self.ground_y();
        self.obstacles
            .update(dt, distance, self.camera.direction, self.width, ground_y);

        for coin in &mut self.coins {
            coin.spin(dt);
        }

        distance
    }

    /// Keep a coin and health-pack supply at the leading edge.
    fn spawn_content(&mut self, direction: f64) {
        let ground_y = self.ground_y();
        let reach = self.config.coin_spawn_distance;
        let center = self.width / 2.0;

        if direction > SPAWN_DIRECTION_THRESHOLD {
            let edge = rightmost(&self.coins).unwrap_or(center);
            if edge < self.width + reach {
                let x = edge + self.config.coin_spacing + self.rng.next_f64() * COIN_JITTER;
                self.coins.push(Pickup::new(PickupKind::Coin, x, ground_y));
            }
            let edge = rightmost(&self.health_packs).unwrap_or(center);
            if edge < self.width + reach && self.rng.chance(self.config.health_pack_chance) {
                let x = edge + PACK_SPACING + self.rng.next_f64() * PACK_JITTER;
                self.health_packs
                    .push(Pickup::new(PickupKind::HealthPack, x, ground_y));
            }
        } else if direction < -SPAWN_DIRECTION_THRESHOLD {
            let edge = leftmost(&self.coins).unwrap_or(center);
            if edge > -reach {
                let x = edge - self.config.coin_spacing - self.rng.next_f64() * COIN_JITTER;
                self.coins.push(Pickup::new(PickupKind::Coin, x, ground_y));
            }
            let edge = leftmost(&self.health_packs).unwrap_or(center);
            if edge > -reach && self.rng.chance(self.config.health_pack_chance) {
                let x = edge - PACK_SPACING - self.rng.next_f64() * PACK_JITTER;
                self.health_packs
                    .push(Pickup::new(PickupKind::HealthPack, x, ground_y));
            }
        }
    }

    /// Collect every coin overlapping `rect`. Returns their centres.
    pub fn collect_coins(&mut self, rect: &Rect) -> Vec<DVec2> {
        collect(&mut self.coins, rect)
    }

    /// Collect every health pack overlapping `rect`. Returns their centres.
    pub fn collect_health_packs(&mut self, rect: &Rect) -> Vec<DVec2> {
        collect(&mut self.health_packs, rect)
    }

    pub fn coins(&self) -> &[Pickup] {
        &self.coins
    }

    pub fn health_packs(&self) -> &[Pickup] {
        &self.health_packs
    }

    pub fn layers(&self) -> &[ParallaxLayer] {
        &self.layers
    }

    pub fn obstacles(&self) -> &ObstacleManager {
        &self.obstacles
    }

    pub fn obstacles_mut(&mut self) -> &mut ObstacleManager {
        &mut self.obstacles
    }

    /// Place a pickup directly. Used for scripted content.
    pub fn add_pickup(&mut self, kind: PickupKind, x: f64) -> &Pickup {
        let ground_y = self.ground_y();
        let list = match kind {
            PickupKind::Coin => &mut self.coins,
            PickupKind::HealthPack => &mut self.health_packs,
        };
        list.push(Pickup::new(kind, x, ground_y));
        &list[list.len() - 1]
    }

    /// Drop all pickups. The obstacle field is left alone.
    pub fn clear_pickups(&mut self) {
        self.coins.clear();
        self.health_packs.clear();
    }
}

fn collect(items: &mut Vec<Pickup>, rect: &Rect) -> Vec<DVec2> {
    let mut taken = Vec::new();
    items.retain(|item| {
        if !item.collected && item.rect().overlaps(rect) {
            taken.push(item.center());
            false
        } else {
            true
        }
    });
    taken
}

fn rightmost(items: &[Pickup]) -> Option<f64> {
    items.iter().map(|i| i.pos.x).reduce(f64::max)
}

fn leftmost(items: &[Pickup]) -> Option<f64> {
    items.iter().map(|i| i.pos.x).reduce(f64::min)
}
