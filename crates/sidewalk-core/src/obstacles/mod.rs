//! Scrolling hazards and the spawner that feeds them in from the right.

pub mod obstacle;
pub mod particle;

pub use obstacle::{Obstacle, ObstacleKind, ObstacleStats};
pub use particle::Debris;

use crate::config::ObstacleSpawnConfig;
use crate::core::{Rect, Rng};

/// Scroll direction above which the spawner runs.
const SPAWN_DIRECTION_THRESHOLD: f64 = 0.05;

/// Owns every live obstacle.
pub struct ObstacleManager {
    obstacles: Vec<Obstacle>,
    config: ObstacleSpawnConfig,
    spawn_cooldown: f64,
    rng: Rng,
}

impl ObstacleManager {
    pub fn new(config: ObstacleSpawnConfig, seed: u64) -> Self {
        Self {
            obstacles: Vec::new(),
            config,
            spawn_cooldown: 0.0,
            rng: Rng::new(seed),
        }
    }

    /// Replace the weighted kind table.
    pub fn with_spawn_table(mut self, weights: Vec<(ObstacleKind, f64)>) -> Self {
        self.config.weights = weights;
        self
    }

    pub fn config(&self) -> &ObstacleSpawnConfig {
        &self.config
    }

    /// Place the opening row of obstacles ahead of the player.
    pub fn spawn_initial(&mut self, ground_y: f64) {
        for i in 0..self.config.initial_count {
            let x = self.config.initial_offset + i as f64 * self.config.initial_spacing;
            let kind = self
                .rng
                .pick_weighted(&self.config.weights)
                .unwrap_or(ObstacleKind::Block);
            self.spawn(kind, x, ground_y);
        }
    }

    /// Advance all obstacles, drop finished ones, and maybe spawn.
    ///
    /// `scroll_dx` is the distance the camera moved this frame.
    pub fn update(
        &mut self,
        dt: f64,
        scroll_dx: f64,
        direction: f64,
        viewport_width: f64,
        ground_y: f64,
    ) {
        // Forward spawns land up to spawn_distance + max_spacing ahead and
        // must survive until they scroll into view.
        let right_limit = viewport_width + self.config.spawn_distance + self.config.max_spacing;
        for obstacle in &mut self.obstacles {
            obstacle.update(dt, scroll_dx, right_limit);
        }
        self.obstacles.retain(|o| o.active && !o.scrolled);

        if self.spawn_cooldown > 0.0 {
            self.spawn_cooldown -= dt;
        }
        if direction.abs() > SPAWN_DIRECTION_THRESHOLD && self.spawn_cooldown <= 0.0 {
            self.check_spawn(direction, viewport_width, ground_y);
            self.spawn_cooldown = self.config.check_interval;
        }
    }

    /// Only forward motion spawns: obstacles appear ahead, never behind.
    fn check_spawn(&mut self, direction: f64, viewport_width: f64, ground_y: f64) -> Option<usize> {
        if direction <= SPAWN_DIRECTION_THRESHOLD {
            return None;
        }
        let reference = self
            .obstacles
            .iter()
            .filter(|o| o.is_solid())
            .map(|o| o.pos.x)
            .fold(None, |acc: Option<f64>, x| Some(acc.map_or(x, |m| m.max(x))))
            .unwrap_or(viewport_width / 2.0);

        if reference < viewport_width + self.config.spawn_distance {
            self.try_spawn(reference, ground_y)
        } else {
            None
        }
    }

    /// Roll the spawn chance and place one obstacle past `reference_x`.
    pub fn try_spawn(&mut self, reference_x: f64, ground_y: f64) -> Option<usize> {
        if !self.rng.chance(self.config.spawn_chance) {
            return None;
        }
        let spacing = self
            .rng
            .range(self.config.min_spacing, self.config.max_spacing);
        let kind = self.rng.pick_weighted(&self.config.weights)?;
        Some(self.spawn(kind, reference_x + spacing, ground_y))
    }

    /// Place an obstacle of `kind` at `x`, standing on the ground line.
    pub fn spawn(&mut self, kind: ObstacleKind, x: f64, ground_y: f64) -> usize {
        log::info!("spawned {:?} obstacle at x={:.0}", kind, x);
        self.obstacles.push(Obstacle::on_ground(kind, x, ground_y));
        self.obstacles.len() - 1
    }

    /// Move every obstacle vertically, e.g. after the ground line changes.
    pub fn shift_vertical(&mut self, dy: f64) {
        for obstacle in &mut self.obstacles {
            obstacle.pos.y += dy;
        }
    }

    /// Indices of solid obstacles whose hitbox overlaps `rect`.
    pub fn check_player_collisions(&self, rect: &Rect) -> Vec<usize> {
        self.obstacles
            .iter()
            .enumerate()
            .filter(|(_, o)| o.is_solid() && o.rect().overlaps(rect))
            .map(|(i, _)| i)
            .collect()
    }

    /// Start destroying the obstacle at `index`.
    pub fn destroy(&mut self, index: usize) -> bool {
        match self.obstacles.get_mut(index) {
            Some(obstacle) => obstacle.destroy(&mut self.rng),
            None => false,
        }
    }

    pub fn active_obstacles(&self) -> impl Iterator<Item = &Obstacle> {
        self.obstacles.iter().filter(|o| o.active && !o.scrolled)
    }

    /// Standable car roofs.
    pub fn platforms(&self) -> impl Iterator<Item = &Obstacle> {
        self.obstacles.iter().filter(|o| o.is_walkable_platform())
    }

    pub fn obstacles(&self) -> &[Obstacle] {
        &self.obstacles
    }

    pub fn get(&self, index: usize) -> Option<&Obstacle> {
        self.obstacles.get(index)
    }

    pub fn len(&self) -> usize {
        self.obstacles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.obstacles.is_empty()
    }

    pub fn clear(&mut self) {
        self.obstacles.clear();
        self.spawn_cooldown = 0.0;
    }
}
