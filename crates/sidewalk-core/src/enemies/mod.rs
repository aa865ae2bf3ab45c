//! Enemy population: AI-driven walkers spawned just past the right edge.

pub mod enemy;

pub use enemy::{AiState, DamageResult, Enemy, EnemyKind, EnemyStats};

use crate::api::FeedbackSink;
use crate::config::EnemySpawnConfig;
use crate::core::{Rect, Rng};

/// Spawning pauses while the camera moves backward faster than this.
const SPAWN_DIRECTION_FLOOR: f64 = -0.1;
/// How far past the left edge an enemy may wander before removal.
const LEFT_CULL_MARGIN: f64 = 100.0;
const MIN_SPAWN_INTERVAL: f64 = 0.3;
const MAX_SPAWN_CHANCE: f64 = 0.5;

pub struct EnemyManager {
    enemies: Vec<Enemy>,
    config: EnemySpawnConfig,
    spawn_cooldown: f64,
    /// Current seconds between spawn checks (difficulty-scaled).
    spawn_interval: f64,
    /// Current per-check spawn probability (difficulty-scaled).
    spawn_chance: f64,
    /// Movement speed multiplier tracking the world scroll speed.
    speed_scale: f64,
    rng: Rng,
}

impl EnemyManager {
    pub fn new(config: EnemySpawnConfig, seed: u64) -> Self {
        Self {
            enemies: Vec::new(),
            spawn_cooldown: 0.0,
            spawn_interval: config.check_interval,
            spawn_chance: config.spawn_chance,
            speed_scale: 1.0,
            config,
            rng: Rng::new(seed),
        }
    }

    pub fn with_spawn_table(mut self, weights: Vec<(EnemyKind, f64)>) -> Self {
        self.config.weights = weights;
        self
    }

    pub fn update(
        &mut self,
        dt: f64,
        player_x: f64,
        ground_y: f64,
        scroll_direction: f64,
        viewport_width: f64,
    ) {
        for enemy in &mut self.enemies {
            enemy.update(dt, player_x, ground_y);
        }
        self.enemies
            .retain(|e| e.active && e.pos.x >= -e.width - LEFT_CULL_MARGIN);

        if self.spawn_cooldown > 0.0 {
            self.spawn_cooldown -= dt;
        }
        if self.spawn_cooldown <= 0.0 && scroll_direction >= SPAWN_DIRECTION_FLOOR {
            self.check_spawn(viewport_width, ground_y);
            self.spawn_cooldown = self.spawn_interval;
        }
    }

    fn check_spawn(&mut self, viewport_width: f64, ground_y: f64) -> Option<usize> {
        if self.live_count() >= self.config.max_alive {
            return None;
        }
        let reference = self
            .enemies
            .iter()
            .filter(|e| e.is_alive())
            .map(|e| e.pos.x)
            .fold(None, |acc: Option<f64>, x| Some(acc.map_or(x, |m| m.max(x))))
            .unwrap_or(viewport_width + 200.0);

        if reference < viewport_width + self.config.spawn_distance {
            self.try_spawn(reference, viewport_width, ground_y)
        } else {
            None
        }
    }

    /// Roll the spawn chance and place one enemy beyond the right edge.
    pub fn try_spawn(
        &mut self,
        reference_x: f64,
        viewport_width: f64,
        ground_y: f64,
    ) -> Option<usize> {
        if !self.rng.chance(self.spawn_chance) {
            return None;
        }
        let spacing = self
            .rng
            .range(self.config.min_spacing, self.config.max_spacing);
        let x = (reference_x + spacing).max(viewport_width + 100.0);
        let kind = self.rng.pick_weighted(&self.config.weights)?;
        Some(self.spawn(kind, x, ground_y))
    }

    /// Place an enemy of `kind` standing on the ground at `x`.
    pub fn spawn(&mut self, kind: EnemyKind, x: f64, ground_y: f64) -> usize {
        let mut enemy = Enemy::new(kind, x, ground_y - kind.stats().height);
        enemy.on_ground = true;
        enemy.speed = kind.stats().base_speed * self.speed_scale;
        log::info!("spawned {:?} enemy at x={:.0}", kind, x);
        self.enemies.push(enemy);
        self.enemies.len() - 1
    }

    /// Retune spawning and movement for the current difficulty.
    pub fn update_difficulty(&mut self, difficulty: f64, scroll_speed: f64) {
        let difficulty = difficulty.max(f64::EPSILON);
        self.spawn_interval = (self.config.check_interval / difficulty).max(MIN_SPAWN_INTERVAL);
        self.spawn_chance = (self.config.spawn_chance * difficulty).min(MAX_SPAWN_CHANCE);
        self.speed_scale = scroll_speed / self.config.reference_scroll_speed;
        for enemy in &mut self.enemies {
            enemy.speed = enemy.stats().base_speed * self.speed_scale;
        }
    }

    /// Indices of living enemies touching `rect`.
    pub fn check_player_collisions(&self, rect: &Rect) -> Vec<usize> {
        self.enemies
            .iter()
            .enumerate()
            .filter(|(_, e)| e.is_alive() && e.rect().overlaps(rect))
            .map(|(i, _)| i)
            .collect()
    }

    /// Damage the enemy at `index`.
    pub fn damage(
        &mut self,
        index: usize,
        amount: u32,
        impact_y: Option<f64>,
        feedback: Option<&mut dyn FeedbackSink>,
    ) -> Option<DamageResult> {
        self.enemies
            .get_mut(index)
            .map(|e| e.take_damage(amount, impact_y, feedback))
    }

    /// Camera compensation: move every enemy left by `dx`.
    pub fn shift_all_by(&mut self, dx: f64) {
        for enemy in &mut self.enemies {
            enemy.shift_by(dx);
        }
    }

    pub fn live_count(&self) -> usize {
        self.enemies.iter().filter(|e| e.is_alive()).count()
    }

    pub fn enemies(&self) -> &[Enemy] {
        &self.enemies
    }

    pub fn enemies_mut(&mut self) -> &mut [Enemy] {
        &mut self.enemies
    }

    pub fn spawn_interval(&self) -> f64 {
        self.spawn_interval
    }

    pub fn spawn_chance(&self) -> f64 {
        self.spawn_chance
    }

    pub fn len(&self) -> usize {
        self.enemies.len()
    }

    pub fn is_empty(&self) -> bool {
        self.enemies.is_empty()
    }

    pub fn clear(&mut self) {
        self.enemies.clear();
        self.spawn_cooldown = 0.0;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const GROUND: f64 = 620.0;
    const VIEW: f64 = 1280.0;

    fn eager() -> EnemySpawnConfig {
        EnemySpawnConfig {
            spawn_chance: 1.0,
            ..EnemySpawnConfig::default()
        }
    }

    #[test]
    fn spawns_past_right_edge_on_ground() {
        let mut mgr = EnemyManager::new(eager(), 11);
        mgr.update(0.016, 0.0, GROUND, 0.0, VIEW);
        assert_eq!(mgr.len(), 1);
        let e = &mgr.enemies()[0];
        assert!(e.pos.x >= VIEW + 100.0);
        assert_eq!(e.pos.y + e.height, GROUND);
    }

    #[test]
    fn no_spawn_while_scrolling_backward() {
        let mut mgr = EnemyManager::new(eager(), 11);
        mgr.update(0.016, 0.0, GROUND, -0.5, VIEW);
        assert!(mgr.is_empty());
    }

    #[test]
    fn live_cap_is_respected() {
        let mut mgr = EnemyManager::new(eager(), 11);
        for i in 0..6 {
            mgr.spawn(EnemyKind::Basic, 100.0 + i as f64 * 10.0, GROUND);
        }
        assert_eq!(mgr.check_spawn(VIEW, GROUND), None);
        assert_eq!(mgr.len(), 6);
    }

    #[test]
    fn dying_enemies_do_not_count_toward_cap() {
        let mut mgr = EnemyManager::new(eager(), 11);
        for i in 0..6 {
            mgr.spawn(EnemyKind::Basic, 100.0 + i as f64 * 10.0, GROUND);
        }
        mgr.damage(0, 10, None, None);
        assert_eq!(mgr.live_count(), 5);
        assert!(mgr.check_spawn(VIEW, GROUND).is_some());
    }

    #[test]
    fn culls_enemies_far_off_the_left_edge() {
        let mut mgr = EnemyManager::new(EnemySpawnConfig::default(), 11);
        mgr.spawn(EnemyKind::Basic, 100.0, GROUND);
        mgr.shift_all_by(400.0);
        mgr.update(0.016, 5000.0, GROUND, -1.0, VIEW);
        assert!(mgr.is_empty());
    }

    #[test]
    fn difficulty_scales_spawning_and_speed() {
        let mut mgr = EnemyManager::new(EnemySpawnConfig::default(), 11);
        mgr.spawn(EnemyKind::Fast, 900.0, GROUND);
        mgr.update_difficulty(2.0, 500.0);
        assert!((mgr.spawn_interval() - 0.4).abs() < 1e-12);
        assert!((mgr.spawn_chance() - 0.5).abs() < 1e-12);
        assert_eq!(mgr.enemies()[0].speed, 280.0);

        mgr.update_difficulty(10.0, 250.0);
        assert_eq!(mgr.spawn_interval(), 0.3);
        assert_eq!(mgr.spawn_chance(), 0.5);
    }

    #[test]
    fn zero_weight_table_is_silent_noop() {
        let mut mgr = EnemyManager::new(eager(), 11).with_spawn_table(vec![]);
        assert_eq!(mgr.try_spawn(VIEW, VIEW, GROUND), None);
        assert!(mgr.is_empty());
    }

    #[test]
    fn weighted_kinds_converge() {
        let mut mgr = EnemyManager::new(eager(), 99);
        let trials = 10_000;
        let mut counts = std::collections::HashMap::new();
        for _ in 0..trials {
            let i = mgr.try_spawn(VIEW, VIEW, GROUND).unwrap();
            *counts.entry(mgr.enemies()[i].kind).or_insert(0u32) += 1;
        }
        for (kind, weight) in EnemySpawnConfig::default().weights {
            let freq = counts.get(&kind).copied().unwrap_or(0) as f64 / trials as f64;
            assert!(
                (freq - weight / 100.0).abs() < 0.02,
                "{:?} frequency {}",
                kind,
                freq
            );
        }
    }
}
