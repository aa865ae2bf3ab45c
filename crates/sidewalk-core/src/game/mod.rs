//! Frame orchestration: one `update` drives every subsystem in a fixed order
//! and owns the run's score, health, and game-over state.

mod collisions;

use glam::DVec2;

use crate::api::{EventFeedback, EventKind, FeedbackSink, GameEvent};
use crate::config::GameConfig;
use crate::core::FrameClock;
use crate::enemies::EnemyManager;
use crate::input::InputSnapshot;
use crate::player::Player;
use crate::weapons::WeaponSystem;
use crate::world::World;

/// How far below the viewport the player may fall before the run ends.
const FALL_DEATH_MARGIN: f64 = 200.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameState {
    Playing,
    GameOver,
}

/// The whole simulation. The feedback sink receives combat text, combo, and
/// screen shake requests along with every [`GameEvent`].
pub struct Game<F: FeedbackSink = EventFeedback> {
    config: GameConfig,
    player: Player,
    world: World,
    weapons: WeaponSystem,
    enemies: EnemyManager,
    feedback: F,
    clock: FrameClock,
    state: GameState,
    hp: f64,
    score: u32,
    high_score: u32,
    coins_collected: u32,
}

impl Game<EventFeedback> {
    pub fn new(config: GameConfig) -> Self {
        Self::with_feedback(config, EventFeedback::new())
    }
}

impl<F: FeedbackSink> Game<F> {
    pub fn with_feedback(config: GameConfig, feedback: F) -> Self {
        let world = World::new(&config);
        let player = Player::new(config.player.clone(), spawn_point(&config, &world));
        let weapons = WeaponSystem::new(config.weapon.clone(), config.seed.wrapping_add(3));
        let enemies = EnemyManager::new(config.enemies.clone(), config.seed.wrapping_add(2));
        let clock = FrameClock::new(config.max_frame_dt);

        log::info!(
            "new run: viewport {}x{}, seed {:#x}",
            config.viewport_width,
            config.viewport_height,
            config.seed
        );

        Self {
            hp: config.max_health,
            player,
            world,
            weapons,
            enemies,
            feedback,
            clock,
            state: GameState::Playing,
            score: 0,
            high_score: 0,
            coins_collected: 0,
            config,
        }
    }

    /// Feed one host frame. Returns true when the simulation advanced.
    pub fn tick(&mut self, frame_dt: f64, input: &InputSnapshot) -> bool {
        if self.state == GameState::GameOver {
            return false;
        }
        match self.clock.step(frame_dt) {
            Some(dt) => {
                self.update(dt, input);
                true
            }
            None => false,
        }
    }

    /// Advance the simulation by an already clamped `dt`.
    pub fn update(&mut self, dt: f64, input: &InputSnapshot) {
        if self.state == GameState::GameOver {
            return;
        }

        let motion = self.player.update(dt, input, &self.world);

        let ground_y = self.world.ground_y();
        let width = self.world.width();
        let weapon = self
            .weapons
            .update(dt, input, &self.player, width, ground_y);
        if weapon.fired || self.weapons.is_visible() {
            self.player.start_shooting();
        } else {
            self.player.stop_shooting();
        }
        if weapon.reload_finished {
            self.feedback.notify(GameEvent::new(
                EventKind::Reloaded,
                self.weapons.ammo() as f64,
                0.0,
                0.0,
            ));
        }

        self.enemies
            .update(dt, self.player.pos.x, ground_y, self.world.direction(), width);

        self.feedback.tick(dt);

        self.resolve_collisions();
        if self.state == GameState::GameOver {
            return;
        }

        let scroll = self.world.update(dt, &motion, self.player.pos.x);
        self.player.update_speed(self.world.scroll_speed());
        self.enemies
            .update_difficulty(self.world.difficulty(), self.world.scroll_speed());

        if scroll != 0.0 {
            self.player.shift_by(scroll);
            self.enemies.shift_all_by(scroll);
        }

        if self.player.pos.y > self.world.height() + FALL_DEATH_MARGIN {
            log::warn!("player fell out of the world at y={:.0}", self.player.pos.y);
            self.hp = 0.0;
            self.game_over();
        }
    }

    /// Apply damage that already passed the player's invincibility check.
    fn damage_player(&mut self, amount: f64, shake: (f64, f64)) {
        if amount <= 0.0 {
            return;
        }
        self.hp = (self.hp - amount).max(0.0);
        self.feedback.screen_shake(shake.0, shake.1);
        self.feedback
            .notify(GameEvent::new(EventKind::PlayerDamaged, amount, self.hp, 0.0));
        log::debug!("player took {} damage, {} hp left", amount, self.hp);
        if self.hp <= 0.0 {
            self.game_over();
        }
    }

    fn game_over(&mut self) {
        if self.state == GameState::GameOver {
            return;
        }
        self.state = GameState::GameOver;
        if self.score > self.high_score {
            self.high_score = self.score;
        }
        self.feedback.notify(GameEvent::new(
            EventKind::GameOver,
            self.score as f64,
            self.high_score as f64,
            0.0,
        ));
        log::info!(
            "game over: score {}, high score {}",
            self.score,
            self.high_score
        );
    }

    /// Start a fresh run. The high score and the feedback sink survive.
    pub fn reset(&mut self) {
        self.world.reset();
        let spawn = spawn_point(&self.config, &self.world);
        self.player.respawn(Some(spawn));
        self.player.update_speed(self.world.scroll_speed());
        self.weapons.reset();
        self.enemies.clear();
        self.clock.reset();
        self.state = GameState::Playing;
        self.hp = self.config.max_health;
        self.score = 0;
        self.coins_collected = 0;
        log::info!("run reset");
    }

    /// Follow a viewport change. Everything standing on the ground moves
    /// with it.
    pub fn resize(&mut self, width: f64, height: f64) {
        if !(width > 0.0 && height > 0.0) {
            log::warn!("ignoring resize to {}x{}", width, height);
            return;
        }
        let shift = height - self.world.height();
        self.world.resize(width, height);
        self.player.pos.y += shift;
        for enemy in self.enemies.enemies_mut() {
            enemy.pos.y += shift;
        }
        self.config.viewport_width = width;
        self.config.viewport_height = height;
        log::info!("viewport resized to {}x{}", width, height);
    }

    pub fn pause(&mut self) {
        self.clock.pause();
    }

    pub fn resume(&mut self) {
        self.clock.resume();
    }

    pub fn is_paused(&self) -> bool {
        self.clock.is_paused()
    }

    pub fn state(&self) -> GameState {
        self.state
    }

    pub fn is_game_over(&self) -> bool {
        self.state == GameState::GameOver
    }

    pub fn hp(&self) -> f64 {
        self.hp
    }

    pub fn max_hp(&self) -> f64 {
        self.config.max_health
    }

    pub fn score(&self) -> u32 {
        self.score
    }

    pub fn high_score(&self) -> u32 {
        self.high_score
    }

    /// Seed the high score from host storage.
    pub fn set_high_score(&mut self, high_score: u32) {
        self.high_score = high_score;
    }

    pub fn coins_collected(&self) -> u32 {
        self.coins_collected
    }

    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    pub fn clock(&self) -> &FrameClock {
        &self.clock
    }

    pub fn player(&self) -> &Player {
        &self.player
    }

    pub fn player_mut(&mut self) -> &mut Player {
        &mut self.player
    }

    pub fn world(&self) -> &World {
        &self.world
    }

    pub fn world_mut(&mut self) -> &mut World {
        &mut self.world
    }

    pub fn weapons(&self) -> &WeaponSystem {
        &self.weapons
    }

    pub fn enemies(&self) -> &EnemyManager {
        &self.enemies
    }

    pub fn enemies_mut(&mut self) -> &mut EnemyManager {
        &mut self.enemies
    }

    pub fn feedback(&self) -> &F {
        &self.feedback
    }

    pub fn feedback_mut(&mut self) -> &mut F {
        &mut self.feedback
    }
}

/// Centre of the viewport, standing on the ground.
fn spawn_point(config: &GameConfig, world: &World) -> DVec2 {
    DVec2::new(
        world.width() * 0.5,
        world.ground_y() - config.player.height,
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::NullFeedback;
    use crate::enemies::{AiState, EnemyKind};
    use crate::input::Action;
    use crate::obstacles::ObstacleKind;
    use crate::world::PickupKind;

    const DT: f64 = 1.0 / 60.0;

    /// A run with nothing on screen but the player.
    fn empty_game() -> Game {
        let mut game = Game::new(GameConfig::default());
        game.world.clear_pickups();
        game.world.obstacles_mut().clear();
        game.enemies.clear();
        game
    }

    fn idle() -> InputSnapshot {
        InputSnapshot::default()
    }

    #[test]
    fn starts_centred_on_the_ground() {
        let game = Game::new(GameConfig::default());
        let p = game.player();
        assert_eq!(p.pos.x, 640.0);
        assert_eq!(p.pos.y + p.height, game.world().ground_y());
        assert_eq!(game.hp(), 100.0);
        assert_eq!(game.state(), GameState::Playing);
    }

    #[test]
    fn left_and_dash_scenario() {
        let mut game = empty_game();
        game.update(DT, &idle());
        game.player.dash_charges = 1;
        let input = idle().with(Action::Left).with(Action::Dash);
        game.update(DT, &input);
        let p = game.player();
        assert!(p.is_dashing);
        assert_eq!(p.dash_charges, 0);
        assert!(p.vel.x < 0.0);
    }

    #[test]
    fn coins_pay_score_and_dash_power() {
        let mut game = empty_game();
        let x = game.player.pos.x;
        for i in 0..3 {
            game.world.add_pickup(PickupKind::Coin, x + 10.0 + i as f64);
        }
        game.update(DT, &idle());
        assert_eq!(game.score(), 30);
        assert_eq!(game.coins_collected(), 3);
        assert_eq!(game.player().dash_charges, 1);
        assert_eq!(game.feedback().count_of(EventKind::CoinCollected), 3);
    }

    #[test]
    fn health_pack_heals_up_to_max() {
        let mut game = empty_game();
        game.hp = 90.0;
        let x = game.player.pos.x;
        game.world.add_pickup(PickupKind::HealthPack, x + 10.0);
        game.update(DT, &idle());
        assert_eq!(game.hp(), 100.0);
        assert_eq!(game.score(), 25);
        assert_eq!(game.feedback().count_of(EventKind::TextBonus), 1);
    }

    #[test]
    fn obstacle_hit_damages_once_and_destroys() {
        let mut game = empty_game();
        let ground = game.world.ground_y();
        let x = game.player.pos.x + 10.0;
        let idx = game
            .world
            .obstacles_mut()
            .spawn(ObstacleKind::Block, x, ground);
        game.update(DT, &idle());
        assert_eq!(game.hp(), 75.0);
        assert!(game.world.obstacles().obstacles()[idx].destroying);
        assert!(!game.player().is_vulnerable());

        game.world
            .obstacles_mut()
            .spawn(ObstacleKind::Fence, x, ground);
        game.update(DT, &idle());
        assert_eq!(game.hp(), 75.0, "invincibility blocks the second hit");
    }

    #[test]
    fn dash_smashes_small_obstacles() {
        let mut game = empty_game();
        let ground = game.world.ground_y();
        let x = game.player.pos.x + 10.0;
        game.player.is_dashing = true;
        game.player.dash_timer = 1.0;
        game.world
            .obstacles_mut()
            .spawn(ObstacleKind::Fence, x, ground);
        game.update(DT, &idle());
        assert_eq!(game.hp(), 100.0);
        assert_eq!(game.score(), 5);
        assert_eq!(game.feedback().count_of(EventKind::ObstacleDestroyed), 1);
    }

    #[test]
    fn police_car_never_hurts() {
        let mut game = empty_game();
        let ground = game.world.ground_y();
        let x = game.player.pos.x - 50.0;
        game.world
            .obstacles_mut()
            .spawn(ObstacleKind::PoliceCar, x, ground);
        for _ in 0..10 {
            game.update(DT, &idle());
        }
        assert_eq!(game.hp(), 100.0);
    }

    #[test]
    fn enemy_contact_hurts_and_shakes() {
        let mut game = empty_game();
        let ground = game.world.ground_y();
        let x = game.player.pos.x;
        game.enemies.spawn(EnemyKind::Tank, x, ground);
        game.update(DT, &idle());
        assert_eq!(game.hp(), 75.0);
        assert_eq!(game.feedback().count_of(EventKind::ScreenShake), 1);
        game.update(DT, &idle());
        assert_eq!(game.hp(), 75.0);
    }

    #[test]
    fn bullets_kill_enemies_for_score() {
        let mut game = empty_game();
        let ground = game.world.ground_y();
        let x = game.player.pos.x + 200.0;
        let idx = game.enemies.spawn(EnemyKind::Basic, x, ground);
        let shoot = idle().with(Action::Shoot);
        // The barrel sits above a basic enemy's head, so aim down first.
        game.update(DT, &shoot);
        game.update(DT, &idle());
        game.update(DT, &idle().with_aim(150.0, 0.0));
        assert!(game.weapons().aim_angle() > 0.25);
        for _ in 0..60 {
            game.update(DT, &shoot);
            if game.enemies.enemies()[idx].is_dying() {
                break;
            }
        }
        let enemy = &game.enemies.enemies()[idx];
        assert!(enemy.is_dying());
        assert_eq!(enemy.state, AiState::Dying);
        assert_eq!(game.feedback().count_of(EventKind::EnemyKilled), 1);
        assert!(game.score() >= 60);
        assert!(game.feedback().combo() >= 1);
    }

    #[test]
    fn lethal_damage_ends_the_run() {
        let mut game = empty_game();
        game.score = 40;
        game.hp = 10.0;
        let ground = game.world.ground_y();
        let x = game.player.pos.x;
        game.enemies.spawn(EnemyKind::Basic, x, ground);
        game.update(DT, &idle());
        assert!(game.is_game_over());
        assert_eq!(game.hp(), 0.0);
        assert_eq!(game.high_score(), 40);
        assert_eq!(game.feedback().count_of(EventKind::GameOver), 1);
        assert!(!game.tick(DT, &idle()));
    }

    #[test]
    fn pause_freezes_the_simulation() {
        let mut game = empty_game();
        game.pause();
        assert!(!game.tick(DT, &idle().with(Action::Right)));
        assert_eq!(game.player().vel.x, 0.0);
        game.resume();
        assert!(game.tick(DT, &idle().with(Action::Right)));
        assert!(game.player().vel.x > 0.0);
    }

    #[test]
    fn long_frames_are_clamped() {
        let mut game = empty_game();
        assert!(game.tick(1.0, &idle()));
        assert!((game.clock().elapsed() - 0.05).abs() < 1e-12);
    }

    #[test]
    fn reset_keeps_high_score() {
        let mut game = empty_game();
        game.set_high_score(500);
        game.score = 120;
        game.hp = 5.0;
        game.reset();
        assert_eq!(game.score(), 0);
        assert_eq!(game.hp(), 100.0);
        assert_eq!(game.high_score(), 500);
        assert_eq!(game.player().pos.x, 640.0);
        assert!(!game.world().coins().is_empty());
    }

    #[test]
    fn scroll_moves_player_and_enemies_together() {
        let mut game = empty_game();
        let ground = game.world.ground_y();
        game.player.pos.x = 1000.0;
        let idx = game.enemies.spawn(EnemyKind::Basic, 1200.0, ground);
        let run = idle().with(Action::Right);
        game.update(DT, &run);
        game.update(DT, &run);
        let before_gap = game.enemies.enemies()[idx].pos.x - game.player.pos.x;
        game.update(DT, &run);
        assert!(game.world().camera.camera_x > 0.0);
        let after_gap = game.enemies.enemies()[idx].pos.x - game.player.pos.x;
        // Only the actors' own motion changes the gap; the scroll does not.
        let enemy = &game.enemies.enemies()[idx];
        let expected = before_gap + (enemy.vel.x - game.player.vel.x) * DT;
        assert!((after_gap - expected).abs() < 1e-6);
    }

    #[test]
    fn works_with_a_null_sink() {
        let mut game = Game::with_feedback(GameConfig::default(), NullFeedback);
        for _ in 0..120 {
            game.tick(DT, &InputSnapshot::default().with(Action::Right));
        }
        assert!(game.world().camera.camera_x >= 0.0);
        assert_eq!(game.feedback().combo(), 0);
    }

    #[test]
    fn resize_keeps_the_player_on_the_ground() {
        let mut game = empty_game();
        game.update(DT, &idle());
        game.resize(1600.0, 900.0);
        let p = game.player();
        assert_eq!(p.pos.y + p.height, game.world().ground_y());
        assert_eq!(game.config().viewport_width, 1600.0);

        game.resize(0.0, 900.0);
        assert_eq!(game.world().width(), 1600.0);
    }
}
