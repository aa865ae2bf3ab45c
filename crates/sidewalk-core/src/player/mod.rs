//! The player character: run, jump, flip, dash, and take hits.
//!
//! One `update` per frame runs input handling, timers, physics, and
//! animation in that order. Positions are top-left corners in screen space.

pub mod animation;

pub use animation::{AnimationState, Pose, ShootPhase};

use glam::DVec2;

use crate::config::PlayerConfig;
use crate::core::physics::apply_friction;
use crate::core::{Collider, Rect};
use crate::input::InputSnapshot;
use crate::obstacles::Obstacle;
use crate::world::World;

/// Per-frame horizontal velocity retention without input.
const GROUND_FRICTION: f64 = 0.8;
/// Front-flip upward impulse relative to jump power.
const FLIP_IMPULSE: f64 = 0.7;
const WALL_JUMP_PUSH: f64 = 1.2;
const WALL_JUMP_LIFT: f64 = 0.9;
/// Roof landing window above and below the surface.
const ROOF_SNAP_ABOVE: f64 = 5.0;
const ROOF_SNAP_BELOW: f64 = 20.0;
/// Vertical slack before a car's body blocks sideways movement.
const SIDE_BLOCK_SLACK: f64 = 20.0;
const JUMP_SCALE_CAP: f64 = 1.2;

/// Movement summary handed to the camera each frame.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct PlayerMotion {
    pub is_walking: bool,
    pub walk_direction: f64,
    pub is_dashing: bool,
    pub dash_just_started: bool,
}

#[derive(Debug, Clone)]
pub struct Player {
    config: PlayerConfig,
    pub pos: DVec2,
    pub vel: DVec2,
    pub width: f64,
    pub height: f64,
    /// +1 facing right, -1 facing left.
    pub facing: f64,
    pub speed: f64,
    pub jump_power: f64,

    pub on_ground: bool,
    pub touching_wall: bool,
    /// Horizontal push direction for a wall jump.
    pub wall_normal: f64,
    pub is_walking: bool,
    pub walk_direction: f64,

    pub coyote_timer: f64,
    pub jump_buffer_timer: f64,
    pub wall_jump_timer: f64,

    pub is_dashing: bool,
    pub dash_just_started: bool,
    pub dash_timer: f64,
    pub dash_power: f64,
    pub dash_charges: u32,

    pub is_flipping: bool,
    pub flip_timer: f64,
    pub flip_rotation: f64,

    pub is_invincible: bool,
    pub invincibility_timer: f64,

    pub shoot_phase: ShootPhase,
    pub shoot_timer: f64,

    pub animation: AnimationState,
    pub animation_frame: u32,
    animation_timer: f64,

    jump_was_held: bool,
    dash_was_held: bool,
    last_jump_time: Option<f64>,
    /// Simulated seconds, used for the double-tap flip window.
    clock: f64,
    spawn: DVec2,
}

impl Player {
    pub fn new(config: PlayerConfig, spawn: DVec2) -> Self {
        Self {
            pos: spawn,
            vel: DVec2::ZERO,
            width: config.width,
            height: config.height,
            facing: 1.0,
            speed: config.base_speed,
            jump_power: config.jump_power,
            on_ground: false,
            touching_wall: false,
            wall_normal: 0.0,
            is_walking: false,
            walk_direction: 0.0,
            coyote_timer: 0.0,
            jump_buffer_timer: 0.0,
            wall_jump_timer: 0.0,
            is_dashing: false,
            dash_just_started: false,
            dash_timer: 0.0,
            dash_power: 0.0,
            dash_charges: 0,
            is_flipping: false,
            flip_timer: 0.0,
            flip_rotation: 0.0,
            is_invincible: false,
            invincibility_timer: 0.0,
            shoot_phase: ShootPhase::Holstered,
            shoot_timer: 0.0,
            animation: AnimationState::Idle,
            animation_frame: 0,
            animation_timer: 0.0,
            jump_was_held: false,
            dash_was_held: false,
            last_jump_time: None,
            clock: 0.0,
            spawn,
            config,
        }
    }

    pub fn config(&self) -> &PlayerConfig {
        &self.config
    }

    pub fn update(&mut self, dt: f64, input: &InputSnapshot, world: &World) -> PlayerMotion {
        self.clock += dt;
        self.handle_input(input, world);
        self.update_timers(dt);
        self.apply_physics(dt, world);
        self.update_animation(dt);

        let motion = PlayerMotion {
            is_walking: self.is_walking,
            walk_direction: self.walk_direction,
            is_dashing: self.is_dashing,
            dash_just_started: self.dash_just_started,
        };
        self.dash_just_started = false;
        motion
    }

    fn handle_input(&mut self, input: &InputSnapshot, world: &World) {
        let mut move_dir = 0.0;
        if input.left {
            move_dir = -1.0;
            if !self.is_dashing {
                self.facing = -1.0;
            }
        }
        if input.right {
            move_dir = 1.0;
            if !self.is_dashing {
                self.facing = 1.0;
            }
        }

        if self.wall_jump_timer <= 0.0 && !self.is_dashing {
            if move_dir != 0.0 {
                let at_left = self.pos.x <= 0.0 && move_dir < 0.0;
                let at_right = self.pos.x + self.width >= self.right_limit(world) && move_dir > 0.0;
                self.vel.x = if at_left || at_right {
                    0.0
                } else {
                    move_dir * self.speed
                };
            } else {
                self.vel.x = apply_friction(self.vel.x, GROUND_FRICTION);
            }
        }

        self.is_walking = input.left || input.right;
        self.walk_direction = move_dir;

        // Up doubles as a jump key, as on keyboard (W / arrow up).
        let jump_held = input.jump || input.up;
        if jump_held && !self.jump_was_held {
            let in_window = self
                .last_jump_time
                .is_some_and(|t| self.clock - t < self.config.double_jump_window);
            if in_window && !self.on_ground && !self.is_flipping {
                self.perform_front_flip();
            } else {
                self.jump_buffer_timer = self.config.jump_buffer_time;
                self.last_jump_time = Some(self.clock);
            }
        }
        self.jump_was_held = jump_held;

        if input.dash && !self.dash_was_held {
            self.try_dash(input);
        }
        self.dash_was_held = input.dash;
    }

    fn update_timers(&mut self, dt: f64) {
        if self.on_ground {
            self.coyote_timer = self.config.coyote_time;
        } else {
            self.coyote_timer -= dt;
        }

        if self.jump_buffer_timer > 0.0 {
            self.jump_buffer_timer -= dt;
            if self.on_ground || self.coyote_timer > 0.0 {
                self.perform_jump();
            } else if self.touching_wall && self.wall_jump_timer <= 0.0 {
                self.perform_wall_jump();
            }
        }

        if self.wall_jump_timer > 0.0 {
            self.wall_jump_timer -= dt;
        }

        if self.dash_timer > 0.0 {
            self.dash_timer -= dt;
            if self.dash_timer <= 0.0 {
                self.is_dashing = false;
            }
        }

        if self.flip_timer > 0.0 {
            self.flip_timer -= dt;
            let progress = 1.0 - self.flip_timer / self.config.flip_duration;
            self.flip_rotation = progress * std::f64::consts::TAU;
            if self.flip_timer <= 0.0 {
                self.is_flipping = false;
                self.flip_rotation = 0.0;
            }
        }

        match self.shoot_phase {
            ShootPhase::Draw => {
                self.shoot_timer -= dt;
                if self.shoot_timer <= 0.0 {
                    self.shoot_phase = ShootPhase::Fire;
                    self.shoot_timer = self.fire_loop_duration();
                }
            }
            ShootPhase::Fire => {
                self.shoot_timer -= dt;
                if self.shoot_timer <= 0.0 {
                    self.shoot_timer = self.fire_loop_duration();
                }
            }
            ShootPhase::Holstered => {}
        }

        if self.invincibility_timer > 0.0 {
            self.invincibility_timer -= dt;
            if self.invincibility_timer <= 0.0 {
                self.is_invincible = false;
            }
        }
    }

    fn apply_physics(&mut self, dt: f64, world: &World) {
        if !self.on_ground && !self.is_dashing {
            self.vel.y += self.config.gravity * dt;
        }
        self.pos += self.vel * dt;

        self.touching_wall = false;
        let on_platform = self.resolve_platforms(world.obstacles().platforms());

        let ground_y = world.ground_y();
        if !on_platform {
            if self.pos.y + self.height >= ground_y - self.config.ground_tolerance {
                self.pos.y = ground_y - self.height;
                self.vel.y = 0.0;
                self.on_ground = true;
            } else {
                self.on_ground = false;
            }
        }

        if self.pos.x < 0.0 {
            self.pos.x = 0.0;
            self.stop_at_edge();
        }
        let right_limit = self.right_limit(world);
        if self.pos.x + self.width > right_limit {
            self.pos.x = right_limit - self.width;
            self.stop_at_edge();
        }

        if self.pos.y > world.height() {
            self.pos.y = ground_y - self.height;
            self.vel.y = 0.0;
            self.on_ground = true;
        }
    }

    /// Soft right bound: the player's right side stops `edge_margin` short of the viewport edge.
    fn right_limit(&self, world: &World) -> f64 {
        world.width() - self.config.edge_margin
    }

    fn stop_at_edge(&mut self) {
        self.vel.x = 0.0;
        if self.is_dashing {
            self.is_dashing = false;
            self.dash_timer = 0.0;
        }
    }

    /// Land on car roofs and stop at car bodies. Returns true when standing on one.
    fn resolve_platforms<'a>(&mut self, cars: impl Iterator<Item = &'a Obstacle>) -> bool {
        for car in cars {
            let (left, right) = car.roof_span();
            let bottom = self.pos.y + self.height;
            let p_left = self.pos.x;
            let p_right = self.pos.x + self.width;

            if p_right > left && p_left < right && self.vel.y >= 0.0 {
                if let Some(roof) = car.roof_height_at(self.pos.x + self.width / 2.0) {
                    if bottom >= roof - ROOF_SNAP_ABOVE && bottom <= roof + ROOF_SNAP_BELOW {
                        self.pos.y = roof - self.height;
                        self.vel.y = 0.0;
                        self.on_ground = true;
                        return true;
                    }
                }
            }

            let car_bottom = car.pos.y + car.height;
            if bottom > car.roof_level() + SIDE_BLOCK_SLACK && self.pos.y < car_bottom - SIDE_BLOCK_SLACK
            {
                if self.vel.x > 0.0 && p_right > left && p_left < left {
                    self.pos.x = left - self.width;
                    self.vel.x = 0.0;
                    self.touching_wall = true;
                    self.wall_normal = -1.0;
                } else if self.vel.x < 0.0 && p_left < right && p_right > right {
                    self.pos.x = right;
                    self.vel.x = 0.0;
                    self.touching_wall = true;
                    self.wall_normal = 1.0;
                }
            }
        }
        false
    }

    fn update_animation(&mut self, dt: f64) {
        self.animation_timer += dt;
        let pose = Pose {
            shooting: self.is_shooting(),
            flipping: self.is_flipping,
            dashing: self.is_dashing,
            on_ground: self.on_ground,
            speed_x: self.vel.x,
        };
        self.animation = animation::select_state(&pose);
        self.animation_frame = match self.animation {
            AnimationState::ShootingFlip | AnimationState::Flipping => {
                animation::flip_frame(self.flip_progress())
            }
            AnimationState::Shooting => match self.shoot_phase {
                ShootPhase::Draw => animation::draw_frame(
                    1.0 - self.shoot_timer / self.config.shoot_draw_duration,
                ),
                ShootPhase::Fire => {
                    animation::fire_frame(1.0 - self.shoot_timer / self.fire_loop_duration())
                }
                ShootPhase::Holstered => 0,
            },
            AnimationState::Running => animation::run_frame(self.animation_timer),
            _ => 0,
        };
    }

    fn flip_progress(&self) -> f64 {
        1.0 - self.flip_timer / self.config.flip_duration
    }

    fn fire_loop_duration(&self) -> f64 {
        self.config.shoot_fire_frame_duration * animation::FIRE_LOOP_FRAMES as f64
    }

    fn perform_jump(&mut self) {
        self.vel.y = -self.jump_power;
        self.jump_buffer_timer = 0.0;
        self.coyote_timer = 0.0;
        self.on_ground = false;
    }

    fn perform_wall_jump(&mut self) {
        self.vel.x = self.wall_normal * self.speed * WALL_JUMP_PUSH;
        self.vel.y = -self.jump_power * WALL_JUMP_LIFT;
        self.wall_jump_timer = self.config.wall_jump_duration;
        self.jump_buffer_timer = 0.0;
        self.facing = self.wall_normal;
        self.touching_wall = false;
    }

    fn perform_front_flip(&mut self) {
        self.is_flipping = true;
        self.flip_timer = self.config.flip_duration;
        self.flip_rotation = 0.0;
        self.vel.y = -self.jump_power * FLIP_IMPULSE;
    }

    pub fn can_dash(&self) -> bool {
        self.dash_charges > 0 && !self.is_dashing
    }

    /// Start a dash toward the held direction, or along facing when none is held.
    /// Consumes exactly one charge.
    pub fn try_dash(&mut self, input: &InputSnapshot) -> bool {
        if !self.can_dash() {
            return false;
        }

        let mut dir = DVec2::ZERO;
        if input.left {
            dir.x = -1.0;
        } else if input.right {
            dir.x = 1.0;
        }
        if input.up {
            dir.y = -1.0;
        } else if input.down {
            dir.y = 1.0;
        }
        if dir == DVec2::ZERO {
            dir.x = self.facing;
        }

        self.vel = dir.normalize_or_zero() * self.config.dash_speed;
        self.is_dashing = true;
        self.dash_just_started = true;
        self.dash_timer = self.config.dash_duration;
        self.dash_charges -= 1;
        true
    }

    /// Absorb a hit. Returns the damage to apply, or 0 while invincible.
    pub fn take_damage(&mut self, amount: f64) -> f64 {
        if self.is_invincible {
            return 0.0;
        }
        self.is_invincible = true;
        self.invincibility_timer = self.config.invincibility_duration;
        amount
    }

    pub fn is_vulnerable(&self) -> bool {
        !self.is_invincible
    }

    /// Fill the dash bar; every full bar becomes a charge until the cap.
    pub fn add_dash_power(&mut self, amount: f64) {
        if amount.is_nan() || amount <= 0.0 {
            return;
        }
        let max = self.config.dash_power_max;
        let cap = self.config.dash_max_charges;
        self.dash_power += amount;
        while self.dash_power >= max && self.dash_charges < cap {
            self.dash_power -= max;
            self.dash_charges += 1;
        }
        if self.dash_charges >= cap {
            self.dash_power = 0.0;
        }
    }

    /// Bar fill in [0, 1].
    pub fn dash_power_percent(&self) -> f64 {
        (self.dash_power / self.config.dash_power_max).clamp(0.0, 1.0)
    }

    pub fn is_shooting(&self) -> bool {
        self.shoot_phase != ShootPhase::Holstered
    }

    /// Begin the draw phase. Ignored while already drawn or firing.
    pub fn start_shooting(&mut self) {
        if self.shoot_phase == ShootPhase::Holstered {
            self.shoot_phase = ShootPhase::Draw;
            self.shoot_timer = self.config.shoot_draw_duration;
        }
    }

    pub fn stop_shooting(&mut self) {
        self.shoot_phase = ShootPhase::Holstered;
        self.shoot_timer = 0.0;
    }

    /// Match movement to the world scroll speed.
    pub fn update_speed(&mut self, world_scroll_speed: f64) {
        self.speed = world_scroll_speed;
        let ratio = world_scroll_speed / self.config.base_speed;
        self.jump_power = self.config.jump_power * (ratio * 0.5 + 0.5).min(JUMP_SCALE_CAP);
    }

    /// Put the player back at `pos` (or the spawn point) with a clean slate.
    pub fn respawn(&mut self, pos: Option<DVec2>) {
        self.pos = pos.unwrap_or(self.spawn);
        self.vel = DVec2::ZERO;
        self.on_ground = false;
        self.touching_wall = false;
        self.is_dashing = false;
        self.dash_just_started = false;
        self.dash_power = 0.0;
        self.dash_charges = 0;
        self.dash_timer = 0.0;
        self.dash_was_held = false;
        self.wall_jump_timer = 0.0;
        self.coyote_timer = 0.0;
        self.jump_buffer_timer = 0.0;
        self.is_flipping = false;
        self.flip_timer = 0.0;
        self.flip_rotation = 0.0;
        self.is_invincible = false;
        self.invincibility_timer = 0.0;
        self.last_jump_time = None;
        self.stop_shooting();
    }

    /// Camera compensation.
    pub fn shift_by(&mut self, dx: f64) {
        self.pos.x -= dx;
    }

    pub fn rect(&self) -> Rect {
        Rect::new(self.pos.x, self.pos.y, self.width, self.height)
    }

    pub fn center(&self) -> DVec2 {
        self.rect().center()
    }
}

impl Collider for Player {
    fn bounds(&self) -> Rect {
        self.rect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::GameConfig;
    use crate::core::Rng;
    use crate::input::Action;
    use crate::obstacles::ObstacleKind;

    const DT: f64 = 1.0 / 60.0;

    fn world() -> World {
        World::new(&GameConfig::default())
    }

    fn grounded(world: &World) -> Player {
        let config = PlayerConfig::default();
        let x = world.width() * 0.5;
        let mut p = Player::new(config, DVec2::new(x, world.ground_y() - 150.0));
        p.update(DT, &InputSnapshot::default(), world);
        assert!(p.on_ground);
        p
    }

    #[test]
    fn left_and_dash_starts_dash() {
        let w = world();
        let mut p = grounded(&w);
        p.dash_charges = 1;
        let input = InputSnapshot::default()
            .with(Action::Left)
            .with(Action::Dash);
        p.update(DT, &input, &w);
        assert!(p.is_dashing);
        assert_eq!(p.dash_charges, 0);
        assert!(p.vel.x < 0.0);
        assert_eq!(p.vel.x, -400.0);
    }

    #[test]
    fn dash_requires_charge_and_not_dashing() {
        let w = world();
        let mut p = grounded(&w);
        let input = InputSnapshot::default().with(Action::Dash);
        assert!(!p.try_dash(&input));
        p.dash_charges = 2;
        assert!(p.try_dash(&input));
        assert!(!p.try_dash(&input), "already dashing");
        assert_eq!(p.dash_charges, 1);
    }

    #[test]
    fn dash_key_is_edge_triggered() {
        let w = world();
        let mut p = grounded(&w);
        p.dash_charges = 5;
        let held = InputSnapshot::default().with(Action::Dash);
        for _ in 0..60 {
            p.update(DT, &held, &w);
        }
        assert_eq!(p.dash_charges, 4);
    }

    #[test]
    fn diagonal_dash_is_normalized_and_ignores_gravity() {
        let w = world();
        let mut p = grounded(&w);
        p.dash_charges = 1;
        let input = InputSnapshot::default()
            .with(Action::Right)
            .with(Action::Up);
        assert!(p.try_dash(&input));
        assert!((p.vel.length() - 400.0).abs() < 1e-9);
        let vy = p.vel.y;
        p.update(DT, &InputSnapshot::default(), &w);
        assert_eq!(p.vel.y, vy, "gravity is suspended while dashing");
    }

    #[test]
    fn dash_ends_after_duration() {
        let w = world();
        let mut p = grounded(&w);
        p.dash_charges = 1;
        p.try_dash(&InputSnapshot::default());
        for _ in 0..15 {
            p.update(DT, &InputSnapshot::default(), &w);
        }
        assert!(!p.is_dashing);
    }

    #[test]
    fn dash_power_accumulation_is_associative() {
        let mut rng = Rng::new(31);
        for _ in 0..50 {
            // Quarter-unit steps keep the sums exact in binary.
            let steps: Vec<f64> = (0..rng.next_int(40) + 1)
                .map(|_| rng.next_int(400) as f64 * 0.25)
                .collect();
            let total: f64 = steps.iter().sum();

            let mut once = Player::new(PlayerConfig::default(), DVec2::ZERO);
            once.add_dash_power(total);
            let mut many = Player::new(PlayerConfig::default(), DVec2::ZERO);
            for s in &steps {
                many.add_dash_power(*s);
            }
            assert_eq!(once.dash_charges, many.dash_charges, "steps {:?}", steps);
            assert_eq!(once.dash_power, many.dash_power, "steps {:?}", steps);
        }
    }

    #[test]
    fn dash_power_caps_and_ignores_negatives() {
        let mut p = Player::new(PlayerConfig::default(), DVec2::ZERO);
        p.add_dash_power(-50.0);
        assert_eq!(p.dash_power, 0.0);
        p.add_dash_power(250.0);
        assert_eq!((p.dash_charges, p.dash_power), (2, 50.0));
        p.add_dash_power(1_000_000.0);
        assert_eq!((p.dash_charges, p.dash_power), (99, 0.0));
    }

    #[test]
    fn three_coins_make_a_charge() {
        let mut p = Player::new(PlayerConfig::default(), DVec2::ZERO);
        for _ in 0..3 {
            p.add_dash_power(33.34);
        }
        assert_eq!(p.dash_charges, 1);
    }

    #[test]
    fn second_hit_within_window_is_ignored() {
        let w = world();
        let mut p = grounded(&w);
        assert_eq!(p.take_damage(20.0), 20.0);
        assert_eq!(p.take_damage(20.0), 0.0);
        for _ in 0..61 {
            p.update(DT, &InputSnapshot::default(), &w);
        }
        assert!(p.is_vulnerable());
        assert_eq!(p.take_damage(25.0), 25.0);
    }

    #[test]
    fn jump_leaves_ground_and_lands() {
        let w = world();
        let mut p = grounded(&w);
        let jump = InputSnapshot::default().with(Action::Jump);
        p.update(DT, &jump, &w);
        assert!(!p.on_ground);
        assert!(p.vel.y < 0.0);
        for _ in 0..120 {
            p.update(DT, &InputSnapshot::default(), &w);
        }
        assert!(p.on_ground);
        assert_eq!(p.pos.y + p.height, w.ground_y());
    }

    #[test]
    fn coyote_time_allows_late_jump() {
        let w = world();
        let mut p = grounded(&w);
        p.coyote_timer = 0.1;
        p.on_ground = false;
        p.pos.y -= 50.0;
        p.jump_buffer_timer = 0.1;
        p.update(DT, &InputSnapshot::default(), &w);
        assert!(p.vel.y < -400.0, "buffered jump fires within coyote time");
    }

    #[test]
    fn double_tap_in_air_front_flips() {
        let w = world();
        let mut p = grounded(&w);
        let jump = InputSnapshot::default().with(Action::Jump);
        let idle = InputSnapshot::default();
        p.update(DT, &jump, &w);
        p.update(DT, &idle, &w);
        p.update(DT, &jump, &w);
        assert!(p.is_flipping);
        assert_eq!(p.animation, AnimationState::Flipping);

        for _ in 0..40 {
            p.update(DT, &idle, &w);
        }
        assert!(!p.is_flipping);
        assert_eq!(p.flip_rotation, 0.0);
    }

    #[test]
    fn friction_brings_player_to_rest() {
        let w = world();
        let mut p = grounded(&w);
        p.update(DT, &InputSnapshot::default().with(Action::Right), &w);
        assert_eq!(p.vel.x, 250.0);
        assert_eq!(p.animation, AnimationState::Running);
        for _ in 0..40 {
            p.update(DT, &InputSnapshot::default(), &w);
        }
        assert_eq!(p.vel.x, 0.0);
        assert_eq!(p.animation, AnimationState::Idle);
    }

    #[test]
    fn left_edge_cancels_dash() {
        let w = world();
        let mut p = grounded(&w);
        p.pos.x = 2.0;
        p.dash_charges = 1;
        p.update(DT, &InputSnapshot::default().with(Action::Left).with(Action::Dash), &w);
        assert_eq!(p.pos.x, 0.0);
        assert!(!p.is_dashing);
        assert_eq!(p.vel.x, 0.0);
    }

    #[test]
    fn right_edge_keeps_margin() {
        let w = world();
        let mut p = grounded(&w);
        p.pos.x = w.width() - p.width - 12.0;
        for _ in 0..10 {
            p.update(DT, &InputSnapshot::default().with(Action::Right), &w);
        }
        assert_eq!(p.pos.x + p.width, w.width() - 10.0);
    }

    #[test]
    fn pushing_against_right_margin_holds_still() {
        let mut w = world();
        w.obstacles_mut().clear();
        let mut p = grounded(&w);
        p.pos.x = w.width() - 10.0 - p.width;
        let x = p.pos.x;
        p.update(DT, &InputSnapshot::default().with(Action::Right), &w);
        assert_eq!(p.vel.x, 0.0);
        assert_eq!(p.pos.x, x);
    }

    #[test]
    fn up_also_jumps() {
        let w = world();
        let mut p = grounded(&w);
        p.update(DT, &InputSnapshot::default().with(Action::Up), &w);
        assert!(!p.on_ground);
        assert!(p.vel.y < 0.0);
    }

    #[test]
    fn lands_on_police_car_roof() {
        let mut w = world();
        let ground = w.ground_y();
        let idx = w.obstacles_mut().spawn(ObstacleKind::PoliceCar, 500.0, ground);
        let car = w.obstacles().obstacles()[idx].clone();
        let roof = car.roof_level();

        let mut p = Player::new(PlayerConfig::default(), DVec2::new(600.0, roof - 150.0 - 40.0));
        for _ in 0..60 {
            p.update(DT, &InputSnapshot::default(), &w);
        }
        assert!(p.on_ground);
        assert!((p.pos.y + p.height - roof).abs() < 1e-9);
    }

    #[test]
    fn car_body_blocks_walking() {
        let mut w = world();
        let ground = w.ground_y();
        w.obstacles_mut().spawn(ObstacleKind::PoliceCar, 500.0, ground);
        let mut p = grounded(&w);
        p.pos.x = 500.0 + 20.0 - p.width - 3.0;
        p.update(DT, &InputSnapshot::default().with(Action::Right), &w);
        assert_eq!(p.pos.x + p.width, 520.0);
        assert!(p.touching_wall);
    }

    #[test]
    fn shooting_phases_draw_then_fire_loop() {
        let w = world();
        let mut p = grounded(&w);
        p.start_shooting();
        assert_eq!(p.shoot_phase, ShootPhase::Draw);
        p.update(DT, &InputSnapshot::default(), &w);
        assert_eq!(p.animation, AnimationState::Shooting);
        assert!(p.animation_frame <= 2);

        for _ in 0..10 {
            p.update(DT, &InputSnapshot::default(), &w);
        }
        assert_eq!(p.shoot_phase, ShootPhase::Fire);
        assert!((3..=7).contains(&p.animation_frame));

        p.stop_shooting();
        assert!(!p.is_shooting());
    }

    #[test]
    fn speed_tracks_world_and_scales_jump() {
        let mut p = Player::new(PlayerConfig::default(), DVec2::ZERO);
        p.update_speed(250.0);
        assert_eq!(p.jump_power, 450.0);
        p.update_speed(450.0);
        assert_eq!(p.speed, 450.0);
        assert!((p.jump_power - 450.0 * 1.2).abs() < 1e-9);
    }

    #[test]
    fn respawn_resets_economy_and_timers() {
        let mut p = Player::new(PlayerConfig::default(), DVec2::new(10.0, 20.0));
        p.dash_charges = 3;
        p.dash_power = 40.0;
        p.is_invincible = true;
        p.pos = DVec2::new(999.0, 999.0);
        p.respawn(None);
        assert_eq!(p.pos, DVec2::new(10.0, 20.0));
        assert_eq!(p.dash_charges, 0);
        assert_eq!(p.dash_power, 0.0);
        assert!(p.is_vulnerable());
    }
}
