//! The player's sidearm: ammo economy, projectiles, and cosmetic casings.

pub mod bullet;
pub mod casing;

pub use bullet::Bullet;
pub use casing::ShellCasing;

use glam::DVec2;

use crate::config::WeaponConfig;
use crate::core::{Collider, Rng};
use crate::input::InputSnapshot;
use crate::player::Player;

/// Barrel offset from the player's centre: forward along facing, then up.
const BARREL_FORWARD: f64 = 45.0;
const BARREL_UP: f64 = 55.0;
/// Stick deflection ignored as noise.
const STICK_DEADZONE: f64 = 0.1;

/// One bullet striking one target.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BulletHit {
    /// Index into the target slice.
    pub target: usize,
    /// Bullet height at impact, for head-shot checks.
    pub impact_y: f64,
    pub damage: u32,
}

/// What happened during one [`WeaponSystem::update`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct WeaponFrame {
    pub fired: bool,
    pub reload_started: bool,
    pub reload_finished: bool,
}

pub struct WeaponSystem {
    config: WeaponConfig,
    ammo: u32,
    reloading: bool,
    reload_timer: f64,
    fire_timer: f64,
    aim_angle: f64,
    recoil: f64,
    muzzle_flash_timer: f64,
    /// Keeps the weapon drawn for a moment after the last shot.
    visible_timer: f64,
    visible: bool,
    bullets: Vec<Bullet>,
    casings: Vec<ShellCasing>,
    rng: Rng,
}

impl WeaponSystem {
    pub fn new(config: WeaponConfig, seed: u64) -> Self {
        Self {
            ammo: config.max_ammo,
            config,
            reloading: false,
            reload_timer: 0.0,
            fire_timer: 0.0,
            aim_angle: 0.0,
            recoil: 0.0,
            muzzle_flash_timer: 0.0,
            visible_timer: 0.0,
            visible: false,
            bullets: Vec::new(),
            casings: Vec::new(),
            rng: Rng::new(seed),
        }
    }

    pub fn update(
        &mut self,
        dt: f64,
        input: &InputSnapshot,
        player: &Player,
        viewport_width: f64,
        ground_y: f64,
    ) -> WeaponFrame {
        let mut frame = WeaponFrame::default();

        if self.visible {
            self.aim(dt, input);
        }

        self.fire_timer = (self.fire_timer - dt).max(0.0);

        if self.reloading {
            self.reload_timer -= dt;
            if self.reload_timer <= 0.0 {
                self.ammo = self.config.max_ammo;
                self.reloading = false;
                self.reload_timer = 0.0;
                frame.reload_finished = true;
                log::info!("reload complete");
            }
        }

        if self.recoil > 0.0 {
            self.recoil = (self.recoil - self.config.recoil_decay * dt).max(0.0);
        }
        if self.muzzle_flash_timer > 0.0 {
            self.muzzle_flash_timer -= dt;
        }
        if self.visible_timer > 0.0 {
            self.visible_timer -= dt;
            self.visible = true;
        } else {
            self.visible = false;
        }

        if input.shoot {
            frame.fired = self.shoot(player);
        }
        if input.reload && self.ammo < self.config.max_ammo {
            frame.reload_started |= self.start_reload();
        }
        if self.ammo == 0 {
            frame.reload_started |= self.start_reload();
        }

        for bullet in &mut self.bullets {
            bullet.update(dt, viewport_width);
        }
        self.bullets.retain(|b| b.active);

        for casing in &mut self.casings {
            casing.update(dt, ground_y);
        }
        self.casings.retain(|c| c.active);

        frame
    }

    fn aim(&mut self, dt: f64, input: &InputSnapshot) {
        if input.aim_delta_y != 0.0 {
            self.aim_angle += input.aim_delta_y * self.config.mouse_aim_sensitivity;
        }
        if input.aim_stick_y.abs() > STICK_DEADZONE {
            self.aim_angle += input.aim_stick_y * self.config.stick_aim_sensitivity * dt;
        }
        let max = self.config.max_aim_angle;
        self.aim_angle = self.aim_angle.clamp(-max, max);
    }

    pub fn can_shoot(&self) -> bool {
        !self.reloading && self.ammo > 0 && self.fire_timer <= 0.0
    }

    /// Muzzle position for the player's current pose.
    pub fn barrel_position(player: &Player) -> DVec2 {
        let center = player.center();
        DVec2::new(
            center.x + BARREL_FORWARD * player.facing,
            center.y - BARREL_UP,
        )
    }

    /// Fire one round if allowed.
    pub fn shoot(&mut self, player: &Player) -> bool {
        if !self.can_shoot() {
            return false;
        }

        let facing = player.facing;
        let barrel = Self::barrel_position(player);
        let dir = DVec2::new(facing, (self.aim_angle * facing).sin()).normalize_or_zero();
        self.bullets.push(Bullet::new(
            barrel,
            dir,
            self.config.bullet_speed,
            self.config.bullet_damage,
            self.config.trail_length,
        ));

        self.ammo -= 1;
        self.fire_timer = self.config.fire_rate;
        self.recoil = self.config.recoil_amount;
        self.muzzle_flash_timer = self.config.muzzle_flash_duration;
        self.visible_timer = self.config.shooting_visible_duration;

        if self.casings.len() >= self.config.max_shell_casings && !self.casings.is_empty() {
            self.casings.remove(0);
        }
        let eject_at = DVec2::new(barrel.x - 10.0 * facing, barrel.y - 5.0);
        self.casings
            .push(ShellCasing::eject(eject_at, facing, &mut self.rng));

        log::debug!("shot fired, ammo {}/{}", self.ammo, self.config.max_ammo);
        true
    }

    /// Begin reloading unless already reloading.
    pub fn start_reload(&mut self) -> bool {
        if self.reloading {
            return false;
        }
        self.reloading = true;
        self.reload_timer = self.config.reload_time;
        log::info!("reloading");
        true
    }

    /// Test every live bullet against every hittable target.
    ///
    /// A bullet stops at its first hit.
    pub fn check_bullet_collisions<T: Collider>(&mut self, targets: &[T]) -> Vec<BulletHit> {
        let mut hits = Vec::new();
        for bullet in self.bullets.iter_mut().filter(|b| b.active) {
            for (index, target) in targets.iter().enumerate() {
                if !target.is_hittable() {
                    continue;
                }
                if bullet.hits(&target.bounds()) {
                    bullet.active = false;
                    hits.push(BulletHit {
                        target: index,
                        impact_y: bullet.pos.y,
                        damage: bullet.damage,
                    });
                    break;
                }
            }
        }
        hits
    }

    pub fn ammo(&self) -> u32 {
        self.ammo
    }

    pub fn max_ammo(&self) -> u32 {
        self.config.max_ammo
    }

    pub fn is_reloading(&self) -> bool {
        self.reloading
    }

    pub fn ammo_percent(&self) -> f64 {
        if self.config.max_ammo == 0 {
            return 0.0;
        }
        self.ammo as f64 / self.config.max_ammo as f64
    }

    /// Reload progress in [0, 1]; 1 when not reloading.
    pub fn reload_percent(&self) -> f64 {
        if !self.reloading {
            return 1.0;
        }
        (1.0 - self.reload_timer / self.config.reload_time).clamp(0.0, 1.0)
    }

    pub fn aim_angle(&self) -> f64 {
        self.aim_angle
    }

    pub fn recoil(&self) -> f64 {
        self.recoil
    }

    pub fn muzzle_flash_active(&self) -> bool {
        self.muzzle_flash_timer > 0.0
    }

    /// The weapon is drawn (recently fired).
    pub fn is_visible(&self) -> bool {
        self.visible
    }

    pub fn bullets(&self) -> &[Bullet] {
        &self.bullets
    }

    pub fn casings(&self) -> &[ShellCasing] {
        &self.casings
    }

    pub fn reset(&mut self) {
        self.ammo = self.config.max_ammo;
        self.reloading = false;
        self.reload_timer = 0.0;
        self.fire_timer = 0.0;
        self.aim_angle = 0.0;
        self.recoil = 0.0;
        self.muzzle_flash_timer = 0.0;
        self.visible_timer = 0.0;
        self.visible = false;
        self.bullets.clear();
        self.casings.clear();
    }
}
