use glam::DVec2;

use crate::core::Rng;

pub const CASING_GRAVITY: f64 = 400.0;
pub const CASING_BOUNCE: f64 = 0.3;
pub const CASING_FRICTION: f64 = 0.8;
pub const CASING_SPIN_DAMPING: f64 = 0.7;
/// Below this rebound speed the casing comes to rest.
pub const CASING_SETTLE_SPEED: f64 = 20.0;
pub const CASING_LIFETIME: f64 = 3.0;
/// Casings rest slightly above the ground line.
const GROUND_OFFSET: f64 = 5.0;

/// Spent shell ejected on every shot. Purely cosmetic.
#[derive(Debug, Clone, PartialEq)]
pub struct ShellCasing {
    pub pos: DVec2,
    pub vel: DVec2,
    pub rotation: f64,
    pub spin: f64,
    pub age: f64,
    pub on_ground: bool,
    pub active: bool,
}

impl ShellCasing {
    /// Eject backward relative to `facing`, with a random upward kick.
    pub fn eject(pos: DVec2, facing: f64, rng: &mut Rng) -> Self {
        Self {
            pos,
            vel: DVec2::new(-facing * rng.range(50.0, 80.0), -rng.range(80.0, 120.0)),
            rotation: rng.range(0.0, std::f64::consts::TAU),
            spin: (rng.next_f64() - 0.5) * 10.0,
            age: 0.0,
            on_ground: false,
            active: true,
        }
    }

    pub fn update(&mut self, dt: f64, ground_y: f64) {
        if !self.active {
            return;
        }
        self.age += dt;
        if !self.on_ground {
            self.vel.y += CASING_GRAVITY * dt;
        }
        self.pos += self.vel * dt;
        self.rotation += self.spin * dt;

        let floor = ground_y - GROUND_OFFSET;
        if self.pos.y >= floor && !self.on_ground {
            self.pos.y = floor;
            self.vel.y *= -CASING_BOUNCE;
            self.vel.x *= CASING_FRICTION;
            self.spin *= CASING_SPIN_DAMPING;
            if self.vel.y.abs() < CASING_SETTLE_SPEED {
                self.on_ground = true;
                self.vel.y = 0.0;
            }
        }

        if self.age >= CASING_LIFETIME {
            self.active = false;
        }
    }

    /// Fade-out opacity in [0, 1].
    pub fn alpha(&self) -> f64 {
        (1.0 - self.age / CASING_LIFETIME).max(0.0)
    }
}
