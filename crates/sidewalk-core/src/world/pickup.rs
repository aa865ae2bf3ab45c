use glam::DVec2;

use crate::core::{Collider, Rect};

pub const COIN_SIZE: f64 = 32.0;
pub const HEALTH_PACK_SIZE: f64 = 40.0;
/// Coin spin in degrees per second.
pub const COIN_SPIN: f64 = 180.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PickupKind {
    Coin,
    HealthPack,
}

impl PickupKind {
    pub fn size(self) -> f64 {
        match self {
            PickupKind::Coin => COIN_SIZE,
            PickupKind::HealthPack => HEALTH_PACK_SIZE,
        }
    }

    /// Height of the pickup's top edge above the ground line.
    pub fn lift(self) -> f64 {
        match self {
            PickupKind::Coin => 50.0,
            PickupKind::HealthPack => 110.0,
        }
    }
}

/// A collectible that scrolls with the world.
#[derive(Debug, Clone)]
pub struct Pickup {
    pub kind: PickupKind,
    pub pos: DVec2,
    pub size: f64,
    /// Degrees in [0, 360).
    pub rotation: f64,
    pub collected: bool,
    pub scrolled: bool,
}

impl Pickup {
    pub fn new(kind: PickupKind, x: f64, ground_y: f64) -> Self {
        Self {
            kind,
            pos: DVec2::new(x, ground_y - kind.lift()),
            size: kind.size(),
            rotation: 0.0,
            collected: false,
            scrolled: false,
        }
    }

    pub fn rect(&self) -> Rect {
        Rect::from_pos_size(self.pos, DVec2::splat(self.size))
    }

    pub fn center(&self) -> DVec2 {
        self.rect().center()
    }

    /// Shift by this frame's scroll. An item flags itself once it is off
    /// screen and still moving away from the viewport.
    pub fn scroll(&mut self, scroll_dx: f64, viewport_width: f64) {
        self.pos.x -= scroll_dx;
        let off_left = self.pos.x < -self.size && scroll_dx > 0.0;
        let off_right = self.pos.x > viewport_width + self.size && scroll_dx < 0.0;
        if off_left || off_right {
            self.scrolled = true;
        }
    }

    pub fn spin(&mut self, dt: f64) {
        self.rotation = (self.rotation + COIN_SPIN * dt).rem_euclid(360.0);
    }
}

impl Collider for Pickup {
    fn bounds(&self) -> Rect {
        self.rect()
    }

    fn is_hittable(&self) -> bool {
        !self.collected
    }
}
