use glam::DVec2;
use serde::{Deserialize, Serialize};

use super::particle::Debris;
use crate::core::{Collider, Rect, Rng};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ObstacleKind {
    Block,
    TallBlock,
    Fence,
    Platform,
    PoliceCar,
}

/// Fixed per-kind properties.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ObstacleStats {
    pub width: f64,
    pub height: f64,
    pub can_jump_over: bool,
    pub damages_player: bool,
    pub is_platform: bool,
    pub contact_damage: f64,
    /// Breaks on contact with a dashing player.
    pub dash_smashable: bool,
}

impl ObstacleKind {
    pub const ALL: [ObstacleKind; 5] = [
        ObstacleKind::Block,
        ObstacleKind::TallBlock,
        ObstacleKind::Fence,
        ObstacleKind::Platform,
        ObstacleKind::PoliceCar,
    ];

    pub const fn stats(self) -> ObstacleStats {
        match self {
            ObstacleKind::Block => ObstacleStats {
                width: 55.0,
                height: 55.0,
                can_jump_over: true,
                damages_player: true,
                is_platform: false,
                contact_damage: 25.0,
                dash_smashable: true,
            },
            ObstacleKind::TallBlock => ObstacleStats {
                width: 55.0,
                height: 110.0,
                can_jump_over: false,
                damages_player: true,
                is_platform: false,
                contact_damage: 30.0,
                dash_smashable: false,
            },
            ObstacleKind::Fence => ObstacleStats {
                width: 60.0,
                height: 60.0,
                can_jump_over: true,
                damages_player: true,
                is_platform: false,
                contact_damage: 20.0,
                dash_smashable: true,
            },
            ObstacleKind::Platform => ObstacleStats {
                width: 80.0,
                height: 20.0,
                can_jump_over: true,
                damages_player: true,
                is_platform: false,
                contact_damage: 30.0,
                dash_smashable: false,
            },
            ObstacleKind::PoliceCar => ObstacleStats {
                width: 300.0,
                height: 167.0,
                can_jump_over: true,
                damages_player: false,
                is_platform: true,
                contact_damage: 35.0,
                dash_smashable: false,
            },
        }
    }

    /// Top edge when placed relative to the ground line.
    pub fn spawn_y(self, ground_y: f64) -> f64 {
        let stats = self.stats();
        match self {
            ObstacleKind::Platform => ground_y - stats.height - 40.0,
            _ => ground_y - stats.height,
        }
    }

    pub fn code(self) -> u32 {
        self as u32
    }
}

/// Duration of the break-apart animation.
pub const DESTRUCTION_DURATION: f64 = 0.3;
const DEBRIS_COUNT: usize = 8;
/// Fraction trimmed from each side of the sprite box for collisions.
const HITBOX_MARGIN: f64 = 0.2;
/// Horizontal inset of the walkable roof from either end of a car.
const ROOF_INSET: f64 = 20.0;
/// Share of the car length taken by the sloped hood.
const HOOD_SPAN: f64 = 0.3;
/// Hood height at the front bumper, as a fraction of car height from the top.
const HOOD_FRONT: f64 = 0.55;
/// Flat roof height, as a fraction of car height from the top.
const ROOF_LEVEL: f64 = 0.42;

#[derive(Debug, Clone)]
pub struct Obstacle {
    pub kind: ObstacleKind,
    pub pos: DVec2,
    pub width: f64,
    pub height: f64,
    pub active: bool,
    pub destroying: bool,
    pub destruction_timer: f64,
    /// Left the visible band; removed by the manager.
    pub scrolled: bool,
    pub debris: Vec<Debris>,
    pub anim_timer: f64,
}

impl Obstacle {
    pub fn new(kind: ObstacleKind, x: f64, y: f64) -> Self {
        let stats = kind.stats();
        Self {
            kind,
            pos: DVec2::new(x, y),
            width: stats.width,
            height: stats.height,
            active: true,
            destroying: false,
            destruction_timer: 0.0,
            scrolled: false,
            debris: Vec::new(),
            anim_timer: 0.0,
        }
    }

    pub fn on_ground(kind: ObstacleKind, x: f64, ground_y: f64) -> Self {
        Self::new(kind, x, kind.spawn_y(ground_y))
    }

    pub fn stats(&self) -> ObstacleStats {
        self.kind.stats()
    }

    /// Full sprite box.
    pub fn sprite_rect(&self) -> Rect {
        Rect::new(self.pos.x, self.pos.y, self.width, self.height)
    }

    /// Forgiving collision box.
    pub fn rect(&self) -> Rect {
        self.sprite_rect().inset(HITBOX_MARGIN)
    }

    pub fn center(&self) -> DVec2 {
        self.sprite_rect().center()
    }

    pub fn is_solid(&self) -> bool {
        self.active && !self.destroying
    }

    /// Standable car roof.
    pub fn is_walkable_platform(&self) -> bool {
        self.is_solid() && self.stats().is_platform
    }

    /// Start breaking apart. Repeated calls are ignored.
    pub fn destroy(&mut self, rng: &mut Rng) -> bool {
        if self.destroying || !self.active {
            return false;
        }
        self.destroying = true;
        self.destruction_timer = DESTRUCTION_DURATION;
        self.debris = Debris::burst(self.center(), DEBRIS_COUNT, rng);
        true
    }

    /// Remaining opacity of the destruction animation in [0, 1].
    pub fn destruction_alpha(&self) -> f64 {
        if self.destroying {
            (self.destruction_timer / DESTRUCTION_DURATION).clamp(0.0, 1.0)
        } else {
            1.0
        }
    }

    /// Advance animation and shift by this frame's scroll.
    /// Past `-width` or `right_limit` the obstacle flags itself as scrolled.
    pub fn update(&mut self, dt: f64, scroll_dx: f64, right_limit: f64) {
        self.anim_timer += dt;

        if self.destroying {
            self.destruction_timer -= dt;
            for chunk in &mut self.debris {
                chunk.tick(dt);
                chunk.position.x -= scroll_dx;
            }
            if self.destruction_timer <= 0.0 {
                self.active = false;
            }
        }

        self.pos.x -= scroll_dx;
        if self.pos.x < -self.width || self.pos.x > right_limit {
            self.scrolled = true;
        }
    }

    /// Left and right ends of the walkable roof.
    pub fn roof_span(&self) -> (f64, f64) {
        (self.pos.x + ROOF_INSET, self.pos.x + self.width - ROOF_INSET)
    }

    /// Roof surface height under `x`, or `None` past either end.
    ///
    /// The front of the car slopes from the hood up to the flat roof.
    pub fn roof_height_at(&self, x: f64) -> Option<f64> {
        let (left, right) = self.roof_span();
        let span = right - left;
        if span <= 0.0 {
            return None;
        }
        let rel = (x - left) / span;
        let hood = self.pos.y + self.height * HOOD_FRONT;
        let roof = self.roof_level();
        if (0.0..HOOD_SPAN).contains(&rel) {
            Some(hood - (hood - roof) * (rel / HOOD_SPAN))
        } else if (HOOD_SPAN..=1.0).contains(&rel) {
            Some(roof)
        } else {
            None
        }
    }

    /// Flat roof line.
    pub fn roof_level(&self) -> f64 {
        self.pos.y + self.height * ROOF_LEVEL
    }
}

impl Collider for Obstacle {
    fn bounds(&self) -> Rect {
        self.rect()
    }

    fn is_hittable(&self) -> bool {
        self.is_solid()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn platform_floats_above_ground() {
        let p = Obstacle::on_ground(ObstacleKind::Platform, 100.0, 600.0);
        assert_eq!(p.pos.y, 600.0 - 20.0 - 40.0);
        let car = Obstacle::on_ground(ObstacleKind::PoliceCar, 100.0, 600.0);
        assert_eq!(car.pos.y + car.height, 600.0);
    }

    #[test]
    fn hitbox_is_shrunk() {
        let o = Obstacle::new(ObstacleKind::Block, 0.0, 0.0);
        assert_eq!(o.rect(), Rect::new(11.0, 11.0, 33.0, 33.0));
    }

    #[test]
    fn destroy_is_idempotent() {
        let mut rng = Rng::new(1);
        let mut o = Obstacle::new(ObstacleKind::Fence, 0.0, 0.0);
        assert!(o.destroy(&mut rng));
        assert_eq!(o.debris.len(), 8);
        assert!(!o.destroy(&mut rng));
        assert_eq!(o.debris.len(), 8, "second destroy must not add debris");
    }

    #[test]
    fn destruction_finishes_inactive() {
        let mut rng = Rng::new(1);
        let mut o = Obstacle::new(ObstacleKind::Block, 500.0, 0.0);
        o.destroy(&mut rng);
        o.update(0.2, 0.0, 1280.0);
        assert!(o.active);
        o.update(0.2, 0.0, 1280.0);
        assert!(!o.active);
    }

    #[test]
    fn scrolls_off_left_edge() {
        let mut o = Obstacle::new(ObstacleKind::Block, 10.0, 0.0);
        o.update(0.016, 100.0, 1280.0);
        assert!(o.scrolled);
    }

    #[test]
    fn car_roof_profile() {
        let car = Obstacle::new(ObstacleKind::PoliceCar, 0.0, 0.0);
        let (left, right) = car.roof_span();
        assert_eq!((left, right), (20.0, 280.0));
        let front = car.roof_height_at(left).unwrap();
        assert!((front - 167.0 * 0.55).abs() < 1e-9);
        let mid = car.roof_height_at(200.0).unwrap();
        assert!((mid - 167.0 * 0.42).abs() < 1e-9);
        // Halfway up the hood sits between the two heights.
        let slope = car.roof_height_at(left + 260.0 * 0.15).unwrap();
        assert!(slope < front && slope > mid);
        assert_eq!(car.roof_height_at(0.0), None);
        assert_eq!(car.roof_height_at(290.0), None);
    }
}
