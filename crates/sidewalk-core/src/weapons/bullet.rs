use std::collections::VecDeque;

use glam::DVec2;

use crate::core::physics::ray_rect_intersection;
use crate::core::Rect;

pub const BULLET_WIDTH: f64 = 8.0;
pub const BULLET_HEIGHT: f64 = 3.0;
/// Distance past either side of the viewport before a bullet is dropped.
const OFFSCREEN_MARGIN: f64 = 50.0;

/// A single projectile. `pos` is the centre of its box.
#[derive(Debug, Clone)]
pub struct Bullet {
    pub pos: DVec2,
    /// Position before the most recent step, for swept hit tests.
    pub prev: DVec2,
    pub dir: DVec2,
    pub speed: f64,
    pub damage: u32,
    pub active: bool,
    pub trail: VecDeque<DVec2>,
    trail_length: usize,
}

impl Bullet {
    pub fn new(pos: DVec2, dir: DVec2, speed: f64, damage: u32, trail_length: usize) -> Self {
        Self {
            pos,
            prev: pos,
            dir,
            speed,
            damage,
            active: true,
            trail: VecDeque::with_capacity(trail_length + 1),
            trail_length,
        }
    }

    pub fn update(&mut self, dt: f64, viewport_width: f64) {
        if !self.active {
            return;
        }
        self.trail.push_back(self.pos);
        while self.trail.len() > self.trail_length {
            self.trail.pop_front();
        }

        self.prev = self.pos;
        self.pos += self.dir * self.speed * dt;

        if self.pos.x < -OFFSCREEN_MARGIN || self.pos.x > viewport_width + OFFSCREEN_MARGIN {
            self.active = false;
        }
    }

    pub fn rect(&self) -> Rect {
        Rect::new(
            self.pos.x - BULLET_WIDTH / 2.0,
            self.pos.y - BULLET_HEIGHT / 2.0,
            BULLET_WIDTH,
            BULLET_HEIGHT,
        )
    }

    /// Box overlap at the current position, or a crossing since the last step.
    pub fn hits(&self, target: &Rect) -> bool {
        self.rect().overlaps(target) || ray_rect_intersection(self.prev, self.pos, target).is_some()
    }
}
