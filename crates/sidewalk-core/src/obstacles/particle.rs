//! Debris chunks thrown when an obstacle breaks apart.

use glam::DVec2;

use crate::core::Rng;

/// Downward acceleration applied to debris.
pub const DEBRIS_GRAVITY: f64 = 500.0;

/// A single spinning square of debris.
#[derive(Debug, Clone, PartialEq)]
pub struct Debris {
    pub position: DVec2,
    pub velocity: DVec2,
    pub size: f64,
    pub rotation: f64,
    pub spin: f64,
}

impl Debris {
    /// Ring of `count` chunks flying out from `center` with an upward bias.
    pub fn burst(center: DVec2, count: usize, rng: &mut Rng) -> Vec<Debris> {
        (0..count)
            .map(|i| {
                let angle = std::f64::consts::TAU * i as f64 / count as f64;
                let speed = rng.range(100.0, 200.0);
                Debris {
                    position: center,
                    velocity: DVec2::new(angle.cos() * speed, angle.sin() * speed - 100.0),
                    size: rng.range(5.0, 10.0),
                    rotation: rng.range(0.0, std::f64::consts::TAU),
                    spin: (rng.next_f64() - 0.5) * 10.0,
                }
            })
            .collect()
    }

    pub fn tick(&mut self, dt: f64) {
        self.position += self.velocity * dt;
        self.velocity.y += DEBRIS_GRAVITY * dt;
        self.rotation += self.spin * dt;
    }
}
