use crate::config::WorldConfig;
use crate::core::physics::lerp;
use crate::player::PlayerMotion;

/// Extra distance past the dead zone edge before a stopped player is recentred.
const RECENTRE_SLACK: f64 = 20.0;
/// Direction used while a walking player heads back into the dead zone.
const RETURN_CREEP: f64 = 0.5;
/// Direction used to recentre a stopped player.
const IDLE_CREEP: f64 = 0.3;
/// Fraction of the viewport past which the player counts as far right.
const FAR_RIGHT_FRACTION: f64 = 0.7;
/// Below this magnitude the camera holds still.
const MIN_DIRECTION: f64 = 0.01;

/// Horizontal scroll camera with a dead zone and a one-way frontier.
///
/// `camera_x` grows as the world scrolls forward. `frontier_x` records the
/// furthest point reached; the camera never falls behind it by more than
/// `frontier_slack`.
#[derive(Debug, Clone)]
pub struct ScrollCamera {
    /// Cumulative camera offset in world units.
    pub camera_x: f64,
    /// Furthest forward `camera_x` reached so far.
    pub frontier_x: f64,
    /// Smoothed scroll direction in [-1, 1].
    pub direction: f64,
    /// Direction chosen by the dead-zone policy on the last update.
    pub target: f64,
    viewport_width: f64,
    dead_zone_fraction: f64,
    lerp_rate: f64,
    frontier_slack: f64,
}

impl ScrollCamera {
    pub fn new(viewport_width: f64, config: &WorldConfig) -> Self {
        Self {
            camera_x: 0.0,
            frontier_x: 0.0,
            direction: 0.0,
            target: 0.0,
            viewport_width,
            dead_zone_fraction: config.dead_zone_fraction,
            lerp_rate: config.direction_lerp_rate,
            frontier_slack: config.frontier_slack,
        }
    }

    pub fn set_viewport_width(&mut self, width: f64) {
        self.viewport_width = width;
    }

    pub fn dead_zone_width(&self) -> f64 {
        self.viewport_width * self.dead_zone_fraction
    }

    /// Left and right edges of the dead zone.
    pub fn dead_zone(&self) -> (f64, f64) {
        let center = self.viewport_width * 0.5;
        let half = self.dead_zone_width() / 2.0;
        (center - half, center + half)
    }

    /// Pick the direction the camera should head toward for this frame.
    pub fn target_direction(&self, motion: &PlayerMotion, player_x: f64) -> f64 {
        let (left, right) = self.dead_zone();

        if motion.is_walking && motion.walk_direction != 0.0 {
            if player_x >= left && player_x <= right {
                0.0
            } else if player_x < left && motion.walk_direction < 0.0 {
                motion.walk_direction
            } else if player_x > right && motion.walk_direction > 0.0 {
                motion.walk_direction
            } else if player_x < left {
                RETURN_CREEP
            } else {
                -RETURN_CREEP
            }
        } else {
            let offset = player_x - self.viewport_width * 0.5;
            if offset.abs() > self.dead_zone_width() / 2.0 + RECENTRE_SLACK {
                IDLE_CREEP.copysign(offset)
            } else {
                0.0
            }
        }
    }

    /// Ease `direction` toward the policy target.
    pub fn steer(&mut self, motion: &PlayerMotion, player_x: f64, dt: f64) {
        self.target = self.target_direction(motion, player_x);
        self.direction = lerp(self.direction, self.target, self.lerp_rate * dt).clamp(-1.0, 1.0);
    }

    pub fn is_scrolling(&self) -> bool {
        self.direction.abs() > MIN_DIRECTION
    }

    /// Apply the frontier rules to a proposed scroll distance, move the
    /// camera, and return the distance actually travelled.
    pub fn advance(&mut self, distance: f64, player_x: f64) -> f64 {
        let mut distance = distance;

        if self.direction < 0.0 {
            let proposed = self.camera_x + distance;
            if proposed < self.frontier_x {
                let far_right = player_x > self.viewport_width * FAR_RIGHT_FRACTION;
                let centring = self.target.abs() < RETURN_CREEP;
                if far_right && centring {
                    distance = -distance.abs().min(self.frontier_slack);
                    // Never more than the slack behind the frontier in total.
                    let floor = self.frontier_x - self.frontier_slack;
                    if self.camera_x + distance < floor {
                        distance = (floor - self.camera_x).min(0.0);
                    }
                } else {
                    distance = (self.frontier_x - self.camera_x).min(0.0);
                    self.direction = 0.0;
                }
            }
        } else if self.direction > 0.0 {
            let proposed = self.camera_x + distance;
            if proposed > self.frontier_x {
                self.frontier_x = proposed;
            }
        }

        self.camera_x += distance;
        distance
    }

    pub fn reset(&mut self) {
        self.camera_x = 0.0;
        self.frontier_x = 0.0;
        self.direction = 0.0;
        self.target = 0.0;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn camera() -> ScrollCamera {
        ScrollCamera::new(1280.0, &WorldConfig::default())
    }

    fn walking(dir: f64) -> PlayerMotion {
        PlayerMotion {
            is_walking: true,
            walk_direction: dir,
            ..Default::default()
        }
    }

    #[test]
    fn dead_zone_is_centred() {
        let (l, r) = camera().dead_zone();
        assert_eq!(l, 640.0 - 96.0);
        assert_eq!(r, 640.0 + 96.0);
    }

    #[test]
    fn target_policy() {
        let cam = camera();
        assert_eq!(cam.target_direction(&walking(1.0), 640.0), 0.0);
        assert_eq!(cam.target_direction(&walking(1.0), 900.0), 1.0);
        assert_eq!(cam.target_direction(&walking(-1.0), 100.0), -1.0);
        assert_eq!(cam.target_direction(&walking(-1.0), 900.0), -0.5);
        assert_eq!(cam.target_direction(&walking(1.0), 100.0), 0.5);

        let idle = PlayerMotion::default();
        assert_eq!(cam.target_direction(&idle, 640.0 + 110.0), 0.0);
        assert_eq!(cam.target_direction(&idle, 640.0 + 120.0), 0.3);
        assert_eq!(cam.target_direction(&idle, 640.0 - 120.0), -0.3);
    }

    #[test]
    fn steer_eases_toward_target() {
        let mut cam = camera();
        cam.steer(&walking(1.0), 900.0, 0.05);
        assert!((cam.direction - 0.5).abs() < 1e-12);
        cam.steer(&walking(1.0), 900.0, 0.05);
        assert!((cam.direction - 0.75).abs() < 1e-12);
        // A step past the target is clamped to the unit range.
        cam.steer(&walking(1.0), 900.0, 0.5);
        assert_eq!(cam.direction, 1.0);
    }

    #[test]
    fn forward_scroll_raises_frontier() {
        let mut cam = camera();
        cam.direction = 1.0;
        assert_eq!(cam.advance(10.0, 900.0), 10.0);
        assert_eq!(cam.frontier_x, 10.0);
        cam.direction = -1.0;
        cam.target = -1.0;
        assert_eq!(cam.advance(-4.0, 300.0), 0.0);
        assert_eq!(cam.camera_x, 10.0);
        assert_eq!(cam.direction, 0.0);
    }

    #[test]
    fn far_right_centring_is_bounded() {
        let mut cam = camera();
        cam.direction = -0.3;
        cam.target = -0.3;
        let player_x = 1280.0 * 0.8;
        for _ in 0..200 {
            cam.direction = -0.3;
            cam.advance(-60.0, player_x);
            assert!(cam.camera_x >= cam.frontier_x - 50.0);
        }
        assert_eq!(cam.camera_x, -50.0);
    }

    #[test]
    fn far_right_without_centring_stops_at_frontier() {
        let mut cam = camera();
        cam.direction = -1.0;
        cam.target = -0.5;
        assert_eq!(cam.advance(-5.0, 1100.0), 0.0);
        assert_eq!(cam.direction, 0.0);
    }

    #[test]
    fn behind_frontier_never_snaps_forward() {
        let mut cam = camera();
        cam.camera_x = -30.0;
        cam.direction = -0.2;
        cam.target = 0.0;
        assert_eq!(cam.advance(-3.0, 600.0), 0.0);
        assert_eq!(cam.camera_x, -30.0);
    }
}
