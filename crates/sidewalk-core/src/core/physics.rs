//! Stateless collision geometry.
//!
//! Everything in the simulation is an axis-aligned box in screen space
//! (y grows downward). Positions are top-left corners.

use glam::DVec2;

/// Axis-aligned rectangle anchored at its top-left corner.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Rect {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

impl Rect {
    pub const fn new(x: f64, y: f64, width: f64, height: f64) -> Self {
        Self { x, y, width, height }
    }

    pub fn from_pos_size(pos: DVec2, size: DVec2) -> Self {
        Self::new(pos.x, pos.y, size.x, size.y)
    }

    pub fn left(&self) -> f64 {
        self.x
    }

    pub fn right(&self) -> f64 {
        self.x + self.width
    }

    pub fn top(&self) -> f64 {
        self.y
    }

    pub fn bottom(&self) -> f64 {
        self.y + self.height
    }

    pub fn center(&self) -> DVec2 {
        DVec2::new(self.x + self.width * 0.5, self.y + self.height * 0.5)
    }

    /// Strict overlap: touching edges do not collide.
    pub fn overlaps(&self, other: &Rect) -> bool {
        self.x < other.right()
            && self.right() > other.x
            && self.y < other.bottom()
            && self.bottom() > other.y
    }

    /// Inclusive point containment.
    pub fn contains_point(&self, p: DVec2) -> bool {
        p.x >= self.x && p.x <= self.right() && p.y >= self.y && p.y <= self.bottom()
    }

    /// Shrink by `fraction` of the width/height on every side.
    pub fn inset(&self, fraction: f64) -> Rect {
        let mx = self.width * fraction;
        let my = self.height * fraction;
        Rect::new(
            self.x + mx,
            self.y + my,
            (self.width - 2.0 * mx).max(0.0),
            (self.height - 2.0 * my).max(0.0),
        )
    }
}

/// Anything that occupies a box and may be hit.
pub trait Collider {
    fn bounds(&self) -> Rect;

    /// Whether the entity can currently be struck.
    fn is_hittable(&self) -> bool {
        true
    }
}

pub fn aabb_overlap(a: &Rect, b: &Rect) -> bool {
    a.overlaps(b)
}

pub fn circle_rect_overlap(center: DVec2, radius: f64, rect: &Rect) -> bool {
    let closest = DVec2::new(
        center.x.clamp(rect.left(), rect.right()),
        center.y.clamp(rect.top(), rect.bottom()),
    );
    center.distance_squared(closest) < radius * radius
}

/// First point where the segment `start -> end` touches `rect`.
///
/// A segment starting inside the rectangle reports its start point. Axes the
/// segment does not move along are handled without division.
pub fn ray_rect_intersection(start: DVec2, end: DVec2, rect: &Rect) -> Option<DVec2> {
    if rect.contains_point(start) {
        return Some(start);
    }

    let d = end - start;
    let mut t_enter = f64::NEG_INFINITY;
    let mut t_exit = f64::INFINITY;

    for (s, dir, lo, hi) in [
        (start.x, d.x, rect.left(), rect.right()),
        (start.y, d.y, rect.top(), rect.bottom()),
    ] {
        if dir.abs() < f64::EPSILON {
            if s < lo || s > hi {
                return None;
            }
        } else {
            let t1 = (lo - s) / dir;
            let t2 = (hi - s) / dir;
            t_enter = t_enter.max(t1.min(t2));
            t_exit = t_exit.min(t1.max(t2));
        }
    }

    if t_enter > t_exit || t_exit < 0.0 || t_enter > 1.0 {
        return None;
    }
    let t = t_enter.max(0.0);
    Some(start + d * t)
}

/// Result of a nearest-hit raycast.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RayHit {
    /// Index into the slice that was cast against.
    pub index: usize,
    pub point: DVec2,
    pub distance: f64,
}

/// Nearest rectangle hit by the segment `start -> end`.
pub fn raycast(start: DVec2, end: DVec2, rects: &[Rect]) -> Option<RayHit> {
    rects
        .iter()
        .enumerate()
        .filter_map(|(index, rect)| {
            ray_rect_intersection(start, end, rect).map(|point| RayHit {
                index,
                point,
                distance: start.distance(point),
            })
        })
        .min_by(|a, b| a.distance.total_cmp(&b.distance))
}

pub fn lerp(a: f64, b: f64, t: f64) -> f64 {
    a + (b - a) * t
}

/// Multiplicative per-frame friction that snaps to rest below 1 unit/s.
pub fn apply_friction(velocity: f64, factor: f64) -> f64 {
    let v = velocity * factor;
    if v.abs() < 1.0 {
        0.0
    } else {
        v
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn touching_edges_do_not_overlap() {
        let a = Rect::new(0.0, 0.0, 10.0, 10.0);
        let b = Rect::new(10.0, 0.0, 10.0, 10.0);
        assert!(!aabb_overlap(&a, &b));
        let c = Rect::new(9.9, 5.0, 10.0, 10.0);
        assert!(aabb_overlap(&a, &c));
    }

    #[test]
    fn inset_shrinks_every_side() {
        let r = Rect::new(100.0, 200.0, 50.0, 100.0).inset(0.2);
        assert_eq!(r, Rect::new(110.0, 220.0, 30.0, 60.0));
    }

    #[test]
    fn circle_against_corner() {
        let r = Rect::new(0.0, 0.0, 10.0, 10.0);
        assert!(circle_rect_overlap(DVec2::new(12.0, 12.0), 3.0, &r));
        assert!(!circle_rect_overlap(DVec2::new(14.0, 14.0), 3.0, &r));
    }

    #[test]
    fn ray_hits_near_face() {
        let r = Rect::new(10.0, -5.0, 10.0, 10.0);
        let hit = ray_rect_intersection(DVec2::ZERO, DVec2::new(30.0, 0.0), &r);
        assert_eq!(hit, Some(DVec2::new(10.0, 0.0)));
    }

    #[test]
    fn vertical_ray_does_not_divide_by_zero() {
        let r = Rect::new(-5.0, 10.0, 10.0, 10.0);
        let hit = ray_rect_intersection(DVec2::ZERO, DVec2::new(0.0, 50.0), &r);
        assert_eq!(hit, Some(DVec2::new(0.0, 10.0)));
        let miss = ray_rect_intersection(DVec2::new(20.0, 0.0), DVec2::new(20.0, 50.0), &r);
        assert_eq!(miss, None);
    }

    #[test]
    fn short_ray_stops_before_rect() {
        let r = Rect::new(10.0, -5.0, 10.0, 10.0);
        assert_eq!(ray_rect_intersection(DVec2::ZERO, DVec2::new(5.0, 0.0), &r), None);
    }

    #[test]
    fn raycast_reports_nearest() {
        let rects = [
            Rect::new(50.0, -5.0, 10.0, 10.0),
            Rect::new(20.0, -5.0, 10.0, 10.0),
        ];
        let hit = raycast(DVec2::ZERO, DVec2::new(100.0, 0.0), &rects).unwrap();
        assert_eq!(hit.index, 1);
        assert!((hit.distance - 20.0).abs() < 1e-9);
    }

    #[test]
    fn friction_snaps_to_zero() {
        assert_eq!(apply_friction(1.2, 0.8), 0.0);
        assert!((apply_friction(100.0, 0.8) - 80.0).abs() < 1e-9);
    }
}
