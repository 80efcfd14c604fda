//! Shared geometry: hitboxes, habitat rings and direction helpers.

use glam::Vec2;
use rand::Rng;
use serde::{Deserialize, Serialize};

/// Axis-aligned bounding box in world coordinates
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Aabb {
    pub min: Vec2,
    pub max: Vec2,
}

impl Aabb {
    pub fn new(min: Vec2, max: Vec2) -> Self {
        Self { min, max }
    }

    /// Build a box centered on `center` with the given full size
    pub fn from_center_size(center: Vec2, size: Vec2) -> Self {
        let half = size * 0.5;
        Self {
            min: center - half,
            max: center + half,
        }
    }

    pub fn center(&self) -> Vec2 {
        (self.min + self.max) * 0.5
    }

    pub fn size(&self) -> Vec2 {
        self.max - self.min
    }

    /// True when the box covers no area
    pub fn is_empty(&self) -> bool {
        self.max.x <= self.min.x || self.max.y <= self.min.y
    }

    /// Strict overlap test; touching edges do not count
    pub fn overlaps(&self, other: &Aabb) -> bool {
        self.min.x < other.max.x
            && self.max.x > other.min.x
            && self.min.y < other.max.y
            && self.max.y > other.min.y
    }

    pub fn contains(&self, point: Vec2) -> bool {
        point.x >= self.min.x && point.x <= self.max.x && point.y >= self.min.y && point.y <= self.max.y
    }

    /// Clamp a point into the box
    pub fn clamp_point(&self, point: Vec2) -> Vec2 {
        point.clamp(self.min, self.max)
    }
}

/// Radial distance band from the world origin within which a species may
/// exist and chase. A ring of `0.0..=r` is a plain disc.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct HabitatRing {
    pub min_radius: f32,
    pub max_radius: f32,
}

impl HabitatRing {
    pub const fn new(min_radius: f32, max_radius: f32) -> Self {
        Self {
            min_radius,
            max_radius,
        }
    }

    pub fn contains(&self, point: Vec2) -> bool {
        let r = point.length();
        r >= self.min_radius && r <= self.max_radius
    }

    /// Project a point back into the ring along its radial direction.
    /// A point at the exact origin is pushed out along +X.
    pub fn clamp(&self, point: Vec2) -> Vec2 {
        let r = point.length();
        if r < self.min_radius {
            let dir = point.try_normalize().unwrap_or(Vec2::X);
            dir * self.min_radius
        } else if r > self.max_radius {
            point / r * self.max_radius
        } else {
            point
        }
    }

    /// Uniform random angle, radius uniform within the band
    pub fn random_point(&self, rng: &mut impl Rng) -> Vec2 {
        let angle = rng.random_range(0.0..std::f32::consts::TAU);
        let radius = rng.random_range(self.min_radius..=self.max_radius);
        Vec2::new(angle.cos(), angle.sin()) * radius
    }
}

/// Unit vector pointing from `from` toward `to`.
///
/// When the two points coincide the direction is undefined; `fallback` is
/// returned instead so knockback stays deterministic.
pub fn push_direction(from: Vec2, to: Vec2, fallback: Vec2) -> Vec2 {
    (to - from).try_normalize().unwrap_or(fallback)
}

/// Default push direction when attacker and defender centers coincide
pub const DEFAULT_PUSH_DIR: Vec2 = Vec2::X;

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand_xoshiro::Xoshiro256StarStar;

    #[test]
    fn test_aabb_overlap() {
        let a = Aabb::from_center_size(Vec2::ZERO, Vec2::new(10.0, 10.0));
        let b = Aabb::from_center_size(Vec2::new(8.0, 0.0), Vec2::new(10.0, 10.0));
        let c = Aabb::from_center_size(Vec2::new(20.0, 0.0), Vec2::new(10.0, 10.0));
        assert!(a.overlaps(&b));
        assert!(!a.overlaps(&c));
    }

    #[test]
    fn test_aabb_touching_edges_do_not_overlap() {
        let a = Aabb::from_center_size(Vec2::ZERO, Vec2::new(10.0, 10.0));
        let b = Aabb::from_center_size(Vec2::new(10.0, 0.0), Vec2::new(10.0, 10.0));
        assert!(!a.overlaps(&b));
    }

    #[test]
    fn test_habitat_clamp() {
        let ring = HabitatRing::new(10.0, 50.0);
        let inside = Vec2::new(0.0, 30.0);
        assert_eq!(ring.clamp(inside), inside);

        let near = ring.clamp(Vec2::new(2.0, 0.0));
        assert!((near.length() - 10.0).abs() < 0.001);

        let far = ring.clamp(Vec2::new(0.0, 100.0));
        assert!((far.length() - 50.0).abs() < 0.001);
    }

    #[test]
    fn test_habitat_clamp_at_origin() {
        let ring = HabitatRing::new(10.0, 50.0);
        let clamped = ring.clamp(Vec2::ZERO);
        assert!((clamped.length() - 10.0).abs() < 0.001);
        assert!(clamped.is_finite());
    }

    #[test]
    fn test_random_point_stays_in_ring() {
        let ring = HabitatRing::new(100.0, 300.0);
        let mut rng = Xoshiro256StarStar::seed_from_u64(7);
        for _ in 0..200 {
            let p = ring.random_point(&mut rng);
            assert!(ring.contains(p), "{p:?} escaped the ring");
        }
    }

    #[test]
    fn test_push_direction_fallback() {
        let p = Vec2::new(5.0, 5.0);
        assert_eq!(push_direction(p, p, DEFAULT_PUSH_DIR), Vec2::X);

        let dir = push_direction(Vec2::ZERO, Vec2::new(0.0, 3.0), DEFAULT_PUSH_DIR);
        assert!((dir - Vec2::Y).length() < 0.001);
    }
}
