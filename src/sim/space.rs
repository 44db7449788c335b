//! Spatial helpers: axis-aligned boxes and the steerable play area
//!
//! World axes: +x right, +y up, -z forward (the direction of travel).

use glam::{Vec2, Vec3};
use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::consts::*;

/// Axis-aligned bounding box
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Aabb {
    pub min: Vec3,
    pub max: Vec3,
}

impl Aabb {
    /// Box of the given half extents around `center`
    pub fn from_center(center: Vec3, half_extents: Vec3) -> Self {
        Self {
            min: center - half_extents,
            max: center + half_extents,
        }
    }

    /// Box spanning `center + lo ..= center + hi`
    pub fn from_offsets(center: Vec3, lo: Vec3, hi: Vec3) -> Self {
        Self {
            min: center + lo,
            max: center + hi,
        }
    }

    /// Touching boxes count as intersecting
    #[inline]
    pub fn intersects(&self, other: &Aabb) -> bool {
        self.min.x <= other.max.x
            && self.max.x >= other.min.x
            && self.min.y <= other.max.y
            && self.max.y >= other.min.y
            && self.min.z <= other.max.z
            && self.max.z >= other.min.z
    }

    pub fn contains(&self, point: Vec3) -> bool {
        point.cmpge(self.min).all() && point.cmple(self.max).all()
    }
}

/// The rectangular lateral/vertical region the craft may occupy
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PlayBounds {
    pub x_half_width: f32,
    pub y_min: f32,
    pub y_max: f32,
}

/// Process-wide play area
pub const PLAY_BOUNDS: PlayBounds = PlayBounds {
    x_half_width: PLAY_X_HALF_WIDTH,
    y_min: PLAY_Y_MIN,
    y_max: PLAY_Y_MAX,
};

impl PlayBounds {
    #[inline]
    pub fn clamp_x(&self, x: f32) -> f32 {
        x.clamp(-self.x_half_width, self.x_half_width)
    }

    #[inline]
    pub fn clamp_y(&self, y: f32) -> f32 {
        y.clamp(self.y_min, self.y_max)
    }

    pub fn contains(&self, x: f32, y: f32) -> bool {
        x.abs() <= self.x_half_width && y >= self.y_min && y <= self.y_max
    }

    /// Uniform point inside the lane cross-section
    pub fn sample<R: Rng + ?Sized>(&self, rng: &mut R) -> Vec2 {
        let x = (rng.random::<f32>() - 0.5) * self.x_half_width * 2.0;
        let y = self.y_min + rng.random::<f32>() * (self.y_max - self.y_min);
        Vec2::new(x, y)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand_pcg::Pcg32;

    #[test]
    fn test_aabb_intersects() {
        let a = Aabb::from_center(Vec3::ZERO, Vec3::splat(1.0));
        let b = Aabb::from_center(Vec3::new(1.5, 0.0, 0.0), Vec3::splat(1.0));
        let c = Aabb::from_center(Vec3::new(0.0, 0.0, -3.0), Vec3::splat(0.5));
        assert!(a.intersects(&b));
        assert!(b.intersects(&a));
        assert!(!a.intersects(&c));
    }

    #[test]
    fn test_aabb_touching_counts() {
        let a = Aabb::from_center(Vec3::ZERO, Vec3::splat(1.0));
        let b = Aabb::from_center(Vec3::new(2.0, 0.0, 0.0), Vec3::splat(1.0));
        assert!(a.intersects(&b));
    }

    #[test]
    fn test_aabb_from_offsets() {
        let b = Aabb::from_offsets(
            Vec3::new(1.0, 1.0, 1.0),
            Vec3::new(-0.5, -1.0, -2.0),
            Vec3::new(0.5, 1.0, 0.0),
        );
        assert!(b.contains(Vec3::new(1.0, 0.0, -0.5)));
        assert!(!b.contains(Vec3::new(1.0, 1.0, 1.5)));
        assert_eq!(b.min, Vec3::new(0.5, 0.0, -1.0));
    }

    #[test]
    fn test_bounds_clamp() {
        assert_eq!(PLAY_BOUNDS.clamp_x(9.0), 6.0);
        assert_eq!(PLAY_BOUNDS.clamp_x(-9.0), -6.0);
        assert_eq!(PLAY_BOUNDS.clamp_y(-4.0), -3.0);
        assert_eq!(PLAY_BOUNDS.clamp_y(1.0), 1.0);
    }

    #[test]
    fn test_sample_stays_inside() {
        let mut rng = Pcg32::seed_from_u64(7);
        for _ in 0..500 {
            let p = PLAY_BOUNDS.sample(&mut rng);
            assert!(PLAY_BOUNDS.contains(p.x, p.y), "{p:?} escaped the lane");
        }
    }
}
