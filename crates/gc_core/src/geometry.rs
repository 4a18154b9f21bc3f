//! Vector and scalar primitives shared by every component.
//!
//! World convention: Y is up, the ground is the XZ plane. All positions are
//! `Vec3` (nalgebra `Vector3<f32>`), serialized as `[x, y, z]`.

use nalgebra::Vector3;
use serde::{Deserialize, Serialize};

pub type Vec3 = Vector3<f32>;

/// Lengths below this are treated as zero.
pub const EPSILON: f32 = 1e-6;

/// Unit up vector.
#[inline]
pub fn up() -> Vec3 {
    Vec3::y()
}

#[inline]
pub fn distance(a: &Vec3, b: &Vec3) -> f32 {
    (a - b).norm()
}

/// Unit vector along `v`, or `None` when `v` is (near) zero or not finite.
pub fn try_normalize(v: &Vec3) -> Option<Vec3> {
    if !is_finite(v) {
        return None;
    }
    v.try_normalize(EPSILON)
}

/// Unit vector along `v`, falling back to `fallback` for degenerate input.
pub fn normalize_or(v: &Vec3, fallback: Vec3) -> Vec3 {
    try_normalize(v).unwrap_or(fallback)
}

/// Linear interpolation between two points, `t` clamped to [0, 1].
pub fn lerp(from: &Vec3, to: &Vec3, t: f32) -> Vec3 {
    let t = clamp(t, 0.0, 1.0);
    from + (to - from) * t
}

/// Scalar clamp that maps NaN to the lower bound.
///
/// Total for any bounds: reversed bounds are swapped and a NaN bound leaves
/// that side open.
#[inline]
pub fn clamp(value: f32, lo: f32, hi: f32) -> f32 {
    let (lo, hi) = if lo > hi { (hi, lo) } else { (lo, hi) };
    if value.is_nan() {
        return if lo.is_nan() { hi } else { lo };
    }
    value.max(lo).min(hi)
}

/// Projection onto the ground plane (y = 0).
#[inline]
pub fn horizontal(v: &Vec3) -> Vec3 {
    Vec3::new(v.x, 0.0, v.z)
}

/// Distance between two points measured on the ground plane.
#[inline]
pub fn horizontal_distance(a: &Vec3, b: &Vec3) -> f32 {
    horizontal(&(b - a)).norm()
}

#[inline]
pub fn is_finite(v: &Vec3) -> bool {
    v.x.is_finite() && v.y.is_finite() && v.z.is_finite()
}

/// Yaw (radians, about +Y) that turns +Z toward `forward`.
pub fn yaw_toward(forward: &Vec3) -> f32 {
    forward.x.atan2(forward.z)
}

/// Axis-aligned bounding box of a loaded scene, in model units.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Aabb {
    pub min: Vec3,
    pub max: Vec3,
}

impl Aabb {
    pub fn new(min: Vec3, max: Vec3) -> Self {
        Self { min, max }
    }

    /// Tightest box around `points`; `None` when empty or any point is not finite.
    pub fn from_points<'a, I>(points: I) -> Option<Self>
    where
        I: IntoIterator<Item = &'a Vec3>,
    {
        let mut iter = points.into_iter();
        let first = *iter.next()?;
        if !is_finite(&first) {
            return None;
        }
        let mut bounds = Aabb::new(first, first);
        for p in iter {
            if !is_finite(p) {
                return None;
            }
            bounds.expand_to(p);
        }
        Some(bounds)
    }

    pub fn expand_to(&mut self, p: &Vec3) {
        self.min = self.min.inf(p);
        self.max = self.max.sup(p);
    }

    pub fn union(&self, other: &Aabb) -> Aabb {
        Aabb::new(self.min.inf(&other.min), self.max.sup(&other.max))
    }

    pub fn size(&self) -> Vec3 {
        self.max - self.min
    }

    pub fn center(&self) -> Vec3 {
        (self.min + self.max) * 0.5
    }

    /// Finite with `min <= max` on every axis.
    pub fn is_valid(&self) -> bool {
        is_finite(&self.min)
            && is_finite(&self.max)
            && self.min.x <= self.max.x
            && self.min.y <= self.max.y
            && self.min.z <= self.max.z
    }

    /// Half of the larger horizontal extent.
    pub fn horizontal_radius(&self) -> f32 {
        let size = self.size();
        size.x.max(size.z) * 0.5
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_distance_and_horizontal_distance() {
        let a = Vec3::new(0.0, 1.0, 0.0);
        let b = Vec3::new(3.0, 5.0, 4.0);
        assert!((distance(&a, &b) - (9.0f32 + 16.0 + 16.0).sqrt()).abs() < 1e-5);
        assert!((horizontal_distance(&a, &b) - 5.0).abs() < 1e-5);
    }

    #[test]
    fn test_normalize_degenerate_falls_back() {
        assert!(try_normalize(&Vec3::zeros()).is_none());
        assert!(try_normalize(&Vec3::new(f32::NAN, 0.0, 1.0)).is_none());
        assert_eq!(normalize_or(&Vec3::zeros(), up()), up());
        let n = normalize_or(&Vec3::new(0.0, 0.0, -5.0), up());
        assert!((n - Vec3::new(0.0, 0.0, -1.0)).norm() < 1e-6);
    }

    #[test]
    fn test_lerp_clamps_t() {
        let a = Vec3::zeros();
        let b = Vec3::new(10.0, 0.0, 0.0);
        assert_eq!(lerp(&a, &b, 0.5), Vec3::new(5.0, 0.0, 0.0));
        assert_eq!(lerp(&a, &b, 2.0), b);
        assert_eq!(lerp(&a, &b, -1.0), a);
    }

    #[test]
    fn test_clamp_nan_maps_to_low() {
        assert_eq!(clamp(f32::NAN, -1.0, 1.0), -1.0);
        assert_eq!(clamp(3.0, -1.0, 1.0), 1.0);
    }

    #[test]
    fn test_clamp_reversed_and_nan_bounds() {
        assert_eq!(clamp(5.0, 10.0, 1.0), 5.0);
        assert_eq!(clamp(0.5, 10.0, 1.0), 1.0);
        assert_eq!(clamp(20.0, 10.0, 1.0), 10.0);
        assert_eq!(clamp(3.0, f32::NAN, 1.0), 1.0);
        assert_eq!(clamp(-3.0, f32::NAN, 1.0), -3.0);
        assert_eq!(clamp(f32::NAN, f32::NAN, 1.0), 1.0);
    }

    #[test]
    fn test_yaw_toward_axes() {
        assert!(yaw_toward(&Vec3::new(0.0, 0.0, 1.0)).abs() < 1e-6);
        assert!((yaw_toward(&Vec3::new(1.0, 0.0, 0.0)) - std::f32::consts::FRAC_PI_2).abs() < 1e-6);
    }

    #[test]
    fn test_aabb_from_points() {
        let pts = [
            Vec3::new(-2.0, 0.0, 1.0),
            Vec3::new(4.0, 3.0, -6.0),
            Vec3::new(1.0, -1.0, 2.0),
        ];
        let b = Aabb::from_points(pts.iter()).unwrap();
        assert_eq!(b.min, Vec3::new(-2.0, -1.0, -6.0));
        assert_eq!(b.max, Vec3::new(4.0, 3.0, 2.0));
        assert_eq!(b.center(), Vec3::new(1.0, 1.0, -2.0));
        // x extent 6, z extent 8 -> radius 4
        assert!((b.horizontal_radius() - 4.0).abs() < 1e-6);
        assert!(b.is_valid());
    }

    #[test]
    fn test_aabb_rejects_empty_and_non_finite() {
        let empty: [Vec3; 0] = [];
        assert!(Aabb::from_points(empty.iter()).is_none());
        let bad = [Vec3::new(f32::INFINITY, 0.0, 0.0)];
        assert!(Aabb::from_points(bad.iter()).is_none());
        let inverted = Aabb::new(Vec3::new(1.0, 0.0, 0.0), Vec3::zeros());
        assert!(!inverted.is_valid());
    }
}
