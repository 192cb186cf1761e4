//! Small geometry helpers layered on top of `glam`.

use glam::{Mat4, Vec2, Vec3, Vec4};
use std::f32::consts::TAU;

/// Axis-aligned bounding box.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Aabb {
    pub min: Vec3,
    pub max: Vec3,
}

impl Aabb {
    pub fn new(min: Vec3, max: Vec3) -> Self {
        Self {
            min: min.min(max),
            max: min.max(max),
        }
    }

    /// Smallest box containing every point; `None` for an empty iterator.
    pub fn from_points(points: impl IntoIterator<Item = Vec3>) -> Option<Self> {
        let mut iter = points.into_iter();
        let first = iter.next()?;
        let (min, max) = iter.fold((first, first), |(lo, hi), p| (lo.min(p), hi.max(p)));
        Some(Self { min, max })
    }

    pub fn center(&self) -> Vec3 {
        (self.min + self.max) * 0.5
    }

    pub fn size(&self) -> Vec3 {
        self.max - self.min
    }

    pub fn contains(&self, p: Vec3) -> bool {
        p.cmpge(self.min).all() && p.cmple(self.max).all()
    }

    pub fn union(&self, other: &Aabb) -> Aabb {
        Aabb {
            min: self.min.min(other.min),
            max: self.max.max(other.max),
        }
    }

    /// Map `unit` (each component in \[0, 1\]) to a point inside the box.
    pub fn lerp_point(&self, unit: Vec3) -> Vec3 {
        self.min + self.size() * unit
    }
}

/// Half-line with a unit direction.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Ray {
    pub origin: Vec3,
    pub dir: Vec3,
}

impl Ray {
    pub fn new(origin: Vec3, dir: Vec3) -> Self {
        Self {
            origin,
            dir: dir.normalize_or_zero(),
        }
    }

    /// Ray from `eye` through the far-plane point under `ndc`.
    ///
    /// `inv_view_proj` is the inverse of the camera's projection * view
    /// matrix. NDC outside \[-1, 1\] is valid and simply points off-screen.
    pub fn from_ndc(ndc: Vec2, inv_view_proj: Mat4, eye: Vec3) -> Self {
        let p_far = inv_view_proj * Vec4::new(ndc.x, ndc.y, 1.0, 1.0);
        let far: Vec3 = p_far.truncate() / p_far.w;
        Self::new(eye, far - eye)
    }

    #[inline]
    pub fn at(&self, t: f32) -> Vec3 {
        self.origin + self.dir * t
    }

    /// Closest approach of the ray to `point`.
    ///
    /// Returns `(t, perpendicular_distance_squared)`, or `None` when the
    /// point lies behind the origin.
    #[inline]
    pub fn closest_approach(&self, point: Vec3) -> Option<(f32, f32)> {
        let to_point = point - self.origin;
        let t = to_point.dot(self.dir);
        if t < 0.0 {
            return None;
        }
        let perp_sq = (to_point.length_squared() - t * t).max(0.0);
        Some((t, perp_sq))
    }

    pub fn is_finite(&self) -> bool {
        self.origin.is_finite() && self.dir.is_finite() && self.dir != Vec3::ZERO
    }
}

/// Wrap an angle into \[0, 2π).
#[inline]
pub fn wrap_angle(radians: f32) -> f32 {
    let wrapped = radians.rem_euclid(TAU);
    // rem_euclid can round up to exactly TAU for tiny negative inputs
    if wrapped >= TAU {
        0.0
    } else {
        wrapped
    }
}

/// Unit view direction for yaw (around +Y, 0 = +Z) and pitch (up positive).
#[inline]
pub fn direction_from_yaw_pitch(yaw: f32, pitch: f32) -> Vec3 {
    let (sy, cy) = yaw.sin_cos();
    let (sp, cp) = pitch.sin_cos();
    Vec3::new(sy * cp, sp, cy * cp)
}

/// Inverse of [`direction_from_yaw_pitch`] for a unit direction.
#[inline]
pub fn yaw_pitch_from_direction(dir: Vec3) -> (f32, f32) {
    let yaw = dir.x.atan2(dir.z);
    let horizontal = (dir.x * dir.x + dir.z * dir.z).sqrt();
    let pitch = dir.y.atan2(horizontal);
    (yaw, pitch)
}
