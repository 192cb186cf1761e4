//! Renderer-facing camera.
//!
//! The controller owns the logical pose and pushes it into a `RenderCamera`
//! once per tick; the renderer and the marker picker only ever read it.

use crate::constants::{DEFAULT_FOVY_DEGREES, DEFAULT_ZFAR, DEFAULT_ZNEAR, WORLD_UP};
use crate::math::Ray;
use glam::{Mat3, Mat4, Quat, Vec2, Vec3, Vec4};

/// Simple right-handed camera description with perspective projection.
#[derive(Clone, Debug, PartialEq)]
pub struct RenderCamera {
    pub eye: Vec3,
    pub target: Vec3,
    pub up: Vec3,
    pub aspect: f32,
    pub fovy_radians: f32,
    pub znear: f32,
    pub zfar: f32,
}

impl Default for RenderCamera {
    fn default() -> Self {
        Self::new(1.0)
    }
}

impl RenderCamera {
    pub fn new(aspect: f32) -> Self {
        Self {
            eye: Vec3::new(0.0, 0.0, 1.0),
            target: Vec3::ZERO,
            up: WORLD_UP,
            aspect,
            fovy_radians: DEFAULT_FOVY_DEGREES.to_radians(),
            znear: DEFAULT_ZNEAR,
            zfar: DEFAULT_ZFAR,
        }
    }

    /// Update the aspect ratio from a viewport size; zero sizes are ignored.
    pub fn set_viewport(&mut self, width: u32, height: u32) {
        if width > 0 && height > 0 {
            self.aspect = width as f32 / height as f32;
        }
    }

    /// Compute the clip-space projection matrix.
    pub fn projection_matrix(&self) -> Mat4 {
        Mat4::perspective_rh(self.fovy_radians, self.aspect, self.znear, self.zfar)
    }

    /// Compute the view matrix that transforms world to view space.
    pub fn view_matrix(&self) -> Mat4 {
        Mat4::look_at_rh(self.eye, self.target, self.up)
    }

    pub fn view_projection(&self) -> Mat4 {
        self.projection_matrix() * self.view_matrix()
    }

    /// World-space rotation of the camera (local -Z looks at the target).
    pub fn orientation(&self) -> Quat {
        let forward = (self.target - self.eye).normalize_or_zero();
        let right = forward.cross(self.up).normalize_or_zero();
        let up = right.cross(forward);
        Quat::from_mat3(&Mat3::from_cols(right, up, -forward))
    }

    /// Camera right and up axes in world space, used to face billboards.
    pub fn billboard_axes(&self) -> (Vec3, Vec3) {
        let q = self.orientation();
        (q * Vec3::X, q * Vec3::Y)
    }

    /// Project a world point to NDC; `None` when it is behind the eye.
    pub fn project_to_ndc(&self, world: Vec3) -> Option<Vec2> {
        let clip = self.view_projection() * Vec4::new(world.x, world.y, world.z, 1.0);
        if clip.w <= f32::EPSILON {
            return None;
        }
        Some(Vec2::new(clip.x / clip.w, clip.y / clip.w))
    }

    /// Pick ray from the eye through an NDC cursor position.
    pub fn ray_through_ndc(&self, ndc: Vec2) -> Ray {
        Ray::from_ndc(ndc, self.view_projection().inverse(), self.eye)
    }
}
