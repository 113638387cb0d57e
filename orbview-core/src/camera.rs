//! A fixed look-at camera producing the view and projection transforms.

use glam::{Mat4, Vec3};
use serde::{Deserialize, Serialize};

#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Camera {
    pub eye: Vec3,
    pub target: Vec3,
    pub up: Vec3,
    /// Vertical field of view in degrees.
    pub fov_y: f32,
    pub near: f32,
    pub far: f32,
}

impl Default for Camera {
    fn default() -> Self {
        Self {
            eye: Vec3::new(0.0, 0.0, 3.0),
            target: Vec3::ZERO,
            up: Vec3::Y,
            fov_y: 60.0,
            near: 0.1,
            far: 100.0,
        }
    }
}

impl Camera {
    pub fn view(&self) -> Mat4 {
        Mat4::look_at_rh(self.eye, self.target, self.up)
    }

    pub fn projection(&self, aspect: f32) -> Mat4 {
        Mat4::perspective_rh_gl(self.fov_y.to_radians(), aspect, self.near, self.far)
    }
}

/// Aspect ratio of a viewport, falling back to 1.0 for a non-positive height.
pub fn aspect_ratio(width: f32, height: f32) -> f32 {
    if height > 0.0 { width / height } else { 1.0 }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_view_looks_down_negative_z() {
        let camera = Camera::default();
        let origin = camera.view().transform_point3(Vec3::ZERO);
        assert!((origin - Vec3::new(0.0, 0.0, -3.0)).length() < 1e-6);
    }

    #[test]
    fn test_aspect_ratio() {
        assert_eq!(aspect_ratio(1600.0, 800.0), 2.0);
        assert_eq!(aspect_ratio(300.0, 0.0), 1.0);
        assert_eq!(aspect_ratio(300.0, -5.0), 1.0);
    }

    #[test]
    fn test_projection_uses_aspect() {
        let camera = Camera::default();
        let square = camera.projection(1.0);
        let wide = camera.projection(2.0);
        assert!((square.x_axis.x - 2.0 * wide.x_axis.x).abs() < 1e-5);
        assert_eq!(square.y_axis.y, wide.y_axis.y);
    }
}
