//! The single directional light and material tint used when shading the sphere.

use glam::Vec3;
use serde::{Deserialize, Serialize};

/// Light and material parameters uploaded with every draw.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Lighting {
    /// Direction the light travels in. Normalized before upload.
    pub direction: Vec3,
    pub color: Vec3,
    pub object_color: Vec3,
    /// Eye position used for the specular term. It is independent of the view
    /// matrix, so callers moving the camera should update both.
    pub view_position: Vec3,
}

impl Default for Lighting {
    fn default() -> Self {
        Self {
            direction: Vec3::new(0.0, -1.0, -1.0),
            color: Vec3::ONE,
            object_color: Vec3::ONE,
            view_position: Vec3::new(0.0, 0.0, 3.0),
        }
    }
}

impl Lighting {
    /// The light direction as uploaded to `lightDir`. A zero vector falls back to
    /// the default direction.
    pub fn normalized_direction(&self) -> Vec3 {
        self.direction
            .try_normalize()
            .unwrap_or_else(|| Lighting::default().direction.normalize())
    }
}
