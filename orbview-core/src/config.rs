//! Renderer configuration and application settings.
//!
//! [`RendererConfig`] is everything a renderer needs at initialization. [`Settings`]
//! is the user facing JSON file the client reads at startup; every field is optional
//! and falls back to its default.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::{camera::Camera, geometry::Mesh, lighting::Lighting};

/// Errors produced while loading or validating configuration.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("invalid sphere: radius {radius}, {sectors} sectors, {stacks} stacks")]
    InvalidSphere { radius: f32, sectors: u32, stacks: u32 },
    #[error("render target must be non-empty, got {width}x{height}")]
    ZeroTarget { width: u32, height: u32 },
    #[error("window size must be non-zero")]
    ZeroWindow,
    #[error("failed to read settings: {0}")]
    Io(#[from] std::io::Error),
    #[error("failed to parse settings: {0}")]
    Parse(#[from] serde_json::Error),
}

/// How the vertex or index stream is assembled into primitives.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Topology {
    #[default]
    Triangles,
    TriangleStrip,
    TriangleFan,
    Lines,
    LineStrip,
    LineLoop,
    Points,
}

/// Initialization parameters of a geometry renderer.
#[derive(Clone, Debug)]
pub struct RendererConfig {
    pub mesh: Mesh,
    pub vertex_shader: String,
    pub fragment_shader: String,
    pub initial_width: u32,
    pub initial_height: u32,
    pub topology: Topology,
    pub lighting: Lighting,
}

impl RendererConfig {
    pub fn new(
        mesh: Mesh,
        vertex_shader: impl Into<String>,
        fragment_shader: impl Into<String>,
        initial_width: u32,
        initial_height: u32,
    ) -> Self {
        Self {
            mesh,
            vertex_shader: vertex_shader.into(),
            fragment_shader: fragment_shader.into(),
            initial_width,
            initial_height,
            topology: Topology::default(),
            lighting: Lighting::default(),
        }
    }

    pub fn with_topology(mut self, topology: Topology) -> Self {
        self.topology = topology;
        self
    }

    pub fn with_lighting(mut self, lighting: Lighting) -> Self {
        self.lighting = lighting;
        self
    }

    /// Checks the target size. The renderer itself does not.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.initial_width == 0 || self.initial_height == 0 {
            return Err(ConfigError::ZeroTarget {
                width: self.initial_width,
                height: self.initial_height,
            });
        }
        Ok(())
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct WindowSettings {
    pub title: String,
    pub width: u32,
    pub height: u32,
    pub fullscreen: bool,
}

impl Default for WindowSettings {
    fn default() -> Self {
        Self {
            title: "orbview".to_string(),
            width: 1920,
            height: 1080,
            fullscreen: false,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SphereSettings {
    pub radius: f32,
    pub sectors: u32,
    pub stacks: u32,
}

impl Default for SphereSettings {
    fn default() -> Self {
        Self {
            radius: 1.0,
            sectors: 128,
            stacks: 128,
        }
    }
}

impl SphereSettings {
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.radius <= 0.0 || self.sectors < 3 || self.stacks < 2 {
            return Err(ConfigError::InvalidSphere {
                radius: self.radius,
                sectors: self.sectors,
                stacks: self.stacks,
            });
        }
        Ok(())
    }
}

/// Resolution of the offscreen render target.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct TargetSettings {
    pub width: u32,
    pub height: u32,
}

impl Default for TargetSettings {
    fn default() -> Self {
        Self {
            width: 1920,
            height: 1080,
        }
    }
}

/// Application settings, read from `settings.json`.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub window: WindowSettings,
    pub sphere: SphereSettings,
    pub target: TargetSettings,
    pub topology: Topology,
    pub camera: Camera,
    pub lighting: Lighting,
    /// Diffuse texture, relative to the working directory.
    pub texture: PathBuf,
    pub log_level: String,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            window: WindowSettings::default(),
            sphere: SphereSettings::default(),
            target: TargetSettings::default(),
            topology: Topology::default(),
            camera: Camera::default(),
            lighting: Lighting::default(),
            texture: PathBuf::from("earth.jpg"),
            log_level: "info".to_string(),
        }
    }
}

impl Settings {
    pub fn from_json(s: &str) -> Result<Self, ConfigError> {
        Ok(serde_json::from_str(s)?)
    }

    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path)?;
        let settings = Self::from_json(&contents)?;
        log::debug!("Loaded settings from {}", path.display());
        Ok(settings)
    }

    pub fn to_json(&self) -> Result<String, ConfigError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.window.width == 0 || self.window.height == 0 {
            return Err(ConfigError::ZeroWindow);
        }
        if self.target.width == 0 || self.target.height == 0 {
            return Err(ConfigError::ZeroTarget {
                width: self.target.width,
                height: self.target.height,
            });
        }
        self.sphere.validate()
    }

    /// Parsed log level. Unknown names fall back to `Info`.
    pub fn log_level(&self) -> log::LevelFilter {
        self.log_level.parse().unwrap_or(log::LevelFilter::Info)
    }
}

#[cfg(test)]
mod tests {
    use glam::Vec3;

    use super::*;
    use crate::geometry::generate_sphere;

    #[test]
    fn test_empty_object_gives_defaults() {
        let settings = Settings::from_json("{}").unwrap();
        assert_eq!(settings, Settings::default());
        assert!(settings.validate().is_ok());
        assert_eq!(settings.sphere.sectors, 128);
        assert_eq!(settings.target, TargetSettings { width: 1920, height: 1080 });
    }

    #[test]
    fn test_partial_override() {
        let settings = Settings::from_json(
            r#"{
                "sphere": { "sectors": 32 },
                "topology": "line_strip",
                "lighting": { "object_color": [0.2, 0.4, 0.8] },
                "log_level": "debug"
            }"#,
        )
        .unwrap();
        assert_eq!(settings.sphere.sectors, 32);
        assert_eq!(settings.sphere.stacks, 128);
        assert_eq!(settings.sphere.radius, 1.0);
        assert_eq!(settings.topology, Topology::LineStrip);
        assert_eq!(settings.lighting.object_color, Vec3::new(0.2, 0.4, 0.8));
        assert_eq!(settings.lighting.color, Vec3::ONE);
        assert_eq!(settings.log_level(), log::LevelFilter::Debug);
        assert_eq!(settings.window, WindowSettings::default());
    }

    #[test]
    fn test_round_trip_through_json() {
        let mut settings = Settings::default();
        settings.camera.fov_y = 45.0;
        let parsed = Settings::from_json(&settings.to_json().unwrap()).unwrap();
        assert_eq!(parsed, settings);
    }

    #[test]
    fn test_malformed_json() {
        assert!(matches!(
            Settings::from_json("{ \"sphere\": "),
            Err(ConfigError::Parse(_))
        ));
        assert!(matches!(
            Settings::from_json(r#"{ "topology": "hexagons" }"#),
            Err(ConfigError::Parse(_))
        ));
    }

    #[test]
    fn test_missing_file() {
        let result = Settings::load(Path::new("/nonexistent/orbview/settings.json"));
        assert!(matches!(result, Err(ConfigError::Io(_))));
    }

    #[test]
    fn test_unknown_log_level() {
        let settings = Settings {
            log_level: "chatty".to_string(),
            ..Default::default()
        };
        assert_eq!(settings.log_level(), log::LevelFilter::Info);
    }

    #[test]
    fn test_sphere_validation() {
        let ok = SphereSettings::default();
        assert!(ok.validate().is_ok());

        for bad in [
            SphereSettings { radius: 0.0, ..ok },
            SphereSettings { radius: -1.0, ..ok },
            SphereSettings { sectors: 2, ..ok },
            SphereSettings { stacks: 1, ..ok },
        ] {
            assert!(matches!(
                bad.validate(),
                Err(ConfigError::InvalidSphere { .. })
            ));
        }
    }

    #[test]
    fn test_settings_validation() {
        let mut settings = Settings::default();
        settings.target.height = 0;
        assert!(matches!(
            settings.validate(),
            Err(ConfigError::ZeroTarget { width: 1920, height: 0 })
        ));

        let mut settings = Settings::default();
        settings.window.width = 0;
        assert!(matches!(settings.validate(), Err(ConfigError::ZeroWindow)));
    }

    #[test]
    fn test_renderer_config() {
        let config = RendererConfig::new(generate_sphere(1.0, 8, 4), "vs", "fs", 640, 480);
        assert_eq!(config.topology, Topology::Triangles);
        assert_eq!(config.lighting, Lighting::default());
        assert!(config.validate().is_ok());

        let config = config.with_topology(Topology::Points);
        assert_eq!(config.topology, Topology::Points);

        let empty = RendererConfig::new(Mesh::default(), "vs", "fs", 0, 480);
        assert!(matches!(
            empty.validate(),
            Err(ConfigError::ZeroTarget { .. })
        ));
    }
}
