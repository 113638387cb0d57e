//! The core of orbview. This crate holds everything that does not need a GPU:
//! the geometry data model, the sphere mesh generator, renderer configuration,
//! the per-frame render state and the application settings.
//!
//! The client crate consumes these types to drive its OpenGL renderer.

pub mod camera;
pub mod config;
pub mod geometry;
pub mod lighting;
pub mod state;

pub use camera::Camera;
pub use config::{ConfigError, RendererConfig, Settings, Topology};
pub use geometry::{Mesh, Vertex, VertexAttribute};
pub use lighting::Lighting;
pub use state::{DrawCall, RenderState};
