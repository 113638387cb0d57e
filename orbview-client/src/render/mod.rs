//! Module for anything related to rendering.
//!
//! This module contains the offscreen geometry renderer, the UI renderer used to
//! composite its output, and all used shaders.

pub mod error;
pub mod geometry;
pub mod ui;

pub use error::RendererError;
pub use geometry::GeometryRenderer;

/// Default sphere vertex stage. Inputs at locations 0-2 follow the mesh vertex layout.
pub const SPHERE_VERTEX_SHADER: &str = include_str!("shaders/sphere/vert.glsl");
/// Default sphere fragment stage: ambient, diffuse and specular over a diffuse texture.
pub const SPHERE_FRAGMENT_SHADER: &str = include_str!("shaders/sphere/frag.glsl");

pub const UI_VERTEX_SHADER: &str = include_str!("shaders/ui/vert.glsl");
pub const UI_FRAGMENT_SHADER: &str = include_str!("shaders/ui/frag.glsl");
