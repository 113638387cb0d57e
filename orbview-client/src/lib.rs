//! Windowed viewer for a lit, textured sphere rendered offscreen.
//!
//! The binary in `main.rs` wires these modules together; they are exposed as a
//! library so the renderer can be driven from tests and other frontends.

pub mod abs;
pub mod logging;
pub mod other;
pub mod render;
pub mod settings;
