//! Thin RAII wrappers around the OpenGL objects orbview uses: the window and context,
//! shaders, meshes, textures and framebuffers.

pub mod app;
pub mod framebuffer;
pub mod mesh;
pub mod shader;
pub mod texture;

pub use app::*;
pub use framebuffer::*;
pub use mesh::*;
pub use shader::*;
pub use texture::*;
