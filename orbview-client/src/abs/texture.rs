//! Structs and functions for handling textures.
//!
//! The module provides the [`Texture`] struct which is a CPU representation of a GPU texture.

use std::{num::NonZero, path::Path, sync::Arc};

use glow::HasContext;
use image::{DynamicImage, GenericImageView};

/// The single pixel uploaded when a texture file cannot be loaded.
pub const FALLBACK_PIXEL: [u8; 4] = [255, 0, 255, 255];

/// Represents a handle to a texture.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct TextureHandle(pub NonZero<u32>, u32, u32);

impl TextureHandle {
    /// Binds the texture handle to the specified texture unit.
    pub fn bind(&self, gl: &glow::Context, unit: u32) {
        unsafe {
            gl.active_texture(glow::TEXTURE0 + unit);
            gl.bind_texture(glow::TEXTURE_2D, Some(glow::NativeTexture(self.0)));
        }
    }

    /// Returns the width of the texture.
    pub fn width(&self) -> u32 {
        self.1
    }

    /// Returns the height of the texture.
    pub fn height(&self) -> u32 {
        self.2
    }
}

/// Represents a texture stored on the GPU side.
pub struct Texture {
    pub(super) gl: Arc<glow::Context>,
    pub(super) id: glow::Texture,
    pub(super) width: u32,
    pub(super) height: u32,
}

impl Texture {
    /// Creates a new texture from the given [`image::DynamicImage`], with mipmaps
    /// and repeat wrapping.
    pub fn new(gl: &Arc<glow::Context>, image: &DynamicImage) -> Result<Self, String> {
        let (width, height) = image.dimensions();
        let data = image.to_rgba8().into_raw();
        Self::new_from_data(gl, width, height, &data, true)
    }

    /// Creates a new texture from the given raw RGBA data.
    pub fn new_from_data(
        gl: &Arc<glow::Context>,
        width: u32,
        height: u32,
        data: &[u8],
        mipmaps: bool,
    ) -> Result<Self, String> {
        unsafe {
            let texture = gl.create_texture()?;
            gl.bind_texture(glow::TEXTURE_2D, Some(texture));
            gl.tex_image_2d(
                glow::TEXTURE_2D,
                0,
                glow::RGBA as i32,
                width as i32,
                height as i32,
                0,
                glow::RGBA,
                glow::UNSIGNED_BYTE,
                glow::PixelUnpackData::Slice(Some(data)),
            );
            let min_filter = if mipmaps {
                gl.generate_mipmap(glow::TEXTURE_2D);
                glow::LINEAR_MIPMAP_LINEAR
            } else {
                glow::LINEAR
            };
            gl.tex_parameter_i32(glow::TEXTURE_2D, glow::TEXTURE_WRAP_S, glow::REPEAT as i32);
            gl.tex_parameter_i32(glow::TEXTURE_2D, glow::TEXTURE_WRAP_T, glow::REPEAT as i32);
            gl.tex_parameter_i32(glow::TEXTURE_2D, glow::TEXTURE_MIN_FILTER, min_filter as i32);
            gl.tex_parameter_i32(
                glow::TEXTURE_2D,
                glow::TEXTURE_MAG_FILTER,
                glow::LINEAR as i32,
            );
            gl.bind_texture(glow::TEXTURE_2D, None);

            Ok(Self {
                gl: Arc::clone(gl),
                id: texture,
                width,
                height,
            })
        }
    }

    /// Allocates an uninitialized RGB8 texture suitable as a color attachment.
    pub fn new_empty_rgb(gl: &Arc<glow::Context>, width: u32, height: u32) -> Result<Self, String> {
        unsafe {
            let texture = gl.create_texture()?;
            gl.bind_texture(glow::TEXTURE_2D, Some(texture));
            gl.tex_image_2d(
                glow::TEXTURE_2D,
                0,
                glow::RGB8 as i32,
                width as i32,
                height as i32,
                0,
                glow::RGB,
                glow::UNSIGNED_BYTE,
                glow::PixelUnpackData::Slice(None),
            );
            gl.tex_parameter_i32(
                glow::TEXTURE_2D,
                glow::TEXTURE_MIN_FILTER,
                glow::LINEAR as i32,
            );
            gl.tex_parameter_i32(
                glow::TEXTURE_2D,
                glow::TEXTURE_MAG_FILTER,
                glow::LINEAR as i32,
            );
            gl.tex_parameter_i32(
                glow::TEXTURE_2D,
                glow::TEXTURE_WRAP_S,
                glow::CLAMP_TO_EDGE as i32,
            );
            gl.tex_parameter_i32(
                glow::TEXTURE_2D,
                glow::TEXTURE_WRAP_T,
                glow::CLAMP_TO_EDGE as i32,
            );
            gl.bind_texture(glow::TEXTURE_2D, None);

            Ok(Self {
                gl: Arc::clone(gl),
                id: texture,
                width,
                height,
            })
        }
    }

    /// A 1x1 opaque magenta texture.
    pub fn fallback(gl: &Arc<glow::Context>) -> Result<Self, String> {
        Self::new_from_data(gl, 1, 1, &FALLBACK_PIXEL, false)
    }

    /// Loads an image file, falling back to [`Texture::fallback`] when the file is
    /// missing or unreadable. Only GL allocation failures are returned as errors.
    pub fn load_or_fallback(gl: &Arc<glow::Context>, path: &Path) -> Result<Self, String> {
        match image::open(path) {
            Ok(image) => {
                log::info!(
                    "Loaded texture {} ({}x{})",
                    path.display(),
                    image.width(),
                    image.height()
                );
                Self::new(gl, &image)
            }
            Err(e) => {
                log::warn!(
                    "Failed to load texture {}: {e}. Using fallback.",
                    path.display()
                );
                Self::fallback(gl)
            }
        }
    }

    /// Returns the width of the texture.
    pub fn width(&self) -> u32 {
        self.width
    }

    /// Returns the height of the texture.
    pub fn height(&self) -> u32 {
        self.height
    }

    /// Returns a handle to the texture.
    pub fn handle(&self) -> TextureHandle {
        TextureHandle(self.id.0, self.width, self.height)
    }

    /// Binds the texture to the specified texture unit.
    pub fn bind(&self, unit: u32) {
        unsafe {
            self.gl.active_texture(glow::TEXTURE0 + unit);
            self.gl.bind_texture(glow::TEXTURE_2D, Some(self.id));
        }
    }
}

impl Drop for Texture {
    fn drop(&mut self) {
        unsafe {
            self.gl.delete_texture(self.id);
        }
    }
}
