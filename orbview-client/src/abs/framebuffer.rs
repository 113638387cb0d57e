//! Module to work with OpenGL framebuffers.
//!
//! This module provides functionality to create, bind, and manage OpenGL framebuffers.
//! It allows for off-screen rendering into a color texture backed by a combined
//! depth/stencil renderbuffer.

use std::sync::Arc;

use glow::HasContext;

use crate::abs::Texture;

/// An offscreen render target with an RGB8 color texture and a DEPTH24_STENCIL8
/// renderbuffer. The attachments keep their initial size.
pub struct Framebuffer {
    gl: Arc<glow::Context>,
    fbo: glow::Framebuffer,
    color_tex: Texture,
    depth_stencil: glow::Renderbuffer,
    complete: bool,
}

impl Framebuffer {
    /// Creates a new framebuffer with the specified width and height.
    ///
    /// An incomplete framebuffer is logged but still returned.
    pub fn new(gl: &Arc<glow::Context>, width: u32, height: u32) -> Result<Self, String> {
        unsafe {
            let fbo = gl.create_framebuffer()?;
            gl.bind_framebuffer(glow::FRAMEBUFFER, Some(fbo));

            let color_tex = match Texture::new_empty_rgb(gl, width, height) {
                Ok(tex) => tex,
                Err(e) => {
                    gl.bind_framebuffer(glow::FRAMEBUFFER, None);
                    gl.delete_framebuffer(fbo);
                    return Err(e);
                }
            };
            gl.framebuffer_texture_2d(
                glow::FRAMEBUFFER,
                glow::COLOR_ATTACHMENT0,
                glow::TEXTURE_2D,
                Some(color_tex.id),
                0,
            );

            let depth_stencil = match gl.create_renderbuffer() {
                Ok(rbo) => rbo,
                Err(e) => {
                    gl.bind_framebuffer(glow::FRAMEBUFFER, None);
                    gl.delete_framebuffer(fbo);
                    return Err(e);
                }
            };
            gl.bind_renderbuffer(glow::RENDERBUFFER, Some(depth_stencil));
            gl.renderbuffer_storage(
                glow::RENDERBUFFER,
                glow::DEPTH24_STENCIL8,
                width as i32,
                height as i32,
            );
            gl.framebuffer_renderbuffer(
                glow::FRAMEBUFFER,
                glow::DEPTH_STENCIL_ATTACHMENT,
                glow::RENDERBUFFER,
                Some(depth_stencil),
            );
            gl.bind_renderbuffer(glow::RENDERBUFFER, None);

            let status = gl.check_framebuffer_status(glow::FRAMEBUFFER);
            let complete = status == glow::FRAMEBUFFER_COMPLETE;
            if !complete {
                log::error!("Framebuffer is not complete (status 0x{status:X})");
            }

            gl.bind_framebuffer(glow::FRAMEBUFFER, None);

            Ok(Self {
                gl: Arc::clone(gl),
                fbo,
                color_tex,
                depth_stencil,
                complete,
            })
        }
    }

    /// Binds the framebuffer for rendering.
    pub fn bind(&self) {
        unsafe {
            self.gl.bind_framebuffer(glow::FRAMEBUFFER, Some(self.fbo));
        }
    }

    /// Unbinds the framebuffer, reverting to the default framebuffer.
    pub fn unbind(gl: &glow::Context) {
        unsafe {
            gl.bind_framebuffer(glow::FRAMEBUFFER, None);
        }
    }

    /// Returns the color texture of the framebuffer.
    pub fn texture(&self) -> &Texture {
        &self.color_tex
    }

    /// Size of the attachments in pixels.
    pub fn size(&self) -> (u32, u32) {
        (self.color_tex.width(), self.color_tex.height())
    }

    /// Whether the driver reported the framebuffer complete at creation.
    pub fn is_complete(&self) -> bool {
        self.complete
    }
}

impl Drop for Framebuffer {
    fn drop(&mut self) {
        unsafe {
            self.gl.delete_renderbuffer(self.depth_stencil);
            self.gl.delete_framebuffer(self.fbo);
        }
    }
}
