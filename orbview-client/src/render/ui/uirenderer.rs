//! The UI renderer used to composite the scene panel.

use std::sync::Arc;

use glam::{Mat4, Vec2, Vec4};

use crate::{
    abs::{BufferUsage, Mesh, Shader, ShaderProgram, ShaderStage, TextureHandle},
    render::{RendererError, UI_FRAGMENT_SHADER, UI_VERTEX_SHADER, ui::UIVertex},
};

/// The rendering mode for a UI element.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum UIRenderMode {
    Texture(TextureHandle, Vec4),
    Color(Vec4),
}

/// A draw command for rendering a UI element.
pub struct DrawCommand {
    pub rect: [Vec2; 2],
    pub uv_rect: [Vec2; 2],
    pub mode: UIRenderMode,
}

/// The UI renderer for rendering 2D elements on the screen.
///
/// Consecutive commands with the same mode are batched into one draw.
pub struct UIRenderer {
    gl: Arc<glow::Context>,
    shader_program: ShaderProgram,
    pub projection_matrix: Mat4,
    last_command: Option<DrawCommand>,
    vertices: Vec<UIVertex>,
    indices: Vec<u32>,
    mesh: Option<Mesh>,
}

impl UIRenderer {
    /// Creates a new UI renderer for a window of the given size.
    pub fn new(gl: &Arc<glow::Context>, window_size: Vec2) -> Result<Self, RendererError> {
        let vert = Shader::new(gl, ShaderStage::Vertex, UI_VERTEX_SHADER).map_err(|log| {
            RendererError::ShaderCompile {
                stage: ShaderStage::Vertex,
                log,
            }
        })?;
        let frag = Shader::new(gl, ShaderStage::Fragment, UI_FRAGMENT_SHADER).map_err(|log| {
            RendererError::ShaderCompile {
                stage: ShaderStage::Fragment,
                log,
            }
        })?;
        let shader_program =
            ShaderProgram::new(gl, &[&vert, &frag]).map_err(RendererError::ProgramLink)?;

        Ok(Self {
            gl: Arc::clone(gl),
            shader_program,
            projection_matrix: ortho(window_size),
            last_command: None,
            vertices: Vec::new(),
            indices: Vec::new(),
            mesh: None,
        })
    }

    /// Updates the projection after the window was resized.
    pub fn resize(&mut self, window_size: Vec2) {
        self.projection_matrix = ortho(window_size);
    }

    /// Queues a solid rectangle.
    pub fn rect(&mut self, rect: [Vec2; 2], color: Vec4) {
        self.add_command(DrawCommand {
            rect,
            uv_rect: [Vec2::ZERO, Vec2::ONE],
            mode: UIRenderMode::Color(color),
        });
    }

    /// Queues a textured rectangle.
    pub fn image(&mut self, rect: [Vec2; 2], uv_rect: [Vec2; 2], texture: TextureHandle) {
        self.add_command(DrawCommand {
            rect,
            uv_rect,
            mode: UIRenderMode::Texture(texture, Vec4::ONE),
        });
    }

    /// Adds a draw command to the UI renderer.
    pub fn add_command(&mut self, command: DrawCommand) {
        // A different mode needs different uniforms, so flush the current batch first
        if self
            .last_command
            .as_ref()
            .is_some_and(|last| last.mode != command.mode)
        {
            self.finish();
        }
        self.append_command(&command);
        self.last_command = Some(command);
    }

    /// Finishes the current batch and draws it.
    pub fn finish(&mut self) {
        self.draw_mesh();
        self.vertices.clear();
        self.indices.clear();
        self.last_command = None;
    }

    /// Uploads and draws the current batch.
    fn draw_mesh(&mut self) {
        if self.vertices.is_empty() || self.indices.is_empty() {
            return;
        }

        if self.mesh.is_none() {
            match Mesh::new(
                &self.gl,
                &self.vertices,
                &self.indices,
                glow::TRIANGLES,
                BufferUsage::Dynamic,
            ) {
                Ok(mesh) => self.mesh = Some(mesh),
                Err(e) => {
                    log::error!("Failed to create UI mesh: {e}");
                    return;
                }
            }
        } else if let Some(mesh) = self.mesh.as_mut() {
            mesh.update(&self.vertices, &self.indices);
        }

        self.shader_program.use_program();
        self.shader_program
            .set_uniform("u_projection", self.projection_matrix);

        if let Some(last_command) = &self.last_command {
            match last_command.mode {
                UIRenderMode::Texture(texture_handle, color) => {
                    texture_handle.bind(&self.gl, 0);
                    self.shader_program.set_uniform("u_tex", 0);
                    self.shader_program.set_uniform("u_color", color);
                    self.shader_program.set_uniform("u_solid", false);
                }
                UIRenderMode::Color(color) => {
                    self.shader_program.set_uniform("u_color", color);
                    self.shader_program.set_uniform("u_solid", true);
                }
            }
        }

        if let Some(mesh) = &self.mesh {
            mesh.draw();
        }
    }

    /// Appends a draw command's vertices and indices to the current batch.
    fn append_command(&mut self, command: &DrawCommand) {
        let base_index = self.vertices.len() as u32;
        self.vertices.extend(quad_vertices(command));
        self.indices.extend_from_slice(&[
            base_index,
            base_index + 1,
            base_index + 2,
            base_index,
            base_index + 2,
            base_index + 3,
        ]);
    }
}

/// Screen space projection with the origin at the top left.
fn ortho(window_size: Vec2) -> Mat4 {
    Mat4::orthographic_rh_gl(0.0, window_size.x, window_size.y, 0.0, -1.0, 1.0)
}

fn quad_vertices(command: &DrawCommand) -> [UIVertex; 4] {
    let [min, max] = command.rect;
    let [uv_min, uv_max] = command.uv_rect;
    [
        UIVertex {
            position: Vec2::new(max.x, min.y),
            uv: Vec2::new(uv_max.x, uv_min.y),
        },
        UIVertex {
            position: Vec2::new(min.x, min.y),
            uv: Vec2::new(uv_min.x, uv_min.y),
        },
        UIVertex {
            position: Vec2::new(min.x, max.y),
            uv: Vec2::new(uv_min.x, uv_max.y),
        },
        UIVertex {
            position: Vec2::new(max.x, max.y),
            uv: Vec2::new(uv_max.x, uv_max.y),
        },
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_quad_corners_follow_uv_rect() {
        let command = DrawCommand {
            rect: [Vec2::new(10.0, 20.0), Vec2::new(110.0, 70.0)],
            uv_rect: [Vec2::new(0.0, 0.5), Vec2::new(0.25, 0.0)],
            mode: UIRenderMode::Color(Vec4::ONE),
        };
        let quad = quad_vertices(&command);
        // Top left samples uv_min, bottom right samples uv_max
        assert_eq!(quad[1].position, Vec2::new(10.0, 20.0));
        assert_eq!(quad[1].uv, Vec2::new(0.0, 0.5));
        assert_eq!(quad[3].position, Vec2::new(110.0, 70.0));
        assert_eq!(quad[3].uv, Vec2::new(0.25, 0.0));
    }

    #[test]
    fn test_ortho_maps_corners() {
        let proj = ortho(Vec2::new(800.0, 600.0));
        let top_left = proj.project_point3(glam::Vec3::ZERO);
        let bottom_right = proj.project_point3(glam::Vec3::new(800.0, 600.0, 0.0));
        assert!((top_left.truncate() - Vec2::new(-1.0, 1.0)).length() < 1e-6);
        assert!((bottom_right.truncate() - Vec2::new(1.0, -1.0)).length() < 1e-6);
    }
}
