//! Mesh management module.
//!
//! This module defines the [`Mesh`] struct for managing mesh data on the GPU side.
//! Vertices should implement the [`Vertex`] trait.

use std::sync::Arc;

use glow::HasContext;
use orbview_core::Topology;

/// Trait that defines the necessary methods for a vertex.
pub trait Vertex {
    /// Sets up the vertex attribute pointers for the vertex.
    fn vertex_attribs(gl: &glow::Context);
}

/// How often the buffer contents are expected to change.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum BufferUsage {
    /// Uploaded once and drawn many times.
    Static,
    /// Rewritten every frame.
    Dynamic,
}

impl BufferUsage {
    fn gl_usage(self) -> u32 {
        match self {
            BufferUsage::Static => glow::STATIC_DRAW,
            BufferUsage::Dynamic => glow::DYNAMIC_DRAW,
        }
    }
}

/// Maps a [`Topology`] to the OpenGL primitive mode.
pub fn primitive_mode(topology: Topology) -> u32 {
    match topology {
        Topology::Triangles => glow::TRIANGLES,
        Topology::TriangleStrip => glow::TRIANGLE_STRIP,
        Topology::TriangleFan => glow::TRIANGLE_FAN,
        Topology::Lines => glow::LINES,
        Topology::LineStrip => glow::LINE_STRIP,
        Topology::LineLoop => glow::LINE_LOOP,
        Topology::Points => glow::POINTS,
    }
}

fn as_bytes<T>(data: &[T]) -> &[u8] {
    unsafe { std::slice::from_raw_parts(data.as_ptr() as *const u8, std::mem::size_of_val(data)) }
}

/// Represents a mesh stored on the GPU side.
///
/// Without indices the mesh draws its vertices in order with `draw_arrays`.
pub struct Mesh {
    gl: Arc<glow::Context>,
    draw_mode: u32,
    usage: BufferUsage,
    vao: glow::VertexArray,
    vbo: glow::Buffer,
    ebo: Option<glow::Buffer>,
    vertex_count: usize,
    index_count: usize,
}

impl Mesh {
    /// Creates a new mesh from the given vertex and index data.
    pub fn new<V: Vertex>(
        gl: &Arc<glow::Context>,
        vertices: &[V],
        indices: &[u32],
        draw_mode: u32,
        usage: BufferUsage,
    ) -> Result<Self, String> {
        unsafe {
            let vao = gl.create_vertex_array()?;
            let vbo = match gl.create_buffer() {
                Ok(vbo) => vbo,
                Err(e) => {
                    gl.delete_vertex_array(vao);
                    return Err(e);
                }
            };
            let ebo = if indices.is_empty() {
                None
            } else {
                match gl.create_buffer() {
                    Ok(ebo) => Some(ebo),
                    Err(e) => {
                        gl.delete_buffer(vbo);
                        gl.delete_vertex_array(vao);
                        return Err(e);
                    }
                }
            };

            gl.bind_vertex_array(Some(vao));
            gl.bind_buffer(glow::ARRAY_BUFFER, Some(vbo));
            gl.buffer_data_u8_slice(glow::ARRAY_BUFFER, as_bytes(vertices), usage.gl_usage());

            if let Some(ebo) = ebo {
                gl.bind_buffer(glow::ELEMENT_ARRAY_BUFFER, Some(ebo));
                gl.buffer_data_u8_slice(
                    glow::ELEMENT_ARRAY_BUFFER,
                    as_bytes(indices),
                    usage.gl_usage(),
                );
            }

            V::vertex_attribs(gl);

            gl.bind_vertex_array(None);
            gl.bind_buffer(glow::ARRAY_BUFFER, None);
            gl.bind_buffer(glow::ELEMENT_ARRAY_BUFFER, None);

            Ok(Self {
                gl: Arc::clone(gl),
                draw_mode,
                usage,
                vao,
                vbo,
                ebo,
                vertex_count: vertices.len(),
                index_count: indices.len(),
            })
        }
    }

    /// Replaces the mesh contents. The index buffer must have been created with
    /// the mesh; an unindexed mesh ignores `indices`.
    pub fn update<V: Vertex>(&mut self, vertices: &[V], indices: &[u32]) {
        unsafe {
            self.vertex_count = vertices.len();

            self.gl.bind_buffer(glow::ARRAY_BUFFER, Some(self.vbo));
            self.gl.buffer_data_u8_slice(
                glow::ARRAY_BUFFER,
                as_bytes(vertices),
                self.usage.gl_usage(),
            );

            if let Some(ebo) = self.ebo {
                self.index_count = indices.len();
                // The element binding is part of the VAO state
                self.gl.bind_vertex_array(Some(self.vao));
                self.gl.bind_buffer(glow::ELEMENT_ARRAY_BUFFER, Some(ebo));
                self.gl.buffer_data_u8_slice(
                    glow::ELEMENT_ARRAY_BUFFER,
                    as_bytes(indices),
                    self.usage.gl_usage(),
                );
                self.gl.bind_vertex_array(None);
            }

            self.gl.bind_buffer(glow::ARRAY_BUFFER, None);
            self.gl.bind_buffer(glow::ELEMENT_ARRAY_BUFFER, None);
        }
    }

    /// Draws the mesh.
    pub fn draw(&self) {
        unsafe {
            self.gl.bind_vertex_array(Some(self.vao));
            if self.ebo.is_some() {
                self.gl.draw_elements(
                    self.draw_mode,
                    self.index_count as i32,
                    glow::UNSIGNED_INT,
                    0,
                );
            } else {
                self.gl
                    .draw_arrays(self.draw_mode, 0, self.vertex_count as i32);
            }
            self.gl.bind_vertex_array(None);
        }
    }
}

impl Drop for Mesh {
    fn drop(&mut self) {
        unsafe {
            self.gl.delete_buffer(self.vbo);
            if let Some(ebo) = self.ebo {
                self.gl.delete_buffer(ebo);
            }
            self.gl.delete_vertex_array(self.vao);
        }
    }
}
