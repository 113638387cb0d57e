//! Geometry data shared between the mesh generator and the renderer.
//!
//! The [`Vertex`] layout is a contract with the shaders: attributes are bound by
//! fixed slot (0 = position, 1 = normal, 2 = texture coordinate) and by field offset.

pub mod sphere;

use std::mem::{offset_of, size_of};

use glam::{Vec2, Vec3};

pub use sphere::generate_sphere;

/// A single vertex of a lit, textured mesh.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
#[repr(C)]
pub struct Vertex {
    pub position: Vec3,
    pub normal: Vec3,
    pub tex_coord: Vec2,
}

/// Describes where one float attribute lives inside a [`Vertex`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct VertexAttribute {
    /// Shader input location.
    pub location: u32,
    /// Number of `f32` components.
    pub components: i32,
    /// Byte offset from the start of the vertex.
    pub offset: usize,
}

impl Vertex {
    /// Size of one vertex in bytes.
    pub const STRIDE: usize = size_of::<Vertex>();

    /// Attribute table in slot order.
    pub const ATTRIBUTES: [VertexAttribute; 3] = [
        VertexAttribute {
            location: 0,
            components: 3,
            offset: offset_of!(Vertex, position),
        },
        VertexAttribute {
            location: 1,
            components: 3,
            offset: offset_of!(Vertex, normal),
        },
        VertexAttribute {
            location: 2,
            components: 2,
            offset: offset_of!(Vertex, tex_coord),
        },
    ];

    pub fn new(position: Vec3, normal: Vec3, tex_coord: Vec2) -> Self {
        Self {
            position,
            normal,
            tex_coord,
        }
    }
}

/// CPU side mesh data: vertices plus triangle indices.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Mesh {
    pub vertices: Vec<Vertex>,
    pub indices: Vec<u32>,
}

impl Mesh {
    pub fn new(vertices: Vec<Vertex>, indices: Vec<u32>) -> Self {
        Self { vertices, indices }
    }

    /// Whether the mesh is drawn through an index buffer.
    pub fn is_indexed(&self) -> bool {
        !self.indices.is_empty()
    }

    /// Number of elements a draw call covers. Without indices the vertex list
    /// itself is the draw sequence.
    pub fn element_count(&self) -> usize {
        if self.is_indexed() {
            self.indices.len()
        } else {
            self.vertices.len()
        }
    }

    /// Iterates over index triples.
    pub fn triangles(&self) -> impl Iterator<Item = [u32; 3]> + '_ {
        self.indices
            .chunks_exact(3)
            .map(|tri| [tri[0], tri[1], tri[2]])
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_vertex_layout() {
        assert_eq!(Vertex::STRIDE, 32);
        let offsets: Vec<usize> = Vertex::ATTRIBUTES.iter().map(|a| a.offset).collect();
        assert_eq!(offsets, vec![0, 12, 24]);
        let locations: Vec<u32> = Vertex::ATTRIBUTES.iter().map(|a| a.location).collect();
        assert_eq!(locations, vec![0, 1, 2]);
        let components: i32 = Vertex::ATTRIBUTES.iter().map(|a| a.components).sum();
        assert_eq!(components as usize * size_of::<f32>(), Vertex::STRIDE);
    }

    #[test]
    fn test_element_count() {
        let v = Vertex::default();
        let unindexed = Mesh::new(vec![v; 6], Vec::new());
        assert!(!unindexed.is_indexed());
        assert_eq!(unindexed.element_count(), 6);

        let indexed = Mesh::new(vec![v; 4], vec![0, 1, 2, 0, 2, 3]);
        assert!(indexed.is_indexed());
        assert_eq!(indexed.element_count(), 6);
        assert_eq!(indexed.triangles().count(), 2);
    }
}
