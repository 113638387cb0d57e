//! Mutable per-frame renderer state.

use glam::Mat4;

use crate::{config::Topology, geometry::Mesh};

/// Transforms consumed by the vertex stage. All three start as identity and only
/// change through explicit setters.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct RenderState {
    pub projection: Mat4,
    pub view: Mat4,
    pub model: Mat4,
}

impl Default for RenderState {
    fn default() -> Self {
        Self {
            projection: Mat4::IDENTITY,
            view: Mat4::IDENTITY,
            model: Mat4::IDENTITY,
        }
    }
}

/// The one draw call a renderer issues per frame.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct DrawCall {
    pub topology: Topology,
    pub count: usize,
    /// `draw_elements` over the index buffer when set, `draw_arrays` otherwise.
    pub indexed: bool,
}

impl DrawCall {
    pub fn for_mesh(mesh: &Mesh, topology: Topology) -> Self {
        Self {
            topology,
            count: mesh.element_count(),
            indexed: mesh.is_indexed(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geometry::{Vertex, generate_sphere};

    #[test]
    fn test_default_state_is_identity() {
        let state = RenderState::default();
        assert_eq!(state.projection, Mat4::IDENTITY);
        assert_eq!(state.view, Mat4::IDENTITY);
        assert_eq!(state.model, Mat4::IDENTITY);
    }

    #[test]
    fn test_draw_call_indexed() {
        let mesh = generate_sphere(1.0, 8, 4);
        let call = DrawCall::for_mesh(&mesh, Topology::Triangles);
        assert!(call.indexed);
        assert_eq!(call.count, 6 * 8 * 3);
    }

    #[test]
    fn test_draw_call_without_indices() {
        let mesh = Mesh::new(vec![Vertex::default(); 5], Vec::new());
        let call = DrawCall::for_mesh(&mesh, Topology::LineStrip);
        assert!(!call.indexed);
        assert_eq!(call.count, 5);
        assert_eq!(call.topology, Topology::LineStrip);
    }
}
