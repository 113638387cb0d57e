//! UV sphere tessellation.

use std::f32::consts::{FRAC_PI_2, PI, TAU};

use glam::{Vec2, Vec3};

use super::{Mesh, Vertex};

/// Generates a UV sphere centered at the origin.
///
/// Vertices are laid out stack by stack from the north pole (`stack == 0`) to the
/// south pole (`stack == stacks`), each stack holding `sectors + 1` vertices. The
/// last column duplicates the first one so the texture seam stays clean. Texture
/// coordinates are an equirectangular mapping of `(sector, stack)`.
///
/// Parameters are not validated: `sectors < 3`, `stacks < 2` or `radius <= 0`
/// produce degenerate (or, for zero counts, empty) geometry. Indices are `u32`, so
/// the grid must stay below `u32::MAX` vertices.
pub fn generate_sphere(radius: f32, sectors: u32, stacks: u32) -> Mesh {
    if sectors == 0 || stacks == 0 {
        return Mesh::default();
    }

    let row = sectors + 1;
    let (vertex_count, index_count) = grid_sizes(sectors, stacks);
    let mut vertices = Vec::with_capacity(vertex_count);
    let mut indices = Vec::with_capacity(index_count);

    for stack in 0..=stacks {
        let phi = FRAC_PI_2 - stack as f32 * PI / stacks as f32;
        let y = radius * phi.sin();
        let ring = radius * phi.cos();

        for sector in 0..=sectors {
            let theta = sector as f32 * TAU / sectors as f32;
            let position = Vec3::new(ring * theta.cos(), y, ring * theta.sin());

            vertices.push(Vertex::new(
                position,
                position.normalize_or_zero(),
                Vec2::new(
                    sector as f32 / sectors as f32,
                    stack as f32 / stacks as f32,
                ),
            ));
        }
    }

    for stack in 0..stacks {
        let mut k1 = stack * row;
        let mut k2 = k1 + row;

        for _ in 0..sectors {
            // The pole rows only get one triangle per quad
            if stack != 0 {
                indices.extend_from_slice(&[k1, k2, k1 + 1]);
            }
            if stack != stacks - 1 {
                indices.extend_from_slice(&[k1 + 1, k2, k2 + 1]);
            }
            k1 += 1;
            k2 += 1;
        }
    }

    Mesh::new(vertices, indices)
}

/// Vertex and index counts of a `sectors x stacks` grid, saturating instead of
/// overflowing.
fn grid_sizes(sectors: u32, stacks: u32) -> (usize, usize) {
    let (sectors, stacks) = (sectors as usize, stacks as usize);
    let vertices = stacks
        .saturating_add(1)
        .saturating_mul(sectors.saturating_add(1));
    let indices = sectors
        .saturating_mul(stacks.saturating_sub(1))
        .saturating_mul(6);
    (vertices, indices)
}

#[cfg(test)]
mod tests {
    use super::*;

    const EPSILON: f32 = 1e-5;

    fn vertex_at(mesh: &Mesh, sectors: u32, stack: u32, sector: u32) -> Vertex {
        mesh.vertices[(stack * (sectors + 1) + sector) as usize]
    }

    #[test]
    fn test_counts_follow_grid() {
        for (sectors, stacks) in [(3, 2), (4, 2), (8, 5), (36, 18), (128, 128)] {
            let mesh = generate_sphere(1.0, sectors, stacks);
            assert_eq!(
                mesh.vertices.len(),
                ((stacks + 1) * (sectors + 1)) as usize,
                "vertices for {sectors}x{stacks}"
            );
            assert_eq!(
                mesh.indices.len(),
                (6 * sectors * (stacks - 1)) as usize,
                "indices for {sectors}x{stacks}"
            );
        }
    }

    #[test]
    fn test_small_sphere() {
        let mesh = generate_sphere(1.0, 4, 2);
        assert_eq!(mesh.vertices.len(), 15);
        assert_eq!(mesh.indices.len(), 24);

        // Pole rows collapse in position but stay distinct vertices
        for sector in 0..=4 {
            let north = vertex_at(&mesh, 4, 0, sector);
            let south = vertex_at(&mesh, 4, 2, sector);
            assert!((north.position - Vec3::Y).length() < EPSILON);
            assert!((south.position + Vec3::Y).length() < EPSILON);
        }

        // First cell of the first stack only emits the lower triangle
        assert_eq!(&mesh.indices[0..3], &[1, 5, 6]);
        // The last stack starts right after the 4 triangles of the first one
        assert_eq!(&mesh.indices[12..15], &[5, 10, 6]);
    }

    #[test]
    fn test_positions_lie_on_radius() {
        let radius = 2.5;
        let mesh = generate_sphere(radius, 16, 8);
        for v in &mesh.vertices {
            assert!((v.position.length() - radius).abs() < 1e-4);
        }
    }

    #[test]
    fn test_normals_point_outwards() {
        let mesh = generate_sphere(3.0, 24, 12);
        for v in &mesh.vertices {
            let dot = v.position.normalize().dot(v.normal);
            assert!((dot - 1.0).abs() < EPSILON, "dot was {dot}");
            assert!((v.normal.length() - 1.0).abs() < EPSILON);
        }
    }

    #[test]
    fn test_tex_coords() {
        let (sectors, stacks) = (10, 7);
        let mesh = generate_sphere(1.0, sectors, stacks);
        for v in &mesh.vertices {
            assert!((0.0..=1.0).contains(&v.tex_coord.x));
            assert!((0.0..=1.0).contains(&v.tex_coord.y));
        }
        assert_eq!(vertex_at(&mesh, sectors, 0, 0).tex_coord, Vec2::ZERO);
        assert_eq!(
            vertex_at(&mesh, sectors, stacks, sectors).tex_coord,
            Vec2::ONE
        );
        assert_eq!(mesh.vertices.last().unwrap().tex_coord, Vec2::ONE);
    }

    #[test]
    fn test_seam_is_duplicated() {
        let sectors = 12;
        let mesh = generate_sphere(1.0, sectors, 6);
        for stack in 0..=6 {
            let first = vertex_at(&mesh, sectors, stack, 0);
            let last = vertex_at(&mesh, sectors, stack, sectors);
            assert!((first.position - last.position).length() < EPSILON);
            assert_eq!(first.tex_coord.x, 0.0);
            assert_eq!(last.tex_coord.x, 1.0);
        }
    }

    #[test]
    fn test_triangles_are_valid() {
        let mesh = generate_sphere(1.0, 9, 6);
        let count = mesh.vertices.len() as u32;
        for [a, b, c] in mesh.triangles() {
            assert!(a < count && b < count && c < count);
            let pa = mesh.vertices[a as usize].position;
            let pb = mesh.vertices[b as usize].position;
            let pc = mesh.vertices[c as usize].position;
            let area = (pb - pa).cross(pc - pa).length() * 0.5;
            assert!(area > 1e-4, "degenerate triangle {a} {b} {c}");
        }
    }

    #[test]
    fn test_consistent_winding() {
        // Every triangle winds the same way relative to the outward direction
        let mesh = generate_sphere(1.0, 12, 8);
        for [a, b, c] in mesh.triangles() {
            let pa = mesh.vertices[a as usize].position;
            let pb = mesh.vertices[b as usize].position;
            let pc = mesh.vertices[c as usize].position;
            let face = (pb - pa).cross(pc - pa);
            let centroid = (pa + pb + pc) / 3.0;
            assert!(face.dot(centroid) < 0.0);
        }
    }

    #[test]
    fn test_degenerate_parameters() {
        assert_eq!(generate_sphere(1.0, 0, 4), Mesh::default());
        assert_eq!(generate_sphere(1.0, 4, 0), Mesh::default());

        // A single stack has no interior rows, so no triangles survive
        let flat = generate_sphere(1.0, 4, 1);
        assert_eq!(flat.vertices.len(), 10);
        assert!(flat.indices.is_empty());

        let collapsed = generate_sphere(0.0, 4, 2);
        assert!(collapsed.vertices.iter().all(|v| v.normal == Vec3::ZERO));
    }

    #[test]
    fn test_grid_sizes_do_not_overflow() {
        assert_eq!(grid_sizes(4, 2), (15, 24));
        assert_eq!(grid_sizes(128, 128), (129 * 129, 6 * 128 * 127));
        assert_eq!(grid_sizes(4, 0), (5, 0));

        // Products that wrap a u32 are computed in usize or saturate
        let (vertices, indices) = grid_sizes(u32::MAX, u32::MAX);
        assert!(vertices >= u32::MAX as usize);
        assert!(indices >= u32::MAX as usize);
    }
}
