//! Triangular grid tessellation, built one strip (row) at a time.

use dymaxion_icosa::IcosaFace;
use glam::{DVec2, DVec3};

use crate::SubdivisionMesh;

/// Point on the face plane at barycentric `(u, v)`: the weights of corners 1
/// and 2, with corner 0 taking the remainder.
#[inline]
pub(crate) fn face_point(face: &IcosaFace, uv: DVec2) -> DVec3 {
    let [c0, c1, c2] = face.corners;
    c0 + (c1 - c0) * uv.x + (c2 - c0) * uv.y
}

/// UV of grid vertex `(i, j)` where `i` counts rows away from corner 0 and
/// `j` counts along a row towards corner 2.
#[inline]
pub(crate) fn grid_uv(i: u32, j: u32, n: u32) -> DVec2 {
    let n = f64::from(n);
    DVec2::new(f64::from(i - j) / n, f64::from(j) / n)
}

/// Index of grid vertex `(i, j)` in a mesh holding the whole grid row-major.
#[inline]
fn grid_index(i: u32, j: u32) -> u32 {
    i * (i + 1) / 2 + j
}

/// Tessellate `face` into `strips * strips` triangles sharing one vertex grid.
pub(crate) fn build(face: &IcosaFace, strips: u32) -> SubdivisionMesh {
    let n = strips;
    let vertex_count = ((n + 1) * (n + 2) / 2) as usize;
    let mut mesh = SubdivisionMesh::with_capacity(vertex_count, (n * n) as usize);

    for i in 0..=n {
        for j in 0..=i {
            let uv = grid_uv(i, j, n);
            mesh.push_vertex(face_point(face, uv), uv);
        }
    }

    for i in 0..n {
        for j in 0..=i {
            mesh.push_triangle(
                grid_index(i, j),
                grid_index(i + 1, j),
                grid_index(i + 1, j + 1),
            );
            if j < i {
                mesh.push_triangle(
                    grid_index(i, j),
                    grid_index(i + 1, j + 1),
                    grid_index(i, j + 1),
                );
            }
        }
    }

    mesh
}
