//! Row-wise tessellation producing one mesh per row.

use dymaxion_icosa::IcosaFace;

use crate::SubdivisionMesh;
use crate::strip::{face_point, grid_uv};

/// Tessellate `face` into `rows` meshes. Row `i` holds `2i + 1` triangles
/// and its own copies of the vertices on both of its boundary lines.
pub(crate) fn build(face: &IcosaFace, rows: u32) -> Vec<SubdivisionMesh> {
    let n = rows;
    (0..n)
        .map(|i| {
            let mut mesh =
                SubdivisionMesh::with_capacity((2 * i + 3) as usize, (2 * i + 1) as usize);
            // Vertices of line i come first, then line i + 1.
            for line in [i, i + 1] {
                for j in 0..=line {
                    let uv = grid_uv(line, j, n);
                    mesh.push_vertex(face_point(face, uv), uv);
                }
            }
            let top = |j: u32| j;
            let bottom = |j: u32| i + 1 + j;
            for j in 0..=i {
                mesh.push_triangle(top(j), bottom(j), bottom(j + 1));
                if j < i {
                    mesh.push_triangle(top(j), bottom(j + 1), top(j + 1));
                }
            }
            mesh
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use dymaxion_icosa::IcosahedronGeometry;

    use super::*;

    #[test]
    fn test_row_sizes() {
        let geometry = IcosahedronGeometry::new();
        let rows = build(&geometry.faces()[3], 5);
        assert_eq!(rows.len(), 5);
        for (i, row) in rows.iter().enumerate() {
            assert_eq!(row.triangle_count(), 2 * i + 1);
            assert_eq!(row.vertex_count(), 2 * i + 3);
        }
        let total: usize = rows.iter().map(SubdivisionMesh::triangle_count).sum();
        assert_eq!(total, 25);
    }

    #[test]
    fn test_rows_duplicate_boundary_vertices() {
        let geometry = IcosahedronGeometry::new();
        let rows = build(&geometry.faces()[0], 3);
        // The last line of row 0 and the first line of row 1 coincide.
        assert_eq!(rows[0].flat[1..3], rows[1].flat[0..2]);
    }
}
