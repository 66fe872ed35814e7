//! Recursive midpoint subdivision of a face.

use std::collections::HashMap;

use dymaxion_icosa::IcosaFace;
use glam::DVec2;

use crate::SubdivisionMesh;

/// Subdivide `face` `depth` times, each level splitting every triangle into
/// four at its edge midpoints.
///
/// Midpoints are taken on the face plane before renormalizing, so an edge
/// shared with a neighbouring face subdivides to bit-identical points.
pub(crate) fn build(face: &IcosaFace, depth: u32) -> SubdivisionMesh {
    let vertex_count = ((1usize << depth) + 1) * ((1usize << depth) + 2) / 2;
    let mut mesh = SubdivisionMesh::with_capacity(vertex_count, 1 << (2 * depth));

    let [c0, c1, c2] = face.corners;
    let a = mesh.push_vertex(c0, DVec2::ZERO);
    let b = mesh.push_vertex(c1, DVec2::X);
    let c = mesh.push_vertex(c2, DVec2::Y);
    mesh.push_triangle(a, b, c);

    for _ in 0..depth {
        subdivide(&mut mesh);
    }
    mesh
}

fn subdivide(mesh: &mut SubdivisionMesh) {
    let mut midpoint_cache: HashMap<(u32, u32), u32> = HashMap::new();
    let mut new_indices = Vec::with_capacity(mesh.indices.len() * 4);
    let indices = std::mem::take(&mut mesh.indices);

    let mut midpoint = |a: u32, b: u32, mesh: &mut SubdivisionMesh| -> u32 {
        let key = if a < b { (a, b) } else { (b, a) };
        if let Some(&idx) = midpoint_cache.get(&key) {
            return idx;
        }
        let (a, b) = (a as usize, b as usize);
        let flat = (mesh.flat[a] + mesh.flat[b]) * 0.5;
        let uv = (mesh.uvs[a] + mesh.uvs[b]) * 0.5;
        let idx = mesh.push_vertex(flat, uv);
        midpoint_cache.insert(key, idx);
        idx
    };

    for tri in indices.chunks_exact(3) {
        let (a, b, c) = (tri[0], tri[1], tri[2]);
        let ab = midpoint(a, b, mesh);
        let bc = midpoint(b, c, mesh);
        let ca = midpoint(c, a, mesh);

        new_indices.extend_from_slice(&[a, ab, ca]);
        new_indices.extend_from_slice(&[b, bc, ab]);
        new_indices.extend_from_slice(&[c, ca, bc]);
        new_indices.extend_from_slice(&[ab, bc, ca]);
    }

    mesh.indices = new_indices;
}

#[cfg(test)]
mod tests {
    use dymaxion_icosa::IcosahedronGeometry;

    use super::*;

    #[test]
    fn test_depth_zero_is_the_face() {
        let geometry = IcosahedronGeometry::new();
        let face = geometry.faces()[5];
        let mesh = build(&face, 0);
        assert_eq!(mesh.triangle_count(), 1);
        assert_eq!(mesh.flat, face.corners.to_vec());
    }

    #[test]
    fn test_vertex_count_matches_grid() {
        let geometry = IcosahedronGeometry::new();
        for depth in 0..5 {
            let mesh = build(&geometry.faces()[0], depth);
            let n = 1usize << depth;
            assert_eq!(mesh.triangle_count(), n * n);
            assert_eq!(mesh.vertex_count(), (n + 1) * (n + 2) / 2);
        }
    }

    #[test]
    fn test_midpoint_uvs_are_dyadic() {
        let geometry = IcosahedronGeometry::new();
        let mesh = build(&geometry.faces()[0], 3);
        for uv in &mesh.uvs {
            assert_eq!((uv.x * 8.0).fract(), 0.0);
            assert_eq!((uv.y * 8.0).fract(), 0.0);
            assert!(uv.x + uv.y <= 1.0);
        }
    }
}
