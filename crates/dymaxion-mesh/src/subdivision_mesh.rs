//! Triangle mesh covering part of one icosahedral face.

use glam::{DVec2, DVec3};

/// Vertex and index data for one face (or one piece of a face).
///
/// Every vertex carries two positions: `flat`, on the face plane of the
/// inscribed icosahedron, and `positions`, the same point renormalized onto
/// the unit sphere. Topology never changes after construction.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct SubdivisionMesh {
    /// Vertex positions on the face plane.
    pub flat: Vec<DVec3>,
    /// Vertex positions on the unit sphere.
    pub positions: Vec<DVec3>,
    /// Barycentric face coordinates: weight of corner 1 and corner 2.
    pub uvs: Vec<DVec2>,
    /// Triangle list, three indices per triangle, counter-clockwise from outside.
    pub indices: Vec<u32>,
}

impl SubdivisionMesh {
    /// Creates an empty mesh.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates an empty mesh with room for the given vertex and triangle counts.
    #[must_use]
    pub fn with_capacity(vertices: usize, triangles: usize) -> Self {
        Self {
            flat: Vec::with_capacity(vertices),
            positions: Vec::with_capacity(vertices),
            uvs: Vec::with_capacity(vertices),
            indices: Vec::with_capacity(triangles * 3),
        }
    }

    /// Appends a vertex given its face-plane position and UV; returns its index.
    pub fn push_vertex(&mut self, flat: DVec3, uv: DVec2) -> u32 {
        let index = self.flat.len() as u32;
        self.flat.push(flat);
        self.positions.push(flat.normalize());
        self.uvs.push(uv);
        index
    }

    /// Appends one triangle.
    pub fn push_triangle(&mut self, a: u32, b: u32, c: u32) {
        self.indices.extend_from_slice(&[a, b, c]);
    }

    /// Number of vertices.
    #[must_use]
    pub fn vertex_count(&self) -> usize {
        self.positions.len()
    }

    /// Number of triangles.
    #[must_use]
    pub fn triangle_count(&self) -> usize {
        self.indices.len() / 3
    }

    /// Iterate triangles as index triples.
    pub fn triangles(&self) -> impl Iterator<Item = [u32; 3]> + '_ {
        self.indices.chunks_exact(3).map(|t| [t[0], t[1], t[2]])
    }

    /// Vertex positions interpolated between the face plane (`inflation = 0`)
    /// and the unit sphere (`inflation = 1`).
    pub fn inflated_positions(&self, inflation: f64) -> impl Iterator<Item = DVec3> + '_ {
        self.flat
            .iter()
            .zip(&self.positions)
            .map(move |(flat, sphere)| flat.lerp(*sphere, inflation))
    }

    /// Mean of the unit-sphere vertex positions.
    #[must_use]
    pub fn centroid(&self) -> DVec3 {
        if self.positions.is_empty() {
            return DVec3::ZERO;
        }
        self.positions.iter().copied().sum::<DVec3>() / self.positions.len() as f64
    }

    /// Split into two meshes by a per-triangle test on the flat corner
    /// positions. Triangles passing `keep` go to the first mesh.
    #[must_use]
    pub fn partition(&self, keep: impl Fn([DVec3; 3]) -> bool) -> (Self, Self) {
        let mut kept = Self::new();
        let mut rest = Self::new();
        let mut kept_map = vec![u32::MAX; self.vertex_count()];
        let mut rest_map = vec![u32::MAX; self.vertex_count()];

        for tri in self.triangles() {
            let corners = tri.map(|i| self.flat[i as usize]);
            let (target, map) = if keep(corners) {
                (&mut kept, &mut kept_map)
            } else {
                (&mut rest, &mut rest_map)
            };
            let [a, b, c] = tri.map(|i| {
                let slot = &mut map[i as usize];
                if *slot == u32::MAX {
                    *slot = target.flat.len() as u32;
                    target.flat.push(self.flat[i as usize]);
                    target.positions.push(self.positions[i as usize]);
                    target.uvs.push(self.uvs[i as usize]);
                }
                *slot
            });
            target.push_triangle(a, b, c);
        }

        (kept, rest)
    }
}
