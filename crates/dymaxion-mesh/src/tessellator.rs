//! Entry points that dispatch a face to the selected tessellation strategy.

use dymaxion_icosa::{IcosaFace, IcosahedronGeometry};

use crate::{SubdivisionMesh, TessellationError, TessellationStyle, independent, recursive, strip};

/// A validated style and fidelity pair, reusable across faces.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct FaceTessellator {
    style: TessellationStyle,
    fidelity: u32,
}

impl FaceTessellator {
    /// Validate `fidelity` for `style`.
    pub fn new(style: TessellationStyle, fidelity: u32) -> Result<Self, TessellationError> {
        style.validate(fidelity)?;
        Ok(Self { style, fidelity })
    }

    /// Subdivision scheme.
    pub fn style(&self) -> TessellationStyle {
        self.style
    }

    /// Strip count, recursion depth or row count, depending on the style.
    pub fn fidelity(&self) -> u32 {
        self.fidelity
    }

    /// Triangles produced per face.
    pub fn triangles_per_face(&self) -> usize {
        self.style.triangles_per_face(self.fidelity)
    }

    /// Tessellate one face.
    ///
    /// `Strip` and `Recursive` return a single mesh; `Independent` returns one
    /// mesh per row.
    pub fn tessellate(&self, face: &IcosaFace) -> Vec<SubdivisionMesh> {
        let meshes = match self.style {
            TessellationStyle::Strip => vec![strip::build(face, self.fidelity)],
            TessellationStyle::Recursive => vec![recursive::build(face, self.fidelity)],
            TessellationStyle::Independent => independent::build(face, self.fidelity),
        };
        tracing::trace!(
            "Tessellated face {:?} ({:?}, fidelity {}) into {} mesh(es)",
            face.vertices,
            self.style,
            self.fidelity,
            meshes.len()
        );
        meshes
    }

    /// Tessellate all twenty faces in face-index order.
    pub fn tessellate_all(&self, geometry: &IcosahedronGeometry) -> Vec<Vec<SubdivisionMesh>> {
        let meshes: Vec<_> = geometry.faces().iter().map(|f| self.tessellate(f)).collect();
        tracing::debug!(
            "Tessellated {} faces, {} triangles each",
            meshes.len(),
            self.triangles_per_face()
        );
        meshes
    }
}

/// Tessellate one face in a single call.
pub fn tessellate_face(
    face: &IcosaFace,
    fidelity: u32,
    style: TessellationStyle,
) -> Result<Vec<SubdivisionMesh>, TessellationError> {
    Ok(FaceTessellator::new(style, fidelity)?.tessellate(face))
}

#[cfg(test)]
mod tests {
    use glam::{DVec2, DVec3};

    use super::*;

    const STYLES: [(TessellationStyle, u32); 3] = [
        (TessellationStyle::Strip, 5),
        (TessellationStyle::Recursive, 3),
        (TessellationStyle::Independent, 6),
    ];

    fn triangle_normal(mesh: &SubdivisionMesh, tri: [u32; 3]) -> DVec3 {
        let [a, b, c] = tri.map(|i| mesh.positions[i as usize]);
        (b - a).cross(c - a)
    }

    #[test]
    fn test_all_vertices_on_unit_sphere() {
        let geometry = IcosahedronGeometry::new();
        for (style, fidelity) in STYLES {
            for face in geometry.faces() {
                for mesh in tessellate_face(face, fidelity, style).unwrap() {
                    for p in &mesh.positions {
                        assert!((p.length() - 1.0).abs() < 1e-9, "{style:?}: |p| = {}", p.length());
                    }
                }
            }
        }
    }

    #[test]
    fn test_triangle_counts_per_style() {
        let geometry = IcosahedronGeometry::new();
        let face = &geometry.faces()[9];
        for (style, fidelity) in STYLES {
            let tessellator = FaceTessellator::new(style, fidelity).unwrap();
            let total: usize = tessellator
                .tessellate(face)
                .iter()
                .map(SubdivisionMesh::triangle_count)
                .sum();
            assert_eq!(total, tessellator.triangles_per_face());
        }
        let recursive = tessellate_face(face, 4, TessellationStyle::Recursive).unwrap();
        assert_eq!(recursive[0].triangle_count(), 256);
    }

    #[test]
    fn test_winding_faces_outward() {
        let geometry = IcosahedronGeometry::new();
        for (style, fidelity) in STYLES {
            for face in geometry.faces() {
                for mesh in tessellate_face(face, fidelity, style).unwrap() {
                    for tri in mesh.triangles() {
                        let normal = triangle_normal(&mesh, tri);
                        let centre = mesh.positions[tri[0] as usize];
                        assert!(
                            normal.dot(centre) > 0.0,
                            "{style:?} triangle {tri:?} faces inward"
                        );
                    }
                }
            }
        }
    }

    #[test]
    fn test_corner_uvs() {
        let geometry = IcosahedronGeometry::new();
        let face = &geometry.faces()[2];
        for (style, fidelity) in STYLES {
            let meshes = tessellate_face(face, fidelity, style).unwrap();
            for (corner, uv) in face.corners.iter().zip([DVec2::ZERO, DVec2::X, DVec2::Y]) {
                let found = meshes.iter().any(|m| {
                    m.uvs
                        .iter()
                        .zip(&m.positions)
                        .any(|(u, p)| *u == uv && (*p - *corner).length() < 1e-12)
                });
                assert!(found, "{style:?}: corner with uv {uv} missing");
            }
        }
    }

    #[test]
    fn test_recursive_shared_edges_match_exactly() {
        let geometry = IcosahedronGeometry::new();
        let tessellator = FaceTessellator::new(TessellationStyle::Recursive, 4).unwrap();
        let meshes = tessellator.tessellate_all(&geometry);

        for a in 0..20 {
            let neighbors = geometry.neighbors(a).unwrap();
            for b in neighbors {
                let [e0, e1] = geometry.shared_edge(a, b).unwrap();
                let (p0, p1) = (geometry.vertices()[e0], geometry.vertices()[e1]);
                let on_edge = |flat: &DVec3| {
                    let t = (*flat - p0).dot(p1 - p0) / (p1 - p0).length_squared();
                    (p0 + (p1 - p0) * t - *flat).length() < 1e-12
                };
                let on_edge_of = |face: usize| -> Vec<DVec3> {
                    meshes[face][0]
                        .flat
                        .iter()
                        .filter(|f| on_edge(f))
                        .copied()
                        .collect()
                };
                let (edge_a, edge_b) = (on_edge_of(a), on_edge_of(b));
                assert_eq!(edge_a.len(), 17);
                for p in &edge_a {
                    assert!(edge_b.contains(p), "faces {a} and {b} disagree at {p}");
                }
            }
        }
    }

    #[test]
    fn test_invalid_fidelity_rejected() {
        let geometry = IcosahedronGeometry::new();
        let face = &geometry.faces()[0];
        assert!(matches!(
            tessellate_face(face, 9, TessellationStyle::Recursive),
            Err(TessellationError::ParameterOutOfRange { max: 8, .. })
        ));
        assert!(tessellate_face(face, 17, TessellationStyle::Strip).is_err());
        assert!(tessellate_face(face, 65, TessellationStyle::Independent).is_err());
    }
}
