//! The fixed icosahedron table in Dymaxion orientation.

use std::sync::{Arc, LazyLock};

use glam::DVec3;

use crate::{GeoPoint, IcosaFace, xyz_to_geo};

/// Number of icosahedron vertices.
pub const VERTEX_COUNT: usize = 12;

/// Number of icosahedron faces.
pub const FACE_COUNT: usize = 20;

/// Unit-sphere vertex directions, rotated so that face boundaries avoid the
/// major land masses. Vertex 0 sits at 10.536°E, 64.7°N.
const VERTICES: [DVec3; VERTEX_COUNT] = [
    DVec3::new(-0.420_152_426_708_710_00, 0.904_082_550_615_019_30, 0.078_145_249_402_782_96),
    DVec3::new(-0.995_009_439_436_241_65, 0.040_147_175_877_166_65, -0.091_347_795_276_427_93),
    DVec3::new(-0.518_836_730_327_364_44, 0.181_331_837_557_262_45, 0.835_420_380_378_235_85),
    DVec3::new(0.414_682_225_320_335_22, 0.630_675_807_891_475_37, 0.655_962_405_434_800_78),
    DVec3::new(0.515_455_959_944_041_81, 0.767_200_992_517_747_54, -0.381_716_898_287_133_01),
    DVec3::new(-0.355_781_402_532_944_71, 0.402_234_226_602_925_57, -0.843_580_002_466_178_15),
    DVec3::new(-0.414_682_225_320_335_22, -0.630_675_807_891_475_37, -0.655_962_405_434_800_78),
    DVec3::new(-0.515_455_959_944_041_81, -0.767_200_992_517_747_54, 0.381_716_898_287_133_01),
    DVec3::new(0.355_781_402_532_944_71, -0.402_234_226_602_925_57, 0.843_580_002_466_178_15),
    DVec3::new(0.995_009_439_436_241_65, -0.040_147_175_877_166_65, 0.091_347_795_276_427_93),
    DVec3::new(0.518_836_730_327_364_44, -0.181_331_837_557_262_45, -0.835_420_380_378_235_85),
    DVec3::new(0.420_152_426_708_710_00, -0.904_082_550_615_019_30, -0.078_145_249_402_782_96),
];

/// Corner triples, counter-clockwise seen from outside.
///
/// Faces 0-4 surround vertex 0, faces 15-19 surround vertex 11, and faces
/// 5-14 form the band between them.
const FACES: [[usize; 3]; FACE_COUNT] = [
    [0, 1, 2],
    [0, 2, 3],
    [0, 3, 4],
    [0, 4, 5],
    [0, 5, 1],
    [1, 7, 2],
    [2, 7, 8],
    [2, 8, 3],
    [3, 8, 9],
    [3, 9, 4],
    [4, 9, 10],
    [4, 10, 5],
    [5, 10, 6],
    [1, 5, 6],
    [1, 6, 7],
    [6, 11, 7],
    [7, 11, 8],
    [8, 11, 9],
    [9, 11, 10],
    [6, 10, 11],
];

static SHARED: LazyLock<Arc<IcosahedronGeometry>> =
    LazyLock::new(|| Arc::new(IcosahedronGeometry::new()));

/// Immutable description of the Dymaxion icosahedron.
#[derive(Clone, Debug)]
pub struct IcosahedronGeometry {
    vertices: [DVec3; VERTEX_COUNT],
    faces: [IcosaFace; FACE_COUNT],
    /// `neighbors[f][k]` is the face across the edge from corner `k` to corner `k + 1`.
    neighbors: [[usize; 3]; FACE_COUNT],
    edge_length: f64,
}

impl IcosahedronGeometry {
    /// Compute every face basis from the fixed vertex and face tables.
    #[must_use]
    pub fn new() -> Self {
        let faces: [IcosaFace; FACE_COUNT] = std::array::from_fn(|i| {
            let [a, b, c] = FACES[i];
            IcosaFace::from_corners(FACES[i], [VERTICES[a], VERTICES[b], VERTICES[c]])
        });
        let edge_length = faces[0].edge_length;

        let mut neighbors = [[0; 3]; FACE_COUNT];
        for (i, tri) in FACES.iter().enumerate() {
            for k in 0..3 {
                let (a, b) = (tri[k], tri[(k + 1) % 3]);
                neighbors[i][k] = FACES
                    .iter()
                    .enumerate()
                    .position(|(j, other)| j != i && other.contains(&a) && other.contains(&b))
                    .unwrap_or(i);
            }
        }

        Self {
            vertices: VERTICES,
            faces,
            neighbors,
            edge_length,
        }
    }

    /// Process-wide instance, built on first use.
    #[must_use]
    pub fn shared() -> Arc<Self> {
        Arc::clone(&SHARED)
    }

    /// The 12 unit-sphere vertices.
    #[must_use]
    pub fn vertices(&self) -> &[DVec3; VERTEX_COUNT] {
        &self.vertices
    }

    /// All 20 faces in index order.
    #[must_use]
    pub fn faces(&self) -> &[IcosaFace; FACE_COUNT] {
        &self.faces
    }

    /// A single face, or `None` if `index >= 20`.
    #[must_use]
    pub fn face(&self, index: usize) -> Option<&IcosaFace> {
        self.faces.get(index)
    }

    /// Edge chord length shared by every face.
    #[must_use]
    pub fn edge_length(&self) -> f64 {
        self.edge_length
    }

    /// The three faces adjacent to `face`, ordered by the edge they share
    /// (corner 0→1, 1→2, 2→0).
    #[must_use]
    pub fn neighbors(&self, face: usize) -> Option<[usize; 3]> {
        self.neighbors.get(face).copied()
    }

    /// Vertex indices of the edge shared by faces `a` and `b`, ascending.
    #[must_use]
    pub fn shared_edge(&self, a: usize, b: usize) -> Option<[usize; 2]> {
        if a == b {
            return None;
        }
        let (fa, fb) = (self.faces.get(a)?, self.faces.get(b)?);
        let mut shared = fa.vertices.iter().filter(|v| fb.vertices.contains(v));
        match (shared.next(), shared.next()) {
            (Some(&x), Some(&y)) => Some([x.min(y), x.max(y)]),
            _ => None,
        }
    }

    /// Interior dihedral angle in radians between two edge-adjacent faces.
    ///
    /// Returns `None` when the faces do not share an edge.
    #[must_use]
    pub fn dihedral_angle(&self, a: usize, b: usize) -> Option<f64> {
        self.shared_edge(a, b)?;
        let cos = self.faces[a].vec_c.dot(self.faces[b].vec_c).clamp(-1.0, 1.0);
        Some(std::f64::consts::PI - cos.acos())
    }

    /// Geographic position of vertex `index`.
    #[must_use]
    pub fn vertex_geo(&self, index: usize) -> Option<GeoPoint> {
        self.vertices.get(index).map(|v| xyz_to_geo(*v))
    }
}

impl Default for IcosahedronGeometry {
    fn default() -> Self {
        Self::new()
    }
}
