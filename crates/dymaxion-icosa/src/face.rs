//! One triangular face of the icosahedron and its precomputed basis.

use glam::{DMat3, DVec3};

/// Precomputed basis data for one icosahedral face.
///
/// `vec_a` and `vec_b` run from the `base` corner along the two edges that
/// leave it; `vec_c` is the outward unit normal. `local_transform` is the
/// inverse of the matrix with columns `vec_a, vec_b, vec_c`, so a world point
/// `p` has face-local coordinates `local_transform * (p - base)`.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct IcosaFace {
    /// Indices of the three corners in the icosahedron vertex table.
    pub vertices: [usize; 3],
    /// Corner positions on the unit sphere; `corners[0]` is the base.
    pub corners: [DVec3; 3],
    /// Unit direction through the centroid of the face.
    pub center: DVec3,
    /// Unit edge direction from corner 0 to corner 1.
    pub vec_a: DVec3,
    /// Unit edge direction from corner 0 to corner 2.
    pub vec_b: DVec3,
    /// Outward unit normal, `normalize(vec_a × vec_b)`.
    pub vec_c: DVec3,
    /// Inverse of `[vec_a | vec_b | vec_c]`.
    pub local_transform: DMat3,
    /// Plane offset: `vec_c · X + plane_d = 0` on the face plane.
    pub plane_d: f64,
    /// Chord length of every edge.
    pub edge_length: f64,
}

impl IcosaFace {
    /// Build the basis for a face from its three corner vertices.
    ///
    /// The corners must be ordered counter-clockwise seen from outside.
    #[must_use]
    pub fn from_corners(vertices: [usize; 3], corners: [DVec3; 3]) -> Self {
        let [c0, c1, c2] = corners;
        let center = (c0 + c1 + c2).normalize();

        let raw_a = c1 - c0;
        let edge_length = raw_a.length();
        let vec_a = raw_a.normalize();
        let vec_b = (c2 - c0).normalize();
        let vec_c = vec_a.cross(vec_b).normalize();

        let local_transform = DMat3::from_cols(vec_a, vec_b, vec_c).inverse();
        let plane_d = -vec_c.dot(c0);

        Self {
            vertices,
            corners,
            center,
            vec_a,
            vec_b,
            vec_c,
            local_transform,
            plane_d,
            edge_length,
        }
    }

    /// The base corner, origin of the face-local frame.
    #[inline]
    #[must_use]
    pub fn base(&self) -> DVec3 {
        self.corners[0]
    }

    /// Express a world point in face-local `(u, v, w)`, with `u` and `v` in
    /// edge-length units and `w` the distance off the face plane.
    #[inline]
    #[must_use]
    pub fn to_local(&self, point: DVec3) -> DVec3 {
        let local = self.local_transform * (point - self.base());
        DVec3::new(
            local.x / self.edge_length,
            local.y / self.edge_length,
            local.z,
        )
    }

    /// The point on the face plane at face-local `(u, v)`.
    #[inline]
    #[must_use]
    pub fn from_local(&self, u: f64, v: f64) -> DVec3 {
        self.base() + self.vec_a * (u * self.edge_length) + self.vec_b * (v * self.edge_length)
    }

    /// Signed distance of `point` from the face plane (positive outside).
    #[inline]
    #[must_use]
    pub fn plane_distance(&self, point: DVec3) -> f64 {
        self.vec_c.dot(point) + self.plane_d
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn octant_face() -> IcosaFace {
        IcosaFace::from_corners([0, 1, 2], [DVec3::X, DVec3::Y, DVec3::Z])
    }

    #[test]
    fn test_normal_points_outward() {
        let face = octant_face();
        assert!(face.vec_c.dot(face.center) > 0.0);
        assert!((face.vec_c.length() - 1.0).abs() < 1e-12);
    }

    #[test]
    fn test_corners_lie_on_plane() {
        let face = octant_face();
        for corner in face.corners {
            assert!(face.plane_distance(corner).abs() < 1e-12);
        }
    }

    #[test]
    fn test_local_coordinates_of_corners() {
        let face = octant_face();
        let expected = [(0.0, 0.0), (1.0, 0.0), (0.0, 1.0)];
        for (corner, (u, v)) in face.corners.iter().zip(expected) {
            let local = face.to_local(*corner);
            assert!((local.x - u).abs() < 1e-12, "u {} != {u}", local.x);
            assert!((local.y - v).abs() < 1e-12, "v {} != {v}", local.y);
            assert!(local.z.abs() < 1e-12);
        }
    }

    #[test]
    fn test_from_local_inverts_to_local() {
        let face = octant_face();
        let p = face.from_local(0.25, 0.5);
        let local = face.to_local(p);
        assert!((local.x - 0.25).abs() < 1e-12);
        assert!((local.y - 0.5).abs() < 1e-12);
    }
}
