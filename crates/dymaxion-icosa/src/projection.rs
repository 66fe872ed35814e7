//! Forward projection: geographic coordinates to icosahedral face coordinates.
//!
//! Each face uses a gnomonic projection: the ray from the globe center
//! through a sphere point is intersected with the face plane.

use std::sync::Arc;

use glam::DVec3;

use crate::{FACE_COUNT, GeoPoint, IcosaFace, IcosahedronGeometry, ProjectionError};

/// Below this `|vec_c · p|` a direction is treated as parallel to the face plane.
const DEGENERATE_EPSILON: f64 = 1e-12;

/// Convert a geographic point to a unit vector.
///
/// Uses colatitude `90° - lat` and longitude shifted by 180°, so that
/// `(0, 0)` maps to `(-1, 0, 0)` and the north pole to `+Y`.
#[inline]
#[must_use]
pub fn geo_to_xyz(point: GeoPoint) -> DVec3 {
    let colat = (90.0 - point.lat).to_radians();
    let adj_lon = (point.lon + 180.0).to_radians();
    DVec3::new(
        colat.sin() * adj_lon.cos(),
        colat.cos(),
        -colat.sin() * adj_lon.sin(),
    )
}

/// Result of projecting a geographic point onto the icosahedron.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct FaceLocation {
    /// Index of the nearest face.
    pub face: usize,
    /// Coarse sextant of the face, in `0..6`.
    pub sub_face: u8,
    /// Face-local coordinates; `u`, `v` in edge-length units, `w` ≈ 0.
    pub uvw: DVec3,
    /// Gnomonic intersection with the face plane.
    pub world_point: DVec3,
}

/// Bidirectional mapping between geographic points and face coordinates.
#[derive(Clone, Debug)]
pub struct GeoProjector {
    geometry: Arc<IcosahedronGeometry>,
}

impl GeoProjector {
    /// Create a projector over the given geometry.
    #[must_use]
    pub fn new(geometry: Arc<IcosahedronGeometry>) -> Self {
        Self { geometry }
    }

    /// The geometry this projector works against.
    #[must_use]
    pub fn geometry(&self) -> &IcosahedronGeometry {
        &self.geometry
    }

    fn face_checked(&self, face: usize) -> Result<&IcosaFace, ProjectionError> {
        self.geometry
            .face(face)
            .ok_or(ProjectionError::ParameterOutOfRange {
                parameter: "face",
                value: face,
                max: FACE_COUNT - 1,
            })
    }

    /// Index of the face whose center is closest to `p`.
    ///
    /// Ties go to the lowest face index.
    #[must_use]
    pub fn find_face(&self, p: DVec3) -> usize {
        nearest_index(self.geometry.faces().iter().map(|f| f.center.distance_squared(p)))
    }

    /// Sextant of `face` containing `p`, ranked by distance to the three corners.
    ///
    /// The ordering-to-id table is historical and intentionally asymmetric.
    pub fn find_sub_face(&self, p: DVec3, face: usize) -> Result<u8, ProjectionError> {
        let corners = self.face_checked(face)?.corners;
        let d0 = p.distance(corners[0]);
        let d1 = p.distance(corners[1]);
        let d2 = p.distance(corners[2]);

        let sub_face = if d0 <= d1 && d1 <= d2 {
            0
        } else if d0 <= d2 && d2 <= d1 {
            5
        } else if d1 <= d0 && d0 <= d2 {
            1
        } else if d1 <= d2 && d2 <= d0 {
            2
        } else if d2 <= d0 && d0 <= d1 {
            4
        } else {
            3
        };
        Ok(sub_face)
    }

    /// Gnomonic projection of direction `p` onto the plane of `face`.
    ///
    /// Returns the intersection point together with its face-local `(u, v, w)`.
    pub fn project_to_face(
        &self,
        p: DVec3,
        face: usize,
    ) -> Result<(DVec3, DVec3), ProjectionError> {
        let f = self.face_checked(face)?;
        let denom = f.vec_c.dot(p);
        if denom.abs() < DEGENERATE_EPSILON {
            return Err(ProjectionError::DegenerateProjection { face });
        }
        let t = -f.plane_d / denom;
        let on_plane = p * t;
        Ok((on_plane, f.to_local(on_plane)))
    }

    /// Locate a geographic point on the icosahedron.
    pub fn geo_to_face_uv(&self, point: GeoPoint) -> Result<FaceLocation, ProjectionError> {
        self.direction_to_face_uv(geo_to_xyz(point))
    }

    /// Locate an arbitrary (non-zero) direction on the icosahedron.
    pub fn direction_to_face_uv(&self, dir: DVec3) -> Result<FaceLocation, ProjectionError> {
        let face = self.find_face(dir);
        let sub_face = self.find_sub_face(dir, face)?;
        let (world_point, uvw) = self.project_to_face(dir, face)?;
        Ok(FaceLocation {
            face,
            sub_face,
            uvw,
            world_point,
        })
    }
}

impl Default for GeoProjector {
    fn default() -> Self {
        Self::new(IcosahedronGeometry::shared())
    }
}

/// Index of the smallest distance; on an exact tie the lowest index wins.
fn nearest_index(distances: impl IntoIterator<Item = f64>) -> usize {
    let mut best = 0;
    let mut best_dist = f64::INFINITY;
    for (i, dist) in distances.into_iter().enumerate() {
        if dist < best_dist {
            best = i;
            best_dist = dist;
        }
    }
    best
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_reference_anchor() {
        let p = geo_to_xyz(GeoPoint::new(0.0, 0.0));
        assert!((p.x + 1.0).abs() < 1e-15);
        assert!((p.y - 6.123_233_995_736_766e-17).abs() < 1e-20);
        assert!((p.z + 1.224_646_799_147_353_2e-16).abs() < 1e-20);
    }

    #[test]
    fn test_north_pole_is_plus_y() {
        let p = geo_to_xyz(GeoPoint::new(123.0, 90.0));
        assert!((p - DVec3::Y).length() < 1e-12);
        let s = geo_to_xyz(GeoPoint::new(-45.0, -90.0));
        assert!((s - DVec3::NEG_Y).length() < 1e-12);
    }

    #[test]
    fn test_geo_to_xyz_unit_length() {
        for lon in (-180..180).step_by(15) {
            for lat in (-90..=90).step_by(15) {
                let p = geo_to_xyz(GeoPoint::new(lon as f64, lat as f64));
                assert!((p.length() - 1.0).abs() < 1e-12);
            }
        }
    }

    #[test]
    fn test_face_center_finds_own_face() {
        let projector = GeoProjector::default();
        for (i, face) in projector.geometry().faces().iter().enumerate() {
            assert_eq!(projector.find_face(face.center), i);
        }
    }

    #[test]
    fn test_find_face_at_vertex_picks_incident_face() {
        let projector = GeoProjector::default();
        // Vertex 0 is (up to rounding) equidistant from faces 0-4.
        let v0 = projector.geometry().vertices()[0];
        assert!(projector.find_face(v0) < 5);
    }

    #[test]
    fn test_nearest_index_tie_goes_to_lowest() {
        assert_eq!(nearest_index([2.0, 1.0, 1.0, 1.0]), 1);
        assert_eq!(nearest_index([0.5, 0.5]), 0);
        assert_eq!(nearest_index([3.0, 2.0, 1.0, 1.0]), 2);
        assert_eq!(nearest_index(std::iter::empty()), 0);
    }

    #[test]
    fn test_project_center_has_zero_w() {
        let projector = GeoProjector::default();
        for (i, face) in projector.geometry().faces().iter().enumerate() {
            let (on_plane, uvw) = projector.project_to_face(face.center, i).unwrap();
            assert!(uvw.z.abs() < 1e-12);
            assert!((uvw.x - 1.0 / 3.0).abs() < 1e-9, "centroid u = {}", uvw.x);
            assert!((uvw.y - 1.0 / 3.0).abs() < 1e-9, "centroid v = {}", uvw.y);
            assert!(face.plane_distance(on_plane).abs() < 1e-12);
        }
    }

    #[test]
    fn test_degenerate_projection_rejected() {
        let projector = GeoProjector::default();
        let face = projector.geometry().face(0).unwrap();
        let in_plane = face.vec_a;
        let parallel = in_plane - face.vec_c * face.vec_c.dot(in_plane);
        assert_eq!(
            projector.project_to_face(parallel, 0),
            Err(ProjectionError::DegenerateProjection { face: 0 })
        );
    }

    #[test]
    fn test_face_index_out_of_range() {
        let projector = GeoProjector::default();
        assert!(matches!(
            projector.project_to_face(DVec3::X, 20),
            Err(ProjectionError::ParameterOutOfRange { value: 20, .. })
        ));
        assert!(projector.find_sub_face(DVec3::X, 99).is_err());
    }

    #[test]
    fn test_sub_face_table() {
        let projector = GeoProjector::default();
        let face = projector.geometry().face(7).unwrap();
        let [c0, c1, c2] = face.corners;
        let near = |a: DVec3, b: DVec3, c: DVec3| (a * 0.6 + b * 0.3 + c * 0.1).normalize();

        assert_eq!(projector.find_sub_face(near(c0, c1, c2), 7).unwrap(), 0);
        assert_eq!(projector.find_sub_face(near(c0, c2, c1), 7).unwrap(), 5);
        assert_eq!(projector.find_sub_face(near(c1, c0, c2), 7).unwrap(), 1);
        assert_eq!(projector.find_sub_face(near(c1, c2, c0), 7).unwrap(), 2);
        assert_eq!(projector.find_sub_face(near(c2, c0, c1), 7).unwrap(), 4);
        assert_eq!(projector.find_sub_face(near(c2, c1, c0), 7).unwrap(), 3);
    }

    #[test]
    fn test_sub_face_at_centroid_is_zero() {
        let projector = GeoProjector::default();
        let face = projector.geometry().face(2).unwrap();
        let centroid = (face.corners[0] + face.corners[1] + face.corners[2]) / 3.0;
        // All three distances are equal up to rounding; the first rule accepts ties.
        let sub = projector.find_sub_face(centroid, 2).unwrap();
        assert!(sub < 6);
    }

    #[test]
    fn test_geo_to_face_uv_lies_inside_face() {
        let projector = GeoProjector::default();
        for lon in (-175..180).step_by(10) {
            for lat in (-85..90).step_by(10) {
                let loc = projector
                    .geo_to_face_uv(GeoPoint::new(lon as f64, lat as f64))
                    .unwrap();
                let (u, v) = (loc.uvw.x, loc.uvw.y);
                assert!(loc.uvw.z.abs() < 1e-9);
                assert!(
                    u >= -1e-9 && v >= -1e-9 && u + v <= 1.0 + 1e-9,
                    "({u}, {v}) outside face {}",
                    loc.face
                );
                assert!(loc.sub_face < 6);
            }
        }
    }
}
