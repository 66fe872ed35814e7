//! Inverse projection: face-local coordinates back to geographic coordinates.

use glam::DVec3;

use crate::projection::GeoProjector;
use crate::{FACE_COUNT, GeoPoint, ProjectionError};

/// Convert a direction (any non-zero length) to a geographic point.
///
/// Exact inverse of [`geo_to_xyz`](crate::geo_to_xyz), undoing the same
/// colatitude and 180° longitude offsets.
#[must_use]
pub fn xyz_to_geo(dir: DVec3) -> GeoPoint {
    let n = dir.normalize();
    let colat = n.x.hypot(n.z).atan2(n.y);
    let adj_lon = (-n.z).atan2(n.x);
    GeoPoint::new(adj_lon.to_degrees() - 180.0, 90.0 - colat.to_degrees())
}

impl GeoProjector {
    /// Reconstruct the geographic point at face-local `uvw` on `face`.
    ///
    /// Only `u` and `v` are used; `w` is the off-plane residual from the
    /// forward projection and is ignored.
    pub fn face_uv_to_geo(&self, face: usize, uvw: DVec3) -> Result<GeoPoint, ProjectionError> {
        let f = self
            .geometry()
            .face(face)
            .ok_or(ProjectionError::ParameterOutOfRange {
                parameter: "face",
                value: face,
                max: FACE_COUNT - 1,
            })?;
        Ok(xyz_to_geo(f.from_local(uvw.x, uvw.y)))
    }
}
