//! Geographic coordinates in degrees.

use serde::{Deserialize, Serialize};

/// A longitude/latitude pair in degrees.
///
/// Constructed values are always normalized: longitude wraps into
/// \[-180, 180), latitude clamps into \[-90, 90\].
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct GeoPoint {
    /// Longitude in degrees, east positive.
    pub lon: f64,
    /// Latitude in degrees, north positive.
    pub lat: f64,
}

impl GeoPoint {
    /// Construct a normalized `GeoPoint`.
    #[must_use]
    pub fn new(lon: f64, lat: f64) -> Self {
        Self {
            lon: (lon + 180.0).rem_euclid(360.0) - 180.0,
            lat: lat.clamp(-90.0, 90.0),
        }
    }

    /// Central angle to `other` in radians (haversine form, stable for short arcs).
    #[must_use]
    pub fn angle_to(&self, other: &GeoPoint) -> f64 {
        let (lat1, lat2) = (self.lat.to_radians(), other.lat.to_radians());
        let dlat = lat2 - lat1;
        let dlon = (other.lon - self.lon).to_radians();
        let h = (dlat / 2.0).sin().powi(2) + lat1.cos() * lat2.cos() * (dlon / 2.0).sin().powi(2);
        2.0 * h.sqrt().min(1.0).asin()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_longitude_wraps() {
        assert_eq!(GeoPoint::new(190.0, 0.0).lon, -170.0);
        assert_eq!(GeoPoint::new(-190.0, 0.0).lon, 170.0);
        assert_eq!(GeoPoint::new(540.0, 0.0).lon, -180.0);
        assert_eq!(GeoPoint::new(45.0, 0.0).lon, 45.0);
    }

    #[test]
    fn test_latitude_clamps() {
        assert_eq!(GeoPoint::new(0.0, 95.0).lat, 90.0);
        assert_eq!(GeoPoint::new(0.0, -91.0).lat, -90.0);
    }

    #[test]
    fn test_angle_to_quarter_circle() {
        let a = GeoPoint::new(0.0, 0.0);
        let b = GeoPoint::new(90.0, 0.0);
        assert!((a.angle_to(&b) - std::f64::consts::FRAC_PI_2).abs() < 1e-12);
        let pole = GeoPoint::new(33.0, 90.0);
        assert!((a.angle_to(&pole) - std::f64::consts::FRAC_PI_2).abs() < 1e-12);
    }

    #[test]
    fn test_angle_to_self_is_zero() {
        let p = GeoPoint::new(-73.9, 40.7);
        assert_eq!(p.angle_to(&p), 0.0);
    }
}
