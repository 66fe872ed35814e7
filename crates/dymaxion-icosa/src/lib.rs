//! Icosahedral globe geometry: the Dymaxion-oriented icosahedron, per-face basis
//! data, and gnomonic projection between geographic coordinates and face-local UV.

mod error;
mod face;
mod geo_point;
mod icosahedron;
mod inverse;
mod projection;

pub use error::ProjectionError;
pub use face::IcosaFace;
pub use geo_point::GeoPoint;
pub use icosahedron::{FACE_COUNT, IcosahedronGeometry, VERTEX_COUNT};
pub use inverse::xyz_to_geo;
pub use projection::{FaceLocation, GeoProjector, geo_to_xyz};
