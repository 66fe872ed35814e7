//! Draping geographic points, lines and polygons onto the globe surface.

use dymaxion_icosa::{GeoPoint, ProjectionError, geo_to_xyz};
use glam::DVec3;
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::DrapeError;

/// Default largest arc between emitted line points, in degrees.
pub const DEFAULT_MAX_ANGLE_STEP_DEG: f64 = 2.0;

/// Smallest accepted step, in degrees. Caps a half-circle arc at 18 000 points.
pub const MIN_ANGLE_STEP_DEG: f64 = 0.01;

/// Below this `sin θ` two directions are treated as identical or antipodal.
const PARALLEL_EPSILON: f64 = 1e-10;

/// Directions closer than this are the same vertex.
const SAME_POINT_EPSILON: f64 = 1e-12;

/// Draping settings.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DrapeConfig {
    /// Largest great-circle arc, in degrees, between consecutive output points.
    pub max_angle_step_deg: f64,
}

impl Default for DrapeConfig {
    fn default() -> Self {
        Self {
            max_angle_step_deg: DEFAULT_MAX_ANGLE_STEP_DEG,
        }
    }
}

/// Geometry type of a feature.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum FeatureKind {
    /// Unconnected points.
    Points,
    /// An open polyline.
    LineString,
    /// Closed rings.
    Polygon,
}

impl FeatureKind {
    /// Fewest distinct vertices a feature (or polygon ring) may have.
    pub fn min_vertices(self) -> usize {
        match self {
            FeatureKind::Points => 1,
            FeatureKind::LineString => 2,
            FeatureKind::Polygon => 3,
        }
    }
}

/// A feature in geographic coordinates.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub enum FeatureGeometry {
    /// Independent points.
    Points(Vec<GeoPoint>),
    /// Vertices of an open line.
    LineString(Vec<GeoPoint>),
    /// One or more rings; a ring may or may not repeat its first point at the end.
    Polygon(Vec<Vec<GeoPoint>>),
}

impl FeatureGeometry {
    pub fn kind(&self) -> FeatureKind {
        match self {
            FeatureGeometry::Points(_) => FeatureKind::Points,
            FeatureGeometry::LineString(_) => FeatureKind::LineString,
            FeatureGeometry::Polygon(_) => FeatureKind::Polygon,
        }
    }
}

/// One output polyline (or point set).
#[derive(Clone, Debug, Default, PartialEq)]
pub struct DrapedPart {
    /// Placed points in drawing order.
    pub points: Vec<DVec3>,
    /// The last point connects back to the first.
    pub closed: bool,
}

/// A feature placed on the globe.
#[derive(Clone, Debug, PartialEq)]
pub struct DrapedFeature {
    pub kind: FeatureKind,
    /// One part per point set, line or ring.
    pub parts: Vec<DrapedPart>,
}

impl DrapedFeature {
    pub fn point_count(&self) -> usize {
        self.parts.iter().map(|p| p.points.len()).sum()
    }
}

/// Maps a unit direction to its 3D location on some globe surface.
pub trait SurfaceMapper {
    /// Location of the surface point in direction `dir`.
    fn place(&self, dir: DVec3) -> Result<DVec3, ProjectionError>;
}

/// A plain sphere centered on the origin.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SphereSurface {
    pub radius: f64,
}

impl SphereSurface {
    pub fn new(radius: f64) -> Self {
        Self { radius }
    }
}

impl Default for SphereSurface {
    fn default() -> Self {
        Self::new(1.0)
    }
}

impl SurfaceMapper for SphereSurface {
    fn place(&self, dir: DVec3) -> Result<DVec3, ProjectionError> {
        Ok(dir.normalize() * self.radius)
    }
}

/// Turns geographic features into 3D polylines that follow the surface.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SurfaceFeatureProjector {
    /// Radians.
    max_angle_step: f64,
}

impl Default for SurfaceFeatureProjector {
    fn default() -> Self {
        Self {
            max_angle_step: DEFAULT_MAX_ANGLE_STEP_DEG.to_radians(),
        }
    }
}

impl SurfaceFeatureProjector {
    /// Create a projector that densifies arcs longer than `max_angle_step_deg`.
    ///
    /// The step must be finite and at least [`MIN_ANGLE_STEP_DEG`].
    pub fn new(max_angle_step_deg: f64) -> Result<Self, DrapeError> {
        if !(max_angle_step_deg.is_finite() && max_angle_step_deg >= MIN_ANGLE_STEP_DEG) {
            return Err(DrapeError::InvalidAngleStep(max_angle_step_deg));
        }
        Ok(Self {
            max_angle_step: max_angle_step_deg.to_radians(),
        })
    }

    pub fn from_config(config: &DrapeConfig) -> Result<Self, DrapeError> {
        Self::new(config.max_angle_step_deg)
    }

    /// Maximum arc between output points, in radians.
    pub fn max_angle_step(&self) -> f64 {
        self.max_angle_step
    }

    /// Number of pieces an arc of `angle` radians is cut into.
    pub fn segment_count(&self, angle: f64) -> usize {
        ((angle / self.max_angle_step).ceil() as usize).max(1)
    }

    /// Place one geographic point on `surface`.
    pub fn project_point(
        &self,
        point: GeoPoint,
        surface: &impl SurfaceMapper,
    ) -> Result<DVec3, DrapeError> {
        Ok(surface.place(geo_to_xyz(point))?)
    }

    /// Drape a single feature.
    pub fn project(
        &self,
        feature: &FeatureGeometry,
        surface: &impl SurfaceMapper,
    ) -> Result<DrapedFeature, DrapeError> {
        let kind = feature.kind();
        let parts = match feature {
            FeatureGeometry::Points(points) => {
                check_count(kind, points.len())?;
                let points = points
                    .iter()
                    .map(|p| self.project_point(*p, surface))
                    .collect::<Result<Vec<_>, _>>()?;
                vec![DrapedPart {
                    points,
                    closed: false,
                }]
            }
            FeatureGeometry::LineString(points) => {
                check_count(kind, points.len())?;
                let dirs: Vec<DVec3> = points.iter().map(|p| geo_to_xyz(*p)).collect();
                vec![DrapedPart {
                    points: place_all(&self.densify(&dirs, false), surface)?,
                    closed: false,
                }]
            }
            FeatureGeometry::Polygon(rings) => {
                if rings.is_empty() {
                    return Err(DrapeError::InsufficientVertices {
                        kind,
                        required: kind.min_vertices(),
                        found: 0,
                    });
                }
                let mut parts = Vec::with_capacity(rings.len());
                for ring in rings {
                    let mut dirs: Vec<DVec3> = ring.iter().map(|p| geo_to_xyz(*p)).collect();
                    let repeats_first = match dirs.as_slice() {
                        [first, .., last] => first.distance(*last) < SAME_POINT_EPSILON,
                        _ => false,
                    };
                    if repeats_first {
                        dirs.pop();
                    }
                    check_count(kind, dirs.len())?;
                    parts.push(DrapedPart {
                        points: place_all(&self.densify(&dirs, true), surface)?,
                        closed: true,
                    });
                }
                parts
            }
        };
        Ok(DrapedFeature { kind, parts })
    }

    /// Drape every feature, reporting failures per feature without stopping.
    pub fn project_all(
        &self,
        features: &[FeatureGeometry],
        surface: &impl SurfaceMapper,
    ) -> Vec<Result<DrapedFeature, DrapeError>> {
        let results: Vec<_> = features
            .iter()
            .enumerate()
            .map(|(index, feature)| {
                let result = self.project(feature, surface);
                if let Err(e) = &result {
                    warn!("Skipping feature {}: {}", index, e);
                }
                result
            })
            .collect();
        debug!(
            "Draped {} of {} features",
            results.iter().filter(|r| r.is_ok()).count(),
            features.len()
        );
        results
    }

    /// Unit directions along the vertices of `dirs`, with great-circle
    /// intermediate points on long segments. A closed ring also walks the
    /// closing segment but does not repeat its first point.
    fn densify(&self, dirs: &[DVec3], closed: bool) -> Vec<DVec3> {
        let Some(&first) = dirs.first() else {
            return Vec::new();
        };
        let mut out = vec![first];
        for pair in dirs.windows(2) {
            self.walk_arc(pair[0], pair[1], &mut out);
        }
        if closed {
            let last = dirs[dirs.len() - 1];
            self.walk_arc(last, first, &mut out);
            // The arc ends on the first vertex, already emitted.
            out.pop();
        }
        out
    }

    /// Push the points after `a` up to and including `b`.
    fn walk_arc(&self, a: DVec3, b: DVec3, out: &mut Vec<DVec3>) {
        let angle = a.dot(b).clamp(-1.0, 1.0).acos();
        let steps = self.segment_count(angle);
        let sin_angle = angle.sin();
        if steps == 1 || sin_angle.abs() < PARALLEL_EPSILON {
            out.push(b);
            return;
        }
        for i in 1..=steps {
            let t = i as f64 / steps as f64;
            let sa = ((1.0 - t) * angle).sin() / sin_angle;
            let sb = (t * angle).sin() / sin_angle;
            out.push((a * sa + b * sb).normalize());
        }
    }
}

fn check_count(kind: FeatureKind, found: usize) -> Result<(), DrapeError> {
    let required = kind.min_vertices();
    if found < required {
        return Err(DrapeError::InsufficientVertices {
            kind,
            required,
            found,
        });
    }
    Ok(())
}

fn place_all(dirs: &[DVec3], surface: &impl SurfaceMapper) -> Result<Vec<DVec3>, DrapeError> {
    Ok(dirs
        .iter()
        .map(|d| surface.place(*d))
        .collect::<Result<Vec<_>, _>>()?)
}
