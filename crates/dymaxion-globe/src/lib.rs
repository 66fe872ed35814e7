//! Animated assembly of the icosahedral globe and draping of geographic
//! features onto it.
//!
//! [`GlobeAssembly`] owns one [`MovableFaceGroup`] per face (plus two extra
//! half-face groups in the split layout) and recomputes every group's rigid
//! transform from two blend scalars: inflation (flat faces to sphere) and
//! unfold (assembled globe to flat Dymaxion net).
//! [`SurfaceFeatureProjector`] turns points, lines and polygons given in
//! longitude/latitude into 3D polylines on the sphere or on the net.

mod assembly;
mod blend;
mod drape;
mod error;
mod group;
mod layout;
mod transform;

pub use assembly::GlobeAssembly;
pub use blend::{AnimationBlend, FoldState};
pub use drape::{
    DEFAULT_MAX_ANGLE_STEP_DEG, DrapeConfig, DrapedFeature, DrapedPart, FeatureGeometry,
    FeatureKind, MIN_ANGLE_STEP_DEG, SphereSurface, SurfaceFeatureProjector, SurfaceMapper,
};
pub use error::{AssemblyError, DrapeError};
pub use group::{GroupKind, MovableFaceGroup};
pub use layout::{FACE_PAIRS, FacePair, GroupLayout, ROOT_FACE, SPLIT_FACES, SplitFace};
pub use transform::{Hinge, RigidTransform};
