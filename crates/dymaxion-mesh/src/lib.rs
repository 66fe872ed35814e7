//! Per-face tessellation of the icosahedral globe.
//!
//! Three strategies are provided: a coarse strip grid, recursive midpoint
//! subdivision, and a split into independent per-row meshes for faces that
//! must be hinged apart. Every vertex is renormalized onto the unit sphere.

mod error;
mod independent;
mod recursive;
mod strip;
mod style;
mod subdivision_mesh;
mod tessellator;

pub use error::TessellationError;
pub use style::{
    MAX_INDEPENDENT_ROWS, MAX_RECURSION_DEPTH, MAX_STRIP_COUNT, TessellationConfig,
    TessellationStyle,
};
pub use subdivision_mesh::SubdivisionMesh;
pub use tessellator::{FaceTessellator, tessellate_face};
