//! Errors for globe assembly and feature draping.

use dymaxion_icosa::ProjectionError;
use dymaxion_mesh::TessellationError;

use crate::FeatureKind;

/// Errors from building or querying a [`GlobeAssembly`](crate::GlobeAssembly).
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum AssemblyError {
    /// A group index was outside `0..count`.
    #[error("group index {index} out of range (assembly has {count} groups)")]
    IndexOutOfRange { index: usize, count: usize },

    /// A hinge table entry names two faces that share no edge.
    #[error("faces {face} and {parent} share no edge")]
    NotAdjacent { face: usize, parent: usize },

    #[error(transparent)]
    Tessellation(#[from] TessellationError),

    #[error(transparent)]
    Projection(#[from] ProjectionError),
}

/// Errors from draping a single feature.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum DrapeError {
    /// The feature (or one of its rings) has too few distinct vertices.
    #[error("{kind:?} needs at least {required} vertices, got {found}")]
    InsufficientVertices {
        kind: FeatureKind,
        required: usize,
        found: usize,
    },

    /// The densification step must be finite and no smaller than
    /// [`MIN_ANGLE_STEP_DEG`](crate::MIN_ANGLE_STEP_DEG).
    #[error("invalid maximum angle step {0}")]
    InvalidAngleStep(f64),

    #[error(transparent)]
    Projection(#[from] ProjectionError),
}
