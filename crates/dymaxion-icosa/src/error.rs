//! Projection error types.

/// Errors produced while mapping between geographic and face-local coordinates.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ProjectionError {
    /// The direction lies in the plane through the origin parallel to the face,
    /// so the gnomonic ray never meets the face plane.
    #[error("direction is parallel to the plane of face {face}")]
    DegenerateProjection {
        /// Face the projection was attempted on.
        face: usize,
    },

    /// An index argument exceeds its valid range.
    #[error("{parameter} {value} out of range (max {max})")]
    ParameterOutOfRange {
        /// Name of the offending parameter.
        parameter: &'static str,
        /// Value supplied by the caller.
        value: usize,
        /// Largest accepted value.
        max: usize,
    },
}
