//! Tessellation error types.

use crate::TessellationStyle;

/// Errors returned when a tessellation request cannot be satisfied.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum TessellationError {
    /// The fidelity parameter is outside the range supported by the style.
    #[error("fidelity {fidelity} out of range for {style:?} tessellation ({min}..={max})")]
    ParameterOutOfRange {
        /// Requested style.
        style: TessellationStyle,
        /// Requested fidelity.
        fidelity: u32,
        /// Smallest accepted fidelity.
        min: u32,
        /// Largest accepted fidelity.
        max: u32,
    },

    /// Sphere radius must be finite and positive.
    #[error("invalid globe radius {0}")]
    InvalidRadius(f64),
}
