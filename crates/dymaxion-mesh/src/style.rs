//! Tessellation strategies and the configuration record that selects one.

use std::ops::RangeInclusive;

use serde::{Deserialize, Serialize};

use crate::TessellationError;

/// Largest strip count accepted by [`TessellationStyle::Strip`].
pub const MAX_STRIP_COUNT: u32 = 16;

/// Largest recursion depth accepted by [`TessellationStyle::Recursive`].
///
/// Triangle count grows as `4^depth`; depth 8 is 65 536 triangles per face.
pub const MAX_RECURSION_DEPTH: u32 = 8;

/// Largest row count accepted by [`TessellationStyle::Independent`].
pub const MAX_INDEPENDENT_ROWS: u32 = 64;

/// How a face is subdivided.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum TessellationStyle {
    /// Coarse triangular grid built row by row; `fidelity` is the strip count.
    Strip,
    /// Recursive midpoint subdivision; `fidelity` is the depth. Crack-free
    /// between neighbouring faces built at the same depth.
    #[default]
    Recursive,
    /// One separate mesh per grid row with no shared vertices between rows;
    /// `fidelity` is the row count.
    Independent,
}

impl TessellationStyle {
    /// Fidelity values accepted by this style.
    #[must_use]
    pub fn fidelity_range(self) -> RangeInclusive<u32> {
        match self {
            TessellationStyle::Strip => 1..=MAX_STRIP_COUNT,
            TessellationStyle::Recursive => 0..=MAX_RECURSION_DEPTH,
            TessellationStyle::Independent => 1..=MAX_INDEPENDENT_ROWS,
        }
    }

    /// Triangles produced for one face at `fidelity`.
    #[must_use]
    pub fn triangles_per_face(self, fidelity: u32) -> usize {
        match self {
            TessellationStyle::Strip | TessellationStyle::Independent => {
                (fidelity as usize) * (fidelity as usize)
            }
            TessellationStyle::Recursive => 1 << (2 * fidelity),
        }
    }

    /// Check `fidelity` against [`Self::fidelity_range`].
    pub fn validate(self, fidelity: u32) -> Result<(), TessellationError> {
        let range = self.fidelity_range();
        if range.contains(&fidelity) {
            Ok(())
        } else {
            Err(TessellationError::ParameterOutOfRange {
                style: self,
                fidelity,
                min: *range.start(),
                max: *range.end(),
            })
        }
    }
}

/// Tessellation request for a whole globe.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TessellationConfig {
    /// Subdivision strategy.
    pub style: TessellationStyle,
    /// Strip count, recursion depth, or row count depending on `style`.
    pub fidelity: u32,
    /// Radius the unit-sphere output is scaled by.
    pub radius: f64,
}

impl Default for TessellationConfig {
    fn default() -> Self {
        Self {
            style: TessellationStyle::Recursive,
            fidelity: 3,
            radius: 1.0,
        }
    }
}

impl TessellationConfig {
    /// Validate fidelity and radius.
    pub fn validate(&self) -> Result<(), TessellationError> {
        if !(self.radius.is_finite() && self.radius > 0.0) {
            return Err(TessellationError::InvalidRadius(self.radius));
        }
        self.style.validate(self.fidelity)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_depth_beyond_eight_rejected() {
        assert!(TessellationStyle::Recursive.validate(8).is_ok());
        assert_eq!(
            TessellationStyle::Recursive.validate(9),
            Err(TessellationError::ParameterOutOfRange {
                style: TessellationStyle::Recursive,
                fidelity: 9,
                min: 0,
                max: 8,
            })
        );
    }

    #[test]
    fn test_zero_strips_rejected() {
        assert!(TessellationStyle::Strip.validate(0).is_err());
        assert!(TessellationStyle::Independent.validate(0).is_err());
        assert!(TessellationStyle::Recursive.validate(0).is_ok());
    }

    #[test]
    fn test_triangle_counts() {
        assert_eq!(TessellationStyle::Recursive.triangles_per_face(0), 1);
        assert_eq!(TessellationStyle::Recursive.triangles_per_face(3), 64);
        assert_eq!(TessellationStyle::Strip.triangles_per_face(4), 16);
        assert_eq!(TessellationStyle::Independent.triangles_per_face(5), 25);
    }

    #[test]
    fn test_config_rejects_bad_radius() {
        let mut config = TessellationConfig::default();
        assert!(config.validate().is_ok());
        config.radius = 0.0;
        assert_eq!(config.validate(), Err(TessellationError::InvalidRadius(0.0)));
        config.radius = f64::NAN;
        assert!(config.validate().is_err());
    }
}
