//! Animation blend factors and the fold state they imply.

use serde::{Deserialize, Serialize};

/// Clamp into `[0, 1]`; NaN counts as 1 (assembled).
fn clamp_unit(value: f64) -> f64 {
    if value.is_nan() { 1.0 } else { value.clamp(0.0, 1.0) }
}

/// The two scalars that drive the globe animation.
///
/// `inflation` moves every vertex between its face plane (0) and the sphere
/// (1). `unfold` turns the faces between the flat net (0) and the assembled
/// globe (1).
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AnimationBlend {
    /// 0 flat faces, 1 sphere.
    pub inflation: f64,
    /// 0 flat net, 1 assembled globe.
    pub unfold: f64,
}

impl Default for AnimationBlend {
    fn default() -> Self {
        Self::ASSEMBLED
    }
}

impl AnimationBlend {
    /// Round, fully assembled globe.
    pub const ASSEMBLED: Self = Self {
        inflation: 1.0,
        unfold: 1.0,
    };

    /// Flat faces laid out as the Dymaxion net.
    pub const NET: Self = Self {
        inflation: 0.0,
        unfold: 0.0,
    };

    /// Build a blend, clamping both factors into `[0, 1]`.
    #[must_use]
    pub fn new(inflation: f64, unfold: f64) -> Self {
        Self {
            inflation: clamp_unit(inflation),
            unfold: clamp_unit(unfold),
        }
    }

    #[must_use]
    pub fn clamped(self) -> Self {
        Self::new(self.inflation, self.unfold)
    }

    /// Linear interpolation towards `target`, `t` clamped into `[0, 1]`.
    #[must_use]
    pub fn lerp(self, target: Self, t: f64) -> Self {
        let t = clamp_unit(t);
        Self::new(
            self.inflation + (target.inflation - self.inflation) * t,
            self.unfold + (target.unfold - self.unfold) * t,
        )
    }

    #[must_use]
    pub fn fold_state(&self) -> FoldState {
        FoldState::from_unfold(self.unfold)
    }
}

/// Where a face group is in the unfold animation.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum FoldState {
    /// Part of the assembled globe (`unfold = 1`).
    Folded,
    /// Lying flat in the net (`unfold = 0`).
    Unfolded,
    /// Anywhere in between.
    Transitioning,
}

impl FoldState {
    #[must_use]
    pub fn from_unfold(unfold: f64) -> Self {
        let unfold = clamp_unit(unfold);
        if unfold >= 1.0 {
            FoldState::Folded
        } else if unfold <= 0.0 {
            FoldState::Unfolded
        } else {
            FoldState::Transitioning
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_out_of_range_is_clamped() {
        let blend = AnimationBlend::new(1.2, -0.000_001);
        assert_eq!(blend, AnimationBlend::new(1.0, 0.0));
        assert_eq!(AnimationBlend::new(f64::NAN, 0.5).inflation, 1.0);
    }

    #[test]
    fn test_fold_states() {
        assert_eq!(FoldState::from_unfold(1.0), FoldState::Folded);
        assert_eq!(FoldState::from_unfold(7.0), FoldState::Folded);
        assert_eq!(FoldState::from_unfold(0.0), FoldState::Unfolded);
        assert_eq!(FoldState::from_unfold(0.3), FoldState::Transitioning);
        assert_eq!(AnimationBlend::NET.fold_state(), FoldState::Unfolded);
    }

    #[test]
    fn test_lerp_endpoints() {
        let a = AnimationBlend::ASSEMBLED;
        let b = AnimationBlend::NET;
        assert_eq!(a.lerp(b, 0.0), a);
        assert_eq!(a.lerp(b, 1.0), b);
        assert_eq!(a.lerp(b, 0.5), AnimationBlend::new(0.5, 0.5));
    }

    #[test]
    fn test_partial_ron_uses_defaults() {
        let blend: AnimationBlend = ron::from_str("(unfold: 0.25)").unwrap();
        assert_eq!(blend, AnimationBlend::new(1.0, 0.25));
    }
}
