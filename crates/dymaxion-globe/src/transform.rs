//! Rigid transforms and the hinges that generate them.

use glam::{DQuat, DVec3};

/// Rotation followed by translation: `x ↦ rotation * x + translation`.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct RigidTransform {
    /// Unit rotation applied first.
    pub rotation: DQuat,
    /// Offset added after rotating.
    pub translation: DVec3,
}

impl Default for RigidTransform {
    fn default() -> Self {
        Self::IDENTITY
    }
}

impl RigidTransform {
    /// Leaves every point where it is.
    pub const IDENTITY: Self = Self {
        rotation: DQuat::IDENTITY,
        translation: DVec3::ZERO,
    };

    /// Rotation by `rotation` about the point `pivot`.
    #[must_use]
    pub fn about_pivot(rotation: DQuat, pivot: DVec3) -> Self {
        Self {
            rotation,
            translation: pivot - rotation * pivot,
        }
    }

    /// The transform applying `inner` first, then `self`.
    #[must_use]
    pub fn compose(self, inner: Self) -> Self {
        Self {
            rotation: (self.rotation * inner.rotation).normalize(),
            translation: self.rotation * inner.translation + self.translation,
        }
    }

    #[inline]
    #[must_use]
    pub fn transform_point(&self, point: DVec3) -> DVec3 {
        self.rotation * point + self.translation
    }

    #[inline]
    #[must_use]
    pub fn transform_vector(&self, vector: DVec3) -> DVec3 {
        self.rotation * vector
    }

    /// The same motion applied to a globe scaled by `radius`.
    #[must_use]
    pub fn scaled(self, radius: f64) -> Self {
        Self {
            rotation: self.rotation,
            translation: self.translation * radius,
        }
    }

    #[must_use]
    pub fn is_identity(&self) -> bool {
        self.rotation == DQuat::IDENTITY && self.translation == DVec3::ZERO
    }
}

/// A rotation of one face about an edge it shares with its parent face.
///
/// At full unfold the child face is turned into its parent's plane; the
/// folded orientation is the identity.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Hinge {
    /// A point on the hinge edge.
    pub pivot: DVec3,
    /// Unit direction of the hinge edge.
    pub axis: DVec3,
    /// Signed rotation (radians) that flattens the child onto the parent.
    pub angle: f64,
    unfolded: DQuat,
}

impl Hinge {
    /// The hinge along `edge` that rotates a face with outward normal
    /// `child_normal` into the plane of a face with normal `parent_normal`.
    #[must_use]
    pub fn new(edge: [DVec3; 2], child_normal: DVec3, parent_normal: DVec3) -> Self {
        let axis = (edge[1] - edge[0]).normalize();
        let angle = child_normal
            .cross(parent_normal)
            .dot(axis)
            .atan2(child_normal.dot(parent_normal));
        Self {
            pivot: edge[0],
            axis,
            angle,
            unfolded: DQuat::from_axis_angle(axis, angle),
        }
    }

    /// Rotation at full unfold.
    #[must_use]
    pub fn unfolded_rotation(&self) -> DQuat {
        self.unfolded
    }

    /// Transform at unfold blend `unfold` (1 = folded, 0 = flat).
    #[must_use]
    pub fn at(&self, unfold: f64) -> RigidTransform {
        if unfold >= 1.0 {
            return RigidTransform::IDENTITY;
        }
        let rotation = DQuat::IDENTITY.slerp(self.unfolded, 1.0 - unfold);
        RigidTransform::about_pivot(rotation, self.pivot)
    }
}
