//! One rigidly moving piece of the globe.

use dymaxion_mesh::SubdivisionMesh;
use glam::{DQuat, DVec3};

use crate::{AnimationBlend, FoldState, Hinge, RigidTransform};

/// What part of a face a group covers.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum GroupKind {
    /// The whole face.
    Whole,
    /// The half of a split face that stays with its diamond partner.
    PrimaryHalf,
    /// The half of a split face hinged onto a neighbouring face.
    DetachedHalf,
}

/// A set of meshes that move together as the globe unfolds.
///
/// Orientation is a pure function of the unfold blend and the group's hinge
/// chain: the hinges from the root face out to this group, each turning its
/// face into its parent's plane. Nothing is accumulated between updates.
#[derive(Clone, Debug)]
pub struct MovableFaceGroup {
    pub(crate) index: usize,
    pub(crate) face: usize,
    pub(crate) kind: GroupKind,
    /// Face-plane corners outlining the group; `outline[0]` is a sphere vertex.
    pub(crate) outline: [DVec3; 3],
    /// Folded outward normal.
    pub(crate) normal: DVec3,
    pub(crate) partner: Option<usize>,
    pub(crate) parent: Option<usize>,
    pub(crate) chain: Vec<Hinge>,
    pub(crate) meshes: Vec<SubdivisionMesh>,
    /// Pivot on the unit globe, folded frame.
    pub(crate) local_origin: DVec3,
    /// Current transform on the unit globe.
    pub(crate) transform: RigidTransform,
    pub(crate) fold_state: FoldState,
    pub(crate) positions: Vec<Vec<DVec3>>,
}

impl MovableFaceGroup {
    /// Position of this group in the assembly.
    pub fn index(&self) -> usize {
        self.index
    }

    /// Icosahedron face the group's meshes come from.
    pub fn face(&self) -> usize {
        self.face
    }

    /// Whole face or one half of a split face.
    pub fn kind(&self) -> GroupKind {
        self.kind
    }

    /// Face-plane corners outlining the group.
    pub fn outline(&self) -> [DVec3; 3] {
        self.outline
    }

    /// The other face of this group's diamond.
    pub fn partner(&self) -> Option<usize> {
        self.partner
    }

    /// Face this group hinges onto; `None` for the root.
    pub fn parent_face(&self) -> Option<usize> {
        self.parent
    }

    /// The group's own hinge.
    pub fn hinge(&self) -> Option<&Hinge> {
        self.chain.last()
    }

    /// Unit direction of the group's own hinge edge.
    pub fn hinge_axis(&self) -> Option<DVec3> {
        self.hinge().map(|h| h.axis)
    }

    /// Hinges from the root outwards, ending with this group's own hinge.
    pub fn hinge_chain(&self) -> &[Hinge] {
        &self.chain
    }

    /// Folded meshes, in face-plane and unit-sphere coordinates.
    pub fn meshes(&self) -> &[SubdivisionMesh] {
        &self.meshes
    }

    pub fn triangle_count(&self) -> usize {
        self.meshes.iter().map(SubdivisionMesh::triangle_count).sum()
    }

    /// Current vertex positions, one vector per mesh, scaled by the radius.
    pub fn positions(&self) -> &[Vec<DVec3>] {
        &self.positions
    }

    /// Current orientation.
    pub fn orientation(&self) -> DQuat {
        self.transform.rotation
    }

    /// Orientation when assembled into the globe.
    pub fn folded_orientation(&self) -> DQuat {
        DQuat::IDENTITY
    }

    /// Orientation when lying flat in the net.
    pub fn unfolded_orientation(&self) -> DQuat {
        self.transform_at(0.0).rotation
    }

    /// Folded, unfolded or in between, from the last update.
    pub fn fold_state(&self) -> FoldState {
        self.fold_state
    }

    /// Outward normal after the current transform.
    pub fn normal(&self) -> DVec3 {
        self.transform.transform_vector(self.normal)
    }

    /// Transform on the unit globe at unfold blend `unfold`.
    pub fn transform_at(&self, unfold: f64) -> RigidTransform {
        self.chain
            .iter()
            .fold(RigidTransform::IDENTITY, |acc, hinge| acc.compose(hinge.at(unfold)))
    }

    /// Recompute transform and positions for `blend` on a globe of `radius`.
    pub(crate) fn update(&mut self, blend: AnimationBlend, radius: f64) {
        self.transform = self.transform_at(blend.unfold);
        self.fold_state = blend.fold_state();
        let transform = self.transform;
        for (mesh, positions) in self.meshes.iter().zip(self.positions.iter_mut()) {
            positions.clear();
            positions.extend(
                mesh.inflated_positions(blend.inflation)
                    .map(|p| transform.transform_point(p) * radius),
            );
        }
    }
}
