//! Fixed tables describing how the faces hinge apart into the Dymaxion net.
//!
//! The net is ten diamonds. Each diamond is a [`FacePair`]: a polar cap face
//! and the equatorial band face across its non-polar edge. The ten band
//! faces form a hinged chain rooted at [`ROOT_FACE`], and every cap face
//! hinges onto its band partner, so at full unfold each pair lies in one
//! plane.

use dymaxion_icosa::FACE_COUNT;
use serde::{Deserialize, Serialize};

/// The face that never moves while unfolding.
pub const ROOT_FACE: usize = 11;

/// Two adjacent faces that unfold into one flat diamond.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct FacePair {
    /// Face touching a pole vertex.
    pub cap: usize,
    /// Equatorial band face sharing the cap's non-polar edge.
    pub band: usize,
}

impl FacePair {
    #[must_use]
    pub fn contains(&self, face: usize) -> bool {
        self.cap == face || self.band == face
    }

    /// The other face of the pair, if `face` belongs to it.
    #[must_use]
    pub fn partner(&self, face: usize) -> Option<usize> {
        if face == self.cap {
            Some(self.band)
        } else if face == self.band {
            Some(self.cap)
        } else {
            None
        }
    }
}

const fn pair(cap: usize, band: usize) -> FacePair {
    FacePair { cap, band }
}

/// All ten diamonds; every face appears exactly once.
pub const FACE_PAIRS: [FacePair; 10] = [
    pair(0, 5),
    pair(1, 7),
    pair(2, 9),
    pair(3, 11),
    pair(4, 13),
    pair(15, 14),
    pair(16, 6),
    pair(17, 8),
    pair(18, 10),
    pair(19, 12),
];

/// Face each face hinges onto; `None` for [`ROOT_FACE`].
pub(crate) const HINGE_PARENT: [Option<usize>; FACE_COUNT] = [
    Some(5),
    Some(7),
    Some(9),
    Some(11),
    Some(13),
    Some(14),
    Some(7),
    Some(8),
    Some(9),
    Some(10),
    Some(11),
    None,
    Some(11),
    Some(12),
    Some(13),
    Some(14),
    Some(6),
    Some(8),
    Some(10),
    Some(12),
];

/// A cap face cut in two for the split layout.
///
/// The cut runs from the corner shared by the face, its band partner and
/// `neighbor` to the midpoint of the opposite edge. The half touching the
/// band partner stays in the face's own group; the other half becomes an
/// extra group hinged onto `neighbor`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct SplitFace {
    pub face: usize,
    pub neighbor: usize,
}

/// Faces cut in the split layout, in the order of their extra groups
/// (group 20, then group 21).
pub const SPLIT_FACES: [SplitFace; 2] = [
    SplitFace {
        face: 4,
        neighbor: 3,
    },
    SplitFace {
        face: 16,
        neighbor: 17,
    },
];

/// How faces are grouped into rigidly moving pieces.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum GroupLayout {
    /// One group per face.
    #[default]
    Whole,
    /// Two cap faces cut in half, giving the classic Dymaxion map outline.
    Split,
}

impl GroupLayout {
    #[must_use]
    pub fn group_count(self) -> usize {
        match self {
            GroupLayout::Whole => FACE_COUNT,
            GroupLayout::Split => FACE_COUNT + SPLIT_FACES.len(),
        }
    }
}

/// Pair containing `face`.
pub(crate) fn pair_of(face: usize) -> Option<FacePair> {
    FACE_PAIRS.iter().copied().find(|p| p.contains(face))
}

/// Hinge chain of `face` from the root outwards, ending with `face` itself.
pub(crate) fn chain_to_root(face: usize) -> Vec<usize> {
    let mut chain = vec![face];
    let mut current = face;
    while let Some(parent) = HINGE_PARENT[current] {
        chain.push(parent);
        current = parent;
    }
    chain.pop();
    chain.reverse();
    chain
}
