//! The animated globe: every face group and its current transform.

use std::sync::Arc;

use dymaxion_icosa::{FACE_COUNT, GeoProjector, IcosahedronGeometry, ProjectionError};
use dymaxion_mesh::{FaceTessellator, SubdivisionMesh, TessellationConfig, TessellationStyle};
use glam::{DQuat, DVec3};
use tracing::{debug, info, trace};

use crate::layout::{self, HINGE_PARENT};
use crate::{
    AnimationBlend, AssemblyError, FACE_PAIRS, FacePair, FoldState, GroupKind, GroupLayout,
    Hinge, MovableFaceGroup, RigidTransform, SPLIT_FACES, SplitFace, SurfaceMapper,
};

/// Plane through the globe center along which a split face is cut.
#[derive(Clone, Debug)]
struct SplitPlane {
    face: usize,
    detached_group: usize,
    normal: DVec3,
    /// Sign of `normal · p` on the primary half.
    primary_sign: f64,
    /// Outward normal of the split face.
    face_normal: DVec3,
    /// Flat triangles crossing the cut, with whether they went to the primary half.
    straddling: Vec<([DVec3; 3], bool)>,
}

/// Points this close to a split plane belong to the primary half.
const SPLIT_TOLERANCE: f64 = 1e-9;

impl SplitPlane {
    fn side(&self, point: DVec3) -> f64 {
        self.normal.dot(point.normalize()) * self.primary_sign
    }

    fn is_primary(&self, point: DVec3) -> bool {
        self.side(point) >= -SPLIT_TOLERANCE
    }

    fn crosses(&self, corners: [DVec3; 3]) -> bool {
        let sides = corners.map(|c| self.side(c));
        sides.iter().any(|s| *s > SPLIT_TOLERANCE) && sides.iter().any(|s| *s < -SPLIT_TOLERANCE)
    }

    /// Which half meshes the face-plane point `on_plane`. Inside a triangle
    /// that crosses the cut, the triangle's half wins over the plane side.
    fn holds_in_primary(&self, on_plane: DVec3) -> bool {
        self.straddling
            .iter()
            .find(|(corners, _)| triangle_contains(*corners, self.face_normal, on_plane))
            .map_or_else(|| self.is_primary(on_plane), |(_, primary)| *primary)
    }
}

/// Whether `point`, on the plane of the counter-clockwise triangle
/// `corners`, lies inside it or on its boundary.
fn triangle_contains(corners: [DVec3; 3], normal: DVec3, point: DVec3) -> bool {
    (0..3).all(|i| {
        let (a, b) = (corners[i], corners[(i + 1) % 3]);
        (b - a).cross(point - a).dot(normal) >= -SPLIT_TOLERANCE * (b - a).length()
    })
}

/// Owns the face groups of one tessellated globe and animates them.
#[derive(Clone, Debug)]
pub struct GlobeAssembly {
    geometry: Arc<IcosahedronGeometry>,
    projector: GeoProjector,
    config: TessellationConfig,
    layout: GroupLayout,
    groups: Vec<MovableFaceGroup>,
    splits: Vec<SplitPlane>,
    blend: AnimationBlend,
}

impl GlobeAssembly {
    /// Tessellate every face and build the groups for `layout`.
    ///
    /// The assembly starts fully assembled (`AnimationBlend::ASSEMBLED`).
    pub fn new(
        geometry: Arc<IcosahedronGeometry>,
        config: &TessellationConfig,
        layout: GroupLayout,
    ) -> Result<Self, AssemblyError> {
        config.validate()?;
        let tessellator = FaceTessellator::new(config.style, config.fidelity)?;

        let mut groups = Vec::with_capacity(layout.group_count());
        for face in 0..FACE_COUNT {
            let meshes = tessellator.tessellate(&geometry.faces()[face]);
            groups.push(whole_group(&geometry, face, meshes, config.style)?);
        }

        let mut splits = Vec::new();
        if layout == GroupLayout::Split {
            for split in SPLIT_FACES {
                let detached_group = groups.len();
                let (plane, detached) = split_group(
                    &geometry,
                    &mut groups[split.face],
                    split,
                    detached_group,
                    config.style,
                )?;
                groups.push(detached);
                splits.push(plane);
            }
        }

        let mut assembly = Self {
            projector: GeoProjector::new(Arc::clone(&geometry)),
            geometry,
            config: *config,
            layout,
            groups,
            splits,
            blend: AnimationBlend::ASSEMBLED,
        };
        assembly.refresh();

        info!(
            "Built globe assembly: {} groups, {:?} fidelity {}, {} triangles",
            assembly.groups.len(),
            config.style,
            config.fidelity,
            assembly.triangle_count()
        );
        Ok(assembly)
    }

    /// Build over the process-wide geometry.
    pub fn with_shared_geometry(
        config: &TessellationConfig,
        layout: GroupLayout,
    ) -> Result<Self, AssemblyError> {
        Self::new(IcosahedronGeometry::shared(), config, layout)
    }

    /// The icosahedron the faces come from.
    pub fn geometry(&self) -> &IcosahedronGeometry {
        &self.geometry
    }

    pub fn projector(&self) -> &GeoProjector {
        &self.projector
    }

    pub fn config(&self) -> &TessellationConfig {
        &self.config
    }

    /// Globe radius applied to every transform and position.
    pub fn radius(&self) -> f64 {
        self.config.radius
    }

    pub fn layout(&self) -> GroupLayout {
        self.layout
    }

    pub fn blend(&self) -> AnimationBlend {
        self.blend
    }

    /// 20, or 22 in the split layout.
    pub fn group_count(&self) -> usize {
        self.groups.len()
    }

    pub fn groups(&self) -> &[MovableFaceGroup] {
        &self.groups
    }

    /// Group `index`, or `IndexOutOfRange`.
    pub fn group(&self, index: usize) -> Result<&MovableFaceGroup, AssemblyError> {
        self.groups.get(index).ok_or(AssemblyError::IndexOutOfRange {
            index,
            count: self.groups.len(),
        })
    }

    /// Total triangles over all groups.
    pub fn triangle_count(&self) -> usize {
        self.groups.iter().map(MovableFaceGroup::triangle_count).sum()
    }

    pub fn face_pairs(&self) -> &'static [FacePair] {
        &FACE_PAIRS
    }

    /// Diamond containing `face`.
    pub fn pair_of(&self, face: usize) -> Option<FacePair> {
        layout::pair_of(face)
    }

    /// Set both blend factors (clamped into `[0, 1]`) and recompute every
    /// group. The result depends only on `blend`, never on earlier calls.
    pub fn set_blend(&mut self, blend: AnimationBlend) {
        self.blend = blend.clamped();
        self.refresh();
        trace!(
            "Globe blend set to inflation {:.4}, unfold {:.4}",
            self.blend.inflation, self.blend.unfold
        );
    }

    /// Change only the inflation factor.
    pub fn set_inflation(&mut self, inflation: f64) {
        self.set_blend(AnimationBlend {
            inflation,
            ..self.blend
        });
    }

    /// Change only the unfold factor.
    pub fn set_unfold(&mut self, unfold: f64) {
        self.set_blend(AnimationBlend {
            unfold,
            ..self.blend
        });
    }

    fn refresh(&mut self) {
        let (blend, radius) = (self.blend, self.config.radius);
        for group in &mut self.groups {
            group.update(blend, radius);
        }
    }

    /// Current transform of group `index` on the radius-scaled globe.
    pub fn transform(&self, index: usize) -> Result<RigidTransform, AssemblyError> {
        Ok(self.group(index)?.transform.scaled(self.config.radius))
    }

    pub fn orientation(&self, index: usize) -> Result<DQuat, AssemblyError> {
        Ok(self.group(index)?.orientation())
    }

    /// Pivot of group `index` in the folded frame, scaled by the radius.
    pub fn local_origin(&self, index: usize) -> Result<DVec3, AssemblyError> {
        Ok(self.group(index)?.local_origin * self.config.radius)
    }

    pub fn fold_state(&self, index: usize) -> Result<FoldState, AssemblyError> {
        Ok(self.group(index)?.fold_state())
    }

    /// Group whose mesh covers the direction `dir`, with the direction's
    /// gnomonic intersection with that group's face plane.
    ///
    /// On a split face the answer follows the triangle containing the point,
    /// so a point is always moved with the mesh it lies on.
    pub fn group_for_direction(&self, dir: DVec3) -> Result<(usize, DVec3), ProjectionError> {
        let face = self.projector.find_face(dir);
        let (on_plane, _) = self.projector.project_to_face(dir, face)?;
        let group = self
            .splits
            .iter()
            .find(|s| s.face == face && !s.holds_in_primary(on_plane))
            .map_or(face, |s| s.detached_group);
        Ok((group, on_plane))
    }
}

impl SurfaceMapper for GlobeAssembly {
    /// Where the globe surface point in direction `dir` currently is, using
    /// the same inflation and hinge transform as the mesh vertices.
    fn place(&self, dir: DVec3) -> Result<DVec3, ProjectionError> {
        let (group, on_plane) = self.group_for_direction(dir)?;
        let unit = dir.normalize();
        let inflated = on_plane.lerp(unit, self.blend.inflation);
        Ok(self.groups[group].transform.transform_point(inflated) * self.config.radius)
    }
}

/// Hinge turning `face` into the plane of `parent`.
fn hinge_onto(
    geometry: &IcosahedronGeometry,
    face: usize,
    parent: usize,
) -> Result<Hinge, AssemblyError> {
    let [e0, e1] = geometry
        .shared_edge(face, parent)
        .ok_or(AssemblyError::NotAdjacent { face, parent })?;
    let vertices = geometry.vertices();
    let faces = geometry.faces();
    Ok(Hinge::new(
        [vertices[e0], vertices[e1]],
        faces[face].vec_c,
        faces[parent].vec_c,
    ))
}

/// Hinges from the root out to `face`.
fn hinge_chain(geometry: &IcosahedronGeometry, face: usize) -> Result<Vec<Hinge>, AssemblyError> {
    let mut chain = Vec::new();
    for child in layout::chain_to_root(face) {
        if let Some(parent) = HINGE_PARENT[child] {
            chain.push(hinge_onto(geometry, child, parent)?);
        }
    }
    Ok(chain)
}

/// Mean of the folded sphere positions, or the outline's first corner for
/// strip meshes. Falls back to the outline centroid for an empty group.
fn local_origin(
    style: TessellationStyle,
    outline: [DVec3; 3],
    meshes: &[SubdivisionMesh],
) -> DVec3 {
    let count: usize = meshes.iter().map(SubdivisionMesh::vertex_count).sum();
    if style == TessellationStyle::Strip {
        outline[0]
    } else if count == 0 {
        (outline[0] + outline[1] + outline[2]) / 3.0
    } else {
        meshes
            .iter()
            .flat_map(|m| m.positions.iter().copied())
            .sum::<DVec3>()
            / count as f64
    }
}

#[allow(clippy::too_many_arguments)]
fn make_group(
    index: usize,
    face: usize,
    kind: GroupKind,
    outline: [DVec3; 3],
    geometry: &IcosahedronGeometry,
    parent: Option<usize>,
    chain: Vec<Hinge>,
    meshes: Vec<SubdivisionMesh>,
    style: TessellationStyle,
) -> MovableFaceGroup {
    let positions = meshes.iter().map(|m| m.positions.clone()).collect();
    MovableFaceGroup {
        index,
        face,
        kind,
        outline,
        normal: geometry.faces()[face].vec_c,
        partner: layout::pair_of(face).and_then(|p| p.partner(face)),
        parent,
        chain,
        local_origin: local_origin(style, outline, &meshes),
        meshes,
        transform: RigidTransform::IDENTITY,
        fold_state: FoldState::Folded,
        positions,
    }
}

fn whole_group(
    geometry: &IcosahedronGeometry,
    face: usize,
    meshes: Vec<SubdivisionMesh>,
    style: TessellationStyle,
) -> Result<MovableFaceGroup, AssemblyError> {
    debug!("Face {} tessellated into {} mesh(es)", face, meshes.len());
    Ok(make_group(
        face,
        face,
        GroupKind::Whole,
        geometry.faces()[face].corners,
        geometry,
        HINGE_PARENT[face],
        hinge_chain(geometry, face)?,
        meshes,
        style,
    ))
}

/// Cut `group` in two along the plane through the corner shared with both
/// its parent and `split.neighbor`, and the midpoint of the opposite edge.
/// `group` keeps the half touching its parent; the other half is returned.
fn split_group(
    geometry: &IcosahedronGeometry,
    group: &mut MovableFaceGroup,
    split: SplitFace,
    detached_index: usize,
    style: TessellationStyle,
) -> Result<(SplitPlane, MovableFaceGroup), AssemblyError> {
    let SplitFace { face, neighbor } = split;
    let parent = group.parent.ok_or(AssemblyError::NotAdjacent { face, parent: face })?;
    let parent_edge = geometry
        .shared_edge(face, parent)
        .ok_or(AssemblyError::NotAdjacent { face, parent })?;
    let neighbor_edge = geometry
        .shared_edge(face, neighbor)
        .ok_or(AssemblyError::NotAdjacent { face, parent: neighbor })?;

    let q = if neighbor_edge.contains(&parent_edge[0]) {
        parent_edge[0]
    } else {
        parent_edge[1]
    };
    let r = if parent_edge[0] == q { parent_edge[1] } else { parent_edge[0] };
    let p = if neighbor_edge[0] == q { neighbor_edge[1] } else { neighbor_edge[0] };

    let vertices = geometry.vertices();
    let (q, r, p) = (vertices[q], vertices[r], vertices[p]);
    let mid = (r + p) * 0.5;
    let normal = q.cross(mid).normalize();
    let mut plane = SplitPlane {
        face,
        detached_group: detached_index,
        normal,
        primary_sign: normal.dot(r).signum(),
        face_normal: geometry.faces()[face].vec_c,
        straddling: Vec::new(),
    };

    let mut primary = Vec::new();
    let mut detached = Vec::new();
    for mesh in std::mem::take(&mut group.meshes) {
        for tri in mesh.triangles() {
            let corners = tri.map(|i| mesh.flat[i as usize]);
            if plane.crosses(corners) {
                let keep = plane.is_primary(corners[0] + corners[1] + corners[2]);
                plane.straddling.push((corners, keep));
            }
        }
        let (keep, rest) = mesh.partition(|c| plane.is_primary(c[0] + c[1] + c[2]));
        if keep.triangle_count() > 0 {
            primary.push(keep);
        }
        if rest.triangle_count() > 0 {
            detached.push(rest);
        }
    }

    let primary_outline = [q, r, mid];
    *group = make_group(
        group.index,
        face,
        GroupKind::PrimaryHalf,
        primary_outline,
        geometry,
        group.parent,
        std::mem::take(&mut group.chain),
        primary,
        style,
    );

    let mut chain = hinge_chain(geometry, neighbor)?;
    chain.push(hinge_onto(geometry, face, neighbor)?);
    let detached = make_group(
        detached_index,
        face,
        GroupKind::DetachedHalf,
        [q, mid, p],
        geometry,
        Some(neighbor),
        chain,
        detached,
        style,
    );
    debug!(
        "Split face {} into groups {} ({} triangles) and {} ({} triangles), {} across the cut",
        face,
        group.index,
        group.triangle_count(),
        detached_index,
        detached.triangle_count(),
        plane.straddling.len()
    );
    Ok((plane, detached))
}
