//! DCEL construction.
//!
//! Building runs three passes, each to completion before the next:
//!
//! 1. one [`Vertex`](super::Vertex) per position,
//! 2. one closed half-edge ring per triangle,
//! 3. twin resolution, which links each half-edge to its reverse on the
//!    neighbouring face and fills every vertex's incident-edge list.
//!
//! Ring construction may run on the rayon thread pool since each face only
//! writes its own three arena slots. Twin resolution is always sequential:
//! every vertex's incidence list is appended to by all faces touching it.

use std::sync::Arc;

use nalgebra::Point3;
use rayon::prelude::*;
use tracing::{debug, debug_span};

use super::dcel::Dcel;
use super::halfedge::{Face, HalfEdge, HalfEdgeArena};
use super::index::{FaceId, HalfEdgeId, VertexId};
use super::vertex::VertexRegistry;
use crate::error::{DcelError, Result};
use crate::progress::{BuildStage, Progress};

/// What to do when a directed edge has more than one reverse candidate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum NonManifoldPolicy {
    /// Link the first twin-less reverse half-edge in discovery order and
    /// leave any others unmatched. Every extra candidate is counted in
    /// [`BuildStats::ambiguous_matches`] and logged at `debug`.
    #[default]
    FirstMatch,

    /// Fail with [`DcelError::NonManifoldEdge`].
    Reject,
}

/// Options for DCEL construction.
#[derive(Debug, Clone)]
pub struct BuildOptions {
    /// Check that every triangle references an existing vertex.
    ///
    /// When disabled, an out-of-range index panics during construction.
    pub validate_indices: bool,

    /// Reject triangles that repeat a vertex.
    pub reject_degenerate: bool,

    /// Handling of edges shared by more than two triangles.
    pub non_manifold: NonManifoldPolicy,

    /// Build half-edge rings in parallel (default: true).
    pub parallel: bool,

    /// Optional progress callback.
    pub progress: Option<Arc<Progress>>,
}

impl Default for BuildOptions {
    fn default() -> Self {
        Self {
            validate_indices: true,
            reject_degenerate: false,
            non_manifold: NonManifoldPolicy::FirstMatch,
            parallel: true,
            progress: None,
        }
    }
}

impl BuildOptions {
    /// Set whether vertex indices are range-checked.
    pub fn with_validation(mut self, validate: bool) -> Self {
        self.validate_indices = validate;
        self
    }

    /// Set whether degenerate triangles are rejected.
    pub fn with_reject_degenerate(mut self, reject: bool) -> Self {
        self.reject_degenerate = reject;
        self
    }

    /// Set the non-manifold edge policy.
    pub fn with_non_manifold(mut self, policy: NonManifoldPolicy) -> Self {
        self.non_manifold = policy;
        self
    }

    /// Set whether rings are built in parallel.
    pub fn with_parallel(mut self, parallel: bool) -> Self {
        self.parallel = parallel;
        self
    }

    /// Build on the calling thread only.
    pub fn sequential(mut self) -> Self {
        self.parallel = false;
        self
    }

    /// Attach a progress callback.
    pub fn with_progress(mut self, progress: Progress) -> Self {
        self.progress = Some(Arc::new(progress));
        self
    }

    /// Report progress if a callback is attached.
    fn tick(&self, stage: BuildStage, current: usize, total: usize) {
        if let Some(progress) = &self.progress {
            progress.tick(stage, current, total);
        }
    }
}

/// Counters gathered while building.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct BuildStats {
    /// Number of twin pairs linked.
    pub twins_linked: usize,

    /// Number of half-edges left without a twin.
    pub boundary_halfedges: usize,

    /// Reverse candidates found besides the one that was linked, whether
    /// already paired or left unmatched. Non-zero only for non-manifold
    /// input.
    pub ambiguous_matches: usize,
}

/// Largest vertex or half-edge count addressable by the 32-bit ids.
pub const MAX_ELEMENTS: usize = u32::MAX as usize;

/// Random access to the triangles of an index buffer.
trait Triangles: Sync {
    fn count(&self) -> usize;

    fn get(&self, face: usize) -> [usize; 3];
}

impl Triangles for [[usize; 3]] {
    fn count(&self) -> usize {
        self.len()
    }

    fn get(&self, face: usize) -> [usize; 3] {
        self[face]
    }
}

/// A flat index buffer read three entries at a time, without copying.
struct FlatIndices<'a>(&'a [usize]);

impl Triangles for FlatIndices<'_> {
    fn count(&self) -> usize {
        self.0.len() / 3
    }

    fn get(&self, face: usize) -> [usize; 3] {
        let t = &self.0[face * 3..face * 3 + 3];
        [t[0], t[1], t[2]]
    }
}

/// Build a DCEL from positions and a flat triangle index buffer.
///
/// # Example
/// ```
/// use dcel::mesh::build_from_indices;
/// use nalgebra::Point3;
///
/// let positions = vec![
///     Point3::new(0.0, 0.0, 0.0),
///     Point3::new(1.0, 0.0, 0.0),
///     Point3::new(0.0, 1.0, 0.0),
/// ];
/// let dcel = build_from_indices(&positions, &[0, 1, 2]).unwrap();
/// assert_eq!(dcel.num_faces(), 1);
/// ```
pub fn build_from_indices(positions: &[Point3<f64>], indices: &[usize]) -> Result<Dcel> {
    build_from_indices_with_options(positions, indices, &BuildOptions::default())
}

/// Build a DCEL from a flat triangle index buffer with explicit options.
pub fn build_from_indices_with_options(
    positions: &[Point3<f64>],
    indices: &[usize],
    options: &BuildOptions,
) -> Result<Dcel> {
    if indices.len() % 3 != 0 {
        return Err(DcelError::MalformedIndexBuffer { len: indices.len() });
    }
    build(positions, &FlatIndices(indices), options)
}

/// Build a DCEL from positions and triangles.
///
/// # Example
/// ```
/// use dcel::mesh::build_from_triangles;
/// use nalgebra::Point3;
///
/// let positions = vec![
///     Point3::new(0.0, 0.0, 0.0),
///     Point3::new(1.0, 0.0, 0.0),
///     Point3::new(1.0, 1.0, 0.0),
///     Point3::new(0.0, 1.0, 0.0),
/// ];
/// let dcel = build_from_triangles(&positions, &[[0, 1, 2], [0, 2, 3]]).unwrap();
/// assert_eq!(dcel.count_untwinned_halfedges(), 4);
/// ```
pub fn build_from_triangles(positions: &[Point3<f64>], triangles: &[[usize; 3]]) -> Result<Dcel> {
    build_with_options(positions, triangles, &BuildOptions::default())
}

/// Build a DCEL from positions and triangles with explicit options.
pub fn build_with_options(
    positions: &[Point3<f64>],
    triangles: &[[usize; 3]],
    options: &BuildOptions,
) -> Result<Dcel> {
    build(positions, triangles, options)
}

fn build<T: Triangles + ?Sized>(
    positions: &[Point3<f64>],
    triangles: &T,
    options: &BuildOptions,
) -> Result<Dcel> {
    let _span = debug_span!(
        "dcel_build",
        vertices = positions.len(),
        faces = triangles.count()
    )
    .entered();

    check_capacity(positions.len(), triangles.count())?;
    validate(positions.len(), triangles, options)?;

    let mut vertices = VertexRegistry::from_positions(positions);
    options.tick(BuildStage::Vertices, vertices.len(), vertices.len());

    let (mut halfedges, faces) = build_rings(triangles, options);
    debug!(halfedges = halfedges.len(), "created face rings");

    let stats = resolve_twins(&mut halfedges, &mut vertices, &faces, options)?;
    debug!(
        twins = stats.twins_linked,
        boundary = stats.boundary_halfedges,
        ambiguous = stats.ambiguous_matches,
        "resolved twins"
    );

    Ok(Dcel {
        vertices,
        halfedges,
        faces,
        stats,
    })
}

/// Ids are 32-bit; refuse meshes whose vertices or half-edges overflow them.
fn check_capacity(num_vertices: usize, num_faces: usize) -> Result<()> {
    if num_vertices > MAX_ELEMENTS {
        return Err(DcelError::TooManyElements {
            kind: "vertices",
            count: num_vertices,
        });
    }
    match num_faces.checked_mul(3) {
        Some(halfedges) if halfedges <= MAX_ELEMENTS => Ok(()),
        _ => Err(DcelError::TooManyElements {
            kind: "half-edges",
            count: num_faces.saturating_mul(3),
        }),
    }
}

/// Boundary checks on the raw input. Nothing is checked past this point.
fn validate<T: Triangles + ?Sized>(
    num_vertices: usize,
    triangles: &T,
    options: &BuildOptions,
) -> Result<()> {
    if !options.validate_indices && !options.reject_degenerate {
        return Ok(());
    }
    for fi in 0..triangles.count() {
        let tri = triangles.get(fi);
        if options.validate_indices {
            if let Some(&vertex) = tri.iter().find(|&&vi| vi >= num_vertices) {
                return Err(DcelError::InvalidVertexIndex {
                    face: fi,
                    vertex,
                    num_vertices,
                });
            }
        }
        if options.reject_degenerate && (tri[0] == tri[1] || tri[1] == tri[2] || tri[0] == tri[2])
        {
            return Err(DcelError::DegenerateFace { face: fi });
        }
    }
    Ok(())
}

fn ring_for<T: Triangles + ?Sized>(triangles: &T, face: usize) -> [HalfEdge; 3] {
    let vertices = triangles.get(face).map(VertexId::new);
    HalfEdgeArena::ring_records(FaceId::new(face), vertices)
}

/// Create one ring per triangle, in triangle order. No twins are set.
fn build_rings<T: Triangles + ?Sized>(
    triangles: &T,
    options: &BuildOptions,
) -> (HalfEdgeArena, Vec<Face>) {
    let total = triangles.count();

    if options.parallel {
        let rings: Vec<_> = (0..total)
            .into_par_iter()
            .map(|i| ring_for(triangles, i))
            .collect();
        options.tick(BuildStage::Rings, total, total);
        return HalfEdgeArena::from_rings(rings);
    }

    let mut arena = HalfEdgeArena::with_capacity(total);
    let faces = (0..total)
        .map(|i| {
            let vertices = triangles.get(i).map(VertexId::new);
            let face = arena.create_ring(FaceId::new(i), vertices);
            options.tick(BuildStage::Rings, i + 1, total);
            face
        })
        .collect();
    (arena, faces)
}

/// Link every half-edge to its reverse and record vertex incidence.
///
/// Faces are visited in index order and each ring in ring order. A
/// half-edge that already has a twin only gets registered; otherwise the
/// head vertex's incidence list (edges seen so far) is searched for the
/// reversed edge. Either way the half-edge is then appended to the head's
/// list and the tail's list, in that order.
fn resolve_twins(
    arena: &mut HalfEdgeArena,
    vertices: &mut VertexRegistry,
    faces: &[Face],
    options: &BuildOptions,
) -> Result<BuildStats> {
    let mut stats = BuildStats::default();
    let total = faces.len();

    for (fi, face) in faces.iter().enumerate() {
        let start = face.edge;
        let mut e = start;
        loop {
            let tail = arena.tail(e);
            let head = arena.head(e);

            if arena.twin(e).is_none() {
                let found = find_reverse(arena, vertices, e);
                if !found.others.is_empty() {
                    if options.non_manifold == NonManifoldPolicy::Reject {
                        return Err(DcelError::NonManifoldEdge { tail, head });
                    }
                    for other in &found.others {
                        debug!(
                            face = fi,
                            %tail,
                            %head,
                            candidate = ?other,
                            "non-manifold edge, extra reverse candidate left as is"
                        );
                    }
                    stats.ambiguous_matches += found.others.len();
                }
                if let Some(other) = found.matched {
                    arena.set_twin(e, other);
                    stats.twins_linked += 1;
                }
            }

            vertices.push_incident(head, e);
            vertices.push_incident(tail, e);

            e = arena.next(e);
            if e == start {
                break;
            }
        }
        options.tick(BuildStage::Twins, fi + 1, total);
    }

    stats.boundary_halfedges = arena.len() - 2 * stats.twins_linked;
    Ok(stats)
}

struct ReverseSearch {
    /// First twin-less reverse half-edge.
    matched: Option<HalfEdgeId>,
    /// Every other reverse half-edge, in discovery order.
    others: Vec<HalfEdgeId>,
}

/// Scan the head vertex's whole incidence list for the reverse of `e`.
///
/// The first twin-less candidate is the match. Candidates that already
/// carry a twin belong to another pairing and are never relinked.
fn find_reverse(
    arena: &HalfEdgeArena,
    vertices: &VertexRegistry,
    e: HalfEdgeId,
) -> ReverseSearch {
    let tail = arena.tail(e);
    let head = arena.head(e);

    let mut search = ReverseSearch {
        matched: None,
        others: Vec::new(),
    };
    let reverse = vertices
        .get(head)
        .incident_edges()
        .iter()
        .copied()
        .filter(|&other| arena.tail(other) == head && arena.head(other) == tail);

    for other in reverse {
        if search.matched.is_none() && arena.twin(other).is_none() {
            search.matched = Some(other);
        } else {
            search.others.push(other);
        }
    }
    search
}
