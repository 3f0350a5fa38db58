//! # Topology Reconstruction
//!
//! Turns the cell-mode selection into an exportable polygon mesh. Every
//! emitted face winds clockwise in the XY plane.
//!
//! ## Quad Rule
//!
//! Per selected anchor, the points of its active cells are collected. Codes
//! below [`ANCHOR_VERTEX_MIN_CODE`] cut along base points only, so anchor-range
//! ids are dropped; higher codes keep the anchor as a vertex. The survivors
//! are sorted descending by (x, y) and emitted as:
//!
//! ```text
//! 3 points -> triangle, 2nd/3rd swapped for the flip codes
//! 4 points -> quad, 3rd/4th always swapped
//! other    -> UnsupportedCutShape warning, anchor skipped
//! ```
//!
//! ## Hex
//!
//! Hex anchors have no cut-shape table; the active triangles are emitted
//! directly, reversed to clockwise.


use std::cmp::Ordering;
use std::collections::BTreeSet;

use crate::error::{CarveError, CarveResult};
use crate::lattice::{Lattice, LatticeKind, PointId};
use crate::mesh::PolyMesh;
use crate::pattern::{PatternCode, PatternTable};
use crate::selection::SelectionStore;
use config::constants::ANCHOR_VERTEX_MIN_CODE;
use glam::DVec3;
use tracing::{debug, warn};

/// Result of a cell-mode reconstruction.
#[derive(Debug)]
pub struct Reconstruction {
    /// Faces over the full lattice point array.
    pub mesh: PolyMesh,
    /// Anchors skipped because their cut shape is unsupported.
    pub warnings: Vec<CarveError>,
}

/// Builds the exportable mesh for the current cell-mode selection.
///
/// # Errors
///
/// `NoSelection` when no cell is active, `InvariantViolation` when the store
/// belongs to a different lattice kind.
pub fn reconstruct(lattice: &Lattice, store: &SelectionStore) -> CarveResult<Reconstruction> {
    if store.kind() != lattice.kind() {
        return Err(CarveError::invariant("selection and lattice kinds differ"));
    }
    if store.active_cell_count() == 0 {
        return Err(CarveError::no_selection("no active cells"));
    }

    let vertices: Vec<DVec3> = lattice.points().iter().map(|p| p.position).collect();
    let mut result = Reconstruction {
        mesh: PolyMesh::with_vertices(vertices),
        warnings: Vec::new(),
    };

    match lattice.kind() {
        LatticeKind::Quad => {
            for (anchor, code) in store.selected_anchors() {
                let cells = store.contribution(anchor).unwrap_or_default();
                if let Err(err) = emit_cut(lattice, anchor, code, cells, &mut result.mesh) {
                    if matches!(err, CarveError::UnsupportedCutShape { .. }) {
                        warn!(anchor, code = code.value(), "Skipping anchor: {err}");
                        result.warnings.push(err);
                    } else {
                        return Err(err);
                    }
                }
            }
        }
        LatticeKind::Hex => {
            for cell in store.active_cells() {
                let [a, b, c] = lattice.cell(cell)?.points;
                result.mesh.add_triangle(a as u32, c as u32, b as u32);
            }
        }
    }

    debug!(
        kind = lattice.kind().name(),
        faces = result.mesh.face_count(),
        warnings = result.warnings.len(),
        "Reconstructed selection"
    );
    Ok(result)
}

/// Emits the face for one quad anchor.
fn emit_cut(
    lattice: &Lattice,
    anchor: PointId,
    code: PatternCode,
    cells: &[usize],
    mesh: &mut PolyMesh,
) -> CarveResult<()> {
    let keep_anchors = code.value() >= ANCHOR_VERTEX_MIN_CODE;

    let mut ids = BTreeSet::new();
    for &cell in cells {
        for &p in &lattice.cell(cell)?.points {
            if keep_anchors || !lattice.is_anchor(p) {
                ids.insert(p);
            }
        }
    }

    let mut sorted = Vec::with_capacity(ids.len());
    for id in ids {
        sorted.push((id, lattice.position_2d(id)?));
    }
    sorted.sort_by(|(_, a), (_, b)| descending(a.x, b.x).then(descending(a.y, b.y)));
    let v: Vec<u32> = sorted.into_iter().map(|(id, _)| id as u32).collect();

    match v.as_slice() {
        &[a, b, c] => {
            if PatternTable::flips_triangle(lattice.kind(), code) {
                mesh.add_triangle(a, c, b);
            } else {
                mesh.add_triangle(a, b, c);
            }
            Ok(())
        }
        &[a, b, c, d] => {
            mesh.add_quad(a, b, d, c);
            Ok(())
        }
        other => Err(CarveError::UnsupportedCutShape {
            anchor,
            point_count: other.len(),
        }),
    }
}

#[inline]
fn descending(a: f64, b: f64) -> Ordering {
    b.total_cmp(&a)
}
