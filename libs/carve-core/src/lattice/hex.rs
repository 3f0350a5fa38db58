//! Hex lattice: a staggered triangular arrangement grouped into hexagons.
//!
//! Points live on an `m × m` index grid. Index `(c, r)` is populated when
//! `c + r` is odd and sits at `(c * 0.5, r * sin 60°)`, so every row is
//! offset by half a unit from its neighbours and all edges have unit length.
//!
//! The triangular lattice 3-colours so that every triangle has one vertex of
//! each colour. One colour class is the set of hexagon centers; each center
//! with all six neighbours present becomes an anchor.

use super::{PointId, RawLattice};
use config::constants::{HEX_COLUMN_WIDTH, HEX_ROW_HEIGHT};
use glam::DVec2;

/// Ring of neighbour offsets around a hexagon center, counter-clockwise.
const RING: [(isize, isize); 6] = [(2, 0), (1, 1), (-1, 1), (-2, 0), (-1, -1), (1, -1)];

fn is_populated(c: usize, r: usize) -> bool {
    (c + r) % 2 == 1
}

/// Colour of a populated index in the 3-colouring of the triangular lattice.
fn colour(c: usize, r: usize) -> isize {
    let (c, r) = (c as isize, r as isize);
    ((c - 1 - r) / 2 - r).rem_euclid(3)
}

/// Enumerates hexagon centers with a complete ring of neighbours, in
/// row-major order, for an index grid of width `m`.
///
/// The center class is the colour of index `(2, 1)`, the first interior
/// point, so even the smallest grid carries anchors.
///
/// # Example
///
/// ```rust
/// use carve_core::lattice::enumerate_hex_anchors;
///
/// let anchors = enumerate_hex_anchors(6);
/// assert_eq!(anchors, vec![(2, 1), (2, 3)]);
/// ```
pub fn enumerate_hex_anchors(m: usize) -> Vec<(usize, usize)> {
    let center_colour = colour(2, 1);
    let mut anchors = Vec::new();
    if m < 5 {
        return anchors;
    }
    for r in 1..m - 1 {
        for c in 2..m - 2 {
            if is_populated(c, r) && colour(c, r) == center_colour {
                anchors.push((c, r));
            }
        }
    }
    anchors
}

/// Builds the hex lattice over an `m × m` index grid.
pub(crate) fn build_hex(m: usize) -> RawLattice {
    let anchors = enumerate_hex_anchors(m);
    let mut is_anchor = vec![false; m * m];
    for &(c, r) in &anchors {
        is_anchor[r * m + c] = true;
    }

    let position = |c: usize, r: usize| {
        DVec2::new(c as f64 * HEX_COLUMN_WIDTH, r as f64 * HEX_ROW_HEIGHT)
    };

    // Base points first, anchors after, both row-major.
    let mut ids: Vec<Option<PointId>> = vec![None; m * m];
    let mut positions = Vec::new();
    for r in 0..m {
        for c in 0..m {
            if is_populated(c, r) && !is_anchor[r * m + c] {
                ids[r * m + c] = Some(positions.len());
                positions.push(position(c, r));
            }
        }
    }
    let base_count = positions.len();
    for &(c, r) in &anchors {
        ids[r * m + c] = Some(positions.len());
        positions.push(position(c, r));
    }

    let id_at = |c: usize, r: usize| -> Option<PointId> {
        if c < m && r < m {
            ids[r * m + c]
        } else {
            None
        }
    };

    // The strip between rows r and r + 1 zigzags across columns; every three
    // consecutive columns form a triangle.
    let mut triangles = Vec::new();
    for r in 0..m.saturating_sub(1) {
        let vertex = |k: usize| {
            if is_populated(k, r) {
                id_at(k, r)
            } else {
                id_at(k, r + 1)
            }
        };
        for c in 0..m.saturating_sub(2) {
            if let (Some(a), Some(b), Some(d)) = (vertex(c), vertex(c + 1), vertex(c + 2)) {
                triangles.push([a, b, d]);
            }
        }
    }

    let lines = anchors
        .iter()
        .map(|&(c, r)| {
            let mut ring: Vec<PointId> = RING
                .iter()
                .filter_map(|&(dc, dr)| {
                    let nc = c.checked_add_signed(dc)?;
                    let nr = r.checked_add_signed(dr)?;
                    id_at(nc, nr)
                })
                .collect();
            if let Some(&first) = ring.first() {
                ring.push(first);
            }
            ring
        })
        .collect();

    RawLattice {
        positions,
        base_count,
        triangles,
        lines,
    }
}
