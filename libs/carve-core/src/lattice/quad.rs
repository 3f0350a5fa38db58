//! Quad lattice: an N×N grid with one anchor at the centroid of every quad.

use super::{PointId, RawLattice};
use glam::DVec2;

/// Builds the quad lattice for grid size `n`.
///
/// Base point `(x, y)` has id `y * n + x`. The anchor of quad `(i, j)` has
/// id `n * n + j * (n - 1) + i`. Each quad is fanned into four triangles
/// around its anchor, which is the Delaunay triangulation of the point set.
pub(crate) fn build_quad(n: usize) -> RawLattice {
    let quads = n.saturating_sub(1);
    let base_count = n * n;
    let mut positions = Vec::with_capacity(base_count + quads * quads);

    for y in 0..n {
        for x in 0..n {
            positions.push(DVec2::new(x as f64, y as f64));
        }
    }
    for j in 0..quads {
        for i in 0..quads {
            positions.push(DVec2::new(i as f64 + 0.5, j as f64 + 0.5));
        }
    }

    let base = |x: usize, y: usize| -> PointId { y * n + x };
    let mut triangles = Vec::with_capacity(quads * quads * 4);
    for j in 0..quads {
        for i in 0..quads {
            let anchor = base_count + j * quads + i;
            let (c00, c10, c11, c01) = (
                base(i, j),
                base(i + 1, j),
                base(i + 1, j + 1),
                base(i, j + 1),
            );
            triangles.push([c00, c10, anchor]);
            triangles.push([c10, c11, anchor]);
            triangles.push([c11, c01, anchor]);
            triangles.push([c01, c00, anchor]);
        }
    }

    let mut lines = Vec::with_capacity(2 * n);
    for y in 0..n {
        lines.push((0..n).map(|x| base(x, y)).collect());
    }
    for x in 0..n {
        lines.push((0..n).map(|y| base(x, y)).collect());
    }

    RawLattice {
        positions,
        base_count,
        triangles,
        lines,
    }
}
