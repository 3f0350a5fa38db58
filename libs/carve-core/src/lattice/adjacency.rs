//! Anchor adjacency: the cells around an anchor, in slot order.

use std::cmp::Ordering;

use super::{CellId, Lattice, PointId};
use crate::error::{CarveError, CarveResult};
use glam::DVec2;

/// Center of a cell's axis-aligned bounding box.
pub fn cell_bounds_center(lattice: &Lattice, cell: CellId) -> CarveResult<DVec2> {
    let cell = lattice.cell(cell)?;
    let first = lattice.position_2d(cell.points[0])?;
    let (mut min, mut max) = (first, first);
    for &p in &cell.points[1..] {
        let pos = lattice.position_2d(p)?;
        min = min.min(pos);
        max = max.max(pos);
    }
    Ok(min + (max - min) / 2.0)
}

fn by_x_then_y(a: &DVec2, b: &DVec2) -> Ordering {
    a.x.total_cmp(&b.x).then(a.y.total_cmp(&b.y))
}

/// Gathers the cells around `anchor` and orders them ascending by
/// bounding-box center (x, then y). The resulting index is the slot that
/// pattern exclusion tables refer to.
///
/// # Errors
///
/// `InvariantViolation` if the anchor is not surrounded by exactly
/// `slot_count()` cells for the lattice kind.
pub fn resolve_adjacency(lattice: &Lattice, anchor: PointId) -> CarveResult<Vec<CellId>> {
    lattice.point(anchor)?;
    if !lattice.is_anchor(anchor) {
        return Err(CarveError::NotAnAnchor { id: anchor });
    }

    let mut keyed = lattice
        .cells_of_point(anchor)?
        .iter()
        .map(|&cell| Ok((cell_bounds_center(lattice, cell)?, cell)))
        .collect::<CarveResult<Vec<_>>>()?;

    let expected = lattice.kind().slot_count();
    if keyed.len() != expected {
        return Err(CarveError::invariant(format!(
            "anchor {anchor} touches {} cells, expected {expected}",
            keyed.len()
        )));
    }

    keyed.sort_by(|(a, _), (b, _)| by_x_then_y(a, b));
    Ok(keyed.into_iter().map(|(_, cell)| cell).collect())
}
