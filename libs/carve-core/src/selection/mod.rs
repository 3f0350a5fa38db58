//! # Selection Store
//!
//! The mutable selection state of a session: which anchors are selected,
//! with which pattern code, and the derived set of active cells. Point mode
//! keeps an ordered boundary polygon instead.
//!
//! ## Invariants
//!
//! - An anchor is in the pattern map only while it contributes at least one
//!   cell (every pattern keeps at least one slot).
//! - The active-cell set is exactly the union of all anchor contributions.
//!   Cells are reference counted, so a cell shared by two anchors survives
//!   until neither contributes it.
//! - Every operation validates before it mutates.


use std::collections::BTreeMap;

use crate::error::{CarveError, CarveResult};
use crate::lattice::{CellId, Lattice, LatticeKind, PointId};
use crate::pattern::{PatternCode, PatternTable};
use tracing::debug;

/// Per-anchor state: its pattern and the cells it currently contributes.
#[derive(Debug, Clone, PartialEq, Eq)]
struct AnchorSelection {
    code: PatternCode,
    cells: Vec<CellId>,
}

/// Selection state bound to one lattice kind.
#[derive(Debug, Clone)]
pub struct SelectionStore {
    kind: LatticeKind,
    anchors: BTreeMap<PointId, AnchorSelection>,
    /// Active cell -> number of anchors contributing it.
    active: BTreeMap<CellId, usize>,
    boundary: Vec<PointId>,
    pending_anchor: Option<PointId>,
}

impl SelectionStore {
    /// Creates an empty store for lattices of `kind`.
    pub fn new(kind: LatticeKind) -> Self {
        Self {
            kind,
            anchors: BTreeMap::new(),
            active: BTreeMap::new(),
            boundary: Vec::new(),
            pending_anchor: None,
        }
    }

    /// Lattice kind this store accepts.
    #[inline]
    pub fn kind(&self) -> LatticeKind {
        self.kind
    }

    fn check_lattice(&self, lattice: &Lattice) -> CarveResult<()> {
        if lattice.kind() != self.kind {
            return Err(CarveError::invariant(format!(
                "selection for {} lattice used with {} lattice",
                self.kind.name(),
                lattice.kind().name()
            )));
        }
        Ok(())
    }

    fn add_cells(&mut self, cells: &[CellId]) {
        for &cell in cells {
            *self.active.entry(cell).or_insert(0) += 1;
        }
    }

    fn remove_cells(&mut self, cells: &[CellId]) {
        for cell in cells {
            if let Some(count) = self.active.get_mut(cell) {
                *count -= 1;
                if *count == 0 {
                    self.active.remove(cell);
                }
            }
        }
    }

    /// Selects an anchor with pattern 0, or with `remove` unselects it.
    ///
    /// Returns whether the state changed. Selecting a selected anchor or
    /// removing an unselected one is a no-op.
    ///
    /// # Errors
    ///
    /// `UnknownPoint` / `NotAnAnchor` for ids that are not anchors of
    /// `lattice`; the store is left untouched.
    pub fn select_anchor(
        &mut self,
        lattice: &Lattice,
        anchor: PointId,
        remove: bool,
    ) -> CarveResult<bool> {
        self.check_lattice(lattice)?;
        let adjacency = lattice.adjacency(anchor)?;

        if remove {
            let Some(previous) = self.anchors.remove(&anchor) else {
                return Ok(false);
            };
            self.remove_cells(&previous.cells);
            debug!(anchor, active = self.active.len(), "Unselected anchor");
        } else {
            if self.anchors.contains_key(&anchor) {
                return Ok(false);
            }
            let cells = adjacency.to_vec();
            self.add_cells(&cells);
            self.anchors.insert(
                anchor,
                AnchorSelection {
                    code: PatternCode::FULL,
                    cells,
                },
            );
            debug!(anchor, active = self.active.len(), "Selected anchor");
        }
        Ok(true)
    }

    /// Applies a pattern code to a selected anchor. The code wraps modulo the
    /// table size. Unselected anchors are ignored.
    ///
    /// Returns whether the anchor's contribution changed.
    pub fn set_pattern(
        &mut self,
        lattice: &Lattice,
        anchor: PointId,
        code: i64,
    ) -> CarveResult<bool> {
        self.check_lattice(lattice)?;
        let adjacency = lattice.adjacency(anchor)?;
        let code = PatternCode::wrap(self.kind, code);

        let Some(current) = self.anchors.get(&anchor) else {
            return Ok(false);
        };
        let cells = PatternTable::active_cells(self.kind, code, adjacency);
        debug_assert!(!cells.is_empty());
        if current.code == code && current.cells == cells {
            return Ok(false);
        }

        let previous = current.cells.clone();
        self.remove_cells(&previous);
        self.add_cells(&cells);
        self.anchors.insert(anchor, AnchorSelection { code, cells });
        debug!(anchor, code = code.value(), active = self.active.len(), "Applied pattern");
        Ok(true)
    }

    /// Appends a point to the boundary polygon, or with `remove` drops it.
    ///
    /// Anchors are never added. Returns whether the state changed.
    pub fn select_point(
        &mut self,
        lattice: &Lattice,
        point: PointId,
        remove: bool,
    ) -> CarveResult<bool> {
        self.check_lattice(lattice)?;
        lattice.point(point)?;
        if lattice.is_anchor(point) {
            return Ok(false);
        }

        let position = self.boundary.iter().position(|&p| p == point);
        match (remove, position) {
            (true, Some(index)) => {
                self.boundary.remove(index);
            }
            (false, None) => self.boundary.push(point),
            _ => return Ok(false),
        }
        debug!(point, remove, boundary = self.boundary.len(), "Updated boundary");
        Ok(true)
    }

    /// Number of pattern codes offered for `anchor`: the table size of the
    /// lattice kind if the anchor is selected, otherwise 0. Records the anchor
    /// for [`apply_pending_pattern`](Self::apply_pending_pattern).
    pub fn context_candidates(&mut self, anchor: PointId) -> usize {
        self.pending_anchor = Some(anchor);
        if self.anchors.contains_key(&anchor) {
            self.kind.pattern_count()
        } else {
            0
        }
    }

    /// Anchor recorded by the last context query.
    #[inline]
    pub fn pending_anchor(&self) -> Option<PointId> {
        self.pending_anchor
    }

    /// Applies `code` to the anchor recorded by the last context query.
    pub fn apply_pending_pattern(&mut self, lattice: &Lattice, code: i64) -> CarveResult<bool> {
        match self.pending_anchor {
            Some(anchor) => self.set_pattern(lattice, anchor, code),
            None => Ok(false),
        }
    }

    /// Returns true if the anchor is selected.
    #[inline]
    pub fn is_selected(&self, anchor: PointId) -> bool {
        self.anchors.contains_key(&anchor)
    }

    /// Pattern code of a selected anchor.
    pub fn pattern_of(&self, anchor: PointId) -> Option<PatternCode> {
        self.anchors.get(&anchor).map(|a| a.code)
    }

    /// Cells an anchor currently contributes, in slot order.
    pub fn contribution(&self, anchor: PointId) -> Option<&[CellId]> {
        self.anchors.get(&anchor).map(|a| a.cells.as_slice())
    }

    /// Selected anchors with their codes, ascending by id.
    pub fn selected_anchors(&self) -> impl Iterator<Item = (PointId, PatternCode)> + '_ {
        self.anchors.iter().map(|(&id, a)| (id, a.code))
    }

    /// Number of selected anchors.
    #[inline]
    pub fn anchor_count(&self) -> usize {
        self.anchors.len()
    }

    /// Active cells, ascending by id.
    pub fn active_cells(&self) -> Vec<CellId> {
        self.active.keys().copied().collect()
    }

    /// Number of active cells.
    #[inline]
    pub fn active_cell_count(&self) -> usize {
        self.active.len()
    }

    /// Returns true if the cell is active.
    #[inline]
    pub fn is_active(&self, cell: CellId) -> bool {
        self.active.contains_key(&cell)
    }

    /// Ordered point-mode boundary.
    #[inline]
    pub fn boundary_points(&self) -> &[PointId] {
        &self.boundary
    }

    /// Returns true if neither anchors nor boundary points are selected.
    pub fn is_empty(&self) -> bool {
        self.anchors.is_empty() && self.boundary.is_empty()
    }

    /// Drops every selection.
    pub fn clear(&mut self) {
        self.anchors.clear();
        self.active.clear();
        self.boundary.clear();
        self.pending_anchor = None;
    }
}
