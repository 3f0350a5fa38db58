//! # Lattice
//!
//! Regular point lattices (quad or hex), their triangle cells and the
//! anchor adjacency that selections are expressed against.
//!
//! ## Id Layout
//!
//! Base points are numbered first, anchors last. Every anchor id is
//! `>= base_count()`, which lets export rules tell the two roles apart
//! from the id alone.
//!
//! ```text
//! 0 .. base_count                  base points (regular grid)
//! base_count .. point_count        anchors (one per cell cluster)
//! ```

mod adjacency;
mod hex;
mod quad;


pub use adjacency::{cell_bounds_center, resolve_adjacency};
pub use hex::enumerate_hex_anchors;

use std::collections::BTreeMap;

use crate::error::{CarveError, CarveResult};
use config::constants::{
    LatticeConfig, HEX_PATTERN_COUNT, HEX_SLOT_COUNT, QUAD_PATTERN_COUNT, QUAD_SLOT_COUNT,
};
use glam::{DVec2, DVec3};
use serde::{Deserialize, Serialize};
use tracing::debug;

/// Dense index of a lattice point.
pub type PointId = usize;

/// Dense index of a lattice cell.
pub type CellId = usize;

/// The two supported lattice kinds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LatticeKind {
    /// Square grid, each quad split into four triangles around its anchor.
    #[default]
    Quad,
    /// Triangular grid grouped into hexagons of six triangles.
    Hex,
}

impl LatticeKind {
    /// Number of cells surrounding every anchor of this kind.
    pub const fn slot_count(self) -> usize {
        match self {
            LatticeKind::Quad => QUAD_SLOT_COUNT,
            LatticeKind::Hex => HEX_SLOT_COUNT,
        }
    }

    /// Number of pattern codes defined for this kind.
    pub const fn pattern_count(self) -> usize {
        match self {
            LatticeKind::Quad => QUAD_PATTERN_COUNT,
            LatticeKind::Hex => HEX_PATTERN_COUNT,
        }
    }

    /// Lower-case name, matching the serde representation.
    pub const fn name(self) -> &'static str {
        match self {
            LatticeKind::Quad => "quad",
            LatticeKind::Hex => "hex",
        }
    }
}

impl std::str::FromStr for LatticeKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "quad" => Ok(LatticeKind::Quad),
            "hex" | "hexagon" => Ok(LatticeKind::Hex),
            other => Err(format!("unknown lattice kind '{other}'")),
        }
    }
}

/// Role of a lattice point.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PointRole {
    /// Point on the regular grid.
    Base,
    /// Synthetic center of a cell cluster; the unit of cell-mode selection.
    Anchor,
}

/// A point of the lattice.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LatticePoint {
    pub id: PointId,
    pub position: DVec3,
    pub role: PointRole,
}

/// A triangle cell, stored counter-clockwise.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Cell {
    pub id: CellId,
    pub points: [PointId; 3],
}

/// Output of the per-kind builders before cross references are derived.
///
/// Positions are ordered base points first, then anchors.
#[derive(Debug, Default)]
pub(crate) struct RawLattice {
    pub positions: Vec<DVec2>,
    pub base_count: usize,
    pub triangles: Vec<[PointId; 3]>,
    pub lines: Vec<Vec<PointId>>,
}

/// A fully built lattice with point/cell cross references.
///
/// Immutable once built; switching kinds builds a new one.
#[derive(Debug, Clone)]
pub struct Lattice {
    kind: LatticeKind,
    config: LatticeConfig,
    points: Vec<LatticePoint>,
    base_count: usize,
    cells: Vec<Cell>,
    point_cells: Vec<Vec<CellId>>,
    adjacency: BTreeMap<PointId, Vec<CellId>>,
    lines: Vec<Vec<PointId>>,
}

impl Lattice {
    /// Builds a lattice of the given kind.
    ///
    /// # Errors
    ///
    /// Returns `InvariantViolation` if any anchor does not end up with the
    /// expected number of surrounding cells.
    ///
    /// # Example
    ///
    /// ```rust
    /// use carve_core::lattice::{Lattice, LatticeKind};
    /// use config::constants::LatticeConfig;
    ///
    /// let config = LatticeConfig::new(4, 1.0e-9).unwrap();
    /// let lattice = Lattice::build(LatticeKind::Quad, config).unwrap();
    /// assert_eq!(lattice.base_count(), 16);
    /// assert_eq!(lattice.anchor_count(), 9);
    /// ```
    pub fn build(kind: LatticeKind, config: LatticeConfig) -> CarveResult<Self> {
        let raw = match kind {
            LatticeKind::Quad => quad::build_quad(config.grid_size),
            LatticeKind::Hex => hex::build_hex(config.hex_index_width()),
        };
        let lattice = Self::assemble(kind, config, raw)?;
        debug!(
            kind = kind.name(),
            grid_size = config.grid_size,
            points = lattice.point_count(),
            anchors = lattice.anchor_count(),
            cells = lattice.cell_count(),
            "Built lattice"
        );
        Ok(lattice)
    }

    fn assemble(kind: LatticeKind, config: LatticeConfig, raw: RawLattice) -> CarveResult<Self> {
        let points: Vec<LatticePoint> = raw
            .positions
            .iter()
            .enumerate()
            .map(|(id, p)| LatticePoint {
                id,
                position: p.extend(0.0),
                role: if id < raw.base_count {
                    PointRole::Base
                } else {
                    PointRole::Anchor
                },
            })
            .collect();

        let mut cells = Vec::with_capacity(raw.triangles.len());
        let mut point_cells = vec![Vec::new(); points.len()];
        for (id, tri) in raw.triangles.into_iter().enumerate() {
            if tri.iter().any(|&p| p >= points.len()) {
                return Err(CarveError::invariant(format!(
                    "cell {id} references a point outside the lattice"
                )));
            }
            let [a, b, c] = tri;
            let ccw = crate::geometry::orient2d(
                raw.positions[a],
                raw.positions[b],
                raw.positions[c],
            );
            if ccw.abs() <= config.tolerance {
                return Err(CarveError::invariant(format!("cell {id} is degenerate")));
            }
            let tri = if ccw > 0.0 { [a, b, c] } else { [a, c, b] };
            for &p in &tri {
                point_cells[p].push(id);
            }
            cells.push(Cell { id, points: tri });
        }

        let mut lattice = Self {
            kind,
            config,
            points,
            base_count: raw.base_count,
            cells,
            point_cells,
            adjacency: BTreeMap::new(),
            lines: raw.lines,
        };

        let mut adjacency = BTreeMap::new();
        for anchor in lattice.anchor_ids() {
            adjacency.insert(anchor, resolve_adjacency(&lattice, anchor)?);
        }
        lattice.adjacency = adjacency;

        Ok(lattice)
    }

    /// Lattice kind.
    #[inline]
    pub fn kind(&self) -> LatticeKind {
        self.kind
    }

    /// Configuration the lattice was built from.
    #[inline]
    pub fn config(&self) -> LatticeConfig {
        self.config
    }

    /// Total number of points (base and anchor).
    #[inline]
    pub fn point_count(&self) -> usize {
        self.points.len()
    }

    /// Number of base points. Every id at or above this value is an anchor.
    #[inline]
    pub fn base_count(&self) -> usize {
        self.base_count
    }

    /// Number of anchors.
    #[inline]
    pub fn anchor_count(&self) -> usize {
        self.points.len() - self.base_count
    }

    /// Number of triangle cells.
    #[inline]
    pub fn cell_count(&self) -> usize {
        self.cells.len()
    }

    /// All points, indexed by id.
    #[inline]
    pub fn points(&self) -> &[LatticePoint] {
        &self.points
    }

    /// All cells, indexed by id.
    #[inline]
    pub fn cells(&self) -> &[Cell] {
        &self.cells
    }

    /// Auxiliary grid lines, for renderers only.
    #[inline]
    pub fn lines(&self) -> &[Vec<PointId>] {
        &self.lines
    }

    /// Anchor ids in ascending order.
    pub fn anchor_ids(&self) -> std::ops::Range<PointId> {
        self.base_count..self.points.len()
    }

    /// Returns true if the id falls in the anchor range.
    #[inline]
    pub fn is_anchor(&self, id: PointId) -> bool {
        id >= self.base_count && id < self.points.len()
    }

    /// Looks up a point.
    pub fn point(&self, id: PointId) -> CarveResult<&LatticePoint> {
        self.points.get(id).ok_or(CarveError::UnknownPoint { id })
    }

    /// Looks up a cell.
    pub fn cell(&self, id: CellId) -> CarveResult<&Cell> {
        self.cells.get(id).ok_or(CarveError::UnknownCell { id })
    }

    /// 2D position of a point.
    pub fn position_2d(&self, id: PointId) -> CarveResult<DVec2> {
        Ok(self.point(id)?.position.truncate())
    }

    /// Cells that contain the point as a vertex, in cell-id order.
    pub fn cells_of_point(&self, id: PointId) -> CarveResult<&[CellId]> {
        self.point_cells
            .get(id)
            .map(Vec::as_slice)
            .ok_or(CarveError::UnknownPoint { id })
    }

    /// Ordered adjacency of an anchor; the index into the slice is the slot.
    ///
    /// # Errors
    ///
    /// `UnknownPoint` for ids outside the lattice, `NotAnAnchor` for base
    /// points.
    pub fn adjacency(&self, anchor: PointId) -> CarveResult<&[CellId]> {
        if anchor >= self.points.len() {
            return Err(CarveError::UnknownPoint { id: anchor });
        }
        self.adjacency
            .get(&anchor)
            .map(Vec::as_slice)
            .ok_or(CarveError::NotAnAnchor { id: anchor })
    }

    /// Anchor vertices of a cell (at most one for a well-formed lattice).
    pub fn anchors_of_cell(&self, cell: CellId) -> CarveResult<Vec<PointId>> {
        Ok(self
            .cell(cell)?
            .points
            .iter()
            .copied()
            .filter(|&p| self.is_anchor(p))
            .collect())
    }
}
