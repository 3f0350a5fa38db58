//! # Pattern Tables
//!
//! Static lookup from (lattice kind, pattern code) to the adjacency slots an
//! anchor drops from its selection. Code 0 keeps every surrounding cell.
//!
//! Slots refer to the anchor-local order produced by
//! [`resolve_adjacency`](crate::lattice::resolve_adjacency): ascending by
//! cell bounding-box center x, then y.

#[cfg(test)]
mod tests;

use crate::lattice::{CellId, LatticeKind};
use config::constants::{HEX_PATTERN_COUNT, QUAD_PATTERN_COUNT};

/// Excluded slots per quad pattern code.
const QUAD_EXCLUSIONS: [&[usize]; QUAD_PATTERN_COUNT] = [
    &[],
    &[0, 1],
    &[0, 2],
    &[2, 3],
    &[1, 3],
    &[0, 1, 2],
    &[0, 2, 3],
    &[1, 2, 3],
    &[0, 1, 3],
];

/// Excluded slots per hex pattern code.
const HEX_EXCLUSIONS: [&[usize]; HEX_PATTERN_COUNT] = [
    &[],
    &[0, 2, 4],
    &[0, 1, 2],
    &[0, 1, 3],
    &[1, 3, 5],
    &[3, 4, 5],
    &[2, 4, 5],
    &[0, 2, 4, 5],
    &[0, 1, 2, 4],
    &[0, 1, 2, 3],
    &[0, 1, 3, 5],
    &[1, 3, 4, 5],
    &[2, 3, 4, 5],
    &[0, 2, 3, 4, 5],
    &[0, 1, 2, 4, 5],
    &[0, 1, 2, 3, 4],
    &[0, 1, 2, 3, 5],
    &[0, 1, 3, 4, 5],
    &[1, 2, 3, 4, 5],
];

/// Quad codes whose descending vertex sort yields the opposite winding for
/// a three-point cut.
const QUAD_TRIANGLE_FLIPS: [usize; 4] = [3, 4, 6, 7];

/// A pattern code already reduced modulo the table size of its kind.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default)]
pub struct PatternCode(usize);

impl PatternCode {
    /// Code 0: every surrounding cell active.
    pub const FULL: PatternCode = PatternCode(0);

    /// Wraps an arbitrary integer into the table of `kind`. Negative input
    /// wraps with the Euclidean remainder.
    ///
    /// # Example
    ///
    /// ```rust
    /// use carve_core::lattice::LatticeKind;
    /// use carve_core::pattern::PatternCode;
    ///
    /// assert_eq!(PatternCode::wrap(LatticeKind::Quad, 14).value(), 5);
    /// assert_eq!(PatternCode::wrap(LatticeKind::Quad, -1).value(), 8);
    /// assert_eq!(PatternCode::wrap(LatticeKind::Hex, 19).value(), 0);
    /// ```
    pub fn wrap(kind: LatticeKind, code: i64) -> Self {
        let count = kind.pattern_count() as i64;
        PatternCode(code.rem_euclid(count) as usize)
    }

    /// Numeric value of the code.
    #[inline]
    pub fn value(self) -> usize {
        self.0
    }
}

impl std::fmt::Display for PatternCode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Lookup over the two static exclusion tables.
pub struct PatternTable;

impl PatternTable {
    /// Slots excluded by `code` for `kind`.
    pub fn excluded(kind: LatticeKind, code: PatternCode) -> &'static [usize] {
        let table: &[&'static [usize]] = match kind {
            LatticeKind::Quad => &QUAD_EXCLUSIONS,
            LatticeKind::Hex => &HEX_EXCLUSIONS,
        };
        table[code.value() % table.len()]
    }

    /// Cells of `adjacency` that survive `code`, in slot order.
    ///
    /// # Example
    ///
    /// ```rust
    /// use carve_core::lattice::LatticeKind;
    /// use carve_core::pattern::{PatternCode, PatternTable};
    ///
    /// let adjacency = [10, 11, 12, 13];
    /// let code = PatternCode::wrap(LatticeKind::Quad, 5);
    /// assert_eq!(PatternTable::active_cells(LatticeKind::Quad, code, &adjacency), vec![13]);
    /// ```
    pub fn active_cells(kind: LatticeKind, code: PatternCode, adjacency: &[CellId]) -> Vec<CellId> {
        let excluded = Self::excluded(kind, code);
        adjacency
            .iter()
            .enumerate()
            .filter(|(slot, _)| !excluded.contains(slot))
            .map(|(_, &cell)| cell)
            .collect()
    }

    /// Whether a reconstructed three-point cut needs its 2nd and 3rd vertex
    /// swapped. Only defined for the quad table.
    pub fn flips_triangle(kind: LatticeKind, code: PatternCode) -> bool {
        kind == LatticeKind::Quad && QUAD_TRIANGLE_FLIPS.contains(&code.value())
    }
}
