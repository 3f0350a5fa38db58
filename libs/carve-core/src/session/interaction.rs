//! Pointer interaction.
//!
//! Maps press/move/release events onto session operations. Picking is
//! delegated to the host through [`Picker`].

use super::{CarveSession, SelectionMode};
use crate::error::CarveResult;
use crate::lattice::{CellId, PointId};
use tracing::debug;

/// Screen-space picking supplied by the rendering host.
pub trait Picker {
    /// Cell under the screen position, if any.
    fn pick_cell(&self, x: f64, y: f64) -> Option<CellId>;

    /// Lattice point under the screen position, if any.
    fn pick_point(&self, x: f64, y: f64) -> Option<PointId>;
}

/// Modifier keys held during a pointer event.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Modifiers {
    /// Reserved for camera panning.
    pub shift: bool,
    /// Remove instead of select.
    pub control: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PointerButton {
    Left,
    Right,
}

/// What a pointer event did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PointerOutcome {
    /// Left to the host (camera interaction).
    Ignored,
    /// Nothing under the pointer.
    Missed,
    /// Number of selection changes applied.
    Selected(usize),
    /// A context menu should offer `candidates` pattern codes for `point`.
    ContextMenu { point: PointId, candidates: usize },
}

impl CarveSession {
    /// Handles a button press at screen position (x, y).
    pub fn pointer_press<P: Picker + ?Sized>(
        &mut self,
        picker: &P,
        button: PointerButton,
        x: f64,
        y: f64,
        modifiers: Modifiers,
    ) -> CarveResult<PointerOutcome> {
        if modifiers.shift {
            return Ok(PointerOutcome::Ignored);
        }

        match (button, self.config.mode) {
            (PointerButton::Left, SelectionMode::Cell) => {
                let remove = modifiers.control;
                // A press that misses still starts the drag.
                self.drag = Some(remove);
                let Some(cell) = picker.pick_cell(x, y) else {
                    return Ok(PointerOutcome::Missed);
                };
                self.select_cell_anchors(cell, remove)
            }
            (PointerButton::Left, SelectionMode::Point) => {
                let Some(point) = picker.pick_point(x, y) else {
                    return Ok(PointerOutcome::Missed);
                };
                let changed = self.select(point, modifiers.control)?;
                Ok(PointerOutcome::Selected(usize::from(changed)))
            }
            (PointerButton::Right, _) if modifiers.control => Ok(PointerOutcome::Ignored),
            (PointerButton::Right, SelectionMode::Cell) => {
                let Some(cell) = picker.pick_cell(x, y) else {
                    return Ok(PointerOutcome::Missed);
                };
                let anchors = self.lattice.anchors_of_cell(cell)?;
                match anchors.first() {
                    Some(&point) => Ok(self.context_menu(point)),
                    None => Ok(PointerOutcome::Missed),
                }
            }
            (PointerButton::Right, SelectionMode::Point) => match picker.pick_point(x, y) {
                Some(point) => Ok(self.context_menu(point)),
                None => Ok(PointerOutcome::Missed),
            },
        }
    }

    /// Handles pointer motion; extends a cell-mode drag selection.
    pub fn pointer_move<P: Picker + ?Sized>(
        &mut self,
        picker: &P,
        x: f64,
        y: f64,
    ) -> CarveResult<PointerOutcome> {
        let Some(remove) = self.drag else {
            return Ok(PointerOutcome::Ignored);
        };
        match picker.pick_cell(x, y) {
            Some(cell) => self.select_cell_anchors(cell, remove),
            None => Ok(PointerOutcome::Missed),
        }
    }

    /// Handles a button release; ends any drag.
    pub fn pointer_release(&mut self, button: PointerButton) -> PointerOutcome {
        if button == PointerButton::Left && self.drag.take().is_some() {
            debug!("Drag selection finished");
        }
        PointerOutcome::Ignored
    }

    /// Whether a drag selection is in progress.
    #[inline]
    pub fn is_dragging(&self) -> bool {
        self.drag.is_some()
    }

    fn select_cell_anchors(&mut self, cell: CellId, remove: bool) -> CarveResult<PointerOutcome> {
        let mut changed = 0;
        for anchor in self.lattice.anchors_of_cell(cell)? {
            if self.store.select_anchor(&self.lattice, anchor, remove)? {
                changed += 1;
            }
        }
        Ok(PointerOutcome::Selected(changed))
    }

    fn context_menu(&mut self, point: PointId) -> PointerOutcome {
        let candidates = self.context_candidate_count(point);
        PointerOutcome::ContextMenu { point, candidates }
    }
}
