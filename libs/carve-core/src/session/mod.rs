//! # Carve Session
//!
//! One explicitly owned session holding the lattice and its selection. All
//! host-facing operations go through [`CarveSession`]; rendering and picking
//! are injected through the [`Picker`] capability trait.
//!
//! ## Lifecycle
//!
//! ```text
//! new(config) -> init_lattice / init_mode -> select / apply_pattern -> export
//! ```
//!
//! Switching lattice kind builds the new lattice first and only then swaps
//! lattice and selection together, so a failed build leaves the session as
//! it was. Switching mode clears the selection.

mod interaction;

#[cfg(test)]
mod tests;

pub use interaction::{Modifiers, Picker, PointerButton, PointerOutcome};

use std::path::Path;

use crate::boundary::{extract, EnclosedTriangulation};
use crate::error::{CarveError, CarveResult};
use crate::export;
use crate::lattice::{Lattice, LatticeKind, PointId};
use crate::mesh::PolyMesh;
use crate::reconstruct::{reconstruct, Reconstruction};
use crate::selection::SelectionStore;
use config::constants::{LatticeConfig, DEFAULT_GRID_SIZE, EPSILON_TOLERANCE};
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

/// What a selection event targets.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SelectionMode {
    /// Anchors with per-anchor pattern codes.
    #[default]
    Cell,
    /// An ordered boundary polygon of base points.
    Point,
}

impl SelectionMode {
    /// Lower-case name, matching the serde representation.
    pub const fn name(self) -> &'static str {
        match self {
            SelectionMode::Cell => "cell",
            SelectionMode::Point => "point",
        }
    }
}

impl std::str::FromStr for SelectionMode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "cell" => Ok(SelectionMode::Cell),
            "point" => Ok(SelectionMode::Point),
            other => Err(format!("unknown selection mode '{other}'")),
        }
    }
}

/// Runtime session configuration.
///
/// # Example
///
/// ```rust
/// use carve_core::session::SessionConfig;
///
/// let config: SessionConfig = serde_json::from_str(r#"{"kind": "hex"}"#).unwrap();
/// assert_eq!(config.grid_size, 10);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SessionConfig {
    pub grid_size: usize,
    pub kind: LatticeKind,
    pub mode: SelectionMode,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            grid_size: DEFAULT_GRID_SIZE,
            kind: LatticeKind::default(),
            mode: SelectionMode::default(),
        }
    }
}

impl SessionConfig {
    /// Validated lattice parameters.
    pub fn lattice_config(&self) -> CarveResult<LatticeConfig> {
        Ok(LatticeConfig::new(self.grid_size, EPSILON_TOLERANCE)?)
    }
}

/// The exportable artifact of a session.
#[derive(Debug)]
pub enum ExportArtifact {
    /// Cell mode: reconstructed cut faces over the full point array.
    CellMesh(Reconstruction),
    /// Point mode: triangulated interior of the boundary polygon.
    Enclosed(EnclosedTriangulation),
}

impl ExportArtifact {
    /// The mesh to write out.
    pub fn mesh(&self) -> &PolyMesh {
        match self {
            ExportArtifact::CellMesh(r) => &r.mesh,
            ExportArtifact::Enclosed(e) => &e.mesh,
        }
    }

    /// Warnings recorded while building the artifact.
    pub fn warnings(&self) -> &[CarveError] {
        match self {
            ExportArtifact::CellMesh(r) => &r.warnings,
            ExportArtifact::Enclosed(_) => &[],
        }
    }
}

/// An interactive carving session.
#[derive(Debug)]
pub struct CarveSession {
    config: SessionConfig,
    lattice: Lattice,
    store: SelectionStore,
    /// Remove flag of the drag in progress, if any.
    drag: Option<bool>,
}

impl CarveSession {
    /// Creates a session and builds its initial lattice.
    ///
    /// # Errors
    ///
    /// `InvalidConfig` for grid sizes outside the supported range.
    pub fn new(config: SessionConfig) -> CarveResult<Self> {
        let lattice = Lattice::build(config.kind, config.lattice_config()?)?;
        info!(
            kind = config.kind.name(),
            mode = config.mode.name(),
            grid_size = config.grid_size,
            "Created carve session"
        );
        Ok(Self {
            config,
            store: SelectionStore::new(config.kind),
            lattice,
            drag: None,
        })
    }

    /// Rebuilds the lattice as `kind`, discarding the selection.
    pub fn init_lattice(&mut self, kind: LatticeKind) -> CarveResult<()> {
        let lattice = Lattice::build(kind, self.config.lattice_config()?)?;
        self.lattice = lattice;
        self.store = SelectionStore::new(kind);
        self.config.kind = kind;
        self.drag = None;
        debug!(kind = kind.name(), "Switched lattice");
        Ok(())
    }

    /// Switches the selection mode, discarding the selection.
    pub fn init_mode(&mut self, mode: SelectionMode) {
        self.store.clear();
        self.config.mode = mode;
        self.drag = None;
        debug!(mode = mode.name(), "Switched selection mode");
    }

    /// Selects (or with `remove` unselects) an anchor in cell mode or a
    /// boundary point in point mode. Returns whether the selection changed.
    pub fn select(&mut self, id: PointId, remove: bool) -> CarveResult<bool> {
        match self.config.mode {
            SelectionMode::Cell => self.store.select_anchor(&self.lattice, id, remove),
            SelectionMode::Point => self.store.select_point(&self.lattice, id, remove),
        }
    }

    /// Sets the pattern code of a selected anchor.
    pub fn apply_pattern(&mut self, anchor: PointId, code: i64) -> CarveResult<bool> {
        self.store.set_pattern(&self.lattice, anchor, code)
    }

    /// Number of pattern codes to offer for `point`; 0 unless it is a
    /// selected anchor. Remembers the point for
    /// [`apply_context_pattern`](Self::apply_context_pattern).
    pub fn context_candidate_count(&mut self, point: PointId) -> usize {
        self.store.context_candidates(point)
    }

    /// Applies `code` to the point of the last context query.
    pub fn apply_context_pattern(&mut self, code: i64) -> CarveResult<bool> {
        self.store.apply_pending_pattern(&self.lattice, code)
    }

    /// Builds the exportable artifact for the current mode.
    ///
    /// # Errors
    ///
    /// `NoSelection` when nothing is selected; the session is unchanged.
    pub fn export(&self) -> CarveResult<ExportArtifact> {
        let artifact = match self.config.mode {
            SelectionMode::Cell => ExportArtifact::CellMesh(reconstruct(&self.lattice, &self.store)?),
            SelectionMode::Point => {
                ExportArtifact::Enclosed(extract(&self.lattice, self.store.boundary_points())?)
            }
        };
        info!(
            mode = self.config.mode.name(),
            vertices = artifact.mesh().vertex_count(),
            faces = artifact.mesh().face_count(),
            warnings = artifact.warnings().len(),
            "Exported selection"
        );
        Ok(artifact)
    }

    /// Exports and writes the artifact to `path`; the extension picks the
    /// format.
    pub fn save(&self, path: &Path) -> CarveResult<ExportArtifact> {
        export::ExportFormat::from_path(path)?;
        let artifact = self.export()?;
        export::save(artifact.mesh(), path)?;
        Ok(artifact)
    }

    /// The base lattice as a triangle mesh, for renderers.
    pub fn lattice_mesh(&self) -> PolyMesh {
        let vertices = self.lattice.points().iter().map(|p| p.position).collect();
        let mut mesh = PolyMesh::with_vertices(vertices);
        for cell in self.lattice.cells() {
            let [a, b, c] = cell.points;
            mesh.add_triangle(a as u32, b as u32, c as u32);
        }
        mesh
    }

    #[inline]
    pub fn config(&self) -> SessionConfig {
        self.config
    }

    #[inline]
    pub fn mode(&self) -> SelectionMode {
        self.config.mode
    }

    #[inline]
    pub fn kind(&self) -> LatticeKind {
        self.config.kind
    }

    #[inline]
    pub fn lattice(&self) -> &Lattice {
        &self.lattice
    }

    #[inline]
    pub fn selection(&self) -> &SelectionStore {
        &self.store
    }
}
