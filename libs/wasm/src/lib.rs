//! WASM-facing entry points for the lattice carving session.
//!
//! This crate is compiled to a `cdylib` and consumed from JavaScript via
//! `wasm-bindgen`. Every exported method has an `_internal` twin returning
//! Rust errors, which native tests use to avoid depending on a JS host.
//!
//! ```
//! use carve_wasm::WasmCarveSession;
//!
//! let mut session = WasmCarveSession::new_internal(4).unwrap();
//! session.select_internal(20, false).unwrap();
//! assert!(session.export_ply_internal().unwrap().starts_with("ply"));
//! ```

mod mesh_handle;

pub use mesh_handle::MeshHandle;

use carve_core::{
    export, CarveError, CarveResult, CarveSession, ExportArtifact, LatticeKind, SelectionMode,
    SessionConfig,
};
use serde::Serialize;
use wasm_bindgen::prelude::*;

/// Installs a panic hook that forwards Rust panics to the browser console.
///
/// # Examples
/// ```no_run
/// // In JavaScript: import and call once at startup.
/// // import { init_panic_hook } from "carve_wasm";
/// // init_panic_hook();
/// ```
#[wasm_bindgen]
pub fn init_panic_hook() {
    #[cfg(feature = "console_error_panic_hook")]
    console_error_panic_hook::set_once();
}

fn to_js(err: impl std::fmt::Display) -> JsValue {
    JsValue::from_str(&err.to_string())
}

/// Snapshot of the selection, serialized to JSON for the host UI.
#[derive(Debug, Serialize)]
pub struct SelectionSummary {
    pub kind: LatticeKind,
    pub mode: SelectionMode,
    /// (anchor, pattern code) pairs.
    pub anchors: Vec<(usize, usize)>,
    pub active_cells: Vec<usize>,
    pub boundary: Vec<usize>,
}

/// A carving session owned by JavaScript.
///
/// # Examples
/// ```no_run
/// // In JavaScript:
/// // const session = new WasmCarveSession(10);
/// // session.init_lattice("hex");
/// // session.select(anchorId, false);
/// // const ply = session.export_ply();
/// ```
#[wasm_bindgen]
#[derive(Debug)]
pub struct WasmCarveSession {
    inner: CarveSession,
}

#[wasm_bindgen]
impl WasmCarveSession {
    /// Creates a quad, cell-mode session over an N×N grid.
    ///
    /// # Errors
    /// Returns a JavaScript error for unsupported grid sizes.
    #[wasm_bindgen(constructor)]
    pub fn new(grid_size: usize) -> Result<WasmCarveSession, JsValue> {
        Self::new_internal(grid_size).map_err(to_js)
    }

    /// Creates a session from a JSON `SessionConfig`; missing fields take
    /// their defaults.
    pub fn from_config(json: &str) -> Result<WasmCarveSession, JsValue> {
        let config: SessionConfig = serde_json::from_str(json).map_err(to_js)?;
        Self::from_config_internal(config).map_err(to_js)
    }

    /// Rebuilds the lattice as `"quad"` or `"hex"`.
    pub fn init_lattice(&mut self, kind: &str) -> Result<(), JsValue> {
        let kind: LatticeKind = kind.parse().map_err(|e: String| JsValue::from_str(&e))?;
        self.inner.init_lattice(kind).map_err(to_js)
    }

    /// Switches to `"cell"` or `"point"` selection.
    pub fn init_mode(&mut self, mode: &str) -> Result<(), JsValue> {
        let mode: SelectionMode = mode.parse().map_err(|e: String| JsValue::from_str(&e))?;
        self.inner.init_mode(mode);
        Ok(())
    }

    /// Selects or removes an anchor (cell mode) or point (point mode).
    pub fn select(&mut self, id: usize, remove: bool) -> Result<bool, JsValue> {
        self.select_internal(id, remove).map_err(to_js)
    }

    /// Sets the pattern code of a selected anchor.
    pub fn apply_pattern(&mut self, anchor: usize, code: i32) -> Result<bool, JsValue> {
        self.inner
            .apply_pattern(anchor, i64::from(code))
            .map_err(to_js)
    }

    /// Number of pattern codes for the context menu of `point`.
    pub fn context_candidate_count(&mut self, point: usize) -> usize {
        self.inner.context_candidate_count(point)
    }

    /// Applies a pattern chosen from the last context menu.
    pub fn apply_context_pattern(&mut self, code: i32) -> Result<bool, JsValue> {
        self.inner
            .apply_context_pattern(i64::from(code))
            .map_err(to_js)
    }

    /// Exports the selection as an ASCII PLY string.
    pub fn export_ply(&self) -> Result<String, JsValue> {
        self.export_ply_internal().map_err(to_js)
    }

    /// Exports the selection as GPU buffers.
    pub fn export_mesh(&self) -> Result<MeshHandle, JsValue> {
        self.export_mesh_internal().map_err(to_js)
    }

    /// The full lattice as GPU buffers; vertex `i` is point `i`, triangle `i`
    /// is cell `i`.
    pub fn lattice_mesh(&self) -> MeshHandle {
        MeshHandle::from_mesh(&self.inner.lattice_mesh())
    }

    /// Lattice point positions as [x, y, z, ...].
    pub fn point_positions(&self) -> Vec<f32> {
        self.inner
            .lattice()
            .points()
            .iter()
            .flat_map(|p| [p.position.x as f32, p.position.y as f32, p.position.z as f32])
            .collect()
    }

    /// First anchor id; every id at or above it is an anchor.
    pub fn base_count(&self) -> usize {
        self.inner.lattice().base_count()
    }

    /// Current selection as JSON.
    pub fn selection_json(&self) -> Result<String, JsValue> {
        serde_json::to_string(&self.selection_summary()).map_err(to_js)
    }
}

impl WasmCarveSession {
    /// Host-only constructor exposing Rust errors.
    pub fn new_internal(grid_size: usize) -> CarveResult<Self> {
        Self::from_config_internal(SessionConfig {
            grid_size,
            ..SessionConfig::default()
        })
    }

    pub fn from_config_internal(config: SessionConfig) -> CarveResult<Self> {
        Ok(Self {
            inner: CarveSession::new(config)?,
        })
    }

    pub fn select_internal(&mut self, id: usize, remove: bool) -> CarveResult<bool> {
        self.inner.select(id, remove)
    }

    pub fn export_ply_internal(&self) -> CarveResult<String> {
        let artifact = self.inner.export()?;
        export::to_ply_string(artifact.mesh())
    }

    pub fn export_mesh_internal(&self) -> CarveResult<MeshHandle> {
        let artifact = self.inner.export()?;
        Ok(MeshHandle::compacted(artifact.mesh()))
    }

    /// Export warnings as strings, for hosts that want to surface them.
    pub fn export_warnings_internal(&self) -> CarveResult<Vec<String>> {
        let artifact: ExportArtifact = self.inner.export()?;
        Ok(artifact.warnings().iter().map(CarveError::to_string).collect())
    }

    pub fn selection_summary(&self) -> SelectionSummary {
        let selection = self.inner.selection();
        SelectionSummary {
            kind: self.inner.kind(),
            mode: self.inner.mode(),
            anchors: selection
                .selected_anchors()
                .map(|(id, code)| (id, code.value()))
                .collect(),
            active_cells: selection.active_cells(),
            boundary: selection.boundary_points().to_vec(),
        }
    }

    /// The wrapped session.
    pub fn session(&self) -> &CarveSession {
        &self.inner
    }
}
