//! # Carve Core
//!
//! Selection and topology reconstruction engine for carving regions out of a
//! regular lattice.
//!
//! ## Architecture
//!
//! ```text
//! lattice (points, cells, anchor adjacency)
//!     → selection (anchors + pattern codes, or a boundary polygon)
//!     → reconstruct / boundary (exportable PolyMesh)
//!     → export (PLY / OBJ)
//! ```
//!
//! [`CarveSession`] owns one lattice and its selection and is the only
//! surface hosts need.
//!
//! ## Usage
//!
//! ```rust
//! use carve_core::{CarveSession, SessionConfig};
//!
//! let mut session = CarveSession::new(SessionConfig {
//!     grid_size: 4,
//!     ..SessionConfig::default()
//! })?;
//! let anchor = session.lattice().anchor_ids().start;
//! session.select(anchor, false)?;
//! session.apply_pattern(anchor, 5)?;
//!
//! let artifact = session.export()?;
//! assert_eq!(artifact.mesh().face_count(), 1);
//! # Ok::<(), carve_core::CarveError>(())
//! ```

pub mod boundary;
pub mod error;
pub mod export;
pub mod geometry;
pub mod lattice;
pub mod mesh;
pub mod pattern;
pub mod reconstruct;
pub mod selection;
pub mod session;

pub use error::{CarveError, CarveResult};
pub use lattice::{CellId, Lattice, LatticeKind, PointId};
pub use mesh::{Face, PolyMesh};
pub use pattern::{PatternCode, PatternTable};
pub use session::{CarveSession, ExportArtifact, SelectionMode, SessionConfig};
