//! # Config Crate
//!
//! Centralized configuration constants for the lattice carving engine.
//! Lattice geometry, pattern table sizes and numeric tolerances are defined
//! here so the engine and the browser facade agree on them.
//!
//! ## Usage
//!
//! ```rust
//! use config::constants::{DEFAULT_GRID_SIZE, QUAD_PATTERN_COUNT, HEX_PATTERN_COUNT};
//!
//! // Pattern codes wrap modulo the table size of the lattice kind
//! let code = 11 % QUAD_PATTERN_COUNT;
//! assert_eq!(code, 2);
//!
//! assert!(DEFAULT_GRID_SIZE >= 2);
//! assert!(HEX_PATTERN_COUNT > QUAD_PATTERN_COUNT);
//! ```
//!
//! ## Design Principles
//!
//! - **Single Source of Truth**: All constants defined once, used everywhere
//! - **Browser-Safe**: No platform-specific values
//! - **Well-Documented**: Every constant has clear documentation

pub mod constants;
