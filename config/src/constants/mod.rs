//! Centralized configuration values shared across the lattice carving crates.
//!
//! Each public item in this module documents its purpose and provides a minimal
//! usage example so that downstream crates can remain declarative and avoid
//! scattering literals.

use std::fmt;

// =============================================================================
// PRECISION
// =============================================================================

/// Numerical tolerance used when comparing lattice coordinates.
///
/// # Examples
/// ```
/// use config::constants::EPSILON_TOLERANCE;
/// assert!(EPSILON_TOLERANCE < 1.0e-6);
/// ```
pub const EPSILON_TOLERANCE: f64 = 1.0e-9;

/// Scale of the Delaunay super-triangle relative to the extent of the input
/// points. Large enough that hull triangles are never lost.
///
/// # Examples
/// ```
/// use config::constants::SUPER_TRIANGLE_SCALE;
/// assert!(SUPER_TRIANGLE_SCALE >= 100.0);
/// ```
pub const SUPER_TRIANGLE_SCALE: f64 = 1.0e4;

// =============================================================================
// LATTICE GEOMETRY
// =============================================================================

/// Default number of base points along one side of the lattice.
///
/// # Examples
/// ```
/// use config::constants::DEFAULT_GRID_SIZE;
/// // A quad lattice of size N carries (N - 1)^2 anchors
/// let anchors = (DEFAULT_GRID_SIZE - 1) * (DEFAULT_GRID_SIZE - 1);
/// assert!(anchors > 0);
/// ```
pub const DEFAULT_GRID_SIZE: usize = 10;

/// Smallest grid size that still yields at least one anchor in both kinds.
///
/// # Examples
/// ```
/// use config::constants::MIN_GRID_SIZE;
/// assert_eq!(MIN_GRID_SIZE, 2);
/// ```
pub const MIN_GRID_SIZE: usize = 2;

/// Largest accepted grid size. The hex lattice triples the index grid, so
/// this keeps point counts in the low hundreds of thousands.
///
/// # Examples
/// ```
/// use config::constants::{MAX_GRID_SIZE, MIN_GRID_SIZE};
/// assert!(MAX_GRID_SIZE > MIN_GRID_SIZE);
/// ```
pub const MAX_GRID_SIZE: usize = 256;

/// Multiplier from the configured grid size to the hex index grid width.
///
/// # Examples
/// ```
/// use config::constants::HEX_GRID_FACTOR;
/// let width = 4 * HEX_GRID_FACTOR;
/// assert_eq!(width, 12);
/// ```
pub const HEX_GRID_FACTOR: usize = 3;

/// Vertical distance between hex lattice rows, `sin(60°)` for unit spacing.
///
/// # Examples
/// ```
/// use config::constants::HEX_ROW_HEIGHT;
/// let expected = (std::f64::consts::PI / 3.0).sin();
/// assert!((HEX_ROW_HEIGHT - expected).abs() < 1.0e-12);
/// ```
pub const HEX_ROW_HEIGHT: f64 = 0.866_025_403_784_438_6;

/// Horizontal distance between neighbouring hex index columns.
///
/// # Examples
/// ```
/// use config::constants::HEX_COLUMN_WIDTH;
/// assert_eq!(HEX_COLUMN_WIDTH * 2.0, 1.0);
/// ```
pub const HEX_COLUMN_WIDTH: f64 = 0.5;

// =============================================================================
// PATTERN TABLES
// =============================================================================

/// Number of cells surrounding a quad anchor.
///
/// # Examples
/// ```
/// use config::constants::QUAD_SLOT_COUNT;
/// assert_eq!(QUAD_SLOT_COUNT, 4);
/// ```
pub const QUAD_SLOT_COUNT: usize = 4;

/// Number of cells surrounding a hex anchor.
///
/// # Examples
/// ```
/// use config::constants::HEX_SLOT_COUNT;
/// assert_eq!(HEX_SLOT_COUNT, 6);
/// ```
pub const HEX_SLOT_COUNT: usize = 6;

/// Number of pattern codes defined for quad anchors (code 0 included).
///
/// # Examples
/// ```
/// use config::constants::QUAD_PATTERN_COUNT;
/// assert_eq!(17 % QUAD_PATTERN_COUNT, 8);
/// ```
pub const QUAD_PATTERN_COUNT: usize = 9;

/// Number of pattern codes defined for hex anchors (code 0 included).
///
/// # Examples
/// ```
/// use config::constants::HEX_PATTERN_COUNT;
/// assert_eq!(20 % HEX_PATTERN_COUNT, 1);
/// ```
pub const HEX_PATTERN_COUNT: usize = 19;

/// First pattern code whose reconstructed shape keeps the anchor as a vertex.
///
/// # Examples
/// ```
/// use config::constants::ANCHOR_VERTEX_MIN_CODE;
/// assert!(ANCHOR_VERTEX_MIN_CODE < 9);
/// ```
pub const ANCHOR_VERTEX_MIN_CODE: usize = 5;

// =============================================================================
// LATTICE CONFIGURATION
// =============================================================================

/// Validated lattice dimensions shared between crates.
///
/// # Examples
/// ```
/// use config::constants::LatticeConfig;
/// let config = LatticeConfig::default();
/// assert!(config.grid_size >= 2);
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LatticeConfig {
    /// Number of base points along one side of the lattice.
    pub grid_size: usize,
    /// Tolerance propagated into coordinate comparisons.
    pub tolerance: f64,
}

impl LatticeConfig {
    /// Builds a configuration enforcing strict validation of the supplied
    /// grid size and tolerance.
    ///
    /// # Examples
    /// ```
    /// use config::constants::LatticeConfig;
    /// let cfg = LatticeConfig::new(4, 1.0e-6).expect("valid config");
    /// assert_eq!(cfg.grid_size, 4);
    /// ```
    pub fn new(grid_size: usize, tolerance: f64) -> Result<Self, ConfigError> {
        if !(MIN_GRID_SIZE..=MAX_GRID_SIZE).contains(&grid_size) {
            return Err(ConfigError::InvalidGridSize(grid_size));
        }
        if tolerance <= 0.0 {
            return Err(ConfigError::InvalidTolerance(tolerance));
        }
        Ok(Self {
            grid_size,
            tolerance,
        })
    }

    /// Width of the hex index grid derived from the grid size. Odd sizes are
    /// rounded down so hexagons tile the rows evenly.
    ///
    /// # Examples
    /// ```
    /// use config::constants::LatticeConfig;
    /// assert_eq!(LatticeConfig::new(5, 1.0e-9).unwrap().hex_index_width(), 12);
    /// ```
    pub fn hex_index_width(&self) -> usize {
        let even = if self.grid_size % 2 == 0 {
            self.grid_size
        } else {
            self.grid_size - 1
        };
        even * HEX_GRID_FACTOR
    }
}

impl Default for LatticeConfig {
    fn default() -> Self {
        Self {
            grid_size: DEFAULT_GRID_SIZE,
            tolerance: EPSILON_TOLERANCE,
        }
    }
}

/// Error returned when invalid configuration values are provided.
#[derive(Debug, PartialEq)]
pub enum ConfigError {
    /// Raised when the grid size is outside `MIN_GRID_SIZE..=MAX_GRID_SIZE`.
    InvalidGridSize(usize),
    /// Raised when tolerance is zero or negative.
    InvalidTolerance(f64),
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::InvalidGridSize(value) => {
                write!(
                    f,
                    "grid_size must be within {MIN_GRID_SIZE}..={MAX_GRID_SIZE}: {value}"
                )
            }
            ConfigError::InvalidTolerance(value) => {
                write!(f, "tolerance must be positive: {value}")
            }
        }
    }
}

impl std::error::Error for ConfigError {}

#[cfg(test)]
mod tests;
