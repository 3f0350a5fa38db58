//! Tests for the centralized configuration constants.

use super::*;

/// Ensures default configuration is sane.
///
/// # Examples
/// ```
/// use config::constants::LatticeConfig;
/// let cfg = LatticeConfig::default();
/// assert!(cfg.tolerance > 0.0);
/// ```
#[test]
fn default_config_is_valid() {
    let cfg = LatticeConfig::default();
    assert!(cfg.tolerance > 0.0);
    assert!(cfg.grid_size >= MIN_GRID_SIZE);
    assert!(cfg.grid_size <= MAX_GRID_SIZE);
}

/// Validates the builder rejects invalid values.
///
/// # Examples
/// ```
/// use config::constants::LatticeConfig;
/// assert!(LatticeConfig::new(1, 1.0e-9).is_err());
/// ```
#[test]
fn new_validates_inputs() {
    assert_eq!(
        LatticeConfig::new(1, 1.0e-9).unwrap_err(),
        ConfigError::InvalidGridSize(1)
    );
    assert_eq!(
        LatticeConfig::new(MAX_GRID_SIZE + 1, 1.0e-9).unwrap_err(),
        ConfigError::InvalidGridSize(MAX_GRID_SIZE + 1)
    );
    assert_eq!(
        LatticeConfig::new(4, 0.0).unwrap_err(),
        ConfigError::InvalidTolerance(0.0)
    );
}

#[test]
fn hex_width_rounds_odd_sizes_down() {
    assert_eq!(LatticeConfig::new(4, 1.0e-9).unwrap().hex_index_width(), 12);
    assert_eq!(LatticeConfig::new(5, 1.0e-9).unwrap().hex_index_width(), 12);
    assert_eq!(LatticeConfig::new(2, 1.0e-9).unwrap().hex_index_width(), 6);
}

#[test]
fn error_display_names_the_field() {
    assert!(ConfigError::InvalidGridSize(0)
        .to_string()
        .contains("grid_size"));
    assert!(ConfigError::InvalidTolerance(-1.0)
        .to_string()
        .contains("tolerance"));
}
