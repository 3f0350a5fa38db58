//! # Geometry Kernel
//!
//! Planar predicates and triangulation used by the lattice and the point-mode
//! boundary extractor.
//!
//! ## Algorithms
//!
//! - **Predicates**: adaptive-precision orientation and in-circle tests
//! - **Triangulation**: Bowyer–Watson Delaunay
//! - **Enclosure**: crossing-number point-in-polygon, boundary excluded

mod delaunay;
mod polygon;


pub use delaunay::delaunay;
pub use polygon::{point_in_polygon, point_on_segment, signed_area};

use glam::DVec2;
use robust::Coord;

#[inline]
fn coord(p: DVec2) -> Coord<f64> {
    Coord { x: p.x, y: p.y }
}

/// Twice the signed area of triangle `abc`; positive when counter-clockwise.
#[inline]
pub fn orient2d(a: DVec2, b: DVec2, c: DVec2) -> f64 {
    robust::orient2d(coord(a), coord(b), coord(c))
}

/// Positive when `d` lies strictly inside the circumcircle of the
/// counter-clockwise triangle `abc`.
#[inline]
pub fn incircle(a: DVec2, b: DVec2, c: DVec2, d: DVec2) -> f64 {
    robust::incircle(coord(a), coord(b), coord(c), coord(d))
}
