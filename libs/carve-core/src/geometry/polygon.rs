//! Polygon predicates.

use super::orient2d;
use glam::DVec2;

/// Returns true if `p` lies on the closed segment `ab`.
pub fn point_on_segment(p: DVec2, a: DVec2, b: DVec2) -> bool {
    orient2d(a, b, p) == 0.0
        && p.x >= a.x.min(b.x)
        && p.x <= a.x.max(b.x)
        && p.y >= a.y.min(b.y)
        && p.y <= a.y.max(b.y)
}

/// Returns true if `p` lies strictly inside the closed polygon. Points on an
/// edge or vertex are outside. Either winding is accepted.
///
/// # Example
///
/// ```rust
/// use carve_core::geometry::point_in_polygon;
/// use glam::DVec2;
///
/// let square = [
///     DVec2::new(0.0, 0.0),
///     DVec2::new(2.0, 0.0),
///     DVec2::new(2.0, 2.0),
///     DVec2::new(0.0, 2.0),
/// ];
/// assert!(point_in_polygon(DVec2::new(1.0, 1.0), &square));
/// assert!(!point_in_polygon(DVec2::new(2.0, 1.0), &square));
/// ```
pub fn point_in_polygon(p: DVec2, polygon: &[DVec2]) -> bool {
    if polygon.len() < 3 {
        return false;
    }

    let n = polygon.len();
    let mut inside = false;
    for i in 0..n {
        let a = polygon[i];
        let b = polygon[(i + 1) % n];
        if point_on_segment(p, a, b) {
            return false;
        }
        if (a.y > p.y) != (b.y > p.y) {
            let side = orient2d(a, b, p);
            let crosses_right = if b.y > a.y { side > 0.0 } else { side < 0.0 };
            if crosses_right {
                inside = !inside;
            }
        }
    }
    inside
}

/// Signed area of a closed polygon; positive when counter-clockwise.
pub fn signed_area(polygon: &[DVec2]) -> f64 {
    let n = polygon.len();
    if n < 3 {
        return 0.0;
    }
    (0..n)
        .map(|i| polygon[i].perp_dot(polygon[(i + 1) % n]))
        .sum::<f64>()
        / 2.0
}
