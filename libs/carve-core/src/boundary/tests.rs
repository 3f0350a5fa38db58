//! # Boundary Extraction Tests

use super::*;
use crate::lattice::LatticeKind;
use approx::assert_relative_eq;
use config::constants::LatticeConfig;
use std::time::{Duration, Instant};

fn quad(n: usize) -> Lattice {
    Lattice::build(LatticeKind::Quad, LatticeConfig::new(n, 1.0e-9).unwrap()).unwrap()
}

fn total_area(mesh: &PolyMesh) -> f64 {
    mesh.faces().iter().map(|f| mesh.face_signed_area(f)).sum()
}

#[test]
fn test_diamond_encloses_two_points() {
    let lattice = quad(4);
    // (0,1) (1,0) (3,2) (2,3)
    let result = extract(&lattice, &[4, 1, 11, 14]).unwrap();

    assert_eq!(result.enclosed, vec![5, 10]);
    assert_eq!(result.mesh.vertex_count(), 6);
    assert_eq!(result.mesh.face_count(), 6);
    assert_eq!(result.outline, vec![0, 1, 2, 3]);
    assert_relative_eq!(total_area(&result.mesh), -4.0, epsilon = 1.0e-9);
}

#[test]
fn test_triangles_are_clockwise() {
    let lattice = quad(4);
    let result = extract(&lattice, &[4, 1, 11, 14]).unwrap();
    for face in result.mesh.faces() {
        assert!(result.mesh.face_signed_area(face) < 0.0);
    }
}

#[test]
fn test_point_id_maps_mesh_vertices() {
    let lattice = quad(4);
    let result = extract(&lattice, &[4, 1, 11, 14]).unwrap();
    assert_eq!(result.point_id(0), Some(4));
    assert_eq!(result.point_id(3), Some(14));
    assert_eq!(result.point_id(4), Some(5));
    assert_eq!(result.point_id(5), Some(10));
    assert_eq!(result.point_id(6), None);
}

#[test]
fn test_concave_boundary_keeps_triangles_inside() {
    let lattice = quad(5);
    // L shape: (0,0) (4,0) (4,2) (2,2) (2,4) (0,4)
    let boundary = [0, 4, 14, 12, 22, 20];
    let result = extract(&lattice, &boundary).unwrap();
    assert_eq!(result.enclosed, vec![6, 7, 8, 11, 16]);

    let polygon: Vec<DVec2> = boundary
        .iter()
        .map(|&id| lattice.position_2d(id).unwrap())
        .collect();
    for face in result.mesh.faces() {
        let centroid = face
            .indices()
            .iter()
            .map(|&i| result.mesh.vertex(i).truncate())
            .sum::<DVec2>()
            / 3.0;
        assert!(point_in_polygon(centroid, &polygon));
    }
}

#[test]
fn test_too_few_points() {
    let lattice = quad(4);
    assert!(matches!(
        extract(&lattice, &[0, 1]),
        Err(CarveError::NoSelection { .. })
    ));
    assert!(matches!(extract(&lattice, &[]), Err(CarveError::NoSelection { .. })));
}

#[test]
fn test_collinear_boundary_has_no_area() {
    let lattice = quad(4);
    assert!(matches!(
        extract(&lattice, &[0, 1, 2]),
        Err(CarveError::NoSelection { .. })
    ));
}

#[test]
fn test_triangle_without_enclosed_points() {
    let lattice = quad(4);
    // (0,0) (1,0) (0,1)
    let result = extract(&lattice, &[0, 1, 4]).unwrap();
    assert!(result.enclosed.is_empty());
    assert_eq!(result.mesh.face_count(), 1);
}

#[test]
fn test_unknown_point() {
    let lattice = quad(4);
    assert!(matches!(
        extract(&lattice, &[0, 1, 400]),
        Err(CarveError::UnknownPoint { id: 400 })
    ));
}

#[test]
fn test_full_lattice_boundary_scales() {
    let n = 128;
    let lattice = quad(n);
    let corners = [0, n - 1, n * n - 1, n * (n - 1)];

    let start = Instant::now();
    let result = extract(&lattice, &corners).unwrap();
    let elapsed = start.elapsed();

    let enclosed = (n - 2) * (n - 2);
    assert_eq!(result.enclosed.len(), enclosed);
    // Convex hull of 4 corners: 2v - 2 - 4 triangles
    assert_eq!(result.mesh.face_count(), 2 * (enclosed + 4) - 6);
    assert!(elapsed < Duration::from_secs(10), "took {elapsed:?}");
}
