//! # Boundary Extraction
//!
//! Point-mode export: the ordered boundary points form a closed polygon, the
//! base points strictly inside it are collected, and polygon plus enclosed
//! points are re-triangulated.
//!
//! Delaunay covers the convex hull, so for concave boundaries triangles whose
//! centroid falls outside the polygon are discarded.

#[cfg(test)]
mod tests;

use crate::error::{CarveError, CarveResult};
use crate::geometry::{delaunay, point_in_polygon};
use crate::lattice::{Lattice, PointId};
use crate::mesh::PolyMesh;
use glam::DVec2;
use tracing::debug;

/// Triangulated interior of a point-mode boundary.
///
/// Mesh vertices are the boundary points in selection order followed by the
/// enclosed points in id order.
#[derive(Debug, Clone)]
pub struct EnclosedTriangulation {
    /// Boundary point ids in selection order.
    pub boundary: Vec<PointId>,
    /// Base point ids strictly inside the boundary.
    pub enclosed: Vec<PointId>,
    /// The boundary polygon as one auxiliary face over the mesh vertices.
    pub outline: Vec<u32>,
    /// Clockwise triangles.
    pub mesh: PolyMesh,
}

impl EnclosedTriangulation {
    /// Lattice id of a mesh vertex.
    pub fn point_id(&self, vertex: u32) -> Option<PointId> {
        let v = vertex as usize;
        self.boundary
            .get(v)
            .or_else(|| self.enclosed.get(v.checked_sub(self.boundary.len())?))
            .copied()
    }
}

/// Extracts and triangulates the region bounded by `boundary`.
///
/// # Errors
///
/// `NoSelection` for fewer than 3 boundary points or when the polygon
/// encloses no area; `UnknownPoint` for ids outside the lattice.
pub fn extract(lattice: &Lattice, boundary: &[PointId]) -> CarveResult<EnclosedTriangulation> {
    if boundary.len() < 3 {
        return Err(CarveError::no_selection(format!(
            "boundary needs at least 3 points, got {}",
            boundary.len()
        )));
    }

    let polygon = boundary
        .iter()
        .map(|&id| lattice.position_2d(id))
        .collect::<CarveResult<Vec<DVec2>>>()?;

    let enclosed: Vec<PointId> = lattice.points()[..lattice.base_count()]
        .iter()
        .filter(|p| point_in_polygon(p.position.truncate(), &polygon))
        .map(|p| p.id)
        .collect();

    let mut positions = polygon.clone();
    for &id in &enclosed {
        positions.push(lattice.position_2d(id)?);
    }

    let mut mesh = PolyMesh::with_vertices(positions.iter().map(|p| p.extend(0.0)).collect());
    for [a, b, c] in delaunay(&positions) {
        let centroid = (positions[a] + positions[b] + positions[c]) / 3.0;
        if point_in_polygon(centroid, &polygon) {
            mesh.add_triangle(a as u32, c as u32, b as u32);
        }
    }

    if mesh.is_empty() {
        return Err(CarveError::no_selection("boundary encloses no area"));
    }

    debug!(
        boundary = boundary.len(),
        enclosed = enclosed.len(),
        triangles = mesh.face_count(),
        "Extracted enclosed region"
    );

    Ok(EnclosedTriangulation {
        boundary: boundary.to_vec(),
        enclosed,
        outline: (0..boundary.len() as u32).collect(),
        mesh,
    })
}
