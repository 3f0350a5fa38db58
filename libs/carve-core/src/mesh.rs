//! # Mesh Data Structure
//!
//! Polygon mesh handed to exporters: vertices plus triangle and quad faces.

use glam::{DVec2, DVec3};

/// A mesh face. Quads are kept intact so exporters can write them as-is.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Face {
    Triangle([u32; 3]),
    Quad([u32; 4]),
}

impl Face {
    /// Vertex indices in winding order.
    #[inline]
    pub fn indices(&self) -> &[u32] {
        match self {
            Face::Triangle(v) => v,
            Face::Quad(v) => v,
        }
    }

    /// Number of vertices.
    #[inline]
    pub fn arity(&self) -> usize {
        self.indices().len()
    }
}

/// A polygon mesh with vertices and ordered faces.
///
/// All geometry uses f64 internally. Conversion to f32 only happens at the
/// WASM boundary.
///
/// # Example
///
/// ```rust
/// use carve_core::PolyMesh;
/// use glam::DVec3;
///
/// let mut mesh = PolyMesh::new();
/// mesh.add_vertex(DVec3::new(0.0, 0.0, 0.0));
/// mesh.add_vertex(DVec3::new(1.0, 0.0, 0.0));
/// mesh.add_vertex(DVec3::new(0.0, 1.0, 0.0));
/// mesh.add_triangle(0, 2, 1);
/// assert_eq!(mesh.face_count(), 1);
/// ```
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PolyMesh {
    /// Vertex positions (f64 for precision)
    vertices: Vec<DVec3>,
    /// Faces referencing `vertices`
    faces: Vec<Face>,
}

impl PolyMesh {
    /// Creates an empty mesh.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a mesh over an existing vertex array.
    pub fn with_vertices(vertices: Vec<DVec3>) -> Self {
        Self {
            vertices,
            faces: Vec::new(),
        }
    }

    /// Returns the number of vertices.
    #[inline]
    pub fn vertex_count(&self) -> usize {
        self.vertices.len()
    }

    /// Returns the number of faces.
    #[inline]
    pub fn face_count(&self) -> usize {
        self.faces.len()
    }

    /// Number of triangles after splitting quads.
    pub fn triangle_count(&self) -> usize {
        self.faces
            .iter()
            .map(|f| match f {
                Face::Triangle(_) => 1,
                Face::Quad(_) => 2,
            })
            .sum()
    }

    /// Returns true if the mesh has no faces.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.faces.is_empty()
    }

    /// Adds a vertex and returns its index.
    pub fn add_vertex(&mut self, position: DVec3) -> u32 {
        let index = self.vertices.len() as u32;
        self.vertices.push(position);
        index
    }

    /// Adds a triangle by vertex indices.
    pub fn add_triangle(&mut self, v0: u32, v1: u32, v2: u32) {
        self.faces.push(Face::Triangle([v0, v1, v2]));
    }

    /// Adds a quad by vertex indices.
    pub fn add_quad(&mut self, v0: u32, v1: u32, v2: u32, v3: u32) {
        self.faces.push(Face::Quad([v0, v1, v2, v3]));
    }

    /// Returns a reference to the vertices.
    #[inline]
    pub fn vertices(&self) -> &[DVec3] {
        &self.vertices
    }

    /// Returns a reference to the faces.
    #[inline]
    pub fn faces(&self) -> &[Face] {
        &self.faces
    }

    /// Returns the vertex at the given index.
    #[inline]
    pub fn vertex(&self, index: u32) -> DVec3 {
        self.vertices[index as usize]
    }

    /// Signed area of a face projected onto the XY plane; negative when the
    /// face winds clockwise.
    pub fn face_signed_area(&self, face: &Face) -> f64 {
        let pts: Vec<DVec2> = face
            .indices()
            .iter()
            .map(|&i| self.vertex(i).truncate())
            .collect();
        crate::geometry::signed_area(&pts)
    }

    /// Triangle index buffer; quads split along their first diagonal.
    pub fn triangle_indices(&self) -> Vec<[u32; 3]> {
        let mut out = Vec::with_capacity(self.triangle_count());
        for face in &self.faces {
            match *face {
                Face::Triangle(t) => out.push(t),
                Face::Quad([a, b, c, d]) => {
                    out.push([a, b, c]);
                    out.push([a, c, d]);
                }
            }
        }
        out
    }

    /// Copy that keeps only vertices referenced by a face, renumbered in
    /// first-use order.
    pub fn compacted(&self) -> PolyMesh {
        let mut remap: Vec<Option<u32>> = vec![None; self.vertices.len()];
        let mut out = PolyMesh::new();
        let mut map = |i: u32, out: &mut PolyMesh| -> u32 {
            *remap[i as usize].get_or_insert_with(|| out.add_vertex(self.vertices[i as usize]))
        };
        for face in &self.faces {
            match *face {
                Face::Triangle([a, b, c]) => {
                    let t = [map(a, &mut out), map(b, &mut out), map(c, &mut out)];
                    out.add_triangle(t[0], t[1], t[2]);
                }
                Face::Quad([a, b, c, d]) => {
                    let q = [
                        map(a, &mut out),
                        map(b, &mut out),
                        map(c, &mut out),
                        map(d, &mut out),
                    ];
                    out.add_quad(q[0], q[1], q[2], q[3]);
                }
            }
        }
        out
    }

    /// Computes the axis-aligned bounding box.
    ///
    /// Returns (min, max) corners of the bounding box.
    pub fn bounding_box(&self) -> (DVec3, DVec3) {
        if self.vertices.is_empty() {
            return (DVec3::ZERO, DVec3::ZERO);
        }

        let mut min = self.vertices[0];
        let mut max = self.vertices[0];

        for v in &self.vertices[1..] {
            min = min.min(*v);
            max = max.max(*v);
        }

        (min, max)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn unit_quad() -> PolyMesh {
        let mut mesh = PolyMesh::new();
        mesh.add_vertex(DVec3::new(9.0, 9.0, 0.0));
        mesh.add_vertex(DVec3::new(1.0, 1.0, 0.0));
        mesh.add_vertex(DVec3::new(1.0, 0.0, 0.0));
        mesh.add_vertex(DVec3::new(0.0, 0.0, 0.0));
        mesh.add_vertex(DVec3::new(0.0, 1.0, 0.0));
        mesh.add_quad(1, 2, 3, 4);
        mesh
    }

    #[test]
    fn test_counts() {
        let mesh = unit_quad();
        assert_eq!(mesh.vertex_count(), 5);
        assert_eq!(mesh.face_count(), 1);
        assert_eq!(mesh.triangle_count(), 2);
        assert!(!mesh.is_empty());
    }

    #[test]
    fn test_triangle_indices_split_quads() {
        let mesh = unit_quad();
        assert_eq!(mesh.triangle_indices(), vec![[1, 2, 3], [1, 3, 4]]);
    }

    #[test]
    fn test_face_signed_area_clockwise() {
        let mesh = unit_quad();
        let area = mesh.face_signed_area(&mesh.faces()[0]);
        assert!((area + 1.0).abs() < 1.0e-12);
    }

    #[test]
    fn test_compacted_drops_unused_vertices() {
        let mesh = unit_quad().compacted();
        assert_eq!(mesh.vertex_count(), 4);
        assert_eq!(mesh.faces()[0], Face::Quad([0, 1, 2, 3]));
        assert_eq!(mesh.vertex(0), DVec3::new(1.0, 1.0, 0.0));
    }

    #[test]
    fn test_bounding_box() {
        let (min, max) = unit_quad().bounding_box();
        assert_eq!(min, DVec3::ZERO);
        assert_eq!(max, DVec3::new(9.0, 9.0, 0.0));
    }
}
