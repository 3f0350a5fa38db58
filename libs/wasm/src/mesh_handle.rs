//! # Mesh Handle
//!
//! WASM-friendly wrapper for mesh data that can be transferred to JavaScript.

use carve_core::PolyMesh;
use wasm_bindgen::prelude::*;

/// A handle to triangle buffers ready for GPU upload.
///
/// Quads are split into triangles.
///
/// # Example (JavaScript)
///
/// ```javascript
/// const mesh = session.export_mesh();
///
/// const geometry = new THREE.BufferGeometry();
/// geometry.setAttribute('position', new THREE.BufferAttribute(new Float32Array(mesh.vertices()), 3));
/// geometry.setIndex(new THREE.BufferAttribute(new Uint32Array(mesh.indices()), 1));
/// ```
#[wasm_bindgen]
#[derive(Debug, Clone)]
pub struct MeshHandle {
    /// Vertex positions as [x, y, z, x, y, z, ...]
    vertices: Vec<f32>,
    /// Triangle indices as [i0, i1, i2, i0, i1, i2, ...]
    indices: Vec<u32>,
}

#[wasm_bindgen]
impl MeshHandle {
    /// Returns the number of vertices.
    #[wasm_bindgen(getter)]
    pub fn vertex_count(&self) -> usize {
        self.vertices.len() / 3
    }

    /// Returns the number of triangles.
    #[wasm_bindgen(getter)]
    pub fn triangle_count(&self) -> usize {
        self.indices.len() / 3
    }

    /// Returns the vertex buffer as a Float32Array.
    pub fn vertices(&self) -> Vec<f32> {
        self.vertices.clone()
    }

    /// Returns the index buffer as a Uint32Array.
    pub fn indices(&self) -> Vec<u32> {
        self.indices.clone()
    }

    /// Returns true if the mesh has no triangles.
    pub fn is_empty(&self) -> bool {
        self.indices.is_empty()
    }
}

impl MeshHandle {
    /// Flattens a mesh into f32/u32 buffers, keeping vertex ids, so vertex
    /// `i` is lattice point `i`.
    pub fn from_mesh(mesh: &PolyMesh) -> Self {
        let vertices = mesh
            .vertices()
            .iter()
            .flat_map(|v| [v.x as f32, v.y as f32, v.z as f32])
            .collect();
        let indices = mesh.triangle_indices().into_iter().flatten().collect();
        Self { vertices, indices }
    }

    /// Like [`from_mesh`](Self::from_mesh) but drops vertices no face uses.
    pub fn compacted(mesh: &PolyMesh) -> Self {
        Self::from_mesh(&mesh.compacted())
    }
}
