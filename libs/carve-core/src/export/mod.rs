//! # Mesh Export
//!
//! ASCII writers for the exportable mesh: an ordered vertex list plus an
//! ordered face list of index triples and quads.
//!
//! ## Formats
//!
//! - **PLY**: `format ascii 1.0`, float x/y/z, `list uchar int` faces
//! - **OBJ**: `v` / `f` records with 1-based indices


use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

use crate::error::{CarveError, CarveResult};
use crate::mesh::PolyMesh;
use tracing::info;

/// Supported export formats.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExportFormat {
    Ply,
    Obj,
}

impl ExportFormat {
    /// Picks the format from a file extension (case-insensitive).
    pub fn from_extension(extension: &str) -> CarveResult<Self> {
        match extension.to_ascii_lowercase().as_str() {
            "ply" => Ok(ExportFormat::Ply),
            "obj" => Ok(ExportFormat::Obj),
            _ => Err(CarveError::UnknownFormat {
                extension: extension.to_string(),
            }),
        }
    }

    /// Picks the format from a path's extension.
    pub fn from_path(path: &Path) -> CarveResult<Self> {
        let extension = path
            .extension()
            .and_then(|e| e.to_str())
            .unwrap_or_default();
        Self::from_extension(extension)
    }

    /// Writes `mesh` in this format.
    pub fn write<W: Write>(self, mesh: &PolyMesh, out: &mut W) -> CarveResult<()> {
        match self {
            ExportFormat::Ply => write_ply(mesh, out),
            ExportFormat::Obj => write_obj(mesh, out),
        }
    }
}

/// Writes an ASCII PLY file.
pub fn write_ply<W: Write>(mesh: &PolyMesh, out: &mut W) -> CarveResult<()> {
    writeln!(out, "ply")?;
    writeln!(out, "format ascii 1.0")?;
    writeln!(out, "comment lattice carve export")?;
    writeln!(out, "element vertex {}", mesh.vertex_count())?;
    writeln!(out, "property float x")?;
    writeln!(out, "property float y")?;
    writeln!(out, "property float z")?;
    writeln!(out, "element face {}", mesh.face_count())?;
    writeln!(out, "property list uchar int vertex_indices")?;
    writeln!(out, "end_header")?;

    for v in mesh.vertices() {
        writeln!(out, "{} {} {}", v.x, v.y, v.z)?;
    }
    for face in mesh.faces() {
        let indices = face.indices();
        write!(out, "{}", indices.len())?;
        for i in indices {
            write!(out, " {i}")?;
        }
        writeln!(out)?;
    }
    Ok(())
}

/// Writes an ASCII Wavefront OBJ file.
pub fn write_obj<W: Write>(mesh: &PolyMesh, out: &mut W) -> CarveResult<()> {
    for v in mesh.vertices() {
        writeln!(out, "v {} {} {}", v.x, v.y, v.z)?;
    }
    for face in mesh.faces() {
        write!(out, "f")?;
        for i in face.indices() {
            write!(out, " {}", i + 1)?;
        }
        writeln!(out)?;
    }
    Ok(())
}

/// Renders `mesh` as a PLY string.
pub fn to_ply_string(mesh: &PolyMesh) -> CarveResult<String> {
    let mut buf = Vec::new();
    write_ply(mesh, &mut buf)?;
    String::from_utf8(buf).map_err(|e| CarveError::invariant(e.to_string()))
}

/// Saves `mesh` to `path`, choosing the format from the extension.
///
/// # Errors
///
/// `UnknownFormat` for unrecognized extensions (nothing is written), `Io`
/// for file system failures.
pub fn save(mesh: &PolyMesh, path: &Path) -> CarveResult<()> {
    let format = ExportFormat::from_path(path)?;
    let mut out = BufWriter::new(File::create(path)?);
    format.write(mesh, &mut out)?;
    out.flush()?;
    info!(
        path = %path.display(),
        vertices = mesh.vertex_count(),
        faces = mesh.face_count(),
        "Saved mesh"
    );
    Ok(())
}
