//! Wavefront OBJ models as static mesh sources.
//!
//! Faces are triangulated and flattened to one output vertex per face
//! corner, so a loaded model never shares vertices between triangles.

use std::fmt;
use std::io::BufRead;
use std::path::Path;

use glam::Vec3;

use super::mesh::{MeshError, MeshObject};
use super::source::StaticMesh;

/// Color given to every vertex of a loaded model.
pub const OBJ_COLOR: [f32; 4] = [0.3, 0.3, 0.3, 0.7];

/// Errors from loading an OBJ model.
#[derive(Debug)]
pub enum ObjError {
    /// The file could not be read or parsed.
    Load(tobj::LoadError),
    /// The file has no faces.
    NoGeometry,
    /// Faces reference no vertex normals.
    MissingNormals,
    /// Parsed data does not form a valid mesh object.
    Mesh(MeshError),
}

impl fmt::Display for ObjError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Load(e) => write!(f, "OBJ load failed: {e}"),
            Self::NoGeometry => f.write_str("OBJ file contains no faces"),
            Self::MissingNormals => f.write_str("OBJ file has no normals"),
            Self::Mesh(e) => write!(f, "OBJ produced an invalid mesh: {e}"),
        }
    }
}

impl std::error::Error for ObjError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Load(e) => Some(e),
            Self::Mesh(e) => Some(e),
            _ => None,
        }
    }
}

impl From<tobj::LoadError> for ObjError {
    fn from(e: tobj::LoadError) -> Self {
        Self::Load(e)
    }
}

impl From<MeshError> for ObjError {
    fn from(e: MeshError) -> Self {
        Self::Mesh(e)
    }
}

fn load_options() -> tobj::LoadOptions {
    tobj::LoadOptions {
        triangulate: true,
        single_index: false,
        ..Default::default()
    }
}

/// Load an OBJ file. With `swap_yz` the y and z components of positions
/// and normals are exchanged (y-up models into the z-up world) and each
/// triangle's winding is reversed to match.
pub fn load_obj(path: &Path, swap_yz: bool) -> Result<StaticMesh, ObjError> {
    let (models, _materials) = tobj::load_obj(path, &load_options())?;
    let mesh = flatten(&models, swap_yz)?;
    let name = path
        .file_stem()
        .and_then(|s| s.to_str())
        .unwrap_or("model");
    log::info!(
        "loaded {} ({} triangles) from {}",
        name,
        mesh.triangle_count(),
        path.display()
    );
    Ok(StaticMesh::new(name, mesh))
}

/// Load OBJ text from a reader. Material libraries are ignored.
pub fn load_obj_buf<R: BufRead>(
    reader: &mut R,
    swap_yz: bool,
) -> Result<MeshObject, ObjError> {
    let (models, _materials) =
        tobj::load_obj_buf(reader, &load_options(), |_| {
            Err(tobj::LoadError::OpenFileFailed)
        })?;
    flatten(&models, swap_yz)
}

fn flatten(
    models: &[tobj::Model],
    swap_yz: bool,
) -> Result<MeshObject, ObjError> {
    let corners: usize = models.iter().map(|m| m.mesh.indices.len()).sum();
    if corners == 0 {
        return Err(ObjError::NoGeometry);
    }

    let fix = |v: Vec3| if swap_yz { Vec3::new(v.x, v.z, v.y) } else { v };
    let mut positions = Vec::with_capacity(corners * 4);
    let mut normals = Vec::with_capacity(corners * 3);

    for model in models {
        let mesh = &model.mesh;
        if mesh.indices.is_empty() {
            continue;
        }
        if mesh.normals.is_empty() {
            return Err(ObjError::MissingNormals);
        }
        let normal_indices = if mesh.normal_indices.is_empty() {
            &mesh.indices
        } else {
            &mesh.normal_indices
        };
        for (&pi, &ni) in mesh.indices.iter().zip(normal_indices) {
            let p = read_vec3(&mesh.positions, pi)
                .ok_or(ObjError::NoGeometry)?;
            let n = read_vec3(&mesh.normals, ni)
                .ok_or(ObjError::MissingNormals)?;
            positions.extend_from_slice(&fix(p).extend(1.0).to_array());
            normals.extend_from_slice(&fix(n).to_array());
        }
    }

    let vertex_count = positions.len() / 4;
    let colors = OBJ_COLOR.repeat(vertex_count);
    let mut indices: Vec<u32> = (0..vertex_count as u32).collect();
    if swap_yz {
        // Swapping two axes mirrors the model; keep faces counter-clockwise.
        for tri in indices.chunks_exact_mut(3) {
            tri.swap(1, 2);
        }
    }
    Ok(MeshObject::new(positions, colors, normals, indices)?)
}

fn read_vec3(data: &[f32], index: u32) -> Option<Vec3> {
    let start = index as usize * 3;
    data.get(start..start + 3).map(Vec3::from_slice)
}
