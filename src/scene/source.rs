use std::sync::Arc;

use super::mesh::MeshObject;

/// Anything that can hand the packer a validated mesh object.
///
/// Loaded and procedural meshes both implement this, so a scene group is
/// just an ordered list of sources.
pub trait MeshSource: Send + Sync {
    /// Current geometry.
    fn mesh(&self) -> &MeshObject;
}

impl MeshSource for MeshObject {
    fn mesh(&self) -> &MeshObject {
        self
    }
}

impl<T: MeshSource + ?Sized> MeshSource for Box<T> {
    fn mesh(&self) -> &MeshObject {
        (**self).mesh()
    }
}

impl<T: MeshSource + ?Sized> MeshSource for Arc<T> {
    fn mesh(&self) -> &MeshObject {
        (**self).mesh()
    }
}

/// Geometry that never changes after it is built, e.g. a loaded model.
#[derive(Debug, Clone)]
pub struct StaticMesh {
    name: String,
    mesh: MeshObject,
}

impl StaticMesh {
    /// Wrap a mesh object under a display name.
    #[must_use]
    pub fn new(name: impl Into<String>, mesh: MeshObject) -> Self {
        Self {
            name: name.into(),
            mesh,
        }
    }

    /// Display name (file stem for loaded models).
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }
}

impl MeshSource for StaticMesh {
    fn mesh(&self) -> &MeshObject {
        &self.mesh
    }
}
