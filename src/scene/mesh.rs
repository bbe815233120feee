use std::fmt;

use glam::{Vec3, Vec4};

/// Floats per position (x, y, z, w).
pub const POSITION_COMPONENTS: usize = 4;
/// Floats per color (r, g, b, a).
pub const COLOR_COMPONENTS: usize = 4;
/// Floats per normal (x, y, z).
pub const NORMAL_COMPONENTS: usize = 3;

/// A mesh object that breaks the parallel-array contract.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MeshError {
    /// The attribute arrays do not describe the same number of vertices.
    LengthMismatch {
        /// Length of the position array in floats.
        positions: usize,
        /// Length of the color array in floats.
        colors: usize,
        /// Length of the normal array in floats.
        normals: usize,
    },
    /// The index list is not a whole number of triangles.
    IndexCountNotTriangles {
        /// Number of indices supplied.
        count: usize,
    },
    /// A triangle references a vertex that does not exist.
    IndexOutOfRange {
        /// The bad index.
        index: u32,
        /// Number of vertices in the object.
        vertex_count: usize,
    },
}

impl fmt::Display for MeshError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::LengthMismatch {
                positions,
                colors,
                normals,
            } => write!(
                f,
                "attribute lengths disagree: {positions} position, {colors} \
                 color, {normals} normal floats"
            ),
            Self::IndexCountNotTriangles { count } => {
                write!(f, "{count} indices is not a multiple of 3")
            }
            Self::IndexOutOfRange {
                index,
                vertex_count,
            } => write!(
                f,
                "index {index} out of range for {vertex_count} vertices"
            ),
        }
    }
}

impl std::error::Error for MeshError {}

/// Parallel per-vertex attribute arrays plus a local triangle list.
///
/// Validated on construction: every attribute array describes the same
/// number of vertices and every index is in range. Triangles wind
/// counter-clockwise.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct MeshObject {
    positions: Vec<f32>,
    colors: Vec<f32>,
    normals: Vec<f32>,
    indices: Vec<u32>,
}

impl MeshObject {
    /// Build a mesh object from flat attribute arrays.
    pub fn new(
        positions: Vec<f32>,
        colors: Vec<f32>,
        normals: Vec<f32>,
        indices: Vec<u32>,
    ) -> Result<Self, MeshError> {
        let vertex_count = positions.len() / POSITION_COMPONENTS;
        let parity = positions.len() % POSITION_COMPONENTS == 0
            && colors.len() == vertex_count * COLOR_COMPONENTS
            && normals.len() == vertex_count * NORMAL_COMPONENTS;
        if !parity {
            return Err(MeshError::LengthMismatch {
                positions: positions.len(),
                colors: colors.len(),
                normals: normals.len(),
            });
        }
        if indices.len() % 3 != 0 {
            return Err(MeshError::IndexCountNotTriangles {
                count: indices.len(),
            });
        }
        if let Some(&index) =
            indices.iter().find(|&&i| i as usize >= vertex_count)
        {
            return Err(MeshError::IndexOutOfRange {
                index,
                vertex_count,
            });
        }
        Ok(Self {
            positions,
            colors,
            normals,
            indices,
        })
    }

    /// Positions, 4 floats per vertex.
    #[must_use]
    pub fn positions(&self) -> &[f32] {
        &self.positions
    }

    /// Colors, 4 floats per vertex.
    #[must_use]
    pub fn colors(&self) -> &[f32] {
        &self.colors
    }

    /// Normals, 3 floats per vertex.
    #[must_use]
    pub fn normals(&self) -> &[f32] {
        &self.normals
    }

    /// Local triangle indices.
    #[must_use]
    pub fn indices(&self) -> &[u32] {
        &self.indices
    }

    /// Number of vertices.
    #[must_use]
    pub fn vertex_count(&self) -> usize {
        self.positions.len() / POSITION_COMPONENTS
    }

    /// Number of triangles.
    #[must_use]
    pub fn triangle_count(&self) -> usize {
        self.indices.len() / 3
    }

    /// Whether there is nothing to draw.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.indices.is_empty()
    }
}

/// Incremental mesh construction for the procedural generators.
///
/// Attribute parity holds by construction; triangles must only reference
/// vertices already pushed.
#[derive(Debug, Default)]
pub(crate) struct MeshBuilder {
    mesh: MeshObject,
}

impl MeshBuilder {
    /// Append a vertex and return its local index.
    pub(crate) fn vertex(
        &mut self,
        position: Vec3,
        color: Vec4,
        normal: Vec3,
    ) -> u32 {
        let index = self.mesh.vertex_count() as u32;
        let position = position.extend(1.0).to_array();
        self.mesh.positions.extend_from_slice(&position);
        self.mesh.colors.extend_from_slice(&color.to_array());
        self.mesh.normals.extend_from_slice(&normal.to_array());
        index
    }

    /// Append triangles given as local index triples.
    pub(crate) fn triangles(&mut self, base: u32, triangles: &[[u32; 3]]) {
        for tri in triangles {
            self.mesh.indices.extend(tri.iter().map(|i| base + i));
        }
    }

    pub(crate) fn vertex_count(&self) -> usize {
        self.mesh.vertex_count()
    }

    pub(crate) fn build(self) -> MeshObject {
        debug_assert!(self
            .mesh
            .indices
            .iter()
            .all(|&i| (i as usize) < self.mesh.vertex_count()));
        self.mesh
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn triangle() -> MeshObject {
        MeshObject::new(
            vec![0.0, 0.0, 0.0, 1.0, 1.0, 0.0, 0.0, 1.0, 0.0, 1.0, 0.0, 1.0],
            vec![1.0; 12],
            vec![0.0, 0.0, 1.0, 0.0, 0.0, 1.0, 0.0, 0.0, 1.0],
            vec![0, 1, 2],
        )
        .unwrap()
    }

    #[test]
    fn valid_triangle() {
        let mesh = triangle();
        assert_eq!(mesh.vertex_count(), 3);
        assert_eq!(mesh.triangle_count(), 1);
        assert!(!mesh.is_empty());
        assert!(MeshObject::default().is_empty());
    }

    #[test]
    fn rejects_attribute_mismatch() {
        let err =
            MeshObject::new(vec![0.0; 8], vec![0.0; 8], vec![0.0; 3], vec![])
                .unwrap_err();
        assert_eq!(
            err,
            MeshError::LengthMismatch {
                positions: 8,
                colors: 8,
                normals: 3
            }
        );
        assert!(
            MeshObject::new(vec![0.0; 6], vec![0.0; 6], vec![0.0; 3], vec![])
                .is_err()
        );
    }

    #[test]
    fn rejects_partial_triangle() {
        let err = MeshObject::new(
            vec![0.0; 8],
            vec![0.0; 8],
            vec![0.0; 6],
            vec![0, 1],
        )
        .unwrap_err();
        assert_eq!(err, MeshError::IndexCountNotTriangles { count: 2 });
    }

    #[test]
    fn rejects_out_of_range_index() {
        let err = MeshObject::new(
            vec![0.0; 8],
            vec![0.0; 8],
            vec![0.0; 6],
            vec![0, 1, 2],
        )
        .unwrap_err();
        assert_eq!(
            err,
            MeshError::IndexOutOfRange {
                index: 2,
                vertex_count: 2
            }
        );
    }

    #[test]
    fn builder_keeps_arrays_parallel() {
        let mut b = MeshBuilder::default();
        let base = b.vertex(Vec3::ZERO, Vec4::ONE, Vec3::Z);
        let _ = b.vertex(Vec3::X, Vec4::ONE, Vec3::Z);
        let _ = b.vertex(Vec3::Y, Vec4::ONE, Vec3::Z);
        b.triangles(base, &[[0, 1, 2]]);
        let mesh = b.build();
        assert_eq!(mesh.positions().len(), 12);
        assert_eq!(mesh.colors().len(), 12);
        assert_eq!(mesh.normals().len(), 9);
        assert_eq!(&mesh.positions()[4..8], &[1.0, 0.0, 0.0, 1.0]);
        assert_eq!(mesh, triangle());
    }
}
