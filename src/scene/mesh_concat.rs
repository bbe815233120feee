use super::mesh::{MeshObject, POSITION_COMPONENTS};
use super::source::MeshSource;

/// One attribute-sliced vertex buffer plus a globally offset index buffer.
///
/// `data` holds every position, then every color, then every normal. The
/// renderer binds three slices of the same buffer at `color_offset` and
/// `normal_offset` (counted in floats).
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PackedBuffer {
    /// Positions, colors and normals back to back.
    pub data: Vec<f32>,
    /// Float offset where colors start.
    pub color_offset: usize,
    /// Float offset where normals start.
    pub normal_offset: usize,
    /// Total float length of `data`.
    pub total_len: usize,
    /// Triangle indices into the concatenated vertices.
    pub indices: Vec<u32>,
    /// Number of indices.
    pub index_count: usize,
}

impl PackedBuffer {
    /// Whether the group has nothing to draw. Callers skip the draw call.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.index_count == 0
    }

    /// Number of vertices in the buffer.
    #[must_use]
    pub fn vertex_count(&self) -> usize {
        self.color_offset / POSITION_COMPONENTS
    }

    /// The position slice.
    #[must_use]
    pub fn positions(&self) -> &[f32] {
        &self.data[..self.color_offset]
    }

    /// The color slice.
    #[must_use]
    pub fn colors(&self) -> &[f32] {
        &self.data[self.color_offset..self.normal_offset]
    }

    /// The normal slice.
    #[must_use]
    pub fn normals(&self) -> &[f32] {
        &self.data[self.normal_offset..self.total_len]
    }
}

/// Concatenate mesh objects into one packed buffer, in input order.
///
/// Each object's local indices are shifted by the number of vertices that
/// came before it. Always a full rebuild.
///
/// Indices are `u32`, so the packed group holds at most `u32::MAX`
/// vertices. An object that would cross that ceiling is skipped with a
/// warning and the objects after it are still packed if they fit.
pub fn pack<'a, M, I>(sources: I) -> PackedBuffer
where
    M: MeshSource + ?Sized + 'a,
    I: IntoIterator<Item = &'a M>,
{
    let mut positions: Vec<f32> = Vec::new();
    let mut colors: Vec<f32> = Vec::new();
    let mut normals: Vec<f32> = Vec::new();
    let mut indices: Vec<u32> = Vec::new();
    let mut index_offset: u32 = 0;

    for source in sources {
        let mesh: &MeshObject = source.mesh();
        let Some(next_offset) = offset_after(index_offset, mesh.vertex_count())
        else {
            log::warn!(
                "skipping mesh of {} vertices: group already holds {}",
                mesh.vertex_count(),
                index_offset
            );
            continue;
        };
        positions.extend_from_slice(mesh.positions());
        colors.extend_from_slice(mesh.colors());
        normals.extend_from_slice(mesh.normals());
        // Local indices are below the mesh's vertex count, so the shifted
        // ones stay below `next_offset`.
        indices.extend(mesh.indices().iter().map(|&i| i + index_offset));
        index_offset = next_offset;
    }

    let color_offset = positions.len();
    let normal_offset = color_offset + colors.len();
    let mut data = positions;
    data.reserve(colors.len() + normals.len());
    data.extend_from_slice(&colors);
    data.extend_from_slice(&normals);

    let total_len = data.len();
    let index_count = indices.len();
    log::debug!(
        "packed {} vertices, {} triangles",
        index_offset,
        index_count / 3
    );
    PackedBuffer {
        data,
        color_offset,
        normal_offset,
        total_len,
        indices,
        index_count,
    }
}

/// Index offset after appending `vertices` vertices, or `None` when the
/// total no longer fits a `u32` index.
fn offset_after(offset: u32, vertices: usize) -> Option<u32> {
    u32::try_from(vertices)
        .ok()
        .and_then(|n| offset.checked_add(n))
}

#[cfg(test)]
mod tests {
    use super::*;

    /// One triangle whose positions/colors/normals are tagged with `tag`
    /// so concatenation order is visible.
    fn tagged_triangle(tag: f32) -> MeshObject {
        MeshObject::new(
            vec![tag; 12],
            vec![tag + 0.5; 12],
            vec![-tag; 9],
            vec![0, 1, 2],
        )
        .unwrap()
    }

    fn quad(tag: f32) -> MeshObject {
        MeshObject::new(
            vec![tag; 16],
            vec![tag; 16],
            vec![tag; 12],
            vec![0, 1, 2, 2, 3, 0],
        )
        .unwrap()
    }

    #[test]
    fn empty_input() {
        let packed = pack(&Vec::<MeshObject>::new());
        assert_eq!(packed, PackedBuffer::default());
        assert!(packed.is_empty());
        assert_eq!(packed.color_offset, 0);
        assert_eq!(packed.normal_offset, 0);
        assert_eq!(packed.total_len, 0);
        assert_eq!(packed.index_count, 0);
    }

    #[test]
    fn two_triangles() {
        let a = tagged_triangle(1.0);
        let b = tagged_triangle(2.0);
        let packed = pack([&a, &b]);

        assert_eq!(packed.indices, vec![0, 1, 2, 3, 4, 5]);
        assert_eq!(packed.index_count, 6);
        assert_eq!(packed.vertex_count(), 6);
        assert_eq!(packed.positions().len(), 24);
        assert!(packed.positions()[..12].iter().all(|&v| v == 1.0));
        assert!(packed.positions()[12..].iter().all(|&v| v == 2.0));
    }

    #[test]
    fn offsets_and_order() {
        let a = quad(1.0);
        let b = tagged_triangle(2.0);
        let packed = pack([&a, &b]);

        // A's indices unshifted, B's shifted by A's vertex count.
        assert_eq!(&packed.indices[..6], a.indices());
        assert_eq!(&packed.indices[6..], &[4, 5, 6]);

        assert_eq!(packed.color_offset, 16 + 12);
        assert_eq!(packed.normal_offset, 28 + 16 + 12);
        assert_eq!(packed.total_len, 56 + 12 + 9);
        assert_eq!(packed.data.len(), packed.total_len);

        assert_eq!(&packed.colors()[..16], a.colors());
        assert_eq!(&packed.colors()[16..], b.colors());
        assert_eq!(&packed.normals()[12..], b.normals());
    }

    #[test]
    fn order_sensitive() {
        let a = quad(1.0);
        let b = tagged_triangle(2.0);
        assert_ne!(pack([&a, &b]), pack([&b, &a]));
        assert_eq!(pack([&b, &a]).indices, vec![0, 1, 2, 3, 4, 5, 5, 6, 3]);
    }

    #[test]
    fn empty_objects_contribute_nothing() {
        let a = MeshObject::default();
        let b = tagged_triangle(3.0);
        let packed = pack([&a, &b, &a]);
        assert_eq!(packed.indices, vec![0, 1, 2]);
        assert_eq!(packed.color_offset, 12);
    }

    #[test]
    fn offset_stops_at_u32_ceiling() {
        assert_eq!(offset_after(0, 3), Some(3));
        assert_eq!(offset_after(u32::MAX - 2, 2), Some(u32::MAX));
        assert_eq!(offset_after(u32::MAX - 2, 3), None);
        assert_eq!(offset_after(1, usize::MAX), None);
    }
}
