//! Shared wgpu descriptors for the mesh pipeline.

use crate::scene::{COLOR_COMPONENTS, NORMAL_COMPONENTS, POSITION_COMPONENTS};

/// Depth attachment format.
pub const DEPTH_FORMAT: wgpu::TextureFormat = wgpu::TextureFormat::Depth32Float;

const FLOAT_SIZE: u64 = size_of::<f32>() as u64;

const POSITION_ATTRIBUTES: [wgpu::VertexAttribute; 1] =
    wgpu::vertex_attr_array![0 => Float32x4];
const COLOR_ATTRIBUTES: [wgpu::VertexAttribute; 1] =
    wgpu::vertex_attr_array![1 => Float32x4];
const NORMAL_ATTRIBUTES: [wgpu::VertexAttribute; 1] =
    wgpu::vertex_attr_array![2 => Float32x3];

/// One vertex buffer per attribute: positions, colors and normals, in the
/// slot order the packed buffer is sliced into.
pub fn mesh_vertex_layouts() -> [wgpu::VertexBufferLayout<'static>; 3] {
    [
        attribute_layout(POSITION_COMPONENTS, &POSITION_ATTRIBUTES),
        attribute_layout(COLOR_COMPONENTS, &COLOR_ATTRIBUTES),
        attribute_layout(NORMAL_COMPONENTS, &NORMAL_ATTRIBUTES),
    ]
}

fn attribute_layout(
    components: usize,
    attributes: &'static [wgpu::VertexAttribute],
) -> wgpu::VertexBufferLayout<'static> {
    wgpu::VertexBufferLayout {
        array_stride: components as u64 * FLOAT_SIZE,
        step_mode: wgpu::VertexStepMode::Vertex,
        attributes,
    }
}

/// Vertex- and fragment-visible uniform buffer binding.
pub fn uniform_buffer(binding: u32) -> wgpu::BindGroupLayoutEntry {
    wgpu::BindGroupLayoutEntry {
        binding,
        visibility: wgpu::ShaderStages::VERTEX_FRAGMENT,
        ty: wgpu::BindingType::Buffer {
            ty: wgpu::BufferBindingType::Uniform,
            has_dynamic_offset: false,
            min_binding_size: None,
        },
        count: None,
    }
}

/// Depth test with writes, nearer fragments win.
pub fn depth_stencil_state() -> wgpu::DepthStencilState {
    wgpu::DepthStencilState {
        format: DEPTH_FORMAT,
        depth_write_enabled: true,
        depth_compare: wgpu::CompareFunction::Less,
        stencil: wgpu::StencilState::default(),
        bias: wgpu::DepthBiasState::default(),
    }
}

/// Counter-clockwise triangles, back faces culled.
pub fn primitive_state() -> wgpu::PrimitiveState {
    wgpu::PrimitiveState {
        topology: wgpu::PrimitiveTopology::TriangleList,
        front_face: wgpu::FrontFace::Ccw,
        cull_mode: Some(wgpu::Face::Back),
        ..Default::default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn layouts_match_packed_attribute_widths() {
        let layouts = mesh_vertex_layouts();
        let strides: Vec<u64> =
            layouts.iter().map(|l| l.array_stride).collect();
        assert_eq!(strides, vec![16, 16, 12]);
        for (slot, layout) in layouts.iter().enumerate() {
            assert_eq!(layout.attributes.len(), 1);
            assert_eq!(layout.attributes[0].shader_location, slot as u32);
            assert_eq!(layout.attributes[0].offset, 0);
        }
        assert_eq!(
            layouts[2].attributes[0].format,
            wgpu::VertexFormat::Float32x3
        );
    }

    #[test]
    fn culls_back_faces() {
        let primitive = primitive_state();
        assert_eq!(primitive.front_face, wgpu::FrontFace::Ccw);
        assert_eq!(primitive.cull_mode, Some(wgpu::Face::Back));
    }
}
