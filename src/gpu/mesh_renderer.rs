//! Draws the packed level and actor groups.
//!
//! Each group owns one vertex buffer and one index buffer. The vertex
//! buffer holds a whole [`PackedBuffer`]; positions, colors and normals are
//! bound as three slices of it at the pack's recorded offsets.

use std::ops::Range;

use bytemuck::Zeroable;
use wgpu::util::DeviceExt;

use super::dynamic_buffer::DynamicBuffer;
use super::pipeline_helpers;
use super::render_context::{RenderContext, RenderContextError};
use super::shader::create_mesh_shader;
use crate::camera::CameraUniform;
use crate::engine::FrameOutput;
use crate::scene::{PackedBuffer, SceneGroup};

const FLOAT_SIZE: u64 = size_of::<f32>() as u64;

/// Byte ranges of the three attribute slices inside a packed vertex
/// buffer.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct VertexSlices {
    /// Position bytes.
    pub positions: Range<u64>,
    /// Color bytes.
    pub colors: Range<u64>,
    /// Normal bytes.
    pub normals: Range<u64>,
}

impl VertexSlices {
    /// Byte ranges for `packed`'s float offsets.
    #[must_use]
    pub fn of(packed: &PackedBuffer) -> Self {
        let color = packed.color_offset as u64 * FLOAT_SIZE;
        let normal = packed.normal_offset as u64 * FLOAT_SIZE;
        let end = packed.total_len as u64 * FLOAT_SIZE;
        Self {
            positions: 0..color,
            colors: color..normal,
            normals: normal..end,
        }
    }
}

/// GPU copy of one scene group.
struct GroupBuffers {
    vertices: DynamicBuffer,
    indices: DynamicBuffer,
    slices: VertexSlices,
    index_count: u32,
}

impl GroupBuffers {
    fn new(device: &wgpu::Device, name: &str) -> Self {
        Self {
            vertices: DynamicBuffer::new(
                device,
                &format!("{name} Vertices"),
                4096,
                wgpu::BufferUsages::VERTEX,
            ),
            indices: DynamicBuffer::new(
                device,
                &format!("{name} Indices"),
                1024,
                wgpu::BufferUsages::INDEX,
            ),
            slices: VertexSlices::default(),
            index_count: 0,
        }
    }

    fn upload(
        &mut self,
        device: &wgpu::Device,
        queue: &wgpu::Queue,
        packed: &PackedBuffer,
    ) {
        let _ = self.vertices.write(device, queue, &packed.data);
        let _ = self.indices.write(device, queue, &packed.indices);
        self.slices = VertexSlices::of(packed);
        self.index_count = packed.index_count as u32;
    }

    fn draw<'a>(&'a self, pass: &mut wgpu::RenderPass<'a>) {
        if self.index_count == 0 {
            return;
        }
        let buffer = self.vertices.buffer();
        pass.set_vertex_buffer(0, buffer.slice(self.slices.positions.clone()));
        pass.set_vertex_buffer(1, buffer.slice(self.slices.colors.clone()));
        pass.set_vertex_buffer(2, buffer.slice(self.slices.normals.clone()));
        pass.set_index_buffer(
            self.indices.buffer().slice(..),
            wgpu::IndexFormat::Uint32,
        );
        pass.draw_indexed(0..self.index_count, 0, 0..1);
    }
}

/// Renders the level and actors groups with one lit pipeline.
pub struct MeshRenderer {
    pipeline: wgpu::RenderPipeline,
    camera_buffer: wgpu::Buffer,
    camera_bind_group: wgpu::BindGroup,
    level: GroupBuffers,
    actors: GroupBuffers,
    clear_color: wgpu::Color,
}

impl MeshRenderer {
    /// Build the pipeline and empty group buffers for `context`'s surface.
    #[must_use]
    pub fn new(context: &RenderContext, clear_color: [f32; 3]) -> Self {
        let device = &context.device;

        let camera_buffer =
            device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
                label: Some("Camera Uniform"),
                contents: bytemuck::bytes_of(&CameraUniform::zeroed()),
                usage: wgpu::BufferUsages::UNIFORM
                    | wgpu::BufferUsages::COPY_DST,
            });
        let camera_layout =
            device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
                label: Some("Camera Layout"),
                entries: &[pipeline_helpers::uniform_buffer(0)],
            });
        let camera_bind_group =
            device.create_bind_group(&wgpu::BindGroupDescriptor {
                label: Some("Camera Bind Group"),
                layout: &camera_layout,
                entries: &[wgpu::BindGroupEntry {
                    binding: 0,
                    resource: camera_buffer.as_entire_binding(),
                }],
            });

        let shader = create_mesh_shader(device);
        let pipeline_layout =
            device.create_pipeline_layout(&wgpu::PipelineLayoutDescriptor {
                label: Some("Mesh Pipeline Layout"),
                bind_group_layouts: &[&camera_layout],
                push_constant_ranges: &[],
            });
        let vertex_layouts = pipeline_helpers::mesh_vertex_layouts();
        let pipeline =
            device.create_render_pipeline(&wgpu::RenderPipelineDescriptor {
                label: Some("Mesh Pipeline"),
                layout: Some(&pipeline_layout),
                vertex: wgpu::VertexState {
                    module: &shader,
                    entry_point: Some("vs_main"),
                    buffers: &vertex_layouts,
                    compilation_options: Default::default(),
                },
                fragment: Some(wgpu::FragmentState {
                    module: &shader,
                    entry_point: Some("fs_main"),
                    targets: &[Some(wgpu::ColorTargetState {
                        format: context.format(),
                        blend: Some(wgpu::BlendState::REPLACE),
                        write_mask: wgpu::ColorWrites::ALL,
                    })],
                    compilation_options: Default::default(),
                }),
                primitive: pipeline_helpers::primitive_state(),
                depth_stencil: Some(pipeline_helpers::depth_stencil_state()),
                multisample: wgpu::MultisampleState::default(),
                multiview: None,
                cache: None,
            });

        let [r, g, b] = clear_color;
        Self {
            pipeline,
            camera_buffer,
            camera_bind_group,
            level: GroupBuffers::new(device, "Level"),
            actors: GroupBuffers::new(device, "Actors"),
            clear_color: wgpu::Color {
                r: f64::from(r),
                g: f64::from(g),
                b: f64::from(b),
                a: 1.0,
            },
        }
    }

    /// Replace one group's GPU buffers with `packed`.
    pub fn upload(
        &mut self,
        context: &RenderContext,
        group: SceneGroup,
        packed: &PackedBuffer,
    ) {
        let buffers = match group {
            SceneGroup::Level => &mut self.level,
            SceneGroup::Actors => &mut self.actors,
        };
        buffers.upload(&context.device, &context.queue, packed);
    }

    /// Write the frame's uniform and upload whichever groups were repacked.
    pub fn prepare(&mut self, context: &RenderContext, frame: &FrameOutput) {
        context.queue.write_buffer(
            &self.camera_buffer,
            0,
            bytemuck::bytes_of(&frame.uniform),
        );
        if let Some(level) = &frame.level {
            self.upload(context, SceneGroup::Level, level);
        }
        if let Some(actors) = &frame.actors {
            self.upload(context, SceneGroup::Actors, actors);
        }
    }

    /// Draw both groups into the next surface texture and present it.
    /// Frames the context declines to hand out are skipped.
    ///
    /// # Errors
    ///
    /// Returns [`RenderContextError::Acquire`] if the surface failed in a
    /// way reconfiguring cannot fix.
    pub fn render(
        &self,
        context: &RenderContext,
    ) -> Result<(), RenderContextError> {
        let Some(mut frame) = context.acquire()? else {
            return Ok(());
        };
        {
            let mut pass =
                frame.encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
                    label: Some("Mesh Pass"),
                    color_attachments: &[Some(
                        wgpu::RenderPassColorAttachment {
                            view: &frame.view,
                            resolve_target: None,
                            ops: wgpu::Operations {
                                load: wgpu::LoadOp::Clear(self.clear_color),
                                store: wgpu::StoreOp::Store,
                            },
                            depth_slice: None,
                        },
                    )],
                    depth_stencil_attachment: Some(
                        wgpu::RenderPassDepthStencilAttachment {
                            view: context.depth_view(),
                            depth_ops: Some(wgpu::Operations {
                                load: wgpu::LoadOp::Clear(1.0),
                                store: wgpu::StoreOp::Store,
                            }),
                            stencil_ops: None,
                        },
                    ),
                    ..Default::default()
                });
            pass.set_pipeline(&self.pipeline);
            pass.set_bind_group(0, &self.camera_bind_group, &[]);
            self.level.draw(&mut pass);
            self.actors.draw(&mut pass);
        }
        context.present(frame);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scene::{pack, MeshObject};

    #[test]
    fn slices_follow_float_offsets() {
        let triangle = MeshObject::new(
            vec![0.0; 12],
            vec![1.0; 12],
            vec![0.0, 0.0, 1.0, 0.0, 0.0, 1.0, 0.0, 0.0, 1.0],
            vec![0, 1, 2],
        )
        .unwrap();
        let packed = pack([&triangle, &triangle]);
        let slices = VertexSlices::of(&packed);
        assert_eq!(slices.positions, 0..96);
        assert_eq!(slices.colors, 96..192);
        assert_eq!(slices.normals, 192..264);
        assert_eq!(slices.normals.end, (packed.data.len() * 4) as u64);
    }

    #[test]
    fn empty_pack_has_empty_slices() {
        let slices = VertexSlices::of(&PackedBuffer::default());
        assert!(slices.positions.is_empty());
        assert!(slices.colors.is_empty());
        assert!(slices.normals.is_empty());
    }
}
