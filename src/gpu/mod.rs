//! wgpu side of the renderer.
//!
//! Everything here consumes the plain data produced by [`crate::engine`]:
//! packed buffers and a [`crate::camera::CameraUniform`].

/// Growable GPU buffers with automatic reallocation.
pub mod dynamic_buffer;
/// Packed level/actor mesh pipeline and draw pass.
pub mod mesh_renderer;
/// Shared wgpu descriptors for the mesh pipeline.
pub mod pipeline_helpers;
/// Device, window surface and per-frame acquisition.
pub mod render_context;
/// Embedded WGSL sources.
pub mod shader;
/// Depth attachment.
pub mod texture;

pub use mesh_renderer::MeshRenderer;
pub use render_context::{Frame, RenderContext, RenderContextError};
