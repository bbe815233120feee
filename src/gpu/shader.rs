//! WGSL sources compiled into the binary.

/// Lit, fogged mesh shader with `vs_main` / `fs_main` entry points.
pub const MESH_SHADER: &str = include_str!("../../assets/shaders/mesh.wgsl");

/// Compile the mesh shader on `device`.
#[must_use]
pub fn create_mesh_shader(device: &wgpu::Device) -> wgpu::ShaderModule {
    device.create_shader_module(wgpu::ShaderModuleDescriptor {
        label: Some("Mesh Shader"),
        source: wgpu::ShaderSource::Wgsl(MESH_SHADER.into()),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn mesh_shader_validates() {
        let module = naga::front::wgsl::parse_str(MESH_SHADER)
            .unwrap_or_else(|e| panic!("mesh.wgsl failed to parse: {e}"));
        let _ = naga::valid::Validator::new(
            naga::valid::ValidationFlags::all(),
            naga::valid::Capabilities::empty(),
        )
        .validate(&module)
        .unwrap_or_else(|e| panic!("mesh.wgsl failed to validate: {e:?}"));
        assert!(module.entry_points.iter().any(|e| e.name == "vs_main"));
        assert!(module.entry_points.iter().any(|e| e.name == "fs_main"));
    }

    #[test]
    fn uniform_struct_matches_rust_layout() {
        let module = naga::front::wgsl::parse_str(MESH_SHADER)
            .unwrap_or_else(|e| panic!("mesh.wgsl failed to parse: {e}"));
        let mut layouter = naga::proc::Layouter::default();
        layouter
            .update(module.to_ctx())
            .unwrap_or_else(|e| panic!("layout failed: {e}"));
        let (handle, _) = module
            .types
            .iter()
            .find(|(_, ty)| ty.name.as_deref() == Some("Camera"))
            .unwrap_or_else(|| panic!("no Camera struct"));
        assert_eq!(
            layouter[handle].size as usize,
            size_of::<crate::camera::CameraUniform>()
        );
    }
}
