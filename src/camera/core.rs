use std::fmt;

use glam::{Mat3, Mat4, Vec2, Vec3};

use crate::options::LightingOptions;
use crate::util::transform::mat3_padded;

/// Which update rule drives the camera each frame.
///
/// Exactly one mode is active at a time and transitions only happen
/// through explicit calls on the controller.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CameraMode {
    /// Keyboard free-fly plus mouse drag/orbit/zoom.
    #[default]
    Free,
    /// Fixed pose above the middle of the map.
    MapOverlook,
    /// Fixed height above the followed actor.
    ActorFollow,
    /// At the player, looking along its facing.
    FirstPerson,
}

impl fmt::Display for CameraMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Free => "free",
            Self::MapOverlook => "map",
            Self::ActorFollow => "follow",
            Self::FirstPerson => "first person",
        };
        f.write_str(name)
    }
}

/// Direction of a wheel zoom step.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ZoomDirection {
    /// Move against the heading.
    In,
    /// Move along the heading.
    Out,
}

impl ZoomDirection {
    /// Sign applied to the heading.
    #[must_use]
    pub fn sign(self) -> f32 {
        match self {
            Self::In => -1.0,
            Self::Out => 1.0,
        }
    }
}

/// Per-frame continuous input.
///
/// Produced once per frame by the input processor and consumed
/// immediately by the camera.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct InputDelta {
    /// Rotation intent about x, y, z; each component in {-1, 0, 1}.
    pub rotation: Vec3,
    /// Movement intent along x, y, z; each component in {-1, 0, 1}.
    pub movement: Vec3,
    /// Raw cursor motion accumulated since the previous frame.
    ///
    /// Informational: the camera never reads it. Drag and orbit are applied
    /// per cursor event through [`crate::engine::Command::Drag`] and
    /// [`crate::engine::Command::Orbit`], so replaying this total here would
    /// move the camera twice.
    pub mouse: Vec2,
    /// Seconds since the previous frame.
    pub elapsed: f32,
}

impl InputDelta {
    /// Whether any rotation or movement key is held.
    #[must_use]
    pub fn has_key_intent(&self) -> bool {
        self.rotation != Vec3::ZERO || self.movement != Vec3::ZERO
    }
}

/// Matrices handed to the renderer each frame.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RenderMatrices {
    /// Projection (GL clip convention, depth in `[-1, 1]`).
    pub perspective: Mat4,
    /// World to camera, the inverse of the pose.
    pub view: Mat4,
    /// Rotation-only part of the view for light directions.
    pub lighting: Mat3,
}

impl RenderMatrices {
    /// Perspective as 16 column-major floats.
    #[must_use]
    pub fn perspective_cols(&self) -> [f32; 16] {
        self.perspective.to_cols_array()
    }

    /// View as 16 column-major floats.
    #[must_use]
    pub fn view_cols(&self) -> [f32; 16] {
        self.view.to_cols_array()
    }

    /// Lighting matrix as 9 column-major floats.
    #[must_use]
    pub fn lighting_cols(&self) -> [f32; 9] {
        self.lighting.to_cols_array()
    }
}

#[repr(C)]
#[derive(Debug, Copy, Clone, bytemuck::Pod, bytemuck::Zeroable)]
/// GPU uniform buffer holding the camera matrices and light/fog settings.
pub struct CameraUniform {
    /// Perspective projection.
    pub perspective: [[f32; 4]; 4],
    /// World-to-camera transform.
    pub view: [[f32; 4]; 4],
    /// Lighting matrix, each column padded to 16 bytes.
    pub lighting: [[f32; 4]; 3],
    /// World-space light position (w unused).
    pub light_position: [f32; 4],
    /// Diffuse light intensity.
    pub light_intensity: [f32; 4],
    /// Ambient light intensity.
    pub ambient_intensity: [f32; 4],
    /// World-space centre of the fog (w unused).
    pub player_position: [f32; 4],
    /// Distance at which fog is fully opaque.
    pub fog_distance: f32,
    /// 1 when fog is enabled, 0 otherwise.
    pub fog_enabled: u32,
    /// Padding for GPU alignment.
    pub(crate) _pad: [f32; 2],
}

impl CameraUniform {
    /// Pack matrices and lighting settings into GPU layout.
    #[must_use]
    pub fn new(matrices: &RenderMatrices, lighting: &LightingOptions) -> Self {
        let [x, y, z] = lighting.light_position;
        Self {
            perspective: matrices.perspective.to_cols_array_2d(),
            view: matrices.view.to_cols_array_2d(),
            lighting: mat3_padded(&matrices.lighting),
            light_position: [x, y, z, 1.0],
            light_intensity: lighting.light_intensity,
            ambient_intensity: lighting.ambient_intensity,
            player_position: [0.0, 0.0, 0.0, 1.0],
            fog_distance: lighting.fog_distance,
            fog_enabled: u32::from(lighting.fog_enabled),
            _pad: [0.0; 2],
        }
    }

    /// Centre the fog on `position`.
    #[must_use]
    pub fn with_player_position(mut self, position: Vec3) -> Self {
        self.player_position = position.extend(1.0).to_array();
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn uniform_matches_wgsl_size() {
        // 2 mat4 + mat3 (3 x vec4) + 4 vec4 + 4 scalars
        assert_eq!(size_of::<CameraUniform>(), 128 + 48 + 64 + 16);
    }

    #[test]
    fn uniform_copies_lighting() {
        let matrices = RenderMatrices {
            perspective: Mat4::IDENTITY,
            view: Mat4::from_translation(Vec3::new(1.0, 2.0, 3.0)),
            lighting: Mat3::IDENTITY,
        };
        let lighting = LightingOptions {
            fog_enabled: true,
            ..Default::default()
        };
        let uniform = CameraUniform::new(&matrices, &lighting);
        assert_eq!(uniform.view[3], [1.0, 2.0, 3.0, 1.0]);
        assert_eq!(uniform.light_position, [10.866, 5.0, -15.001, 1.0]);
        assert_eq!(uniform.fog_enabled, 1);
        let uniform = uniform.with_player_position(Vec3::new(0.5, 0.5, 0.0));
        assert_eq!(uniform.player_position, [0.5, 0.5, 0.0, 1.0]);
        assert_eq!(uniform.lighting[1], [0.0, 1.0, 0.0, 0.0]);
    }

    #[test]
    fn key_intent_ignores_mouse() {
        let delta = InputDelta {
            mouse: Vec2::new(3.0, 4.0),
            ..Default::default()
        };
        assert!(!delta.has_key_intent());
        let delta = InputDelta {
            movement: Vec3::Z,
            ..Default::default()
        };
        assert!(delta.has_key_intent());
    }

    #[test]
    fn zoom_in_moves_against_heading() {
        assert_eq!(ZoomDirection::In.sign(), -1.0);
        assert_eq!(ZoomDirection::Out.sign(), 1.0);
    }
}
