use std::f32::consts::PI;
use std::fmt;

use glam::{IVec2, Mat3, Mat4, Vec2, Vec3, Vec4};

use super::core::{CameraMode, InputDelta, RenderMatrices, ZoomDirection};
use crate::options::CameraOptions;
use crate::util::transform::{
    euler_rotation, translation, upper_left, yaw_from_direction,
};

/// Errors from camera matrix maintenance.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum CameraError {
    /// A resize was requested with a zero dimension. The previous
    /// projection is kept.
    InvalidViewport {
        /// Requested width in pixels.
        width: u32,
        /// Requested height in pixels.
        height: u32,
    },
    /// The pose has no inverse.
    SingularMatrix,
    /// The pose's homogeneous `w` is too close to zero for drag/orbit
    /// scaling. The pose is left untouched.
    DegenerateTransform {
        /// The offending `w` value.
        w: f32,
    },
}

impl fmt::Display for CameraError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidViewport { width, height } => {
                write!(f, "invalid viewport size {width}x{height}")
            }
            Self::SingularMatrix => f.write_str("camera pose is singular"),
            Self::DegenerateTransform { w } => {
                write!(f, "degenerate camera transform (w = {w})")
            }
        }
    }
}

impl std::error::Error for CameraError {}

/// Owns the camera pose and projection and updates them under the four
/// camera modes.
///
/// The pose maps camera-local space to world space. Its columns are the
/// camera's right, up and backward axes plus its position. Every update
/// goes through [`apply_world_transform`](Self::apply_world_transform),
/// which left-multiplies the delta so the camera moves in world space.
#[derive(Debug, Clone)]
pub struct CameraController {
    options: CameraOptions,
    pose: Mat4,
    perspective: Mat4,
    mode: CameraMode,
    aspect: f32,
}

impl CameraController {
    /// Create a controller at the free-camera home pose for a viewport
    /// of `width` x `height` pixels.
    pub fn new(
        options: CameraOptions,
        width: u32,
        height: u32,
    ) -> Result<Self, CameraError> {
        let mut controller = Self {
            options,
            pose: Mat4::IDENTITY,
            perspective: Mat4::IDENTITY,
            mode: CameraMode::Free,
            aspect: 1.0,
        };
        controller.resize(width, height)?;
        controller.set_free_camera_home();
        Ok(controller)
    }

    /// The active camera mode.
    #[must_use]
    pub fn mode(&self) -> CameraMode {
        self.mode
    }

    /// Switch modes without touching the pose.
    pub fn set_mode(&mut self, mode: CameraMode) {
        if mode != self.mode {
            log::debug!("camera mode {} -> {mode}", self.mode);
        }
        self.mode = mode;
    }

    /// Current camera-to-world pose.
    #[must_use]
    pub fn pose(&self) -> Mat4 {
        self.pose
    }

    /// Current projection matrix.
    #[must_use]
    pub fn perspective(&self) -> Mat4 {
        self.perspective
    }

    /// Viewport aspect ratio (width / height).
    #[must_use]
    pub fn aspect(&self) -> f32 {
        self.aspect
    }

    /// Camera tuning constants.
    #[must_use]
    pub fn options(&self) -> &CameraOptions {
        &self.options
    }

    /// Recompute the projection for a new viewport size.
    ///
    /// The y axis is scaled by the aspect ratio and depth follows the GL
    /// clip convention (`[-1, 1]`).
    pub fn resize(
        &mut self,
        width: u32,
        height: u32,
    ) -> Result<(), CameraError> {
        if width == 0 || height == 0 {
            return Err(CameraError::InvalidViewport { width, height });
        }
        let aspect = width as f32 / height as f32;
        let CameraOptions {
            frustum_scale: scale,
            z_near: near,
            z_far: far,
            ..
        } = self.options;

        self.aspect = aspect;
        self.perspective = Mat4::from_cols(
            Vec4::new(scale, 0.0, 0.0, 0.0),
            Vec4::new(0.0, scale * aspect, 0.0, 0.0),
            Vec4::new(0.0, 0.0, (far + near) / (near - far), -1.0),
            Vec4::new(0.0, 0.0, (2.0 * far * near) / (near - far), 0.0),
        );
        Ok(())
    }

    /// Compose `delta` onto the pose in world space (`pose = delta * pose`).
    pub fn apply_world_transform(&mut self, delta: Mat4) {
        self.pose = delta * self.pose;
    }

    /// Keyboard free-fly step: rotate in place, then move along the
    /// rotated heading.
    pub fn update_free_fly(&mut self, input: &InputDelta) {
        let angles =
            input.rotation * self.options.rotation_speed * input.elapsed;
        self.apply_world_transform(euler_rotation(angles));

        let heading = self.pose.z_axis.truncate();
        let speed = self.options.movement_speed * input.elapsed;
        let movement = heading * input.movement * speed;
        self.apply_world_transform(translation(movement));
    }

    /// Pan along the camera's right and up axes by a raw mouse delta.
    ///
    /// Each step is divided by `pan_damping * w²` where `w` is the pose's
    /// homogeneous coordinate. Every public operation keeps the pose rigid,
    /// so `w` stays 1 and the pan step does not grow with distance.
    pub fn update_drag(&mut self, mouse: Vec2) -> Result<(), CameraError> {
        let w = self.guarded_w()?;
        let right = self.pose.x_axis.truncate();
        let factor = -mouse.x / (self.options.pan_damping * w * w);
        self.apply_world_transform(translation(right * factor));

        let w = self.guarded_w()?;
        let up = self.pose.y_axis.truncate();
        let factor = mouse.y / (self.options.pan_damping * w * w);
        self.apply_world_transform(translation(up * factor));
        Ok(())
    }

    /// Rotate about the camera's right axis (vertical motion) and then its
    /// up axis (horizontal motion).
    pub fn update_orbit(&mut self, mouse: Vec2) -> Result<(), CameraError> {
        let w = self.guarded_w()?;
        let right = self.pose.x_axis.truncate();
        let angles = right * mouse.y / (w * self.options.orbit_damping);
        self.apply_world_transform(euler_rotation(angles));

        let w = self.guarded_w()?;
        let up = self.pose.y_axis.truncate();
        let angles = up * -mouse.x / (w * self.options.orbit_damping);
        self.apply_world_transform(euler_rotation(angles));
        Ok(())
    }

    /// Wheel zoom. Only the z component of the heading is used.
    pub fn zoom(&mut self, direction: ZoomDirection) {
        let heading = self.pose.z_axis.truncate() * direction.sign();
        let step = Vec3::new(0.0, 0.0, heading.z);
        self.apply_world_transform(translation(step));
    }

    /// Reset to the free-fly home pose: turned to face forward, tilted
    /// down 135° and lifted to `(0, 1, 1)`.
    pub fn set_free_camera_home(&mut self) {
        let face_forward = euler_rotation(Vec3::new(0.0, 0.0, -PI));
        let tilt = euler_rotation(Vec3::new(135f32.to_radians(), 0.0, 0.0));
        self.pose = translation(Vec3::new(0.0, 1.0, 1.0)) * tilt * face_forward;
        self.set_mode(CameraMode::Free);
    }

    /// Hover at `actor_height` above the given tile.
    pub fn follow_actor(&mut self, tile: IVec2) {
        self.set_mode(CameraMode::ActorFollow);
        let ts = self.options.tile_size;
        self.pose = translation(Vec3::new(
            tile.x as f32 * ts,
            tile.y as f32 * ts,
            self.options.actor_height,
        ));
    }

    /// Hover at `map_height` above the middle of a `width` x `height` tile
    /// map whose first tile is at `origin`.
    pub fn overlook_map(&mut self, origin: IVec2, width: u32, height: u32) {
        self.set_mode(CameraMode::MapOverlook);
        let ts = self.options.tile_size;
        let half = Vec2::new(width as f32, height as f32) / 2.0;
        let center = origin.as_vec2() + half;
        self.pose = translation(Vec3::new(
            center.x * ts,
            center.y * ts + self.options.map_y_offset,
            self.options.map_height,
        ));
    }

    /// Stand at `position` and look along the 2D `direction`.
    ///
    /// A zero direction falls back to a heading of 0.
    pub fn first_person(&mut self, position: Vec3, direction: Vec2) {
        self.set_mode(CameraMode::FirstPerson);
        self.pose = translation(position);

        let yaw = yaw_from_direction(direction).unwrap_or_else(|| {
            log::warn!("first person camera with zero direction, using yaw 0");
            0.0
        });
        let heading = euler_rotation(Vec3::new(0.0, 0.0, yaw));
        let tilt =
            euler_rotation(Vec3::new(self.options.first_person_tilt, 0.0, 0.0));
        self.apply_world_transform(tilt * heading);
    }

    /// World-to-camera transform (the inverse of the pose).
    pub fn view_matrix(&self) -> Result<Mat4, CameraError> {
        let det = self.pose.determinant();
        if !det.is_finite() || det.abs() < f32::EPSILON {
            return Err(CameraError::SingularMatrix);
        }
        Ok(self.pose.inverse())
    }

    /// Rotation-only block of the view matrix.
    pub fn lighting_matrix(&self) -> Result<Mat3, CameraError> {
        Ok(upper_left(&self.view_matrix()?))
    }

    /// Everything the renderer needs for this frame.
    pub fn matrices(&self) -> Result<RenderMatrices, CameraError> {
        let view = self.view_matrix()?;
        Ok(RenderMatrices {
            perspective: self.perspective,
            view,
            lighting: upper_left(&view),
        })
    }

    fn guarded_w(&self) -> Result<f32, CameraError> {
        let w = self.pose.w_axis.w;
        if w.is_finite() && w.abs() >= self.options.min_homogeneous_w {
            Ok(w)
        } else {
            log::warn!("ignoring mouse gesture, pose w = {w}");
            Err(CameraError::DegenerateTransform { w })
        }
    }
}
