use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, JsonSchema)]
#[schemars(title = "Camera", inline)]
#[serde(default)]
/// Camera projection, speed and placement constants.
pub struct CameraOptions {
    /// Edge length of one map tile in model space.
    #[schemars(skip)]
    pub tile_size: f32,
    /// Free-fly rotation speed in radians per second.
    #[schemars(title = "Rotate Speed", range(min = 0.1, max = 6.0), extend("step" = 0.05))]
    pub rotation_speed: f32,
    /// Free-fly movement speed in model units per second.
    #[schemars(title = "Move Speed", range(min = 0.5, max = 20.0), extend("step" = 0.5))]
    pub movement_speed: f32,
    /// Near clipping plane distance.
    #[schemars(skip)]
    pub z_near: f32,
    /// Far clipping plane distance.
    #[schemars(skip)]
    pub z_far: f32,
    /// Frustum scale (focal length) of the perspective projection.
    #[schemars(title = "Frustum Scale", range(min = 0.25, max = 4.0), extend("step" = 0.05))]
    pub frustum_scale: f32,
    /// Extra divisor applied on top of `w²` when drag-panning.
    #[schemars(title = "Pan Damping", range(min = 0.1, max = 500.0), extend("step" = 0.1))]
    pub pan_damping: f32,
    /// Divisor applied with `w` when orbiting (`w * orbit_damping`).
    #[schemars(title = "Orbit Damping", range(min = 10.0, max = 1000.0), extend("step" = 10.0))]
    pub orbit_damping: f32,
    /// Camera height above an actor in follow mode.
    #[schemars(skip)]
    pub actor_height: f32,
    /// Camera height above the map in overlook mode.
    #[schemars(skip)]
    pub map_height: f32,
    /// Offset along y applied to the overlook position.
    #[schemars(skip)]
    pub map_y_offset: f32,
    /// Tilt about x (radians) that turns the first-person view level.
    #[schemars(skip)]
    pub first_person_tilt: f32,
    /// Smallest homogeneous `w` accepted by drag and orbit before the
    /// update is rejected.
    #[schemars(skip)]
    pub min_homogeneous_w: f32,
}

impl Default for CameraOptions {
    fn default() -> Self {
        Self {
            tile_size: 0.25,
            rotation_speed: 90f32.to_radians(),
            movement_speed: 5.0,
            z_near: 0.1,
            z_far: 1000.0,
            frustum_scale: 1.0,
            pan_damping: 1.0,
            orbit_damping: 100.0,
            actor_height: 4.0,
            map_height: 10.0,
            map_y_offset: -1.0,
            first_person_tilt: 90f32.to_radians(),
            min_homogeneous_w: 1e-4,
        }
    }
}
