use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, JsonSchema)]
#[schemars(title = "Lighting", inline)]
#[serde(default)]
/// Single point light, ambient term and distance fog.
pub struct LightingOptions {
    /// Light position in world space.
    #[schemars(skip)]
    pub light_position: [f32; 3],
    /// Diffuse light intensity (RGBA).
    #[schemars(skip)]
    pub light_intensity: [f32; 4],
    /// Ambient intensity (RGBA).
    #[schemars(skip)]
    pub ambient_intensity: [f32; 4],
    /// Distance from the player beyond which geometry fades out.
    #[schemars(title = "Fog Distance", range(min = 0.5, max = 50.0), extend("step" = 0.5))]
    pub fog_distance: f32,
    /// Whether distance fog is applied.
    #[schemars(title = "Fog")]
    pub fog_enabled: bool,
}

impl Default for LightingOptions {
    fn default() -> Self {
        Self {
            light_position: [10.866, 5.0, -15.001],
            light_intensity: [0.8, 0.8, 0.8, 1.0],
            ambient_intensity: [0.2, 0.2, 0.2, 1.0],
            fog_distance: 4.0,
            fog_enabled: false,
        }
    }
}
