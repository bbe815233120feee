use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, JsonSchema)]
#[schemars(title = "Display", inline)]
#[serde(default)]
/// Window and frame pacing settings.
pub struct DisplayOptions {
    /// Initial window width in logical pixels.
    #[schemars(skip)]
    pub width: u32,
    /// Initial window height in logical pixels.
    #[schemars(skip)]
    pub height: u32,
    /// Window title prefix (FPS is appended at runtime).
    #[schemars(skip)]
    pub title: String,
    /// Background clear color (RGB, 0-1).
    #[schemars(skip)]
    pub clear_color: [f32; 3],
    /// Frame cap (0 = unlimited).
    #[schemars(title = "FPS Limit", range(min = 0, max = 300))]
    pub target_fps: u32,
    /// Pace presentation with the monitor refresh.
    #[schemars(title = "VSync")]
    pub vsync: bool,
    /// Show the axis gizmo in the level group.
    #[schemars(title = "Show Axes")]
    pub show_axes: bool,
}

impl Default for DisplayOptions {
    fn default() -> Self {
        Self {
            width: 800,
            height: 600,
            title: "Tileview".into(),
            clear_color: [0.0, 0.0, 0.0],
            target_fps: 0,
            vsync: true,
            show_axes: true,
        }
    }
}
