//! Centralized runtime options with TOML preset support.
//!
//! All tweakable settings (display, camera constants, lighting,
//! keybindings) are consolidated here. Options serialize to/from TOML so a
//! preset file only needs the sections it overrides.

mod camera;
mod display;
mod keybindings;
mod lighting;

use std::path::Path;

pub use camera::CameraOptions;
pub use display::DisplayOptions;
pub use keybindings::KeybindingOptions;
pub use lighting::LightingOptions;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::error::TileviewError;

/// Top-level options container. All sub-structs use `#[serde(default)]` so
/// partial TOML files (e.g. only overriding `[camera]`) work correctly.
#[derive(
    Debug, Clone, Serialize, Deserialize, PartialEq, Default, JsonSchema,
)]
#[serde(default)]
pub struct Options {
    /// Window and frame pacing settings.
    pub display: DisplayOptions,
    /// Camera projection, speed and placement constants.
    pub camera: CameraOptions,
    /// Light and fog parameters.
    pub lighting: LightingOptions,
    /// Keyboard binding options.
    #[schemars(skip)]
    pub keybindings: KeybindingOptions,
}

impl Options {
    /// Generate JSON Schema describing the UI-exposed options.
    #[must_use]
    pub fn json_schema() -> schemars::Schema {
        schemars::schema_for!(Options)
    }

    /// Load options from a TOML file. Missing fields use defaults.
    pub fn load(path: &Path) -> Result<Self, TileviewError> {
        let content =
            std::fs::read_to_string(path).map_err(TileviewError::Io)?;
        let opts: Self = toml::from_str(&content)
            .map_err(|e| TileviewError::OptionsParse(e.to_string()))?;
        log::info!("loaded options from {}", path.display());
        Ok(opts)
    }

    /// Save options to a TOML file (pretty-printed).
    pub fn save(&self, path: &Path) -> Result<(), TileviewError> {
        let content = toml::to_string_pretty(self)
            .map_err(|e| TileviewError::OptionsParse(e.to_string()))?;
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).map_err(TileviewError::Io)?;
        }
        std::fs::write(path, content).map_err(TileviewError::Io)
    }

    /// List available preset names (TOML file stems) in a directory.
    #[must_use]
    pub fn list_presets(dir: &Path) -> Vec<String> {
        let mut names = Vec::new();
        if let Ok(entries) = std::fs::read_dir(dir) {
            for entry in entries.flatten() {
                let path = entry.path();
                if path.extension().is_some_and(|ext| ext == "toml") {
                    if let Some(stem) =
                        path.file_stem().and_then(|s| s.to_str())
                    {
                        names.push(stem.to_owned());
                    }
                }
            }
        }
        names.sort();
        names
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::input::{HeldKey, KeyAction};

    #[test]
    fn default_round_trips_through_toml() {
        let opts = Options::default();
        let toml_str = toml::to_string_pretty(&opts).unwrap();
        let parsed: Options = toml::from_str(&toml_str).unwrap();
        assert_eq!(opts, parsed);
    }

    #[test]
    fn partial_toml_fills_defaults() {
        let toml_str = r"
[camera]
tile_size = 0.5
";
        let opts: Options = toml::from_str(toml_str).unwrap();
        assert_eq!(opts.camera.tile_size, 0.5);
        // Everything else should be default
        assert_eq!(opts.camera.z_far, 1000.0);
        assert_eq!(opts.display.width, 800);
        assert_eq!(opts.lighting.fog_distance, 4.0);
    }

    #[test]
    fn keybinding_lookup() {
        let opts = Options::default();
        assert_eq!(
            opts.keybindings.lookup("KeyP"),
            Some(KeyAction::FollowActor)
        );
        assert_eq!(opts.keybindings.lookup("Escape"), Some(KeyAction::Quit));
        assert_eq!(opts.keybindings.lookup("KeyZ"), None);
        assert_eq!(
            opts.keybindings.lookup_held("PageDown"),
            Some(HeldKey::RollRight)
        );
    }

    #[test]
    fn keybindings_survive_reload() {
        let toml_str = r#"
[keybindings.bindings]
follow_actor = "KeyA"
"#;
        let opts: Options = toml::from_str(toml_str).unwrap();
        assert_eq!(
            opts.keybindings.lookup("KeyA"),
            Some(KeyAction::FollowActor)
        );
        // Held keys were not overridden.
        assert_eq!(
            opts.keybindings.lookup_held("Home"),
            Some(HeldKey::Forward)
        );
    }

    #[test]
    fn save_then_load() {
        let dir = std::env::temp_dir().join("tileview-options-test");
        let path = dir.join("preset.toml");
        let mut opts = Options::default();
        opts.camera.movement_speed = 2.5;
        opts.save(&path).unwrap();
        assert_eq!(Options::load(&path).unwrap(), opts);
        assert!(Options::list_presets(&dir).contains(&"preset".to_owned()));
    }

    #[test]
    fn schema_has_expected_properties() {
        let schema_value =
            serde_json::to_value(Options::json_schema()).unwrap();
        let props = schema_value["properties"].as_object().unwrap();

        assert!(props.contains_key("display"));
        assert!(props.contains_key("camera"));
        assert!(props.contains_key("lighting"));
        assert!(!props.contains_key("keybindings"));

        let camera = &props["camera"]["properties"];
        assert!(camera.get("rotation_speed").is_some());
        assert!(camera.get("tile_size").is_none());
    }
}
