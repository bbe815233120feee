use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::input::{HeldKey, KeyAction};

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(from = "BindingTable", into = "BindingTable")]
/// Configurable keyboard bindings mapping actions to key codes.
pub struct KeybindingOptions {
    /// Maps action → key string (e.g. `FollowActor` → `"KeyP"`).
    pub bindings: HashMap<KeyAction, String>,
    /// Maps continuous (held) input → key string.
    pub held: HashMap<HeldKey, String>,
    /// Reverse lookup cache (key string → action).
    key_to_action: HashMap<String, KeyAction>,
    /// Reverse lookup cache (key string → held input).
    key_to_held: HashMap<String, HeldKey>,
}

/// Serialized form: only the forward maps, reverse maps rebuilt on load.
#[derive(Serialize, Deserialize)]
#[serde(default)]
struct BindingTable {
    bindings: HashMap<KeyAction, String>,
    held: HashMap<HeldKey, String>,
}

impl Default for BindingTable {
    fn default() -> Self {
        let KeybindingOptions { bindings, held, .. } =
            KeybindingOptions::default();
        Self { bindings, held }
    }
}

impl From<BindingTable> for KeybindingOptions {
    fn from(table: BindingTable) -> Self {
        let mut opts = Self {
            bindings: table.bindings,
            held: table.held,
            key_to_action: HashMap::new(),
            key_to_held: HashMap::new(),
        };
        opts.rebuild_reverse_map();
        opts
    }
}

impl From<KeybindingOptions> for BindingTable {
    fn from(opts: KeybindingOptions) -> Self {
        Self {
            bindings: opts.bindings,
            held: opts.held,
        }
    }
}

impl Default for KeybindingOptions {
    fn default() -> Self {
        let bindings = HashMap::from([
            (KeyAction::FollowActor, "KeyP".into()),
            (KeyAction::OverlookMap, "KeyM".into()),
            (KeyAction::FirstPerson, "KeyO".into()),
            (KeyAction::FreeCamera, "KeyF".into()),
            (KeyAction::Quit, "Escape".into()),
        ]);
        let held = HashMap::from([
            (HeldKey::YawLeft, "ArrowLeft".into()),
            (HeldKey::YawRight, "ArrowRight".into()),
            (HeldKey::PitchUp, "ArrowUp".into()),
            (HeldKey::PitchDown, "ArrowDown".into()),
            (HeldKey::RollLeft, "PageUp".into()),
            (HeldKey::RollRight, "PageDown".into()),
            (HeldKey::Forward, "Home".into()),
            (HeldKey::Backward, "End".into()),
        ]);

        let mut opts = Self {
            bindings,
            held,
            key_to_action: HashMap::new(),
            key_to_held: HashMap::new(),
        };
        opts.rebuild_reverse_map();
        opts
    }
}

impl KeybindingOptions {
    /// Rebuild the reverse lookup maps (key string → action / held input).
    pub fn rebuild_reverse_map(&mut self) {
        self.key_to_action.clear();
        for (action, key) in &self.bindings {
            let _ = self.key_to_action.insert(key.clone(), *action);
        }
        self.key_to_held.clear();
        for (held, key) in &self.held {
            let _ = self.key_to_held.insert(key.clone(), *held);
        }
    }

    /// Look up the discrete action for a key string.
    #[must_use]
    pub fn lookup(&self, key: &str) -> Option<KeyAction> {
        self.key_to_action.get(key).copied()
    }

    /// Look up the held (continuous) input for a key string.
    #[must_use]
    pub fn lookup_held(&self, key: &str) -> Option<HeldKey> {
        self.key_to_held.get(key).copied()
    }
}
