use glam::Vec3;
use serde::{Deserialize, Serialize};

/// Discrete actions that can be bound to a key press.
///
/// Serde serializes as `snake_case` strings so TOML presets stay readable:
/// ```toml
/// [keybindings.bindings]
/// follow_actor = "KeyP"
/// quit = "Escape"
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum KeyAction {
    /// Hover above the player actor.
    FollowActor,
    /// Look down on the whole level.
    OverlookMap,
    /// Look out of the player's eyes.
    FirstPerson,
    /// Reset the camera to the free-fly home pose.
    FreeCamera,
    /// Close the viewer.
    Quit,
}

/// Continuous inputs sampled every frame while the key is down.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum HeldKey {
    /// Rotate about +y.
    YawLeft,
    /// Rotate about -y.
    YawRight,
    /// Rotate about -x.
    PitchUp,
    /// Rotate about +x.
    PitchDown,
    /// Rotate about -z.
    RollLeft,
    /// Rotate about +z.
    RollRight,
    /// Move along -heading.
    Forward,
    /// Move along +heading.
    Backward,
}

impl HeldKey {
    const ALL: [Self; 8] = [
        Self::YawLeft,
        Self::YawRight,
        Self::PitchUp,
        Self::PitchDown,
        Self::RollLeft,
        Self::RollRight,
        Self::Forward,
        Self::Backward,
    ];

    fn bit(self) -> u8 {
        1 << (self as u8)
    }
}

/// Set of currently held keys, folded into per-axis intents.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct HeldKeys(u8);

impl HeldKeys {
    /// Mark a key as pressed or released.
    pub fn set(&mut self, key: HeldKey, pressed: bool) {
        if pressed {
            self.0 |= key.bit();
        } else {
            self.0 &= !key.bit();
        }
    }

    /// Whether a key is currently held.
    #[must_use]
    pub fn contains(self, key: HeldKey) -> bool {
        self.0 & key.bit() != 0
    }

    /// Whether nothing is held.
    #[must_use]
    pub fn is_empty(self) -> bool {
        self.0 == 0
    }

    /// Iterate the held keys.
    pub fn iter(self) -> impl Iterator<Item = HeldKey> {
        HeldKey::ALL.into_iter().filter(move |k| self.contains(*k))
    }

    /// Rotation intent per axis, each component in {-1, 0, 1}.
    ///
    /// When both keys of a pair are down, left/up/page-up win.
    #[must_use]
    pub fn rotation_intent(self) -> Vec3 {
        Vec3::new(
            self.axis(HeldKey::PitchUp, HeldKey::PitchDown, -1.0),
            self.axis(HeldKey::YawLeft, HeldKey::YawRight, 1.0),
            self.axis(HeldKey::RollLeft, HeldKey::RollRight, -1.0),
        )
    }

    /// Movement intent per axis, each component in {-1, 0, 1}. Only z
    /// is driven by keys.
    #[must_use]
    pub fn movement_intent(self) -> Vec3 {
        Vec3::new(
            0.0,
            0.0,
            self.axis(HeldKey::Forward, HeldKey::Backward, -1.0),
        )
    }

    fn axis(self, first: HeldKey, second: HeldKey, first_sign: f32) -> f32 {
        if self.contains(first) {
            first_sign
        } else if self.contains(second) {
            -first_sign
        } else {
            0.0
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_has_no_intent() {
        let keys = HeldKeys::default();
        assert!(keys.is_empty());
        assert_eq!(keys.rotation_intent(), Vec3::ZERO);
        assert_eq!(keys.movement_intent(), Vec3::ZERO);
    }

    #[test]
    fn arrows_map_to_rotation_axes() {
        let mut keys = HeldKeys::default();
        keys.set(HeldKey::YawLeft, true);
        keys.set(HeldKey::PitchUp, true);
        keys.set(HeldKey::RollRight, true);
        assert_eq!(keys.rotation_intent(), Vec3::new(-1.0, 1.0, 1.0));

        keys.set(HeldKey::YawLeft, false);
        keys.set(HeldKey::YawRight, true);
        assert_eq!(keys.rotation_intent().y, -1.0);
    }

    #[test]
    fn home_moves_against_heading() {
        let mut keys = HeldKeys::default();
        keys.set(HeldKey::Forward, true);
        assert_eq!(keys.movement_intent(), Vec3::new(0.0, 0.0, -1.0));
        keys.set(HeldKey::Backward, true);
        // Home wins when both are down.
        assert_eq!(keys.movement_intent().z, -1.0);
    }

    #[test]
    fn opposing_pair_prefers_first_key() {
        let mut keys = HeldKeys::default();
        keys.set(HeldKey::YawLeft, true);
        keys.set(HeldKey::YawRight, true);
        assert_eq!(keys.rotation_intent().y, 1.0);
        keys.set(HeldKey::PitchUp, true);
        keys.set(HeldKey::PitchDown, true);
        assert_eq!(keys.rotation_intent().x, -1.0);
    }

    #[test]
    fn release_clears_key() {
        let mut keys = HeldKeys::default();
        keys.set(HeldKey::RollLeft, true);
        assert_eq!(keys.iter().collect::<Vec<_>>(), vec![HeldKey::RollLeft]);
        keys.set(HeldKey::RollLeft, false);
        assert!(keys.is_empty());
    }
}
