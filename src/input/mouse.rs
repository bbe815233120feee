use glam::Vec2;

/// Which camera gesture a held mouse button drives.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Gesture {
    /// Left button: translate along the camera's right/up axes.
    Drag,
    /// Right button: rotate about the camera's right/up axes.
    Orbit,
}

/// Tracks cursor position and the active drag/orbit gesture.
///
/// Deltas are measured from the previous cursor sample; pressing a button
/// restarts measurement so the first motion of a gesture never jumps.
#[derive(Debug, Default)]
pub(crate) struct GestureState {
    last_pos: Option<Vec2>,
    active: Option<Gesture>,
}

impl GestureState {
    /// Start a gesture. A gesture already in progress keeps priority.
    pub(crate) fn begin(&mut self, gesture: Gesture) {
        if self.active.is_none() {
            self.active = Some(gesture);
        }
    }

    /// End a gesture if it is the active one.
    pub(crate) fn end(&mut self, gesture: Gesture) {
        if self.active == Some(gesture) {
            self.active = None;
        }
    }

    pub(crate) fn active(&self) -> Option<Gesture> {
        self.active
    }

    /// Record a cursor sample and return the delta since the previous one.
    pub(crate) fn moved_to(&mut self, pos: Vec2) -> Vec2 {
        let delta = self.last_pos.map_or(Vec2::ZERO, |last| pos - last);
        self.last_pos = Some(pos);
        delta
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn first_sample_has_zero_delta() {
        let mut state = GestureState::default();
        assert_eq!(state.moved_to(Vec2::new(5.0, 5.0)), Vec2::ZERO);
        assert_eq!(state.moved_to(Vec2::new(8.0, 4.0)), Vec2::new(3.0, -1.0));
    }

    #[test]
    fn first_gesture_wins_until_released() {
        let mut state = GestureState::default();
        state.begin(Gesture::Drag);
        state.begin(Gesture::Orbit);
        assert_eq!(state.active(), Some(Gesture::Drag));
        state.end(Gesture::Orbit);
        assert_eq!(state.active(), Some(Gesture::Drag));
        state.end(Gesture::Drag);
        assert_eq!(state.active(), None);
    }
}
