use super::queue::{Action, InputEvent};

/// Frozen view of the controls for one simulation step.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct InputSnapshot {
    pub left: bool,
    pub right: bool,
    /// Aims a dash upward. Also counts as a jump press.
    pub up: bool,
    pub down: bool,
    pub jump: bool,
    pub dash: bool,
    pub shoot: bool,
    pub reload: bool,
    /// Mouse motion accumulated since the previous snapshot.
    pub aim_delta_y: f64,
    /// Latest aim stick deflection.
    pub aim_stick_y: f64,
}

impl InputSnapshot {
    /// Builder helper: mark `action` as held.
    pub fn with(mut self, action: Action) -> Self {
        self.set(action, true);
        self
    }

    pub fn with_aim(mut self, mouse_dy: f64, stick_y: f64) -> Self {
        self.aim_delta_y = mouse_dy;
        self.aim_stick_y = stick_y;
        self
    }

    fn set(&mut self, action: Action, held: bool) {
        let slot = match action {
            Action::Left => &mut self.left,
            Action::Right => &mut self.right,
            Action::Up => &mut self.up,
            Action::Down => &mut self.down,
            Action::Jump => &mut self.jump,
            Action::Dash => &mut self.dash,
            Action::Shoot => &mut self.shoot,
            Action::Reload => &mut self.reload,
        };
        *slot = held;
    }
}

/// Running control state folded from [`InputEvent`]s.
#[derive(Debug, Clone, Default)]
pub struct InputState {
    held: [bool; Action::COUNT],
    pending_aim_dy: f64,
    stick_y: f64,
}

impl InputState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn apply(&mut self, event: InputEvent) {
        match event {
            InputEvent::Press(action) => self.held[action.index()] = true,
            InputEvent::Release(action) => self.held[action.index()] = false,
            InputEvent::AimDelta { dy } => {
                if dy.is_finite() {
                    self.pending_aim_dy += dy;
                }
            }
            InputEvent::AimStick { y } => {
                self.stick_y = if y.is_finite() { y.clamp(-1.0, 1.0) } else { 0.0 };
            }
            InputEvent::ReleaseAll => {
                self.held = [false; Action::COUNT];
                self.stick_y = 0.0;
            }
        }
    }

    pub fn apply_all(&mut self, events: impl IntoIterator<Item = InputEvent>) {
        for event in events {
            self.apply(event);
        }
    }

    /// Take the snapshot for this step. Mouse motion is consumed.
    pub fn snapshot(&mut self) -> InputSnapshot {
        let mut snap = InputSnapshot {
            aim_delta_y: std::mem::take(&mut self.pending_aim_dy),
            aim_stick_y: self.stick_y,
            ..InputSnapshot::default()
        };
        for action in Action::ALL {
            snap.set(action, self.held[action.index()]);
        }
        snap
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn press_and_release_track_held_state() {
        let mut state = InputState::new();
        state.apply(InputEvent::Press(Action::Left));
        state.apply(InputEvent::Press(Action::Dash));
        let snap = state.snapshot();
        assert!(snap.left && snap.dash);
        assert!(!snap.right);

        state.apply(InputEvent::Release(Action::Dash));
        let snap = state.snapshot();
        assert!(snap.left);
        assert!(!snap.dash);
    }

    #[test]
    fn mouse_delta_is_consumed_by_snapshot() {
        let mut state = InputState::new();
        state.apply_all([
            InputEvent::AimDelta { dy: 3.0 },
            InputEvent::AimDelta { dy: 4.0 },
        ]);
        assert_eq!(state.snapshot().aim_delta_y, 7.0);
        assert_eq!(state.snapshot().aim_delta_y, 0.0);
    }

    #[test]
    fn stick_is_clamped_and_persistent() {
        let mut state = InputState::new();
        state.apply(InputEvent::AimStick { y: 3.0 });
        assert_eq!(state.snapshot().aim_stick_y, 1.0);
        assert_eq!(state.snapshot().aim_stick_y, 1.0);
    }

    #[test]
    fn release_all_clears_everything_held() {
        let mut state = InputState::new();
        state.apply(InputEvent::Press(Action::Shoot));
        state.apply(InputEvent::ReleaseAll);
        assert_eq!(state.snapshot(), InputSnapshot::default());
    }
}
