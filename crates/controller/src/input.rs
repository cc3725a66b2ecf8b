use glam::Vec2;

/// Input consumed by one controller tick.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct InputSnapshot {
    /// x strafes right, y moves forward. Each axis in [-1, 1].
    pub move_axis: Vec2,
    /// Raw device delta accumulated since the previous tick.
    pub look_delta: Vec2,
    pub sprint_held: bool,
    /// Set for exactly one tick per press.
    pub jump_pressed: bool,
    pub crouch_held: bool,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum InputEvent {
    Move(Vec2),
    Look(Vec2),
    Sprint(bool),
    Jump,
    Crouch(bool),
}

/// Collects device events between ticks and hands them to the controller
/// as one [`InputSnapshot`].
#[derive(Debug, Default)]
pub struct InputState {
    move_axis: Vec2,
    look_delta: Vec2,
    sprint_held: bool,
    jump_pending: bool,
    crouch_held: bool,
}

impl InputState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn apply(&mut self, event: InputEvent) {
        match event {
            InputEvent::Move(axis) => self.move_axis = axis,
            InputEvent::Look(delta) => self.look_delta += delta,
            InputEvent::Sprint(held) => self.sprint_held = held,
            InputEvent::Jump => self.jump_pending = true,
            InputEvent::Crouch(held) => self.crouch_held = held,
        }
    }

    /// Builds this tick's snapshot, draining the look delta and jump press.
    pub fn snapshot(&mut self) -> InputSnapshot {
        let move_axis = if self.move_axis.is_finite() {
            self.move_axis.clamp(Vec2::NEG_ONE, Vec2::ONE)
        } else {
            Vec2::ZERO
        };

        InputSnapshot {
            move_axis,
            look_delta: std::mem::take(&mut self.look_delta),
            sprint_held: self.sprint_held,
            jump_pressed: std::mem::take(&mut self.jump_pending),
            crouch_held: self.crouch_held,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn look_accumulates_and_drains() {
        let mut input = InputState::new();
        input.apply(InputEvent::Look(Vec2::new(1.0, 2.0)));
        input.apply(InputEvent::Look(Vec2::new(3.0, -1.0)));

        assert_eq!(input.snapshot().look_delta, Vec2::new(4.0, 1.0));
        assert_eq!(input.snapshot().look_delta, Vec2::ZERO);
    }

    #[test]
    fn jump_is_an_edge() {
        let mut input = InputState::new();
        input.apply(InputEvent::Jump);

        assert!(input.snapshot().jump_pressed);
        assert!(!input.snapshot().jump_pressed);
    }

    #[test]
    fn levels_persist_between_snapshots() {
        let mut input = InputState::new();
        input.apply(InputEvent::Move(Vec2::new(0.0, 1.0)));
        input.apply(InputEvent::Sprint(true));
        input.apply(InputEvent::Crouch(true));

        for _ in 0..2 {
            let snapshot = input.snapshot();
            assert_eq!(snapshot.move_axis, Vec2::new(0.0, 1.0));
            assert!(snapshot.sprint_held);
            assert!(snapshot.crouch_held);
        }

        input.apply(InputEvent::Crouch(false));
        assert!(!input.snapshot().crouch_held);
    }

    #[test]
    fn move_axis_is_clamped() {
        let mut input = InputState::new();
        input.apply(InputEvent::Move(Vec2::new(3.0, -7.0)));
        assert_eq!(input.snapshot().move_axis, Vec2::new(1.0, -1.0));

        input.apply(InputEvent::Move(Vec2::new(f32::NAN, 0.5)));
        assert_eq!(input.snapshot().move_axis, Vec2::ZERO);
    }
}
