use clap::ValueEnum;
use glam::Vec2;

use fpcontroller::InputEvent;

/// Canned input sequences, keyed by frame.
#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum Script {
    /// Walk forward.
    Walk,
    /// Sprint up to speed, then crouch into a slide.
    SprintSlide,
    /// Hop in place once a second.
    Jump,
    /// Walk, sprint, slide, stand, jump and look around.
    Tour,
}

impl Script {
    pub fn events(self, frame: u32, fps: u32) -> Vec<InputEvent> {
        let at = |seconds: f32| frame == (seconds * fps as f32).round() as u32;

        let mut events = Vec::new();
        match self {
            Script::Walk => {
                if frame == 0 {
                    events.push(InputEvent::Move(Vec2::Y));
                }
            }
            Script::SprintSlide => {
                if frame == 0 {
                    events.push(InputEvent::Move(Vec2::Y));
                    events.push(InputEvent::Sprint(true));
                }
                if at(1.5) {
                    events.push(InputEvent::Crouch(true));
                }
                if at(3.0) {
                    events.push(InputEvent::Crouch(false));
                    events.push(InputEvent::Sprint(false));
                }
            }
            Script::Jump => {
                if frame % fps == fps / 2 {
                    events.push(InputEvent::Jump);
                }
            }
            Script::Tour => {
                if frame == 0 {
                    events.push(InputEvent::Move(Vec2::Y));
                }
                if at(1.0) {
                    events.push(InputEvent::Sprint(true));
                }
                if at(2.0) {
                    events.push(InputEvent::Crouch(true));
                }
                if at(3.0) {
                    events.push(InputEvent::Crouch(false));
                    events.push(InputEvent::Sprint(false));
                }
                if at(3.5) {
                    events.push(InputEvent::Jump);
                }
                if at(4.5) {
                    events.push(InputEvent::Move(Vec2::new(1.0, 1.0)));
                }
                let seconds = frame as f32 / fps as f32;
                if (4.5..5.5).contains(&seconds) {
                    events.push(InputEvent::Look(Vec2::new(15.0, -4.0)));
                }
            }
        }
        events
    }
}
