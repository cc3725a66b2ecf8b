use glam::Vec3;

use super::{CollisionMover, Envelope};

/// Analytic mover over an infinite horizontal floor, with an optional flat
/// ceiling. No walls.
#[derive(Debug, Clone)]
pub struct PlaneMover {
    feet: Vec3,
    floor: f32,
    ceiling: Option<f32>,
    envelope: Envelope,
    grounded: bool,
}

impl PlaneMover {
    pub fn new(feet: Vec3, floor: f32, envelope: Envelope) -> Self {
        let feet = Vec3::new(feet.x, feet.y.max(floor), feet.z);
        Self {
            feet,
            floor,
            ceiling: None,
            envelope,
            grounded: false,
        }
    }

    pub fn with_ceiling(mut self, height: f32) -> Self {
        self.ceiling = Some(height);
        self
    }

    pub fn set_ceiling(&mut self, height: Option<f32>) {
        self.ceiling = height;
    }

    pub fn feet_position(&self) -> Vec3 {
        self.feet
    }
}

impl CollisionMover for PlaneMover {
    fn move_by(&mut self, displacement: Vec3) -> Vec3 {
        let start = self.feet;
        let mut target = start + displacement;

        self.grounded = false;
        if target.y <= self.floor {
            target.y = self.floor;
            self.grounded = displacement.y <= 0.0;
        }

        if let Some(ceiling) = self.ceiling {
            let top = target.y + self.envelope.height;
            if top > ceiling {
                target.y = (ceiling - self.envelope.height).max(self.floor);
            }
        }

        self.feet = target;
        target - start
    }

    fn is_grounded(&self) -> bool {
        self.grounded
    }

    fn envelope(&self) -> Envelope {
        self.envelope
    }

    fn set_envelope(&mut self, envelope: Envelope) {
        self.envelope = envelope;
    }

    fn has_headroom(&self, distance: f32) -> bool {
        self.ceiling
            .is_none_or(|ceiling| self.feet.y + distance < ceiling)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn mover() -> PlaneMover {
        PlaneMover::new(Vec3::new(0.0, 1.0, 0.0), 0.0, Envelope::grounded(2.0))
    }

    #[test]
    fn falling_onto_floor_grounds() {
        let mut mover = mover();
        assert!(!mover.is_grounded());

        let applied = mover.move_by(Vec3::new(0.5, -3.0, 0.0));

        assert!(mover.is_grounded());
        assert_eq!(applied, Vec3::new(0.5, -1.0, 0.0));
        assert_eq!(mover.feet_position(), Vec3::new(0.5, 0.0, 0.0));
    }

    #[test]
    fn rising_leaves_ground() {
        let mut mover = mover();
        mover.move_by(Vec3::new(0.0, -2.0, 0.0));
        assert!(mover.is_grounded());

        mover.move_by(Vec3::new(0.0, 0.1, 0.0));
        assert!(!mover.is_grounded());
    }

    #[test]
    fn ceiling_blocks_headroom_and_upward_motion() {
        let mut mover = PlaneMover::new(Vec3::ZERO, 0.0, Envelope::grounded(1.0)).with_ceiling(1.5);

        assert!(!mover.has_headroom(1.6));
        assert!(mover.has_headroom(1.4));

        let applied = mover.move_by(Vec3::new(0.0, 2.0, 0.0));
        assert!((applied.y - 0.5).abs() < 1e-6);
    }
}
