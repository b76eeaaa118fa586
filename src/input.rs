//! Input boundary.
//!
//! The core never touches raw device events. The host samples its devices
//! once per frame into a [`FrameInput`] snapshot: held keys by logical
//! meaning, edge-detected presses, normalized stick vectors, trigger values
//! in [0,1], and the accumulated pointer delta (consumed by the external
//! camera, carried here so the whole input surface is one value).
//!
//! The merge functions below unify digital and analog sources; analog values
//! take priority when outside the deadzone.

use nalgebra as na;

use crate::constants::{ANALOG_DEADZONE, RUN_SPEED, SPRINT_SPEED, WALK_SPEED};

/// One frame of sampled input. Plain data; fields the active mode does not
/// use are simply ignored.
#[derive(Clone, Copy, Debug, Default)]
pub struct FrameInput {
    // Held directional keys.
    pub forward: bool,
    pub back: bool,
    pub left: bool,
    pub right: bool,

    // Held locomotion modifiers.
    pub sprint: bool,
    pub walk_slow: bool,

    // Held vehicle keys.
    pub throttle: bool,
    pub reverse: bool,
    pub brake: bool,
    pub boost: bool,

    // Edge-detected presses (true on the frame the button went down).
    pub jump_pressed: bool,
    pub interact_pressed: bool,

    // Analog sources. Sticks are normalized; +y is forward, +x is right.
    pub move_stick: na::Vector2<f32>,
    pub steer_axis: f32,
    pub accel_trigger: f32,
    pub brake_trigger: f32,

    /// Accumulated pointer delta since the last poll. Forwarded to the
    /// camera layer; the core does not interpret it.
    pub pointer_delta: na::Vector2<f32>,
}

/// Speed tier selected by held modifiers. Mutually exclusive; the fastest
/// active modifier wins (sprint > walk-slow > run-default).
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SpeedTier {
    Walk,
    Run,
    Sprint,
}

impl SpeedTier {
    /// Target speed for this tier, meters per second.
    #[inline]
    pub fn target_speed(self) -> f32 {
        match self {
            SpeedTier::Walk => WALK_SPEED,
            SpeedTier::Run => RUN_SPEED,
            SpeedTier::Sprint => SPRINT_SPEED,
        }
    }
}

/// Merged locomotion intent for one frame.
#[derive(Clone, Copy, Debug)]
pub struct MoveInput {
    /// Camera-space move axes: x = right, y = forward. Normalized when
    /// non-zero.
    pub axes: na::Vector2<f32>,
    pub tier: SpeedTier,
    pub jump_pressed: bool,
}

/// Merged vehicle intent for one frame.
#[derive(Clone, Copy, Debug)]
pub struct DriveInput {
    /// Throttle in [-1, 1]; negative is reverse.
    pub accel: f32,
    /// Brake intensity in [0, 1].
    pub brake: f32,
    /// Steer in [-1, 1]; positive steers right.
    pub steer: f32,
    pub braking: bool,
    pub boosting: bool,
}

impl FrameInput {
    /// Merge keys and stick into locomotion intent.
    pub fn move_input(&self) -> MoveInput {
        let mut axes = na::Vector2::<f32>::zeros();

        if self.move_stick.norm() > ANALOG_DEADZONE {
            axes = self.move_stick;
        } else {
            if self.forward {
                axes.y += 1.0;
            }
            if self.back {
                axes.y -= 1.0;
            }
            if self.right {
                axes.x += 1.0;
            }
            if self.left {
                axes.x -= 1.0;
            }
        }

        let norm = axes.norm();
        if norm > 1.0 {
            axes /= norm;
        }

        let tier = if self.sprint {
            SpeedTier::Sprint
        } else if self.walk_slow {
            SpeedTier::Walk
        } else {
            SpeedTier::Run
        };

        MoveInput {
            axes,
            tier,
            jump_pressed: self.jump_pressed,
        }
    }

    /// Merge keys, triggers, and the steer axis into vehicle intent.
    pub fn drive_input(&self) -> DriveInput {
        let accel = if self.accel_trigger > ANALOG_DEADZONE {
            self.accel_trigger.clamp(0.0, 1.0)
        } else if self.throttle {
            1.0
        } else if self.reverse {
            -1.0
        } else {
            0.0
        };

        let brake = if self.brake_trigger > ANALOG_DEADZONE {
            self.brake_trigger.clamp(0.0, 1.0)
        } else if self.brake {
            1.0
        } else {
            0.0
        };

        let steer = if self.steer_axis.abs() > ANALOG_DEADZONE {
            self.steer_axis.clamp(-1.0, 1.0)
        } else if self.right && !self.left {
            1.0
        } else if self.left && !self.right {
            -1.0
        } else {
            0.0
        };

        DriveInput {
            accel,
            brake,
            steer,
            braking: brake > 0.0,
            boosting: self.boost,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn diagonal_keys_are_normalized() {
        let input = FrameInput {
            forward: true,
            right: true,
            ..Default::default()
        };
        let mv = input.move_input();
        assert!((mv.axes.norm() - 1.0).abs() < 1.0e-6);
        assert!(mv.axes.x > 0.0 && mv.axes.y > 0.0);
    }

    #[test]
    fn fastest_modifier_wins_tier_selection() {
        let both = FrameInput {
            sprint: true,
            walk_slow: true,
            ..Default::default()
        };
        assert_eq!(both.move_input().tier, SpeedTier::Sprint);

        let walk = FrameInput {
            walk_slow: true,
            ..Default::default()
        };
        assert_eq!(walk.move_input().tier, SpeedTier::Walk);

        let none = FrameInput::default();
        assert_eq!(none.move_input().tier, SpeedTier::Run);
    }

    #[test]
    fn stick_overrides_digital_direction() {
        let input = FrameInput {
            back: true,
            move_stick: na::Vector2::new(0.0, 0.8),
            ..Default::default()
        };
        let mv = input.move_input();
        assert!(mv.axes.y > 0.0, "stick forward should win over back key");
    }

    #[test]
    fn triggers_override_digital_throttle() {
        let input = FrameInput {
            reverse: true,
            accel_trigger: 0.6,
            ..Default::default()
        };
        let drive = input.drive_input();
        assert!((drive.accel - 0.6).abs() < 1.0e-6);
    }

    #[test]
    fn deadzone_falls_back_to_keys() {
        let input = FrameInput {
            throttle: true,
            accel_trigger: 0.05,
            steer_axis: 0.02,
            left: true,
            ..Default::default()
        };
        let drive = input.drive_input();
        assert_eq!(drive.accel, 1.0);
        assert_eq!(drive.steer, -1.0);
    }

    #[test]
    fn brake_flag_follows_intensity() {
        let idle = FrameInput::default().drive_input();
        assert!(!idle.braking);

        let braking = FrameInput {
            brake_trigger: 0.4,
            ..Default::default()
        }
        .drive_input();
        assert!(braking.braking);
        assert!((braking.brake - 0.4).abs() < 1.0e-6);
    }
}
