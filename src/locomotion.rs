/*!
Player locomotion controller.

Turns merged input plus the camera yaw into character velocity, integrates
gravity and jumping, and resolves the capsule against the collision index.
One `update` per rendered frame; the controller owns the character's
transform and nobody else mutates it.

Timing forgiveness is built from two countdowns:
- coyote time: while grounded the window is refreshed every frame; once
  airborne it counts down, and a jump stays legal until it expires.
- jump buffering: a jump pressed while ineligible is remembered briefly and
  fires on landing, so inputs a few frames early still work.
*/

use crate::collision::{CapsuleSpec, CollisionIndex, Vec3};
use crate::constants::{
    AIR_CONTROL_MULTIPLIER, CHARACTER_CAPSULE_HALF_HEIGHT, CHARACTER_CAPSULE_RADIUS, COYOTE_TIME_S,
    FACING_TURN_RATE, GRAVITY_MPS2, GROUND_ACCEL_RATE, GROUND_DECEL_RATE, GROUND_NORMAL_MIN_Y,
    GROUND_PLANE_Y, IDLE_SPEED_EPS, JUMP_BUFFER_S, JUMP_SPEED_MPS, RUN_SPEED, SPRINT_SPEED,
    TERMINAL_FALL_SPEED_MPS, WALK_SPEED,
};
use crate::events::{EventQueue, SimEvent};
use crate::input::MoveInput;
use crate::math::{
    approach, forward_from_yaw, right_from_yaw, smooth_factor, turn_toward, yaw_from_direction,
};
use crate::timer::Countdown;

/// Identifies the player character (the vehicle's driver back-reference).
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct CharacterId(pub u32);

/// Locomotion state machine value. Exactly one active per character;
/// transitions are driven by speed, the grounded flag, and jump intent.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum LocomotionState {
    Idle,
    Walk,
    Run,
    Sprint,
    Jump,
    Falling,
}

/// Simulation state for a player-controlled character.
#[derive(Clone, Debug)]
pub struct CharacterBody {
    /// Capsule center, world space.
    pub position: Vec3,
    /// Facing yaw, radians. Characters never bank or pitch.
    pub yaw: f32,
    /// World-space velocity.
    pub velocity: Vec3,
    pub grounded: bool,
    /// Hidden while the character is seated in a vehicle.
    pub visible: bool,
    pub capsule: CapsuleSpec,
    coyote: Countdown,
    jump_buffer: Countdown,
}

impl CharacterBody {
    pub fn new(position: Vec3) -> Self {
        Self {
            position,
            yaw: 0.0,
            velocity: Vec3::zeros(),
            grounded: false,
            visible: true,
            capsule: CapsuleSpec {
                radius: CHARACTER_CAPSULE_RADIUS,
                half_height: CHARACTER_CAPSULE_HALF_HEIGHT,
            },
            coyote: Countdown::default(),
            jump_buffer: Countdown::default(),
        }
    }

    /// Planar (XZ) speed, used by the animation observer to pick a clip.
    #[inline]
    pub fn planar_speed(&self) -> f32 {
        (self.velocity.x * self.velocity.x + self.velocity.z * self.velocity.z).sqrt()
    }

    /// Zero out motion and timers, e.g. when control is handed to a vehicle.
    pub fn reset_dynamics(&mut self) {
        self.velocity = Vec3::zeros();
        self.grounded = false;
        self.coyote.clear();
        self.jump_buffer.clear();
    }
}

/// Per-frame locomotion update over a [`CharacterBody`].
pub struct LocomotionController {
    pub body: CharacterBody,
    state: LocomotionState,
}

impl LocomotionController {
    pub fn new(position: Vec3) -> Self {
        Self {
            body: CharacterBody::new(position),
            state: LocomotionState::Idle,
        }
    }

    #[inline]
    pub fn state(&self) -> LocomotionState {
        self.state
    }

    /// One frame of locomotion: input basis, timers, jump, gravity,
    /// horizontal blend, integration, collision resolve, facing, state.
    ///
    /// `camera_yaw` is the yaw scalar fed by the owning camera each frame;
    /// the controller never reads the camera itself.
    pub fn update(
        &mut self,
        input: &MoveInput,
        camera_yaw: f32,
        dt: f32,
        index: &CollisionIndex,
        events: &mut EventQueue,
    ) {
        let dt = dt.max(0.0);
        let body = &mut self.body;

        // Camera-relative move direction.
        let forward = forward_from_yaw(camera_yaw);
        let right = right_from_yaw(camera_yaw);
        let mut move_dir = right * input.axes.x + forward * input.axes.y;
        let has_input = move_dir.norm_squared() > 1.0e-8;
        if has_input {
            move_dir.normalize_mut();
        }

        // Coyote window refreshes while grounded, counts down airborne.
        if body.grounded {
            body.coyote.set(COYOTE_TIME_S);
        } else {
            body.coyote.tick(dt);
        }
        body.jump_buffer.tick(dt);

        // Jump request: fire when eligible, otherwise buffer it.
        if input.jump_pressed {
            if body.grounded || body.coyote.active() {
                Self::launch(body);
            } else {
                body.jump_buffer.set(JUMP_BUFFER_S);
            }
        }

        // Gravity integrates while airborne.
        if !body.grounded {
            body.velocity.y =
                (body.velocity.y - GRAVITY_MPS2 * dt).max(-TERMINAL_FALL_SPEED_MPS);
        }

        // Horizontal velocity blends toward the input target; different rates
        // for accelerating vs stopping, reduced in the air.
        let target = if has_input {
            move_dir * input.tier.target_speed()
        } else {
            Vec3::zeros()
        };
        let mut rate = if has_input {
            GROUND_ACCEL_RATE
        } else {
            GROUND_DECEL_RATE
        };
        if !body.grounded {
            rate *= AIR_CONTROL_MULTIPLIER;
        }
        let factor = smooth_factor(rate, dt);
        body.velocity.x = approach(body.velocity.x, target.x, factor);
        body.velocity.z = approach(body.velocity.z, target.z, factor);

        // Integrate and resolve.
        body.position += body.velocity * dt;
        let was_grounded = body.grounded;
        Self::resolve_collisions(body, index);

        // A buffered jump fires the moment we land, exactly once.
        if body.grounded && !was_grounded && body.jump_buffer.active() {
            body.jump_buffer.clear();
            Self::launch(body);
        }

        // Face the move direction while grounded; airborne characters keep
        // their last facing.
        if body.grounded && has_input {
            if let Some(target_yaw) = yaw_from_direction(move_dir) {
                body.yaw = turn_toward(body.yaw, target_yaw, smooth_factor(FACING_TURN_RATE, dt));
            }
        }

        let next = Self::derive_state(body);
        if next != self.state {
            log::debug!("locomotion state {:?} -> {:?}", self.state, next);
            events.push(SimEvent::LocomotionChanged {
                from: self.state,
                to: next,
            });
            self.state = next;
        }
    }

    /// Apply the jump impulse and spend the grace windows so a single press
    /// can never fire twice.
    fn launch(body: &mut CharacterBody) {
        body.velocity.y = JUMP_SPEED_MPS;
        body.grounded = false;
        body.coyote.clear();
    }

    /// Push the capsule out of world geometry and re-derive the grounded
    /// flag. The fixed ground plane catches characters while the index is
    /// unbuilt (and under any geometry gaps).
    fn resolve_collisions(body: &mut CharacterBody, index: &CollisionIndex) {
        body.grounded = false;

        let result = index.query_capsule(&body.capsule, body.position);
        if result.collided {
            body.position += result.normal * result.depth;
            // A mostly-vertical normal is ground: stop falling.
            if result.normal.y > GROUND_NORMAL_MIN_Y {
                body.grounded = true;
                body.velocity.y = body.velocity.y.max(0.0);
            }
        }

        let floor = GROUND_PLANE_Y + body.capsule.foot_offset();
        if body.position.y <= floor + 1.0e-4 {
            body.position.y = floor;
            body.grounded = true;
            body.velocity.y = body.velocity.y.max(0.0);
        }
    }

    /// Map grounded flag, vertical velocity, and planar speed onto the
    /// state machine value.
    fn derive_state(body: &CharacterBody) -> LocomotionState {
        if !body.grounded {
            return if body.velocity.y >= 0.0 {
                LocomotionState::Jump
            } else {
                LocomotionState::Falling
            };
        }

        let speed = body.planar_speed();
        if speed < IDLE_SPEED_EPS {
            LocomotionState::Idle
        } else if speed > (RUN_SPEED + SPRINT_SPEED) * 0.5 {
            LocomotionState::Sprint
        } else if speed > (WALK_SPEED + RUN_SPEED) * 0.5 {
            LocomotionState::Run
        } else {
            LocomotionState::Walk
        }
    }
}
