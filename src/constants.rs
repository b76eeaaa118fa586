/*!
Simulation tuning constants.

These centralize the parameters used by the locomotion controller, the
vehicle controller, and vehicle interaction. Keeping them together makes
tuning easier and keeps behavior consistent across frame rates.

Notes
- Distances are in meters, time in seconds, angles in radians.
- Smoothing values are exponential rates fed through `math::smooth_factor`,
  so the feel is frame-rate independent.
*/

// --- Character locomotion ---

/// Walk-tier target speed (held walk-slow modifier), meters per second.
pub const WALK_SPEED: f32 = 2.0;

/// Run-tier target speed (default, no modifier), meters per second.
pub const RUN_SPEED: f32 = 5.0;

/// Sprint-tier target speed (held sprint modifier), meters per second.
pub const SPRINT_SPEED: f32 = 8.0;

/// Exponential rate of horizontal velocity toward the input target while
/// input is held. Higher = snappier starts.
pub const GROUND_ACCEL_RATE: f32 = 10.0;

/// Exponential rate of horizontal velocity toward zero with no input.
/// Slightly higher than acceleration so stops feel planted.
pub const GROUND_DECEL_RATE: f32 = 12.0;

/// Air-control multiplier for planar (XZ) movement while airborne.
///
/// Convention:
/// - 1.0 = full ground control in air (very floaty)
/// - 0.0 = no air control
pub const AIR_CONTROL_MULTIPLIER: f32 = 0.4;

/// Gravity magnitude in meters per second squared (positive value).
pub const GRAVITY_MPS2: f32 = 9.81;

/// Clamp on downward speed so long falls stay controllable.
pub const TERMINAL_FALL_SPEED_MPS: f32 = 30.0;

/// Upward velocity applied on jump, meters per second.
pub const JUMP_SPEED_MPS: f32 = 6.0;

/// Grace window after leaving the ground during which a jump still fires.
pub const COYOTE_TIME_S: f32 = 0.12;

/// Window during which an early jump request stays pending and fires on landing.
pub const JUMP_BUFFER_S: f32 = 0.1;

/// Height of the fallback ground plane (world Y). Characters and vehicles
/// never drop below this even before the collision index is built.
pub const GROUND_PLANE_Y: f32 = 0.0;

/// Minimum Y component of a contact normal for the surface to count as
/// ground (≈ 60° slope limit).
pub const GROUND_NORMAL_MIN_Y: f32 = 0.5;

/// Exponential rate for turning the character toward its move direction.
pub const FACING_TURN_RATE: f32 = 12.0;

/// Planar speed below which the character is considered idle.
pub const IDLE_SPEED_EPS: f32 = 0.1;

/// Character capsule dimensions.
pub const CHARACTER_CAPSULE_RADIUS: f32 = 0.35;
pub const CHARACTER_CAPSULE_HALF_HEIGHT: f32 = 0.55;

// --- Vehicle dynamics ---

/// Top speed with full throttle and no boost, meters per second.
pub const VEHICLE_TOP_SPEED: f32 = 40.0;

/// Reverse target speed as a fraction of top speed.
pub const VEHICLE_REVERSE_RATIO: f32 = 0.3;

/// Multiplier on effective top speed while boost is held.
pub const VEHICLE_BOOST_MULTIPLIER: f32 = 1.5;

/// Exponential rate of speed toward the throttle target.
pub const VEHICLE_ACCEL_RATE: f32 = 1.2;

/// Exponential rate of speed toward zero with no throttle (rolling friction).
pub const VEHICLE_FRICTION_RATE: f32 = 0.8;

/// Exponential rate of speed toward zero at full brake, scaled by intensity.
pub const VEHICLE_BRAKE_RATE: f32 = 15.0;

/// Speeds below this snap to exactly zero once the throttle is released,
/// avoiding endless creep from exponential decay.
pub const VEHICLE_SPEED_SNAP_EPS: f32 = 0.05;

/// Exponential rate for smoothing raw steer input.
pub const VEHICLE_STEER_SMOOTH_RATE: f32 = 8.0;

/// Yaw rate at full steer and full speed, radians per second.
pub const VEHICLE_TURN_RATE_MAX: f32 = 1.8;

/// Turn-rate multiplier while drifting (grip loss). Fixed rather than scaled
/// by the drift factor so handling stays predictable mid-drift.
pub const VEHICLE_DRIFT_TURN_MULTIPLIER: f32 = 0.6;

/// Drift engages when speed-ratio × |steer| exceeds this threshold...
pub const DRIFT_GRIP_THRESHOLD: f32 = 0.5;

/// ...and the speed ratio alone is at least this much.
pub const DRIFT_MIN_SPEED_RATIO: f32 = 0.4;

/// Exponential rates for the drift factor blending toward 1 / back to 0.
pub const DRIFT_ENGAGE_RATE: f32 = 3.0;
pub const DRIFT_DECAY_RATE: f32 = 2.0;

/// Drift factor below this reads as "not drifting".
pub const DRIFT_ACTIVE_EPS: f32 = 0.05;

/// Maximum cosmetic body roll opposite to steering, radians.
pub const VEHICLE_TILT_MAX_ROLL: f32 = 0.25;

/// Cosmetic pitch per meter of suspension offset, radians.
pub const VEHICLE_SUSPENSION_PITCH: f32 = 0.8;

/// 1-D suspension spring-damper.
pub const SUSPENSION_STIFFNESS: f32 = 60.0;
pub const SUSPENSION_DAMPING: f32 = 8.0;

/// Suspension offset clamp (± meters) preventing runaway oscillation.
pub const SUSPENSION_CLAMP: f32 = 0.15;

/// Impulse scales feeding the suspension from speed deltas (bumps) and
/// steer deltas (weight transfer).
pub const SUSPENSION_SPEED_IMPULSE: f32 = 0.02;
pub const SUSPENSION_STEER_IMPULSE: f32 = 0.5;

/// Bounding-sphere radius used for vehicle collision.
pub const VEHICLE_COLLISION_RADIUS: f32 = 1.6;

/// Height of the vehicle body center above the ground plane.
pub const VEHICLE_RIDE_HEIGHT: f32 = 0.6;

/// A hit counts as frontal when contact normal ⋅ forward is below this.
pub const FRONTAL_HIT_DOT: f32 = -0.5;

/// Fraction of speed kept after a frontal hit (≈70% cut).
pub const FRONTAL_HIT_SPEED_KEEP: f32 = 0.3;

/// Wheel radius used to convert speed into cosmetic wheel spin.
pub const WHEEL_RADIUS: f32 = 0.35;

// --- Vehicle interaction ---

/// Distance within which the enter-vehicle prompt appears, meters.
pub const INTERACTION_RADIUS: f32 = 3.5;

/// Lateral offset from the vehicle center where the character is placed on exit.
pub const EXIT_LATERAL_OFFSET: f32 = 2.2;

// --- Input ---

/// Analog values below this magnitude are treated as zero.
pub const ANALOG_DEADZONE: f32 = 0.1;
