/*!
Arcade vehicle dynamics.

Not a rigid-body model: a smoothed scalar speed plus a heading, chosen for
responsive feel and bounded complexity. Steering, drift, body tilt, and the
1-D suspension are layered on top; collision is a single bounding sphere
against the collision index.

All smoothing runs through `math::smooth_factor`, so acceleration curves and
drift blending behave the same at any frame rate.
*/

use crate::collision::{CollisionIndex, Quat, Vec3};
use crate::constants::{
    DRIFT_ACTIVE_EPS, DRIFT_DECAY_RATE, DRIFT_ENGAGE_RATE, DRIFT_GRIP_THRESHOLD,
    DRIFT_MIN_SPEED_RATIO, FRONTAL_HIT_DOT, FRONTAL_HIT_SPEED_KEEP, GROUND_PLANE_Y,
    SUSPENSION_CLAMP, SUSPENSION_DAMPING, SUSPENSION_SPEED_IMPULSE, SUSPENSION_STEER_IMPULSE,
    SUSPENSION_STIFFNESS, VEHICLE_ACCEL_RATE, VEHICLE_BOOST_MULTIPLIER, VEHICLE_BRAKE_RATE,
    VEHICLE_COLLISION_RADIUS, VEHICLE_DRIFT_TURN_MULTIPLIER, VEHICLE_FRICTION_RATE,
    VEHICLE_REVERSE_RATIO, VEHICLE_RIDE_HEIGHT, VEHICLE_SPEED_SNAP_EPS, VEHICLE_STEER_SMOOTH_RATE,
    VEHICLE_SUSPENSION_PITCH, VEHICLE_TILT_MAX_ROLL, VEHICLE_TOP_SPEED, VEHICLE_TURN_RATE_MAX,
    WHEEL_RADIUS,
};
use crate::events::{EventQueue, SimEvent};
use crate::input::DriveInput;
use crate::locomotion::CharacterId;
use crate::math::{approach, forward_from_yaw, right_from_yaw, smooth_factor, wrap_angle};

/// Index of a vehicle in the simulation's vehicle list.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct VehicleId(pub usize);

/// Simulation state for one vehicle. Created at world load; dynamic state is
/// reset to zero on every exit event.
#[derive(Clone, Debug)]
pub struct VehicleBody {
    pub id: VehicleId,
    /// Body center at ride height, world space.
    pub position: Vec3,
    /// Heading, radians. Drives translation; the full orientation below adds
    /// cosmetic bank and pitch on top.
    pub yaw: f32,
    /// Full orientation for rendering (yaw + cosmetic tilt).
    pub orientation: Quat,
    /// Signed forward speed; negative is reverse.
    pub speed: f32,
    /// Drift factor in [0, 1]; how much the vehicle slides vs. grips.
    pub drift_factor: f32,
    pub occupied: bool,
    /// Weak back-reference; the vehicle never owns the driver.
    pub driver: Option<CharacterId>,
    /// Cosmetic wheel rotation advance this frame, radians.
    pub wheel_spin_delta: f32,
    /// Smoothed steer in [-1, 1].
    steer: f32,
    suspension_offset: f32,
    suspension_velocity: f32,
}

impl VehicleBody {
    pub fn new(id: VehicleId, position: Vec3) -> Self {
        Self {
            id,
            position: Vec3::new(
                position.x,
                position.y.max(GROUND_PLANE_Y + VEHICLE_RIDE_HEIGHT),
                position.z,
            ),
            yaw: 0.0,
            orientation: Quat::identity(),
            speed: 0.0,
            drift_factor: 0.0,
            occupied: false,
            driver: None,
            wheel_spin_delta: 0.0,
            steer: 0.0,
            suspension_offset: 0.0,
            suspension_velocity: 0.0,
        }
    }

    /// Local forward axis (heading only, ignores cosmetic tilt).
    #[inline]
    pub fn forward(&self) -> Vec3 {
        forward_from_yaw(self.yaw)
    }

    /// Local lateral axis, used for exit placement.
    #[inline]
    pub fn right(&self) -> Vec3 {
        right_from_yaw(self.yaw)
    }

    /// Render position: body center plus the suspension bob. The offset is
    /// applied after the ground clamp and is clamped well below ride height,
    /// so it never dips under the ground.
    #[inline]
    pub fn render_position(&self) -> Vec3 {
        self.position + Vec3::new(0.0, self.suspension_offset, 0.0)
    }

    /// Zero all dynamic state. Runs on every exit event.
    pub fn reset_dynamics(&mut self) {
        self.speed = 0.0;
        self.steer = 0.0;
        self.drift_factor = 0.0;
        self.suspension_offset = 0.0;
        self.suspension_velocity = 0.0;
        self.wheel_spin_delta = 0.0;
    }

    /// One frame of vehicle dynamics.
    pub fn update(
        &mut self,
        input: &DriveInput,
        dt: f32,
        index: &CollisionIndex,
        events: &mut EventQueue,
    ) {
        let dt = dt.max(0.0);
        let boost = if input.boosting {
            VEHICLE_BOOST_MULTIPLIER
        } else {
            1.0
        };
        let top_speed = VEHICLE_TOP_SPEED * boost;

        let speed_before = self.speed;
        let steer_before = self.steer;

        // Throttle: exponential approach toward the target speed; friction
        // decay toward zero when coasting, with a snap to kill creep.
        if input.accel > 0.0 {
            let target = input.accel * top_speed;
            self.speed = approach(self.speed, target, smooth_factor(VEHICLE_ACCEL_RATE, dt));
        } else if input.accel < 0.0 {
            let target = input.accel * top_speed * VEHICLE_REVERSE_RATIO;
            self.speed = approach(self.speed, target, smooth_factor(VEHICLE_ACCEL_RATE, dt));
        } else {
            self.speed = approach(self.speed, 0.0, smooth_factor(VEHICLE_FRICTION_RATE, dt));
            if self.speed.abs() < VEHICLE_SPEED_SNAP_EPS {
                self.speed = 0.0;
            }
        }

        // Braking lerps toward zero on top, scaled by intensity.
        if input.braking {
            let factor = smooth_factor(VEHICLE_BRAKE_RATE, dt) * input.brake.clamp(0.0, 1.0);
            self.speed = approach(self.speed, 0.0, factor);
            if input.accel == 0.0 && self.speed.abs() < VEHICLE_SPEED_SNAP_EPS {
                self.speed = 0.0;
            }
        }

        self.speed = self
            .speed
            .clamp(-VEHICLE_REVERSE_RATIO * top_speed, top_speed);

        // Steering: smooth the raw input, then turn at a rate that scales
        // with signed speed (no steering while nearly stationary, inverted
        // in reverse) and loses grip while drifting.
        self.steer = approach(
            self.steer,
            input.steer,
            smooth_factor(VEHICLE_STEER_SMOOTH_RATE, dt),
        );
        let speed_ratio = (self.speed.abs() / VEHICLE_TOP_SPEED).clamp(0.0, 1.0);

        // Drift blends toward 1 when the grip budget is exceeded at speed,
        // and decays back otherwise.
        let slide_demand = speed_ratio * self.steer.abs();
        let drifting_hard =
            slide_demand > DRIFT_GRIP_THRESHOLD && speed_ratio > DRIFT_MIN_SPEED_RATIO;
        self.drift_factor = if drifting_hard {
            approach(self.drift_factor, 1.0, smooth_factor(DRIFT_ENGAGE_RATE, dt))
        } else {
            approach(self.drift_factor, 0.0, smooth_factor(DRIFT_DECAY_RATE, dt))
        };
        if self.drift_factor > DRIFT_ACTIVE_EPS {
            events.push(SimEvent::VehicleDrifting {
                vehicle: self.id,
                factor: self.drift_factor,
            });
        }

        // Fixed grip-loss multiplier while drifting (not scaled by the
        // drift factor).
        let grip = if self.drift_factor > DRIFT_ACTIVE_EPS {
            VEHICLE_DRIFT_TURN_MULTIPLIER
        } else {
            1.0
        };
        let signed_ratio = (self.speed / VEHICLE_TOP_SPEED).clamp(-1.0, 1.0);
        self.yaw = wrap_angle(
            self.yaw - self.steer * VEHICLE_TURN_RATE_MAX * signed_ratio * grip * dt,
        );

        // Suspension: speed deltas bump the body, steer deltas transfer
        // weight; a spring-damper brings it back, clamped against runaway.
        self.suspension_velocity -= (self.speed - speed_before) * SUSPENSION_SPEED_IMPULSE;
        self.suspension_velocity -= (self.steer - steer_before) * SUSPENSION_STEER_IMPULSE;
        let spring_accel = -SUSPENSION_STIFFNESS * self.suspension_offset
            - SUSPENSION_DAMPING * self.suspension_velocity;
        self.suspension_velocity += spring_accel * dt;
        self.suspension_offset = (self.suspension_offset + self.suspension_velocity * dt)
            .clamp(-SUSPENSION_CLAMP, SUSPENSION_CLAMP);

        // Translate along the local forward axis.
        let forward = self.forward();
        self.position += forward * self.speed * dt;

        // Sphere collision: frontal hits bleed most of the speed; every hit
        // pushes out along the contact normal by the penetration depth.
        let result = index.query_sphere(self.position, VEHICLE_COLLISION_RADIUS);
        if result.collided {
            if result.normal.dot(&forward) < FRONTAL_HIT_DOT && self.speed > 0.0 {
                self.speed *= FRONTAL_HIT_SPEED_KEEP;
            }
            self.position += result.normal * result.depth;
        }

        // Ground clamp before the cosmetic suspension offset is applied.
        let ride_floor = GROUND_PLANE_Y + VEHICLE_RIDE_HEIGHT;
        if self.position.y < ride_floor {
            self.position.y = ride_floor;
        }

        // Cosmetic orientation: bank opposite to steering with speed, pitch
        // with the suspension bob. Neither affects the physics above.
        let roll = -self.steer * VEHICLE_TILT_MAX_ROLL * speed_ratio;
        let pitch = self.suspension_offset * VEHICLE_SUSPENSION_PITCH;
        self.orientation = Quat::from_axis_angle(&Vec3::y_axis(), self.yaw)
            * Quat::from_axis_angle(&Vec3::x_axis(), pitch)
            * Quat::from_axis_angle(&Vec3::z_axis(), roll);

        // Wheel spin is purely cosmetic; the renderer applies it to any
        // child mesh tagged as a wheel.
        self.wheel_spin_delta = self.speed * dt / WHEEL_RADIUS;
    }
}
