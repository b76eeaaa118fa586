//! Frame-rate independent smoothing and yaw helpers.

use std::f32::consts::PI;

use crate::collision::Vec3;

/// Blend factor for exponential decay toward a target over `dt` seconds.
///
/// `factor = 1 - exp(-rate * dt)`, so repeated application at any frame rate
/// follows the same continuous curve: it converges monotonically and never
/// overshoots the target.
#[inline]
pub fn smooth_factor(rate: f32, dt: f32) -> f32 {
    1.0 - (-rate.max(0.0) * dt.max(0.0)).exp()
}

/// Move `current` toward `target` by the given blend factor.
#[inline]
pub fn approach(current: f32, target: f32, factor: f32) -> f32 {
    current + (target - current) * factor.clamp(0.0, 1.0)
}

/// Wrap an angle to (-PI, PI].
#[inline]
pub fn wrap_angle(a: f32) -> f32 {
    let mut a = a % (2.0 * PI);
    if a > PI {
        a -= 2.0 * PI;
    } else if a <= -PI {
        a += 2.0 * PI;
    }
    a
}

/// Rotate `current` toward `target` along the shortest arc by `factor`.
#[inline]
pub fn turn_toward(current: f32, target: f32, factor: f32) -> f32 {
    wrap_angle(current + wrap_angle(target - current) * factor.clamp(0.0, 1.0))
}

/// World-space forward vector for a yaw angle.
///
/// Convention (matches `yaw_from_direction`): yaw 0 faces -Z.
#[inline]
pub fn forward_from_yaw(yaw: f32) -> Vec3 {
    Vec3::new(-yaw.sin(), 0.0, -yaw.cos())
}

/// World-space right vector for a yaw angle (forward × up).
#[inline]
pub fn right_from_yaw(yaw: f32) -> Vec3 {
    Vec3::new(yaw.cos(), 0.0, -yaw.sin())
}

/// Yaw angle facing a planar direction, or `None` when the direction is
/// too small to define one.
#[inline]
pub fn yaw_from_direction(dir: Vec3) -> Option<f32> {
    let planar_sq = dir.x * dir.x + dir.z * dir.z;
    if planar_sq <= 1.0e-12 {
        return None;
    }
    Some((-dir.x).atan2(-dir.z))
}
