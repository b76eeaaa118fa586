//! Small countdown timer shared by coyote time, jump buffering, and other
//! per-frame grace windows.

/// A countdown in seconds, advanced by wall-clock delta each frame.
///
/// The zero value is an expired timer, so `Countdown::default()` starts inert.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Countdown {
    remaining: f32,
}

impl Countdown {
    /// Start (or restart) the countdown at `seconds`.
    #[inline]
    pub fn set(&mut self, seconds: f32) {
        self.remaining = seconds.max(0.0);
    }

    /// Advance by `dt`, saturating at zero.
    #[inline]
    pub fn tick(&mut self, dt: f32) {
        self.remaining = (self.remaining - dt.max(0.0)).max(0.0);
    }

    /// True while time remains on the countdown.
    #[inline]
    pub fn active(&self) -> bool {
        self.remaining > 0.0
    }

    /// Expire immediately.
    #[inline]
    pub fn clear(&mut self) {
        self.remaining = 0.0;
    }

    /// Seconds left.
    #[inline]
    pub fn remaining(&self) -> f32 {
        self.remaining
    }
}
