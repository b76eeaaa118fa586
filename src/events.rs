//! Notification boundary.
//!
//! The core publishes discrete events instead of calling camera, animation,
//! or audio systems directly. Payloads are plain data; observers drain the
//! queue after each `update` and never hand callbacks into the core.

use crate::locomotion::LocomotionState;
use crate::mode::GameMode;
use crate::vehicle::VehicleId;

/// Discrete notifications published during a frame update.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum SimEvent {
    /// The character's locomotion state machine changed value.
    LocomotionChanged {
        from: LocomotionState,
        to: LocomotionState,
    },
    /// The character seated into a vehicle.
    VehicleEntered { vehicle: VehicleId },
    /// The character left a vehicle.
    VehicleExited { vehicle: VehicleId },
    /// Emitted each frame a vehicle's drift is active (effects/sound hooks).
    VehicleDrifting { vehicle: VehicleId, factor: f32 },
    /// The mode coordinator accepted a transition.
    ModeChanged { from: GameMode, to: GameMode },
}

/// Per-frame event queue. Producers push during `update`; observers drain
/// afterwards. Draining leaves the queue empty for the next frame.
#[derive(Debug, Default)]
pub struct EventQueue {
    pending: Vec<SimEvent>,
}

impl EventQueue {
    pub fn new() -> Self {
        Self {
            pending: Vec::new(),
        }
    }

    #[inline]
    pub fn push(&mut self, event: SimEvent) {
        self.pending.push(event);
    }

    /// Take all pending events, oldest first.
    pub fn drain(&mut self) -> Vec<SimEvent> {
        std::mem::take(&mut self.pending)
    }

    /// Peek at pending events without consuming them.
    #[inline]
    pub fn pending(&self) -> &[SimEvent] {
        &self.pending
    }
}
