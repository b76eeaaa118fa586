/*!
Mode coordinator.

The single authoritative `GameMode` value lives here. All transitions go
through [`ModeCoordinator::request`], so observers always see one consistent
before/after pair per change and the drive/occupancy invariant holds:
`Drive` is active if and only if an occupied vehicle exists.

Invalid requests are logged and ignored; the current mode is retained.
*/

use crate::events::{EventQueue, SimEvent};

/// Global simulation mode. Exactly one value is active.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum GameMode {
    /// Free-fly observation; no controller receives updates.
    Free,
    /// On-foot play: locomotion controller + vehicle interaction.
    Play,
    /// Driving: the occupied vehicle's controller only.
    Drive,
    /// Cinematic director; controllers are paused.
    Director,
}

/// Camera family the external camera subsystem is allowed to use per mode.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum CameraFamily {
    Fly,
    Orbit,
    Chase,
    Cinematic,
}

/// Owns the authoritative mode value and validates transitions.
pub struct ModeCoordinator {
    mode: GameMode,
}

impl ModeCoordinator {
    /// Coordinator starting in free-fly, the pre-gameplay default.
    pub fn new() -> Self {
        Self {
            mode: GameMode::Free,
        }
    }

    #[inline]
    pub fn mode(&self) -> GameMode {
        self.mode
    }

    /// Camera family allowed for a mode. Total over all modes.
    #[inline]
    pub fn camera_family(mode: GameMode) -> CameraFamily {
        match mode {
            GameMode::Free => CameraFamily::Fly,
            GameMode::Play => CameraFamily::Orbit,
            GameMode::Drive => CameraFamily::Chase,
            GameMode::Director => CameraFamily::Cinematic,
        }
    }

    /// Request a transition to `to`.
    ///
    /// `vehicle_occupied` is supplied by the caller (the simulation knows the
    /// vehicle list) and gates the drive invariant in both directions:
    /// - entering `Drive` requires an occupied vehicle;
    /// - leaving `Drive` requires the vehicle to have been vacated first.
    ///
    /// Returns true when the transition was accepted; a `ModeChanged` event
    /// is emitted exactly once per accepted transition.
    pub fn request(&mut self, to: GameMode, vehicle_occupied: bool, events: &mut EventQueue) -> bool {
        if to == self.mode {
            log::debug!("mode request ignored: already in {:?}", to);
            return false;
        }
        if to == GameMode::Drive && !vehicle_occupied {
            log::warn!("mode request rejected: Drive without an occupied vehicle");
            return false;
        }
        if self.mode == GameMode::Drive && vehicle_occupied {
            log::warn!(
                "mode request rejected: leaving Drive for {:?} while a vehicle is occupied",
                to
            );
            return false;
        }

        let from = self.mode;
        self.mode = to;
        log::debug!("mode {:?} -> {:?}", from, to);
        events.push(SimEvent::ModeChanged { from, to });
        true
    }
}

impl Default for ModeCoordinator {
    fn default() -> Self {
        Self::new()
    }
}
