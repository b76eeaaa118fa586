/*!
Vehicle interaction.

Proximity detection between the active character and nearby vehicles, plus
the enter/exit handoff between the two controllers. While in `Play` mode the
nearest vehicle inside the interaction radius is surfaced as a prompt target
for the UI; an edge-triggered interact press seats the character and hands
control to the vehicle controller. Exiting reverses the handoff and parks
the character beside the vehicle.
*/

use crate::constants::{EXIT_LATERAL_OFFSET, GROUND_PLANE_Y, INTERACTION_RADIUS};
use crate::events::{EventQueue, SimEvent};
use crate::locomotion::{CharacterBody, CharacterId};
use crate::mode::{GameMode, ModeCoordinator};
use crate::vehicle::{VehicleBody, VehicleId};

/// Proximity state and enter/exit logic for one character.
#[derive(Debug, Default)]
pub struct VehicleInteraction {
    prompt: Option<VehicleId>,
}

impl VehicleInteraction {
    pub fn new() -> Self {
        Self { prompt: None }
    }

    /// Vehicle the enter prompt currently points at, if any.
    #[inline]
    pub fn prompt(&self) -> Option<VehicleId> {
        self.prompt
    }

    /// Per-frame interaction while on foot: refresh the prompt target and
    /// handle an enter press.
    pub fn update_on_foot(
        &mut self,
        interact_pressed: bool,
        character_id: CharacterId,
        character: &mut CharacterBody,
        vehicles: &mut [VehicleBody],
        coordinator: &mut ModeCoordinator,
        events: &mut EventQueue,
    ) {
        self.prompt = nearest_vehicle_in_range(character, vehicles);

        if !interact_pressed {
            return;
        }
        let Some(id) = self.prompt else {
            return;
        };

        let vehicle = &mut vehicles[id.0];
        vehicle.occupied = true;
        vehicle.driver = Some(character_id);

        if !coordinator.request(GameMode::Drive, true, events) {
            // Transition refused (e.g. called outside Play); keep the
            // occupancy invariant intact.
            vehicle.occupied = false;
            vehicle.driver = None;
            return;
        }

        character.visible = false;
        character.reset_dynamics();
        self.prompt = None;
        events.push(SimEvent::VehicleEntered { vehicle: id });
    }

    /// Per-frame interaction while driving: handle an exit press.
    ///
    /// Exiting with no occupied vehicle is a no-op.
    pub fn update_driving(
        &mut self,
        interact_pressed: bool,
        character: &mut CharacterBody,
        vehicles: &mut [VehicleBody],
        coordinator: &mut ModeCoordinator,
        events: &mut EventQueue,
    ) {
        if !interact_pressed {
            return;
        }

        let Some(vehicle) = vehicles.iter_mut().find(|v| v.occupied) else {
            log::debug!("exit requested with no occupied vehicle; ignoring");
            return;
        };

        let id = vehicle.id;
        vehicle.reset_dynamics();
        vehicle.occupied = false;
        vehicle.driver = None;

        // Park the character beside the vehicle along its lateral axis.
        let side = vehicle.position + vehicle.right() * EXIT_LATERAL_OFFSET;
        character.position = crate::collision::Vec3::new(
            side.x,
            GROUND_PLANE_Y + character.capsule.foot_offset(),
            side.z,
        );
        character.yaw = vehicle.yaw;
        character.visible = true;
        character.reset_dynamics();

        coordinator.request(GameMode::Play, false, events);
        events.push(SimEvent::VehicleExited { vehicle: id });
    }
}

/// Nearest vehicle within the interaction radius, by planar distance.
fn nearest_vehicle_in_range(
    character: &CharacterBody,
    vehicles: &[VehicleBody],
) -> Option<VehicleId> {
    let mut best: Option<(VehicleId, f32)> = None;
    for v in vehicles {
        let dx = v.position.x - character.position.x;
        let dz = v.position.z - character.position.z;
        let dist_sq = dx * dx + dz * dz;
        if dist_sq > INTERACTION_RADIUS * INTERACTION_RADIUS {
            continue;
        }
        if best.map_or(true, |(_, d)| dist_sq < d) {
            best = Some((v.id, dist_sq));
        }
    }
    best.map(|(id, _)| id)
}
