/*!
Frame pipeline.

`Simulation` owns every subsystem and runs one synchronous pass per rendered
frame: input merge → the controller(s) the active mode selects → collision
resolve → notifications. There are no background threads and nothing
suspends mid-frame; observers drain the event queue after `update` returns.
*/

use crate::collision::{CollisionIndex, StaticShape, Vec3};
use crate::events::{EventQueue, SimEvent};
use crate::input::FrameInput;
use crate::interaction::VehicleInteraction;
use crate::locomotion::{CharacterId, LocomotionController};
use crate::mode::{GameMode, ModeCoordinator};
use crate::vehicle::{VehicleBody, VehicleId};

/// The simulation core: collision index, controllers, interaction, mode
/// coordinator, and the event queue, updated once per frame.
pub struct Simulation {
    pub index: CollisionIndex,
    pub locomotion: LocomotionController,
    pub vehicles: Vec<VehicleBody>,
    pub interaction: VehicleInteraction,
    pub coordinator: ModeCoordinator,
    events: EventQueue,
    character_id: CharacterId,
}

impl Simulation {
    /// New simulation with the character at `spawn`. The collision index
    /// starts unbuilt; queries degrade gracefully until `build_world` runs.
    pub fn new(spawn: Vec3) -> Self {
        Self {
            index: CollisionIndex::new(),
            locomotion: LocomotionController::new(spawn),
            vehicles: Vec::new(),
            interaction: VehicleInteraction::new(),
            coordinator: ModeCoordinator::new(),
            events: EventQueue::new(),
            character_id: CharacterId(0),
        }
    }

    /// Build the collision index over the world's static geometry. Called
    /// once, before the frame loop starts.
    pub fn build_world(&mut self, statics: Vec<StaticShape>) {
        self.index.build(statics);
    }

    /// Add a vehicle at world load.
    pub fn spawn_vehicle(&mut self, position: Vec3) -> VehicleId {
        let id = VehicleId(self.vehicles.len());
        self.vehicles.push(VehicleBody::new(id, position));
        id
    }

    #[inline]
    pub fn mode(&self) -> GameMode {
        self.coordinator.mode()
    }

    /// Request a mode change from outside (UI, director tooling). Routed
    /// through the coordinator like every other transition.
    pub fn request_mode(&mut self, to: GameMode) -> bool {
        let occupied = self.any_vehicle_occupied();
        self.coordinator.request(to, occupied, &mut self.events)
    }

    /// The vehicle currently under player control, if any.
    pub fn active_vehicle(&self) -> Option<VehicleId> {
        self.vehicles.iter().find(|v| v.occupied).map(|v| v.id)
    }

    fn any_vehicle_occupied(&self) -> bool {
        self.vehicles.iter().any(|v| v.occupied)
    }

    /// One frame: route updates to the controllers the active mode selects.
    ///
    /// `camera_yaw` is supplied by the external camera each frame and feeds
    /// camera-relative locomotion.
    pub fn update(&mut self, input: &FrameInput, camera_yaw: f32, dt: f32) {
        match self.coordinator.mode() {
            GameMode::Play => {
                self.locomotion.update(
                    &input.move_input(),
                    camera_yaw,
                    dt,
                    &self.index,
                    &mut self.events,
                );
                self.interaction.update_on_foot(
                    input.interact_pressed,
                    self.character_id,
                    &mut self.locomotion.body,
                    &mut self.vehicles,
                    &mut self.coordinator,
                    &mut self.events,
                );
            }
            GameMode::Drive => {
                let drive = input.drive_input();
                if let Some(id) = self.active_vehicle() {
                    self.vehicles[id.0].update(&drive, dt, &self.index, &mut self.events);
                }
                self.interaction.update_driving(
                    input.interact_pressed,
                    &mut self.locomotion.body,
                    &mut self.vehicles,
                    &mut self.coordinator,
                    &mut self.events,
                );
            }
            GameMode::Free | GameMode::Director => {
                // Observation modes: no controller receives updates.
            }
        }
    }

    /// Take all events published since the last drain, oldest first.
    pub fn drain_events(&mut self) -> Vec<SimEvent> {
        self.events.drain()
    }

    /// Pending events without consuming them.
    #[inline]
    pub fn pending_events(&self) -> &[SimEvent] {
        self.events.pending()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::constants::VEHICLE_RIDE_HEIGHT;

    const DT: f32 = 1.0 / 60.0;

    fn sim_in_play() -> Simulation {
        let mut sim = Simulation::new(Vec3::new(0.0, 0.9, 0.0));
        sim.request_mode(GameMode::Play);
        sim.drain_events();
        sim
    }

    fn drive_invariant_holds(sim: &Simulation) -> bool {
        let occupied = sim.vehicles.iter().filter(|v| v.occupied).count();
        match sim.mode() {
            GameMode::Drive => occupied == 1,
            _ => occupied == 0,
        }
    }

    #[test]
    fn free_and_director_modes_update_no_controllers() {
        let mut sim = Simulation::new(Vec3::new(0.0, 0.9, 0.0));
        let input = FrameInput {
            forward: true,
            ..Default::default()
        };

        let start = sim.locomotion.body.position;
        for _ in 0..30 {
            sim.update(&input, 0.0, DT);
        }
        assert_eq!(sim.locomotion.body.position, start);

        sim.request_mode(GameMode::Director);
        for _ in 0..30 {
            sim.update(&input, 0.0, DT);
        }
        assert_eq!(sim.locomotion.body.position, start);
    }

    #[test]
    fn play_mode_moves_the_character() {
        let mut sim = sim_in_play();
        let input = FrameInput {
            forward: true,
            ..Default::default()
        };

        for _ in 0..60 {
            sim.update(&input, 0.0, DT);
        }
        assert!(sim.locomotion.body.position.z < -1.0, "moved along -Z");
    }

    #[test]
    fn enter_drive_steer_and_exit_round_trip() {
        let mut sim = sim_in_play();
        let vehicle_id = sim.spawn_vehicle(Vec3::new(2.0, VEHICLE_RIDE_HEIGHT, 0.0));
        assert!(drive_invariant_holds(&sim));

        // Walk up and enter.
        sim.update(
            &FrameInput {
                interact_pressed: true,
                ..Default::default()
            },
            0.0,
            DT,
        );
        assert_eq!(sim.mode(), GameMode::Drive);
        assert_eq!(sim.active_vehicle(), Some(vehicle_id));
        assert!(!sim.locomotion.body.visible);
        assert!(drive_invariant_holds(&sim));

        let entered = sim.drain_events();
        assert!(
            entered
                .iter()
                .any(|e| matches!(e, SimEvent::VehicleEntered { .. }))
        );

        // Drive forward for a second.
        let throttle = FrameInput {
            throttle: true,
            ..Default::default()
        };
        let start = sim.vehicles[vehicle_id.0].position;
        for _ in 0..60 {
            sim.update(&throttle, 0.0, DT);
            assert!(drive_invariant_holds(&sim));
        }
        assert!((sim.vehicles[vehicle_id.0].position - start).norm() > 1.0);

        // The character does not move while driving.
        assert_eq!(sim.locomotion.body.velocity, Vec3::zeros());

        // Exit: character reappears beside the vehicle, vehicle parked.
        sim.update(
            &FrameInput {
                interact_pressed: true,
                ..Default::default()
            },
            0.0,
            DT,
        );
        assert_eq!(sim.mode(), GameMode::Play);
        assert_eq!(sim.active_vehicle(), None);
        assert!(sim.locomotion.body.visible);
        assert_eq!(sim.vehicles[vehicle_id.0].speed, 0.0);
        assert!(drive_invariant_holds(&sim));

        let exited = sim.drain_events();
        assert!(
            exited
                .iter()
                .any(|e| matches!(e, SimEvent::VehicleExited { .. }))
        );
    }

    #[test]
    fn interact_far_from_any_vehicle_does_nothing() {
        let mut sim = sim_in_play();
        sim.spawn_vehicle(Vec3::new(100.0, VEHICLE_RIDE_HEIGHT, 0.0));

        sim.update(
            &FrameInput {
                interact_pressed: true,
                ..Default::default()
            },
            0.0,
            DT,
        );
        assert_eq!(sim.mode(), GameMode::Play);
        assert_eq!(sim.active_vehicle(), None);
    }

    #[test]
    fn external_drive_request_without_vehicle_is_rejected() {
        let mut sim = sim_in_play();
        assert!(!sim.request_mode(GameMode::Drive));
        assert_eq!(sim.mode(), GameMode::Play);
    }

    #[test]
    fn update_before_world_build_is_safe() {
        // Not-ready degradation: the index is unbuilt, yet a full frame of
        // play-mode simulation runs on the ground-plane fallback.
        let mut sim = sim_in_play();
        assert!(!sim.index.ready());

        let input = FrameInput {
            forward: true,
            ..Default::default()
        };
        for _ in 0..120 {
            sim.update(&input, 0.0, DT);
        }
        assert!(sim.locomotion.body.grounded);
    }

    #[test]
    fn world_geometry_blocks_the_character_after_build() {
        let mut sim = sim_in_play();
        sim.build_world(vec![crate::collision::cuboid_from_pose(
            Vec3::new(5.0, 3.0, 0.5),
            Vec3::new(0.0, 3.0, -3.0),
            crate::collision::Quat::identity(),
        )]);

        let input = FrameInput {
            forward: true,
            ..Default::default()
        };
        for _ in 0..600 {
            sim.update(&input, 0.0, DT);
        }
        // Wall face at z = -2.5; the capsule (radius 0.35) rests against it.
        assert!(sim.locomotion.body.position.z > -2.5 - 1.0e-3);
    }
}
