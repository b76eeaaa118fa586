/*!
Real-time locomotion and vehicle simulation core for an open-world sandbox.

The crate is a synchronous, single-threaded simulation stepped once per
rendered frame with a variable `dt`. [`sim::Simulation`] is the entry point;
it owns the collision index over static world geometry, the on-foot
locomotion controller, the arcade vehicle dynamics, the enter/exit
interaction, and the mode coordinator, and publishes plain-data
[`events::SimEvent`]s that callers drain after each frame.

Rendering, cameras, audio, and networking live outside this crate; it only
reads merged per-frame input and writes body poses.
*/

pub mod collision;
pub mod constants;
pub mod events;
pub mod input;
pub mod interaction;
pub mod locomotion;
pub mod math;
pub mod mode;
pub mod sim;
pub mod timer;
pub mod vehicle;

pub use collision::{
    CapsuleSpec, CollisionIndex, Iso, Quat, QueryResult, StaticShape, Transform, Vec3,
    cuboid_from_pose, plane_from_pose,
};
pub use events::SimEvent;
pub use input::{DriveInput, FrameInput, MoveInput, SpeedTier};
pub use interaction::VehicleInteraction;
pub use locomotion::{CharacterBody, CharacterId, LocomotionController, LocomotionState};
pub use mode::{CameraFamily, GameMode, ModeCoordinator};
pub use sim::Simulation;
pub use vehicle::{VehicleBody, VehicleId};
