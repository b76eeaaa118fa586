/*!
Collision root module.

The spatial index over static world geometry and the penetration queries the
two controllers run against it. The code is split for clarity:

- types:    shared data types (Transform, StaticShape, CapsuleSpec, QueryResult)
- settings: query tolerances
- broad:    broad-phase helpers (world AABBs, BVH candidates)
- narrow:   thin wrappers over parry3d contact queries
- index:    the build-once CollisionIndex query surface
*/

pub mod broad;
pub mod index;
pub mod narrow;
pub mod settings;
pub mod types;

// Re-export commonly used types and functions.
pub use index::CollisionIndex;
pub use types::{
    CapsuleSpec, Iso, Quat, QueryResult, StaticShape, Transform, Vec3, cuboid_from_pose,
    plane_from_pose,
};
