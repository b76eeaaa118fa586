use nalgebra as na;
use parry3d::{
    bounding_volume::Aabb,
    partitioning::{Bvh, BvhBuildStrategy},
    shape as pshape,
};

use super::types::{StaticShape, Transform};

/// Acceleration structure for broad-phase queries over immutable world statics.
///
/// Notes:
/// - Finite shapes (Cuboid, Sphere, Capsule) are stored as world-space AABBs in a BVH.
/// - `non_plane_indices` maps each stored AABB back to its index in the original `statics` slice.
/// - Planes are infinite and kept in `plane_indices`; callers test them on every query.
pub struct WorldAccel {
    /// BVH over finite static shapes (AABBs).
    pub bvh: Bvh,
    /// Indices into the original `statics` slice for the AABBs above.
    pub non_plane_indices: Vec<usize>,
    /// Indices into the original `statics` slice for planes.
    pub plane_indices: Vec<usize>,
}

impl WorldAccel {
    /// Return true if this accelerator has no non-plane entries.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.non_plane_indices.is_empty()
    }

    /// Number of non-plane entries (AABBs) in this accelerator.
    #[inline]
    pub fn len(&self) -> usize {
        self.non_plane_indices.len()
    }
}

/// Build the broad-phase accelerator over immutable world statics.
///
/// - Finite shapes (Cuboid, Sphere, Capsule) get a world-space AABB and are indexed.
/// - Infinite shapes (Plane) are kept in `plane_indices` and are tested separately.
pub fn build_world_accel(statics: &[StaticShape]) -> WorldAccel {
    let mut aabbs: Vec<Aabb> = Vec::new();
    let mut non_plane_indices: Vec<usize> = Vec::new();
    let mut plane_indices: Vec<usize> = Vec::new();

    for (i, s) in statics.iter().enumerate() {
        match *s {
            StaticShape::Plane { .. } => {
                plane_indices.push(i);
            }
            StaticShape::Cuboid {
                half_extents,
                transform,
            } => {
                aabbs.push(cuboid_aabb_world(half_extents, transform));
                non_plane_indices.push(i);
            }
            StaticShape::Sphere { radius, transform } => {
                aabbs.push(sphere_aabb_world(radius, transform));
                non_plane_indices.push(i);
            }
            StaticShape::Capsule {
                radius,
                half_height,
                transform,
            } => {
                aabbs.push(capsule_aabb_world(radius, half_height, transform));
                non_plane_indices.push(i);
            }
        }
    }

    WorldAccel {
        bvh: Bvh::from_leaves(BvhBuildStrategy::Binned, &aabbs),
        non_plane_indices,
        plane_indices,
    }
}

/// Compute the AABB for a world-space cuboid.
fn cuboid_aabb_world(half_extents: na::Vector3<f32>, transform: Transform) -> Aabb {
    let cuboid = pshape::Cuboid::new(half_extents);
    cuboid.aabb(&transform.iso())
}

fn sphere_aabb_world(radius: f32, transform: Transform) -> Aabb {
    let ball = pshape::Ball::new(radius);
    let iso = na::Isometry3::from_parts(
        na::Translation3::new(
            transform.translation.x,
            transform.translation.y,
            transform.translation.z,
        ),
        na::UnitQuaternion::identity(),
    );
    ball.aabb(&iso)
}

fn capsule_aabb_world(radius: f32, half_height: f32, transform: Transform) -> Aabb {
    let capsule = pshape::Capsule::new_y(half_height, radius);
    capsule.aabb(&transform.iso())
}

/// World-space AABB for a Y-aligned probe capsule centered at `center`,
/// inflated by `margin` to conservatively include near contacts.
pub fn probe_capsule_aabb(
    capsule_half_height: f32,
    capsule_radius: f32,
    center: na::Vector3<f32>,
    margin: f32,
) -> Aabb {
    let capsule = pshape::Capsule::new_y(capsule_half_height, capsule_radius);
    let iso = na::Isometry3::from_parts(
        na::Translation3::new(center.x, center.y, center.z),
        na::UnitQuaternion::identity(),
    );
    aabb_inflate(&capsule.aabb(&iso), margin)
}

/// World-space AABB for a probe sphere, inflated by `margin`.
pub fn probe_sphere_aabb(radius: f32, center: na::Vector3<f32>, margin: f32) -> Aabb {
    let ball = pshape::Ball::new(radius);
    let iso = na::Isometry3::from_parts(
        na::Translation3::new(center.x, center.y, center.z),
        na::UnitQuaternion::identity(),
    );
    aabb_inflate(&ball.aabb(&iso), margin)
}

/// Query candidate static indices whose AABB intersects `probe`.
///
/// Returns indices referencing the original `statics` slice (not the local AABB array).
pub fn query_candidates(accel: &WorldAccel, probe: &Aabb) -> Vec<usize> {
    accel
        .bvh
        .intersect_aabb(probe)
        .map(|leaf_idx| accel.non_plane_indices[leaf_idx as usize])
        .collect()
}

/// Inflate an AABB by `margin` on all sides.
fn aabb_inflate(a: &Aabb, margin: f32) -> Aabb {
    if margin <= 0.0 {
        return *a;
    }
    let delta = na::Vector3::new(margin, margin, margin);
    Aabb {
        mins: a.mins - delta,
        maxs: a.maxs + delta,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::collision::types::{Quat, Vec3};

    fn box_at(x: f32, y: f32, z: f32) -> StaticShape {
        StaticShape::Cuboid {
            half_extents: Vec3::new(1.0, 1.0, 1.0),
            transform: Transform::new(Vec3::new(x, y, z), Quat::identity()),
        }
    }

    #[test]
    fn planes_are_kept_out_of_the_bvh() {
        let statics = vec![
            StaticShape::Plane {
                normal: Vec3::new(0.0, 1.0, 0.0),
                dist: 0.0,
            },
            box_at(0.0, 0.0, 0.0),
        ];
        let accel = build_world_accel(&statics);
        assert_eq!(accel.plane_indices, vec![0]);
        assert_eq!(accel.non_plane_indices, vec![1]);
        assert_eq!(accel.len(), 1);
    }

    #[test]
    fn candidates_include_only_overlapping_aabbs() {
        let statics = vec![box_at(0.0, 0.0, 0.0), box_at(100.0, 0.0, 0.0)];
        let accel = build_world_accel(&statics);

        let probe = probe_sphere_aabb(0.5, Vec3::new(0.5, 0.0, 0.0), 0.0);
        let candidates = query_candidates(&accel, &probe);
        assert_eq!(candidates, vec![0]);
    }

    #[test]
    fn empty_world_yields_empty_accel() {
        let accel = build_world_accel(&[]);
        assert!(accel.is_empty());
        let probe = probe_sphere_aabb(1.0, Vec3::zeros(), 0.0);
        assert!(query_candidates(&accel, &probe).is_empty());
    }
}
