use nalgebra as na;
use parry3d::shape as pshape;

use super::{
    broad::{self, WorldAccel},
    narrow::{self, PenetrationHit},
    settings::QUERY_MARGIN,
    types::{CapsuleSpec, Iso, QueryResult, StaticShape, Vec3},
};

/// Spatial index over static world geometry.
///
/// Built once before gameplay begins and read-only thereafter. Both
/// controllers query it every frame:
/// - characters through [`CollisionIndex::query_capsule`]
/// - vehicles through [`CollisionIndex::query_sphere`]
///
/// Until [`CollisionIndex::build`] runs, every query degrades to the
/// no-collision result instead of failing; callers keep their ground-plane
/// fallbacks for that window.
///
/// Dynamic obstacles are not represented and there are no incremental
/// updates; rebuilding means constructing a new index.
pub struct CollisionIndex {
    statics: Vec<StaticShape>,
    accel: Option<WorldAccel>,
}

impl CollisionIndex {
    /// An empty, unbuilt index. All queries return "no collision".
    pub fn new() -> Self {
        Self {
            statics: Vec::new(),
            accel: None,
        }
    }

    /// One-time synchronous build over the world's static shapes.
    ///
    /// Not callable concurrently with queries; the frame loop builds this
    /// before the first update.
    pub fn build(&mut self, statics: Vec<StaticShape>) {
        let accel = broad::build_world_accel(&statics);
        log::debug!(
            "collision index built: {} finite shapes, {} planes",
            accel.len(),
            accel.plane_indices.len()
        );
        self.statics = statics;
        self.accel = Some(accel);
    }

    /// True once `build()` has run.
    #[inline]
    pub fn ready(&self) -> bool {
        self.accel.is_some()
    }

    /// Test a vertical capsule centered at `center` against the index.
    ///
    /// Returns the deepest penetration across all overlapping shapes, or the
    /// no-collision result when clear (or before `build()`).
    pub fn query_capsule(&self, capsule: &CapsuleSpec, center: Vec3) -> QueryResult {
        let Some(accel) = &self.accel else {
            log::debug!("capsule query before build(); returning no collision");
            return QueryResult::none();
        };

        let shape = pshape::Capsule::new_y(capsule.half_height, capsule.radius);
        let iso = iso_from_center(center);
        let probe_aabb =
            broad::probe_capsule_aabb(capsule.half_height, capsule.radius, center, QUERY_MARGIN);

        self.deepest_hit(accel, &iso, &shape, &probe_aabb)
    }

    /// Test a bounding sphere against the index.
    pub fn query_sphere(&self, center: Vec3, radius: f32) -> QueryResult {
        let Some(accel) = &self.accel else {
            log::debug!("sphere query before build(); returning no collision");
            return QueryResult::none();
        };

        let shape = pshape::Ball::new(radius);
        let iso = iso_from_center(center);
        let probe_aabb = broad::probe_sphere_aabb(radius, center, QUERY_MARGIN);

        self.deepest_hit(accel, &iso, &shape, &probe_aabb)
    }

    /// Run narrow-phase contacts over planes plus broad-phase candidates and
    /// keep the deepest penetration.
    fn deepest_hit(
        &self,
        accel: &WorldAccel,
        probe_iso: &Iso,
        probe: &dyn pshape::Shape,
        probe_aabb: &parry3d::bounding_volume::Aabb,
    ) -> QueryResult {
        let mut best: Option<PenetrationHit> = None;

        // Planes are infinite; always tested, never in the BVH.
        for &idx in &accel.plane_indices {
            if let Some(hit) = narrow::contact_probe_vs_static(probe_iso, probe, &self.statics[idx])
            {
                if best.map_or(true, |b| hit.depth > b.depth) {
                    best = Some(hit);
                }
            }
        }

        for idx in broad::query_candidates(accel, probe_aabb) {
            if let Some(hit) = narrow::contact_probe_vs_static(probe_iso, probe, &self.statics[idx])
            {
                if best.map_or(true, |b| hit.depth > b.depth) {
                    best = Some(hit);
                }
            }
        }

        match best {
            Some(hit) => QueryResult {
                collided: true,
                normal: hit.normal,
                depth: hit.depth,
            },
            None => QueryResult::none(),
        }
    }
}

impl Default for CollisionIndex {
    fn default() -> Self {
        Self::new()
    }
}

#[inline]
fn iso_from_center(center: Vec3) -> Iso {
    Iso::from_parts(
        na::Translation3::new(center.x, center.y, center.z),
        na::UnitQuaternion::identity(),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::collision::types::{Quat, Transform};

    fn test_capsule() -> CapsuleSpec {
        CapsuleSpec {
            radius: 0.35,
            half_height: 0.55,
        }
    }

    fn wall_at_x(x: f32) -> StaticShape {
        StaticShape::Cuboid {
            half_extents: Vec3::new(0.5, 3.0, 5.0),
            transform: Transform::new(Vec3::new(x, 3.0, 0.0), Quat::identity()),
        }
    }

    #[test]
    fn queries_before_build_return_no_collision() {
        let index = CollisionIndex::new();
        assert!(!index.ready());

        let capsule = test_capsule();
        let result = index.query_capsule(&capsule, Vec3::new(0.0, 0.0, 0.0));
        assert!(!result.collided);
        assert_eq!(result.depth, 0.0);

        let result = index.query_sphere(Vec3::zeros(), 1.0);
        assert!(!result.collided);
    }

    #[test]
    fn non_penetrating_capsule_reports_no_collision() {
        // Idempotence of resolution: a clear probe must come back clear.
        let mut index = CollisionIndex::new();
        index.build(vec![wall_at_x(0.0)]);
        assert!(index.ready());

        let capsule = test_capsule();
        let result = index.query_capsule(&capsule, Vec3::new(5.0, 1.0, 0.0));
        assert!(!result.collided);
    }

    #[test]
    fn capsule_in_wall_reports_depth_along_face_normal() {
        // Wall face at x = 0.5; capsule radius 0.35 centered at x = 0.55
        // penetrates by 0.3.
        let mut index = CollisionIndex::new();
        index.build(vec![wall_at_x(0.0)]);

        let capsule = test_capsule();
        let result = index.query_capsule(&capsule, Vec3::new(0.55, 3.0, 0.0));
        assert!(result.collided);
        assert!((result.depth - 0.3).abs() < 1.0e-3);
        assert!((result.normal.x - 1.0).abs() < 1.0e-3);
    }

    #[test]
    fn deepest_penetration_wins_with_overlapping_shapes() {
        // Two walls; the probe is deeper into the second.
        let mut index = CollisionIndex::new();
        index.build(vec![wall_at_x(0.0), wall_at_x(1.4)]);

        let sphere_center = Vec3::new(1.0, 3.0, 0.0);
        let result = index.query_sphere(sphere_center, 0.6);
        assert!(result.collided);
        // Wall 2 spans x = 0.9..1.9, so the sphere center sits 0.1 inside it:
        // depth = 0.6 + 0.1 = 0.7 toward -X. Wall 1 overlap is 0.1 only.
        assert!((result.depth - 0.7).abs() < 1.0e-3);
        assert!((result.normal.x + 1.0).abs() < 1.0e-3);
    }

    #[test]
    fn ground_plane_contact_pushes_up() {
        let mut index = CollisionIndex::new();
        index.build(vec![StaticShape::Plane {
            normal: Vec3::new(0.0, 1.0, 0.0),
            dist: 0.0,
        }]);

        let result = index.query_sphere(Vec3::new(0.0, 0.4, 0.0), 0.5);
        assert!(result.collided);
        assert!((result.depth - 0.1).abs() < 1.0e-3);
        assert!((result.normal.y - 1.0).abs() < 1.0e-3);
    }
}
