use nalgebra as na;
use parry3d::{query, shape as pshape};

use super::types::{Iso, StaticShape, Vec3};

/// A single penetration contact between a probe volume and one static shape.
#[derive(Clone, Copy, Debug)]
pub struct PenetrationHit {
    /// World-space push-out direction on the probe (unit length).
    pub normal: Vec3,
    /// Penetration depth along `normal` (meters, > 0).
    pub depth: f32,
}

/// Penetration contact of a probe shape against a single static shape.
///
/// The static shape is passed as the first argument of the parry query so the
/// returned `normal1` points from the obstacle toward the probe, which is the
/// push-out direction the controllers apply directly.
///
/// Returns `None` when the volumes are separated (or the query pair is
/// unsupported, which does not happen for the shapes in `StaticShape`).
pub fn contact_probe_vs_static(
    probe_iso: &Iso,
    probe: &dyn pshape::Shape,
    shape: &StaticShape,
) -> Option<PenetrationHit> {
    match *shape {
        StaticShape::Plane { normal, dist } => {
            // Plane: represent as a parry HalfSpace with world normal, positioned at normal * dist.
            // Plane equation in world space: normal ⋅ x = dist
            let unit_n = na::Unit::new_normalize(normal);
            let plane = pshape::HalfSpace { normal: unit_n };
            let plane_iso = Iso::from_parts(
                na::Translation3::new((normal * dist).x, (normal * dist).y, (normal * dist).z),
                na::UnitQuaternion::identity(),
            );
            contact_pair(&plane_iso, &plane, probe_iso, probe)
        }
        StaticShape::Cuboid {
            half_extents,
            transform,
        } => {
            let cuboid = pshape::Cuboid::new(half_extents);
            contact_pair(&transform.iso(), &cuboid, probe_iso, probe)
        }
        StaticShape::Sphere { radius, transform } => {
            // Treat as a Ball; rotation is irrelevant.
            let ball = pshape::Ball::new(radius);
            contact_pair(&transform.iso(), &ball, probe_iso, probe)
        }
        StaticShape::Capsule {
            radius,
            half_height,
            transform,
        } => {
            let static_capsule = pshape::Capsule::new_y(half_height, radius);
            contact_pair(&transform.iso(), &static_capsule, probe_iso, probe)
        }
    }
}

/// Run the parry contact query with the obstacle as the first shape and keep
/// only actual penetrations (`dist < 0`).
fn contact_pair(
    static_iso: &Iso,
    static_shape: &dyn pshape::Shape,
    probe_iso: &Iso,
    probe: &dyn pshape::Shape,
) -> Option<PenetrationHit> {
    match query::contact(static_iso, static_shape, probe_iso, probe, 0.0) {
        Ok(Some(contact)) if contact.dist < 0.0 => Some(PenetrationHit {
            normal: Vec3::new(
                contact.normal1.into_inner().x,
                contact.normal1.into_inner().y,
                contact.normal1.into_inner().z,
            ),
            depth: -contact.dist,
        }),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::collision::types::{Quat, Transform};

    fn iso_at(x: f32, y: f32, z: f32) -> Iso {
        Iso::from_parts(
            na::Translation3::new(x, y, z),
            na::UnitQuaternion::identity(),
        )
    }

    #[test]
    fn sphere_penetrating_cuboid_reports_depth_and_axis_normal() {
        // Unit-half-extent box at origin; sphere of radius 0.5 centered at x = 1.2
        // overlaps the +X face by 0.3.
        let wall = StaticShape::Cuboid {
            half_extents: Vec3::new(1.0, 1.0, 1.0),
            transform: Transform::new(Vec3::zeros(), Quat::identity()),
        };
        let ball = pshape::Ball::new(0.5);

        let hit = contact_probe_vs_static(&iso_at(1.2, 0.0, 0.0), &ball, &wall)
            .expect("expected penetration");

        assert!((hit.depth - 0.3).abs() < 1.0e-4);
        assert!((hit.normal.x - 1.0).abs() < 1.0e-4);
        assert!(hit.normal.y.abs() < 1.0e-4);
        assert!(hit.normal.z.abs() < 1.0e-4);
    }

    #[test]
    fn separated_shapes_report_no_hit() {
        let wall = StaticShape::Cuboid {
            half_extents: Vec3::new(1.0, 1.0, 1.0),
            transform: Transform::new(Vec3::zeros(), Quat::identity()),
        };
        let ball = pshape::Ball::new(0.5);

        assert!(contact_probe_vs_static(&iso_at(3.0, 0.0, 0.0), &ball, &wall).is_none());
    }

    #[test]
    fn capsule_sunk_into_ground_plane_pushes_up() {
        let ground = StaticShape::Plane {
            normal: Vec3::new(0.0, 1.0, 0.0),
            dist: 0.0,
        };
        // Capsule foot offset is 0.9; center at y = 0.7 penetrates by 0.2.
        let capsule = pshape::Capsule::new_y(0.55, 0.35);

        let hit = contact_probe_vs_static(&iso_at(0.0, 0.7, 0.0), &capsule, &ground)
            .expect("expected penetration");

        assert!((hit.depth - 0.2).abs() < 1.0e-4);
        assert!((hit.normal.y - 1.0).abs() < 1.0e-4);
    }
}
