//! Screen-space target selection
//!
//! Best target = front-facing кандидат с минимальным screen distance² до центра.
//! Ties → первый по порядку входа (порядок от filter сохраняется).

use bevy::prelude::*;

use crate::projection::ScreenProjector;
use crate::target::{Target, TargetData};

/// Whether `target_location` projects inside the screen circle around `screen_point`
pub fn is_target_within_screen_circle(
    projector: &ScreenProjector,
    target_location: Vec3,
    screen_point: Vec2,
    radius: f32,
) -> bool {
    let Some(projected) = projector.project(target_location) else {
        return false;
    };

    projected.distance_squared(screen_point) <= radius * radius
}

/// Camera-relative direction is in front of the camera plane and non-degenerate
pub fn is_front_facing(projector: &ScreenProjector, location: Vec3) -> bool {
    let to_target = location - projector.camera_location();
    if to_target.length_squared() <= f32::EPSILON {
        return false;
    }

    projector.camera_forward().dot(to_target) > 0.0
}

/// Find the closest-to-center front-facing target
pub fn find_best_front_facing_target(
    projector: &ScreenProjector,
    targets: &[Target],
) -> Option<TargetData> {
    let center = projector.viewport_center();

    let mut best: Option<TargetData> = None;
    let mut best_distance_sq = f32::INFINITY;

    for target in targets {
        let Some(screen) = projector.project(target.location) else {
            continue;
        };

        // Цели за спиной не выигрывают никогда
        if !is_front_facing(projector, target.location) {
            continue;
        }

        let distance_sq = screen.distance_squared(center);
        if distance_sq < best_distance_sq {
            best_distance_sq = distance_sq;
            best = Some(TargetData::from_target(target, distance_sq));
        }
    }

    best
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::projection::CameraLens;

    fn projector() -> ScreenProjector {
        ScreenProjector::new(
            Transform::IDENTITY,
            CameraLens { fov_y: std::f32::consts::FRAC_PI_2, near: 0.1 },
            Vec2::new(1000.0, 500.0),
        )
    }

    fn target(index: u32, location: Vec3) -> Target {
        Target::at_origin(Entity::from_raw(index), location)
    }

    #[test]
    fn test_screen_circle_inside_and_outside() {
        let p = projector();
        let center = p.viewport_center();

        // (1, 0, -10) → x = 500 + 0.5 * 1/10 * 1000 = 525
        assert!(is_target_within_screen_circle(&p, Vec3::new(1.0, 0.0, -10.0), center, 30.0));
        assert!(!is_target_within_screen_circle(&p, Vec3::new(1.0, 0.0, -10.0), center, 20.0));
    }

    #[test]
    fn test_screen_circle_boundary_is_inclusive() {
        let p = projector();
        let screen = p.project(Vec3::new(1.0, 0.0, -10.0)).expect("in front");
        // distance² == radius² (оба 0)
        assert!(is_target_within_screen_circle(&p, Vec3::new(1.0, 0.0, -10.0), screen, 0.0));
    }

    #[test]
    fn test_screen_circle_behind_camera() {
        let p = projector();
        assert!(!is_target_within_screen_circle(
            &p,
            Vec3::new(0.0, 0.0, 10.0),
            p.viewport_center(),
            f32::MAX,
        ));
    }

    #[test]
    fn test_best_target_is_closest_to_center() {
        let p = projector();
        let targets = vec![
            target(1, Vec3::new(3.0, 0.0, -10.0)),
            target(2, Vec3::new(0.5, 0.2, -10.0)),
            target(3, Vec3::new(-2.0, 1.0, -10.0)),
        ];

        let best = find_best_front_facing_target(&p, &targets).expect("has target");
        assert_eq!(best.entity, Entity::from_raw(2));
        let expected = p.project(targets[1].location).unwrap().distance_squared(p.viewport_center());
        assert!((best.screen_distance_sq - expected).abs() < 1e-3);
    }

    #[test]
    fn test_ties_resolve_to_first_candidate() {
        let p = projector();
        let targets = vec![
            target(1, Vec3::new(0.0, 0.0, 10.0)), // за спиной
            target(2, Vec3::new(1.0, 0.5, -10.0)),
            target(3, Vec3::new(1.0, 0.5, -10.0)),
        ];

        let best = find_best_front_facing_target(&p, &targets).expect("has target");
        assert_eq!(best.entity, Entity::from_raw(2));
    }

    #[test]
    fn test_all_behind_camera_yields_none() {
        let p = projector();
        let targets = vec![
            target(1, Vec3::new(0.0, 0.0, 5.0)),
            target(2, Vec3::new(3.0, 1.0, 20.0)),
        ];
        assert!(find_best_front_facing_target(&p, &targets).is_none());
    }

    #[test]
    fn test_empty_input_yields_none() {
        assert!(find_best_front_facing_target(&projector(), &[]).is_none());
    }

    #[test]
    fn test_target_at_camera_location_is_skipped() {
        let p = projector();
        assert!(!is_front_facing(&p, Vec3::ZERO));
        let targets = vec![target(1, Vec3::ZERO)];
        assert!(find_best_front_facing_target(&p, &targets).is_none());
    }
}
