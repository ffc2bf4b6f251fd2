use approx::{assert_abs_diff_eq, assert_relative_eq};
use nalgebra::Isometry3;
use physics_scene::{
    Pose, Vector3,
    math::{approx_zero, rotation_from_euler, rotation_from_scaled_axis, Rotation},
    scene::{Geometry, PerfMonitor},
};
use std::f32::consts::{FRAC_PI_2, PI};

#[test]
fn test_pose_identity() {
    let pose = Pose::identity();
    assert_eq!(pose, Pose::default());
    assert_eq!(pose.position, Vector3::zeros());
    assert_relative_eq!(pose.rotation.angle(), 0.0);
}

#[test]
fn test_pose_compose() {
    // Body a quarter turn about +Y, collider one unit along its local +X
    let body = Pose::from_xyz(1.0, 2.0, 3.0).with_rotation(Rotation::from_axis_angle(&Vector3::y_axis(), FRAC_PI_2));
    let offset = Pose::from_xyz(1.0, 0.0, 0.0);

    let world = body.compose(&offset);
    assert_relative_eq!(world.position, Vector3::new(1.0, 2.0, 2.0), epsilon = 1e-6);
    assert_relative_eq!(world.rotation.angle_to(&body.rotation), 0.0, epsilon = 1e-6);

    // Identity is neutral on both sides
    assert_abs_diff_eq!(body.compose(&Pose::identity()), body, epsilon = 1e-6);
    assert_abs_diff_eq!(Pose::identity().compose(&body), body, epsilon = 1e-6);
}

#[test]
fn test_pose_isometry_conversion() {
    let pose = Pose::new(Vector3::new(-1.0, 0.5, 4.0), rotation_from_euler(0.3, -0.2, 1.1));
    let iso: Isometry3<f32> = pose.into();

    assert_eq!(iso.translation.vector, pose.position);
    assert_eq!(Pose::from(iso), pose);
}

#[test]
fn test_pose_approx_ignores_quaternion_sign() {
    let rotation = rotation_from_scaled_axis(Vector3::new(0.0, 0.0, PI / 3.0));
    let flipped = Rotation::new_unchecked(-rotation.into_inner());

    let a = Pose::from_xyz(1.0, 1.0, 1.0).with_rotation(rotation);
    let b = Pose::from_xyz(1.0, 1.0, 1.0).with_rotation(flipped);
    assert_abs_diff_eq!(a, b, epsilon = 1e-5);

    let moved = Pose::from_xyz(1.0, 1.1, 1.0).with_rotation(rotation);
    assert!(!approx::abs_diff_eq!(a, moved, epsilon = 1e-5));
}

#[test]
fn test_euler_rotation() {
    // The torus lies in XY; a quarter turn about X lays it flat
    let rotation = rotation_from_euler(FRAC_PI_2, 0.0, 0.0);
    let up = rotation * Vector3::z();
    assert_relative_eq!(up, Vector3::new(0.0, -1.0, 0.0), epsilon = 1e-6);

    assert!(approx_zero(rotation_from_euler(0.0, 0.0, 0.0).angle()));
}

#[test]
fn test_geometry_bounds() {
    let cube = Geometry::cuboid(1.0, 2.0, 3.0);
    let bounds = cube.bounds(&Vector3::repeat(1.0));
    assert_relative_eq!(bounds.half_extents(), Vector3::new(0.5, 1.0, 1.5));
    assert_relative_eq!(bounds.center(), Vector3::zeros());

    let scaled = cube.bounds(&Vector3::new(0.4, 0.4, 3.0));
    assert_relative_eq!(scaled.half_extents(), Vector3::new(0.2, 0.4, 4.5), epsilon = 1e-6);

    let sphere = Geometry::sphere(1.5);
    assert_relative_eq!(sphere.bounding_radius(&Vector3::repeat(1.0)), 1.5, epsilon = 1e-5);
    assert_relative_eq!(sphere.bounding_radius(&Vector3::repeat(2.0)), 3.0, epsilon = 1e-5);
}

#[test]
fn test_geometry_triangulation() {
    let (vertices, indices) = Geometry::cuboid(1.0, 1.0, 1.0).triangulate(&Vector3::repeat(1.0));
    assert_eq!(vertices.len(), 8);
    assert_eq!(indices.len(), 12);

    let (vertices, indices) = Geometry::torus(1.0, 0.5, 16, 32).triangulate(&Vector3::repeat(1.0));
    assert_eq!(vertices.len(), 17 * 33);
    assert_eq!(indices.len(), 16 * 32 * 2);
    assert!(indices.iter().flatten().all(|&i| (i as usize) < vertices.len()));

    // Torus ring lies in XY
    let bounds = Geometry::torus(1.0, 0.5, 16, 32).bounds(&Vector3::repeat(1.0));
    assert_relative_eq!(bounds.half_extents(), Vector3::new(1.5, 1.5, 0.5), epsilon = 1e-5);

    assert!(Geometry::sphere(1.0).has_analytic_collider());
    assert!(!Geometry::torus(1.0, 0.5, 16, 32).has_analytic_collider());
}

#[test]
fn test_perf_monitor_reports_per_interval() {
    let mut perf = PerfMonitor::new(1.0);
    assert!(perf.last().is_none());

    let mut reports = Vec::new();
    for i in 0..100 {
        let frame_time = if i == 10 { 0.05 } else { 1.0 / 60.0 };
        if let Some(snapshot) = perf.record(frame_time) {
            reports.push(snapshot);
        }
    }

    assert_eq!(reports.len(), 1);
    let snapshot = reports[0];
    assert_relative_eq!(snapshot.max_frame_time, 0.05);
    assert!(snapshot.fps() > 50.0 && snapshot.fps() < 60.0);
    assert_eq!(perf.last(), Some(snapshot));
}
