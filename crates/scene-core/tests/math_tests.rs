use glam::{Vec2, Vec3};
use scene_core::*;
use std::f32::consts::{PI, TAU};

#[test]
fn yaw_pitch_round_trip() {
    for &(yaw, pitch) in &[(0.0, 0.0), (1.0, 0.3), (-2.5, -1.2), (3.0, 1.4)] {
        let dir = direction_from_yaw_pitch(yaw, pitch);
        assert!((dir.length() - 1.0).abs() < 1e-5);
        let (y2, p2) = yaw_pitch_from_direction(dir);
        assert!((wrap_angle(y2) - wrap_angle(yaw)).abs() < 1e-4);
        assert!((p2 - pitch).abs() < 1e-5);
    }
}

#[test]
fn zero_yaw_looks_down_positive_z() {
    let dir = direction_from_yaw_pitch(0.0, 0.0);
    assert!((dir - Vec3::Z).length() < 1e-6);
    let back = direction_from_yaw_pitch(PI, 0.0);
    assert!((back - Vec3::NEG_Z).length() < 1e-6);
}

#[test]
fn wrap_angle_stays_in_range() {
    for a in [-100.0, -TAU, -1e-9, 0.0, 1.0, TAU, 7.5, 1000.0] {
        let w = wrap_angle(a);
        assert!((0.0..TAU).contains(&w), "{a} wrapped to {w}");
    }
    assert!((wrap_angle(TAU + 1.0) - 1.0).abs() < 1e-5);
}

#[test]
fn closest_approach_reports_perpendicular_distance() {
    let ray = Ray::new(Vec3::ZERO, Vec3::new(0.0, 0.0, -2.0));
    let (t, perp_sq) = ray.closest_approach(Vec3::new(0.5, 0.0, -4.0)).unwrap();
    assert!((t - 4.0).abs() < 1e-6);
    assert!((perp_sq - 0.25).abs() < 1e-6);
    assert!(ray.closest_approach(Vec3::new(0.0, 0.0, 1.0)).is_none());
}

#[test]
fn ndc_ray_passes_through_projected_point() {
    let mut cam = RenderCamera::new(1.5);
    cam.eye = Vec3::new(2.0, 3.0, 8.0);
    cam.target = Vec3::new(0.0, 1.0, 0.0);
    let p = Vec3::new(1.0, 2.0, -1.0);
    let ndc = cam.project_to_ndc(p).unwrap();
    let ray = cam.ray_through_ndc(ndc);
    let (_, perp_sq) = ray.closest_approach(p).unwrap();
    assert!(perp_sq < 1e-4);
    assert!(cam.project_to_ndc(Vec3::new(2.0, 3.0, 20.0)).is_none());
    assert!(cam.ray_through_ndc(Vec2::new(3.0, -3.0)).is_finite());
}

#[test]
fn aabb_helpers() {
    let b = Aabb::new(Vec3::ONE, -Vec3::ONE);
    assert_eq!(b.min, -Vec3::ONE);
    assert_eq!(b.center(), Vec3::ZERO);
    assert_eq!(b.lerp_point(Vec3::ONE), Vec3::ONE);
    assert!(Aabb::from_points(std::iter::empty::<Vec3>()).is_none());
    let u = b.union(&Aabb::new(Vec3::ZERO, Vec3::splat(3.0)));
    assert_eq!(u.max, Vec3::splat(3.0));
}

#[test]
fn render_camera_viewport_ignores_zero_size() {
    let mut cam = RenderCamera::new(1.0);
    cam.set_viewport(1920, 1080);
    assert!((cam.aspect - 16.0 / 9.0).abs() < 1e-6);
    cam.set_viewport(0, 100);
    assert!((cam.aspect - 16.0 / 9.0).abs() < 1e-6);
}

#[test]
fn point_vertex_is_tightly_packed() {
    assert_eq!(std::mem::size_of::<PointVertex>(), 32);
}
