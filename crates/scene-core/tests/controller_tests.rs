// Camera controller behaviour driven through its public event API.

use glam::{Vec2, Vec3};
use scene_core::*;
use std::f32::consts::{FRAC_PI_2, PI};

fn controller() -> CameraController {
    CameraController::new(CameraConfig::default()).unwrap()
}

fn approx(a: f32, b: f32, eps: f32) -> bool {
    (a - b).abs() <= eps
}

fn approx_vec(a: Vec3, b: Vec3, eps: f32) -> bool {
    (a - b).length() <= eps
}

#[test]
fn initial_distance_matches_position_to_target() {
    let c = controller();
    assert!(approx(c.distance(), 500f32.sqrt(), 1e-4));
    assert!(approx(c.distance(), 22.36, 0.01));
    assert!(approx_vec(c.target(), Vec3::ZERO, 1e-4));
}

#[test]
fn initial_orientation_looks_at_target() {
    let c = controller();
    let pose = c.pose();
    assert!(approx(pose.yaw, PI, 1e-5));
    assert!(approx(pose.pitch, (-10f32).atan2(20.0), 1e-5));
    let expected = (Vec3::ZERO - Vec3::new(0.0, 10.0, 20.0)).normalize();
    assert!(approx_vec(pose.forward(), expected, 1e-5));
}

#[test]
fn one_zoom_in_step_reduces_distance_by_zoom_speed() {
    let mut c = controller();
    let before = c.distance();
    c.on_wheel(-100.0);
    assert!(approx(c.distance(), before - DEFAULT_ZOOM_SPEED, 1e-4));
    // target stays put while dollying
    assert!(approx_vec(c.target(), Vec3::ZERO, 1e-3));
}

#[test]
fn zoom_out_increases_distance() {
    let mut c = controller();
    let before = c.distance();
    c.on_wheel(3.0);
    assert!(approx(c.distance(), before + DEFAULT_ZOOM_SPEED, 1e-4));
}

#[test]
fn repeated_zoom_in_stops_exactly_at_min() {
    let mut c = controller();
    for _ in 0..20 {
        c.on_wheel(-1.0);
        assert!(c.distance() >= DEFAULT_MIN_DISTANCE);
    }
    assert_eq!(c.distance(), DEFAULT_MIN_DISTANCE);
    let pose = *c.pose();
    c.on_wheel(-1.0);
    assert_eq!(*c.pose(), pose);
}

#[test]
fn repeated_zoom_out_stops_exactly_at_max() {
    let mut c = controller();
    for _ in 0..200 {
        c.on_wheel(1.0);
    }
    assert_eq!(c.distance(), DEFAULT_MAX_DISTANCE);
}

#[test]
fn mixed_wheel_sequences_stay_within_limits() {
    let mut c = controller();
    let deltas = [-1.0, -5.0, 2.0, -120.0, 0.5, 300.0, -0.01, 4.0];
    for i in 0..400 {
        c.on_wheel(deltas[i % deltas.len()] * if i % 7 == 0 { -1.0 } else { 1.0 });
        assert!(c.distance() >= DEFAULT_MIN_DISTANCE && c.distance() <= DEFAULT_MAX_DISTANCE);
    }
}

#[test]
fn zero_and_non_finite_wheel_deltas_are_ignored() {
    let mut c = controller();
    let pose = *c.pose();
    c.on_wheel(0.0);
    c.on_wheel(f32::NAN);
    c.on_wheel(f32::INFINITY);
    assert_eq!(*c.pose(), pose);
}

#[test]
fn reset_restores_freshly_constructed_pose() {
    let fresh = controller();
    let mut c = controller();
    c.on_pointer_down(PointerButton::Primary, Vec2::ZERO);
    c.on_pointer_move(Vec2::new(15.0, -7.0));
    c.on_pointer_up(PointerButton::Primary);
    c.on_pointer_down(PointerButton::Secondary, Vec2::ZERO);
    c.on_pointer_move(Vec2::new(-9.0, 4.0));
    c.on_wheel(-1.0);
    c.on_key_change(MoveKey::Forward, true);
    let mut cam = RenderCamera::default();
    c.tick(&mut cam);
    assert_ne!(c.pose(), fresh.pose());

    c.reset();
    assert_eq!(c.pose(), fresh.pose());
    assert!(!c.input().is_dragging());
}

#[test]
fn pitch_never_reaches_the_poles() {
    let mut c = controller();
    c.on_pointer_down(PointerButton::Primary, Vec2::ZERO);
    let mut y = 0.0;
    for _ in 0..500 {
        y -= 20.0;
        c.on_pointer_move(Vec2::new(0.0, y));
        assert!(c.pose().pitch.abs() < FRAC_PI_2);
    }
    assert!(approx(c.pose().pitch, PITCH_LIMIT, 1e-6));
    for _ in 0..1000 {
        y += 20.0;
        c.on_pointer_move(Vec2::new(0.0, y));
        assert!(c.pose().pitch.abs() < FRAC_PI_2);
    }
    assert!(approx(c.pose().pitch, -PITCH_LIMIT, 1e-6));
}

#[test]
fn drag_right_decreases_yaw_by_clamped_delta() {
    let mut c = controller();
    let yaw = c.pose().yaw;
    c.on_pointer_down(PointerButton::Primary, Vec2::ZERO);
    c.on_pointer_move(Vec2::new(100.0, 0.0));
    let expected = yaw - MAX_POINTER_DELTA_PX * DEFAULT_ROTATE_SPEED;
    assert!(approx(c.pose().yaw, expected, 1e-5));
}

#[test]
fn yaw_stays_wrapped() {
    let mut c = controller();
    c.on_pointer_down(PointerButton::Middle, Vec2::ZERO);
    let mut x = 0.0;
    for _ in 0..5000 {
        x += 20.0;
        c.on_pointer_move(Vec2::new(x, 0.0));
        let yaw = c.pose().yaw;
        assert!((0.0..std::f32::consts::TAU).contains(&yaw));
    }
}

#[test]
fn mismatched_pointer_up_keeps_drag() {
    let mut c = controller();
    c.on_pointer_down(PointerButton::Primary, Vec2::ZERO);
    c.on_pointer_up(PointerButton::Secondary);
    assert!(c.input().is_dragging());
    let yaw = c.pose().yaw;
    c.on_pointer_move(Vec2::new(10.0, 0.0));
    assert!(c.pose().yaw != yaw);
    c.on_pointer_up(PointerButton::Primary);
    assert!(!c.input().is_dragging());
}

#[test]
fn second_button_does_not_take_over_drag() {
    let mut c = controller();
    c.on_pointer_down(PointerButton::Primary, Vec2::ZERO);
    c.on_pointer_down(PointerButton::Secondary, Vec2::new(50.0, 50.0));
    assert_eq!(c.input().active_button, Some(PointerButton::Primary));
    assert_eq!(c.input().last_cursor, Vec2::ZERO);
}

#[test]
fn moves_without_drag_only_track_cursor() {
    let mut c = controller();
    let pose = *c.pose();
    c.on_pointer_move(Vec2::new(300.0, 200.0));
    assert_eq!(*c.pose(), pose);
    assert_eq!(c.input().last_cursor, Vec2::new(300.0, 200.0));
}

#[test]
fn secondary_drag_pans_position_and_target_together() {
    let mut c = controller();
    let pos = c.position();
    let target = c.target();
    c.on_pointer_down(PointerButton::Secondary, Vec2::ZERO);
    c.on_pointer_move(Vec2::new(10.0, 0.0));
    let moved = c.position() - pos;
    assert!(approx_vec(c.target() - target, moved, 1e-4));
    let scale = (500f32.sqrt() * PAN_DISTANCE_FACTOR).max(DEFAULT_PAN_SPEED);
    // looking down -Z, worldUp x forward points to -X
    assert!(approx_vec(moved, Vec3::new(-10.0 * scale, 0.0, 0.0), 1e-4));
    assert!(approx(c.distance(), 500f32.sqrt(), 1e-4));
}

#[test]
fn vertical_pan_moves_against_cursor() {
    let mut c = controller();
    let pos = c.position();
    c.on_pointer_down(PointerButton::Secondary, Vec2::ZERO);
    c.on_pointer_move(Vec2::new(0.0, 10.0));
    assert!(c.position().y < pos.y);
}

#[test]
fn forward_key_moves_along_view_direction() {
    let mut c = controller();
    let forward = c.pose().forward();
    let pos = c.position();
    c.on_key_change(MoveKey::Forward, true);
    let mut cam = RenderCamera::default();
    c.tick(&mut cam);
    assert!(approx_vec(c.position(), pos + forward * DEFAULT_MOVE_SPEED, 1e-4));
    assert!(approx(c.distance(), 500f32.sqrt(), 1e-4));
    assert_eq!(cam.eye, c.position());
    assert_eq!(cam.target, c.target());
    assert_eq!(cam.up, WORLD_UP);
}

#[test]
fn opposing_keys_cancel() {
    let mut c = controller();
    let pos = c.position();
    c.on_key_change(MoveKey::Left, true);
    c.on_key_change(MoveKey::Right, true);
    c.tick(&mut RenderCamera::default());
    assert!(approx_vec(c.position(), pos, 1e-6));
}

#[test]
fn released_key_stops_movement() {
    let mut c = controller();
    c.on_key_change(MoveKey::Up, true);
    c.on_key_change(MoveKey::Up, false);
    let pos = c.position();
    c.tick(&mut RenderCamera::default());
    assert_eq!(c.position(), pos);
}

#[test]
fn yaw_keys_turn_per_tick() {
    let mut c = controller();
    let yaw = c.pose().yaw;
    c.on_key_change(MoveKey::YawLeft, true);
    c.tick(&mut RenderCamera::default());
    assert!(approx(c.pose().yaw, yaw + KEY_YAW_STEP, 1e-6));
    c.on_key_change(MoveKey::YawLeft, false);
    c.on_key_change(MoveKey::YawRight, true);
    c.tick(&mut RenderCamera::default());
    c.tick(&mut RenderCamera::default());
    assert!(approx(c.pose().yaw, yaw - KEY_YAW_STEP, 1e-5));
}

#[test]
fn zoom_limits_pull_distance_into_range() {
    let mut c = controller();
    c.set_zoom_limits(30.0, 100.0);
    assert!(approx(c.distance(), 30.0, 1e-5));
    assert!(approx_vec(c.target(), Vec3::ZERO, 1e-3));
    c.set_zoom_limits(2.0, 10.0);
    assert!(approx(c.distance(), 10.0, 1e-5));
}

#[test]
fn invalid_zoom_limits_are_ignored() {
    let mut c = controller();
    let pose = *c.pose();
    c.set_zoom_limits(10.0, 5.0);
    c.set_zoom_limits(0.0, 5.0);
    c.set_zoom_limits(f32::NAN, 50.0);
    c.set_zoom_limits(8.0, 8.0);
    assert_eq!(*c.pose(), pose);
    assert_eq!(c.config().min_distance, DEFAULT_MIN_DISTANCE);
    assert_eq!(c.config().max_distance, DEFAULT_MAX_DISTANCE);
}

#[test]
fn initial_pose_change_applies_on_reset_only() {
    let mut c = controller();
    let pose = *c.pose();
    c.set_initial_pose(Vec3::new(0.0, 0.0, 30.0), Vec3::ZERO);
    assert_eq!(*c.pose(), pose);
    c.reset();
    assert!(approx_vec(c.position(), Vec3::new(0.0, 0.0, 30.0), 1e-5));
    assert!(approx(c.distance(), 30.0, 1e-5));
}

#[test]
fn pan_speed_sets_minimum_pan_scale() {
    let mut c = controller();
    c.set_pan_speed(0.5);
    c.set_pan_speed(-1.0);
    assert_eq!(c.config().pan_speed, 0.5);
    let pos = c.position();
    c.on_pointer_down(PointerButton::Secondary, Vec2::ZERO);
    c.on_pointer_move(Vec2::new(4.0, 0.0));
    assert!(approx((c.position() - pos).length(), 2.0, 1e-4));
}

#[test]
fn disposed_controller_ignores_input() {
    let mut c = controller();
    c.on_key_change(MoveKey::Forward, true);
    c.dispose();
    let pose = *c.pose();
    c.on_wheel(-1.0);
    c.on_pointer_down(PointerButton::Primary, Vec2::ZERO);
    c.on_pointer_move(Vec2::new(20.0, 20.0));
    c.on_key_change(MoveKey::Back, true);
    c.tick(&mut RenderCamera::default());
    assert_eq!(*c.pose(), pose);
    assert!(c.is_disposed());
}

#[test]
fn coincident_position_and_target_faces_negative_z() {
    let config = CameraConfig {
        initial_position: Vec3::new(1.0, 2.0, 3.0),
        initial_target: Vec3::new(1.0, 2.0, 3.0),
        ..CameraConfig::default()
    };
    let c = CameraController::new(config).unwrap();
    assert!(approx_vec(c.pose().forward(), Vec3::NEG_Z, 1e-5));
    assert_eq!(c.distance(), DEFAULT_MIN_DISTANCE);
}

#[test]
fn invalid_configs_are_rejected() {
    let bad_speed = CameraConfig {
        move_speed: 0.0,
        ..CameraConfig::default()
    };
    assert!(matches!(
        CameraController::new(bad_speed),
        Err(ConfigError::NonPositive { name: "move_speed", .. })
    ));
    let bad_limits = CameraConfig {
        min_distance: 50.0,
        max_distance: 10.0,
        ..CameraConfig::default()
    };
    assert!(matches!(
        CameraController::new(bad_limits),
        Err(ConfigError::InvalidDistanceLimits { .. })
    ));
    let bad_point = CameraConfig {
        initial_target: Vec3::new(f32::NAN, 0.0, 0.0),
        ..CameraConfig::default()
    };
    assert!(CameraController::new(bad_point).is_err());
}

#[test]
fn handle_event_dispatches_to_handlers() {
    let mut c = controller();
    let before = c.distance();
    c.handle_event(InputEvent::Wheel { delta_y: -1.0 });
    assert!(approx(c.distance(), before - DEFAULT_ZOOM_SPEED, 1e-4));
    c.handle_event(InputEvent::PointerDown {
        button: PointerButton::Primary,
        position: Vec2::new(1.0, 1.0),
    });
    assert!(c.input().is_dragging());
    c.handle_event(InputEvent::PointerUp {
        button: PointerButton::Primary,
    });
    assert!(!c.input().is_dragging());
    c.handle_event(InputEvent::Key {
        key: MoveKey::Down,
        pressed: true,
    });
    assert!(c.input().is_pressed(MoveKey::Down));
}
