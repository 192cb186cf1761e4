// Marker build, hover picking and click activation.

use glam::{Mat4, Vec2, Vec3};
use scene_core::*;

fn camera_at_z(z: f32) -> RenderCamera {
    let mut cam = RenderCamera::new(16.0 / 9.0);
    cam.eye = Vec3::new(0.0, 0.0, z);
    cam.target = Vec3::ZERO;
    cam
}

fn fixed(positions: Vec<Vec3>, activated: usize) -> MarkerSet {
    MarkerSet::build(&MarkerLayout {
        placement: MarkerPlacement::Fixed(positions),
        activated_count: activated,
        payloads: (1..=activated.max(1)).map(ActivationPayload::numbered).collect(),
        seed: Some(7),
    })
    .unwrap()
}

#[test]
fn exact_ray_hovers_only_that_marker() {
    let mut set = fixed(
        vec![
            Vec3::ZERO,
            Vec3::new(3.0, 0.0, 0.0),
            Vec3::new(0.0, 3.0, 0.0),
        ],
        0,
    );
    let cam = camera_at_z(10.0);
    assert_eq!(set.update_hover(Vec2::ZERO, &cam), Some(0));
    let hovered: Vec<bool> = set.markers().iter().map(|m| m.hovered).collect();
    assert_eq!(hovered, vec![true, false, false]);

    let ndc = cam.project_to_ndc(Vec3::new(3.0, 0.0, 0.0)).unwrap();
    assert_eq!(set.update_hover(ndc, &cam), Some(1));
    let hovered: Vec<bool> = set.markers().iter().map(|m| m.hovered).collect();
    assert_eq!(hovered, vec![false, true, false]);
}

#[test]
fn nearest_marker_along_ray_wins() {
    let mut set = fixed(vec![Vec3::new(0.0, 0.0, -5.0), Vec3::ZERO], 0);
    let cam = camera_at_z(10.0);
    assert_eq!(set.update_hover(Vec2::ZERO, &cam), Some(1));
}

#[test]
fn tolerance_is_measured_in_world_units() {
    let mut set = fixed(vec![Vec3::new(0.15, 0.0, 0.0)], 0);
    let cam = camera_at_z(10.0);
    assert_eq!(set.update_hover(Vec2::ZERO, &cam), Some(0));
    let mut far = fixed(vec![Vec3::new(0.3, 0.0, 0.0)], 0);
    assert_eq!(far.update_hover(Vec2::ZERO, &cam), None);
}

#[test]
fn markers_behind_the_eye_are_ignored() {
    let mut set = fixed(vec![Vec3::new(0.0, 0.0, 20.0)], 0);
    let cam = camera_at_z(10.0);
    assert_eq!(set.update_hover(Vec2::ZERO, &cam), None);
}

#[test]
fn moving_away_clears_hover() {
    let mut set = fixed(vec![Vec3::ZERO], 0);
    let cam = camera_at_z(10.0);
    set.update_hover(Vec2::ZERO, &cam);
    assert_eq!(set.hovered(), Some(0));
    set.update_hover(Vec2::new(0.9, 0.9), &cam);
    assert_eq!(set.hovered(), None);
    assert!(!set.markers()[0].hovered);
}

#[test]
fn empty_set_never_hovers() {
    let mut set = MarkerSet::empty();
    let cam = camera_at_z(10.0);
    for ndc in [Vec2::ZERO, Vec2::new(1.5, -3.0), Vec2::new(f32::NAN, 0.0)] {
        assert_eq!(set.update_hover(ndc, &cam), None);
    }
    assert!(set.on_click().is_none());
    assert!(set.hover_frame().is_none());
}

#[test]
fn non_finite_cursor_clears_hover() {
    let mut set = fixed(vec![Vec3::ZERO], 0);
    let cam = camera_at_z(10.0);
    set.update_hover(Vec2::ZERO, &cam);
    assert_eq!(set.update_hover(Vec2::new(f32::NAN, 0.0), &cam), None);
    assert_eq!(set.hovered(), None);
}

#[test]
fn degenerate_ray_picks_nothing() {
    let set = fixed(vec![Vec3::ZERO], 0);
    let ray = Ray::new(Vec3::ZERO, Vec3::ZERO);
    assert_eq!(set.pick(&ray), None);
}

#[test]
fn transform_moves_hit_testing() {
    let mut set = fixed(vec![Vec3::ZERO], 0).with_transform(Mat4::from_translation(Vec3::new(
        5.0, 0.0, 0.0,
    )));
    let cam = camera_at_z(10.0);
    assert_eq!(set.update_hover(Vec2::ZERO, &cam), None);
    assert_eq!(set.world_position(0), Some(Vec3::new(5.0, 0.0, 0.0)));
    let ndc = cam.project_to_ndc(Vec3::new(5.0, 0.0, 0.0)).unwrap();
    assert_eq!(set.update_hover(ndc, &cam), Some(0));
}

#[test]
fn click_returns_payload_only_for_activated_marker() {
    let mut set = fixed(vec![Vec3::ZERO, Vec3::new(3.0, 0.0, 0.0)], 1);
    let cam = camera_at_z(10.0);
    let activated = set.markers().iter().position(Marker::is_activated).unwrap();
    let other = 1 - activated;

    let aim = |i: usize| cam.project_to_ndc(set.world_position(i).unwrap()).unwrap();
    let (aim_active, aim_other) = (aim(activated), aim(other));

    set.update_hover(aim_other, &cam);
    assert_eq!(set.hovered(), Some(other));
    assert!(set.on_click().is_none());

    set.update_hover(aim_active, &cam);
    let payload = set.on_click().unwrap();
    assert_eq!(payload.url, "point1.html");
    assert_eq!(payload.label, "Point 1");
}

#[test]
fn build_activates_requested_count_with_cyclic_payloads() {
    let bounds = Aabb::new(Vec3::splat(-2.0), Vec3::splat(2.0));
    let layout = MarkerLayout {
        placement: MarkerPlacement::Sampled { count: 150, bounds },
        activated_count: 5,
        payloads: vec![
            ActivationPayload::new("a.html", "A"),
            ActivationPayload::new("b.html", "B"),
        ],
        seed: Some(11),
    };
    let set = MarkerSet::build(&layout).unwrap();
    assert_eq!(set.len(), 150);
    let payloads: Vec<&ActivationPayload> =
        set.markers().iter().filter_map(Marker::payload).collect();
    assert_eq!(payloads.len(), 5);
    assert_eq!(payloads.iter().filter(|p| p.url == "a.html").count(), 3);
    assert_eq!(payloads.iter().filter(|p| p.url == "b.html").count(), 2);
    assert!(set.markers().iter().all(|m| bounds.contains(m.position)));
}

#[test]
fn seeded_builds_are_reproducible() {
    let bounds = Aabb::new(Vec3::ZERO, Vec3::splat(10.0));
    let layout = MarkerLayout::sampled(40, 5, bounds, Some(3));
    let a = MarkerSet::build(&layout).unwrap();
    let b = MarkerSet::build(&layout).unwrap();
    assert_eq!(a.markers(), b.markers());
}

#[test]
fn build_errors() {
    let too_many = MarkerLayout {
        placement: MarkerPlacement::Fixed(vec![Vec3::ZERO; 2]),
        activated_count: 3,
        payloads: vec![ActivationPayload::numbered(1)],
        seed: None,
    };
    assert_eq!(
        MarkerSet::build(&too_many).unwrap_err(),
        BuildError::TooManyActivated {
            activated: 3,
            available: 2
        }
    );
    let no_payloads = MarkerLayout {
        placement: MarkerPlacement::Fixed(vec![Vec3::ZERO; 4]),
        activated_count: 1,
        payloads: vec![],
        seed: None,
    };
    assert_eq!(
        MarkerSet::build(&no_payloads).unwrap_err(),
        BuildError::MissingPayloads { activated: 1 }
    );
}

#[test]
fn pulse_and_spin_never_move_hit_geometry() {
    let mut set = fixed(vec![Vec3::ZERO], 0);
    let cam = camera_at_z(10.0);
    set.update_hover(Vec2::ZERO, &cam);
    let before: Vec<Vec3> = set.markers().iter().map(|m| m.position).collect();
    for _ in 0..100 {
        set.tick(1.0 / 60.0);
    }
    let after: Vec<Vec3> = set.markers().iter().map(|m| m.position).collect();
    assert_eq!(before, after);
    let frame = set.hover_frame().unwrap();
    assert!((frame.spin - 100.0 * HOVER_FRAME_SPIN_PER_TICK).abs() < 1e-4);
    assert_eq!(frame.position, Vec3::new(0.0, HOVER_FRAME_LIFT, 0.0));
    let s = set.pulse_scale();
    assert!(s >= 1.0 - MARKER_PULSE_AMPLITUDE && s <= 1.0 + MARKER_PULSE_AMPLITUDE);
}

#[test]
fn vertices_reflect_kind_and_hover() {
    let mut set = fixed(vec![Vec3::ZERO, Vec3::new(3.0, 0.0, 0.0)], 1);
    let cam = camera_at_z(10.0);
    set.update_hover(Vec2::ZERO, &cam);
    let mut out = Vec::new();
    set.write_vertices(&mut out);
    assert_eq!(out.len(), 2);
    assert_eq!(out[0].color, HOVERED_MARKER_COLOR);
    assert_eq!(out[0].size, MARKER_HOVER_SIZE);
    let expected = if set.markers()[1].is_activated() {
        ACTIVATED_MARKER_COLOR
    } else {
        POTENTIAL_MARKER_COLOR
    };
    assert_eq!(out[1].color, expected);
    assert_eq!(out[1].size, MARKER_POINT_SIZE);
}
