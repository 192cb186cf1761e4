// Host-side tests for pure front-end helpers.
// The main crate is wasm-only, so we include the pure-Rust modules directly.

#![allow(dead_code)]
mod constants {
    include!("../src/constants.rs");
}
mod controls {
    include!("../src/controls.rs");
}

use constants::*;
use controls::*;
use glam::{Vec2, Vec3};
use scene_core::{ActivationPayload, HoverFrame, Marker, MarkerKind};

#[test]
fn app_keys_map_to_actions() {
    assert_eq!(app_action_for_key("r"), Some(AppAction::ResetCamera));
    assert_eq!(app_action_for_key("R"), Some(AppAction::ResetCamera));
    assert_eq!(app_action_for_key("i"), Some(AppAction::ToggleInfo));
    assert_eq!(app_action_for_key("N"), Some(AppAction::ToggleTimeOfDay));
    // Movement keys belong to the camera, not the app
    for k in ["w", "a", "s", "d", "q", "e", " ", "Shift"] {
        assert_eq!(app_action_for_key(k), None, "{k}");
    }
}

#[test]
fn client_to_ndc_maps_rect_corners() {
    let origin = Vec2::new(100.0, 50.0);
    let size = Vec2::new(800.0, 600.0);
    let tl = client_to_ndc(origin, origin, size).unwrap();
    assert!((tl - Vec2::new(-1.0, 1.0)).length() < 1e-6);
    let br = client_to_ndc(origin + size, origin, size).unwrap();
    assert!((br - Vec2::new(1.0, -1.0)).length() < 1e-6);
    let center = client_to_ndc(origin + size * 0.5, origin, size).unwrap();
    assert!(center.length() < 1e-6);
    // Outside the rect stays outside [-1, 1]
    let outside = client_to_ndc(Vec2::ZERO, origin, size).unwrap();
    assert!(outside.x < -1.0 && outside.y > 1.0);
}

#[test]
fn client_to_ndc_rejects_empty_rect() {
    assert!(client_to_ndc(Vec2::ONE, Vec2::ZERO, Vec2::new(0.0, 10.0)).is_none());
    assert!(client_to_ndc(Vec2::ONE, Vec2::ZERO, Vec2::new(10.0, 0.0)).is_none());
}

#[test]
fn tooltip_text_depends_on_marker_kind() {
    let activated = Marker {
        position: Vec3::ZERO,
        kind: MarkerKind::Activated(ActivationPayload::new("about.html", "About")),
        hovered: true,
    };
    assert_eq!(tooltip_text(3, &activated), "About - Click to open");
    let potential = Marker {
        position: Vec3::ZERO,
        kind: MarkerKind::Potential,
        hovered: true,
    };
    assert_eq!(tooltip_text(0, &potential), "Point 1");
    assert_eq!(tooltip_text(41, &potential), "Point 42");
}

#[test]
fn info_panel_lists_counts_and_close_button() {
    let html = info_panel_html(145, 5, "close-me");
    assert!(html.contains("(145)"));
    assert!(html.contains("(5)"));
    assert!(html.contains("id=\"close-me\""));
}

#[test]
fn hover_frame_outline_surrounds_center() {
    let center = Vec3::new(1.0, 5.0, -2.0);
    let mut out = Vec::new();
    write_hover_frame(
        &HoverFrame {
            position: center,
            spin: 0.0,
        },
        &mut out,
    );
    assert_eq!(out.len(), 4 * HOVER_FRAME_POINTS_PER_EDGE);
    for v in &out {
        let d = v.pos() - center;
        // Unrotated square lies in the XY plane on its edges
        assert!(d.z.abs() < 1e-6);
        let edge = d.x.abs().max(d.y.abs());
        assert!((edge - HOVER_FRAME_HALF_EXTENT).abs() < 1e-5);
        assert_eq!(v.size, HOVER_FRAME_POINT_SIZE);
        assert_eq!(v.color, HOVER_FRAME_COLOR);
    }
}

#[test]
fn hover_frame_spin_turns_about_up_axis() {
    let center = Vec3::ZERO;
    let mut flat = Vec::new();
    let mut turned = Vec::new();
    write_hover_frame(
        &HoverFrame {
            position: center,
            spin: 0.0,
        },
        &mut flat,
    );
    write_hover_frame(
        &HoverFrame {
            position: center,
            spin: std::f32::consts::FRAC_PI_2,
        },
        &mut turned,
    );
    for (a, b) in flat.iter().zip(&turned) {
        // Heights and distance from the axis are unchanged
        assert!((a.position[1] - b.position[1]).abs() < 1e-6);
        let ra = Vec2::new(a.position[0], a.position[2]).length();
        let rb = Vec2::new(b.position[0], b.position[2]).length();
        assert!((ra - rb).abs() < 1e-5);
        // A quarter turn moves x into z
        assert!(b.position[0].abs() < 1e-5);
    }
}
