use crate::constants::{
    HOVER_FRAME_COLOR, HOVER_FRAME_HALF_EXTENT, HOVER_FRAME_POINTS_PER_EDGE,
    HOVER_FRAME_POINT_SIZE,
};
use glam::{Quat, Vec2, Vec3};
use scene_core::{HoverFrame, Marker, MarkerKind, PointVertex};

/// App-level shortcuts handled outside the camera rig.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum AppAction {
    ResetCamera,
    ToggleInfo,
    ToggleTimeOfDay,
}

#[inline]
pub fn app_action_for_key(key: &str) -> Option<AppAction> {
    match key {
        "r" | "R" => Some(AppAction::ResetCamera),
        "i" | "I" => Some(AppAction::ToggleInfo),
        "n" | "N" => Some(AppAction::ToggleTimeOfDay),
        _ => None,
    }
}

/// Map a client-space cursor to NDC over an element rect.
///
/// Points outside the rect map outside \[-1, 1\]; `None` for an empty rect.
#[inline]
pub fn client_to_ndc(client: Vec2, rect_origin: Vec2, rect_size: Vec2) -> Option<Vec2> {
    if rect_size.x <= 0.0 || rect_size.y <= 0.0 {
        return None;
    }
    let local = (client - rect_origin) / rect_size;
    Some(Vec2::new(local.x * 2.0 - 1.0, 1.0 - local.y * 2.0))
}

/// Tooltip for a hovered marker; `index` is its position in the set.
pub fn tooltip_text(index: usize, marker: &Marker) -> String {
    match &marker.kind {
        MarkerKind::Activated(payload) => format!("{} - Click to open", payload.label),
        MarkerKind::Potential => format!("Point {}", index + 1),
    }
}

pub fn info_panel_html(potential: usize, activated: usize, close_id: &str) -> String {
    format!(
        "<h3>Interactive Tree Points</h3>\
         <p>Green points: Potential interaction points ({potential})</p>\
         <p>Red points: Activated points ({activated}) - click to navigate</p>\
         <p>Hover over any red point to see interaction frame.</p>\
         <p>Drag to look around, right-drag to pan, scroll to zoom, WASD/Space/Shift to move, Q/E to turn. \
         R resets the camera, N toggles night.</p>\
         <button id=\"{close_id}\">Close</button>"
    )
}

/// Square outline of points around a hovered marker, turned about +Y by the
/// frame's spin.
pub fn write_hover_frame(frame: &HoverFrame, out: &mut Vec<PointVertex>) {
    let h = HOVER_FRAME_HALF_EXTENT;
    let n = HOVER_FRAME_POINTS_PER_EDGE.max(1);
    let corners = [
        Vec2::new(-h, -h),
        Vec2::new(h, -h),
        Vec2::new(h, h),
        Vec2::new(-h, h),
    ];
    let rot = Quat::from_rotation_y(frame.spin);
    for edge in 0..4 {
        let a = corners[edge];
        let b = corners[(edge + 1) % 4];
        for i in 0..n {
            let p = a.lerp(b, i as f32 / n as f32);
            let local = rot * Vec3::new(p.x, p.y, 0.0);
            out.push(PointVertex::new(
                frame.position + local,
                HOVER_FRAME_POINT_SIZE,
                HOVER_FRAME_COLOR,
            ));
        }
    }
}
