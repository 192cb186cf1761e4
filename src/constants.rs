/// DOM ids, frame pacing and renderer tuning for the web front-end.
///
/// Kept free of `web_sys` so host-side tests can include this file.
// Elements provided by index.html
pub const CANVAS_ID: &str = "scene-canvas";
pub const UI_CONTAINER_ID: &str = "ui-container";
pub const RESET_BUTTON_ID: &str = "resetCamera";

// Elements created at runtime
pub const LOADING_CONTAINER_ID: &str = "loading-container";
pub const LOADING_TEXT_ID: &str = "loading-text";
pub const TOOLTIP_ID: &str = "point-tooltip";
pub const INFO_PANEL_ID: &str = "info-panel";
pub const INFO_BUTTON_ID: &str = "infoButton";
pub const INFO_CLOSE_ID: &str = "close-info";

pub const INFO_SHOW_LABEL: &str = "Show Interactive Points Info";
pub const INFO_HIDE_LABEL: &str = "Hide Interactive Points Info";

// Tooltip sits slightly below-right of the cursor (CSS px)
pub const TOOLTIP_OFFSET_PX: f32 = 14.0;

// Frame pacing
pub const MAX_FRAME_DT_SEC: f32 = 0.1; // long stalls (tab switch) advance at most this much

// Background 0x111111
pub const CLEAR_RGB: [f64; 3] = [17.0 / 255.0, 17.0 / 255.0, 17.0 / 255.0];

// Instance buffers start at this many points and double when outgrown
pub const INITIAL_INSTANCE_CAPACITY: usize = 4096;

// Hover frame: square outline around the hovered marker
pub const HOVER_FRAME_HALF_EXTENT: f32 = 0.15;
pub const HOVER_FRAME_POINTS_PER_EDGE: usize = 4;
pub const HOVER_FRAME_POINT_SIZE: f32 = 0.03;
pub const HOVER_FRAME_COLOR: [f32; 4] = [1.0, 1.0, 1.0, 0.9];
