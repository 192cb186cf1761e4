use glam::Vec3;
use std::f32::consts::FRAC_PI_2;

// Shared camera, picking and animation tuning used by the web frontend.

// Camera defaults
pub const DEFAULT_INITIAL_POSITION: Vec3 = Vec3::new(0.0, 10.0, 20.0);
pub const DEFAULT_INITIAL_TARGET: Vec3 = Vec3::ZERO;
pub const DEFAULT_MOVE_SPEED: f32 = 0.25; // world units per tick per key
pub const DEFAULT_ROTATE_SPEED: f32 = 0.002; // radians per pixel
pub const DEFAULT_PAN_SPEED: f32 = 0.01; // minimum pan scale (world units per pixel)
pub const DEFAULT_ZOOM_SPEED: f32 = 2.0; // world units per wheel notch
pub const DEFAULT_MIN_DISTANCE: f32 = 5.0;
pub const DEFAULT_MAX_DISTANCE: f32 = 200.0;

// Camera interaction
pub const MAX_POINTER_DELTA_PX: f32 = 20.0; // larger single-event jumps are shortened
pub const PAN_DISTANCE_FACTOR: f32 = 0.0005; // pan scale per unit of distance-to-target
pub const PITCH_MARGIN: f32 = 0.1; // keeps pitch off the poles
pub const PITCH_LIMIT: f32 = FRAC_PI_2 - PITCH_MARGIN;
pub const KEY_YAW_STEP: f32 = 0.02; // radians per tick while Q/E held
pub const WORLD_UP: Vec3 = Vec3::Y;

// Render camera
pub const DEFAULT_FOVY_DEGREES: f32 = 75.0;
pub const DEFAULT_ZNEAR: f32 = 0.1;
pub const DEFAULT_ZFAR: f32 = 1000.0;

// Markers
pub const MARKER_PICK_TOLERANCE: f32 = 0.2; // world-space distance from the pick ray
pub const MARKER_POINT_SIZE: f32 = 0.08;
pub const MARKER_HOVER_SIZE: f32 = 0.12;
pub const MARKER_PULSE_AMPLITUDE: f32 = 0.3;
pub const MARKER_PULSE_RATE: f32 = 2.0; // radians per second
pub const HOVER_FRAME_LIFT: f32 = 0.4; // frame floats above the hovered marker
pub const HOVER_FRAME_SPIN_PER_TICK: f32 = 0.005;
pub const DEFAULT_POTENTIAL_MARKERS: usize = 150;
pub const DEFAULT_ACTIVATED_MARKERS: usize = 5;

pub const POTENTIAL_MARKER_COLOR: [f32; 4] = [0.0, 1.0, 0.0, 1.0]; // green
pub const ACTIVATED_MARKER_COLOR: [f32; 4] = [1.0, 0.0, 0.0, 1.0]; // red
pub const HOVERED_MARKER_COLOR: [f32; 4] = [1.0, 1.0, 0.0, 1.0]; // yellow

// Tree palette (sRGB hex 0x8B4513 / 0x228B22)
pub const TRUNK_COLOR: [f32; 3] = [0.545, 0.271, 0.075];
pub const LEAF_COLOR: [f32; 3] = [0.133, 0.545, 0.133];
pub const TREE_POINT_SIZE: f32 = 0.08;
pub const FALLBACK_POINT_SIZE: f32 = 0.05;
pub const FALLBACK_SEED: u64 = 0x7265_6531; // fixed so the placeholder never changes
pub const FALLBACK_RADIAL_SEGMENTS: usize = 8;
pub const FALLBACK_INTERIOR_POINTS: usize = 1000;

// Density fill
pub const DENSITY_JITTER: f32 = 0.3;
pub const DENSITY_MIN_SPACING: f32 = 0.2;
pub const DENSITY_DEDUP_LATTICE: f32 = 10.0; // keys are rounded to 1/10 unit
pub const DENSITY_BAND_HALF_HEIGHT: f32 = 2.0;
pub const DENSITY_ATTEMPTS_PER_POINT: usize = 3;

// Loading animation
pub const LOADING_STEP_PER_FRAME: f32 = 0.8; // percent
pub const LOADING_SETTLE_SEC: f32 = 1.3; // hold after full + delay before fade
pub const LOADING_FADE_SEC: f32 = 1.2;
pub const LOADING_LABEL: &str = "HOMARA";
