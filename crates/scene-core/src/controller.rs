//! First-person camera controller with orbit-style zoom limits.
//!
//! The pose is authoritative as `position + yaw/pitch + distance`; the
//! look-at target is always derived from it. Button mapping: primary and
//! middle drags rotate the view, secondary drags pan, the wheel dollies the
//! camera toward or away from the target.

use crate::camera::RenderCamera;
use crate::constants::*;
use crate::input::{InputEvent, InputState, MoveKey, PointerButton};
use crate::math::{direction_from_yaw_pitch, wrap_angle, yaw_pitch_from_direction};
use glam::{Mat3, Quat, Vec2, Vec3};
use std::f32::consts::PI;
use thiserror::Error;

#[derive(Debug, Error, Clone, PartialEq)]
pub enum ConfigError {
    #[error("{name} must be finite and positive, got {value}")]
    NonPositive { name: &'static str, value: f32 },
    #[error("distance limits must satisfy 0 < min < max, got [{min}, {max}]")]
    InvalidDistanceLimits { min: f32, max: f32 },
    #[error("{name} must be a finite point")]
    NonFinitePoint { name: &'static str },
}

/// Speeds, limits and the pose `reset()` returns to.
#[derive(Clone, Debug, PartialEq)]
pub struct CameraConfig {
    /// World units per tick for each held movement key.
    pub move_speed: f32,
    /// Radians per dragged pixel.
    pub rotate_speed: f32,
    /// Minimum world units per dragged pixel when panning.
    pub pan_speed: f32,
    /// World units per wheel notch.
    pub zoom_speed: f32,
    pub min_distance: f32,
    pub max_distance: f32,
    pub initial_position: Vec3,
    pub initial_target: Vec3,
}

impl Default for CameraConfig {
    fn default() -> Self {
        Self {
            move_speed: DEFAULT_MOVE_SPEED,
            rotate_speed: DEFAULT_ROTATE_SPEED,
            pan_speed: DEFAULT_PAN_SPEED,
            zoom_speed: DEFAULT_ZOOM_SPEED,
            min_distance: DEFAULT_MIN_DISTANCE,
            max_distance: DEFAULT_MAX_DISTANCE,
            initial_position: DEFAULT_INITIAL_POSITION,
            initial_target: DEFAULT_INITIAL_TARGET,
        }
    }
}

impl CameraConfig {
    pub fn validate(&self) -> Result<(), ConfigError> {
        let speeds = [
            ("move_speed", self.move_speed),
            ("rotate_speed", self.rotate_speed),
            ("pan_speed", self.pan_speed),
            ("zoom_speed", self.zoom_speed),
        ];
        for (name, value) in speeds {
            if !(value.is_finite() && value > 0.0) {
                return Err(ConfigError::NonPositive { name, value });
            }
        }
        validate_limits(self.min_distance, self.max_distance)?;
        if !self.initial_position.is_finite() {
            return Err(ConfigError::NonFinitePoint {
                name: "initial_position",
            });
        }
        if !self.initial_target.is_finite() {
            return Err(ConfigError::NonFinitePoint {
                name: "initial_target",
            });
        }
        Ok(())
    }
}

fn validate_limits(min: f32, max: f32) -> Result<(), ConfigError> {
    if min.is_finite() && max.is_finite() && min > 0.0 && min < max {
        Ok(())
    } else {
        Err(ConfigError::InvalidDistanceLimits { min, max })
    }
}

/// Logical camera pose owned by the controller.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct CameraPose {
    pub position: Vec3,
    /// Heading around +Y in \[0, 2π); 0 looks down +Z.
    pub yaw: f32,
    /// Elevation, kept within ±`PITCH_LIMIT`.
    pub pitch: f32,
    /// Distance from `position` to the derived target.
    pub distance: f32,
}

impl CameraPose {
    /// Pose at `position` facing `target`, distance clamped into the limits.
    pub fn look_at(position: Vec3, target: Vec3, min_distance: f32, max_distance: f32) -> Self {
        let offset = target - position;
        let len = offset.length();
        let (yaw, pitch) = if len > f32::EPSILON {
            yaw_pitch_from_direction(offset / len)
        } else {
            (PI, 0.0)
        };
        Self {
            position,
            yaw: wrap_angle(yaw),
            pitch: pitch.clamp(-PITCH_LIMIT, PITCH_LIMIT),
            distance: len.clamp(min_distance, max_distance),
        }
    }

    #[inline]
    pub fn forward(&self) -> Vec3 {
        direction_from_yaw_pitch(self.yaw, self.pitch)
    }

    #[inline]
    pub fn target(&self) -> Vec3 {
        self.position + self.forward() * self.distance
    }

    /// Rotation taking camera-local axes (-Z forward, +Y up) to world space.
    pub fn orientation(&self) -> Quat {
        let forward = self.forward();
        let right = forward.cross(WORLD_UP).normalize_or_zero();
        let up = right.cross(forward);
        Quat::from_mat3(&Mat3::from_cols(right, up, -forward))
    }
}

pub struct CameraController {
    config: CameraConfig,
    pose: CameraPose,
    input: InputState,
    disposed: bool,
}

impl CameraController {
    pub fn new(config: CameraConfig) -> Result<Self, ConfigError> {
        config.validate()?;
        let pose = Self::initial_pose(&config);
        log::info!(
            "[camera] init pos=({:.2},{:.2},{:.2}) distance={:.2}",
            pose.position.x,
            pose.position.y,
            pose.position.z,
            pose.distance
        );
        Ok(Self {
            config,
            pose,
            input: InputState::default(),
            disposed: false,
        })
    }

    fn initial_pose(config: &CameraConfig) -> CameraPose {
        CameraPose::look_at(
            config.initial_position,
            config.initial_target,
            config.min_distance,
            config.max_distance,
        )
    }

    pub fn config(&self) -> &CameraConfig {
        &self.config
    }

    pub fn pose(&self) -> &CameraPose {
        &self.pose
    }

    pub fn input(&self) -> &InputState {
        &self.input
    }

    pub fn position(&self) -> Vec3 {
        self.pose.position
    }

    pub fn target(&self) -> Vec3 {
        self.pose.target()
    }

    pub fn distance(&self) -> f32 {
        self.pose.distance
    }

    pub fn is_disposed(&self) -> bool {
        self.disposed
    }

    pub fn handle_event(&mut self, event: InputEvent) {
        match event {
            InputEvent::PointerDown { button, position } => self.on_pointer_down(button, position),
            InputEvent::PointerMove { position } => self.on_pointer_move(position),
            InputEvent::PointerUp { button } => self.on_pointer_up(button),
            InputEvent::Wheel { delta_y } => self.on_wheel(delta_y),
            InputEvent::Key { key, pressed } => self.on_key_change(key, pressed),
        }
    }

    pub fn on_pointer_down(&mut self, button: PointerButton, position: Vec2) {
        // a second button never takes over an active drag
        if self.disposed || self.input.is_dragging() {
            return;
        }
        self.input.active_button = Some(button);
        self.input.last_cursor = position;
    }

    pub fn on_pointer_move(&mut self, position: Vec2) {
        if self.disposed {
            return;
        }
        let delta = position - self.input.last_cursor;
        self.input.last_cursor = position;
        let Some(button) = self.input.active_button else {
            return;
        };
        if !delta.is_finite() {
            return;
        }
        let delta = delta.clamp_length_max(MAX_POINTER_DELTA_PX);
        match button {
            PointerButton::Primary | PointerButton::Middle => self.rotate(delta),
            PointerButton::Secondary => self.pan(delta),
        }
    }

    pub fn on_pointer_up(&mut self, button: PointerButton) {
        if self.input.active_button == Some(button) {
            self.input.active_button = None;
        }
    }

    pub fn on_wheel(&mut self, delta_y: f32) {
        if self.disposed || !delta_y.is_finite() || delta_y == 0.0 {
            return;
        }
        let step = if delta_y > 0.0 {
            self.config.zoom_speed
        } else {
            -self.config.zoom_speed
        };
        let current = self.pose.distance;
        let next = (current + step).clamp(self.config.min_distance, self.config.max_distance);
        if next != current {
            self.dolly_to(next);
        }
    }

    pub fn on_key_change(&mut self, key: MoveKey, pressed: bool) {
        if self.disposed {
            return;
        }
        self.input.set_key(key, pressed);
    }

    /// Apply held keys and write the pose into the renderer's camera.
    pub fn tick(&mut self, camera: &mut RenderCamera) {
        let local = self.key_movement();
        if local != Vec3::ZERO {
            let candidate = self.pose.position + self.pose.orientation() * local;
            if candidate.is_finite() && self.within_limits(self.pose.distance) {
                self.pose.position = candidate;
            }
        }
        let mut yaw_step = 0.0;
        if self.input.is_pressed(MoveKey::YawLeft) {
            yaw_step += KEY_YAW_STEP;
        }
        if self.input.is_pressed(MoveKey::YawRight) {
            yaw_step -= KEY_YAW_STEP;
        }
        if yaw_step != 0.0 {
            self.pose.yaw = wrap_angle(self.pose.yaw + yaw_step);
        }
        self.write_to(camera);
    }

    /// Copy the current pose into `camera` without advancing anything.
    pub fn write_to(&self, camera: &mut RenderCamera) {
        camera.eye = self.pose.position;
        camera.target = self.pose.target();
        camera.up = WORLD_UP;
    }

    /// Change the zoom range. Invalid ranges are ignored; the current
    /// distance is pulled into a valid one along the view axis.
    pub fn set_zoom_limits(&mut self, min: f32, max: f32) {
        if let Err(e) = validate_limits(min, max) {
            log::warn!("[camera] ignoring zoom limits: {}", e);
            return;
        }
        self.config.min_distance = min;
        self.config.max_distance = max;
        let clamped = self.pose.distance.clamp(min, max);
        if clamped != self.pose.distance {
            self.dolly_to(clamped);
        }
    }

    pub fn set_pan_speed(&mut self, speed: f32) {
        if speed.is_finite() && speed > 0.0 {
            self.config.pan_speed = speed;
        } else {
            log::warn!("[camera] ignoring pan speed {}", speed);
        }
    }

    /// Change the pose `reset()` restores; the current pose is untouched.
    pub fn set_initial_pose(&mut self, position: Vec3, target: Vec3) {
        if position.is_finite() && target.is_finite() {
            self.config.initial_position = position;
            self.config.initial_target = target;
        } else {
            log::warn!("[camera] ignoring non-finite initial pose");
        }
    }

    pub fn reset(&mut self) {
        self.pose = Self::initial_pose(&self.config);
        self.input.active_button = None;
        log::info!(
            "[camera] reset to ({:.2},{:.2},{:.2})",
            self.pose.position.x,
            self.pose.position.y,
            self.pose.position.z
        );
    }

    /// Stop reacting to input. Held keys and drags are dropped so `tick`
    /// no longer moves the camera.
    pub fn dispose(&mut self) {
        self.disposed = true;
        self.input.clear();
    }

    fn rotate(&mut self, delta: Vec2) {
        let speed = self.config.rotate_speed;
        self.pose.yaw = wrap_angle(self.pose.yaw - delta.x * speed);
        self.pose.pitch = (self.pose.pitch - delta.y * speed).clamp(-PITCH_LIMIT, PITCH_LIMIT);
    }

    fn pan(&mut self, delta: Vec2) {
        let scale = (self.pose.distance * PAN_DISTANCE_FACTOR).max(self.config.pan_speed);
        let right = WORLD_UP.cross(self.pose.forward()).normalize_or_zero();
        let offset = right * (delta.x * scale) - WORLD_UP * (delta.y * scale);
        self.pose.position += offset;
    }

    /// Move the eye along the view axis so the target stays put.
    fn dolly_to(&mut self, distance: f32) {
        let target = self.pose.target();
        self.pose.distance = distance;
        self.pose.position = target - self.pose.forward() * distance;
    }

    fn within_limits(&self, distance: f32) -> bool {
        distance >= self.config.min_distance && distance <= self.config.max_distance
    }

    fn key_movement(&self) -> Vec3 {
        let speed = self.config.move_speed;
        let mut movement = Vec3::ZERO;
        for key in self.input.pressed_keys() {
            match key {
                MoveKey::Forward => movement.z -= speed,
                MoveKey::Back => movement.z += speed,
                MoveKey::Left => movement.x -= speed,
                MoveKey::Right => movement.x += speed,
                MoveKey::Up => movement.y += speed,
                MoveKey::Down => movement.y -= speed,
                MoveKey::YawLeft | MoveKey::YawRight => {}
            }
        }
        movement
    }
}
