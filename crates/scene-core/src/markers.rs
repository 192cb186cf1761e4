//! Clickable marker points scattered over the tree.
//!
//! Hover is recomputed from a pick ray every frame; at most one marker is
//! hovered at a time. Activated markers carry the payload the host opens on
//! click, potential markers are decoration only.

use crate::camera::RenderCamera;
use crate::constants::*;
use crate::math::{Aabb, Ray};
use crate::vertex::PointVertex;
use glam::{Mat4, Vec2, Vec3};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use thiserror::Error;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum BuildError {
    #[error("cannot activate {activated} markers out of {available}")]
    TooManyActivated { activated: usize, available: usize },
    #[error("{activated} activated markers need at least one payload")]
    MissingPayloads { activated: usize },
}

/// What the host does when an activated marker is clicked.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ActivationPayload {
    pub url: String,
    pub label: String,
}

impl ActivationPayload {
    pub fn new(url: impl Into<String>, label: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            label: label.into(),
        }
    }

    /// `point{n}.html` labelled `Point {n}`.
    pub fn numbered(n: usize) -> Self {
        Self::new(format!("point{n}.html"), format!("Point {n}"))
    }
}

#[derive(Clone, Debug, PartialEq)]
pub enum MarkerKind {
    Potential,
    Activated(ActivationPayload),
}

#[derive(Clone, Debug, PartialEq)]
pub struct Marker {
    /// Position in the marker set's local frame.
    pub position: Vec3,
    pub kind: MarkerKind,
    pub hovered: bool,
}

impl Marker {
    pub fn is_activated(&self) -> bool {
        matches!(self.kind, MarkerKind::Activated(_))
    }

    pub fn payload(&self) -> Option<&ActivationPayload> {
        match &self.kind {
            MarkerKind::Activated(p) => Some(p),
            MarkerKind::Potential => None,
        }
    }

    pub fn color(&self) -> [f32; 4] {
        if self.hovered {
            HOVERED_MARKER_COLOR
        } else if self.is_activated() {
            ACTIVATED_MARKER_COLOR
        } else {
            POTENTIAL_MARKER_COLOR
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
pub enum MarkerPlacement {
    Fixed(Vec<Vec3>),
    /// Uniformly distributed inside `bounds`.
    Sampled { count: usize, bounds: Aabb },
}

impl MarkerPlacement {
    fn len(&self) -> usize {
        match self {
            MarkerPlacement::Fixed(p) => p.len(),
            MarkerPlacement::Sampled { count, .. } => *count,
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct MarkerLayout {
    pub placement: MarkerPlacement,
    pub activated_count: usize,
    /// Assigned to activated markers in order, cycling when shorter.
    pub payloads: Vec<ActivationPayload>,
    /// `None` draws a fresh layout every build.
    pub seed: Option<u64>,
}

impl MarkerLayout {
    /// Default scene layout: `count` markers in `bounds`, `activated` of
    /// them linking to `point1.html`, `point2.html`, ...
    pub fn sampled(count: usize, activated: usize, bounds: Aabb, seed: Option<u64>) -> Self {
        Self {
            placement: MarkerPlacement::Sampled { count, bounds },
            activated_count: activated,
            payloads: (1..=activated).map(ActivationPayload::numbered).collect(),
            seed,
        }
    }
}

/// Hover indicator drawn above the hovered marker.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct HoverFrame {
    pub position: Vec3,
    /// Rotation around +Y in radians.
    pub spin: f32,
}

#[derive(Clone, Debug)]
pub struct MarkerSet {
    markers: Vec<Marker>,
    transform: Mat4,
    hovered: Option<usize>,
    pulse_phase: f32,
    spin: f32,
}

impl Default for MarkerSet {
    fn default() -> Self {
        Self::empty()
    }
}

impl MarkerSet {
    pub fn empty() -> Self {
        Self {
            markers: Vec::new(),
            transform: Mat4::IDENTITY,
            hovered: None,
            pulse_phase: 0.0,
            spin: 0.0,
        }
    }

    pub fn build(layout: &MarkerLayout) -> Result<Self, BuildError> {
        let available = layout.placement.len();
        if layout.activated_count > available {
            return Err(BuildError::TooManyActivated {
                activated: layout.activated_count,
                available,
            });
        }
        if layout.activated_count > 0 && layout.payloads.is_empty() {
            return Err(BuildError::MissingPayloads {
                activated: layout.activated_count,
            });
        }

        let mut rng = match layout.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };

        let positions: Vec<Vec3> = match &layout.placement {
            MarkerPlacement::Fixed(p) => p.clone(),
            MarkerPlacement::Sampled { count, bounds } => (0..*count)
                .map(|_| bounds.lerp_point(Vec3::new(rng.gen(), rng.gen(), rng.gen())))
                .collect(),
        };

        let mut markers: Vec<Marker> = positions
            .into_iter()
            .map(|position| Marker {
                position,
                kind: MarkerKind::Potential,
                hovered: false,
            })
            .collect();

        let chosen = rand::seq::index::sample(&mut rng, available, layout.activated_count);
        for (i, idx) in chosen.iter().enumerate() {
            let payload = layout.payloads[i % layout.payloads.len()].clone();
            markers[idx].kind = MarkerKind::Activated(payload);
        }

        log::info!(
            "[markers] built {} markers ({} activated)",
            markers.len(),
            layout.activated_count
        );
        Ok(Self {
            markers,
            ..Self::empty()
        })
    }

    /// Place the set in world space, e.g. under a model transform.
    pub fn with_transform(mut self, transform: Mat4) -> Self {
        self.transform = transform;
        self
    }

    pub fn transform(&self) -> Mat4 {
        self.transform
    }

    pub fn markers(&self) -> &[Marker] {
        &self.markers
    }

    pub fn len(&self) -> usize {
        self.markers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.markers.is_empty()
    }

    pub fn hovered(&self) -> Option<usize> {
        self.hovered
    }

    pub fn hovered_marker(&self) -> Option<&Marker> {
        self.hovered.and_then(|i| self.markers.get(i))
    }

    pub fn world_position(&self, index: usize) -> Option<Vec3> {
        self.markers
            .get(index)
            .map(|m| self.transform.transform_point3(m.position))
    }

    /// Re-evaluate hover for a cursor at `cursor_ndc` seen through `camera`.
    pub fn update_hover(&mut self, cursor_ndc: Vec2, camera: &RenderCamera) -> Option<usize> {
        let hit = if cursor_ndc.is_finite() {
            self.pick(&camera.ray_through_ndc(cursor_ndc))
        } else {
            None
        };
        self.set_hovered(hit);
        hit
    }

    /// Nearest marker (by distance along the ray) within the pick tolerance.
    pub fn pick(&self, ray: &Ray) -> Option<usize> {
        if !ray.is_finite() {
            return None;
        }
        let tolerance_sq = MARKER_PICK_TOLERANCE * MARKER_PICK_TOLERANCE;
        let mut best: Option<(usize, f32)> = None;
        for (i, m) in self.markers.iter().enumerate() {
            let world = self.transform.transform_point3(m.position);
            let Some((t, perp_sq)) = ray.closest_approach(world) else {
                continue;
            };
            if perp_sq > tolerance_sq {
                continue;
            }
            if best.map_or(true, |(_, best_t)| t < best_t) {
                best = Some((i, t));
            }
        }
        best.map(|(i, _)| i)
    }

    fn set_hovered(&mut self, next: Option<usize>) {
        if self.hovered == next {
            return;
        }
        if let Some(m) = self.hovered.and_then(|i| self.markers.get_mut(i)) {
            m.hovered = false;
        }
        if let Some(m) = next.and_then(|i| self.markers.get_mut(i)) {
            m.hovered = true;
        }
        self.hovered = next;
        self.spin = 0.0;
    }

    pub fn clear_hover(&mut self) {
        self.set_hovered(None);
    }

    /// Payload of the hovered marker, if it is activated.
    pub fn on_click(&self) -> Option<&ActivationPayload> {
        self.hovered_marker().and_then(Marker::payload)
    }

    /// Advance the pulse by `dt` seconds and spin the hover frame one step.
    pub fn tick(&mut self, dt: f32) {
        if dt.is_finite() && dt > 0.0 {
            self.pulse_phase = (self.pulse_phase + dt * MARKER_PULSE_RATE) % std::f32::consts::TAU;
        }
        if self.hovered.is_some() {
            self.spin = (self.spin + HOVER_FRAME_SPIN_PER_TICK) % std::f32::consts::TAU;
        }
    }

    pub fn pulse_scale(&self) -> f32 {
        1.0 + MARKER_PULSE_AMPLITUDE * self.pulse_phase.sin()
    }

    pub fn hover_frame(&self) -> Option<HoverFrame> {
        let index = self.hovered?;
        let position = self.world_position(index)?;
        Some(HoverFrame {
            position: position + WORLD_UP * HOVER_FRAME_LIFT,
            spin: self.spin,
        })
    }

    /// Append one render instance per marker.
    pub fn write_vertices(&self, out: &mut Vec<PointVertex>) {
        let pulse = self.pulse_scale();
        out.extend(self.markers.iter().map(|m| {
            let size = if m.hovered {
                MARKER_HOVER_SIZE
            } else {
                MARKER_POINT_SIZE
            };
            PointVertex::new(
                self.transform.transform_point3(m.position),
                size * pulse,
                m.color(),
            )
        }));
    }
}
