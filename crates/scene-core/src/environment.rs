//! Ground disc, light rig and the dusty light beams around the tree.

use crate::vertex::PointVertex;
use glam::Vec3;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use std::f32::consts::TAU;

pub const GROUND_POINTS: usize = 10_000;
pub const GROUND_RADIUS: f32 = 100.0;
pub const GROUND_POINT_SIZE: f32 = 0.2;
pub const GROUND_ALPHA: f32 = 0.8;

pub const SIDE_BEAMS: usize = 5;
pub const SIDE_BEAM_POINTS: usize = 2_000;
pub const CENTRAL_BEAM_POINTS: usize = 3_000;

const NIGHT_BEAM_OPACITY: f32 = 0.6;
const DUST_FRACTION: f32 = 0.02;
const DUST_FALL: f32 = 0.01;
const DUST_FLOOR: f32 = -2.0;
const SIZE_EASE: f32 = 0.01;
const SIZE_PULSE: f32 = 0.05;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TimeOfDay {
    Day,
    Night,
}

impl TimeOfDay {
    pub fn toggled(self) -> Self {
        match self {
            TimeOfDay::Day => TimeOfDay::Night,
            TimeOfDay::Night => TimeOfDay::Day,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Light {
    pub color: [f32; 3],
    pub intensity: f32,
    /// Direction the light comes from; unused for ambient light.
    pub position: Vec3,
}

impl Light {
    fn new(hex: u32, intensity: f32, position: Vec3) -> Self {
        Self {
            color: rgb_from_hex(hex),
            intensity,
            position,
        }
    }
}

pub fn rgb_from_hex(hex: u32) -> [f32; 3] {
    [
        ((hex >> 16) & 0xff) as f32 / 255.0,
        ((hex >> 8) & 0xff) as f32 / 255.0,
        (hex & 0xff) as f32 / 255.0,
    ]
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct LightRig {
    pub ambient: Light,
    pub sun: Light,
    pub fill: Light,
    pub back: Light,
}

impl LightRig {
    pub fn day() -> Self {
        Self {
            ambient: Light::new(0xffffff, 0.2, Vec3::ZERO),
            sun: Light::new(0xffffcc, 1.0, Vec3::new(0.0, 80.0, 0.0)),
            fill: Light::new(0x8080ff, 0.15, Vec3::new(-20.0, 60.0, -10.0)),
            back: Light::new(0xff8030, 0.2, Vec3::new(30.0, 40.0, -20.0)),
        }
    }

    pub fn night() -> Self {
        Self {
            ambient: Light::new(0xffffff, 0.05, Vec3::ZERO),
            sun: Light::new(0xaaaaff, 0.3, Vec3::new(0.0, 80.0, 0.0)),
            fill: Light::new(0x4040ff, 0.2, Vec3::new(-20.0, 60.0, -10.0)),
            back: Light::new(0xff8030, 0.1, Vec3::new(30.0, 40.0, -20.0)),
        }
    }

    pub fn for_time(time: TimeOfDay) -> Self {
        match time {
            TimeOfDay::Day => Self::day(),
            TimeOfDay::Night => Self::night(),
        }
    }

    /// Summed light per channel.
    pub fn illumination(&self) -> Vec3 {
        [self.ambient, self.sun, self.fill, self.back]
            .iter()
            .map(|l| Vec3::from_array(l.color) * l.intensity)
            .sum()
    }

    /// Color multiplier for unlit points, relative to daylight.
    pub fn tint(&self) -> [f32; 3] {
        (self.illumination() / Self::day().illumination())
            .clamp(Vec3::ZERO, Vec3::splat(1.5))
            .to_array()
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum BeamKind {
    Side,
    Central,
}

#[derive(Clone, Debug)]
pub struct LightBeam {
    pub kind: BeamKind,
    pub positions: Vec<Vec3>,
    pub colors: Vec<[f32; 4]>,
    pub base_size: f32,
    pub size: f32,
    pub base_opacity: f32,
    pub opacity: f32,
}

/// Cone shape a beam's points are drawn from.
#[derive(Clone, Copy, Debug)]
struct BeamShape {
    center_x: f32,
    center_z: f32,
    bottom: f32,
    top: f32,
    width_bottom: f32,
    width_top: f32,
}

impl LightBeam {
    fn generate(rng: &mut StdRng, kind: BeamKind, shape: BeamShape, count: usize) -> Self {
        let (alpha_min, alpha_span, base_size, base_opacity) = match kind {
            BeamKind::Side => (0.1, 0.4, 0.15 + rng.gen::<f32>() * 0.1, 0.5),
            BeamKind::Central => (0.15, 0.45, 0.2, 0.6),
        };
        let mut positions = Vec::with_capacity(count);
        let mut colors = Vec::with_capacity(count);
        for _ in 0..count {
            let y = shape.bottom + rng.gen::<f32>() * (shape.top - shape.bottom);
            let t = (y - shape.bottom) / (shape.top - shape.bottom);
            let width = shape.width_bottom * (1.0 - t) + shape.width_top * t;
            let r = width * rng.gen::<f32>().sqrt() * 0.5;
            let theta = rng.gen::<f32>() * TAU;
            positions.push(Vec3::new(
                shape.center_x + r * theta.cos(),
                y,
                shape.center_z + r * theta.sin(),
            ));
            let alpha = alpha_min + alpha_span * (1.0 - t);
            let [r, g, b] = beam_color(rng, kind, TimeOfDay::Day);
            colors.push([r, g, b, alpha]);
        }
        Self {
            kind,
            positions,
            colors,
            base_size,
            size: base_size,
            base_opacity,
            opacity: base_opacity,
        }
    }

    fn recolor(&mut self, rng: &mut StdRng, time: TimeOfDay) {
        for c in &mut self.colors {
            let [r, g, b] = beam_color(rng, self.kind, time);
            *c = [r, g, b, c[3]];
        }
        self.opacity = match time {
            TimeOfDay::Day => self.base_opacity,
            TimeOfDay::Night => self.base_opacity * NIGHT_BEAM_OPACITY,
        };
    }

    /// Let a contiguous 2% of the dust fall; fallen motes restart near the top.
    fn drift(&mut self, rng: &mut StdRng) {
        let n = self.positions.len();
        let count = (n as f32 * DUST_FRACTION) as usize;
        if count == 0 {
            return;
        }
        let start = rng.gen_range(0..=n - count);
        for p in &mut self.positions[start..start + count] {
            let y = p.y - DUST_FALL;
            if y < DUST_FLOOR {
                let top = 70.0 + rng.gen::<f32>() * 10.0;
                *p = match self.kind {
                    BeamKind::Central => {
                        let width = 5.0 + rng.gen::<f32>() * 5.0;
                        let r = width * rng.gen::<f32>().sqrt() * 0.5;
                        let theta = rng.gen::<f32>() * TAU;
                        Vec3::new(r * theta.cos(), top, r * theta.sin())
                    }
                    BeamKind::Side => Vec3::new(
                        p.x + 0.05 * (rng.gen::<f32>() - 0.5),
                        top,
                        p.z + 0.05 * (rng.gen::<f32>() - 0.5),
                    ),
                };
            } else {
                p.x += 0.005 * (rng.gen::<f32>() - 0.5);
                p.y = y;
                p.z += 0.005 * (rng.gen::<f32>() - 0.5);
            }
        }
    }

    pub fn len(&self) -> usize {
        self.positions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.positions.is_empty()
    }

    pub fn write_vertices(&self, out: &mut Vec<PointVertex>) {
        out.extend(
            self.positions
                .iter()
                .zip(&self.colors)
                .map(|(p, c)| PointVertex::new(*p, self.size, [c[0], c[1], c[2], c[3] * self.opacity])),
        );
    }
}

fn beam_color(rng: &mut StdRng, kind: BeamKind, time: TimeOfDay) -> [f32; 3] {
    match (time, kind) {
        (TimeOfDay::Day, BeamKind::Side) => {
            let b = 0.8 + rng.gen::<f32>() * 0.2;
            [b, b * 0.9, b * 0.7]
        }
        (TimeOfDay::Day, BeamKind::Central) => {
            let b = 0.9 + rng.gen::<f32>() * 0.1;
            [b, b * 0.95, b * 0.8]
        }
        (TimeOfDay::Night, _) => {
            let b = 0.5 + rng.gen::<f32>() * 0.3;
            [b * 0.6, b * 0.8, b]
        }
    }
}

fn ground_color(rng: &mut StdRng, time: TimeOfDay) -> [f32; 4] {
    match time {
        TimeOfDay::Day => {
            let s = 0.3 + rng.gen::<f32>() * 0.3;
            [s, s, s, GROUND_ALPHA]
        }
        TimeOfDay::Night => {
            let s = 0.1 + rng.gen::<f32>() * 0.15;
            [s, s, s + 0.05, GROUND_ALPHA]
        }
    }
}

pub struct Environment {
    rng: StdRng,
    ground: Vec<PointVertex>,
    beams: Vec<LightBeam>,
    lights: LightRig,
    time: TimeOfDay,
    clock: f32,
}

impl Environment {
    pub fn new(seed: Option<u64>) -> Self {
        let mut rng = match seed {
            Some(s) => StdRng::seed_from_u64(s),
            None => StdRng::from_entropy(),
        };

        let ground = (0..GROUND_POINTS)
            .map(|_| {
                let r = GROUND_RADIUS * rng.gen::<f32>().sqrt();
                let theta = rng.gen::<f32>() * TAU;
                let y = -1.0 + rng.gen::<f32>() * 0.5;
                let p = Vec3::new(r * theta.cos(), y, r * theta.sin());
                PointVertex::new(p, GROUND_POINT_SIZE, ground_color(&mut rng, TimeOfDay::Day))
            })
            .collect();

        let mut beams = Vec::with_capacity(SIDE_BEAMS + 1);
        for _ in 0..SIDE_BEAMS {
            let shape = BeamShape {
                center_x: -30.0 + rng.gen::<f32>() * 60.0,
                center_z: -30.0 + rng.gen::<f32>() * 60.0,
                bottom: -2.0,
                top: 80.0,
                width_top: 3.0 + rng.gen::<f32>() * 5.0,
                width_bottom: 8.0 + rng.gen::<f32>() * 10.0,
            };
            beams.push(LightBeam::generate(&mut rng, BeamKind::Side, shape, SIDE_BEAM_POINTS));
        }
        let central = BeamShape {
            center_x: 0.0,
            center_z: 0.0,
            bottom: -1.0,
            top: 90.0,
            width_top: 8.0,
            width_bottom: 15.0,
        };
        beams.push(LightBeam::generate(
            &mut rng,
            BeamKind::Central,
            central,
            CENTRAL_BEAM_POINTS,
        ));

        Self {
            rng,
            ground,
            beams,
            lights: LightRig::day(),
            time: TimeOfDay::Day,
            clock: 0.0,
        }
    }

    pub fn time_of_day(&self) -> TimeOfDay {
        self.time
    }

    pub fn lights(&self) -> &LightRig {
        &self.lights
    }

    pub fn ground(&self) -> &[PointVertex] {
        &self.ground
    }

    pub fn beams(&self) -> &[LightBeam] {
        &self.beams
    }

    /// Switch the light preset and recolor ground and beams to match.
    pub fn set_time_of_day(&mut self, time: TimeOfDay) {
        if time == self.time {
            return;
        }
        self.time = time;
        self.lights = LightRig::for_time(time);
        for v in &mut self.ground {
            v.color = ground_color(&mut self.rng, time);
        }
        for beam in &mut self.beams {
            beam.recolor(&mut self.rng, time);
        }
        log::info!("[env] time of day: {:?}", time);
    }

    pub fn toggle_time_of_day(&mut self) -> TimeOfDay {
        let next = self.time.toggled();
        self.set_time_of_day(next);
        next
    }

    pub fn tick(&mut self, dt: f32) {
        if dt.is_finite() && dt > 0.0 {
            self.clock += dt;
        }
        let pulse = 1.0 + SIZE_PULSE * self.clock.sin();
        for beam in &mut self.beams {
            beam.drift(&mut self.rng);
            beam.size = beam.size * (1.0 - SIZE_EASE) + beam.base_size * SIZE_EASE * pulse;
        }
    }

    pub fn write_ground(&self, out: &mut Vec<PointVertex>) {
        out.extend_from_slice(&self.ground);
    }

    pub fn write_beams(&self, out: &mut Vec<PointVertex>) {
        for beam in &self.beams {
            beam.write_vertices(out);
        }
    }
}
