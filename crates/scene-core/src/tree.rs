//! Tree point cloud: colored model vertices plus density fill, or a
//! procedural placeholder when the model cannot be loaded.

use crate::constants::*;
use crate::math::Aabb;
use crate::vertex::PointVertex;
use fnv::{FnvHashMap, FnvHashSet};
use glam::Vec3;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use smallvec::SmallVec;
use thiserror::Error;

const BYTES_PER_VERTEX: usize = 12;

// Trunk radius schedule for density fill, by height.
const LOWER_TRUNK_HEIGHT: f32 = 5.0;
const LOWER_TRUNK_RADIUS: f32 = 1.0;
const MID_TRUNK_RADIUS: f32 = 0.8;
const CROWN_RADIUS_SCALE: f32 = 3.0;
const CROWN_MIN_RADIUS: f32 = 0.5;
const TOP_CONE_START: f32 = 0.85; // fraction of max height
const TOP_CONE_WIDTH_FACTOR: f32 = 0.2;
const BAND_RADIUS_SLACK: f32 = 1.2;
const EMPTY_BAND_WIDTH_FACTOR: f32 = 0.25;
const EMPTY_BAND_PEAK: f32 = 0.6;
const TRUNK_CORE_HEIGHT: f32 = 0.7; // fraction of max height

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum LoadError {
    #[error("model request failed with HTTP status {0}")]
    Status(u16),
    #[error("model request failed: {0}")]
    Network(String),
    #[error("model buffer length {0} is not a multiple of 12 bytes")]
    Truncated(usize),
    #[error("model contains no vertices")]
    Empty,
}

/// Progress reported while the model downloads.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum LoadEvent {
    /// Percent in \[0, 100\].
    Progress(f32),
    Loaded,
    Failed,
}

#[derive(Clone, Debug, PartialEq)]
pub struct TreeParams {
    /// Placeholder tree height.
    pub height: f32,
    /// Placeholder base radius.
    pub radius_base: f32,
    pub color_variation: f32,
    /// Foliage color of the placeholder.
    pub base_color: [f32; 3],
    pub model_url: String,
    /// Model points below this height are trunk.
    pub trunk_threshold: f32,
    /// Approximate top of the model, used to shape the fill.
    pub max_height: f32,
    pub extra_points: usize,
    pub seed: Option<u64>,
}

impl Default for TreeParams {
    fn default() -> Self {
        Self {
            height: 10.0,
            radius_base: 1.0,
            color_variation: 0.2,
            base_color: LEAF_COLOR,
            model_url: "models/tree.bin".to_string(),
            trunk_threshold: 15.0,
            max_height: 40.0,
            extra_points: 15_000,
            seed: None,
        }
    }
}

/// Decode a raw little-endian `f32` xyz buffer.
pub fn decode_positions(bytes: &[u8]) -> Result<Vec<Vec3>, LoadError> {
    if bytes.is_empty() {
        return Err(LoadError::Empty);
    }
    if bytes.len() % BYTES_PER_VERTEX != 0 {
        return Err(LoadError::Truncated(bytes.len()));
    }
    let read = |b: &[u8]| f32::from_le_bytes([b[0], b[1], b[2], b[3]]);
    let positions: Vec<Vec3> = bytes
        .chunks_exact(BYTES_PER_VERTEX)
        .map(|c| Vec3::new(read(&c[0..4]), read(&c[4..8]), read(&c[8..12])))
        .filter(|p| p.is_finite())
        .collect();
    if positions.is_empty() {
        return Err(LoadError::Empty);
    }
    Ok(positions)
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum GeometrySource {
    Model,
    Fallback,
}

#[derive(Clone, Debug)]
pub struct TreeGeometry {
    points: Vec<PointVertex>,
    bounds: Aabb,
    source: GeometrySource,
}

impl TreeGeometry {
    /// Color the model vertices and thicken the cloud with density points.
    pub fn from_model(positions: &[Vec3], params: &TreeParams) -> Result<Self, LoadError> {
        if positions.is_empty() {
            return Err(LoadError::Empty);
        }
        let mut rng = seeded(params.seed);
        let mut points: Vec<PointVertex> = positions
            .iter()
            .map(|&p| {
                let trunk = is_trunk(p, params, 2.0);
                PointVertex::rgb(p, TREE_POINT_SIZE, tree_color(&mut rng, trunk))
            })
            .collect();

        let added = DensityFill::new(positions, params).run(&mut rng, &mut points);
        let bounds = Aabb::from_points(points.iter().map(PointVertex::pos)).ok_or(LoadError::Empty)?;
        log::info!(
            "[tree] model: {} vertices + {} density points",
            positions.len(),
            added
        );
        Ok(Self {
            points,
            bounds,
            source: GeometrySource::Model,
        })
    }

    /// Deterministic trunk-and-cone placeholder.
    pub fn fallback(params: &TreeParams) -> Self {
        let mut rng = StdRng::seed_from_u64(FALLBACK_SEED);
        let h = params.height;
        let r = params.radius_base;
        let mut points = Vec::new();

        // trunk frustum centered at h/6, foliage cone centered at 2h/3
        let trunk = Frustum {
            bottom_y: 0.0,
            top_y: h / 3.0,
            bottom_radius: r / 2.0,
            top_radius: r / 3.0,
        };
        let foliage = Frustum {
            bottom_y: h / 3.0,
            top_y: h,
            bottom_radius: r * 2.0,
            top_radius: 0.0,
        };
        for (part, color) in [(trunk, TRUNK_COLOR), (foliage, params.base_color)] {
            for p in part.surface_points() {
                points.push(PointVertex::rgb(
                    p,
                    FALLBACK_POINT_SIZE,
                    varied(&mut rng, color, params.color_variation),
                ));
            }
            let bounds = part.bounds();
            for _ in 0..FALLBACK_INTERIOR_POINTS {
                let p = bounds.lerp_point(Vec3::new(rng.gen(), rng.gen(), rng.gen()));
                points.push(PointVertex::rgb(
                    p,
                    FALLBACK_POINT_SIZE,
                    varied(&mut rng, color, params.color_variation),
                ));
            }
        }
        let bounds = trunk.bounds().union(&foliage.bounds());
        Self {
            points,
            bounds,
            source: GeometrySource::Fallback,
        }
    }

    /// Model geometry when loading succeeded, otherwise the placeholder.
    pub fn resolve(result: Result<Vec<Vec3>, LoadError>, params: &TreeParams) -> Self {
        match result.and_then(|positions| Self::from_model(&positions, params)) {
            Ok(geometry) => geometry,
            Err(e) => {
                log::error!("[tree] {}; using placeholder tree", e);
                Self::fallback(params)
            }
        }
    }

    pub fn points(&self) -> &[PointVertex] {
        &self.points
    }

    pub fn bounds(&self) -> Aabb {
        self.bounds
    }

    pub fn source(&self) -> GeometrySource {
        self.source
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }
}

fn seeded(seed: Option<u64>) -> StdRng {
    match seed {
        Some(s) => StdRng::seed_from_u64(s),
        None => StdRng::from_entropy(),
    }
}

#[inline]
fn axis_distance(p: Vec3) -> f32 {
    (p.x * p.x + p.z * p.z).sqrt()
}

fn is_trunk(p: Vec3, params: &TreeParams, core_radius: f32) -> bool {
    p.y < params.trunk_threshold
        || (axis_distance(p) < core_radius && p.y < params.max_height * TRUNK_CORE_HEIGHT)
}

/// Brown (darker 40% of the time) or green (lighter 30% of the time).
fn tree_color(rng: &mut StdRng, trunk: bool) -> [f32; 3] {
    let [r, g, b] = if trunk { TRUNK_COLOR } else { LEAF_COLOR };
    if trunk {
        let v = 0.7 + rng.gen::<f32>() * 0.3;
        if rng.gen::<f32>() > 0.6 {
            [r * v * 0.8, g * v * 0.7, b * v * 0.5]
        } else {
            [r * v, g * v, b * v]
        }
    } else {
        let v = 0.8 + rng.gen::<f32>() * 0.4;
        if rng.gen::<f32>() > 0.7 {
            [r * v * 1.2, g * v * 1.1, b * v * 0.8]
        } else {
            [r * v, g * v, b * v]
        }
    }
}

fn varied(rng: &mut StdRng, base: [f32; 3], variation: f32) -> [f32; 3] {
    let mut jitter = || 1.0 - variation / 2.0 + rng.gen::<f32>() * variation;
    [base[0] * jitter(), base[1] * jitter(), base[2] * jitter()]
}

#[derive(Clone, Copy, Debug)]
struct Frustum {
    bottom_y: f32,
    top_y: f32,
    bottom_radius: f32,
    top_radius: f32,
}

impl Frustum {
    /// Cap centers plus a vertex ring at each end (one apex for a cone).
    fn surface_points(&self) -> Vec<Vec3> {
        let mut out = Vec::with_capacity(FALLBACK_RADIAL_SEGMENTS * 2 + 2);
        for (y, radius) in [
            (self.top_y, self.top_radius),
            (self.bottom_y, self.bottom_radius),
        ] {
            out.push(Vec3::new(0.0, y, 0.0));
            if radius <= 0.0 {
                continue;
            }
            for i in 0..FALLBACK_RADIAL_SEGMENTS {
                let theta = i as f32 / FALLBACK_RADIAL_SEGMENTS as f32 * std::f32::consts::TAU;
                out.push(Vec3::new(radius * theta.sin(), y, radius * theta.cos()));
            }
        }
        out
    }

    fn bounds(&self) -> Aabb {
        let r = self.bottom_radius.max(self.top_radius);
        Aabb::new(
            Vec3::new(-r, self.bottom_y, -r),
            Vec3::new(r, self.top_y, r),
        )
    }
}

type CellKey = (i32, i32, i32);

/// Adds jittered copies of model points that stay inside the tree's shape.
struct DensityFill<'a> {
    params: &'a TreeParams,
    sources: &'a [Vec3],
    model_width: f32,
    /// Model heights ascending with a running sum of axis distances.
    band_heights: Vec<f32>,
    band_prefix: Vec<f32>,
    grid: FnvHashMap<CellKey, SmallVec<[Vec3; 4]>>,
    taken: FnvHashSet<CellKey>,
}

impl<'a> DensityFill<'a> {
    fn new(sources: &'a [Vec3], params: &'a TreeParams) -> Self {
        let model_width = Aabb::from_points(sources.iter().copied())
            .map(|b| b.size().x)
            .unwrap_or(0.0);

        let mut by_height: Vec<(f32, f32)> =
            sources.iter().map(|&p| (p.y, axis_distance(p))).collect();
        by_height.sort_by(|a, b| a.0.total_cmp(&b.0));
        let band_heights = by_height.iter().map(|(y, _)| *y).collect();
        let mut band_prefix = Vec::with_capacity(by_height.len() + 1);
        band_prefix.push(0.0);
        let mut acc = 0.0;
        for (_, d) in &by_height {
            acc += d;
            band_prefix.push(acc);
        }

        let mut fill = Self {
            params,
            sources,
            model_width,
            band_heights,
            band_prefix,
            grid: FnvHashMap::default(),
            taken: FnvHashSet::default(),
        };
        for &p in sources {
            fill.insert(p);
        }
        fill
    }

    fn run(mut self, rng: &mut StdRng, out: &mut Vec<PointVertex>) -> usize {
        let wanted = self.params.extra_points;
        let max_attempts = wanted * DENSITY_ATTEMPTS_PER_POINT;
        let mut added = 0;
        let mut attempts = 0;
        while added < wanted && attempts < max_attempts {
            attempts += 1;
            let base = self.sources[rng.gen_range(0..self.sources.len())];
            let jitter = Vec3::new(rng.gen(), rng.gen(), rng.gen()) - Vec3::splat(0.5);
            let candidate = base + jitter * DENSITY_JITTER;

            if !self.inside_shape(candidate) || self.too_close(candidate) {
                continue;
            }
            if !self.taken.insert(lattice_key(candidate)) {
                continue;
            }
            self.insert(candidate);
            let trunk = is_trunk(candidate, self.params, 1.0);
            out.push(PointVertex::rgb(
                candidate,
                TREE_POINT_SIZE,
                tree_color(rng, trunk),
            ));
            added += 1;
        }
        log::debug!("[tree] density fill: {} points in {} attempts", added, attempts);
        added
    }

    fn inside_shape(&self, p: Vec3) -> bool {
        let max_h = self.params.max_height;
        let d = axis_distance(p);
        if p.y < self.params.trunk_threshold {
            d < trunk_radius_at(p.y, self.params)
        } else if p.y > max_h * TOP_CONE_START {
            let top_span = max_h * (1.0 - TOP_CONE_START);
            let radius = self.model_width
                * TOP_CONE_WIDTH_FACTOR
                * (1.0 - (p.y - max_h * TOP_CONE_START) / top_span);
            d < radius
        } else {
            match self.band_average(p.y) {
                Some(avg) => d < avg * BAND_RADIUS_SLACK,
                None => {
                    let ratio = p.y / max_h;
                    d < self.model_width * EMPTY_BAND_WIDTH_FACTOR * (1.0 - (ratio - EMPTY_BAND_PEAK).abs())
                }
            }
        }
    }

    /// Mean axis distance of model points within the height band around `y`.
    fn band_average(&self, y: f32) -> Option<f32> {
        let lo = self
            .band_heights
            .partition_point(|&h| h <= y - DENSITY_BAND_HALF_HEIGHT);
        let hi = self
            .band_heights
            .partition_point(|&h| h < y + DENSITY_BAND_HALF_HEIGHT);
        if hi <= lo {
            return None;
        }
        Some((self.band_prefix[hi] - self.band_prefix[lo]) / (hi - lo) as f32)
    }

    fn too_close(&self, p: Vec3) -> bool {
        let (cx, cy, cz) = grid_key(p);
        let limit_sq = DENSITY_MIN_SPACING * DENSITY_MIN_SPACING;
        for dx in -1..=1 {
            for dy in -1..=1 {
                for dz in -1..=1 {
                    if let Some(cell) = self.grid.get(&(cx + dx, cy + dy, cz + dz)) {
                        if cell.iter().any(|q| q.distance_squared(p) < limit_sq) {
                            return true;
                        }
                    }
                }
            }
        }
        false
    }

    fn insert(&mut self, p: Vec3) {
        self.grid.entry(grid_key(p)).or_default().push(p);
    }
}

fn trunk_radius_at(height: f32, params: &TreeParams) -> f32 {
    if height < LOWER_TRUNK_HEIGHT {
        LOWER_TRUNK_RADIUS
    } else if height < params.trunk_threshold {
        MID_TRUNK_RADIUS
    } else {
        (CROWN_RADIUS_SCALE * (1.0 - height / params.max_height)).max(CROWN_MIN_RADIUS)
    }
}

#[inline]
fn grid_key(p: Vec3) -> CellKey {
    let c = (p / DENSITY_MIN_SPACING).floor();
    (c.x as i32, c.y as i32, c.z as i32)
}

#[inline]
fn lattice_key(p: Vec3) -> CellKey {
    let c = (p * DENSITY_DEDUP_LATTICE).round();
    (c.x as i32, c.y as i32, c.z as i32)
}
