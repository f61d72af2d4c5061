//! Static scene construction and the per-frame instance format shared with
//! the renderers.

use crate::camera::Camera;
use crate::constants::*;
use crate::mapping::max_magnitude;
use crate::marker::Marker;
use crate::projection::{Projection, ProjectionKind};
use crate::record::EventRecord;
use glam::Vec3;
use rand::Rng;

/// One billboard sprite as uploaded to the GPU instance buffer.
#[repr(C)]
#[derive(Copy, Clone, Debug, Default, PartialEq, bytemuck::Pod, bytemuck::Zeroable)]
pub struct SpriteInstance {
    pub pos: [f32; 3],
    pub size: f32,
    pub color: [f32; 4],
}

impl SpriteInstance {
    #[inline]
    pub fn new(pos: Vec3, size: f32, rgb: [f32; 3], alpha: f32) -> Self {
        Self {
            pos: pos.to_array(),
            size,
            color: [rgb[0], rgb[1], rgb[2], alpha],
        }
    }
}

/// Two triangles covering the unit billboard, centered on the origin.
pub const QUAD_CORNERS: [f32; 12] = [
    -0.5, -0.5, 0.5, -0.5, 0.5, 0.5, -0.5, -0.5, 0.5, 0.5, -0.5, 0.5,
];

/// Uniform block for `scene.wgsl`.
#[repr(C)]
#[derive(Copy, Clone, Debug, bytemuck::Pod, bytemuck::Zeroable)]
pub struct SceneUniforms {
    pub view_proj: [[f32; 4]; 4],
    pub cam_right: [f32; 4],
    pub cam_up: [f32; 4],
}

impl SceneUniforms {
    pub fn from_camera(camera: &Camera) -> Self {
        let forward = (camera.target - camera.eye).normalize_or_zero();
        let right = forward.cross(camera.up).normalize_or_zero();
        let up = right.cross(forward);
        Self {
            view_proj: camera.view_proj().to_cols_array_2d(),
            cam_right: right.extend(0.0).to_array(),
            cam_up: up.extend(0.0).to_array(),
        }
    }
}

/// Endpoint of a ground line; consecutive pairs form segments.
#[repr(C)]
#[derive(Copy, Clone, Debug, Default, PartialEq, bytemuck::Pod, bytemuck::Zeroable)]
pub struct LineVertex {
    pub pos: [f32; 3],
    pub _pad: f32,
    pub color: [f32; 4],
}

#[derive(Clone, Copy, Debug)]
pub struct Star {
    pub position: Vec3,
    pub brightness: f32,
}

pub struct Scene {
    pub projection: Projection,
    pub markers: Vec<Marker>,
    pub stars: Vec<Star>,
    pub ground: Vec<LineVertex>,
}

pub struct SceneBuilder {
    pub projection_kind: ProjectionKind,
    pub star_count: usize,
}

impl Default for SceneBuilder {
    fn default() -> Self {
        Self {
            projection_kind: ProjectionKind::default(),
            star_count: STAR_COUNT,
        }
    }
}

impl SceneBuilder {
    pub fn build(&self, records: &[EventRecord], rng: &mut impl Rng) -> Scene {
        let projection = Projection::for_records(self.projection_kind, records);
        let max_mag = max_magnitude(records);
        let markers = records
            .iter()
            .enumerate()
            .map(|(i, r)| Marker::from_record(i, r, &projection, max_mag))
            .collect::<Vec<_>>();
        let stars = build_starfield(self.star_count, rng);
        let ground = match projection {
            Projection::FlatPlane { size, .. } => grid_lines(size, GRID_DIVISIONS),
            Projection::Sphere { .. } => globe_lines(&projection),
        };
        log::info!(
            "[scene] built {} markers, {} stars, {} ground segments ({:?})",
            markers.len(),
            stars.len(),
            ground.len() / 2,
            self.projection_kind
        );
        Scene {
            projection,
            markers,
            stars,
            ground,
        }
    }
}

fn build_starfield(count: usize, rng: &mut impl Rng) -> Vec<Star> {
    (0..count)
        .map(|_| {
            let dir = random_unit_vector(rng);
            let r = rng.gen_range(STAR_RADIUS_MIN..STAR_RADIUS_MAX);
            Star {
                position: dir * r,
                brightness: rng.gen_range(0.2..1.0),
            }
        })
        .collect()
}

/// Uniform direction on the unit sphere.
pub fn random_unit_vector(rng: &mut impl Rng) -> Vec3 {
    let z: f32 = rng.gen_range(-1.0..=1.0);
    let theta: f32 = rng.gen_range(0.0..std::f32::consts::TAU);
    let s = (1.0 - z * z).max(0.0).sqrt();
    Vec3::new(s * theta.cos(), s * theta.sin(), z)
}

#[inline]
fn line_vertex(p: Vec3) -> LineVertex {
    LineVertex {
        pos: p.to_array(),
        _pad: 0.0,
        color: GROUND_COLOR,
    }
}

fn grid_lines(size: f32, divisions: usize) -> Vec<LineVertex> {
    let half = size * 0.5;
    let step = size / divisions.max(1) as f32;
    let mut out = Vec::with_capacity((divisions + 1) * 4);
    for i in 0..=divisions {
        let t = -half + i as f32 * step;
        out.push(line_vertex(Vec3::new(t, 0.0, -half)));
        out.push(line_vertex(Vec3::new(t, 0.0, half)));
        out.push(line_vertex(Vec3::new(-half, 0.0, t)));
        out.push(line_vertex(Vec3::new(half, 0.0, t)));
    }
    out
}

fn globe_lines(projection: &Projection) -> Vec<LineVertex> {
    let mut out = Vec::new();
    let mut push_path = |points: &[Vec3]| {
        for pair in points.windows(2) {
            out.push(line_vertex(pair[0]));
            out.push(line_vertex(pair[1]));
        }
    };
    for ring in 1..SPHERE_RINGS {
        let lat = -90.0 + 180.0 * ring as f32 / SPHERE_RINGS as f32;
        let pts = (0..=RING_SEGMENTS)
            .map(|s| {
                let lon = -180.0 + 360.0 * s as f32 / RING_SEGMENTS as f32;
                projection.project(lat, lon, 0.0)
            })
            .collect::<Vec<_>>();
        push_path(&pts);
    }
    for m in 0..SPHERE_MERIDIANS {
        let lon = -180.0 + 360.0 * m as f32 / SPHERE_MERIDIANS as f32;
        let pts = (0..=RING_SEGMENTS)
            .map(|s| {
                let lat = -90.0 + 180.0 * s as f32 / RING_SEGMENTS as f32;
                projection.project(lat, lon, 0.0)
            })
            .collect::<Vec<_>>();
        push_path(&pts);
    }
    out
}
