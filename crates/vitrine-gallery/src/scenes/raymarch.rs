use anyhow::Result;
use async_trait::async_trait;
use glam::{Vec2, Vec3};
use vitrine_engine::camera::Camera;
use vitrine_engine::coords::{ColorRgba, SurfaceSize};
use vitrine_engine::draw::{Frame, Layer};
use vitrine_engine::resources::{ResourceHandle, ResourceKind};
use vitrine_engine::time::FrameTime;

use crate::scene::{AnimatedScene, Scene, SceneContent, SceneContext, SceneKind, SceneModule};

#[derive(Debug, Clone)]
pub struct RaymarchParams {
    /// Horizontal resolution of the field; rows follow the aspect ratio.
    pub columns: u32,
    pub max_steps: u32,
    pub max_distance: f32,
    pub smoothing: f32,
}

impl Default for RaymarchParams {
    fn default() -> Self {
        Self {
            columns: 96,
            max_steps: 64,
            max_distance: 20.0,
            smoothing: 0.6,
        }
    }
}

/// Builds the full-screen distance-field quad.
#[derive(Debug, Clone, Default)]
pub struct RaymarchModule {
    pub params: RaymarchParams,
}

#[async_trait]
impl SceneModule for RaymarchModule {
    fn kind(&self) -> SceneKind {
        SceneKind::RaymarchQuad
    }

    async fn create_scene(&self, ctx: SceneContext) -> Result<Box<dyn Scene>> {
        tokio::task::yield_now().await;
        log::debug!("raymarch: {} field columns", self.params.columns);

        let ledger = ctx.surface.resources();
        let resources = vec![
            ledger.allocate(ResourceKind::Geometry, "fullscreen quad", 4 * 20),
            ledger.allocate(ResourceKind::Program, "raymarch sdf", 0),
            ledger.allocate(ResourceKind::Material, "raymarch uniforms", 16),
        ];

        let content = Raymarch {
            params: self.params.clone(),
            resolution: SurfaceSize::new(1, 1),
            time: 0.0,
            rows: 1,
            texels: Vec::new(),
            resources,
        };
        Ok(Box::new(AnimatedScene::new(content, &ctx)))
    }
}

struct Raymarch {
    params: RaymarchParams,
    /// Mirrors the host size; drives the aspect correction and row count.
    resolution: SurfaceSize,
    time: f32,
    rows: u32,
    texels: Vec<ColorRgba>,
    resources: Vec<ResourceHandle>,
}

impl Raymarch {
    /// Field width; a zero setting still yields one column.
    fn columns(&self) -> u32 {
        self.params.columns.max(1)
    }
}

impl SceneContent for Raymarch {
    fn kind(&self) -> SceneKind {
        SceneKind::RaymarchQuad
    }

    fn resize(&mut self, size: SurfaceSize) {
        self.resolution = size;
        self.rows = ((self.columns() as f32 / size.aspect()).round() as u32).max(1);
    }

    fn update(&mut self, time: &FrameTime) {
        self.time = time.elapsed;
        let columns = self.columns();
        let aspect = self.resolution.aspect();
        let shader = Shader {
            time: self.time,
            params: &self.params,
        };

        self.texels.clear();
        self.texels.reserve((columns * self.rows) as usize);
        for row in 0..self.rows {
            for column in 0..columns {
                // Texel centers in -1..1, +y up, x widened by aspect.
                let u = (column as f32 + 0.5) / columns as f32 * 2.0 - 1.0;
                let v = 1.0 - (row as f32 + 0.5) / self.rows as f32 * 2.0;
                self.texels.push(shader.shade(Vec2::new(u * aspect, v)));
            }
        }
    }

    fn render(&self, _size: SurfaceSize) -> Frame {
        let mut frame = Frame::new(ColorRgba::black(), Camera::orthographic_unit());
        let columns = self.columns();
        if self.texels.len() == (columns * self.rows) as usize {
            frame
                .list
                .push_field(Layer::BACKGROUND, columns, self.rows, self.texels.clone());
        }
        frame
    }

    fn release(&mut self) {
        self.resources.clear();
        self.texels = Vec::new();
    }
}

fn rotate(v: Vec2, angle: f32) -> Vec2 {
    let (s, c) = angle.sin_cos();
    Vec2::new(c * v.x - s * v.y, s * v.x + c * v.y)
}

fn sd_sphere(p: Vec3, r: f32) -> f32 {
    p.length() - r
}

fn sd_torus(p: Vec3, major: f32, minor: f32) -> f32 {
    Vec2::new(Vec2::new(p.x, p.z).length() - major, p.y).length() - minor
}

fn sd_box(p: Vec3, half: Vec3) -> f32 {
    let q = p.abs() - half;
    q.max(Vec3::ZERO).length() + q.max_element().min(0.0)
}

fn smooth_union(d1: f32, d2: f32, k: f32) -> f32 {
    let h = (0.5 + 0.5 * (d2 - d1) / k).clamp(0.0, 1.0);
    d2 + (d1 - d2) * h - k * h * (1.0 - h)
}

fn smoothstep(edge0: f32, edge1: f32, x: f32) -> f32 {
    let t = ((x - edge0) / (edge1 - edge0)).clamp(0.0, 1.0);
    t * t * (3.0 - 2.0 * t)
}

struct Shader<'a> {
    time: f32,
    params: &'a RaymarchParams,
}

impl Shader<'_> {
    fn map(&self, p: Vec3) -> f32 {
        let t = self.time;

        let xz = rotate(Vec2::new(p.x, p.z), t * 0.15);
        let sphere = sd_sphere(Vec3::new(xz.x, p.y, xz.y), 0.9);

        let xy = rotate(Vec2::new(p.x, p.y), t * 0.3);
        let torus = sd_torus(Vec3::new(xy.x, xy.y, p.z + (t * 0.7).sin() * 0.2), 1.2, 0.25);

        let xy = rotate(Vec2::new(p.x, p.y), 1.57);
        let xz = rotate(Vec2::new(xy.x, p.z), t * 0.2);
        let cube = sd_box(Vec3::new(xz.x, xy.y, xz.y), Vec3::splat(0.6));

        let k = self.params.smoothing;
        smooth_union(smooth_union(sphere, torus, k), cube, k)
    }

    fn normal(&self, p: Vec3) -> Vec3 {
        const E: f32 = 0.0015;
        let a = Vec3::new(1.0, -1.0, -1.0);
        let b = Vec3::new(-1.0, -1.0, 1.0);
        let c = Vec3::new(-1.0, 1.0, -1.0);
        let d = Vec3::ONE;
        (a * self.map(p + a * E)
            + b * self.map(p + b * E)
            + c * self.map(p + c * E)
            + d * self.map(p + d * E))
            .normalize_or_zero()
    }

    /// Color at screen position `uv` (aspect-corrected, -1..1 vertically).
    fn shade(&self, uv: Vec2) -> ColorRgba {
        let origin = Vec3::new(0.0, 0.0, 4.0);
        let dir = Vec3::new(uv.x, uv.y, -1.5).normalize();

        let mut travelled = 0.0;
        let mut hit = false;
        for _ in 0..self.params.max_steps {
            let d = self.map(origin + dir * travelled);
            if d < 0.001 {
                hit = true;
                break;
            }
            travelled += d * 0.9;
            if travelled > self.params.max_distance {
                break;
            }
        }

        let mut color = Vec3::new(0.04, 0.06, 0.12);
        if hit {
            let n = self.normal(origin + dir * travelled);
            let light = Vec3::new(0.7, 0.9, 0.2).normalize();
            let diffuse = n.dot(light).clamp(0.0, 1.0);
            let rim = (1.0 - n.dot(-dir).max(0.0)).powi(2);
            let base = Vec3::new(0.49, 0.51, 1.0)
                .lerp(Vec3::new(0.62, 1.0, 0.94), 0.5 + 0.5 * (self.time * 0.7).sin());
            color = base * (0.2 + 0.8 * diffuse) + Vec3::new(0.9, 0.95, 1.0) * rim * 0.7;
        }

        color *= smoothstep(1.2, 0.2, uv.length());
        ColorRgba::rgb(color.x, color.y, color.z)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn shader(params: &RaymarchParams) -> Shader<'_> {
        Shader { time: 0.0, params }
    }

    #[test]
    fn primitives_have_expected_distances() {
        assert!((sd_sphere(Vec3::new(2.0, 0.0, 0.0), 0.9) - 1.1).abs() < 1e-6);
        assert!((sd_torus(Vec3::new(1.2, 0.0, 0.0), 1.2, 0.25) + 0.25).abs() < 1e-6);
        assert!((sd_box(Vec3::new(1.0, 0.0, 0.0), Vec3::splat(0.6)) - 0.4).abs() < 1e-6);
    }

    #[test]
    fn smooth_union_never_exceeds_min() {
        for (a, b) in [(0.1, 0.2), (1.0, -0.3), (0.5, 0.5)] {
            assert!(smooth_union(a, b, 0.6) <= a.min(b) + 1e-6);
        }
    }

    #[test]
    fn center_ray_hits_and_corners_vignette_to_black() {
        let params = RaymarchParams::default();
        let shader = shader(&params);

        let center = shader.shade(Vec2::ZERO);
        let background = 0.04 + 0.06 + 0.12;
        assert!(center.r + center.g + center.b > background);

        let corner = shader.shade(Vec2::new(1.6, 1.0));
        assert_eq!((corner.r, corner.g, corner.b), (0.0, 0.0, 0.0));
    }

    #[test]
    fn rows_follow_aspect() {
        let mut content = Raymarch {
            params: RaymarchParams {
                columns: 64,
                ..RaymarchParams::default()
            },
            resolution: SurfaceSize::new(1, 1),
            time: 0.0,
            rows: 1,
            texels: Vec::new(),
            resources: Vec::new(),
        };

        content.resize(SurfaceSize::new(1280, 640));
        assert_eq!(content.rows, 32);
        content.resize(SurfaceSize::new(400, 800));
        assert_eq!(content.rows, 128);
    }

    #[test]
    fn zero_columns_still_draws_a_field() {
        let mut content = Raymarch {
            params: RaymarchParams {
                columns: 0,
                max_steps: 4,
                ..RaymarchParams::default()
            },
            resolution: SurfaceSize::new(1, 1),
            time: 0.0,
            rows: 1,
            texels: Vec::new(),
            resources: Vec::new(),
        };

        content.resize(SurfaceSize::new(200, 100));
        content.update(&FrameTime {
            dt: 0.016,
            elapsed: 0.5,
            now: std::time::Instant::now(),
            frame_index: 1,
        });
        let frame = content.render(SurfaceSize::new(200, 100));

        assert_eq!(content.rows, 1);
        assert_eq!(frame.list.primitive_count(), 1);
    }
}
