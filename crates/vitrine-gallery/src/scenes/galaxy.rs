use std::f32::consts::TAU;
use std::sync::Arc;

use anyhow::Result;
use async_trait::async_trait;
use glam::{Mat4, Vec3};
use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};
use vitrine_engine::camera::Camera;
use vitrine_engine::coords::{ColorRgba, SurfaceSize};
use vitrine_engine::draw::{Frame, Layer};
use vitrine_engine::resources::{ResourceHandle, ResourceKind};
use vitrine_engine::time::FrameTime;

use crate::controls::OrbitControls;
use crate::scene::{AnimatedScene, Scene, SceneContent, SceneContext, SceneKind, SceneModule};

/// Shape of the spiral particle field.
#[derive(Debug, Clone)]
pub struct GalaxyParams {
    pub count: usize,
    pub radius: f32,
    pub branches: u32,
    pub spin: f32,
    pub randomness: f32,
    pub randomness_power: i32,
    pub inner: ColorRgba,
    pub outer: ColorRgba,
    pub point_size: f32,
    pub seed: u64,
}

impl Default for GalaxyParams {
    fn default() -> Self {
        Self {
            count: 20_000,
            radius: 6.0,
            branches: 5,
            spin: 1.1,
            randomness: 0.28,
            randomness_power: 3,
            inner: ColorRgba::from_hex(0x9ee8ff),
            outer: ColorRgba::from_hex(0x7c82ff),
            point_size: 2.0,
            seed: 0x6a1a_c715,
        }
    }
}

/// Builds the spiral galaxy particle field.
#[derive(Debug, Clone, Default)]
pub struct GalaxyModule {
    pub params: GalaxyParams,
}

#[async_trait]
impl SceneModule for GalaxyModule {
    fn kind(&self) -> SceneKind {
        SceneKind::ParticleField
    }

    async fn create_scene(&self, ctx: SceneContext) -> Result<Box<dyn Scene>> {
        tokio::task::yield_now().await;
        let (positions, colors) = generate(&self.params);
        log::debug!("galaxy: generated {} particles", positions.len());
        tokio::task::yield_now().await;

        let ledger = ctx.surface.resources();
        let resources = vec![
            ledger.allocate(ResourceKind::Geometry, "galaxy positions", positions.len() * 12),
            ledger.allocate(ResourceKind::Geometry, "galaxy colors", colors.len() * 16),
            ledger.allocate(ResourceKind::Material, "galaxy points", 0),
        ];

        let camera = Camera::perspective(55.0, 1.0, 0.1, 200.0)
            .looking_at(Vec3::new(0.0, 4.5, 10.0), Vec3::ZERO);
        let controls = OrbitControls::attach(&ctx.container, &camera);

        let content = Galaxy {
            positions: positions.into(),
            colors: colors.into(),
            point_size: self.params.point_size,
            rotation: 0.0,
            camera,
            controls,
            resources,
        };
        Ok(Box::new(AnimatedScene::new(content, &ctx)))
    }
}

fn generate(params: &GalaxyParams) -> (Vec<Vec3>, Vec<ColorRgba>) {
    let mut rng = SmallRng::seed_from_u64(params.seed);
    let branches = params.branches.max(1);
    let mut positions = Vec::with_capacity(params.count);
    let mut colors = Vec::with_capacity(params.count);

    for i in 0..params.count {
        let r = rng.random::<f32>() * params.radius;
        let branch = (i as u32 % branches) as f32 / branches as f32 * TAU;
        let angle = branch + r * params.spin;

        let mut scatter = || {
            let sign = if rng.random_bool(0.5) { 1.0 } else { -1.0 };
            rng.random::<f32>().powi(params.randomness_power) * sign * params.randomness * r
        };
        let offset = Vec3::new(scatter(), scatter(), scatter());

        positions.push(Vec3::new(angle.cos() * r, 0.0, angle.sin() * r) + offset);
        colors.push(params.inner.lerp(params.outer, r / params.radius));
    }

    (positions, colors)
}

struct Galaxy {
    positions: Arc<[Vec3]>,
    colors: Arc<[ColorRgba]>,
    point_size: f32,
    rotation: f32,
    camera: Camera,
    controls: OrbitControls,
    resources: Vec<ResourceHandle>,
}

impl SceneContent for Galaxy {
    fn kind(&self) -> SceneKind {
        SceneKind::ParticleField
    }

    fn resize(&mut self, size: SurfaceSize) {
        self.camera.set_aspect(size.aspect());
    }

    fn update(&mut self, time: &FrameTime) {
        self.rotation += time.dt * 0.05;
        self.controls.update(&mut self.camera);
    }

    fn render(&self, _size: SurfaceSize) -> Frame {
        let mut frame = Frame::new(ColorRgba::from_hex(0x05060a), self.camera);
        frame.list.push_points_with_model(
            Layer::SCENE,
            Arc::clone(&self.positions),
            Arc::clone(&self.colors),
            self.point_size,
            Mat4::from_rotation_y(self.rotation),
        );
        frame
    }

    fn release(&mut self) {
        self.controls.dispose();
        self.resources.clear();
        self.positions = Arc::from([]);
        self.colors = Arc::from([]);
    }
}
