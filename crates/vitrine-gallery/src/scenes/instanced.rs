use anyhow::Result;
use async_trait::async_trait;
use glam::{EulerRot, Mat4, Quat, Vec3};
use vitrine_engine::camera::Camera;
use vitrine_engine::coords::{ColorRgba, SurfaceSize};
use vitrine_engine::draw::{Frame, Layer};
use vitrine_engine::resources::{ResourceHandle, ResourceKind};
use vitrine_engine::time::FrameTime;

use crate::controls::OrbitControls;
use crate::scene::{AnimatedScene, Scene, SceneContent, SceneContext, SceneKind, SceneModule};

#[derive(Debug, Clone)]
pub struct InstancedParams {
    pub count: usize,
    /// Instances per grid edge; the grid is `side^3` cells.
    pub side: u32,
    pub spacing: f32,
    /// Half edge of each cube.
    pub extent: f32,
}

impl Default for InstancedParams {
    fn default() -> Self {
        Self {
            count: 1200,
            side: 11,
            spacing: 0.5,
            extent: 0.15,
        }
    }
}

/// Builds the instanced cube grid.
#[derive(Debug, Clone, Default)]
pub struct InstancedModule {
    pub params: InstancedParams,
}

#[async_trait]
impl SceneModule for InstancedModule {
    fn kind(&self) -> SceneKind {
        SceneKind::InstancedGrid
    }

    async fn create_scene(&self, ctx: SceneContext) -> Result<Box<dyn Scene>> {
        let p = &self.params;
        let side = p.side.max(1);
        let capacity = (side * side * side) as usize;
        anyhow::ensure!(
            p.count <= capacity,
            "{} instances do not fit a {side}^3 grid",
            p.count
        );

        tokio::task::yield_now().await;
        log::debug!("instanced: {} cubes on a {side}^3 grid", p.count);

        let offset = (side - 1) as f32 * p.spacing * 0.5;
        let last = p.count.saturating_sub(1).max(1) as f32;
        let mut cells = Vec::with_capacity(p.count);
        for i in 0..p.count {
            let index = i as u32;
            let cell = Vec3::new(
                (index % side) as f32,
                ((index / side) % side) as f32,
                (index / (side * side)) as f32,
            );
            let t = i as f32 / last;
            cells.push(Cell {
                position: cell * p.spacing - Vec3::splat(offset),
                rotation: Quat::IDENTITY,
                spin: Vec3::new(0.2 + (i % 7) as f32 * 0.05, 0.3 + (i % 5) as f32 * 0.04, 0.0),
                color: ColorRgba::from_hsl(0.62 + 0.25 * t, 0.75, 0.6 - 0.25 * t),
            });
        }

        let ledger = ctx.surface.resources();
        let resources = vec![
            ledger.allocate(ResourceKind::Geometry, "cube", 24 * 32),
            ledger.allocate(ResourceKind::Geometry, "instance transforms", p.count * 64),
            ledger.allocate(ResourceKind::Geometry, "instance colors", p.count * 16),
            ledger.allocate(ResourceKind::Material, "instanced standard", 0),
        ];

        let camera = Camera::perspective(60.0, 1.0, 0.1, 100.0)
            .looking_at(Vec3::new(8.0, 7.0, 10.0), Vec3::new(0.0, 0.5, 0.0));
        let controls = OrbitControls::attach(&ctx.container, &camera);

        let content = Instanced {
            extent: p.extent,
            transforms: vec![Mat4::IDENTITY; cells.len()],
            cells,
            camera,
            controls,
            resources,
        };
        Ok(Box::new(AnimatedScene::new(content, &ctx)))
    }
}

struct Cell {
    position: Vec3,
    rotation: Quat,
    /// Angular velocity around X and Y, radians per second.
    spin: Vec3,
    color: ColorRgba,
}

fn pulse(t: f32, i: usize) -> f32 {
    0.9 + 0.25 * (t * 1.2 + i as f32 * 0.03).sin()
}

struct Instanced {
    extent: f32,
    cells: Vec<Cell>,
    transforms: Vec<Mat4>,
    camera: Camera,
    controls: OrbitControls,
    resources: Vec<ResourceHandle>,
}

impl SceneContent for Instanced {
    fn kind(&self) -> SceneKind {
        SceneKind::InstancedGrid
    }

    fn resize(&mut self, size: SurfaceSize) {
        self.camera.set_aspect(size.aspect());
    }

    fn update(&mut self, time: &FrameTime) {
        for (i, (cell, transform)) in self.cells.iter_mut().zip(&mut self.transforms).enumerate() {
            let step = cell.spin * time.dt;
            let delta = Quat::from_euler(EulerRot::XYZ, step.x, step.y, 0.0);
            cell.rotation = (cell.rotation * delta).normalize();
            *transform = Mat4::from_scale_rotation_translation(
                Vec3::splat(pulse(time.elapsed, i)),
                cell.rotation,
                cell.position,
            );
        }
        self.controls.update(&mut self.camera);
    }

    fn render(&self, _size: SurfaceSize) -> Frame {
        let mut frame = Frame::new(ColorRgba::from_hex(0x0b0d14), self.camera);
        frame.list.push_instances(
            Layer::SCENE,
            self.transforms.clone(),
            self.cells.iter().map(|c| c.color).collect(),
            self.extent,
        );
        frame
    }

    fn release(&mut self) {
        self.controls.dispose();
        self.resources.clear();
        self.cells = Vec::new();
        self.transforms = Vec::new();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pulse_stays_in_range() {
        for i in 0..50 {
            let s = pulse(i as f32 * 0.1, i * 13);
            assert!((0.649..=1.151).contains(&s));
        }
    }
}
