use anyhow::Result;
use async_trait::async_trait;
use glam::Vec3;
use vitrine_engine::camera::Camera;
use vitrine_engine::coords::{ColorRgba, SurfaceSize};
use vitrine_engine::draw::{Frame, Layer};
use vitrine_engine::resources::{ResourceHandle, ResourceKind};
use vitrine_engine::time::FrameTime;

use crate::controls::OrbitControls;
use crate::scene::{AnimatedScene, Scene, SceneContent, SceneContext, SceneKind, SceneModule};

/// Displaced plane parameters.
#[derive(Debug, Clone)]
pub struct WaveParams {
    /// Edge length of the square plane in world units.
    pub size: f32,
    /// Grid subdivisions per edge.
    pub segments: u32,
    pub low: ColorRgba,
    pub high: ColorRgba,
    pub point_size: f32,
}

impl Default for WaveParams {
    fn default() -> Self {
        Self {
            size: 8.0,
            segments: 96,
            low: ColorRgba::rgb(0.49, 0.51, 1.0),
            high: ColorRgba::rgb(0.62, 1.0, 0.94),
            point_size: 2.5,
        }
    }
}

/// Builds the shader-driven wave plane.
#[derive(Debug, Clone, Default)]
pub struct WaveModule {
    pub params: WaveParams,
}

#[async_trait]
impl SceneModule for WaveModule {
    fn kind(&self) -> SceneKind {
        SceneKind::ShaderPlane
    }

    async fn create_scene(&self, ctx: SceneContext) -> Result<Box<dyn Scene>> {
        tokio::task::yield_now().await;
        let grid = plane_grid(self.params.size, self.params.segments);
        log::debug!("wave: {} plane vertices", grid.len());

        let ledger = ctx.surface.resources();
        let resources = vec![
            ledger.allocate(ResourceKind::Geometry, "wave plane", grid.len() * 8),
            ledger.allocate(ResourceKind::Program, "wave displacement", 0),
            ledger.allocate(ResourceKind::Material, "wave material", 16),
        ];

        let camera = Camera::perspective(50.0, 1.0, 0.1, 100.0)
            .looking_at(Vec3::new(4.5, 3.5, 6.5), Vec3::ZERO);
        let controls = OrbitControls::attach(&ctx.container, &camera);

        let content = Wave {
            params: self.params.clone(),
            positions: grid.iter().map(|&(x, z)| Vec3::new(x, 0.0, z)).collect(),
            colors: vec![self.params.low; grid.len()],
            grid,
            camera,
            controls,
            resources,
        };
        Ok(Box::new(AnimatedScene::new(content, &ctx)))
    }
}

/// Height of the surface at plane coordinates `(x, y)` and time `t` (seconds).
fn wave_height(x: f32, y: f32, t: f32) -> f32 {
    (x * 2.0 + t * 1.2).sin() * 0.35 + (y * 2.2 - t * 1.1).cos() * 0.35
}

fn plane_grid(size: f32, segments: u32) -> Vec<(f32, f32)> {
    let segments = segments.max(1);
    let step = size / segments as f32;
    let half = size * 0.5;
    let mut grid = Vec::with_capacity(((segments + 1) * (segments + 1)) as usize);
    for row in 0..=segments {
        for column in 0..=segments {
            grid.push((column as f32 * step - half, row as f32 * step - half));
        }
    }
    grid
}

struct Wave {
    params: WaveParams,
    /// Undisplaced plane coordinates.
    grid: Vec<(f32, f32)>,
    positions: Vec<Vec3>,
    colors: Vec<ColorRgba>,
    camera: Camera,
    controls: OrbitControls,
    resources: Vec<ResourceHandle>,
}

impl SceneContent for Wave {
    fn kind(&self) -> SceneKind {
        SceneKind::ShaderPlane
    }

    fn resize(&mut self, size: SurfaceSize) {
        self.camera.set_aspect(size.aspect());
    }

    fn update(&mut self, time: &FrameTime) {
        let t = time.elapsed;
        for ((&(x, y), position), color) in
            self.grid.iter().zip(&mut self.positions).zip(&mut self.colors)
        {
            let h = wave_height(x, y, t);
            // The plane lies flat: plane y runs along -z.
            *position = Vec3::new(x, h, -y);
            *color = self.params.low.lerp(self.params.high, (h / 0.7 + 0.5).clamp(0.0, 1.0));
        }
        self.controls.update(&mut self.camera);
    }

    fn render(&self, _size: SurfaceSize) -> Frame {
        let mut frame = Frame::new(ColorRgba::from_hex(0x070910), self.camera);
        frame.list.push_points(
            Layer::SCENE,
            self.positions.clone(),
            self.colors.clone(),
            self.params.point_size,
        );
        frame
    }

    fn release(&mut self) {
        self.controls.dispose();
        self.resources.clear();
        self.grid = Vec::new();
        self.positions = Vec::new();
        self.colors = Vec::new();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn grid_spans_the_plane() {
        let grid = plane_grid(8.0, 4);
        assert_eq!(grid.len(), 25);
        assert_eq!(grid[0], (-4.0, -4.0));
        assert_eq!(grid[24], (4.0, 4.0));
    }

    #[test]
    fn height_stays_within_amplitude() {
        for i in 0..100 {
            let f = i as f32 * 0.37;
            assert!(wave_height(f, -f, f * 0.5).abs() <= 0.7 + 1e-6);
        }
        assert!((wave_height(0.0, 0.0, 0.0) - 0.35).abs() < 1e-6);
    }
}
