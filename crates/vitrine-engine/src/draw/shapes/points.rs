use std::sync::Arc;

use glam::{Mat4, Vec3};

use crate::coords::ColorRgba;
use crate::draw::{DrawCmd, DrawList, Layer};

/// A point cloud in model space.
///
/// `colors` is either one color per position or a single color for all.
/// Both are shared, so a static cloud costs a refcount per frame.
#[derive(Debug, Clone, PartialEq)]
pub struct PointsCmd {
    pub positions: Arc<[Vec3]>,
    pub colors: Arc<[ColorRgba]>,
    /// Point diameter in physical pixels.
    pub size: f32,
    pub model: Mat4,
}

impl PointsCmd {
    /// Color of point `i`, falling back to the first (or white).
    #[inline]
    pub fn color_at(&self, i: usize) -> ColorRgba {
        self.colors
            .get(i)
            .or_else(|| self.colors.first())
            .copied()
            .unwrap_or_else(ColorRgba::white)
    }
}

impl DrawList {
    pub fn push_points(
        &mut self,
        layer: Layer,
        positions: impl Into<Arc<[Vec3]>>,
        colors: impl Into<Arc<[ColorRgba]>>,
        size: f32,
    ) {
        self.push_points_with_model(layer, positions, colors, size, Mat4::IDENTITY);
    }

    pub fn push_points_with_model(
        &mut self,
        layer: Layer,
        positions: impl Into<Arc<[Vec3]>>,
        colors: impl Into<Arc<[ColorRgba]>>,
        size: f32,
        model: Mat4,
    ) {
        self.push(
            layer,
            DrawCmd::Points(PointsCmd {
                positions: positions.into(),
                colors: colors.into(),
                size,
                model,
            }),
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn shared_cloud_is_not_copied_into_the_list() {
        let positions: Arc<[Vec3]> = vec![Vec3::X, Vec3::Y].into();
        let colors: Arc<[ColorRgba]> = vec![ColorRgba::white()].into();
        let mut list = DrawList::new();

        list.push_points(Layer::SCENE, Arc::clone(&positions), Arc::clone(&colors), 1.0);

        let DrawCmd::Points(cmd) = &list.items()[0].cmd else {
            panic!("expected a points command");
        };
        assert!(Arc::ptr_eq(&cmd.positions, &positions));
        assert_eq!(cmd.color_at(1), ColorRgba::white());
    }
}
