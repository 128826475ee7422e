use glam::Mat4;

use crate::coords::ColorRgba;
use crate::draw::{DrawCmd, DrawList, Layer};

/// Instanced unit cubes, one world transform and color per instance.
#[derive(Debug, Clone, PartialEq)]
pub struct InstancesCmd {
    pub transforms: Vec<Mat4>,
    pub colors: Vec<ColorRgba>,
    /// Half edge length of the shared cube geometry.
    pub extent: f32,
}

impl DrawList {
    pub fn push_instances(
        &mut self,
        layer: Layer,
        transforms: Vec<Mat4>,
        colors: Vec<ColorRgba>,
        extent: f32,
    ) {
        debug_assert_eq!(transforms.len(), colors.len());
        self.push(
            layer,
            DrawCmd::Instances(InstancesCmd {
                transforms,
                colors,
                extent,
            }),
        );
    }
}
