use crate::camera::Camera;
use crate::coords::ColorRgba;

use super::DrawList;

/// Everything needed to present one rendered frame.
#[derive(Debug, Clone, PartialEq)]
pub struct Frame {
    pub clear: ColorRgba,
    pub camera: Camera,
    pub list: DrawList,
}

impl Frame {
    pub fn new(clear: ColorRgba, camera: Camera) -> Self {
        Self {
            clear,
            camera,
            list: DrawList::new(),
        }
    }
}
