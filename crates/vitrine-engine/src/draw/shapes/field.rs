use crate::coords::ColorRgba;
use crate::draw::{DrawCmd, DrawList, Layer};

/// A full-screen color field sampled on a `columns x rows` grid.
///
/// Texels are stored row-major with row 0 at the top of the screen.
#[derive(Debug, Clone, PartialEq)]
pub struct FieldCmd {
    pub columns: u32,
    pub rows: u32,
    pub texels: Vec<ColorRgba>,
}

impl FieldCmd {
    #[inline]
    pub fn texel(&self, column: u32, row: u32) -> Option<ColorRgba> {
        if column >= self.columns || row >= self.rows {
            return None;
        }
        self.texels
            .get((row * self.columns + column) as usize)
            .copied()
    }
}

impl DrawList {
    pub fn push_field(&mut self, layer: Layer, columns: u32, rows: u32, texels: Vec<ColorRgba>) {
        debug_assert_eq!(texels.len(), (columns * rows) as usize);
        self.push(
            layer,
            DrawCmd::Field(FieldCmd {
                columns,
                rows,
                texels,
            }),
        );
    }
}
