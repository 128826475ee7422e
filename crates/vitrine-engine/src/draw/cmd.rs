use super::shapes::{FieldCmd, InstancesCmd, PointsCmd};

/// A single recorded primitive batch.
///
/// New primitive kinds get a payload file under `draw::shapes`, a variant
/// here, and a projection arm in `render::project`.
#[derive(Debug, Clone, PartialEq)]
pub enum DrawCmd {
    Points(PointsCmd),
    Instances(InstancesCmd),
    Field(FieldCmd),
}

impl DrawCmd {
    /// Number of primitives the command expands to.
    pub fn primitive_count(&self) -> usize {
        match self {
            DrawCmd::Points(p) => p.positions.len(),
            DrawCmd::Instances(i) => i.transforms.len(),
            DrawCmd::Field(f) => f.texels.len(),
        }
    }
}
