//! Primitive payloads and their `DrawList` push helpers.

mod field;
mod instances;
mod points;

pub use field::FieldCmd;
pub use instances::InstancesCmd;
pub use points::PointsCmd;
