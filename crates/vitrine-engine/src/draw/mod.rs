//! Renderer-agnostic frame description.
//!
//! Scenes record what they want drawn into a `Frame`; the host decides how
//! (and whether) to put it on screen. Shape payloads live one per file under
//! `draw::shapes`, each with its own push helpers on `DrawList`.

mod cmd;
mod frame;
mod layer;
mod list;

pub mod shapes;

pub use cmd::DrawCmd;
pub use frame::Frame;
pub use layer::Layer;
pub use list::{DrawItem, DrawList};
pub use shapes::{FieldCmd, InstancesCmd, PointsCmd};
