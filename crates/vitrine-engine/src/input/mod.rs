//! Input subsystem.
//!
//! Public types do not expose winit. The runtime translates platform events
//! through `platform::winit`, folds them into `InputState` (which turns button
//! plus motion into drags) and queues the results in the frame's `InputFrame`.

mod frame;
mod state;
mod types;

pub(crate) mod platform;

pub use frame::InputFrame;
pub use state::InputState;
pub use types::{InputEvent, Key, RawInput};
