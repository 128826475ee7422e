//! Host container: the element scenes render into.
//!
//! The container owns its current size and two listener registries (resize and
//! pointer). Listeners are registered by surfaces, scenes and controls, and must
//! be removed by whoever registered them.

mod container;

pub use container::{Container, ListenerId, PointerEvent};
