//! GPU presentation of recorded frames.
//!
//! Presentation is split in two:
//! - `project` flattens a `Frame` into screen-space sprites on the CPU
//!   (testable without a device)
//! - `SpriteRenderer` uploads those sprites and draws them as instanced quads
//!
//! Convention: sprites are in NDC (-1..1, +Y up); colors are premultiplied.

mod ctx;
mod project;
mod sprites;

pub use ctx::{RenderCtx, RenderTarget};
pub use project::{project_frame, Sprite, SpriteShape};
pub use sprites::SpriteRenderer;
