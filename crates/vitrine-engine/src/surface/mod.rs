//! The render surface shared by every scene.
//!
//! A `SurfaceProvider` lazily creates one `SharedSurface` per container and
//! keeps it sized to the container. Scenes only see the `RenderSurface` trait:
//! they submit frames, query the size and register their allocations, but
//! never own or dispose the surface.

mod provider;
mod shared;

pub use provider::SurfaceProvider;
pub use shared::SharedSurface;

use crate::coords::SurfaceSize;
use crate::draw::Frame;
use crate::resources::ResourceLedger;

/// Drawing target as seen by scenes.
pub trait RenderSurface: Send + Sync {
    /// Submits a finished frame.
    fn draw(&self, frame: Frame);

    /// Current drawable size.
    fn current_size(&self) -> SurfaceSize;

    /// Ledger that tracks resources allocated against this surface.
    fn resources(&self) -> &ResourceLedger;
}
