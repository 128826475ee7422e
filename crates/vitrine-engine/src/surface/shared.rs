use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Mutex, PoisonError};

use crate::coords::SurfaceSize;
use crate::draw::Frame;
use crate::resources::ResourceLedger;

use super::RenderSurface;

/// Surface backed by a latest-frame mailbox.
///
/// Scenes draw from their frame tasks; the presenter (window runtime or a
/// headless driver) takes the most recent frame whenever it is ready to show
/// one. Frames that are never taken are overwritten.
#[derive(Debug)]
pub struct SharedSurface {
    size: Mutex<SurfaceSize>,
    latest: Mutex<Option<Frame>>,
    draws: AtomicU64,
    resources: ResourceLedger,
}

impl SharedSurface {
    pub fn new(size: SurfaceSize) -> Self {
        Self {
            size: Mutex::new(size),
            latest: Mutex::new(None),
            draws: AtomicU64::new(0),
            resources: ResourceLedger::new(),
        }
    }

    /// Updates the drawable size. Non-drawable sizes are ignored.
    pub fn set_size(&self, size: SurfaceSize) {
        if !size.is_drawable() {
            return;
        }
        *self.size.lock().unwrap_or_else(PoisonError::into_inner) = size;
    }

    /// Removes and returns the most recent frame, if one arrived since the last take.
    pub fn take_frame(&self) -> Option<Frame> {
        self.latest
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .take()
    }

    /// Total frames drawn since creation.
    pub fn draw_count(&self) -> u64 {
        self.draws.load(Ordering::Acquire)
    }
}

impl RenderSurface for SharedSurface {
    fn draw(&self, frame: Frame) {
        *self.latest.lock().unwrap_or_else(PoisonError::into_inner) = Some(frame);
        self.draws.fetch_add(1, Ordering::AcqRel);
    }

    fn current_size(&self) -> SurfaceSize {
        *self.size.lock().unwrap_or_else(PoisonError::into_inner)
    }

    fn resources(&self) -> &ResourceLedger {
        &self.resources
    }
}
