use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use crate::host::{Container, ListenerId};

use super::SharedSurface;

struct Binding {
    surface: Arc<SharedSurface>,
    container: Container,
    resize_listener: ListenerId,
}

/// Lazily created, container-bound surface singleton.
///
/// The provider is owned by the host context. It holds the only strong
/// reference besides whatever scenes and presenters currently use.
#[derive(Default)]
pub struct SurfaceProvider {
    binding: Mutex<Option<Binding>>,
}

impl SurfaceProvider {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the surface, creating it on first use.
    ///
    /// The created surface follows the container's size. Later calls return
    /// the same surface regardless of the container passed.
    pub fn acquire(&self, container: &Container) -> Arc<SharedSurface> {
        let mut binding = self.lock();
        if let Some(existing) = binding.as_ref() {
            return Arc::clone(&existing.surface);
        }

        let surface = Arc::new(SharedSurface::new(container.size()));
        let weak = Arc::downgrade(&surface);
        let resize_listener = container.add_resize_listener(move |size| {
            if let Some(surface) = weak.upgrade() {
                surface.set_size(size);
            }
        });

        log::debug!("render surface created at {:?}", container.size());
        *binding = Some(Binding {
            surface: Arc::clone(&surface),
            container: container.clone(),
            resize_listener,
        });
        surface
    }

    /// The surface, if one has been acquired and not disposed.
    pub fn get(&self) -> Option<Arc<SharedSurface>> {
        self.lock().as_ref().map(|b| Arc::clone(&b.surface))
    }

    /// Detaches from the container and drops the provider's reference.
    ///
    /// Returns `false` when there was nothing to dispose.
    pub fn dispose(&self) -> bool {
        let Some(binding) = self.lock().take() else {
            return false;
        };
        binding.container.remove_listener(binding.resize_listener);
        log::debug!("render surface disposed");
        true
    }

    fn lock(&self) -> MutexGuard<'_, Option<Binding>> {
        self.binding.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl Drop for SurfaceProvider {
    fn drop(&mut self) {
        self.dispose();
    }
}
