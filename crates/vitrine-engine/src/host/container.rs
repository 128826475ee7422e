use std::fmt;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use crate::coords::SurfaceSize;

/// Handle returned when registering a listener; pass it back to remove it.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub struct ListenerId(u64);

/// Pointer input forwarded by the host, in logical pixels.
#[derive(Debug, Copy, Clone, PartialEq)]
pub enum PointerEvent {
    /// Primary button held while the pointer moved.
    Drag { dx: f32, dy: f32 },
    /// Wheel or trackpad scroll, in lines (positive = away from the user).
    Wheel { delta: f32 },
}

type ResizeFn = dyn Fn(SurfaceSize) + Send + Sync;
type PointerFn = dyn Fn(PointerEvent) + Send + Sync;

#[derive(Default)]
struct Registry {
    size: SurfaceSize,
    next_id: u64,
    resize: Vec<(ListenerId, Arc<ResizeFn>)>,
    pointer: Vec<(ListenerId, Arc<PointerFn>)>,
}

impl Registry {
    fn issue_id(&mut self) -> ListenerId {
        self.next_id += 1;
        ListenerId(self.next_id)
    }
}

/// Shared handle to the host container.
///
/// Cloning is cheap; all clones observe the same size and listeners.
///
/// Dispatch snapshots the listener list before invoking callbacks, so a listener
/// may add or remove listeners (including itself) without deadlocking.
#[derive(Clone, Default)]
pub struct Container {
    inner: Arc<Mutex<Registry>>,
}

impl Container {
    pub fn new(size: SurfaceSize) -> Self {
        Self {
            inner: Arc::new(Mutex::new(Registry {
                size,
                ..Registry::default()
            })),
        }
    }

    /// Current logical size.
    pub fn size(&self) -> SurfaceSize {
        self.lock().size
    }

    /// Records a new size and notifies resize listeners.
    ///
    /// Zero-area sizes are recorded but not dispatched; listeners only ever see
    /// drawable sizes.
    pub fn resize(&self, size: SurfaceSize) {
        let listeners: Vec<Arc<ResizeFn>> = {
            let mut reg = self.lock();
            if reg.size == size {
                return;
            }
            reg.size = size;
            if !size.is_drawable() {
                return;
            }
            reg.resize.iter().map(|(_, f)| Arc::clone(f)).collect()
        };

        for listener in listeners {
            listener(size);
        }
    }

    /// Forwards a pointer event to pointer listeners.
    pub fn dispatch_pointer(&self, event: PointerEvent) {
        let listeners: Vec<Arc<PointerFn>> = self
            .lock()
            .pointer
            .iter()
            .map(|(_, f)| Arc::clone(f))
            .collect();

        for listener in listeners {
            listener(event);
        }
    }

    pub fn add_resize_listener<F>(&self, listener: F) -> ListenerId
    where
        F: Fn(SurfaceSize) + Send + Sync + 'static,
    {
        let mut reg = self.lock();
        let id = reg.issue_id();
        reg.resize.push((id, Arc::new(listener)));
        id
    }

    pub fn add_pointer_listener<F>(&self, listener: F) -> ListenerId
    where
        F: Fn(PointerEvent) + Send + Sync + 'static,
    {
        let mut reg = self.lock();
        let id = reg.issue_id();
        reg.pointer.push((id, Arc::new(listener)));
        id
    }

    /// Removes a listener of either kind. Returns `false` if it was not registered.
    pub fn remove_listener(&self, id: ListenerId) -> bool {
        let mut reg = self.lock();
        let before = reg.resize.len() + reg.pointer.len();
        reg.resize.retain(|(lid, _)| *lid != id);
        reg.pointer.retain(|(lid, _)| *lid != id);
        reg.resize.len() + reg.pointer.len() != before
    }

    pub fn resize_listener_count(&self) -> usize {
        self.lock().resize.len()
    }

    pub fn pointer_listener_count(&self) -> usize {
        self.lock().pointer.len()
    }

    fn lock(&self) -> MutexGuard<'_, Registry> {
        self.inner.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl fmt::Debug for Container {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let reg = self.lock();
        f.debug_struct("Container")
            .field("size", &reg.size)
            .field("resize_listeners", &reg.resize.len())
            .field("pointer_listeners", &reg.pointer.len())
            .finish()
    }
}
