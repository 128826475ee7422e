use std::collections::BTreeMap;
use std::fmt;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError, Weak};

/// Category of a tracked graphics resource.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub enum ResourceKind {
    Geometry,
    Material,
    Program,
    Texture,
}

impl fmt::Display for ResourceKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            ResourceKind::Geometry => "geometry",
            ResourceKind::Material => "material",
            ResourceKind::Program => "program",
            ResourceKind::Texture => "texture",
        };
        f.write_str(name)
    }
}

/// A live ledger entry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResourceEntry {
    pub kind: ResourceKind,
    pub label: String,
    pub bytes: usize,
}

#[derive(Default)]
struct Ledger {
    next_id: u64,
    live: BTreeMap<u64, ResourceEntry>,
    allocated_total: u64,
}

/// Shared allocation ledger. Cloning shares the same ledger.
#[derive(Clone, Default)]
pub struct ResourceLedger {
    inner: Arc<Mutex<Ledger>>,
}

impl ResourceLedger {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers a resource and returns the owning handle.
    pub fn allocate(
        &self,
        kind: ResourceKind,
        label: impl Into<String>,
        bytes: usize,
    ) -> ResourceHandle {
        let label = label.into();
        let mut ledger = self.lock();
        ledger.next_id += 1;
        ledger.allocated_total += 1;
        let id = ledger.next_id;

        log::trace!("allocate {kind} '{label}' ({bytes} bytes)");
        ledger.live.insert(id, ResourceEntry { kind, label, bytes });

        ResourceHandle {
            id,
            kind,
            bytes,
            ledger: Arc::downgrade(&self.inner),
        }
    }

    /// Number of live resources.
    pub fn live(&self) -> usize {
        self.lock().live.len()
    }

    /// Number of live resources of one kind.
    pub fn live_of(&self, kind: ResourceKind) -> usize {
        self.lock().live.values().filter(|e| e.kind == kind).count()
    }

    /// Sum of the byte sizes of live resources.
    pub fn live_bytes(&self) -> usize {
        self.lock().live.values().map(|e| e.bytes).sum()
    }

    /// Number of allocations ever made through this ledger.
    pub fn allocated_total(&self) -> u64 {
        self.lock().allocated_total
    }

    /// Snapshot of live entries in allocation order.
    pub fn entries(&self) -> Vec<ResourceEntry> {
        self.lock().live.values().cloned().collect()
    }

    fn lock(&self) -> MutexGuard<'_, Ledger> {
        self.inner.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl fmt::Debug for ResourceLedger {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let ledger = self.lock();
        f.debug_struct("ResourceLedger")
            .field("live", &ledger.live.len())
            .field("allocated_total", &ledger.allocated_total)
            .finish()
    }
}

/// Owning handle to a ledger entry. Released on drop.
#[derive(Debug)]
pub struct ResourceHandle {
    id: u64,
    kind: ResourceKind,
    bytes: usize,
    ledger: Weak<Mutex<Ledger>>,
}

impl ResourceHandle {
    #[inline]
    pub fn kind(&self) -> ResourceKind {
        self.kind
    }

    #[inline]
    pub fn bytes(&self) -> usize {
        self.bytes
    }

    /// Explicit release; equivalent to dropping the handle.
    pub fn release(self) {}
}

impl Drop for ResourceHandle {
    fn drop(&mut self) {
        let Some(ledger) = self.ledger.upgrade() else {
            return;
        };
        let mut ledger = ledger.lock().unwrap_or_else(PoisonError::into_inner);
        if let Some(entry) = ledger.live.remove(&self.id) {
            log::trace!("release {} '{}'", entry.kind, entry.label);
        }
    }
}
