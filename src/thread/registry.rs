//! Process-wide thread registry.
//!
//! The registry hands out the small synthetic ids threads are known by, maps live native
//! threads back to their runtime identity, and anchors the main-thread sentinel. It is
//! created lazily; the thread performing the first touch is adopted as `Main`.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, OnceLock, Weak};

use crossbeam_skiplist::SkipMap;
use dashmap::DashMap;
use tracing::trace;

use super::{ThreadId, ThreadInner};
use crate::sys::{self, NativeId};

static REGISTRY: OnceLock<Registry> = OnceLock::new();

pub(super) struct Registry {
    /// Every thread known to the runtime, keyed by synthetic id. Entries are weak, so a
    /// thread whose last handle is gone drops out of enumeration on its own.
    by_id: SkipMap<ThreadId, Weak<ThreadInner>>,
    /// Live executions only, keyed by native id. The trampoline owns the entry between
    /// registration and deregistration.
    by_native: DashMap<NativeId, Weak<ThreadInner>>,
    next_id: AtomicU64,
    main: Arc<ThreadInner>,
    main_native: NativeId,
}

impl Registry {
    pub(super) fn global() -> &'static Registry {
        REGISTRY.get_or_init(|| {
            let registry = Registry {
                by_id: SkipMap::new(),
                by_native: DashMap::new(),
                next_id: AtomicU64::new(1),
                main: ThreadInner::sentinel(),
                main_native: sys::current_native_id(),
            };
            registry
                .by_id
                .insert(registry.main.id(), Arc::downgrade(&registry.main));
            trace!("thread registry initialized");
            registry
        })
    }

    /// Hands out the next synthetic id. Id 0 is reserved for the sentinel.
    pub(super) fn allocate_id(&self) -> ThreadId {
        ThreadId::new(self.next_id.fetch_add(1, Ordering::Relaxed))
    }

    pub(super) fn register(&self, inner: &Arc<ThreadInner>) {
        self.by_id.insert(inner.id(), Arc::downgrade(inner));
    }

    pub(super) fn forget(&self, id: ThreadId) {
        self.by_id.remove(&id);
    }

    pub(super) fn attach_native(&self, native: NativeId, inner: &Arc<ThreadInner>) {
        self.by_native.insert(native, Arc::downgrade(inner));
    }

    pub(super) fn detach_native(&self, native: NativeId) {
        self.by_native.remove(&native);
    }

    /// Resolves the runtime identity behind a native thread, if it has one.
    pub(super) fn resolve(&self, native: NativeId) -> Option<Arc<ThreadInner>> {
        if native == self.main_native {
            return Some(Arc::clone(&self.main));
        }
        self.by_native
            .get(&native)
            .and_then(|entry| entry.value().upgrade())
    }

    /// Snapshots every thread that still has a live handle, the sentinel included.
    pub(super) fn threads(&self) -> Vec<Arc<ThreadInner>> {
        self.by_id
            .iter()
            .filter_map(|entry| entry.value().upgrade())
            .collect()
    }
}
