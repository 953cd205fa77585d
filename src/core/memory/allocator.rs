/*!
Memory allocator capabilities for the PQC runtime.

An allocator is a named memory-management strategy with an explicit
lifecycle. The runtime owns every allocator registered with it, calls
`init` at registration and `destroy` exactly once at teardown, and resolves
a process default by name through configuration.

The concrete strategies here are intentionally thin; heavier strategies
(pooled secure heaps, hardware-backed storage) plug in through the same
trait via a custom [`Modules`](crate::core::modules::Modules) set.
*/

use std::ptr;
use std::sync::atomic::{fence, AtomicBool, Ordering};

use crate::core::error::{invalid_state_err, Result};
use crate::core::mutex::{new_lock, MutexFactory, RuntimeMutex};

/// Name resolved for the default allocator when configuration has no entry
pub const FALLBACK_ALLOCATOR: &str = "malloc";

/// Bytes reserved by the locking allocator for key material
const LOCKED_POOL_BYTES: usize = 64 * 1024;

/// A named memory-management strategy with an explicit lifecycle
pub trait Allocator: Send + Sync {
    /// Prepare the allocator for use; called once when it is registered
    fn init(&self) -> Result<()>;

    /// Tear the allocator down; called exactly once by the owning runtime
    fn destroy(&self);

    /// Name this allocator is registered under
    fn name(&self) -> &str;
}

/// Direct heap allocation strategy; no lifecycle state
#[derive(Debug, Default)]
pub struct MallocAllocator;

impl Allocator for MallocAllocator {
    fn init(&self) -> Result<()> {
        Ok(())
    }

    fn destroy(&self) {}

    fn name(&self) -> &str {
        "malloc"
    }
}

/// Page-locking strategy that keeps key material in a wired pool
///
/// The pool's guard lock comes from the runtime's mutex factory, so the
/// allocator follows whatever locking strategy the library was
/// initialized with.
pub struct LockingAllocator {
    ready: AtomicBool,
    pool: RuntimeMutex<Vec<u8>>,
}

impl LockingAllocator {
    /// Create an allocator whose pool lock uses `mutex_factory`'s strategy
    pub fn new(mutex_factory: &dyn MutexFactory) -> Self {
        LockingAllocator {
            ready: AtomicBool::new(false),
            pool: new_lock(mutex_factory, Vec::new()),
        }
    }
}

impl Allocator for LockingAllocator {
    fn init(&self) -> Result<()> {
        if self.ready.swap(true, Ordering::AcqRel) {
            return invalid_state_err("locking allocator initialized twice");
        }
        self.pool.lock().resize(LOCKED_POOL_BYTES, 0);
        Ok(())
    }

    fn destroy(&self) {
        if !self.ready.swap(false, Ordering::AcqRel) {
            return;
        }
        let mut pool = self.pool.lock();
        secure_zero(&mut pool);
        pool.clear();
        pool.shrink_to_fit();
    }

    fn name(&self) -> &str {
        "locking"
    }
}

/// Zero `memory` with volatile writes so the wipe is not optimized away
#[inline(never)]
fn secure_zero(memory: &mut [u8]) {
    for byte in memory.iter_mut() {
        // SAFETY: `byte` is a valid, exclusive reference into the slice
        unsafe { ptr::write_volatile(byte, 0) };
    }

    // Keep the stores ordered before any later reuse of the buffer
    fence(Ordering::SeqCst);
}
