/*!
Mutex construction strategies for the PQC runtime.

The runtime does not hard-code one locking strategy. A [`MutexFactory`]
installed at initialization builds every lock the runtime uses, and every
mutex handed out by [`LibraryState::get_mutex`](crate::core::state::LibraryState::get_mutex)
is an independently owned instance of that factory's strategy.

Two strategies ship with the library:

- [`SystemMutexFactory`] builds blocking OS mutexes.
- [`SingleThreadedMutexFactory`] builds non-blocking flags for callers that
  guarantee a single thread; contention under this strategy is a usage error
  and panics rather than permitting aliased access to guarded state.
*/

use std::sync::atomic::{AtomicBool, Ordering};

use parking_lot::lock_api::{self, GuardSend, RawMutex as RawMutexApi};

/// A mutex over `T` built from a factory-chosen [`RuntimeRawMutex`]
pub type RuntimeMutex<T> = lock_api::Mutex<RuntimeRawMutex, T>;

/// Scoped guard for a [`RuntimeMutex`]; releases on every exit path
pub type RuntimeMutexGuard<'a, T> = lock_api::MutexGuard<'a, RuntimeRawMutex, T>;

/// Raw mutual-exclusion primitive selected at initialization time
pub enum RuntimeRawMutex {
    /// Blocking mutex backed by the operating system
    Os(parking_lot::RawMutex),

    /// Non-blocking flag for single-threaded use; contention panics
    SingleThreaded(AtomicBool),
}

unsafe impl RawMutexApi for RuntimeRawMutex {
    const INIT: Self = RuntimeRawMutex::Os(<parking_lot::RawMutex as RawMutexApi>::INIT);

    type GuardMarker = GuardSend;

    fn lock(&self) {
        match self {
            RuntimeRawMutex::Os(raw) => raw.lock(),
            RuntimeRawMutex::SingleThreaded(held) => {
                if held.swap(true, Ordering::Acquire) {
                    panic!("single-threaded mutex acquired while already held");
                }
            }
        }
    }

    fn try_lock(&self) -> bool {
        match self {
            RuntimeRawMutex::Os(raw) => raw.try_lock(),
            RuntimeRawMutex::SingleThreaded(held) => !held.swap(true, Ordering::Acquire),
        }
    }

    unsafe fn unlock(&self) {
        match self {
            // SAFETY: the caller holds the lock, as required by RawMutex::unlock
            RuntimeRawMutex::Os(raw) => unsafe { raw.unlock() },
            RuntimeRawMutex::SingleThreaded(held) => held.store(false, Ordering::Release),
        }
    }
}

/// Constructs mutual-exclusion primitives on demand
pub trait MutexFactory: Send + Sync {
    /// Construct a fresh raw mutex using this factory's strategy
    fn make_raw(&self) -> RuntimeRawMutex;

    /// Construct a new, independently owned mutex
    fn make(&self) -> RuntimeMutex<()> {
        RuntimeMutex::from_raw(self.make_raw(), ())
    }
}

/// Wrap `value` in a mutex built by `factory`
pub fn new_lock<T>(factory: &dyn MutexFactory, value: T) -> RuntimeMutex<T> {
    RuntimeMutex::from_raw(factory.make_raw(), value)
}

/// Factory for blocking OS mutexes
#[derive(Debug, Default)]
pub struct SystemMutexFactory;

impl MutexFactory for SystemMutexFactory {
    fn make_raw(&self) -> RuntimeRawMutex {
        RuntimeRawMutex::Os(<parking_lot::RawMutex as RawMutexApi>::INIT)
    }
}

/// Factory for the single-threaded, non-blocking strategy
#[derive(Debug, Default)]
pub struct SingleThreadedMutexFactory;

impl MutexFactory for SingleThreadedMutexFactory {
    fn make_raw(&self) -> RuntimeRawMutex {
        RuntimeRawMutex::SingleThreaded(AtomicBool::new(false))
    }
}
