/*!
Process-wide access to the runtime state.

One static slot holds the shared [`LibraryState`]. A single dedicated
lock guards lazy first-use construction and every get/replace/swap, so
concurrent callers always observe one fully initialized instance and
ownership transfer during a swap is atomic with respect to concurrent
reads.

Handles are `Arc`s: a replaced instance is destroyed when the last
outstanding handle drops, never out from under a live caller.
*/

use std::sync::Arc;

use log::debug;
use once_cell::sync::Lazy;
use parking_lot::Mutex;

use crate::core::error::Result;
use crate::core::modules::{BuiltinModules, Modules};
use crate::core::options::InitializerOptions;
use crate::core::state::LibraryState;

/// Slot for the process-wide state; the lock also covers lazy creation
static GLOBAL_STATE: Lazy<Mutex<Option<Arc<LibraryState>>>> = Lazy::new(|| Mutex::new(None));

/// The shared runtime state, constructing and initializing a default
/// instance on first use
///
/// First-use construction runs full initialization with
/// [`BuiltinModules`] and default options, so this can fail the same way
/// [`LibraryState::initialize`] can.
pub fn global_state() -> Result<Arc<LibraryState>> {
    let mut slot = GLOBAL_STATE.lock();

    if let Some(state) = slot.as_ref() {
        return Ok(Arc::clone(state));
    }

    debug!("constructing default runtime state on first use");
    let mut state = LibraryState::new();
    state.initialize(&InitializerOptions::default(), &BuiltinModules)?;

    let state = Arc::new(state);
    *slot = Some(Arc::clone(&state));
    Ok(state)
}

/// Install `new_state` as the shared instance, releasing the previous one
pub fn set_global_state(new_state: LibraryState) {
    drop(swap_global_state(new_state));
}

/// Install `new_state` and hand the previous instance to the caller
pub fn swap_global_state(new_state: LibraryState) -> Option<Arc<LibraryState>> {
    let mut slot = GLOBAL_STATE.lock();
    debug!("swapping process-wide runtime state");
    slot.replace(Arc::new(new_state))
}

/// Remove the shared instance, handing it to the caller if one exists
pub fn take_global_state() -> Option<Arc<LibraryState>> {
    GLOBAL_STATE.lock().take()
}

/// RAII initializer for applications
///
/// Constructs a state from the given modules, installs it process-wide,
/// and uninstalls it on drop.
///
/// ```
/// use pqc_runtime::{global_state, RuntimeInitializer};
///
/// let _init = RuntimeInitializer::with_defaults().unwrap();
/// let state = global_state().unwrap();
/// assert!(state.algo_factory().is_ok());
/// ```
pub struct RuntimeInitializer {
    _private: (),
}

impl RuntimeInitializer {
    /// Initialize a state from `options` and `modules` and install it
    pub fn new(options: &InitializerOptions, modules: &dyn Modules) -> Result<Self> {
        let mut state = LibraryState::new();
        state.initialize(options, modules)?;

        GLOBAL_STATE.lock().replace(Arc::new(state));
        Ok(RuntimeInitializer { _private: () })
    }

    /// Initialize with [`BuiltinModules`] and default options
    pub fn with_defaults() -> Result<Self> {
        Self::new(&InitializerOptions::default(), &BuiltinModules)
    }
}

impl Drop for RuntimeInitializer {
    fn drop(&mut self) {
        debug!("uninstalling process-wide runtime state");
        GLOBAL_STATE.lock().take();
    }
}
