/*!
# PQC Runtime

Global runtime state and pluggable resource registries for a post-quantum
cryptography library.

## Overview

Every call into the library that needs shared configuration, an
allocator, a mutex, or an algorithm implementation goes through the
process-wide [`LibraryState`], which is initialized exactly once and then
dispatches to the relevant registry under that registry's own lock.

This crate provides:

- A mutex factory abstraction with thread-safe and single-threaded
  construction strategies
- A registry of named memory allocators with a cached, configuration-driven
  process default
- A hierarchical configuration store with transitive alias resolution
- Engine registration backing every cryptographic-primitive lookup
- A self-test gate that must pass before the library is usable in FIPS or
  explicit self-test mode
- Process-wide get/replace/swap accessors with race-free lazy construction

## Usage

```
use pqc_runtime::{global_state, RuntimeInitializer};

let _init = RuntimeInitializer::with_defaults().unwrap();

let state = global_state().unwrap();
let allocator = state.get_allocator("").unwrap().unwrap();
assert_eq!(allocator.name(), "locking");
```
*/

// Core runtime components
pub mod core;

// Re-export commonly used types for convenience
pub use crate::core::error::{Error, Result};
pub use crate::core::options::InitializerOptions;

// Re-export mutex construction strategies
pub use crate::core::mutex::{
    new_lock, MutexFactory, RuntimeMutex, RuntimeMutexGuard, RuntimeRawMutex,
    SingleThreadedMutexFactory, SystemMutexFactory,
};

// Re-export allocator capabilities
pub use crate::core::memory::{
    Allocator, AllocatorRegistry, LockingAllocator, MallocAllocator, FALLBACK_ALLOCATOR,
};

// Re-export configuration store
pub use crate::core::config::{ConfigStore, ALIAS_SECTION, OPTION_SECTION};

// Re-export engine registration
pub use crate::core::engine::{AlgorithmFactory, Engine, SoftwareEngine};

// Re-export the self-test gate
pub use crate::core::security::{KnownAnswerTests, SelfTestRunner};

// Re-export module sets
pub use crate::core::modules::{BuiltinModules, Modules};

// Re-export the runtime state and its process-wide accessors
pub use crate::core::state::{
    global_state, set_global_state, swap_global_state, take_global_state, LibraryState,
    RuntimeInitializer,
};
