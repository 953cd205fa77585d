//! Core components of the PQC runtime.
//!
//! This module contains the runtime's building blocks: the mutex
//! construction strategies, allocator capabilities and their registry,
//! the configuration store, engine registration, the self-test gate, and
//! the library state that owns and sequences all of them.

// Mutex construction strategies
pub mod mutex;

// Allocator capabilities and registry
pub mod memory;

// Configuration store and built-in defaults
pub mod config;

// Engine registration
pub mod engine;

// Startup self-tests
pub mod security;

// Pluggable module sets
pub mod modules;

// Initialization options
pub mod options;

// Runtime state and process-wide accessors
pub mod state;

// Error handling
pub mod error;

// Re-exports for convenience
pub use self::error::{Error, Result};
pub use self::options::InitializerOptions;
pub use self::state::{global_state, LibraryState};
