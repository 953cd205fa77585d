/*!
Memory management for the PQC runtime.

This module defines the allocator capability the runtime registers and
owns, the built-in allocation strategies, and the named registry with its
cached process default.
*/

// Allocator capability and built-in strategies
pub mod allocator;

// Named allocator registry
pub mod registry;

// Re-export the main components
pub use allocator::{Allocator, LockingAllocator, MallocAllocator, FALLBACK_ALLOCATOR};
pub use registry::AllocatorRegistry;
