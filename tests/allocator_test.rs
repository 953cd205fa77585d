//! Allocator registry behavior: named lookup, default resolution and
//! caching, and shadowed registrations.

use std::sync::Arc;

use pqc_runtime::{
    Allocator, BuiltinModules, InitializerOptions, LibraryState, Result, OPTION_SECTION,
};

struct NamedAllocator(&'static str);

impl Allocator for NamedAllocator {
    fn init(&self) -> Result<()> {
        Ok(())
    }

    fn destroy(&self) {}

    fn name(&self) -> &str {
        self.0
    }
}

fn initialized_state() -> LibraryState {
    let mut state = LibraryState::new();
    state
        .initialize(&InitializerOptions::default(), &BuiltinModules)
        .unwrap();
    state
}

#[test]
fn test_named_lookup_never_raises() {
    let state = initialized_state();

    assert!(state.get_allocator("malloc").unwrap().is_some());
    assert!(state.get_allocator("never-registered").unwrap().is_none());
}

#[test]
fn test_default_follows_configuration() {
    let state = initialized_state();
    state.add_allocator(Box::new(NamedAllocator("X"))).unwrap();
    state.add_allocator(Box::new(NamedAllocator("Y"))).unwrap();

    state.set_default_allocator("X").unwrap();
    let default = state.get_allocator("").unwrap().unwrap();
    assert_eq!(default.name(), "X");

    // Changing the configured name invalidates the cached default
    state.set_default_allocator("Y").unwrap();
    let default = state.get_allocator("").unwrap().unwrap();
    assert_eq!(default.name(), "Y");
}

#[test]
fn test_cached_default_is_stable_between_invalidations() {
    let state = initialized_state();

    let first = state.get_allocator("").unwrap().unwrap();
    let second = state.get_allocator("").unwrap().unwrap();
    assert!(Arc::ptr_eq(&first, &second));
}

#[test]
fn test_unset_default_falls_back_to_malloc() {
    let state = initialized_state();

    // An empty configured name counts as unset
    state
        .set(OPTION_SECTION, "base/default_allocator", "", true)
        .unwrap();

    let default = state.get_allocator("").unwrap().unwrap();
    assert_eq!(default.name(), "malloc");
}

#[test]
fn test_missing_default_resolves_to_absent() {
    let state = initialized_state();

    state.set_default_allocator("no-such-allocator").unwrap();
    assert!(state.get_allocator("").unwrap().is_none());

    // The absent outcome is cached until the next invalidation
    assert!(state.get_allocator("").unwrap().is_none());
    state.set_default_allocator("malloc").unwrap();
    assert!(state.get_allocator("").unwrap().is_some());
}

#[test]
fn test_shadowed_name_serves_latest_registration() {
    let state = initialized_state();

    state.add_allocator(Box::new(NamedAllocator("pool"))).unwrap();
    let first = state.get_allocator("pool").unwrap().unwrap();

    state.add_allocator(Box::new(NamedAllocator("pool"))).unwrap();
    let second = state.get_allocator("pool").unwrap().unwrap();

    assert!(!Arc::ptr_eq(&first, &second));
}

#[test]
fn test_empty_default_name_is_a_no_op() {
    let state = initialized_state();

    let before = state.option("base/default_allocator").unwrap();
    state.set_default_allocator("").unwrap();
    assert_eq!(state.option("base/default_allocator").unwrap(), before);
}
