//! Process-wide accessor semantics: lazy construction, replace, and swap.
//!
//! These tests share one static slot, so each takes the serialization
//! lock before touching it.

use std::sync::{Arc, Mutex, MutexGuard};
use std::thread;

use pqc_runtime::{
    global_state, set_global_state, swap_global_state, take_global_state, BuiltinModules,
    InitializerOptions, LibraryState,
};

static SLOT_GUARD: Mutex<()> = Mutex::new(());

fn serialize() -> MutexGuard<'static, ()> {
    SLOT_GUARD.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
}

fn initialized_state(marker: &str) -> LibraryState {
    let mut state = LibraryState::new();
    state
        .initialize(&InitializerOptions::default(), &BuiltinModules)
        .unwrap();
    state.set_option("test/marker", marker).unwrap();
    state
}

#[test]
fn test_lazy_first_use_yields_one_instance() {
    let _guard = serialize();
    take_global_state();

    let handles: Vec<_> = (0..8)
        .map(|_| thread::spawn(|| global_state().unwrap()))
        .collect();

    let instances: Vec<_> = handles
        .into_iter()
        .map(|handle| handle.join().unwrap())
        .collect();

    for instance in &instances[1..] {
        assert!(Arc::ptr_eq(&instances[0], instance));
    }

    // The lazily built default is fully initialized
    assert!(instances[0].algo_factory().is_ok());
    take_global_state();
}

#[test]
fn test_set_replaces_the_shared_instance() {
    let _guard = serialize();

    set_global_state(initialized_state("first"));
    set_global_state(initialized_state("second"));

    let current = global_state().unwrap();
    assert_eq!(current.option("test/marker").unwrap(), "second");
    take_global_state();
}

#[test]
fn test_swap_hands_back_the_previous_instance() {
    let _guard = serialize();

    set_global_state(initialized_state("old"));
    let previous = swap_global_state(initialized_state("new")).unwrap();

    assert_eq!(previous.option("test/marker").unwrap(), "old");

    let current = global_state().unwrap();
    assert_eq!(current.option("test/marker").unwrap(), "new");
    assert!(!Arc::ptr_eq(&previous, &current));
    take_global_state();
}

#[test]
fn test_swap_into_empty_slot_returns_none() {
    let _guard = serialize();
    take_global_state();

    assert!(swap_global_state(initialized_state("only")).is_none());
    take_global_state();
}
