//! Concurrent access to one runtime state instance.

use std::sync::{Arc, Barrier};
use std::thread;

use pqc_runtime::{BuiltinModules, InitializerOptions, LibraryState};

fn initialized_state() -> Arc<LibraryState> {
    let mut state = LibraryState::new();
    state
        .initialize(&InitializerOptions::default(), &BuiltinModules)
        .unwrap();
    Arc::new(state)
}

#[test]
fn test_concurrent_default_resolution_converges() {
    let state = initialized_state();

    let handles: Vec<_> = (0..8)
        .map(|_| {
            let state = Arc::clone(&state);
            thread::spawn(move || state.get_allocator("").unwrap().unwrap())
        })
        .collect();

    let resolved: Vec<_> = handles
        .into_iter()
        .map(|handle| handle.join().unwrap())
        .collect();

    // Every thread observes the same resolved allocator
    for allocator in &resolved[1..] {
        assert!(Arc::ptr_eq(&resolved[0], allocator));
    }
    assert_eq!(resolved[0].name(), "locking");
}

#[test]
fn test_concurrent_named_lookups_and_config_reads() {
    let state = initialized_state();

    let handles: Vec<_> = (0..8)
        .map(|i| {
            let state = Arc::clone(&state);
            thread::spawn(move || {
                for _ in 0..100 {
                    if i % 2 == 0 {
                        assert!(state.get_allocator("malloc").unwrap().is_some());
                    } else {
                        assert_eq!(state.deref_alias("Kyber768").unwrap(), "ML-KEM-768");
                    }
                }
            })
        })
        .collect();

    for handle in handles {
        handle.join().unwrap();
    }
}

#[test]
fn test_invalidation_racing_resolution_is_never_lost() {
    // A resolution in flight while the configured name changes must not
    // commit the old name over the invalidation.
    for _ in 0..500 {
        let state = initialized_state();
        state.set_default_allocator("malloc").unwrap();

        let barrier = Arc::new(Barrier::new(2));

        let reader = {
            let state = Arc::clone(&state);
            let barrier = Arc::clone(&barrier);
            thread::spawn(move || {
                barrier.wait();
                let _ = state.get_allocator("").unwrap();
            })
        };
        let writer = {
            let state = Arc::clone(&state);
            let barrier = Arc::clone(&barrier);
            thread::spawn(move || {
                barrier.wait();
                state.set_default_allocator("locking").unwrap();
            })
        };

        reader.join().unwrap();
        writer.join().unwrap();

        // After the writer finished, the cache must serve its allocator
        let default = state.get_allocator("").unwrap().unwrap();
        assert_eq!(default.name(), "locking");
    }
}

#[test]
fn test_concurrent_config_writes_keep_overwrite_law() {
    let state = initialized_state();
    state.set("race", "key", "seed", true).unwrap();

    let handles: Vec<_> = (0..8)
        .map(|i| {
            let state = Arc::clone(&state);
            thread::spawn(move || {
                for _ in 0..100 {
                    state.set("race", "key", &format!("w{i}"), false).unwrap();
                }
            })
        })
        .collect();

    for handle in handles {
        handle.join().unwrap();
    }

    // Non-overwriting writes never clobber the seeded value
    assert_eq!(state.get("race", "key").unwrap(), "seed");
}
