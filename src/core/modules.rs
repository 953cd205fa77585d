/*!
Pluggable module sets for the PQC runtime.

A [`Modules`] implementation supplies every resource the runtime state
registers at initialization: the mutex strategy, the allocators, the
preferred default-allocator name, the engines, and optionally a self-test
battery. [`BuiltinModules`] is the set the library ships with and the one
used when the global state is constructed lazily.
*/

use crate::core::engine::{Engine, SoftwareEngine};
use crate::core::memory::{Allocator, LockingAllocator, MallocAllocator};
use crate::core::mutex::{MutexFactory, SingleThreadedMutexFactory, SystemMutexFactory};
use crate::core::security::{KnownAnswerTests, SelfTestRunner};

/// Supplier of the runtime's pluggable resources
pub trait Modules {
    /// Mutex strategy for the requested threading model; `None` means no
    /// usable strategy is available
    fn mutex_factory(&self, thread_safe: bool) -> Option<Box<dyn MutexFactory>>;

    /// Allocators to register, in registration order
    fn allocators(&self, mutex_factory: &dyn MutexFactory) -> Vec<Box<dyn Allocator>>;

    /// Preferred default-allocator name; empty keeps the built-in fallback
    fn default_allocator(&self) -> String;

    /// Engines to register with the algorithm factory, in order
    fn engines(&self) -> Vec<Box<dyn Engine>>;

    /// Self-test battery; `None` disables the gate entirely
    fn self_test(&self) -> Option<Box<dyn SelfTestRunner>> {
        None
    }
}

/// The module set the library ships with
#[derive(Debug, Default)]
pub struct BuiltinModules;

impl Modules for BuiltinModules {
    fn mutex_factory(&self, thread_safe: bool) -> Option<Box<dyn MutexFactory>> {
        if thread_safe {
            Some(Box::new(SystemMutexFactory))
        } else {
            Some(Box::new(SingleThreadedMutexFactory))
        }
    }

    fn allocators(&self, mutex_factory: &dyn MutexFactory) -> Vec<Box<dyn Allocator>> {
        vec![
            Box::new(MallocAllocator),
            Box::new(LockingAllocator::new(mutex_factory)),
        ]
    }

    fn default_allocator(&self) -> String {
        "locking".to_string()
    }

    fn engines(&self) -> Vec<Box<dyn Engine>> {
        vec![Box::new(SoftwareEngine)]
    }

    fn self_test(&self) -> Option<Box<dyn SelfTestRunner>> {
        Some(Box::new(KnownAnswerTests))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builtin_modules_supply_both_strategies() {
        assert!(BuiltinModules.mutex_factory(true).is_some());
        assert!(BuiltinModules.mutex_factory(false).is_some());
    }

    #[test]
    fn test_builtin_allocator_order() {
        let factory = SystemMutexFactory;
        let allocators = BuiltinModules.allocators(&factory);

        let names: Vec<&str> = allocators.iter().map(|a| a.name()).collect();
        assert_eq!(names, vec!["malloc", "locking"]);
    }

    #[test]
    fn test_builtin_default_is_registered() {
        let factory = SystemMutexFactory;
        let default = BuiltinModules.default_allocator();
        let registered = BuiltinModules
            .allocators(&factory)
            .iter()
            .any(|a| a.name() == default);
        assert!(registered);
    }

    #[test]
    fn test_builtin_self_test_present_and_passing() {
        let runner = BuiltinModules.self_test().unwrap();
        assert!(runner.passes_self_tests());
    }
}
