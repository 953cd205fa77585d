/*!
Runtime state for the PQC library.

[`LibraryState`] owns the mutex factory, the named allocator registry,
the configuration store, and the algorithm factory. It is constructed
uninitialized; [`LibraryState::initialize`] runs at most once per
instance and installs every shared resource, gated on self-tests when
FIPS or explicit self-test mode was requested.

The allocator registry and the configuration store each sit behind their
own lock built from the installed mutex factory. No operation holds both
locks at once.
*/

use std::sync::Arc;

use log::{debug, warn};

use crate::core::config::{defaults, ConfigStore, OPTION_SECTION};
use crate::core::engine::AlgorithmFactory;
use crate::core::error::{invalid_state_err, self_test_err, Error, Result};
use crate::core::memory::{Allocator, AllocatorRegistry, FALLBACK_ALLOCATOR};
use crate::core::modules::Modules;
use crate::core::mutex::{new_lock, MutexFactory, RuntimeMutex};
use crate::core::options::InitializerOptions;

// Process-wide accessors
pub mod global;

pub use global::{
    global_state, set_global_state, swap_global_state, take_global_state, RuntimeInitializer,
};

/// Configuration key naming the default allocator
const DEFAULT_ALLOCATOR_KEY: &str = "base/default_allocator";

/// Shared state of the PQC library
///
/// All accessors other than [`initialize`](Self::initialize) take `&self`
/// and are safe to call from concurrent threads once the instance is
/// initialized. Before initialization they fail with
/// [`Error::InvalidState`].
pub struct LibraryState {
    mutex_factory: Option<Box<dyn MutexFactory>>,
    allocators: Option<RuntimeMutex<AllocatorRegistry>>,
    config: Option<RuntimeMutex<ConfigStore>>,
    algorithm_factory: Option<AlgorithmFactory>,
}

impl LibraryState {
    /// Construct an uninitialized state
    pub fn new() -> Self {
        LibraryState {
            mutex_factory: None,
            allocators: None,
            config: None,
            algorithm_factory: None,
        }
    }

    /// Install the resources supplied by `modules`
    ///
    /// Runs at most once per instance; a second call fails with
    /// [`Error::InvalidState`]. If the requested self-test gate fails the
    /// instance is left unusable and must be discarded; no rollback is
    /// attempted.
    pub fn initialize(&mut self, options: &InitializerOptions, modules: &dyn Modules) -> Result<()> {
        if self.mutex_factory.is_some() {
            return invalid_state_err("runtime state has already been initialized");
        }

        let mutex_factory = modules
            .mutex_factory(options.is_thread_safe())
            .ok_or_else(|| {
                Error::InvalidState("no mutex strategy available at initialization".to_string())
            })?;

        debug!(
            "initializing runtime state (thread_safe={}, fips_mode={}, self_test={})",
            options.is_thread_safe(),
            options.is_fips_mode(),
            options.self_test_requested()
        );

        self.allocators = Some(new_lock(&*mutex_factory, AllocatorRegistry::new()));
        self.config = Some(new_lock(&*mutex_factory, ConfigStore::new()));

        let module_allocators = modules.allocators(&*mutex_factory);
        self.mutex_factory = Some(mutex_factory);

        for allocator in module_allocators {
            self.add_allocator(allocator)?;
        }
        self.set_default_allocator(&modules.default_allocator())?;

        defaults::load_default_config(&mut self.config_store()?.lock());

        let mut algorithm_factory = AlgorithmFactory::new();
        for engine in modules.engines() {
            debug!("registering engine '{}'", engine.name());
            algorithm_factory.add_engine(engine);
        }
        self.algorithm_factory = Some(algorithm_factory);

        if options.requires_self_tests() {
            match modules.self_test() {
                Some(runner) => {
                    if !runner.passes_self_tests() {
                        // Leave no live registry behind a failed gate
                        self.algorithm_factory = None;
                        return self_test_err("initialization self-tests");
                    }
                    debug!("initialization self-tests passed");
                }
                None => debug!("no self-test battery present, gate skipped"),
            }
        }

        Ok(())
    }

    /// A new, independently owned mutex from the installed factory
    pub fn get_mutex(&self) -> Result<RuntimeMutex<()>> {
        match &self.mutex_factory {
            Some(factory) => Ok(factory.make()),
            None => invalid_state_err("mutex factory requested before initialization"),
        }
    }

    fn allocator_registry(&self) -> Result<&RuntimeMutex<AllocatorRegistry>> {
        self.allocators.as_ref().ok_or_else(|| {
            Error::InvalidState("allocator registry unavailable before initialization".to_string())
        })
    }

    fn config_store(&self) -> Result<&RuntimeMutex<ConfigStore>> {
        self.config.as_ref().ok_or_else(|| {
            Error::InvalidState("configuration unavailable before initialization".to_string())
        })
    }

    /// Look up an allocator by name, or resolve the cached default when
    /// `name` is empty
    ///
    /// Absence is a normal outcome: an unknown name, and a default that
    /// names an unregistered allocator, both yield `Ok(None)`.
    pub fn get_allocator(&self, name: &str) -> Result<Option<Arc<dyn Allocator>>> {
        let registry = self.allocator_registry()?;

        if !name.is_empty() {
            return Ok(registry.lock().lookup(name));
        }

        // The configured name is read without holding the allocator lock,
        // so the resolution only commits if the cache generation observed
        // at the miss is still current; otherwise the name is re-read.
        loop {
            let (generation, cached) = {
                let registry = registry.lock();
                (registry.default_generation(), registry.cached_default())
            };
            if let Some(resolved) = cached {
                return Ok(resolved);
            }

            let mut chosen = self.option(DEFAULT_ALLOCATOR_KEY)?;
            if chosen.is_empty() {
                chosen = FALLBACK_ALLOCATOR.to_string();
            }

            if let Some(resolved) = registry.lock().resolve_default(generation, &chosen) {
                if resolved.is_none() {
                    warn!("default allocator '{chosen}' is not registered");
                }
                return Ok(resolved);
            }
        }
    }

    /// Register `allocator`: run its `init`, then own it and make it
    /// visible under its name
    pub fn add_allocator(&self, allocator: Box<dyn Allocator>) -> Result<()> {
        let registry = self.allocator_registry()?;
        let allocator: Arc<dyn Allocator> = Arc::from(allocator);

        let mut registry = registry.lock();
        allocator.init()?;
        registry.register(allocator);
        Ok(())
    }

    /// Configure the default allocator and invalidate the cached one
    ///
    /// A no-op when `name` is empty.
    pub fn set_default_allocator(&self, name: &str) -> Result<()> {
        if name.is_empty() {
            return Ok(());
        }

        self.set_option(DEFAULT_ALLOCATOR_KEY, name)?;
        self.allocator_registry()?.lock().invalidate_default();
        Ok(())
    }

    /// Configuration value for `section`/`key`, or empty if absent
    pub fn get(&self, section: &str, key: &str) -> Result<String> {
        Ok(self.config_store()?.lock().get(section, key))
    }

    /// Whether a configuration entry exists, empty-valued or not
    pub fn is_set(&self, section: &str, key: &str) -> Result<bool> {
        Ok(self.config_store()?.lock().is_set(section, key))
    }

    /// Store a configuration value; see [`ConfigStore::set`] for the
    /// overwrite semantics
    pub fn set(&self, section: &str, key: &str, value: &str, overwrite: bool) -> Result<()> {
        self.config_store()?.lock().set(section, key, value, overwrite);
        Ok(())
    }

    /// Record that `key` is an alias for `value`
    pub fn add_alias(&self, key: &str, value: &str) -> Result<()> {
        self.config_store()?.lock().add_alias(key, value);
        Ok(())
    }

    /// Follow alias indirections from `key` to a non-aliased name
    pub fn deref_alias(&self, key: &str) -> Result<String> {
        self.config_store()?.lock().deref_alias(key)
    }

    /// Set a library option under the `conf` section
    pub fn set_option(&self, key: &str, value: &str) -> Result<()> {
        self.set(OPTION_SECTION, key, value, true)
    }

    /// Get a library option, or empty if unset
    pub fn option(&self, key: &str) -> Result<String> {
        self.get(OPTION_SECTION, key)
    }

    /// The algorithm factory, the single gate for primitive lookups
    ///
    /// Fails with [`Error::InvalidState`] until initialization has
    /// completed, including after a failed self-test gate.
    pub fn algo_factory(&self) -> Result<&AlgorithmFactory> {
        self.algorithm_factory.as_ref().ok_or_else(|| {
            Error::InvalidState("algorithm factory accessed before initialization".to_string())
        })
    }

    /// Mutable access to the algorithm factory, for registering engines
    /// after initialization on an exclusively held instance
    pub fn algo_factory_mut(&mut self) -> Result<&mut AlgorithmFactory> {
        self.algorithm_factory.as_mut().ok_or_else(|| {
            Error::InvalidState("algorithm factory accessed before initialization".to_string())
        })
    }
}

impl Default for LibraryState {
    fn default() -> Self {
        Self::new()
    }
}

impl Drop for LibraryState {
    fn drop(&mut self) {
        // Engines may reference allocators, so the factory goes first
        self.algorithm_factory = None;

        if let Some(registry) = self.allocators.take() {
            for allocator in registry.into_inner().take_owned() {
                allocator.destroy();
            }
        }
    }
}
