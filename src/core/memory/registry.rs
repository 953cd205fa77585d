/*!
Registry of named allocators with a cached process default.

The registry owns every allocator registered with it. Lookup is by name;
registering a second allocator under an existing name shadows the first
for lookup, but both stay owned and both are destroyed at teardown.

The default allocator is resolved lazily from configuration and cached.
The cache distinguishes "not yet resolved" from "resolved to absent", so
a missing default is looked up at most once between invalidations.

Resolution reads the configured name outside the allocator lock, so the
cache carries a generation counter: every invalidation bumps it, and a
resolution only commits if the generation it observed at the cache miss
is still current. A resolution racing an invalidation is refused and
retried with the fresh configuration instead of caching a stale name.
*/

use std::collections::HashMap;
use std::sync::Arc;

use crate::core::memory::allocator::Allocator;

/// Named allocators plus the cached default; guarded by the runtime's
/// allocator lock
pub struct AllocatorRegistry {
    /// Every registered allocator, in registration order
    owned: Vec<Arc<dyn Allocator>>,

    /// Lookup map; last registration under a name wins
    by_name: HashMap<String, Arc<dyn Allocator>>,

    /// `None` = unresolved, `Some(None)` = resolved to absent
    cached_default: Option<Option<Arc<dyn Allocator>>>,

    /// Bumped on every invalidation; stale resolutions refuse to commit
    default_generation: u64,
}

impl AllocatorRegistry {
    /// Create an empty registry with an unresolved default
    pub fn new() -> Self {
        AllocatorRegistry {
            owned: Vec::new(),
            by_name: HashMap::new(),
            cached_default: None,
            default_generation: 0,
        }
    }

    /// Take ownership of `allocator` and make it visible under its name
    pub fn register(&mut self, allocator: Arc<dyn Allocator>) {
        self.by_name
            .insert(allocator.name().to_string(), Arc::clone(&allocator));
        self.owned.push(allocator);
    }

    /// Look up an allocator by name; absence is a normal outcome
    pub fn lookup(&self, name: &str) -> Option<Arc<dyn Allocator>> {
        self.by_name.get(name).cloned()
    }

    /// The cached default, or `None` if it has not been resolved yet
    pub fn cached_default(&self) -> Option<Option<Arc<dyn Allocator>>> {
        self.cached_default.clone()
    }

    /// Current generation of the cached default
    pub fn default_generation(&self) -> u64 {
        self.default_generation
    }

    /// Resolve the default to the allocator named `chosen` and cache the
    /// outcome, absent or not
    ///
    /// A concurrent earlier resolution wins and is returned as-is. If the
    /// cache was invalidated after `observed_generation` was read, the
    /// resolution is refused with `None`: `chosen` came from a stale read
    /// of configuration and the caller must re-read it and retry.
    pub fn resolve_default(
        &mut self,
        observed_generation: u64,
        chosen: &str,
    ) -> Option<Option<Arc<dyn Allocator>>> {
        if let Some(resolved) = &self.cached_default {
            return Some(resolved.clone());
        }
        if self.default_generation != observed_generation {
            return None;
        }
        let resolved = self.lookup(chosen);
        self.cached_default = Some(resolved.clone());
        Some(resolved)
    }

    /// Clear the cached default so the next lookup re-resolves it
    pub fn invalidate_default(&mut self) {
        self.cached_default = None;
        self.default_generation += 1;
    }

    /// Number of owned allocators
    pub fn len(&self) -> usize {
        self.owned.len()
    }

    /// Whether the registry owns no allocators
    pub fn is_empty(&self) -> bool {
        self.owned.is_empty()
    }

    /// Release every owned allocator to the caller for teardown
    pub fn take_owned(&mut self) -> Vec<Arc<dyn Allocator>> {
        self.by_name.clear();
        self.cached_default = None;
        std::mem::take(&mut self.owned)
    }
}

impl Default for AllocatorRegistry {
    fn default() -> Self {
        Self::new()
    }
}
