/*!
Engine registration for the PQC runtime.

An [`Engine`] is a pluggable provider of cryptographic-primitive
implementations. Engines are registered into the [`AlgorithmFactory`]
during initialization; every primitive lookup the library performs goes
through the factory, so nothing is resolvable before the runtime state
has finished initializing.
*/

/// A pluggable provider of cryptographic-primitive implementations
pub trait Engine: Send + Sync {
    /// Provider name
    fn name(&self) -> &str;

    /// Whether this engine supplies an implementation of `algo`
    fn provides(&self, algo: &str) -> bool;
}

/// Registry of engines backing cryptographic-primitive lookups
#[derive(Default)]
pub struct AlgorithmFactory {
    engines: Vec<Box<dyn Engine>>,
}

impl AlgorithmFactory {
    /// Create a factory with no engines
    pub fn new() -> Self {
        AlgorithmFactory {
            engines: Vec::new(),
        }
    }

    /// Register an engine; earlier registrations take precedence in lookup
    pub fn add_engine(&mut self, engine: Box<dyn Engine>) {
        self.engines.push(engine);
    }

    /// Number of registered engines
    pub fn engine_count(&self) -> usize {
        self.engines.len()
    }

    /// Names of the registered engines, in registration order
    pub fn engine_names(&self) -> Vec<String> {
        self.engines
            .iter()
            .map(|engine| engine.name().to_string())
            .collect()
    }

    /// First registered engine providing `algo`, if any
    pub fn provider_of(&self, algo: &str) -> Option<&dyn Engine> {
        self.engines
            .iter()
            .find(|engine| engine.provides(algo))
            .map(|engine| &**engine)
    }
}

/// Algorithms the built-in software engine provides
const SOFTWARE_ALGORITHMS: &[&str] = &[
    "ML-KEM-512",
    "ML-KEM-768",
    "ML-KEM-1024",
    "ML-DSA-44",
    "ML-DSA-65",
    "ML-DSA-87",
    "SHA-256",
    "SHA-512",
    "ChaCha20Poly1305",
];

/// Pure-software provider of the library's built-in primitives
#[derive(Debug, Default)]
pub struct SoftwareEngine;

impl Engine for SoftwareEngine {
    fn name(&self) -> &str {
        "software"
    }

    fn provides(&self, algo: &str) -> bool {
        SOFTWARE_ALGORITHMS.contains(&algo)
    }
}
