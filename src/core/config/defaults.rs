/*!
Built-in configuration loaded during initialization.

Defaults are written without overwrite so values seeded before
initialization survive.
*/

use crate::core::config::{ConfigStore, OPTION_SECTION};

/// Aliases mapping draft-round algorithm names to their final FIPS names
const DEFAULT_ALIASES: &[(&str, &str)] = &[
    ("Kyber512", "ML-KEM-512"),
    ("Kyber768", "ML-KEM-768"),
    ("Kyber1024", "ML-KEM-1024"),
    ("Dilithium2", "ML-DSA-44"),
    ("Dilithium3", "ML-DSA-65"),
    ("Dilithium5", "ML-DSA-87"),
    ("SPHINCS+-SHA2-128s", "SLH-DSA-SHA2-128s"),
    ("SPHINCS+-SHA2-256s", "SLH-DSA-SHA2-256s"),
];

/// Load the built-in default entries into `config`
pub fn load_default_config(config: &mut ConfigStore) {
    config.set(OPTION_SECTION, "base/default_allocator", "locking", false);

    for (alias, target) in DEFAULT_ALIASES {
        config.add_alias(alias, target);
    }
}
