//! Store configuration.
//!
//! The only tunable is the seed of the store's random source, which drives the
//! `Random` combinator. Seeded stores produce reproducible merges.

use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use serde::{Deserialize, Serialize};

/// Configuration for an [`AttributeStore`](crate::AttributeStore).
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct StoreConfig {
    /// Seed for the random source. `None` seeds from OS entropy.
    pub random_seed: Option<u64>,
}

impl StoreConfig {
    /// Environment variable read by [`from_env`](Self::from_env).
    pub const SEED_ENV: &'static str = "GRAPHATTR_RANDOM_SEED";

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.random_seed = Some(seed);
        self
    }

    /// Reads configuration from environment variables:
    /// - `GRAPHATTR_RANDOM_SEED`: decimal `u64` seed (default: unseeded)
    pub fn from_env() -> Self {
        let random_seed = match std::env::var(Self::SEED_ENV) {
            Ok(raw) => match raw.trim().parse::<u64>() {
                Ok(seed) => Some(seed),
                Err(_) => {
                    tracing::warn!(
                        "ignoring unparsable {}={:?}, using an unseeded random source",
                        Self::SEED_ENV,
                        raw
                    );
                    None
                }
            },
            Err(_) => None,
        };
        StoreConfig { random_seed }
    }

    pub(crate) fn rng(&self) -> ChaCha8Rng {
        match self.random_seed {
            Some(seed) => ChaCha8Rng::seed_from_u64(seed),
            None => ChaCha8Rng::from_entropy(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::Rng;

    #[test]
    fn default_is_unseeded() {
        assert_eq!(StoreConfig::default().random_seed, None);
    }

    #[test]
    fn same_seed_same_stream() {
        let config = StoreConfig::default().with_seed(99);
        let a: u64 = config.rng().gen();
        let b: u64 = config.rng().gen();
        assert_eq!(a, b);
    }

    #[test]
    fn from_env_parses_seed_and_ignores_garbage() {
        std::env::set_var(StoreConfig::SEED_ENV, " 1234 ");
        assert_eq!(StoreConfig::from_env().random_seed, Some(1234));
        std::env::set_var(StoreConfig::SEED_ENV, "not-a-number");
        assert_eq!(StoreConfig::from_env().random_seed, None);
        std::env::remove_var(StoreConfig::SEED_ENV);
        assert_eq!(StoreConfig::from_env().random_seed, None);
    }
}
