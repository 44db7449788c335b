//! Best score across runs
//!
//! Persisted as a decimal string under a single key.

use crate::persistence::PersistentStore;

/// Persisted best score
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct BestScore {
    pub value: u64,
}

impl BestScore {
    /// Storage key
    pub const STORAGE_KEY: &'static str = "drift_runner_best";

    /// Read from the store; absent or malformed values count as 0
    pub fn load(store: &dyn PersistentStore) -> Self {
        let value = match store.get(Self::STORAGE_KEY) {
            Some(raw) => raw.trim().parse::<u64>().unwrap_or_else(|_| {
                log::warn!("Ignoring malformed best score {:?}", raw);
                0
            }),
            None => 0,
        };
        log::info!("Best score: {}", value);
        Self { value }
    }

    /// Whether `score` beats the current best
    pub fn qualifies(&self, score: u64) -> bool {
        score > self.value
    }

    /// Take `score` if it's a new best and write it through.
    /// Returns true when the best changed.
    pub fn record(&mut self, score: u64, store: &mut dyn PersistentStore) -> bool {
        if !self.qualifies(score) {
            return false;
        }
        self.value = score;
        if let Err(e) = store.set(Self::STORAGE_KEY, &score.to_string()) {
            log::warn!("Could not persist best score {}: {}", score, e);
        }
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::persistence::MemoryStore;
    use proptest::prelude::*;

    #[test]
    fn test_load_absent_is_zero() {
        let store = MemoryStore::new();
        assert_eq!(BestScore::load(&store).value, 0);
    }

    #[test]
    fn test_load_malformed_is_zero() {
        let mut store = MemoryStore::new();
        store.set(BestScore::STORAGE_KEY, "lots").ok();
        assert_eq!(BestScore::load(&store).value, 0);
        store.set(BestScore::STORAGE_KEY, "-4").ok();
        assert_eq!(BestScore::load(&store).value, 0);
    }

    #[test]
    fn test_record_persists_decimal() {
        let mut store = MemoryStore::new();
        let mut best = BestScore::load(&store);
        assert!(best.record(1234, &mut store));
        assert_eq!(store.get(BestScore::STORAGE_KEY).as_deref(), Some("1234"));
        assert!(!best.record(1000, &mut store));
        assert_eq!(BestScore::load(&store).value, 1234);
    }

    proptest! {
        #[test]
        fn best_never_decreases(scores in prop::collection::vec(0u64..100_000, 0..50)) {
            let mut store = MemoryStore::new();
            let mut best = BestScore::default();
            let mut previous = 0;
            for score in scores {
                best.record(score, &mut store);
                prop_assert!(best.value >= previous);
                prop_assert!(best.value >= score);
                previous = best.value;
            }
        }
    }
}
