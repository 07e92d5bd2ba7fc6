use std::collections::{HashMap, HashSet};

use super::key::CacheKey;

/// Identity of one mounted consumer, allocated by the client.
pub type ConsumerId = u64;

/// Tracks which consumers are currently observing each cache key.
///
/// Counts are derived from set sizes, so they can never go negative and a
/// duplicate unmount is a no-op.
#[derive(Debug, Default)]
pub(crate) struct SubscriptionTable {
    consumers: HashMap<CacheKey, HashSet<ConsumerId>>,
}

impl SubscriptionTable {
    /// Register a consumer; returns the new subscriber count for the key.
    pub fn mount(&mut self, key: &CacheKey, consumer: ConsumerId) -> usize {
        let set = self.consumers.entry(key.clone()).or_default();
        set.insert(consumer);
        set.len()
    }

    /// Remove a consumer; returns the remaining subscriber count.
    pub fn unmount(&mut self, key: &CacheKey, consumer: ConsumerId) -> usize {
        let Some(set) = self.consumers.get_mut(key) else {
            return 0;
        };
        set.remove(&consumer);
        let remaining = set.len();
        if remaining == 0 {
            self.consumers.remove(key);
        }
        remaining
    }

    pub fn count(&self, key: &CacheKey) -> usize {
        self.consumers.get(key).map_or(0, HashSet::len)
    }

    /// Drop all bookkeeping for an evicted key.
    pub fn forget(&mut self, key: &CacheKey) {
        self.consumers.remove(key);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::Value;

    fn key(name: &str) -> CacheKey {
        CacheKey::new(name, &Value::Null)
    }

    #[test]
    fn test_count_matches_active_subscriptions() {
        let mut table = SubscriptionTable::default();
        let k = key("getAllTeachers");

        assert_eq!(table.mount(&k, 1), 1);
        assert_eq!(table.mount(&k, 2), 2);
        assert_eq!(table.count(&k), 2);

        assert_eq!(table.unmount(&k, 1), 1);
        assert_eq!(table.unmount(&k, 2), 0);
        assert_eq!(table.count(&k), 0);
    }

    #[test]
    fn test_duplicate_unmount_is_noop() {
        let mut table = SubscriptionTable::default();
        let k = key("getAllTeachers");

        table.mount(&k, 7);
        assert_eq!(table.unmount(&k, 7), 0);
        assert_eq!(table.unmount(&k, 7), 0);
        assert_eq!(table.count(&k), 0);
    }

    #[test]
    fn test_keys_are_independent() {
        let mut table = SubscriptionTable::default();
        let a = key("getAllTeachers");
        let b = key("getSchedules");

        table.mount(&a, 1);
        table.mount(&b, 2);
        table.unmount(&a, 1);

        assert_eq!(table.count(&a), 0);
        assert_eq!(table.count(&b), 1);
    }
}
