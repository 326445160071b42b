use dashmap::DashMap;
use std::hash::Hash;
use std::sync::Arc;
use tokio::sync::{Mutex, OwnedMutexGuard};

/// Per-key async exclusion. Holders of different keys never block each
/// other; holders of the same key are serialized in arrival order.
pub struct LockRegistry<K: Eq + Hash> {
    locks: DashMap<K, Arc<Mutex<()>>>,
}

impl<K: Eq + Hash + Clone> LockRegistry<K> {
    pub fn new() -> Self {
        LockRegistry {
            locks: DashMap::new(),
        }
    }

    pub async fn acquire(&self, key: K) -> OwnedMutexGuard<()> {
        // The map shard guard must be released before awaiting.
        let lock = self
            .locks
            .entry(key)
            .or_insert_with(|| Arc::new(Mutex::new(())))
            .clone();
        lock.lock_owned().await
    }
}

impl<K: Eq + Hash + Clone> Default for LockRegistry<K> {
    fn default() -> Self {
        Self::new()
    }
}
