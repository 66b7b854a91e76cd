//! Session-lifetime working copy of the user stats
//!
//! The cache loads the durable record exactly once per session and hands
//! out the single mutable working copy. Every mutation is persisted by the
//! caller immediately afterwards (write-through); a failed persist leaves
//! the working copy authoritative for the rest of the session.

use crate::db::StatsStore;
use crate::error::Result;
use crate::models::UserStats;

#[derive(Default)]
pub struct SessionCache {
    stats: Option<UserStats>,
}

impl SessionCache {
    pub fn new() -> Self {
        Self { stats: None }
    }

    /// The session's working copy, loading from the store on first access
    pub fn stats(&mut self, store: &StatsStore) -> Result<&mut UserStats> {
        match self.stats {
            Some(ref mut stats) => Ok(stats),
            ref mut slot => Ok(slot.insert(store.load()?)),
        }
    }

    /// Whether the durable record has been loaded this session
    pub fn is_loaded(&self) -> bool {
        self.stats.is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn store() -> StatsStore {
        let store = StatsStore::open_in_memory().unwrap();
        store.init_schema().unwrap();
        store
    }

    #[test]
    fn test_loads_once_and_keeps_working_copy() {
        let store = store();
        let mut cache = SessionCache::new();
        assert!(!cache.is_loaded());

        cache.stats(&store).unwrap().stocks_analyzed = 9;
        assert!(cache.is_loaded());

        // Second access must not reload from the store
        assert_eq!(cache.stats(&store).unwrap().stocks_analyzed, 9);
    }

    #[test]
    fn test_in_memory_copy_survives_store_divergence() {
        let store = store();
        let mut cache = SessionCache::new();
        cache.stats(&store).unwrap().app_opens = 3;

        // The durable copy still has the seed row; the session copy wins
        assert_eq!(store.load().unwrap().app_opens, 0);
        assert_eq!(cache.stats(&store).unwrap().app_opens, 3);
    }
}
