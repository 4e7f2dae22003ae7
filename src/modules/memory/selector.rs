use crate::config::MemoryConfig;
use crate::error::StoreResult;
use crate::modules::memory::record::MemoryRecord;
use crate::modules::memory::store::ProfileStore;
use crate::modules::personality::ProfileId;
use chrono::{Duration, Utc};
use std::collections::HashSet;
use tracing::debug;

pub struct MemorySelectionEngine {
    config: MemoryConfig,
}

impl MemorySelectionEngine {
    pub fn new(config: MemoryConfig) -> Self {
        Self { config }
    }

    /// Important memories first, then recent ones, without duplicates, cut to
    /// `limit`. Every returned memory has its access count bumped.
    pub async fn select(
        &self,
        store: &dyn ProfileStore,
        profile_id: &ProfileId,
        limit: usize,
    ) -> StoreResult<Vec<MemoryRecord>> {
        let important = store
            .important_memories(profile_id, self.config.important_threshold, self.config.important_limit)
            .await?;
        let recent = store.recent_memories(profile_id, self.config.recent_limit).await?;

        let selected = Self::merge(important, recent, limit);

        let now = Utc::now();
        for memory in &selected {
            store.mark_accessed(profile_id, &memory.id, now).await?;
        }

        debug!(profile_id = %profile_id, selected = selected.len(), "memories selected");

        Ok(selected)
    }

    pub async fn select_default(&self, store: &dyn ProfileStore, profile_id: &ProfileId) -> StoreResult<Vec<MemoryRecord>> {
        self.select(store, profile_id, self.config.context_limit).await
    }

    fn merge(important: Vec<MemoryRecord>, recent: Vec<MemoryRecord>, limit: usize) -> Vec<MemoryRecord> {
        let mut seen = HashSet::new();

        important
            .into_iter()
            .chain(recent)
            .filter(|memory| seen.insert(memory.id.clone()))
            .take(limit)
            .collect()
    }
}

impl Default for MemorySelectionEngine {
    fn default() -> Self {
        Self::new(MemoryConfig::default())
    }
}

/// Housekeeping that runs outside of conversation turns.
pub struct MemoryMaintenance {
    config: MemoryConfig,
}

impl MemoryMaintenance {
    pub fn new(config: MemoryConfig) -> Self {
        Self { config }
    }

    /// Drop old memories that never carried much emotional weight.
    pub async fn prune(&self, store: &dyn ProfileStore, profile_id: &ProfileId) -> StoreResult<usize> {
        let cutoff = Utc::now() - Duration::days(self.config.prune_after_days);
        let removed = store
            .prune_memories(profile_id, cutoff, self.config.prune_max_weight)
            .await?;

        debug!(profile_id = %profile_id, removed, "memories pruned");
        Ok(removed)
    }
}
