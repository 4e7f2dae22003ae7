use crate::error::{StoreError, StoreResult};
use crate::modules::emotion::EmotionalState;
use crate::modules::memory::record::{Interaction, MemoryRecord};
use crate::modules::personality::{Profile, ProfileId, TraitVector};
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;

/// Durable owner of profiles, emotional state, memories and interactions.
///
/// Profile traits and emotional state are written with the version the
/// caller read; a mismatch is reported as [`StoreError::Conflict`] and
/// nothing is written, so two concurrent turns cannot silently overwrite
/// each other.
#[async_trait]
pub trait ProfileStore: Send + Sync {
    async fn create_profile(&self, user_id: &str) -> StoreResult<(Profile, EmotionalState)>;

    async fn get_profile(&self, profile_id: &ProfileId) -> StoreResult<Profile>;

    async fn get_profile_by_user(&self, user_id: &str) -> StoreResult<Option<Profile>>;

    /// Returns the new version.
    async fn save_traits(&self, profile_id: &ProfileId, traits: TraitVector, expected_version: u64) -> StoreResult<u64>;

    async fn increment_interaction_count(&self, profile_id: &ProfileId) -> StoreResult<u64>;

    async fn get_state(&self, profile_id: &ProfileId) -> StoreResult<EmotionalState>;

    /// Returns the new version.
    async fn save_state(&self, profile_id: &ProfileId, state: &EmotionalState, expected_version: u64) -> StoreResult<u64>;

    async fn insert_memory(&self, record: MemoryRecord) -> StoreResult<()>;

    /// Memories with weight at or above `min_weight`, heaviest first, newest first on ties.
    async fn important_memories(&self, profile_id: &ProfileId, min_weight: u8, limit: usize) -> StoreResult<Vec<MemoryRecord>>;

    /// Newest first.
    async fn recent_memories(&self, profile_id: &ProfileId, limit: usize) -> StoreResult<Vec<MemoryRecord>>;

    async fn mark_accessed(&self, profile_id: &ProfileId, memory_id: &str, at: DateTime<Utc>) -> StoreResult<()>;

    /// Deletes memories created before `older_than` whose weight is below `max_weight`.
    async fn prune_memories(&self, profile_id: &ProfileId, older_than: DateTime<Utc>, max_weight: u8) -> StoreResult<usize>;

    async fn append_interaction(&self, interaction: Interaction) -> StoreResult<()>;

    /// The last `limit` interactions, oldest first.
    async fn recent_interactions(&self, profile_id: &ProfileId, limit: usize) -> StoreResult<Vec<Interaction>>;
}

#[derive(Default)]
struct StoreTables {
    profiles: HashMap<ProfileId, Profile>,
    states: HashMap<ProfileId, EmotionalState>,
    memories: HashMap<ProfileId, Vec<MemoryRecord>>,
    interactions: HashMap<ProfileId, Vec<Interaction>>,
}

impl StoreTables {
    fn profile_mut(&mut self, profile_id: &ProfileId) -> StoreResult<&mut Profile> {
        self.profiles.get_mut(profile_id).ok_or_else(|| not_found("profile", profile_id))
    }
}

fn not_found(kind: &'static str, id: &str) -> StoreError {
    StoreError::NotFound { kind, id: id.to_string() }
}

/// Process-local [`ProfileStore`], used by the CLI and the tests.
#[derive(Clone, Default)]
pub struct InMemoryProfileStore {
    tables: Arc<RwLock<StoreTables>>,
}

impl InMemoryProfileStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace every memory of `profile_id` with `records`, rejecting the
    /// whole batch if any record is malformed.
    pub async fn import_memories(&self, profile_id: &ProfileId, records: Vec<MemoryRecord>) -> StoreResult<()> {
        for (index, record) in records.iter().enumerate() {
            if record.id.is_empty() {
                return Err(StoreError::InvalidRecord(format!("Record at index {} has empty ID", index)));
            }
            if record.content.trim().is_empty() {
                return Err(StoreError::InvalidRecord(format!("Record {} has empty content", record.id)));
            }
            if &record.profile_id != profile_id {
                return Err(StoreError::InvalidRecord(format!(
                    "Record {} belongs to profile '{}', not '{}'",
                    record.id, record.profile_id, profile_id
                )));
            }
            if records[..index].iter().any(|other| other.id == record.id) {
                return Err(StoreError::InvalidRecord(format!("Duplicate record ID {}", record.id)));
            }
        }

        let mut tables = self.tables.write().await;
        if !tables.profiles.contains_key(profile_id) {
            return Err(not_found("profile", profile_id));
        }
        let memories = tables.memories.entry(profile_id.clone()).or_default();
        memories.clear();
        memories.extend(records);

        Ok(())
    }

    pub async fn memory_count(&self, profile_id: &ProfileId) -> usize {
        self.tables.read().await.memories.get(profile_id).map(|m| m.len()).unwrap_or(0)
    }

    pub async fn all_memories(&self, profile_id: &ProfileId) -> Vec<MemoryRecord> {
        self.tables.read().await.memories.get(profile_id).cloned().unwrap_or_default()
    }
}

#[async_trait]
impl ProfileStore for InMemoryProfileStore {
    async fn create_profile(&self, user_id: &str) -> StoreResult<(Profile, EmotionalState)> {
        let mut tables = self.tables.write().await;
        if tables.profiles.values().any(|p| p.user_id == user_id) {
            return Err(StoreError::InvalidRecord(format!("User '{}' already has a profile", user_id)));
        }

        let profile = Profile::new(user_id);
        let state = EmotionalState::default();
        tables.profiles.insert(profile.id.clone(), profile.clone());
        tables.states.insert(profile.id.clone(), state.clone());

        Ok((profile, state))
    }

    async fn get_profile(&self, profile_id: &ProfileId) -> StoreResult<Profile> {
        self.tables
            .read()
            .await
            .profiles
            .get(profile_id)
            .cloned()
            .ok_or_else(|| not_found("profile", profile_id))
    }

    async fn get_profile_by_user(&self, user_id: &str) -> StoreResult<Option<Profile>> {
        Ok(self.tables.read().await.profiles.values().find(|p| p.user_id == user_id).cloned())
    }

    async fn save_traits(&self, profile_id: &ProfileId, traits: TraitVector, expected_version: u64) -> StoreResult<u64> {
        let mut tables = self.tables.write().await;
        let profile = tables.profile_mut(profile_id)?;

        if profile.version != expected_version {
            return Err(StoreError::Conflict {
                kind: "profile",
                id: profile_id.clone(),
                expected: expected_version,
                actual: profile.version,
            });
        }

        profile.traits = traits;
        profile.version += 1;
        Ok(profile.version)
    }

    async fn increment_interaction_count(&self, profile_id: &ProfileId) -> StoreResult<u64> {
        let mut tables = self.tables.write().await;
        let profile = tables.profile_mut(profile_id)?;
        profile.interaction_count += 1;
        Ok(profile.interaction_count)
    }

    async fn get_state(&self, profile_id: &ProfileId) -> StoreResult<EmotionalState> {
        self.tables
            .read()
            .await
            .states
            .get(profile_id)
            .cloned()
            .ok_or_else(|| not_found("state", profile_id))
    }

    async fn save_state(&self, profile_id: &ProfileId, state: &EmotionalState, expected_version: u64) -> StoreResult<u64> {
        let mut tables = self.tables.write().await;
        let current = tables.states.get_mut(profile_id).ok_or_else(|| not_found("state", profile_id))?;

        if current.version != expected_version {
            return Err(StoreError::Conflict {
                kind: "state",
                id: profile_id.clone(),
                expected: expected_version,
                actual: current.version,
            });
        }

        let mut next = state.clone();
        next.version = expected_version + 1;
        *current = next;
        Ok(expected_version + 1)
    }

    async fn insert_memory(&self, record: MemoryRecord) -> StoreResult<()> {
        let mut tables = self.tables.write().await;
        if !tables.profiles.contains_key(&record.profile_id) {
            return Err(not_found("profile", &record.profile_id));
        }
        tables.memories.entry(record.profile_id.clone()).or_default().push(record);
        Ok(())
    }

    async fn important_memories(&self, profile_id: &ProfileId, min_weight: u8, limit: usize) -> StoreResult<Vec<MemoryRecord>> {
        let tables = self.tables.read().await;
        let mut important: Vec<MemoryRecord> = tables
            .memories
            .get(profile_id)
            .map(|memories| {
                memories
                    .iter()
                    .rev()
                    .filter(|m| m.emotional_weight.value() >= min_weight)
                    .cloned()
                    .collect()
            })
            .unwrap_or_default();

        important.sort_by(|a, b| {
            b.emotional_weight
                .cmp(&a.emotional_weight)
                .then_with(|| b.created_at.cmp(&a.created_at))
        });
        important.truncate(limit);
        Ok(important)
    }

    async fn recent_memories(&self, profile_id: &ProfileId, limit: usize) -> StoreResult<Vec<MemoryRecord>> {
        let tables = self.tables.read().await;
        let mut recent: Vec<MemoryRecord> = tables
            .memories
            .get(profile_id)
            .map(|memories| memories.iter().rev().cloned().collect())
            .unwrap_or_default();

        recent.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        recent.truncate(limit);
        Ok(recent)
    }

    async fn mark_accessed(&self, profile_id: &ProfileId, memory_id: &str, at: DateTime<Utc>) -> StoreResult<()> {
        let mut tables = self.tables.write().await;
        let record = tables
            .memories
            .get_mut(profile_id)
            .and_then(|memories| memories.iter_mut().find(|m| m.id == memory_id))
            .ok_or_else(|| not_found("memory", memory_id))?;

        record.access_count = record.access_count.saturating_add(1);
        record.last_accessed = Some(at);
        Ok(())
    }

    async fn prune_memories(&self, profile_id: &ProfileId, older_than: DateTime<Utc>, max_weight: u8) -> StoreResult<usize> {
        let mut tables = self.tables.write().await;
        let Some(memories) = tables.memories.get_mut(profile_id) else {
            return Ok(0);
        };

        let before = memories.len();
        memories.retain(|m| m.created_at >= older_than || m.emotional_weight.value() >= max_weight);
        Ok(before - memories.len())
    }

    async fn append_interaction(&self, interaction: Interaction) -> StoreResult<()> {
        let mut tables = self.tables.write().await;
        if !tables.profiles.contains_key(&interaction.profile_id) {
            return Err(not_found("profile", &interaction.profile_id));
        }
        tables.interactions.entry(interaction.profile_id.clone()).or_default().push(interaction);
        Ok(())
    }

    async fn recent_interactions(&self, profile_id: &ProfileId, limit: usize) -> StoreResult<Vec<Interaction>> {
        let tables = self.tables.read().await;
        let interactions = tables.interactions.get(profile_id).map(Vec::as_slice).unwrap_or(&[]);
        let start = interactions.len().saturating_sub(limit);
        Ok(interactions[start..].to_vec())
    }
}
