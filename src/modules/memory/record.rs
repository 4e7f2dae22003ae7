use crate::modules::bounded::Score;
use crate::modules::emotion::Mood;
use crate::modules::personality::ProfileId;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MemoryCategory {
    Preference,
    Emotion,
    Event,
}

impl MemoryCategory {
    pub fn name(self) -> &'static str {
        match self {
            MemoryCategory::Preference => "preference",
            MemoryCategory::Emotion => "emotion",
            MemoryCategory::Event => "event",
        }
    }
}

impl fmt::Display for MemoryCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MemoryRecord {
    pub id: String,
    pub profile_id: ProfileId,
    pub content: String,
    pub category: MemoryCategory,
    pub emotional_weight: Score,
    #[serde(default)]
    pub access_count: u32,
    pub created_at: DateTime<Utc>,
    #[serde(default)]
    pub last_accessed: Option<DateTime<Utc>>,
}

impl MemoryRecord {
    pub fn new(
        profile_id: impl Into<ProfileId>,
        content: impl Into<String>,
        category: MemoryCategory,
        emotional_weight: u8,
    ) -> Self {
        Self {
            id: uuid::Uuid::new_v4().to_string(),
            profile_id: profile_id.into(),
            content: content.into(),
            category,
            emotional_weight: Score::clamped(emotional_weight as i64),
            access_count: 0,
            created_at: Utc::now(),
            last_accessed: None,
        }
    }

    pub fn created_at(mut self, created_at: DateTime<Utc>) -> Self {
        self.created_at = created_at;
        self
    }
}

/// One completed turn. Written once, never updated.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Interaction {
    pub id: String,
    pub profile_id: ProfileId,
    pub user_message: String,
    pub ai_response: String,
    pub mood_before: Mood,
    pub mood_after: Mood,
    pub energy_before: Score,
    pub energy_after: Score,
    pub response_time_ms: u64,
    pub created_at: DateTime<Utc>,
}
