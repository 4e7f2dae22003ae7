use crate::modules::bounded::Score;
use crate::modules::emotion::Mood;
use crate::modules::memory::record::{Interaction, MemoryCategory, MemoryRecord};
use crate::modules::personality::ProfileId;
use chrono::Utc;

pub struct MemoryTestHelpers;

impl MemoryTestHelpers {
    pub fn test_profile_id() -> ProfileId {
        format!("test-profile-{}", uuid::Uuid::new_v4())
    }

    pub fn record(profile_id: &ProfileId, content: &str, category: MemoryCategory, weight: u8) -> MemoryRecord {
        MemoryRecord::new(profile_id.clone(), content, category, weight)
    }

    pub fn interaction(profile_id: &ProfileId, user_message: &str) -> Interaction {
        Interaction {
            id: uuid::Uuid::new_v4().to_string(),
            profile_id: profile_id.clone(),
            user_message: user_message.to_string(),
            ai_response: format!("respuesta a {}", user_message),
            mood_before: Mood::Neutral,
            mood_after: Mood::Neutral,
            energy_before: Score::clamped(80),
            energy_after: Score::clamped(79),
            response_time_ms: 12,
            created_at: Utc::now(),
        }
    }
}
