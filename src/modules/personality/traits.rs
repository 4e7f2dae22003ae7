use crate::modules::bounded::Score;
use serde::{Deserialize, Serialize};

pub type ProfileId = String;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TraitVector {
    pub extroversion: Score,
    pub curiosity: Score,
    pub empathy: Score,
    pub humor: Score,
    pub emotional_dependency: Score,
    pub formality: Score,
    /// Long-lived liveliness of the personality, distinct from the short-term
    /// energy of the emotional state.
    pub energy: Score,
}

impl TraitVector {
    pub fn uniform(value: i64) -> Self {
        let score = Score::clamped(value);
        Self {
            extroversion: score,
            curiosity: score,
            empathy: score,
            humor: score,
            emotional_dependency: score,
            formality: score,
            energy: score,
        }
    }

    pub fn named(&self) -> [(&'static str, Score); 7] {
        [
            ("extroversion", self.extroversion),
            ("curiosity", self.curiosity),
            ("empathy", self.empathy),
            ("humor", self.humor),
            ("emotional_dependency", self.emotional_dependency),
            ("formality", self.formality),
            ("energy", self.energy),
        ]
    }
}

impl Default for TraitVector {
    fn default() -> Self {
        Self::uniform(50)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Profile {
    pub id: ProfileId,
    pub user_id: String,
    pub traits: TraitVector,
    #[serde(default)]
    pub interaction_count: u64,
    /// Optimistic concurrency token owned by the store.
    #[serde(default)]
    pub version: u64,
}

impl Profile {
    pub fn new(user_id: impl Into<String>) -> Self {
        Self::new_with_id(uuid::Uuid::new_v4().to_string(), user_id)
    }

    pub fn new_with_id(id: impl Into<ProfileId>, user_id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            user_id: user_id.into(),
            traits: TraitVector::default(),
            interaction_count: 0,
            version: 0,
        }
    }

    pub fn with_traits(mut self, traits: TraitVector) -> Self {
        self.traits = traits;
        self
    }
}
