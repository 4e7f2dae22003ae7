use crate::modules::emotion::{EmotionalState, Mood, VoiceParams};
use crate::modules::memory::{Interaction, MemoryRecord};
use crate::modules::personality::{Profile, TraitVector};
use serde::{Deserialize, Serialize};

pub type UserId = String;

/// Everything one turn needs, passed by value; the engine keeps no reference
/// to it afterwards.
#[derive(Debug, Clone)]
pub struct TurnInput {
    pub profile: Profile,
    pub state: EmotionalState,
    pub memories: Vec<MemoryRecord>,
    pub history: Vec<Interaction>,
    pub message: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct TurnOutcome {
    pub response_text: String,
    pub new_state: EmotionalState,
    pub traits: TraitVector,
    pub voice: VoiceParams,
    /// False when the generator failed and `response_text` is a fallback.
    pub succeeded: bool,
    pub extracted: Vec<MemoryRecord>,
    pub interaction_id: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct StateSnapshot {
    pub mood: Mood,
    pub energy: u8,
    pub stress: u8,
    pub trust: u8,
}

impl From<&EmotionalState> for StateSnapshot {
    fn from(state: &EmotionalState) -> Self {
        Self {
            mood: state.mood,
            energy: state.energy.value(),
            stress: state.stress.value(),
            trust: state.trust.value(),
        }
    }
}

/// Messages pushed to a live session.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", content = "data", rename_all = "snake_case")]
pub enum SessionEvent {
    StateUpdate(StateSnapshot),
    Notification(serde_json::Value),
}

impl SessionEvent {
    pub fn to_json(&self) -> String {
        serde_json::to_string(self).unwrap_or_else(|_| "{}".to_string())
    }
}
