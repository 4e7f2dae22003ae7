pub mod state;
pub mod voice;

pub use state::{EmotionalState, Mood, StateUpdateEngine, INTERACTION_CONVERSATION};
pub use voice::{VoiceParams, VoiceProfileMapper};
