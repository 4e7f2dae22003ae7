use crate::modules::emotion::state::{EmotionalState, Mood};
use crate::modules::personality::Profile;
use serde::{Deserialize, Serialize};

pub const BASE_RATE: f32 = 1.0;
pub const BASE_PITCH: f32 = 1.0;

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct VoiceParams {
    pub rate: f32,
    pub pitch: f32,
}

impl VoiceParams {
    pub fn new(rate: f32, pitch: f32) -> Self {
        Self { rate, pitch }
    }

    pub fn values(&self) -> (f32, f32) {
        (self.rate, self.pitch)
    }
}

impl Default for VoiceParams {
    fn default() -> Self {
        Self::new(BASE_RATE, BASE_PITCH)
    }
}

pub struct VoiceProfileMapper;

impl VoiceProfileMapper {
    /// Speech delivery for the current state. Energy picks the rate first,
    /// then the mood overrides whatever it touches.
    pub fn map_voice(state: &EmotionalState, _profile: &Profile) -> VoiceParams {
        let mut voice = VoiceParams::default();

        if state.energy.is_above(80) {
            voice.rate = 1.2;
        } else if state.energy.is_below(30) {
            voice.rate = 0.8;
        }

        match state.mood {
            Mood::Happy | Mood::Excited => {
                voice.pitch = 1.1;
                voice.rate = 1.1;
            }
            Mood::Sad => {
                voice.pitch = 0.9;
                voice.rate = 0.85;
            }
            Mood::Tired => voice.rate = 0.8,
            Mood::Anxious => voice.rate = 1.15,
            Mood::Curious | Mood::Neutral | Mood::Playful => {}
        }

        voice
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn voice_for(mood: Mood, energy: i64) -> VoiceParams {
        let state = EmotionalState::new(mood, energy, 20, 50);
        VoiceProfileMapper::map_voice(&state, &Profile::new("user-1"))
    }

    #[test]
    fn test_energy_sets_rate() {
        assert_eq!(voice_for(Mood::Neutral, 90).values(), (1.2, 1.0));
        assert_eq!(voice_for(Mood::Neutral, 20).values(), (0.8, 1.0));
        assert_eq!(voice_for(Mood::Neutral, 80).values(), (1.0, 1.0));
        assert_eq!(voice_for(Mood::Neutral, 30).values(), (1.0, 1.0));
    }

    #[test]
    fn test_mood_overrides_energy() {
        assert_eq!(voice_for(Mood::Happy, 95).values(), (1.1, 1.1));
        assert_eq!(voice_for(Mood::Excited, 10).values(), (1.1, 1.1));
        assert_eq!(voice_for(Mood::Sad, 90).values(), (0.85, 0.9));
        assert_eq!(voice_for(Mood::Tired, 90).values(), (0.8, 1.0));
        assert_eq!(voice_for(Mood::Anxious, 10).values(), (1.15, 1.0));
    }

    #[test]
    fn test_curious_keeps_energy_rate() {
        assert_eq!(voice_for(Mood::Curious, 85).values(), (1.2, 1.0));
        assert_eq!(voice_for(Mood::Playful, 50).values(), (1.0, 1.0));
    }
}
