//! Short-term emotional state and its per-turn transition rules.
//!
//! The state is a single current value per profile. Each user message moves
//! trust/stress by sentiment, spends energy, and may relabel the mood; the
//! question rule runs after the sentiment rule and wins on overlap.

use crate::modules::bounded::Score;
use crate::utils::contains_any;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use tracing::debug;

pub const INTERACTION_CONVERSATION: &str = "conversation";

const POSITIVE_WORDS: &[&str] = &["gracias", "genial", "excelente", "perfecto", "bien", "feliz"];
const NEGATIVE_WORDS: &[&str] = &["malo", "terrible", "horrible", "triste", "enojado"];
const QUESTION_WORDS: &[&str] = &["qué", "cómo", "por qué", "cuándo", "dónde"];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Mood {
    Happy,
    Sad,
    Curious,
    Neutral,
    Excited,
    Tired,
    Anxious,
    Playful,
}

impl Mood {
    pub const ALL: [Mood; 8] = [
        Mood::Happy,
        Mood::Sad,
        Mood::Curious,
        Mood::Neutral,
        Mood::Excited,
        Mood::Tired,
        Mood::Anxious,
        Mood::Playful,
    ];

    pub fn name(self) -> &'static str {
        match self {
            Mood::Happy => "happy",
            Mood::Sad => "sad",
            Mood::Curious => "curious",
            Mood::Neutral => "neutral",
            Mood::Excited => "excited",
            Mood::Tired => "tired",
            Mood::Anxious => "anxious",
            Mood::Playful => "playful",
        }
    }

    /// Phrase used in the prompt to tell the generator how the companion feels.
    pub fn description(self) -> &'static str {
        match self {
            Mood::Happy => "feliz y animado",
            Mood::Sad => "un poco triste",
            Mood::Curious => "curioso e inquisitivo",
            Mood::Neutral => "neutral y tranquilo",
            Mood::Excited => "emocionado",
            Mood::Tired => "cansado",
            Mood::Anxious => "algo ansioso",
            Mood::Playful => "juguetón",
        }
    }
}

impl Default for Mood {
    fn default() -> Self {
        Mood::Neutral
    }
}

impl fmt::Display for Mood {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Mood {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Mood::ALL
            .iter()
            .copied()
            .find(|mood| mood.name() == s.trim().to_lowercase())
            .ok_or_else(|| format!("Unknown mood '{}'", s))
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EmotionalState {
    pub mood: Mood,
    pub energy: Score,
    pub stress: Score,
    pub trust: Score,
    pub consecutive_ignored: u32,
    pub last_interaction_type: String,
    pub last_interaction_time: Option<DateTime<Utc>>,
    /// Optimistic concurrency token owned by the store.
    #[serde(default)]
    pub version: u64,
}

impl EmotionalState {
    pub fn new(mood: Mood, energy: i64, stress: i64, trust: i64) -> Self {
        Self {
            mood,
            energy: Score::clamped(energy),
            stress: Score::clamped(stress),
            trust: Score::clamped(trust),
            consecutive_ignored: 0,
            last_interaction_type: String::new(),
            last_interaction_time: None,
            version: 0,
        }
    }
}

impl Default for EmotionalState {
    fn default() -> Self {
        Self::new(Mood::Neutral, 80, 20, 50)
    }
}

pub struct StateUpdateEngine;

impl StateUpdateEngine {
    pub fn new() -> Self {
        StateUpdateEngine
    }

    /// Compute the state that follows `prior` after the user said `user_message`.
    ///
    /// `ai_response` is accepted so callers can pass the generated reply once
    /// available; no rule reads it yet. `now` becomes `last_interaction_time`.
    pub fn update(
        prior: &EmotionalState,
        user_message: &str,
        _ai_response: Option<&str>,
        now: DateTime<Utc>,
    ) -> EmotionalState {
        let mut next = prior.clone();
        let message = user_message.to_lowercase();

        if contains_any(&message, POSITIVE_WORDS) {
            next.trust = prior.trust.shift(2);
            next.stress = prior.stress.shift(-3);
            next.mood = Mood::Happy;
        } else if contains_any(&message, NEGATIVE_WORDS) {
            next.trust = prior.trust.shift(-1);
            next.stress = prior.stress.shift(5);
            next.mood = Mood::Anxious;
        }

        if contains_any(&message, QUESTION_WORDS) {
            next.mood = Mood::Curious;
            next.energy = prior.energy.shift(-2);
        } else {
            next.energy = prior.energy.shift(-1);
        }

        next.consecutive_ignored = 0;
        next.last_interaction_type = INTERACTION_CONVERSATION.to_string();
        next.last_interaction_time = Some(now);

        debug!(
            mood_before = %prior.mood,
            mood_after = %next.mood,
            energy = next.energy.value(),
            stress = next.stress.value(),
            trust = next.trust.value(),
            "emotional state updated"
        );

        next
    }
}

impl Default for StateUpdateEngine {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn baseline() -> EmotionalState {
        EmotionalState::new(Mood::Neutral, 50, 50, 50)
    }

    #[test]
    fn test_positive_message_raises_trust() {
        let next = StateUpdateEngine::update(&baseline(), "gracias, eres genial", None, Utc::now());
        assert_eq!(next.mood, Mood::Happy);
        assert_eq!(next.trust.value(), 52);
        assert_eq!(next.stress.value(), 47);
        assert_eq!(next.energy.value(), 49);
    }

    #[test]
    fn test_question_sets_curious() {
        let next = StateUpdateEngine::update(&baseline(), "¿por qué?", None, Utc::now());
        assert_eq!(next.mood, Mood::Curious);
        assert_eq!(next.energy.value(), 48);
        assert_eq!(next.stress.value(), 50);
        assert_eq!(next.trust.value(), 50);
    }

    #[test]
    fn test_negative_message_raises_stress() {
        let next = StateUpdateEngine::update(&baseline(), "Fue un día horrible", None, Utc::now());
        assert_eq!(next.mood, Mood::Anxious);
        assert_eq!(next.trust.value(), 49);
        assert_eq!(next.stress.value(), 55);
    }

    #[test]
    fn test_question_overrides_sentiment_mood() {
        let next = StateUpdateEngine::update(&baseline(), "¿por qué estás tan enojado?", None, Utc::now());
        assert_eq!(next.mood, Mood::Curious);
        assert_eq!(next.stress.value(), 55);
    }

    #[test]
    fn test_unmatched_message_keeps_mood() {
        let mut prior = baseline();
        prior.mood = Mood::Playful;
        let next = StateUpdateEngine::update(&prior, "hola", None, Utc::now());
        assert_eq!(next.mood, Mood::Playful);
        assert_eq!(next.energy.value(), 49);
    }

    #[test]
    fn test_bookkeeping_fields_reset() {
        let mut prior = baseline();
        prior.consecutive_ignored = 7;
        let now = Utc::now();
        let next = StateUpdateEngine::update(&prior, "hola", Some("¡Hola!"), now);
        assert_eq!(next.consecutive_ignored, 0);
        assert_eq!(next.last_interaction_type, INTERACTION_CONVERSATION);
        assert_eq!(next.last_interaction_time, Some(now));
    }

    #[test]
    fn test_bounds_hold_at_extremes() {
        let prior = EmotionalState::new(Mood::Neutral, 0, 100, 0);
        let next = StateUpdateEngine::update(&prior, "todo es terrible, ¿qué hago?", None, Utc::now());
        assert_eq!(next.energy.value(), 0);
        assert_eq!(next.stress.value(), 100);
        assert_eq!(next.trust.value(), 0);

        let prior = EmotionalState::new(Mood::Neutral, 100, 0, 100);
        let next = StateUpdateEngine::update(&prior, "perfecto", None, Utc::now());
        assert_eq!(next.trust.value(), 100);
        assert_eq!(next.stress.value(), 0);
    }

    #[test]
    fn test_mood_parse_roundtrip_and_reject() {
        for mood in Mood::ALL {
            assert_eq!(mood.name().parse::<Mood>().unwrap(), mood);
        }
        assert!("furious".parse::<Mood>().is_err());
        assert!(serde_json::from_str::<Mood>("\"furious\"").is_err());
    }
}
