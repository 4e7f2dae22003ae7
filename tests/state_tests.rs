use chrono::Utc;
use emo_companion_core::{EmotionalState, Mood, Profile, Score, StateUpdateEngine, VoiceParams, VoiceProfileMapper};

fn baseline() -> EmotionalState {
    EmotionalState::new(Mood::Neutral, 50, 50, 50)
}

#[test]
fn test_gratitude_makes_happy() {
    let next = StateUpdateEngine::update(&baseline(), "gracias, eres genial", None, Utc::now());

    assert_eq!(next.mood, Mood::Happy);
    assert_eq!(next.trust.value(), 52);
    assert_eq!(next.stress.value(), 47);
    assert_eq!(next.energy.value(), 49);
    assert_eq!(next.consecutive_ignored, 0);
    assert!(next.last_interaction_time.is_some());
}

#[test]
fn test_question_makes_curious() {
    let next = StateUpdateEngine::update(&baseline(), "¿Por qué el cielo es azul?", None, Utc::now());

    assert_eq!(next.mood, Mood::Curious);
    assert_eq!(next.energy.value(), 48);
    assert_eq!(next.trust.value(), 50);
    assert_eq!(next.stress.value(), 50);
}

#[test]
fn test_negative_words_raise_stress() {
    let next = StateUpdateEngine::update(&baseline(), "Hoy fue un día terrible", None, Utc::now());

    assert_eq!(next.mood, Mood::Anxious);
    assert_eq!(next.stress.value(), 55);
    assert_eq!(next.trust.value(), 49);
}

#[test]
fn test_neutral_message_keeps_mood() {
    let prior = EmotionalState::new(Mood::Sad, 50, 50, 50);
    let next = StateUpdateEngine::update(&prior, "hola", None, Utc::now());

    assert_eq!(next.mood, Mood::Sad);
    assert_eq!(next.energy.value(), 49);
}

#[test]
fn test_scores_stay_in_range() {
    let mut state = EmotionalState::new(Mood::Neutral, 1, 99, 100);
    for _ in 0..10 {
        state = StateUpdateEngine::update(&state, "terrible, ¿cómo pasó?", None, Utc::now());
    }
    assert_eq!(state.energy, Score::MIN);
    assert_eq!(state.stress, Score::MAX);

    let mut state = EmotionalState::new(Mood::Neutral, 50, 1, 99);
    for _ in 0..10 {
        state = StateUpdateEngine::update(&state, "gracias", None, Utc::now());
    }
    assert_eq!(state.trust, Score::MAX);
    assert_eq!(state.stress, Score::MIN);
}

#[test]
fn test_mood_serializes_lowercase() {
    let json = serde_json::to_string(&Mood::Curious).unwrap();
    assert_eq!(json, "\"curious\"");
    assert_eq!("tired".parse::<Mood>().unwrap(), Mood::Tired);
    assert!("furious".parse::<Mood>().is_err());
}

#[test]
fn test_voice_mapping() {
    let profile = Profile::new("user-1");
    let voice = |mood, energy| VoiceProfileMapper::map_voice(&EmotionalState::new(mood, energy, 20, 50), &profile);

    assert_eq!(voice(Mood::Neutral, 50), VoiceParams::default());
    assert_eq!(voice(Mood::Curious, 90).values(), (1.2, 1.0));
    assert_eq!(voice(Mood::Happy, 20).values(), (1.1, 1.1));
    assert_eq!(voice(Mood::Sad, 90).values(), (0.85, 0.9));
    assert_eq!(voice(Mood::Anxious, 50).values(), (1.15, 1.0));
    assert_eq!(voice(Mood::Tired, 90).values(), (0.8, 1.0));
}
