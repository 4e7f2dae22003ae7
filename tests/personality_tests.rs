use chrono::{Duration, Utc};
use emo_companion_core::config::EvolutionConfig;
use emo_companion_core::modules::personality::BALANCED_DESCRIPTION;
use emo_companion_core::{
    EmotionalState, InMemoryProfileStore, PersonalityEvolutionEngine, Profile, ProfileStore, Score, StoreError,
    TraitVector,
};

fn state_seen(ago: Option<Duration>) -> EmotionalState {
    let mut state = EmotionalState::default();
    state.last_interaction_time = ago.map(|d| Utc::now() - d);
    state
}

#[test]
fn test_describe_balanced() {
    assert_eq!(PersonalityEvolutionEngine::describe(&TraitVector::default()), BALANCED_DESCRIPTION);
}

#[test]
fn test_describe_curious_and_casual() {
    let mut traits = TraitVector::default();
    traits.curiosity = Score::clamped(85);
    traits.formality = Score::clamped(20);

    assert_eq!(
        PersonalityEvolutionEngine::describe(&traits),
        "Eres extremadamente curioso e inquisitivo, casual y relajado."
    );
}

#[test]
fn test_describe_thresholds_are_strict() {
    let mut traits = TraitVector::default();
    traits.empathy = Score::clamped(70);
    traits.energy = Score::clamped(80);
    assert_eq!(PersonalityEvolutionEngine::describe(&traits), BALANCED_DESCRIPTION);

    traits.energy = Score::clamped(81);
    assert_eq!(PersonalityEvolutionEngine::describe(&traits), "Eres lleno de energía.");
}

#[test]
fn test_slang_and_laughter() {
    let engine = PersonalityEvolutionEngine::default();
    let profile = Profile::new("user-1");
    let traits = engine.evolve(&profile, "jajaja che loco", &state_seen(Some(Duration::minutes(5))), Utc::now());

    assert_eq!(traits.humor.value(), 52);
    assert_eq!(traits.formality.value(), 48);
    assert_eq!(traits.energy.value(), 49);
    assert_eq!(traits.emotional_dependency.value(), 50);
}

#[test]
fn test_aggression_costs_double_empathy() {
    let engine = PersonalityEvolutionEngine::new(EvolutionConfig::new(3));
    let profile = Profile::new("user-1");
    let traits = engine.evolve(&profile, "eres un inútil", &state_seen(None), Utc::now());

    assert_eq!(traits.empathy.value(), 44);
}

#[test]
fn test_long_message_raises_extroversion() {
    let engine = PersonalityEvolutionEngine::default();
    let profile = Profile::new("user-1");
    let message = "a".repeat(201);
    let traits = engine.evolve(&profile, &message, &state_seen(Some(Duration::seconds(30))), Utc::now());

    assert_eq!(traits.extroversion.value(), 52);
    assert_eq!(traits.emotional_dependency.value(), 49);
    assert_eq!(traits.energy.value(), 51);
}

#[test]
fn test_ignored_turns_raise_dependency() {
    let engine = PersonalityEvolutionEngine::default();
    let profile = Profile::new("user-1");
    let mut state = state_seen(Some(Duration::hours(1)));
    state.consecutive_ignored = 4;

    let traits = engine.evolve(&profile, "hola", &state, Utc::now());
    assert_eq!(traits.emotional_dependency.value(), 52);
}

#[test]
fn test_traits_stay_in_range() {
    let engine = PersonalityEvolutionEngine::new(EvolutionConfig::new(50));
    let profile = Profile::new("user-1").with_traits(TraitVector::uniform(90));
    let traits = engine.evolve(&profile, "¿por qué? gracias jaja", &state_seen(None), Utc::now());

    for (_, score) in traits.named() {
        assert!(score <= Score::MAX);
    }
    assert_eq!(traits.curiosity, Score::MAX);
    assert_eq!(traits.empathy, Score::MAX);
}

#[test]
fn test_decay_energy() {
    let decayed = PersonalityEvolutionEngine::decay_energy(&TraitVector::uniform(0));
    assert_eq!(decayed.energy, Score::MIN);

    let decayed = PersonalityEvolutionEngine::decay_energy(&TraitVector::default());
    assert_eq!(decayed.energy.value(), 49);
}

#[tokio::test]
async fn test_evolve_and_store_bumps_version() {
    let store = InMemoryProfileStore::new();
    let (profile, state) = store.create_profile("user-1").await.unwrap();
    let engine = PersonalityEvolutionEngine::default();

    let updated = engine
        .evolve_and_store(&store, &profile, "¿cómo estás?", &state, Utc::now())
        .await
        .unwrap();

    assert_eq!(updated.version, profile.version + 1);
    assert_eq!(updated.traits.curiosity.value(), 52);
    assert_eq!(store.get_profile(&profile.id).await.unwrap().traits, updated.traits);

    let stale = engine
        .evolve_and_store(&store, &profile, "hola", &state, Utc::now())
        .await;
    assert!(matches!(stale, Err(StoreError::Conflict { .. })));
}
