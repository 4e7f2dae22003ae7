//! Slow drift of the personality trait vector.
//!
//! Every heuristic is independent and additive: a single message can move
//! several traits at once, each by `trait_change_rate` unless noted. Results
//! are always clamped to [0, 100].

use crate::config::EvolutionConfig;
use crate::error::StoreResult;
use crate::modules::emotion::EmotionalState;
use crate::modules::memory::ProfileStore;
use crate::modules::personality::traits::{Profile, TraitVector};
use crate::utils::contains_any;
use chrono::{DateTime, Utc};
use tracing::debug;

const LONG_MESSAGE_CHARS: usize = 200;
const FREQUENT_INTERACTION_MS: i64 = 60_000;
const ACTIVE_INTERACTION_MS: i64 = 120_000;
const IGNORED_TURNS_LIMIT: u32 = 3;

const CURIOUS_MARKERS: &[&str] = &["?", "por qué", "cómo"];
const POSITIVE_WORDS: &[&str] = &["gracias", "amo", "feliz", "contento", "alegre", "bien"];
const AGGRESSIVE_WORDS: &[&str] = &["idiota", "estúpido", "cállate", "inútil"];
const LAUGHTER_MARKERS: &[&str] = &["jaja", "jeje", "😂", "😄"];
const SLANG_MARKERS: &[&str] = &["che", "wey", "loco"];

const HIGH: u8 = 70;
const LOW: u8 = 30;
const ENERGY_HIGH: u8 = 80;

pub const BALANCED_DESCRIPTION: &str = "Tienes una personalidad equilibrada.";

pub struct PersonalityEvolutionEngine {
    config: EvolutionConfig,
}

impl PersonalityEvolutionEngine {
    pub fn new(config: EvolutionConfig) -> Self {
        Self { config }
    }

    /// New trait vector for `profile` after reading `user_message`.
    ///
    /// Elapsed time is measured from `state.last_interaction_time` to `now`;
    /// a state that never interacted counts as zero elapsed.
    pub fn evolve(
        &self,
        profile: &Profile,
        user_message: &str,
        state: &EmotionalState,
        now: DateTime<Utc>,
    ) -> TraitVector {
        let rate = self.config.trait_change_rate;
        let mut traits = profile.traits;
        let message = user_message.to_lowercase();

        if user_message.chars().count() > LONG_MESSAGE_CHARS {
            traits.extroversion = traits.extroversion.shift(rate);
        }

        if contains_any(&message, CURIOUS_MARKERS) {
            traits.curiosity = traits.curiosity.shift(rate);
        }

        if contains_any(&message, POSITIVE_WORDS) {
            traits.empathy = traits.empathy.shift(rate);
        }
        if contains_any(&message, AGGRESSIVE_WORDS) {
            traits.empathy = traits.empathy.shift(-2 * rate);
        }

        if contains_any(&message, LAUGHTER_MARKERS) {
            traits.humor = traits.humor.shift(rate);
        }

        let elapsed_ms = state
            .last_interaction_time
            .map(|last| (now - last).num_milliseconds())
            .unwrap_or(0);

        if state.consecutive_ignored > IGNORED_TURNS_LIMIT {
            traits.emotional_dependency = traits.emotional_dependency.shift(rate);
        }
        if elapsed_ms < FREQUENT_INTERACTION_MS {
            traits.emotional_dependency = traits.emotional_dependency.shift(-1);
        }

        if contains_any(&message, SLANG_MARKERS) {
            traits.formality = traits.formality.shift(-rate);
        }

        if elapsed_ms < ACTIVE_INTERACTION_MS {
            traits.energy = traits.energy.shift(1);
        } else {
            traits.energy = traits.energy.shift(-1);
        }

        debug!(profile_id = %profile.id, elapsed_ms, ?traits, "personality evolved");

        traits
    }

    /// Evolve and hand the result to the store, guarded by the profile version.
    pub async fn evolve_and_store(
        &self,
        store: &dyn ProfileStore,
        profile: &Profile,
        user_message: &str,
        state: &EmotionalState,
        now: DateTime<Utc>,
    ) -> StoreResult<Profile> {
        let traits = self.evolve(profile, user_message, state, now);
        let version = store.save_traits(&profile.id, traits, profile.version).await?;

        let mut updated = profile.clone();
        updated.traits = traits;
        updated.version = version;
        Ok(updated)
    }

    /// Idle decay of the energy trait, run outside of conversation turns.
    pub fn decay_energy(traits: &TraitVector) -> TraitVector {
        let mut decayed = *traits;
        decayed.energy = decayed.energy.shift(-1);
        decayed
    }

    /// Second-person sketch of the personality for the prompt.
    pub fn describe(traits: &TraitVector) -> String {
        let mut phrases = Vec::new();

        if traits.extroversion.is_above(HIGH) {
            phrases.push("muy extrovertido y conversador");
        } else if traits.extroversion.is_below(LOW) {
            phrases.push("reservado y reflexivo");
        }

        if traits.curiosity.is_above(HIGH) {
            phrases.push("extremadamente curioso e inquisitivo");
        }

        if traits.empathy.is_above(HIGH) {
            phrases.push("muy empático y comprensivo");
        } else if traits.empathy.is_below(LOW) {
            phrases.push("más lógico que emocional");
        }

        if traits.humor.is_above(HIGH) {
            phrases.push("juguetón y le gusta bromear");
        }

        if traits.emotional_dependency.is_above(HIGH) {
            phrases.push("necesita atención frecuente");
        }

        if traits.formality.is_above(HIGH) {
            phrases.push("formal y educado");
        } else if traits.formality.is_below(LOW) {
            phrases.push("casual y relajado");
        }

        // energy uses a higher bar than the other traits
        if traits.energy.is_above(ENERGY_HIGH) {
            phrases.push("lleno de energía");
        } else if traits.energy.is_below(LOW) {
            phrases.push("un poco cansado");
        }

        if phrases.is_empty() {
            BALANCED_DESCRIPTION.to_string()
        } else {
            format!("Eres {}.", phrases.join(", "))
        }
    }
}

impl Default for PersonalityEvolutionEngine {
    fn default() -> Self {
        Self::new(EvolutionConfig::default())
    }
}
