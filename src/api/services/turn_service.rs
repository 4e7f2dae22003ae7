use crate::api::services::validation_service::{validate_message, validate_user_id};
use crate::api::types::{TurnInput, TurnOutcome};
use crate::config::CompanionConfig;
use crate::error::{EngineError, EngineResult, StoreError};
use crate::modules::emotion::{StateUpdateEngine, VoiceProfileMapper};
use crate::modules::memory::{Interaction, MemoryExtractionEngine, MemorySelectionEngine, ProfileStore};
use crate::modules::personality::{PersonalityEvolutionEngine, Profile, ProfileId};
use crate::modules::prompt::{FallbackPicker, PromptAssembler, Responder, TextGenerator};
use chrono::Utc;
use futures_util::future::try_join;
use std::sync::Arc;
use std::time::{Duration, Instant};
use tracing::{error, info};

/// Runs one conversation turn end to end against the store and generator.
pub struct CompanionEngine {
    config: CompanionConfig,
    store: Arc<dyn ProfileStore>,
    responder: Responder,
    assembler: PromptAssembler,
    evolution: PersonalityEvolutionEngine,
    selection: MemorySelectionEngine,
}

fn store_failure<'a>(stage: &'static str, profile_id: &'a ProfileId) -> impl FnOnce(StoreError) -> EngineError + 'a {
    move |e| {
        error!(stage, profile_id = %profile_id, error = %e, "store write failed, aborting turn");
        EngineError::Store(e)
    }
}

impl CompanionEngine {
    pub fn new(
        config: CompanionConfig,
        store: Arc<dyn ProfileStore>,
        generator: Arc<dyn TextGenerator>,
        fallback: FallbackPicker,
    ) -> Self {
        let timeout = Duration::from_millis(config.generation.timeout_ms);
        Self {
            responder: Responder::new(generator, fallback, timeout),
            assembler: PromptAssembler::new(config.identity.clone(), config.generation.history_window),
            evolution: PersonalityEvolutionEngine::new(config.evolution.clone()),
            selection: MemorySelectionEngine::new(config.memory.clone()),
            store,
            config,
        }
    }

    pub fn config(&self) -> &CompanionConfig {
        &self.config
    }

    pub fn store(&self) -> &Arc<dyn ProfileStore> {
        &self.store
    }

    /// The profile owned by `user_id`, created with default traits on first contact.
    pub async fn profile_for_user(&self, user_id: &str) -> EngineResult<Profile> {
        validate_user_id(user_id)?;

        if let Some(profile) = self.store.get_profile_by_user(user_id).await? {
            return Ok(profile);
        }

        let (profile, _) = self.store.create_profile(user_id).await?;
        info!(user_id, profile_id = %profile.id, "profile created");
        Ok(profile)
    }

    /// Load everything a turn needs from the store, then run it.
    pub async fn chat(&self, profile_id: &ProfileId, message: &str) -> EngineResult<TurnOutcome> {
        validate_message(message)?;

        let profile = self.store.get_profile(profile_id).await?;
        let state = self.store.get_state(profile_id).await?;
        let history = self
            .store
            .recent_interactions(profile_id, self.config.generation.history_window)
            .await?;
        let memories = self.selection.select_default(self.store.as_ref(), profile_id).await?;

        self.process_turn(TurnInput {
            profile,
            state,
            memories,
            history,
            message: message.to_string(),
        })
        .await
    }

    pub async fn process_turn(&self, input: TurnInput) -> EngineResult<TurnOutcome> {
        let started = Instant::now();
        validate_message(&input.message)?;

        let TurnInput {
            profile,
            state,
            memories,
            history,
            message,
        } = input;
        let store = self.store.as_ref();
        let now = Utc::now();

        let mut new_state = StateUpdateEngine::update(&state, &message, None, now);
        let (extracted, state_version) = try_join(
            MemoryExtractionEngine::extract_and_store(store, &message, &profile.id),
            store.save_state(&profile.id, &new_state, state.version),
        )
        .await
        .map_err(store_failure("extraction/state", &profile.id))?;
        new_state.version = state_version;

        let evolved = self
            .evolution
            .evolve_and_store(store, &profile, &message, &new_state, now)
            .await
            .map_err(store_failure("personality", &profile.id))?;

        let prompt = self
            .assembler
            .assemble(&evolved.traits, &new_state, &memories, &history, &message);
        let generated = self.responder.respond(&prompt, &new_state).await;

        let interaction = Interaction {
            id: uuid::Uuid::new_v4().to_string(),
            profile_id: profile.id.clone(),
            user_message: message.clone(),
            ai_response: generated.text.clone(),
            mood_before: state.mood,
            mood_after: new_state.mood,
            energy_before: state.energy,
            energy_after: new_state.energy,
            response_time_ms: started.elapsed().as_millis() as u64,
            created_at: Utc::now(),
        };
        let interaction_id = interaction.id.clone();

        store
            .append_interaction(interaction)
            .await
            .map_err(store_failure("interaction", &profile.id))?;
        store
            .increment_interaction_count(&profile.id)
            .await
            .map_err(store_failure("interaction_count", &profile.id))?;

        let voice = VoiceProfileMapper::map_voice(&new_state, &evolved);

        info!(
            profile_id = %profile.id,
            mood = %new_state.mood,
            succeeded = generated.succeeded,
            extracted = extracted.len(),
            elapsed_ms = started.elapsed().as_millis() as u64,
            "turn completed"
        );

        Ok(TurnOutcome {
            response_text: generated.text,
            new_state,
            traits: evolved.traits,
            voice,
            succeeded: generated.succeeded,
            extracted,
            interaction_id,
        })
    }
}
