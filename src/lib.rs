pub mod api;
pub mod config;
pub mod error;
pub mod modules;
pub mod utils;

#[cfg(test)]
mod _test_mock;

pub use api::{CompanionEngine, SessionEvent, SessionRegistry, StateSnapshot, TurnInput, TurnOutcome};
pub use config::{CompanionConfig, EvolutionConfig, GenerationConfig, Identity, MemoryConfig};
pub use error::{ConfigError, EngineError, EngineResult, GenerationError, StoreError, StoreResult};
pub use modules::bounded::Score;
pub use modules::emotion::{EmotionalState, Mood, StateUpdateEngine, VoiceParams, VoiceProfileMapper};
pub use modules::memory::{
    InMemoryProfileStore, Interaction, MemoryCategory, MemoryExtractionEngine, MemoryMaintenance, MemoryRecord,
    MemorySelectionEngine, ProfileStore,
};
pub use modules::personality::{PersonalityEvolutionEngine, Profile, ProfileId, TraitVector};
pub use modules::prompt::{FallbackPicker, GeminiGenerator, PromptAssembler, Responder, TextGenerator};
