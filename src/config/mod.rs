pub mod companion_config;

pub use companion_config::{CompanionConfig, EvolutionConfig, GenerationConfig, Identity, MemoryConfig};
