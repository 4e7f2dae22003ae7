pub mod assembler;
pub mod generator;
pub mod responder;

pub use assembler::{PromptAssembler, FIRST_INTERACTION, NO_MEMORIES};
pub use generator::{GeminiGenerator, TextGenerator};
pub use responder::{FallbackPicker, GenerationOutcome, Responder, FALLBACK_RESPONSES, LOW_ENERGY_RESPONSE};
