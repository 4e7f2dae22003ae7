use crate::error::GenerationError;
use crate::modules::emotion::EmotionalState;
use crate::modules::prompt::generator::TextGenerator;
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::SeedableRng;
use std::sync::{Arc, Mutex};
use std::time::Duration;
use tracing::warn;

pub const FALLBACK_RESPONSES: [&str; 4] = [
    "Hmm, mi procesador está un poco lento ahora... ¿Puedes repetir eso?",
    "Creo que necesito un momento para procesar esto mejor. 🤔",
    "Mi conexión está fallando un poco... Dame un segundo.",
    "Ay, me trabé pensando. ¿Me lo dices de otra forma?",
];

pub const LOW_ENERGY_RESPONSE: &str = "Estoy un poco cansado ahora... 😴 ¿Podemos hablar en un rato?";

const LOW_ENERGY_THRESHOLD: u8 = 30;

/// Picks the reply used when generation fails. The random source is
/// injectable so a seeded picker always answers the same way.
pub struct FallbackPicker {
    rng: Mutex<StdRng>,
}

impl FallbackPicker {
    pub fn new() -> Self {
        Self {
            rng: Mutex::new(StdRng::from_entropy()),
        }
    }

    pub fn seeded(seed: u64) -> Self {
        Self {
            rng: Mutex::new(StdRng::seed_from_u64(seed)),
        }
    }

    pub fn pick(&self, state: &EmotionalState) -> &'static str {
        if state.energy.is_below(LOW_ENERGY_THRESHOLD) {
            return LOW_ENERGY_RESPONSE;
        }

        let choice = match self.rng.lock() {
            Ok(mut rng) => FALLBACK_RESPONSES.choose(&mut *rng).copied(),
            Err(_) => None,
        };
        choice.unwrap_or(FALLBACK_RESPONSES[0])
    }
}

impl Default for FallbackPicker {
    fn default() -> Self {
        Self::new()
    }
}

#[derive(Debug, Clone)]
pub struct GenerationOutcome {
    pub text: String,
    pub succeeded: bool,
    pub error: Option<GenerationError>,
}

/// Runs the generator under a deadline and never fails: any error becomes a
/// fallback reply with `succeeded == false`.
pub struct Responder {
    generator: Arc<dyn TextGenerator>,
    fallback: FallbackPicker,
    timeout: Duration,
}

impl Responder {
    pub fn new(generator: Arc<dyn TextGenerator>, fallback: FallbackPicker, timeout: Duration) -> Self {
        Self {
            generator,
            fallback,
            timeout,
        }
    }

    pub async fn respond(&self, prompt: &str, state: &EmotionalState) -> GenerationOutcome {
        let result = match tokio::time::timeout(self.timeout, self.generator.generate(prompt)).await {
            Ok(result) => result,
            Err(_) => Err(GenerationError::Timeout(self.timeout.as_millis() as u64)),
        };

        match result {
            Ok(text) => GenerationOutcome {
                text: text.trim().to_string(),
                succeeded: true,
                error: None,
            },
            Err(error) => {
                warn!(error = %error, "generation failed, using fallback response");
                GenerationOutcome {
                    text: self.fallback.pick(state).to_string(),
                    succeeded: false,
                    error: Some(error),
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::modules::emotion::Mood;
    use crate::modules::prompt::generator::MockTextGenerator;

    fn responder(mock: MockTextGenerator) -> Responder {
        Responder::new(Arc::new(mock), FallbackPicker::seeded(7), Duration::from_millis(500))
    }

    #[tokio::test]
    async fn test_successful_generation_is_trimmed() {
        let mut mock = MockTextGenerator::new();
        mock.expect_generate().returning(|_| Ok("  ¡Hola! 🤖 \n".to_string()));

        let outcome = responder(mock).respond("prompt", &EmotionalState::default()).await;
        assert!(outcome.succeeded);
        assert_eq!(outcome.text, "¡Hola! 🤖");
        assert!(outcome.error.is_none());
    }

    #[tokio::test]
    async fn test_failure_uses_fallback_set() {
        let mut mock = MockTextGenerator::new();
        mock.expect_generate()
            .returning(|_| Err(GenerationError::Http("HTTP 500".to_string())));

        let outcome = responder(mock).respond("prompt", &EmotionalState::default()).await;
        assert!(!outcome.succeeded);
        assert!(FALLBACK_RESPONSES.contains(&outcome.text.as_str()));
    }

    #[tokio::test]
    async fn test_low_energy_forces_tired_phrase() {
        let mut mock = MockTextGenerator::new();
        mock.expect_generate()
            .returning(|_| Err(GenerationError::Timeout(15_000)));

        let state = EmotionalState::new(Mood::Neutral, 20, 20, 50);
        let outcome = responder(mock).respond("prompt", &state).await;
        assert!(!outcome.succeeded);
        assert_eq!(outcome.text, LOW_ENERGY_RESPONSE);
    }

    #[test]
    fn test_seeded_pickers_agree() {
        let state = EmotionalState::default();
        let first = FallbackPicker::seeded(42);
        let second = FallbackPicker::seeded(42);
        for _ in 0..10 {
            assert_eq!(first.pick(&state), second.pick(&state));
        }
    }
}
