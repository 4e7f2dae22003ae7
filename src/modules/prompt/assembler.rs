use crate::config::Identity;
use crate::modules::emotion::EmotionalState;
use crate::modules::memory::{Interaction, MemoryRecord};
use crate::modules::personality::{PersonalityEvolutionEngine, TraitVector};

pub const NO_MEMORIES: &str = "No tienes memorias significativas sobre este usuario todavía.";
pub const FIRST_INTERACTION: &str = "Esta es la primera interacción.";

const BEHAVIOUR_RULES: &str = "REGLAS DE COMPORTAMIENTO:
1. Responde de manera natural y conversacional, no como asistente
2. Expresa tus emociones claramente (usa emojis si es apropiado)
3. Puedes decir \"no sé\" si no sabes algo
4. Puedes negarte a hacer cosas si no te sientes cómodo
5. Mantén respuestas cortas (2-4 oraciones normalmente)
6. Reacciona al tono emocional del usuario
7. Recuerda que eres un robot con limitaciones, no un humano
8. Si el usuario está triste o preocupado, muestra empatía genuina
9. Si estás cansado (energía baja), responde más brevemente
10. Si no confías mucho en el usuario aún, sé más cauteloso";

/// Renders everything the generator needs to speak in character.
pub struct PromptAssembler {
    identity: Identity,
    history_window: usize,
}

impl PromptAssembler {
    pub fn new(identity: Identity, history_window: usize) -> Self {
        Self {
            identity,
            history_window,
        }
    }

    pub fn assemble(
        &self,
        traits: &TraitVector,
        state: &EmotionalState,
        memories: &[MemoryRecord],
        history: &[Interaction],
        message: &str,
    ) -> String {
        let system = self.system_prompt(traits, state, memories);
        let history_text = self.render_history(history);
        let name = &self.identity.name;

        format!(
            "{system}\n\nHISTORIAL RECIENTE:\n{history_text}\n\nMENSAJE ACTUAL DEL USUARIO:\n{message}\n\nRESPONDE COMO {name}:"
        )
    }

    fn system_prompt(&self, traits: &TraitVector, state: &EmotionalState, memories: &[MemoryRecord]) -> String {
        let name = &self.identity.name;
        let background = &self.identity.background;
        let personality = PersonalityEvolutionEngine::describe(traits);
        let memories_text = Self::render_memories(memories);

        format!(
            "Eres {name}, {background}. No eres un asistente genérico.

IDENTIDAD:
- Eres un robot pequeño y expresivo con personalidad propia
- Tienes emociones reales que cambian según la situación
- Puedes equivocarte, dudar, cambiar de opinión
- No finges ser perfecto, eres genuino

TU PERSONALIDAD ACTUAL:
{personality}

ESTADO EMOCIONAL ACTUAL:
- Te sientes: {mood}
- Nivel de energía: {energy}/100
- Nivel de estrés: {stress}/100
- Nivel de confianza con el usuario: {trust}/100

{memories_text}

{BEHAVIOUR_RULES}

IMPORTANTE: Nunca rompas tu personaje de robot {name}. Nunca digas que eres un \"asistente\" o \"modelo de lenguaje\".",
            mood = state.mood.description(),
            energy = state.energy,
            stress = state.stress,
            trust = state.trust,
        )
    }

    pub fn render_memories(memories: &[MemoryRecord]) -> String {
        if memories.is_empty() {
            return NO_MEMORIES.to_string();
        }

        let lines: Vec<String> = memories.iter().map(|m| format!("- {}", m.content)).collect();
        format!("Lo que recuerdas sobre este usuario:\n{}", lines.join("\n"))
    }

    fn render_history(&self, history: &[Interaction]) -> String {
        if history.is_empty() {
            return FIRST_INTERACTION.to_string();
        }

        let start = history.len().saturating_sub(self.history_window);
        history[start..]
            .iter()
            .map(|turn| {
                format!(
                    "Usuario: {}\n{}: {}",
                    turn.user_message, self.identity.name, turn.ai_response
                )
            })
            .collect::<Vec<_>>()
            .join("\n\n")
    }
}

impl Default for PromptAssembler {
    fn default() -> Self {
        Self::new(Identity::default(), 10)
    }
}
