//! Rule-based extraction of durable facts from a user message.
//!
//! Detectors run in a fixed order over the lower-cased message and fire
//! independently, so one message can yield zero, one or several memories:
//!
//! 1. Preferences ("me gusta el X", "amo la X", "adoro X") and their negated
//!    forms ("no me gusta el X", "odio los X", "detesto X"), weight 60.
//! 2. Strong emotions from four fixed keyword groups, weights 80/85/75/70.
//! 3. Life events from fixed phrases, weight 90, content is the first 100
//!    characters of the raw message.

use crate::error::StoreResult;
use crate::modules::memory::record::{MemoryCategory, MemoryRecord};
use crate::modules::memory::store::ProfileStore;
use crate::modules::personality::ProfileId;
use crate::utils::{contains_any, truncate_chars};
use lazy_static::lazy_static;
use regex::Regex;
use tracing::debug;

pub const PREFERENCE_WEIGHT: u8 = 60;
pub const EVENT_WEIGHT: u8 = 90;
pub const EVENT_CONTENT_CHARS: usize = 100;

const LIKE_PREFIX: &str = "Le gusta";
const DISLIKE_PREFIX: &str = "No le gusta";

struct EmotionGroup {
    words: &'static [&'static str],
    emotion: &'static str,
    weight: u8,
}

const STRONG_EMOTIONS: &[EmotionGroup] = &[
    EmotionGroup {
        words: &["muy feliz", "súper feliz", "eufórico"],
        emotion: "felicidad extrema",
        weight: 80,
    },
    EmotionGroup {
        words: &["muy triste", "deprimido", "devastado"],
        emotion: "tristeza profunda",
        weight: 85,
    },
    EmotionGroup {
        words: &["furioso", "enojado", "molesto"],
        emotion: "enojo",
        weight: 75,
    },
    EmotionGroup {
        words: &["ansioso", "nervioso", "preocupado"],
        emotion: "ansiedad",
        weight: 70,
    },
];

lazy_static! {
    static ref LIKE_PATTERNS: Vec<Regex> = compile(&[
        r"\bme gusta (?:el|la|los|las) ([a-záéíóúñü\s]+)",
        r"\bamo (?:el|la|los|las) ([a-záéíóúñü\s]+)",
        r"\badoro ([a-záéíóúñü\s]+)",
    ]);
    static ref DISLIKE_PATTERNS: Vec<Regex> = compile(&[
        r"\bno me gusta (?:el|la|los|las) ([a-záéíóúñü\s]+)",
        r"\bodio (?:el|la|los|las) ([a-záéíóúñü\s]+)",
        r"\bdetesto ([a-záéíóúñü\s]+)",
    ]);
    static ref EVENT_PATTERNS: Vec<Regex> = compile(&[
        r"\bmi cumpleaños",
        r"\bme gradué",
        r"\bconseguí (?:un|el) trabajo",
        r"\bme casé",
        r"\bmurió",
    ]);
}

fn compile(patterns: &[&str]) -> Vec<Regex> {
    patterns
        .iter()
        .filter_map(|pattern| Regex::new(pattern).ok())
        .collect()
}

/// The word right before `offset`, used to reject "no me gusta" as a like.
fn negated_at(message: &str, offset: usize) -> bool {
    message[..offset].split_whitespace().last() == Some("no")
}

pub struct MemoryExtractionEngine;

impl MemoryExtractionEngine {
    /// Candidate memories for `message`, not yet persisted.
    pub fn extract(message: &str, profile_id: &ProfileId) -> Vec<MemoryRecord> {
        let lowered = message.to_lowercase();
        let mut memories = Vec::new();

        for pattern in LIKE_PATTERNS.iter() {
            let object = pattern
                .captures_iter(&lowered)
                .filter(|captures| {
                    let start = captures.get(0).map(|m| m.start()).unwrap_or(0);
                    !negated_at(&lowered, start)
                })
                .find_map(|captures| captures.get(1));

            if let Some(object) = object {
                memories.push(Self::preference(profile_id, LIKE_PREFIX, object.as_str()));
            }
        }

        for pattern in DISLIKE_PATTERNS.iter() {
            if let Some(object) = pattern.captures(&lowered).and_then(|c| c.get(1)) {
                memories.push(Self::preference(profile_id, DISLIKE_PREFIX, object.as_str()));
            }
        }

        for group in STRONG_EMOTIONS {
            if contains_any(&lowered, group.words) {
                memories.push(MemoryRecord::new(
                    profile_id.clone(),
                    format!("Usuario expresó {}", group.emotion),
                    MemoryCategory::Emotion,
                    group.weight,
                ));
            }
        }

        for pattern in EVENT_PATTERNS.iter() {
            if pattern.is_match(&lowered) {
                memories.push(MemoryRecord::new(
                    profile_id.clone(),
                    truncate_chars(message, EVENT_CONTENT_CHARS),
                    MemoryCategory::Event,
                    EVENT_WEIGHT,
                ));
            }
        }

        debug!(profile_id = %profile_id, count = memories.len(), "memories extracted");

        memories
    }

    /// Extract and persist every candidate before returning them.
    pub async fn extract_and_store(
        store: &dyn ProfileStore,
        message: &str,
        profile_id: &ProfileId,
    ) -> StoreResult<Vec<MemoryRecord>> {
        let memories = Self::extract(message, profile_id);

        for memory in &memories {
            store.insert_memory(memory.clone()).await?;
        }

        Ok(memories)
    }

    fn preference(profile_id: &ProfileId, prefix: &str, object: &str) -> MemoryRecord {
        MemoryRecord::new(
            profile_id.clone(),
            format!("{}: {}", prefix, object.trim()),
            MemoryCategory::Preference,
            PREFERENCE_WEIGHT,
        )
    }
}
