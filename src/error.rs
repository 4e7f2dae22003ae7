use thiserror::Error;

/// Sentence shown to the user whenever a turn cannot be completed.
pub const PUBLIC_FAILURE_MESSAGE: &str = "Lo siento, algo salió mal... 😔";

#[derive(Error, Debug, Clone, PartialEq)]
pub enum StoreError {
    #[error("{kind} '{id}' not found")]
    NotFound { kind: &'static str, id: String },

    #[error("Version conflict on {kind} '{id}': expected {expected}, found {actual}")]
    Conflict {
        kind: &'static str,
        id: String,
        expected: u64,
        actual: u64,
    },

    #[error("Invalid record: {0}")]
    InvalidRecord(String),

    #[error("Store backend error: {0}")]
    Backend(String),
}

#[derive(Error, Debug, Clone)]
pub enum GenerationError {
    #[error("Generation timed out after {0} ms")]
    Timeout(u64),

    #[error("Generation service unavailable: {0}")]
    Unavailable(String),

    #[error("HTTP error: {0}")]
    Http(String),

    #[error("Invalid response: {0}")]
    InvalidResponse(String),
}

impl From<reqwest::Error> for GenerationError {
    fn from(error: reqwest::Error) -> Self {
        if error.is_timeout() {
            GenerationError::Unavailable(format!("request timed out: {}", error))
        } else {
            GenerationError::Http(error.to_string())
        }
    }
}

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to parse config: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("Invalid config: {0}")]
    Invalid(String),
}

#[derive(Error, Debug)]
pub enum EngineError {
    #[error("Invalid input: {0}")]
    Validation(String),

    /// Part of the error taxonomy only: the responder recovers every
    /// generation failure with a fallback reply, so a turn never returns it.
    #[error("Collaborator unavailable: {0}")]
    CollaboratorUnavailable(#[from] GenerationError),

    #[error("Store error: {0}")]
    Store(#[from] StoreError),

    #[error("Config error: {0}")]
    Config(#[from] ConfigError),
}

impl EngineError {
    /// The only text a caller outside the engine should ever see.
    pub fn public_message(&self) -> &'static str {
        match self {
            EngineError::Validation(_) => "Mensaje inválido",
            _ => PUBLIC_FAILURE_MESSAGE,
        }
    }
}

pub type EngineResult<T> = Result<T, EngineError>;
pub type StoreResult<T> = Result<T, StoreError>;
