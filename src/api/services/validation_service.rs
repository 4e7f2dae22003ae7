use crate::error::{EngineError, EngineResult};

/// Reject messages the pipeline must never see.
pub fn validate_message(message: &str) -> EngineResult<&str> {
    if message.trim().is_empty() {
        return Err(EngineError::Validation("message is empty".to_string()));
    }
    if message.contains('\0') {
        return Err(EngineError::Validation("message contains NUL characters".to_string()));
    }
    Ok(message)
}

pub fn validate_user_id(user_id: &str) -> EngineResult<&str> {
    if user_id.trim().is_empty() {
        return Err(EngineError::Validation("user id is empty".to_string()));
    }
    Ok(user_id)
}
