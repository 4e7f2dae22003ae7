pub mod session_service;
pub mod turn_service;
pub mod validation_service;

pub use session_service::{SessionHandle, SessionRegistry};
pub use turn_service::CompanionEngine;
pub use validation_service::{validate_message, validate_user_id};
