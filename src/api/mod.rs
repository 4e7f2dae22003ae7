pub mod services;
pub mod types;

pub use services::{CompanionEngine, SessionHandle, SessionRegistry};
pub use types::{SessionEvent, StateSnapshot, TurnInput, TurnOutcome, UserId};
