pub mod bounded;
pub mod emotion;
pub mod memory;
pub mod personality;
pub mod prompt;
