pub mod extractor;
pub mod record;
pub mod selector;
pub mod store;

pub use extractor::MemoryExtractionEngine;
pub use record::{Interaction, MemoryCategory, MemoryRecord};
pub use selector::{MemoryMaintenance, MemorySelectionEngine};
pub use store::{InMemoryProfileStore, ProfileStore};
