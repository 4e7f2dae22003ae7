pub mod evolution;
pub mod traits;

pub use evolution::{PersonalityEvolutionEngine, BALANCED_DESCRIPTION};
pub use traits::{Profile, ProfileId, TraitVector};
