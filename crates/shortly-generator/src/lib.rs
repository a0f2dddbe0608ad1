pub mod random;

pub use random::RandomGenerator;
use shortly_core::Alias;

/// Trait for generating aliases.
///
/// Implementations are pure generators that don't interact with storage,
/// so a generated alias may still collide with a stored one. Callers
/// resolve collisions by asking for another alias.
pub trait Generator: Send + Sync + 'static {
    fn generate(&self) -> Alias;
}
