use crate::Generator;
use rand::distributions::Alphanumeric;
use rand::Rng;
use shortly_core::Alias;
use typed_builder::TypedBuilder;

pub const DEFAULT_ALIAS_LENGTH: usize = 6;

/// Generates aliases of `[A-Za-z0-9]` characters with a fixed length.
///
/// The length is clamped to what [`Alias`] accepts, and reserved names
/// are never handed out.
#[derive(Debug, Clone, TypedBuilder)]
pub struct RandomGenerator {
    #[builder(default = DEFAULT_ALIAS_LENGTH)]
    length: usize,
}

impl Default for RandomGenerator {
    fn default() -> Self {
        Self::builder().build()
    }
}

impl Generator for RandomGenerator {
    fn generate(&self) -> Alias {
        let length = self.length.clamp(Alias::MIN_LENGTH, Alias::MAX_LENGTH);
        let mut rng = rand::thread_rng();

        // only a reserved route name can fail validation here
        loop {
            let candidate: String = (&mut rng)
                .sample_iter(&Alphanumeric)
                .take(length)
                .map(char::from)
                .collect();
            if let Ok(alias) = Alias::new(candidate) {
                return alias;
            }
        }
    }
}
