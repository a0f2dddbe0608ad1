use std::sync::Arc;

use shortly_core::Repository;
use shortly_generator::Generator;

#[derive(Clone)]
pub struct AppState {
    repository: Arc<dyn Repository>,
    generator: Arc<dyn Generator>,
}

impl AppState {
    pub fn new(repository: Arc<dyn Repository>, generator: Arc<dyn Generator>) -> Self {
        Self {
            repository,
            generator,
        }
    }

    pub fn repository(&self) -> &dyn Repository {
        self.repository.as_ref()
    }

    pub fn generator(&self) -> &dyn Generator {
        self.generator.as_ref()
    }
}
