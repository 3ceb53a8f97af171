use crate::core::Hint;
use std::collections::HashMap;
use std::sync::Arc;

pub struct HintRegistry {
    hints: HashMap<String, Arc<dyn Hint>>,
}

impl HintRegistry {
    pub fn new() -> Self {
        Self {
            hints: HashMap::new(),
        }
    }

    pub fn register<H: Hint + 'static>(&mut self, hint: H) {
        let id = hint.id().to_string();
        self.hints.insert(id, Arc::new(hint));
    }

    pub fn register_shared(&mut self, hint: Arc<dyn Hint>) {
        let id = hint.id().to_string();
        self.hints.insert(id, hint);
    }

    pub fn get(&self, id: &str) -> Option<Arc<dyn Hint>> {
        self.hints.get(id).cloned()
    }

    pub fn all(&self) -> Vec<Arc<dyn Hint>> {
        self.hints.values().cloned().collect()
    }

    pub fn by_category(&self, category: crate::core::Category) -> Vec<Arc<dyn Hint>> {
        self.hints
            .values()
            .filter(|h| h.category() == category)
            .cloned()
            .collect()
    }

    pub fn recommended(&self) -> Vec<Arc<dyn Hint>> {
        self.hints
            .values()
            .filter(|h| h.recommended())
            .cloned()
            .collect()
    }

    pub fn list_ids(&self) -> Vec<String> {
        self.hints.keys().cloned().collect()
    }
}

impl Default for HintRegistry {
    fn default() -> Self {
        Self::new()
    }
}

pub struct HintRegistryBuilder {
    registry: HintRegistry,
}

impl HintRegistryBuilder {
    pub fn new() -> Self {
        Self {
            registry: HintRegistry::new(),
        }
    }

    pub fn with_hint<H: Hint + 'static>(mut self, hint: H) -> Self {
        self.registry.register(hint);
        self
    }

    pub fn with_shared_hint(mut self, hint: Arc<dyn Hint>) -> Self {
        self.registry.register_shared(hint);
        self
    }

    pub fn build(self) -> HintRegistry {
        self.registry
    }
}

impl Default for HintRegistryBuilder {
    fn default() -> Self {
        Self::new()
    }
}
