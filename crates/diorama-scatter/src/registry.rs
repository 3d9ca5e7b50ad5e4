//! Object class registry: maps class names to their builders.

use hashbrown::HashMap;

use crate::builder::ObjectBuilder;
use crate::classes::{Building, Cactus, Rock, Tree};

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct ObjectClassId(pub u16);

/// Errors that can occur when registering object classes.
#[derive(Debug, thiserror::Error)]
pub enum RegistryError {
    /// A class with this name is already registered.
    #[error("duplicate object class: {0}")]
    DuplicateClass(String),
}

pub struct ObjectRegistry {
    builders: Vec<Box<dyn ObjectBuilder>>,
    name_to_id: HashMap<String, ObjectClassId>,
}

impl ObjectRegistry {
    pub fn new() -> Self {
        Self {
            builders: Vec::new(),
            name_to_id: HashMap::new(),
        }
    }

    /// Registry with the built-in tree, rock, cactus and building classes.
    pub fn with_defaults() -> Self {
        let mut registry = Self::new();
        let defaults: [Box<dyn ObjectBuilder>; 4] = [
            Box::new(Building::new()),
            Box::new(Tree::new()),
            Box::new(Rock::new()),
            Box::new(Cactus::new()),
        ];
        for builder in defaults {
            if let Err(err) = registry.register(builder) {
                tracing::error!(%err, "built-in object class rejected");
            }
        }
        registry
    }

    /// # Errors
    ///
    /// Returns [`RegistryError::DuplicateClass`] if the class name is taken.
    pub fn register(&mut self, builder: Box<dyn ObjectBuilder>) -> Result<ObjectClassId, RegistryError> {
        let name = builder.config().name.clone();
        if self.name_to_id.contains_key(&name) {
            return Err(RegistryError::DuplicateClass(name));
        }
        let id = ObjectClassId(self.builders.len() as u16);
        self.name_to_id.insert(name, id);
        self.builders.push(builder);
        Ok(id)
    }

    /// # Panics
    ///
    /// Panics if `id` is out of range.
    pub fn get(&self, id: ObjectClassId) -> &dyn ObjectBuilder {
        self.builders[id.0 as usize].as_ref()
    }

    pub fn lookup_by_name(&self, name: &str) -> Option<ObjectClassId> {
        self.name_to_id.get(name).copied()
    }

    pub fn by_name(&self, name: &str) -> Option<&dyn ObjectBuilder> {
        self.lookup_by_name(name).map(|id| self.get(id))
    }

    pub fn len(&self) -> usize {
        self.builders.len()
    }

    pub fn is_empty(&self) -> bool {
        self.builders.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &dyn ObjectBuilder> {
        self.builders.iter().map(|b| b.as_ref())
    }

    /// Asset keys requested by registered classes, in registration order.
    pub fn asset_keys(&self) -> Vec<&str> {
        self.iter().filter_map(|b| b.config().asset.as_deref()).collect()
    }
}

impl Default for ObjectRegistry {
    fn default() -> Self {
        Self::with_defaults()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::classes::CACTUS_MODEL_KEY;

    #[test]
    fn test_defaults() {
        let registry = ObjectRegistry::with_defaults();
        assert_eq!(registry.len(), 4);
        for name in ["tree", "rock", "cactus", "building"] {
            let builder = registry.by_name(name).expect("registered");
            assert_eq!(builder.config().name, name);
            assert!(builder.config().missing_metadata().is_none(), "{name} is complete");
        }
    }

    #[test]
    fn test_duplicate_rejected() {
        let mut registry = ObjectRegistry::with_defaults();
        let err = registry.register(Box::new(Tree::new())).expect_err("duplicate");
        assert!(matches!(err, RegistryError::DuplicateClass(ref n) if n == "tree"));
    }

    #[test]
    fn test_asset_keys() {
        let registry = ObjectRegistry::with_defaults();
        assert_eq!(registry.asset_keys(), vec![CACTUS_MODEL_KEY]);
        assert!(ObjectRegistry::new().asset_keys().is_empty());
    }
}
