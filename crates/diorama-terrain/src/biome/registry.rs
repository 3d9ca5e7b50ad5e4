//! Biome registry: name-based lookup of [`Biome`] definitions.

use hashbrown::HashMap;

use super::Biome;

/// Unique identifier for a biome.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct BiomeId(pub u16);

/// Errors that can occur when registering biomes.
#[derive(Debug, thiserror::Error)]
pub enum BiomeRegistryError {
    /// A biome with this name is already registered.
    #[error("duplicate biome name: {0}")]
    DuplicateName(String),
}

pub struct BiomeRegistry {
    biomes: Vec<Biome>,
    name_to_id: HashMap<String, BiomeId>,
}

impl BiomeRegistry {
    /// Creates an empty registry.
    pub fn new() -> Self {
        Self {
            biomes: Vec::new(),
            name_to_id: HashMap::new(),
        }
    }

    /// Registry holding the built-in temperate, desert and arctic biomes.
    pub fn with_defaults() -> Self {
        let mut registry = Self::new();
        for biome in [Biome::temperate(), Biome::desert(), Biome::arctic()] {
            if let Err(err) = registry.register(biome) {
                tracing::error!(%err, "built-in biome rejected");
            }
        }
        registry
    }

    /// # Errors
    ///
    /// Returns [`BiomeRegistryError::DuplicateName`] if a biome with the same name exists.
    pub fn register(&mut self, biome: Biome) -> Result<BiomeId, BiomeRegistryError> {
        if self.name_to_id.contains_key(&biome.name) {
            return Err(BiomeRegistryError::DuplicateName(biome.name.clone()));
        }
        let id = BiomeId(self.biomes.len() as u16);
        self.name_to_id.insert(biome.name.clone(), id);
        self.biomes.push(biome);
        Ok(id)
    }

    /// # Panics
    ///
    /// Panics if `id` is out of range.
    pub fn get(&self, id: BiomeId) -> &Biome {
        &self.biomes[id.0 as usize]
    }

    pub fn lookup_by_name(&self, name: &str) -> Option<BiomeId> {
        self.name_to_id.get(name).copied()
    }

    pub fn by_name(&self, name: &str) -> Option<&Biome> {
        self.lookup_by_name(name).map(|id| self.get(id))
    }

    /// Look up `name`, falling back to the first registered biome with a
    /// warning when it is unknown.
    pub fn resolve(&self, name: &str) -> Option<&Biome> {
        match self.by_name(name) {
            Some(biome) => Some(biome),
            None => {
                let fallback = self.biomes.first()?;
                tracing::warn!(biome = name, fallback = %fallback.name, "unknown biome");
                Some(fallback)
            }
        }
    }

    pub fn len(&self) -> usize {
        self.biomes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.biomes.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Biome> {
        self.biomes.iter()
    }
}

impl Default for BiomeRegistry {
    fn default() -> Self {
        Self::with_defaults()
    }
}
