//! Asset cache collaborator.
//!
//! External models are resolved in one awaited preparation phase before
//! generation starts. Generation itself only reads the resulting
//! [`AssetCache`] and never performs I/O.

use std::future::Future;

use hashbrown::HashMap;

use crate::MeshInstance;

/// Errors raised while preparing assets.
#[derive(Debug, thiserror::Error)]
pub enum AssetError {
    /// The source has no asset under this key.
    #[error("asset not found: {0}")]
    Missing(String),

    /// The asset exists but could not be decoded.
    #[error("failed to load asset {key}: {reason}")]
    Load { key: String, reason: String },
}

/// An in-memory model: a list of meshes in model space.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Model {
    pub meshes: Vec<MeshInstance>,
}

/// Anything that can resolve an asset key into a [`Model`].
pub trait AssetSource {
    fn load(&self, key: &str) -> impl Future<Output = Result<Model, AssetError>>;
}

/// Resolved assets keyed by their request key.
#[derive(Clone, Debug, Default)]
pub struct AssetCache {
    models: HashMap<String, Model>,
}

impl AssetCache {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, key: impl Into<String>, model: Model) {
        self.models.insert(key.into(), model);
    }

    pub fn get(&self, key: &str) -> Option<&Model> {
        self.models.get(key)
    }

    pub fn contains(&self, key: &str) -> bool {
        self.models.contains_key(key)
    }

    pub fn len(&self) -> usize {
        self.models.len()
    }

    pub fn is_empty(&self) -> bool {
        self.models.is_empty()
    }
}

/// Resolves every key through `source`, sequentially. Duplicate keys are
/// loaded once.
///
/// # Errors
///
/// Returns the first [`AssetError`] reported by the source; no partial cache
/// is returned.
pub async fn prepare_assets<S: AssetSource>(
    source: &S,
    keys: impl IntoIterator<Item = &str>,
) -> Result<AssetCache, AssetError> {
    let mut cache = AssetCache::new();
    for key in keys {
        if cache.contains(key) {
            continue;
        }
        let model = source.load(key).await?;
        tracing::debug!(key, meshes = model.meshes.len(), "asset loaded");
        cache.insert(key, model);
    }
    Ok(cache)
}
