//! The one asynchronous step: resolving every model the object classes ask
//! for before generation begins.

use diorama_scatter::ObjectRegistry;
use diorama_scene::{AssetCache, AssetError, AssetSource, prepare_assets};

/// Asset keys requested by the built-in object classes.
pub fn required_asset_keys() -> Vec<String> {
    ObjectRegistry::with_defaults()
        .asset_keys()
        .into_iter()
        .map(str::to_owned)
        .collect()
}

/// Resolve [`required_asset_keys`] through `source`.
///
/// # Errors
///
/// Propagates the first [`AssetError`] from `source`.
pub async fn prepare<S: AssetSource>(source: &S) -> Result<AssetCache, AssetError> {
    let keys = required_asset_keys();
    prepare_assets(source, keys.iter().map(String::as_str)).await
}

#[cfg(test)]
mod tests {
    use super::*;
    use diorama_scene::Model;

    struct EmptyModels;

    impl AssetSource for EmptyModels {
        async fn load(&self, _key: &str) -> Result<Model, AssetError> {
            Ok(Model::default())
        }
    }

    #[test]
    fn test_required_keys_include_cactus_model() {
        assert_eq!(required_asset_keys(), vec!["models/cactus_01.glb".to_string()]);
    }

    #[test]
    fn test_prepare_fills_cache() {
        let cache = pollster::block_on(prepare(&EmptyModels)).unwrap();
        assert!(cache.contains("models/cactus_01.glb"));
    }
}
