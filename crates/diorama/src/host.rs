//! Ownership of the diorama currently on display.

use diorama_config::DioramaConfig;
use diorama_scene::AssetCache;

use crate::generate::Diorama;

/// Holds the prepared assets and the live diorama.
///
/// Regeneration builds the replacement completely before it is swapped in,
/// so callers never observe a partially built diorama.
#[derive(Debug, Default)]
pub struct DioramaHost {
    assets: AssetCache,
    current: Option<Diorama>,
}

impl DioramaHost {
    pub fn new(assets: AssetCache) -> Self {
        Self {
            assets,
            current: None,
        }
    }

    pub fn current(&self) -> Option<&Diorama> {
        self.current.as_ref()
    }

    pub fn assets(&self) -> &AssetCache {
        &self.assets
    }

    /// Build a diorama for `config` and make it current. Returns the
    /// detached previous diorama, if any, for the caller to drop.
    pub fn regenerate(&mut self, config: &DioramaConfig) -> Option<Diorama> {
        let next = Diorama::generate(config, &self.assets);
        self.current.replace(next)
    }

    /// Detach the current diorama.
    pub fn clear(&mut self) -> Option<Diorama> {
        self.current.take()
    }
}
